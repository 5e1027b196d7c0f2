use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::notification_models::{Notification, NotificationType, RelatedObject};

/// A notification as the list and feed endpoints expose it.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationPayload {
    pub id: i64,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: String,
    pub is_read: bool,
}

impl From<&Notification> for NotificationPayload {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.notification_type.display_name().to_string(),
            timestamp: notification.timestamp(),
            is_read: notification.is_read,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationPayload>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: i64,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecentNotificationsResponse {
    pub notifications: Vec<NotificationPayload>,
    pub unread_count: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub related: Option<RelatedObject>,
}
