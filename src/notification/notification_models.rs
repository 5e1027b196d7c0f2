use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::renderer;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum NotificationType {
    PaymentDue,
    PaymentReceived,
    MaintenanceUpdate,
    LeaseUpdate,
    System,
}

impl NotificationType {
    pub fn display_name(&self) -> &'static str {
        match self {
            NotificationType::PaymentDue => "Payment Due",
            NotificationType::PaymentReceived => "Payment Received",
            NotificationType::MaintenanceUpdate => "Maintenance Update",
            NotificationType::LeaseUpdate => "Lease Update",
            NotificationType::System => "System Notification",
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The record a notification points at (an invoice, a maintenance request, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RelatedObject {
    pub kind: String,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Notification {
    pub id: i64,
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related_type: Option<String>,
    pub related_id: Option<i64>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn related(&self) -> Option<RelatedObject> {
        match (&self.related_type, self.related_id) {
            (Some(kind), Some(id)) => Some(RelatedObject {
                kind: kind.clone(),
                id,
            }),
            _ => None,
        }
    }
}

impl From<&Notification> for renderer::Notification {
    fn from(notification: &Notification) -> Self {
        Self {
            id: renderer::NotificationId::from(notification.id),
            message: notification.message.clone(),
            timestamp: notification.timestamp(),
            is_read: notification.is_read,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub related: Option<RelatedObject>,
}
