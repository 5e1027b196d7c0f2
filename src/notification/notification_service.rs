use crate::error::{AppError, Result};
use uuid::Uuid;
use super::notification_models::{NewNotification, Notification, NotificationType, RelatedObject};
use super::notification_repository::NotificationRepository;

pub const WELCOME_TITLE: &str = "Welcome to RMS";
pub const WELCOME_MESSAGE: &str =
    "Welcome to the Rental Management System. This is a test notification.";

/// One page of a recipient's notifications, newest first.
#[derive(Debug, Clone)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub page: u32,
    pub total_pages: u32,
    pub total_count: i64,
    pub unread_count: i64,
}

impl NotificationPage {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Business rules for notifications: paging, the welcome notification,
/// and read-state transitions.
#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    /// Creates a notification for any recipient, optionally linked to a
    /// related record.
    pub async fn notify(
        &self,
        recipient_id: Uuid,
        notification_type: NotificationType,
        title: &str,
        message: &str,
        related: Option<RelatedObject>,
    ) -> Result<Notification> {
        let notification = self
            .repo
            .create(&NewNotification {
                recipient_id,
                notification_type,
                title: title.to_string(),
                message: message.to_string(),
                related,
            })
            .await?;

        tracing::info!(
            "Created {} notification {} for {}",
            notification.notification_type,
            notification.id,
            recipient_id
        );
        Ok(notification)
    }

    pub async fn list_page(
        &self,
        recipient_id: Uuid,
        requested_page: Option<&str>,
        page_size: u32,
    ) -> Result<NotificationPage> {
        self.ensure_welcome(recipient_id).await?;

        let page_size = page_size.max(1);
        let total_count = self.repo.count_by_recipient(recipient_id).await?;
        let total_pages = total_pages(total_count, page_size);
        let page = resolve_page(requested_page, total_pages);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let notifications = self
            .repo
            .find_page(recipient_id, i64::from(page_size), offset)
            .await?;
        let unread_count = self.repo.count_unread(recipient_id).await?;

        Ok(NotificationPage {
            notifications,
            page,
            total_pages,
            total_count,
            unread_count,
        })
    }

    pub async fn recent_unread(&self, recipient_id: Uuid, limit: u32) -> Result<(Vec<Notification>, i64)> {
        let notifications = self
            .repo
            .find_recent_unread(recipient_id, i64::from(limit))
            .await?;
        let unread_count = self.repo.count_unread(recipient_id).await?;

        Ok((notifications, unread_count))
    }

    /// Marks one notification read. Already-read notifications are returned
    /// unchanged.
    pub async fn mark_as_read(&self, id: i64, recipient_id: Uuid) -> Result<Notification> {
        let notification = self
            .repo
            .find_by_id(id, recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        if notification.is_read {
            return Ok(notification);
        }

        // Another request may have flipped it between the two queries.
        match self.repo.mark_as_read(id, recipient_id).await? {
            Some(updated) => Ok(updated),
            None => self
                .repo
                .find_by_id(id, recipient_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Notification not found".to_string())),
        }
    }

    pub async fn mark_all_read(&self, recipient_id: Uuid) -> Result<u64> {
        let updated = self.repo.mark_all_read(recipient_id).await?;
        tracing::debug!("Marked {} notifications read for {}", updated, recipient_id);
        Ok(updated)
    }

    async fn ensure_welcome(&self, recipient_id: Uuid) -> Result<()> {
        let welcome = NewNotification {
            recipient_id,
            notification_type: NotificationType::System,
            title: WELCOME_TITLE.to_string(),
            message: WELCOME_MESSAGE.to_string(),
            related: None,
        };

        if let Some(created) = self.repo.create_if_none(&welcome).await? {
            tracing::info!("Created welcome notification {} for {}", created.id, recipient_id);
        }
        Ok(())
    }
}

fn total_pages(total_count: i64, page_size: u32) -> u32 {
    let pages = (total_count.max(0) as u64).div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// Non-numeric input selects the first page; numbers outside
/// `1..=total_pages` select the last page.
pub fn resolve_page(requested: Option<&str>, total_pages: u32) -> u32 {
    match requested.map(|raw| raw.trim().parse::<i64>()) {
        None | Some(Err(_)) => 1,
        Some(Ok(n)) if n >= 1 && n <= i64::from(total_pages) => n as u32,
        Some(Ok(_)) => total_pages,
    }
}
