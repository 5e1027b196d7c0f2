use crate::db::DbPool;
use crate::error::Result;
use chrono::Utc;
use uuid::Uuid;
use super::notification_models::{NewNotification, Notification};

#[derive(Clone)]
pub struct NotificationRepository {
    pool: DbPool,
}

impl NotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count_by_recipient(&self, recipient_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = ?"
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn count_unread(&self, recipient_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = ? AND is_read = 0"
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn find_page(&self, recipient_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = ?
             ORDER BY created_at DESC, id DESC
             LIMIT ? OFFSET ?"
        )
        .bind(recipient_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn find_recent_unread(&self, recipient_id: Uuid, limit: i64) -> Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE recipient_id = ? AND is_read = 0
             ORDER BY created_at DESC, id DESC
             LIMIT ?"
        )
        .bind(recipient_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications)
    }

    pub async fn find_by_id(&self, id: i64, recipient_id: Uuid) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE id = ? AND recipient_id = ?"
        )
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_as_read(&self, id: i64, recipient_id: Uuid) -> Result<Option<Notification>> {
        let notification = sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET is_read = 1, updated_at = ?
             WHERE id = ? AND recipient_id = ? AND is_read = 0
             RETURNING *"
        )
        .bind(Utc::now())
        .bind(id)
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn mark_all_read(&self, recipient_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = 1, updated_at = ?
             WHERE recipient_id = ? AND is_read = 0"
        )
        .bind(Utc::now())
        .bind(recipient_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Inserts `new` only when its recipient has no notifications yet. The
    /// check and the insert are one statement, so concurrent first visits
    /// cannot both insert.
    pub async fn create_if_none(&self, new: &NewNotification) -> Result<Option<Notification>> {
        let now = Utc::now();
        let (related_type, related_id) = match &new.related {
            Some(related) => (Some(related.kind.as_str()), Some(related.id)),
            None => (None, None),
        };

        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications
                (recipient_id, notification_type, title, message, related_type, related_id, created_at, updated_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?
             WHERE NOT EXISTS (SELECT 1 FROM notifications WHERE recipient_id = ?)
             RETURNING *"
        )
        .bind(new.recipient_id)
        .bind(new.notification_type)
        .bind(&new.title)
        .bind(&new.message)
        .bind(related_type)
        .bind(related_id)
        .bind(now)
        .bind(now)
        .bind(new.recipient_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification)
    }

    pub async fn create(&self, new: &NewNotification) -> Result<Notification> {
        let now = Utc::now();
        let (related_type, related_id) = match &new.related {
            Some(related) => (Some(related.kind.as_str()), Some(related.id)),
            None => (None, None),
        };

        let notification = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications
                (recipient_id, notification_type, title, message, related_type, related_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
        .bind(new.recipient_id)
        .bind(new.notification_type)
        .bind(&new.title)
        .bind(&new.message)
        .bind(related_type)
        .bind(related_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }
}
