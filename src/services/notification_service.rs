use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::Result,
    models::{NewNotification, Notification, NotificationResponse},
};

/// Most recent notifications returned by a listing.
pub const NOTIFICATION_LIST_LIMIT: i64 = 50;

/// Users are never notified about their own actions.
pub fn should_notify(recipient_id: Uuid, actor_id: Uuid) -> bool {
    recipient_id != actor_id
}

#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

impl NotificationService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fire-and-forget: a failed insert is logged and swallowed so the
    /// triggering request still succeeds.
    pub async fn notify(&self, notification: NewNotification) {
        let recipient_id = notification.recipient_id;
        let notification_type = notification.notification_type;

        match self.create_notification(notification).await {
            Ok(created) => {
                tracing::debug!(
                    notification_id = %created.id,
                    %recipient_id,
                    ?notification_type,
                    "Notification created"
                );
            }
            Err(e) => {
                tracing::warn!(
                    %recipient_id,
                    ?notification_type,
                    "Failed to create notification: {}",
                    e
                );
            }
        }
    }

    /// Create a new notification
    pub async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        let created = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                id, recipient_id, notification_type, title, message,
                question_id, answer_id, is_read, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE, NOW())
            RETURNING id, recipient_id, notification_type, title, message,
                      question_id, answer_id, is_read, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(notification.recipient_id)
        .bind(notification.notification_type)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.question_id)
        .bind(notification.answer_id)
        .fetch_one(&self.db)
        .await?;

        Ok(created)
    }

    /// Most recent notifications for a user, newest first
    pub async fn get_user_notifications(&self, user_id: Uuid) -> Result<Vec<NotificationResponse>> {
        let notifications = sqlx::query_as::<_, NotificationResponse>(
            r#"
            SELECT
                n.id, n.notification_type, n.title, n.message,
                n.question_id, n.answer_id, q.title AS question_title,
                n.is_read, n.created_at
            FROM notifications n
            LEFT JOIN questions q ON n.question_id = q.id
            WHERE n.recipient_id = $1
            ORDER BY n.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(NOTIFICATION_LIST_LIMIT)
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    /// Get unread notification count
    pub async fn get_unread_count(&self, user_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(count)
    }

    /// Returns whether a notification owned by the user was marked.
    pub async fn mark_notification_read(&self, user_id: Uuid, notification_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND recipient_id = $2",
        )
        .bind(notification_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_all_notifications_read(&self, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE recipient_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_notification(&self, user_id: Uuid, notification_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
            .bind(notification_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
