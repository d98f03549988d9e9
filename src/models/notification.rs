use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    NewAnswer,
    AnswerAccepted,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification to be written for a recipient.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
}

// Notification listing row, with the related question's title
#[derive(Debug, Serialize, FromRow)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: Option<String>,
    pub question_id: Option<Uuid>,
    pub answer_id: Option<Uuid>,
    pub question_title: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

// Body of the read/delete endpoints
#[derive(Debug, Deserialize)]
pub struct NotificationOwnerRequest {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
}
