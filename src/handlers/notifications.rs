use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::{
    AppState,
    error::Result,
    handlers::{ApiJson, ApiPath},
    models::NotificationOwnerRequest,
    services::notification_service::NotificationService,
};

// Every query filters on the recipient id; ids belonging to someone else
// simply match no rows.

pub async fn get_notifications(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let notification_service = NotificationService::new(state.db.clone());

    let notifications = notification_service.get_user_notifications(user_id).await?;
    let unread_count = notification_service.get_unread_count(user_id).await?;

    Ok(Json(json!({
        "notifications": notifications,
        "unread_count": unread_count
    })))
}

pub async fn get_unread_count(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let count = NotificationService::new(state.db)
        .get_unread_count(user_id)
        .await?;

    Ok(Json(json!({
        "unread_count": count
    })))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    ApiPath(notification_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NotificationOwnerRequest>,
) -> Result<Json<Value>> {
    let updated = NotificationService::new(state.db)
        .mark_notification_read(payload.user_id, notification_id)
        .await?;

    Ok(Json(json!({
        "message": "Notification marked as read",
        "updated": updated
    })))
}

pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NotificationOwnerRequest>,
) -> Result<Json<Value>> {
    let updated = NotificationService::new(state.db)
        .mark_all_notifications_read(payload.user_id)
        .await?;

    Ok(Json(json!({
        "message": "All notifications marked as read",
        "updated": updated
    })))
}

pub async fn delete_notification(
    State(state): State<AppState>,
    ApiPath(notification_id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<NotificationOwnerRequest>,
) -> Result<Json<Value>> {
    let deleted = NotificationService::new(state.db)
        .delete_notification(payload.user_id, notification_id)
        .await?;

    Ok(Json(json!({
        "message": "Notification deleted",
        "deleted": deleted
    })))
}
