use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{Answer, NewNotification, NotificationType},
    services::notification_service::{NotificationService, should_notify},
};

/// Marks `answer_id` as the accepted answer of `question_id`.
///
/// Clearing the previous acceptance and setting the new one happen in one
/// transaction that holds the question row lock, so concurrent accepts on
/// the same question serialize and at most one answer ends up accepted.
pub async fn accept_answer(
    db: &PgPool,
    answer_id: Uuid,
    question_id: Uuid,
    requester_id: Uuid,
) -> Result<Answer> {
    let mut tx = db.begin().await?;

    let question = sqlx::query_as::<_, (Uuid, String)>(
        "SELECT user_id, title FROM questions WHERE id = $1 FOR UPDATE",
    )
    .bind(question_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some((owner_id, question_title)) = question else {
        return Err(AppError::NotFound("Question not found".to_string()));
    };

    if owner_id != requester_id {
        return Err(AppError::Authorization(
            "Only the question owner can accept an answer".to_string(),
        ));
    }

    let previous = sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, question_id, user_id, body, is_accepted, created_at, updated_at
        FROM answers
        WHERE id = $1 AND question_id = $2
        FOR UPDATE
        "#,
    )
    .bind(answer_id)
    .bind(question_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Answer not found for this question".to_string()))?;

    sqlx::query("UPDATE answers SET is_accepted = FALSE WHERE question_id = $1 AND is_accepted")
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

    let accepted = sqlx::query_as::<_, Answer>(
        r#"
        UPDATE answers
        SET is_accepted = TRUE
        WHERE id = $1
        RETURNING id, question_id, user_id, body, is_accepted, created_at, updated_at
        "#,
    )
    .bind(answer_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(%answer_id, %question_id, "Answer accepted");

    if !previous.is_accepted && should_notify(accepted.user_id, requester_id) {
        NotificationService::new(db.clone())
            .notify(NewNotification {
                recipient_id: accepted.user_id,
                notification_type: NotificationType::AnswerAccepted,
                title: "Your answer was accepted".to_string(),
                message: Some(format!(
                    "Your answer to \"{}\" was marked as the accepted answer",
                    question_title
                )),
                question_id: Some(question_id),
                answer_id: Some(answer_id),
            })
            .await;
    }

    Ok(accepted)
}
