use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        Answer, AnswerResponse, CreateAnswerRequest, NewNotification, NotificationType,
        UpdateAnswerRequest,
    },
    services::{
        notification_service::{NotificationService, should_notify},
        question_service, user_service,
    },
};

const ANSWER_COLUMNS: &str = "id, question_id, user_id, body, is_accepted, created_at, updated_at";

pub async fn get_answer_by_id_raw(db: &PgPool, answer_id: Uuid) -> Result<Option<Answer>> {
    let answer = sqlx::query_as::<_, Answer>(&format!(
        "SELECT {ANSWER_COLUMNS} FROM answers WHERE id = $1"
    ))
    .bind(answer_id)
    .fetch_optional(db)
    .await?;

    Ok(answer)
}

/// Net score of an answer: +1 per up vote, -1 per down vote.
pub async fn get_vote_count<'e, E>(executor: E, answer_id: Uuid) -> Result<i64>
where
    E: PgExecutor<'e>,
{
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COALESCE(SUM(CASE WHEN vote_type = 'up' THEN 1 ELSE -1 END), 0)::BIGINT
        FROM answer_votes
        WHERE answer_id = $1
        "#,
    )
    .bind(answer_id)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub async fn create_answer(db: &PgPool, request: &CreateAnswerRequest) -> Result<AnswerResponse> {
    let question = question_service::get_question_by_id_raw(db, request.question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;
    let author = user_service::require_user(db, request.user_id).await?;

    let answer = sqlx::query_as::<_, Answer>(&format!(
        r#"
        INSERT INTO answers (id, question_id, user_id, body, is_accepted, created_at, updated_at)
        VALUES ($1, $2, $3, $4, FALSE, NOW(), NOW())
        RETURNING {ANSWER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(question.id)
    .bind(author.id)
    .bind(&request.answer)
    .fetch_one(db)
    .await?;

    tracing::info!(answer_id = %answer.id, question_id = %question.id, "Answer posted");

    if should_notify(question.user_id, author.id) {
        NotificationService::new(db.clone())
            .notify(NewNotification {
                recipient_id: question.user_id,
                notification_type: NotificationType::NewAnswer,
                title: "New answer to your question".to_string(),
                message: Some(format!(
                    "{} answered your question \"{}\"",
                    author.username, question.title
                )),
                question_id: Some(question.id),
                answer_id: Some(answer.id),
            })
            .await;
    }

    Ok(AnswerResponse::new(answer, author.username, 0))
}

/// Replaces the body of an answer owned by `requester_id`; acceptance is untouched.
pub async fn update_answer(db: &PgPool, request: &UpdateAnswerRequest) -> Result<Answer> {
    let existing = get_answer_by_id_raw(db, request.answer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))?;

    if existing.user_id != request.user_id {
        return Err(AppError::Authorization(
            "You can only edit your own answers".to_string(),
        ));
    }

    let answer = sqlx::query_as::<_, Answer>(&format!(
        r#"
        UPDATE answers
        SET body = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING {ANSWER_COLUMNS}
        "#
    ))
    .bind(&request.answer)
    .bind(request.answer_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))?;

    Ok(answer)
}

/// Deletes an answer and its votes in one transaction.
pub async fn delete_answer(db: &PgPool, answer_id: Uuid, requester_id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;

    let owner_id =
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM answers WHERE id = $1 FOR UPDATE")
            .bind(answer_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))?;

    if owner_id != requester_id {
        return Err(AppError::Authorization(
            "You can only delete your own answers".to_string(),
        ));
    }

    let votes = sqlx::query("DELETE FROM answer_votes WHERE answer_id = $1")
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM answers WHERE id = $1")
        .bind(answer_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(%answer_id, votes_removed = votes.rows_affected(), "Answer deleted");

    Ok(())
}

/// Answers of a question: accepted first, then by score, then oldest first,
/// with the id breaking exact timestamp ties.
pub async fn get_question_answers(db: &PgPool, question_id: Uuid) -> Result<Vec<AnswerResponse>> {
    let answers = sqlx::query_as::<_, AnswerResponse>(
        r#"
        SELECT
            a.id, a.question_id, a.user_id, u.username, a.body, a.is_accepted,
            COALESCE(SUM(CASE WHEN v.vote_type = 'up' THEN 1
                              WHEN v.vote_type = 'down' THEN -1
                              ELSE 0 END), 0)::BIGINT AS vote_count,
            a.created_at, a.updated_at
        FROM answers a
        JOIN users u ON a.user_id = u.id
        LEFT JOIN answer_votes v ON v.answer_id = a.id
        WHERE a.question_id = $1
        GROUP BY a.id, u.username
        ORDER BY a.is_accepted DESC, vote_count DESC, a.created_at ASC, a.id ASC
        "#,
    )
    .bind(question_id)
    .fetch_all(db)
    .await?;

    Ok(answers)
}
