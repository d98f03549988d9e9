use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    models::{
        CreateQuestionRequest, Question, QuestionDetail, QuestionSummary, UpdateQuestionRequest,
        normalize_tag,
    },
    services::{answer_service, user_service},
};

const QUESTION_COLUMNS: &str = "id, user_id, title, description, tag, view_count, created_at";

pub async fn get_question_by_id_raw(db: &PgPool, question_id: Uuid) -> Result<Option<Question>> {
    let question = sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1"
    ))
    .bind(question_id)
    .fetch_optional(db)
    .await?;

    Ok(question)
}

pub async fn create_question(db: &PgPool, request: &CreateQuestionRequest) -> Result<Question> {
    user_service::require_user(db, request.user_id).await?;

    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        INSERT INTO questions (id, user_id, title, description, tag, view_count, created_at)
        VALUES ($1, $2, $3, $4, $5, 0, NOW())
        RETURNING {QUESTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(&request.title)
    .bind(&request.description)
    .bind(normalize_tag(request.tag.as_deref()))
    .fetch_one(db)
    .await?;

    tracing::info!(question_id = %question.id, user_id = %question.user_id, "Question posted");

    Ok(question)
}

pub async fn list_questions(db: &PgPool) -> Result<Vec<QuestionSummary>> {
    let questions = sqlx::query_as::<_, QuestionSummary>(
        r#"
        SELECT
            q.id, q.title, q.description, q.tag, q.view_count, q.created_at,
            u.username,
            (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answer_count
        FROM questions q
        JOIN users u ON q.user_id = u.id
        ORDER BY q.created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(questions)
}

pub async fn get_question_detail(db: &PgPool, question_id: Uuid) -> Result<Option<QuestionDetail>> {
    let Some(question) = get_question_by_id_raw(db, question_id).await? else {
        return Ok(None);
    };

    let owner = user_service::get_user_by_id(db, question.user_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Owner of question {} is missing", question.id)))?;
    let answers = answer_service::get_question_answers(db, question_id).await?;

    Ok(Some(QuestionDetail {
        id: question.id,
        user_id: question.user_id,
        username: owner.username,
        title: question.title,
        description: question.description,
        tag: question.tag,
        view_count: question.view_count,
        created_at: question.created_at,
        answers,
    }))
}

pub async fn update_question(db: &PgPool, request: &UpdateQuestionRequest) -> Result<Question> {
    let existing = get_question_by_id_raw(db, request.question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if existing.user_id != request.user_id {
        return Err(AppError::Authorization(
            "You can only edit your own questions".to_string(),
        ));
    }

    let question = sqlx::query_as::<_, Question>(&format!(
        r#"
        UPDATE questions
        SET title = $1, description = $2, tag = $3
        WHERE id = $4
        RETURNING {QUESTION_COLUMNS}
        "#
    ))
    .bind(&request.title)
    .bind(&request.description)
    .bind(normalize_tag(request.tag.as_deref()))
    .bind(request.question_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    Ok(question)
}

/// Removes a question together with its answers and their votes, atomically.
pub async fn delete_question(db: &PgPool, question_id: Uuid, requester_id: Uuid) -> Result<()> {
    let mut tx = db.begin().await?;

    let owner_id =
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM questions WHERE id = $1 FOR UPDATE")
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    if owner_id != requester_id {
        return Err(AppError::Authorization(
            "You can only delete your own questions".to_string(),
        ));
    }

    sqlx::query(
        r#"
        DELETE FROM answer_votes
        WHERE answer_id IN (SELECT id FROM answers WHERE question_id = $1)
        "#,
    )
    .bind(question_id)
    .execute(&mut *tx)
    .await?;

    let answers = sqlx::query("DELETE FROM answers WHERE question_id = $1")
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM questions WHERE id = $1")
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(
        %question_id,
        answers_removed = answers.rows_affected(),
        "Question deleted"
    );

    Ok(())
}

/// Bumps the view counter and returns the new value.
pub async fn increment_view_count(db: &PgPool, question_id: Uuid) -> Result<i64> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE questions SET view_count = view_count + 1 WHERE id = $1 RETURNING view_count",
    )
    .bind(question_id)
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::NotFound("Question not found".to_string()))
}
