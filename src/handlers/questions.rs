use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::{AppError, Result},
    handlers::{ApiJson, ApiPath},
    models::{CreateQuestionRequest, DeleteQuestionRequest, QuestionDetail, UpdateQuestionRequest},
    services::question_service,
};

pub async fn create_question(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateQuestionRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    payload.validate()?;

    let question = question_service::create_question(&state.db, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Question posted successfully",
            "question": question
        })),
    ))
}

pub async fn get_questions(State(state): State<AppState>) -> Result<Json<Value>> {
    let questions = question_service::list_questions(&state.db).await?;

    Ok(Json(json!({
        "questions": questions
    })))
}

pub async fn get_question(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<Uuid>,
) -> Result<Json<QuestionDetail>> {
    let question = question_service::get_question_detail(&state.db, question_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    Ok(Json(question))
}

pub async fn update_question(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateQuestionRequest>,
) -> Result<Json<Value>> {
    payload.validate()?;

    let question = question_service::update_question(&state.db, &payload).await?;

    Ok(Json(json!({
        "message": "Question updated successfully",
        "question": question
    })))
}

pub async fn delete_question(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DeleteQuestionRequest>,
) -> Result<Json<Value>> {
    question_service::delete_question(&state.db, payload.question_id, payload.user_id).await?;

    Ok(Json(json!({
        "message": "Question deleted successfully"
    })))
}

pub async fn increment_view_count(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let view_count = question_service::increment_view_count(&state.db, question_id).await?;

    Ok(Json(json!({
        "message": "View count updated",
        "view_count": view_count
    })))
}
