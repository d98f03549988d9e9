use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    AppState,
    error::Result,
    handlers::{ApiJson, ApiPath},
    models::{
        AcceptAnswerRequest, CreateAnswerRequest, DeleteAnswerRequest, UpdateAnswerRequest,
        VoteOutcome, VoteRequest, VoteResponse,
    },
    services::{acceptance_service, answer_service, vote_service},
};

pub async fn create_answer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAnswerRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    payload.validate()?;

    let answer = answer_service::create_answer(&state.db, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Answer posted successfully",
            "answer": answer
        })),
    ))
}

pub async fn get_question_answers(
    State(state): State<AppState>,
    ApiPath(question_id): ApiPath<Uuid>,
) -> Result<Json<Value>> {
    let answers = answer_service::get_question_answers(&state.db, question_id).await?;

    Ok(Json(json!({
        "answers": answers,
        "question_id": question_id
    })))
}

pub async fn vote_answer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<VoteRequest>,
) -> Result<(StatusCode, Json<VoteResponse>)> {
    let vote = vote_service::cast_vote(
        &state.db,
        payload.answer_id,
        payload.user_id,
        payload.vote_type,
    )
    .await?;

    let status = match vote.outcome {
        VoteOutcome::Recorded => StatusCode::CREATED,
        VoteOutcome::Removed | VoteOutcome::Updated => StatusCode::OK,
    };

    Ok((status, Json(vote)))
}

pub async fn update_answer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateAnswerRequest>,
) -> Result<Json<Value>> {
    payload.validate()?;

    let answer = answer_service::update_answer(&state.db, &payload).await?;

    Ok(Json(json!({
        "message": "Answer updated successfully",
        "answer": answer
    })))
}

pub async fn delete_answer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DeleteAnswerRequest>,
) -> Result<Json<Value>> {
    answer_service::delete_answer(&state.db, payload.answer_id, payload.user_id).await?;

    Ok(Json(json!({
        "message": "Answer deleted successfully"
    })))
}

pub async fn accept_answer(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AcceptAnswerRequest>,
) -> Result<Json<Value>> {
    let answer = acceptance_service::accept_answer(
        &state.db,
        payload.answer_id,
        payload.question_id,
        payload.user_id,
    )
    .await?;

    Ok(Json(json!({
        "message": "Answer marked as accepted",
        "answer": answer
    })))
}
