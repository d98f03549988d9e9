use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::AnswerResponse;

pub const DEFAULT_TAG: &str = "General";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
}

// Create question request
#[derive(Debug, Validate, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 20000, message = "description is required"))]
    pub description: String,
    #[validate(length(max = 100))]
    pub tag: Option<String>,
}

// Update question request
#[derive(Debug, Validate, Deserialize)]
pub struct UpdateQuestionRequest {
    #[serde(rename = "questionid")]
    pub question_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 20000, message = "description is required"))]
    pub description: String,
    #[validate(length(max = 100))]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuestionRequest {
    #[serde(rename = "questionid")]
    pub question_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
}

/// Row of the question listing.
#[derive(Debug, Serialize, FromRow)]
pub struct QuestionSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub username: String,
    pub answer_count: i64,
}

// Single question with its ranked answers
#[derive(Debug, Serialize)]
pub struct QuestionDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub answers: Vec<AnswerResponse>,
}

/// Blank or missing tags collapse to the default tag.
pub fn normalize_tag(tag: Option<&str>) -> String {
    match tag.map(str::trim) {
        Some(tag) if !tag.is_empty() => tag.to_string(),
        _ => DEFAULT_TAG.to_string(),
    }
}
