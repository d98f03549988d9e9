use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Create answer request
#[derive(Debug, Validate, Deserialize)]
pub struct CreateAnswerRequest {
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 10000, message = "answer is required"))]
    pub answer: String,
    #[serde(rename = "questionid")]
    pub question_id: Uuid,
}

// Update answer request
#[derive(Debug, Validate, Deserialize)]
pub struct UpdateAnswerRequest {
    #[serde(rename = "answerid")]
    pub answer_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 10000, message = "answer is required"))]
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAnswerRequest {
    #[serde(rename = "answerid")]
    pub answer_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AcceptAnswerRequest {
    #[serde(rename = "answerid")]
    pub answer_id: Uuid,
    #[serde(rename = "questionid")]
    pub question_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
}

/// Answer as listed under a question: author name and tallied votes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub body: String,
    pub is_accepted: bool,
    pub vote_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AnswerResponse {
    pub fn new(answer: Answer, username: String, vote_count: i64) -> Self {
        Self {
            id: answer.id,
            question_id: answer.question_id,
            user_id: answer.user_id,
            username,
            body: answer.body,
            is_accepted: answer.is_accepted,
            vote_count,
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}
