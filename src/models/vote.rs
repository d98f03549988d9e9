use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vote_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

// Vote request
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(rename = "answerid")]
    pub answer_id: Uuid,
    #[serde(rename = "userid")]
    pub user_id: Uuid,
    #[serde(rename = "voteType")]
    pub vote_type: VoteType,
}

/// Write to apply for a vote, given what the voter already has on record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Insert,
    Delete,
    Update,
}

impl VoteAction {
    pub fn resolve(existing: Option<VoteType>, requested: VoteType) -> Self {
        match existing {
            None => VoteAction::Insert,
            Some(current) if current == requested => VoteAction::Delete,
            Some(_) => VoteAction::Update,
        }
    }

    pub fn outcome(self) -> VoteOutcome {
        match self {
            VoteAction::Insert => VoteOutcome::Recorded,
            VoteAction::Delete => VoteOutcome::Removed,
            VoteAction::Update => VoteOutcome::Updated,
        }
    }

    /// The voter's vote once the action is applied.
    pub fn resulting_vote(self, requested: VoteType) -> Option<VoteType> {
        match self {
            VoteAction::Delete => None,
            VoteAction::Insert | VoteAction::Update => Some(requested),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteOutcome {
    Recorded,
    Removed,
    Updated,
}

// Vote response
#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub answer_id: Uuid,
    pub outcome: VoteOutcome,
    pub user_vote: Option<VoteType>,
    pub vote_count: i64,
}
