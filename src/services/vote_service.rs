use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, Result, is_unique_violation},
    models::{VoteAction, VoteResponse, VoteType},
    services::{answer_service, user_service},
};

/// Applies the vote toggle: first vote records, a repeat retracts, the
/// opposite direction flips.
///
/// The voter's existing row is locked for the duration of the transaction.
/// Two first votes racing each other both see no row; the loser trips the
/// (answer_id, user_id) primary key and gets a `Conflict` to retry on.
pub async fn cast_vote(
    db: &PgPool,
    answer_id: Uuid,
    voter_id: Uuid,
    vote_type: VoteType,
) -> Result<VoteResponse> {
    user_service::require_user(db, voter_id).await?;

    let mut tx = db.begin().await?;

    // Key-share lock keeps the answer from being deleted until commit.
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM answers WHERE id = $1 FOR KEY SHARE")
        .bind(answer_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Answer not found".to_string()))?;

    let existing = sqlx::query_scalar::<_, VoteType>(
        "SELECT vote_type FROM answer_votes WHERE answer_id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(answer_id)
    .bind(voter_id)
    .fetch_optional(&mut *tx)
    .await?;

    let action = VoteAction::resolve(existing, vote_type);

    match action {
        VoteAction::Insert => {
            sqlx::query(
                r#"
                INSERT INTO answer_votes (answer_id, user_id, vote_type, created_at)
                VALUES ($1, $2, $3, NOW())
                "#,
            )
            .bind(answer_id)
            .bind(voter_id)
            .bind(vote_type)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Vote changed concurrently, please retry".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;
        }
        VoteAction::Delete => {
            sqlx::query("DELETE FROM answer_votes WHERE answer_id = $1 AND user_id = $2")
                .bind(answer_id)
                .bind(voter_id)
                .execute(&mut *tx)
                .await?;
        }
        VoteAction::Update => {
            sqlx::query(
                "UPDATE answer_votes SET vote_type = $3 WHERE answer_id = $1 AND user_id = $2",
            )
            .bind(answer_id)
            .bind(voter_id)
            .bind(vote_type)
            .execute(&mut *tx)
            .await?;
        }
    }

    let vote_count = answer_service::get_vote_count(&mut *tx, answer_id).await?;

    tx.commit().await?;

    tracing::debug!(%answer_id, %voter_id, ?action, vote_count, "Vote applied");

    Ok(VoteResponse {
        answer_id,
        outcome: action.outcome(),
        user_vote: action.resulting_vote(vote_type),
        vote_count,
    })
}
