//! The claim protocol: awarding a prize to a participant.
//!
//! ```text
//! pick_random_unclaimed --> record_win --Recorded--------> mark_used --> done
//!          ^                    |
//!          |             AlreadyRecorded
//!          |                    v
//!          +------------- mark_used, retry
//! ```
//!
//! The random pick is a hint, not a reservation. Exactly-once rests on
//! `record_win` alone. An empty pool ends the claim immediately.

use giveaway_db::Database;
use giveaway_types::{ClaimOutcome, ParticipantId, Prize};

use crate::error::CoreError;

/// Award one unclaimed prize to `participant`.
///
/// Tries up to `max_attempts` prizes (at least one). A prize that turns
/// out to be already recorded for this participant is marked used, since
/// it has left the pool either way, and another is picked.
///
/// # Errors
///
/// Returns [`CoreError::Db`] wrapping [`giveaway_db::DbError::NoPrizesAvailable`]
/// when the pool is empty (check with [`CoreError::is_exhausted`]), and
/// [`CoreError::ClaimContention`] when every attempt was already recorded.
pub async fn claim_prize(
    db: &Database,
    participant: ParticipantId,
    max_attempts: u32,
) -> Result<Prize, CoreError> {
    let attempts = max_attempts.max(1);

    for attempt in 1..=attempts {
        let mut prize = db.prizes().pick_random_unclaimed().await?;
        let outcome = db.wins().record_win(participant, prize.id).await?;
        db.prizes().mark_used(prize.id).await?;
        prize.used = true;

        match outcome {
            ClaimOutcome::Recorded => {
                tracing::info!(
                    participant_id = %participant,
                    prize_id = %prize.id,
                    image = prize.image,
                    attempt,
                    "Prize claimed"
                );
                return Ok(prize);
            }
            ClaimOutcome::AlreadyRecorded => {
                tracing::debug!(
                    participant_id = %participant,
                    prize_id = %prize.id,
                    attempt,
                    "Prize already recorded for participant, picking another"
                );
            }
        }
    }

    tracing::warn!(participant_id = %participant, attempts, "Claim contention, giving up");
    Err(CoreError::ClaimContention { attempts })
}
