//! Entity structs owned by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ParticipantId, PrizeId};

/// Someone who can win prizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Caller-supplied identity.
    pub id: ParticipantId,
    /// Display name shown on the leaderboard.
    pub name: String,
}

/// A catalog item identified by its image asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    /// Store-assigned identity.
    pub id: PrizeId,
    /// Asset name of the prize image. Immutable after creation.
    pub image: String,
    /// Set once the prize has left the unclaimed pool. Never cleared.
    pub used: bool,
}

/// One (participant, prize) award. At most one exists per pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRecord {
    /// Who won.
    pub participant_id: ParticipantId,
    /// What they won.
    pub prize_id: PrizeId,
    /// When the win was recorded.
    pub won_at: DateTime<Utc>,
}

/// A leaderboard row: a participant and how many distinct prizes they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Participant identity.
    pub participant_id: ParticipantId,
    /// Participant display name.
    pub name: String,
    /// Number of distinct prizes won.
    pub wins: u64,
}
