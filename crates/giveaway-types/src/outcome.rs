//! Outcome of an attempt to record a win.

use serde::{Deserialize, Serialize};

/// Result of `record_win` for a (participant, prize) pair.
///
/// `AlreadyRecorded` is not a failure. It is the idempotent answer for a
/// pair that already has a win record, whether from an earlier call or a
/// concurrent one that got there first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// A new win record was written.
    Recorded,
    /// A win record for this pair already existed; nothing was written.
    AlreadyRecorded,
}

impl ClaimOutcome {
    /// Whether this call wrote the win record.
    pub const fn is_recorded(self) -> bool {
        matches!(self, Self::Recorded)
    }
}
