//! Shared type definitions for the giveaway prize board.
//!
//! Every crate in the workspace speaks in these types: the persistence
//! layer returns them, the claim protocol and the collage builder consume
//! them.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe wrappers around the store's integer identifiers
//! - [`structs`] -- Entity structs (participants, prizes, win records) and
//!   query results
//! - [`outcome`] -- The outcome of recording a win

pub mod ids;
pub mod outcome;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use ids::{ParticipantId, PrizeId};
pub use outcome::ClaimOutcome;
pub use structs::{LeaderboardEntry, Participant, Prize, WinRecord};
