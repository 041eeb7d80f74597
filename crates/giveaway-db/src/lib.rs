//! Persistence layer for the giveaway prize board (`SQLite` via [`sqlx`]).
//!
//! The store owns all three entity types: participants, prizes and win
//! records. Every operation here is a single atomic unit against the
//! database; composing them into "award a prize" is the caller's job.
//!
//! # Architecture
//!
//! ```text
//! Database (pool + migrations)
//!     |
//!     +-- ParticipantStore  (register, lookup, list)
//!     +-- PrizeStore        (seed catalog, random pick, mark used)
//!     +-- WinStore          (exactly-once win recording, queries, leaderboard)
//! ```
//!
//! # Modules
//!
//! - [`sqlite`] -- Connection pool, configuration and migrations
//! - [`participant_store`] -- The `participants` table
//! - [`prize_store`] -- The `prizes` table
//! - [`win_store`] -- The `wins` table
//! - [`error`] -- Shared error types

pub mod error;
pub mod participant_store;
pub mod prize_store;
pub mod sqlite;
pub mod win_store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use participant_store::ParticipantStore;
pub use prize_store::PrizeStore;
pub use sqlite::{Database, SqliteConfig};
pub use win_store::{CollageImages, WinStore};
