//! Orchestration for the giveaway prize board.
//!
//! Composes the persistence layer and the image store into the operations
//! a front-end actually calls: claim a prize for a participant, build a
//! participant's collage, seed the catalog from the source directory.
//!
//! # Modules
//!
//! - [`config`] -- Typed configuration loaded from `giveaway-config.yaml`
//! - [`claim`] -- The claim protocol (random pick, exactly-once record, mark used)
//! - [`collage`] -- Per-participant collage building
//! - [`seed`] -- Catalog seeding from the source image directory
//! - [`service`] -- The [`Giveaway`] handle tying it all together
//! - [`error`] -- Shared error types

pub mod claim;
pub mod collage;
pub mod config;
pub mod error;
pub mod seed;
pub mod service;

pub use claim::claim_prize;
pub use collage::{Collage, build_collage};
pub use config::{ConfigError, GiveawayConfig};
pub use error::CoreError;
pub use seed::{SeedReport, seed_catalog};
pub use service::Giveaway;
