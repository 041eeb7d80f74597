//! Catalog seeding binary for the giveaway prize board.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `giveaway-config.yaml` (or `GIVEAWAY_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the database and run migrations
//! 4. Add every new image in the source directory to the catalog
//! 5. Generate missing obscured placeholders
//! 6. Log the result and the current leaderboard

mod error;

use std::path::PathBuf;

use giveaway_core::{Giveaway, GiveawayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::SeedError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "giveaway-config.yaml";

/// Leaderboard rows logged after seeding.
const LEADERBOARD_LIMIT: u32 = 10;

/// Application entry point for the seeder.
///
/// # Errors
///
/// Returns an error if configuration, database access, or seeding fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        database = config.database.url,
        source_dir = %config.images.source_dir.display(),
        obscured_dir = %config.images.obscured_dir.display(),
        "giveaway-seed starting"
    );

    // 3-5. Connect, migrate, seed.
    let giveaway = Giveaway::connect(&config).await.map_err(SeedError::from)?;
    let report = giveaway.seed().await.map_err(SeedError::from)?;
    info!(
        added = report.added.len(),
        skipped = report.skipped,
        obscured = report.obscured,
        "Seeding complete"
    );

    // 6. Current standings.
    let board = giveaway
        .leaderboard(LEADERBOARD_LIMIT)
        .await
        .map_err(SeedError::from)?;
    for (rank, entry) in board.iter().enumerate() {
        info!(
            rank = rank.saturating_add(1),
            participant_id = %entry.participant_id,
            name = entry.name,
            wins = entry.wins,
            "Leaderboard"
        );
    }

    giveaway.db().close().await;
    Ok(())
}

/// Load configuration from `GIVEAWAY_CONFIG` or `giveaway-config.yaml`.
///
/// Falls back to defaults (plus environment overrides) if the file does
/// not exist.
fn load_config() -> Result<GiveawayConfig, SeedError> {
    let path = std::env::var("GIVEAWAY_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        Ok(GiveawayConfig::from_file(&path)?)
    } else {
        let mut config = GiveawayConfig::default();
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }
}
