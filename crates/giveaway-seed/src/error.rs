//! Error types for the seed binary.
//!
//! [`SeedError`] is the top-level error type that wraps all possible
//! failure modes during startup and seeding.

/// Top-level error for the seed binary.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: giveaway_core::ConfigError,
    },

    /// Connecting, migrating or seeding failed.
    #[error("giveaway error: {source}")]
    Core {
        /// The underlying core error.
        #[from]
        source: giveaway_core::CoreError,
    },
}
