//! Error types for the orchestration layer.

use giveaway_db::DbError;
use giveaway_images::RasterError;

use crate::config::ConfigError;

/// Errors surfaced by claim, collage and seed operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The persistence layer failed.
    #[error("database error: {source}")]
    Db {
        /// The underlying database error.
        #[from]
        source: DbError,
    },

    /// Reading, writing or composing images failed.
    #[error("image error: {source}")]
    Raster {
        /// The underlying image error.
        #[from]
        source: RasterError,
    },

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Every claim attempt lost a race for its prize.
    #[error("claim gave up after {attempts} contended attempts")]
    ClaimContention {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// Listing the source image directory failed.
    #[error("catalog scan error: {0}")]
    Scan(#[from] std::io::Error),

    /// A blocking image task panicked or was cancelled.
    #[error("blocking task failed: {0}")]
    Task(String),
}

impl CoreError {
    /// Whether this is the empty-pool outcome, which the caller should
    /// surface to the end user instead of retrying.
    pub const fn is_exhausted(&self) -> bool {
        matches!(
            self,
            Self::Db {
                source: DbError::NoPrizesAvailable
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion_is_recognised_through_the_wrapper() {
        let err = CoreError::from(DbError::NoPrizesAvailable);
        assert!(err.is_exhausted());
        assert_eq!(err.to_string(), "database error: no prizes available");

        let err = CoreError::ClaimContention { attempts: 5 };
        assert!(!err.is_exhausted());
    }

    #[test]
    fn raster_errors_keep_their_detail() {
        let err = CoreError::from(RasterError::AssetMissing {
            name: String::from("a.png"),
        });
        assert!(err.to_string().contains("a.png"));
    }
}
