//! Error types for the persistence layer.
//!
//! All errors are propagated via [`DbError`]. Constraint violations
//! reported by `SQLite` are translated into the typed variants
//! ([`DbError::DuplicateKey`], [`DbError::NotFound`]) so callers never
//! have to inspect driver error codes.

use sqlx::error::ErrorKind;

/// Errors that can occur in the persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// An `SQLite` operation failed.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// A migration failed.
    #[error("SQLite migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// An insert violated an identity uniqueness constraint.
    #[error("duplicate {entity}: {key}")]
    DuplicateKey {
        /// The kind of entity being inserted.
        entity: &'static str,
        /// The key that already exists.
        key: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// The kind of entity looked up.
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },

    /// The unclaimed prize pool is empty.
    #[error("no prizes available")]
    NoPrizesAvailable,

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Translate a driver error, mapping constraint violations to typed
    /// variants and passing everything else through as [`DbError::Sqlite`].
    pub(crate) fn from_write(err: sqlx::Error, entity: &'static str, key: String) -> Self {
        let kind = err.as_database_error().map(|db| db.kind());
        match kind {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateKey { entity, key },
            Some(ErrorKind::ForeignKeyViolation) => Self::NotFound { entity, key },
            _ => Self::Sqlite(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_name_the_entity_and_key() {
        let err = DbError::DuplicateKey {
            entity: "participant",
            key: String::from("42"),
        };
        assert_eq!(err.to_string(), "duplicate participant: 42");

        let err = DbError::NotFound {
            entity: "prize",
            key: String::from("7"),
        };
        assert_eq!(err.to_string(), "prize not found: 7");
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = DbError::from_write(sqlx::Error::RowNotFound, "prize", String::from("1"));
        assert!(matches!(err, DbError::Sqlite(sqlx::Error::RowNotFound)));
    }
}
