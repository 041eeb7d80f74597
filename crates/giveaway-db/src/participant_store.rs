//! Participant registration and lookup.
//!
//! Participants are created on first interaction and never mutated or
//! deleted afterwards.

use giveaway_types::{Participant, ParticipantId};
use sqlx::SqlitePool;

use crate::error::DbError;

/// Operations on the `participants` table.
pub struct ParticipantStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ParticipantStore<'a> {
    /// Create a new participant store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a participant.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::DuplicateKey`] if `id` is already registered.
    /// Callers that only want "register if new" can treat that as a no-op
    /// or pre-check with [`ParticipantStore::exists`].
    pub async fn register(&self, id: ParticipantId, name: &str) -> Result<(), DbError> {
        sqlx::query(r"INSERT INTO participants (participant_id, name) VALUES ($1, $2)")
            .bind(id.into_inner())
            .bind(name)
            .execute(self.pool)
            .await
            .map_err(|e| DbError::from_write(e, "participant", id.to_string()))?;

        tracing::debug!(participant_id = %id, name, "Registered participant");
        Ok(())
    }

    /// Whether a participant with this id is registered.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn exists(&self, id: ParticipantId) -> Result<bool, DbError> {
        let found: Option<(i64,)> =
            sqlx::query_as(r"SELECT participant_id FROM participants WHERE participant_id = $1")
                .bind(id.into_inner())
                .fetch_optional(self.pool)
                .await?;

        Ok(found.is_some())
    }

    /// Look up a participant.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no participant has this id.
    pub async fn get(&self, id: ParticipantId) -> Result<Participant, DbError> {
        let row: Option<(i64, String)> =
            sqlx::query_as(r"SELECT participant_id, name FROM participants WHERE participant_id = $1")
                .bind(id.into_inner())
                .fetch_optional(self.pool)
                .await?;

        row.map(|(id, name)| Participant {
            id: ParticipantId::new(id),
            name,
        })
        .ok_or_else(|| DbError::NotFound {
            entity: "participant",
            key: id.to_string(),
        })
    }

    /// All registered participant ids, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn ids(&self) -> Result<Vec<ParticipantId>, DbError> {
        let rows: Vec<(i64,)> =
            sqlx::query_as(r"SELECT participant_id FROM participants ORDER BY participant_id")
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(|(id,)| ParticipantId::new(id)).collect())
    }
}
