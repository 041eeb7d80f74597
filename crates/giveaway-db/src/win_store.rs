//! Win records: the (participant, prize) junction.
//!
//! A pair is recorded at most once. The `UNIQUE (participant_id, prize_id)`
//! constraint does both the check and the insert in one statement, inside
//! one transaction, so two concurrent callers for the same pair cannot both
//! observe "not found": exactly one gets [`ClaimOutcome::Recorded`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use giveaway_types::{ClaimOutcome, LeaderboardEntry, ParticipantId, PrizeId, WinRecord};
use sqlx::SqlitePool;

use crate::error::DbError;
use crate::prize_store::HIDDEN_IMAGES_SQL;

const WON_IMAGES_SQL: &str = r"SELECT p.image
    FROM wins w
    INNER JOIN prizes p ON p.prize_id = w.prize_id
    WHERE w.participant_id = $1
    ORDER BY w.won_at, w.rowid";

/// The two image sets of one participant's collage, read together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollageImages {
    /// Images the participant has won, earliest win first.
    pub revealed: Vec<String>,
    /// Images of prizes nobody has won, in catalog order, minus any name
    /// already revealed.
    pub obscured: Vec<String>,
}

/// Operations on the `wins` table.
pub struct WinStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WinStore<'a> {
    /// Create a new win store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that `participant` won `prize`, at most once per pair.
    ///
    /// Returns [`ClaimOutcome::AlreadyRecorded`] without writing anything if
    /// the pair already has a record.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if the participant or the prize does
    /// not exist.
    pub async fn record_win(
        &self,
        participant: ParticipantId,
        prize: PrizeId,
    ) -> Result<ClaimOutcome, DbError> {
        let won_at = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"INSERT INTO wins (participant_id, prize_id, won_at)
              VALUES ($1, $2, $3)
              ON CONFLICT (participant_id, prize_id) DO NOTHING",
        )
        .bind(participant.into_inner())
        .bind(prize.into_inner())
        .bind(won_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            DbError::from_write(
                e,
                "participant or prize",
                format!("participant {participant}, prize {prize}"),
            )
        })?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            tracing::debug!(
                participant_id = %participant,
                prize_id = %prize,
                "Win already recorded"
            );
            return Ok(ClaimOutcome::AlreadyRecorded);
        }

        tracing::debug!(participant_id = %participant, prize_id = %prize, "Recorded win");
        Ok(ClaimOutcome::Recorded)
    }

    /// Number of win records for a prize.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn win_count(&self, prize: PrizeId) -> Result<u64, DbError> {
        let (count,): (i64,) = sqlx::query_as(r"SELECT COUNT(*) FROM wins WHERE prize_id = $1")
            .bind(prize.into_inner())
            .fetch_one(self.pool)
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Images of every prize the participant has won, earliest win first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn won_images(&self, participant: ParticipantId) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> = sqlx::query_as(WON_IMAGES_SQL)
            .bind(participant.into_inner())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|(image,)| image).collect())
    }

    /// Revealed and obscured images for `participant`'s collage.
    ///
    /// Both sets come from one read transaction, so a win recorded
    /// concurrently lands in both views or in neither.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the queries fail.
    pub async fn collage_images(
        &self,
        participant: ParticipantId,
    ) -> Result<CollageImages, DbError> {
        let mut tx = self.pool.begin().await?;

        let won: Vec<(String,)> = sqlx::query_as(WON_IMAGES_SQL)
            .bind(participant.into_inner())
            .fetch_all(&mut *tx)
            .await?;
        let hidden: Vec<(String,)> = sqlx::query_as(HIDDEN_IMAGES_SQL)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        let revealed: Vec<String> = won.into_iter().map(|(image,)| image).collect();
        let obscured = {
            let seen: BTreeSet<&str> = revealed.iter().map(String::as_str).collect();
            hidden
                .into_iter()
                .map(|(image,)| image)
                .filter(|image| !seen.contains(image.as_str()))
                .collect()
        };

        Ok(CollageImages { revealed, obscured })
    }

    /// Every win record for a participant, earliest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn wins_for(&self, participant: ParticipantId) -> Result<Vec<WinRecord>, DbError> {
        let rows = sqlx::query_as::<_, WinRow>(
            r"SELECT participant_id, prize_id, won_at
              FROM wins
              WHERE participant_id = $1
              ORDER BY won_at, rowid",
        )
        .bind(participant.into_inner())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(WinRecord::from).collect())
    }

    /// Top participants by number of distinct prizes won.
    ///
    /// Grouped by participant identity, most wins first, ties broken by
    /// participant id. At most `limit` entries.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, DbError> {
        let rows: Vec<(i64, String, i64)> = sqlx::query_as(
            r"SELECT pa.participant_id, pa.name, COUNT(w.prize_id) AS wins
              FROM wins w
              INNER JOIN participants pa ON pa.participant_id = w.participant_id
              GROUP BY pa.participant_id, pa.name
              ORDER BY wins DESC, pa.participant_id ASC
              LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, wins)| LeaderboardEntry {
                participant_id: ParticipantId::new(id),
                name,
                wins: u64::try_from(wins).unwrap_or(0),
            })
            .collect())
    }
}

/// A row from the `wins` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WinRow {
    /// Who won.
    pub participant_id: i64,
    /// What they won.
    pub prize_id: i64,
    /// When the win was recorded.
    pub won_at: DateTime<Utc>,
}

impl From<WinRow> for WinRecord {
    fn from(row: WinRow) -> Self {
        Self {
            participant_id: ParticipantId::new(row.participant_id),
            prize_id: PrizeId::new(row.prize_id),
            won_at: row.won_at,
        }
    }
}
