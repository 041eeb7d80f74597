//! The prize catalog.
//!
//! Prizes are bulk-inserted when the catalog is seeded and never deleted.
//! The only mutation afterwards is the monotone `used` flag: once a prize
//! leaves the unclaimed pool it never returns to it.

use giveaway_types::{Prize, PrizeId};
use sqlx::SqlitePool;

use crate::error::DbError;

/// Images of prizes nobody has won, in catalog order.
pub(crate) const HIDDEN_IMAGES_SQL: &str = r"SELECT p.image
    FROM prizes p
    WHERE NOT EXISTS (SELECT 1 FROM wins w WHERE w.prize_id = p.prize_id)
    ORDER BY p.prize_id";

/// Operations on the `prizes` table.
pub struct PrizeStore<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PrizeStore<'a> {
    /// Create a new prize store bound to a connection pool.
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Bulk-insert prizes with `used = 0`, one per image reference.
    ///
    /// All rows go in under one transaction: either the whole batch is
    /// added or none of it is. No duplicate detection is done across
    /// image references; pass a distinct set.
    ///
    /// Returns the assigned ids in input order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the insert fails.
    pub async fn add_prizes<S: AsRef<str>>(&self, images: &[S]) -> Result<Vec<PrizeId>, DbError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut ids = Vec::with_capacity(images.len());

        for image in images {
            let result = sqlx::query(r"INSERT INTO prizes (image) VALUES ($1)")
                .bind(image.as_ref())
                .execute(&mut *tx)
                .await?;
            ids.push(PrizeId::new(result.last_insert_rowid()));
        }

        tx.commit().await?;

        tracing::debug!(count = ids.len(), "Inserted prizes");
        Ok(ids)
    }

    /// Set `used = 1` on a prize. Already-used prizes stay used.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no prize has this id.
    pub async fn mark_used(&self, id: PrizeId) -> Result<(), DbError> {
        let result = sqlx::query(r"UPDATE prizes SET used = 1 WHERE prize_id = $1")
            .bind(id.into_inner())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "prize",
                key: id.to_string(),
            });
        }

        tracing::debug!(prize_id = %id, "Marked prize used");
        Ok(())
    }

    /// Pick one prize uniformly at random among those with `used = 0`.
    ///
    /// The pick is a hint, not a reservation: two callers may receive the
    /// same prize.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NoPrizesAvailable`] if every prize is used or
    /// the catalog is empty.
    pub async fn pick_random_unclaimed(&self) -> Result<Prize, DbError> {
        let row = sqlx::query_as::<_, PrizeRow>(
            r"SELECT prize_id, image, used FROM prizes WHERE used = 0 ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(self.pool)
        .await?;

        row.map(Prize::from).ok_or(DbError::NoPrizesAvailable)
    }

    /// Look up a prize.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no prize has this id.
    pub async fn get(&self, id: PrizeId) -> Result<Prize, DbError> {
        let row = sqlx::query_as::<_, PrizeRow>(
            r"SELECT prize_id, image, used FROM prizes WHERE prize_id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool)
        .await?;

        row.map(Prize::from).ok_or_else(|| DbError::NotFound {
            entity: "prize",
            key: id.to_string(),
        })
    }

    /// Image asset name of a prize.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::NotFound`] if no prize has this id.
    pub async fn image(&self, id: PrizeId) -> Result<String, DbError> {
        let row: Option<(String,)> = sqlx::query_as(r"SELECT image FROM prizes WHERE prize_id = $1")
            .bind(id.into_inner())
            .fetch_optional(self.pool)
            .await?;

        row.map(|(image,)| image).ok_or_else(|| DbError::NotFound {
            entity: "prize",
            key: id.to_string(),
        })
    }

    /// Every catalog image, in prize-id order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn images(&self) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> = sqlx::query_as(r"SELECT image FROM prizes ORDER BY prize_id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|(image,)| image).collect())
    }

    /// Catalog images whose prize has no win record yet, in prize-id order.
    ///
    /// These are the images a collage shows obscured.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn hidden_images(&self) -> Result<Vec<String>, DbError> {
        let rows: Vec<(String,)> = sqlx::query_as(HIDDEN_IMAGES_SQL)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(|(image,)| image).collect())
    }

    /// Whether an image is still hidden: no prize carrying it has a winner.
    ///
    /// An image that belongs to no prize at all counts as hidden.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the query fails.
    pub async fn is_image_hidden(&self, image: &str) -> Result<bool, DbError> {
        let found: Option<(i64,)> = sqlx::query_as(
            r"SELECT w.prize_id
              FROM wins w
              INNER JOIN prizes p ON p.prize_id = w.prize_id
              WHERE p.image = $1
              LIMIT 1",
        )
        .bind(image)
        .fetch_optional(self.pool)
        .await?;

        Ok(found.is_none())
    }
}

/// A row from the `prizes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PrizeRow {
    /// Store-assigned prize id.
    pub prize_id: i64,
    /// Image asset name.
    pub image: String,
    /// Whether the prize has left the unclaimed pool.
    pub used: bool,
}

impl From<PrizeRow> for Prize {
    fn from(row: PrizeRow) -> Self {
        Self {
            id: PrizeId::new(row.prize_id),
            image: row.image,
            used: row.used,
        }
    }
}
