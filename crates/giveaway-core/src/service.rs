//! The [`Giveaway`] handle: one database pool, one image store, one claim
//! policy, shared by every caller.

use giveaway_db::{Database, DbError};
use giveaway_images::ImageStore;
use giveaway_types::{LeaderboardEntry, ParticipantId, Prize};

use crate::claim::claim_prize;
use crate::collage::{Collage, build_collage};
use crate::config::GiveawayConfig;
use crate::error::CoreError;
use crate::seed::{SeedReport, seed_catalog};

/// Entry point for front-ends (bots, APIs, the seed binary).
///
/// Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Giveaway {
    db: Database,
    images: ImageStore,
    max_claim_attempts: u32,
}

impl Giveaway {
    /// Assemble a handle from already-open parts.
    pub const fn new(db: Database, images: ImageStore, max_claim_attempts: u32) -> Self {
        Self {
            db,
            images,
            max_claim_attempts,
        }
    }

    /// Open the database described by `config`, apply migrations and set
    /// up the image store.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Db`] if connecting or migrating fails.
    pub async fn connect(config: &GiveawayConfig) -> Result<Self, CoreError> {
        let db = Database::connect(&config.database.sqlite()).await?;
        db.run_migrations().await?;
        let images = ImageStore::new(config.images.dirs());
        Ok(Self::new(db, images, config.claim.max_attempts))
    }

    /// The persistence layer.
    pub const fn db(&self) -> &Database {
        &self.db
    }

    /// The image store.
    pub const fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Register `participant` unless already known. Returns whether a new
    /// participant was created.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Db`] if the store fails.
    pub async fn register_if_new(
        &self,
        participant: ParticipantId,
        name: &str,
    ) -> Result<bool, CoreError> {
        if self.db.participants().exists(participant).await? {
            return Ok(false);
        }
        match self.db.participants().register(participant, name).await {
            Ok(()) => Ok(true),
            // Lost a registration race: someone else created it.
            Err(DbError::DuplicateKey { .. }) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Award an unclaimed prize to `participant`.
    ///
    /// # Errors
    ///
    /// See [`claim_prize`].
    pub async fn claim(&self, participant: ParticipantId) -> Result<Prize, CoreError> {
        claim_prize(&self.db, participant, self.max_claim_attempts).await
    }

    /// Build and persist `participant`'s collage.
    ///
    /// # Errors
    ///
    /// See [`build_collage`].
    pub async fn collage(&self, participant: ParticipantId) -> Result<Option<Collage>, CoreError> {
        build_collage(&self.db, &self.images, participant).await
    }

    /// Seed the catalog from the source image directory.
    ///
    /// # Errors
    ///
    /// See [`seed_catalog`].
    pub async fn seed(&self) -> Result<SeedReport, CoreError> {
        seed_catalog(&self.db, &self.images).await
    }

    /// Top participants by distinct prizes won.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Db`] if the query fails.
    pub async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, CoreError> {
        Ok(self.db.wins().leaderboard(limit).await?)
    }
}
