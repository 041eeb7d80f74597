//! Per-participant collage building.
//!
//! The revealed set is every image the participant has won, earliest win
//! first. The obscured set is every catalog image whose prize has no
//! winner at all, in prize-id order, drawn from the obscured namespace.
//! Both sets come from one store snapshot, never from a directory listing,
//! so the collage cannot disagree with the win records.
//!
//! A missing asset fails the whole collage. A collage with holes is worse
//! than a clear error.

use std::path::PathBuf;

use giveaway_db::{CollageImages, Database};
use giveaway_images::{GridLayout, ImageStore, RasterError, compose};
use giveaway_types::ParticipantId;

use crate::error::CoreError;

/// A collage written to the collage namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collage {
    /// Where the canvas was written.
    pub path: PathBuf,
    /// Grid the tiles were laid out in.
    pub layout: GridLayout,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// How many tiles are revealed prizes (they come first).
    pub revealed: usize,
    /// How many tiles are obscured placeholders.
    pub obscured: usize,
}

/// Build and persist the collage for `participant`.
///
/// Returns `Ok(None)` when there is nothing to render: no wins and no
/// unclaimed catalog images.
///
/// # Errors
///
/// Returns [`CoreError::Raster`] if any image is missing or the tiles
/// differ in size, [`CoreError::Db`] if the store queries fail.
pub async fn build_collage(
    db: &Database,
    images: &ImageStore,
    participant: ParticipantId,
) -> Result<Option<Collage>, CoreError> {
    let CollageImages { revealed, obscured } = db.wins().collage_images(participant).await?;

    if revealed.is_empty() && obscured.is_empty() {
        tracing::debug!(participant_id = %participant, "Nothing to put in collage");
        return Ok(None);
    }

    let store = images.clone();
    let collage = tokio::task::spawn_blocking(move || {
        compose_and_write(&store, participant, &revealed, &obscured)
    })
    .await
    .map_err(|e| CoreError::Task(e.to_string()))??;

    if let Some(collage) = &collage {
        tracing::info!(
            participant_id = %participant,
            revealed = collage.revealed,
            obscured = collage.obscured,
            cols = collage.layout.cols,
            rows = collage.layout.rows,
            path = %collage.path.display(),
            "Collage written"
        );
    }

    Ok(collage)
}

/// Load every tile, compose them and write the canvas. Blocking.
fn compose_and_write(
    store: &ImageStore,
    participant: ParticipantId,
    revealed: &[String],
    obscured: &[String],
) -> Result<Option<Collage>, RasterError> {
    let mut tiles = Vec::with_capacity(revealed.len().saturating_add(obscured.len()));
    for name in revealed {
        tiles.push(store.read_image(name)?);
    }
    for name in obscured {
        tiles.push(store.ensure_obscured(name)?);
    }

    let Some(layout) = GridLayout::for_count(tiles.len()) else {
        return Ok(None);
    };
    let Some(canvas) = compose(&tiles)? else {
        return Ok(None);
    };
    let path = store.write_collage(participant, &canvas)?;

    Ok(Some(Collage {
        path,
        layout,
        width: canvas.width(),
        height: canvas.height(),
        revealed: revealed.len(),
        obscured: obscured.len(),
    }))
}
