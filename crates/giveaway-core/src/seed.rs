//! Catalog seeding from the source image directory.
//!
//! Every image file in the source directory becomes one prize. Seeding is
//! re-runnable: images already in the catalog are skipped, and only
//! missing placeholders are generated.

use std::collections::BTreeSet;
use std::path::Path;

use giveaway_db::Database;
use giveaway_images::ImageStore;

use crate::error::CoreError;

/// File extensions treated as prize images.
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// What a seeding run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Images added to the catalog as new prizes.
    pub added: Vec<String>,
    /// Images found on disk that were already in the catalog.
    pub skipped: usize,
    /// Placeholders generated for catalog images that lacked one.
    pub obscured: usize,
}

/// Add every new source image to the catalog and pre-generate placeholders.
///
/// # Errors
///
/// Returns [`CoreError::Scan`] if the source directory cannot be listed,
/// [`CoreError::Db`] or [`CoreError::Raster`] if inserting prizes or
/// writing placeholders fails.
pub async fn seed_catalog(db: &Database, images: &ImageStore) -> Result<SeedReport, CoreError> {
    let on_disk = list_source_images(&images.dirs().source)?;
    let known: BTreeSet<String> = db.prizes().images().await?.into_iter().collect();

    let (skipped, added): (Vec<String>, Vec<String>) =
        on_disk.into_iter().partition(|name| known.contains(name));
    db.prizes().add_prizes(&added).await?;

    let catalog = db.prizes().images().await?;
    let store = images.clone();
    let obscured = tokio::task::spawn_blocking(move || -> Result<usize, CoreError> {
        let mut generated = 0_usize;
        for name in catalog.iter().filter(|name| !store.has_obscured(name)) {
            store.hide_image(name)?;
            generated = generated.saturating_add(1);
        }
        Ok(generated)
    })
    .await
    .map_err(|e| CoreError::Task(e.to_string()))??;

    tracing::info!(
        added = added.len(),
        skipped = skipped.len(),
        obscured,
        "Catalog seeded"
    );

    Ok(SeedReport {
        added,
        skipped: skipped.len(),
        obscured,
    })
}

/// Image file names in `dir`, sorted.
fn list_source_images(dir: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "Skipping non-UTF-8 file name");
            continue;
        };
        if is_image_name(&name) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Whether `name` has one of the recognised image extensions.
fn is_image_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
