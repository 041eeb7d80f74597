//! Filesystem-backed image store over the source, obscured and collage
//! namespaces.
//!
//! Source images are read-only here. Obscured placeholders are written
//! under the same file name in their own directory. Collages are written
//! as `collage_<participant>.<ext>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use giveaway_types::ParticipantId;
use image::RgbImage;

use crate::error::RasterError;
use crate::obscure::obscure;

/// Directory layout of the three image namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDirs {
    /// Revealed prize images.
    pub source: PathBuf,
    /// Obscured placeholders.
    pub obscured: PathBuf,
    /// Generated collages.
    pub collages: PathBuf,
    /// File extension (and therefore format) of generated collages.
    pub collage_extension: String,
}

impl ImageDirs {
    /// Default directory names (`img`, `hidden_img`, `collages`) under `root`.
    pub fn under(root: &Path) -> Self {
        Self {
            source: root.join("img"),
            obscured: root.join("hidden_img"),
            collages: root.join("collages"),
            collage_extension: String::from("jpg"),
        }
    }
}

/// Read/write access to prize images by asset name.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dirs: ImageDirs,
}

impl ImageStore {
    /// Create a store over the given directories. Nothing is touched on
    /// disk until the first write.
    pub const fn new(dirs: ImageDirs) -> Self {
        Self { dirs }
    }

    /// The directory layout this store reads and writes.
    pub const fn dirs(&self) -> &ImageDirs {
        &self.dirs
    }

    /// Read a revealed prize image.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::AssetMissing`] if no such source image exists,
    /// [`RasterError::Codec`] if it cannot be decoded.
    pub fn read_image(&self, name: &str) -> Result<RgbImage, RasterError> {
        read_rgb(&asset_path(&self.dirs.source, name)?, name)
    }

    /// Read the obscured placeholder of a prize image.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::AssetMissing`] if no placeholder has been
    /// written for `name`.
    pub fn read_obscured(&self, name: &str) -> Result<RgbImage, RasterError> {
        read_rgb(&asset_path(&self.dirs.obscured, name)?, name)
    }

    /// Whether a placeholder exists for `name`.
    ///
    /// Invalid names have no placeholder.
    pub fn has_obscured(&self, name: &str) -> bool {
        asset_path(&self.dirs.obscured, name).is_ok_and(|path| path.is_file())
    }

    /// Persist the placeholder for `name`. The format follows the name's
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidAssetName`], [`RasterError::Io`] or
    /// [`RasterError::Codec`] if the write fails.
    pub fn write_obscured(&self, name: &str, image: &RgbImage) -> Result<PathBuf, RasterError> {
        let path = asset_path(&self.dirs.obscured, name)?;
        std::fs::create_dir_all(&self.dirs.obscured)?;
        image.save(&path)?;
        tracing::debug!(image = name, path = %path.display(), "Wrote obscured image");
        Ok(path)
    }

    /// Generate and persist the placeholder for a source image.
    ///
    /// Returns the placeholder as stored, so lossy formats yield the same
    /// pixels here as on every later [`read_obscured`](Self::read_obscured).
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::AssetMissing`] if the source image is absent.
    pub fn hide_image(&self, name: &str) -> Result<RgbImage, RasterError> {
        let hidden = obscure(&self.read_image(name)?);
        self.write_obscured(name, &hidden)?;
        self.read_obscured(name)
    }

    /// The placeholder for `name`, generated from its source on first use.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::AssetMissing`] if neither the placeholder nor
    /// the source image exists.
    pub fn ensure_obscured(&self, name: &str) -> Result<RgbImage, RasterError> {
        if self.has_obscured(name) {
            return self.read_obscured(name);
        }
        tracing::info!(image = name, "Generating missing obscured image");
        self.hide_image(name)
    }

    /// Where the collage for `participant` lives.
    pub fn collage_path(&self, participant: ParticipantId) -> PathBuf {
        self.dirs.collages.join(format!(
            "collage_{participant}.{}",
            self.dirs.collage_extension
        ))
    }

    /// Persist a participant's collage, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Io`] or [`RasterError::Codec`] if the write
    /// fails.
    pub fn write_collage(
        &self,
        participant: ParticipantId,
        canvas: &RgbImage,
    ) -> Result<PathBuf, RasterError> {
        let path = self.collage_path(participant);
        std::fs::create_dir_all(&self.dirs.collages)?;
        canvas.save(&path)?;
        tracing::debug!(participant_id = %participant, path = %path.display(), "Wrote collage");
        Ok(path)
    }
}

/// Resolve `name` inside `dir`, rejecting anything but a plain file name.
fn asset_path(dir: &Path, name: &str) -> Result<PathBuf, RasterError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && Path::new(name).file_name().is_some_and(|f| f == name);
    if !plain {
        return Err(RasterError::InvalidAssetName {
            name: name.to_owned(),
        });
    }
    Ok(dir.join(name))
}

/// Decode the file at `path` as 3-channel RGB.
fn read_rgb(path: &Path, name: &str) -> Result<RgbImage, RasterError> {
    let missing = || RasterError::AssetMissing {
        name: name.to_owned(),
    };
    if !path.is_file() {
        return Err(missing());
    }
    match image::open(path) {
        Ok(decoded) => Ok(decoded.to_rgb8()),
        Err(image::ImageError::IoError(e)) if e.kind() == ErrorKind::NotFound => Err(missing()),
        Err(e) => Err(RasterError::Codec(e)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_resolve_inside_the_namespace() {
        let dir = Path::new("/srv/img");
        assert_eq!(
            asset_path(dir, "prize-01.png").unwrap(),
            PathBuf::from("/srv/img/prize-01.png")
        );
    }

    #[test]
    fn path_like_names_are_rejected() {
        let dir = Path::new("/srv/img");
        for name in ["", ".", "..", "../secret.png", "a/b.png", "a\\b.png", "/etc/passwd"] {
            assert!(
                matches!(
                    asset_path(dir, name),
                    Err(RasterError::InvalidAssetName { .. })
                ),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn collage_names_follow_participant() {
        let store = ImageStore::new(ImageDirs::under(Path::new("/srv")));
        assert_eq!(
            store.collage_path(ParticipantId::new(42)),
            PathBuf::from("/srv/collages/collage_42.jpg")
        );
    }
}
