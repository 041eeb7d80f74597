//! Error types for image storage and composition.

/// Errors that can occur while reading, writing or composing images.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The requested asset does not exist in its namespace.
    #[error("asset missing: {name}")]
    AssetMissing {
        /// The asset name that was looked up.
        name: String,
    },

    /// The asset name would escape its namespace directory.
    #[error("invalid asset name: {name:?}")]
    InvalidAssetName {
        /// The rejected name.
        name: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// A collage tile does not match the dimensions of the first tile.
    #[error(
        "tile {index} is {}x{}, expected {}x{}",
        .actual.0, .actual.1, .expected.0, .expected.1
    )]
    TileMismatch {
        /// Position of the offending tile in the collage sequence.
        index: usize,
        /// Width and height of the first tile.
        expected: (u32, u32),
        /// Width and height of the offending tile.
        actual: (u32, u32),
    },

    /// The collage canvas would not fit in `u32` pixel dimensions.
    #[error("collage of {cols}x{rows} tiles of {tile_width}x{tile_height} is too large")]
    CanvasTooLarge {
        /// Grid columns.
        cols: u32,
        /// Grid rows.
        rows: u32,
        /// Tile width in pixels.
        tile_width: u32,
        /// Tile height in pixels.
        tile_height: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_mismatch_display() {
        let err = RasterError::TileMismatch {
            index: 2,
            expected: (64, 48),
            actual: (32, 32),
        };
        assert_eq!(err.to_string(), "tile 2 is 32x32, expected 64x48");
    }

    #[test]
    fn asset_missing_display() {
        let err = RasterError::AssetMissing {
            name: String::from("cat.png"),
        };
        assert!(err.to_string().contains("cat.png"));
    }
}
