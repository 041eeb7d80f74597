//! Collage layout and composition.
//!
//! `n` equally sized tiles go into a near-square grid:
//!
//! ```text
//! cols = floor(sqrt(n))
//! rows = ceil(n / cols)
//! ```
//!
//! Tiles fill row-major, left to right then top to bottom. Trailing cells
//! in the last row stay black.

use image::RgbImage;
use image::imageops;

use crate::error::RasterError;

/// Grid dimensions for a given number of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of tiles placed.
    pub count: usize,
    /// Tiles per row.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

impl GridLayout {
    /// Layout for `count` tiles, or `None` when there is nothing to place.
    pub const fn for_count(count: usize) -> Option<Self> {
        if count == 0 {
            return None;
        }
        // count >= 1, so cols >= 1.
        let cols = count.isqrt();
        let rows = count.div_ceil(cols);
        Some(Self { count, cols, rows })
    }

    /// Grid cell `(row, col)` of the tile at `index`.
    ///
    /// A layout with no columns maps every index to `(0, 0)`.
    pub const fn cell(&self, index: usize) -> (usize, usize) {
        match (index.checked_div(self.cols), index.checked_rem(self.cols)) {
            (Some(row), Some(col)) => (row, col),
            _ => (0, 0),
        }
    }
}

/// Compose `tiles` into one canvas.
///
/// Returns `Ok(None)` for an empty sequence. Every tile must have the
/// dimensions of the first one.
///
/// # Errors
///
/// Returns [`RasterError::TileMismatch`] if any tile differs in size from
/// the first, or [`RasterError::CanvasTooLarge`] if the canvas would
/// overflow `u32` pixel dimensions.
pub fn compose(tiles: &[RgbImage]) -> Result<Option<RgbImage>, RasterError> {
    let Some(layout) = GridLayout::for_count(tiles.len()) else {
        return Ok(None);
    };
    let Some(first) = tiles.first() else {
        return Ok(None);
    };
    let (tile_width, tile_height) = first.dimensions();

    for (index, tile) in tiles.iter().enumerate() {
        if tile.dimensions() != (tile_width, tile_height) {
            return Err(RasterError::TileMismatch {
                index,
                expected: (tile_width, tile_height),
                actual: tile.dimensions(),
            });
        }
    }

    let too_large = || RasterError::CanvasTooLarge {
        cols: u32::try_from(layout.cols).unwrap_or(u32::MAX),
        rows: u32::try_from(layout.rows).unwrap_or(u32::MAX),
        tile_width,
        tile_height,
    };
    let cols = u32::try_from(layout.cols).ok().ok_or_else(too_large)?;
    let rows = u32::try_from(layout.rows).ok().ok_or_else(too_large)?;
    let width = cols.checked_mul(tile_width).ok_or_else(too_large)?;
    let height = rows.checked_mul(tile_height).ok_or_else(too_large)?;

    let mut canvas = RgbImage::new(width, height);
    for (index, tile) in tiles.iter().enumerate() {
        let (row, col) = layout.cell(index);
        // row < rows and col < cols, and both products fit in u32 above.
        let x = i64::from(tile_width).saturating_mul(i64::try_from(col).unwrap_or(i64::MAX));
        let y = i64::from(tile_height).saturating_mul(i64::try_from(row).unwrap_or(i64::MAX));
        imageops::replace(&mut canvas, tile, x, y);
    }

    tracing::debug!(
        tiles = layout.count,
        cols = layout.cols,
        rows = layout.rows,
        width,
        height,
        "Composed collage"
    );

    Ok(Some(canvas))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
mod tests {
    use image::Rgb;

    use super::*;

    /// A solid tile whose colour encodes its index.
    fn tile(index: u8, width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([index.saturating_add(1), 10, 20]))
    }

    #[test]
    fn layout_math() {
        let cases = [
            (1, 1, 1),
            (2, 1, 2),
            (3, 1, 3),
            (4, 2, 2),
            (5, 2, 3),
            (8, 2, 4),
            (9, 3, 3),
            (10, 3, 4),
            (17, 4, 5),
        ];
        for (n, cols, rows) in cases {
            let layout = GridLayout::for_count(n).unwrap();
            assert_eq!((layout.cols, layout.rows), (cols, rows), "n = {n}");
            assert!(layout.cols * layout.rows >= n);
        }
    }

    #[test]
    fn cell_without_columns_is_origin() {
        let layout = GridLayout {
            count: 3,
            cols: 0,
            rows: 0,
        };
        assert_eq!(layout.cell(0), (0, 0));
        assert_eq!(layout.cell(7), (0, 0));
    }

    #[test]
    fn no_layout_for_zero_tiles() {
        assert_eq!(GridLayout::for_count(0), None);
    }

    #[test]
    fn cells_fill_row_major() {
        let layout = GridLayout::for_count(5).unwrap();
        let cells: Vec<_> = (0..5).map(|i| layout.cell(i)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn empty_sequence_composes_to_none() {
        assert!(compose(&[]).unwrap().is_none());
    }

    #[test]
    fn places_each_tile_in_its_cell() {
        let (w, h) = (8, 6);
        let tiles: Vec<_> = (0..5).map(|i| tile(i, w, h)).collect();
        let canvas = compose(&tiles).unwrap().unwrap();

        // n = 5: 2 columns, 3 rows.
        assert_eq!(canvas.dimensions(), (2 * w, 3 * h));

        let layout = GridLayout::for_count(5).unwrap();
        for (i, expected) in tiles.iter().enumerate() {
            let (row, col) = layout.cell(i);
            let (x0, y0) = (col as u32 * w, row as u32 * h);
            for (x, y) in [(x0, y0), (x0 + w - 1, y0 + h - 1)] {
                assert_eq!(canvas.get_pixel(x, y), expected.get_pixel(0, 0), "tile {i}");
            }
        }

        // Trailing cell (row 2, col 1) stays zero-filled.
        assert_eq!(canvas.get_pixel(w, 2 * h), &Rgb([0, 0, 0]));
        assert_eq!(canvas.get_pixel(2 * w - 1, 3 * h - 1), &Rgb([0, 0, 0]));
    }

    #[test]
    fn three_tiles_stack_vertically() {
        let tiles: Vec<_> = (0..3).map(|i| tile(i, 4, 4)).collect();
        let canvas = compose(&tiles).unwrap().unwrap();
        assert_eq!(canvas.dimensions(), (4, 12));
        assert_eq!(canvas.get_pixel(0, 0), &Rgb([1, 10, 20]));
        assert_eq!(canvas.get_pixel(0, 4), &Rgb([2, 10, 20]));
        assert_eq!(canvas.get_pixel(0, 8), &Rgb([3, 10, 20]));
    }

    #[test]
    fn mismatched_tile_is_rejected() {
        let tiles = vec![tile(0, 4, 4), tile(1, 4, 4), tile(2, 5, 4)];
        let err = compose(&tiles).unwrap_err();
        assert!(matches!(
            err,
            RasterError::TileMismatch {
                index: 2,
                expected: (4, 4),
                actual: (5, 4),
            }
        ));
    }
}
