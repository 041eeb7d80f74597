//! The obscuring transform: an unrecognizable placeholder of the same shape.
//!
//! Three passes:
//!
//! 1. Gaussian blur to strip fine detail.
//! 2. Nearest-neighbour downsample to a fixed [`OBSCURE_GRID`] square.
//! 3. Nearest-neighbour upsample back to the original dimensions.
//!
//! Steps 2 and 3 produce the blocky look that tells a hidden prize apart
//! from a revealed one. Blur alone leaves the image recognizable.

use image::RgbImage;
use image::imageops::{self, FilterType};

/// Side length of the intermediate pixel grid.
pub const OBSCURE_GRID: u32 = 30;

/// Gaussian sigma for the smoothing pass (a 15x15 kernel's worth).
pub const BLUR_SIGMA: f32 = 2.6;

/// Produce the obscured placeholder for `image`.
///
/// Deterministic and total: width, height and channel count are preserved
/// for any input. A raster with a zero dimension has no content to hide
/// and is returned as-is.
pub fn obscure(image: &RgbImage) -> RgbImage {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let blurred = imageops::blur(image, BLUR_SIGMA);
    let coarse = imageops::resize(&blurred, OBSCURE_GRID, OBSCURE_GRID, FilterType::Nearest);
    imageops::resize(&coarse, width, height, FilterType::Nearest)
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
mod tests {
    use image::Rgb;

    use super::*;

    /// One-pixel black/white checkerboard: maximum fine detail.
    fn checkerboard(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x ^ y) & 1 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    /// Number of horizontal colour changes along row `y`.
    fn transitions(image: &RgbImage, y: u32) -> usize {
        (1..image.width())
            .filter(|&x| image.get_pixel(x, y) != image.get_pixel(x - 1, y))
            .count()
    }

    #[test]
    fn preserves_shape() {
        for (w, h) in [(1, 1), (7, 3), (30, 30), (31, 100), (64, 48), (200, 120)] {
            let out = obscure(&checkerboard(w, h));
            assert_eq!(out.dimensions(), (w, h), "shape changed for {w}x{h}");
            assert_eq!(out.as_raw().len(), (w * h * 3) as usize);
        }
    }

    #[test]
    fn is_deterministic() {
        let input = checkerboard(90, 60);
        assert_eq!(obscure(&input), obscure(&input));
    }

    #[test]
    fn empty_raster_is_returned_unchanged() {
        let empty = RgbImage::new(0, 0);
        assert_eq!(obscure(&empty).dimensions(), (0, 0));
    }

    #[test]
    fn output_is_blocky() {
        let input = checkerboard(120, 120);
        assert_eq!(transitions(&input, 0), 119);

        let out = obscure(&input);
        for y in 0..out.height() {
            // Upsampling a 30-wide grid yields at most 30 runs per row.
            assert!(transitions(&out, y) < OBSCURE_GRID as usize, "row {y} not blocky");
        }
        assert_ne!(out, input);
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let input = RgbImage::from_pixel(50, 40, Rgb([200, 100, 50]));
        let out = obscure(&input);
        // Interior pixels are far enough from the border to be unaffected by
        // how the blur treats edges.
        for y in 12..28 {
            for x in 15..35 {
                let pixel = out.get_pixel(x, y);
                for (got, want) in pixel.0.iter().zip([200_u8, 100, 50]) {
                    assert!(got.abs_diff(want) <= 1, "pixel drifted: {pixel:?}");
                }
            }
        }
    }
}
