//! Integration tests for the filesystem image store.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use giveaway_images::{ImageDirs, ImageStore, RasterError, RgbImage, compose};
use giveaway_types::ParticipantId;
use image::Rgb;
use tempfile::TempDir;

fn setup() -> (TempDir, ImageStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = ImageStore::new(ImageDirs::under(dir.path()));
    std::fs::create_dir_all(&store.dirs().source).unwrap();
    (dir, store)
}

/// Write a gradient source image so obscuring has something to destroy.
fn put_source(store: &ImageStore, name: &str, width: u32, height: u32) -> RgbImage {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    image.save(store.dirs().source.join(name)).unwrap();
    image
}

#[test]
fn reads_are_repeatable() {
    let (_dir, store) = setup();
    let written = put_source(&store, "a.png", 40, 30);

    let first = store.read_image("a.png").unwrap();
    let second = store.read_image("a.png").unwrap();
    assert_eq!(first, written);
    assert_eq!(first, second);
}

#[test]
fn missing_source_is_asset_missing() {
    let (_dir, store) = setup();
    let err = store.read_image("nope.png").unwrap_err();
    assert!(matches!(err, RasterError::AssetMissing { ref name } if name == "nope.png"));
}

#[test]
fn hide_image_writes_same_shape_placeholder() {
    let (_dir, store) = setup();
    put_source(&store, "a.png", 64, 48);
    assert!(!store.has_obscured("a.png"));

    let hidden = store.hide_image("a.png").unwrap();
    assert_eq!(hidden.dimensions(), (64, 48));
    assert!(store.has_obscured("a.png"));
    assert_eq!(store.read_obscured("a.png").unwrap(), hidden);
    assert_ne!(hidden, store.read_image("a.png").unwrap());
}

#[test]
fn ensure_obscured_generates_once() {
    let (_dir, store) = setup();
    // JPEG is lossy: the first call must already hand back the stored pixels.
    for name in ["a.png", "a.jpg"] {
        put_source(&store, name, 64, 48);

        let generated = store.ensure_obscured(name).unwrap();
        // Remove the source: the stored placeholder is now the only copy.
        std::fs::remove_file(store.dirs().source.join(name)).unwrap();
        let reused = store.ensure_obscured(name).unwrap();
        assert_eq!(generated, reused, "{name} changed after first use");
        assert_eq!(store.read_obscured(name).unwrap(), reused);
    }
}

#[test]
fn jpeg_placeholder_matches_stored_copy() {
    let (_dir, store) = setup();
    put_source(&store, "b.jpg", 64, 48);

    let hidden = store.hide_image("b.jpg").unwrap();
    assert_eq!(hidden.dimensions(), (64, 48));
    assert_eq!(store.read_obscured("b.jpg").unwrap(), hidden);
}

#[test]
fn ensure_obscured_without_source_is_asset_missing() {
    let (_dir, store) = setup();
    let err = store.ensure_obscured("ghost.png").unwrap_err();
    assert!(matches!(err, RasterError::AssetMissing { .. }));
}

#[test]
fn invalid_names_never_touch_disk() {
    let (_dir, store) = setup();
    let image = RgbImage::new(2, 2);
    let err = store.write_obscured("../escape.png", &image).unwrap_err();
    assert!(matches!(err, RasterError::InvalidAssetName { .. }));
    assert!(!store.has_obscured("../escape.png"));
}

#[test]
fn collage_is_written_per_participant() {
    let (dir, base) = setup();
    // PNG keeps the round trip lossless.
    let store = ImageStore::new(ImageDirs {
        collage_extension: String::from("png"),
        ..base.dirs().clone()
    });

    let tiles = vec![put_source(&store, "a.png", 10, 10), put_source(&store, "b.png", 10, 10)];
    let canvas = compose(&tiles).unwrap().unwrap();
    let path = store.write_collage(ParticipantId::new(5), &canvas).unwrap();

    assert_eq!(path, dir.path().join("collages").join("collage_5.png"));
    let reread = image::open(&path).unwrap().to_rgb8();
    assert_eq!(reread, canvas);
}
