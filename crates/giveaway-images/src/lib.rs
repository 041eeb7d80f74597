//! Prize images for the giveaway prize board.
//!
//! Three logical namespaces live on disk, each a directory:
//!
//! | Namespace | Contents | Addressed by |
//! |-----------|----------|--------------|
//! | source | revealed prize images | asset name |
//! | obscured | blocky placeholders, same file name | asset name |
//! | collages | generated per-participant canvases | participant id |
//!
//! All rasters are 3-channel RGB. Everything in this crate is synchronous
//! and does blocking file I/O; async callers should run it on a blocking
//! thread.
//!
//! # Modules
//!
//! - [`store`] -- The [`ImageStore`] over the three namespaces
//! - [`obscure`] -- The blur + pixelate placeholder transform
//! - [`collage`] -- Near-square grid layout and canvas composition
//! - [`error`] -- Shared error types

pub mod collage;
pub mod error;
pub mod obscure;
pub mod store;

// Re-export primary types for convenience.
pub use collage::{GridLayout, compose};
pub use error::RasterError;
pub use image::RgbImage;
pub use obscure::obscure;
pub use store::{ImageDirs, ImageStore};
