//! Tile pipeline.
//!
//! This module turns a decoded image and a list of grid rectangles into
//! encoded tiles and a ZIP archive.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        HTTP Handlers / CLI              │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              Split Service              │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ SourceImage  │  │ ArchiveBuilder  │  │
//! │  │  (decode +   │  │  (crop, encode, │  │
//! │  │   format)    │  │   zip)          │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │            grid::partition              │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`SplitService`]: Main entry point, runs the full pipeline for a request
//! - [`SourceImage`]: Decoded pixels plus the detected encoding
//! - [`TileEncoder`]: Crops one rectangle and encodes it in the source format
//! - [`ArchiveBuilder`]: Encodes all tiles and writes them into a ZIP
//! - [`TileNaming`]: Tile and archive file naming
//! - [`render_preview`]: Grid overlay for previews
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, ImageFormat, RgbImage};
//! use image_splitter::grid::{partition, GridSpec};
//! use image_splitter::tile::{ArchiveBuilder, SourceImage, TileNaming};
//!
//! let image = DynamicImage::ImageRgb8(RgbImage::new(100, 60));
//! let source = SourceImage::new(image, ImageFormat::Png).unwrap();
//!
//! let rects = partition(source.width(), source.height(), GridSpec::new(2, 5).unwrap());
//! let naming = TileNaming::from_filename("photo.png");
//! let archive = ArchiveBuilder::new().build(&source, &rects, &naming).unwrap();
//!
//! assert_eq!(archive.tile_count(), 10);
//! assert_eq!(archive.entries()[0], "photo_part_1.png");
//! ```

mod archive;
mod encoder;
mod naming;
mod preview;
mod service;
mod source;

pub use archive::{write_archive, Archive, ArchiveBuilder, Tile, ARCHIVE_CONTENT_TYPE};
pub use encoder::{
    clamp_quality, is_valid_quality, EncodeOptions, TileEncoder, DEFAULT_JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
pub use naming::{TileNaming, ARCHIVE_EXTENSION, FALLBACK_BASE_NAME};
pub use preview::{render_preview, render_preview_png};
pub use service::{SplitRequest, SplitService};
pub use source::{probe_dimensions, SourceImage};
