//! # Image Splitter
//!
//! Cut a raster image into a regular grid of tiles and bundle the tiles into
//! a ZIP archive.
//!
//! ## Features
//!
//! - **Exact partitioning**: Cells cover every pixel exactly once, even when
//!   the image size is not divisible by the grid
//! - **Format preserving**: Tiles are encoded in the source image's format
//! - **Deterministic output**: Stable tile names and entry order
//! - **Grid preview**: Overlay of the cut lines, computed from the same
//!   partition as the tiles
//! - **HTTP API and CLI**: Axum server and a `split` command
//!
//! ## Architecture
//!
//! - [`grid`] - Grid shapes, presets and the partition algorithm
//! - [`tile`] - Decoding, tile encoding, archive building and preview
//! - [`server`] - Axum-based HTTP server and routes
//! - [`command`] - The `split` command over local files
//! - [`config`] - CLI and configuration types
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use image_splitter::{GridPreset, SplitRequest, SplitService};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let request = SplitRequest::new(bytes, "photo.jpg", GridPreset::TwoByFive.spec());
//!
//! let archive = SplitService::new().split(&request).unwrap();
//! assert_eq!(archive.filename(), "photo_split.zip");
//! std::fs::write(archive.filename(), archive.data()).unwrap();
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod grid;
pub mod server;
pub mod tile;

// Re-export commonly used types
pub use command::{split_file, SplitOutput};
pub use config::{Cli, Command, ServeConfig, SplitConfig};
pub use error::SplitError;
pub use grid::{boundaries, partition, partition_checked, GridPreset, GridSpec, Rect};
pub use server::{create_router, AppState, ErrorResponse, HealthResponse, RouterConfig};
pub use tile::{
    render_preview, render_preview_png, write_archive, Archive, ArchiveBuilder, EncodeOptions,
    SourceImage, SplitRequest, SplitService, Tile, TileEncoder, TileNaming, ARCHIVE_CONTENT_TYPE,
    DEFAULT_JPEG_QUALITY,
};
