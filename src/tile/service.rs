//! Split Service for orchestrating a split request.
//!
//! The SplitService is the main entry point for turning an upload into an
//! archive. It orchestrates:
//! - Grid validation
//! - Source decoding
//! - Partitioning
//! - Tile encoding and packaging
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         SplitService                            │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                      split()                            │    │
//! │  │  1. Validate grid     3. Partition into rects           │    │
//! │  │  2. Decode source     4. Encode tiles & write ZIP       │    │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │           │                    │                    │           │
//! │           ▼                    ▼                    ▼           │
//! │    ┌─────────────┐      ┌─────────────┐    ┌────────────────┐   │
//! │    │ SourceImage │      │  partition  │    │ ArchiveBuilder │   │
//! │    └─────────────┘      └─────────────┘    └────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no per-request state and can be shared across threads.

use std::time::Instant;

use bytes::Bytes;
use tracing::{debug, info};

use crate::error::SplitError;
use crate::grid::{partition, GridSpec};

use super::archive::{Archive, ArchiveBuilder};
use super::encoder::{EncodeOptions, TileEncoder};
use super::naming::{TileNaming, FALLBACK_BASE_NAME};
use super::preview::render_preview_png;
use super::source::SourceImage;

// =============================================================================
// Split Request
// =============================================================================

/// Everything needed to split one upload.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    /// Raw uploaded image bytes
    pub data: Bytes,

    /// Declared upload name; `None` names tiles after the detected format
    pub filename: Option<String>,

    /// Grid shape
    pub grid: GridSpec,
}

impl SplitRequest {
    /// Create a request for an already validated grid.
    pub fn new(data: impl Into<Bytes>, filename: impl Into<String>, grid: GridSpec) -> Self {
        Self {
            data: data.into(),
            filename: Some(filename.into()),
            grid,
        }
    }

    /// Create a request from raw row and column counts.
    ///
    /// Fails with [`SplitError::InvalidGrid`] before any image data is
    /// touched.
    pub fn with_rows_cols(
        data: impl Into<Bytes>,
        filename: impl Into<String>,
        rows: u32,
        cols: u32,
    ) -> Result<Self, SplitError> {
        let grid = GridSpec::new(rows, cols)?;
        Ok(Self::new(data, filename, grid))
    }

    /// Create a request without a declared file name.
    pub fn anonymous(data: impl Into<Bytes>, grid: GridSpec) -> Self {
        Self {
            data: data.into(),
            filename: None,
            grid,
        }
    }

    fn naming(&self, source: &SourceImage) -> TileNaming {
        match &self.filename {
            Some(name) => TileNaming::from_filename(name),
            None => TileNaming::new(FALLBACK_BASE_NAME, source.default_extension()),
        }
    }
}

// =============================================================================
// Split Service
// =============================================================================

/// Service for splitting images into tile archives.
///
/// # Example
///
/// ```ignore
/// use image_splitter::grid::GridPreset;
/// use image_splitter::tile::{SplitRequest, SplitService};
///
/// let service = SplitService::new();
/// let request = SplitRequest::new(bytes, "photo.jpg", GridPreset::TwoByFive.spec());
/// let archive = service.split(&request)?;
///
/// assert_eq!(archive.filename(), "photo_split.zip");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SplitService {
    builder: ArchiveBuilder,
}

impl SplitService {
    /// Create a service with default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with custom encoding options.
    pub fn with_options(options: EncodeOptions) -> Self {
        Self {
            builder: ArchiveBuilder::with_encoder(TileEncoder::with_options(options)),
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        self.builder.encoder().options()
    }

    /// Split the request's image and package the tiles.
    ///
    /// # Errors
    ///
    /// - [`SplitError::Decode`] if the upload is not a readable image
    /// - [`SplitError::Encode`] if any tile cannot be encoded
    /// - [`SplitError::Io`] if the archive cannot be written
    pub fn split(&self, request: &SplitRequest) -> Result<Archive, SplitError> {
        let started = Instant::now();

        let source = SourceImage::decode(&request.data)?;
        debug!(
            width = source.width(),
            height = source.height(),
            format = ?source.format(),
            "Decoded source image"
        );

        let rects = partition(source.width(), source.height(), request.grid);
        let naming = request.naming(&source);
        let archive = self.builder.build(&source, &rects, &naming)?;

        info!(
            grid = %request.grid,
            width = source.width(),
            height = source.height(),
            tiles = archive.tile_count(),
            bytes = archive.data().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Split {}",
            archive.filename()
        );

        Ok(archive)
    }

    /// Render a PNG preview of the grid over the uploaded image.
    pub fn preview(&self, data: &[u8], grid: GridSpec) -> Result<Bytes, SplitError> {
        let source = SourceImage::decode(data)?;
        render_preview_png(source.image(), grid)
    }
}

// =============================================================================
// Tests
// =============================================================================
