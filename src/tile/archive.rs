//! Archive building.
//!
//! Encodes every grid cell of a source image and bundles the tiles into a
//! single in-memory ZIP file.
//!
//! # Determinism
//!
//! Entries are written in row-major order with a fixed modification time, so
//! identical inputs always produce identical archive bytes.

use std::io::{Cursor, Write};

use bytes::Bytes;
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::SplitError;
use crate::grid::Rect;

use super::encoder::TileEncoder;
use super::naming::TileNaming;
use super::source::SourceImage;

/// MIME type of the archive payload.
pub const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

// =============================================================================
// Tile
// =============================================================================

/// One cropped and encoded grid cell.
#[derive(Debug, Clone)]
pub struct Tile {
    /// 1-based row-major position
    pub index: usize,

    /// Pixel region of the source image
    pub rect: Rect,

    /// Archive entry name
    pub filename: String,

    /// Encoded image data, empty for zero-area cells
    pub data: Bytes,
}

// =============================================================================
// Archive
// =============================================================================

/// A finished ZIP archive of tiles.
#[derive(Debug, Clone)]
pub struct Archive {
    data: Bytes,
    entries: Vec<String>,
    filename: String,
}

impl Archive {
    /// Serialized ZIP bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Consume the archive, returning the ZIP bytes.
    pub fn into_data(self) -> Bytes {
        self.data
    }

    /// Entry names in archive order.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Number of tiles in the archive.
    pub fn tile_count(&self) -> usize {
        self.entries.len()
    }

    /// Suggested download name, e.g. `photo_split.zip`.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &'static str {
        ARCHIVE_CONTENT_TYPE
    }
}

// =============================================================================
// Archive Builder
// =============================================================================

/// Crops, encodes and packages tiles.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
    encoder: TileEncoder,
}

impl ArchiveBuilder {
    /// Create a builder with default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder around a configured encoder.
    pub fn with_encoder(encoder: TileEncoder) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &TileEncoder {
        &self.encoder
    }

    /// Encode every rectangle and bundle the results into one archive.
    ///
    /// # Errors
    ///
    /// Fails with [`SplitError::Encode`] on the first tile that cannot be
    /// encoded, or [`SplitError::Io`] if the archive cannot be written. No
    /// partial archive is returned in either case.
    pub fn build(
        &self,
        source: &SourceImage,
        rects: &[Rect],
        naming: &TileNaming,
    ) -> Result<Archive, SplitError> {
        let tiles = self.encode_tiles(source, rects, naming)?;
        write_archive(&tiles, naming)
    }

    /// Encode every rectangle without packaging.
    ///
    /// Tiles come back in the order of `rects`, numbered from 1.
    pub fn encode_tiles(
        &self,
        source: &SourceImage,
        rects: &[Rect],
        naming: &TileNaming,
    ) -> Result<Vec<Tile>, SplitError> {
        rects
            .iter()
            .enumerate()
            .map(|(i, &rect)| {
                let index = i + 1;
                let data = self.encoder.encode(source, rect, index)?;

                debug!(
                    index,
                    left = rect.left,
                    top = rect.top,
                    width = rect.width(),
                    height = rect.height(),
                    bytes = data.len(),
                    "Encoded tile"
                );

                Ok(Tile {
                    index,
                    rect,
                    filename: naming.tile_filename(index),
                    data,
                })
            })
            .collect()
    }
}

/// Write already encoded tiles into a ZIP archive, in slice order.
pub fn write_archive(tiles: &[Tile], naming: &TileNaming) -> Result<Archive, SplitError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut entries = Vec::with_capacity(tiles.len());

    for tile in tiles {
        writer.start_file(tile.filename.as_str(), options)?;
        writer.write_all(&tile.data)?;
        entries.push(tile.filename.clone());
    }

    let data = writer.finish()?.into_inner();

    Ok(Archive {
        data: Bytes::from(data),
        entries,
        filename: naming.archive_filename(),
    })
}

// =============================================================================
// Tests
// =============================================================================
