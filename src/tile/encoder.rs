//! Tile encoder.
//!
//! Crops a rectangle out of the source image and encodes it in the source
//! image's format.
//!
//! # Design Decisions
//!
//! - **Exact crop**: Pixels are copied as-is. No scaling or resampling.
//!
//! - **Same format out as in**: A PNG upload yields PNG tiles, a JPEG upload
//!   yields JPEG tiles, and so on. No format conversion.
//!
//! - **Quality control**: JPEG is the only lossy output; its quality is
//!   configurable. Every other format uses the codec's defaults.

use std::io::Cursor;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageFormat};

use crate::error::SplitError;
use crate::grid::Rect;

use super::source::SourceImage;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Options
// =============================================================================

/// Settings applied when encoding tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality (1-100), only used for JPEG sources
    pub jpeg_quality: u8,
}

impl EncodeOptions {
    /// Options with the given JPEG quality, clamped to 1-100.
    pub fn with_jpeg_quality(quality: u8) -> Self {
        Self {
            jpeg_quality: clamp_quality(quality),
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

// =============================================================================
// Tile Encoder
// =============================================================================

/// Crops and encodes individual tiles.
///
/// # Example
///
/// ```ignore
/// use image_splitter::tile::{SourceImage, TileEncoder};
/// use image_splitter::grid::{partition, GridSpec};
///
/// let source = SourceImage::decode(&bytes)?;
/// let rects = partition(source.width(), source.height(), GridSpec::new(3, 3)?);
///
/// let encoder = TileEncoder::new();
/// let first = encoder.encode(&source, rects[0], 1)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct TileEncoder {
    options: EncodeOptions,
}

impl TileEncoder {
    /// Create an encoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder with custom options.
    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EncodeOptions {
        self.options
    }

    /// Crop `rect` out of `source` and encode it in the source format.
    ///
    /// `index` is the 1-based tile number and only tags errors. A rectangle
    /// with no pixels encodes to an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Encode`] if no encoder exists for the source
    /// format or the encoder rejects the pixel layout.
    pub fn encode(
        &self,
        source: &SourceImage,
        rect: Rect,
        index: usize,
    ) -> Result<Bytes, SplitError> {
        if rect.is_empty() {
            return Ok(Bytes::new());
        }

        let tile = source
            .image()
            .crop_imm(rect.left, rect.top, rect.width(), rect.height());

        self.encode_image(&tile, source.format())
            .map_err(|e| SplitError::Encode {
                index,
                message: e.to_string(),
            })
    }

    /// Encode a whole image in `format`.
    pub fn encode_image(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
    ) -> Result<Bytes, image::ImageError> {
        let mut output = Vec::new();

        match format {
            ImageFormat::Jpeg => {
                let mut encoder =
                    JpegEncoder::new_with_quality(&mut output, self.options.jpeg_quality);
                // JPEG has no alpha channel and only 8-bit samples
                match image.color() {
                    ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16 => {
                        encoder.encode_image(&image.to_luma8())?
                    }
                    _ => encoder.encode_image(&image.to_rgb8())?,
                }
            }
            _ => image.write_to(&mut Cursor::new(&mut output), format)?,
        }

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Validate JPEG quality parameter.
///
/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    (MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality)
}

/// Clamp quality to valid range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================
