//! Source image decoding.
//!
//! The uploaded bytes are decoded once per request. The detected encoding is
//! kept next to the pixels so every tile can be written back in the same
//! format.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::SplitError;

/// A decoded image together with the encoding it was read from.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    format: ImageFormat,
}

impl SourceImage {
    /// Decode raw image bytes, detecting the format from the content.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Decode`] if the format is not recognized, the
    /// data is corrupt, or the image has a zero dimension.
    pub fn decode(data: &[u8]) -> Result<Self, SplitError> {
        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| SplitError::Decode {
                message: e.to_string(),
            })?;

        let format = reader.format().ok_or_else(|| SplitError::Decode {
            message: "unrecognized image format".to_string(),
        })?;

        let image = reader.decode().map_err(|e| SplitError::Decode {
            message: e.to_string(),
        })?;

        Self::new(image, format)
    }

    /// Wrap an already decoded image.
    pub fn new(image: DynamicImage, format: ImageFormat) -> Result<Self, SplitError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(SplitError::Decode {
                message: format!(
                    "image has no pixels ({}x{})",
                    image.width(),
                    image.height()
                ),
            });
        }
        Ok(Self { image, format })
    }

    /// Decoded pixels.
    #[inline]
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Encoding the source bytes were in.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// MIME type of the source encoding, e.g. `image/png`.
    pub fn content_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Preferred file extension for the source encoding, without the dot.
    pub fn default_extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// Read image dimensions without decoding pixel data.
///
/// # Returns
///
/// `(width, height)` in pixels.
pub fn probe_dimensions(data: &[u8]) -> Result<(u32, u32), SplitError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| SplitError::Decode {
            message: e.to_string(),
        })?
        .into_dimensions()
        .map_err(|e| SplitError::Decode {
            message: e.to_string(),
        })
}
