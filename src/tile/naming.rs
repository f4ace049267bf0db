//! Tile and archive file naming.
//!
//! # Naming Policy
//!
//! The declared upload name is split into a base and an extension:
//!
//! - Anything up to the last `/` or `\` is dropped, so archive entries never
//!   contain directory components.
//! - The split happens at the last `.`: `photo.v2.jpg` has base `photo.v2`
//!   and extension `jpg`.
//! - A name without a dot, or ending in a dot, has an empty extension and
//!   tile names carry no trailing dot: `photo` gives `photo_part_1`.
//! - An empty base (`.png`, or an empty name) becomes `image`.
//! - The extension is kept as written, including its case.

/// Base used when the declared name has none.
pub const FALLBACK_BASE_NAME: &str = "image";

/// Extension of the archive download.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Base name and extension shared by every tile of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileNaming {
    base: String,
    extension: String,
}

impl TileNaming {
    /// Build naming from explicit parts.
    ///
    /// A leading dot on `extension` is ignored and an empty `base` falls
    /// back to [`FALLBACK_BASE_NAME`].
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Self {
        let base = base.into();
        let extension = extension.into();
        Self {
            base: if base.is_empty() {
                FALLBACK_BASE_NAME.to_string()
            } else {
                base
            },
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Derive naming from an uploaded file name.
    pub fn from_filename(filename: &str) -> Self {
        let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

        match name.rsplit_once('.') {
            Some((base, extension)) => Self::new(base, extension),
            None => Self::new(name, ""),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Extension without the dot; empty when the upload had none.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Entry name for the tile at 1-based row-major `index`.
    pub fn tile_filename(&self, index: usize) -> String {
        if self.extension.is_empty() {
            format!("{}_part_{}", self.base, index)
        } else {
            format!("{}_part_{}.{}", self.base, index, self.extension)
        }
    }

    /// Suggested download name for the archive, `{base}_split.zip`.
    pub fn archive_filename(&self) -> String {
        format!("{}_split.{}", self.base, ARCHIVE_EXTENSION)
    }
}
