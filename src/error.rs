use thiserror::Error;

/// Errors that can occur while splitting an image into an archive of tiles.
///
/// Every variant is fatal for the request that produced it: nothing is
/// retried and no partial archive is handed back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// Source bytes are not a readable image
    #[error("Failed to decode image: {message}")]
    Decode { message: String },

    /// Grid shape has a zero dimension
    #[error("Invalid grid {rows}x{cols}: rows and columns must be at least 1")]
    InvalidGrid { rows: u32, cols: u32 },

    /// A tile could not be encoded in the source format
    ///
    /// `index` is the 1-based tile number; 0 marks the grid preview.
    #[error("Failed to encode tile {index}: {message}")]
    Encode { index: usize, message: String },

    /// Writing the archive failed
    #[error("Archive error: {0}")]
    Io(String),
}

impl SplitError {
    /// Stable machine-readable identifier for the error kind.
    ///
    /// Used by the HTTP layer as the `error` field of JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::Decode { .. } => "decode_error",
            SplitError::InvalidGrid { .. } => "invalid_grid",
            SplitError::Encode { .. } => "encode_error",
            SplitError::Io(_) => "io_error",
        }
    }
}

impl From<zip::result::ZipError> for SplitError {
    fn from(err: zip::result::ZipError) -> Self {
        SplitError::Io(err.to_string())
    }
}

impl From<std::io::Error> for SplitError {
    fn from(err: std::io::Error) -> Self {
        SplitError::Io(err.to_string())
    }
}
