//! Configuration management for the image splitter.
//!
//! This module provides the command-line interface:
//! - `serve` runs the HTTP API
//! - `split` splits a local file and writes the archive to disk
//!
//! Server options can also be set through environment variables with the
//! `SPLITTER_` prefix.
//!
//! # Environment Variables
//!
//! - `SPLITTER_HOST` - Server bind address (default: 0.0.0.0)
//! - `SPLITTER_PORT` - Server port (default: 3000)
//! - `SPLITTER_MAX_UPLOAD` - Maximum upload size in bytes (default: 32MB)
//! - `SPLITTER_JPEG_QUALITY` - JPEG tile quality (default: 90)
//! - `SPLITTER_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::grid::{GridPreset, GridSpec};
use crate::server::DEFAULT_MAX_UPLOAD_BYTES;
use crate::tile::{is_valid_quality, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Image Splitter - cut an image into a grid of tiles.
///
/// Tiles keep the source image's format and are bundled into a ZIP archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "image-splitter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve(ServeConfig),

    /// Split a local image file
    Split(SplitConfig),
}

// =============================================================================
// Serve Command
// =============================================================================

/// Options for the `serve` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SPLITTER_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SPLITTER_PORT")]
    pub port: u16,

    /// Maximum accepted upload size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "SPLITTER_MAX_UPLOAD")]
    pub max_upload_bytes: usize,

    /// JPEG quality for tiles cut from JPEG images (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "SPLITTER_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "SPLITTER_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_quality(self.jpeg_quality) {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        if self.max_upload_bytes < 1024 {
            return Err("max_upload_bytes must be at least 1KB".to_string());
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Split Command
// =============================================================================

/// Options for the `split` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SplitConfig {
    /// Image file to split.
    pub input: PathBuf,

    /// Grid shape as ROWSxCOLS.
    ///
    /// Presets are 2x5 and 3x3, but any positive shape is accepted.
    #[arg(short, long, default_value_t = GridPreset::default().spec())]
    pub grid: GridSpec,

    /// Directory to write the archive to.
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Also write a PNG preview of the grid to this path.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// JPEG quality for tiles cut from JPEG images (1-100).
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl SplitConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !is_valid_quality(self.jpeg_quality) {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        if !self.input.is_file() {
            return Err(format!("input file not found: {}", self.input.display()));
        }

        Ok(())
    }

    /// Name used for tiles and the archive: the input's file name.
    pub fn upload_name(&self) -> String {
        self.input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================
