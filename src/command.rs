//! The `split` command: cut a local image file into an archive on disk.
//!
//! The binary only parses arguments and sets up logging; the file work lives
//! here so it can be driven from tests without spawning a process.

use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::tile::{probe_dimensions, Archive, EncodeOptions, SplitRequest, SplitService};

/// What a `split` run wrote to disk.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// The archive that was built.
    pub archive: Archive,

    /// Where the archive was written.
    pub archive_path: PathBuf,

    /// Where the grid preview was written, if one was requested.
    pub preview_path: Option<PathBuf>,
}

/// Split `config.input` and write the archive into `config.output`.
///
/// The output directory is created if missing. When `config.preview` is set,
/// a PNG of the grid overlay is written there before the archive is built.
pub fn split_file(config: &SplitConfig) -> Result<SplitOutput, SplitError> {
    let data = fs::read(&config.input)?;

    let (width, height) = probe_dimensions(&data)?;
    info!(
        "Splitting {} ({}x{}) into a {} grid",
        config.input.display(),
        width,
        height,
        config.grid
    );

    let service = SplitService::with_options(EncodeOptions::with_jpeg_quality(config.jpeg_quality));

    let preview_path = match config.preview {
        Some(ref path) => {
            let png = service.preview(&data, config.grid)?;
            fs::write(path, &png)?;
            info!("Wrote preview to {}", path.display());
            Some(path.clone())
        }
        None => None,
    };

    let request = SplitRequest::new(data, config.upload_name(), config.grid);
    let archive = service.split(&request)?;

    fs::create_dir_all(&config.output)?;
    let archive_path = config.output.join(archive.filename());
    fs::write(&archive_path, archive.data())?;

    info!(
        "Wrote {} tiles to {}",
        archive.tile_count(),
        archive_path.display()
    );

    Ok(SplitOutput {
        archive,
        archive_path,
        preview_path,
    })
}
