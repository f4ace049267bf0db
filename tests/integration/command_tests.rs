//! Tests for the `split` command over files on disk.

use std::fs;
use std::path::PathBuf;

use image_splitter::grid::GridSpec;
use image_splitter::{split_file, SplitConfig, DEFAULT_JPEG_QUALITY};

use super::test_utils::{decode, is_valid_png, png_bytes, read_zip};

/// Fresh scratch directory unique to this process and test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "image-splitter-{}-{}",
        std::process::id(),
        name
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn config(input: PathBuf, output: PathBuf, grid: GridSpec) -> SplitConfig {
    SplitConfig {
        input,
        grid,
        output,
        preview: None,
        jpeg_quality: DEFAULT_JPEG_QUALITY,
        verbose: false,
    }
}

#[test]
fn test_split_file_writes_archive() {
    let dir = scratch_dir("archive");
    let input = dir.join("poster.png");
    fs::write(&input, png_bytes(60, 40)).unwrap();

    let config = config(input, dir.join("out"), GridSpec::new(2, 3).unwrap());
    config.validate().unwrap();
    let output = split_file(&config).unwrap();

    assert_eq!(output.archive_path, dir.join("out").join("poster_split.zip"));
    assert!(output.preview_path.is_none());

    let entries = read_zip(&fs::read(&output.archive_path).unwrap());
    assert_eq!(entries.len(), 6);
    assert_eq!(entries[0].0, "poster_part_1.png");
    assert_eq!(decode(&entries[5].1).width(), 20);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_split_file_writes_preview() {
    let dir = scratch_dir("preview");
    let input = dir.join("scene.png");
    fs::write(&input, png_bytes(30, 30)).unwrap();

    let mut config = config(input, dir.clone(), GridSpec::new(3, 3).unwrap());
    config.preview = Some(dir.join("scene_grid.png"));
    let output = split_file(&config).unwrap();

    let preview = fs::read(output.preview_path.unwrap()).unwrap();
    assert!(is_valid_png(&preview));
    assert_eq!(decode(&preview).width(), 30);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_split_file_rejects_non_image() {
    let dir = scratch_dir("non-image");
    let input = dir.join("notes.txt");
    fs::write(&input, b"plain text, not pixels").unwrap();

    let config = config(input, dir.clone(), GridSpec::new(2, 2).unwrap());
    let err = split_file(&config).unwrap_err();
    assert_eq!(err.kind(), "decode_error");
    assert!(!dir.join("notes_split.zip").exists());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_split_file_missing_input() {
    let dir = scratch_dir("missing");
    let config = config(dir.join("absent.png"), dir.clone(), GridSpec::new(1, 1).unwrap());

    assert!(config.validate().is_err());
    assert_eq!(split_file(&config).unwrap_err().kind(), "io_error");

    fs::remove_dir_all(&dir).unwrap();
}
