//! End-to-end tests for the split pipeline.
//!
//! Tests verify:
//! - Tile count, dimensions and names for the presets
//! - Pixel-exact tiles for lossless formats
//! - Complete coverage on sizes not divisible by the grid
//! - Deterministic archives
//! - Error classification

use image::{GenericImageView, ImageFormat};

use image_splitter::grid::{partition, GridPreset, GridSpec};
use image_splitter::tile::{SourceImage, SplitRequest, SplitService};
use image_splitter::SplitError;

use super::test_utils::{
    coordinate_image, decode, encode, is_valid_jpeg, is_valid_png, jpeg_bytes, png_bytes,
    read_zip, translucent_image,
};

fn grid(rows: u32, cols: u32) -> GridSpec {
    GridSpec::new(rows, cols).unwrap()
}

// =============================================================================
// Preset Scenarios
// =============================================================================

#[test]
fn test_photo_jpg_two_by_five() {
    let request = SplitRequest::new(jpeg_bytes(1000, 600), "photo.jpg", GridPreset::TwoByFive.spec());
    let archive = SplitService::new().split(&request).unwrap();

    assert_eq!(archive.filename(), "photo_split.zip");
    assert_eq!(archive.content_type(), "application/zip");

    let entries = read_zip(archive.data());
    assert_eq!(entries.len(), 10);

    for (i, (name, data)) in entries.iter().enumerate() {
        assert_eq!(name, &format!("photo_part_{}.jpg", i + 1));
        assert!(is_valid_jpeg(data), "{} should be a JPEG", name);
        assert_eq!(decode(data).dimensions(), (200, 300));
    }
}

#[test]
fn test_three_by_three_png() {
    let request = SplitRequest::new(png_bytes(90, 60), "grid.png", GridPreset::ThreeByThree.spec());
    let archive = SplitService::new().split(&request).unwrap();

    let names: Vec<String> = read_zip(archive.data())
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    let expected: Vec<String> = (1..=9).map(|i| format!("grid_part_{}.png", i)).collect();
    assert_eq!(names, expected);
}

// =============================================================================
// Pixel Fidelity
// =============================================================================

#[test]
fn test_png_tiles_match_direct_crop() {
    let original = coordinate_image(101, 37);
    let request = SplitRequest::new(
        encode(&original, ImageFormat::Png),
        "odd.png",
        grid(3, 4),
    );
    let archive = SplitService::new().split(&request).unwrap();
    let rects = partition(101, 37, grid(3, 4));

    let entries = read_zip(archive.data());
    assert_eq!(entries.len(), rects.len());

    for ((name, data), rect) in entries.iter().zip(&rects) {
        assert!(is_valid_png(data), "{} should be a PNG", name);
        let tile = decode(data);
        let expected = original.crop_imm(rect.left, rect.top, rect.width(), rect.height());
        assert_eq!(tile.dimensions(), expected.dimensions());
        assert_eq!(
            tile.to_rgb8().as_raw(),
            expected.to_rgb8().as_raw(),
            "{} differs from the direct crop",
            name
        );
    }
}

#[test]
fn test_png_alpha_is_preserved() {
    let original = translucent_image(40, 40);
    let request = SplitRequest::new(encode(&original, ImageFormat::Png), "alpha.png", grid(2, 2));
    let archive = SplitService::new().split(&request).unwrap();

    let (_, first) = &read_zip(archive.data())[0];
    let tile = decode(first);
    assert!(tile.color().has_alpha());
    assert_eq!(
        tile.to_rgba8().as_raw(),
        original.crop_imm(0, 0, 20, 20).to_rgba8().as_raw()
    );
}

#[test]
fn test_webp_tiles_stay_webp() {
    let original = coordinate_image(30, 30);
    let request = SplitRequest::new(encode(&original, ImageFormat::WebP), "pic.webp", grid(3, 3));
    let archive = SplitService::new().split(&request).unwrap();

    for (name, data) in read_zip(archive.data()) {
        assert!(name.ends_with(".webp"));
        assert_eq!(&data[..4], b"RIFF");
        assert_eq!(decode(&data).dimensions(), (10, 10));
    }
}

#[test]
fn test_bmp_tiles_are_pixel_exact() {
    let original = coordinate_image(21, 14);
    let request = SplitRequest::new(encode(&original, ImageFormat::Bmp), "pic.bmp", grid(2, 3));
    let archive = SplitService::new().split(&request).unwrap();
    let rects = partition(21, 14, grid(2, 3));

    for ((_, data), rect) in read_zip(archive.data()).iter().zip(&rects) {
        assert_eq!(&data[..2], b"BM");
        let expected = original.crop_imm(rect.left, rect.top, rect.width(), rect.height());
        assert_eq!(decode(data).to_rgb8().as_raw(), expected.to_rgb8().as_raw());
    }
}

// =============================================================================
// Coverage
// =============================================================================

#[test]
fn test_tiles_cover_every_pixel_once() {
    for &(width, height, rows, cols) in &[
        (100, 100, 3, 3),
        (1000, 600, 2, 5),
        (7, 5, 2, 5),
        (333, 1, 1, 9),
        (64, 63, 4, 4),
    ] {
        let rects = partition(width, height, grid(rows, cols));
        let area: u64 = rects.iter().map(|r| r.area()).sum();
        assert_eq!(area, width as u64 * height as u64);

        for (i, a) in rects.iter().enumerate() {
            for b in rects.iter().skip(i + 1) {
                assert!(!a.overlaps(b));
            }
        }
    }
}

#[test]
fn test_width_100_three_columns_boundaries() {
    let rects = partition(100, 100, grid(1, 3));
    let edges: Vec<(u32, u32)> = rects.iter().map(|r| (r.left, r.right)).collect();
    assert_eq!(edges, vec![(0, 33), (33, 67), (67, 100)]);
}

#[test]
fn test_uneven_tile_sizes_in_archive() {
    let request = SplitRequest::new(png_bytes(100, 10), "strip.png", grid(1, 3));
    let archive = SplitService::new().split(&request).unwrap();

    let widths: Vec<u32> = read_zip(archive.data())
        .iter()
        .map(|(_, data)| decode(data).width())
        .collect();
    assert_eq!(widths, vec![33, 34, 33]);
}

#[test]
fn test_single_cell_is_whole_image() {
    let original = coordinate_image(25, 17);
    let request = SplitRequest::new(encode(&original, ImageFormat::Png), "whole.png", grid(1, 1));
    let archive = SplitService::new().split(&request).unwrap();

    let entries = read_zip(archive.data());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, "whole_part_1.png");
    assert_eq!(
        decode(&entries[0].1).to_rgb8().as_raw(),
        original.to_rgb8().as_raw()
    );
}

// =============================================================================
// Determinism & Naming
// =============================================================================

#[test]
fn test_split_is_deterministic() {
    let data = png_bytes(48, 32);
    let service = SplitService::new();

    let first = service
        .split(&SplitRequest::new(data.clone(), "a.png", grid(2, 5)))
        .unwrap();
    let second = service
        .split(&SplitRequest::new(data, "a.png", grid(2, 5)))
        .unwrap();

    assert_eq!(first.data(), second.data());
}

#[test]
fn test_filename_without_extension() {
    let request = SplitRequest::new(png_bytes(20, 20), "snapshot", grid(1, 2));
    let archive = SplitService::new().split(&request).unwrap();

    assert_eq!(archive.entries(), &["snapshot_part_1", "snapshot_part_2"]);
    assert_eq!(archive.filename(), "snapshot_split.zip");
}

#[test]
fn test_filename_with_multiple_dots() {
    let request = SplitRequest::new(png_bytes(20, 20), "my.holiday.pic.png", grid(1, 1));
    let archive = SplitService::new().split(&request).unwrap();

    assert_eq!(archive.entries(), &["my.holiday.pic_part_1.png"]);
    assert_eq!(archive.filename(), "my.holiday.pic_split.zip");
}

#[test]
fn test_declared_extension_kept_even_if_format_differs() {
    // A PNG uploaded as .jpg: entries keep the declared name, bytes stay PNG
    let request = SplitRequest::new(png_bytes(20, 20), "mislabelled.jpg", grid(1, 2));
    let archive = SplitService::new().split(&request).unwrap();

    for (name, data) in read_zip(archive.data()) {
        assert!(name.ends_with(".jpg"));
        assert!(is_valid_png(&data));
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_zero_rows_rejected() {
    let result = SplitRequest::with_rows_cols(png_bytes(10, 10), "a.png", 0, 3);
    assert!(matches!(
        result,
        Err(SplitError::InvalidGrid { rows: 0, cols: 3 })
    ));
}

#[test]
fn test_corrupt_image_is_decode_error() {
    let mut data = png_bytes(40, 40);
    data.truncate(60);
    let result = SplitService::new().split(&SplitRequest::new(data, "broken.png", grid(2, 2)));

    let err = result.unwrap_err();
    assert_eq!(err.kind(), "decode_error");
}

#[test]
fn test_source_image_reports_format() {
    let source = SourceImage::decode(&jpeg_bytes(16, 16)).unwrap();
    assert_eq!(source.format(), ImageFormat::Jpeg);
    assert_eq!(source.default_extension(), "jpg");
}
