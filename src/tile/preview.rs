//! Grid preview overlay.
//!
//! Draws the cell boundaries over a copy of the source image so users can
//! see where the cuts will fall. Line positions come from
//! [`crate::grid::boundaries`], the same computation that drives the crop.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, Blend};
use imageproc::rect::Rect as DrawRect;

use crate::error::SplitError;
use crate::grid::{boundaries, GridSpec};

/// Outer line colour.
const HALO_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Inner line colour, half transparent.
const CORE_COLOR: Rgba<u8> = Rgba([0, 0, 0, 128]);

/// Width of the white halo: `max(2, width / 200)`.
fn halo_width(image_width: u32) -> u32 {
    (image_width / 200).max(2)
}

/// Width of the dark core: `max(1, width / 400)`.
fn core_width(image_width: u32) -> u32 {
    (image_width / 400).max(1)
}

/// A band of `thickness` pixels centred on `at`.
fn band_start(at: u32, thickness: u32) -> i32 {
    at as i32 - (thickness / 2) as i32
}

/// Render the grid lines of `grid` over a copy of `image`.
///
/// Only interior boundaries are drawn; the image edges stay untouched. An
/// image with no pixels is returned as an empty copy.
pub fn render_preview(image: &DynamicImage, grid: GridSpec) -> RgbaImage {
    let width = image.width();
    let height = image.height();
    if width == 0 || height == 0 {
        return image.to_rgba8();
    }

    let xs = boundaries(grid.cols(), width);
    let ys = boundaries(grid.rows(), height);
    let interior_xs = &xs[1..xs.len() - 1];
    let interior_ys = &ys[1..ys.len() - 1];

    let mut canvas = Blend(image.to_rgba8());

    for (thickness, color) in [
        (halo_width(width), HALO_COLOR),
        (core_width(width), CORE_COLOR),
    ] {
        for &x in interior_xs {
            let band = DrawRect::at(band_start(x, thickness), 0).of_size(thickness, height);
            draw_filled_rect_mut(&mut canvas, band, color);
        }
        for &y in interior_ys {
            let band = DrawRect::at(0, band_start(y, thickness)).of_size(width, thickness);
            draw_filled_rect_mut(&mut canvas, band, color);
        }
    }

    canvas.0
}

/// Render the preview and encode it as PNG.
pub fn render_preview_png(image: &DynamicImage, grid: GridSpec) -> Result<Bytes, SplitError> {
    let preview = render_preview(image, grid);

    let mut output = Vec::new();
    preview
        .write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
        .map_err(|e| SplitError::Encode {
            index: 0,
            message: format!("preview: {}", e),
        })?;

    Ok(Bytes::from(output))
}
