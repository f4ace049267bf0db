//! Grid partitioning.
//!
//! Turns an image size and a row/column count into the exact pixel
//! rectangles of every grid cell. The same rectangles drive both the tile
//! crop and the preview overlay.
//!
//! # Boundary Rounding
//!
//! Boundary `k` of `n` cells along a dimension of `d` pixels sits at
//! `round(k * d / n)`. Each boundary is computed on its own from exact
//! integer arithmetic, so neighbouring cells always share an edge and the
//! last edge always lands on `d`:
//!
//! ```text
//! width = 100, cols = 3
//!
//! 0          33          67          100
//! ├──────────┼───────────┼───────────┤
//! │  col 0   │   col 1   │   col 2   │
//! ```
//!
//! # Example
//!
//! ```
//! use image_splitter::grid::{partition, GridSpec};
//!
//! let grid = GridSpec::new(2, 5).unwrap();
//! let rects = partition(1000, 600, grid);
//!
//! assert_eq!(rects.len(), 10);
//! assert_eq!(rects[0].width(), 200);
//! assert_eq!(rects[0].height(), 300);
//! ```

mod partition;
mod preset;

pub use partition::{boundaries, boundary, partition, partition_checked, GridSpec, Rect};
pub use preset::GridPreset;
