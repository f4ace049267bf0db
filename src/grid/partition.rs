//! Grid shape, cell rectangles and the partition algorithm.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::SplitError;

// =============================================================================
// Grid Spec
// =============================================================================

/// A validated grid shape with at least one row and one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridSpec {
    rows: u32,
    cols: u32,
}

impl GridSpec {
    /// Create a grid shape, rejecting a zero row or column count.
    pub fn new(rows: u32, cols: u32) -> Result<Self, SplitError> {
        if rows == 0 || cols == 0 {
            return Err(SplitError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Caller guarantees both counts are non-zero.
    pub(crate) const fn new_unchecked(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl fmt::Display for GridSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Parses `"{rows}x{cols}"`, e.g. `"2x5"` or `"3X3"`.
impl FromStr for GridSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (rows, cols) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("invalid grid '{}': expected ROWSxCOLS, e.g. 2x5", s))?;

        let rows: u32 = rows
            .trim()
            .parse()
            .map_err(|_| format!("invalid row count in grid '{}'", s))?;
        let cols: u32 = cols
            .trim()
            .parse()
            .map_err(|_| format!("invalid column count in grid '{}'", s))?;

        GridSpec::new(rows, cols).map_err(|e| e.to_string())
    }
}

// =============================================================================
// Rect
// =============================================================================

/// A half-open pixel rectangle `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Rect {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Whether the rectangle covers no pixels.
    ///
    /// Only happens when a grid has more cells than pixels along an axis.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Number of pixels covered.
    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether pixel `(x, y)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Whether two rectangles share at least one pixel.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }
}

// =============================================================================
// Partition
// =============================================================================

/// Position of boundary `k` when `extent` pixels are split into `cells`.
///
/// Computes `round(k * extent / cells)` with ties rounded to the even
/// integer, using exact integer arithmetic. `boundary(0, ..) == 0` and
/// `boundary(cells, cells, extent) == extent`.
#[inline]
pub fn boundary(k: u32, cells: u32, extent: u32) -> u32 {
    debug_assert!(cells > 0);
    debug_assert!(k <= cells);

    let scaled = k as u64 * extent as u64;
    let cells = cells as u64;
    let quotient = scaled / cells;
    let twice_remainder = 2 * (scaled % cells);

    let rounded = if twice_remainder > cells || (twice_remainder == cells && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    };
    rounded as u32
}

/// All `cells + 1` boundaries along one axis, from `0` to `extent`.
pub fn boundaries(cells: u32, extent: u32) -> Vec<u32> {
    (0..=cells).map(|k| boundary(k, cells, extent)).collect()
}

/// Split a `width x height` image into the cells of `grid`.
///
/// Returns `rows * cols` rectangles in row-major order: the rectangle for
/// row `r`, column `c` is at index `r * cols + c`.
pub fn partition(width: u32, height: u32, grid: GridSpec) -> Vec<Rect> {
    let xs = boundaries(grid.cols(), width);
    let ys = boundaries(grid.rows(), height);

    let mut rects = Vec::with_capacity(grid.cell_count());
    for row in ys.windows(2) {
        for col in xs.windows(2) {
            rects.push(Rect {
                left: col[0],
                top: row[0],
                right: col[1],
                bottom: row[1],
            });
        }
    }
    rects
}

/// Like [`partition`], but validates raw row and column counts first.
pub fn partition_checked(
    width: u32,
    height: u32,
    rows: u32,
    cols: u32,
) -> Result<Vec<Rect>, SplitError> {
    let grid = GridSpec::new(rows, cols)?;
    Ok(partition(width, height, grid))
}

// =============================================================================
// Tests
// =============================================================================
