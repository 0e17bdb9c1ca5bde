//! Toroidal (wrap-around) grid arithmetic.

use crate::direction::Direction;
use crate::error::GridError;
use crate::id::CellIdx;
use smallvec::SmallVec;

/// A two-dimensional grid whose edges wrap: the rightmost column's east
/// neighbor is the leftmost column, and likewise on the vertical axis.
///
/// Every cell therefore has exactly eight neighbors — there is no edge
/// special-casing anywhere. A `Torus` is pure arithmetic; it holds no cell
/// state. Cells are addressed either by `(x, y)` coordinate or by their
/// flat row-major [`CellIdx`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Torus {
    width: u32,
    height: u32,
}

impl Torus {
    /// Maximum size of either axis: coordinates use `i32` internally for
    /// wrap arithmetic, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a torus with `width * height` cells.
    ///
    /// Returns [`GridError::EmptyGrid`] if either axis is 0,
    /// [`GridError::DimensionTooLarge`] if an axis exceeds
    /// [`MAX_DIM`](Self::MAX_DIM) or the total cell count does not fit in
    /// a `u32` (the arena index type).
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid);
        }
        if width > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                axis: "width",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        if height > Self::MAX_DIM {
            return Err(GridError::DimensionTooLarge {
                axis: "height",
                value: height,
                max: Self::MAX_DIM,
            });
        }
        if (width as u64) * (height as u64) > u32::MAX as u64 {
            return Err(GridError::DimensionTooLarge {
                axis: "width * height",
                value: width,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self { width, height })
    }

    /// Board width in cells.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height in cells.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Flat row-major index of `(x, y)`.
    ///
    /// Returns [`GridError::OutOfBounds`] for coordinates off the board —
    /// bounds are checked, not wrapped, because callers passing explicit
    /// coordinates (editors, pattern loaders) want their mistakes surfaced.
    pub fn index(&self, x: u32, y: u32) -> Result<CellIdx, GridError> {
        if x >= self.width || y >= self.height {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(CellIdx(y * self.width + x))
    }

    /// Coordinate `(x, y)` of a flat index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `idx` is outside the board.
    #[inline]
    pub fn coord(&self, idx: CellIdx) -> (u32, u32) {
        debug_assert!(idx.index() < self.cell_count());
        (idx.0 % self.width, idx.0 / self.width)
    }

    /// Wrap a signed axis value into `0..len`.
    #[inline]
    fn wrap_axis(val: i32, len: u32) -> u32 {
        val.rem_euclid(len as i32) as u32
    }

    /// The wrapped coordinate of the neighbor of `(x, y)` in `direction`.
    ///
    /// Wraps with modulo arithmetic on both axes; never fails for
    /// in-bounds inputs.
    #[inline]
    pub fn neighbor(&self, x: u32, y: u32, direction: Direction) -> (u32, u32) {
        let (dx, dy) = direction.offset();
        (
            Self::wrap_axis(x as i32 + dx, self.width),
            Self::wrap_axis(y as i32 + dy, self.height),
        )
    }

    /// All eight neighbor coordinates of `(x, y)`, in [`Direction::ALL`]
    /// order.
    pub fn neighbours(&self, x: u32, y: u32) -> SmallVec<[(u32, u32); 8]> {
        Direction::ALL
            .iter()
            .map(|&d| self.neighbor(x, y, d))
            .collect()
    }

    /// The cell itself plus its eight neighbors, as flat indices.
    ///
    /// Used when an edit re-seeds a neighborhood for re-evaluation. On
    /// tiny boards the wrapped neighbors can repeat; callers that need a
    /// set deduplicate.
    pub fn neighborhood(&self, x: u32, y: u32) -> SmallVec<[CellIdx; 9]> {
        let mut cells = SmallVec::new();
        cells.push(CellIdx(y * self.width + x));
        for (nx, ny) in self.neighbours(x, y) {
            cells.push(CellIdx(ny * self.width + nx));
        }
        cells
    }
}
