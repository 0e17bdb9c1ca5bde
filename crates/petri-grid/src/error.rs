//! Error types for grid construction and coordinate lookups.

use std::fmt;

/// Errors from constructing a [`Torus`](crate::Torus) or resolving a
/// coordinate on one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a grid with a zero-length axis.
    EmptyGrid,
    /// An axis exceeds the maximum representable dimension.
    DimensionTooLarge {
        /// Which axis overflowed.
        axis: &'static str,
        /// The configured size.
        value: u32,
        /// The maximum allowed size.
        max: u32,
    },
    /// A coordinate lies outside the board.
    OutOfBounds {
        /// The x position.
        x: u32,
        /// The y position.
        y: u32,
        /// Board width.
        width: u32,
        /// Board height.
        height: u32,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell on each axis"),
            Self::DimensionTooLarge { axis, value, max } => {
                write!(f, "{axis} size {value} exceeds maximum of {max}")
            }
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(f, "({x}, {y}) not within board dimensions {width}x{height}")
            }
        }
    }
}

impl std::error::Error for GridError {}
