//! Errors reported when a canvas refuses construction or a call.

use thiserror::Error;

/// Precondition violations detected by [`Canvas`](crate::Canvas).
///
/// Degenerate but representable drawing input (empty paths, zero-length
/// dashes, gradients without stops) is never an error; it renders nothing
/// or falls back to a documented default instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("canvas dimensions must be non-zero, got {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("canvas dimensions {width}x{height} exceed the {max} pixel limit")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    #[error("stride {stride} is smaller than the minimum row length {min}")]
    StrideTooSmall { stride: usize, min: usize },

    #[error("pixel buffer holds {len} bytes but {required} are required")]
    BufferTooSmall { len: usize, required: usize },

    #[error("buffer size for the requested dimensions overflows usize")]
    SizeOverflow,

    #[error("transform contains a non-finite entry")]
    NonFiniteTransform,
}

pub type Result<T> = std::result::Result<T, CanvasError>;
