//! Foundation types and constants shared by every pipeline stage.
//!
//! Rounding helpers, coverage and subpixel constants, the filling rule
//! used by the rasterizer and the integer rectangle used for clipping.

// ============================================================================
// Rounding
// ============================================================================

/// Round to the nearest integer, halves away from zero.
///
/// Out-of-range values saturate at `i32::MIN`/`i32::MAX`.
#[inline]
pub fn iround(v: f64) -> i32 {
    if v < 0.0 {
        (v - 0.5) as i32
    } else {
        (v + 0.5) as i32
    }
}

/// Round a non-negative value to the nearest unsigned integer.
#[inline]
pub fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

/// Floor toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    let i = v as i32;
    i - (i as f64 > v) as i32
}

// ============================================================================
// Coverage
// ============================================================================

/// Anti-aliasing coverage of one pixel, 0 (none) to 255 (full).
pub type CoverType = u8;

const COVER_SHIFT: u32 = 8;
pub const COVER_SIZE: u32 = 1 << COVER_SHIFT;
pub const COVER_MASK: u32 = COVER_SIZE - 1;
pub const COVER_NONE: CoverType = 0;
pub const COVER_FULL: CoverType = COVER_MASK as CoverType;

/// Convert an opacity in `[0, 1]` to a cover value. NaN maps to zero.
#[inline]
pub fn opacity_to_cover(opacity: f64) -> CoverType {
    if opacity.is_nan() {
        return COVER_NONE;
    }
    uround(opacity.clamp(0.0, 1.0) * COVER_MASK as f64) as CoverType
}

// ============================================================================
// Subpixel accuracy
// ============================================================================

/// Fractional bits of rasterizer coordinates (24.8 fixed point).
pub const POLY_SUBPIXEL_SHIFT: u32 = 8;
pub const POLY_SUBPIXEL_SCALE: u32 = 1 << POLY_SUBPIXEL_SHIFT;
pub const POLY_SUBPIXEL_MASK: u32 = POLY_SUBPIXEL_SCALE - 1;

// ============================================================================
// Filling rule
// ============================================================================

/// Rule deciding which accumulated winding values count as "inside".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillingRule {
    #[default]
    NonZero,
    EvenOdd,
}

// ============================================================================
// Points
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Integer rectangle
// ============================================================================

/// Integer rectangle with inclusive or exclusive bounds depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Swap coordinates so that `x1 <= x2` and `y1 <= y2`.
    pub fn normalize(&mut self) -> &Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Intersect with `r`. Returns `false` when the result is empty.
    pub fn clip(&mut self, r: &Self) -> bool {
        self.x1 = self.x1.max(r.x1);
        self.y1 = self.y1.max(r.y1);
        self.x2 = self.x2.min(r.x2);
        self.y2 = self.y2.min(r.y2);
        self.is_valid()
    }

    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    pub fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}
