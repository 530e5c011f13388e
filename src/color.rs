//! Color types.
//!
//! Two 8-bit RGBA types live here:
//! - `Rgb`: straight (non-premultiplied) alpha, the interface color used
//!   by paints and gradient stops.
//! - `Rgba8`: pre-multiplied device color, the form every span generator
//!   produces and every pixel format blends.

use crate::basics::{uround, CoverType};

// ============================================================================
// Rgb: interface color
// ============================================================================

/// An 8-bit color with straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0, 255);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255, 255);
    pub const TRANSPARENT: Rgb = Rgb::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Scale alpha by `opacity`, rounding to nearest: `a' = round(a · opacity)`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let opacity = if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
        Self {
            a: uround(self.a as f64 * opacity) as u8,
            ..self
        }
    }

    /// Pre-multiplied device form of this color.
    pub fn premultiplied(self) -> Rgba8 {
        let mut c = Rgba8::new(self.r, self.g, self.b, self.a);
        c.premultiply();
        c
    }
}

// ============================================================================
// Rgba8: pre-multiplied device color
// ============================================================================

/// An 8-bit device color. Unless stated otherwise, values of this type
/// are pre-multiplied: `r, g, b <= a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_MASK: u32 = (1 << Self::BASE_SHIFT) - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Exact fixed-point `a · b / 255`, rounded.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    #[inline]
    pub fn mult_cover(a: u8, cover: CoverType) -> u8 {
        Self::multiply(a, cover)
    }

    /// `p + q - p·a`, where `q` is already pre-multiplied by `a`.
    #[inline]
    pub fn prelerp(p: u8, q: u8, a: u8) -> u8 {
        p.wrapping_add(q).wrapping_sub(Self::multiply(p, a))
    }

    /// Interpolate `p` toward `q` by `a / 255`.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }

    /// Scale every channel (alpha included) by `cover / 255`.
    #[inline]
    pub fn scaled(&self, cover: CoverType) -> Rgba8 {
        Rgba8 {
            r: Self::mult_cover(self.r, cover),
            g: Self::mult_cover(self.g, cover),
            b: Self::mult_cover(self.b, cover),
            a: Self::mult_cover(self.a, cover),
        }
    }

    pub fn premultiply(&mut self) -> &mut Self {
        if self.a != Self::BASE_MASK as u8 {
            if self.a == 0 {
                self.r = 0;
                self.g = 0;
                self.b = 0;
            } else {
                self.r = Self::multiply(self.r, self.a);
                self.g = Self::multiply(self.g, self.a);
                self.b = Self::multiply(self.b, self.a);
            }
        }
        self
    }

    /// Straight-alpha form: `c · 255 / a` with integer division.
    /// A zero alpha yields transparent black.
    pub fn demultiply(&mut self) -> &mut Self {
        if self.a == 0 {
            *self = Self::transparent();
        } else if (self.a as u32) < Self::BASE_MASK {
            let a = self.a as u32;
            self.r = (self.r as u32 * Self::BASE_MASK / a).min(Self::BASE_MASK) as u8;
            self.g = (self.g as u32 * Self::BASE_MASK / a).min(Self::BASE_MASK) as u8;
            self.b = (self.b as u32 * Self::BASE_MASK / a).min(Self::BASE_MASK) as u8;
        }
        self
    }
}

impl From<Rgb> for Rgba8 {
    /// Pre-multiplies `c`.
    fn from(c: Rgb) -> Self {
        c.premultiplied()
    }
}
