//! Gradient span generation.
//!
//! A gradient is evaluated in a canonical domain where the parameter runs
//! from 0 to [`GRADIENT_SCALE`]. Each span is mapped back into that domain
//! through the inverse of the placement matrix, interpolated linearly in
//! fixed point, fed through the shape function and the spread method, and
//! looked up in a 256-entry pre-multiplied color table.

use log::warn;

use crate::basics::iround;
use crate::color::{Rgb, Rgba8};
use crate::paint::{Gradient, GradientKind, GradientStop, SpreadMethod};
use crate::renderer::SpanGenerator;
use crate::trans_affine::AffineTransform;

// ============================================================================
// Constants
// ============================================================================

/// Length of the canonical gradient domain.
pub const GRADIENT_SCALE: i32 = 100;
/// Entries in a gradient color table.
pub const GRADIENT_LUT_SIZE: usize = 256;

pub const GRADIENT_SUBPIXEL_SHIFT: i32 = 4;
pub const GRADIENT_SUBPIXEL_SCALE: i32 = 1 << GRADIENT_SUBPIXEL_SHIFT;

/// Fixed-point precision of the span interpolator.
const INTERPOLATOR_SHIFT: i32 = 8;
const INTERPOLATOR_SCALE: f64 = (1 << INTERPOLATOR_SHIFT) as f64;
const DOWNSCALE_SHIFT: i32 = INTERPOLATOR_SHIFT - GRADIENT_SUBPIXEL_SHIFT;

/// Interpolated coordinates are limited to this many gradient units so the
/// fixed-point deltas stay inside `i32`.
const COORD_LIMIT: f64 = 1.0e6;

// ============================================================================
// Color table
// ============================================================================

/// Pre-multiplied color table built from gradient stops.
pub struct GradientLut {
    colors: Vec<Rgba8>,
    valid: bool,
}

impl GradientLut {
    pub fn new() -> Self {
        Self {
            colors: vec![Rgba8::transparent(); GRADIENT_LUT_SIZE],
            valid: false,
        }
    }

    /// Rebuild from `stops`, multiplying every stop alpha by `opacity`.
    ///
    /// Offsets are clamped to `[0, 1]` and forced non-decreasing. Entry `i`
    /// samples `t = i / 255`; the first and last entries are exactly the
    /// first and last stop colors. Returns `false` (and leaves the table
    /// transparent) with fewer than two stops.
    pub fn build(&mut self, stops: &[GradientStop], opacity: f64) -> bool {
        self.valid = stops.len() >= 2;
        if !self.valid {
            self.colors.fill(Rgba8::transparent());
            return false;
        }

        let mut profile: Vec<(f64, Rgb)> = Vec::with_capacity(stops.len());
        let mut prev = 0.0;
        for stop in stops {
            let offset = if stop.offset.is_nan() {
                prev
            } else {
                stop.offset.clamp(0.0, 1.0).max(prev)
            };
            prev = offset;
            profile.push((offset, stop.color.with_opacity(opacity)));
        }

        let last = profile.len() - 1;
        let mut seg = 0;
        for (i, entry) in self.colors.iter_mut().enumerate() {
            let color = if i == 0 {
                profile[0].1
            } else if i == GRADIENT_LUT_SIZE - 1 {
                profile[last].1
            } else {
                let t = i as f64 / (GRADIENT_LUT_SIZE - 1) as f64;
                while seg + 1 < last && t > profile[seg + 1].0 {
                    seg += 1;
                }
                let (o1, c1) = profile[seg];
                let (o2, c2) = profile[seg + 1];
                if t <= o1 {
                    c1
                } else if t >= o2 {
                    c2
                } else {
                    lerp_rgb(c1, c2, (t - o1) / (o2 - o1))
                }
            };
            *entry = color.premultiplied();
        }
        true
    }

    /// `true` after a successful [`build`](Self::build).
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn color(&self, index: usize) -> Rgba8 {
        self.colors[index]
    }

    /// Color at parameter 1.
    pub fn last(&self) -> Rgba8 {
        self.colors[GRADIENT_LUT_SIZE - 1]
    }

    pub fn colors(&self) -> &[Rgba8] {
        &self.colors
    }
}

impl Default for GradientLut {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp_rgb(c1: Rgb, c2: Rgb, k: f64) -> Rgb {
    let mix = |a: u8, b: u8| iround(a as f64 + (b as f64 - a as f64) * k).clamp(0, 255) as u8;
    Rgb::new(
        mix(c1.r, c2.r),
        mix(c1.g, c2.g),
        mix(c1.b, c2.b),
        mix(c1.a, c2.a),
    )
}

// ============================================================================
// Spread
// ============================================================================

/// Map a shape parameter `v` into `[0, d]`.
#[inline]
pub fn spread(v: i32, d: i32, method: SpreadMethod) -> i32 {
    match method {
        SpreadMethod::Pad => v.clamp(0, d),
        SpreadMethod::Repeat => v.rem_euclid(d),
        SpreadMethod::Reflect => {
            let d2 = d << 1;
            let m = v.rem_euclid(d2);
            if m < d {
                m
            } else {
                d2 - m
            }
        }
    }
}

// ============================================================================
// Radial gradient with focal point
// ============================================================================

/// Radial shape function with an off-center focal point, in gradient
/// subpixel units. The parameter is zero at the focus and equals the
/// radius on the circle.
#[derive(Debug, Clone, Copy)]
pub struct GradientRadialFocus {
    r: i32,
    fx: i32,
    fy: i32,
    r2: f64,
    fx2: f64,
    fy2: f64,
    mul: f64,
}

impl GradientRadialFocus {
    /// Circle of radius `r` around the origin with focus `(fx, fy)`.
    /// A focus outside the circle is moved onto it.
    pub fn new(r: f64, fx: f64, fy: f64) -> Self {
        let (mut fx, mut fy) = (fx, fy);
        let len = (fx * fx + fy * fy).sqrt();
        if len > r {
            fx *= r / len;
            fy *= r / len;
        }
        let scale = GRADIENT_SUBPIXEL_SCALE as f64;
        let mut g = Self {
            r: iround(r * scale),
            fx: iround(fx * scale),
            fy: iround(fy * scale),
            r2: 0.0,
            fx2: 0.0,
            fy2: 0.0,
            mul: 0.0,
        };
        g.update_values();
        g
    }

    pub fn radius(&self) -> f64 {
        self.r as f64 / GRADIENT_SUBPIXEL_SCALE as f64
    }

    pub fn focus_x(&self) -> f64 {
        self.fx as f64 / GRADIENT_SUBPIXEL_SCALE as f64
    }

    pub fn focus_y(&self) -> f64 {
        self.fy as f64 / GRADIENT_SUBPIXEL_SCALE as f64
    }

    fn update_values(&mut self) {
        // A focus on the circle makes the divisor zero; step it toward the
        // center one subpixel at a time until it is strictly inside.
        self.r2 = self.r as f64 * self.r as f64;
        loop {
            self.fx2 = self.fx as f64 * self.fx as f64;
            self.fy2 = self.fy as f64 * self.fy as f64;
            let d = self.r2 - (self.fx2 + self.fy2);
            if d > 0.0 || (self.fx == 0 && self.fy == 0) {
                self.mul = if d > 0.0 { self.r as f64 / d } else { 0.0 };
                return;
            }
            self.fx -= self.fx.signum();
            self.fy -= self.fy.signum();
        }
    }

    #[inline]
    pub fn calculate(&self, x: i32, y: i32) -> i32 {
        let dx = x as f64 - self.fx as f64;
        let dy = y as f64 - self.fy as f64;
        let d2 = dx * self.fy as f64 - dy * self.fx as f64;
        let d3 = self.r2 * (dx * dx + dy * dy) - d2 * d2;
        iround((dx * self.fx as f64 + dy * self.fy as f64 + d3.abs().sqrt()) * self.mul)
    }
}

// ============================================================================
// Span interpolation
// ============================================================================

/// Integer DDA stepping from `y1` to `y2` in `count` equal steps.
#[derive(Debug, Clone, Copy)]
struct Dda2LineInterpolator {
    cnt: i32,
    lft: i32,
    rem: i32,
    mod_val: i32,
    y: i32,
}

impl Dda2LineInterpolator {
    fn new(y1: i32, y2: i32, count: i32) -> Self {
        let cnt = count.max(1);
        let mut lft = (y2 - y1) / cnt;
        let mut rem = (y2 - y1) % cnt;
        let mut mod_val = rem;
        if mod_val <= 0 {
            mod_val += cnt;
            rem += cnt;
            lft -= 1;
        }
        mod_val -= cnt;
        Self {
            cnt,
            lft,
            rem,
            mod_val,
            y: y1,
        }
    }

    #[inline]
    fn inc(&mut self) {
        self.mod_val += self.rem;
        self.y += self.lft;
        if self.mod_val > 0 {
            self.mod_val -= self.cnt;
            self.y += 1;
        }
    }
}

/// Transforms the two ends of a span and interpolates linearly between
/// them, in 1/256 units.
#[derive(Debug, Clone, Copy)]
pub struct SpanInterpolatorLinear {
    trans: AffineTransform,
    li_x: Dda2LineInterpolator,
    li_y: Dda2LineInterpolator,
}

impl SpanInterpolatorLinear {
    pub fn new(trans: AffineTransform) -> Self {
        Self {
            trans,
            li_x: Dda2LineInterpolator::new(0, 0, 1),
            li_y: Dda2LineInterpolator::new(0, 0, 1),
        }
    }

    pub fn begin(&mut self, x: f64, y: f64, len: u32) {
        let (x1, y1) = self.fixed(x, y);
        let (x2, y2) = self.fixed(x + len as f64, y);
        self.li_x = Dda2LineInterpolator::new(x1, x2, len as i32);
        self.li_y = Dda2LineInterpolator::new(y1, y2, len as i32);
    }

    fn fixed(&self, x: f64, y: f64) -> (i32, i32) {
        let (tx, ty) = self.trans.apply(x, y);
        let clamp = |v: f64| iround(v.clamp(-COORD_LIMIT, COORD_LIMIT) * INTERPOLATOR_SCALE);
        (clamp(tx), clamp(ty))
    }

    #[inline]
    pub fn next(&mut self) {
        self.li_x.inc();
        self.li_y.inc();
    }

    #[inline]
    pub fn coordinates(&self) -> (i32, i32) {
        (self.li_x.y, self.li_y.y)
    }
}

// ============================================================================
// SpanGradient
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Distance along +x.
    Linear,
    RadialFocus(GradientRadialFocus),
}

impl Shape {
    #[inline]
    fn calculate(&self, x: i32, y: i32) -> i32 {
        match self {
            Shape::Linear => x,
            Shape::RadialFocus(g) => g.calculate(x, y),
        }
    }
}

/// Matrix taking the canonical gradient domain to device space: domain
/// scaling, then the kind's placement, then `gradient.matrix`, then `mtx`.
pub fn gradient_matrix(gradient: &Gradient, mtx: &AffineTransform) -> AffineTransform {
    let mut m = AffineTransform::identity();
    match gradient.kind {
        GradientKind::Linear { x1, y1, x2, y2 } => {
            let (dx, dy) = (x2 - x1, y2 - y1);
            let len = (dx * dx + dy * dy).sqrt();
            m.multiply(&AffineTransform::scaling(len, len));
            m.multiply(&AffineTransform::rotation(dy.atan2(dx)));
            m.multiply(&AffineTransform::translation(x1, y1));
        }
        GradientKind::Radial { cx, cy, r, .. } => {
            m.multiply(&AffineTransform::scaling(r, r));
            m.multiply(&AffineTransform::translation(cx, cy));
        }
    }
    m.premultiply(&AffineTransform::scaling_uniform(1.0 / GRADIENT_SCALE as f64));
    m.multiply(&gradient.matrix);
    m.multiply(mtx);
    m
}

/// Gradient span generator sampling a [`GradientLut`].
pub struct SpanGradient<'l> {
    interpolator: SpanInterpolatorLinear,
    shape: Shape,
    spread: SpreadMethod,
    lut: &'l GradientLut,
}

impl<'l> SpanGradient<'l> {
    /// Generator for `gradient` drawn under the device transform `mtx`.
    ///
    /// Returns `None` when the geometry is degenerate (zero-length vector,
    /// non-positive radius) or the placement cannot be inverted.
    pub fn new(gradient: &Gradient, mtx: &AffineTransform, lut: &'l GradientLut) -> Option<Self> {
        let shape = match gradient.kind {
            GradientKind::Linear { .. } => Shape::Linear,
            GradientKind::Radial { cx, cy, r, fx, fy } => {
                if !(r > 0.0 && r.is_finite()) {
                    warn!("radial gradient radius {r} is not positive");
                    return None;
                }
                let d = GRADIENT_SCALE as f64;
                Shape::RadialFocus(GradientRadialFocus::new(
                    d,
                    d * (fx - cx) / r,
                    d * (fy - cy) / r,
                ))
            }
        };
        let Some(inverse) = gradient_matrix(gradient, mtx).inverted() else {
            warn!("gradient placement matrix is not invertible");
            return None;
        };
        Some(Self {
            interpolator: SpanInterpolatorLinear::new(inverse),
            shape,
            spread: gradient.spread,
            lut,
        })
    }

    pub fn spread(&self) -> SpreadMethod {
        self.spread
    }
}

impl SpanGenerator for SpanGradient<'_> {
    fn generate(&mut self, span: &mut [Rgba8], x: i32, y: i32) {
        let dd = GRADIENT_SCALE * GRADIENT_SUBPIXEL_SCALE;
        let size = GRADIENT_LUT_SIZE as i32;
        self.interpolator
            .begin(x as f64 + 0.5, y as f64 + 0.5, span.len() as u32);
        for pixel in span.iter_mut() {
            let (ix, iy) = self.interpolator.coordinates();
            let v = self
                .shape
                .calculate(ix >> DOWNSCALE_SHIFT, iy >> DOWNSCALE_SHIFT);
            let d = spread(v, dd, self.spread);
            let index = (d * size / dd).clamp(0, size - 1);
            *pixel = self.lut.color(index as usize);
            self.interpolator.next();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_to_white() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, Rgb::BLACK),
            GradientStop::new(1.0, Rgb::WHITE),
        ]
    }

    fn lut_of(stops: &[GradientStop]) -> GradientLut {
        let mut lut = GradientLut::new();
        assert!(lut.build(stops, 1.0));
        lut
    }

    fn row(gen: &mut SpanGradient<'_>, x: i32, y: i32, len: usize) -> Vec<Rgba8> {
        let mut span = vec![Rgba8::transparent(); len];
        gen.generate(&mut span, x, y);
        span
    }

    #[test]
    fn test_constants() {
        assert_eq!(GRADIENT_SCALE, 100);
        assert_eq!(GRADIENT_LUT_SIZE, 256);
        assert_eq!(GRADIENT_SUBPIXEL_SCALE, 16);
    }

    #[test]
    fn test_spread_methods() {
        assert_eq!(spread(-5, 100, SpreadMethod::Pad), 0);
        assert_eq!(spread(150, 100, SpreadMethod::Pad), 100);
        assert_eq!(spread(150, 100, SpreadMethod::Repeat), 50);
        assert_eq!(spread(-30, 100, SpreadMethod::Repeat), 70);
        assert_eq!(spread(150, 100, SpreadMethod::Reflect), 50);
        assert_eq!(spread(250, 100, SpreadMethod::Reflect), 50);
        assert_eq!(spread(-30, 100, SpreadMethod::Reflect), 30);
    }

    #[test]
    fn test_reflect_is_symmetric() {
        let d = 1600;
        for v in -5000..5000 {
            assert_eq!(
                spread(v, d, SpreadMethod::Reflect),
                spread(2 * d - v, d, SpreadMethod::Reflect),
                "v={v}"
            );
        }
    }

    #[test]
    fn test_lut_endpoints_and_midpoint() {
        let lut = lut_of(&black_to_white());
        assert_eq!(lut.color(0), Rgba8::new(0, 0, 0, 255));
        assert_eq!(lut.last(), Rgba8::new(255, 255, 255, 255));
        assert_eq!(lut.color(128).r, 128);
        assert!(lut.colors().windows(2).all(|w| w[0].r <= w[1].r));
    }

    #[test]
    fn test_lut_needs_two_stops() {
        let mut lut = GradientLut::new();
        assert!(!lut.build(&[GradientStop::new(0.5, Rgb::WHITE)], 1.0));
        assert!(!lut.is_valid());
        assert!(lut.colors().iter().all(|c| *c == Rgba8::transparent()));
    }

    #[test]
    fn test_lut_applies_opacity_premultiplied() {
        let mut lut = GradientLut::new();
        lut.build(
            &[
                GradientStop::new(0.0, Rgb::WHITE),
                GradientStop::new(1.0, Rgb::WHITE),
            ],
            0.5,
        );
        for c in lut.colors() {
            assert_eq!(*c, Rgba8::new(128, 128, 128, 128));
        }
    }

    #[test]
    fn test_lut_hard_stop() {
        let red = Rgb::opaque(255, 0, 0);
        let blue = Rgb::opaque(0, 0, 255);
        let lut = lut_of(&[
            GradientStop::new(0.0, red),
            GradientStop::new(0.5, red),
            GradientStop::new(0.5, blue),
            GradientStop::new(1.0, blue),
        ]);
        assert_eq!(lut.color(127), Rgba8::new(255, 0, 0, 255));
        assert_eq!(lut.color(128), Rgba8::new(0, 0, 255, 255));
    }

    #[test]
    fn test_lut_clamps_and_orders_offsets() {
        let lut = lut_of(&[
            GradientStop::new(-0.5, Rgb::BLACK),
            GradientStop::new(0.6, Rgb::opaque(255, 0, 0)),
            GradientStop::new(0.3, Rgb::WHITE),
            GradientStop::new(2.0, Rgb::WHITE),
        ]);
        assert_eq!(lut.color(0), Rgba8::new(0, 0, 0, 255));
        // The 0.3 stop is pulled up to 0.6 and becomes a hard edge.
        assert_eq!(lut.color(160), Rgba8::new(255, 255, 255, 255));
        assert!(lut.color(150).g < 10);
    }

    #[test]
    fn test_lut_pads_before_first_stop() {
        let lut = lut_of(&[
            GradientStop::new(0.5, Rgb::BLACK),
            GradientStop::new(1.0, Rgb::WHITE),
        ]);
        assert_eq!(lut.color(100), Rgba8::new(0, 0, 0, 255));
        assert!(lut.color(200).r > 100);
    }

    #[test]
    fn test_radial_focus_centered() {
        let g = GradientRadialFocus::new(100.0, 0.0, 0.0);
        assert_eq!(g.calculate(0, 0), 0);
        let d = g.calculate(1600, 0);
        assert!((d - 1600).abs() <= 2, "d={d}");
        let d = g.calculate(0, -800);
        assert!((d - 800).abs() <= 2, "d={d}");
    }

    #[test]
    fn test_radial_focus_outside_moves_inside() {
        let g = GradientRadialFocus::new(100.0, 300.0, 0.0);
        assert!(g.focus_x() < 100.0 && g.focus_x() > 99.8, "fx={}", g.focus_x());
        assert_eq!(g.focus_y(), 0.0);
        assert_eq!(g.radius(), 100.0);
        // The parameter stays finite near the focus.
        assert!(g.calculate(1590, 0).abs() < 1600);
    }

    #[test]
    fn test_radial_focus_offset_is_zero_at_focus() {
        let g = GradientRadialFocus::new(100.0, 50.0, 0.0);
        assert_eq!(g.calculate(800, 0), 0);
        // Every point on the circle maps to the radius.
        for (x, y) in [(1600, 0), (-1600, 0), (0, 1600), (0, -1600)] {
            let d = g.calculate(x, y);
            assert!((d - 1600).abs() <= 2, "({x},{y}) -> {d}");
        }
    }

    #[test]
    fn test_interpolator_identity() {
        let mut it = SpanInterpolatorLinear::new(AffineTransform::identity());
        it.begin(0.5, 2.5, 4);
        assert_eq!(it.coordinates(), (128, 640));
        it.next();
        assert_eq!(it.coordinates(), (384, 640));
    }

    #[test]
    fn test_linear_span_ramps() {
        let gradient = Gradient::linear(0.0, 0.0, 100.0, 0.0);
        let lut = lut_of(&black_to_white());
        let mut gen = SpanGradient::new(&gradient, &AffineTransform::identity(), &lut).unwrap();
        let span = row(&mut gen, 0, 0, 100);
        assert!(span[0].r <= 2, "r={}", span[0].r);
        assert!(span[99].r >= 253, "r={}", span[99].r);
        assert!(span.windows(2).all(|w| w[0].r <= w[1].r));
    }

    #[test]
    fn test_linear_pad_outside() {
        let gradient = Gradient::linear(0.0, 0.0, 100.0, 0.0);
        let lut = lut_of(&black_to_white());
        let mut gen = SpanGradient::new(&gradient, &AffineTransform::identity(), &lut).unwrap();
        assert!(row(&mut gen, -20, 0, 10).iter().all(|c| c.r == 0));
        assert!(row(&mut gen, 150, 0, 10).iter().all(|c| c.r == 255));
    }

    #[test]
    fn test_linear_follows_device_transform() {
        let gradient = Gradient::linear(0.0, 0.0, 50.0, 0.0);
        let lut = lut_of(&black_to_white());
        let mtx = AffineTransform::scaling(2.0, 2.0);
        let mut gen = SpanGradient::new(&gradient, &mtx, &lut).unwrap();
        let span = row(&mut gen, 0, 0, 100);
        assert!(span[49].r >= 120 && span[49].r <= 135, "r={}", span[49].r);
        assert!(span[99].r >= 253);
    }

    #[test]
    fn test_linear_reflect_mirrors() {
        let gradient = Gradient::linear(0.0, 0.0, 50.0, 0.0).with_spread(SpreadMethod::Reflect);
        let lut = lut_of(&black_to_white());
        let mut gen = SpanGradient::new(&gradient, &AffineTransform::identity(), &lut).unwrap();
        let span = row(&mut gen, 0, 0, 100);
        for i in 0..50 {
            let (a, b) = (span[i].r as i32, span[99 - i].r as i32);
            assert!((a - b).abs() <= 6, "i={i}: {a} vs {b}");
        }
    }

    #[test]
    fn test_linear_repeat_wraps() {
        let gradient = Gradient::linear(0.0, 0.0, 50.0, 0.0).with_spread(SpreadMethod::Repeat);
        let lut = lut_of(&black_to_white());
        let mut gen = SpanGradient::new(&gradient, &AffineTransform::identity(), &lut).unwrap();
        let span = row(&mut gen, 0, 0, 100);
        assert!(span[49].r > 240);
        assert!(span[50].r < 10);
    }

    #[test]
    fn test_radial_span_center_to_edge() {
        let gradient = Gradient::radial(50.0, 50.0, 50.0);
        let lut = lut_of(&black_to_white());
        let mut gen = SpanGradient::new(&gradient, &AffineTransform::identity(), &lut).unwrap();
        let span = row(&mut gen, 0, 50, 100);
        assert!(span[50].r <= 5, "center r={}", span[50].r);
        assert!(span[0].r >= 245, "edge r={}", span[0].r);
        assert!(span[99].r >= 245, "edge r={}", span[99].r);
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let lut = lut_of(&black_to_white());
        let id = AffineTransform::identity();
        assert!(SpanGradient::new(&Gradient::linear(5.0, 5.0, 5.0, 5.0), &id, &lut).is_none());
        assert!(SpanGradient::new(&Gradient::radial(5.0, 5.0, 0.0), &id, &lut).is_none());
        assert!(SpanGradient::new(&Gradient::radial(5.0, 5.0, -1.0), &id, &lut).is_none());
        let flat = AffineTransform::scaling(1.0, 0.0);
        assert!(SpanGradient::new(&Gradient::radial(5.0, 5.0, 3.0), &flat, &lut).is_none());
    }

    #[test]
    fn test_placement_maps_domain_to_vector() {
        let gradient = Gradient::linear(10.0, 20.0, 10.0, 70.0);
        let m = gradient_matrix(&gradient, &AffineTransform::identity());
        let (x, y) = m.apply(0.0, 0.0);
        assert!((x - 10.0).abs() < 1e-9 && (y - 20.0).abs() < 1e-9);
        let (x, y) = m.apply(GRADIENT_SCALE as f64, 0.0);
        assert!((x - 10.0).abs() < 1e-9 && (y - 70.0).abs() < 1e-9);
    }
}
