//! Affine transformation matrix.
//!
//! The six components map a point as
//!
//! ```text
//!   x' = sx·x + shx·y + tx
//!   y' = shy·x + sy·y + ty
//! ```
//!
//! which is the `(a, b, c, d, e, f)` column-major 2×3 form used by SVG:
//! `a = sx`, `b = shy`, `c = shx`, `d = sy`, `e = tx`, `f = ty`.

/// Threshold below which a determinant is treated as zero.
pub const AFFINE_EPSILON: f64 = 1e-14;

/// 2D affine transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub sx: f64,
    pub shy: f64,
    pub shx: f64,
    pub sy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineTransform {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Identity matrix.
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Matrix from the SVG `(a, b, c, d, e, f)` components.
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self {
            sx: a,
            shy: b,
            shx: c,
            sy: d,
            tx: e,
            ty: f,
        }
    }

    /// Rotation by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (sa, ca) = angle.sin_cos();
        Self::new(ca, sa, -sa, ca, 0.0, 0.0)
    }

    pub const fn scaling(x: f64, y: f64) -> Self {
        Self::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    pub const fn scaling_uniform(s: f64) -> Self {
        Self::scaling(s, s)
    }

    pub const fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// The `(a, b, c, d, e, f)` components.
    pub fn to_array(&self) -> [f64; 6] {
        [self.sx, self.shy, self.shx, self.sy, self.tx, self.ty]
    }

    // ====================================================================
    // Composition
    // ====================================================================

    /// Post-multiply: the result applies `self` first, then `m`.
    pub fn multiply(&mut self, m: &AffineTransform) -> &mut Self {
        let t0 = self.sx * m.sx + self.shy * m.shx;
        let t2 = self.shx * m.sx + self.sy * m.shx;
        let t4 = self.tx * m.sx + self.ty * m.shx + m.tx;
        self.shy = self.sx * m.shy + self.shy * m.sy;
        self.sy = self.shx * m.shy + self.sy * m.sy;
        self.ty = self.tx * m.shy + self.ty * m.sy + m.ty;
        self.sx = t0;
        self.shx = t2;
        self.tx = t4;
        self
    }

    /// Pre-multiply: the result applies `m` first, then `self`.
    pub fn premultiply(&mut self, m: &AffineTransform) -> &mut Self {
        let mut t = *m;
        t.multiply(self);
        *self = t;
        self
    }

    /// Invert in place. A singular matrix produces non-finite components;
    /// check [`is_invertible`](Self::is_invertible) first.
    pub fn invert(&mut self) -> &mut Self {
        let d = 1.0 / self.determinant();
        let t0 = self.sy * d;
        self.sy = self.sx * d;
        self.shy = -self.shy * d;
        self.shx = -self.shx * d;
        let t4 = -self.tx * t0 - self.ty * self.shx;
        self.ty = -self.tx * self.shy - self.ty * self.sy;
        self.sx = t0;
        self.tx = t4;
        self
    }

    /// Inverted copy, or `None` when the matrix is singular.
    pub fn inverted(&self) -> Option<AffineTransform> {
        if !self.is_invertible() {
            return None;
        }
        let mut m = *self;
        m.invert();
        m.is_finite().then_some(m)
    }

    // ====================================================================
    // Application
    // ====================================================================

    #[inline]
    pub fn transform(&self, x: &mut f64, y: &mut f64) {
        let tmp = *x;
        *x = tmp * self.sx + *y * self.shx + self.tx;
        *y = tmp * self.shy + *y * self.sy + self.ty;
    }

    /// Transform a point by value.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (mut x, mut y) = (x, y);
        self.transform(&mut x, &mut y);
        (x, y)
    }

    // ====================================================================
    // Queries
    // ====================================================================

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }

    pub fn is_invertible(&self) -> bool {
        let d = self.determinant();
        d.is_finite() && d.abs() > AFFINE_EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// Average scale factor, used to derive curve-flattening tolerance.
    pub fn scale(&self) -> f64 {
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let x = s * self.sx + s * self.shx;
        let y = s * self.shy + s * self.sy;
        (x * x + y * y).sqrt()
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}
