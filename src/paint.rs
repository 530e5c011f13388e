//! Paint, gradient and stroke descriptors accepted by the canvas.

use crate::basics::FillingRule;
use crate::color::Rgb;
use crate::trans_affine::AffineTransform;

// ============================================================================
// Fill rule and blend mode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl From<WindRule> for FillingRule {
    fn from(rule: WindRule) -> Self {
        match rule {
            WindRule::NonZero => FillingRule::NonZero,
            WindRule::EvenOdd => FillingRule::EvenOdd,
        }
    }
}

/// Compositing operator used by [`Canvas::blend`](crate::Canvas::blend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// `dst := src + dst · (1 - src.a)`
    #[default]
    SrcOver,
    /// `dst := dst · src.a`
    DstIn,
}

// ============================================================================
// Stroke description
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    /// Sharp corner; falls back to `Bevel` past the miter limit.
    #[default]
    Miter,
    Round,
    Bevel,
}

/// Stroke geometry parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeData {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash_offset: f64,
    pub dash: Vec<f64>,
}

impl StrokeData {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: LineJoin) -> Self {
        self.join = join;
        self
    }

    pub fn with_miter_limit(mut self, limit: f64) -> Self {
        self.miter_limit = limit;
        self
    }

    pub fn with_dash(mut self, dash: Vec<f64>, offset: f64) -> Self {
        self.dash = dash;
        self.dash_offset = offset;
        self
    }

    /// Total length of one pass over the dash array.
    pub fn dash_length(&self) -> f64 {
        self.dash.iter().sum()
    }

    /// A stroke is dashed iff the dash entries sum to a positive length.
    pub fn is_dashed(&self) -> bool {
        self.dash_length() > 0.0
    }
}

impl Default for StrokeData {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
            dash_offset: 0.0,
            dash: Vec::new(),
        }
    }
}

// ============================================================================
// Gradients
// ============================================================================

/// How parameters outside the stop range are mapped back into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpreadMethod {
    #[default]
    Pad,
    Repeat,
    Reflect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgb,
}

impl GradientStop {
    pub fn new(offset: f64, color: Rgb) -> Self {
        Self { offset, color }
    }
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientKind {
    Linear {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    /// Circle `(cx, cy, r)` with focal point `(fx, fy)`.
    Radial {
        cx: f64,
        cy: f64,
        r: f64,
        fx: f64,
        fy: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    pub matrix: AffineTransform,
    pub spread: SpreadMethod,
    pub stops: Vec<GradientStop>,
}

impl Gradient {
    pub fn linear(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::with_kind(GradientKind::Linear { x1, y1, x2, y2 })
    }

    /// Radial gradient with the focal point at the center.
    pub fn radial(cx: f64, cy: f64, r: f64) -> Self {
        Self::radial_focal(cx, cy, r, cx, cy)
    }

    pub fn radial_focal(cx: f64, cy: f64, r: f64, fx: f64, fy: f64) -> Self {
        Self::with_kind(GradientKind::Radial { cx, cy, r, fx, fy })
    }

    fn with_kind(kind: GradientKind) -> Self {
        Self {
            kind,
            matrix: AffineTransform::identity(),
            spread: SpreadMethod::Pad,
            stops: Vec::new(),
        }
    }

    pub fn with_spread(mut self, spread: SpreadMethod) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_matrix(mut self, matrix: AffineTransform) -> Self {
        self.matrix = matrix;
        self
    }

    pub fn with_stop(mut self, offset: f64, color: Rgb) -> Self {
        self.stops.push(GradientStop::new(offset, color));
        self
    }

    pub fn add_stop(&mut self, offset: f64, color: Rgb) {
        self.stops.push(GradientStop::new(offset, color));
    }
}

// ============================================================================
// Paint
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PaintKind {
    #[default]
    None,
    Color(Rgb),
    Gradient(Gradient),
}

/// Fill or stroke paint with a multiplicative opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    kind: PaintKind,
    opacity: f64,
}

impl Paint {
    pub fn none() -> Self {
        Self {
            kind: PaintKind::None,
            opacity: 1.0,
        }
    }

    pub fn color(color: Rgb) -> Self {
        Self {
            kind: PaintKind::Color(color),
            opacity: 1.0,
        }
    }

    pub fn gradient(gradient: Gradient) -> Self {
        Self {
            kind: PaintKind::Gradient(gradient),
            opacity: 1.0,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn kind(&self) -> &PaintKind {
        &self.kind
    }

    pub fn is_none(&self) -> bool {
        matches!(self.kind, PaintKind::None)
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn as_color(&self) -> Option<&Rgb> {
        match &self.kind {
            PaintKind::Color(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_gradient(&self) -> Option<&Gradient> {
        match &self.kind {
            PaintKind::Gradient(g) => Some(g),
            _ => None,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Rgb> for Paint {
    fn from(color: Rgb) -> Self {
        Paint::color(color)
    }
}

impl From<Gradient> for Paint {
    fn from(gradient: Gradient) -> Self {
        Paint::gradient(gradient)
    }
}
