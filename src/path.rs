//! Vector path container.
//!
//! A `Path` is an ordered list of segments. It is read-only input to
//! [`Canvas::draw`](crate::Canvas::draw); the flattening stage turns it
//! into a polyline.

/// One path segment with its coordinate payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    /// Quadratic Bézier with control point `(cx, cy)`.
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    /// Cubic Bézier with control points `(c1x, c1y)` and `(c2x, c2y)`.
    CubicTo {
        c1x: f64,
        c1y: f64,
        c2x: f64,
        c2y: f64,
        x: f64,
        y: f64,
    },
    Close,
}

/// Segment kind without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    QuadTo,
    CubicTo,
    Close,
}

impl PathSegment {
    pub fn command(&self) -> PathCommand {
        match self {
            PathSegment::MoveTo { .. } => PathCommand::MoveTo,
            PathSegment::LineTo { .. } => PathCommand::LineTo,
            PathSegment::QuadTo { .. } => PathCommand::QuadTo,
            PathSegment::CubicTo { .. } => PathCommand::CubicTo,
            PathSegment::Close => PathCommand::Close,
        }
    }

    /// Coordinates packed into six slots, in control-point order; unused
    /// slots are zero.
    pub fn points(&self) -> [f64; 6] {
        match *self {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                [x, y, 0.0, 0.0, 0.0, 0.0]
            }
            PathSegment::QuadTo { cx, cy, x, y } => [cx, cy, x, y, 0.0, 0.0],
            PathSegment::CubicTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => [c1x, c1y, c2x, c2y, x, y],
            PathSegment::Close => [0.0; 6],
        }
    }
}

/// Magic constant for approximating a quarter circle with one cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// An ordered sequence of path segments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::MoveTo { x, y });
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::LineTo { x, y });
        self
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::QuadTo { cx, cy, x, y });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> &mut Self {
        self.segments.push(PathSegment::CubicTo {
            c1x,
            c1y,
            c2x,
            c2y,
            x,
            y,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(PathSegment::Close);
        self
    }

    /// Append a closed axis-aligned rectangle, clockwise in y-down space.
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> &mut Self {
        self.move_to(x, y)
            .line_to(x + w, y)
            .line_to(x + w, y + h)
            .line_to(x, y + h)
            .close()
    }

    /// Append a closed ellipse made of four cubic arcs.
    pub fn add_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64) -> &mut Self {
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;
        self.move_to(cx + rx, cy)
            .cubic_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry)
            .cubic_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy)
            .cubic_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry)
            .cubic_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy)
            .close()
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        let mut p = Self::new();
        p.add_rect(x, y, w, h);
        p
    }

    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let mut p = Self::new();
        p.add_ellipse(cx, cy, rx, ry);
        p
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Iterate as `(command, [f64; 6])` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PathCommand, [f64; 6])> + '_ {
        self.segments.iter().map(|s| (s.command(), s.points()))
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
