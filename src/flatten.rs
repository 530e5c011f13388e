//! Path flattening stage: `Path` to `Polyline`.
//!
//! Straight segments pass through, Bézier segments are subdivided by
//! [`CurveDiv`]. A drawing segment that follows `Close` (or opens the
//! path) starts a new contour at the last sub-path start, matching SVG
//! current-point rules.

use crate::basics::PointD;
use crate::curves::CurveDiv;
use crate::path::{Path, PathSegment};
use crate::polyline::Polyline;

pub struct PathFlattener {
    curves: CurveDiv,
    scratch: Vec<PointD>,
}

impl PathFlattener {
    pub fn new() -> Self {
        Self {
            curves: CurveDiv::new(),
            scratch: Vec::new(),
        }
    }

    /// Scale from user units to device pixels; tolerance is half a device
    /// pixel.
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.curves.set_approximation_scale(s);
    }

    pub fn approximation_scale(&self) -> f64 {
        self.curves.approximation_scale()
    }

    /// Flatten `path` into `out`, which is cleared first.
    pub fn flatten(&mut self, path: &Path, out: &mut Polyline) {
        out.clear();
        let mut start = PointD::default();
        let mut current = PointD::default();
        let mut open = false;

        for segment in path {
            match *segment {
                PathSegment::MoveTo { x, y } => {
                    out.move_to(x, y);
                    start = PointD::new(x, y);
                    current = start;
                    open = true;
                }
                PathSegment::LineTo { x, y } => {
                    Self::ensure_open(out, &mut open, start);
                    out.line_to(x, y);
                    current = PointD::new(x, y);
                }
                PathSegment::QuadTo { cx, cy, x, y } => {
                    Self::ensure_open(out, &mut open, start);
                    let end = PointD::new(x, y);
                    self.scratch.clear();
                    self.curves
                        .quad(current, PointD::new(cx, cy), end, &mut self.scratch);
                    for p in &self.scratch {
                        out.line_to(p.x, p.y);
                    }
                    current = end;
                }
                PathSegment::CubicTo {
                    c1x,
                    c1y,
                    c2x,
                    c2y,
                    x,
                    y,
                } => {
                    Self::ensure_open(out, &mut open, start);
                    let end = PointD::new(x, y);
                    self.scratch.clear();
                    self.curves.cubic(
                        current,
                        PointD::new(c1x, c1y),
                        PointD::new(c2x, c2y),
                        end,
                        &mut self.scratch,
                    );
                    for p in &self.scratch {
                        out.line_to(p.x, p.y);
                    }
                    current = end;
                }
                PathSegment::Close => {
                    if open {
                        out.end_contour(true);
                        open = false;
                    }
                    current = start;
                }
            }
        }
        out.end_contour(false);
    }

    fn ensure_open(out: &mut Polyline, open: &mut bool, start: PointD) {
        if !*open {
            out.move_to(start.x, start.y);
            *open = true;
        }
    }
}

impl Default for PathFlattener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(path: &Path, scale: f64) -> Polyline {
        let mut f = PathFlattener::new();
        f.set_approximation_scale(scale);
        let mut out = Polyline::new();
        f.flatten(path, &mut out);
        out
    }

    #[test]
    fn test_lines_pass_through() {
        let p = Path::rect(50.0, 50.0, 100.0, 100.0);
        let out = flatten(&p, 1.0);
        let contours: Vec<_> = out.contours().collect();
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(
            contours[0].points,
            &[
                PointD::new(50.0, 50.0),
                PointD::new(150.0, 50.0),
                PointD::new(150.0, 150.0),
                PointD::new(50.0, 150.0)
            ]
        );
    }

    #[test]
    fn test_open_subpaths() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0).line_to(10.0, 0.0);
        p.move_to(0.0, 5.0).line_to(10.0, 5.0);
        let out = flatten(&p, 1.0);
        assert_eq!(out.num_contours(), 2);
        assert!(out.contours().all(|c| !c.closed && c.points.len() == 2));
    }

    #[test]
    fn test_curves_are_subdivided() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0)
            .quad_to(50.0, 100.0, 100.0, 0.0)
            .cubic_to(100.0, -50.0, 0.0, -50.0, 0.0, 0.0);
        let out = flatten(&p, 1.0);
        let c = out.contours().next().unwrap();
        assert!(c.points.len() > 10);
        assert_eq!(*c.points.last().unwrap(), PointD::new(0.0, 0.0));
    }

    #[test]
    fn test_scale_drives_vertex_count() {
        let p = Path::ellipse(0.0, 0.0, 10.0, 10.0);
        let coarse = flatten(&p, 1.0).total_vertices();
        let fine = flatten(&p, 20.0).total_vertices();
        assert!(fine > coarse);
    }

    #[test]
    fn test_segment_after_close_restarts_at_subpath_start() {
        let mut p = Path::new();
        p.move_to(10.0, 10.0)
            .line_to(20.0, 10.0)
            .line_to(20.0, 20.0)
            .close()
            .line_to(0.0, 30.0);
        let out = flatten(&p, 1.0);
        let contours: Vec<_> = out.contours().collect();
        assert_eq!(contours.len(), 2);
        assert!(contours[0].closed);
        assert!(!contours[1].closed);
        assert_eq!(contours[1].points[0], PointD::new(10.0, 10.0));
        assert_eq!(contours[1].points[1], PointD::new(0.0, 30.0));
    }

    #[test]
    fn test_empty_path() {
        let out = flatten(&Path::new(), 1.0);
        assert!(out.is_empty());
    }
}
