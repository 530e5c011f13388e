//! Stroke stage: turns every contour of a polyline into a fillable outline.
//!
//! An open contour becomes one closed outline: start cap, joins along the
//! left side, end cap, joins back along the other side. A closed contour
//! becomes two closed outlines of opposite orientation (outer and inner
//! rings), so the result must be filled with the non-zero rule.

use crate::basics::PointD;
use crate::paint::{LineCap, LineJoin, StrokeData};
use crate::polyline::{Polyline, VertexSequence};
use crate::stroke_math::StrokeMath;

pub struct StrokeGenerator {
    stroker: StrokeMath,
    src_vertices: VertexSequence,
    out_vertices: Vec<PointD>,
}

impl StrokeGenerator {
    pub fn new() -> Self {
        Self {
            stroker: StrokeMath::new(),
            src_vertices: VertexSequence::new(),
            out_vertices: Vec::new(),
        }
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.stroker.set_line_cap(lc);
    }
    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.stroker.set_line_join(lj);
    }
    pub fn set_width(&mut self, w: f64) {
        self.stroker.set_width(w);
    }
    pub fn set_miter_limit(&mut self, ml: f64) {
        self.stroker.set_miter_limit(ml);
    }
    pub fn set_inner_miter_limit(&mut self, ml: f64) {
        self.stroker.set_inner_miter_limit(ml);
    }
    pub fn set_approximation_scale(&mut self, s: f64) {
        self.stroker.set_approximation_scale(s);
    }

    pub fn width(&self) -> f64 {
        self.stroker.width()
    }

    /// Take width, cap, join and miter limit from `data`.
    pub fn configure(&mut self, data: &StrokeData) {
        self.set_width(data.width);
        self.set_line_cap(data.cap);
        self.set_line_join(data.join);
        self.set_miter_limit(data.miter_limit);
    }

    /// Stroke every contour of `input` into `out`, which is cleared first.
    /// Contours with fewer than two distinct vertices produce nothing.
    pub fn generate(&mut self, input: &Polyline, out: &mut Polyline) {
        out.clear();
        for contour in input.contours() {
            self.src_vertices.clear();
            for p in contour.points {
                self.src_vertices.add(p.x, p.y);
            }
            let closed = contour.closed && self.src_vertices.len() >= 3;
            self.src_vertices.close(closed);
            if self.src_vertices.len() < 2 {
                continue;
            }
            if closed {
                self.stroke_closed(out);
            } else {
                self.stroke_open(out);
            }
        }
    }

    fn stroke_open(&mut self, out: &mut Polyline) {
        let v = &self.src_vertices;
        let n = v.len();
        let mut started = false;

        self.stroker
            .calc_cap(&mut self.out_vertices, &v[0], &v[1], v[0].dist);
        emit(out, &self.out_vertices, &mut started);

        for i in 1..n - 1 {
            self.stroker.calc_join(
                &mut self.out_vertices,
                &v[i - 1],
                &v[i],
                &v[i + 1],
                v[i - 1].dist,
                v[i].dist,
            );
            emit(out, &self.out_vertices, &mut started);
        }

        self.stroker
            .calc_cap(&mut self.out_vertices, &v[n - 1], &v[n - 2], v[n - 2].dist);
        emit(out, &self.out_vertices, &mut started);

        for i in (1..n - 1).rev() {
            self.stroker.calc_join(
                &mut self.out_vertices,
                &v[i + 1],
                &v[i],
                &v[i - 1],
                v[i].dist,
                v[i - 1].dist,
            );
            emit(out, &self.out_vertices, &mut started);
        }
        out.end_contour(true);
    }

    fn stroke_closed(&mut self, out: &mut Polyline) {
        let v = &self.src_vertices;
        let n = v.len() as isize;

        let mut started = false;
        for i in 0..n {
            let prev = v.cyclic(i - 1);
            self.stroker.calc_join(
                &mut self.out_vertices,
                prev,
                v.cyclic(i),
                v.cyclic(i + 1),
                prev.dist,
                v.cyclic(i).dist,
            );
            emit(out, &self.out_vertices, &mut started);
        }
        out.end_contour(true);

        let mut started = false;
        for i in (0..n).rev() {
            let prev = v.cyclic(i - 1);
            self.stroker.calc_join(
                &mut self.out_vertices,
                v.cyclic(i + 1),
                v.cyclic(i),
                prev,
                v.cyclic(i).dist,
                prev.dist,
            );
            emit(out, &self.out_vertices, &mut started);
        }
        out.end_contour(true);
    }
}

fn emit(out: &mut Polyline, points: &[PointD], started: &mut bool) {
    for p in points {
        if *started {
            out.line_to(p.x, p.y);
        } else {
            out.move_to(p.x, p.y);
            *started = true;
        }
    }
}

impl Default for StrokeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polyline(points: &[(f64, f64)], closed: bool) -> Polyline {
        let mut p = Polyline::new();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                p.move_to(x, y);
            } else {
                p.line_to(x, y);
            }
        }
        p.end_contour(closed);
        p
    }

    fn stroke(input: &Polyline, data: &StrokeData) -> Polyline {
        let mut gen = StrokeGenerator::new();
        gen.configure(data);
        let mut out = Polyline::new();
        gen.generate(input, &mut out);
        out
    }

    #[test]
    fn test_open_line_butt() {
        let out = stroke(&polyline(&[(0.0, 0.0), (10.0, 0.0)], false), &StrokeData::new(4.0));
        let contours: Vec<_> = out.contours().collect();
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(
            contours[0].points,
            &[
                PointD::new(0.0, 2.0),
                PointD::new(0.0, -2.0),
                PointD::new(10.0, -2.0),
                PointD::new(10.0, 2.0)
            ]
        );
    }

    #[test]
    fn test_open_polyline_has_joins_on_both_sides() {
        let out = stroke(
            &polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false),
            &StrokeData::new(2.0),
        );
        let c = out.contours().next().unwrap();
        // 2 cap + 1 outer miter + 2 cap + 1 inner miter
        assert_eq!(c.points.len(), 6);
        assert!(c
            .points
            .iter()
            .any(|p| (p.x - 11.0).abs() < 1e-9 && (p.y + 1.0).abs() < 1e-9));
        assert!(c
            .points
            .iter()
            .any(|p| (p.x - 9.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9));
    }

    #[test]
    fn test_closed_square_gives_two_rings() {
        let out = stroke(
            &polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], true),
            &StrokeData::new(2.0),
        );
        let contours: Vec<_> = out.contours().collect();
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].points.len(), 4);
        assert_eq!(contours[1].points.len(), 4);

        let extent = |pts: &[PointD]| pts.iter().map(|p| p.x).fold(f64::MIN, f64::max);
        let (a, b) = (extent(contours[0].points), extent(contours[1].points));
        assert!((a.max(b) - 11.0).abs() < 1e-9);
        assert!((a.min(b) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_contours_are_skipped() {
        let mut p = Polyline::new();
        p.move_to(5.0, 5.0);
        p.end_contour(false);
        p.move_to(1.0, 1.0);
        p.line_to(1.0, 1.0);
        p.end_contour(false);
        let out = stroke(&p, &StrokeData::new(3.0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_closed_two_point_contour_strokes_as_open() {
        let out = stroke(&polyline(&[(0.0, 0.0), (10.0, 0.0)], true), &StrokeData::new(2.0));
        assert_eq!(out.num_contours(), 1);
    }

    #[test]
    fn test_round_cap_adds_vertices() {
        let data = StrokeData::new(10.0).with_cap(LineCap::Round);
        let out = stroke(&polyline(&[(0.0, 0.0), (50.0, 0.0)], false), &data);
        assert!(out.total_vertices() > 8);
    }
}
