//! Cap and join geometry for stroke outlines.
//!
//! All offsets are taken on the left-hand side of each directed edge at
//! half the stroke width. Outer miter joins longer than
//! `miter_limit · width / 2` revert to bevels; inner joins are mitred up to
//! the length of the shorter adjacent edge and bevelled beyond it.

use crate::basics::PointD;
use crate::math::{calc_distance, calc_intersection, cross_product};
use crate::paint::{LineCap, LineJoin};
use crate::polyline::VertexDist;
use std::f64::consts::PI;

pub struct StrokeMath {
    half_width: f64,
    width_eps: f64,
    miter_limit: f64,
    inner_miter_limit: f64,
    approx_scale: f64,
    line_cap: LineCap,
    line_join: LineJoin,
}

impl StrokeMath {
    pub fn new() -> Self {
        Self {
            half_width: 0.5,
            width_eps: 0.5 / 1024.0,
            miter_limit: 4.0,
            inner_miter_limit: 1.01,
            approx_scale: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }

    pub fn set_line_cap(&mut self, lc: LineCap) {
        self.line_cap = lc;
    }
    pub fn line_cap(&self) -> LineCap {
        self.line_cap
    }

    pub fn set_line_join(&mut self, lj: LineJoin) {
        self.line_join = lj;
    }
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }

    /// Full stroke width. Negative widths are taken by absolute value.
    pub fn set_width(&mut self, w: f64) {
        self.half_width = w.abs() * 0.5;
        self.width_eps = self.half_width / 1024.0;
    }
    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    pub fn set_miter_limit(&mut self, ml: f64) {
        self.miter_limit = ml;
    }
    pub fn miter_limit(&self) -> f64 {
        self.miter_limit
    }

    pub fn set_inner_miter_limit(&mut self, ml: f64) {
        self.inner_miter_limit = ml;
    }
    pub fn inner_miter_limit(&self) -> f64 {
        self.inner_miter_limit
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approx_scale = s;
    }
    pub fn approximation_scale(&self) -> f64 {
        self.approx_scale
    }

    /// Angular step for round caps and joins: chord error of 1/8 device
    /// pixel at the current approximation scale.
    fn arc_step(&self) -> f64 {
        (self.half_width / (self.half_width + 0.125 / self.approx_scale)).acos() * 2.0
    }

    /// Cap at endpoint `v0`, whose neighbour is `v1` at distance `len`.
    pub fn calc_cap(&self, vc: &mut Vec<PointD>, v0: &VertexDist, v1: &VertexDist, len: f64) {
        vc.clear();

        let w = self.half_width;
        let dx1 = (v1.y - v0.y) / len * w;
        let dy1 = (v1.x - v0.x) / len * w;

        match self.line_cap {
            LineCap::Butt | LineCap::Square => {
                let (dx2, dy2) = if self.line_cap == LineCap::Square {
                    (dy1, dx1)
                } else {
                    (0.0, 0.0)
                };
                vc.push(PointD::new(v0.x - dx1 - dx2, v0.y + dy1 - dy2));
                vc.push(PointD::new(v0.x + dx1 - dx2, v0.y - dy1 - dy2));
            }
            LineCap::Round => {
                let n = (PI / self.arc_step()) as i32;
                let da = PI / (n + 1) as f64;

                vc.push(PointD::new(v0.x - dx1, v0.y + dy1));
                let mut a1 = dy1.atan2(-dx1) + da;
                for _ in 0..n {
                    vc.push(PointD::new(v0.x + a1.cos() * w, v0.y + a1.sin() * w));
                    a1 += da;
                }
                vc.push(PointD::new(v0.x + dx1, v0.y - dy1));
            }
        }
    }

    /// Join at `v1` between edges `v0→v1` (length `len1`) and `v1→v2`
    /// (length `len2`).
    pub fn calc_join(
        &self,
        vc: &mut Vec<PointD>,
        v0: &VertexDist,
        v1: &VertexDist,
        v2: &VertexDist,
        len1: f64,
        len2: f64,
    ) {
        let w = self.half_width;
        let dx1 = w * (v1.y - v0.y) / len1;
        let dy1 = w * (v1.x - v0.x) / len1;
        let dx2 = w * (v2.y - v1.y) / len2;
        let dy2 = w * (v2.x - v1.x) / len2;

        vc.clear();

        let cp = cross_product(v0.x, v0.y, v1.x, v1.y, v2.x, v2.y);
        if cp > 0.0 {
            // Inner join: the offset edges overlap.
            let limit = (len1.min(len2) / w).max(self.inner_miter_limit);
            self.calc_miter(vc, v0, v1, v2, dx1, dy1, dx2, dy2, limit);
            return;
        }

        let dx = (dx1 + dx2) / 2.0;
        let dy = (dy1 + dy2) / 2.0;
        let dbevel = (dx * dx + dy * dy).sqrt();

        // Nearly straight: a single point is indistinguishable from the join.
        if self.line_join != LineJoin::Miter
            && self.approx_scale * (w - dbevel) < self.width_eps
        {
            match calc_intersection(
                v0.x + dx1,
                v0.y - dy1,
                v1.x + dx1,
                v1.y - dy1,
                v1.x + dx2,
                v1.y - dy2,
                v2.x + dx2,
                v2.y - dy2,
            ) {
                Some((ix, iy)) => vc.push(PointD::new(ix, iy)),
                None => vc.push(PointD::new(v1.x + dx1, v1.y - dy1)),
            }
            return;
        }

        match self.line_join {
            LineJoin::Miter => {
                self.calc_miter(vc, v0, v1, v2, dx1, dy1, dx2, dy2, self.miter_limit);
            }
            LineJoin::Round => {
                self.calc_arc(vc, v1.x, v1.y, dx1, -dy1, dx2, -dy2);
            }
            LineJoin::Bevel => {
                vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
                vc.push(PointD::new(v1.x + dx2, v1.y - dy2));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn calc_arc(
        &self,
        vc: &mut Vec<PointD>,
        x: f64,
        y: f64,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
    ) {
        let w = self.half_width;
        let mut a1 = dy1.atan2(dx1);
        let mut a2 = dy2.atan2(dx2);
        if a1 > a2 {
            a2 += 2.0 * PI;
        }

        vc.push(PointD::new(x + dx1, y + dy1));
        let n = ((a2 - a1) / self.arc_step()) as i32;
        let da = (a2 - a1) / (n + 1) as f64;
        a1 += da;
        for _ in 0..n {
            vc.push(PointD::new(x + a1.cos() * w, y + a1.sin() * w));
            a1 += da;
        }
        vc.push(PointD::new(x + dx2, y + dy2));
    }

    /// Miter point at `v1`, or a bevel when the miter is longer than
    /// `half_width · limit`.
    #[allow(clippy::too_many_arguments)]
    fn calc_miter(
        &self,
        vc: &mut Vec<PointD>,
        v0: &VertexDist,
        v1: &VertexDist,
        v2: &VertexDist,
        dx1: f64,
        dy1: f64,
        dx2: f64,
        dy2: f64,
        limit: f64,
    ) {
        let lim = self.half_width * limit;

        match calc_intersection(
            v0.x + dx1,
            v0.y - dy1,
            v1.x + dx1,
            v1.y - dy1,
            v1.x + dx2,
            v1.y - dy2,
            v2.x + dx2,
            v2.y - dy2,
        ) {
            Some((xi, yi)) => {
                if calc_distance(v1.x, v1.y, xi, yi) <= lim {
                    vc.push(PointD::new(xi, yi));
                    return;
                }
            }
            None => {
                // Parallel offsets: a straight continuation needs one point,
                // a full reversal falls through to the bevel.
                let x2 = v1.x + dx1;
                let y2 = v1.y - dy1;
                if (cross_product(v0.x, v0.y, v1.x, v1.y, x2, y2) < 0.0)
                    == (cross_product(v1.x, v1.y, v2.x, v2.y, x2, y2) < 0.0)
                {
                    vc.push(PointD::new(x2, y2));
                    return;
                }
            }
        }

        vc.push(PointD::new(v1.x + dx1, v1.y - dy1));
        vc.push(PointD::new(v1.x + dx2, v1.y - dy2));
    }
}

impl Default for StrokeMath {
    fn default() -> Self {
        Self::new()
    }
}
