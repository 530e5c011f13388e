//! Dash stage: splits every contour of a polyline into "on" pieces.
//!
//! Even pattern entries are dashes, odd entries are gaps. An odd-length
//! pattern is repeated once so that dashes and gaps keep alternating. The
//! pattern restarts at the dash offset for every contour, and a closed
//! contour is dashed along its closing edge too. Output contours are open.

use crate::basics::PointD;
use crate::polyline::{Polyline, VertexSequence};

pub struct DashGenerator {
    dashes: Vec<f64>,
    total_dash_len: f64,
    dash_start: f64,
    curr_dash: usize,
    curr_dash_start: f64,
    src_vertices: VertexSequence,
}

impl DashGenerator {
    pub fn new() -> Self {
        Self {
            dashes: Vec::new(),
            total_dash_len: 0.0,
            dash_start: 0.0,
            curr_dash: 0,
            curr_dash_start: 0.0,
            src_vertices: VertexSequence::new(),
        }
    }

    pub fn remove_all_dashes(&mut self) {
        self.dashes.clear();
        self.total_dash_len = 0.0;
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
    }

    /// Append one dash/gap pair. Negative or NaN lengths count as zero.
    pub fn add_dash(&mut self, dash_len: f64, gap_len: f64) {
        let dash_len = sanitize(dash_len);
        let gap_len = sanitize(gap_len);
        self.dashes.push(dash_len);
        self.dashes.push(gap_len);
        self.total_dash_len += dash_len + gap_len;
    }

    /// Replace the pattern with `pattern`, repeating it once when its
    /// length is odd.
    pub fn set_dash_array(&mut self, pattern: &[f64]) {
        self.remove_all_dashes();
        let n = if pattern.len() % 2 == 0 {
            pattern.len()
        } else {
            pattern.len() * 2
        };
        for i in (0..n).step_by(2) {
            self.add_dash(pattern[i % pattern.len()], pattern[(i + 1) % pattern.len()]);
        }
    }

    /// Distance into the pattern at which every contour starts. Wraps
    /// around the pattern length; negative values shift backwards.
    pub fn set_dash_start(&mut self, offset: f64) {
        self.dash_start = if self.total_dash_len > 0.0 && offset.is_finite() {
            offset.rem_euclid(self.total_dash_len)
        } else {
            0.0
        };
        self.calc_dash_start();
    }

    pub fn dash_start(&self) -> f64 {
        self.dash_start
    }

    pub fn total_dash_len(&self) -> f64 {
        self.total_dash_len
    }

    pub fn num_dashes(&self) -> usize {
        self.dashes.len()
    }

    fn calc_dash_start(&mut self) {
        self.curr_dash = 0;
        self.curr_dash_start = 0.0;
        if self.dashes.is_empty() {
            return;
        }
        let mut ds = self.dash_start;
        while ds > 0.0 {
            if ds > self.dashes[self.curr_dash] {
                ds -= self.dashes[self.curr_dash];
                self.curr_dash = (self.curr_dash + 1) % self.dashes.len();
            } else {
                self.curr_dash_start = ds;
                ds = 0.0;
            }
        }
    }

    /// Dash every contour of `input` into `out`, which is cleared first.
    /// A pattern of zero total length produces no output.
    pub fn generate(&mut self, input: &Polyline, out: &mut Polyline) {
        out.clear();
        if self.total_dash_len <= 0.0 {
            return;
        }
        for contour in input.contours() {
            self.src_vertices.clear();
            for p in contour.points {
                self.src_vertices.add(p.x, p.y);
            }
            self.src_vertices.close(contour.closed);
            if self.src_vertices.len() < 2 {
                continue;
            }
            self.dash_contour(contour.closed, out);
        }
    }

    fn dash_contour(&self, closed: bool, out: &mut Polyline) {
        let n = self.src_vertices.len();
        let num_edges = if closed { n } else { n - 1 };
        let is_on = |dash: usize| dash & 1 == 0;

        let mut dash = self.curr_dash;
        let mut dash_pos = self.curr_dash_start;

        let first = &self.src_vertices[0];
        if is_on(dash) {
            out.move_to(first.x, first.y);
        }

        for i in 0..num_edges {
            let v1 = self.src_vertices[i];
            let v2 = self.src_vertices[(i + 1) % n];
            let len = v1.dist;
            let mut t = 0.0;

            while len - t > self.dashes[dash] - dash_pos {
                t += self.dashes[dash] - dash_pos;
                let p = PointD::new(
                    v1.x + (v2.x - v1.x) * t / len,
                    v1.y + (v2.y - v1.y) * t / len,
                );
                if is_on(dash) {
                    out.line_to(p.x, p.y);
                    out.end_contour(false);
                }
                dash = (dash + 1) % self.dashes.len();
                dash_pos = 0.0;
                if is_on(dash) {
                    out.move_to(p.x, p.y);
                }
            }
            dash_pos += len - t;
            if is_on(dash) {
                out.line_to(v2.x, v2.y);
            }
        }
        out.end_contour(false);
    }
}

fn sanitize(len: f64) -> f64 {
    if len.is_nan() || len < 0.0 {
        0.0
    } else {
        len
    }
}

impl Default for DashGenerator {
    fn default() -> Self {
        Self::new()
    }
}
