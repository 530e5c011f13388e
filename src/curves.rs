//! Bézier curve flattening by recursive subdivision.
//!
//! Subdivision is driven by distance only: a piece is accepted once its
//! control points lie within the distance tolerance of the chord. The
//! tolerance is `0.5 / approximation_scale` user units, i.e. half a device
//! pixel when the approximation scale equals the device transform scale.
//! No angle criterion is applied, so output does not depend on rotation.

use crate::basics::PointD;
use crate::math::calc_sq_distance;

const CURVE_COLLINEARITY_EPSILON: f64 = 1e-30;
const CURVE_RECURSION_LIMIT: u32 = 32;

/// Recursive subdivision flattener for quadratic and cubic curves.
///
/// Curves are emitted without their start point (which is the current
/// point of the polyline) and with their end point.
#[derive(Debug, Clone, Copy)]
pub struct CurveDiv {
    approximation_scale: f64,
    distance_tolerance_square: f64,
}

impl CurveDiv {
    pub fn new() -> Self {
        let mut c = Self {
            approximation_scale: 1.0,
            distance_tolerance_square: 0.0,
        };
        c.set_approximation_scale(1.0);
        c
    }

    pub fn set_approximation_scale(&mut self, s: f64) {
        self.approximation_scale = s;
        let tol = 0.5 / s;
        self.distance_tolerance_square = tol * tol;
    }

    pub fn approximation_scale(&self) -> f64 {
        self.approximation_scale
    }

    /// Flatten the quadratic curve p1-p2-p3 into `out`.
    pub fn quad(&self, p1: PointD, p2: PointD, p3: PointD, out: &mut Vec<PointD>) {
        if ![p1, p2, p3].iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
            out.push(p3);
            return;
        }
        self.recursive_quad(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y, 0, out);
        out.push(p3);
    }

    /// Flatten the cubic curve p1-p2-p3-p4 into `out`.
    pub fn cubic(&self, p1: PointD, p2: PointD, p3: PointD, p4: PointD, out: &mut Vec<PointD>) {
        if ![p1, p2, p3, p4]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
        {
            out.push(p4);
            return;
        }
        self.recursive_cubic(
            p1.x, p1.y, p2.x, p2.y, p3.x, p3.y, p4.x, p4.y, 0, out,
        );
        out.push(p4);
    }

    #[allow(clippy::too_many_arguments)]
    fn recursive_quad(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        level: u32,
        out: &mut Vec<PointD>,
    ) {
        if level > CURVE_RECURSION_LIMIT {
            return;
        }

        let x12 = (x1 + x2) / 2.0;
        let y12 = (y1 + y2) / 2.0;
        let x23 = (x2 + x3) / 2.0;
        let y23 = (y2 + y3) / 2.0;
        let x123 = (x12 + x23) / 2.0;
        let y123 = (y12 + y23) / 2.0;

        let dx = x3 - x1;
        let dy = y3 - y1;
        let d = ((x2 - x3) * dy - (y2 - y3) * dx).abs();

        if d > CURVE_COLLINEARITY_EPSILON {
            if d * d <= self.distance_tolerance_square * (dx * dx + dy * dy) {
                out.push(PointD::new(x123, y123));
                return;
            }
        } else {
            // Collinear: only a control point beyond the chord ends matters.
            let da = dx * dx + dy * dy;
            let dist = if da == 0.0 {
                calc_sq_distance(x1, y1, x2, y2)
            } else {
                let t = ((x2 - x1) * dx + (y2 - y1) * dy) / da;
                if t > 0.0 && t < 1.0 {
                    return;
                }
                if t <= 0.0 {
                    calc_sq_distance(x2, y2, x1, y1)
                } else {
                    calc_sq_distance(x2, y2, x3, y3)
                }
            };
            if dist < self.distance_tolerance_square {
                out.push(PointD::new(x2, y2));
                return;
            }
        }

        self.recursive_quad(x1, y1, x12, y12, x123, y123, level + 1, out);
        self.recursive_quad(x123, y123, x23, y23, x3, y3, level + 1, out);
    }

    #[allow(clippy::too_many_arguments)]
    fn recursive_cubic(
        &self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
        level: u32,
        out: &mut Vec<PointD>,
    ) {
        if level > CURVE_RECURSION_LIMIT {
            return;
        }

        let x12 = (x1 + x2) / 2.0;
        let y12 = (y1 + y2) / 2.0;
        let x23 = (x2 + x3) / 2.0;
        let y23 = (y2 + y3) / 2.0;
        let x34 = (x3 + x4) / 2.0;
        let y34 = (y3 + y4) / 2.0;
        let x123 = (x12 + x23) / 2.0;
        let y123 = (y12 + y23) / 2.0;
        let x234 = (x23 + x34) / 2.0;
        let y234 = (y23 + y34) / 2.0;
        let x1234 = (x123 + x234) / 2.0;
        let y1234 = (y123 + y234) / 2.0;

        let dx = x4 - x1;
        let dy = y4 - y1;
        let chord_sq = dx * dx + dy * dy;

        let d2 = ((x2 - x4) * dy - (y2 - y4) * dx).abs();
        let d3 = ((x3 - x4) * dy - (y3 - y4) * dx).abs();

        match (
            d2 > CURVE_COLLINEARITY_EPSILON,
            d3 > CURVE_COLLINEARITY_EPSILON,
        ) {
            (false, false) => {
                // All collinear, or p1 == p4.
                let (e2, e3) = if chord_sq == 0.0 {
                    (
                        calc_sq_distance(x1, y1, x2, y2),
                        calc_sq_distance(x4, y4, x3, y3),
                    )
                } else {
                    let k = 1.0 / chord_sq;
                    let t2 = k * ((x2 - x1) * dx + (y2 - y1) * dy);
                    let t3 = k * ((x3 - x1) * dx + (y3 - y1) * dy);
                    if t2 > 0.0 && t2 < 1.0 && t3 > 0.0 && t3 < 1.0 {
                        return;
                    }
                    let off_chord = |x: f64, y: f64, t: f64| {
                        if t <= 0.0 {
                            calc_sq_distance(x, y, x1, y1)
                        } else if t >= 1.0 {
                            calc_sq_distance(x, y, x4, y4)
                        } else {
                            calc_sq_distance(x, y, x1 + t * dx, y1 + t * dy)
                        }
                    };
                    (off_chord(x2, y2, t2), off_chord(x3, y3, t3))
                };
                if e2 > e3 {
                    if e2 < self.distance_tolerance_square {
                        out.push(PointD::new(x2, y2));
                        return;
                    }
                } else if e3 < self.distance_tolerance_square {
                    out.push(PointD::new(x3, y3));
                    return;
                }
            }
            (false, true) => {
                if d3 * d3 <= self.distance_tolerance_square * chord_sq {
                    out.push(PointD::new(x23, y23));
                    return;
                }
            }
            (true, false) => {
                if d2 * d2 <= self.distance_tolerance_square * chord_sq {
                    out.push(PointD::new(x23, y23));
                    return;
                }
            }
            (true, true) => {
                if (d2 + d3) * (d2 + d3) <= self.distance_tolerance_square * chord_sq {
                    out.push(PointD::new(x23, y23));
                    return;
                }
            }
        }

        self.recursive_cubic(
            x1, y1, x12, y12, x123, y123, x1234, y1234, level + 1, out,
        );
        self.recursive_cubic(
            x1234, y1234, x234, y234, x34, y34, x4, y4, level + 1, out,
        );
    }
}

impl Default for CurveDiv {
    fn default() -> Self {
        Self::new()
    }
}
