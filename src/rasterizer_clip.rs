//! Edge clipping in front of the cell rasterizer.
//!
//! Edges are clipped in device-space doubles against the clip box and only
//! then converted to 24.8 fixed point, so arbitrarily large coordinates
//! never reach integer arithmetic. Parts of an edge left or right of the
//! box are not dropped: they are moved onto the box border as vertical
//! edges, which keeps the winding of everything to their right intact.
//! Parts above or below the box are dropped.

use crate::basics::{iround, POLY_SUBPIXEL_SCALE};
use crate::rasterizer_cells::CellRasterizer;

const X2: u32 = 1;
const Y2: u32 = 2;
const X1: u32 = 4;
const Y1: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ClipBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Bit set of the sides of the box that (x, y) lies beyond.
    #[inline]
    fn flags(&self, x: f64, y: f64) -> u32 {
        ((x > self.x2) as u32 * X2)
            | ((y > self.y2) as u32 * Y2)
            | ((x < self.x1) as u32 * X1)
            | ((y < self.y1) as u32 * Y1)
    }

    #[inline]
    fn flags_y(&self, y: f64) -> u32 {
        ((y > self.y2) as u32 * Y2) | ((y < self.y1) as u32 * Y1)
    }
}

/// Device coordinate to 24.8 fixed point.
#[inline]
pub fn poly_coord(v: f64) -> i32 {
    iround(v * POLY_SUBPIXEL_SCALE as f64)
}

pub struct EdgeClipper {
    clip_box: Option<ClipBox>,
    x1: f64,
    y1: f64,
    f1: u32,
}

impl EdgeClipper {
    pub fn new() -> Self {
        Self {
            clip_box: None,
            x1: 0.0,
            y1: 0.0,
            f1: 0,
        }
    }

    pub fn set_clip_box(&mut self, clip_box: ClipBox) {
        self.clip_box = Some(clip_box);
    }

    pub fn reset_clipping(&mut self) {
        self.clip_box = None;
    }

    pub fn clip_box(&self) -> Option<ClipBox> {
        self.clip_box
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x1 = x;
        self.y1 = y;
        if let Some(cb) = &self.clip_box {
            self.f1 = cb.flags(x, y);
        }
    }

    pub fn line_to(&mut self, ras: &mut CellRasterizer, x2: f64, y2: f64) {
        let Some(cb) = self.clip_box else {
            emit(ras, self.x1, self.y1, x2, y2);
            self.x1 = x2;
            self.y1 = y2;
            return;
        };

        let f2 = cb.flags(x2, y2);
        let (x1, y1, f1) = (self.x1, self.y1, self.f1);
        self.x1 = x2;
        self.y1 = y2;
        self.f1 = f2;

        // Both ends beyond the same horizontal border.
        if (f1 & (Y1 | Y2)) == (f2 & (Y1 | Y2)) && (f1 & (Y1 | Y2)) != 0 {
            return;
        }

        let y_at = |x: f64| y1 + (x - x1) * (y2 - y1) / (x2 - x1);

        match ((f1 & (X1 | X2)) << 1) | (f2 & (X1 | X2)) {
            0 => clip_y(ras, &cb, x1, y1, x2, y2, f1, f2),
            // x2 right of the box
            1 => {
                let y3 = y_at(cb.x2);
                let f3 = cb.flags_y(y3);
                clip_y(ras, &cb, x1, y1, cb.x2, y3, f1, f3);
                clip_y(ras, &cb, cb.x2, y3, cb.x2, y2, f3, f2);
            }
            // x1 right of the box
            2 => {
                let y3 = y_at(cb.x2);
                let f3 = cb.flags_y(y3);
                clip_y(ras, &cb, cb.x2, y1, cb.x2, y3, f1, f3);
                clip_y(ras, &cb, cb.x2, y3, x2, y2, f3, f2);
            }
            // both right
            3 => clip_y(ras, &cb, cb.x2, y1, cb.x2, y2, f1, f2),
            // x2 left of the box
            4 => {
                let y3 = y_at(cb.x1);
                let f3 = cb.flags_y(y3);
                clip_y(ras, &cb, x1, y1, cb.x1, y3, f1, f3);
                clip_y(ras, &cb, cb.x1, y3, cb.x1, y2, f3, f2);
            }
            // x1 right, x2 left
            6 => {
                let y3 = y_at(cb.x2);
                let y4 = y_at(cb.x1);
                let f3 = cb.flags_y(y3);
                let f4 = cb.flags_y(y4);
                clip_y(ras, &cb, cb.x2, y1, cb.x2, y3, f1, f3);
                clip_y(ras, &cb, cb.x2, y3, cb.x1, y4, f3, f4);
                clip_y(ras, &cb, cb.x1, y4, cb.x1, y2, f4, f2);
            }
            // x1 left of the box
            8 => {
                let y3 = y_at(cb.x1);
                let f3 = cb.flags_y(y3);
                clip_y(ras, &cb, cb.x1, y1, cb.x1, y3, f1, f3);
                clip_y(ras, &cb, cb.x1, y3, x2, y2, f3, f2);
            }
            // x1 left, x2 right
            9 => {
                let y3 = y_at(cb.x1);
                let y4 = y_at(cb.x2);
                let f3 = cb.flags_y(y3);
                let f4 = cb.flags_y(y4);
                clip_y(ras, &cb, cb.x1, y1, cb.x1, y3, f1, f3);
                clip_y(ras, &cb, cb.x1, y3, cb.x2, y4, f3, f4);
                clip_y(ras, &cb, cb.x2, y4, cb.x2, y2, f4, f2);
            }
            // both left
            12 => clip_y(ras, &cb, cb.x1, y1, cb.x1, y2, f1, f2),
            // a point cannot be both left and right of the box
            _ => {}
        }
    }
}

impl Default for EdgeClipper {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn emit(ras: &mut CellRasterizer, x1: f64, y1: f64, x2: f64, y2: f64) {
    ras.line(poly_coord(x1), poly_coord(y1), poly_coord(x2), poly_coord(y2));
}

/// Clip an edge whose x range already lies inside the box against the
/// top and bottom borders.
#[allow(clippy::too_many_arguments)]
fn clip_y(
    ras: &mut CellRasterizer,
    cb: &ClipBox,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    f1: u32,
    f2: u32,
) {
    let f1 = f1 & (Y1 | Y2);
    let f2 = f2 & (Y1 | Y2);

    if (f1 | f2) == 0 {
        emit(ras, x1, y1, x2, y2);
        return;
    }
    if f1 == f2 {
        return;
    }

    let x_at = |y: f64| x1 + (y - y1) * (x2 - x1) / (y2 - y1);
    let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1, y1, x2, y2);
    if f1 & Y1 != 0 {
        tx1 = x_at(cb.y1);
        ty1 = cb.y1;
    }
    if f1 & Y2 != 0 {
        tx1 = x_at(cb.y2);
        ty1 = cb.y2;
    }
    if f2 & Y1 != 0 {
        tx2 = x_at(cb.y1);
        ty2 = cb.y1;
    }
    if f2 & Y2 != 0 {
        tx2 = x_at(cb.y2);
        ty2 = cb.y2;
    }
    emit(ras, tx1, ty1, tx2, ty2);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clipped(edges: &[(f64, f64, f64, f64)]) -> CellRasterizer {
        let mut ras = CellRasterizer::new();
        let mut clip = EdgeClipper::new();
        clip.set_clip_box(ClipBox::new(0.0, 0.0, 10.0, 10.0));
        for &(x1, y1, x2, y2) in edges {
            clip.move_to(x1, y1);
            clip.line_to(&mut ras, x2, y2);
        }
        ras.sort_cells();
        ras
    }

    #[test]
    fn test_poly_coord() {
        assert_eq!(poly_coord(0.0), 0);
        assert_eq!(poly_coord(1.0), 256);
        assert_eq!(poly_coord(-1.5), -384);
    }

    #[test]
    fn test_clip_box_normalizes() {
        let cb = ClipBox::new(10.0, 8.0, 2.0, 4.0);
        assert_eq!(cb, ClipBox::new(2.0, 4.0, 10.0, 8.0));
    }

    #[test]
    fn test_inside_edge_passes_through() {
        let ras = clipped(&[(2.0, 2.0, 2.0, 6.0)]);
        assert_eq!((ras.min_y(), ras.max_y()), (2, 6));
        assert_eq!((ras.min_x(), ras.max_x()), (2, 2));
    }

    #[test]
    fn test_edge_above_box_is_dropped() {
        let ras = clipped(&[(2.0, -20.0, 8.0, -5.0)]);
        assert_eq!(ras.total_cells(), 0);
    }

    #[test]
    fn test_edge_left_of_box_moves_to_border() {
        let ras = clipped(&[(-50.0, 2.0, -40.0, 6.0)]);
        assert_eq!((ras.min_x(), ras.max_x()), (0, 0));
        assert_eq!((ras.min_y(), ras.max_y()), (2, 6));
    }

    #[test]
    fn test_edge_crossing_box_is_cut() {
        let ras = clipped(&[(5.0, -100.0, 5.0, 100.0)]);
        assert_eq!((ras.min_y(), ras.max_y()), (0, 10));
    }

    #[test]
    fn test_huge_coordinates_stay_bounded() {
        let ras = clipped(&[(-1e12, -1e12, 1e12, 1e12)]);
        assert!(ras.min_x() >= 0 && ras.max_x() <= 10);
        assert!(ras.min_y() >= 0 && ras.max_y() <= 10);
    }

    #[test]
    fn test_without_clip_box() {
        let mut ras = CellRasterizer::new();
        let mut clip = EdgeClipper::new();
        assert!(clip.clip_box().is_none());
        clip.move_to(-5.0, -5.0);
        clip.line_to(&mut ras, -5.0, 5.0);
        ras.sort_cells();
        assert_eq!(ras.min_x(), -5);
    }
}
