//! Polygon scanline rasterizer with anti-aliasing.
//!
//! Contours are added in user space together with the device transform,
//! clipped, accumulated into cells and swept row by row into a
//! [`Scanline`] container. Coverage is exact area coverage with no gamma:
//! 0 is outside, 255 fully inside.

use crate::basics::{FillingRule, POLY_SUBPIXEL_SHIFT};
use crate::polyline::Polyline;
use crate::rasterizer_cells::CellRasterizer;
use crate::rasterizer_clip::{ClipBox, EdgeClipper};
use crate::trans_affine::AffineTransform;

const AA_SHIFT: u32 = 8;
const AA_SCALE: i32 = 1 << AA_SHIFT;
const AA_MASK: i32 = AA_SCALE - 1;
const AA_SCALE2: i32 = AA_SCALE * 2;
const AA_MASK2: i32 = AA_SCALE2 - 1;

/// Receiver of one row of coverage from [`RasterizerScanlineAa::sweep_scanline`].
pub trait Scanline {
    /// Drop the spans of the previous row.
    fn reset_spans(&mut self);
    /// One pixel at `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);
    /// `len` pixels starting at `x`, all with coverage `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);
    /// Close the row at `y`.
    fn finalize(&mut self, y: i32);
    fn num_spans(&self) -> usize;
    fn y(&self) -> i32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Initial,
    MoveTo,
    LineTo,
}

pub struct RasterizerScanlineAa {
    outline: CellRasterizer,
    clipper: EdgeClipper,
    filling_rule: FillingRule,
    start_x: f64,
    start_y: f64,
    status: Status,
    scan_y: i32,
}

impl RasterizerScanlineAa {
    pub fn new() -> Self {
        Self {
            outline: CellRasterizer::new(),
            clipper: EdgeClipper::new(),
            filling_rule: FillingRule::NonZero,
            start_x: 0.0,
            start_y: 0.0,
            status: Status::Initial,
            scan_y: 0,
        }
    }

    /// Discard all geometry. The clip box and filling rule are kept.
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = Status::Initial;
    }

    pub fn set_filling_rule(&mut self, rule: FillingRule) {
        self.filling_rule = rule;
    }

    pub fn filling_rule(&self) -> FillingRule {
        self.filling_rule
    }

    /// Clip to the device rectangle (x1, y1)–(x2, y2). Resets the geometry.
    pub fn set_clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper.set_clip_box(ClipBox::new(x1, y1, x2, y2));
    }

    pub fn reset_clipping(&mut self) {
        self.reset();
        self.clipper.reset_clipping();
    }

    /// Close the current contour back to its start point.
    pub fn close_polygon(&mut self) {
        if self.status == Status::LineTo {
            self.clipper
                .line_to(&mut self.outline, self.start_x, self.start_y);
        }
        self.status = Status::Initial;
    }

    /// Start a new contour in device coordinates, closing the previous one.
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.start_x = x;
        self.start_y = y;
        self.clipper.move_to(x, y);
        self.status = Status::MoveTo;
    }

    pub fn line_to_d(&mut self, x: f64, y: f64) {
        if self.status == Status::Initial {
            self.move_to_d(x, y);
            return;
        }
        self.clipper.line_to(&mut self.outline, x, y);
        self.status = Status::LineTo;
    }

    /// Add every contour of `polyline` mapped through `mtx`. Each contour
    /// is closed for filling whether or not it was closed as a path.
    /// Contours with a non-finite device vertex are skipped.
    pub fn add_polyline(&mut self, polyline: &Polyline, mtx: &AffineTransform) {
        for contour in polyline.contours() {
            let finite = contour.points.iter().all(|p| {
                let (x, y) = mtx.apply(p.x, p.y);
                x.is_finite() && y.is_finite()
            });
            if !finite {
                log::debug!("skipping contour with non-finite device coordinates");
                continue;
            }
            for (i, p) in contour.points.iter().enumerate() {
                let (x, y) = mtx.apply(p.x, p.y);
                if i == 0 {
                    self.move_to_d(x, y);
                } else {
                    self.line_to_d(x, y);
                }
            }
            self.close_polygon();
        }
    }

    pub fn min_x(&self) -> i32 {
        self.outline.min_x()
    }
    pub fn min_y(&self) -> i32 {
        self.outline.min_y()
    }
    pub fn max_x(&self) -> i32 {
        self.outline.max_x()
    }
    pub fn max_y(&self) -> i32 {
        self.outline.max_y()
    }

    pub fn total_cells(&self) -> usize {
        self.outline.total_cells()
    }

    /// Sort the cells and position the sweep at the top row. Returns
    /// `false` when nothing would be rendered.
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        if self.outline.total_cells() == 0 {
            return false;
        }
        self.scan_y = self.outline.min_y();
        true
    }

    /// Coverage of a pixel from its accumulated doubled area.
    #[inline]
    pub fn calculate_alpha(&self, area: i32) -> u32 {
        let mut cover = (area >> (POLY_SUBPIXEL_SHIFT * 2 + 1 - AA_SHIFT)).abs();
        if self.filling_rule == FillingRule::EvenOdd {
            cover &= AA_MASK2;
            if cover > AA_SCALE {
                cover = AA_SCALE2 - cover;
            }
        }
        cover.min(AA_MASK) as u32
    }

    /// Fill `sl` with the next non-empty row. Returns `false` once all
    /// rows are consumed.
    pub fn sweep_scanline<S: Scanline>(&mut self, sl: &mut S) -> bool {
        loop {
            if self.scan_y > self.outline.max_y() {
                return false;
            }
            sl.reset_spans();

            let mut cells = self.outline.row(self.scan_y).peekable();
            let mut cover = 0;

            while let Some(cell) = cells.next() {
                let mut x = cell.x;
                let mut area = cell.area;
                cover += cell.cover;

                while let Some(next) = cells.peek() {
                    if next.x != x {
                        break;
                    }
                    area += next.area;
                    cover += next.cover;
                    cells.next();
                }

                if area != 0 {
                    let alpha =
                        self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha != 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }

                if let Some(next) = cells.peek() {
                    if next.x > x {
                        let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                        if alpha != 0 {
                            sl.add_span(x, (next.x - x) as u32, alpha);
                        }
                    }
                }
            }

            if sl.num_spans() > 0 {
                break;
            }
            self.scan_y += 1;
        }

        sl.finalize(self.scan_y);
        self.scan_y += 1;
        true
    }
}

impl Default for RasterizerScanlineAa {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanline::ScanlineU8;

    fn square(ras: &mut RasterizerScanlineAa, x1: f64, y1: f64, x2: f64, y2: f64) {
        ras.move_to_d(x1, y1);
        ras.line_to_d(x2, y1);
        ras.line_to_d(x2, y2);
        ras.line_to_d(x1, y2);
        ras.close_polygon();
    }

    /// Coverage of row `y`, pixels 0..width.
    fn row_coverage(ras: &mut RasterizerScanlineAa, y: i32, width: usize) -> Vec<u8> {
        let mut out = vec![0u8; width];
        let mut sl = ScanlineU8::new();
        if !ras.rewind_scanlines() {
            return out;
        }
        sl.reset(ras.min_x(), ras.max_x());
        while ras.sweep_scanline(&mut sl) {
            if sl.y() != y {
                continue;
            }
            for span in sl.spans() {
                for (i, &c) in sl.covers(span).iter().enumerate() {
                    let x = span.x as usize + i;
                    if x < width {
                        out[x] = c;
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_calculate_alpha_non_zero() {
        let ras = RasterizerScanlineAa::new();
        assert_eq!(ras.calculate_alpha(0), 0);
        assert_eq!(ras.calculate_alpha(256 << 9), 255);
        assert_eq!(ras.calculate_alpha(-(128 << 9)), 128);
        assert_eq!(ras.calculate_alpha(512 << 9), 255);
    }

    #[test]
    fn test_calculate_alpha_even_odd() {
        let mut ras = RasterizerScanlineAa::new();
        ras.set_filling_rule(FillingRule::EvenOdd);
        assert_eq!(ras.calculate_alpha(256 << 9), 255);
        // Winding 2 is outside under even-odd.
        assert_eq!(ras.calculate_alpha(512 << 9), 0);
        assert_eq!(ras.calculate_alpha(384 << 9), 128);
    }

    #[test]
    fn test_pixel_aligned_square() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 2.0, 2.0, 6.0, 6.0);
        let row = row_coverage(&mut ras, 3, 8);
        assert_eq!(row, vec![0, 0, 255, 255, 255, 255, 0, 0]);
    }

    #[test]
    fn test_half_pixel_edges() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 1.5, 0.0, 4.5, 4.0);
        let row = row_coverage(&mut ras, 1, 6);
        assert_eq!(row, vec![0, 128, 255, 255, 128, 0]);
    }

    #[test]
    fn test_even_odd_hole() {
        let mut ras = RasterizerScanlineAa::new();
        ras.set_filling_rule(FillingRule::EvenOdd);
        square(&mut ras, 0.0, 0.0, 8.0, 8.0);
        square(&mut ras, 2.0, 2.0, 6.0, 6.0);
        let row = row_coverage(&mut ras, 4, 8);
        assert_eq!(row, vec![255, 255, 0, 0, 0, 0, 255, 255]);
    }

    #[test]
    fn test_non_zero_overlap_is_solid() {
        let mut ras = RasterizerScanlineAa::new();
        square(&mut ras, 0.0, 0.0, 8.0, 8.0);
        square(&mut ras, 2.0, 2.0, 6.0, 6.0);
        let row = row_coverage(&mut ras, 4, 8);
        assert!(row.iter().all(|&c| c == 255));
    }

    #[test]
    fn test_clip_box_limits_rows() {
        let mut ras = RasterizerScanlineAa::new();
        ras.set_clip_box(0.0, 0.0, 10.0, 10.0);
        square(&mut ras, -100.0, -100.0, 100.0, 100.0);
        assert!(ras.rewind_scanlines());
        assert!(ras.min_y() >= 0 && ras.max_y() <= 10);
        let row = row_coverage(&mut ras, 5, 10);
        assert!(row.iter().all(|&c| c == 255));
    }

    #[test]
    fn test_add_polyline_transforms_and_closes() {
        let mut pl = Polyline::new();
        pl.move_to(1.0, 1.0);
        pl.line_to(3.0, 1.0);
        pl.line_to(3.0, 3.0);
        pl.line_to(1.0, 3.0);
        pl.end_contour(false);

        let mut ras = RasterizerScanlineAa::new();
        ras.add_polyline(&pl, &AffineTransform::scaling_uniform(2.0));
        let row = row_coverage(&mut ras, 3, 8);
        assert_eq!(row, vec![0, 0, 255, 255, 255, 255, 0, 0]);
    }

    #[test]
    fn test_non_finite_contour_is_skipped() {
        let mut pl = Polyline::new();
        pl.move_to(0.0, 0.0);
        pl.line_to(f64::INFINITY, 0.0);
        pl.line_to(0.0, 5.0);
        pl.end_contour(true);

        let mut ras = RasterizerScanlineAa::new();
        ras.add_polyline(&pl, &AffineTransform::identity());
        assert!(!ras.rewind_scanlines());
    }

    #[test]
    fn test_empty_rasterizer_does_not_rewind() {
        let mut ras = RasterizerScanlineAa::new();
        assert!(!ras.rewind_scanlines());
    }
}
