//! Edge-to-cell conversion for the anti-aliased scanline rasterizer.
//!
//! Edges arrive in 24.8 fixed point. Every pixel an edge touches gets a
//! cell holding the edge's vertical extent inside the pixel (`cover`) and
//! twice the signed area left of the edge (`area`). The sweep later turns
//! these into per-pixel coverage by accumulating `cover` along each row.

use crate::basics::{POLY_SUBPIXEL_MASK, POLY_SUBPIXEL_SCALE, POLY_SUBPIXEL_SHIFT};

const SUBPIXEL_SCALE: i32 = POLY_SUBPIXEL_SCALE as i32;
const SUBPIXEL_MASK: i32 = POLY_SUBPIXEL_MASK as i32;

/// Horizontal extent beyond which an edge is split before rendering, so
/// that the per-row arithmetic stays inside `i32`.
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub cover: i32,
    pub area: i32,
}

impl Cell {
    const EMPTY: Cell = Cell {
        x: i32::MAX,
        y: i32::MAX,
        cover: 0,
        area: 0,
    };

    #[inline]
    fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RowIndex {
    start: u32,
    num: u32,
}

/// Cell accumulator with a per-row sorted index.
///
/// Cells live in one flat `Vec`; after [`sort_cells`](Self::sort_cells)
/// each row can be read back in ascending `x` order through
/// [`row`](Self::row). All buffers keep their capacity across `reset`.
pub struct CellRasterizer {
    cells: Vec<Cell>,
    sorted_cells: Vec<u32>,
    rows: Vec<RowIndex>,
    curr_cell: Cell,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    sorted: bool,
}

impl CellRasterizer {
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            sorted_cells: Vec::new(),
            rows: Vec::new(),
            curr_cell: Cell::EMPTY,
            min_x: i32::MAX,
            min_y: i32::MAX,
            max_x: i32::MIN,
            max_y: i32::MIN,
            sorted: false,
        }
    }

    pub fn reset(&mut self) {
        self.cells.clear();
        self.sorted_cells.clear();
        self.rows.clear();
        self.curr_cell = Cell::EMPTY;
        self.min_x = i32::MAX;
        self.min_y = i32::MAX;
        self.max_x = i32::MIN;
        self.max_y = i32::MIN;
        self.sorted = false;
    }

    #[inline]
    pub fn min_x(&self) -> i32 {
        self.min_x
    }
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.min_y
    }
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.max_x
    }
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.max_y
    }

    #[inline]
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn sorted(&self) -> bool {
        self.sorted
    }

    /// Cells of row `y` in ascending `x`. Empty outside the covered rows or
    /// before sorting.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Cell> + '_ {
        let indices: &[u32] = if self.sorted && y >= self.min_y && y <= self.max_y {
            let r = self.rows[(y - self.min_y) as usize];
            &self.sorted_cells[r.start as usize..(r.start + r.num) as usize]
        } else {
            &[]
        };
        indices.iter().map(move |&i| &self.cells[i as usize])
    }

    #[inline]
    fn add_curr_cell(&mut self) {
        if self.curr_cell.area | self.curr_cell.cover != 0 {
            self.cells.push(self.curr_cell);
        }
    }

    #[inline]
    fn set_curr_cell(&mut self, x: i32, y: i32) {
        if !self.curr_cell.is_at(x, y) {
            self.add_curr_cell();
            self.curr_cell = Cell {
                x,
                y,
                cover: 0,
                area: 0,
            };
        }
    }

    /// Render the part of an edge that lies inside row `ey`. `x1`/`x2` are
    /// 24.8 fixed point; `y1`/`y2` are the fractional heights inside the row.
    fn render_hline(&mut self, ey: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1 & SUBPIXEL_MASK;
        let fx2 = x2 & SUBPIXEL_MASK;

        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        if ex1 == ex2 {
            let delta = y2 - y1;
            self.curr_cell.cover += delta;
            self.curr_cell.area += (fx1 + fx2) * delta;
            return;
        }

        // The edge crosses several cells of this row.
        let mut p = (SUBPIXEL_SCALE - fx1) as i64 * (y2 - y1) as i64;
        let mut first = SUBPIXEL_SCALE;
        let mut incr = 1;
        let mut dx = x2 as i64 - x1 as i64;

        if dx < 0 {
            p = fx1 as i64 * (y2 - y1) as i64;
            first = 0;
            incr = -1;
            dx = -dx;
        }

        let mut delta = p.div_euclid(dx) as i32;
        let mut modulo = p.rem_euclid(dx);

        self.curr_cell.cover += delta;
        self.curr_cell.area += (fx1 + first) * delta;

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = SUBPIXEL_SCALE as i64 * (y2 - y1 + delta) as i64;
            let lift = p.div_euclid(dx) as i32;
            let rem = p.rem_euclid(dx);
            modulo -= dx;

            while ex1 != ex2 {
                delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dx;
                    delta += 1;
                }
                self.curr_cell.cover += delta;
                self.curr_cell.area += SUBPIXEL_SCALE * delta;
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        delta = y2 - y1;
        self.curr_cell.cover += delta;
        self.curr_cell.area += (fx2 + SUBPIXEL_SCALE - first) * delta;
    }

    /// Add the edge (x1, y1) → (x2, y2), 24.8 fixed point.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let dx = x2 as i64 - x1 as i64;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = ((x1 as i64 + x2 as i64) >> 1) as i32;
            let cy = ((y1 as i64 + y2 as i64) >> 1) as i32;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }

        let dy = y2 as i64 - y1 as i64;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let mut ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 & SUBPIXEL_MASK;
        let fy2 = y2 & SUBPIXEL_MASK;

        self.min_x = self.min_x.min(ex1).min(ex2);
        self.max_x = self.max_x.max(ex1).max(ex2);
        self.min_y = self.min_y.min(ey1).min(ey2);
        self.max_y = self.max_y.max(ey1).max(ey2);

        self.set_curr_cell(ex1, ey1);

        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        let mut incr = 1;

        // Vertical edge: one cell per row, no hline walk.
        if dx == 0 {
            let two_fx = (x1 - (ex1 << POLY_SUBPIXEL_SHIFT)) << 1;
            let mut first = SUBPIXEL_SCALE;
            if dy < 0 {
                first = 0;
                incr = -1;
            }

            let mut delta = first - fy1;
            self.curr_cell.cover += delta;
            self.curr_cell.area += two_fx * delta;

            ey1 += incr;
            self.set_curr_cell(ex1, ey1);

            delta = first + first - SUBPIXEL_SCALE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.curr_cell.cover = delta;
                self.curr_cell.area = area;
                ey1 += incr;
                self.set_curr_cell(ex1, ey1);
            }
            delta = fy2 - SUBPIXEL_SCALE + first;
            self.curr_cell.cover += delta;
            self.curr_cell.area += two_fx * delta;
            return;
        }

        // General case: walk row by row.
        let mut p = (SUBPIXEL_SCALE - fy1) as i64 * dx;
        let mut first = SUBPIXEL_SCALE;
        let mut dy_abs = dy;
        if dy < 0 {
            p = fy1 as i64 * dx;
            first = 0;
            incr = -1;
            dy_abs = -dy;
        }

        let delta = p.div_euclid(dy_abs) as i32;
        let mut modulo = p.rem_euclid(dy_abs);

        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);

        ey1 += incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);

        if ey1 != ey2 {
            p = SUBPIXEL_SCALE as i64 * dx;
            let lift = p.div_euclid(dy_abs) as i32;
            let rem = p.rem_euclid(dy_abs);
            modulo -= dy_abs;

            while ey1 != ey2 {
                let mut delta = lift;
                modulo += rem;
                if modulo >= 0 {
                    modulo -= dy_abs;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;

                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, SUBPIXEL_SCALE - first, x2, fy2);
    }

    /// Flush the pending cell and build the per-row index: a counting sort
    /// by `y`, then a sort by `x` inside each row.
    pub fn sort_cells(&mut self) {
        if self.sorted {
            return;
        }
        self.add_curr_cell();
        self.curr_cell = Cell::EMPTY;

        if self.cells.is_empty() {
            return;
        }

        self.sorted_cells.clear();
        self.sorted_cells.resize(self.cells.len(), 0);
        self.rows.clear();
        self.rows
            .resize((self.max_y - self.min_y + 1) as usize, RowIndex::default());

        for cell in &self.cells {
            self.rows[(cell.y - self.min_y) as usize].start += 1;
        }

        let mut start = 0u32;
        for r in &mut self.rows {
            let count = r.start;
            r.start = start;
            start += count;
        }

        for (i, cell) in self.cells.iter().enumerate() {
            let r = &mut self.rows[(cell.y - self.min_y) as usize];
            self.sorted_cells[(r.start + r.num) as usize] = i as u32;
            r.num += 1;
        }

        let cells = &self.cells;
        for r in &self.rows {
            if r.num > 1 {
                let slice = &mut self.sorted_cells[r.start as usize..(r.start + r.num) as usize];
                slice.sort_unstable_by_key(|&i| cells[i as usize].x);
            }
        }
        self.sorted = true;
    }
}

impl Default for CellRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i32 = SUBPIXEL_SCALE;

    fn total_cover(ras: &CellRasterizer) -> i32 {
        ras.cells.iter().map(|c| c.cover).sum()
    }

    #[test]
    fn test_new_is_empty() {
        let ras = CellRasterizer::new();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
        assert_eq!(ras.min_x(), i32::MAX);
        assert_eq!(ras.max_y(), i32::MIN);
    }

    #[test]
    fn test_reset_clears_cells() {
        let mut ras = CellRasterizer::new();
        ras.line(0, 0, 3 * S, 3 * S);
        ras.sort_cells();
        assert!(ras.total_cells() > 0);
        ras.reset();
        assert_eq!(ras.total_cells(), 0);
        assert!(!ras.sorted());
        assert_eq!(ras.row(0).count(), 0);
    }

    #[test]
    fn test_horizontal_edge_has_no_coverage() {
        let mut ras = CellRasterizer::new();
        ras.line(0, 10 * S, 20 * S, 10 * S);
        ras.sort_cells();
        assert_eq!(ras.total_cells(), 0);
    }

    #[test]
    fn test_vertical_edge_cover_per_row() {
        let mut ras = CellRasterizer::new();
        let x = 10 * S + S / 2;
        ras.line(x, 5 * S, x, 8 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 3 * S);
        for y in 5..8 {
            let row: Vec<_> = ras.row(y).collect();
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].x, 10);
            assert_eq!(row[0].cover, S);
            // Edge at x = 10.5: area = 2 · fx · cover.
            assert_eq!(row[0].area, 2 * (S / 2) * S);
        }
    }

    #[test]
    fn test_upward_edge_has_negative_cover() {
        let mut ras = CellRasterizer::new();
        ras.line(4 * S, 6 * S, 4 * S, 2 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), -4 * S);
    }

    #[test]
    fn test_diagonal_cover_sum_and_bounds() {
        let mut ras = CellRasterizer::new();
        ras.line(0, 0, 5 * S, 5 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 5 * S);
        assert_eq!((ras.min_x(), ras.min_y()), (0, 0));
        assert_eq!((ras.max_x(), ras.max_y()), (5, 5));
    }

    #[test]
    fn test_rows_sorted_by_x() {
        let mut ras = CellRasterizer::new();
        ras.line(10 * S, 0, 0, S);
        ras.line(0, S, 10 * S, 2 * S);
        ras.sort_cells();
        for y in ras.min_y()..=ras.max_y() {
            let xs: Vec<i32> = ras.row(y).map(|c| c.x).collect();
            assert!(xs.windows(2).all(|w| w[0] <= w[1]));
            assert!(ras.row(y).all(|c| c.y == y));
        }
    }

    #[test]
    fn test_sort_is_idempotent() {
        let mut ras = CellRasterizer::new();
        ras.line(5 * S, 0, 5 * S, 3 * S);
        ras.sort_cells();
        let n = ras.total_cells();
        ras.sort_cells();
        assert_eq!(ras.total_cells(), n);
    }

    #[test]
    fn test_closed_triangle_cover_cancels() {
        let mut ras = CellRasterizer::new();
        ras.line(10 * S, 10 * S, 20 * S, 10 * S);
        ras.line(20 * S, 10 * S, 15 * S, 20 * S);
        ras.line(15 * S, 20 * S, 10 * S, 10 * S);
        ras.sort_cells();
        assert_eq!(total_cover(&ras), 0);
        assert_eq!(ras.min_y(), 10);
        assert_eq!(ras.max_y(), 20);
    }

    #[test]
    fn test_wide_edge_is_split() {
        let mut ras = CellRasterizer::new();
        ras.line(0, 0, 20000 * S, S);
        ras.sort_cells();
        assert!(ras.total_cells() > 0);
        assert_eq!(total_cover(&ras), S);
    }
}
