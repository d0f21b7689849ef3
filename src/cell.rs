//! Rasterizer Cells
//!
//! Lines are converted into cells, one per pixel they cross. Each cell
//!   carries a `cover`, the signed height of the line inside the cell, and
//!   an `area`, twice the signed area between the line and the left edge of
//!   the cell. Both are in subpixel units.

use crate::POLY_SUBPIXEL_SCALE;
use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_MASK;

use std::cmp::min;
use std::cmp::max;

/// Lines longer than this in x, in subpixels, are split in half
const DX_LIMIT: i64 = 16384 << POLY_SUBPIXEL_SHIFT;

/// Single pixel coverage cell
#[derive(Debug,Copy,Clone,PartialEq,Default)]
pub struct Cell {
    pub x: i64,
    pub y: i64,
    pub cover: i64,
    pub area: i64,
}

impl Cell {
    /// Create an empty cell at (x,y)
    pub fn at(x: i64, y: i64) -> Self {
        Cell { x, y, cover: 0, area: 0 }
    }
    pub fn equal(&self, x: i64, y: i64) -> bool {
        self.x == x && self.y == y
    }
    pub fn is_empty(&self) -> bool {
        self.cover == 0 && self.area == 0
    }
}

/// Collection of Cells
///
/// Cells are accumulated into `curr_cell` until a line leaves it, then
///   stored if they contain any coverage
#[derive(Debug)]
pub struct RasterizerCell {
    /// Completed cells, unsorted
    cells: Vec<Cell>,
    /// Cell being accumulated into
    curr_cell: Option<Cell>,
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
    /// Cells sorted by row, then by x; index 0 is row `min_y`
    sorted_y: Vec<Vec<Cell>>,
    sorted: bool,
}

impl Default for RasterizerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterizerCell {
    /// Create a new, empty set of cells
    pub fn new() -> Self {
        Self { cells: vec![],
               curr_cell: None,
               min_x: std::i64::MAX,
               min_y: std::i64::MAX,
               max_x: std::i64::MIN,
               max_y: std::i64::MIN,
               sorted_y: vec![],
               sorted: false,
        }
    }
    /// Remove all cells
    pub fn reset(&mut self) {
        self.max_x = std::i64::MIN;
        self.max_y = std::i64::MIN;
        self.min_x = std::i64::MAX;
        self.min_y = std::i64::MAX;
        self.sorted_y.clear();
        self.cells.clear();
        self.curr_cell = None;
        self.sorted = false;
    }
    /// Cells have been sorted, new lines require a reset first
    pub fn sorted(&self) -> bool {
        self.sorted
    }
    /// Number of stored cells
    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }
    /// Store the current cell if it carries any coverage
    fn add_curr_cell(&mut self) {
        if let Some(c) = self.curr_cell.take() {
            if ! c.is_empty() {
                self.cells.push(c);
            }
        }
    }
    /// Make (x,y) the current cell, storing the previous one
    fn set_curr_cell(&mut self, x: i64, y: i64) {
        match self.curr_cell {
            Some(ref c) if c.equal(x,y) => {},
            _ => {
                self.add_curr_cell();
                self.curr_cell = Some(Cell::at(x,y));
            }
        }
    }
    /// Add to the cover and area of the current cell
    fn incr(&mut self, cover: i64, area: i64) {
        if let Some(ref mut c) = self.curr_cell {
            c.cover += cover;
            c.area  += area;
        }
    }
    /// Replace the cover and area of the current cell
    fn assign(&mut self, cover: i64, area: i64) {
        if let Some(ref mut c) = self.curr_cell {
            c.cover = cover;
            c.area  = area;
        }
    }

    /// Sort cells into rows, keeping rows `0 .. height`
    pub fn sort_cells(&mut self, height: i64) {
        if self.sorted {
            return;
        }
        self.add_curr_cell();
        self.sorted = true;
        self.min_y = max(self.min_y, 0);
        self.max_y = min(self.max_y, height - 1);
        if self.cells.is_empty() || self.max_y < self.min_y {
            self.cells.clear();
            return;
        }
        let n = (self.max_y - self.min_y + 1) as usize;
        self.sorted_y = vec![vec![]; n];
        for c in self.cells.iter() {
            if c.y >= self.min_y && c.y <= self.max_y {
                self.sorted_y[(c.y - self.min_y) as usize].push(*c);
            }
        }
        for row in self.sorted_y.iter_mut() {
            row.sort_by_key(|c| c.x);
        }
        log::trace!("sort_cells: {} cells in rows {} ..= {}",
                    self.cells.len(), self.min_y, self.max_y);
    }
    /// Sorted cells for row `y`
    pub fn scanline_cells(&self, y: i64) -> &[Cell] {
        if y < self.min_y || y > self.max_y {
            return &[];
        }
        match self.sorted_y.get((y - self.min_y) as usize) {
            Some(row) => row,
            None => &[],
        }
    }

    /// Render a line within row `ey` from (x1,y1) to (x2,y2)
    ///
    /// x values are in subpixels, y1 and y2 are the subpixel fractions
    ///   within the row
    fn render_hline(&mut self, ey: i64, x1: i64, y1: i64, x2: i64, y2: i64) {
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let fx1 = x1  & POLY_SUBPIXEL_MASK;
        let fx2 = x2  & POLY_SUBPIXEL_MASK;

        // Horizontal Line, no cover
        if y1 == y2 {
            self.set_curr_cell(ex2, ey);
            return;
        }

        // Single Cell
        if ex1 == ex2 {
            self.incr(y2-y1, (fx1 + fx2) * (y2-y1));
            return;
        }

        // Adjacent Cells on Same Line
        let (mut p, first, incr, dx) = if x2-x1 < 0 {
            (fx1 * (y2-y1), 0,-1, x1-x2)
        } else {
            ((POLY_SUBPIXEL_SCALE - fx1) * (y2-y1), POLY_SUBPIXEL_SCALE, 1, x2-x1)
        };
        let mut delta = p / dx;
        let mut xmod =  p % dx;
        if xmod < 0 {
            delta -= 1;
            xmod += dx;
        }
        self.incr(delta, (fx1 + first) * delta);

        let mut ex1 = ex1 + incr;
        self.set_curr_cell(ex1, ey);
        let mut y1 = y1 + delta;

        if ex1 != ex2 {
            p = POLY_SUBPIXEL_SCALE * (y2 - y1 + delta);
            let mut lift = p / dx;
            let mut rem = p % dx;
            if rem < 0 {
                lift -= 1;
                rem += dx;
            }
            xmod -= dx;

            while ex1 != ex2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dx;
                    delta += 1;
                }
                self.incr(delta, POLY_SUBPIXEL_SCALE * delta);
                y1 += delta;
                ex1 += incr;
                self.set_curr_cell(ex1, ey);
            }
        }
        delta = y2-y1;
        self.incr(delta, (fx2 + POLY_SUBPIXEL_SCALE - first) * delta);
    }

    /// Add a line from (x1,y1) to (x2,y2), in subpixels
    pub fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        let dx = x2 - x1;
        if dx >= DX_LIMIT || dx <= -DX_LIMIT {
            let cx = (x1 + x2) >> 1;
            let cy = (y1 + y2) >> 1;
            self.line(x1, y1, cx, cy);
            self.line(cx, cy, x2, y2);
            return;
        }
        let dy = y2-y1;
        let ex1 = x1 >> POLY_SUBPIXEL_SHIFT;
        let ex2 = x2 >> POLY_SUBPIXEL_SHIFT;
        let ey1 = y1 >> POLY_SUBPIXEL_SHIFT;
        let ey2 = y2 >> POLY_SUBPIXEL_SHIFT;
        let fy1 = y1 &  POLY_SUBPIXEL_MASK;
        let fy2 = y2 &  POLY_SUBPIXEL_MASK;

        self.min_x = min(ex2, min(ex1, self.min_x));
        self.min_y = min(ey2, min(ey1, self.min_y));
        self.max_x = max(ex2, max(ex1, self.max_x));
        self.max_y = max(ey2, max(ey1, self.max_y));

        self.set_curr_cell(ex1, ey1);

        // Everything within a single row
        if ey1 == ey2 {
            self.render_hline(ey1, x1, fy1, x2, fy2);
            return;
        }

        // Vertical Line, a single cell in each row
        if dx == 0 {
            let ex = x1 >> POLY_SUBPIXEL_SHIFT;
            let two_fx = (x1 - (ex << POLY_SUBPIXEL_SHIFT)) << 1;

            let (first, incr) = if dy < 0 {
                (0, -1)
            } else {
                (POLY_SUBPIXEL_SCALE, 1)
            };
            let delta = first - fy1;
            self.incr(delta, two_fx * delta);

            let mut ey1 = ey1 + incr;
            self.set_curr_cell(ex, ey1);
            let delta = first + first - POLY_SUBPIXEL_SCALE;
            let area = two_fx * delta;
            while ey1 != ey2 {
                self.assign(delta, area);
                ey1 += incr;
                self.set_curr_cell(ex, ey1);
            }
            let delta = fy2 - POLY_SUBPIXEL_SCALE + first;
            self.incr(delta, two_fx * delta);
            return;
        }

        // Multiple rows, render a horizontal line in each
        let (p, first, incr, dy) = if dy < 0 {
            (fy1 * dx, 0, -1, -dy)
        } else {
            ((POLY_SUBPIXEL_SCALE - fy1) * dx, POLY_SUBPIXEL_SCALE, 1, dy)
        };
        let mut delta = p / dy;
        let mut xmod  = p % dy;
        if xmod < 0 {
            delta -= 1;
            xmod += dy;
        }
        let mut x_from = x1 + delta;
        self.render_hline(ey1, x1, fy1, x_from, first);
        let mut ey1 = ey1 + incr;
        self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
        if ey1 != ey2 {
            let p = POLY_SUBPIXEL_SCALE * dx;
            let mut lift = p / dy;
            let mut rem  = p % dy;
            if rem < 0 {
                lift -= 1;
                rem += dy;
            }
            xmod -= dy;
            while ey1 != ey2 {
                delta = lift;
                xmod += rem;
                if xmod >= 0 {
                    xmod -= dy;
                    delta += 1;
                }
                let x_to = x_from + delta;
                self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x_to, first);
                x_from = x_to;
                ey1 += incr;
                self.set_curr_cell(x_from >> POLY_SUBPIXEL_SHIFT, ey1);
            }
        }
        self.render_hline(ey1, x_from, POLY_SUBPIXEL_SCALE - first, x2, fy2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i64 = POLY_SUBPIXEL_SCALE;

    #[test]
    fn vertical_line_covers_each_row() {
        let mut c = RasterizerCell::new();
        // Down the middle of column 1, rows 0 and 1
        c.line(S + S/2, 0, S + S/2, 2*S);
        c.sort_cells(10);
        for y in 0 .. 2 {
            let row = c.scanline_cells(y);
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].x, 1);
            assert_eq!(row[0].cover, S);
            assert_eq!(row[0].area, S * S);
        }
        assert!(c.scanline_cells(2).is_empty());
    }
    #[test]
    fn horizontal_line_has_no_cells() {
        let mut c = RasterizerCell::new();
        c.line(0, S/2, 5*S, S/2);
        c.sort_cells(10);
        assert_eq!(c.total_cells(), 0);
    }
    #[test]
    fn closed_square_cancels() {
        // Sum of cover along every row of a closed polygon is zero
        let mut c = RasterizerCell::new();
        let pts = [(S/2, S/2), (3*S, S/2), (3*S, 3*S), (S/2, 3*S), (S/2, S/2)];
        for w in pts.windows(2) {
            c.line(w[0].0, w[0].1, w[1].0, w[1].1);
        }
        c.sort_cells(10);
        for y in 0 .. 4 {
            let cover: i64 = c.scanline_cells(y).iter().map(|c| c.cover).sum();
            assert_eq!(cover, 0);
        }
        assert_eq!(c.min_x, 0);
        assert_eq!(c.max_x, 3);
    }
    #[test]
    fn rows_outside_height_are_dropped() {
        let mut c = RasterizerCell::new();
        c.line(S/2, -2*S, S/2, 5*S);
        c.sort_cells(3);
        assert_eq!(c.min_y, 0);
        assert_eq!(c.max_y, 2);
        assert!(c.scanline_cells(-1).is_empty());
        assert!(c.scanline_cells(3).is_empty());
        assert_eq!(c.scanline_cells(1).len(), 1);
    }
    #[test]
    fn long_lines_are_split() {
        let mut c = RasterizerCell::new();
        c.line(0, 0, 40000 * S, 2 * S);
        c.sort_cells(10);
        let cover: i64 = (0 .. 2).flat_map(|y| c.scanline_cells(y).iter())
            .map(|c| c.cover).sum();
        assert_eq!(cover, 2 * S);
    }
}
