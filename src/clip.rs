//! Clipping Region
//!
//! Lines are clipped to the device box before they reach the cells. Parts
//!   above or below the box are removed. Parts to the left or right are
//!   moved onto the box edge as vertical lines, so the cover they carry
//!   still reaches the pixels to their right.

use crate::cell::RasterizerCell;
use crate::paths::Rectangle;

/// Inside Region
///
/// See [Liang Barsky](https://en.wikipedia.org/wiki/Liang-Barsky_algorithm)
pub const INSIDE : u8 = 0b0000;
/// Left of Region
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region
pub const RIGHT  : u8 = 0b0000_0010;
/// Below Region, smaller y
pub const BOTTOM : u8 = 0b0000_0100;
/// Above Region, larger y
pub const TOP    : u8 = 0b0000_1000;

/// Location of a point relative to a rectangle
///
/// Returned is an a u8 made up of the following bits:
/// - [INSIDE](constant.INSIDE.html)
/// - [LEFT](constant.LEFT.html)
/// - [RIGHT](constant.RIGHT.html)
/// - [BOTTOM](constant.BOTTOM.html)
/// - [TOP](constant.TOP.html)
pub fn clip_flags(x: i64, y: i64, b: &Rectangle<i64>) -> u8 {
    clip_flags_x(x, b) | clip_flags_y(y, b)
}
fn clip_flags_x(x: i64, b: &Rectangle<i64>) -> u8 {
    let mut code = INSIDE;
    if x < b.x1 { code |= LEFT; }
    if x > b.x2 { code |= RIGHT; }
    code
}
fn clip_flags_y(y: i64, b: &Rectangle<i64>) -> u8 {
    let mut code = INSIDE;
    if y < b.y1 { code |= BOTTOM; }
    if y > b.y2 { code |= TOP; }
    code
}

fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let (a,b,c) = (a as f64, b as f64, c as f64);
    (a * b / c).round() as i64
}

/// Clip Region
///
/// Clipping for Rasterizers, coordinates are in subpixels
#[derive(Debug,Default)]
pub struct Clip {
    /// Current x Point
    x1: i64,
    /// Current y Point
    y1: i64,
    /// Rectangle to clip on
    clip_box: Option<Rectangle<i64>>,
    /// Current clip flag for point (x1,y1)
    clip_flag: u8,
}

impl Clip {
    /// Create new Clipping region, clipping is off
    pub fn new() -> Self {
        Self {x1: 0, y1: 0,
              clip_box: None,
              clip_flag: INSIDE }
    }
    /// Define the clipping region
    pub fn clip_box(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        self.clip_box = Some( Rectangle::new(x1, y1, x2, y2) );
    }
    /// Clip a line along the top and bottom of the region
    #[allow(clippy::too_many_arguments)]
    fn line_clip_y(ras: &mut RasterizerCell, b: &Rectangle<i64>,
                   x1: i64, y1: i64,
                   x2: i64, y2: i64,
                   f1: u8, f2: u8) {
        let f1 = f1 & (TOP|BOTTOM);
        let f2 = f2 & (TOP|BOTTOM);
        if f1 == INSIDE && f2 == INSIDE {
            ras.line(x1,y1,x2,y2);
            return;
        }
        // Both points above or below clip box
        if f1 == f2 {
            return;
        }
        let (mut tx1, mut ty1, mut tx2, mut ty2) = (x1,y1,x2,y2);
        if f1 & BOTTOM != 0 {
            tx1 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
            ty1 = b.y1;
        }
        if f1 & TOP != 0 {
            tx1 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
            ty1 = b.y2;
        }
        if f2 & BOTTOM != 0 {
            tx2 = x1 + mul_div(b.y1-y1, x2-x1, y2-y1);
            ty2 = b.y1;
        }
        if f2 & TOP != 0 {
            tx2 = x1 + mul_div(b.y2-y1, x2-x1, y2-y1);
            ty2 = b.y2;
        }
        ras.line(tx1,ty1,tx2,ty2);
    }

    /// Draw a line from the current point to (x2,y2) into a RasterizerCell
    ///
    /// Final point (x2,y2) becomes the current point
    pub fn line_to(&mut self, ras: &mut RasterizerCell, x2: i64, y2: i64) {
        let b = match self.clip_box {
            Some(b) => b,
            None => {
                ras.line(self.x1, self.y1, x2, y2);
                self.x1 = x2;
                self.y1 = y2;
                return;
            }
        };
        let f2 = clip_flags(x2, y2, &b);
        let (x1,y1,f1) = (self.x1, self.y1, self.clip_flag);
        self.x1 = x2;
        self.y1 = y2;
        self.clip_flag = f2;

        // Both points above or below clip box
        let fy1 = (TOP | BOTTOM) & f1;
        let fy2 = (TOP | BOTTOM) & f2;
        if fy1 != INSIDE && fy1 == fy2 {
            return;
        }
        let y_at = |x: i64| y1 + mul_div(x-x1, y2-y1, x2-x1);
        match (f1 & (LEFT|RIGHT), f2 & (LEFT|RIGHT)) {
            (INSIDE,INSIDE) => Self::line_clip_y(ras, &b, x1, y1, x2, y2, f1, f2),
            (INSIDE,RIGHT) => {
                let y3 = y_at(b.x2);
                let f3 = clip_flags_y(y3, &b);
                Self::line_clip_y(ras, &b, x1,   y1, b.x2, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x2, y3, b.x2, y2, f3, f2);
            },
            (RIGHT,INSIDE) => {
                let y3 = y_at(b.x2);
                let f3 = clip_flags_y(y3, &b);
                Self::line_clip_y(ras, &b, b.x2, y1, b.x2, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x2, y3,   x2, y2, f3, f2);
            },
            (INSIDE,LEFT) => {
                let y3 = y_at(b.x1);
                let f3 = clip_flags_y(y3, &b);
                Self::line_clip_y(ras, &b, x1,   y1, b.x1, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x1, y3, b.x1, y2, f3, f2);
            },
            (LEFT,INSIDE) => {
                let y3 = y_at(b.x1);
                let f3 = clip_flags_y(y3, &b);
                Self::line_clip_y(ras, &b, b.x1, y1, b.x1, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x1, y3,   x2, y2, f3, f2);
            },
            (RIGHT,LEFT) => {
                let y3 = y_at(b.x2);
                let y4 = y_at(b.x1);
                let f3 = clip_flags_y(y3, &b);
                let f4 = clip_flags_y(y4, &b);
                Self::line_clip_y(ras, &b, b.x2, y1, b.x2, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x2, y3, b.x1, y4, f3, f4);
                Self::line_clip_y(ras, &b, b.x1, y4, b.x1, y2, f4, f2);
            },
            (LEFT,RIGHT) => {
                let y3 = y_at(b.x1);
                let y4 = y_at(b.x2);
                let f3 = clip_flags_y(y3, &b);
                let f4 = clip_flags_y(y4, &b);
                Self::line_clip_y(ras, &b, b.x1, y1, b.x1, y3, f1, f3);
                Self::line_clip_y(ras, &b, b.x1, y3, b.x2, y4, f3, f4);
                Self::line_clip_y(ras, &b, b.x2, y4, b.x2, y2, f4, f2);
            },
            (LEFT,LEFT)   => Self::line_clip_y(ras, &b, b.x1, y1, b.x1, y2, f1, f2),
            (RIGHT,RIGHT) => Self::line_clip_y(ras, &b, b.x2, y1, b.x2, y2, f1, f2),
            // LEFT and RIGHT are never both set
            (_,_) => {},
        }
    }
    /// Move to point (x2,y2)
    pub fn move_to(&mut self, x2: i64, y2: i64) {
        self.x1 = x2;
        self.y1 = y2;
        if let Some(ref b) = self.clip_box {
            self.clip_flag = clip_flags(x2, y2, b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::POLY_SUBPIXEL_SCALE as S;

    fn clipped() -> Clip {
        let mut c = Clip::new();
        c.clip_box(0, 0, 4 * S, 4 * S);
        c
    }

    #[test]
    fn flags() {
        let b = Rectangle::new(0, 0, 10, 10);
        assert_eq!(clip_flags(5, 5, &b), INSIDE);
        assert_eq!(clip_flags(-1, 5, &b), LEFT);
        assert_eq!(clip_flags(11, 11, &b), RIGHT | TOP);
        assert_eq!(clip_flags(5, -3, &b), BOTTOM);
    }
    #[test]
    fn above_is_removed() {
        let mut ras = RasterizerCell::new();
        let mut c = clipped();
        c.move_to(S, 10 * S);
        c.line_to(&mut ras, 3 * S, 12 * S);
        ras.sort_cells(4);
        assert_eq!(ras.total_cells(), 0);
    }
    #[test]
    fn left_becomes_vertical_edge() {
        let mut ras = RasterizerCell::new();
        let mut c = clipped();
        c.move_to(-100 * S, 0);
        c.line_to(&mut ras, -100 * S, 2 * S);
        ras.sort_cells(4);
        for y in 0 .. 2 {
            let row = ras.scanline_cells(y);
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].x, 0);
            assert_eq!(row[0].cover, S);
        }
        assert_eq!(ras.min_x, 0);
    }
    #[test]
    fn crossing_keeps_cover() {
        let mut ras = RasterizerCell::new();
        let mut c = clipped();
        c.move_to(-2 * S, -2 * S);
        c.line_to(&mut ras, 6 * S, 6 * S);
        ras.sort_cells(4);
        for y in 0 .. 4 {
            let cover: i64 = ras.scanline_cells(y).iter().map(|c| c.cover).sum();
            assert_eq!(cover, S, "row {}", y);
        }
    }
}
