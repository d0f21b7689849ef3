//! Rasterizer
//!
//! Converts vertices, in device pixels, into cells and sweeps the cells
//!   into scanlines of coverage values

use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_SCALE;

use crate::clip::Clip;
use crate::scan::ScanlineU8;
use crate::cell::RasterizerCell;
use crate::paths::PathCommand;

use crate::VertexSource;

use std::cmp::min;
use std::cmp::max;

/// Convert a device coordinate to subpixels
fn upscale(v: f64) -> i64 {
    (v * POLY_SUBPIXEL_SCALE as f64).round() as i64
}

#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PathStatus {
    Initial,
    Closed,
    MoveTo,
    LineTo
}
impl Default for PathStatus {
    fn default() -> PathStatus {
        PathStatus::Initial
    }
}

/// Anti-aliased scanline rasterizer for a fixed device size
///
/// Coverage is accumulated non-zero style, the absolute value of the
///   winding area is clamped to full coverage
///
/// # Example
///
///     use canvas_raster::{Path, RasterizerScanline, ScanlineU8};
///
///     let mut ras = RasterizerScanline::new(10, 10);
///     let path = Path::rectangle(0.0, 0.0, 5.0, 5.0);
///     path.to_rasterizer(&mut ras, 1.0);
///
///     let mut sl = ScanlineU8::new();
///     let mut rows = 0;
///     if ras.rewind_scanlines() {
///         while ras.sweep_scanline(&mut sl) {
///             assert_eq!(sl.spans[0].x, 0);
///             assert_eq!(sl.spans[0].len, 5);
///             rows += 1;
///         }
///     }
///     assert_eq!(rows, 5);
#[derive(Debug)]
pub struct RasterizerScanline {
    clipper: Clip,
    outline: RasterizerCell,
    status: PathStatus,
    /// Start of the current sub-path, subpixels
    x0: i64,
    y0: i64,
    scan_y: i64,
    width: usize,
    height: usize,
}

impl RasterizerScanline {
    /// Create a rasterizer for a device of `width` x `height` pixels
    pub fn new(width: usize, height: usize) -> Self {
        let mut clipper = Clip::new();
        clipper.clip_box(0, 0,
                         width as i64 * POLY_SUBPIXEL_SCALE,
                         height as i64 * POLY_SUBPIXEL_SCALE);
        Self { clipper,
               status: PathStatus::Initial,
               outline: RasterizerCell::new(),
               x0: 0, y0: 0, scan_y: 0,
               width, height,
        }
    }
    /// Device width in pixels
    pub fn width(&self) -> usize {
        self.width
    }
    /// Device height in pixels
    pub fn height(&self) -> usize {
        self.height
    }
    /// Remove all cells
    pub fn reset(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
    }
    /// Minimum x cell, pixels
    pub fn min_x(&self) -> i64 {
        self.outline.min_x
    }
    /// Maximum x cell, pixels
    pub fn max_x(&self) -> i64 {
        self.outline.max_x
    }
    /// Add a path in device coordinates
    ///
    /// Curve vertices are treated as line end points, flatten first
    pub fn add_path<VS: VertexSource>(&mut self, path: &VS) {
        if self.outline.sorted() {
            self.reset();
        }
        for v in path.xconvert() {
            match v.cmd {
                PathCommand::MoveTo => self.move_to_d(v.x, v.y),
                PathCommand::Close  => self.close_polygon(),
                PathCommand::LineTo |
                PathCommand::Curve3 |
                PathCommand::Curve4 => self.line_to_d(v.x, v.y),
            }
        }
    }
    /// Start a new polygon at (x,y), closing the previous one
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.x0 = upscale( x );
        self.y0 = upscale( y );
        self.clipper.move_to(self.x0, self.y0);
        self.status = PathStatus::MoveTo;
    }
    /// Add an edge from the current point to (x,y)
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let x = upscale( x );
        let y = upscale( y );
        self.clipper.line_to(&mut self.outline, x,y);
        self.status = PathStatus::LineTo;
    }
    /// Close the current polygon with an edge back to its start
    pub fn close_polygon(&mut self) {
        if self.status == PathStatus::LineTo {
            self.clipper.line_to(&mut self.outline, self.x0, self.y0);
            self.status = PathStatus::Closed;
        }
    }
    /// Prepare for sweeping, returns false if there is nothing to draw
    ///
    /// Open polygons are closed implicitly
    pub fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells(self.height as i64);
        if self.outline.total_cells() == 0 {
            false
        } else {
            self.scan_y = self.outline.min_y;
            true
        }
    }
    /// Fill `sl` with the next row containing coverage
    ///
    /// Returns false once all rows have been swept
    pub fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        loop {
            if self.scan_y > self.outline.max_y {
                return false;
            }
            sl.reset_spans();
            let cells = self.outline.scanline_cells( self.scan_y );
            let mut cover = 0;
            let mut i = 0;
            while i < cells.len() {
                let mut x = cells[i].x;
                let mut area = cells[i].area;
                cover += cells[i].cover;
                i += 1;
                // Accumulate all cells with the same x
                while i < cells.len() && cells[i].x == x {
                    area  += cells[i].area;
                    cover += cells[i].cover;
                    i += 1;
                }
                if area != 0 {
                    let alpha = calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }
                if i < cells.len() && cells[i].x > x {
                    let alpha = calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha > 0 {
                        sl.add_span(x, cells[i].x - x, alpha);
                    }
                }
            }
            if sl.num_spans() != 0 {
                break;
            }
            self.scan_y += 1;
        }
        sl.finalize(self.scan_y);
        log::trace!("sweep_scanline: y {} spans {}", self.scan_y, sl.num_spans());
        self.scan_y += 1;
        true
    }
}

/// Coverage [0,255] from twice the accumulated area, in subpixels squared
///
/// Winding direction is ignored; overlapping areas saturate
pub fn calculate_alpha(area: i64) -> u64 {
    let aa_shift  = 8;
    let aa_mask   = (1 << aa_shift) - 1;
    let cover = area >> (POLY_SUBPIXEL_SHIFT*2 + 1 - aa_shift);
    max(0, min(cover.abs(), aa_mask)) as u64
}
