//! Renderer
//!
//! Moves coverage from a rasterizer into a Rendering Base

use crate::scan::ScanlineU8;
use crate::base::RenderingBase;
use crate::raster::RasterizerScanline;
use crate::color::Color;

/// Render a single Scanline (y-row) with Anti Aliasing
fn render_scanline_aa_solid<C: Color>(sl: &ScanlineU8,
                                      ren: &mut RenderingBase,
                                      color: &C) {
    let y = sl.y;
    for span in & sl.spans {
        ren.blend_solid_hspan(span.x, y, span.len, color, &span.covers);
    }
}

/// Render rasterized data to an image using a single color, Anti-aliased
///
/// Returns the number of rows rendered
pub fn render_scanlines_aa_solid<C: Color>(ras: &mut RasterizerScanline,
                                           sl: &mut ScanlineU8,
                                           ren: &mut RenderingBase,
                                           color: &C) -> usize {
    let mut n = 0;
    if ras.rewind_scanlines() {
        while ras.sweep_scanline(sl) {
            render_scanline_aa_solid(sl, ren, color);
            n += 1;
        }
    }
    n
}
