//! Anti-Grain style rasterizer for paths, text and images
//!
//! Geometry is given in model space, y-up, in model units. A
//!   [Rasterizer](renderer/struct.Rasterizer.html) draws it into an
//!   `image::RgbaImage` at `dpm` pixels per model unit.
//!
//! # How does this work
//!```text
//!   Renderer::render_path(path, style, m)
//!     path.transform(m)
//!     fill:   path.to_rasterizer(ras, dpm)    -- scale by dpm, flip y
//!               ras.add_path()
//!                 clip.line_to()              -- clip to the buffer
//!                   cell.line()               -- cells with x, cover and area
//!             render_scanlines_aa_solid(ras, sl, base, color)
//!               rewind_scanlines()            -- sort cells by row
//!               sweep_scanline()              -- cells to coverage spans
//!               blend_solid_hspan()           -- source-over into the buffer
//!     stroke: path.dash(offset, dashes)       -- if any dashes
//!             path.stroke(width, cap, join)
//!             same as fill
//!   Renderer::render_text(text, m)
//!     text.to_paths()                         -- one fill per color run
//!   Renderer::render_image(img, m)
//!     CATMULL_ROM.transform(buffer, s2d, img) -- bicubic, source-over
//!```
//!
//! # Example
//!
//!     use canvas_raster::{Rasterizer, Renderer, Path, Style, Rgba8, Transform};
//!     use canvas_raster::{LineCap, LineJoin};
//!     use image::RgbaImage;
//!
//!     let mut img = RgbaImage::new(100, 100);
//!     let mut r = Rasterizer::new(&mut img, 10.0);
//!
//!     let mut path = Path::new();
//!     path.move_to(1.0, 1.0);
//!     path.line_to(9.0, 1.0);
//!     path.line_to(5.0, 9.0);
//!     path.close_polygon();
//!
//!     let style = Style {
//!         fill_color: Rgba8::new(255, 0, 0, 255),
//!         stroke_color: Rgba8::new(0, 0, 255, 128),
//!         stroke_width: 0.5,
//!         stroke_capper: LineCap::Round,
//!         stroke_joiner: LineJoin::Round,
//!         dashes: vec![1.0, 0.5],
//!         .. Style::default()
//!     };
//!     r.render_path(&path, &style, &Transform::new());
//!     assert_ne!(img.get_pixel(50, 50)[3], 0);

pub mod base;
pub mod cell;
pub mod clip;
pub mod color;
pub mod dash;
pub mod error;
pub mod font;
pub mod math;
pub mod paths;
pub mod raster;
pub mod render;
pub mod renderer;
pub mod resample;
pub mod scan;
pub mod stroke;
pub mod style;
pub mod text;
pub mod transform;

pub use base::RenderingBase;
pub use color::{Color, Rgba8};
pub use dash::Dash;
pub use error::{Error, Result};
pub use font::{Font, FontFace};
pub use paths::{Path, PathCommand, Point, Rectangle, Vertex};
pub use raster::RasterizerScanline;
pub use render::render_scanlines_aa_solid;
pub use renderer::{Rasterizer, Renderer};
pub use resample::{Kernel, Op, CATMULL_ROM};
pub use scan::ScanlineU8;
pub use stroke::{InnerJoin, LineCap, LineJoin, Stroke};
pub use style::Style;
pub use text::Text;
pub use transform::Transform;

const POLY_SUBPIXEL_SHIFT : i64 = 8;
const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;

/// Source of Vertices
///
/// Dash and Stroke wrap a VertexSource and produce new vertices from it
pub trait VertexSource {
    /// Vertices of the source, with any conversion applied
    fn xconvert(&self) -> Vec<Vertex>;
}
