//! Renderer
//!
//! Draws paths, text and images given in model space onto an RGBA
//!   buffer. Model space is y-up in model units; the buffer is y-down in
//!   pixels with `dpm` pixels per model unit.
//!
//! # Example
//!
//!     use canvas_raster::{Rasterizer, Renderer, Path, Style, Rgba8, Transform};
//!     use image::{Rgba, RgbaImage};
//!
//!     let mut img = RgbaImage::new(20, 20);
//!     let mut r = Rasterizer::new(&mut img, 10.0);
//!     assert_eq!(r.size(), (2.0, 2.0));
//!
//!     let square = Path::rectangle(0.0, 0.0, 1.0, 1.0);
//!     let style = Style::fill(Rgba8::new(255, 0, 0, 255));
//!     r.render_path(&square, &style, &Transform::new());
//!
//!     // Lower left quarter, the top of the buffer is the top of model space
//!     assert_eq!(*img.get_pixel(0, 19), Rgba([255, 0, 0, 255]));
//!     assert_eq!(*img.get_pixel(0, 0), Rgba([0, 0, 0, 0]));

use crate::base::RenderingBase;
use crate::color::Rgba8;
use crate::paths::{Path, Point, Rectangle};
use crate::raster::RasterizerScanline;
use crate::render::render_scanlines_aa_solid;
use crate::resample::{Op, CATMULL_ROM};
use crate::scan::ScanlineU8;
use crate::style::Style;
use crate::text::Text;
use crate::transform::Transform;

use image::{GenericImageView, Rgba, RgbaImage};

/// Drawing surface for paths, text and images
pub trait Renderer {
    /// Size of the surface in model units
    fn size(&self) -> (f64, f64);
    /// Fill and stroke `path`, transformed by `m`
    fn render_path(&mut self, path: &Path, style: &Style, m: &Transform);
    /// Fill the glyphs of `text`, transformed by `m`
    fn render_text(&mut self, text: &Text, m: &Transform);
    /// Draw `img`, one model unit per image pixel before `m`, with its
    ///   lower-left corner at the model origin
    fn render_image<I>(&mut self, img: &I, m: &Transform)
        where I: GenericImageView<Pixel = Rgba<u8>>;
}

/// Renderer over a borrowed RGBA buffer
#[derive(Debug)]
pub struct Rasterizer<'a> {
    img: &'a mut RgbaImage,
    /// Pixels per model unit
    dpm: f64,
}

impl<'a> Rasterizer<'a> {
    /// Create a Rasterizer drawing into `img` at `dpm` pixels per model unit
    ///
    /// `dpm` must be positive
    pub fn new(img: &'a mut RgbaImage, dpm: f64) -> Self {
        debug_assert!(dpm > 0.0, "dpm must be positive, got {}", dpm);
        Self { img, dpm }
    }
    /// Pixels per model unit
    pub fn dpm(&self) -> f64 {
        self.dpm
    }
    /// Target buffer
    pub fn image(&self) -> &RgbaImage {
        &*self.img
    }
    /// Rasterize a model space path and composite `color` through its
    ///   coverage
    fn fill(&mut self, path: &Path, color: Rgba8) {
        let (w, h) = self.img.dimensions();
        let mut ras = RasterizerScanline::new(w as usize, h as usize);
        path.to_rasterizer(&mut ras, self.dpm);
        let mut sl = ScanlineU8::new();
        let mut base = RenderingBase::new(self.img);
        let rows = render_scanlines_aa_solid(&mut ras, &mut sl, &mut base, &color);
        log::trace!("fill: {:?} over {} rows", color, rows);
    }
}

impl<'a> Renderer for Rasterizer<'a> {
    fn size(&self) -> (f64, f64) {
        let (w, h) = self.img.dimensions();
        (f64::from(w) / self.dpm, f64::from(h) / self.dpm)
    }

    fn render_path(&mut self, path: &Path, style: &Style, m: &Transform) {
        log::debug!("render_path: {} vertices", path.vertices().len());
        let path = path.transform(m);
        if style.has_fill() {
            self.fill(&path, style.fill_color);
        } else {
            log::trace!("render_path: transparent fill skipped");
        }
        if ! style.has_stroke() {
            log::trace!("render_path: stroke skipped, color {:?} width {}",
                        style.stroke_color, style.stroke_width);
            return;
        }
        let path = if style.dashes.is_empty() {
            path
        } else {
            path.dash(style.dash_offset, &style.dashes)
        };
        let path = path.stroke(style.stroke_width, style.stroke_capper, style.stroke_joiner);
        self.fill(&path, style.stroke_color);
    }

    fn render_text(&mut self, text: &Text, m: &Transform) {
        let (paths, colors) = text.to_paths();
        log::debug!("render_text: {} paths", paths.len());
        for (path, color) in paths.iter().zip(colors) {
            let style = Style { fill_color: color, .. Style::default() };
            self.render_path(path, &style, m);
        }
    }

    fn render_image<I>(&mut self, img: &I, m: &Transform)
        where I: GenericImageView<Pixel = Rgba<u8>>
    {
        let (sw, sh) = img.dimensions();
        log::debug!("render_image: {}x{} source", sw, sh);
        // Top-left of the image, in pixels
        let origin = m.dot(Point::new(0.0, f64::from(sh))) * self.dpm;
        let m = m.scaled(self.dpm, self.dpm);
        let h = f64::from(self.img.height());
        // Source rows grow down, model y grows up
        let s2d = Transform::from_parts( m.sx,  -m.shx, origin.x,
                                        -m.shy,  m.sy,  h - origin.y);
        CATMULL_ROM.transform(self.img, &s2d, img, Rectangle::new(0, 0, sw, sh), Op::Over);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_in_model_units() {
        let mut img = RgbaImage::new(30, 20);
        let r = Rasterizer::new(&mut img, 10.0);
        assert_eq!(r.size(), (3.0, 2.0));
        assert_eq!(r.dpm(), 10.0);
        assert_eq!(r.image().dimensions(), (30, 20));
    }
    #[test]
    fn transform_is_applied() {
        let mut img = RgbaImage::new(4, 4);
        let mut r = Rasterizer::new(&mut img, 1.0);
        let style = Style::fill(Rgba8::white());
        r.render_path(&Path::rectangle(0.0, 0.0, 1.0, 1.0), &style,
                      &Transform::new_translate(3.0, 3.0));
        assert_eq!(*img.get_pixel(3, 0), Rgba([255, 255, 255, 255]));
        assert_eq!(img.pixels().filter(|p| p[3] != 0).count(), 1);
    }
}
