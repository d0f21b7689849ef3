//! Fonts
//!
//! Glyph outlines are read with `ab_glyph` and converted to Paths in model
//!   units. Font units are y-up like model space, so no flip is needed.

use crate::color::Rgba8;
use crate::error::Result;
use crate::paths::Path;

use ab_glyph::{Font as _, FontArc, GlyphId, OutlineCurve};

use std::path::Path as FilePath;

/// Loaded font data
#[derive(Clone)]
pub struct Font {
    font: FontArc,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("units_per_em", &self.units_per_em())
            .finish()
    }
}

impl Font {
    /// Parse a TrueType or OpenType font
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font { font: FontArc::try_from_vec(data)? };
        log::debug!("font loaded, {} units per em", font.units_per_em());
        Ok(font)
    }
    /// Read and parse a font file
    pub fn from_file<P: AsRef<FilePath>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }
    /// Font units per em, 1000 if the font does not say
    pub fn units_per_em(&self) -> f64 {
        f64::from(self.font.units_per_em().unwrap_or(1000.0))
    }
    /// Font at `size` model units per em, drawn with `color`
    pub fn face(&self, size: f64, color: Rgba8) -> FontFace {
        FontFace { font: self.clone(), size, color }
    }
}

/// Font at a specific size and color
#[derive(Debug,Clone)]
pub struct FontFace {
    font: Font,
    /// Size in model units per em
    pub size: f64,
    pub color: Rgba8,
}

impl FontFace {
    /// Model units per font unit
    fn scale(&self) -> f64 {
        self.size / self.font.units_per_em()
    }
    fn glyph_id(&self, ch: char) -> GlyphId {
        self.font.font.glyph_id(ch)
    }
    /// Horizontal advance of `ch`, in model units
    pub fn advance(&self, ch: char) -> f64 {
        let id = self.glyph_id(ch);
        f64::from(self.font.font.h_advance_unscaled(id)) * self.scale()
    }
    /// Kerning between `a` and `b`, in model units
    pub fn kern(&self, a: char, b: char) -> f64 {
        let (a, b) = (self.glyph_id(a), self.glyph_id(b));
        f64::from(self.font.font.kern_unscaled(a, b)) * self.scale()
    }
    /// Outline of `ch` with its origin at (x,y) and its advance
    ///
    /// Glyphs without an outline, like a space, give an empty path
    pub fn glyph_path(&self, ch: char, x: f64, y: f64) -> (Path, f64) {
        let id = self.glyph_id(ch);
        let advance = self.advance(ch);
        let mut path = Path::new();
        let outline = match self.font.font.outline(id) {
            Some(outline) => outline,
            None => return (path, advance),
        };
        let s = self.scale();
        let pt = |p: ab_glyph::Point| (x + f64::from(p.x) * s, y + f64::from(p.y) * s);
        let mut last : Option<(f64,f64)> = None;
        for curve in &outline.curves {
            let start = match curve {
                OutlineCurve::Line(p0, _) |
                OutlineCurve::Quad(p0, _, _) |
                OutlineCurve::Cubic(p0, _, _, _) => pt(*p0),
            };
            // A curve not starting at the previous end begins a new contour
            if last != Some(start) {
                path.close_polygon();
                path.move_to(start.0, start.1);
            }
            let end = match curve {
                OutlineCurve::Line(_, p1) => {
                    let p1 = pt(*p1);
                    path.line_to(p1.0, p1.1);
                    p1
                },
                OutlineCurve::Quad(_, c, p1) => {
                    let (c, p1) = (pt(*c), pt(*p1));
                    path.quad_to(c.0, c.1, p1.0, p1.1);
                    p1
                },
                OutlineCurve::Cubic(_, c1, c2, p1) => {
                    let (c1, c2, p1) = (pt(*c1), pt(*c2), pt(*p1));
                    path.cube_to(c1.0, c1.1, c2.0, c2.1, p1.0, p1.1);
                    p1
                },
            };
            last = Some(end);
        }
        path.close_polygon();
        (path, advance)
    }
}
