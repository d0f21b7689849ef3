//! Text
//!
//! Text is kept as colored glyph outlines in model units, in the order
//!   they are painted

use crate::color::Rgba8;
use crate::font::FontFace;
use crate::paths::Path;

#[derive(Debug,Clone,PartialEq)]
struct Span {
    path: Path,
    color: Rgba8,
}

/// Colored glyph outlines
#[derive(Debug,Default,Clone)]
pub struct Text {
    spans: Vec<Span>,
}

impl Text {
    /// Create empty text
    pub fn new() -> Self {
        Self { spans: vec![] }
    }
    /// Lay out `s` on a single baseline starting at (x,y)
    ///
    /// Glyphs are placed by their advance and pair kerning. Control
    ///   characters are skipped. Returns the x position after the last
    ///   glyph.
    pub fn add_text(&mut self, face: &FontFace, x: f64, y: f64, s: &str) -> f64 {
        let mut path = Path::new();
        let mut x = x;
        let mut prev : Option<char> = None;
        for ch in s.chars().filter(|c| ! c.is_control()) {
            if let Some(p) = prev {
                x += face.kern(p, ch);
            }
            let (glyph, advance) = face.glyph_path(ch, x, y);
            path.append(&glyph);
            x += advance;
            prev = Some(ch);
        }
        log::trace!("add_text: {:?} ends at x {}", s, x);
        self.add_path(path, face.color);
        x
    }
    /// Add an already shaped outline drawn with `color`
    pub fn add_path(&mut self, path: Path, color: Rgba8) {
        if path.is_empty() {
            return;
        }
        self.spans.push(Span { path, color });
    }
    /// No glyphs have been added
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
    /// Outlines and their colors, in paint order
    ///
    /// Consecutive outlines of the same color are merged into one path
    pub fn to_paths(&self) -> (Vec<Path>, Vec<Rgba8>) {
        let mut paths : Vec<Path> = vec![];
        let mut colors : Vec<Rgba8> = vec![];
        for span in &self.spans {
            if colors.last() == Some(&span.color) {
                if let Some(p) = paths.last_mut() {
                    p.append(&span.path);
                }
            } else {
                paths.push(span.path.clone());
                colors.push(span.color);
            }
        }
        (paths, colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let mut t = Text::new();
        assert!(t.is_empty());
        t.add_path(Path::new(), Rgba8::black());
        assert!(t.is_empty());
        let (p, c) = t.to_paths();
        assert!(p.is_empty() && c.is_empty());
    }
    #[test]
    fn same_colors_merge() {
        let red = Rgba8::new(255, 0, 0, 255);
        let blue = Rgba8::new(0, 0, 255, 255);
        let mut t = Text::new();
        t.add_path(Path::rectangle(0.0, 0.0, 1.0, 1.0), red);
        t.add_path(Path::rectangle(2.0, 0.0, 1.0, 1.0), red);
        t.add_path(Path::rectangle(4.0, 0.0, 1.0, 1.0), blue);
        t.add_path(Path::rectangle(6.0, 0.0, 1.0, 1.0), red);
        let (p, c) = t.to_paths();
        assert_eq!(c, vec![red, blue, red]);
        assert_eq!(p.len(), 3);
        assert_eq!(p[0].vertices().len(), 10);
        assert_eq!(p[2].vertices()[0].x, 6.0);
    }
}
