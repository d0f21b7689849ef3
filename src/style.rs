//! Drawing Style

use crate::color::{Color, Rgba8};
use crate::stroke::{LineCap, LineJoin};

/// How a path is filled and stroked
///
/// Fill and stroke are each skipped when their color is fully
///   transparent; the stroke is also skipped when its width is not
///   positive.
#[derive(Debug,Clone,PartialEq)]
pub struct Style {
    /// Color of the interior
    pub fill_color: Rgba8,
    /// Color of the outline
    pub stroke_color: Rgba8,
    /// Width of the outline, in model units
    pub stroke_width: f64,
    /// Shape at the ends of open sub-paths
    pub stroke_capper: LineCap,
    /// Shape at corners
    pub stroke_joiner: LineJoin,
    /// Alternating drawn and skipped lengths; empty for a solid outline
    pub dashes: Vec<f64>,
    /// Distance into the dash pattern at the start of each sub-path
    pub dash_offset: f64,
}

impl Default for Style {
    /// Black fill without a stroke
    fn default() -> Self {
        Style {
            fill_color: Rgba8::black(),
            stroke_color: Rgba8::transparent(),
            stroke_width: 1.0,
            stroke_capper: LineCap::Butt,
            stroke_joiner: LineJoin::Miter,
            dashes: vec![],
            dash_offset: 0.0,
        }
    }
}

impl Style {
    /// Fill only, with `color`
    pub fn fill(color: Rgba8) -> Self {
        Style { fill_color: color, .. Style::default() }
    }
    /// Stroke only, with `color` and `width`
    pub fn stroke(color: Rgba8, width: f64) -> Self {
        Style { fill_color: Rgba8::transparent(),
                stroke_color: color,
                stroke_width: width,
                .. Style::default() }
    }
    pub(crate) fn has_fill(&self) -> bool {
        ! self.fill_color.is_transparent()
    }
    pub(crate) fn has_stroke(&self) -> bool {
        ! self.stroke_color.is_transparent() && self.stroke_width > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn default_fills_black() {
        let s = Style::default();
        assert!(s.has_fill());
        assert!(! s.has_stroke());
        assert_eq!(s.fill_color, Rgba8::black());
        assert_eq!(s.stroke_width, 1.0);
        assert!(s.dashes.is_empty());
    }
    #[test]
    fn stroke_needs_width() {
        let mut s = Style::stroke(Rgba8::white(), 2.0);
        assert!(! s.has_fill());
        assert!(s.has_stroke());
        s.stroke_width = 0.0;
        assert!(! s.has_stroke());
        s.stroke_width = -1.0;
        assert!(! s.has_stroke());
    }
    #[test]
    fn transparent_colors_skip() {
        let s = Style { fill_color: Rgba8::new(255, 0, 0, 0),
                        stroke_color: Rgba8::new(0, 0, 255, 0),
                        .. Style::default() };
        assert!(! s.has_fill());
        assert!(! s.has_stroke());
        let s = Style::fill(Rgba8::new(255, 0, 0, 1));
        assert!(s.has_fill());
    }
}
