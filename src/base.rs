//! Rendering Base
//!
//! Blends colors into an RGBA buffer, clipping to its bounds

use crate::color::{Color, Rgba8};
use crate::math::{lerp_u8, multiply_u8, prelerp_u8};

use image::{Rgba, RgbaImage};

use std::cmp::min;
use std::cmp::max;

/// Rendering Base over a borrowed image
#[derive(Debug)]
pub struct RenderingBase<'a> {
    img: &'a mut RgbaImage,
}

/// Source-over blend of `c` onto `p` with coverage `alpha`, straight alpha
///
/// Opaque destinations interpolate directly. Otherwise colors are weighted
///   by their alpha, `c·a + p·pa·(1-a)`, and divided by the result alpha.
fn mix_pix(p: Rgba8, c: Rgba8, alpha: u8) -> Rgba8 {
    let a = prelerp_u8(p.a, alpha, alpha);
    if p.a == 255 {
        return Rgba8::new(lerp_u8(p.r, c.r, alpha),
                          lerp_u8(p.g, c.g, alpha),
                          lerp_u8(p.b, c.b, alpha),
                          a);
    }
    if a == 0 {
        return Rgba8::transparent();
    }
    let (sa, da, oa) = (u32::from(alpha), u32::from(p.a), u32::from(a) * 255);
    let mix = |d: u8, s: u8| {
        let v = u32::from(s) * sa * 255 + u32::from(d) * da * (255 - sa);
        min((v + oa / 2) / oa, 255) as u8
    };
    Rgba8::new(mix(p.r, c.r), mix(p.g, c.g), mix(p.b, c.b), a)
}

impl<'a> RenderingBase<'a> {
    /// Create a Rendering Base
    pub fn new(img: &'a mut RgbaImage) -> Self {
        RenderingBase { img }
    }
    /// Underlying image
    pub fn image(&self) -> &RgbaImage {
        &*self.img
    }
    /// Set every pixel to `color`
    pub fn clear<C: Color>(&mut self, color: &C) {
        let c : Rgba<u8> = Rgba8::from_trait(*color).into();
        for p in self.img.pixels_mut() {
            *p = c;
        }
    }
    /// Minimum and maximum pixel indices, (xmin, xmax, ymin, ymax)
    pub fn limits(&self) -> (i64,i64,i64,i64) {
        let w = i64::from(self.img.width());
        let h = i64::from(self.img.height());
        (0, w-1, 0, h-1)
    }
    /// Blend a single pixel, `cover` in [0,255]
    ///
    /// Pixel must be within the limits
    pub fn blend_pix<C: Color>(&mut self, x: i64, y: i64, c: &C, cover: u64) {
        let alpha = multiply_u8(c.alpha8(), min(cover, 255) as u8);
        if alpha == 0 {
            return;
        }
        let p = self.img.get_pixel_mut(x as u32, y as u32);
        let pix = mix_pix(Rgba8::from(*p), Rgba8::from_trait(*c), alpha);
        *p = pix.into();
    }
    /// Blend a horizontal line from x1 to x2, inclusive, with a single cover
    pub fn blend_hline<C: Color>(&mut self, x1: i64, y: i64, x2: i64, c: &C, cover: u64) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        let (x1,x2) = if x2 > x1 { (x1,x2) } else { (x2,x1) };
        if y > ymax || y < ymin || x1 > xmax || x2 < xmin {
            return;
        }
        let x1 = max(x1, xmin);
        let x2 = min(x2, xmax);
        for x in x1 ..= x2 {
            self.blend_pix(x, y, c, cover);
        }
    }
    /// Blend `len` pixels starting at (x,y) with individual covers
    pub fn blend_solid_hspan<C: Color>(&mut self, x: i64, y: i64, len: i64, c: &C, covers: &[u64]) {
        let (xmin,xmax,ymin,ymax) = self.limits();
        if y > ymax || y < ymin {
            return;
        }
        let (mut x, mut len, mut off) = (x, min(len, covers.len() as i64), 0);
        if x < xmin {
            len -= xmin - x;
            off += xmin - x;
            x = xmin;
        }
        if x + len - 1 > xmax {
            len = xmax - x + 1;
        }
        if len <= 0 {
            return;
        }
        let covers = &covers[off as usize .. (off + len) as usize];
        for (i, &cover) in covers.iter().enumerate() {
            self.blend_pix(x + i as i64, y, c, cover);
        }
    }
}
