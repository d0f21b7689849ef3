//! Affine Image Resampling
//!
//! Draws a source image into an RGBA buffer under an affine transform,
//!   filtering with a separable interpolation kernel
//!
//! # Example
//!
//!     use canvas_raster::{CATMULL_ROM, Op, Rectangle, Transform};
//!     use image::{Rgba, RgbaImage};
//!
//!     let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
//!     let mut dst = RgbaImage::new(4, 4);
//!     let s2d = Transform::new_translate(1.0, 1.0);
//!     CATMULL_ROM.transform(&mut dst, &s2d, &src, Rectangle::new(0, 0, 2, 2), Op::Over);
//!
//!     assert_eq!(*dst.get_pixel(1, 1), Rgba([255, 0, 0, 255]));
//!     assert_eq!(*dst.get_pixel(0, 0), Rgba([0, 0, 0, 0]));

use crate::paths::Rectangle;
use crate::transform::Transform;

use image::{GenericImageView, Rgba, RgbaImage};

/// Compositing operator
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum Op {
    /// Source over destination
    Over,
    /// Source replaces destination
    Src,
}

/// Interpolation Kernel
///
/// `at` is evaluated for `t` in [0, support) and must be symmetric about 0
#[derive(Copy,Clone)]
pub struct Kernel {
    /// Kernel radius in source pixels
    pub support: f64,
    /// Kernel weight at distance `t`
    pub at: fn(f64) -> f64,
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Kernel").field("support", &self.support).finish()
    }
}

fn catmull_rom(t: f64) -> f64 {
    let t = t.abs();
    if t < 1.0 {
        (1.5 * t - 2.5) * t * t + 1.0
    } else if t < 2.0 {
        ((-0.5 * t + 2.5) * t - 4.0) * t + 2.0
    } else {
        0.0
    }
}

/// Catmull-Rom cubic kernel
pub const CATMULL_ROM: Kernel = Kernel { support: 2.0, at: catmull_rom };

/// Premultiplied color, components in [0,1]
#[derive(Debug,Default,Copy,Clone)]
struct Premul {
    r: f64, g: f64, b: f64, a: f64,
}

impl Premul {
    fn from_pixel(p: &Rgba<u8>) -> Self {
        let a = f64::from(p[3]) / 255.0;
        Premul { r: f64::from(p[0]) / 255.0 * a,
                 g: f64::from(p[1]) / 255.0 * a,
                 b: f64::from(p[2]) / 255.0 * a,
                 a }
    }
    fn to_pixel(self) -> Rgba<u8> {
        if self.a <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let c = |v: f64| (v / self.a * 255.0).round().max(0.0).min(255.0) as u8;
        let a = (self.a * 255.0).round().max(0.0).min(255.0) as u8;
        Rgba([c(self.r), c(self.g), c(self.b), a])
    }
}

/// Bounding box in destination pixels of a source rectangle
///
/// Corners are floored; the maximum is exclusive
fn transform_rect(s2d: &Transform, sr: &Rectangle<u32>) -> Rectangle<i64> {
    let corners = [(sr.x1, sr.y1), (sr.x2, sr.y1), (sr.x1, sr.y2), (sr.x2, sr.y2)];
    let mut dr : Option<Rectangle<i64>> = None;
    for &(x, y) in corners.iter() {
        let (dx, dy) = s2d.transform(f64::from(x), f64::from(y));
        let (dx, dy) = (dx.floor() as i64, dy.floor() as i64);
        match dr {
            None => dr = Some(Rectangle::new(dx, dy, dx + 1, dy + 1)),
            Some(ref mut r) => {
                r.expand(dx, dy);
                r.expand(dx + 1, dy + 1);
            }
        }
    }
    dr.unwrap_or_default()
}

/// Normalized weights of source pixels `i .. j` around `s`
///
/// Returns the first index and the weights
fn weights(k: &Kernel, s: f64, half_width: f64, arg_scale: f64, min: u32, max: u32) -> (i64, Vec<f64>) {
    let i = ((s - half_width).floor() as i64).max(i64::from(min));
    let j = ((s + half_width).ceil() as i64).min(i64::from(max));
    let mut w : Vec<f64> = (i .. j)
        .map(|ki| {
            let t = ((s - ki as f64) * arg_scale).abs();
            if t < k.support { (k.at)(t) } else { 0.0 }
        })
        .collect();
    let total : f64 = w.iter().sum();
    if total != 0.0 {
        for wi in w.iter_mut() {
            *wi /= total;
        }
    }
    (i, w)
}

impl Kernel {
    /// Draw `sr` of `src` into `dst`, mapping source coordinates through
    ///   `s2d`
    ///
    /// Destination pixels are sampled at their centers. When the transform
    ///   shrinks the image the kernel is widened by the shrink factor.
    ///   Nothing is drawn if `s2d` is not invertible.
    pub fn transform<I>(&self, dst: &mut RgbaImage, s2d: &Transform, src: &I, sr: Rectangle<u32>, op: Op)
        where I: GenericImageView<Pixel = Rgba<u8>>
    {
        let (sw, sh) = src.dimensions();
        let sr = Rectangle::new(sr.x1.min(sw), sr.y1.min(sh),
                                sr.x2.min(sw), sr.y2.min(sh));
        if sr.x1 == sr.x2 || sr.y1 == sr.y2 {
            return;
        }
        let d2s = match s2d.invert() {
            Some(d2s) => d2s,
            None => {
                log::debug!("resample: singular transform {:?}, nothing drawn", s2d);
                return;
            }
        };
        let dr = transform_rect(s2d, &sr);
        let x1 = dr.x1.max(0);
        let y1 = dr.y1.max(0);
        let x2 = dr.x2.min(i64::from(dst.width()));
        let y2 = dr.y2.min(i64::from(dst.height()));
        if x1 >= x2 || y1 >= y2 {
            return;
        }
        log::trace!("resample: source {:?} into [{}, {}) x [{}, {})", sr, x1, x2, y1, y2);

        let xscale = d2s.sx.abs().max(d2s.shx.abs());
        let yscale = d2s.shy.abs().max(d2s.sy.abs());
        let (x_half, x_arg) = if xscale > 1.0 {
            (self.support * xscale, 1.0 / xscale)
        } else {
            (self.support, 1.0)
        };
        let (y_half, y_arg) = if yscale > 1.0 {
            (self.support * yscale, 1.0 / yscale)
        } else {
            (self.support, 1.0)
        };

        for dy in y1 .. y2 {
            let dyf = dy as f64 + 0.5;
            for dx in x1 .. x2 {
                let dxf = dx as f64 + 0.5;
                let (sx, sy) = d2s.transform(dxf, dyf);
                let (px, py) = (sx.floor(), sy.floor());
                if px < f64::from(sr.x1) || px >= f64::from(sr.x2) ||
                    py < f64::from(sr.y1) || py >= f64::from(sr.y2) {
                    continue;
                }
                let (ix, xw) = weights(self, sx - 0.5, x_half, x_arg, sr.x1, sr.x2);
                let (iy, yw) = weights(self, sy - 0.5, y_half, y_arg, sr.y1, sr.y2);

                let mut p = Premul::default();
                for (ky, &wy) in yw.iter().enumerate() {
                    if wy == 0.0 {
                        continue;
                    }
                    for (kx, &wx) in xw.iter().enumerate() {
                        let w = wx * wy;
                        if w == 0.0 {
                            continue;
                        }
                        let s = Premul::from_pixel(&src.get_pixel((ix + kx as i64) as u32,
                                                                  (iy + ky as i64) as u32));
                        p.r += s.r * w;
                        p.g += s.g * w;
                        p.b += s.b * w;
                        p.a += s.a * w;
                    }
                }
                // Negative lobes can overshoot
                p.a = p.a.max(0.0).min(1.0);
                p.r = p.r.max(0.0).min(p.a);
                p.g = p.g.max(0.0).min(p.a);
                p.b = p.b.max(0.0).min(p.a);

                let d = dst.get_pixel_mut(dx as u32, dy as u32);
                let out = match op {
                    Op::Src => p,
                    Op::Over => {
                        let q = Premul::from_pixel(d);
                        let ia = 1.0 - p.a;
                        Premul { r: p.r + q.r * ia,
                                 g: p.g + q.g * ia,
                                 b: p.b + q.b * ia,
                                 a: p.a + q.a * ia }
                    }
                };
                *d = out.to_pixel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> RgbaImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));
        img
    }

    #[test]
    fn kernel_values() {
        assert_eq!(catmull_rom(0.0), 1.0);
        assert_eq!(catmull_rom(1.0), 0.0);
        assert_eq!(catmull_rom(2.0), 0.0);
        assert_eq!(catmull_rom(-0.5), catmull_rom(0.5));
        assert!(catmull_rom(1.5) < 0.0);
    }
    #[test]
    fn identity_copies() {
        let src = checker();
        let mut dst = RgbaImage::new(2, 2);
        CATMULL_ROM.transform(&mut dst, &Transform::new(), &src, Rectangle::new(0, 0, 2, 2), Op::Over);
        assert_eq!(dst, src);
    }
    #[test]
    fn over_keeps_destination_under_transparent() {
        let src = RgbaImage::new(2, 2);
        let mut dst = RgbaImage::from_pixel(2, 2, Rgba([9, 8, 7, 255]));
        CATMULL_ROM.transform(&mut dst, &Transform::new(), &src, Rectangle::new(0, 0, 2, 2), Op::Over);
        assert!(dst.pixels().all(|p| *p == Rgba([9, 8, 7, 255])));

        CATMULL_ROM.transform(&mut dst, &Transform::new(), &src, Rectangle::new(0, 0, 2, 2), Op::Src);
        assert!(dst.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }
    #[test]
    fn integer_upscale_of_flat_color() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        let mut dst = RgbaImage::new(4, 4);
        CATMULL_ROM.transform(&mut dst, &Transform::new_scale(2.0, 2.0), &src,
                              Rectangle::new(0, 0, 2, 2), Op::Over);
        assert!(dst.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }
    #[test]
    fn singular_draws_nothing() {
        let src = checker();
        let mut dst = RgbaImage::new(2, 2);
        CATMULL_ROM.transform(&mut dst, &Transform::new_scale(0.0, 1.0), &src,
                              Rectangle::new(0, 0, 2, 2), Op::Over);
        assert!(dst.pixels().all(|p| *p == Rgba([0, 0, 0, 0])));
    }
    #[test]
    fn bounds() {
        let r = transform_rect(&Transform::new_translate(0.5, -1.0), &Rectangle::new(0, 0, 2, 3));
        assert_eq!(r, Rectangle::new(0, -1, 3, 3));
    }
}
