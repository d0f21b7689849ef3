//! Transformations

use crate::paths::Point;

use std::ops::Mul;

/// Affine Transformation
///
/// Maps a point (x,y) to
///```text
///     x' = sx  * x + shx * y + tx
///     y' = shy * x + sy  * y + ty
///```
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new identity Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Create a Transform from its six components
    pub fn from_parts(sx: f64, shx: f64, tx: f64, shy: f64, sy: f64, ty: f64) -> Self {
        Self { sx, shx, tx, shy, sy, ty }
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    ///
    /// Scaling is applied after the current transform, so the translation
    ///   is scaled as well. See [scaled](#method.scaled) to scale only
    ///   the linear part
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Add a rotation to the transform
    ///
    /// angle is in radians, counter-clockwise in a y-up space
    pub fn rotate(&mut self, angle: f64) {
        let ca = angle.cos();
        let sa = angle.sin();
        let t0   = self.sx  * ca - self.shy * sa;
        let t2   = self.shx * ca - self.sy  * sa;
        let t4   = self.tx  * ca - self.ty  * sa;
        self.shy = self.sx  * sa + self.shy * ca;
        self.sy  = self.shx * sa + self.sy  * ca;
        self.ty  = self.tx  * sa + self.ty  * ca;
        self.sx  = t0;
        self.shx = t2;
        self.tx  = t4;
    }
    /// Scale the input space; the linear part is scaled, the translation
    ///   is left untouched
    ///
    /// Equivalent to `self * Transform::new_scale(sx,sy)` where the scaling
    ///   is applied first
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self { sx:  self.sx  * sx, shx: self.shx * sy,
               shy: self.shy * sx, sy:  self.sy  * sy,
               tx:  self.tx,       ty:  self.ty }
    }

    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Transform a Point
    pub fn dot(&self, p: Point) -> Point {
        let (x,y) = self.transform(p.x, p.y);
        Point::new(x,y)
    }
    /// Determinant of the linear part
    pub fn determinant(&self) -> f64 {
        self.sx * self.sy - self.shy * self.shx
    }
    /// Returns true if the transform is the identity
    pub fn is_identity(&self) -> bool {
        *self == Self::new()
    }
    /// Inverse transform
    ///
    /// Returns `None` if the transform is singular
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || ! det.is_finite() {
            return None;
        }
        let d = 1.0 / det;
        let sx  =  self.sy  * d;
        let sy  =  self.sx  * d;
        let shy = -self.shy * d;
        let shx = -self.shx * d;
        let tx  = -self.tx * sx  - self.ty * shx;
        let ty  = -self.tx * shy - self.ty * sy;
        Some(Self { sx, sy, shx, shy, tx, ty })
    }
    /// Combine two transforms, `self` is applied first then `m`
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        let sx  = t0;
        let shx = t2;
        let tx  = t4;
        Transform { sx, sy, tx, ty, shx, shy }
    }
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        let mut t = Self::new();
        t.scale(sx,sy);
        t
    }
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        let mut t = Self::new();
        t.translate(tx,ty);
        t
    }
    pub fn new_rotate(ang: f64) -> Transform {
        let mut t = Self::new();
        t.rotate(ang);
        t
    }
}

/// `a * b` applies `a` first, then `b`
impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}
