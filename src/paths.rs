//! Paths and Vertices
//!
//! A [Path] is a sequence of [Vertex]es, each tagged with a [PathCommand].
//!   Curves are stored the way Anti-grain Geometry stores them: a quadratic
//!   curve is two `Curve3` vertices (control, end) and a cubic curve is
//!   three `Curve4` vertices (control, control, end).
//!
//! Path operations ([transform](struct.Path.html#method.transform),
//!   [flatten](struct.Path.html#method.flatten),
//!   [dash](struct.Path.html#method.dash),
//!   [stroke](struct.Path.html#method.stroke)) never modify the path in
//!   place; each returns a new Path.
//!
//! # Example
//!
//!     use canvas_raster::{Path, Transform};
//!
//!     let mut path = Path::new();
//!     path.move_to(0.0, 0.0);
//!     path.line_to(1.0, 0.0);
//!     path.line_to(1.0, 1.0);
//!     path.close_polygon();
//!
//!     let moved = path.transform(&Transform::new_translate(2.0, 0.0));
//!     assert_eq!(moved.vertices()[0].x, 2.0);
//!     assert_eq!(path.vertices()[0].x, 0.0);
//!
//! [Path]: struct.Path.html
//! [Vertex]: struct.Vertex.html
//! [PathCommand]: enum.PathCommand.html

use crate::dash::Dash;
use crate::raster::RasterizerScanline;
use crate::stroke::{LineCap, LineJoin, Stroke};
use crate::transform::Transform;
use crate::VertexSource;

use std::f64::consts::PI;

/// Flattening tolerance in model units
pub const TOLERANCE: f64 = 0.01;

/// Flattening tolerance in device pixels
pub const DEVICE_TOLERANCE: f64 = 0.1;

/// Maximum number of line segments a single curve is split into
const MAX_CURVE_SEGMENTS: usize = 1000;

/// Point in two dimensions
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Drawing command for a Vertex
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PathCommand {
    MoveTo,
    LineTo,
    /// Quadratic Bezier, control point then end point
    Curve3,
    /// Cubic Bezier, two control points then end point
    Curve4,
    /// Close the current sub-path, coordinates are those of its start
    Close,
}

impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

/// Single point within a Path
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub cmd: PathCommand
}

impl Vertex {
    pub fn new(x: f64, y: f64, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    pub fn move_to(x: f64, y: f64) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    pub fn line_to(x: f64, y: f64) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
    pub fn close_polygon(x: f64, y: f64) -> Self {
        Self { x, y, cmd: PathCommand::Close }
    }
}

/// Distance between two vertices
pub fn len(a: &Vertex, b: &Vertex) -> f64 {
    ((a.x-b.x).powi(2) + (a.y-b.y).powi(2)).sqrt()
}
/// Cross product of (p2-p1) and (p-p2)
///
/// Sign determines on which side of the line p1->p2 the point p lies
pub fn cross(p1: &Vertex, p2: &Vertex, p: &Vertex) -> f64 {
    (p.x - p2.x) * (p2.y - p1.y) - (p.y - p2.y) * (p2.x - p1.x)
}

/// Split vertices into sub-paths
///
/// Returns inclusive index ranges `(start, end)`; each sub-path begins at a
///   MoveTo and ends just before the next MoveTo. A MoveTo with nothing
///   after it is still returned as a range of length one.
pub fn split(v: &[Vertex]) -> Vec<(usize, usize)> {
    let mut out = vec![];
    let mut start = None;
    for (i, vi) in v.iter().enumerate() {
        if vi.cmd == PathCommand::MoveTo {
            if let Some(s) = start {
                out.push((s, i-1));
            }
            start = Some(i);
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, v.len()-1));
    }
    out
}

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}
impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Expand if the point (x,y) is outside
    pub fn expand(&mut self, x: T, y: T) {
        if x < self.x1 { self.x1 = x; }
        if x > self.x2 { self.x2 = x; }
        if y < self.y1 { self.y1 = y; }
        if y > self.y2 { self.y2 = y; }
    }
}

/// Path built from lines and curves
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Path {
    vertices: Vec<Vertex>,
    /// Index of the MoveTo starting the current sub-path
    start: usize,
}

impl VertexSource for Path {
    fn xconvert(&self) -> Vec<Vertex> {
        self.vertices.clone()
    }
}

impl Path {
    /// Create a new, empty Path
    pub fn new() -> Self {
        Self { vertices: vec![], start: 0 }
    }
    /// Create a Path from raw vertices
    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        let start = vertices.iter()
            .rposition(|v| v.cmd == PathCommand::MoveTo)
            .unwrap_or(0);
        Self { vertices, start }
    }
    /// Vertices of the Path
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    /// Path has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Remove all vertices
    pub fn remove_all(&mut self) {
        self.vertices.clear();
        self.start = 0;
    }
    /// Start a new sub-path at (x,y)
    ///
    /// Consecutive MoveTo's collapse into the last one
    pub fn move_to(&mut self, x: f64, y: f64) {
        if let Some(last) = self.vertices.last_mut() {
            if last.cmd == PathCommand::MoveTo {
                *last = Vertex::move_to(x,y);
                return;
            }
        }
        self.start = self.vertices.len();
        self.vertices.push( Vertex::move_to(x,y) );
    }
    /// Draw a line to (x,y)
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.begin_segment();
        self.vertices.push( Vertex::line_to(x,y) );
    }
    /// Draw a quadratic Bezier curve through control point (cx,cy) to (x,y)
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.begin_segment();
        self.vertices.push( Vertex::new(cx, cy, PathCommand::Curve3) );
        self.vertices.push( Vertex::new(x, y, PathCommand::Curve3) );
    }
    /// Draw a cubic Bezier curve through control points (cx1,cy1) and
    ///   (cx2,cy2) to (x,y)
    pub fn cube_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        self.begin_segment();
        self.vertices.push( Vertex::new(cx1, cy1, PathCommand::Curve4) );
        self.vertices.push( Vertex::new(cx2, cy2, PathCommand::Curve4) );
        self.vertices.push( Vertex::new(x, y, PathCommand::Curve4) );
    }
    /// Close the current sub-path with a line back to its start
    ///
    /// Ignored if the sub-path has no segments or is already closed
    pub fn close_polygon(&mut self) {
        let last = match self.vertices.last() {
            Some(last) => *last,
            None => return,
        };
        if last.cmd == PathCommand::MoveTo || last.cmd == PathCommand::Close {
            return;
        }
        let s = self.vertices[self.start];
        self.vertices.push( Vertex::close_polygon(s.x, s.y) );
    }
    /// Make sure a segment has somewhere to start from
    ///
    /// Empty paths start at the origin, segments following a Close start
    ///   at the beginning of the closed sub-path
    fn begin_segment(&mut self) {
        match self.vertices.last() {
            None => self.move_to(0.0, 0.0),
            Some(v) if v.cmd == PathCommand::Close => {
                let (x,y) = (v.x, v.y);
                self.move_to(x,y);
            },
            Some(_) => {},
        }
    }

    /// Append the sub-paths of `other`
    pub fn append(&mut self, other: &Path) {
        if other.is_empty() {
            return;
        }
        let n = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.start = n + other.start;
    }

    /// Rectangle with lower-left corner (x,y), counter-clockwise
    pub fn rectangle(x: f64, y: f64, w: f64, h: f64) -> Self {
        let mut p = Self::new();
        p.move_to(x, y);
        p.line_to(x + w, y);
        p.line_to(x + w, y + h);
        p.line_to(x, y + h);
        p.close_polygon();
        p
    }
    /// Ellipse centered at (cx,cy) with radii rx and ry
    ///
    /// Built from four cubic Bezier arcs, counter-clockwise
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        // Control point distance for a quarter circle
        let k = 4.0 / 3.0 * (PI / 8.0).tan();
        let (kx, ky) = (k * rx, k * ry);
        let mut p = Self::new();
        p.move_to(cx + rx, cy);
        p.cube_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        p.cube_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        p.cube_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        p.cube_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        p.close_polygon();
        p
    }

    /// Bounding box of all vertices, including curve control points
    pub fn bounds(&self) -> Option<Rectangle<f64>> {
        let first = self.vertices.first()?;
        let mut r = Rectangle::new(first.x, first.y, first.x, first.y);
        for v in &self.vertices {
            r.expand(v.x, v.y);
        }
        Some(r)
    }

    /// New path with the transform `m` applied to every vertex
    pub fn transform(&self, m: &Transform) -> Path {
        let vertices = self.vertices.iter()
            .map(|v| {
                let (x,y) = m.transform(v.x, v.y);
                Vertex::new(x, y, v.cmd)
            })
            .collect();
        Path { vertices, start: self.start }
    }

    /// New path with curves replaced by line segments
    ///
    /// Uses the default model space [TOLERANCE](constant.TOLERANCE.html)
    pub fn flatten(&self) -> Path {
        self.flatten_with(TOLERANCE)
    }

    /// New path with curves replaced by line segments
    ///
    /// The maximum distance between the curve and its segments is about
    ///   `tolerance`
    pub fn flatten_with(&self, tolerance: f64) -> Path {
        let v = &self.vertices;
        let mut out = Path::new();
        let (mut x0, mut y0) = (0.0, 0.0);
        let mut i = 0;
        while i < v.len() {
            match v[i].cmd {
                PathCommand::MoveTo => {
                    out.move_to(v[i].x, v[i].y);
                    i += 1;
                },
                PathCommand::LineTo => {
                    out.line_to(v[i].x, v[i].y);
                    i += 1;
                },
                PathCommand::Close => {
                    out.close_polygon();
                    i += 1;
                },
                PathCommand::Curve3 if i + 1 < v.len() => {
                    let (c, e) = (v[i], v[i+1]);
                    flatten_quad(&mut out, (x0,y0), (c.x,c.y), (e.x,e.y), tolerance);
                    i += 2;
                },
                PathCommand::Curve4 if i + 2 < v.len() => {
                    let (c1, c2, e) = (v[i], v[i+1], v[i+2]);
                    flatten_cubic(&mut out, (x0,y0), (c1.x,c1.y), (c2.x,c2.y), (e.x,e.y), tolerance);
                    i += 3;
                },
                PathCommand::Curve3 | PathCommand::Curve4 => {
                    // Truncated curve, treat remaining points as lines
                    out.line_to(v[i].x, v[i].y);
                    i += 1;
                },
            }
            if let Some(last) = out.vertices.last() {
                x0 = last.x;
                y0 = last.y;
            }
        }
        out
    }

    /// New path split into dashes, curves are flattened first
    ///
    /// `dashes` alternates between lengths drawn and lengths skipped and
    ///   repeats along each sub-path; an odd number of lengths is repeated
    ///   to make it even. `offset` is the distance into the pattern at which
    ///   each sub-path starts. Patterns with negative lengths or a zero total
    ///   length leave the path undashed.
    pub fn dash(&self, offset: f64, dashes: &[f64]) -> Path {
        let mut dash = Dash::new(self.clone());
        dash.dashes(dashes);
        dash.dash_start(offset);
        Path::from_vertices(dash.xconvert())
    }

    /// New path that is the outline of this path stroked with `width`
    ///
    /// Open sub-paths get `cap` at both ends; corners are joined with `join`
    pub fn stroke(&self, width: f64, cap: LineCap, join: LineJoin) -> Path {
        let mut stroke = Stroke::new(self.clone());
        stroke.width(width);
        stroke.line_cap(cap);
        stroke.line_join(join);
        Path::from_vertices(stroke.xconvert())
    }

    /// Add the path to a rasterizer at `dpm` pixels per unit
    ///
    /// Model space is y-up and device space is y-down, so y is flipped
    ///   against the height of the rasterizer
    pub fn to_rasterizer(&self, ras: &mut RasterizerScanline, dpm: f64) {
        let h = ras.height() as f64;
        let device = Transform::from_parts(dpm, 0.0, 0.0, 0.0, -dpm, h);
        let path = self.transform(&device).flatten_with(DEVICE_TOLERANCE);
        ras.add_path(&path);
    }
}

fn segments(dd: f64, tolerance: f64) -> usize {
    if dd <= 0.0 || tolerance <= 0.0 || ! dd.is_finite() {
        return 1;
    }
    let n = (dd / tolerance).sqrt().ceil();
    if n < 1.0 {
        1
    } else if n > MAX_CURVE_SEGMENTS as f64 {
        MAX_CURVE_SEGMENTS
    } else {
        n as usize
    }
}

/// Flatten a quadratic bezier from p0 with control p1 to p2
///
/// Chord error is bounded by |p0 - 2 p1 + p2| / (4 n^2)
fn flatten_quad(out: &mut Path, p0: (f64,f64), p1: (f64,f64), p2: (f64,f64), tolerance: f64) {
    let ddx = p0.0 - 2.0 * p1.0 + p2.0;
    let ddy = p0.1 - 2.0 * p1.1 + p2.1;
    let dd = (ddx*ddx + ddy*ddy).sqrt();
    let n = segments(dd / 4.0, tolerance);
    for i in 1 ..= n {
        let t = i as f64 / n as f64;
        let mt = 1.0 - t;
        let x = mt * mt * p0.0 + 2.0 * mt * t * p1.0 + t * t * p2.0;
        let y = mt * mt * p0.1 + 2.0 * mt * t * p1.1 + t * t * p2.1;
        out.line_to(x, y);
    }
}

/// Flatten a cubic bezier from p0 with controls p1, p2 to p3
///
/// Chord error is bounded by 3/4 max(|p0 - 2 p1 + p2|, |p1 - 2 p2 + p3|) / n^2
fn flatten_cubic(out: &mut Path, p0: (f64,f64), p1: (f64,f64), p2: (f64,f64), p3: (f64,f64), tolerance: f64) {
    let dd1 = (p0.0 - 2.0 * p1.0 + p2.0).hypot(p0.1 - 2.0 * p1.1 + p2.1);
    let dd2 = (p1.0 - 2.0 * p2.0 + p3.0).hypot(p1.1 - 2.0 * p2.1 + p3.1);
    let n = segments(0.75 * dd1.max(dd2), tolerance);
    for i in 1 ..= n {
        let t = i as f64 / n as f64;
        let mt = 1.0 - t;
        let (a, b, c, d) = (mt*mt*mt, 3.0*mt*mt*t, 3.0*mt*t*t, t*t*t);
        let x = a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0;
        let y = a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1;
        out.line_to(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmds(p: &Path) -> Vec<PathCommand> {
        p.vertices().iter().map(|v| v.cmd).collect()
    }

    #[test]
    fn implicit_move_to() {
        let mut p = Path::new();
        p.line_to(1.0, 1.0);
        assert_eq!(cmds(&p), vec![PathCommand::MoveTo, PathCommand::LineTo]);
        assert_eq!(p.vertices()[0], Vertex::move_to(0.0, 0.0));
    }
    #[test]
    fn close_then_continue() {
        let mut p = Path::new();
        p.move_to(1.0, 2.0);
        p.line_to(3.0, 2.0);
        p.line_to(3.0, 4.0);
        p.close_polygon();
        p.close_polygon(); // ignored
        p.line_to(5.0, 5.0);
        use PathCommand::*;
        assert_eq!(cmds(&p), vec![MoveTo, LineTo, LineTo, Close, MoveTo, LineTo]);
        assert_eq!(p.vertices()[3], Vertex::close_polygon(1.0, 2.0));
        assert_eq!(p.vertices()[4], Vertex::move_to(1.0, 2.0));
    }
    #[test]
    fn move_to_collapses() {
        let mut p = Path::new();
        p.move_to(1.0, 1.0);
        p.move_to(2.0, 2.0);
        p.line_to(3.0, 3.0);
        assert_eq!(p.vertices().len(), 2);
        assert_eq!(p.vertices()[0], Vertex::move_to(2.0, 2.0));
    }
    #[test]
    fn split_sub_paths() {
        let mut p = Path::rectangle(0.0, 0.0, 1.0, 1.0);
        p.move_to(5.0, 5.0);
        p.line_to(6.0, 6.0);
        assert_eq!(split(p.vertices()), vec![(0,4), (5,6)]);
        assert!(split(&[]).is_empty());
    }
    #[test]
    fn flatten_keeps_lines() {
        let p = Path::rectangle(0.0, 0.0, 2.0, 3.0);
        assert_eq!(p.flatten(), p);
    }
    #[test]
    fn flatten_quad_ends_on_curve() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.quad_to(1.0, 2.0, 2.0, 0.0);
        let f = p.flatten();
        assert!(f.vertices().len() > 3);
        assert!(f.vertices().iter().all(|v| v.cmd != PathCommand::Curve3));
        let last = f.vertices().last().unwrap();
        assert!((last.x - 2.0).abs() < 1e-12 && last.y.abs() < 1e-12);
        // Apex of the parabola is at t = 0.5, y = 1.0
        let ymax = f.vertices().iter().map(|v| v.y).fold(0.0, f64::max);
        assert!((ymax - 1.0).abs() < TOLERANCE);
    }
    #[test]
    fn ellipse_radius() {
        let f = Path::ellipse(1.0, 1.0, 2.0, 2.0).flatten();
        for v in f.vertices() {
            let r = ((v.x - 1.0).powi(2) + (v.y - 1.0).powi(2)).sqrt();
            assert!((r - 2.0).abs() < 2e-3, "radius {}", r);
        }
        assert_eq!(f.vertices().last().unwrap().cmd, PathCommand::Close);
    }
    #[test]
    fn transform_is_new_value() {
        let p = Path::rectangle(0.0, 0.0, 1.0, 1.0);
        let q = p.transform(&Transform::new_scale(2.0, 2.0));
        assert_eq!(p.vertices()[2], Vertex::line_to(1.0, 1.0));
        assert_eq!(q.vertices()[2], Vertex::line_to(2.0, 2.0));
    }
    #[test]
    fn dash_and_stroke_flatten_curves() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.quad_to(1.0, 2.0, 2.0, 0.0);
        let d = p.dash(0.0, &[0.5, 0.25]);
        assert!(! d.is_empty());
        assert!(d.vertices().iter()
                .all(|v| v.cmd == PathCommand::MoveTo || v.cmd == PathCommand::LineTo));
        let mut direct = Dash::new(p.clone());
        direct.dashes(&[0.5, 0.25]);
        assert_eq!(d.vertices(), &direct.xconvert()[..]);

        let s = p.stroke(0.1, LineCap::Butt, LineJoin::Miter);
        assert!(! s.is_empty());
        assert!(s.vertices().iter().all(|v| v.cmd != PathCommand::Curve3));
    }
    #[test]
    fn bounds() {
        assert!(Path::new().bounds().is_none());
        let r = Path::rectangle(-1.0, 2.0, 3.0, 4.0).bounds().unwrap();
        assert_eq!(r, Rectangle::new(-1.0, 2.0, 2.0, 6.0));
    }
}
