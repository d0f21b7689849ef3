//! Path Stroking
//!
//! # Example
//!
//!     use canvas_raster::{Path, Stroke, LineCap, LineJoin, VertexSource};
//!
//!     // Input Path
//!     let mut path = Path::new();
//!     path.move_to(  0.0,   0.0);
//!     path.line_to(100.0, 100.0);
//!     path.line_to(200.0,  50.0);
//!
//!     // Stroke
//!     let mut stroke = Stroke::new( path );
//!     stroke.width(2.5);
//!     stroke.line_cap(LineCap::Square);
//!     stroke.line_join(LineJoin::Miter);
//!     stroke.miter_limit(5.0);
//!
//!     let outline = stroke.xconvert();
//!     assert!(! outline.is_empty());
//!

use crate::paths::PathCommand;
use crate::paths::Path;
use crate::paths::Vertex;
use crate::paths::len;
use crate::paths::cross;
use crate::paths::split;

use crate::VertexSource;
use std::f64::consts::PI;

/// Points closer than this are considered identical
const VERTEX_DIST_EPSILON: f64 = 1e-6;

/// Line End or Cap Style
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum LineCap {
    Butt, Square, Round
}
/// Lines Join Style on the outside
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum LineJoin {
    Miter, MiterRevert, MiterRound, Round, Bevel,
}
/// Lines Join Style on the inside
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum InnerJoin {
    Bevel, Miter, Jag, Round
}

impl Default for LineCap   { fn default() -> LineCap   { LineCap::Butt    } }
impl Default for LineJoin  { fn default() -> LineJoin  { LineJoin::Miter  } }
impl Default for InnerJoin { fn default() -> InnerJoin { InnerJoin::Miter } }

/// Stroke for Paths and Vertex Sources
///
/// Converts the center line of a path into the outline of a line of
///   a given width
#[derive(Debug)]
pub struct Stroke<T: VertexSource> {
    /// Source of Verticies
    source: T,
    /// Half the width of line, can be negative, 0.5
    width: f64,
    /// Absolute value of the half width, 0.5
    width_abs: f64,
    /// Minimum Limit to determine if segments are almost co-linear, 0.5/1024
    width_eps: f64,
    /// Sign of the width, +1.0
    width_sign: f64,
    /// Maximum Length of miter at segment intersection, 4.0
    miter_limit: f64,
    /// Maximum Length of the inner miter at segment intersections, 1.01
    inner_miter_limit: f64,
    /// Approximation scale, 1.0
    approx_scale: f64,
    /// Line Cap Style
    line_cap: LineCap,
    /// Line Join Style
    line_join: LineJoin,
    /// Line Join Style, Inner Angle
    inner_join: InnerJoin,
}

impl<T> VertexSource for Stroke<T> where T: VertexSource {
    fn xconvert(&self) -> Vec<Vertex> {
        self.stroke()
    }
}

macro_rules! prev {
    ($i:expr, $n:expr) => ( ($i + $n - 1) % $n )
}
macro_rules! next {
    ($i:expr, $n:expr) => ( ($i + 1) % $n )
}

impl<T> Stroke<T> where T: VertexSource {
    /// Create a new Stroke from a Vertex Source
    ///
    /// Default width is 1.0 with butt caps and miter joins
    pub fn new(source: T) -> Self {
        Self {
            source,
            width: 0.5,
            width_abs: 0.5,
            width_eps: 0.5/1024.0,
            width_sign: 1.0,
            miter_limit: 4.0,
            inner_miter_limit: 1.01,
            approx_scale: 1.0,
            inner_join: InnerJoin::Miter,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
        }
    }
    /// Set the Stroke Width
    pub fn width(&mut self, width: f64) {
        self.width = width / 2.0;
        self.width_abs = self.width.abs();
        self.width_sign = if self.width < 0.0 { -1.0 } else { 1.0 };
    }
    /// Set Line cap style
    pub fn line_cap(&mut self, line_cap: LineCap) {
        self.line_cap = line_cap;
    }
    /// Set Line Join style
    pub fn line_join(&mut self, line_join: LineJoin) {
        self.line_join = line_join;
    }
    /// Set Inner Join style
    pub fn inner_join(&mut self, inner_join: InnerJoin) {
        self.inner_join = inner_join;
    }
    /// Set miter limit, as a multiple of half the line width
    pub fn miter_limit(&mut self, miter_limit: f64) {
        self.miter_limit = miter_limit;
    }
    /// Set inner miter limit
    pub fn inner_miter_limit(&mut self, inner_miter_limit: f64) {
        self.inner_miter_limit = inner_miter_limit;
    }
    /// Set approximation scale
    ///
    /// Larger values produce more points on round caps and joins
    pub fn approximation_scale(&mut self, scale: f64) {
        self.approx_scale = scale;
    }
    /// Angular step for arcs so the chord error stays under 1/8 unit
    fn arc_step(&self) -> f64 {
        2.0 * (self.width_abs / (self.width_abs + 0.125 / self.approx_scale)).acos()
    }
    /// Calculate Line End Cap at v0, for a line heading towards v1
    fn calc_cap(&self, out: &mut Vec<Vertex>, v0: &Vertex, v1: &Vertex) {
        let dx = v1.x-v0.x;
        let dy = v1.y-v0.y;
        let len = (dx*dx + dy*dy).sqrt();
        let dx1 = self.width * dy / len;
        let dy1 = self.width * dx / len;

        match self.line_cap {
            LineCap::Square => {
                let dx2 = dy1 * self.width_sign;
                let dy2 = dx1 * self.width_sign;
                out.push(Vertex::line_to(v0.x - dx1 - dx2, v0.y + dy1 - dy2));
                out.push(Vertex::line_to(v0.x + dx1 - dx2, v0.y - dy1 - dy2));
            },
            LineCap::Butt => {
                out.push(Vertex::line_to(v0.x - dx1, v0.y + dy1));
                out.push(Vertex::line_to(v0.x + dx1, v0.y - dy1));
            },
            LineCap::Round => {
                let da = self.arc_step();
                let n = (PI / da) as usize;
                let da = PI / (n + 1) as f64;
                out.push(Vertex::line_to(v0.x - dx1, v0.y + dy1));
                if self.width_sign > 0.0 {
                    let mut a1 = dy1.atan2(-dx1) + da;
                    for _ in 0 .. n {
                        out.push(Vertex::line_to(v0.x + a1.cos() * self.width,
                                                 v0.y + a1.sin() * self.width));
                        a1 += da;
                    }
                } else {
                    let mut a1 = (-dy1).atan2(dx1) - da;
                    for _ in 0 .. n {
                        out.push(Vertex::line_to(v0.x + a1.cos() * self.width,
                                                 v0.y + a1.sin() * self.width));
                        a1 -= da;
                    }
                }
                out.push(Vertex::line_to(v0.x + dx1, v0.y - dy1));
            }
        }
    }

    /// Calculate an Arc around (x,y) from offset (dx1,dy1) to (dx2,dy2)
    fn calc_arc(&self, out: &mut Vec<Vertex>, x: f64, y: f64, dx1: f64, dy1: f64, dx2: f64, dy2: f64) {
        let mut a1 = (dy1 * self.width_sign).atan2(dx1 * self.width_sign);
        let mut a2 = (dy2 * self.width_sign).atan2(dx2 * self.width_sign);
        let da = self.arc_step();

        out.push(Vertex::line_to(x + dx1, y + dy1));
        if self.width_sign > 0.0 {
            if a1 > a2 {
                a2 += 2.0 * PI;
            }
            let n = ((a2 - a1) / da) as i64;
            let da = (a2 - a1) / (n + 1) as f64;
            a1 += da;
            for _ in 0 .. n {
                out.push(Vertex::line_to(x + a1.cos() * self.width,
                                         y + a1.sin() * self.width));
                a1 += da;
            }
        } else {
            if a1 < a2 {
                a2 -= 2.0 * PI;
            }
            let n = ((a1 - a2) / da) as i64;
            let da = (a1 - a2) / (n + 1) as f64;
            a1 -= da;
            for _ in 0 .. n {
                out.push(Vertex::line_to(x + a1.cos() * self.width,
                                         y + a1.sin() * self.width));
                a1 -= da;
            }
        }
        out.push(Vertex::line_to(x + dx2, y + dy2));
    }
    /// Calculate a Miter Join at p1
    #[allow(clippy::too_many_arguments)]
    fn calc_miter(&self, out: &mut Vec<Vertex>,
                  p0: &Vertex, p1: &Vertex, p2: &Vertex,
                  dx1: f64, dy1: f64, dx2: f64, dy2: f64,
                  join: LineJoin, mlimit: f64, dbevel: f64) {
        let mut xi  = p1.x;
        let mut yi  = p1.y;
        let mut di  = 1.0;
        let lim = self.width_abs * mlimit;
        let mut miter_limit_exceeded = true;
        let mut intersection_failed  = true;
        // Intersection of the two offset lines
        //
        // a--b-p
        // 0   1 c
        // -----  \
        //      \  \
        //       \2 d
        if let Some((xit,yit)) = calc_intersection(p0.x + dx1, p0.y - dy1,   // a
                                                   p1.x + dx1, p1.y - dy1,   // b
                                                   p1.x + dx2, p1.y - dy2,   // c
                                                   p2.x + dx2, p2.y - dy2) { // d
            xi = xit;
            yi = yit;
            di = len(p1, &Vertex::line_to(xi,yi));
            if di <= lim {
                out.push(Vertex::line_to(xi, yi));
                miter_limit_exceeded = false;
            }
            intersection_failed = false;
        } else {
            // Parallel offsets, the three points are colinear. The next
            //   segment either continues the line or turns straight back;
            //   compare the sides of the perpendicular at p1
            let pz = Vertex::line_to(p1.x + dx1, p1.y - dy1);
            if (cross(p0, p1, &pz) < 0.0) == (cross(p1, p2, &pz) < 0.0) {
                out.push(pz);
                miter_limit_exceeded = false;
            }
        }

        if miter_limit_exceeded {
            match join {
                LineJoin::MiterRevert => {
                    out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1));
                    out.push(Vertex::line_to(p1.x + dx2, p1.y - dy2));
                },
                LineJoin::MiterRound => self.calc_arc(out, p1.x, p1.y, dx1, -dy1, dx2, -dy2),
                _ => {
                    if intersection_failed {
                        let mlimit = mlimit * self.width_sign;
                        out.push(Vertex::line_to(p1.x + dx1 + dy1 * mlimit,
                                                 p1.y - dy1 + dx1 * mlimit));
                        out.push(Vertex::line_to(p1.x + dx2 - dy2 * mlimit,
                                                 p1.y - dy2 - dx2 * mlimit));
                    } else {
                        // Clip the miter at the limit
                        let x1 = p1.x + dx1;
                        let y1 = p1.y - dy1;
                        let x2 = p1.x + dx2;
                        let y2 = p1.y - dy2;
                        let di = (lim - dbevel) / (di - dbevel);
                        out.push(Vertex::line_to(x1 + (xi - x1) * di,
                                                 y1 + (yi - y1) * di));
                        out.push(Vertex::line_to(x2 + (xi - x2) * di,
                                                 y2 + (yi - y2) * di));
                    }
                }
            }
        }
    }
    /// Calculate the Join of Two Line Segments at p1
    ///
    /// [SVG Line Joins](https://www.w3.org/TR/SVG/painting.html#LineJoin)
    fn calc_join(&self, out: &mut Vec<Vertex>, p0: &Vertex, p1: &Vertex, p2: &Vertex) {
        let len1 = len(p1,p0);
        let len2 = len(p2,p1);
        if len1 < VERTEX_DIST_EPSILON || len2 < VERTEX_DIST_EPSILON {
            return;
        }
        // Perpendicular offsets of each segment
        let dx1 = self.width * (p1.y-p0.y) / len1;
        let dy1 = self.width * (p1.x-p0.x) / len1;
        let dx2 = self.width * (p2.y-p1.y) / len2;
        let dy2 = self.width * (p2.x-p1.x) / len2;
        let cp = cross(p0, p1, p2);

        let inner = (cp >  1e-14 && self.width > 0.0) ||
                    (cp < -1e-14 && self.width < 0.0);
        if inner {
            let limit = (len1.min(len2) / self.width_abs).max(self.inner_miter_limit);
            match self.inner_join {
                InnerJoin::Bevel => {
                    out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1));
                    out.push(Vertex::line_to(p1.x + dx2, p1.y - dy2));
                },
                InnerJoin::Miter => {
                    self.calc_miter(out, p0, p1, p2, dx1, dy1, dx2, dy2, LineJoin::MiterRevert, limit, 0.0);
                }
                InnerJoin::Jag |
                InnerJoin::Round => {
                    let d = (dx1-dx2).powi(2) + (dy1-dy2).powi(2);
                    if d < len1.powi(2) && d < len2.powi(2) {
                        self.calc_miter(out, p0, p1, p2, dx1, dy1, dx2, dy2, LineJoin::MiterRevert, limit, 0.0);
                    } else if self.inner_join == InnerJoin::Jag {
                        out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1));
                        out.push(Vertex::line_to(p1.x,       p1.y      ));
                        out.push(Vertex::line_to(p1.x + dx2, p1.y - dy2));
                    } else {
                        out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1));
                        out.push(Vertex::line_to(p1.x,       p1.y      ));
                        self.calc_arc(out, p1.x, p1.y, dx2, -dy2, dx1, -dy1);
                        out.push(Vertex::line_to(p1.x,       p1.y      ));
                        out.push(Vertex::line_to(p1.x + dx2, p1.y - dy2));
                    }
                }
            }
            return;
        }
        // Outer Join
        let dx = (dx1 + dx2) / 2.0;
        let dy = (dy1 + dy2) / 2.0;
        let dbevel = (dx*dx + dy*dy).sqrt();

        if (self.line_join == LineJoin::Round || self.line_join == LineJoin::Bevel) &&
            self.approx_scale * (self.width_abs - dbevel) < self.width_eps {
            // Almost colinear; a bevel or arc would be invisible, one
            //   point at the offset intersection is enough
            match calc_intersection(p0.x + dx1, p0.y - dy1,
                                    p1.x + dx1, p1.y - dy1,
                                    p1.x + dx2, p1.y - dy2,
                                    p2.x + dx2, p2.y - dy2) {
                Some((x,y)) => out.push(Vertex::line_to(x, y)),
                None => out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1)),
            }
            return;
        }
        match self.line_join {
            LineJoin::Miter |
            LineJoin::MiterRevert |
            LineJoin::MiterRound =>
                self.calc_miter(out, p0, p1, p2, dx1, dy1, dx2, dy2,
                                self.line_join, self.miter_limit, dbevel),
            LineJoin::Round =>
                self.calc_arc(out, p1.x, p1.y, dx1, -dy1, dx2, -dy2),
            LineJoin::Bevel => {
                out.push(Vertex::line_to(p1.x + dx1, p1.y - dy1));
                out.push(Vertex::line_to(p1.x + dx2, p1.y - dy2));
            },
        }
    }
    /// Stroke the Vertex Source
    ///
    /// Open sub-paths become a single polygon: start cap, offset along one
    ///   side, end cap, offset back along the other side. Closed sub-paths
    ///   become two polygons, one for each side.
    fn stroke(&self) -> Vec<Vertex> {
        let mut all_out = vec![];
        let v0 = Path::from_vertices(self.source.xconvert()).flatten();
        let v0 = v0.vertices();
        for (m1,m2) in split(v0) {
            let v = clean_path(&v0[m1..=m2]);
            let closed = is_path_closed(&v);
            // Ignore Closed Tag Element
            let n = if closed { v.len() - 1 } else { v.len() };
            if n < 2 {
                continue;
            }
            let (n1,n2) = if closed { (0, n) } else { (1,n-1) };

            // Forward Path
            let mut outf = vec![];
            if ! closed {
                self.calc_cap(&mut outf, &v[0], &v[1]);
            }
            for i in n1 .. n2 {
                self.calc_join(&mut outf, &v[prev!(i,n)], &v[i], &v[next!(i,n)]);
            }
            if closed {
                close_polygon(&mut outf);
            }

            // Backward Path
            let mut outb = vec![];
            if ! closed {
                self.calc_cap(&mut outb, &v[n-1], &v[n-2]);
            }
            for i in (n1 .. n2).rev() {
                self.calc_join(&mut outb, &v[next!(i,n)], &v[i], &v[prev!(i,n)]);
            }
            if closed {
                if let Some(first) = outb.first_mut() {
                    first.cmd = PathCommand::MoveTo;
                }
            }
            close_polygon(&mut outb);

            if let Some(first) = outf.first_mut() {
                first.cmd = PathCommand::MoveTo;
            }
            all_out.extend(outf);
            all_out.extend(outb);
        }
        all_out
    }
}

/// Append a Close using the start of the last sub-path
fn close_polygon(v: &mut Vec<Vertex>) {
    if let Some(first) = v.first() {
        let first = *first;
        v.push( Vertex::close_polygon(first.x, first.y) );
    }
}

/// Calculate Intersection of two lines
///
/// Parallel Line are return as `None` otherwise the Intersection
///    (`px`,`py`) is returned
///
/// [Line-Line Intersection at Wikipedia](https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line)
///
/// Lines are specified to pairs of points
///   - (`ax`, `ay`) -> (`bx`, `by`)
///   - (`cx`, `cy`) -> (`dx`, `dy`)
#[allow(clippy::too_many_arguments)]
fn calc_intersection(ax: f64, ay: f64, bx: f64, by: f64,
                     cx: f64, cy: f64, dx: f64, dy: f64)
                     -> Option<(f64, f64)> {
    let intersection_epsilon = 1.0e-30;
    let num = (ay-cy) * (dx-cx) - (ax-cx) * (dy-cy);
    let den = (bx-ax) * (dy-cy) - (by-ay) * (dx-cx);
    if den.abs() < intersection_epsilon {
        return None;
    }
    let r = num / den;
    Some((ax + r * (bx-ax), ay + r * (by-ay)))
}

/// Check if Path is Closed
fn is_path_closed(verts: &[Vertex]) -> bool {
    verts.iter().any(|v| v.cmd == PathCommand::Close)
}

/// Remove repeated vertices
///
/// Repeated verticies are defined with a distance < 1e-6. For closed
///   paths, trailing points equal to the first point are removed as the
///   Close already returns there.
fn clean_path(v: &[Vertex]) -> Vec<Vertex> {
    let mut out : Vec<Vertex> = vec![];
    for vi in v {
        match vi.cmd {
            PathCommand::LineTo => {
                if let Some(last) = out.last() {
                    if len(last, vi) < VERTEX_DIST_EPSILON {
                        continue;
                    }
                }
                out.push(*vi);
            },
            _ => out.push(*vi),
        }
    }
    if ! is_path_closed(&out) {
        return out;
    }
    // Drop anything after the Close, then points duplicating the start
    if let Some(i) = out.iter().position(|v| v.cmd == PathCommand::Close) {
        out.truncate(i + 1);
    }
    let first = out[0];
    while out.len() > 2 {
        let i = out.len() - 2;
        if len(&first, &out[i]) >= VERTEX_DIST_EPSILON {
            break;
        }
        out.remove(i);
    }
    out
}
