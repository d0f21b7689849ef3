//! Path Dashing
//!
//! # Example
//!
//!     use canvas_raster::{Path, Dash, VertexSource, PathCommand};
//!
//!     let mut path = Path::new();
//!     path.move_to( 0.0, 0.0);
//!     path.line_to(10.0, 0.0);
//!
//!     let mut dash = Dash::new( path );
//!     dash.add_dash(2.0, 3.0);
//!     dash.dash_start(0.0);
//!
//!     let v = dash.xconvert();
//!     let n = v.iter().filter(|v| v.cmd == PathCommand::MoveTo).count();
//!     assert_eq!(n, 2);
//!

use crate::paths::PathCommand;
use crate::paths::Path;
use crate::paths::Vertex;
use crate::paths::len;
use crate::paths::split;

use crate::VertexSource;

/// Dash converter for Paths and Vertex Sources
///
/// The pattern alternates between lengths drawn and lengths skipped. Each
///   drawn length becomes its own open sub-path.
#[derive(Debug)]
pub struct Dash<T: VertexSource> {
    /// Source of Verticies
    source: T,
    /// Lengths of the pattern, even number of entries
    dashes: Vec<f64>,
    /// Distance into the pattern at the start of each sub-path
    start: f64,
}

impl<T> VertexSource for Dash<T> where T: VertexSource {
    fn xconvert(&self) -> Vec<Vertex> {
        self.dash()
    }
}

impl<T> Dash<T> where T: VertexSource {
    /// Create a new Dash converter, without a pattern
    pub fn new(source: T) -> Self {
        Self { source, dashes: vec![], start: 0.0 }
    }
    /// Append a drawn length and a skipped length to the pattern
    pub fn add_dash(&mut self, dash_len: f64, gap_len: f64) {
        self.dashes.push(dash_len);
        self.dashes.push(gap_len);
    }
    /// Replace the pattern
    ///
    /// An odd number of lengths is repeated once to make it even
    pub fn dashes(&mut self, dashes: &[f64]) {
        self.dashes = dashes.to_vec();
        if dashes.len() % 2 == 1 {
            self.dashes.extend_from_slice(dashes);
        }
    }
    /// Remove the pattern
    pub fn remove_all_dashes(&mut self) {
        self.dashes.clear();
    }
    /// Distance into the pattern where each sub-path begins
    pub fn dash_start(&mut self, start: f64) {
        self.start = start;
    }
    /// Total length of the pattern
    fn pattern_len(&self) -> f64 {
        self.dashes.iter().sum()
    }
    /// Pattern can be applied
    ///
    /// Empty patterns, negative or non-finite lengths and patterns with a
    ///   total length of zero are not applied
    pub fn is_valid(&self) -> bool {
        ! self.dashes.is_empty() &&
            self.dashes.iter().all(|d| d.is_finite() && *d >= 0.0) &&
            self.pattern_len() > 0.0
    }
    /// Index into the pattern and distance remaining in that entry at
    ///   the start of a sub-path
    fn initial(&self) -> (usize, f64) {
        let total = self.pattern_len();
        let mut pos = if self.start.is_finite() {
            self.start.rem_euclid(total)
        } else {
            0.0
        };
        let n = self.dashes.len();
        let mut k = 0;
        while pos >= self.dashes[k] {
            pos -= self.dashes[k];
            k = (k + 1) % n;
        }
        (k, self.dashes[k] - pos)
    }
    fn dash(&self) -> Vec<Vertex> {
        let src = self.source.xconvert();
        if ! self.is_valid() {
            log::trace!("dash: pattern {:?} not applied", self.dashes);
            return src;
        }
        let path = Path::from_vertices(src).flatten();
        let v = path.vertices();
        let mut out = vec![];
        for (m1, m2) in split(v) {
            self.dash_sub_path(&v[m1 ..= m2], &mut out);
        }
        out
    }
    /// Dash a single, flattened, sub-path
    fn dash_sub_path(&self, v: &[Vertex], out: &mut Vec<Vertex>) {
        let closed = v.iter().any(|v| v.cmd == PathCommand::Close);
        // Points along the sub-path; Close returns to the start
        let pts : Vec<Vertex> = v.iter()
            .map(|p| Vertex::line_to(p.x, p.y))
            .collect();
        if pts.len() < 2 {
            return;
        }
        let n = self.dashes.len();
        let (mut k, mut remaining) = self.initial();
        let on_at_start = k % 2 == 0;
        let mut dashes : Vec<Vec<Vertex>> = vec![];
        let mut cur : Option<Vec<Vertex>> = if on_at_start {
            Some(vec![Vertex::move_to(pts[0].x, pts[0].y)])
        } else {
            None
        };
        let mut gaps = 0;
        for w in pts.windows(2) {
            let (a, b) = (w[0], w[1]);
            let seg = len(&a, &b);
            if seg <= 0.0 {
                continue;
            }
            let mut t = 0.0;
            while seg - t > remaining {
                t += remaining;
                let x = a.x + (b.x - a.x) * t / seg;
                let y = a.y + (b.y - a.y) * t / seg;
                match cur.take() {
                    Some(mut d) => {
                        d.push(Vertex::line_to(x, y));
                        dashes.push(d);
                        gaps += 1;
                    },
                    None => cur = Some(vec![Vertex::move_to(x, y)]),
                }
                k = (k + 1) % n;
                remaining = self.dashes[k];
            }
            remaining -= seg - t;
            if let Some(ref mut d) = cur {
                d.push(Vertex::line_to(b.x, b.y));
            }
        }
        if let Some(mut d) = cur.take() {
            if closed && gaps == 0 && on_at_start {
                // Never switched off, keep the closed sub-path
                out.extend_from_slice(v);
                return;
            }
            if closed && on_at_start && ! dashes.is_empty() {
                // Last dash runs into the first one
                let first = dashes.remove(0);
                d.extend_from_slice(&first[1..]);
                dashes.push(d);
            } else {
                dashes.push(d);
            }
        }
        for d in dashes {
            if d.len() >= 2 {
                out.extend(d);
            }
        }
    }
}
