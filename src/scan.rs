//! Scanlines
//!
//! A scanline holds the coverage of a single row as a list of spans

/// Run of pixels in a row with individual coverage values
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Span {
    /// Starting x position
    pub x: i64,
    /// Number of pixels
    pub len: i64,
    /// Coverage of each pixel, [0,255]
    pub covers: Vec<u64>,
}

/// Scanline with an 8-bit coverage value per pixel
#[derive(Debug,Default)]
pub struct ScanlineU8 {
    /// Last x value added
    last_x: i64,
    /// Spans of the current row
    pub spans: Vec<Span>,
    /// Current row
    pub y: i64,
}

const LAST_X: i64 = 0x7FFF_FFF0;

impl ScanlineU8 {
    /// Create a new empty scanline
    pub fn new() -> Self {
        Self { last_x: LAST_X, y: 0, spans: vec![] }
    }
    /// Remove all spans
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
    }
    /// Set the row the spans belong to
    pub fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    /// Number of spans
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Add `len` pixels starting at `x` with the same coverage
    ///
    /// Extends the previous span if the two touch
    pub fn add_span(&mut self, x: i64, len: i64, cover: u64) {
        if len <= 0 {
            return;
        }
        match self.spans.last_mut() {
            Some(cur) if x == self.last_x + 1 => {
                cur.len += len;
                cur.covers.extend(std::iter::repeat(cover).take(len as usize));
            },
            _ => self.spans.push( Span { x, len, covers: vec![cover; len as usize] } ),
        }
        self.last_x = x + len - 1;
    }
    /// Add a single pixel at `x`
    pub fn add_cell(&mut self, x: i64, cover: u64) {
        self.add_span(x, 1, cover);
    }
}
