//! Colors

use image::Rgba;

/// Access to color components
///
/// Components are `u8` in the range [0,255]. Colors are straight, not
///   pre-multiplied, alpha.
pub trait Color: std::fmt::Debug + Copy {
    /// Red component [0,255]
    fn red8(&self) -> u8;
    /// Green component [0,255]
    fn green8(&self) -> u8;
    /// Blue component [0,255]
    fn blue8(&self) -> u8;
    /// Alpha component [0,255]
    fn alpha8(&self) -> u8;
    /// Color is fully transparent and draws nothing
    fn is_transparent(&self) -> bool {
        self.alpha8() == 0
    }
}

/// Color as Red, Green, Blue, and Alpha
#[derive(Debug,Default,Copy,Clone,PartialEq,Eq,Hash)]
pub struct Rgba8 {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Rgba8 {
    /// Create new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba8 { r, g, b, a }
    }
    /// White Color (255,255,255,255)
    pub fn white() -> Self {
        Self::new(255,255,255,255)
    }
    /// Black Color (0,0,0,255)
    pub fn black() -> Self {
        Self::new(0,0,0,255)
    }
    /// Fully transparent black (0,0,0,0)
    pub fn transparent() -> Self {
        Self::new(0,0,0,0)
    }
    /// Copy any color into an Rgba8
    pub fn from_trait<C: Color>(c: C) -> Self {
        Self::new(c.red8(), c.green8(), c.blue8(), c.alpha8())
    }
}

impl Color for Rgba8 {
    fn red8(&self) -> u8   { self.r }
    fn green8(&self) -> u8 { self.g }
    fn blue8(&self) -> u8  { self.b }
    fn alpha8(&self) -> u8 { self.a }
}

impl Color for Rgba<u8> {
    fn red8(&self) -> u8   { self[0] }
    fn green8(&self) -> u8 { self[1] }
    fn blue8(&self) -> u8  { self[2] }
    fn alpha8(&self) -> u8 { self[3] }
}

impl From<Rgba<u8>> for Rgba8 {
    fn from(c: Rgba<u8>) -> Rgba8 {
        Rgba8::new(c[0], c[1], c[2], c[3])
    }
}
impl From<Rgba8> for Rgba<u8> {
    fn from(c: Rgba8) -> Rgba<u8> {
        Rgba([c.r, c.g, c.b, c.a])
    }
}
