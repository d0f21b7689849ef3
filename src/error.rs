//! Errors

/// Errors from loading fonts
///
/// Rendering itself does not fail
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid font data: {0}")]
    Font(#[from] ab_glyph::InvalidFont),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
