use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// Growing the atlas any further would exceed the maximum texture size.
    /// Carries the dimensions the atlas would have needed.
    #[error("glyph atlas would exceed its maximum size: {width}x{height}")]
    Overflow { width: u32, height: u32 },
}
