use thiserror::Error;

use glyphtex_atlas::AtlasError;

/// Construction-time and atlas-capacity failures. Both are unrecoverable for
/// the font instance; per-glyph rasterization problems are absorbed instead
/// (the glyph renders blank).
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font engine initialization failed: {reason}")]
    Engine { reason: String },

    #[error("failed to open font face: {reason}")]
    FaceOpen { reason: String },

    #[error("failed to set pixel size {size}: {reason}")]
    PixelSize { size: u32, reason: String },

    #[error("font has no unicode character map")]
    UnicodeUnsupported,

    #[error(transparent)]
    Atlas(#[from] AtlasError),
}
