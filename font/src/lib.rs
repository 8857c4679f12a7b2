mod error;
mod font_texture;
mod glyph;
mod rasterizer;

#[cfg(feature = "freetype")]
mod ft;

pub use error::FontError;
pub use font_texture::FontTexture;
pub use glyph::{Glyph, GlyphBounds};
pub use rasterizer::{
    FaceMetrics, GlyphBitmap, GlyphMetrics, GlyphRasterizer, PixelFormat, RasterizeError,
    RasterizedGlyph,
};

#[cfg(feature = "freetype")]
pub use ft::{FontEngine, FtRasterizer};

pub use glyphtex_atlas::{AtlasError, AtlasRect, TextureId, TextureStore};
