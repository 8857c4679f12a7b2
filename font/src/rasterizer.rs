//! The rasterization collaborator seam.
//!
//! Lengths are in the engine's native 26.6 fixed point (1/64 pixel) unless
//! noted otherwise; the font instance normalizes them.

use thiserror::Error;

/// Pixel layout of a rasterized coverage bitmap. Only [`PixelFormat::Gray8`]
/// can be placed in the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8 bits per pixel grayscale coverage.
    Gray8,
    /// 1 bit per pixel monochrome.
    Mono,
    Lcd,
    Bgra,
    Unknown,
}

/// A coverage bitmap as produced by the engine. Source rows are `stride`
/// bytes apart and may carry padding beyond `width`.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

/// Horizontal glyph metrics, 26.6 fixed point.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphMetrics {
    pub advance: i64,
    pub bearing_x: i64,
    pub bearing_y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    pub bitmap: GlyphBitmap,
    pub metrics: GlyphMetrics,
}

/// Face-level metrics reported at open time, in font design units.
#[derive(Debug, Clone, Copy)]
pub struct FaceMetrics {
    /// The pixel size the face was opened at.
    pub pixel_size: u32,
    pub units_per_em: u16,
    /// Typically negative (below the baseline).
    pub descender: i32,
    /// Line spacing. A non-positive value means the font reports nothing
    /// usable and a fallback must be derived from the bounding box.
    pub height: i32,
    /// `bboxYMax - bboxYMin` of the font's global bounding box.
    pub bbox_height: i32,
}

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("rasterization failed: {0}")]
    Engine(String),
}

/// Narrow interface to the outline-font engine: resolve indices, render
/// coverage bitmaps, answer pairwise kerning queries.
pub trait GlyphRasterizer {
    /// Engine-assigned glyph index for a code point. 0 means the font has no
    /// glyph for it.
    fn glyph_index(&self, code_point: char) -> u32;

    fn rasterize(&mut self, code_point: char) -> Result<RasterizedGlyph, RasterizeError>;

    /// Kerning x offset between two glyph indices, 26.6 fixed point. Zero
    /// when the font carries no kerning for the pair.
    fn kerning(&self, left: u32, right: u32) -> i64;

    fn face_metrics(&self) -> FaceMetrics;
}
