use glyphtex_atlas::AtlasRect;

/// Normalized glyph bounding box. `height` is negative: the coverage bitmap
/// is stored top-down, and the sign tells the quad emitter to flip v.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything the text renderer needs for one code point. All linear metrics
/// are normalized (independent of the rendering pixel size); `tex_rect` is in
/// atlas texels.
///
/// Records are created on first request and never change afterwards — atlas
/// growth enlarges the canvas without moving placed rectangles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Glyph {
    /// Rasterizer-assigned index, used for kerning queries.
    pub index: u32,
    pub advance: f32,
    pub bounds: GlyphBounds,
    pub height: f32,
    /// Offset of the bounding box bottom below the baseline.
    pub descender: f32,
    /// Zero-sized when the glyph has no coverage (e.g. space) or failed to
    /// rasterize.
    pub tex_rect: AtlasRect,
}
