//! The glyph cache: one font face at one pixel size, backed by one atlas.

use std::collections::HashMap;

use glyphtex_atlas::{AtlasRect, GlyphAtlas, TextureId, TextureStore};

use crate::{
    FontError, Glyph, GlyphBounds,
    rasterizer::{GlyphBitmap, GlyphRasterizer, PixelFormat},
};

/// A font instance: maps code points to cached [`Glyph`] records, rasterizing
/// and packing them into the atlas on first request.
///
/// Single-threaded by design; every operation runs to completion on the
/// calling thread.
pub struct FontTexture<R, S: TextureStore> {
    rasterizer: R,
    atlas: GlyphAtlas<S>,
    glyphs: HashMap<char, Glyph>,
    /// Converts the rasterizer's 26.6 units into normalized metrics.
    norm_scale: f32,
    line_height: f32,
    descender: f32,
    outline_width: u32,
    outline_weight: f32,
    padding: u32,
}

impl<R: GlyphRasterizer, S: TextureStore> FontTexture<R, S> {
    pub fn new(rasterizer: R, store: S, outline_width: u32, outline_weight: f32) -> Self {
        let face = rasterizer.face_metrics();
        let pixel_size = face.pixel_size.max(1);
        let norm_scale = 1.0 / (pixel_size * 64) as f32;

        // design units -> 26.6 at the current size (the engine's y scale)
        let to_26_6 = (pixel_size * 64) as f32 / face.units_per_em.max(1) as f32;
        let line_units = if face.height > 0 {
            face.height as f32
        } else {
            1.25 * face.bbox_height as f32
        };

        Self {
            rasterizer,
            atlas: GlyphAtlas::new(store),
            glyphs: HashMap::new(),
            norm_scale,
            line_height: line_units * to_26_6 * norm_scale,
            descender: face.descender as f32 * to_26_6 * norm_scale,
            outline_width,
            outline_weight,
            padding: 0,
        }
    }

    /// Reserve `padding` transparent texels around every glyph in the atlas.
    /// Defaults to zero; bilinear filtering may bleed adjacent glyphs into
    /// each other without it.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// The cached record for a code point, rasterizing and placing it on the
    /// first request. Rasterization failure yields a degenerate zero-size
    /// glyph; only atlas overflow is an error.
    pub fn glyph(&mut self, code_point: char) -> Result<&Glyph, FontError> {
        if !self.glyphs.contains_key(&code_point) {
            let glyph = self.load_glyph(code_point)?;
            self.glyphs.insert(code_point, glyph);
        }
        Ok(&self.glyphs[&code_point])
    }

    /// Kerned advance for the pair: `left.advance` plus the normalized pair
    /// offset. Loads both glyphs as a side effect.
    pub fn kerning(&mut self, left: char, right: char) -> Result<f32, FontError> {
        let left = *self.glyph(left)?;
        let right = *self.glyph(right)?;
        Ok(self.kerning_glyphs(&left, &right))
    }

    /// Same as [`kerning`](Self::kerning) for already-resolved records;
    /// avoids the cache lookups in hot shaping loops.
    pub fn kerning_glyphs(&self, left: &Glyph, right: &Glyph) -> f32 {
        let kerning = self.rasterizer.kerning(left.index, right.index);
        left.advance + kerning as f32 * self.norm_scale
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn descender(&self) -> f32 {
        self.descender
    }

    pub fn outline_width(&self) -> u32 {
        self.outline_width
    }

    pub fn outline_weight(&self) -> f32 {
        self.outline_weight
    }

    pub fn texture(&self) -> TextureId {
        self.atlas.texture()
    }

    pub fn texture_width(&self) -> u32 {
        self.atlas.width()
    }

    pub fn texture_height(&self) -> u32 {
        self.atlas.height()
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn store(&self) -> &S {
        self.atlas.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.atlas.store_mut()
    }

    fn load_glyph(&mut self, code_point: char) -> Result<Glyph, FontError> {
        // The index is resolved first and kept even when rendering fails.
        let mut glyph = Glyph {
            index: self.rasterizer.glyph_index(code_point),
            ..Glyph::default()
        };

        let rasterized = match self.rasterizer.rasterize(code_point) {
            Ok(rasterized) => rasterized,
            Err(err) => {
                log::error!("couldn't load glyph {code_point:?}: {err}");
                return Ok(glyph);
            }
        };

        let scale = self.norm_scale;
        let metrics = rasterized.metrics;
        glyph.advance = metrics.advance as f32 * scale;
        glyph.height = metrics.height as f32 * scale;
        glyph.descender = (metrics.bearing_y - metrics.height) as f32 * scale;
        glyph.bounds = GlyphBounds {
            x: metrics.bearing_x as f32 * scale,
            y: metrics.bearing_y as f32 * scale - self.descender,
            width: metrics.width as f32 * scale,
            height: -(metrics.height as f32 * scale),
        };

        let bitmap = &rasterized.bitmap;
        if bitmap.width == 0 || bitmap.height == 0 {
            // nothing to place, e.g. a space
            return Ok(glyph);
        }
        if bitmap.format != PixelFormat::Gray8 {
            log::error!(
                "glyph {code_point:?} has unsupported pixel format {:?}",
                bitmap.format
            );
            return Ok(glyph);
        }

        let packed = pack_tight(bitmap);
        glyph.tex_rect = self.place(bitmap.width, bitmap.height, &packed)?;
        Ok(glyph)
    }

    fn place(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<AtlasRect, FontError> {
        let pad = self.padding;
        let mut rect = self.atlas.allocate(width + 2 * pad, height + 2 * pad)?;
        if pad > 0 {
            // blank the padded rectangle before the glyph lands inside it
            self.atlas.clear(rect);
            rect.x += pad;
            rect.y += pad;
            rect.width = width;
            rect.height = height;
        }
        self.atlas.upload(rect, pixels);
        Ok(rect)
    }
}

/// Strip the engine's row stride into a tightly packed buffer.
fn pack_tight(bitmap: &GlyphBitmap) -> Vec<u8> {
    let width = bitmap.width as usize;
    let height = bitmap.height as usize;

    let mut packed = vec![0u8; width * height];
    for row in 0..height {
        let src = row * bitmap.stride;
        packed[row * width..(row + 1) * width].copy_from_slice(&bitmap.data[src..src + width]);
    }
    packed
}
