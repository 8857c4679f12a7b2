//! Row-based rectangle packing over a growable atlas surface.

use crate::{AtlasError, TextureId, TextureStore, surface::AtlasSurface};

/// A rectangle in atlas texel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A horizontal strip of the atlas. `fill` is the next free x offset.
#[derive(Debug)]
struct Row {
    y: u32,
    height: u32,
    fill: u32,
}

/// Packs glyph-sized rectangles into rows, growing the surface when no row
/// has room. Rectangles are never moved or reclaimed; rows are addressed by
/// index into an append-only list.
#[derive(Debug)]
pub struct GlyphAtlas<S: TextureStore> {
    surface: AtlasSurface<S>,
    rows: Vec<Row>,
    next_row_y: u32,
}

impl<S: TextureStore> GlyphAtlas<S> {
    /// A row may be reused for a slightly smaller glyph, up to this
    /// height ratio. Avoids fragmenting into many near-identical rows.
    const MAX_ROW_RATIO: f32 = 1.3;

    pub fn new(store: S) -> Self {
        Self {
            surface: AtlasSurface::new(store),
            rows: Vec::new(),
            next_row_y: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn texture(&self) -> TextureId {
        self.surface.texture()
    }

    pub fn store(&self) -> &S {
        self.surface.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.surface.store_mut()
    }

    /// Reserve a `width` x `height` rectangle. Never returns an invalid
    /// rectangle; grows the surface as needed and fails only when growth
    /// would exceed the maximum texture size.
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<AtlasRect, AtlasError> {
        debug_assert!(width > 0 && height > 0);

        let index = match self.find_row(width, height) {
            Some(index) => index,
            None => self.add_row(width, height)?,
        };

        let row = &mut self.rows[index];
        let rect = AtlasRect {
            x: row.fill,
            y: row.y,
            width,
            height,
        };
        row.fill += width;
        Ok(rect)
    }

    /// First-fit scan in creation order.
    fn find_row(&self, width: u32, height: u32) -> Option<usize> {
        self.rows.iter().position(|row| {
            let ratio = row.height as f32 / height as f32;
            (1.0..=Self::MAX_ROW_RATIO).contains(&ratio)
                && self.surface.width() - row.fill >= width
        })
    }

    /// Append a new row, growing the surface until it fits. The row gets 10%
    /// vertical slack so slightly taller glyphs can share it later.
    fn add_row(&mut self, width: u32, height: u32) -> Result<usize, AtlasError> {
        let row_height = height + 2 * height / 10;
        while self.next_row_y + row_height >= self.surface.height()
            || width > self.surface.width()
        {
            self.surface.grow()?;
        }

        self.rows.push(Row {
            y: self.next_row_y,
            height: row_height,
            fill: 0,
        });
        self.next_row_y += row_height;
        Ok(self.rows.len() - 1)
    }

    pub fn upload(&mut self, rect: AtlasRect, pixels: &[u8]) {
        self.surface
            .upload(rect.x, rect.y, rect.width, rect.height, pixels);
    }

    pub fn clear(&mut self, rect: AtlasRect) {
        self.surface.clear(rect.x, rect.y, rect.width, rect.height);
    }
}
