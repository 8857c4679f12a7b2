//! The texture collaborator seam: a store owns the backing textures and the
//! atlas addresses them through opaque ids.

use std::collections::HashMap;

#[cfg(feature = "wgpu")]
pub mod wgpu;

/// Opaque handle to a texture owned by a [`TextureStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Single-channel 2D texture storage.
///
/// All coordinates are texels; `pixels` buffers are tightly packed, one byte
/// per texel, row-major.
pub trait TextureStore {
    fn create(&mut self, width: u32, height: u32) -> TextureId;

    /// Upload a sub-rectangle. The rectangle must lie within the texture.
    fn upload(&mut self, texture: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]);

    /// Read the full texture contents back into a tightly packed buffer.
    fn read_back(&mut self, texture: TextureId) -> Vec<u8>;

    fn destroy(&mut self, texture: TextureId);
}

/// CPU-side store. Backs tests, headless use, and the atlas-dump demo.
#[derive(Debug, Default)]
pub struct MemoryTextureStore {
    next_id: u32,
    canvases: HashMap<TextureId, Canvas>,
}

#[derive(Debug)]
struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MemoryTextureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct access to a texture's pixels.
    pub fn pixels(&self, texture: TextureId) -> Option<&[u8]> {
        self.canvases.get(&texture).map(|c| c.pixels.as_slice())
    }
}

impl TextureStore for MemoryTextureStore {
    fn create(&mut self, width: u32, height: u32) -> TextureId {
        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.canvases.insert(
            id,
            Canvas {
                width,
                height,
                pixels: vec![0; (width * height) as usize],
            },
        );
        id
    }

    fn upload(&mut self, texture: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        let canvas = self.canvases.get_mut(&texture).expect("unknown texture");
        assert!(x + width <= canvas.width && y + height <= canvas.height);
        assert_eq!(pixels.len(), (width * height) as usize);

        for row in 0..height as usize {
            let src = row * width as usize;
            let dst = (y as usize + row) * canvas.width as usize + x as usize;
            canvas.pixels[dst..dst + width as usize]
                .copy_from_slice(&pixels[src..src + width as usize]);
        }
    }

    fn read_back(&mut self, texture: TextureId) -> Vec<u8> {
        self.canvases
            .get(&texture)
            .expect("unknown texture")
            .pixels
            .clone()
    }

    fn destroy(&mut self, texture: TextureId) {
        self.canvases.remove(&texture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_is_zero_filled() {
        let mut store = MemoryTextureStore::new();
        let id = store.create(4, 4);
        assert_eq!(store.read_back(id), vec![0; 16]);
    }

    #[test]
    fn upload_places_sub_rectangle() {
        let mut store = MemoryTextureStore::new();
        let id = store.create(4, 4);
        store.upload(id, 1, 2, 2, 2, &[1, 2, 3, 4]);

        let pixels = store.read_back(id);
        assert_eq!(&pixels[2 * 4 + 1..2 * 4 + 3], &[1, 2]);
        assert_eq!(&pixels[3 * 4 + 1..3 * 4 + 3], &[3, 4]);
        assert_eq!(pixels[0], 0);
    }

    #[test]
    fn destroy_forgets_texture() {
        let mut store = MemoryTextureStore::new();
        let id = store.create(2, 2);
        store.destroy(id);
        assert!(store.pixels(id).is_none());
    }
}
