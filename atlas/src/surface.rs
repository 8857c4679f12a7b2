use tracing::instrument;

use crate::{AtlasError, TextureId, TextureStore};

/// The atlas starts out deliberately small and doubles on demand.
pub const INITIAL_DIM: u32 = 32;
/// Hard cap in either dimension. Growing past this is a fatal error.
pub const MAX_DIM: u32 = 2048;

/// The single backing canvas of the atlas.
///
/// Growth replaces the texture but preserves its content at the origin, so
/// rectangles handed out earlier keep their coordinates and their pixels.
#[derive(Debug)]
pub struct AtlasSurface<S: TextureStore> {
    store: S,
    texture: TextureId,
    width: u32,
    height: u32,
}

impl<S: TextureStore> AtlasSurface<S> {
    pub fn new(mut store: S) -> Self {
        let texture = store.create(INITIAL_DIM, INITIAL_DIM);
        Self {
            store,
            texture,
            width: INITIAL_DIM,
            height: INITIAL_DIM,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Double both dimensions, carrying all pixel content over.
    pub fn grow(&mut self) -> Result<(), AtlasError> {
        self.recreate(self.width * 2, self.height * 2)
    }

    #[instrument(skip_all)]
    fn recreate(&mut self, width: u32, height: u32) -> Result<(), AtlasError> {
        if width > MAX_DIM || height > MAX_DIM {
            return Err(AtlasError::Overflow { width, height });
        }

        log::info!(
            "growing glyph atlas from {}x{} to {width}x{height}",
            self.width,
            self.height
        );

        let new_texture = self.store.create(width, height);
        let pixels = self.store.read_back(self.texture);
        self.store
            .upload(new_texture, 0, 0, self.width, self.height, &pixels);
        self.store.destroy(self.texture);

        self.texture = new_texture;
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[instrument(skip_all)]
    pub fn upload(&mut self, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        debug_assert!(x + width <= self.width && y + height <= self.height);
        self.store.upload(self.texture, x, y, width, height, pixels);
    }

    /// Blank a sub-rectangle.
    pub fn clear(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let wipe = vec![0u8; (width * height) as usize];
        self.upload(x, y, width, height, &wipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTextureStore;

    #[test]
    fn starts_at_initial_dim() {
        let surface = AtlasSurface::new(MemoryTextureStore::new());
        assert_eq!((surface.width(), surface.height()), (INITIAL_DIM, INITIAL_DIM));
    }

    #[test]
    fn grow_preserves_content_at_origin() {
        let mut surface = AtlasSurface::new(MemoryTextureStore::new());
        surface.upload(3, 5, 2, 2, &[10, 20, 30, 40]);

        surface.grow().unwrap();
        assert_eq!((surface.width(), surface.height()), (64, 64));

        let texture = surface.texture();
        let pixels = surface.store_mut().read_back(texture);
        assert_eq!(pixels[5 * 64 + 3], 10);
        assert_eq!(pixels[5 * 64 + 4], 20);
        assert_eq!(pixels[6 * 64 + 3], 30);
        assert_eq!(pixels[6 * 64 + 4], 40);
    }

    #[test]
    fn grow_stops_at_max_dim() {
        let mut surface = AtlasSurface::new(MemoryTextureStore::new());
        // 32 -> 64 -> 128 -> 256 -> 512 -> 1024 -> 2048
        for _ in 0..6 {
            surface.grow().unwrap();
        }
        assert_eq!(surface.width(), MAX_DIM);
        assert_eq!(
            surface.grow(),
            Err(AtlasError::Overflow {
                width: 4096,
                height: 4096
            })
        );
        // the surface is unchanged after a failed growth
        assert_eq!(surface.width(), MAX_DIM);
    }

    #[test]
    fn clear_blanks_rectangle() {
        let mut surface = AtlasSurface::new(MemoryTextureStore::new());
        surface.upload(0, 0, 4, 1, &[255; 4]);
        surface.clear(1, 0, 2, 1);

        let texture = surface.texture();
        let pixels = surface.store_mut().read_back(texture);
        assert_eq!(&pixels[0..4], &[255, 0, 0, 255]);
    }
}
