mod error;
mod glyph_atlas;
mod store;
mod surface;

pub use error::AtlasError;
pub use glyph_atlas::{AtlasRect, GlyphAtlas};
pub use store::{MemoryTextureStore, TextureId, TextureStore};
pub use surface::{AtlasSurface, INITIAL_DIM, MAX_DIM};

#[cfg(feature = "wgpu")]
pub use store::wgpu::WgpuTextureStore;
