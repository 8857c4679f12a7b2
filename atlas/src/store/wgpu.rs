//! wgpu implementation of the texture store.

use std::collections::HashMap;

use wgpu::{
    AddressMode, BufferDescriptor, BufferUsages, CommandEncoderDescriptor, Device, Extent3d,
    FilterMode, MapMode, Origin3d, PollType, Queue, Sampler, SamplerBorderColor, SamplerDescriptor,
    TexelCopyBufferInfo, TexelCopyBufferLayout, TexelCopyTextureInfo, Texture, TextureAspect,
    TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor,
};

use super::{TextureId, TextureStore};

/// GPU-backed store for `R8Unorm` atlas textures.
///
/// `Device` and `Queue` are the cloneable wgpu handles, so the store can own
/// them for the lifetime of its textures.
#[derive(Debug)]
pub struct WgpuTextureStore {
    device: Device,
    queue: Queue,
    next_id: u32,
    textures: HashMap<TextureId, Entry>,
}

#[derive(Debug)]
struct Entry {
    texture: Texture,
    view: TextureView,
}

impl WgpuTextureStore {
    const FORMAT: TextureFormat = TextureFormat::R8Unorm;

    pub fn new(device: Device, queue: Queue) -> Self {
        Self {
            device,
            queue,
            next_id: 0,
            textures: HashMap::new(),
        }
    }

    /// View for binding the atlas texture in a render pass.
    pub fn view(&self, texture: TextureId) -> Option<&TextureView> {
        self.textures.get(&texture).map(|e| &e.view)
    }

    /// Linear-filtered sampler for the atlas. Clamps to a transparent border
    /// when the device supports it, to the edge otherwise.
    pub fn sampler(&self) -> Sampler {
        let border = self
            .device
            .features()
            .contains(wgpu::Features::ADDRESS_MODE_CLAMP_TO_BORDER);
        let address_mode = if border {
            AddressMode::ClampToBorder
        } else {
            AddressMode::ClampToEdge
        };

        self.device.create_sampler(&SamplerDescriptor {
            label: Some("Glyph atlas sampler"),
            address_mode_u: address_mode,
            address_mode_v: address_mode,
            address_mode_w: address_mode,
            mag_filter: FilterMode::Linear,
            min_filter: FilterMode::Linear,
            border_color: border.then_some(SamplerBorderColor::TransparentBlack),
            ..Default::default()
        })
    }

    fn entry(&self, texture: TextureId) -> &Entry {
        self.textures.get(&texture).expect("unknown texture")
    }
}

impl TextureStore for WgpuTextureStore {
    fn create(&mut self, width: u32, height: u32) -> TextureId {
        let texture = self.device.create_texture(&TextureDescriptor {
            label: Some("Glyph atlas"),
            size: Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: Self::FORMAT,
            usage: TextureUsages::TEXTURE_BINDING
                // COPY_SRC is needed for the read back when the atlas grows.
                | TextureUsages::COPY_DST
                | TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&TextureViewDescriptor::default());

        let id = TextureId(self.next_id);
        self.next_id += 1;
        self.textures.insert(id, Entry { texture, view });
        id
    }

    fn upload(&mut self, texture: TextureId, x: u32, y: u32, width: u32, height: u32, pixels: &[u8]) {
        self.queue.write_texture(
            TexelCopyTextureInfo {
                texture: &self.entry(texture).texture,
                mip_level: 0,
                origin: Origin3d { x, y, z: 0 },
                aspect: TextureAspect::All,
            },
            pixels,
            TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width),
                rows_per_image: None,
            },
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn read_back(&mut self, texture: TextureId) -> Vec<u8> {
        let entry = self.entry(texture);
        let (width, height) = (entry.texture.width(), entry.texture.height());
        let padded_bytes_per_row = width.next_multiple_of(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT);

        let buffer = self.device.create_buffer(&BufferDescriptor {
            label: Some("Glyph atlas read back"),
            size: padded_bytes_per_row as u64 * height as u64,
            usage: BufferUsages::COPY_DST | BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("Glyph atlas read back encoder"),
            });
        encoder.copy_texture_to_buffer(
            TexelCopyTextureInfo {
                texture: &entry.texture,
                mip_level: 0,
                origin: Origin3d::ZERO,
                aspect: TextureAspect::All,
            },
            TexelCopyBufferInfo {
                buffer: &buffer,
                layout: TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: None,
                },
            },
            Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit([encoder.finish()]);

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device.poll(PollType::Wait).expect("wgpu device poll failed");
        rx.recv()
            .expect("map callback dropped")
            .expect("atlas read back mapping failed");

        let data = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for row in data.chunks_exact(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..width as usize]);
        }
        drop(data);
        buffer.unmap();
        pixels
    }

    fn destroy(&mut self, texture: TextureId) {
        if let Some(entry) = self.textures.remove(&texture) {
            entry.texture.destroy();
        }
    }
}
