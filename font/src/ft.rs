//! FreeType-backed implementation of the rasterization collaborator.

use std::rc::Rc;

use freetype::{
    Library,
    bitmap::PixelMode,
    face::{Face, KerningMode, LoadFlag},
};

use crate::{
    FontError,
    rasterizer::{
        FaceMetrics, GlyphBitmap, GlyphMetrics, GlyphRasterizer, PixelFormat, RasterizeError,
        RasterizedGlyph,
    },
};

/// Handle to the FreeType library. The library context is shared by cloning
/// the handle and passed explicitly to every face constructor; there is no
/// hidden process-wide state. Not thread-safe, like the engine underneath.
#[derive(Clone)]
pub struct FontEngine {
    library: Rc<Library>,
}

impl FontEngine {
    pub fn new() -> Result<Self, FontError> {
        let library = Library::init().map_err(|e| FontError::Engine {
            reason: e.to_string(),
        })?;
        Ok(Self {
            library: Rc::new(library),
        })
    }
}

/// One font face opened at a fixed pixel size.
pub struct FtRasterizer {
    face: Face,
    pixel_size: u32,
    // keeps the library alive for as long as the face handle exists
    _engine: FontEngine,
}

impl FtRasterizer {
    /// Open a face from font file bytes at the given pixel size. A size of 0
    /// is coerced to 14.
    pub fn new(engine: &FontEngine, data: Vec<u8>, pixel_size: u32) -> Result<Self, FontError> {
        let pixel_size = if pixel_size == 0 { 14 } else { pixel_size };

        let face = engine
            .library
            .new_memory_face(data, 0)
            .map_err(|e| FontError::FaceOpen {
                reason: e.to_string(),
            })?;

        face.set_pixel_sizes(0, pixel_size)
            .map_err(|e| FontError::PixelSize {
                size: pixel_size,
                reason: e.to_string(),
            })?;

        // FreeType selects a unicode charmap at open time when the font has
        // one; a face without an active charmap cannot map code points.
        if face.raw().charmap.is_null() {
            return Err(FontError::UnicodeUnsupported);
        }

        Ok(Self {
            face,
            pixel_size,
            _engine: engine.clone(),
        })
    }
}

impl GlyphRasterizer for FtRasterizer {
    fn glyph_index(&self, code_point: char) -> u32 {
        self.face.get_char_index(code_point as usize).unwrap_or(0)
    }

    fn rasterize(&mut self, code_point: char) -> Result<RasterizedGlyph, RasterizeError> {
        self.face
            .load_char(
                code_point as usize,
                LoadFlag::RENDER | LoadFlag::FORCE_AUTOHINT,
            )
            .map_err(|e| RasterizeError::Engine(e.to_string()))?;

        let slot = self.face.glyph();
        let metrics = slot.metrics();
        let bitmap = slot.bitmap();

        let width = bitmap.width() as u32;
        let height = bitmap.rows() as u32;
        let data = if width == 0 || height == 0 {
            Vec::new()
        } else {
            bitmap.buffer().to_vec()
        };

        let format = match bitmap.pixel_mode() {
            Ok(PixelMode::Gray) => PixelFormat::Gray8,
            Ok(PixelMode::Mono) => PixelFormat::Mono,
            Ok(PixelMode::Lcd) | Ok(PixelMode::LcdV) => PixelFormat::Lcd,
            Ok(PixelMode::Bgra) => PixelFormat::Bgra,
            _ => PixelFormat::Unknown,
        };

        Ok(RasterizedGlyph {
            bitmap: GlyphBitmap {
                width,
                height,
                stride: bitmap.pitch().unsigned_abs() as usize,
                format,
                data,
            },
            metrics: GlyphMetrics {
                advance: slot.advance().x as i64,
                bearing_x: metrics.horiBearingX as i64,
                bearing_y: metrics.horiBearingY as i64,
                width: metrics.width as i64,
                height: metrics.height as i64,
            },
        })
    }

    fn kerning(&self, left: u32, right: u32) -> i64 {
        self.face
            .get_kerning(left, right, KerningMode::KerningDefault)
            .map(|v| v.x as i64)
            .unwrap_or(0)
    }

    fn face_metrics(&self) -> FaceMetrics {
        let raw = self.face.raw();
        FaceMetrics {
            pixel_size: self.pixel_size,
            units_per_em: raw.units_per_EM,
            descender: raw.descender as i32,
            height: raw.height as i32,
            bbox_height: (raw.bbox.yMax - raw.bbox.yMin) as i32,
        }
    }
}
