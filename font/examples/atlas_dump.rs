//! Rasterizes the printable ASCII range of a font into the atlas and writes
//! it out as a grayscale PNG.
//!
//! Usage: atlas_dump <font-file> [pixel-size] [output.png]

use std::{fs, io::BufWriter};

use anyhow::{Context, Result};
use glyphtex_atlas::MemoryTextureStore;
use glyphtex_font::{FontEngine, FontTexture, FtRasterizer};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args.next().context("usage: atlas_dump <font-file> [pixel-size] [output.png]")?;
    let pixel_size = args.next().map(|s| s.parse()).transpose()?.unwrap_or(14);
    let output = args.next().unwrap_or_else(|| "atlas.png".into());

    let data = fs::read(&font_path).with_context(|| format!("reading {font_path}"))?;
    let engine = FontEngine::new()?;
    let rasterizer = FtRasterizer::new(&engine, data, pixel_size)?;
    let mut font = FontTexture::new(rasterizer, MemoryTextureStore::new(), 0, 0.0);

    for code_point in ' '..='~' {
        let glyph = font.glyph(code_point)?;
        log::debug!("{code_point:?} -> {:?}", glyph.tex_rect);
    }

    let (width, height) = (font.texture_width(), font.texture_height());
    let texture = font.texture();
    let pixels = font.store().pixels(texture).context("atlas texture missing")?;

    let file = fs::File::create(&output).with_context(|| format!("creating {output}"))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.write_header()?.write_image_data(pixels)?;

    println!("wrote {width}x{height} atlas to {output}");
    Ok(())
}
