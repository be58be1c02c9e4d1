use std::{fs, path::Path};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use tracing::{debug, info};

use crate::error::*;

/// Glyph used to measure the cell size of a monospace font.
pub const REFERENCE_GLYPH: char = '#';

/// DejaVu Sans Mono Bold, used when no font file is configured.
const EMBEDDED_FONT: &[u8] = include_bytes!("DejaVuSansMono-Bold.ttf");

/// Draws single glyphs into a canvas. Every glyph occupies one
/// `cell_size()` box whose top-left corner is the drawing offset.
pub trait GlyphRasterizer {
    /// `(width, height)` of one glyph cell in pixels.
    fn cell_size(&self) -> (u32, u32);

    fn draw_glyph(&self, canvas: &mut RgbImage, x: i32, y: i32, glyph: char, color: Rgb<u8>);
}

/// Rasterizer backed by a TrueType/OpenType monospace font at a fixed em size.
pub struct FontRasterizer {
    font: FontVec,
    scale: PxScale,
    cell_size: (u32, u32),
}

impl FontRasterizer {
    pub fn open(path: &Path, size: u32) -> Result<Self, Error> {
        let data = fs::read(path).map_err(|e| {
            Error::Font(format!("{ERROR_OPENING_FONT} {}: {e}", path.display()))
        })?;
        let rasterizer = Self::from_bytes(data, size)?;
        info!(
            font = %path.display(),
            size,
            cell_width = rasterizer.cell_size.0,
            cell_height = rasterizer.cell_size.1,
            "loaded font"
        );
        Ok(rasterizer)
    }

    pub fn embedded(size: u32) -> Result<Self, Error> {
        let rasterizer = Self::from_bytes(EMBEDDED_FONT.to_vec(), size)?;
        info!(
            size,
            cell_width = rasterizer.cell_size.0,
            cell_height = rasterizer.cell_size.1,
            "loaded embedded font"
        );
        Ok(rasterizer)
    }

    /// `size` is the em size in pixels, as in point-size font APIs.
    pub fn from_bytes(data: Vec<u8>, size: u32) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::Config(ERROR_FONT_SIZE.to_string()));
        }
        let font = FontVec::try_from_vec(data)
            .map_err(|e| Error::Font(format!("{ERROR_INVALID_FONT}: {e}")))?;
        let scale = em_scale(&font, size);
        let cell_size = measure_cell(&font, scale);
        debug!(?cell_size, "measured reference glyph");
        if cell_size.0 == 0 || cell_size.1 == 0 {
            return Err(Error::Font(format!(
                "{ERROR_EMPTY_GLYPH_CELL}: {cell_size:?}"
            )));
        }
        Ok(Self {
            font,
            scale,
            cell_size,
        })
    }
}

/// `PxScale` whose em square is `size` pixels. ab_glyph scales so that
/// `ascent - descent` equals the `PxScale`, so the em size is stretched by
/// `height / units_per_em`.
fn em_scale(font: &FontVec, size: u32) -> PxScale {
    let units_per_em = font.units_per_em().unwrap_or(1.0);
    PxScale::from(size as f32 * font.height_unscaled() / units_per_em)
}

/// Advance width and line height of the reference glyph, rounded to whole
/// pixels.
fn measure_cell(font: &FontVec, scale: PxScale) -> (u32, u32) {
    let scaled = font.as_scaled(scale);
    let id = scaled.glyph_id(REFERENCE_GLYPH);
    let width = scaled.h_advance(id).round().max(0.0) as u32;
    let height = scaled.height().round().max(0.0) as u32;
    (width, height)
}

impl GlyphRasterizer for FontRasterizer {
    fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }

    fn draw_glyph(&self, canvas: &mut RgbImage, x: i32, y: i32, glyph: char, color: Rgb<u8>) {
        if glyph.is_whitespace() {
            return;
        }
        let mut buf = [0u8; 4];
        imageproc::drawing::draw_text_mut(
            canvas,
            color,
            x,
            y,
            self.scale,
            &self.font,
            glyph.encode_utf8(&mut buf),
        );
    }
}
