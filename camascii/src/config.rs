use std::path::PathBuf;

use crate::{
    error::*,
    maps::{CharMap, GlyphRamp},
    mode::RenderMode,
};

pub const DEFAULT_FONT_SIZE: u32 = 10;
pub const DEFAULT_GAMMA: f64 = 1.0;
pub const DEFAULT_CAMERA: u32 = 0;

/// Settings chosen once per run, before the first frame is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub mode: RenderMode,
    /// Font em size in pixels, like a point size; the cell size follows
    /// from it.
    pub font_size: u32,
    pub gamma: f64,
    /// Capture device index.
    pub camera: u32,
    /// Monospace font file. `None` uses the embedded DejaVu Sans Mono Bold.
    pub font_path: Option<PathBuf>,
    /// Custom glyph ramp, emptiest glyph first.
    pub char_map: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            font_size: DEFAULT_FONT_SIZE,
            gamma: DEFAULT_GAMMA,
            camera: DEFAULT_CAMERA,
            font_path: None,
            char_map: None,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.font_size == 0 {
            return Err(Error::Config(ERROR_FONT_SIZE.to_string()));
        }
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(Error::Config(format!("{ERROR_GAMMA}: {}", self.gamma)));
        }
        self.ramp().map(|_| ())
    }

    pub fn ramp(&self) -> Result<GlyphRamp, Error> {
        match &self.char_map {
            Some(chars) => GlyphRamp::new(CharMap::custom(chars)),
            None => GlyphRamp::new(CharMap::Standard),
        }
    }
}
