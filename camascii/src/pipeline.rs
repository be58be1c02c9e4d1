use image::RgbImage;
use tracing::info;

use crate::{
    config::RenderConfig,
    error::*,
    font::{FontRasterizer, GlyphRasterizer},
    gamma::GammaTable,
    render::{GlyphGrid, GridRenderer},
};

/// Gamma pre-correction followed by glyph rendering.
pub struct RenderPipeline<R> {
    /// The lookup applied to every channel before sampling.
    pub gamma: GammaTable,
    /// The grid renderer holding the ramp, mode and rasterizer.
    pub renderer: GridRenderer<R>,
}

impl RenderPipeline<FontRasterizer> {
    /// Validates `config` and loads its font.
    pub fn from_config(config: &RenderConfig) -> Result<Self, Error> {
        config.validate()?;
        let rasterizer = match &config.font_path {
            Some(path) => FontRasterizer::open(path, config.font_size)?,
            None => FontRasterizer::embedded(config.font_size)?,
        };
        let pipeline = Self::new(
            GammaTable::new(config.gamma)?,
            GridRenderer::new(config.ramp()?, config.mode, rasterizer),
        );
        info!(
            mode = %config.mode,
            gamma = config.gamma,
            glyphs = pipeline.renderer.ramp().levels(),
            "render pipeline ready"
        );
        Ok(pipeline)
    }
}

impl<R: GlyphRasterizer> RenderPipeline<R> {
    pub fn new(gamma: GammaTable, renderer: GridRenderer<R>) -> Self {
        Self { gamma, renderer }
    }

    /// Renders one frame into a canvas of the same size.
    pub fn process(&self, frame: RgbImage) -> Result<RgbImage, Error> {
        self.process_with_grid(frame).map(|(_, canvas)| canvas)
    }

    /// Like [`RenderPipeline::process`], also returning the glyph grid.
    pub fn process_with_grid(&self, mut frame: RgbImage) -> Result<(GlyphGrid, RgbImage), Error> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Error::Capture(format!(
                "{ERROR_EMPTY_FRAME}: {}x{}",
                frame.width(),
                frame.height()
            )));
        }
        self.gamma.apply_mut(&mut frame);
        let grid = self.renderer.grid(&frame);
        let canvas = self
            .renderer
            .composite(&grid, frame.width(), frame.height());
        Ok((grid, canvas))
    }
}
