use std::{fmt, str::FromStr};

use image::{Rgb, RgbImage};

use crate::{
    error::*,
    sampler::{Cell, CellStatistic, sample_luma, sample_saturation_value},
};

/// Foreground of every glyph in monochrome mode.
pub const MONOCHROME_FOREGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// How cells are reduced to a brightness and which color their glyph gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Mean luma per cell, white glyphs.
    #[default]
    Monochrome,
    /// Mean of saturation and value per cell, glyphs in the cell's mean color.
    Color,
}

impl RenderMode {
    pub fn sample(&self, frame: &RgbImage, cell: &Cell) -> CellStatistic {
        match self {
            RenderMode::Monochrome => sample_luma(frame, cell),
            RenderMode::Color => sample_saturation_value(frame, cell),
        }
    }

    pub fn foreground(&self, stat: &CellStatistic) -> Rgb<u8> {
        match self {
            RenderMode::Monochrome => MONOCHROME_FOREGROUND,
            RenderMode::Color => stat.color.unwrap_or(MONOCHROME_FOREGROUND),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderMode::Monochrome => "b&w",
            RenderMode::Color => "color",
        }
    }
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "b&w" => Ok(RenderMode::Monochrome),
            "color" => Ok(RenderMode::Color),
            other => Err(Error::Config(format!("{ERROR_UNKNOWN_MODE}: {other:?}"))),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
