//! Renders camera frames as ASCII art.
//!
//! Each frame is split into a grid of font-sized cells. A cell is reduced to a
//! brightness (mean luma, or mean saturation and value in color mode), mapped
//! onto a glyph ramp and drawn back into a canvas the size of the frame.

pub mod config;
#[cfg(feature = "capture")]
pub mod display;
pub mod error;
pub mod font;
pub mod frames;
pub mod gamma;
pub mod live;
pub mod maps;
pub mod mode;
pub mod pipeline;
pub mod render;
pub mod sampler;
#[cfg(feature = "capture")]
pub mod util;
