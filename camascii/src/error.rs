//! This module defines the custom error type `Error` used throughout the crate,
//! as well as various error message constants.
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Application error: {0}")]
    Application(String),
    #[error("Render pipeline error: {0}")]
    Pipeline(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("Capture error: {0}")]
    Capture(String),
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        io::Error::other(error.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Application(format!("{error}"))
    }
}

impl From<image::ImageError> for Error {
    fn from(error: image::ImageError) -> Self {
        Error::Application(format!("{ERROR_IMAGE}: {error}"))
    }
}

#[cfg(feature = "capture")]
impl From<opencv::Error> for Error {
    fn from(error: opencv::Error) -> Self {
        Error::Capture(format!("{error}"))
    }
}

/// Error message for an unknown render mode string.
pub const ERROR_UNKNOWN_MODE: &str = "Unidentified color format";
/// Error message for a glyph ramp with fewer than two characters.
pub const ERROR_RAMP_TOO_SHORT: &str = "Glyph ramp needs at least two characters";
/// Error message for a glyph ramp that repeats a character.
pub const ERROR_RAMP_DUPLICATE: &str = "Glyph ramp repeats a character";
/// Error message for a gamma value that is not a positive finite number.
pub const ERROR_GAMMA: &str = "Gamma must be a positive finite number";
/// Error message for a font size of zero.
pub const ERROR_FONT_SIZE: &str = "Font size must be a positive integer";
/// Error message for issues related to opening a font file.
pub const ERROR_OPENING_FONT: &str = "Error opening font";
/// Error message for font data that cannot be parsed.
pub const ERROR_INVALID_FONT: &str = "Invalid font data";
/// Error message for a font whose reference glyph has an empty bounding box.
pub const ERROR_EMPTY_GLYPH_CELL: &str = "Reference glyph has an empty cell";
/// Error message for issues related to opening a camera device.
pub const ERROR_OPENING_CAMERA: &str = "Error opening camera";
/// Error message for issues related to opening a video.
pub const ERROR_OPENING_VIDEO: &str = "Error opening video";
/// Error message for a source that stopped yielding frames.
pub const ERROR_END_OF_STREAM: &str = "Frame source ended";
/// Error message for a frame with zero width or height.
pub const ERROR_EMPTY_FRAME: &str = "Frame has zero width or height";
/// Error message for issues related to decoding or encoding an image.
pub const ERROR_IMAGE: &str = "Image error";
/// Error message for issues related to data processing.
pub const ERROR_DATA: &str = "Data error";
