use crate::error::*;
#[cfg(feature = "capture")]
use crate::util::mat_to_rgb_image;
use image::{ImageReader, RgbImage};
#[cfg(feature = "capture")]
use opencv::{prelude::*, videoio, videoio::VideoCapture};
use std::path::Path;
use tracing::info;

/// Source of RGB frames. Yields `None` once the source is exhausted or a read
/// fails.
#[derive(Debug)]
pub enum FrameIterator {
    Image(Option<RgbImage>),
    #[cfg(feature = "capture")]
    Video(VideoCapture),
}

impl Iterator for FrameIterator {
    type Item = RgbImage;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            FrameIterator::Image(img) => img.take(),
            #[cfg(feature = "capture")]
            FrameIterator::Video(video) => capture_video_frame(video),
        }
    }
}

impl FrameIterator {
    pub fn is_still(&self) -> bool {
        matches!(self, FrameIterator::Image(_))
    }
}

/// Opens an image or, with the `capture` feature, a video file.
pub fn open_media_from_path(path: &Path) -> Result<FrameIterator, Error> {
    let ext = path
        .extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") | Some("bmp") | Some("ico") | Some("tif") | Some("tiff") | Some("jpg")
        | Some("jpeg") | Some("webp") | Some("gif") => open_image(path),
        #[cfg(feature = "capture")]
        _ => open_video(path),
        #[cfg(not(feature = "capture"))]
        _ => open_image(path),
    }
}

/// Opens capture device `index`.
#[cfg(feature = "capture")]
pub fn open_camera(index: u32) -> Result<FrameIterator, Error> {
    let camera = VideoCapture::new(index as i32, videoio::CAP_ANY)?;
    if camera.is_opened()? {
        info!(index, "opened camera");
        Ok(FrameIterator::Video(camera))
    } else {
        Err(Error::Capture(format!("{ERROR_OPENING_CAMERA} {index}")))
    }
}

#[cfg(feature = "capture")]
fn capture_video_frame(video: &mut VideoCapture) -> Option<RgbImage> {
    let mut frame = Mat::default();
    if video.read(&mut frame).unwrap_or(false) && !frame.empty() {
        mat_to_rgb_image(&frame)
    } else {
        None
    }
}

fn open_image(path: &Path) -> Result<FrameIterator, Error> {
    let img = ImageReader::open(path)?.decode()?.into_rgb8();
    info!(path = %path.display(), width = img.width(), height = img.height(), "opened image");
    Ok(FrameIterator::Image(Some(img)))
}

#[cfg(feature = "capture")]
fn open_video(path: &Path) -> Result<FrameIterator, Error> {
    let name = path
        .to_str()
        .ok_or_else(|| Error::Capture(format!("{ERROR_OPENING_VIDEO}: {}", path.display())))?;
    let video = VideoCapture::from_file(name, videoio::CAP_ANY)?;

    if video.is_opened()? {
        info!(path = name, "opened video");
        Ok(FrameIterator::Video(video))
    } else {
        Err(Error::Capture(format!("{ERROR_OPENING_VIDEO}: {name}")))
    }
}
