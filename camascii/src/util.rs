//! Conversions between opencv matrices (BGR) and `image` buffers (RGB).
use image::{ImageBuffer, RgbImage};
use opencv::{core::*, imgproc, prelude::*};

use crate::error::*;

pub fn mat_to_rgb_image(mat: &Mat) -> Option<RgbImage> {
    let mut rgb_mat = Mat::default();
    if imgproc::cvt_color(
        &mat,
        &mut rgb_mat,
        imgproc::COLOR_BGR2RGB,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )
    .is_ok()
        && let Ok(size) = rgb_mat.size()
    {
        let reshaped_mat = rgb_mat.reshape(1, size.width * size.height).ok()?;
        let data_vec: Vec<u8> = reshaped_mat.data_typed::<u8>().ok()?.to_vec();

        return ImageBuffer::from_raw(size.width as u32, size.height as u32, data_vec);
    }
    None
}

pub fn rgb_image_to_mat(image: &RgbImage) -> Result<Mat, Error> {
    let flat = Mat::from_slice(image.as_raw())?;
    let rgb_mat = flat.reshape(3, image.height() as i32)?.try_clone()?;
    let mut bgr_mat = Mat::default();
    imgproc::cvt_color(
        &rgb_mat,
        &mut bgr_mat,
        imgproc::COLOR_RGB2BGR,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;
    if bgr_mat.empty() {
        return Err(Error::Pipeline(ERROR_DATA.to_string()));
    }
    Ok(bgr_mat)
}
