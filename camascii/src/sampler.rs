//! Per-cell statistics over a rectangular region of an RGB frame.
//!
//! Both samplers visit each pixel of the cell exactly once, so sampling every
//! cell of a grid costs one pass over the frame.
use image::{Rgb, RgbImage};

/// Fixed-point BT.601 luma weights (14 bit), matching the usual 8-bit
/// RGB to gray conversion.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Pixel bounds of one grid cell. `row_end` and `col_end` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row_start: u32,
    pub col_start: u32,
    pub row_end: u32,
    pub col_end: u32,
}

impl Cell {
    /// Cell at grid position (`row`, `col`), clipped to the frame extent.
    pub fn at(row: u32, col: u32, cell_width: u32, cell_height: u32, frame: &RgbImage) -> Self {
        let row_start = row * cell_height;
        let col_start = col * cell_width;
        Self {
            row_start,
            col_start,
            row_end: (row_start + cell_height).min(frame.height()),
            col_end: (col_start + cell_width).min(frame.width()),
        }
    }

    pub fn width(&self) -> u32 {
        self.col_end.saturating_sub(self.col_start)
    }

    pub fn height(&self) -> u32 {
        self.row_end.saturating_sub(self.row_start)
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }
}

/// Aggregate of one cell: brightness in `[0, 255]` and, for color sampling,
/// the mean RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStatistic {
    pub brightness: f64,
    pub color: Option<Rgb<u8>>,
}

/// Rounded 8-bit luma of one pixel.
#[inline]
pub fn luma(Rgb([r, g, b]): Rgb<u8>) -> u8 {
    let weighted = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// 8-bit saturation and value of one pixel in HSV space.
#[inline]
pub fn saturation_value(Rgb([r, g, b]): Rgb<u8>) -> (u8, u8) {
    let max = r.max(g).max(b) as u32;
    let min = r.min(g).min(b) as u32;
    if max == 0 {
        return (0, 0);
    }
    let sat = ((max - min) * 255 + max / 2) / max;
    (sat as u8, max as u8)
}

fn cell_pixels<'a>(frame: &'a RgbImage, cell: &Cell) -> impl Iterator<Item = Rgb<u8>> + 'a {
    let Cell {
        row_start,
        col_start,
        row_end,
        col_end,
    } = *cell;
    (row_start..row_end)
        .flat_map(move |y| (col_start..col_end).map(move |x| *frame.get_pixel(x, y)))
}

fn mean(sum: u64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

/// Mean luma of the cell.
pub fn sample_luma(frame: &RgbImage, cell: &Cell) -> CellStatistic {
    let luma_sum: u64 = cell_pixels(frame, cell).map(|px| luma(px) as u64).sum();
    CellStatistic {
        brightness: mean(luma_sum, cell.area()),
        color: None,
    }
}

/// `(mean saturation + mean value) / 2` of the cell, with the mean RGB color
/// truncated to 8 bits per channel.
pub fn sample_saturation_value(frame: &RgbImage, cell: &Cell) -> CellStatistic {
    let mut sat_sum = 0u64;
    let mut val_sum = 0u64;
    let mut rgb_sum = [0u64; 3];
    for px in cell_pixels(frame, cell) {
        let (s, v) = saturation_value(px);
        sat_sum += s as u64;
        val_sum += v as u64;
        accumulate(&mut rgb_sum, px);
    }
    let count = cell.area();
    CellStatistic {
        brightness: (mean(sat_sum, count) + mean(val_sum, count)) / 2.0,
        color: Some(mean_color(rgb_sum, count)),
    }
}

#[inline]
fn accumulate(sum: &mut [u64; 3], Rgb(px): Rgb<u8>) {
    for (acc, channel) in sum.iter_mut().zip(px) {
        *acc += channel as u64;
    }
}

fn mean_color(sum: [u64; 3], count: u64) -> Rgb<u8> {
    if count == 0 {
        return Rgb([0, 0, 0]);
    }
    Rgb(sum.map(|s| (s / count) as u8))
}
