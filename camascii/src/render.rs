use image::{Rgb, RgbImage};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::trace;

use crate::{font::GlyphRasterizer, maps::GlyphRamp, mode::RenderMode, sampler::Cell};

/// One rendered cell: the chosen glyph and its foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphCell {
    pub glyph: char,
    pub color: Rgb<u8>,
}

/// The glyphs of one frame in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    pub rows: u32,
    pub cols: u32,
    pub cells: Vec<GlyphCell>,
}

impl GlyphGrid {
    pub fn get(&self, row: u32, col: u32) -> Option<&GlyphCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get((row * self.cols + col) as usize)
    }

    /// One line per grid row, joined with `\n`.
    pub fn text(&self) -> String {
        let mut output = String::with_capacity(((self.cols + 1) * self.rows) as usize);
        for (i, row) in self.cells.chunks(self.cols.max(1) as usize).enumerate() {
            if i > 0 {
                output.push('\n');
            }
            output.extend(row.iter().map(|cell| cell.glyph));
        }
        output
    }

    /// Flat `r, g, b` triples, one per cell.
    pub fn colors(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|cell| cell.color.0).collect()
    }
}

/// Turns frames into canvases of glyphs, one glyph per rasterizer cell.
pub struct GridRenderer<R> {
    ramp: GlyphRamp,
    mode: RenderMode,
    rasterizer: R,
}

impl<R: GlyphRasterizer> GridRenderer<R> {
    pub fn new(ramp: GlyphRamp, mode: RenderMode, rasterizer: R) -> Self {
        Self {
            ramp,
            mode,
            rasterizer,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn ramp(&self) -> &GlyphRamp {
        &self.ramp
    }

    pub fn cell_size(&self) -> (u32, u32) {
        self.rasterizer.cell_size()
    }

    /// `(rows, cols)` of whole cells that fit the frame. Partial cells at the
    /// right and bottom edges are dropped.
    pub fn grid_dims(&self, width: u32, height: u32) -> (u32, u32) {
        let (cell_w, cell_h) = self.cell_size();
        let rows = height.checked_div(cell_h).unwrap_or(0);
        let cols = width.checked_div(cell_w).unwrap_or(0);
        (rows, cols)
    }

    /// Samples every cell and picks its glyph. Cells are sampled in parallel
    /// and collected in row-major order.
    pub fn grid(&self, frame: &RgbImage) -> GlyphGrid {
        let (rows, cols) = self.grid_dims(frame.width(), frame.height());
        let (cell_w, cell_h) = self.cell_size();
        trace!(rows, cols, cell_w, cell_h, "sampling grid");

        let ramp = &self.ramp;
        let mode = self.mode;
        let cells = (0..rows as usize * cols as usize)
            .into_par_iter()
            .map(|idx| {
                let (row, col) = ((idx / cols as usize) as u32, (idx % cols as usize) as u32);
                let cell = Cell::at(row, col, cell_w, cell_h, frame);
                let stat = mode.sample(frame, &cell);
                GlyphCell {
                    glyph: ramp.glyph(stat.brightness),
                    color: mode.foreground(&stat),
                }
            })
            .collect();

        GlyphGrid { rows, cols, cells }
    }

    /// Draws `grid` onto a black `width x height` canvas.
    pub fn composite(&self, grid: &GlyphGrid, width: u32, height: u32) -> RgbImage {
        let (cell_w, cell_h) = self.cell_size();
        let mut canvas = RgbImage::new(width, height);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                let Some(cell) = grid.get(row, col) else {
                    continue;
                };
                self.rasterizer.draw_glyph(
                    &mut canvas,
                    (col * cell_w) as i32,
                    (row * cell_h) as i32,
                    cell.glyph,
                    cell.color,
                );
            }
        }
        canvas
    }

    /// Canvas with the same dimensions as `frame`, one glyph per cell.
    pub fn render(&self, frame: &RgbImage) -> RgbImage {
        let grid = self.grid(frame);
        self.composite(&grid, frame.width(), frame.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{maps::CharMap, mode::MONOCHROME_FOREGROUND};
    use std::cell::RefCell;

    /// Fills the glyph box with the foreground color unless the glyph is a space.
    struct BoxRasterizer {
        cell: (u32, u32),
        draws: RefCell<Vec<(i32, i32, char)>>,
    }

    impl BoxRasterizer {
        fn new(w: u32, h: u32) -> Self {
            Self {
                cell: (w, h),
                draws: RefCell::new(Vec::new()),
            }
        }
    }

    impl GlyphRasterizer for BoxRasterizer {
        fn cell_size(&self) -> (u32, u32) {
            self.cell
        }

        fn draw_glyph(&self, canvas: &mut RgbImage, x: i32, y: i32, glyph: char, color: Rgb<u8>) {
            self.draws.borrow_mut().push((x, y, glyph));
            if glyph == ' ' {
                return;
            }
            for dy in 0..self.cell.1 {
                for dx in 0..self.cell.0 {
                    canvas.put_pixel(x as u32 + dx, y as u32 + dy, color);
                }
            }
        }
    }

    fn renderer(mode: RenderMode, chars: &str, w: u32, h: u32) -> GridRenderer<BoxRasterizer> {
        let ramp = GlyphRamp::new(CharMap::custom(chars)).unwrap();
        GridRenderer::new(ramp, mode, BoxRasterizer::new(w, h))
    }

    #[test]
    fn grid_dims_floor_the_frame() {
        let r = renderer(RenderMode::Monochrome, " .#", 6, 10);
        assert_eq!(r.grid_dims(640, 480), (48, 106));
        assert_eq!(r.grid_dims(640, 480), r.grid_dims(640, 480));
        assert_eq!(r.grid_dims(5, 9), (0, 0));
    }

    #[test]
    fn zero_cell_size_yields_empty_grid() {
        let r = renderer(RenderMode::Monochrome, " .#", 0, 0);
        assert_eq!(r.grid_dims(10, 10), (0, 0));
        let frame = RgbImage::new(10, 10);
        assert!(r.grid(&frame).cells.is_empty());
    }

    #[test]
    fn exact_multiple_frame_draws_four_glyphs() {
        let r = renderer(RenderMode::Monochrome, " .#", 3, 5);
        let frame = RgbImage::from_pixel(6, 10, Rgb([255, 255, 255]));
        let canvas = r.render(&frame);
        assert_eq!(canvas.dimensions(), (6, 10));
        let draws = r.rasterizer.draws.borrow();
        assert_eq!(
            *draws,
            vec![(0, 0, '#'), (3, 0, '#'), (0, 5, '#'), (3, 5, '#')]
        );
        assert!(canvas.pixels().all(|p| *p == MONOCHROME_FOREGROUND));
    }

    #[test]
    fn remainder_strip_stays_black() {
        let r = renderer(RenderMode::Monochrome, " .#", 4, 4);
        let frame = RgbImage::from_pixel(10, 7, Rgb([255, 255, 255]));
        let canvas = r.render(&frame);
        assert_eq!(canvas.dimensions(), (10, 7));
        for (x, y, px) in canvas.enumerate_pixels() {
            if x < 8 && y < 4 {
                assert_eq!(*px, MONOCHROME_FOREGROUND, "({x}, {y})");
            } else {
                assert_eq!(*px, Rgb([0, 0, 0]), "({x}, {y})");
            }
        }
    }

    #[test]
    fn color_mode_uses_cell_mean_color() {
        let r = renderer(RenderMode::Color, " .#", 2, 2);
        let frame = RgbImage::from_pixel(2, 2, Rgb([255, 0, 0]));
        let grid = r.grid(&frame);
        assert_eq!(
            grid.cells,
            vec![GlyphCell {
                glyph: '#',
                color: Rgb([255, 0, 0])
            }]
        );
        let canvas = r.composite(&grid, 2, 2);
        assert!(canvas.pixels().all(|p| *p == Rgb([255, 0, 0])));
    }

    #[test]
    fn grid_is_row_major() {
        let r = renderer(RenderMode::Monochrome, " .#", 1, 1);
        let mut frame = RgbImage::new(3, 2);
        frame.put_pixel(1, 0, Rgb([128, 128, 128]));
        frame.put_pixel(2, 1, Rgb([255, 255, 255]));
        let grid = r.grid(&frame);
        assert_eq!(grid.text(), " . \n  #");
        assert_eq!(grid.get(1, 2).map(|c| c.glyph), Some('#'));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.colors().len(), 18);
    }

    #[test]
    fn rendering_is_deterministic() {
        let r = renderer(RenderMode::Color, " .:-=+*#%@", 3, 4);
        let frame = RgbImage::from_fn(31, 17, |x, y| {
            Rgb([(x * 8) as u8, (y * 15) as u8, ((x + y) * 5) as u8])
        });
        assert_eq!(r.render(&frame), r.render(&frame));
    }
}
