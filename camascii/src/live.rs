use image::RgbImage;
use tracing::{debug, info, warn};

use crate::{error::*, font::GlyphRasterizer, pipeline::RenderPipeline};

/// Handed to the per-iteration callback.
pub struct CallbackState<'a> {
    /// The canvas rendered for this iteration.
    pub canvas: &'a RgbImage,
    /// Number of frames rendered so far, this one included.
    pub frames_rendered: u64,
    /// `false` when the source has ended and the last canvas is shown again.
    pub is_new: bool,
}

pub struct RenderOptions {
    /// Keep showing the last canvas once the source runs dry instead of
    /// failing. Meant for still images.
    pub hold_last_frame: bool,
}

/// Pulls frames from a source, renders them and hands each canvas to a
/// callback until the callback asks to stop.
pub struct Renderer<S, R> {
    pipeline: RenderPipeline<R>,
    media: S,
    render_options: RenderOptions,
    last_canvas: Option<RgbImage>,
    frames_rendered: u64,
}

impl<S, R> Renderer<S, R>
where
    S: Iterator<Item = RgbImage>,
    R: GlyphRasterizer,
{
    pub fn new(pipeline: RenderPipeline<R>, media: S, render_options: RenderOptions) -> Self {
        Self {
            pipeline,
            media,
            render_options,
            last_canvas: None,
            frames_rendered: 0,
        }
    }

    pub fn pipeline(&self) -> &RenderPipeline<R> {
        &self.pipeline
    }

    /// Runs until `callback` returns `false` and reports how many frames were
    /// rendered. A source that ends is an error unless
    /// [`RenderOptions::hold_last_frame`] is set and a frame was rendered.
    pub fn run(&mut self, mut callback: impl FnMut(CallbackState) -> bool) -> Result<u64, Error> {
        info!("render loop started");
        loop {
            let is_new = self.advance()?;
            let Some(canvas) = self.last_canvas.as_ref() else {
                return Err(Error::Capture(ERROR_END_OF_STREAM.to_string()));
            };
            let should_continue = callback(CallbackState {
                canvas,
                frames_rendered: self.frames_rendered,
                is_new,
            });
            if !should_continue {
                break;
            }
        }
        info!(frames = self.frames_rendered, "render loop stopped");
        Ok(self.frames_rendered)
    }

    /// Renders the next frame into `last_canvas`. Returns whether a new frame
    /// was rendered.
    fn advance(&mut self) -> Result<bool, Error> {
        match self.media.next() {
            Some(frame) => {
                let canvas = self.pipeline.process(frame)?;
                self.frames_rendered += 1;
                debug!(frame = self.frames_rendered, "rendered frame");
                self.last_canvas = Some(canvas);
                Ok(true)
            }
            None if self.render_options.hold_last_frame && self.last_canvas.is_some() => {
                Ok(false)
            }
            None => {
                warn!(frames = self.frames_rendered, "frame source ended");
                Err(Error::Capture(ERROR_END_OF_STREAM.to_string()))
            }
        }
    }
}
