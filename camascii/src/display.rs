use image::RgbImage;
use opencv::highgui;
use tracing::{debug, warn};

use crate::{error::*, util::rgb_image_to_mat};

/// Keys that end the render loop: space, `q`, `Q` and Esc.
const EXIT_KEYS: [i32; 4] = [b' ' as i32, b'q' as i32, b'Q' as i32, 27];

/// A desktop window that shows rendered canvases.
pub struct Window {
    title: String,
}

impl Window {
    pub fn open(title: &str) -> Result<Self, Error> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
        debug!(title, "opened window");
        Ok(Self {
            title: title.to_string(),
        })
    }

    pub fn show(&self, canvas: &RgbImage) -> Result<(), Error> {
        let mat = rgb_image_to_mat(canvas)?;
        highgui::imshow(&self.title, &mat)?;
        Ok(())
    }

    /// Waits up to `delay_ms` for a key press. Returns `true` when an exit
    /// key was pressed.
    pub fn poll_exit(&self, delay_ms: i32) -> Result<bool, Error> {
        let key = highgui::wait_key(delay_ms.max(1))?;
        Ok(key >= 0 && EXIT_KEYS.contains(&(key & 0xff)))
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Err(e) = highgui::destroy_window(&self.title) {
            warn!("failed to close window {}: {e}", self.title);
        }
    }
}
