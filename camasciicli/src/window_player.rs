use camascii::{display::Window, error::Error, live::CallbackState};
use tracing::warn;

/// Milliseconds to wait for a key press between frames.
const KEY_POLL_MS: i32 = 1;

pub struct WindowPlayer {
    window: Window,
}

impl WindowPlayer {
    pub fn open(title: &str) -> Result<Self, Error> {
        Ok(Self {
            window: Window::open(title)?,
        })
    }

    pub fn callback(&self) -> impl FnMut(CallbackState) -> bool {
        |CallbackState {
             canvas,
             is_new,
             ..
         }| {
            step(
                || if is_new { self.window.show(canvas) } else { Ok(()) },
                || self.window.poll_exit(KEY_POLL_MS),
            )
        }
    }
}

/// Shows one frame and polls for an exit key. Returns whether playback goes
/// on; a window that can no longer show frames ends it.
fn step(
    show: impl FnOnce() -> Result<(), Error>,
    poll_exit: impl FnOnce() -> Result<bool, Error>,
) -> bool {
    if let Err(e) = show() {
        warn!("failed to show frame: {e}");
        return false;
    }

    match poll_exit() {
        Ok(exit) => !exit,
        Err(e) => {
            warn!("failed to poll keys: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_gone() -> Error {
        Error::Capture("window closed".into())
    }

    #[test]
    fn show_failure_stops_playback_without_polling() {
        let mut polled = false;
        let keep_going = step(
            || Err(window_gone()),
            || {
                polled = true;
                Ok(false)
            },
        );
        assert!(!keep_going);
        assert!(!polled);
    }

    #[test]
    fn playback_follows_the_exit_key() {
        assert!(step(|| Ok(()), || Ok(false)));
        assert!(!step(|| Ok(()), || Ok(true)));
    }

    #[test]
    fn poll_failure_stops_playback() {
        assert!(!step(|| Ok(()), || Err(window_gone())));
    }
}
