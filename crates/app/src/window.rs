use std::{collections::VecDeque, time::Duration};

use artmentor_core::{DisplaySink, Key, OverlayError, Result, SessionConfig};
use image::RgbImage;
use minifb::{KeyRepeat, Window, WindowOptions};

/// Desktop window that shows composed frames and reports key presses.
pub struct WindowSink {
    window: Window,
    buffer: Vec<u32>,
    /// Keys from the last update not yet handed to the session, one per poll.
    pending: VecDeque<Key>,
    fresh_update: bool,
}

impl WindowSink {
    pub fn open(title: &str, config: &SessionConfig) -> Result<Self> {
        let mut window = Window::new(
            title,
            config.frame_width as usize,
            config.frame_height as usize,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|err| OverlayError::Display(err.to_string()))?;

        // The update rate doubles as the loop's poll timeout.
        let fps = (1_000 / config.poll_timeout_ms.max(1)).max(1) as usize;
        window.set_target_fps(fps);

        Ok(Self {
            window,
            buffer: Vec::new(),
            pending: VecDeque::new(),
            fresh_update: false,
        })
    }

    fn shifted(&self) -> bool {
        self.window.is_key_down(minifb::Key::LeftShift)
            || self.window.is_key_down(minifb::Key::RightShift)
    }
}

/// Maps a window key onto the dispatcher's alphabet; unbound keys are dropped.
fn translate(key: minifb::Key, shifted: bool) -> Option<Key> {
    let c = match key {
        minifb::Key::Space => return Some(Key::Char(' ')),
        minifb::Key::Q => 'q',
        minifb::Key::M => 'm',
        minifb::Key::D => 'd',
        minifb::Key::O => 'o',
        _ => return None,
    };
    Some(Key::Char(if shifted { c.to_ascii_uppercase() } else { c }))
}

/// Appends every bound key from one update, keeping press order.
fn enqueue(pending: &mut VecDeque<Key>, pressed: Vec<minifb::Key>, shifted: bool) {
    pending.extend(pressed.into_iter().filter_map(|key| translate(key, shifted)));
}

impl DisplaySink for WindowSink {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        self.buffer.clear();
        self.buffer.extend(frame.pixels().map(|pixel| {
            let [r, g, b] = pixel.0;
            (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
        }));

        self.window
            .update_with_buffer(&self.buffer, frame.width() as usize, frame.height() as usize)
            .map_err(|err| OverlayError::Display(err.to_string()))?;
        self.fresh_update = true;
        Ok(())
    }

    /// Reports keys gathered by window updates, oldest first; pacing comes
    /// from the window's target frame rate. Several keys pressed within one
    /// update are delivered on consecutive polls.
    fn poll_key(&mut self, _timeout: Duration) -> Result<Option<Key>> {
        if !self.window.is_open() {
            return Ok(Some(Key::Close));
        }

        // minifb keeps reporting the same presses until the next update.
        if std::mem::take(&mut self.fresh_update) {
            let shifted = self.shifted();
            enqueue(&mut self.pending, self.window.get_keys_pressed(KeyRepeat::No), shifted);
        }
        Ok(self.pending.pop_front())
    }
}

impl Drop for WindowSink {
    fn drop(&mut self) {
        tracing::debug!("closing preview window");
    }
}
