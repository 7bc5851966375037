//! Single/double click discrimination.
//!
//! Timestamps are plain milliseconds so the detector runs on the host; the
//! button task feeds it `Instant::now().as_millis()`.

use crate::trigger::ClickType;

/// Turns debounced presses into [`ClickType`]s.
#[derive(Clone, Copy, Debug)]
pub struct ClickDetector {
    window_ms: u64,
    first_press: Option<u64>,
}

impl ClickDetector {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            first_press: None,
        }
    }

    /// Register a press at `now`.
    ///
    /// A second press inside the window completes a double click.  A
    /// press after an unpolled, expired window reports the earlier single
    /// click and opens a new window.
    pub fn press(&mut self, now: u64) -> Option<ClickType> {
        match self.first_press {
            Some(first) if now.saturating_sub(first) < self.window_ms => {
                self.first_press = None;
                Some(ClickType::Double)
            }
            Some(_) => {
                self.first_press = Some(now);
                Some(ClickType::Single)
            }
            None => {
                self.first_press = Some(now);
                None
            }
        }
    }

    /// Report a single click once the window has run out.
    pub fn poll(&mut self, now: u64) -> Option<ClickType> {
        let deadline = self.deadline()?;
        if now >= deadline {
            self.first_press = None;
            Some(ClickType::Single)
        } else {
            None
        }
    }

    /// When [`poll`](Self::poll) should next be called, if a click is open.
    pub fn deadline(&self) -> Option<u64> {
        self.first_press.map(|t| t + self.window_ms)
    }
}
