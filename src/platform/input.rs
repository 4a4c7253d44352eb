//! Action debouncing
//!
//! A tap on a touch screen can arrive as touchstart and a synthesized mousedown; a held
//! key auto-repeats. All of those collapse into one logical action here, and the frame
//! loop consumes at most one action per frame.

/// Where a press came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Touch,
    Mouse,
    Key,
}

/// Default window in which further presses are treated as the same gesture
pub const DEFAULT_DEBOUNCE_MS: f64 = 80.0;

/// Canvas events whose browser default (scrolling, zooming, the long-press menu) is
/// cancelled. `touchstart` is cancelled by the press handler itself.
pub const SUPPRESSED_EVENTS: [&str; 3] = ["touchmove", "touchend", "contextmenu"];

#[derive(Debug, Clone)]
pub struct ActionLatch {
    window_ms: f64,
    last_accepted: Option<f64>,
    pending: bool,
    enabled: bool,
}

impl Default for ActionLatch {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl ActionLatch {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_accepted: None,
            pending: false,
            enabled: true,
        }
    }

    /// Register a physical press at `now_ms`. Returns true if it became a new action.
    pub fn press(&mut self, source: InputSource, now_ms: f64, repeat: bool) -> bool {
        if !self.enabled || repeat {
            return false;
        }
        if let Some(last) = self.last_accepted {
            if now_ms - last < self.window_ms {
                log::trace!("Coalesced {:?} press", source);
                return false;
            }
        }
        self.last_accepted = Some(now_ms);
        self.pending = true;
        true
    }

    /// Consume the pending action, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.pending = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_and_mouse_coalesce() {
        let mut latch = ActionLatch::default();
        assert!(latch.press(InputSource::Touch, 1000.0, false));
        assert!(!latch.press(InputSource::Mouse, 1030.0, false));
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_separate_gestures_both_count() {
        let mut latch = ActionLatch::default();
        assert!(latch.press(InputSource::Key, 0.0, false));
        assert!(latch.take());
        assert!(latch.press(InputSource::Key, 200.0, false));
        assert!(latch.take());
    }

    #[test]
    fn test_key_repeat_ignored() {
        let mut latch = ActionLatch::default();
        assert!(!latch.press(InputSource::Key, 0.0, true));
        assert!(!latch.take());
    }

    #[test]
    fn test_one_action_per_frame() {
        let mut latch = ActionLatch::new(0.0);
        latch.press(InputSource::Key, 0.0, false);
        latch.press(InputSource::Mouse, 5.0, false);
        assert!(latch.take());
        assert!(!latch.take());
    }

    #[test]
    fn test_touch_gestures_and_menu_are_suppressed() {
        for name in ["touchmove", "touchend", "contextmenu"] {
            assert!(SUPPRESSED_EVENTS.contains(&name), "{} not suppressed", name);
        }
        // touchstart must reach the press handler
        assert!(!SUPPRESSED_EVENTS.contains(&"touchstart"));
    }

    #[test]
    fn test_disabled_latch() {
        let mut latch = ActionLatch::default();
        latch.press(InputSource::Touch, 0.0, false);
        latch.set_enabled(false);
        assert!(!latch.take());
        assert!(!latch.press(InputSource::Touch, 500.0, false));
    }
}
