//! Vibration feedback
//!
//! Patterns alternate vibrate/pause durations in milliseconds, as the Vibration API
//! expects.

use crate::sim::CommitResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HapticPattern(pub Vec<u32>);

impl HapticPattern {
    /// Same priority order as the sound effects
    pub fn for_commit(result: &CommitResult) -> Self {
        let pattern = if result.game_over {
            vec![50, 50, 50]
        } else if result.major_prize {
            vec![100, 50, 100, 50, 200]
        } else if result.minor_prize {
            vec![50, 30, 50, 30, 100]
        } else if result.perfect {
            vec![30]
        } else if !result.fallen.is_empty() {
            vec![15]
        } else {
            vec![10]
        };
        HapticPattern(pattern)
    }

    /// Fire and forget; unsupported devices are ignored
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let pattern = js_sys::Array::new();
        for ms in &self.0 {
            pattern.push(&wasm_bindgen::JsValue::from(*ms));
        }
        let _ = window.navigator().vibrate_with_pattern(&pattern);
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self) {
        log::trace!("Haptics unavailable natively ({:?})", self.0);
    }
}
