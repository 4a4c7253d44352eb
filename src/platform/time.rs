//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Turns frame timestamps (ms) into clamped deltas (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame; 0 on the first frame after a reset
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (page became visible again)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
