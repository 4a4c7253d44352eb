//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (debounced into one logical action)
//! - Frame timing and visibility
//! - Haptic feedback

pub mod haptics;
pub mod input;
pub mod time;

pub use haptics::HapticPattern;
pub use input::{ActionLatch, InputSource};
pub use time::FrameClock;
