//! Stacker - An arcade block-stacking game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (block motion, stack grid, round state machine)
//! - `renderer`: Scene building for canvas and text output
//! - `platform`: Input debouncing, frame timing and haptics
//! - `persistence`: High score storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Lane dimensions in cells
    pub const LANE_WIDTH: u32 = 7;
    pub const LANE_HEIGHT: u32 = 15;
    /// Largest lane a tuning file may ask for (cells)
    pub const MAX_LANE_CELLS: usize = 1 << 16;

    /// Width of the first block of a round
    pub const START_WIDTH: u32 = 3;

    /// Prize rows (1-based, reached when `row + 1` equals the value)
    pub const MINOR_PRIZE_ROW: u32 = 10;
    pub const MAJOR_PRIZE_ROW: u32 = 15;

    /// Block speed at multiplier 1.0 (cells per second)
    pub const BASE_SPEED: f32 = 7.0;

    /// (row threshold, speed multiplier) steps
    pub const SPEED_TIERS: [(u32, f32); 8] = [
        (1, 1.0),
        (3, 1.4),
        (5, 1.8),
        (7, 2.3),
        (9, 2.9),
        (11, 3.6),
        (13, 4.5),
        (14, 5.5),
    ];

    /// (row threshold, max block width) steps; full lane width below the first
    pub const WIDTH_CAPS: [(u32, u32); 2] = [(12, 2), (14, 1)];

    /// Scoring
    pub const POINTS_PER_ROW: u64 = 100;
    pub const PERFECT_BONUS: u64 = 50;
    pub const MINOR_PRIZE_BONUS: u64 = 500;
    pub const MAJOR_PRIZE_BONUS: u64 = 2000;

    /// Largest frame delta applied to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
