//! Data-driven game balance
//!
//! Everything that shapes a round (lane size, speed curve, width caps, scoring) lives in
//! [`Tuning`] so it can be loaded from JSON. Defaults match [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// A speed step: rows at or above `row` move at `multiplier × base_speed`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedTier {
    pub row: u32,
    pub multiplier: f32,
}

/// A width step: blocks spawned at or above `row` are at most `max_width` wide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidthCap {
    pub row: u32,
    pub max_width: u32,
}

/// Points awarded by the round controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub points_per_row: u64,
    pub perfect_bonus: u64,
    pub minor_prize_bonus: u64,
    pub major_prize_bonus: u64,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            points_per_row: POINTS_PER_ROW,
            perfect_bonus: PERFECT_BONUS,
            minor_prize_bonus: MINOR_PRIZE_BONUS,
            major_prize_bonus: MAJOR_PRIZE_BONUS,
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("lane must be at least 1x1 (got {width}x{height})")]
    EmptyLane { width: u32, height: u32 },
    #[error("lane of {width}x{height} exceeds {max} cells")]
    LaneTooLarge { width: u32, height: u32, max: usize },
    #[error("start width {start} must be within 1..={lane_width}")]
    StartWidth { start: u32, lane_width: u32 },
    #[error("base speed must be positive (got {0})")]
    BaseSpeed(f32),
    #[error("speed tier at row {row} is out of order or has a non-positive multiplier")]
    SpeedTier { row: u32 },
    #[error("width cap at row {row} is out of order or zero")]
    WidthCap { row: u32 },
    #[error("prize rows must satisfy 1 <= minor ({minor}) <= major ({major})")]
    PrizeRows { minor: u32, major: u32 },
    #[error("max frame dt must be positive (got {0})")]
    MaxFrameDt(f32),
}

/// Complete balance configuration for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub lane_width: u32,
    pub lane_height: u32,
    pub start_width: u32,
    pub minor_prize_row: u32,
    pub major_prize_row: u32,
    /// Cells per second at multiplier 1.0
    pub base_speed: f32,
    /// Ascending by row
    pub speed_tiers: Vec<SpeedTier>,
    /// Ascending by row
    pub width_caps: Vec<WidthCap>,
    pub scoring: Scoring,
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_width: LANE_WIDTH,
            lane_height: LANE_HEIGHT,
            start_width: START_WIDTH,
            minor_prize_row: MINOR_PRIZE_ROW,
            major_prize_row: MAJOR_PRIZE_ROW,
            base_speed: BASE_SPEED,
            speed_tiers: SPEED_TIERS
                .iter()
                .map(|&(row, multiplier)| SpeedTier { row, multiplier })
                .collect(),
            width_caps: WIDTH_CAPS
                .iter()
                .map(|&(row, max_width)| WidthCap { row, max_width })
                .collect(),
            scoring: Scoring::default(),
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.lane_width == 0 || self.lane_height == 0 {
            return Err(TuningError::EmptyLane {
                width: self.lane_width,
                height: self.lane_height,
            });
        }
        let cells = (self.lane_width as usize).checked_mul(self.lane_height as usize);
        if cells.is_none_or(|c| c > MAX_LANE_CELLS) {
            return Err(TuningError::LaneTooLarge {
                width: self.lane_width,
                height: self.lane_height,
                max: MAX_LANE_CELLS,
            });
        }
        if self.start_width == 0 || self.start_width > self.lane_width {
            return Err(TuningError::StartWidth {
                start: self.start_width,
                lane_width: self.lane_width,
            });
        }
        if !(self.base_speed > 0.0) {
            return Err(TuningError::BaseSpeed(self.base_speed));
        }

        let mut prev: Option<u32> = None;
        for tier in &self.speed_tiers {
            if prev.is_some_and(|p| tier.row <= p) || !(tier.multiplier > 0.0) {
                return Err(TuningError::SpeedTier { row: tier.row });
            }
            prev = Some(tier.row);
        }

        let mut prev: Option<u32> = None;
        for cap in &self.width_caps {
            if prev.is_some_and(|p| cap.row <= p) || cap.max_width == 0 {
                return Err(TuningError::WidthCap { row: cap.row });
            }
            prev = Some(cap.row);
        }

        if self.minor_prize_row == 0 || self.minor_prize_row > self.major_prize_row {
            return Err(TuningError::PrizeRows {
                minor: self.minor_prize_row,
                major: self.major_prize_row,
            });
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(TuningError::MaxFrameDt(self.max_frame_dt));
        }
        Ok(())
    }

    /// Speed multiplier of the greatest tier threshold <= `row` (1.0 below the first)
    pub fn speed_multiplier(&self, row: u32) -> f32 {
        self.speed_tiers
            .iter()
            .take_while(|t| t.row <= row)
            .last()
            .map_or(1.0, |t| t.multiplier)
    }

    /// Block speed for a row in cells per second
    pub fn speed_for_row(&self, row: u32) -> f32 {
        self.base_speed * self.speed_multiplier(row)
    }

    /// Widest block that may spawn on `row`
    pub fn width_cap(&self, row: u32) -> u32 {
        self.width_caps
            .iter()
            .take_while(|c| c.row <= row)
            .last()
            .map_or(self.lane_width, |c| c.max_width)
    }
}
