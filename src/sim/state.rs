//! Round state types shared with collaborators
//!
//! Renderers, audio and haptics only ever see these values; they never hold a
//! reference into the controller.

use serde::{Deserialize, Serialize};

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first action
    #[default]
    Title,
    /// A block is moving
    Playing,
    /// A commit left nothing standing
    GameOver,
    /// Top reached
    Won,
}

impl GamePhase {
    /// Round has ended and awaits a restart
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Outcome of a single commit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitResult {
    /// Row the block was committed on
    pub row: u32,
    /// Columns that landed on the stack, ascending
    pub aligned: Vec<u32>,
    /// Columns that fell away, ascending
    pub fallen: Vec<u32>,
    /// Nothing fell (never set on row 0)
    pub perfect: bool,
    pub game_over: bool,
    pub minor_prize: bool,
    pub major_prize: bool,
    /// Round ended in `Won`, by prize or by running out of rows
    pub won: bool,
    /// Points added by this commit
    pub points: u64,
}

/// The block as collaborators see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBlockView {
    pub row: u32,
    pub columns: Vec<u32>,
}

/// Read-only copy of everything a frame needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub phase: GamePhase,
    pub row: u32,
    pub score: u64,
    pub high_score: u64,
    pub lane_width: u32,
    pub lane_height: u32,
    pub minor_prize_row: u32,
    pub major_prize_row: u32,
    /// Every stacked `(row, col)`
    pub stacked: Vec<(u32, u32)>,
    pub active: Option<ActiveBlockView>,
    pub last_result: Option<CommitResult>,
}
