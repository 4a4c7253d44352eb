//! Attract mode
//!
//! A simple player that commits as soon as the whole block sits on the row below.
//! With a zero think time it plays perfectly.

use super::round::Round;
use super::state::GamePhase;
use super::tick::TickInput;
use crate::persistence::ScoreStore;

#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// Seconds to wait after each action before acting again
    think_time: f32,
    waited: f32,
}

impl AutoPlayer {
    pub fn new(think_time: f32) -> Self {
        Self {
            think_time: think_time.max(0.0),
            waited: 0.0,
        }
    }

    /// Input for the next frame, `dt` being the time since the previous call
    pub fn decide<S: ScoreStore>(&mut self, round: &Round<S>, dt: f32) -> TickInput {
        self.waited += dt.max(0.0);
        if self.waited < self.think_time {
            return TickInput::default();
        }

        let action = match round.phase() {
            GamePhase::Title | GamePhase::GameOver | GamePhase::Won => true,
            GamePhase::Playing => Self::lined_up(round),
        };
        if action {
            self.waited = 0.0;
        }
        TickInput { action }
    }

    fn lined_up<S: ScoreStore>(round: &Round<S>) -> bool {
        let Some(block) = round.active() else {
            return false;
        };
        if block.row == 0 {
            return true;
        }
        let below = round.grid().filled_columns(block.row - 1);
        block
            .footprint()
            .iter()
            .all(|col| below.binary_search(col).is_ok())
    }
}
