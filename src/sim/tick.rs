//! Per-frame driver
//!
//! Maps the single player action onto the round: start from the title, commit while
//! playing, restart once the round is over. Then advances the round and its effects.

use super::effects::Effects;
use super::round::Round;
use super::state::{CommitResult, GamePhase};
use crate::persistence::ScoreStore;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Debounced tap/click/space/enter
    pub action: bool,
}

/// Advance one frame. Returns the commit result when the action committed a row.
pub fn tick<S: ScoreStore>(
    round: &mut Round<S>,
    effects: &mut Effects,
    input: &TickInput,
    dt: f32,
) -> Option<CommitResult> {
    let mut committed = None;

    if input.action {
        match round.phase() {
            GamePhase::Title | GamePhase::GameOver | GamePhase::Won => {
                effects.clear();
                round.start();
            }
            GamePhase::Playing => {
                if let Some(result) = round.commit() {
                    effects.on_commit(&result, round.grid());
                    committed = Some(result);
                }
            }
        }
    }

    // Effects are cheap and independent of the phase so falling cells finish their arc
    // on the game-over screen.
    let dt = if dt.is_finite() {
        dt.clamp(0.0, round.tuning().max_frame_dt)
    } else {
        0.0
    };
    round.tick(dt);
    effects.tick(dt);

    committed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    const ACTION: TickInput = TickInput { action: true };

    fn setup() -> (Round, Effects) {
        (
            Round::new(Tuning::default(), MemoryStore::new()),
            Effects::new(5, 64, false),
        )
    }

    #[test]
    fn test_action_starts_from_title() {
        let (mut round, mut fx) = setup();
        assert!(tick(&mut round, &mut fx, &ACTION, 0.016).is_none());
        assert_eq!(round.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_action_commits_while_playing() {
        let (mut round, mut fx) = setup();
        tick(&mut round, &mut fx, &ACTION, 0.0);
        let result = tick(&mut round, &mut fx, &ACTION, 0.0).unwrap();
        assert_eq!(result.row, 0);
        assert_eq!(result.aligned, vec![0, 1, 2]);
        assert_eq!(round.row(), 1);
    }

    #[test]
    fn test_action_restarts_after_game_over() {
        let (mut round, mut fx) = setup();
        tick(&mut round, &mut fx, &ACTION, 0.0);
        tick(&mut round, &mut fx, &ACTION, 0.0);
        // Row 1 spawns at [4, 5, 6], missing [0, 1, 2] entirely
        let miss = tick(&mut round, &mut fx, &ACTION, 0.0).unwrap();
        assert!(miss.game_over);
        assert_eq!(fx.falling.len(), 3);
        assert_eq!(round.phase(), GamePhase::GameOver);

        // Idle frames keep the falling cells animating
        tick(&mut round, &mut fx, &TickInput::default(), 0.05);
        assert!(fx.falling[0].y < 1.0);

        assert!(tick(&mut round, &mut fx, &ACTION, 0.0).is_none());
        assert_eq!(round.phase(), GamePhase::Playing);
        assert!(fx.is_idle());
    }

    #[test]
    fn test_idle_frames_move_block() {
        let (mut round, mut fx) = setup();
        tick(&mut round, &mut fx, &ACTION, 0.0);
        for _ in 0..3 {
            tick(&mut round, &mut fx, &TickInput::default(), 0.05);
        }
        // 0.15 s at 7 cells/s
        assert_eq!(round.active().unwrap().x(), 1);
    }
}
