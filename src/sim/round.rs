//! Round controller
//!
//! Owns the stack grid, the moving block, the score and the phase machine
//! `Title -> Playing -> {GameOver, Won}`, with restarts going back through the same
//! reset path. Calls that make no sense in the current phase are no-ops that report
//! "nothing happened" instead of failing: input can race frame boundaries.

use super::block::MovingBlock;
use super::grid::StackGrid;
use super::state::{ActiveBlockView, CommitResult, GamePhase, RoundSnapshot};
use crate::highscores::HighScores;
use crate::persistence::{MemoryStore, ScoreStore};
use crate::tuning::Tuning;

/// Authoritative state of one game session
#[derive(Debug)]
pub struct Round<S: ScoreStore = MemoryStore> {
    tuning: Tuning,
    grid: StackGrid,
    active: Option<MovingBlock>,
    row: u32,
    score: u64,
    phase: GamePhase,
    high_scores: HighScores<S>,
    last_result: Option<CommitResult>,
}

impl<S: ScoreStore> Round<S> {
    /// Create a controller in the title phase. Reads the stored high score once.
    pub fn new(tuning: Tuning, store: S) -> Self {
        let grid = StackGrid::new(tuning.lane_width, tuning.lane_height);
        Self {
            tuning,
            grid,
            active: None,
            row: 0,
            score: 0,
            phase: GamePhase::Title,
            high_scores: HighScores::open(store),
            last_result: None,
        }
    }

    /// Begin a fresh round. Only valid from the title or a finished round.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("Ignoring start while a round is in progress");
            return false;
        }
        self.grid.reset();
        self.row = 0;
        self.score = 0;
        self.last_result = None;
        self.spawn(self.tuning.start_width);
        self.phase = GamePhase::Playing;
        log::info!("Round started (high score {})", self.high_scores.get());
        true
    }

    /// Advance the moving block. `dt` is clamped to `max_frame_dt`.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing || !dt.is_finite() {
            return;
        }
        let dt = dt.clamp(0.0, self.tuning.max_frame_dt);
        if let Some(block) = &mut self.active {
            block.advance(dt);
        }
    }

    /// Freeze the moving block onto the stack
    pub fn commit(&mut self) -> Option<CommitResult> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let block = self.active.take()?;
        let row = self.row;
        let footprint = block.footprint();

        let (aligned, fallen): (Vec<u32>, Vec<u32>) = if row == 0 {
            (footprint, Vec::new())
        } else {
            let below = self.grid.filled_columns(row - 1);
            footprint
                .into_iter()
                .partition(|col| below.binary_search(col).is_ok())
        };

        if aligned.is_empty() {
            let result = CommitResult {
                row,
                fallen,
                game_over: true,
                ..Default::default()
            };
            log::debug!("Row {} missed entirely", row);
            self.finish(GamePhase::GameOver);
            self.last_result = Some(result.clone());
            return Some(result);
        }

        self.grid.set_row(row, &aligned);

        let scoring = self.tuning.scoring;
        let perfect = fallen.is_empty() && row > 0;
        let minor_prize = row + 1 == self.tuning.minor_prize_row;
        let major_prize = row + 1 == self.tuning.major_prize_row;

        let mut points = scoring.points_per_row;
        if perfect {
            points += scoring.perfect_bonus;
        }
        if minor_prize {
            points += scoring.minor_prize_bonus;
        }
        if major_prize {
            points += scoring.major_prize_bonus;
        }
        self.score += points;

        log::debug!(
            "Row {} committed: aligned {:?}, fallen {:?}, +{}",
            row,
            aligned,
            fallen,
            points
        );

        let mut won = false;
        if major_prize {
            won = true;
            self.finish(GamePhase::Won);
        } else {
            self.row += 1;
            if self.row >= self.tuning.lane_height {
                won = true;
                self.finish(GamePhase::Won);
            } else {
                self.spawn(aligned.len() as u32);
            }
        }

        let result = CommitResult {
            row,
            aligned,
            fallen,
            perfect,
            game_over: false,
            minor_prize,
            major_prize,
            won,
            points,
        };
        self.last_result = Some(result.clone());
        Some(result)
    }

    /// Spawn the block for the current row, narrowed to the row's cap
    fn spawn(&mut self, survived: u32) {
        let width = survived.min(self.tuning.width_cap(self.row));
        self.active = Some(MovingBlock::spawn(self.row, width, &self.tuning));
    }

    fn finish(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.active = None;
        let record = self.high_scores.update(self.score);
        log::info!(
            "Round ended {:?} with score {}{}",
            phase,
            self.score,
            if record { " (new high score)" } else { "" }
        );
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn row(&self) -> u32 {
        self.row
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_scores.get()
    }

    pub fn high_scores(&self) -> &HighScores<S> {
        &self.high_scores
    }

    pub fn grid(&self) -> &StackGrid {
        &self.grid
    }

    pub fn active(&self) -> Option<&MovingBlock> {
        self.active.as_ref()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn last_result(&self) -> Option<&CommitResult> {
        self.last_result.as_ref()
    }

    /// Copy of the state for renderers
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            phase: self.phase,
            row: self.row,
            score: self.score,
            high_score: self.high_scores.get(),
            lane_width: self.tuning.lane_width,
            lane_height: self.tuning.lane_height,
            minor_prize_row: self.tuning.minor_prize_row,
            major_prize_row: self.tuning.major_prize_row,
            stacked: self.grid.all_filled_cells(),
            active: self.active.as_ref().map(|b| ActiveBlockView {
                row: b.row,
                columns: b.footprint(),
            }),
            last_result: self.last_result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round() -> Round {
        Round::new(Tuning::default(), MemoryStore::new())
    }

    /// Tick in small steps until the block covers `target`
    fn drive_to(round: &mut Round, target: &[u32]) {
        for _ in 0..100_000 {
            if round.active().map(|b| b.footprint()).as_deref() == Some(target) {
                return;
            }
            round.tick(0.01);
        }
        panic!("block never reached {:?}", target);
    }

    #[test]
    fn test_title_ignores_tick_and_commit() {
        let mut r = round();
        assert_eq!(r.phase(), GamePhase::Title);
        r.tick(0.05);
        assert!(r.commit().is_none());
        assert!(r.active().is_none());
    }

    #[test]
    fn test_start_spawns_row_zero() {
        let mut r = round();
        assert!(r.start());
        assert_eq!(r.phase(), GamePhase::Playing);
        let block = r.active().unwrap();
        assert_eq!(block.row, 0);
        assert_eq!(block.footprint(), vec![0, 1, 2]);

        // No restart mid-round
        assert!(!r.start());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut r = round();
        r.start();
        // 5 s clamps to 0.1 s = 0.7 cells at row 0
        r.tick(5.0);
        assert_eq!(r.active().unwrap().x(), 0);
        r.tick(0.05);
        assert_eq!(r.active().unwrap().x(), 1);
        r.tick(f32::NAN);
        assert_eq!(r.active().unwrap().x(), 1);
    }

    #[test]
    fn test_scenario_narrowing_then_game_over() {
        let mut r = round();
        r.start();

        let first = r.commit().unwrap();
        assert_eq!(first.aligned, vec![0, 1, 2]);
        assert!(first.fallen.is_empty());
        assert!(!first.perfect);
        assert_eq!(r.score(), 100);

        drive_to(&mut r, &[1, 2, 3]);
        let second = r.commit().unwrap();
        assert_eq!(second.aligned, vec![1, 2]);
        assert_eq!(second.fallen, vec![3]);
        assert!(!second.perfect);
        assert_eq!(r.score(), 200);
        assert_eq!(r.active().unwrap().width, 2);

        drive_to(&mut r, &[5, 6]);
        let third = r.commit().unwrap();
        assert!(third.game_over);
        assert!(third.aligned.is_empty());
        assert_eq!(third.fallen, vec![5, 6]);
        assert_eq!(r.phase(), GamePhase::GameOver);
        assert!(r.grid().filled_columns(2).is_empty());
        assert_eq!(r.score(), 200);
        assert_eq!(r.high_score(), 200);
        assert_eq!(r.high_scores().store().value(), Some(200));

        // Finished rounds ignore further play
        assert!(r.commit().is_none());
    }

    #[test]
    fn test_perfect_bonus() {
        let mut r = round();
        r.start();
        r.commit();
        drive_to(&mut r, &[0, 1, 2]);
        let result = r.commit().unwrap();
        assert!(result.perfect);
        assert_eq!(result.points, 150);
        assert_eq!(r.score(), 250);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut r = round();
        r.start();
        r.commit();
        drive_to(&mut r, &[4, 5, 6]);
        assert!(r.commit().unwrap().game_over);

        assert!(r.start());
        assert_eq!(r.phase(), GamePhase::Playing);
        assert_eq!(r.row(), 0);
        assert_eq!(r.score(), 0);
        assert!(r.grid().all_filled_cells().is_empty());
        assert!(r.last_result().is_none());
        assert_eq!(r.high_score(), 100);
    }

    #[test]
    fn test_high_score_not_lowered() {
        let mut r = Round::new(Tuning::default(), MemoryStore::with_score(10_000));
        r.start();
        r.commit();
        drive_to(&mut r, &[4, 5, 6]);
        r.commit();
        assert_eq!(r.phase(), GamePhase::GameOver);
        assert_eq!(r.high_score(), 10_000);
        assert_eq!(r.high_scores().store().value(), Some(10_000));
    }

    #[test]
    fn test_major_prize_wins_without_alignment_bonus() {
        let tuning = Tuning {
            lane_height: 5,
            minor_prize_row: 2,
            major_prize_row: 3,
            ..Tuning::default()
        };
        let mut r = Round::new(tuning, MemoryStore::new());
        r.start();
        r.commit();

        // Row 1 reaches the minor prize even with a cell lost
        drive_to(&mut r, &[1, 2, 3]);
        let minor = r.commit().unwrap();
        assert!(minor.minor_prize);
        assert!(!minor.major_prize);
        assert_eq!(r.phase(), GamePhase::Playing);

        drive_to(&mut r, &[2, 3]);
        let major = r.commit().unwrap();
        assert!(major.major_prize);
        assert!(major.won);
        assert_eq!(major.fallen, vec![3]);
        assert_eq!(r.phase(), GamePhase::Won);
        assert!(r.active().is_none());
        // 100 + (100 + 500) + (100 + 2000)
        assert_eq!(r.score(), 2800);
        assert_eq!(r.high_score(), 2800);
        assert!(r.commit().is_none());
    }

    #[test]
    fn test_running_out_of_rows_wins_without_prize() {
        let tuning = Tuning {
            lane_height: 2,
            minor_prize_row: 20,
            major_prize_row: 20,
            ..Tuning::default()
        };
        let mut r = Round::new(tuning, MemoryStore::new());
        r.start();
        r.commit();
        drive_to(&mut r, &[0, 1, 2]);
        let last = r.commit().unwrap();
        assert!(last.won);
        assert!(!last.major_prize);
        assert!(!last.minor_prize);
        assert_eq!(r.phase(), GamePhase::Won);
        assert_eq!(r.score(), 250);
    }

    #[test]
    fn test_width_caps_near_top() {
        let tuning = Tuning {
            start_width: 7,
            ..Tuning::default()
        };
        let mut r = Round::new(tuning, MemoryStore::new());
        r.start();
        while r.row() < 14 {
            let width = r.active().unwrap().width;
            assert!(width <= r.tuning().width_cap(r.row()));
            // A full-width row always lines up until the caps kick in
            let below = if r.row() == 0 {
                (0..7).collect::<Vec<_>>()
            } else {
                r.grid().filled_columns(r.row() - 1)
            };
            let target: Vec<u32> = below[..width as usize].to_vec();
            drive_to(&mut r, &target);
            r.commit().unwrap();
        }
        assert_eq!(r.active().unwrap().width, 1);
        assert_eq!(r.grid().count_filled(11), 7);
        assert_eq!(r.grid().count_filled(12), 2);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut r = round();
        r.start();
        r.commit();
        let snap = r.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.row, 1);
        assert_eq!(snap.stacked, vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(
            snap.active,
            Some(ActiveBlockView {
                row: 1,
                columns: vec![4, 5, 6]
            })
        );
        assert_eq!(snap.last_result.unwrap().aligned, vec![0, 1, 2]);
    }
}
