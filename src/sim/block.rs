//! The oscillating block
//!
//! The block moves in whole-cell steps. Continuous time is folded into a fractional
//! accumulator so that frame-rate jitter never causes drift, and every unit step is
//! checked against the lane walls on its own so a fast block still bounces correctly.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Horizontal travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Even rows sweep rightwards from the left wall, odd rows leftwards from the right wall
    pub fn for_row(row: u32) -> Self {
        if row % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    }

    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The block the player is currently trying to place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingBlock {
    pub row: u32,
    pub width: u32,
    /// Leftmost occupied column
    x: i32,
    direction: Direction,
    /// Cells per second, fixed at spawn
    speed: f32,
    lane_width: u32,
    /// Fraction of a cell travelled but not yet applied
    accumulator: f32,
}

impl MovingBlock {
    /// Create a block at an explicit position. Width is clamped to the lane and `x` to the
    /// range that keeps the footprint inside it.
    pub fn new(
        row: u32,
        width: u32,
        x: i32,
        direction: Direction,
        speed: f32,
        lane_width: u32,
    ) -> Self {
        let lane_width = lane_width.max(1);
        let width = width.clamp(1, lane_width);
        let max_x = (lane_width - width) as i32;
        Self {
            row,
            width,
            x: x.clamp(0, max_x),
            direction,
            speed: speed.max(0.0),
            lane_width,
            accumulator: 0.0,
        }
    }

    /// Spawn the block for `row`: speed from the row's tier, starting at the wall its
    /// direction moves away from.
    pub fn spawn(row: u32, width: u32, tuning: &Tuning) -> Self {
        let direction = Direction::for_row(row);
        let width = width.clamp(1, tuning.lane_width.max(1));
        let x = match direction {
            Direction::Right => 0,
            Direction::Left => tuning.lane_width.saturating_sub(width) as i32,
        };
        Self::new(
            row,
            width,
            x,
            direction,
            tuning.speed_for_row(row),
            tuning.lane_width,
        )
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance by `dt` seconds, applying every whole cell crossed. Non-finite or
    /// non-positive `dt` is ignored.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let travelled = self.accumulator + dt * self.speed;
        if !travelled.is_finite() {
            self.accumulator = 0.0;
            return;
        }
        let steps = travelled.floor();
        self.accumulator = travelled - steps;

        let period = self.bounce_period();
        if period == 0 {
            return;
        }
        // Every state is at most one step away from the bounce cycle, so keep one full
        // period on top of the remainder.
        let period_f = period as f32;
        let steps = if steps > period_f {
            (steps % period_f) as u32 + period
        } else {
            steps as u32
        };
        for _ in 0..steps {
            self.step();
        }
    }

    /// Steps after which position and direction repeat; 0 for a block that cannot move
    fn bounce_period(&self) -> u32 {
        2 * self.lane_width.saturating_sub(self.width)
    }

    /// One cell of movement with wall reflection
    fn step(&mut self) {
        let lane = self.lane_width as i32;
        let width = self.width as i32;
        if width >= lane {
            // Nowhere to go
            self.x = 0;
            return;
        }

        self.x += self.direction.step();

        if self.x + width > lane {
            let overshoot = self.x + width - lane;
            self.x = lane - width - overshoot;
            self.direction = Direction::Left;
        } else if self.x < 0 {
            let overshoot = -self.x;
            self.x = overshoot;
            self.direction = Direction::Right;
        }
    }

    /// Columns currently covered, left to right
    pub fn footprint(&self) -> Vec<u32> {
        let start = self.x.max(0) as u32;
        (start..start + self.width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(width: u32, x: i32, direction: Direction, speed: f32) -> MovingBlock {
        MovingBlock::new(0, width, x, direction, speed, 7)
    }

    #[test]
    fn test_sub_cell_time_accumulates() {
        let mut b = block(3, 0, Direction::Right, 4.0);
        b.advance(0.125); // half a cell
        assert_eq!(b.x(), 0);
        b.advance(0.125);
        assert_eq!(b.x(), 1);
        b.advance(0.0625);
        b.advance(0.0625);
        b.advance(0.0625);
        assert_eq!(b.x(), 1);
        b.advance(0.0625);
        assert_eq!(b.x(), 2);
    }

    #[test]
    fn test_multiple_cells_in_one_advance() {
        let mut b = block(2, 0, Direction::Right, 4.0);
        b.advance(0.75);
        assert_eq!(b.x(), 3);
        assert_eq!(b.footprint(), vec![3, 4]);
    }

    #[test]
    fn test_reflects_off_right_wall_mid_advance() {
        // x = 4 is the last legal position for width 3 in a lane of 7
        let mut b = block(3, 4, Direction::Right, 4.0);

        // Three cells: bounce to 3 on the first, then 2, then 1.
        b.advance(0.75);
        assert_eq!(b.x(), 1);
        assert_eq!(b.direction(), Direction::Left);
        assert_eq!(b.footprint(), vec![1, 2, 3]);
    }

    #[test]
    fn test_start_outside_lane_is_clamped() {
        // x = 5 would put column 7 outside the lane; it is pulled back to the edge
        // before any motion, so it moves exactly like a block starting at x = 4.
        let mut clamped = block(3, 5, Direction::Right, 4.0);
        assert_eq!(clamped.x(), 4);
        let mut edge = block(3, 4, Direction::Right, 4.0);
        clamped.advance(0.75);
        edge.advance(0.75);
        assert_eq!(clamped.x(), edge.x());
        assert_eq!(clamped.direction(), edge.direction());
    }

    #[test]
    fn test_huge_dt_returns_and_stays_in_lane() {
        let mut b = MovingBlock::new(14, 1, 0, Direction::Right, 38.5, 7);
        b.advance(1.0e6);
        assert!(b.x() >= 0 && b.x() <= 6);
        b.advance(f32::MAX);
        assert!(b.x() >= 0 && b.x() <= 6);
    }

    #[test]
    fn test_long_advance_matches_many_short_ones() {
        // Lane 7, width 1: the motion repeats every 12 cells
        let mut long = MovingBlock::new(0, 1, 0, Direction::Right, 1.0, 7);
        let mut short = long.clone();
        long.advance(100.0);
        for _ in 0..100 {
            short.advance(1.0);
        }
        assert_eq!(long.x(), short.x());
        assert_eq!(long.direction(), short.direction());
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut b = block(3, 0, Direction::Right, 4.0);
        b.advance(f32::NAN);
        b.advance(f32::INFINITY);
        assert_eq!(b.x(), 0);
        // Still moves afterwards
        b.advance(0.25);
        assert_eq!(b.x(), 1);
    }

    #[test]
    fn test_reflects_off_left_wall() {
        let mut b = block(3, 1, Direction::Left, 4.0);
        b.advance(0.5); // 0, then -1 -> 1
        assert_eq!(b.x(), 1);
        assert_eq!(b.direction(), Direction::Right);
    }

    #[test]
    fn test_bounces_twice_in_one_advance() {
        // Lane 7, width 5: only x in 0..=2 is legal, so 8 steps cross both walls.
        let mut b = MovingBlock::new(0, 5, 0, Direction::Right, 8.0, 7);
        b.advance(1.0);
        // 1, 2, 1(bounce), 0, 1(bounce), 2, 1(bounce), 0
        assert_eq!(b.x(), 0);
        assert_eq!(b.direction(), Direction::Left);
    }

    #[test]
    fn test_full_width_block_never_moves() {
        let mut b = MovingBlock::new(0, 7, 0, Direction::Right, 10.0, 7);
        b.advance(0.1);
        b.advance(0.1);
        assert_eq!(b.footprint(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_spawn_alternates_by_row() {
        let tuning = Tuning::default();
        let even = MovingBlock::spawn(0, 3, &tuning);
        assert_eq!(even.x(), 0);
        assert_eq!(even.direction(), Direction::Right);

        let odd = MovingBlock::spawn(1, 3, &tuning);
        assert_eq!(odd.x(), 4);
        assert_eq!(odd.direction(), Direction::Left);

        let fast = MovingBlock::spawn(14, 1, &tuning);
        assert!((fast.speed() - 7.0 * 5.5).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn footprint_stays_in_lane(
            lane in 1u32..12,
            width in 1u32..12,
            x in -3i32..15,
            right in any::<bool>(),
            speed in 0.5f32..60.0,
            dts in proptest::collection::vec(0.0f32..0.1, 1..60),
        ) {
            let dir = if right { Direction::Right } else { Direction::Left };
            let mut b = MovingBlock::new(0, width, x, dir, speed, lane);
            for dt in dts {
                b.advance(dt);
                let fp = b.footprint();
                prop_assert_eq!(fp.len() as u32, b.width);
                prop_assert!(fp.windows(2).all(|w| w[1] == w[0] + 1));
                prop_assert!(*fp.last().unwrap() < lane);
            }
        }
    }
}
