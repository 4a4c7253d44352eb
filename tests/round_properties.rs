//! Whole-round invariants driven through the public API

use proptest::prelude::*;

use stacker::Tuning;
use stacker::persistence::MemoryStore;
use stacker::sim::{GamePhase, Round};

/// Play one round, waiting `waits[i]` frames before the i-th commit
fn play(tuning: Tuning, waits: &[u16]) -> Result<(), TestCaseError> {
    let mut round = Round::new(tuning.clone(), MemoryStore::new());
    prop_assert!(round.start());

    let mut last_score = 0;
    for &wait in waits {
        if round.phase() != GamePhase::Playing {
            break;
        }
        for _ in 0..wait {
            round.tick(1.0 / 60.0);
        }

        let row = round.row();
        let block = round.active().cloned();
        prop_assert!(block.is_some());
        let footprint = block.map(|b| b.footprint()).unwrap_or_default();
        let below = if row == 0 {
            footprint.clone()
        } else {
            round.grid().filled_columns(row - 1)
        };

        let result = round.commit();
        prop_assert!(result.is_some());
        let result = result.unwrap_or_default();

        // aligned = F ∩ below, fallen = F \ aligned, both in footprint order
        let expected_aligned: Vec<u32> = footprint
            .iter()
            .copied()
            .filter(|c| below.contains(c))
            .collect();
        let expected_fallen: Vec<u32> = footprint
            .iter()
            .copied()
            .filter(|c| !below.contains(c))
            .collect();
        prop_assert_eq!(&result.aligned, &expected_aligned);
        prop_assert_eq!(&result.fallen, &expected_fallen);

        if row == 0 {
            prop_assert!(!result.perfect);
        }
        prop_assert!(round.score() >= last_score);
        last_score = round.score();

        if result.game_over {
            prop_assert_eq!(round.phase(), GamePhase::GameOver);
            prop_assert!(round.grid().filled_columns(row).is_empty());
            prop_assert!(round.active().is_none());
            prop_assert_eq!(result.points, 0);
        } else {
            prop_assert_eq!(round.grid().filled_columns(row), result.aligned.clone());
            if let Some(next) = round.active() {
                prop_assert_eq!(next.row, row + 1);
                prop_assert!(next.width <= result.aligned.len() as u32);
                prop_assert!(next.width <= tuning.width_cap(next.row));
                prop_assert!(next.width >= 1);
            }
        }

        // Stacked cells always rest on the row below
        for (r, c) in round.grid().all_filled_cells() {
            if r > 0 {
                prop_assert!(round.grid().is_filled(r - 1, c));
            }
        }
    }

    if round.phase().is_terminal() {
        prop_assert!(round.high_score() >= round.score());
        prop_assert!(round.commit().is_none());
    }
    Ok(())
}

proptest! {
    #[test]
    fn commits_keep_the_stack_consistent(
        waits in proptest::collection::vec(0u16..40, 1..20),
    ) {
        play(Tuning::default(), &waits)?;
    }

    #[test]
    fn commits_keep_the_stack_consistent_on_wide_lanes(
        lane_width in 3u32..12,
        start_width in 1u32..4,
        waits in proptest::collection::vec(0u16..25, 1..20),
    ) {
        let tuning = Tuning {
            lane_width,
            start_width,
            ..Tuning::default()
        };
        play(tuning, &waits)?;
    }
}

#[test]
fn tuning_round_trips_through_json() {
    let tuning = Tuning {
        lane_width: 9,
        minor_prize_row: 8,
        ..Tuning::default()
    };
    let json = tuning.to_json().unwrap();
    let parsed = Tuning::from_json(&json).unwrap();
    assert_eq!(parsed.lane_width, 9);
    assert_eq!(parsed.minor_prize_row, 8);
    assert_eq!(parsed.width_cap(14), 1);
}

#[test]
fn largest_accepted_lanes_build_a_round() {
    use stacker::consts::MAX_LANE_CELLS;

    for (width, height) in [(MAX_LANE_CELLS as u32, 1), (256, 256), (1, MAX_LANE_CELLS as u32)] {
        let json = format!(
            r#"{{ "lane_width": {}, "lane_height": {}, "start_width": 1, "minor_prize_row": 1, "major_prize_row": 1 }}"#,
            width, height
        );
        let tuning = Tuning::from_json(&json).unwrap();
        let mut round = Round::new(tuning, MemoryStore::new());
        assert!(round.start());
        round.tick(0.1);
        let result = round.commit().unwrap();
        assert_eq!(result.aligned.len(), 1);
        assert!(round.grid().count_filled(0) == 1);
    }
}
