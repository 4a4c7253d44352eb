//! Plain-text board, used by the native demo and debug logging

use std::fmt::Write;

use crate::sim::{GamePhase, RoundSnapshot};

pub const STACKED: char = '#';
pub const ACTIVE: char = '@';
pub const EMPTY: char = '.';

/// Top row first, one line per row, then a status footer
pub fn render_text(snapshot: &RoundSnapshot) -> String {
    let width = snapshot.lane_width as usize;
    let mut out = String::new();

    for row in (0..snapshot.lane_height).rev() {
        let mut line = vec![EMPTY; width];
        for &(r, col) in &snapshot.stacked {
            if r == row && (col as usize) < width {
                line[col as usize] = STACKED;
            }
        }
        if let Some(active) = snapshot.active.as_ref().filter(|a| a.row == row) {
            for &col in &active.columns {
                if (col as usize) < width {
                    line[col as usize] = ACTIVE;
                }
            }
        }
        let line: String = line.into_iter().collect();

        let marker = if row + 1 == snapshot.major_prize_row {
            " MAJOR"
        } else if row + 1 == snapshot.minor_prize_row {
            " MINOR"
        } else {
            ""
        };
        let _ = writeln!(out, "|{}|{}", line, marker);
    }

    let phase = match snapshot.phase {
        GamePhase::Title => "title",
        GamePhase::Playing => "playing",
        GamePhase::GameOver => "game over",
        GamePhase::Won => "won",
    };
    let _ = writeln!(
        out,
        "score {}  best {}  row {}/{}  {}",
        snapshot.score,
        snapshot.high_score,
        (snapshot.row + 1).min(snapshot.lane_height),
        snapshot.lane_height,
        phase
    );
    out
}
