//! Stack occupancy grid
//!
//! Row 0 is the bottom of the lane. Queries outside the grid are answered (empty/false)
//! rather than rejected: falling and celebration blocks routinely ask about positions
//! above or beside the lane.

use serde::{Deserialize, Serialize};

/// Fixed-size boolean occupancy matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackGrid {
    width: u32,
    height: u32,
    /// Row-major, `height * width` cells
    cells: Vec<bool>,
}

impl StackGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> Option<usize> {
        (row < self.height && col < self.width)
            .then(|| row as usize * self.width as usize + col as usize)
    }

    fn row_slice(&self, row: u32) -> Option<&[bool]> {
        if row >= self.height {
            return None;
        }
        let start = row as usize * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Clear every cell
    pub fn reset(&mut self) {
        self.cells.fill(false);
    }

    /// Replace the whole row with exactly `columns`. Out-of-range rows and columns are
    /// ignored.
    pub fn set_row(&mut self, row: u32, columns: &[u32]) {
        if row >= self.height {
            return;
        }
        let start = row as usize * self.width as usize;
        let width = self.width as usize;
        let slice = &mut self.cells[start..start + width];
        slice.fill(false);
        for &col in columns {
            if let Some(cell) = slice.get_mut(col as usize) {
                *cell = true;
            }
        }
    }

    pub fn is_filled(&self, row: u32, col: u32) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Occupied columns of `row`, ascending
    pub fn filled_columns(&self, row: u32) -> Vec<u32> {
        self.row_slice(row)
            .map(|cells| {
                cells
                    .iter()
                    .enumerate()
                    .filter(|(_, filled)| **filled)
                    .map(|(col, _)| col as u32)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn count_filled(&self, row: u32) -> usize {
        self.row_slice(row)
            .map_or(0, |cells| cells.iter().filter(|c| **c).count())
    }

    /// Every occupied `(row, col)`, bottom row first
    pub fn all_filled_cells(&self) -> Vec<(u32, u32)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(i, _)| {
                let width = self.width as usize;
                ((i / width) as u32, (i % width) as u32)
            })
            .collect()
    }
}
