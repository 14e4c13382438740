//! Read-only views of an engagement for debugging and reporting.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::board::BoardState;
use crate::common::Cell;
use crate::field::ProbabilityField;

/// ASCII rendering of the board and its heat.
///
/// `X` hit, `-` miss, `.` ruled out by a sinking, digits `0`-`9` relative
/// heat of undetermined cells. Columns are lettered, rows numbered from 1.
pub fn render_heat_map(board: &BoardState, field: &ProbabilityField) -> String {
    let size = board.size();
    let max = field.max_score();
    let mut out = String::new();

    out.push_str("   ");
    for x in 0..size {
        let _ = write!(out, " {}", (b'A' + (x % 26) as u8) as char);
    }
    out.push('\n');
    for y in 0..size {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..size {
            let cell = Cell::new(x, y);
            let ch = if board.hits().contains(cell) {
                'X'
            } else if board.misses().contains(cell) {
                '-'
            } else if !board.is_undetermined(cell) {
                '.'
            } else if max > 0.0 {
                let level = ((field.score(cell) / max) * 9.0) as u32;
                char::from_digit(level.min(9), 10).unwrap_or('9')
            } else {
                '0'
            };
            let _ = write!(out, " {}", ch);
        }
        out.push('\n');
    }
    out
}

/// Summary numbers for one engagement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct EngagementStats {
    pub total_shots: usize,
    pub hits: usize,
    pub misses: usize,
    /// Hits per shot, zero before the first shot.
    pub accuracy: f64,
    pub ships_sunk: usize,
    pub remaining_targets: usize,
    pub remaining_ships: Vec<usize>,
}

impl EngagementStats {
    pub fn from_board(board: &BoardState) -> Self {
        let total_shots = board.shots_fired();
        let hits = board.hits().count_ones();
        EngagementStats {
            total_shots,
            hits,
            misses: board.misses().count_ones(),
            accuracy: if total_shots > 0 {
                hits as f64 / total_shots as f64
            } else {
                0.0
            },
            ships_sunk: board.sunk_ships().len(),
            remaining_targets: board.undetermined().count_ones(),
            remaining_ships: board.remaining_lengths().to_vec(),
        }
    }
}
