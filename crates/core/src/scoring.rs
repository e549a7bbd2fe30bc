//! Scoring module - line clear points and the back-to-back streak
//!
//! Points: single 1, double 3, triple 5, tetris 8. A tetris that directly follows another
//! tetris is worth 12 instead.
//!
//! The streak holds the size of the most recent clear. Consecutive tetrises keep counting up
//! (4, 5, 6, ...), so `streak - 4` is the number of back-to-back tetrises in a row. Any smaller
//! clear resets it to that clear's size.

use serde::{Deserialize, Serialize};

use crate::types::{BACK_TO_BACK_TETRIS_SCORE, LINE_SCORES, TETRIS_ROWS};

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Rows removed by this clear
    pub lines: u32,
    /// Points awarded
    pub points: u32,
    /// Whether the back-to-back tetris bonus applied
    pub back_to_back: bool,
    /// Streak value after this clear
    pub streak: u32,
}

/// Calculate line clear points without the back-to-back bonus.
/// Clears above 4 rows only come from hand-built boards and score as a tetris.
pub fn calculate_line_score(lines: u32) -> u32 {
    match lines {
        0 => 0,
        1..=4 => LINE_SCORES[lines as usize],
        _ => LINE_SCORES[TETRIS_ROWS as usize],
    }
}

/// Whether a clear of this size extends a back-to-back chain
pub fn is_tetris(lines: u32) -> bool {
    lines >= TETRIS_ROWS
}

/// Score a clear given the streak left by the previous one
pub fn calculate_score(lines: u32, previous_streak: u32) -> ScoreResult {
    if lines == 0 {
        return ScoreResult {
            streak: previous_streak,
            ..ScoreResult::default()
        };
    }

    let back_to_back = is_tetris(lines) && is_tetris(previous_streak);
    let points = if back_to_back {
        BACK_TO_BACK_TETRIS_SCORE
    } else {
        calculate_line_score(lines)
    };
    let streak = if back_to_back {
        previous_streak + 1
    } else {
        lines.min(TETRIS_ROWS)
    };

    ScoreResult {
        lines,
        points,
        back_to_back,
        streak,
    }
}
