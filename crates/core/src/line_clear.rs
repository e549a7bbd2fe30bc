//! Line clear pass
//!
//! Runs after every lock: find the full rows, remove them, and score the clear. Hidden rows
//! are scanned like the rest of the grid.
//!
//! Rows are removed top to bottom. Removing row `y` and padding an empty row on top shifts
//! everything above `y` down by one and leaves everything below untouched, so the remaining
//! (larger) indices stay correct without re-scanning.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::scoring::{calculate_score, ScoreResult};

/// Outcome of a clear that removed at least one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearResult {
    /// Indices of the removed rows as they were before the clear, ascending
    pub rows: Vec<i8>,
    pub score: ScoreResult,
}

/// Remove every full row, top to bottom. Returns the removed row indices.
pub fn clear_full_rows(board: &mut Board) -> Vec<i8> {
    let rows = board.full_rows();
    for &y in &rows {
        board.clear_row(y);
        board.pad_top();
    }
    rows
}

/// Tracks the back-to-back streak across clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineClearEngine {
    streak: u32,
    last_clear: u32,
}

impl LineClearEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the most recent clear, 4+ while a tetris chain is running
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Rows removed by the most recent clear (0 before the first one)
    pub fn last_clear(&self) -> u32 {
        self.last_clear
    }

    /// Clear full rows and score them. Returns `None` when no row was full, in which case the
    /// streak is left alone.
    pub fn process(&mut self, board: &mut Board) -> Option<ClearResult> {
        let rows = clear_full_rows(board);
        if rows.is_empty() {
            return None;
        }

        let score = calculate_score(rows.len() as u32, self.streak);
        self.streak = score.streak;
        self.last_clear = score.lines;
        Some(ClearResult { rows, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    fn fill_rows(board: &mut Board, rows: std::ops::Range<i8>) {
        for y in rows {
            board.fill_row_except(y, PieceKind::I, &[]);
        }
    }

    #[test]
    fn test_no_full_rows() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::I, &[3]);
        let mut engine = LineClearEngine::new();

        assert!(engine.process(&mut board).is_none());
        assert_eq!(engine.streak(), 0);
        assert_eq!(board.occupied_count(), 9);
    }

    #[test]
    fn test_non_adjacent_rows_compact_correctly() {
        let mut board = Board::new();
        board.fill_row_except(17, PieceKind::I, &[]);
        board.fill_row_except(18, PieceKind::J, &[0]);
        board.fill_row_except(19, PieceKind::I, &[]);
        board.set(2, 16, Some(PieceKind::T));

        let rows = clear_full_rows(&mut board);
        assert_eq!(rows, vec![17, 19]);
        assert_eq!(board.row_count(), 23);

        // The partial J row lands on the floor, the T cell right above it.
        assert_eq!(board.get(0, 19), Some(None));
        assert_eq!(board.get(1, 19), Some(Some(PieceKind::J)));
        assert_eq!(board.get(2, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 10);
    }

    #[test]
    fn test_streak_across_clears() {
        let mut board = Board::new();
        let mut engine = LineClearEngine::new();

        fill_rows(&mut board, 16..20);
        let first = engine.process(&mut board).unwrap();
        assert_eq!(first.score.points, 8);
        assert_eq!(engine.streak(), 4);

        fill_rows(&mut board, 16..20);
        let second = engine.process(&mut board).unwrap();
        assert_eq!(second.score.points, 12);
        assert!(second.score.back_to_back);
        assert_eq!(engine.streak(), 5);

        fill_rows(&mut board, 17..20);
        let third = engine.process(&mut board).unwrap();
        assert_eq!(third.score.points, 5);
        assert_eq!(engine.streak(), 3);
        assert_eq!(engine.last_clear(), 3);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_full_hidden_row_is_cleared() {
        let mut board = Board::new();
        board.fill_row_except(-1, PieceKind::Z, &[]);
        board.set(3, -2, Some(PieceKind::T));

        let rows = clear_full_rows(&mut board);
        assert_eq!(rows, vec![-1]);
        assert_eq!(board.get(3, -1), Some(Some(PieceKind::T)));
        assert_eq!(board.occupied_count(), 1);
    }
}
