//! Board module - manages the game grid
//!
//! A `width x (HIDDEN_ROWS + height)` grid where each cell is empty or holds the variant that
//! locked there. Cells live in one flat row-major `Vec`.
//! Coordinates: x grows left to right, y grows top to bottom, row 0 is the top visible row.
//! The hidden spawn buffer is rows `-HIDDEN_ROWS..0`; they are stored, checked and cleared
//! exactly like visible rows.

use crate::error::EngineError;
use crate::pieces::Block;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, HIDDEN_ROWS};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    /// Visible rows
    height: u8,
    /// Flat array of cells, row-major order starting at the top hidden row
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with the default 10x20 dimensions
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Create a new empty board with `height` visible rows plus the hidden buffer
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * (height as usize + HIDDEN_ROWS as usize)],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        let row = (y as i16 + HIDDEN_ROWS as i16) as usize;
        Some(row * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    /// Visible rows
    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn hidden_rows(&self) -> u8 {
        HIDDEN_ROWS
    }

    /// Rows currently stored, hidden ones included. One short between a
    /// [`Board::clear_row`] and its matching [`Board::pad_top`].
    pub fn row_count(&self) -> usize {
        self.cells.len() / self.width as usize
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        let top = -(HIDDEN_ROWS as i16);
        let bottom = self.row_count() as i16 + top;
        x < 0 || x >= self.width as i8 || (y as i16) < top || y as i16 >= bottom
    }

    /// Cells of row `y`, or `None` if the row is not stored
    pub fn row(&self, y: i8) -> Option<&[Cell]> {
        let start = self.index(0, y)?;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Indices of every full row (hidden rows included), top to bottom
    pub fn full_rows(&self) -> Vec<i8> {
        let top = -(HIDDEN_ROWS as i8);
        (top..self.height as i8)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove row `y`. Rows above it move down by one and the board is one row short until
    /// [`Board::pad_top`] is called. Returns false if `y` is not a stored row.
    pub fn clear_row(&mut self, y: i8) -> bool {
        let Some(start) = self.index(0, y) else {
            return false;
        };
        self.cells.drain(start..start + self.width as usize);
        true
    }

    /// Insert one empty row at the top
    pub fn pad_top(&mut self) {
        let width = self.width as usize;
        self.cells.splice(0..0, std::iter::repeat(None).take(width));
    }

    /// Write a block's variant into its four cells.
    ///
    /// Every target is checked before anything is written, so on error the board is
    /// unchanged.
    pub fn place(&mut self, block: &Block) -> Result<(), EngineError> {
        let cells = block.cells();
        for &(x, y) in &cells {
            if !self.is_valid(x, y) {
                return Err(EngineError::CollisionViolation { x, y });
            }
        }

        for &(x, y) in &cells {
            self.set(x, y, Some(block.kind));
        }
        Ok(())
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array, top hidden row first
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows of cells, top hidden row first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Board {
    /// Fill row `y` with `kind`, leaving the listed columns empty
    pub(crate) fn fill_row_except(
        &mut self,
        y: i8,
        kind: crate::types::PieceKind,
        holes: &[i8],
    ) {
        for x in 0..self.width as i8 {
            if !holes.contains(&x) {
                self.set(x, y, Some(kind));
            }
        }
    }
}
