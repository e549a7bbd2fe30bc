//! Collision predicates
//!
//! Pure checks consulted before every move, drop and lock. They answer with the same
//! bounds and occupancy test that [`Board::place`] enforces, hidden rows included, so a
//! placement that passed [`fits`] never fails to lock.

use crate::board::Board;
use crate::pieces::Block;
use crate::types::MoveDirection;

/// Whether the given cells can be occupied by a falling block
pub fn fits(board: &Board, cells: &[(i8, i8)]) -> bool {
    cells.iter().all(|&(x, y)| board.is_valid(x, y))
}

/// Whether `block` may shift one column in `direction`
pub fn can_move_horizontal(board: &Board, block: &Block, direction: MoveDirection) -> bool {
    fits(board, &block.shifted(direction.dx(), 0).cells())
}

/// Whether `block` may move one row down
pub fn can_move_vertical(board: &Board, block: &Block) -> bool {
    fits(board, &block.shifted(0, 1).cells())
}

/// Whether a freshly spawned block overlaps the stack (game over)
pub fn spawn_collides(board: &Board, block: &Block) -> bool {
    !fits(board, &block.cells())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_walls_block_horizontal_moves() {
        let board = Board::new();
        let left = Block::new(PieceKind::I, 1, 5);
        assert!(!can_move_horizontal(&board, &left, MoveDirection::Left));
        assert!(can_move_horizontal(&board, &left, MoveDirection::Right));

        let right = Block::new(PieceKind::I, 7, 5);
        assert!(!can_move_horizontal(&board, &right, MoveDirection::Right));
    }

    #[test]
    fn test_hidden_rows_are_part_of_the_grid() {
        let mut board = Board::new();
        let block = Block::new(PieceKind::T, 4, -2);
        assert!(fits(&board, &block.cells()));
        assert!(can_move_horizontal(&board, &block, MoveDirection::Left));
        assert!(can_move_vertical(&board, &block));

        // Nothing is stored above the top hidden row.
        assert!(!fits(&board, &Block::new(PieceKind::T, 4, -3).cells()));

        let off_wall = Block::new(PieceKind::T, 0, -2);
        assert!(!can_move_horizontal(&board, &off_wall, MoveDirection::Left));

        board.set(4, -1, Some(PieceKind::S));
        assert!(!can_move_vertical(&board, &block));
        assert!(board.place(&block.shifted(0, 1)).is_err());
    }

    #[test]
    fn test_floor_and_stack_block_vertical_moves() {
        let mut board = Board::new();
        let on_floor = Block::new(PieceKind::I, 4, 19);
        assert!(!can_move_vertical(&board, &on_floor));

        board.set(4, 11, Some(PieceKind::O));
        let above_stack = Block::new(PieceKind::I, 4, 10);
        assert!(!can_move_vertical(&board, &above_stack));
        assert!(can_move_horizontal(&board, &above_stack, MoveDirection::Left));
    }

    #[test]
    fn test_spawn_collision() {
        let mut board = Board::new();
        let block = Block::spawn(PieceKind::T, board.width());
        assert!(!spawn_collides(&board, &block));

        board.set(4, 0, Some(PieceKind::L));
        assert!(spawn_collides(&board, &block));
    }
}
