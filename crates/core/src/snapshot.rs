//! Read-only copies of session state for renderers, recorders and tests

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::pieces::Block;
use crate::types::{Cell, PieceKind, Rotation, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute cells; may include hidden rows (`y < 0`)
    pub cells: [(i8, i8); 4],
}

impl From<Block> for ActiveSnapshot {
    fn from(value: Block) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    /// Visible rows
    pub height: u8,
    /// Rows stored above the visible ones
    pub hidden_rows: u8,
    /// Row-major cells from the top hidden row, `(hidden_rows + height) * width` long
    pub board: Vec<Cell>,
    pub active: ActiveSnapshot,
    /// Landing cells of the active block
    pub ghost: [(i8, i8); 4],
    pub hold: Option<PieceKind>,
    pub just_held: bool,
    pub next_queue: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub last_clear: u32,
    pub streak: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell at (x, y); `y` may be negative down to `-hidden_rows`
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        let row = y as i16 + self.hidden_rows as i16;
        if x < 0 || row < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        self.board
            .get(row as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Rows top to bottom, hidden rows first
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.board.chunks(self.width as usize)
    }

    /// Only the visible rows
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows().skip(self.hidden_rows as usize)
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

#[cfg(test)]
mod tests {
    use crate::GameSession;
    use crate::types::PieceKind;

    #[test]
    fn test_snapshot_mirrors_session() {
        let mut session = GameSession::new(42);
        session.hard_drop();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.board.len(), 230);
        assert_eq!(snapshot.rows().count(), 23);
        assert_eq!(snapshot.visible_rows().count(), 20);
        assert_eq!(snapshot.pieces_locked, 1);
        assert_eq!(snapshot.next_queue.as_slice(), session.next_queue());
        assert_eq!(snapshot.active.kind, session.active().kind);
        assert_eq!(snapshot.ghost, session.ghost().cells());
        assert!(snapshot.playable());

        let occupied = snapshot.board.iter().filter(|c| c.is_some()).count();
        assert_eq!(occupied, 4);
        assert_eq!(snapshot.cell(-1, 0), None);
        assert_eq!(snapshot.cell(0, 0), Some(None));
        assert_eq!(snapshot.cell(0, -3), Some(None));
        assert_eq!(snapshot.cell(0, -4), None);
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let session = GameSession::new(7);
        let snapshot = session.snapshot();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"next_queue\""));
        let kind = serde_json::to_string(&snapshot.active.kind).unwrap();
        assert_eq!(kind.trim_matches('"'), snapshot.active.kind.as_str());

        let decoded: super::GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
        assert!(PieceKind::ALL.contains(&decoded.active.kind));
    }
}
