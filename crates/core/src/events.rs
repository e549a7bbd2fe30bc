//! Named game events, derived by diffing snapshots
//!
//! The session never emits anything itself. A caller that wants events takes a snapshot before
//! a call, another after, and asks [`derive_events`] what happened in between.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, PieceKind, TETRIS_ROWS};

/// Upper bound on events produced by a single call
pub const MAX_EVENTS_PER_CALL: usize = 6;

pub type GameEvents = ArrayVec<GameEvent, MAX_EVENTS_PER_CALL>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    PieceLocked {
        kind: PieceKind,
    },
    LinesCleared {
        count: u32,
        back_to_back: bool,
    },
    LevelChanged {
        from: u32,
        to: u32,
    },
    BlockHeld {
        kind: PieceKind,
    },
    RotationRejected,
    GameOver,
}

/// Compare the state around one call.
///
/// `action` is the action that was applied, if the call came through `apply_action`; it is
/// only needed to tell a rejected rotation apart from a call that never tried to rotate.
/// A restart produces no events.
pub fn derive_events(
    action: Option<GameAction>,
    before: &GameSnapshot,
    after: &GameSnapshot,
) -> GameEvents {
    let mut events = GameEvents::new();
    if action == Some(GameAction::Restart) {
        return events;
    }

    if after.pieces_locked > before.pieces_locked {
        events.push(GameEvent::PieceLocked {
            kind: before.active.kind,
        });
    }

    if after.lines > before.lines {
        events.push(GameEvent::LinesCleared {
            count: after.lines - before.lines,
            // The streak only climbs past 4 on a back-to-back tetris.
            back_to_back: after.streak > TETRIS_ROWS && after.streak > before.streak,
        });
    }

    if after.level != before.level {
        events.push(GameEvent::LevelChanged {
            from: before.level,
            to: after.level,
        });
    }

    if after.just_held && !before.just_held {
        if let Some(kind) = after.hold {
            events.push(GameEvent::BlockHeld { kind });
        }
    }

    let rotation_requested = action.is_some_and(|a| a.is_rotation());
    if rotation_requested
        && !before.game_over
        && before.active.kind != PieceKind::O
        && before.active == after.active
    {
        events.push(GameEvent::RotationRejected);
    }

    if after.game_over && !before.game_over {
        events.push(GameEvent::GameOver);
    }

    events
}
