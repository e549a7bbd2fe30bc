//! Core rules engine - pure, deterministic, and testable
//!
//! Everything a falling-block puzzle needs to decide what happens next, and nothing about how
//! it is shown or driven. There is no clock, no rendering, and no input handling here: an outer
//! loop calls the session's operations and reads its state back.
//!
//! # Module Structure
//!
//! - [`rng`]: 7-bag randomizer over a seeded LCG
//! - [`pieces`]: shape catalog, orientations and rotation with position correction
//! - [`board`]: the grid of locked cells
//! - [`collision`]: fit predicates used before every move and lock
//! - [`scoring`] / [`line_clear`]: full-row removal, points and the back-to-back streak
//! - [`timing`]: level, gravity and lock-delay intervals, plus a drop schedule helper
//! - [`game_state`]: [`GameSession`], which owns all of the above
//! - [`snapshot`] / [`events`]: read-only views and before/after event derivation
//!
//! # Example
//!
//! ```
//! use tetris_rules_core::GameSession;
//! use tetris_rules_types::GameAction;
//!
//! let mut game = GameSession::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.board().occupied_count(), 4);
//! ```
//!
//! # Timing
//!
//! The caller decides when gravity and lock delay fire. [`timing::DropSchedule`] turns elapsed
//! frame time into [`GameSession::tick`] / [`GameSession::lock`] calls using the session's
//! [`GameSession::gravity_interval`] and [`GameSession::lock_delay`].

pub mod board;
pub mod collision;
pub mod error;
pub mod events;
pub mod game_state;
pub mod line_clear;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use tetris_rules_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{can_move_horizontal, can_move_vertical, fits, spawn_collides};
pub use error::EngineError;
pub use events::{derive_events, GameEvent, GameEvents};
pub use game_state::{GameSession, LockOutcome, PiecePhase, TickOutcome};
pub use line_clear::{ClearResult, LineClearEngine};
pub use pieces::{get_shape, try_rotate, Block, PieceShape};
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timing::{DropSchedule, ScheduledStep};
