//! Game state module - the session that owns all mutable state
//!
//! `GameSession` ties together board, pieces, randomizer, line clears and timing. It has no
//! clock of its own: the outer loop calls [`GameSession::tick`] when a gravity interval passes
//! and [`GameSession::lock`] when the lock delay runs out (see [`crate::timing::DropSchedule`]).
//!
//! Per active block the session moves through Falling → Grounded → Locked; locking spawns the
//! next block from the queue, and a spawn that overlaps the stack ends the game. That is the
//! only way a game ends: a block may lock partly or wholly inside the hidden rows and play
//! continues as long as the next one can spawn.
//!
//! Every operation is a no-op once the game is over.

use arrayvec::ArrayVec;
use log::{debug, error, info, trace};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::collision::{can_move_horizontal, can_move_vertical, spawn_collides};
use crate::line_clear::{ClearResult, LineClearEngine};
use crate::pieces::{try_rotate, Block};
use crate::rng::Randomizer;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timing::{gravity_interval, level_for_score, lock_delay};
use crate::types::*;

/// Fixed-length look-ahead of upcoming variants
pub type NextQueue = ArrayVec<PieceKind, NEXT_QUEUE_LEN>;

/// Where the active block is in its life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiecePhase {
    /// Gravity can still move it down
    Falling,
    /// Resting on the floor or stack; the lock delay is running
    Grounded,
    /// Terminal
    GameOver,
}

/// Result of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved down one row
    Fell,
    /// Could not move; the caller's lock delay should be running
    Grounded,
    /// Game is over, nothing happened
    Idle,
}

/// What the most recent lock did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOutcome {
    pub block: Block,
    pub clear: Option<ClearResult>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    board: Board,
    active: Block,
    hold: Option<PieceKind>,
    /// Set by a hold, cleared by the next lock
    just_held: bool,
    next_queue: NextQueue,
    randomizer: Randomizer,
    line_clear: LineClearEngine,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    last_lock: Option<LockOutcome>,
    game_over: bool,
}

impl GameSession {
    /// Create a 10x20 session with the given randomizer seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::with_seed(seed))
    }

    /// Create a session from a config, validating the board dimensions first
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let mut randomizer = Randomizer::new(config.seed);
        let first = randomizer.draw();
        let mut next_queue = NextQueue::new();
        while !next_queue.is_full() {
            next_queue.push(randomizer.draw());
        }

        Self {
            config,
            board: Board::with_size(config.width, config.height),
            active: Block::spawn(first, config.width),
            hold: None,
            just_held: false,
            next_queue,
            randomizer,
            line_clear: LineClearEngine::new(),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            last_lock: None,
            game_over: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Block {
        self.active
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn just_held(&self) -> bool {
        self.just_held
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next_queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Level derived from the current score
    pub fn level(&self) -> u32 {
        level_for_score(self.score)
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Rows removed by the most recent clear
    pub fn last_clear(&self) -> u32 {
        self.line_clear.last_clear()
    }

    /// Back-to-back streak (size of the most recent clear, counting up through tetris chains)
    pub fn streak(&self) -> u32 {
        self.line_clear.streak()
    }

    pub fn last_lock(&self) -> Option<&LockOutcome> {
        self.last_lock.as_ref()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Gravity interval for the current level
    pub fn gravity_interval(&self) -> std::time::Duration {
        gravity_interval(self.level())
    }

    /// Lock delay for the current level
    pub fn lock_delay(&self) -> std::time::Duration {
        lock_delay(self.level())
    }

    /// Whether the active block overlaps the stack. True only after a failed spawn.
    pub fn spawn_collides(&self) -> bool {
        spawn_collides(&self.board, &self.active)
    }

    /// Check if the active block is resting on the floor or stack
    pub fn is_grounded(&self) -> bool {
        !can_move_vertical(&self.board, &self.active)
    }

    pub fn phase(&self) -> PiecePhase {
        if self.game_over {
            PiecePhase::GameOver
        } else if self.is_grounded() {
            PiecePhase::Grounded
        } else {
            PiecePhase::Falling
        }
    }

    /// Where the active block would land. Read-only.
    pub fn ghost(&self) -> Block {
        let mut ghost = self.active;
        while can_move_vertical(&self.board, &ghost) {
            ghost = ghost.shifted(0, 1);
        }
        ghost
    }

    /// Move the active block one column. Returns false if blocked.
    pub fn try_move(&mut self, direction: MoveDirection) -> bool {
        if self.game_over || !can_move_horizontal(&self.board, &self.active, direction) {
            return false;
        }
        self.active = self.active.shifted(direction.dx(), 0);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(MoveDirection::Left)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(MoveDirection::Right)
    }

    /// Rotate the active block with position correction.
    ///
    /// Returns false when nothing changed: the game is over, the block is an O, or no
    /// corrected placement exists (the block is left untouched).
    pub fn rotate(&mut self, direction: RotateDirection) -> bool {
        if self.game_over || self.active.kind == PieceKind::O {
            return false;
        }

        let board = &self.board;
        let result = try_rotate(
            &self.active,
            direction,
            board.width() as i8,
            board.height() as i8,
            |x, y| board.is_occupied(x, y),
        );

        match result {
            Some((_shape, rotation, (dx, dy))) => {
                self.active = Block {
                    rotation,
                    x: self.active.x + dx,
                    y: self.active.y + dy,
                    ..self.active
                };
                true
            }
            None => {
                trace!(
                    "rotation {:?} rejected for {:?} at ({}, {})",
                    direction,
                    self.active.kind,
                    self.active.x,
                    self.active.y
                );
                false
            }
        }
    }

    /// Move the active block one row down. Returns false if blocked; never locks.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over || !can_move_vertical(&self.board, &self.active) {
            return false;
        }
        self.active = self.active.shifted(0, 1);
        true
    }

    /// One gravity step
    pub fn tick(&mut self) -> TickOutcome {
        if self.game_over {
            TickOutcome::Idle
        } else if self.soft_drop() {
            TickOutcome::Fell
        } else {
            TickOutcome::Grounded
        }
    }

    /// Drop the active block to its landing row and lock it. Returns the rows dropped.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        let mut distance = 0;
        while self.soft_drop() {
            distance += 1;
        }
        self.lock_and_advance();
        distance
    }

    /// Lock the active block where it stands (lock delay expired)
    pub fn lock(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.lock_and_advance();
        true
    }

    /// Swap the active block with the hold slot.
    ///
    /// Allowed once per lock. With an empty slot the next queued variant becomes active;
    /// otherwise the held variant is re-spawned. Returns false if hold is unavailable.
    pub fn hold(&mut self) -> bool {
        if self.game_over || self.just_held {
            return false;
        }

        let current = self.active.kind;
        let next = match self.hold {
            Some(held) => held,
            None => self.advance_queue(),
        };
        self.hold = Some(current);
        self.just_held = true;
        debug!("held {:?}, {:?} is now active", current, next);
        self.spawn(next);
        true
    }

    /// Start over on an empty board. The randomizer continues from its current state.
    pub fn restart(&mut self) {
        let config = GameConfig {
            seed: self.randomizer.seed(),
            ..self.config
        };
        info!("restarting session (final score {})", self.score);
        *self = Self::build(config);
    }

    /// Apply a game action. Returns whether it had an effect.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.rotate(RotateDirection::CounterClockwise),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => {
                if self.game_over {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Hold => self.hold(),
            GameAction::Tick => self.tick() == TickOutcome::Fell,
            GameAction::Lock => self.lock(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Copy every observable value into one snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            hidden_rows: self.board.hidden_rows(),
            board: self.board.cells().to_vec(),
            active: ActiveSnapshot::from(self.active),
            ghost: self.ghost().cells(),
            hold: self.hold,
            just_held: self.just_held,
            next_queue: self.next_queue.clone(),
            score: self.score,
            level: self.level(),
            lines: self.lines,
            pieces_locked: self.pieces_locked,
            last_clear: self.last_clear(),
            streak: self.streak(),
            game_over: self.game_over,
        }
    }

    /// Pop the queue front and top the queue back up
    fn advance_queue(&mut self) -> PieceKind {
        let next = self.next_queue.remove(0);
        self.next_queue.push(self.randomizer.draw());
        next
    }

    /// Put a fresh block of `kind` at the spawn origin; ends the game if it overlaps the stack
    fn spawn(&mut self, kind: PieceKind) -> bool {
        self.active = Block::spawn(kind, self.board.width());
        if self.spawn_collides() {
            info!(
                "block out: {:?} cannot spawn, game over at score {}",
                kind, self.score
            );
            self.game_over = true;
            return false;
        }
        true
    }

    fn lock_and_advance(&mut self) {
        let block = self.active;
        // Unreachable while moves go through the collision checks.
        if let Err(err) = self.board.place(&block) {
            error!("{} while locking {:?}; ending session", err, block.kind);
            self.game_over = true;
            return;
        }
        self.pieces_locked += 1;

        let clear = self.line_clear.process(&mut self.board);
        if let Some(result) = &clear {
            self.score += result.score.points;
            self.lines += result.score.lines;
            debug!(
                "cleared {} row(s) for {} points (back-to-back: {}, streak {})",
                result.score.lines, result.score.points, result.score.back_to_back, result.score.streak
            );
        }
        self.last_lock = Some(LockOutcome { block, clear });

        self.just_held = false;
        let next = self.advance_queue();
        self.spawn(next);
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1)
    }
}
