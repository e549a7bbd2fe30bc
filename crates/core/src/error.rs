use thiserror::Error;

/// Engine-level failures.
///
/// Gameplay never produces these on purpose: every placement is checked with the collision
/// predicates first, so seeing one means a caller skipped validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("collision violation: cell ({x}, {y}) is occupied or off the board")]
    CollisionViolation { x: i8, y: i8 },
}
