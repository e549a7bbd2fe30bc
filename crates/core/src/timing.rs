//! Timing model - level and level-dependent intervals
//!
//! | Quantity | Formula |
//! |----------|---------|
//! | Level | `score / 10 + 1` |
//! | Gravity (s/row) | `max(eps, (0.8 - (level - 1) * 0.01) ^ (level - 1))` |
//! | Lock delay (s) | `max(eps, 0.8 - log10(0.2 * level + 0.8))` |
//!
//! `eps` is 1ms. Everything is a pure function of the score, so intervals are recomputed on
//! demand and never go stale.
//!
//! The engine owns no clock. [`DropSchedule`] is a helper the outer loop can own to turn
//! elapsed wall-clock time into "call tick now" / "call lock now" decisions.

use std::time::Duration;

use crate::types::{
    GRAVITY_BASE_SECS, GRAVITY_BASE_STEP_SECS, LOCK_DELAY_BASE_SECS, MIN_INTERVAL_SECS,
    SCORE_PER_LEVEL,
};

/// Level for a score (1-based)
pub fn level_for_score(score: u32) -> u32 {
    score / SCORE_PER_LEVEL + 1
}

/// Seconds per gravity step at `level`
pub fn gravity_interval_secs(level: u32) -> f64 {
    let steps = level.saturating_sub(1);
    // Clamp before exponentiation: a negative base would flip sign on odd powers.
    let base = (GRAVITY_BASE_SECS - steps as f64 * GRAVITY_BASE_STEP_SECS).max(0.0);
    base.powi(steps.min(i32::MAX as u32) as i32)
        .max(MIN_INTERVAL_SECS)
}

/// Seconds a grounded block may stay unlocked at `level`
pub fn lock_delay_secs(level: u32) -> f64 {
    let level = level.max(1) as f64;
    (LOCK_DELAY_BASE_SECS - (0.2 * level + 0.8).log10()).max(MIN_INTERVAL_SECS)
}

pub fn gravity_interval(level: u32) -> Duration {
    Duration::from_secs_f64(gravity_interval_secs(level))
}

pub fn lock_delay(level: u32) -> Duration {
    Duration::from_secs_f64(lock_delay_secs(level))
}

/// Which engine operation the outer loop should call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledStep {
    /// Call `GameSession::tick`
    Gravity,
    /// Call `GameSession::lock`
    Lock,
}

/// Gravity and lock-delay timers for an outer frame loop.
///
/// Feed it elapsed time every frame along with the session's level and grounded state. While
/// the block is falling only the gravity timer runs; once grounded only the lock timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropSchedule {
    gravity_elapsed: Duration,
    lock_elapsed: Duration,
}

impl DropSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance both timers; returns the step that became due, if any
    pub fn advance(&mut self, elapsed: Duration, level: u32, grounded: bool) -> Option<ScheduledStep> {
        if grounded {
            self.gravity_elapsed = Duration::ZERO;
            self.lock_elapsed += elapsed;
            if self.lock_elapsed >= lock_delay(level) {
                self.lock_elapsed = Duration::ZERO;
                return Some(ScheduledStep::Lock);
            }
            return None;
        }

        self.lock_elapsed = Duration::ZERO;
        self.gravity_elapsed += elapsed;
        if self.gravity_elapsed >= gravity_interval(level) {
            self.gravity_elapsed = Duration::ZERO;
            return Some(ScheduledStep::Gravity);
        }
        None
    }

    /// A move or rotation succeeded: restart the lock delay
    pub fn note_player_move(&mut self) {
        self.lock_elapsed = Duration::ZERO;
    }

    /// Soft drop stepped the block: restart the gravity interval
    pub fn note_soft_drop(&mut self) {
        self.gravity_elapsed = Duration::ZERO;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn lock_elapsed(&self) -> Duration {
        self.lock_elapsed
    }

    pub fn gravity_elapsed(&self) -> Duration {
        self.gravity_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_calculation() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(9), 1);
        assert_eq!(level_for_score(10), 2);
        assert_eq!(level_for_score(29), 3);
        assert_eq!(level_for_score(100), 11);
    }

    #[test]
    fn test_gravity_intervals() {
        assert!((gravity_interval_secs(1) - 1.0).abs() < 1e-9);
        assert!((gravity_interval_secs(2) - 0.79).abs() < 1e-9);
        assert!((gravity_interval_secs(3) - 0.78 * 0.78).abs() < 1e-9);
    }

    #[test]
    fn test_gravity_is_non_increasing_and_floored() {
        let mut previous = f64::INFINITY;
        for level in 1..=300 {
            let interval = gravity_interval_secs(level);
            assert!(interval <= previous, "level {}", level);
            assert!(interval >= MIN_INTERVAL_SECS);
            previous = interval;
        }
        assert_eq!(gravity_interval_secs(200), MIN_INTERVAL_SECS);
    }

    #[test]
    fn test_lock_delay() {
        assert!((lock_delay_secs(1) - 0.8).abs() < 1e-9);
        assert!(lock_delay_secs(10) < lock_delay_secs(1));
        // Raw formula is negative here.
        assert_eq!(lock_delay_secs(50), MIN_INTERVAL_SECS);
        assert_eq!(lock_delay(1), Duration::from_millis(800));
    }

    #[test]
    fn test_schedule_gravity_then_lock() {
        let mut schedule = DropSchedule::new();

        assert_eq!(schedule.advance(Duration::from_millis(600), 1, false), None);
        assert_eq!(
            schedule.advance(Duration::from_millis(400), 1, false),
            Some(ScheduledStep::Gravity)
        );

        assert_eq!(schedule.advance(Duration::from_millis(500), 1, true), None);
        schedule.note_player_move();
        assert_eq!(schedule.advance(Duration::from_millis(500), 1, true), None);
        assert_eq!(
            schedule.advance(Duration::from_millis(300), 1, true),
            Some(ScheduledStep::Lock)
        );
        assert_eq!(schedule.lock_elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_leaving_ground_resets_lock_timer() {
        let mut schedule = DropSchedule::new();
        schedule.advance(Duration::from_millis(700), 1, true);
        schedule.advance(Duration::from_millis(10), 1, false);
        assert_eq!(schedule.lock_elapsed(), Duration::ZERO);
        assert_eq!(schedule.advance(Duration::from_millis(700), 1, true), None);
    }
}
