//! Session configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION};

/// Parameters a session is built from.
///
/// Missing fields fall back to the defaults when deserialized, so `{}` is a valid config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in columns
    pub width: u8,
    /// Visible board height in rows
    pub height: u8,
    /// Randomizer seed
    pub seed: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board width {0} is outside 4..=64")]
    InvalidWidth(u8),
    #[error("board height {0} is outside 4..=64")]
    InvalidHeight(u8),
}

impl GameConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check the dimensions are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range = MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION;
        if !range.contains(&self.width) {
            return Err(ConfigError::InvalidWidth(self.width));
        }
        if !range.contains(&self.height) {
            return Err(ConfigError::InvalidHeight(self.height));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
        }
    }
}
