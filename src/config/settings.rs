use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{
    BASE_TURN_DELAY_MS, BOARD_HEIGHT, BOARD_WIDTH, MIN_TURN_DELAY_MS, STARTING_LIVES,
    STARTING_SKIPS, TURN_DELAY_STEP_MS,
};

// Board size and per-game allowances
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub columns: usize,
    pub rows: usize,
    pub lives: u32,
    pub skips: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: BOARD_WIDTH,
            rows: BOARD_HEIGHT,
            lives: STARTING_LIVES,
            skips: STARTING_SKIPS,
        }
    }
}

// Turn countdown tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub base_delay_ms: u64,
    pub min_delay_ms: u64,
    pub delay_step_ms: u64,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: BASE_TURN_DELAY_MS,
            min_delay_ms: MIN_TURN_DELAY_MS,
            delay_step_ms: TURN_DELAY_STEP_MS,
        }
    }
}

impl TimerConfig {
    /// Countdown length for a turn at `level`: shrinks by one step per level
    /// and never drops below the minimum.
    #[must_use]
    pub fn delay_for_level(&self, level: u32) -> Duration {
        let reduction = self.delay_step_ms.saturating_mul(u64::from(level));
        let delay = self
            .base_delay_ms
            .saturating_sub(reduction)
            .max(self.min_delay_ms);
        Duration::from_millis(delay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: "Player".to_string(),
        }
    }
}
