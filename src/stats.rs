#![warn(clippy::all, clippy::pedantic)]

use log::debug;

use crate::config::GameConfig;
use crate::game::{POINTS_PER_CELL, POINTS_PER_LEVEL, STARTING_MULTIPLIER};

/// Score, level and allowances owned by one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
    pub skips: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameStats {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            level: 0,
            lives: config.lives,
            multiplier: STARTING_MULTIPLIER,
            skips: config.skips,
        }
    }

    /// Points awarded for a clear at the current multiplier.
    #[must_use]
    pub fn points_for(&self, lines: u32, cells: u32) -> u32 {
        lines
            .saturating_mul(cells)
            .saturating_mul(POINTS_PER_CELL)
            .saturating_mul(self.multiplier)
    }

    // Add the points for a clear; a placement that cleared nothing scores nothing
    pub fn update_score(&mut self, lines: u32, cells: u32) -> u32 {
        if lines == 0 {
            return 0;
        }
        let points = self.points_for(lines, cells);
        self.score = self.score.saturating_add(points);
        debug!("Scored {points} for {lines} lines / {cells} cells, total {}", self.score);
        points
    }

    // Consecutive clears grow the multiplier, anything else resets it
    pub fn update_multiplier(&mut self, lines: u32) {
        if lines > 0 {
            self.multiplier += 1;
        } else {
            self.reset_multiplier();
        }
    }

    pub fn reset_multiplier(&mut self) {
        self.multiplier = STARTING_MULTIPLIER;
    }

    // Level follows score, which only ever grows
    pub fn update_level(&mut self) {
        self.level = self.level.max(self.score / POINTS_PER_LEVEL);
    }

    /// Spend one skip. Returns `false` when none are left.
    pub fn take_skip(&mut self) -> bool {
        if self.skips == 0 {
            return false;
        }
        self.skips -= 1;
        true
    }

    /// Lose one life and report whether any remain.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives > 0
    }
}
