#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 5;
pub const BOARD_HEIGHT: usize = 5;

// Per-game allowances
pub const STARTING_LIVES: u32 = 3;
pub const STARTING_SKIPS: u32 = 3;
pub const STARTING_MULTIPLIER: u32 = 1;

// Scoring: lines * cells * POINTS_PER_CELL * multiplier
pub const POINTS_PER_CELL: u32 = 10;

// Level progression
pub const POINTS_PER_LEVEL: u32 = 1000;

// Turn countdown, in milliseconds
pub const BASE_TURN_DELAY_MS: u64 = 12_000;
pub const MIN_TURN_DELAY_MS: u64 = 2_500;
pub const TURN_DELAY_STEP_MS: u64 = 500;

// Multiplayer spectator snapshot (top-left corner of the grid)
pub const SNAPSHOT_SIZE: usize = 5;

// Number of piece requests issued before a multiplayer game can start
pub const PREFETCH_PIECES: usize = 2;

// Local high score table
pub const HIGH_SCORE_SLOTS: usize = 10;
