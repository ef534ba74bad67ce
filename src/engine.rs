#![warn(clippy::all, clippy::pedantic)]

//! The game state machine.
//!
//! A [`Game`] owns the grid, the two piece slots and the counters for one game.
//! It is driven from a single thread by two sources: player operations
//! ([`Game::attempt_place`], [`Game::rotate_current`],
//! [`Game::swap_current_and_following`], [`Game::use_skip`]) and turn expiries
//! ([`Game::on_timer_expired`]). Everything it wants the outside world to react
//! to is queued as a [`GameEvent`] and collected with [`Game::drain_events`].

use log::{debug, info};
use std::collections::HashSet;
use std::time::Duration;

use crate::config::{Config, TimerConfig};
use crate::grid::{Coordinate, Grid};
use crate::piece::Piece;
use crate::stats::GameStats;
use crate::supply::{LocalSupply, PieceSupply, SupplyError};
use crate::timer::TurnTimer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    MusicStarted,
    MusicStopped,
    /// The current or following slot changed.
    PieceChanged { current: Piece, following: Piece },
    Rotated,
    Swapped,
    Placed { x: i32, y: i32 },
    PlacementFailed { x: i32, y: i32 },
    /// Full rows and columns were emptied. A cell shared by a row and a
    /// column appears once in `cells`.
    LinesCleared {
        lines: u32,
        cells: HashSet<Coordinate>,
    },
    SkipUsed { remaining: u32 },
    SkipDenied,
    LifeLost { lives: u32 },
    GameOver { score: u32 },
}

pub struct Game<S: PieceSupply> {
    grid: Grid,
    supply: S,
    current: Option<Piece>,
    following: Option<Piece>,
    stats: GameStats,
    status: GameStatus,
    timer_config: TimerConfig,
    timer: Box<dyn TurnTimer>,
    // Bumped on every arm and cancel; expiries carrying an older value are stale
    generation: u64,
    turn_delay: Duration,
    events: Vec<GameEvent>,
}

impl Game<LocalSupply> {
    /// A single-player game drawing random pieces locally.
    #[must_use]
    pub fn single_player(config: &Config, timer: Box<dyn TurnTimer>) -> Self {
        Self::new(config, LocalSupply::new(), timer)
    }
}

impl<S: PieceSupply> Game<S> {
    #[must_use]
    pub fn new(config: &Config, supply: S, timer: Box<dyn TurnTimer>) -> Self {
        let stats = GameStats::new(&config.game);
        let turn_delay = config.timer.delay_for_level(stats.level);

        Self {
            grid: Grid::new(config.game.columns, config.game.rows),
            supply,
            current: None,
            following: None,
            stats,
            status: GameStatus::NotStarted,
            timer_config: config.timer.clone(),
            timer,
            generation: 0,
            turn_delay,
            events: Vec::new(),
        }
    }

    /// Fill both piece slots and start the first turn.
    ///
    /// Does nothing unless the game has not started yet.
    pub fn start(&mut self) -> Result<(), SupplyError> {
        if self.status != GameStatus::NotStarted {
            debug!("Ignoring start, game is {:?}", self.status);
            return Ok(());
        }
        // Both slots or neither, so a short queue loses no piece
        if !self.supply.ready(2) {
            debug!("Supply cannot fill both piece slots yet");
            return Err(SupplyError::Starved);
        }

        let current = self.supply.next_piece()?;
        let following = self.supply.next_piece()?;

        info!("Starting game");
        self.current = Some(current);
        self.following = Some(following);
        self.status = GameStatus::Running;
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::MusicStarted);
        self.push_piece_changed();
        self.restart_timer();
        Ok(())
    }

    /// Try to play the current piece centred on `(x, y)`.
    ///
    /// Returns `Ok(false)` when the piece does not fit or the game is not
    /// running; nothing changes in that case.
    pub fn attempt_place(&mut self, x: i32, y: i32) -> Result<bool, SupplyError> {
        if !self.is_running() {
            return Ok(false);
        }
        let Some(current) = self.current else {
            return Ok(false);
        };

        if !self.grid.can_place(&current, x, y) {
            info!("Unable to place {current} at {x},{y}");
            self.events.push(GameEvent::PlacementFailed { x, y });
            return Ok(false);
        }

        // Take the replacement piece before touching anything else
        let next = self.supply.next_piece()?;

        // A successful turn resets the clock
        self.restart_timer();

        self.grid.place(&current, x, y);
        debug!("Placed {current} at {x},{y}");
        self.events.push(GameEvent::Placed { x, y });
        self.advance(next);

        let (lines, cells) = self.clear_lines();
        self.stats.update_score(lines, cells);
        self.stats.update_multiplier(lines);
        self.stats.update_level();

        Ok(true)
    }

    /// Turn the current piece a quarter turn clockwise.
    pub fn rotate_current(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        self.current = Some(current.rotated(1));
        self.events.push(GameEvent::Rotated);
        self.push_piece_changed();
        true
    }

    pub fn swap_current_and_following(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        std::mem::swap(&mut self.current, &mut self.following);
        self.events.push(GameEvent::Swapped);
        self.push_piece_changed();
        true
    }

    /// Discard the current piece without playing it, if a skip is left.
    pub fn use_skip(&mut self) -> Result<bool, SupplyError> {
        if !self.is_running() {
            return Ok(false);
        }
        if self.stats.skips == 0 {
            info!("No more skips available");
            self.events.push(GameEvent::SkipDenied);
            return Ok(false);
        }

        let next = self.supply.next_piece()?;
        self.stats.take_skip();
        self.advance(next);
        self.events.push(GameEvent::SkipUsed {
            remaining: self.stats.skips,
        });
        Ok(true)
    }

    /// Handle a turn expiry reported by the timer.
    ///
    /// Expiries from an earlier arming, or arriving after the game ended, are
    /// ignored and return `Ok(false)`.
    pub fn on_timer_expired(&mut self, generation: u64) -> Result<bool, SupplyError> {
        if !self.is_running() || generation != self.generation {
            debug!(
                "Ignoring stale turn expiry {generation} (current {})",
                self.generation
            );
            return Ok(false);
        }
        self.game_loop_tick()
    }

    /// The turn ran out without a placement: lose a life and move on.
    pub fn game_loop_tick(&mut self) -> Result<bool, SupplyError> {
        if !self.is_running() {
            return Ok(false);
        }

        let survives = self.stats.lives > 1;
        let next = if survives {
            Some(self.supply.next_piece()?)
        } else {
            None
        };

        self.stats.lose_life();
        info!("Turn expired, {} lives left", self.stats.lives);
        self.events.push(GameEvent::LifeLost {
            lives: self.stats.lives,
        });

        match next {
            Some(next) => {
                self.advance(next);
                self.stats.reset_multiplier();
                self.restart_timer();
            }
            None => self.end(),
        }
        Ok(true)
    }

    /// Stop the game from any state. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.cancel_timer();
        if self.status == GameStatus::Ended {
            return;
        }
        info!("Shutting down the game");
        self.status = GameStatus::Ended;
        self.events.push(GameEvent::MusicStopped);
    }

    fn end(&mut self) {
        info!("Game over with {} points", self.stats.score);
        self.cancel_timer();
        self.status = GameStatus::Ended;
        self.events.push(GameEvent::GameOver {
            score: self.stats.score,
        });
        self.events.push(GameEvent::MusicStopped);
    }

    // current <- following, following <- next
    fn advance(&mut self, next: Piece) {
        self.current = self.following.take();
        self.following = Some(next);
        self.push_piece_changed();
    }

    // Empty every full row and column, returning (lines, distinct cells)
    fn clear_lines(&mut self) -> (u32, u32) {
        let (lines, cells) = self.grid.full_lines();
        if lines == 0 {
            return (0, 0);
        }

        let count = u32::try_from(cells.len()).unwrap_or(u32::MAX);
        debug!("Clearing {lines} lines covering {count} cells");
        self.grid.clear_cells(&cells);
        self.events.push(GameEvent::LinesCleared { lines, cells });
        (lines, count)
    }

    fn push_piece_changed(&mut self) {
        if let (Some(current), Some(following)) = (self.current, self.following) {
            self.events.push(GameEvent::PieceChanged { current, following });
        }
    }

    fn restart_timer(&mut self) {
        self.timer.cancel();
        self.generation += 1;
        self.turn_delay = self.timer_delay();
        self.timer.arm(self.generation, self.turn_delay);
        debug!(
            "Turn {} armed for {:?}",
            self.generation, self.turn_delay
        );
    }

    fn cancel_timer(&mut self) {
        self.timer.cancel();
        self.generation += 1;
    }

    /// Countdown length for the current level.
    #[must_use]
    pub fn timer_delay(&self) -> Duration {
        self.timer_config.delay_for_level(self.stats.level)
    }

    /// Countdown length of the turn in progress.
    #[must_use]
    pub fn turn_delay(&self) -> Duration {
        self.turn_delay
    }

    /// Generation of the most recent arming; expiries must carry this value.
    #[must_use]
    pub fn timer_generation(&self) -> u64 {
        self.generation
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn following(&self) -> Option<&Piece> {
        self.following.as_ref()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.stats.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.stats.level
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.stats.lives
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.stats.multiplier
    }

    #[must_use]
    pub fn skips(&self) -> u32 {
        self.stats.skips
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Ended
    }

    #[must_use]
    pub fn supply(&self) -> &S {
        &self.supply
    }

    pub fn supply_mut(&mut self) -> &mut S {
        &mut self.supply
    }

    // Test-only access for arranging board positions
    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub(crate) fn stats_mut(&mut self) -> &mut GameStats {
        &mut self.stats
    }
}
