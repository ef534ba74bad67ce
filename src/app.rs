#![warn(clippy::all, clippy::pedantic)]

use log::{debug, info, warn};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use crate::audio::{self, AudioCue};
use crate::config::Config;
use crate::engine::{Game, GameEvent};
use crate::highscores::HighScores;
use crate::supply::LocalSupply;
use crate::timer::{TimerFired, TurnTimer};

pub type AppResult<T> = anyhow::Result<T>;

// Commands typed by the player, one per line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place { x: i32, y: i32 },
    Rotate,
    Swap,
    Skip,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = match words.next() {
            Some("place" | "p") => {
                let mut coordinate = || {
                    words
                        .next()
                        .and_then(|word| word.parse::<i32>().ok())
                        .ok_or_else(|| "usage: place <x> <y>".to_string())
                };
                let x = coordinate()?;
                let y = coordinate()?;
                Command::Place { x, y }
            }
            Some("rotate" | "r") => Command::Rotate,
            Some("swap" | "s") => Command::Swap,
            Some("skip" | "k") => Command::Skip,
            Some("quit" | "q") => Command::Quit,
            Some(other) => return Err(format!("unknown command {other:?}")),
            None => return Err("empty command".to_string()),
        };
        Ok(command)
    }
}

/// Single-player session driven from one thread.
pub struct App {
    pub game: Game<LocalSupply>,
    pub config: Config,
    pub high_scores: HighScores,
    scores_path: PathBuf,
    pub should_quit: bool,
    pub message: Option<String>,
    pub cues: Vec<AudioCue>,
}

impl App {
    pub fn new(config: Config, timer: Box<dyn TurnTimer>, scores_path: PathBuf) -> AppResult<Self> {
        let high_scores = HighScores::load(&scores_path)?;
        let game = Game::single_player(&config, timer);

        Ok(Self {
            game,
            config,
            high_scores,
            scores_path,
            should_quit: false,
            message: None,
            cues: Vec::new(),
        })
    }

    pub fn start(&mut self) -> AppResult<()> {
        self.game.start()?;
        self.process_events();
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> AppResult<()> {
        match line.parse::<Command>() {
            Ok(command) => self.handle_command(command),
            Err(err) => {
                self.message = Some(err);
                Ok(())
            }
        }
    }

    pub fn handle_command(&mut self, command: Command) -> AppResult<()> {
        self.message = None;
        debug!("Command {command:?}");

        match command {
            Command::Place { x, y } => {
                if !self.game.attempt_place(x, y)? {
                    self.message = Some(format!("cannot place at {x},{y}"));
                }
            }
            Command::Rotate => {
                self.game.rotate_current();
            }
            Command::Swap => {
                self.game.swap_current_and_following();
            }
            Command::Skip => {
                if !self.game.use_skip()? {
                    self.message = Some("no skips left".to_string());
                }
            }
            Command::Quit => {
                self.game.shutdown();
                self.should_quit = true;
            }
        }

        self.process_events();
        Ok(())
    }

    pub fn on_timer(&mut self, fired: TimerFired) -> AppResult<()> {
        if self.game.on_timer_expired(fired.generation)? {
            self.message = Some("too slow, life lost".to_string());
        }
        self.process_events();
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.game.shutdown();
        // Nothing left to react to once we are leaving
        self.game.drain_events();
    }

    fn process_events(&mut self) {
        for event in self.game.drain_events() {
            if let Some(cue) = audio::cue_for(&event) {
                self.cues.push(cue);
            }
            if let GameEvent::GameOver { score } = event {
                self.record_score(score);
                self.should_quit = true;
            }
        }
    }

    fn record_score(&mut self, score: u32) {
        if !self.high_scores.is_high_score(score) {
            self.message = Some(format!("game over with {score} points"));
            return;
        }

        info!("New high score {score}");
        let name = self.config.player.name.clone();
        self.high_scores.insert(name, score);
        if let Err(err) = self.high_scores.save(&self.scores_path) {
            warn!("Could not save high scores: {err}");
        }
        self.message = Some(format!("game over, new high score {score}!"));
    }

    /// Plain text view of the grid, the piece slots and the counters.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let grid = self.game.grid();
        let stats = self.game.stats();

        let _ = writeln!(
            out,
            "score {}  level {}  lives {}  x{}  skips {}",
            stats.score, stats.level, stats.lives, stats.multiplier, stats.skips
        );
        for y in 0..grid.height {
            let row: Vec<String> = (0..grid.width)
                .map(|x| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    let value = grid.get(x as i32, y as i32);
                    if value == 0 { ".".to_string() } else { format!("{value:x}") }
                })
                .collect();
            let _ = writeln!(out, "{}", row.join(" "));
        }
        if let (Some(current), Some(following)) = (self.game.current(), self.game.following()) {
            let _ = writeln!(out, "current {current}  next {following}");
        }
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        out
    }
}
