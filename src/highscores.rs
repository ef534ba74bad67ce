#![warn(clippy::all, clippy::pedantic)]

use log::{debug, warn};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::game::HIGH_SCORE_SLOTS;
use crate::protocol::ScoreRecord;

// Environment variable that overrides the high score file location
pub const SCORES_ENV_VAR: &str = "BLOCKGRID_SCORES";

// Fallback path when no user data directory exists
const SCORES_FILE_PATH: &str = "localScores.txt";

/// The local top-ten table, highest score first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<ScoreRecord>,
}

impl Default for HighScores {
    // Default1:100 up to Default10:1000
    fn default() -> Self {
        let entries = (1..=HIGH_SCORE_SLOTS)
            .map(|i| {
                let score = u32::try_from(i * 100).unwrap_or(u32::MAX);
                ScoreRecord::new(format!("Default{i}"), score)
            })
            .collect();
        let mut scores = Self { entries };
        scores.sort();
        scores
    }
}

impl HighScores {
    /// Load the table from `path`, seeding it with the defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self, ScoresError> {
        if !path.exists() {
            debug!("No score file at {}, writing defaults", path.display());
            let scores = Self::default();
            scores.save(path)?;
            return Ok(scores);
        }

        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    /// Parse newline separated `name:score` records, skipping lines that are
    /// not records.
    #[must_use]
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match line.parse::<ScoreRecord>() {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("Skipping bad score line {line:?}: {err}");
                    None
                }
            })
            .collect();

        let mut scores = Self { entries };
        scores.sort();
        scores
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoresError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, self.to_string())?;
        Ok(())
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }

    #[must_use]
    pub fn entries(&self) -> &[ScoreRecord] {
        &self.entries
    }

    #[must_use]
    pub fn lowest(&self) -> Option<u32> {
        self.entries.last().map(|record| record.score)
    }

    /// Whether `score` would earn a place in the table.
    #[must_use]
    pub fn is_high_score(&self, score: u32) -> bool {
        if self.entries.len() < HIGH_SCORE_SLOTS {
            return true;
        }
        self.lowest().is_some_and(|lowest| score > lowest)
    }

    /// Add an entry, keeping only the best ten.
    pub fn insert(&mut self, name: impl Into<String>, score: u32) {
        self.entries.push(ScoreRecord::new(name, score));
        self.sort();
        self.entries.truncate(HIGH_SCORE_SLOTS);
    }
}

impl fmt::Display for HighScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.entries.iter().map(ToString::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

// Get the path to the high score file
#[must_use]
pub fn get_scores_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(SCORES_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("blockgrid").join("scores.txt")
    } else {
        PathBuf::from(SCORES_FILE_PATH)
    }
}

#[derive(Debug)]
pub enum ScoresError {
    Io(io::Error),
}

impl fmt::Display for ScoresError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoresError::Io(err) => write!(f, "score file io error: {err}"),
        }
    }
}

impl std::error::Error for ScoresError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScoresError::Io(err) => Some(err),
        }
    }
}

impl From<io::Error> for ScoresError {
    fn from(err: io::Error) -> Self {
        ScoresError::Io(err)
    }
}
