#![warn(clippy::all, clippy::pedantic)]

use log::info;
use std::collections::HashMap;

use crate::protocol::{PeerScore, ScoreRecord};

/// Suffix shown after the name of an eliminated player.
pub const DEAD_SUFFIX: &str = " DEAD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub dead: bool,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.dead {
            format!("{}{DEAD_SUFFIX}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Live scores of every player in a multiplayer channel.
///
/// Elimination is sticky: once a player has been reported dead they stay
/// marked, even if a later update lists them with a live status. Their score
/// still follows the latest update.
#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    scores: HashMap<String, u32>,
    // Score at the moment of elimination, in elimination order
    eliminated: Vec<ScoreRecord>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the live scores with the contents of a `SCORES` message.
    pub fn update(&mut self, records: &[PeerScore]) {
        let mut scores = HashMap::with_capacity(records.len());

        for record in records {
            if record.is_dead() && !self.is_eliminated(&record.name) {
                info!("{} has been eliminated with {}", record.name, record.score);
                self.eliminated
                    .push(ScoreRecord::new(record.name.clone(), record.score));
            }
            scores.insert(record.name.clone(), record.score);
        }

        self.scores = scores;
    }

    #[must_use]
    pub fn is_eliminated(&self, name: &str) -> bool {
        self.eliminated.iter().any(|record| record.name == name)
    }

    #[must_use]
    pub fn score_of(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    #[must_use]
    pub fn scores(&self) -> &HashMap<String, u32> {
        &self.scores
    }

    #[must_use]
    pub fn eliminated(&self) -> &[ScoreRecord] {
        &self.eliminated
    }

    /// Players from the latest update, highest score first.
    #[must_use]
    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = self
            .scores
            .iter()
            .map(|(name, &score)| LeaderboardEntry {
                name: name.clone(),
                score,
                dead: self.is_eliminated(name),
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        entries
    }

    /// Standings for the end-of-game score screen.
    ///
    /// Eliminated players keep the score they had when they went out; everyone
    /// else is listed with their latest score.
    #[must_use]
    pub fn final_standings(&self) -> Vec<ScoreRecord> {
        let mut standings = self.eliminated.clone();
        for (name, &score) in &self.scores {
            if !self.is_eliminated(name) {
                standings.push(ScoreRecord::new(name.clone(), score));
            }
        }
        standings.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
        standings
    }
}
