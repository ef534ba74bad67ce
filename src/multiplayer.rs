#![warn(clippy::all, clippy::pedantic)]

//! Multiplayer coordination.
//!
//! [`MultiplayerGame`] runs an ordinary [`Game`] whose pieces come from the
//! server, and keeps the server informed of our board, score and lives. Lines
//! from the transport go through [`MultiplayerGame::handle_line`] on the thread
//! that owns the game; outgoing messages are queued on the outbox channel for
//! the transport to write.

use crossbeam_channel::Sender;
use log::{debug, info, trace, warn};

use crate::config::Config;
use crate::engine::{Game, GameEvent};
use crate::game::{PREFETCH_PIECES, SNAPSHOT_SIZE};
use crate::leaderboard::Leaderboard;
use crate::piece::Piece;
use crate::protocol::{ClientMessage, ScoreRecord, ServerMessage};
use crate::supply::{RemoteSupply, SupplyError};
use crate::timer::TurnTimer;

pub struct MultiplayerGame {
    game: Game<RemoteSupply>,
    outbox: Sender<ClientMessage>,
    leaderboard: Leaderboard,
    online_high_scores: Vec<ScoreRecord>,
    chat: Vec<String>,
    // start() was called before both opening pieces had arrived
    start_pending: bool,
    detached: bool,
}

impl MultiplayerGame {
    /// Create the game and immediately request the two opening pieces.
    #[must_use]
    pub fn new(config: &Config, timer: Box<dyn TurnTimer>, outbox: Sender<ClientMessage>) -> Self {
        let mut supply = RemoteSupply::new(outbox.clone());
        supply.prefetch(PREFETCH_PIECES);

        Self {
            game: Game::new(config, supply, timer),
            outbox,
            leaderboard: Leaderboard::new(),
            online_high_scores: Vec::new(),
            chat: Vec::new(),
            start_pending: false,
            detached: false,
        }
    }

    /// Start as soon as both opening pieces are queued.
    ///
    /// If they have not arrived yet the game starts from
    /// [`MultiplayerGame::handle_line`] when the second one does.
    pub fn start(&mut self) -> Result<(), SupplyError> {
        if self.game.supply().queued() >= PREFETCH_PIECES {
            self.start_pending = false;
            self.game.start()
        } else {
            debug!(
                "Waiting for opening pieces ({} of {PREFETCH_PIECES} received)",
                self.game.supply().queued()
            );
            self.start_pending = true;
            Ok(())
        }
    }

    /// Feed one line received from the transport.
    ///
    /// Malformed lines are logged and dropped.
    pub fn handle_line(&mut self, line: &str) -> Result<(), SupplyError> {
        match line.parse::<ServerMessage>() {
            Ok(message) => self.handle_message(message),
            Err(err) => {
                warn!("Discarding malformed message {line:?}: {err}");
                Ok(())
            }
        }
    }

    pub fn handle_message(&mut self, message: ServerMessage) -> Result<(), SupplyError> {
        // After leaving the game only score-screen traffic is still of interest
        if self.detached
            && !matches!(
                message,
                ServerMessage::HighScores(_) | ServerMessage::NewScore(_)
            )
        {
            trace!("Detached, ignoring {message}");
            return Ok(());
        }

        match message {
            ServerMessage::Piece(index) => {
                let Some(piece) = Piece::create(index) else {
                    warn!("Server announced unknown piece {index}");
                    return Ok(());
                };
                self.game.supply_mut().receive(piece);
                if self.start_pending {
                    self.start()?;
                }
            }
            ServerMessage::Scores(records) => self.leaderboard.update(&records),
            ServerMessage::HighScores(mut records) => {
                records.sort_by(|a, b| b.score.cmp(&a.score));
                self.online_high_scores = records;
            }
            ServerMessage::NewScore(text) => info!("High score submitted: {text}"),
            ServerMessage::Chat(text) => self.chat.push(text),
        }
        Ok(())
    }

    /// Play the current piece and report the new board, score and lives.
    pub fn attempt_place(&mut self, x: i32, y: i32) -> Result<bool, SupplyError> {
        let placed = self.game.attempt_place(x, y)?;
        if placed {
            self.send(ClientMessage::Board(self.board_snapshot()));
            self.send(ClientMessage::Score(self.game.score()));
            self.send(ClientMessage::Lives(self.game.lives()));
        }
        Ok(placed)
    }

    pub fn rotate_current(&mut self) -> bool {
        self.game.rotate_current()
    }

    pub fn swap_current_and_following(&mut self) -> bool {
        self.game.swap_current_and_following()
    }

    pub fn use_skip(&mut self) -> Result<bool, SupplyError> {
        self.game.use_skip()
    }

    pub fn on_timer_expired(&mut self, generation: u64) -> Result<bool, SupplyError> {
        let ticked = self.game.on_timer_expired(generation)?;
        if ticked {
            self.after_missed_turn();
        }
        Ok(ticked)
    }

    pub fn game_loop_tick(&mut self) -> Result<bool, SupplyError> {
        let ticked = self.game.game_loop_tick()?;
        if ticked {
            self.after_missed_turn();
        }
        Ok(ticked)
    }

    fn after_missed_turn(&mut self) {
        self.send(ClientMessage::Lives(self.game.lives()));
        if self.game.is_over() {
            self.detach();
        }
    }

    /// End the game, tell the server we are leaving and stop listening.
    pub fn shutdown(&mut self) {
        self.game.shutdown();
        self.detach();
    }

    fn detach(&mut self) {
        if self.detached {
            return;
        }
        info!("Leaving multiplayer game");
        self.send(ClientMessage::Quit);
        self.start_pending = false;
        self.detached = true;
    }

    /// Ask the server for everyone's live scores.
    pub fn poll_scores(&self) {
        self.send(ClientMessage::RequestScores);
    }

    pub fn request_high_scores(&self) {
        self.send(ClientMessage::RequestHighScores);
    }

    /// Submit our final score to the online high-score table.
    pub fn submit_high_score(&self, name: &str) {
        self.send(ClientMessage::HighScore(ScoreRecord::new(
            name,
            self.game.score(),
        )));
    }

    pub fn send_chat(&self, text: &str) {
        self.send(ClientMessage::Chat(text.to_string()));
    }

    /// Spectator view of the top-left corner of our grid.
    #[must_use]
    pub fn board_snapshot(&self) -> String {
        self.game.grid().snapshot(SNAPSHOT_SIZE)
    }

    fn send(&self, message: ClientMessage) {
        if self.outbox.send(message).is_err() {
            warn!("Transport is gone, dropping outgoing message");
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    #[must_use]
    pub fn game(&self) -> &Game<RemoteSupply> {
        &self.game
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    #[must_use]
    pub fn online_high_scores(&self) -> &[ScoreRecord] {
        &self.online_high_scores
    }

    #[must_use]
    pub fn chat_log(&self) -> &[String] {
        &self.chat
    }

    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    #[cfg(test)]
    pub(crate) fn game_mut(&mut self) -> &mut Game<RemoteSupply> {
        &mut self.game
    }
}
