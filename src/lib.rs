pub mod app;
pub mod audio;
pub mod config;
pub mod engine;
pub mod game;
pub mod grid;
pub mod highscores;
pub mod leaderboard;
pub mod multiplayer;
pub mod piece;
pub mod protocol;
pub mod stats;
pub mod supply;
pub mod timer;

#[cfg(test)]
mod tests;

pub use engine::{Game, GameEvent, GameStatus};
pub use grid::{Coordinate, Grid};
pub use multiplayer::MultiplayerGame;
pub use piece::Piece;
pub use supply::{LocalSupply, PieceSupply, RemoteSupply, SupplyError};
