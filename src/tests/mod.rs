#![warn(clippy::all, clippy::pedantic)]

pub mod config_tests;
pub mod grid_tests;
pub mod multiplayer_tests;
pub mod piece_tests;
