#![warn(clippy::all, clippy::pedantic)]

use crate::engine::GameEvent;

// Sound effects the audio player is asked to play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Place,
    Fail,
    Rotate,
    Swap,
    LineClear,
    LifeLost,
}

impl SoundEffect {
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            SoundEffect::Place => "place.wav",
            SoundEffect::Fail => "fail.wav",
            SoundEffect::Rotate => "rotate.wav",
            SoundEffect::Swap => "pling.wav",
            SoundEffect::LineClear => "clear.wav",
            SoundEffect::LifeLost => "lifelose.wav",
        }
    }
}

// Background track played while a game is running
pub const GAME_MUSIC: &str = "game.wav";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Play(SoundEffect),
    StartMusic,
    StopMusic,
}

/// Cue the audio player should react with for `event`, if any.
#[must_use]
pub fn cue_for(event: &GameEvent) -> Option<AudioCue> {
    let cue = match event {
        GameEvent::Placed { .. } => AudioCue::Play(SoundEffect::Place),
        GameEvent::PlacementFailed { .. } => AudioCue::Play(SoundEffect::Fail),
        GameEvent::Rotated => AudioCue::Play(SoundEffect::Rotate),
        GameEvent::Swapped => AudioCue::Play(SoundEffect::Swap),
        GameEvent::LinesCleared { .. } => AudioCue::Play(SoundEffect::LineClear),
        GameEvent::LifeLost { .. } => AudioCue::Play(SoundEffect::LifeLost),
        GameEvent::MusicStarted => AudioCue::StartMusic,
        GameEvent::MusicStopped => AudioCue::StopMusic,
        GameEvent::Started
        | GameEvent::PieceChanged { .. }
        | GameEvent::SkipUsed { .. }
        | GameEvent::SkipDenied
        | GameEvent::GameOver { .. } => return None,
    };
    Some(cue)
}
