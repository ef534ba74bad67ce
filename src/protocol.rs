#![warn(clippy::all, clippy::pedantic)]

//! Text line protocol spoken with the game server.
//!
//! Every message is a command word optionally followed by a single space and a
//! payload. List payloads (`SCORES`, `HISCORES`) carry one record per line.
//! Lines are parsed once into [`ServerMessage`] and everything downstream
//! matches on the variant.

use log::warn;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::piece::PIECE_COUNT;

/// Status token the server uses for an eliminated player.
pub const DEAD_STATUS: &str = "DEAD";

/// A `name:score` pair, as used by high-score lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl fmt::Display for ScoreRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.score)
    }
}

impl FromStr for ScoreRecord {
    type Err = ProtocolError;

    fn from_str(record: &str) -> Result<Self, Self::Err> {
        // Names may contain colons, the score is always the last field
        let (name, score) = record
            .rsplit_once(':')
            .ok_or_else(|| ProtocolError::MalformedRecord(record.to_string()))?;
        Ok(Self {
            name: name.to_string(),
            score: parse_number(score)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeerStatus {
    Alive(u32),
    Dead,
}

impl fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerStatus::Alive(lives) => write!(f, "{lives}"),
            PeerStatus::Dead => f.write_str(DEAD_STATUS),
        }
    }
}

/// One `name:score:status` record of a `SCORES` message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerScore {
    pub name: String,
    pub score: u32,
    pub status: PeerStatus,
}

impl PeerScore {
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.status == PeerStatus::Dead
    }
}

impl fmt::Display for PeerScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.score, self.status)
    }
}

impl FromStr for PeerScore {
    type Err = ProtocolError;

    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let malformed = || ProtocolError::MalformedRecord(record.to_string());
        let mut fields = record.rsplitn(3, ':');
        let status = fields.next().ok_or_else(malformed)?;
        let score = fields.next().ok_or_else(malformed)?;
        let name = fields.next().ok_or_else(malformed)?;

        let status = if status == DEAD_STATUS {
            PeerStatus::Dead
        } else {
            PeerStatus::Alive(parse_number(status)?)
        };

        Ok(Self {
            name: name.to_string(),
            score: parse_number(score)?,
            status,
        })
    }
}

/// Messages received from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `PIECE <index>`: the next piece in the shared sequence.
    Piece(usize),
    /// `SCORES <records>`: live scores of every player in the channel.
    Scores(Vec<PeerScore>),
    /// `HISCORES <records>`: the online high-score table.
    HighScores(Vec<ScoreRecord>),
    /// `NEWSCORE <text>`: acknowledgement of a submitted high score.
    NewScore(String),
    /// `MSG <text>`: a chat line.
    Chat(String),
}

impl FromStr for ServerMessage {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(ProtocolError::Empty);
        }

        let (command, payload) = match line.split_once(' ') {
            Some((command, payload)) => (command, Some(payload)),
            None => (line, None),
        };

        match command {
            "PIECE" => {
                let index = parse_number(payload.ok_or(ProtocolError::MissingArgument("PIECE"))?)?;
                let index = usize::try_from(index).unwrap_or(usize::MAX);
                if index >= PIECE_COUNT {
                    return Err(ProtocolError::PieceOutOfRange(index));
                }
                Ok(ServerMessage::Piece(index))
            }
            "SCORES" => {
                let payload = payload.ok_or(ProtocolError::MissingArgument("SCORES"))?;
                Ok(ServerMessage::Scores(parse_records(payload)))
            }
            "HISCORES" => {
                let payload = payload.ok_or(ProtocolError::MissingArgument("HISCORES"))?;
                Ok(ServerMessage::HighScores(parse_records(payload)))
            }
            "NEWSCORE" => Ok(ServerMessage::NewScore(payload.unwrap_or_default().to_string())),
            "MSG" => Ok(ServerMessage::Chat(payload.unwrap_or_default().to_string())),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMessage::Piece(index) => write!(f, "PIECE {index}"),
            ServerMessage::Scores(records) => write!(f, "SCORES {}", join_records(records)),
            ServerMessage::HighScores(records) => write!(f, "HISCORES {}", join_records(records)),
            ServerMessage::NewScore(text) => write!(f, "NEWSCORE {text}"),
            ServerMessage::Chat(text) => write!(f, "MSG {text}"),
        }
    }
}

/// Messages sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// `PIECE`: ask for the next piece in the sequence.
    RequestPiece,
    /// `BOARD <cells>`: spectator snapshot of our grid.
    Board(String),
    Score(u32),
    Lives(u32),
    /// `SCORES`: poll the live scores of the channel.
    RequestScores,
    /// `HISCORE <name>:<score>`: submit an online high score.
    HighScore(ScoreRecord),
    /// `HISCORES`: ask for the online high-score table.
    RequestHighScores,
    Chat(String),
    Quit,
}

impl fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientMessage::RequestPiece => f.write_str("PIECE"),
            ClientMessage::Board(cells) => write!(f, "BOARD {cells}"),
            ClientMessage::Score(score) => write!(f, "SCORE {score}"),
            ClientMessage::Lives(lives) => write!(f, "LIVES {lives}"),
            ClientMessage::RequestScores => f.write_str("SCORES"),
            ClientMessage::HighScore(record) => write!(f, "HISCORE {record}"),
            ClientMessage::RequestHighScores => f.write_str("HISCORES"),
            ClientMessage::Chat(text) => write!(f, "MSG {text}"),
            ClientMessage::Quit => f.write_str("QUIT"),
        }
    }
}

fn parse_number(field: &str) -> Result<u32, ProtocolError> {
    field
        .trim()
        .parse()
        .map_err(|err: ParseIntError| ProtocolError::InvalidNumber(format!("{field:?}: {err}")))
}

// One record per line; a bad record is dropped without losing the rest
fn parse_records<T>(payload: &str) -> Vec<T>
where
    T: FromStr<Err = ProtocolError>,
{
    payload
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match line.parse::<T>() {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Skipping bad record {line:?}: {err}");
                None
            }
        })
        .collect()
}

fn join_records<T: fmt::Display>(records: &[T]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    PieceOutOfRange(usize),
    MalformedRecord(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Empty => f.write_str("empty message"),
            ProtocolError::UnknownCommand(command) => write!(f, "unknown command {command:?}"),
            ProtocolError::MissingArgument(command) => write!(f, "{command} is missing its argument"),
            ProtocolError::InvalidNumber(detail) => write!(f, "invalid number {detail}"),
            ProtocolError::PieceOutOfRange(index) => {
                write!(f, "piece index {index} is outside 0..{PIECE_COUNT}")
            }
            ProtocolError::MalformedRecord(record) => write!(f, "malformed record {record:?}"),
        }
    }
}

impl std::error::Error for ProtocolError {}
