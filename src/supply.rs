#![warn(clippy::all, clippy::pedantic)]

use crossbeam_channel::Sender;
use log::{debug, error, trace, warn};
use std::collections::VecDeque;
use std::fmt;

use crate::piece::{PIECE_COUNT, Piece};
use crate::protocol::ClientMessage;

/// Source of the pieces a game plays with.
pub trait PieceSupply {
    fn next_piece(&mut self) -> Result<Piece, SupplyError>;

    /// Whether the next `count` draws can all succeed right now.
    fn ready(&self, _count: usize) -> bool {
        true
    }
}

// Uniform random draw from the whole catalogue
#[derive(Debug, Clone)]
pub struct LocalSupply {
    rng: fastrand::Rng,
}

impl LocalSupply {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// A supply that replays the same sequence for the same seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for LocalSupply {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceSupply for LocalSupply {
    fn next_piece(&mut self) -> Result<Piece, SupplyError> {
        let index = self.rng.usize(0..PIECE_COUNT);
        trace!("Picking a random piece: {index}");
        Piece::create(index).ok_or(SupplyError::UnknownPiece(index))
    }
}

/// Pieces announced by the server, consumed in arrival order.
///
/// Every piece taken from the queue is paid for by sending one new `PIECE`
/// request, so exactly one request per consumed piece is in flight and the
/// queue refills as fast as it drains.
#[derive(Debug)]
pub struct RemoteSupply {
    queue: VecDeque<Piece>,
    outstanding: usize,
    outbox: Sender<ClientMessage>,
}

impl RemoteSupply {
    #[must_use]
    pub fn new(outbox: Sender<ClientMessage>) -> Self {
        Self {
            queue: VecDeque::new(),
            outstanding: 0,
            outbox,
        }
    }

    /// Ask the server for one more piece.
    pub fn request(&mut self) {
        debug!("Sending piece request");
        if self.outbox.send(ClientMessage::RequestPiece).is_err() {
            warn!("Piece request dropped, transport is gone");
        }
        self.outstanding += 1;
    }

    // Issue `count` requests up front so the first slots resolve immediately
    pub fn prefetch(&mut self, count: usize) {
        for _ in 0..count {
            self.request();
        }
    }

    /// Queue a piece announced by the server.
    pub fn receive(&mut self, piece: Piece) {
        if self.outstanding == 0 {
            warn!("Received unrequested piece {piece}");
        } else {
            self.outstanding -= 1;
        }
        self.queue.push_back(piece);
    }

    /// Pieces received but not yet consumed.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Requests sent but not yet answered.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl PieceSupply for RemoteSupply {
    fn next_piece(&mut self) -> Result<Piece, SupplyError> {
        let Some(piece) = self.queue.pop_front() else {
            error!(
                "Piece queue is empty with {} requests outstanding",
                self.outstanding
            );
            return Err(SupplyError::Starved);
        };
        self.request();
        Ok(piece)
    }

    fn ready(&self, count: usize) -> bool {
        self.queue.len() >= count
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyError {
    /// The remote queue was empty when a piece was needed.
    Starved,
    UnknownPiece(usize),
}

impl fmt::Display for SupplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyError::Starved => f.write_str("no piece available from the server yet"),
            SupplyError::UnknownPiece(index) => write!(f, "no piece with index {index}"),
        }
    }
}

impl std::error::Error for SupplyError {}
