#![warn(clippy::all, clippy::pedantic)]

//! Turn countdown scheduling.
//!
//! The engine owns the countdown state and stamps every arming with a fresh
//! generation number. A [`TurnTimer`] only has to deliver the expiry of the
//! generation it was last armed with; the engine drops any expiry whose
//! generation is no longer current, so a late delivery can never cost a life.

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use log::{debug, trace, warn};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub trait TurnTimer {
    /// Schedule an expiry for `generation` after `delay`, replacing any pending one.
    fn arm(&mut self, generation: u64, delay: Duration);

    /// Drop the pending expiry, if any.
    fn cancel(&mut self);
}

/// Expiry notice delivered by [`ThreadTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub generation: u64,
}

/// Timer driven by the caller, who decides when a turn has expired.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    pending: Option<(u64, Duration)>,
}

impl ManualTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation and delay of the pending expiry.
    #[must_use]
    pub fn pending(&self) -> Option<(u64, Duration)> {
        self.pending
    }
}

impl TurnTimer for ManualTimer {
    fn arm(&mut self, generation: u64, delay: Duration) {
        self.pending = Some((generation, delay));
    }

    fn cancel(&mut self) {
        self.pending = None;
    }
}

// Command to control the timer thread
enum TimerCommand {
    Arm { generation: u64, delay: Duration },
    Cancel,
    Quit,
}

/// Countdown running on a background thread.
///
/// Expiries are sent to the channel given at spawn time so the thread owning
/// the game can pick them up alongside its other inputs.
pub struct ThreadTimer {
    sender: Sender<TimerCommand>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    #[must_use]
    pub fn spawn(fired: Sender<TimerFired>) -> Self {
        let (sender, receiver) = bounded(16);
        let handle = thread::spawn(move || run_timer_thread(&receiver, &fired));

        Self {
            sender,
            handle: Some(handle),
        }
    }

    fn send(&self, command: TimerCommand) {
        if self.sender.send(command).is_err() {
            warn!("Timer thread has stopped");
        }
    }
}

impl TurnTimer for ThreadTimer {
    fn arm(&mut self, generation: u64, delay: Duration) {
        self.send(TimerCommand::Arm { generation, delay });
    }

    fn cancel(&mut self) {
        self.send(TimerCommand::Cancel);
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        let _ = self.sender.send(TimerCommand::Quit);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_timer_thread(commands: &Receiver<TimerCommand>, fired: &Sender<TimerFired>) {
    let mut pending: Option<(u64, Instant)> = None;

    loop {
        let command = match pending {
            Some((generation, deadline)) => match commands.recv_deadline(deadline) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => {
                    pending = None;
                    trace!("Turn {generation} expired");
                    if fired.send(TimerFired { generation }).is_err() {
                        break;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match commands.recv() {
                Ok(command) => command,
                Err(_) => break,
            },
        };

        match command {
            TimerCommand::Arm { generation, delay } => {
                pending = Some((generation, Instant::now() + delay));
            }
            TimerCommand::Cancel => pending = None,
            TimerCommand::Quit => break,
        }
    }

    debug!("Timer thread exiting");
}
