//! Bounded FIFO between the frame flow and the serial drain

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use palmlight_hal::LineTx;
use palmlight_protocol::{Command, MAX_LINE_LEN};

use crate::config::DispatchConfig;

/// Result of one drain step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrainOutcome {
    /// Queue was empty
    Idle,
    /// Command written to the link
    Written(Command),
    /// Link not connected, command dropped
    Discarded(Command),
    /// Link write failed, command dropped without retry
    WriteFailed(Command),
}

impl DrainOutcome {
    /// How long the drain flow should pause after this step
    pub fn pause_ms(&self, config: &DispatchConfig) -> u32 {
        match self {
            DrainOutcome::Written(_) => config.write_delay_ms,
            DrainOutcome::Idle | DrainOutcome::WriteFailed(_) => config.poll_interval_ms,
            DrainOutcome::Discarded(_) => 0,
        }
    }
}

/// Command queue shared by the frame flow and the drain flow
///
/// Order is strictly FIFO. There is no dedup here; the voter already
/// suppresses repeats.
pub struct CommandDispatcher<M: RawMutex, const N: usize> {
    queue: Channel<M, Command, N>,
}

impl<M: RawMutex, const N: usize> Default for CommandDispatcher<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> CommandDispatcher<M, N> {
    pub const fn new() -> Self {
        Self {
            queue: Channel::new(),
        }
    }

    /// Queue a command without blocking
    ///
    /// When the queue is full the oldest pending command is evicted and
    /// returned so the newest decision is never the one lost.
    pub fn enqueue(&self, command: Command) -> Option<Command> {
        match self.queue.try_send(command) {
            Ok(()) => None,
            Err(TrySendError::Full(command)) => {
                let evicted = self.queue.try_receive().ok();
                let _ = self.queue.try_send(command);
                evicted
            }
        }
    }

    /// Pop one command and write it to `link`
    pub fn drain_once<T: LineTx>(&self, link: &mut T) -> DrainOutcome {
        let Ok(command) = self.queue.try_receive() else {
            return DrainOutcome::Idle;
        };

        if !link.is_connected() {
            return DrainOutcome::Discarded(command);
        }

        let mut line = [0u8; MAX_LINE_LEN];
        let Ok(len) = command.encode(&mut line) else {
            return DrainOutcome::WriteFailed(command);
        };

        match link.write_line(&line[..len]) {
            Ok(()) => DrainOutcome::Written(command),
            Err(_) => DrainOutcome::WriteFailed(command),
        }
    }

    /// Commands waiting to be written
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending command
    pub fn clear(&self) {
        self.queue.clear();
    }
}
