//! Queue shared between the frame flow and the serial drain thread

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use palmlight_core::dispatch::CommandDispatcher;

/// Pending commands before the oldest is evicted
///
/// The voter emits at most one command per frame and repeats are
/// suppressed, so a held gesture adds nothing. At 100 ms per write the
/// queue empties in about 3 s even when full.
pub const COMMAND_QUEUE_SIZE: usize = 32;

pub type Dispatcher = CommandDispatcher<CriticalSectionRawMutex, COMMAND_QUEUE_SIZE>;

/// Outbound LED commands, filled by the controller and drained by the serial task
pub static COMMANDS: Dispatcher = Dispatcher::new();
