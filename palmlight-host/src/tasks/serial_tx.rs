//! Serial transmit task
//!
//! Drains the command queue to the LED link, one command per step, paced
//! by the dispatch config. Runs on its own thread for the life of the
//! process and is never joined.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use palmlight_core::config::DispatchConfig;
use palmlight_core::dispatch::DrainOutcome;
use palmlight_hal::LineTx;
use tracing::{debug, info, trace};

use crate::channels::Dispatcher;

/// Start the drain thread
pub fn spawn_serial_tx<T>(
    link: T,
    config: DispatchConfig,
    dispatcher: &'static Dispatcher,
) -> io::Result<JoinHandle<()>>
where
    T: LineTx + Send + 'static,
{
    thread::Builder::new()
        .name(String::from("serial-tx"))
        .spawn(move || serial_tx_task(link, config, dispatcher))
}

/// Drain loop
pub fn serial_tx_task<T: LineTx>(mut link: T, config: DispatchConfig, dispatcher: &Dispatcher) {
    info!(connected = link.is_connected(), "serial TX task started");

    loop {
        let pause = drain_step(&mut link, &config, dispatcher);
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}

/// Write at most one command and return how long to pause
pub fn drain_step<T: LineTx>(
    link: &mut T,
    config: &DispatchConfig,
    dispatcher: &Dispatcher,
) -> Duration {
    let outcome = dispatcher.drain_once(link);
    match outcome {
        DrainOutcome::Idle => {}
        DrainOutcome::Written(command) => debug!(%command, "sent"),
        DrainOutcome::Discarded(command) => trace!(%command, "link down, discarded"),
        DrainOutcome::WriteFailed(command) => debug!(%command, "serial write failed, dropped"),
    }
    Duration::from_millis(u64::from(outcome.pause_ms(config)))
}

/// Wait for the queue to empty, up to `grace`
///
/// Returns true if everything queued was handed to the link in time.
pub fn wait_for_drain(dispatcher: &Dispatcher, config: &DispatchConfig, grace: Duration) -> bool {
    let deadline = Instant::now() + grace;
    let poll = Duration::from_millis(u64::from(config.poll_interval_ms));

    while !dispatcher.is_empty() {
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(poll);
    }

    // The last command popped may still be on the wire
    thread::sleep(Duration::from_millis(u64::from(config.write_delay_ms)).min(grace));
    true
}
