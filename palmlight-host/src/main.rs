//! Palmlight - hand gesture light controller
//!
//! Reads per-frame hand observations from a capture sidecar, debounces
//! them into gestures and drives a serial LED board.
//!
//! ```text
//!   sidecar ──records──▶ RecordReader ──▶ Controller ──▶ COMMANDS ──▶ serial-tx ──▶ LED board
//!   (stdin / --input)                     (frame flow)     (queue)     (thread)
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use palmlight_protocol::HostMessage;
use tracing::{info, warn};

mod channels;
mod config;
mod controller;
mod ingest;
mod logging;
mod serial;
mod tasks;

use crate::channels::COMMANDS;
use crate::config::HostConfig;
use crate::controller::Controller;
use crate::ingest::RecordReader;
use crate::serial::SerialLink;

/// Time allowed for queued commands to reach the board on exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Parser, Debug)]
#[command(name = "palmlight", version, about = "Hand gesture light controller")]
struct Args {
    /// TOML config file (defaults compiled in)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serial port of the LED board, overrides the config
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate, overrides the config
    #[arg(short, long)]
    baud: Option<u32>,

    /// Record stream file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Log filter, e.g. "debug" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_level.as_deref());

    info!("Palmlight v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = HostConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.serial.port = port;
    }
    if let Some(baud) = args.baud {
        config.serial.baudrate = baud;
    }
    config.validate().context("invalid command line overrides")?;

    let link = SerialLink::open(&config.serial);
    tasks::spawn_serial_tx(link, config.control.dispatch, &COMMANDS)
        .context("failed to start serial TX thread")?;

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };

    let mut controller = Controller::new(&config.control, &COMMANDS);
    run(&mut controller, RecordReader::new(input))?;

    controller.shutdown();
    if !tasks::wait_for_drain(&COMMANDS, &config.control.dispatch, SHUTDOWN_GRACE) {
        warn!(pending = COMMANDS.pending(), "exiting with commands still queued");
    }

    info!(
        fps = controller.stats().fps(),
        last_command = ?controller.voter().last_command(),
        "Palmlight stopped"
    );
    Ok(())
}

/// Frame flow: runs until quit or end of stream
fn run<R: Read>(controller: &mut Controller<'_>, mut records: RecordReader<R>) -> Result<()> {
    info!("waiting for records");

    while let Some(message) = records
        .next_message()
        .context("failed to read record stream")?
    {
        match message {
            HostMessage::Frame(frame) => {
                controller.handle_frame(&frame, Instant::now());
            }
            HostMessage::Input(event) => {
                if let ControlFlow::Break(()) = controller.handle_input(event) {
                    return Ok(());
                }
            }
        }
    }

    info!("record stream ended");
    Ok(())
}
