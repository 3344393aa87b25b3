//! # Stick Typer
//!
//! Type text with the two analog sticks of a gamepad.
//!
//! One stick picks a row of symbols, the other picks a slot within the row,
//! and every center-to-edge push of the row stick types one symbol.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stick_typer::config::Config;
use stick_typer::controller::device::GamepadDevice;
use stick_typer::controller::mapper::{EventMapper, StickSide};
use stick_typer::output::{ConsoleSink, SymbolSink, TranscriptSink};
use stick_typer::session;
use stick_typer::typing::engine::TypingEngine;
use stick_typer::typing::zones::ZoneTable;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "stick-typer", version, about = "Type text with the two analog sticks of a gamepad")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// evdev device node to use instead of auto-detection
    #[arg(short, long, value_name = "PATH")]
    device: Option<PathBuf>,
}

fn side_name(side: StickSide) -> &'static str {
    match side {
        StickSide::Left => "left",
        StickSide::Right => "right",
    }
}

fn other_side(side: StickSide) -> StickSide {
    match side {
        StickSide::Left => StickSide::Right,
        StickSide::Right => StickSide::Left,
    }
}

/// Main entry point for Stick Typer
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Parse arguments and load configuration
///    - Set up logging on stderr (stdout carries typed output)
///    - Open the gamepad; a missing gamepad is fatal
///
/// 2. **Calibration**
///    - Prompt the user to spin both sticks, then press any button
///
/// 3. **Typing Loop**
///    - Read one batch at a time, emit at most one symbol per batch
///    - Run until Ctrl+C
///
/// # Errors
///
/// Returns error if:
/// - The configuration file cannot be loaded
/// - No gamepad is connected
/// - The gamepad disconnects or output cannot be written
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Initialize logging
    let (log_writer, _log_guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_writer(log_writer)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    info!("Stick Typer v{} starting...", env!("CARGO_PKG_VERSION"));

    let mapper = EventMapper::new(config.controller.layout, config.controller.row_stick);
    let device_path = cli
        .device
        .clone()
        .or_else(|| config.device_path().map(PathBuf::from));

    let mut gamepad = match &device_path {
        Some(path) => GamepadDevice::open_path(path, mapper)?,
        None => GamepadDevice::open(mapper)?,
    };
    info!(
        "Using {} at: {}",
        gamepad.name().unwrap_or("gamepad"),
        gamepad.device_path()
    );

    println!("Spin the analog sticks in circles and then press any button when you are done");

    let calibration = tokio::select! {
        result = session::calibrate(&mut gamepad) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C during calibration, shutting down...");
            return Ok(());
        }
    };

    let row_side = config.controller.row_stick;
    println!("Setup complete!");
    println!(
        "Move the {} stick to pick a row and the {} stick to pick a slot to start typing",
        side_name(row_side),
        side_name(other_side(row_side))
    );

    let mut engine = TypingEngine::with_zones(
        ZoneTable::standard(),
        calibration,
        config.controller.edge_buffer,
    );

    let console = ConsoleSink::stdout(config.output.mode);
    let mut sink: Box<dyn SymbolSink> = match config.transcript_path() {
        Some(path) => Box::new(TranscriptSink::open(path, console)?),
        None => Box::new(console),
    };

    tokio::select! {
        result = session::run_typing_loop(&mut gamepad, &mut engine, &mut sink) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    Ok(())
}
