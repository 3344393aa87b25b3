//! # Session Module
//!
//! Drives a [`SampleSource`] through the two phases of a run:
//!
//! 1. **Calibration**: batches feed a [`Calibrator`] until a button press.
//! 2. **Typing**: each batch goes through the [`TypingEngine`]; an emitted
//!    symbol goes to the sink before the next batch is read.
//!
//! The only await point is the wait for the next batch, so a batch is always
//! processed to completion.

use tracing::{debug, info};

use crate::controller::calibration::{CalibrationStatus, Calibrator, StickCalibration};
use crate::controller::source::SampleSource;
use crate::error::Result;
use crate::output::SymbolSink;
use crate::typing::engine::TypingEngine;

/// Runs the calibration phase to completion.
///
/// # Errors
///
/// Propagates source errors (e.g. the controller disconnecting).
pub async fn calibrate<S>(source: &mut S) -> Result<StickCalibration>
where
    S: SampleSource + ?Sized,
{
    let mut calibrator = Calibrator::new();

    loop {
        let batch = source.next_batch().await?;
        if calibrator.observe_batch(&batch) == CalibrationStatus::Complete {
            break;
        }
    }

    let calibration = calibrator.finish();
    info!(
        "Calibration complete (row stick max: {}, index stick max: {})",
        calibration.row_max, calibration.index_max
    );
    Ok(calibration)
}

/// Feeds batches to `engine` forever, emitting symbols to `sink`.
///
/// Only returns on a source or sink error.
pub async fn run_typing_loop<S, K>(
    source: &mut S,
    engine: &mut TypingEngine,
    sink: &mut K,
) -> Result<()>
where
    S: SampleSource + ?Sized,
    K: SymbolSink + ?Sized,
{
    let mut symbols_emitted: u64 = 0;

    loop {
        let batch = source.next_batch().await?;
        if let Some(symbol) = engine.process_batch(&batch) {
            sink.emit(symbol)?;
            symbols_emitted += 1;
            debug!("Emitted {} symbols", symbols_emitted);
        }
    }
}
