//! # Calibration Module
//!
//! Establishes the maximum deflection of each stick before typing starts.
//!
//! ## Procedure
//!
//! The user spins both sticks through their full range and then presses any
//! button. While the phase runs, every stick sample updates the running
//! maximum absolute value for its stick (both axes share one maximum). The
//! first button sample with a nonzero value ends the phase.
//!
//! Samples of exactly `1` or `-1` are skipped: some pads report a stray
//! unit value from idle sticks.
//!
//! ## Usage
//!
//! ```
//! use stick_typer::controller::calibration::{CalibrationStatus, Calibrator};
//! use stick_typer::controller::mapper::InputSample;
//! use stick_typer::controller::stick::{Axis, StickRole};
//!
//! let mut calibrator = Calibrator::new();
//! let batch = [
//!     InputSample::stick(StickRole::Row, Axis::X, 30000),
//!     InputSample::stick(StickRole::Index, Axis::Y, -31000),
//!     InputSample::button(304, 1),
//! ];
//!
//! assert_eq!(calibrator.observe_batch(&batch), CalibrationStatus::Complete);
//! let result = calibrator.finish();
//! assert_eq!(result.row_max, 30000);
//! assert_eq!(result.index_max, 31000);
//! ```

use tracing::{debug, warn};

use super::mapper::{InputSample, StickSample};
use super::stick::StickRole;

/// Whether calibration needs more input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStatus {
    InProgress,
    Complete,
}

/// Calibrated maxima for both sticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickCalibration {
    pub row_max: i32,
    pub index_max: i32,
}

impl StickCalibration {
    /// Maximum for the stick with `role`.
    #[must_use]
    pub fn max_for(&self, role: StickRole) -> i32 {
        match role {
            StickRole::Row => self.row_max,
            StickRole::Index => self.index_max,
        }
    }
}

/// Tracks per-stick maxima until a button is pressed.
#[derive(Debug, Default)]
pub struct Calibrator {
    result: StickCalibration,
    complete: bool,
}

impl Calibrator {
    /// Creates a calibrator with both maxima at 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a button press has ended the phase.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Maxima observed so far.
    #[must_use]
    pub fn current(&self) -> StickCalibration {
        self.result
    }

    /// Feeds one stick sample into the running maximum.
    ///
    /// Unit values (`1` / `-1`) are ignored.
    pub fn observe_stick(&mut self, sample: &StickSample) {
        if sample.value == 1 || sample.value == -1 {
            return;
        }

        let magnitude = sample.value.saturating_abs();
        let max = match sample.role {
            StickRole::Row => &mut self.result.row_max,
            StickRole::Index => &mut self.result.index_max,
        };

        if magnitude > *max {
            debug!("New {:?} stick maximum: {}", sample.role, magnitude);
            *max = magnitude;
        }
    }

    /// Processes a batch in order, stopping at the first active button.
    ///
    /// Samples following the terminating button are not observed. Once
    /// complete, further batches are ignored.
    pub fn observe_batch(&mut self, batch: &[InputSample]) -> CalibrationStatus {
        if self.complete {
            return CalibrationStatus::Complete;
        }

        for sample in batch {
            if sample.is_button_active() {
                self.complete = true;
                return CalibrationStatus::Complete;
            }
            if let InputSample::Stick(stick) = sample {
                self.observe_stick(stick);
            }
        }

        CalibrationStatus::InProgress
    }

    /// Consumes the calibrator and returns the maxima.
    ///
    /// Logs a warning for any stick that never moved; such a stick accepts
    /// every nonzero sample.
    #[must_use]
    pub fn finish(self) -> StickCalibration {
        for role in [StickRole::Row, StickRole::Index] {
            if self.result.max_for(role) == 0 {
                warn!("{:?} stick was not moved during calibration", role);
            }
        }
        self.result
    }
}
