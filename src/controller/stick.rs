//! # Stick State Module
//!
//! Per-stick calibrated range, last accepted position and the
//! deadzone-at-edge acceptance filter.
//!
//! ## Deadzone at the Edge
//!
//! A conventional deadzone ignores small movements near center. Here the
//! opposite applies: a sample only counts once the stick is pushed to within
//! a small buffer of its calibrated maximum. Anything short of that is
//! treated as centered.
//!
//! ```text
//! min_allowed = max_magnitude * buffer
//! accepted    = |value| > max_magnitude - min_allowed
//!            || |other axis| > max_magnitude - min_allowed
//! ```
//!
//! ## Usage
//!
//! ```
//! use stick_typer::controller::stick::{Axis, StickState};
//!
//! let mut stick = StickState::new(100);
//! assert!(stick.apply_sample(Axis::X, 96, 0.05));   // 96 > 95
//! assert_eq!(stick.position().x, 96);
//!
//! let mut other = StickState::new(100);
//! assert!(!other.apply_sample(Axis::Y, 50, 0.05)); // partial push
//! assert_eq!(other.position().y, 0);
//! ```

/// Default buffer fraction for the edge filter.
pub const DEFAULT_EDGE_BUFFER: f64 = 0.05;

/// The two roles a stick can play. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickRole {
    /// Supplies the symbol row.
    Row,
    /// Supplies the slot index within the row.
    Index,
}

/// Axis of a stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis of the same stick.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Last accepted raw position of a stick. Rejected axes are stored as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Value stored for `axis`.
    #[must_use]
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    fn set(&mut self, axis: Axis, value: i32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

/// Mutable state of one stick.
///
/// `has_reset` is maintained by the caller for the row stick only; for the
/// index stick it keeps its initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct StickState {
    max_magnitude: i32,
    position: Position,
    has_reset: bool,
}

impl Default for StickState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl StickState {
    /// Creates a centered stick with the calibrated maximum magnitude.
    #[must_use]
    pub fn new(max_magnitude: i32) -> Self {
        Self {
            max_magnitude: max_magnitude.abs(),
            position: Position::default(),
            has_reset: true,
        }
    }

    /// Calibrated maximum, shared by both axes.
    #[must_use]
    pub fn max_magnitude(&self) -> i32 {
        self.max_magnitude
    }

    /// Last accepted position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whether the stick was most recently centered.
    #[must_use]
    pub fn has_reset(&self) -> bool {
        self.has_reset
    }

    pub fn set_has_reset(&mut self, has_reset: bool) {
        self.has_reset = has_reset;
    }

    /// Checks `value` on `axis` against the edge filter without storing it.
    ///
    /// The sample passes if it, or the value currently stored for the other
    /// axis, is within `buffer * max_magnitude` of the maximum.
    #[must_use]
    pub fn accepts(&self, axis: Axis, value: i32, buffer: f64) -> bool {
        let max = f64::from(self.max_magnitude);
        let threshold = max - max * buffer;
        let other = self.position.get(axis.other());

        f64::from(value).abs() > threshold || f64::from(other).abs() > threshold
    }

    /// Applies a raw sample through the edge filter.
    ///
    /// Stores `value` when accepted, otherwise stores 0 for that axis.
    /// Returns whether the sample was accepted.
    pub fn apply_sample(&mut self, axis: Axis, value: i32, buffer: f64) -> bool {
        let accepted = self.accepts(axis, value, buffer);
        self.position.set(axis, if accepted { value } else { 0 });
        accepted
    }
}
