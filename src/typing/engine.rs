//! # Selection State Machine
//!
//! Combines the row stick and index stick into symbols and gates output.
//!
//! ## Cycle
//!
//! ```text
//! Idle --index push--> IndexPending --row push--> Resolved --batch end--> Emitted
//!   ^                                                                       |
//!   +----------------------------- row stick centers ----------------------+
//! ```
//!
//! There is no single state variable: the state is the product of the active
//! row, the active index and the row stick's `has_reset` flag.
//!
//! - An accepted, nonzero index sample sets the active index (a miss clears it).
//! - An accepted, nonzero row sample sets the active row and clears `has_reset`.
//! - With both set, the row slot at the index id becomes the current symbol
//!   and the row is consumed. The index stays.
//! - A rejected row sample marks the stick as reset and puts the index back
//!   to the fallback sector.
//!
//! A symbol is emitted at the end of a batch only if the row stick was reset
//! when the batch started, so each center-then-push of the row stick emits
//! at most once.

use tracing::{debug, trace};

use super::angle;
use super::symbol::Symbol;
use super::zones::{IndexZone, RowZone, ZoneTable};
use crate::controller::calibration::StickCalibration;
use crate::controller::mapper::{InputSample, StickSample};
use crate::controller::stick::{StickRole, StickState, DEFAULT_EDGE_BUFFER};

/// Active selections and the pending symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub active_row: Option<&'static RowZone>,
    pub active_index: Option<&'static IndexZone>,
    pub current_char: Option<Symbol>,
}

impl SelectionState {
    /// Combines the active row and index if both are set.
    ///
    /// Returns whether a combination happened. The resulting symbol may
    /// still be `None` for an empty slot.
    fn combine(&mut self) -> bool {
        let (Some(row), Some(index)) = (self.active_row, self.active_index) else {
            return false;
        };

        self.current_char = row.payload.get(index.slot()).copied().flatten();
        self.active_row = None;
        true
    }
}

/// Owns the zone table, both sticks and the selection state.
///
/// Created once after calibration and fed one batch at a time.
///
/// # Examples
///
/// ```
/// use stick_typer::controller::calibration::StickCalibration;
/// use stick_typer::controller::mapper::InputSample;
/// use stick_typer::controller::stick::{Axis, StickRole};
/// use stick_typer::typing::engine::TypingEngine;
/// use stick_typer::typing::symbol::Symbol;
///
/// let mut engine = TypingEngine::new(StickCalibration { row_max: 100, index_max: 100 });
///
/// // Index stick straight down: green (slot 2)
/// engine.process_batch(&[InputSample::stick(StickRole::Index, Axis::Y, -100)]);
///
/// // Row stick straight left: a b c d e ...
/// let emitted = engine.process_batch(&[InputSample::stick(StickRole::Row, Axis::X, -100)]);
/// assert_eq!(emitted, Some(Symbol::Char('c')));
/// ```
#[derive(Debug, Clone)]
pub struct TypingEngine {
    zones: ZoneTable,
    row_stick: StickState,
    index_stick: StickState,
    selection: SelectionState,
    edge_buffer: f64,
}

impl TypingEngine {
    /// Creates an engine with the reference zone table and default buffer.
    #[must_use]
    pub fn new(calibration: StickCalibration) -> Self {
        Self::with_zones(ZoneTable::standard(), calibration, DEFAULT_EDGE_BUFFER)
    }

    /// Creates an engine with an explicit zone table and edge buffer.
    #[must_use]
    pub fn with_zones(zones: ZoneTable, calibration: StickCalibration, edge_buffer: f64) -> Self {
        Self {
            zones,
            row_stick: StickState::new(calibration.row_max),
            index_stick: StickState::new(calibration.index_max),
            selection: SelectionState::default(),
            edge_buffer,
        }
    }

    pub fn row_stick(&self) -> &StickState {
        &self.row_stick
    }

    pub fn index_stick(&self) -> &StickState {
        &self.index_stick
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Processes one batch and returns the symbol to emit, if any.
    ///
    /// The row stick's reset flag is captured before the first sample. A
    /// symbol computed during a batch that started without a reset is
    /// dropped at the end of the batch.
    pub fn process_batch(&mut self, batch: &[InputSample]) -> Option<Symbol> {
        let was_reset = self.row_stick.has_reset();

        for sample in batch {
            if let InputSample::Stick(stick) = sample {
                self.process_stick_sample(stick);
            }
        }

        let pending = self.selection.current_char.take();
        match pending {
            Some(symbol) if was_reset => {
                debug!("Emitting {}", symbol);
                Some(symbol)
            }
            Some(symbol) => {
                trace!("Suppressed {} (row stick not re-centered)", symbol);
                None
            }
            None => None,
        }
    }

    /// Applies one stick sample and runs the resulting transitions.
    pub fn process_stick_sample(&mut self, sample: &StickSample) {
        let accepted = match sample.role {
            StickRole::Row => self.row_stick.apply_sample(sample.axis, sample.value, self.edge_buffer),
            StickRole::Index => self.index_stick.apply_sample(sample.axis, sample.value, self.edge_buffer),
        };

        if !accepted {
            if sample.role == StickRole::Row {
                self.on_row_centered();
            }
            return;
        }

        if sample.value == 0 {
            return;
        }

        match sample.role {
            StickRole::Row => self.on_row_moved(),
            StickRole::Index => self.on_index_moved(),
        }

        if self.selection.combine() {
            trace!("Combined selection -> {:?}", self.selection.current_char);
        }
    }

    fn on_row_centered(&mut self) {
        self.row_stick.set_has_reset(true);
        self.selection.active_index = self.zones.fallback_index();
    }

    fn on_row_moved(&mut self) {
        let position = self.row_stick.position();
        let degrees = angle::position_degrees(position.x, position.y);
        self.selection.active_row = self.zones.row_at(degrees);
        self.row_stick.set_has_reset(false);
        trace!("Row stick at {}° -> {:?}", degrees, self.selection.active_row.map(|z| z.id));
    }

    fn on_index_moved(&mut self) {
        let position = self.index_stick.position();
        let degrees = angle::position_degrees(position.x, position.y);
        self.selection.active_index = self.zones.index_at(degrees);
        trace!("Index stick at {}° -> {:?}", degrees, self.selection.active_index.map(|z| z.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::stick::Axis;

    const MAX: i32 = 100;

    fn engine() -> TypingEngine {
        TypingEngine::new(StickCalibration { row_max: MAX, index_max: MAX })
    }

    fn row(axis: Axis, value: i32) -> InputSample {
        InputSample::stick(StickRole::Row, axis, value)
    }

    fn index(axis: Axis, value: i32) -> InputSample {
        InputSample::stick(StickRole::Index, axis, value)
    }

    /// Pushes the row stick to the given direction and releases the other axis.
    fn row_push(x: i32, y: i32) -> Vec<InputSample> {
        vec![row(Axis::X, x), row(Axis::Y, y)]
    }

    fn row_center() -> Vec<InputSample> {
        vec![row(Axis::X, 0), row(Axis::Y, 0)]
    }

    // ==================== Edge Filter Tests ====================

    #[test]
    fn test_partial_row_push_sets_reset() {
        let mut engine = engine();
        engine.process_batch(&[row(Axis::X, -100)]);
        assert!(!engine.row_stick().has_reset());

        engine.process_batch(&[row(Axis::X, 50)]);
        assert!(engine.row_stick().has_reset());
        assert_eq!(engine.row_stick().position().x, 0);
    }

    #[test]
    fn test_partial_index_push_leaves_row_flag_alone() {
        let mut engine = engine();
        engine.process_batch(&[row(Axis::X, -100)]);
        engine.process_batch(&[index(Axis::X, 50)]);

        assert!(!engine.row_stick().has_reset());
        assert_eq!(engine.index_stick().position().x, 0);
    }

    #[test]
    fn test_near_max_sample_accepted() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::X, 96)]);
        assert_eq!(engine.index_stick().position().x, 96);
    }

    // ==================== Full Cycle Tests ====================

    #[test]
    fn test_full_cycle_emits_once() {
        let mut engine = engine();
        assert!(engine.row_stick().has_reset());

        // Index stick down -> 270° -> green (2)
        assert_eq!(engine.process_batch(&[index(Axis::Y, -100)]), None);
        assert_eq!(engine.selection().active_index.map(|z| z.id), Some(2));

        // Row stick left -> 180° -> row 0
        assert_eq!(engine.process_batch(&row_push(-100, 0)), Some(Symbol::Char('c')));
        assert!(engine.selection().current_char.is_none());
        assert!(engine.selection().active_row.is_none());

        // Same push again without centering
        assert_eq!(engine.process_batch(&row_push(-100, 0)), None);
    }

    #[test]
    fn test_cycle_after_explicit_centering() {
        let mut engine = engine();
        engine.process_batch(&row_center());
        assert!(engine.row_stick().has_reset());

        engine.process_batch(&[index(Axis::Y, -100)]);
        assert_eq!(engine.process_batch(&row_push(-100, 0)), Some(Symbol::Char('c')));

        // Center, then push again: index stick still reads green
        engine.process_batch(&row_center());
        engine.process_batch(&[index(Axis::Y, -100)]);
        assert_eq!(engine.process_batch(&row_push(-100, 0)), Some(Symbol::Char('c')));
    }

    #[test]
    fn test_row_centering_falls_back_to_index_six() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::Y, -100)]);
        engine.process_batch(&row_center());

        let active = engine.selection().active_index.unwrap();
        assert_eq!(active.id, 6);

        // Row 0 slot 6
        assert_eq!(engine.process_batch(&row_push(-100, 0)), Some(Symbol::LeftClick));
    }

    #[test]
    fn test_gradual_row_push_passes_through_fallback() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::Y, -100)]);
        assert_eq!(engine.selection().active_index.map(|z| z.id), Some(2));

        // Index stick held at green; the row stick ramps out over several reports.
        assert_eq!(engine.process_batch(&[row(Axis::X, -40)]), None);
        assert!(engine.row_stick().has_reset());
        assert_eq!(engine.selection().active_index.map(|z| z.id), Some(6));

        assert_eq!(engine.process_batch(&[row(Axis::X, -80)]), None);
        assert_eq!(engine.selection().active_index.map(|z| z.id), Some(6));

        // Row 0 slot 6, not green's 'c'
        assert_eq!(engine.process_batch(&[row(Axis::X, -100)]), Some(Symbol::LeftClick));
        assert!(!engine.row_stick().has_reset());
    }

    #[test]
    fn test_row_centering_leaves_active_row() {
        let mut engine = engine();
        engine.process_batch(&row_push(-100, 0));
        assert_eq!(engine.selection().active_row.map(|z| z.id), Some(0));

        engine.process_batch(&[row(Axis::X, 10)]);
        assert_eq!(engine.selection().active_row.map(|z| z.id), Some(0));
    }

    #[test]
    fn test_index_alone_does_not_emit() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::Y, -100)]);
        engine.process_batch(&row_push(-100, 0));
        engine.process_batch(&row_center());

        // Row was consumed; only the index stick moves.
        assert_eq!(engine.process_batch(&[index(Axis::X, 100)]), None);
        assert_eq!(engine.process_batch(&[index(Axis::Y, 100)]), None);
    }

    #[test]
    fn test_row_without_index_keeps_row_pending() {
        let mut engine = engine();
        assert_eq!(engine.process_batch(&row_push(100, 0)), None);
        assert_eq!(engine.selection().active_row.map(|z| z.id), Some(4));

        // Index arrives later, but the batch did not start with a reset.
        assert_eq!(engine.process_batch(&[index(Axis::X, 100)]), None);
        assert!(engine.selection().active_row.is_none());
        assert!(engine.selection().current_char.is_none());
    }

    #[test]
    fn test_index_and_row_in_one_batch() {
        let mut engine = engine();
        let batch = vec![index(Axis::X, -100), row(Axis::Y, 100)];

        // orange (0) from 180°, row 6 (90°) -> '0'
        assert_eq!(engine.process_batch(&batch), Some(Symbol::Char('0')));
    }

    #[test]
    fn test_multiple_pushes_in_one_batch_fold_to_one() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::X, 100)]); // purple (4)

        // Row passes through 270° (row 2) then 225° (row 1) within one batch;
        // the last combination wins.
        let batch = vec![row(Axis::Y, -100), row(Axis::X, -100)];
        assert_eq!(engine.process_batch(&batch), Some(Symbol::Char('j')));
    }

    // ==================== Miss and Empty Slot Tests ====================

    #[test]
    fn test_empty_slot_emits_nothing() {
        let mut engine = engine();
        engine.process_batch(&row_center()); // fallback index 6

        // Passes 180° (row 0) on the way, ends at 225° -> row 1, slot 6 empty
        assert_eq!(engine.process_batch(&row_push(-100, -100)), None);
        assert!(engine.selection().current_char.is_none());
        assert!(engine.selection().active_row.is_none());
    }

    #[test]
    fn test_unassigned_index_sector_clears_index() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::Y, -100)]);
        assert!(engine.selection().active_index.is_some());

        // 45° is in the unassigned sector 5
        engine.process_batch(&[index(Axis::X, 100), index(Axis::Y, 100)]);
        assert!(engine.selection().active_index.is_none());

        assert_eq!(engine.process_batch(&row_push(-100, 0)), None);
        assert_eq!(engine.selection().active_row.map(|z| z.id), Some(0));
    }

    // ==================== Batch Semantics Tests ====================

    #[test]
    fn test_replayed_batch_emits_at_most_once() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::Y, -100)]);

        let batch = row_push(-100, 0);
        let first = engine.process_batch(&batch);
        let after_first = (
            engine.row_stick().clone(),
            engine.selection().clone(),
        );

        let second = engine.process_batch(&batch);
        let after_second = (
            engine.row_stick().clone(),
            engine.selection().clone(),
        );

        assert_eq!(first, Some(Symbol::Char('c')));
        assert_eq!(second, None);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn test_button_samples_ignored() {
        let mut engine = engine();
        let before = engine.selection().clone();
        assert_eq!(engine.process_batch(&[InputSample::button(304, 1)]), None);
        assert_eq!(engine.selection(), &before);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut engine = engine();
        assert_eq!(engine.process_batch(&[]), None);
        assert!(engine.row_stick().has_reset());
    }

    #[test]
    fn test_accepted_zero_value_skips_transitions() {
        let mut engine = engine();
        engine.process_batch(&[index(Axis::X, 100)]);
        let before = engine.selection().clone();

        // Accepted through the other axis, but value is 0.
        engine.process_batch(&[index(Axis::Y, 0)]);
        assert_eq!(engine.index_stick().position().y, 0);
        assert_eq!(engine.selection(), &before);
    }
}
