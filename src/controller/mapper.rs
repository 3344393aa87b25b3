//! # Controller Input Mapper Module
//!
//! This module translates raw evdev events into [`InputSample`]s: stick
//! samples tagged with their role and axis, or button samples.
//!
//! ## Axis Layouts
//!
//! | Layout | Left Stick X/Y | Right Stick X/Y | Raw Center |
//! |--------|----------------|-----------------|------------|
//! | `xbox` | ABS_X / ABS_Y | ABS_RX / ABS_RY | 0 |
//! | `dualsense` | ABS_X / ABS_Y | ABS_Z / ABS_RZ | 128 |
//!
//! Raw values are re-centered around 0 so angles can be taken directly.
//! By default the left stick selects the row and the right stick the index.
//!
//! ## Event Types
//!
//! - **EV_ABS**: the four stick axes above; every other axis is dropped
//! - **EV_KEY**: every key becomes a button sample
//! - **EV_SYN**: `SYN_REPORT` closes a batch and is not itself a sample
//!
//! ## Usage
//!
//! ```
//! use evdev::{AbsoluteAxisType, EventType, InputEvent};
//! use stick_typer::controller::mapper::{EventMapper, InputSample, StickLayout, StickSide};
//! use stick_typer::controller::stick::{Axis, StickRole};
//!
//! let mapper = EventMapper::new(StickLayout::Xbox, StickSide::Left);
//! let event = InputEvent::new(EventType::ABSOLUTE, AbsoluteAxisType::ABS_RY.0, -32768);
//!
//! assert_eq!(
//!     mapper.map_event(&event),
//!     Some(InputSample::stick(StickRole::Index, Axis::Y, -32768)),
//! );
//! ```

use evdev::{AbsoluteAxisType, InputEvent, InputEventKind, Synchronization};
use serde::Deserialize;

use super::stick::{Axis, StickRole};

/// Raw center of 8-bit DualSense stick axes.
pub const DUALSENSE_AXIS_CENTER: i32 = 128;

/// Which evdev axis codes carry the two sticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickLayout {
    /// XInput-style pads: signed 16-bit axes, right stick on RX/RY.
    #[default]
    Xbox,
    /// PS5 DualSense: unsigned 8-bit axes, right stick on Z/RZ.
    DualSense,
}

impl StickLayout {
    /// Axis codes as `[left x, left y, right x, right y]`.
    #[must_use]
    pub fn axis_codes(self) -> [AbsoluteAxisType; 4] {
        match self {
            StickLayout::Xbox => [
                AbsoluteAxisType::ABS_X,
                AbsoluteAxisType::ABS_Y,
                AbsoluteAxisType::ABS_RX,
                AbsoluteAxisType::ABS_RY,
            ],
            StickLayout::DualSense => [
                AbsoluteAxisType::ABS_X,
                AbsoluteAxisType::ABS_Y,
                AbsoluteAxisType::ABS_Z,
                AbsoluteAxisType::ABS_RZ,
            ],
        }
    }

    /// Raw value reported by a resting stick.
    #[must_use]
    pub fn center(self) -> i32 {
        match self {
            StickLayout::Xbox => 0,
            StickLayout::DualSense => DUALSENSE_AXIS_CENTER,
        }
    }
}

/// Physical side of a stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickSide {
    #[default]
    Left,
    Right,
}

/// A re-centered sample from one stick axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickSample {
    pub role: StickRole,
    pub axis: Axis,
    pub value: i32,
}

/// One entry of an input batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSample {
    /// Stick axis movement.
    Stick(StickSample),
    /// Any key or button; `value` is 0 on release.
    Button { code: u16, value: i32 },
}

impl InputSample {
    /// Shorthand for a stick sample.
    #[must_use]
    pub fn stick(role: StickRole, axis: Axis, value: i32) -> Self {
        InputSample::Stick(StickSample { role, axis, value })
    }

    /// Shorthand for a button sample.
    #[must_use]
    pub fn button(code: u16, value: i32) -> Self {
        InputSample::Button { code, value }
    }

    /// True for a button sample reporting a nonzero state.
    #[must_use]
    pub fn is_button_active(&self) -> bool {
        matches!(self, InputSample::Button { value, .. } if *value != 0)
    }
}

/// Maps evdev events to input samples for a fixed layout.
///
/// # Thread Safety
///
/// `EventMapper` holds no mutable state and can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct EventMapper {
    layout: StickLayout,
    row_side: StickSide,
}

impl Default for EventMapper {
    fn default() -> Self {
        Self::new(StickLayout::default(), StickSide::default())
    }
}

impl EventMapper {
    /// Creates a mapper for `layout` with the row role on `row_side`.
    #[must_use]
    pub fn new(layout: StickLayout, row_side: StickSide) -> Self {
        Self { layout, row_side }
    }

    /// The configured layout.
    #[must_use]
    pub fn layout(&self) -> StickLayout {
        self.layout
    }

    /// Role played by the stick on `side`.
    #[must_use]
    pub fn role_of(&self, side: StickSide) -> StickRole {
        if side == self.row_side {
            StickRole::Row
        } else {
            StickRole::Index
        }
    }

    /// Maps one event, or returns `None` for events that carry no sample.
    pub fn map_event(&self, event: &InputEvent) -> Option<InputSample> {
        match event.kind() {
            InputEventKind::AbsAxis(axis) => self.map_axis(axis, event.value()),
            InputEventKind::Key(key) => Some(InputSample::button(key.code(), event.value())),
            _ => None,
        }
    }

    /// Checks whether `event` terminates a batch.
    #[must_use]
    pub fn is_batch_end(event: &InputEvent) -> bool {
        matches!(
            event.kind(),
            InputEventKind::Synchronization(Synchronization::SYN_REPORT)
        )
    }

    fn map_axis(&self, code: AbsoluteAxisType, raw: i32) -> Option<InputSample> {
        let [left_x, left_y, right_x, right_y] = self.layout.axis_codes();

        let (side, axis) = if code == left_x {
            (StickSide::Left, Axis::X)
        } else if code == left_y {
            (StickSide::Left, Axis::Y)
        } else if code == right_x {
            (StickSide::Right, Axis::X)
        } else if code == right_y {
            (StickSide::Right, Axis::Y)
        } else {
            // Triggers, d-pad, motion sensors
            return None;
        };

        Some(InputSample::stick(
            self.role_of(side),
            axis,
            raw - self.layout.center(),
        ))
    }
}
