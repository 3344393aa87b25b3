//! # Gamepad Device Module
//!
//! This module handles gamepad detection, connection, and batched input
//! reading using the Linux evdev interface.
//!
//! ## Controller Detection
//!
//! Any `/dev/input/event*` device that reports all four stick axes of the
//! configured [`StickLayout`] and the south face button qualifies. Devices are checked in path order so
//! the choice is deterministic when several pads are connected. A specific
//! device can be forced by path.
//!
//! ## Batches
//!
//! The kernel groups related events and closes each group with
//! `SYN_REPORT`. One batch is every mapped sample up to that marker.

use async_trait::async_trait;
use evdev::{AbsoluteAxisType, AttributeSetRef, Device, EventStream, Key};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::mapper::{EventMapper, InputSample, StickLayout};
use super::source::SampleSource;
use crate::error::{Result, StickTyperError};

/// Directory scanned for input devices.
const INPUT_DIR: &str = "/dev/input";

/// Gamepad handle
///
/// Represents an open evdev gamepad. Yields [`InputSample`] batches through
/// [`SampleSource`].
pub struct GamepadDevice {
    events: EventStream,
    device_path: String,
    name: Option<String>,
    mapper: EventMapper,
}

impl std::fmt::Debug for GamepadDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadDevice")
            .field("device_path", &self.device_path)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Button every supported pad reports (A / Cross).
const REQUIRED_BUTTON: Key = Key::BTN_SOUTH;

/// Checks whether `device` is a gamepad carrying both sticks of `layout`.
fn supports_layout(device: &Device, layout: StickLayout) -> bool {
    has_layout_capabilities(device.supported_absolute_axes(), device.supported_keys(), layout)
}

/// Capability test behind [`supports_layout`].
///
/// Motion sensor nodes of some pads report the same absolute axes as the
/// sticks but no keys; calibration ends on a button press, so a node without
/// [`REQUIRED_BUTTON`] is never picked.
fn has_layout_capabilities(
    axes: Option<&AttributeSetRef<AbsoluteAxisType>>,
    keys: Option<&AttributeSetRef<Key>>,
    layout: StickLayout,
) -> bool {
    let has_axes = axes.map_or(false, |axes| {
        layout.axis_codes().iter().all(|&code| axes.contains(code))
    });
    let has_button = keys.map_or(false, |keys| keys.contains(REQUIRED_BUTTON));

    has_axes && has_button
}

/// Finds the first connected device carrying both sticks of `layout`.
fn scan(layout: StickLayout) -> Result<Option<(PathBuf, Device)>> {
    let input_dir = Path::new(INPUT_DIR);

    if !input_dir.exists() {
        debug!("{} does not exist", INPUT_DIR);
        return Ok(None);
    }

    let mut entries: Vec<_> = std::fs::read_dir(input_dir)
        .map_err(|e| StickTyperError::Controller(format!("Failed to read {}: {}", INPUT_DIR, e)))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| StickTyperError::Controller(format!("Failed to read directory entry: {}", e)))?;

    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        let is_event_node = path
            .file_name()
            .map(|name| name.to_string_lossy().starts_with("event"))
            .unwrap_or(false);
        if !is_event_node {
            continue;
        }

        match Device::open(&path) {
            Ok(device) => {
                debug!(
                    "Found input device: {} ({})",
                    path.display(),
                    device.name().unwrap_or("unnamed")
                );
                if supports_layout(&device, layout) {
                    return Ok(Some((path, device)));
                }
            }
            Err(e) => {
                // Permission denied or other errors - skip device
                debug!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    Ok(None)
}

impl GamepadDevice {
    /// Detect and open the first gamepad matching the mapper's layout
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no qualifying device is connected
    /// - `Controller`: the device could not be switched to async reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use stick_typer::controller::device::GamepadDevice;
    /// use stick_typer::controller::mapper::EventMapper;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let gamepad = GamepadDevice::open(EventMapper::default())?;
    /// println!("Connected to gamepad at: {}", gamepad.device_path());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(mapper: EventMapper) -> Result<Self> {
        let (path, device) = scan(mapper.layout())?.ok_or(StickTyperError::ControllerNotFound)?;
        Self::from_device(path, device, mapper)
    }

    /// Open a specific device node
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: the node cannot be opened or lacks the sticks
    ///   of the mapper's layout
    /// - `Controller`: the device could not be switched to async reading
    pub fn open_path<P: AsRef<Path>>(path: P, mapper: EventMapper) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path).map_err(|e| {
            debug!("Could not open {}: {}", path.display(), e);
            StickTyperError::ControllerNotFound
        })?;

        if !supports_layout(&device, mapper.layout()) {
            debug!(
                "{} does not report the {:?} stick axes and gamepad buttons",
                path.display(),
                mapper.layout()
            );
            return Err(StickTyperError::ControllerNotFound);
        }

        Self::from_device(path.to_path_buf(), device, mapper)
    }

    fn from_device(path: PathBuf, device: Device, mapper: EventMapper) -> Result<Self> {
        let device_path = path.to_string_lossy().to_string();
        let name = device.name().map(str::to_string);
        info!(
            "Found gamepad at: {} ({})",
            device_path,
            name.as_deref().unwrap_or("unnamed")
        );

        let events = device.into_event_stream().map_err(|e| {
            StickTyperError::Controller(format!("Failed to open event stream: {}", e))
        })?;

        Ok(Self {
            events,
            device_path,
            name,
            mapper,
        })
    }

    /// Get the device path of this gamepad
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name reported by the kernel
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[async_trait]
impl SampleSource for GamepadDevice {
    async fn next_batch(&mut self) -> Result<Vec<InputSample>> {
        let mut batch = Vec::new();

        loop {
            let event = self
                .events
                .next_event()
                .await
                .map_err(|e| StickTyperError::Controller(format!("Failed to fetch events: {}", e)))?;

            if EventMapper::is_batch_end(&event) {
                if !batch.is_empty() {
                    return Ok(batch);
                }
                continue;
            }

            if let Some(sample) = self.mapper.map_event(&event) {
                batch.push(sample);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evdev::AttributeSet;

    fn axes(codes: &[AbsoluteAxisType]) -> AttributeSet<AbsoluteAxisType> {
        codes.iter().copied().collect()
    }

    fn keys(codes: &[Key]) -> AttributeSet<Key> {
        codes.iter().copied().collect()
    }

    /// Axes reported by a DualSense motion sensor node.
    fn motion_sensor_axes() -> AttributeSet<AbsoluteAxisType> {
        axes(&[
            AbsoluteAxisType::ABS_X,
            AbsoluteAxisType::ABS_Y,
            AbsoluteAxisType::ABS_Z,
            AbsoluteAxisType::ABS_RX,
            AbsoluteAxisType::ABS_RY,
            AbsoluteAxisType::ABS_RZ,
        ])
    }

    // ==================== Detection Tests ====================

    #[test]
    fn test_gamepad_with_sticks_and_buttons_qualifies() {
        let pad_axes = axes(&StickLayout::Xbox.axis_codes());
        let pad_keys = keys(&[Key::BTN_SOUTH, Key::BTN_EAST]);

        assert!(has_layout_capabilities(Some(&*pad_axes), Some(&*pad_keys), StickLayout::Xbox));
        assert!(!has_layout_capabilities(Some(&*pad_axes), Some(&*pad_keys), StickLayout::DualSense));
    }

    #[test]
    fn test_motion_sensor_node_rejected() {
        let sensor_axes = motion_sensor_axes();

        for layout in [StickLayout::Xbox, StickLayout::DualSense] {
            assert!(!has_layout_capabilities(Some(&*sensor_axes), None, layout));
        }
    }

    #[test]
    fn test_keys_without_south_button_rejected() {
        let pad_axes = axes(&StickLayout::DualSense.axis_codes());
        let touchpad_keys = keys(&[Key::BTN_LEFT, Key::BTN_TOUCH]);

        assert!(!has_layout_capabilities(Some(&*pad_axes), Some(&*touchpad_keys), StickLayout::DualSense));
    }

    #[test]
    fn test_buttons_without_axes_rejected() {
        let pad_keys = keys(&[Key::BTN_SOUTH]);
        assert!(!has_layout_capabilities(None, Some(&*pad_keys), StickLayout::Xbox));
    }

    #[test]
    fn test_open_missing_path_is_not_found() {
        let result = GamepadDevice::open_path("/nonexistent/event99", EventMapper::default());
        assert!(matches!(result, Err(StickTyperError::ControllerNotFound)));
    }

    #[test]
    fn test_not_found_message() {
        let message = StickTyperError::ControllerNotFound.to_string();
        assert!(message.contains("No controllers detected"));
    }

    // Integration test - only runs with real hardware
    #[tokio::test]
    #[ignore]
    async fn test_open_with_real_hardware() {
        let result = GamepadDevice::open(EventMapper::default());
        assert!(result.is_ok(), "Should detect connected gamepad");

        let gamepad = result.unwrap();
        assert!(gamepad.device_path().starts_with("/dev/input/event"));
    }

    // Integration test - only runs with real hardware
    #[tokio::test]
    #[ignore]
    async fn test_next_batch_with_real_hardware() {
        let mut gamepad = GamepadDevice::open(EventMapper::default()).expect("Gamepad not found");

        println!("Move a stick or press a button...");
        let batch = gamepad.next_batch().await.expect("Failed to read batch");
        assert!(!batch.is_empty());
    }
}
