//! # Controller Module
//!
//! Dual-stick gamepad input handling.
//!
//! This module handles:
//! - Gamepad detection and connection via evdev
//! - Mapping raw events to stick and button samples
//! - Per-stick calibration of maximum deflection
//! - Per-stick position tracking with the deadzone-at-edge filter

pub mod calibration;
pub mod device;
pub mod mapper;
pub mod source;
pub mod stick;
