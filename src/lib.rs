//! # Stick Typer Library
//!
//! Type text with the two analog sticks of a gamepad.
//!
//! One stick picks a row of symbols, the other picks a slot within that
//! row. Pushing the row stick from center to the edge emits the selected
//! symbol once.

pub mod config;
pub mod controller;
pub mod error;
pub mod output;
pub mod session;
pub mod typing;
