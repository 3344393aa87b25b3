//! # Typing Module
//!
//! Turns stick positions into symbols.
//!
//! This module handles:
//! - The output alphabet (characters and named keys)
//! - The fixed row and index zone partitions
//! - Angle resolution from stick positions
//! - The selection state machine and output gating

pub mod angle;
pub mod engine;
pub mod symbol;
pub mod zones;
