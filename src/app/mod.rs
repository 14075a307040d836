//! Application orchestration layer
//!
//! Turns input events into selection commands and coordinates rendering
//! and export.

pub mod controller;
pub mod state;
