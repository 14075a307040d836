//! Configuration module for mahjong-tiles
//!
//! Settings shared by the layout, renderer and export path. Values come from
//! an optional TOML file and are clamped into sane ranges on load.

pub mod app;

pub use app::{AppConfig, ConfigError, EXPORT_FILE_NAME, ExportOptions, LayoutConfig};
