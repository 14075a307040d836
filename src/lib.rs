//! mahjong-tiles: compose a layout of Mahjong tiles and export it as PNG
//!
//! - `domain`: tile catalog, placed items, the selection state machine
//! - `input`: keyboard shortcuts and command scripts
//! - `app`: event dispatch and export orchestration
//! - `ui`: pixel layout, tiny-skia rasterizer, PNG export
//! - `config`: TOML settings

pub mod app;
pub mod config;
pub mod domain;
pub mod input;
pub mod ui;

pub use app::controller::AppController;
pub use config::AppConfig;
pub use domain::selection::Selection;
