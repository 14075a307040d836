//! Input translation: keyboard shortcuts and command scripts

pub mod commands;
pub mod keyboard;

pub use commands::{CommandError, ScriptCommand, parse_line, parse_script};
pub use keyboard::{FocusTarget, Key, KeyAction, KeyPress};
