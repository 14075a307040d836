//! Line-oriented command scripts
//!
//! Each non-empty line is one command; `#` starts a comment. Commands map
//! onto the same events a pointer or keyboard would produce.
//!
//! ```text
//! add 3p          # catalog tile by name or id
//! spacer
//! newline
//! remove 0
//! move 0 2        # drag item 0, drop on item 2
//! drag 1
//! drop end
//! key backspace   # append `editable` to simulate a focused text field
//! sort
//! reset
//! undo
//! show
//! export
//! ```

use std::str::FromStr;

use crate::app::state::{AppEvent, DropTarget};
use crate::domain::catalog::catalog;
use crate::input::keyboard::{FocusTarget, Key, KeyParseError, KeyPress};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: '{command}' expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("line {line}: invalid index '{value}'")]
    InvalidIndex { line: usize, value: String },

    #[error("line {line}: unknown tile '{value}'")]
    UnknownTile { line: usize, value: String },

    #[error("line {line}: {source}")]
    InvalidKey { line: usize, source: KeyParseError },
}

/// One parsed script command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Feed an input event to the controller
    Event(AppEvent),
    /// Drag `from` and drop it on item `to`
    Move { from: usize, to: usize },
    /// Print the current rows
    Show,
    /// Write the image
    Export,
}

impl ScriptCommand {
    /// Input events this command stands for, in dispatch order
    pub fn events(&self) -> Vec<AppEvent> {
        match self {
            ScriptCommand::Event(event) => vec![event.clone()],
            ScriptCommand::Move { from, to } => {
                vec![AppEvent::DragStart(*from), AppEvent::Drop(DropTarget::Item(*to))]
            }
            ScriptCommand::Show | ScriptCommand::Export => Vec::new(),
        }
    }
}

/// Parses one line; `Ok(None)` for blank lines and comments
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScriptCommand>, CommandError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let command = command.to_ascii_lowercase();

    let missing = |expected: &'static str| CommandError::MissingArgument {
        line: line_no,
        command: command.clone(),
        expected,
    };
    let index = |value: &str| {
        usize::from_str(value).map_err(|_| CommandError::InvalidIndex {
            line: line_no,
            value: value.to_string(),
        })
    };

    let parsed = match command.as_str() {
        "add" => {
            let value = words.next().ok_or_else(|| missing("a tile name or id"))?;
            let tile = catalog().resolve(value).ok_or_else(|| CommandError::UnknownTile {
                line: line_no,
                value: value.to_string(),
            })?;
            ScriptCommand::Event(AppEvent::AddTile(tile.id.clone()))
        }
        "spacer" => ScriptCommand::Event(AppEvent::AddSpacer),
        "newline" | "break" => ScriptCommand::Event(AppEvent::AddLineBreak),
        "remove" | "rm" => {
            let value = words.next().ok_or_else(|| missing("an index"))?;
            ScriptCommand::Event(AppEvent::RemoveAt(index(value)?))
        }
        "move" | "mv" => {
            let from = words.next().ok_or_else(|| missing("two indices"))?;
            let to = words.next().ok_or_else(|| missing("two indices"))?;
            ScriptCommand::Move {
                from: index(from)?,
                to: index(to)?,
            }
        }
        "drag" => {
            let value = words.next().ok_or_else(|| missing("an index"))?;
            ScriptCommand::Event(AppEvent::DragStart(index(value)?))
        }
        "drop" => {
            let value = words.next().ok_or_else(|| missing("an index or 'end'"))?;
            let target = if value.eq_ignore_ascii_case("end") {
                DropTarget::End
            } else {
                DropTarget::Item(index(value)?)
            };
            ScriptCommand::Event(AppEvent::Drop(target))
        }
        "key" => {
            let value = words.next().ok_or_else(|| missing("a key name"))?;
            let key = Key::from_str(value).map_err(|source| CommandError::InvalidKey {
                line: line_no,
                source,
            })?;
            let target = match words.next() {
                Some(word) if word.eq_ignore_ascii_case("editable") => FocusTarget::input(),
                _ => FocusTarget::Document,
            };
            ScriptCommand::Event(AppEvent::KeyDown(KeyPress::new(key, target)))
        }
        "sort" => ScriptCommand::Event(AppEvent::Sort),
        "reset" | "clear" => ScriptCommand::Event(AppEvent::Reset),
        "undo" => ScriptCommand::Event(AppEvent::Undo),
        "show" => ScriptCommand::Show,
        "export" => ScriptCommand::Export,
        _ => {
            return Err(CommandError::UnknownCommand {
                line: line_no,
                command: command.clone(),
            });
        }
    };

    Ok(Some(parsed))
}

/// Parses a whole script, numbering lines from 1
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>, CommandError> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(idx + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_commands() {
        let script = "add 3p\nspacer\nnewline\nsort\nundo\nreset\nexport\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                ScriptCommand::Event(AppEvent::AddTile("Mpu3p".into())),
                ScriptCommand::Event(AppEvent::AddSpacer),
                ScriptCommand::Event(AppEvent::AddLineBreak),
                ScriptCommand::Event(AppEvent::Sort),
                ScriptCommand::Event(AppEvent::Undo),
                ScriptCommand::Event(AppEvent::Reset),
                ScriptCommand::Export,
            ]
        );
    }

    #[test]
    fn tiles_resolve_by_name_or_id() {
        assert_eq!(
            parse_line(1, "add Mpu5z").unwrap(),
            Some(ScriptCommand::Event(AppEvent::AddTile("Mpu5z".into())))
        );
        assert_eq!(
            parse_line(1, "ADD 5Z").unwrap(),
            Some(ScriptCommand::Event(AppEvent::AddTile("Mpu5z".into())))
        );
    }

    #[test]
    fn comments_and_blanks_are_skipped() {
        assert_eq!(parse_line(1, "   ").unwrap(), None);
        assert_eq!(parse_line(1, "# just a note").unwrap(), None);
        assert_eq!(
            parse_line(1, "sort # tidy up").unwrap(),
            Some(ScriptCommand::Event(AppEvent::Sort))
        );
    }

    #[test]
    fn move_expands_to_drag_and_drop() {
        let command = parse_line(1, "move 0 2").unwrap().unwrap();
        assert_eq!(
            command.events(),
            vec![AppEvent::DragStart(0), AppEvent::Drop(DropTarget::Item(2))]
        );
    }

    #[test]
    fn drop_accepts_end() {
        assert_eq!(
            parse_line(1, "drop end").unwrap(),
            Some(ScriptCommand::Event(AppEvent::Drop(DropTarget::End)))
        );
    }

    #[test]
    fn key_with_editable_focus() {
        let command = parse_line(1, "key delete editable").unwrap().unwrap();
        let press = KeyPress::new(Key::Delete, FocusTarget::input());
        assert_eq!(command, ScriptCommand::Event(AppEvent::KeyDown(press)));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let err = parse_script("sort\nfrobnicate").unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownCommand {
                line: 2,
                command: "frobnicate".into()
            }
        );

        assert!(matches!(parse_line(3, "add 0z"), Err(CommandError::UnknownTile { line: 3, .. })));
        assert!(matches!(parse_line(3, "add +3p"), Err(CommandError::UnknownTile { line: 3, .. })));
        assert!(matches!(
            parse_line(4, "remove x"),
            Err(CommandError::InvalidIndex { line: 4, .. })
        ));
        assert!(matches!(
            parse_line(5, "move 1"),
            Err(CommandError::MissingArgument { line: 5, .. })
        ));
        assert!(matches!(
            parse_line(6, "key shift"),
            Err(CommandError::InvalidKey { line: 6, .. })
        ));
    }
}
