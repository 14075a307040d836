//! Interaction state and event transitions
//!
//! Raw UI events (clicks, drags, key presses) are turned into selection
//! commands here. The only state that outlives a single event is the index
//! captured at drag start; everything else lives in the selection itself.

use crate::domain::selection::Selection;
use crate::input::keyboard::{KeyAction, KeyPress, map_key_press};

/// Where an item was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// On another item, by its index in the selection
    Item(usize),
    /// On the selection container past the last item
    End,
}

/// Discrete user input, dispatched one at a time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Catalog tile clicked
    AddTile(String),
    AddSpacer,
    AddLineBreak,
    /// Placed item clicked
    RemoveAt(usize),
    DragStart(usize),
    Drop(DropTarget),
    Sort,
    Reset,
    Undo,
    KeyDown(KeyPress),
}

/// A mutation of the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionCommand {
    AddTile(String),
    AddSpacer,
    AddLineBreak,
    RemoveAt(usize),
    Reorder { from: usize, to: usize },
    Sort,
    Reset,
    Undo,
}

impl SelectionCommand {
    /// Applies the command, returning whether the selection changed
    pub fn apply(&self, selection: &mut Selection) -> bool {
        match self {
            SelectionCommand::AddTile(id) => selection.add_tile(id),
            SelectionCommand::AddSpacer => selection.add_spacer(),
            SelectionCommand::AddLineBreak => selection.add_line_break(),
            SelectionCommand::RemoveAt(index) => selection.remove_at(*index),
            SelectionCommand::Reorder { from, to } => selection.reorder(*from, *to),
            SelectionCommand::Sort => selection.sort(),
            SelectionCommand::Reset => selection.reset(),
            SelectionCommand::Undo => selection.undo(),
        }
    }
}

/// Drag-and-drop progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { from: usize },
}

/// Facts about the selection an event transition needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventContext {
    /// Number of placed items (the index of the end container)
    pub len: usize,
    pub can_undo: bool,
}

impl EventContext {
    pub fn of(selection: &Selection) -> Self {
        Self {
            len: selection.len(),
            can_undo: selection.can_undo(),
        }
    }
}

/// Result of processing one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub drag: DragState,
    pub command: Option<SelectionCommand>,
    /// Whether the event was consumed (the default key action is suppressed)
    pub handled: bool,
}

impl Transition {
    fn command(drag: DragState, command: SelectionCommand) -> Self {
        Self {
            drag,
            command: Some(command),
            handled: true,
        }
    }

    fn ignored(drag: DragState) -> Self {
        Self {
            drag,
            command: None,
            handled: false,
        }
    }
}

/// State machine for interaction transitions
pub struct StateMachine;

impl StateMachine {
    /// Processes an event and returns the next drag state and command
    ///
    /// Every drop clears the captured drag index, including drops that turn
    /// out to be no-ops.
    pub fn process_event(drag: DragState, event: AppEvent, ctx: EventContext) -> Transition {
        match event {
            AppEvent::AddTile(id) => Transition::command(drag, SelectionCommand::AddTile(id)),
            AppEvent::AddSpacer => Transition::command(drag, SelectionCommand::AddSpacer),
            AppEvent::AddLineBreak => Transition::command(drag, SelectionCommand::AddLineBreak),
            AppEvent::RemoveAt(index) => {
                Transition::command(drag, SelectionCommand::RemoveAt(index))
            }
            AppEvent::Sort => Transition::command(drag, SelectionCommand::Sort),
            AppEvent::Reset => Transition::command(drag, SelectionCommand::Reset),
            AppEvent::Undo => Transition::command(drag, SelectionCommand::Undo),

            AppEvent::DragStart(from) => Transition {
                drag: DragState::Dragging { from },
                command: None,
                handled: true,
            },

            AppEvent::Drop(target) => {
                let DragState::Dragging { from } = drag else {
                    return Transition::ignored(DragState::Idle);
                };
                let to = match target {
                    DropTarget::Item(index) => index,
                    DropTarget::End => ctx.len,
                };
                if from == to {
                    return Transition {
                        drag: DragState::Idle,
                        command: None,
                        handled: true,
                    };
                }
                Transition::command(DragState::Idle, SelectionCommand::Reorder { from, to })
            }

            AppEvent::KeyDown(press) => match map_key_press(&press, ctx.can_undo) {
                Some(KeyAction::Undo) => Transition::command(drag, SelectionCommand::Undo),
                None => Transition::ignored(drag),
            },
        }
    }
}
