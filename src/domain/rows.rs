//! Row segmentation of a selection
//!
//! Line breaks split the selection into rows. Each slot keeps its index in
//! the selection so that clicks and drops on a rendered row map back to
//! `remove_at` / `reorder` targets.

use crate::domain::item::PlacedItem;

/// An item together with its position in the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub index: usize,
    pub item: &'a PlacedItem,
}

/// One visual line of the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutLine<'a> {
    /// Tiles and spacers between two breaks
    Row(Vec<Slot<'a>>),
    /// The line-break marker itself
    Break(Slot<'a>),
}

/// Splits items into rows and break markers, in display order
///
/// A row is emitted before every break, even when empty. The run after the
/// last break is emitted only when it is non-empty, or when nothing else was
/// emitted (an empty selection still has one empty row).
pub fn layout_lines(items: &[PlacedItem]) -> Vec<LayoutLine<'_>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let slot = Slot { index, item };
        if item.is_line_break() {
            lines.push(LayoutLine::Row(std::mem::take(&mut current)));
            lines.push(LayoutLine::Break(slot));
        } else {
            current.push(slot);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(LayoutLine::Row(current));
    }

    lines
}

/// Rows only, without the break markers
pub fn segment_rows(items: &[PlacedItem]) -> Vec<Vec<Slot<'_>>> {
    layout_lines(items)
        .into_iter()
        .filter_map(|line| match line {
            LayoutLine::Row(slots) => Some(slots),
            LayoutLine::Break(_) => None,
        })
        .collect()
}
