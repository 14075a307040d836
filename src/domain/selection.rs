//! Selection state machine with snapshot undo
//!
//! The selection is the ordered list of placed items the user is composing.
//! Every mutation first pushes a full copy of the current list onto the
//! history stack, so `undo` restores exactly the previous value. Guarded
//! operations that would not change anything leave both the list and the
//! history untouched.
//!
//! All operations report whether they changed the selection; none of them
//! fail.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::catalog::{TileDefinition, catalog, compare_tiles};
use crate::domain::item::PlacedItem;
use crate::domain::rows::{LayoutLine, Slot, layout_lines, segment_rows};

/// Ordered layout items plus their undo history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Current layout, left to right, wrapping at line breaks
    items: Vec<PlacedItem>,
    /// Prior layouts, most recent last
    history: Vec<Vec<PlacedItem>>,
}

impl Selection {
    /// Creates an empty selection with no history
    ///
    /// # Example
    /// ```rust
    /// use mahjong_tiles::domain::selection::Selection;
    ///
    /// let selection = Selection::new();
    /// assert!(selection.is_empty());
    /// assert!(!selection.can_undo());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Current items in layout order
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of snapshots available to `undo`
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Saves the current items and returns them for editing
    fn checkpoint(&mut self) -> &mut Vec<PlacedItem> {
        self.history.push(self.items.clone());
        &mut self.items
    }

    fn append(&mut self, item: PlacedItem) {
        debug!(key = %item.key(), "item appended");
        self.checkpoint().push(item);
    }

    /// Appends a copy of a catalog tile
    ///
    /// No-op when the id is unknown or the tile is already at its copy limit.
    ///
    /// # Example
    /// ```rust
    /// use mahjong_tiles::domain::selection::Selection;
    ///
    /// let mut selection = Selection::new();
    /// for _ in 0..5 {
    ///     selection.add_tile("Mpu5z");
    /// }
    /// assert_eq!(selection.count_of("Mpu5z"), 4);
    /// ```
    pub fn add_tile(&mut self, tile_id: &str) -> bool {
        let Some(tile) = catalog().get(tile_id) else {
            debug!(tile_id, "ignoring unknown tile");
            return false;
        };

        if self.count_of(&tile.id) >= tile.max_copies {
            debug!(tile_id, max = tile.max_copies, "tile at copy limit");
            return false;
        }

        self.append(PlacedItem::tile(tile));
        true
    }

    /// Appends a blank slot
    pub fn add_spacer(&mut self) -> bool {
        self.append(PlacedItem::spacer());
        true
    }

    /// Appends a row terminator
    pub fn add_line_break(&mut self) -> bool {
        self.append(PlacedItem::line_break());
        true
    }

    /// Removes the item at `index`; no-op when out of bounds
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            debug!(index, len = self.items.len(), "remove index out of bounds");
            return false;
        }

        let removed = self.checkpoint().remove(index);
        debug!(index, key = %removed.key(), "item removed");
        true
    }

    /// Moves an item by removing it and inserting it at `to_index`
    ///
    /// `to_index` refers to the list *after* the removal, so moving an item
    /// forward lands it one slot further than its drop target. Targets past
    /// the end append.
    ///
    /// # Example
    /// ```rust
    /// use mahjong_tiles::domain::selection::Selection;
    ///
    /// let mut selection = Selection::new();
    /// selection.add_tile("Mpu1p");
    /// selection.add_tile("Mpu2p");
    /// selection.add_tile("Mpu3p");
    /// selection.reorder(0, 2);
    ///
    /// let names: Vec<_> = selection.items().iter().map(|i| i.label()).collect();
    /// assert_eq!(names, ["2P", "3P", "1P"]);
    /// ```
    pub fn reorder(&mut self, from_index: usize, to_index: usize) -> bool {
        if from_index == to_index || from_index >= self.items.len() {
            return false;
        }

        let items = self.checkpoint();
        let item = items.remove(from_index);
        let to_index = to_index.min(items.len());
        items.insert(to_index, item);
        true
    }

    /// Sorts tile instances among themselves
    ///
    /// Spacers and line breaks keep their positions; the slots that held
    /// tiles are refilled with the same instances in suit/value order.
    /// No-op when there are no tiles.
    pub fn sort(&mut self) -> bool {
        if self.total_tile_count() == 0 {
            return false;
        }

        let mut tiles: Vec<PlacedItem> =
            self.items.iter().filter(|item| item.is_tile()).cloned().collect();
        tiles.sort_by(|a, b| match (a.as_tile(), b.as_tile()) {
            (Some(a), Some(b)) => compare_tiles(a, b),
            _ => std::cmp::Ordering::Equal,
        });

        let mut sorted = tiles.into_iter();
        let items = self.checkpoint();
        for slot in items.iter_mut().filter(|item| item.is_tile()) {
            if let Some(next) = sorted.next() {
                *slot = next;
            }
        }
        true
    }

    /// Clears every item; no-op when already empty
    pub fn reset(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }

        self.checkpoint().clear();
        true
    }

    /// Restores the most recent snapshot; no-op when history is empty
    ///
    /// Undo consumes history and never records any.
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.items = previous;
                true
            }
            None => false,
        }
    }

    /// Number of instances per catalog id
    pub fn counts_by_tile_id(&self) -> HashMap<&'static str, usize> {
        let mut counts = HashMap::new();
        for tile in self.items.iter().filter_map(PlacedItem::as_tile) {
            *counts.entry(tile.id.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of instances of one catalog id
    pub fn count_of(&self, tile_id: &str) -> usize {
        self.items
            .iter()
            .filter_map(PlacedItem::as_tile)
            .filter(|tile| tile.id == tile_id)
            .count()
    }

    /// Whether another copy of `tile` would be rejected
    pub fn is_at_cap(&self, tile: &TileDefinition) -> bool {
        self.count_of(&tile.id) >= tile.max_copies
    }

    /// Number of tile instances, ignoring spacers and breaks
    pub fn total_tile_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_tile()).count()
    }

    /// Items grouped into rows at each line break
    pub fn rows(&self) -> Vec<Vec<Slot<'_>>> {
        segment_rows(&self.items)
    }

    /// Rows interleaved with their break markers
    pub fn layout_lines(&self) -> Vec<LayoutLine<'_>> {
        layout_lines(&self.items)
    }
}
