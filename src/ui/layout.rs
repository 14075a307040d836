//! Pixel layout of a selection
//!
//! Separates geometry from rasterization: the layout is a plain list of
//! boxes in unscaled pixels that the renderer draws and that pointer
//! events are hit-tested against. It owns only `'static` catalog
//! references, so it can be moved onto a blocking render task.

use crate::app::state::DropTarget;
use crate::config::LayoutConfig;
use crate::domain::catalog::TileDefinition;
use crate::domain::core::Rect;
use crate::domain::item::PlacedItem;
use crate::domain::rows::{LayoutLine, layout_lines};

/// What occupies a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Tile(&'static TileDefinition),
    Spacer,
    LineBreak,
}

/// One positioned item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBox {
    /// Index of the item in the selection
    pub index: usize,
    pub kind: SlotKind,
    pub rect: Rect,
}

/// Pre-calculated layout for rendering and hit-testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionLayout {
    pub slots: Vec<SlotBox>,
    /// Overall canvas, origin at (0, 0)
    pub canvas: Rect,
    /// Number of visual rows, not counting break markers
    pub row_count: usize,
}

impl SelectionLayout {
    /// Lays items out left to right, starting a new row at each break
    pub fn from_items(items: &[PlacedItem], config: &LayoutConfig) -> Self {
        let config = config.sanitized();
        let tile_w = config.tile_width as i32;
        let tile_h = config.tile_height as i32;
        let gap = config.gap as i32;
        let row_gap = config.row_gap as i32;
        let padding = config.padding as i32;

        let mut slots = Vec::with_capacity(items.len());
        let mut row_count = 0;
        let mut content_w = tile_w;
        let mut y = padding;

        for (line_idx, line) in layout_lines(items).into_iter().enumerate() {
            if line_idx > 0 {
                y += row_gap;
            }
            match line {
                LayoutLine::Row(row) => {
                    let mut x = padding;
                    for (pos, slot) in row.iter().enumerate() {
                        if pos > 0 {
                            x += gap;
                        }
                        let kind = match slot.item {
                            PlacedItem::Tile { tile, .. } => SlotKind::Tile(*tile),
                            PlacedItem::Spacer { .. } => SlotKind::Spacer,
                            PlacedItem::LineBreak { .. } => SlotKind::LineBreak,
                        };
                        slots.push(SlotBox {
                            index: slot.index,
                            kind,
                            rect: Rect::new(x, y, tile_w, tile_h),
                        });
                        x += tile_w;
                    }
                    content_w = content_w.max(x - padding);
                    row_count += 1;
                    y += tile_h;
                }
                LayoutLine::Break(slot) => {
                    // width is fixed up once the widest row is known
                    slots.push(SlotBox {
                        index: slot.index,
                        kind: SlotKind::LineBreak,
                        rect: Rect::new(padding, y, 0, config.line_break_height as i32),
                    });
                    y += config.line_break_height as i32;
                }
            }
        }

        for slot in slots.iter_mut().filter(|s| s.kind == SlotKind::LineBreak) {
            slot.rect.w = content_w;
        }

        Self {
            slots,
            canvas: Rect::new(0, 0, content_w + 2 * padding, y + padding),
            row_count,
        }
    }

    /// Index of the item under a point
    pub fn slot_at(&self, x: i32, y: i32) -> Option<usize> {
        self.slots
            .iter()
            .find(|slot| slot.rect.contains_point(x, y))
            .map(|slot| slot.index)
    }

    /// Drop target under a point
    ///
    /// Points inside the canvas but not over an item target the end of the
    /// selection, like dropping onto the container itself.
    pub fn drop_target_at(&self, x: i32, y: i32) -> Option<DropTarget> {
        if let Some(index) = self.slot_at(x, y) {
            return Some(DropTarget::Item(index));
        }
        self.canvas.contains_point(x, y).then_some(DropTarget::End)
    }

    /// Device pixel size at the given scale, at least 1x1
    pub fn scaled_size(&self, scale: f32) -> (u32, u32) {
        let w = (self.canvas.w as f32 * scale).ceil().max(1.0) as u32;
        let h = (self.canvas.h as f32 * scale).ceil().max(1.0) as u32;
        (w, h)
    }
}
