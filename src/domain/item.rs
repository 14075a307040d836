//! Placed items: the slots of a user's layout

use std::fmt;

use uuid::Uuid;

use crate::domain::catalog::TileDefinition;

/// Unique identifier of one placed item
///
/// Stable across moves, so rendering and removal never depend on position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(Uuid);

impl InstanceId {
    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// One slot of the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacedItem {
    /// A copy of a catalog tile
    Tile {
        tile: &'static TileDefinition,
        uid: InstanceId,
    },
    /// Blank slot used for alignment
    Spacer { uid: InstanceId },
    /// Ends the current row
    LineBreak { uid: InstanceId },
}

impl PlacedItem {
    pub fn tile(tile: &'static TileDefinition) -> Self {
        PlacedItem::Tile {
            tile,
            uid: InstanceId::generate(),
        }
    }

    pub fn spacer() -> Self {
        PlacedItem::Spacer {
            uid: InstanceId::generate(),
        }
    }

    pub fn line_break() -> Self {
        PlacedItem::LineBreak {
            uid: InstanceId::generate(),
        }
    }

    pub fn uid(&self) -> InstanceId {
        match self {
            PlacedItem::Tile { uid, .. }
            | PlacedItem::Spacer { uid }
            | PlacedItem::LineBreak { uid } => *uid,
        }
    }

    /// Referenced catalog tile, if this is a tile instance
    pub fn as_tile(&self) -> Option<&'static TileDefinition> {
        match self {
            PlacedItem::Tile { tile, .. } => Some(*tile),
            _ => None,
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self, PlacedItem::Tile { .. })
    }

    pub fn is_line_break(&self) -> bool {
        matches!(self, PlacedItem::LineBreak { .. })
    }

    /// Rendering key, prefixed by item kind (`tile-Mpu3p-…`, `spacer-…`, `newline-…`)
    pub fn key(&self) -> String {
        match self {
            PlacedItem::Tile { tile, uid } => format!("tile-{}-{uid}", tile.id),
            PlacedItem::Spacer { uid } => format!("spacer-{uid}"),
            PlacedItem::LineBreak { uid } => format!("newline-{uid}"),
        }
    }

    /// Short label used in text output and accessibility labels
    pub fn label(&self) -> &str {
        match self {
            PlacedItem::Tile { tile, .. } => &tile.name,
            PlacedItem::Spacer { .. } => "_",
            PlacedItem::LineBreak { .. } => "/",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::catalog;

    #[test]
    fn ids_are_unique() {
        let a = PlacedItem::spacer();
        let b = PlacedItem::spacer();
        assert_ne!(a.uid(), b.uid());
        assert_ne!(a, b);
    }

    #[test]
    fn keys_carry_kind_prefix() {
        let tile = PlacedItem::tile(catalog().get("Mpu3p").unwrap());
        assert!(tile.key().starts_with("tile-Mpu3p-"));
        assert!(PlacedItem::spacer().key().starts_with("spacer-"));
        assert!(PlacedItem::line_break().key().starts_with("newline-"));
    }

    #[test]
    fn tile_accessors() {
        let def = catalog().get("Mpu1q").unwrap();
        let item = PlacedItem::tile(def);
        assert!(item.is_tile());
        assert_eq!(item.as_tile(), Some(def));
        assert_eq!(item.label(), "1Q");
        assert!(PlacedItem::line_break().is_line_break());
        assert_eq!(PlacedItem::spacer().as_tile(), None);
    }
}
