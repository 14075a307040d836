//! Domain logic and core data structures
//!
//! Pure layout logic: the tile catalog, placed items, the selection state
//! machine and its row segmentation. Nothing here does I/O or rendering.

pub mod catalog;
pub mod core;
pub mod item;
pub mod rows;
pub mod selection;
