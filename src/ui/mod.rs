//! Layout, rasterization and image export

pub mod export;
pub mod layout;
pub mod renderer;

pub use export::{ExportError, ExportOutcome, SpacerGuard, SpacerVisibility};
pub use layout::{SelectionLayout, SlotBox, SlotKind};
pub use renderer::{Rasterizer, RenderOptions, RendererError, TileRenderer};
