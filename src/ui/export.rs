//! PNG export plumbing
//!
//! Rasterization is treated as an opaque, fallible capability and runs on a
//! blocking worker. Spacer placeholders are hidden for the duration of an
//! export through [`SpacerGuard`], whose `Drop` restores them no matter how
//! the export ends.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tiny_skia::Pixmap;

use crate::ui::layout::SelectionLayout;
use crate::ui::renderer::{Rasterizer, RenderOptions, RendererError};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Rasterization failed: {0}")]
    Render(#[from] RendererError),

    #[error("Render task did not complete: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What an export attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Image written to this path
    Written(PathBuf),
    /// Nothing to export: the selection has no tiles
    Skipped,
}

/// Whether spacer placeholders are currently drawn
#[derive(Debug, Default)]
pub struct SpacerVisibility {
    hidden: Cell<bool>,
}

impl SpacerVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    /// Hides spacers until the returned guard is dropped
    pub fn hide(&self) -> SpacerGuard<'_> {
        self.hidden.set(true);
        SpacerGuard { visibility: self }
    }
}

/// Restores spacer visibility when dropped
#[derive(Debug)]
pub struct SpacerGuard<'a> {
    visibility: &'a SpacerVisibility,
}

impl Drop for SpacerGuard<'_> {
    fn drop(&mut self) {
        self.visibility.hidden.set(false);
    }
}

/// Runs the rasterizer on the blocking pool
pub async fn rasterize_off_thread(
    rasterizer: Arc<dyn Rasterizer>,
    layout: SelectionLayout,
    options: RenderOptions,
) -> Result<Pixmap, ExportError> {
    let pixmap =
        tokio::task::spawn_blocking(move || rasterizer.rasterize(&layout, &options)).await??;
    Ok(pixmap)
}

/// Encodes `pixmap` as PNG and writes it to `path`
pub async fn write_png(pixmap: &Pixmap, path: &Path) -> Result<(), ExportError> {
    let bytes = pixmap.encode_png().map_err(|err| ExportError::Encode(err.to_string()))?;
    tokio::fs::write(path, bytes).await.map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
