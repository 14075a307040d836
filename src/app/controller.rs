//! Application controller and coordination layer
//!
//! The controller owns the selection, dispatches input events to it one at a
//! time and drives image export. It is single-threaded: only the rasterizer
//! call leaves the current task.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::app::state::{AppEvent, DragState, EventContext, StateMachine};
use crate::config::AppConfig;
use crate::domain::selection::Selection;
use crate::ui::export::{
    ExportError, ExportOutcome, SpacerVisibility, rasterize_off_thread, write_png,
};
use crate::ui::layout::SelectionLayout;
use crate::ui::renderer::{Rasterizer, RenderOptions, RendererError, TileRenderer};

/// What dispatching an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventOutcome {
    /// The selection changed
    pub changed: bool,
    /// The event was consumed; for key presses, the default action is suppressed
    pub handled: bool,
}

/// Main application controller
pub struct AppController {
    selection: Selection,
    drag: DragState,
    spacers: SpacerVisibility,
    config: AppConfig,
    rasterizer: Arc<dyn Rasterizer>,
}

impl AppController {
    /// Creates a controller with a tiny-skia renderer built from `config`
    ///
    /// # Returns
    /// AppController instance, or RendererError if the configured font
    /// cannot be loaded
    pub fn new(config: AppConfig) -> Result<Self, RendererError> {
        let mut renderer = TileRenderer::with_assets(&config.assets_dir);
        if let Some(font_path) = &config.font_path {
            renderer = renderer.with_font(font_path)?;
        }
        Ok(Self::with_rasterizer(config, Arc::new(renderer)))
    }

    /// Creates a controller around any rasterizer
    pub fn with_rasterizer(config: AppConfig, rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self {
            selection: Selection::new(),
            drag: DragState::Idle,
            spacers: SpacerVisibility::new(),
            config,
            rasterizer,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Whether spacer placeholders are currently hidden (only during export)
    pub fn spacers_hidden(&self) -> bool {
        self.spacers.is_hidden()
    }

    /// Dispatches one input event
    pub fn handle_event(&mut self, event: AppEvent) -> EventOutcome {
        debug!(?event, "dispatching event");
        let ctx = EventContext::of(&self.selection);
        let transition = StateMachine::process_event(self.drag, event, ctx);
        self.drag = transition.drag;

        let changed = match &transition.command {
            Some(command) => {
                let changed = command.apply(&mut self.selection);
                if !changed {
                    debug!(?command, "command was a no-op");
                }
                changed
            }
            None => false,
        };

        EventOutcome {
            changed,
            handled: transition.handled,
        }
    }

    /// Current pixel layout, used for drawing and hit-testing
    pub fn layout(&self) -> SelectionLayout {
        SelectionLayout::from_items(self.selection.items(), &self.config.layout)
    }

    fn export_options(&self) -> RenderOptions {
        RenderOptions {
            scale: self.config.export.scale,
            transparent_background: self.config.export.transparent_background,
            hide_spacers: self.spacers.is_hidden(),
            show_line_breaks: self.config.layout.show_line_breaks,
        }
    }

    /// Exports the selection as `mahjong-selection.png` in the output directory
    ///
    /// Spacers are hidden first, control is yielded once so observers can
    /// see that, and visibility is restored when the export finishes, even
    /// on failure. Nothing is written when the selection has no tiles.
    pub async fn export_image(&self) -> Result<ExportOutcome, ExportError> {
        if self.selection.total_tile_count() == 0 {
            debug!("export skipped: no tiles selected");
            return Ok(ExportOutcome::Skipped);
        }

        let _spacers_hidden = self.spacers.hide();
        tokio::task::yield_now().await;

        let layout = self.layout();
        let options = self.export_options();
        let pixmap = rasterize_off_thread(Arc::clone(&self.rasterizer), layout, options).await?;

        let path = self.config.export_path();
        write_png(&pixmap, &path).await?;
        info!(
            path = %path.display(),
            width = pixmap.width(),
            height = pixmap.height(),
            "selection exported"
        );
        Ok(ExportOutcome::Written(path))
    }

    /// Exports and logs failures instead of returning them
    pub async fn export_image_logged(&self) -> Option<ExportOutcome> {
        match self.export_image().await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                warn!(error = %err, "export failed");
                None
            }
        }
    }
}
