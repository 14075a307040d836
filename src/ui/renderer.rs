//! Selection rasterizer using tiny-skia
//!
//! Draws a pre-computed [`SelectionLayout`] into a pixmap. Tile faces come
//! from PNG assets under the configured asset root; when an asset is missing
//! the tile is drawn as a plain rounded face, labelled with its name if a
//! font was configured.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, Path as SkiaPath, PathBuilder, Pattern, Pixmap,
    PremultipliedColorU8, Rect as SkiaRect, SpreadMode, Stroke, StrokeDash, Transform,
};
use tracing::debug;

use crate::domain::catalog::{SPACER_IMAGE_PATH, catalog};
use crate::ui::layout::{SelectionLayout, SlotKind};

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create {width}x{height} pixmap for rendering")]
    PixmapCreationFailed { width: u32, height: u32 },

    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid font file {path}")]
    InvalidFont { path: PathBuf },

    #[error("Rendering operation failed: {0}")]
    RenderingFailed(String),
}

/// Per-render switches
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub scale: f32,
    pub transparent_background: bool,
    /// Leave spacer slots blank
    pub hide_spacers: bool,
    pub show_line_breaks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            transparent_background: true,
            hide_spacers: false,
            show_line_breaks: true,
        }
    }
}

/// The "render to raster image" capability
///
/// Implementations must be shareable with a blocking worker thread.
pub trait Rasterizer: Send + Sync {
    fn rasterize(
        &self,
        layout: &SelectionLayout,
        options: &RenderOptions,
    ) -> Result<Pixmap, RendererError>;
}

const BACKGROUND: Color = Color::WHITE;
const FACE_FILL: (u8, u8, u8) = (250, 248, 240);
const FACE_EDGE: (u8, u8, u8) = (150, 150, 150);
const LABEL: (u8, u8, u8) = (40, 40, 40);
const SPACER_EDGE: (u8, u8, u8) = (190, 190, 190);
const BREAK_BAR: (u8, u8, u8) = (200, 200, 200);
const SPACER_INSET: i32 = 1;

/// tiny-skia implementation of [`Rasterizer`]
pub struct TileRenderer {
    /// Decoded tile faces by catalog image path; missing assets are absent
    images: HashMap<String, Pixmap>,
    spacer_image: Option<Pixmap>,
    font: Option<FontVec>,
}

impl TileRenderer {
    /// Creates a renderer that draws placeholder faces only
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            spacer_image: None,
            font: None,
        }
    }

    /// Loads every catalog face found under `assets_dir`
    ///
    /// Missing or undecodable images are skipped; those tiles fall back to
    /// placeholder faces.
    pub fn with_assets(assets_dir: &Path) -> Self {
        let mut images = HashMap::new();
        for tile in catalog().tiles() {
            if let Some(pixmap) = load_image(&assets_dir.join(&tile.image_path)) {
                images.insert(tile.image_path.clone(), pixmap);
            }
        }
        debug!(
            loaded = images.len(),
            total = catalog().len(),
            dir = %assets_dir.display(),
            "tile images loaded"
        );

        Self {
            images,
            spacer_image: load_image(&assets_dir.join(SPACER_IMAGE_PATH)),
            font: None,
        }
    }

    /// Adds a font for placeholder labels
    pub fn with_font(mut self, path: &Path) -> Result<Self, RendererError> {
        let data = fs::read(path).map_err(|source| RendererError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| RendererError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        self.font = Some(font);
        Ok(self)
    }

    /// Number of tile faces backed by an image
    pub fn loaded_image_count(&self) -> usize {
        self.images.len()
    }

    fn render_tile(
        &self,
        pixmap: &mut Pixmap,
        rect: SkiaRect,
        image_path: &str,
        name: &str,
        scale: f32,
    ) {
        if let Some(image) = self.images.get(image_path) {
            draw_image(pixmap, image, rect);
            return;
        }

        if let Some(face) = rounded_rect(rect, 6.0 * scale) {
            let fill = solid(FACE_FILL);
            pixmap.fill_path(&face, &fill, FillRule::Winding, Transform::identity(), None);
            let stroke = Stroke {
                width: (1.5 * scale).max(1.0),
                ..Stroke::default()
            };
            pixmap.stroke_path(&face, &solid(FACE_EDGE), &stroke, Transform::identity(), None);
        }

        if let Some(font) = &self.font {
            let size = rect.height() * 0.35;
            draw_label(pixmap, font, name, rect, size);
        }
    }

    /// `outline` is the slot pulled in by [`SPACER_INSET`] so the dashed
    /// stroke stays inside the slot
    fn render_spacer(
        &self,
        pixmap: &mut Pixmap,
        rect: SkiaRect,
        outline: Option<SkiaRect>,
        scale: f32,
    ) {
        if let Some(image) = &self.spacer_image {
            draw_image(pixmap, image, rect);
            return;
        }

        if let Some(outline) = outline.and_then(|outline| rounded_rect(outline, 6.0 * scale)) {
            let stroke = Stroke {
                width: (1.0 * scale).max(1.0),
                dash: StrokeDash::new(vec![4.0 * scale, 3.0 * scale], 0.0),
                ..Stroke::default()
            };
            pixmap.stroke_path(&outline, &solid(SPACER_EDGE), &stroke, Transform::identity(), None);
        }
    }

    fn render_line_break(&self, pixmap: &mut Pixmap, rect: SkiaRect, scale: f32) {
        let thickness = (2.0 * scale).min(rect.height()).max(1.0);
        let y = rect.top() + (rect.height() - thickness) / 2.0;
        if let Some(bar) = SkiaRect::from_xywh(rect.left(), y, rect.width(), thickness) {
            pixmap.fill_rect(bar, &solid(BREAK_BAR), Transform::identity(), None);
        }
    }
}

impl std::fmt::Debug for TileRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileRenderer")
            .field("images", &self.images.len())
            .field("spacer_image", &self.spacer_image.is_some())
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Default for TileRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer for TileRenderer {
    fn rasterize(
        &self,
        layout: &SelectionLayout,
        options: &RenderOptions,
    ) -> Result<Pixmap, RendererError> {
        let scale = options.scale;
        let (width, height) = layout.scaled_size(scale);
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RendererError::PixmapCreationFailed { width, height })?;

        if !options.transparent_background {
            pixmap.fill(BACKGROUND);
        }

        for slot in &layout.slots {
            let Some(rect) = slot.rect.to_skia(scale) else {
                continue;
            };
            match slot.kind {
                SlotKind::Tile(tile) => {
                    self.render_tile(&mut pixmap, rect, &tile.image_path, &tile.name, scale)
                }
                SlotKind::Spacer if options.hide_spacers => {}
                SlotKind::Spacer => {
                    let outline = slot.rect.inset(SPACER_INSET).to_skia(scale);
                    self.render_spacer(&mut pixmap, rect, outline, scale);
                }
                SlotKind::LineBreak if options.show_line_breaks => {
                    self.render_line_break(&mut pixmap, rect, scale)
                }
                SlotKind::LineBreak => {}
            }
        }

        Ok(pixmap)
    }
}

fn load_image(path: &Path) -> Option<Pixmap> {
    match Pixmap::load_png(path) {
        Ok(pixmap) => Some(pixmap),
        Err(err) => {
            debug!(path = %path.display(), %err, "no usable tile image");
            None
        }
    }
}

fn solid((r, g, b): (u8, u8, u8)) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    paint.anti_alias = true;
    paint
}

/// Stretches `image` over `rect`
fn draw_image(pixmap: &mut Pixmap, image: &Pixmap, rect: SkiaRect) {
    let sx = rect.width() / image.width() as f32;
    let sy = rect.height() / image.height() as f32;
    let paint = Paint {
        shader: Pattern::new(
            image.as_ref(),
            SpreadMode::Pad,
            FilterQuality::Bicubic,
            1.0,
            Transform::from_row(sx, 0.0, 0.0, sy, rect.left(), rect.top()),
        ),
        anti_alias: true,
        ..Paint::default()
    };
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

fn rounded_rect(rect: SkiaRect, radius: f32) -> Option<SkiaPath> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.quad_to(rt, t, rt, t + r);
    pb.line_to(rt, b - r);
    pb.quad_to(rt, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.quad_to(l, b, l, b - r);
    pb.line_to(l, t + r);
    pb.quad_to(l, t, l + r, t);
    pb.close();
    pb.finish()
}

/// Draws `text` centred in `rect`, blending glyph coverage by hand
fn draw_label(pixmap: &mut Pixmap, font: &FontVec, text: &str, rect: SkiaRect, size: f32) {
    let scaled = font.as_scaled(PxScale::from(size));
    let width: f32 = text.chars().map(|c| scaled.h_advance(font.glyph_id(c))).sum();
    let baseline = rect.top() + rect.height() / 2.0 + (scaled.ascent() + scaled.descent()) / 2.0;
    let mut caret = rect.left() + (rect.width() - width) / 2.0;

    let (pw, ph) = (pixmap.width() as i32, pixmap.height() as i32);
    let (r, g, b) = LABEL;

    for c in text.chars() {
        let mut glyph = scaled.scaled_glyph(c);
        glyph.position = point(caret, baseline);
        caret += scaled.h_advance(glyph.id);

        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        let pixels = pixmap.pixels_mut();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i32 + gx as i32;
            let y = bounds.min.y as i32 + gy as i32;
            if x < 0 || y < 0 || x >= pw || y >= ph {
                return;
            }
            let idx = (y * pw + x) as usize;
            if let Some(blended) = blend_over(pixels[idx], (r, g, b), coverage) {
                pixels[idx] = blended;
            }
        });
    }
}

/// Source-over of a straight color with `coverage` alpha onto a premultiplied pixel
fn blend_over(
    dst: PremultipliedColorU8,
    (r, g, b): (u8, u8, u8),
    coverage: f32,
) -> Option<PremultipliedColorU8> {
    let a = (coverage.clamp(0.0, 1.0) * 255.0).round() as u32;
    let inv = 255 - a;
    let channel = |src: u8, d: u8| ((src as u32 * a + d as u32 * inv) / 255) as u8;
    let alpha = (a + dst.alpha() as u32 * inv / 255) as u8;
    PremultipliedColorU8::from_rgba(
        channel(r, dst.red()),
        channel(g, dst.green()),
        channel(b, dst.blue()),
        alpha,
    )
}
