use std::sync::Arc;

use mahjong_tiles::AppController;
use mahjong_tiles::config::{AppConfig, LayoutConfig};
use mahjong_tiles::input::parse_script;
use mahjong_tiles::ui::{ExportOutcome, TileRenderer};
use tiny_skia::Pixmap;

fn controller(output_dir: &std::path::Path) -> AppController {
    let config = AppConfig {
        output_dir: output_dir.to_path_buf(),
        layout: LayoutConfig {
            tile_width: 20,
            tile_height: 30,
            gap: 2,
            row_gap: 4,
            padding: 10,
            line_break_height: 6,
            show_line_breaks: false,
        },
        ..AppConfig::default()
    };
    AppController::with_rasterizer(config, Arc::new(TileRenderer::new()))
}

fn replay(controller: &mut AppController, script: &str) {
    for command in parse_script(script).unwrap() {
        for event in command.events() {
            controller.handle_event(event);
        }
    }
}

fn labels(controller: &AppController) -> Vec<String> {
    controller
        .selection()
        .items()
        .iter()
        .map(|item| item.label().to_string())
        .collect()
}

#[test]
fn sort_example_from_script() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(dir.path());
    replay(&mut controller, "add 3p\nadd 1s\nadd 2p\nadd 1z\nsort\n");
    assert_eq!(labels(&controller), ["2P", "3P", "1S", "1Z"]);
}

#[test]
fn copy_limit_from_script() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(dir.path());
    replay(&mut controller, &"add Mpu5z\n".repeat(5));
    assert_eq!(controller.selection().count_of("Mpu5z"), 4);
    assert_eq!(controller.selection().history_len(), 4);
}

#[test]
fn move_and_undo_from_script() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(dir.path());
    replay(&mut controller, "add 1m\nadd 2m\nadd 3m\nmove 0 2\n");
    assert_eq!(labels(&controller), ["2M", "3M", "1M"]);

    replay(&mut controller, "key backspace editable\n");
    assert_eq!(labels(&controller), ["2M", "3M", "1M"]);

    replay(&mut controller, "key backspace\n");
    assert_eq!(labels(&controller), ["1M", "2M", "3M"]);
}

#[tokio::test]
async fn exported_png_matches_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(dir.path());
    replay(&mut controller, "add 1p\nspacer\nadd 2p\nnewline\nadd 1q\n");

    let expected = controller.layout().scaled_size(2.0);
    let outcome = controller.export_image().await.unwrap();
    let path = dir.path().join("mahjong-selection.png");
    assert_eq!(outcome, ExportOutcome::Written(path.clone()));

    let image = Pixmap::load_png(&path).unwrap();
    assert_eq!((image.width(), image.height()), expected);

    // the spacer slot (second in the first row) is blank in the export
    let spacer = controller.layout().slots[1].rect;
    let (cx, cy) = ((spacer.x + spacer.w / 2) as u32 * 2, (spacer.y + spacer.h / 2) as u32 * 2);
    assert_eq!(image.pixel(cx, cy).unwrap().alpha(), 0);
    assert!(!controller.spacers_hidden());
}

#[tokio::test]
async fn default_export_keeps_line_break_bars() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        output_dir: dir.path().to_path_buf(),
        ..AppConfig::default()
    };
    let mut controller = AppController::with_rasterizer(config, Arc::new(TileRenderer::new()));
    replay(&mut controller, "add 1p\nnewline\nadd 2p\n");

    let scale = controller.config().export.scale;
    let bar = controller.layout().slots[1].rect;
    controller.export_image().await.unwrap();

    let image = Pixmap::load_png(dir.path().join("mahjong-selection.png")).unwrap();
    let (x, y) = (((bar.x + 5) as f32 * scale) as u32, ((bar.y + bar.h / 2) as f32 * scale) as u32);
    assert!(image.pixel(x, y).unwrap().alpha() > 0);
}

#[tokio::test]
async fn empty_selection_exports_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller(dir.path());
    replay(&mut controller, "spacer\nnewline\n");

    assert_eq!(controller.export_image().await.unwrap(), ExportOutcome::Skipped);
    assert!(!dir.path().join("mahjong-selection.png").exists());
}
