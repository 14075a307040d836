//! CLI - Command-line argument parsing and text output
//!
//! Defines the CLI structure using clap and the plain-text views printed by
//! the commands. Execution lives in main.rs.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use mahjong_tiles::config::{AppConfig, ExportOptions};
use mahjong_tiles::domain::catalog::{SUIT_ORDER, catalog};
use mahjong_tiles::domain::rows::LayoutLine;
use mahjong_tiles::domain::selection::Selection;

/// Mahjong tile layout composer
#[derive(Parser)]
#[command(name = "mahjong-tiles")]
#[command(about = "Arrange Mahjong tiles and export the layout as a PNG image", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory containing tiles/*.png
    #[arg(long, global = true)]
    pub assets: Option<PathBuf>,

    /// Directory the image is written into
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,

    /// Export scale (device pixels per layout pixel)
    #[arg(long, global = true)]
    pub scale: Option<f32>,

    /// Fill the background instead of leaving it transparent
    #[arg(long, global = true)]
    pub opaque: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List every tile in the catalog
    Catalog,

    /// Apply a command script and print the resulting layout
    Run {
        /// Script file; reads stdin when omitted
        script: Option<PathBuf>,

        /// Export the image after the script finishes
        #[arg(long)]
        export: bool,
    },
}

impl Cli {
    /// Applies command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(assets) = &self.assets {
            config.assets_dir = assets.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(scale) = self.scale {
            config.export.scale = ExportOptions::sanitize_scale(scale);
        }
        if self.opaque {
            config.export.transparent_background = false;
        }
        config
    }
}

/// Catalog grouped by suit, one line per suit
pub fn format_catalog() -> String {
    let mut out = String::new();
    for suit in SUIT_ORDER {
        let tiles: Vec<String> = catalog()
            .by_suit(suit)
            .map(|tile| format!("{} ({}, x{})", tile.name, tile.id, tile.max_copies))
            .collect();
        let _ = writeln!(out, "{suit}: {}", tiles.join("  "));
    }
    out
}

/// Rows of the selection, with item indices, followed by a tile count
pub fn format_selection(selection: &Selection) -> String {
    let mut out = String::new();
    for line in selection.layout_lines() {
        match line {
            LayoutLine::Row(slots) => {
                let cells: Vec<String> = slots
                    .iter()
                    .map(|slot| format!("{}:{}", slot.index, slot.item.label()))
                    .collect();
                let _ = writeln!(out, "| {}", cells.join(" "));
            }
            LayoutLine::Break(slot) => {
                let _ = writeln!(out, "+-- {}", slot.index);
            }
        }
    }
    let _ = writeln!(
        out,
        "{} tiles, {} items, {} undo steps",
        selection.total_tile_count(),
        selection.len(),
        selection.history_len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "mahjong-tiles",
            "--scale",
            "9",
            "--opaque",
            "--output",
            "out",
            "catalog",
        ]);
        let config = cli.apply_overrides(AppConfig::default());
        assert_eq!(config.export.scale, ExportOptions::MAX_SCALE);
        assert!(!config.export.transparent_background);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn run_accepts_script_and_export_flag() {
        let cli = Cli::parse_from(["mahjong-tiles", "run", "layout.txt", "--export"]);
        match cli.command {
            Commands::Run { script, export } => {
                assert_eq!(script, Some(PathBuf::from("layout.txt")));
                assert!(export);
            }
            Commands::Catalog => panic!("expected run"),
        }
    }

    #[test]
    fn catalog_lists_every_suit() {
        let text = format_catalog();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("5Z (Mpu5z, x4)"));
        assert!(text.contains("8Q (Mpu8q, x1)"));
    }

    #[test]
    fn selection_rows_are_printed() {
        let mut selection = Selection::new();
        selection.add_tile("Mpu1p");
        selection.add_line_break();
        selection.add_tile("Mpu2s");
        selection.add_spacer();

        let text = format_selection(&selection);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "| 0:1P");
        assert_eq!(lines[1], "+-- 1");
        assert_eq!(lines[2], "| 2:2S 3:_");
        assert_eq!(lines[3], "2 tiles, 4 items, 4 undo steps");
    }
}
