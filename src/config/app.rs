use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Fixed name of the exported image
pub const EXPORT_FILE_NAME: &str = "mahjong-selection.png";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Options handed to the rasterizer
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Leave the canvas transparent instead of filling the background
    pub transparent_background: bool,
    /// Device pixels per layout pixel
    pub scale: f32,
}

impl ExportOptions {
    pub const MIN_SCALE: f32 = 0.5;
    pub const MAX_SCALE: f32 = 4.0;

    pub fn sanitize_scale(scale: f32) -> f32 {
        if scale.is_finite() {
            scale.clamp(Self::MIN_SCALE, Self::MAX_SCALE)
        } else {
            Self::default().scale
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            transparent_background: true,
            scale: 2.0,
        }
    }
}

/// Pixel metrics of the selection layout, before scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Horizontal space between slots
    pub gap: u32,
    /// Vertical space between rows
    pub row_gap: u32,
    /// Margin around the whole selection
    pub padding: u32,
    /// Height reserved for a line-break marker
    pub line_break_height: u32,
    /// Draw line-break bars in exported images
    pub show_line_breaks: bool,
}

impl LayoutConfig {
    pub const MIN_TILE: u32 = 16;
    pub const MAX_TILE: u32 = 512;
    pub const MAX_SPACING: u32 = 128;

    pub fn sanitize_tile_dimension(value: u32) -> u32 {
        value.clamp(Self::MIN_TILE, Self::MAX_TILE)
    }

    pub fn sanitize_spacing(value: u32) -> u32 {
        value.min(Self::MAX_SPACING)
    }

    /// Returns a copy with every metric clamped into range
    pub fn sanitized(&self) -> Self {
        Self {
            tile_width: Self::sanitize_tile_dimension(self.tile_width),
            tile_height: Self::sanitize_tile_dimension(self.tile_height),
            gap: Self::sanitize_spacing(self.gap),
            row_gap: Self::sanitize_spacing(self.row_gap),
            padding: Self::sanitize_spacing(self.padding),
            line_break_height: Self::sanitize_spacing(self.line_break_height),
            show_line_breaks: self.show_line_breaks,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_width: 60,
            tile_height: 80,
            gap: 4,
            row_gap: 8,
            padding: 12,
            line_break_height: 6,
            show_line_breaks: true,
        }
    }
}

/// Application settings, read from an optional TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root that catalog image paths are relative to
    pub assets_dir: PathBuf,
    /// Directory the exported image is written into
    pub output_dir: PathBuf,
    /// Font used to label placeholder tiles when an image is missing
    pub font_path: Option<PathBuf>,
    pub layout: LayoutConfig,
    pub export: ExportOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("."),
            font_path: None,
            layout: LayoutConfig::default(),
            export: ExportOptions::default(),
        }
    }
}

impl AppConfig {
    /// Parses TOML text and sanitizes the result
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Loads a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn sanitized(mut self) -> Self {
        self.layout = self.layout.sanitized();
        self.export.scale = ExportOptions::sanitize_scale(self.export.scale);
        self
    }

    /// Full path of the exported image
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_export_contract() {
        let config = AppConfig::default();
        assert!(config.export.transparent_background);
        assert_eq!(config.export.scale, 2.0);
        assert!(config.layout.show_line_breaks);
        assert_eq!(config.export_path(), PathBuf::from(".").join("mahjong-selection.png"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let text = r#"
            assets_dir = "assets"

            [layout]
            tile_width = 48

            show_line_breaks = false

            [export]
            transparent_background = false
        "#;
        let config = AppConfig::from_toml_str(text, Path::new("test.toml")).unwrap();
        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.layout.tile_width, 48);
        assert_eq!(config.layout.tile_height, LayoutConfig::default().tile_height);
        assert!(!config.layout.show_line_breaks);
        assert!(!config.export.transparent_background);
        assert_eq!(config.export.scale, 2.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let text = r#"
            [layout]
            tile_width = 2
            tile_height = 4000
            gap = 1000

            [export]
            scale = 12.0
        "#;
        let config = AppConfig::from_toml_str(text, Path::new("test.toml")).unwrap();
        assert_eq!(config.layout.tile_width, LayoutConfig::MIN_TILE);
        assert_eq!(config.layout.tile_height, LayoutConfig::MAX_TILE);
        assert_eq!(config.layout.gap, LayoutConfig::MAX_SPACING);
        assert_eq!(config.export.scale, ExportOptions::MAX_SCALE);
    }

    #[test]
    fn non_finite_scale_falls_back_to_default() {
        assert_eq!(ExportOptions::sanitize_scale(f32::NAN), 2.0);
        assert_eq!(ExportOptions::sanitize_scale(0.1), ExportOptions::MIN_SCALE);
    }

    #[test]
    fn invalid_toml_reports_path() {
        let err = AppConfig::from_toml_str("layout = 3", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = AppConfig::load(Path::new("/nonexistent/mahjong.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
