//! Configuration and settings management for the site plan annotator
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Designer defaults (icon and ruler sizes, label layout, surface size)
//! - Export preferences (pixel ratio, file name)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use siteplan_core::constants::{
    DEFAULT_EXPORT_FILE_NAME, DEFAULT_ICON_SIZE_PX, DEFAULT_PIXEL_RATIO,
    DEFAULT_RULER_OFFSET_PX, DEFAULT_SEPTIC_SCALE, DEFAULT_SURFACE_HEIGHT,
    DEFAULT_SURFACE_WIDTH, LABEL_FONT_SIZE, MIN_TRANSFORM_BOX_PX, RULER_LABEL_PADDING_PX,
    STRUCTURE_LABEL_OFFSET_PX,
};
use siteplan_designer::labels::LabelLayout;
use siteplan_designer::{Canvas, DesignerState, PlacementDefaults, SceneStyle};
use std::path::{Path, PathBuf};

/// Directory under the platform config dir that holds our files.
pub const CONFIG_DIR_NAME: &str = "siteplan";
/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Designer defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Edge length of new well and septic icons, in pixels
    pub icon_default_size_px: f64,
    /// Length of a new ruler, in pixels
    pub ruler_default_offset_px: f64,
    /// Visual scale of a new septic icon
    pub septic_default_scale: f64,
    /// Smallest box a resize may leave, in pixels
    pub min_transform_box_px: f64,
    /// Measurement label font size
    pub label_font_size: f64,
    /// Gap between a ruler and its label
    pub ruler_label_padding_px: f64,
    /// Gap between a structure edge and its label
    pub structure_label_offset_px: f64,
    /// Surface width before a background is loaded
    pub default_surface_width: u32,
    /// Surface height before a background is loaded
    pub default_surface_height: u32,
}

impl Default for DesignerSettings {
    fn default() -> Self {
        Self {
            icon_default_size_px: DEFAULT_ICON_SIZE_PX,
            ruler_default_offset_px: DEFAULT_RULER_OFFSET_PX,
            septic_default_scale: DEFAULT_SEPTIC_SCALE,
            min_transform_box_px: MIN_TRANSFORM_BOX_PX,
            label_font_size: LABEL_FONT_SIZE,
            ruler_label_padding_px: RULER_LABEL_PADDING_PX,
            structure_label_offset_px: STRUCTURE_LABEL_OFFSET_PX,
            default_surface_width: DEFAULT_SURFACE_WIDTH,
            default_surface_height: DEFAULT_SURFACE_HEIGHT,
        }
    }
}

/// Export preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output pixels per surface pixel
    pub pixel_ratio: f64,
    /// Suggested file name for exported images
    pub file_name: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pixel_ratio: DEFAULT_PIXEL_RATIO,
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl From<&DesignerSettings> for PlacementDefaults {
    fn from(settings: &DesignerSettings) -> Self {
        Self {
            icon_size_px: settings.icon_default_size_px,
            ruler_offset_px: settings.ruler_default_offset_px,
            septic_scale: settings.septic_default_scale,
            min_transform_box_px: settings.min_transform_box_px,
            ..PlacementDefaults::default()
        }
    }
}

impl From<&DesignerSettings> for SceneStyle {
    fn from(settings: &DesignerSettings) -> Self {
        Self {
            label_font_size: settings.label_font_size,
            labels: LabelLayout {
                structure_offset_px: settings.structure_label_offset_px,
                ruler_padding_px: settings.ruler_label_padding_px,
            },
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Designer defaults
    #[serde(default)]
    pub designer: DesignerSettings,
    /// Export preferences
    #[serde(default)]
    pub export: ExportSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config dir>/siteplan/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path` if it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let d = &self.designer;
        positive("designer.icon_default_size_px", d.icon_default_size_px)?;
        positive("designer.ruler_default_offset_px", d.ruler_default_offset_px)?;
        positive("designer.septic_default_scale", d.septic_default_scale)?;
        positive("designer.min_transform_box_px", d.min_transform_box_px)?;
        positive("designer.label_font_size", d.label_font_size)?;

        if !d.ruler_label_padding_px.is_finite() || !d.structure_label_offset_px.is_finite() {
            return Err(SettingsError::invalid(
                "designer",
                "label offsets must be finite",
            ));
        }

        if d.default_surface_width == 0 || d.default_surface_height == 0 {
            return Err(SettingsError::invalid(
                "designer.default_surface_width",
                "surface dimensions must be > 0",
            ));
        }

        positive("export.pixel_ratio", self.export.pixel_ratio)?;
        if self.export.file_name.trim().is_empty() {
            return Err(SettingsError::invalid(
                "export.file_name",
                "must not be empty",
            ));
        }

        Ok(())
    }

    /// Fresh designer state configured from these settings
    pub fn designer_state(&self) -> DesignerState {
        let mut state = DesignerState::with_defaults(
            PlacementDefaults::from(&self.designer),
            SceneStyle::from(&self.designer),
        );
        state.canvas = Canvas::with_size(
            self.designer.default_surface_width,
            self.designer.default_surface_height,
        );
        state
    }
}
