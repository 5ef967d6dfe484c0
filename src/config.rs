// src/config.rs - Toolkit configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::annotation::CosmeticsConfig;
use crate::error::{ResultExt, ToolkitError, ToolkitResult};
use crate::geometry::DEFAULT_SNAP_STEP_DEGREES;
use crate::style::Theme;

/// Toolkit configuration, stored as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    /// Info panel theme
    pub theme: Theme,

    /// Angle snap step used while the modifier is held
    pub snap_step_degrees: f64,

    /// Suffix appended to distance labels
    pub distance_unit: String,

    /// Overlay sizes and their zoom floors
    pub cosmetics: CosmeticsConfig,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            snap_step_degrees: DEFAULT_SNAP_STEP_DEGREES,
            distance_unit: " px".to_string(),
            cosmetics: CosmeticsConfig::default(),
        }
    }
}

impl ToolkitConfig {
    /// Default location: `<config dir>/pixscope/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pixscope").join("config.json"))
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ToolkitResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context_lazy(|| format!("reading config {}", path.display()))?;
        let config: ToolkitConfig = serde_json::from_str(&json)
            .with_context_lazy(|| format!("parsing config {}", path.display()))?;

        config.validate()?;
        debug!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ToolkitResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context_lazy(|| format!("writing config {}", path.display()))?;

        info!("💾 Saved config to {}", path.display());
        Ok(())
    }

    /// Load from an explicit path, or from the default path if it exists.
    ///
    /// An explicit path must load. A missing or broken default file falls
    /// back to defaults with a warning.
    pub fn load_or_default(path: Option<&Path>) -> ToolkitResult<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => match Self::load(&default) {
                Ok(config) => Ok(config),
                Err(e) => {
                    warn!("⚠️ Ignoring config {}: {}", default.display(), e);
                    Ok(Self::default())
                }
            },
            _ => Ok(Self::default()),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> ToolkitResult<()> {
        if !(self.snap_step_degrees > 0.0 && self.snap_step_degrees <= 180.0) {
            return Err(ToolkitError::config(format!(
                "snap_step_degrees must be in (0, 180], got {}",
                self.snap_step_degrees
            )));
        }

        let c = &self.cosmetics;
        let sizes = [
            ("stroke_width", c.stroke_width),
            ("stroke_width_min", c.stroke_width_min),
            ("font_size", c.font_size),
            ("font_size_min", c.font_size_min),
            ("label_offset", c.label_offset),
            ("label_offset_min", c.label_offset_min),
            ("arc_radius", c.arc_radius),
            ("arc_radius_min", c.arc_radius_min),
            ("label_radius_factor", c.label_radius_factor),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ToolkitError::config(format!(
                    "cosmetics.{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
