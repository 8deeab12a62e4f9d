//! Centralized carousel options with TOML preset support.
//!
//! All tweakable settings (camera framing, arcball feel, sphere/disc
//! layout, atlas sizing) are consolidated here. Options serialize
//! to/from TOML so a host can ship tuned presets.

mod atlas;
mod camera;
mod control;
mod layout;

use std::path::Path;

pub use atlas::AtlasOptions;
pub use camera::CameraOptions;
pub use control::ControlOptions;
pub use layout::LayoutOptions;
use serde::{Deserialize, Serialize};

use crate::error::MenuError;

/// Top-level options container. All sub-structs use `#[serde(default)]`
/// so partial TOML files (e.g. only overriding `[control]`) work
/// correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct MenuOptions {
    /// Camera framing and dolly parameters.
    pub camera: CameraOptions,
    /// Arcball rotation feel parameters.
    pub control: ControlOptions,
    /// Sphere and disc layout parameters.
    pub layout: LayoutOptions,
    /// Texture atlas sizing parameters.
    pub atlas: AtlasOptions,
}

impl MenuOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Io`] when the file cannot be read and
    /// [`MenuError::Options`] when it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, MenuError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| MenuError::Options(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::Options`] when serialization fails and
    /// [`MenuError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), MenuError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MenuError::Options(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}
