//! # ImGui Plugin Configuration
//!
//! Toggles and setup parameters for the ImGui plugin. The three runtime
//! toggles (`enabled`, `read_input`, `render_ui`) are only initial values; the
//! plugin exposes setters to flip them while running.

use super::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Default debug name of the font atlas GPU texture
pub const DEFAULT_FONT_ATLAS_NAME: &str = "ImGui.FontAtlas";

/// Settings for [`crate::ImGuiPlugin`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImGuiPluginConfig {
    /// Master switch; when off no UI frame is opened at all
    pub enabled: bool,
    /// Forward host mouse, keyboard and text input to the UI
    pub read_input: bool,
    /// Generate and draw the UI each tick
    pub render_ui: bool,
    /// Enable keyboard navigation between widgets
    pub keyboard_navigation: bool,
    /// Debug name given to the font atlas texture
    pub font_atlas_name: String,
    /// Where the UI library persists window layout; `None` disables it
    pub ini_filename: Option<String>,
}

impl ImGuiPluginConfig {
    /// Create a configuration with all toggles on
    pub fn new() -> Self {
        Self {
            enabled: true,
            read_input: true,
            render_ui: true,
            keyboard_navigation: true,
            font_atlas_name: DEFAULT_FONT_ATLAS_NAME.to_string(),
            ini_filename: None,
        }
    }

    /// Set the master switch
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set whether host input is forwarded
    pub fn with_input(mut self, read_input: bool) -> Self {
        self.read_input = read_input;
        self
    }

    /// Set whether the UI is rendered
    pub fn with_rendering(mut self, render_ui: bool) -> Self {
        self.render_ui = render_ui;
        self
    }

    /// Set keyboard navigation
    pub fn with_keyboard_navigation(mut self, enabled: bool) -> Self {
        self.keyboard_navigation = enabled;
        self
    }

    /// Persist window layout to the given file
    pub fn with_ini_filename(mut self, path: impl Into<String>) -> Self {
        self.ini_filename = Some(path.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font_atlas_name.trim().is_empty() {
            return Err(ConfigError::Invalid("font atlas name cannot be empty".to_string()));
        }
        if self.ini_filename.as_deref().is_some_and(|path| path.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "ini filename cannot be empty; use None to disable it".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ImGuiPluginConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ImGuiPluginConfig {}
