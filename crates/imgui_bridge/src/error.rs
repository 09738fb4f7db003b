//! Plugin errors

use crate::config::ConfigError;
use crate::render::GpuError;
use thiserror::Error;

/// Errors raised while setting up the ImGui plugin
///
/// None of these escape the lifecycle hooks: the plugin logs them and keeps
/// running with the UI invisible.
#[derive(Error, Debug)]
pub enum PluginError {
    /// GPU resource failure
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),

    /// Font atlas pixel buffer does not match its dimensions
    #[error("Font atlas is {width}x{height} but has {len} bytes of RGBA data")]
    FontAtlasSize {
        /// Atlas width
        width: u32,
        /// Atlas height
        height: u32,
        /// Actual byte length
        len: usize,
    },

    /// Another UI context is still alive in this process
    #[error("An ImGui context is already active")]
    ContextAlreadyActive,

    /// Invalid plugin configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
