//! Configuration for the tlcp binary.
//!
//! Layers, lowest first: the embedded `defaults/tlcp.default.toml`, an optional
//! `--config` file, then command-line flags. [`Loader`] stacks them and
//! deserializes the result into [`TlcpConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use tlcp_expand::MaterializeOptions;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/tlcp.default.toml");

/// Top-level configuration consumed by tlcp applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TlcpConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub companions: CompanionsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub models_dir: String,
}

/// Companion stubs and auxiliary copies written next to each configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanionsConfig {
    pub enabled: bool,
    pub auxiliary_extension: String,
}

impl TlcpConfig {
    /// Materializer policy described by this configuration.
    pub fn materialize_options(&self) -> MaterializeOptions {
        MaterializeOptions {
            companions: self.companions.enabled,
            auxiliary_extension: self
                .companions
                .auxiliary_extension
                .trim_start_matches('.')
                .to_string(),
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Turn companions on regardless of what the layered files say (`--companions`).
    pub fn enable_companions(mut self) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override("companions.enabled", true)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TlcpConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
