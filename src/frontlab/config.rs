//! Layered configuration.
//!
//! `defaults/frontlab.default.toml` is embedded into the binary so the documented
//! defaults and the runtime behavior stay in sync. Callers layer user files and key
//! overrides on top with [`Loader`] before deserializing into [`FrontlabConfig`].
//! Keyword tables are not configurable.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

use super::processor::OutputFormat;

const DEFAULT_TOML: &str = include_str!("../../defaults/frontlab.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct FrontlabConfig {
    pub trace: TraceConfig,
    pub quads: QuadConfig,
    pub output: OutputConfig,
}

/// How traces are recorded and rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct TraceConfig {
    pub enabled: bool,
    pub indent_width: usize,
    pub record_tokens: bool,
    pub summary: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuadConfig {
    pub temp_prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Builds a [FrontlabConfig] from the embedded defaults, then TOML files in the order
/// they are added, then key overrides. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let defaults = File::from_str(DEFAULT_TOML, FileFormat::Toml);
        Self {
            builder: Config::builder().add_source(defaults),
        }
    }

    /// A TOML file that must exist; `build` fails otherwise.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// A TOML file that is skipped when it does not exist.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    fn with_toml(mut self, path: &Path, required: bool) -> Self {
        let file = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(file);
        self
    }

    /// Set one dotted key, such as `trace.enabled` for `--no-trace`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<FrontlabConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<FrontlabConfig, ConfigError> {
    Loader::new().build()
}
