//! Shared configuration loader for the goon toolchain.
//!
//! `defaults/goon.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`GoonConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use goon_parser::goon::formats::OutputFormat;
use goon_parser::goon::grammar::ExpressionGrammar;
use goon_parser::SessionLimits;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/goon.default.toml");

/// Top-level configuration consumed by goon applications.
#[derive(Debug, Clone, Deserialize)]
pub struct GoonConfig {
    pub session: SessionConfig,
    pub output: OutputConfig,
}

/// Caps applied to every parse session. Zero means unbounded for the stack and symbol
/// caps; the grammar bounds are always enforced.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub max_stack_depth: usize,
    pub max_symbols: usize,
    pub max_nesting: usize,
    pub max_depth: usize,
}

impl SessionConfig {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            max_stack_depth: cap(self.max_stack_depth),
            max_symbols: cap(self.max_symbols),
        }
    }

    pub fn grammar(&self) -> ExpressionGrammar {
        ExpressionGrammar::new()
            .with_max_nesting(self.max_nesting)
            .with_max_depth(self.max_depth)
    }
}

fn cap(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormatName,
    pub show_values: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormatName {
    Treeviz,
    Tag,
    Json,
    Yaml,
}

impl From<OutputFormatName> for OutputFormat {
    fn from(name: OutputFormatName) -> Self {
        match name {
            OutputFormatName::Treeviz => OutputFormat::Treeviz,
            OutputFormatName::Tag => OutputFormat::Tag,
            OutputFormatName::Json => OutputFormat::Json,
            OutputFormatName::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Builds a [GoonConfig] from layered sources, later layers winning:
///
/// 1. the embedded `goon.default.toml`
/// 2. `--config` files, in the order they are added
/// 3. single-key overrides such as `session.max_stack_depth` from command-line flags
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layers a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Layers a TOML file if it exists, e.g. a per-user `goon.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Sets one dotted key, e.g. `output.format` or `session.max_symbols`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merges every layer. Unknown format names and mistyped caps fail here.
    pub fn build(self) -> Result<GoonConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in session and output settings, with nothing layered on top.
pub fn load_defaults() -> Result<GoonConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.session.max_stack_depth, 1024);
        assert_eq!(config.session.limits(), SessionLimits::default());
        assert_eq!(config.session.grammar().max_nesting(), 256);
        assert_eq!(config.session.grammar().max_depth(), 512);
        assert_eq!(config.output.format, OutputFormatName::Treeviz);
        assert!(config.output.show_values);
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("session.max_symbols", 0i64)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(OutputFormat::from(config.output.format), OutputFormat::Json);
        assert_eq!(config.session.limits().max_symbols, None);
        assert_eq!(config.session.limits().max_stack_depth, Some(1024));
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file to be created");
        writeln!(file, "[session]\nmax_stack_depth = 8\nmax_depth = 64").unwrap();

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert_eq!(config.session.limits().max_stack_depth, Some(8));
        assert_eq!(config.session.max_symbols, 1024);
        assert_eq!(config.session.grammar().max_depth(), 64);
    }

    #[test]
    fn rejects_unknown_output_format() {
        assert!(Loader::new()
            .set_override("output.format", "xml")
            .expect("override to apply")
            .build()
            .is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here/goon.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormatName::Treeviz);
    }

    #[test]
    fn missing_required_file_errors() {
        assert!(Loader::new()
            .with_file("/definitely/not/here/goon.toml")
            .build()
            .is_err());
    }
}
