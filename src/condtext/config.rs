//! Configuration loading
//!
//! `defaults/condtext.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Applications layer user-specific files on top of those defaults via
//! [`Loader`] before deserializing into [`CondtextConfig`].
//!
//! The library pipeline never reads configuration on its own: callers turn the loaded config
//! into [`PreprocessOptions`] and [`DefinedSymbols`] and pass them to each run.

use crate::condtext::generation::UnsupportedOperatorPolicy;
use crate::condtext::lexing::FallbackEol;
use crate::condtext::processor::PreprocessOptions;
use crate::condtext::symbols::DefinedSymbols;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/condtext.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CondtextConfig {
    pub symbols: SymbolsConfig,
    pub evaluation: EvaluationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsConfig {
    #[serde(default)]
    pub defined: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationConfig {
    pub unsupported_operators: UnsupportedOperatorPolicy,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub fallback_eol: FallbackEol,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl CondtextConfig {
    pub fn options(&self) -> PreprocessOptions {
        PreprocessOptions {
            unsupported_operators: self.evaluation.unsupported_operators,
            fallback_eol: self.output.fallback_eol,
        }
    }

    pub fn symbols(&self) -> DefinedSymbols {
        self.symbols.defined.iter().cloned().collect()
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CondtextConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CondtextConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.symbols.defined.is_empty());
        assert_eq!(
            config.evaluation.unsupported_operators,
            UnsupportedOperatorPolicy::Warn
        );
        assert_eq!(config.output.fallback_eol, FallbackEol::Platform);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.options(), PreprocessOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("evaluation.unsupported_operators", "deny")
            .expect("override to apply")
            .set_override("output.fallback_eol", "crlf")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(
            config.options().unsupported_operators,
            UnsupportedOperatorPolicy::Deny
        );
        assert_eq!(config.options().fallback_eol, FallbackEol::CrLf);
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[symbols]\ndefined = [\"DEBUG\", \"TRACE\"]").expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        let symbols = config.symbols();
        assert!(symbols.is_defined("DEBUG"));
        assert!(symbols.is_defined("TRACE"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/condtext.toml")
            .build()
            .expect("config to build");
        assert!(config.symbols.defined.is_empty());
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new()
            .with_file("/nonexistent/condtext.toml")
            .build()
            .is_err());
    }
}
