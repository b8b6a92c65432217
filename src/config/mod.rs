//! Configuration management for fig-generators
//!
//! This module loads generator definitions and driver settings from a TOML
//! file. Configuration precedence (highest to lowest):
//! 1. Command-line arguments
//! 2. Configuration file
//! 3. Default values
//!
//! Generators are declared under `[generators.<name>]` with a `kind` tag:
//!
//! ```toml
//! [generators.env]
//! kind = "key-value-list"
//! keys = ["HOME", "PATH"]
//! values = [{ name = "/usr", description = "system prefix" }]
//! cache = "keys"
//! insert_delimiter = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConfigError, GeneratorError, Result};
use crate::generator::{
    Generator, KeyValueConfig, KeyValueListConfig, Resolver, ValueListConfig, key_value,
    key_value_list, value_list,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Named generator definitions
    #[serde(default)]
    pub generators: BTreeMap<String, GeneratorSpec>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Output format (text, json)
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_color_output")]
    pub color_output: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One suggestion per line
    Text,

    /// Pretty-printed JSON document
    Json,
}

/// A generator declared in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GeneratorSpec {
    /// `value_list` generator
    ValueList(ValueListConfig),

    /// `key_value` generator
    KeyValue(KeyValueConfig),

    /// `key_value_list` generator
    KeyValueList(KeyValueListConfig),
}

// Default value functions
fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    false
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_color_output() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color_output: default_color_output(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file
    ///
    /// With `None`, the default path is used and a missing file yields the
    /// default configuration. An explicitly named file must exist.
    ///
    /// # Arguments
    /// * `path` - Optional path to the configuration file (TOML format)
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::FileNotFound(path.display().to_string()).into());
            }
            tracing::debug!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            generators = config.generators.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Get the default configuration file path
    ///
    /// # Returns
    /// * `PathBuf` - Path to default configuration file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fig-generators")
            .join("config.toml")
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    ///
    /// Markers must be non-empty, and a key/value list needs distinct
    /// separator and delimiter.
    ///
    /// # Returns
    /// * `Result<()>` - Ok if valid, error otherwise
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in &self.generators {
            spec.validate(name)?;
        }
        Ok(())
    }

    /// Look up a generator definition by name
    pub fn generator(&self, name: &str) -> Result<&GeneratorSpec> {
        self.generators
            .get(name)
            .ok_or_else(|| GeneratorError::UnknownGenerator(name.to_string()))
    }

    /// Build a configured generator
    ///
    /// # Arguments
    /// * `name` - Name of the `[generators.<name>]` entry
    /// * `resolver` - Shared resolver for the generator
    ///
    /// # Returns
    /// * `Result<Box<dyn Generator>>` - Generator or `UnknownGenerator`
    pub fn build_generator(
        &self,
        name: &str,
        resolver: &Arc<Resolver>,
    ) -> Result<Box<dyn Generator>> {
        Ok(self.generator(name)?.build(resolver))
    }
}

impl GeneratorSpec {
    /// Kind tag as written in the configuration file
    pub fn kind(&self) -> &'static str {
        match self {
            GeneratorSpec::ValueList(_) => "value-list",
            GeneratorSpec::KeyValue(_) => "key-value",
            GeneratorSpec::KeyValueList(_) => "key-value-list",
        }
    }

    /// Construct the generator described by this entry
    pub fn build(&self, resolver: &Arc<Resolver>) -> Box<dyn Generator> {
        match self {
            GeneratorSpec::ValueList(config) => Box::new(value_list(resolver, config.clone())),
            GeneratorSpec::KeyValue(config) => Box::new(key_value(resolver, config.clone())),
            GeneratorSpec::KeyValueList(config) => {
                Box::new(key_value_list(resolver, config.clone()))
            }
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        match self {
            GeneratorSpec::ValueList(config) => {
                require_marker(name, "delimiter", &config.delimiter)
            }
            GeneratorSpec::KeyValue(config) => {
                require_marker(name, "separator", &config.separator)
            }
            GeneratorSpec::KeyValueList(config) => {
                require_marker(name, "separator", &config.separator)?;
                require_marker(name, "delimiter", &config.delimiter)?;
                if config.separator == config.delimiter {
                    return Err(ConfigError::InvalidValue {
                        field: format!("generators.{name}.delimiter"),
                        value: config.delimiter.clone(),
                    }
                    .into());
                }
                Ok(())
            }
        }
    }
}

fn require_marker(name: &str, field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: format!("generators.{name}.{field}"),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

impl OutputFormat {
    /// Parse a format name, as given on the command line
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{CacheFlag, CacheRole};
    use crate::source::SourceKind;

    const SAMPLE: &str = r#"
[logging]
level = "debug"

[display]
format = "json"

[generators.colors]
kind = "value-list"
values = ["red", "green"]
insert_delimiter = true

[generators.env]
kind = "key-value"
keys = ["HOME", "PATH"]
cache = true

[generators.opts]
kind = "key-value-list"
separator = ":"
delimiter = ";"
keys = [{ name = "mode", description = "run mode" }]
values = ["fast", "slow"]
cache = "values"
"#;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(!config.logging.timestamps);
        assert_eq!(config.display.format, OutputFormat::Text);
        assert!(config.display.color_output);
        assert!(config.generators.is_empty());
    }

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert_eq!(config.generators.len(), 3);

        match config.generator("colors").unwrap() {
            GeneratorSpec::ValueList(c) => {
                assert_eq!(c.delimiter, ",");
                assert!(c.insert_delimiter);
                assert!(matches!(c.values.kind(), SourceKind::Names(n) if n.len() == 2));
            }
            other => panic!("Expected value-list, got {}", other.kind()),
        }

        match config.generator("env").unwrap() {
            GeneratorSpec::KeyValue(c) => {
                assert_eq!(c.separator, "=");
                assert_eq!(c.cache, CacheFlag::Flag(true));
                assert!(c.insert_separator);
            }
            other => panic!("Expected key-value, got {}", other.kind()),
        }

        match config.generator("opts").unwrap() {
            GeneratorSpec::KeyValueList(c) => {
                assert_eq!(c.separator, ":");
                assert_eq!(c.delimiter, ";");
                assert_eq!(c.cache, CacheFlag::Role(CacheRole::Values));
                assert!(matches!(c.keys.kind(), SourceKind::Rich(_)));
            }
            other => panic!("Expected key-value-list, got {}", other.kind()),
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = Config::from_toml_str("[generators.x]\nkind = \"fuzzy\"\n").unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Config(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_marker() {
        let config =
            Config::from_toml_str("[generators.x]\nkind = \"key-value\"\nseparator = \"\"\n")
                .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_equal_markers() {
        let config = Config::from_toml_str(
            "[generators.x]\nkind = \"key-value-list\"\nseparator = \",\"\ndelimiter = \",\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_sample() {
        assert!(Config::from_toml_str(SAMPLE).unwrap().validate().is_ok());
    }

    #[test]
    fn test_unknown_generator() {
        let config = Config::default();
        let resolver = Resolver::shared();
        assert!(matches!(
            config.build_generator("missing", &resolver),
            Err(GeneratorError::UnknownGenerator(name)) if name == "missing"
        ));
    }

    #[tokio::test]
    async fn test_build_generator_from_file_definition() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        let resolver = Resolver::shared();
        let generator = config.build_generator("opts", &resolver).unwrap();

        let keys = generator.custom(&["mo".to_string()], &[]).await.unwrap();
        assert_eq!(keys[0].insertion_text(), "mode:");
        assert!(keys[0].field("description").is_some());

        assert_eq!(generator.query_term("mode:fa"), "fa");
        let values = generator.custom(&["mode:fa".to_string()], &[]).await.unwrap();
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load_from_file(Some(Path::new("/nonexistent/fig.toml"))).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Config(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("fig-generators-{}.toml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();

        let config = Config::load_from_file(Some(path.as_path())).unwrap();
        assert_eq!(config.generators.len(), 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_to_toml_round_trip() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        let rendered = config.to_toml().unwrap();
        let reparsed = Config::from_toml_str(&rendered).unwrap();
        assert_eq!(reparsed.generators.len(), 3);
        assert_eq!(reparsed.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("table"), None);
    }
}
