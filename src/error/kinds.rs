use std::{fmt, io};

/// Crate-wide `Result` type using [`GeneratorError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations, including
/// suggestion providers.
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Top-level error type for generator operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum GeneratorError {
    /// A suggestion provider failed while resolving a source.
    Provider(ProviderError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Serialization or deserialization failed.
    Serialization(String),

    /// No generator with the given name is configured.
    UnknownGenerator(String),
}

/// Errors raised by suggestion providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider could not produce suggestions.
    Failed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Provider(e) => write!(f, "Provider error: {e}"),
            GeneratorError::Config(e) => write!(f, "Configuration error: {e}"),
            GeneratorError::Io(e) => write!(f, "I/O error: {e}"),
            GeneratorError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            GeneratorError::UnknownGenerator(name) => write!(f, "Unknown generator: {name}"),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Failed(msg) => write!(f, "Failed to provide suggestions: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::Provider(e) => Some(e),
            GeneratorError::Config(e) => Some(e),
            GeneratorError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ProviderError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to GeneratorError ========================= */

impl From<io::Error> for GeneratorError {
    fn from(err: io::Error) -> Self {
        GeneratorError::Io(err)
    }
}

impl From<ProviderError> for GeneratorError {
    fn from(err: ProviderError) -> Self {
        GeneratorError::Provider(err)
    }
}

impl From<ConfigError> for GeneratorError {
    fn from(err: ConfigError) -> Self {
        GeneratorError::Config(err)
    }
}

impl From<toml::de::Error> for GeneratorError {
    fn from(err: toml::de::Error) -> Self {
        GeneratorError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for GeneratorError {
    fn from(err: toml::ser::Error) -> Self {
        GeneratorError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for GeneratorError {
    fn from(err: serde_json::Error) -> Self {
        GeneratorError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err: GeneratorError = ProviderError::Failed("git not found".into()).into();
        assert_eq!(
            err.to_string(),
            "Provider error: Failed to provide suggestions: git not found"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "separator".into(),
            value: "".into(),
        };
        assert_eq!(err.to_string(), "Invalid value '' for field 'separator'");
    }

    #[test]
    fn test_toml_error_maps_to_invalid_format() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: GeneratorError = parse.unwrap_err().into();
        assert!(matches!(
            err,
            GeneratorError::Config(ConfigError::InvalidFormat(_))
        ));
    }
}
