//! Argument-completion generators
//!
//! This library builds completion generators for command-line tokens that
//! hold lists of values (`a,b,c`), a key/value pair (`key=value`), or a
//! delimited list of pairs (`k1=v1,k2=v2`). Each generator decides when
//! suggestions must be recomputed, which fragment of the token is matched
//! against them, and which suggestions to offer, resolving key and value
//! sources through a shared, single-flight cache.
//!
//! # Modules
//!
//! - `boundary`: Marker search and query-term extraction
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `generator`: The three generator factories
//! - `resolver`: Suggestion resolution and caching
//! - `source`: Static and provider-backed suggestion sources
//! - `suggestion`: Suggestion records
//!
//! # Example
//!
//! ```
//! use fig_generators::{Generator, Resolver, ValueListConfig, value_list};
//!
//! # tokio_test::block_on(async {
//! let resolver = Resolver::shared();
//! let generator = value_list(
//!     &resolver,
//!     ValueListConfig {
//!         values: vec!["red", "green"].into(),
//!         insert_delimiter: true,
//!         ..Default::default()
//!     },
//! );
//!
//! assert_eq!(generator.query_term("red,gr"), "gr");
//! assert!(generator.trigger("red,", "red"));
//!
//! let suggestions = generator.custom(&["red,".to_string()], &[]).await?;
//! assert_eq!(suggestions[1].insertion_text(), "green,");
//! # Ok::<(), fig_generators::GeneratorError>(())
//! # }).unwrap();
//! ```

pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod resolver;
pub mod source;
pub mod suggestion;

// Re-export commonly used types
pub use config::Config;
pub use error::{GeneratorError, Result};
pub use generator::{
    CacheFlag, CacheRole, Generator, KeyValueConfig, KeyValueListConfig, ValueListConfig,
    key_value, key_value_list, value_list,
};
pub use resolver::Resolver;
pub use source::{FnProvider, SuggestionProvider, SuggestionSource};
pub use suggestion::{RichList, Suggestion};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
