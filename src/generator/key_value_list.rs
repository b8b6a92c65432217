//! Delimited key/value list generator (`k1=v1,k2=v2,...`)

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    CacheFlag, Generator, current_token, default_delimiter, default_insert_separator,
    default_separator, should_cache, suffix_if,
};
use crate::boundary;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::source::SuggestionSource;
use crate::suggestion::RichList;

/// Configuration for [`key_value_list`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValueListConfig {
    /// Marker between key and value
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Marker between pairs
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Keys to suggest
    #[serde(default)]
    pub keys: SuggestionSource,

    /// Values to suggest
    #[serde(default)]
    pub values: SuggestionSource,

    /// Cache provider-backed keys, values, or both
    #[serde(default)]
    pub cache: CacheFlag,

    /// Append the separator to key insertion texts
    #[serde(default = "default_insert_separator")]
    pub insert_separator: bool,

    /// Append the delimiter to value insertion texts
    #[serde(default)]
    pub insert_delimiter: bool,
}

impl Default for KeyValueListConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            delimiter: default_delimiter(),
            keys: SuggestionSource::default(),
            values: SuggestionSource::default(),
            cache: CacheFlag::default(),
            insert_separator: default_insert_separator(),
            insert_delimiter: false,
        }
    }
}

/// Generator for a delimited list of key/value pairs
pub struct KeyValueListGenerator {
    resolver: Arc<Resolver>,
    config: KeyValueListConfig,
}

/// Build a key/value list generator
///
/// # Arguments
/// * `resolver` - Shared resolver whose cache the generator uses
/// * `config` - Markers, key and value sources, caching and insertion options
pub fn key_value_list(
    resolver: &Arc<Resolver>,
    config: KeyValueListConfig,
) -> KeyValueListGenerator {
    KeyValueListGenerator {
        resolver: resolver.clone(),
        config,
    }
}

impl KeyValueListGenerator {
    /// The configuration this generator was built with
    pub fn config(&self) -> &KeyValueListConfig {
        &self.config
    }

    fn markers(&self) -> [&str; 2] {
        [self.config.separator.as_str(), self.config.delimiter.as_str()]
    }

    /// Whether the token is completing a key
    ///
    /// True at the start of input and right after a delimiter; false right
    /// after a separator. Classification follows the marker found by
    /// [`boundary::last_index_of`], so one marker may prefix the other.
    pub fn is_key_position(&self, token: &str) -> bool {
        match boundary::last_index_of(token, &self.markers()) {
            None => true,
            Some((_, marker)) => marker == self.config.delimiter,
        }
    }
}

#[async_trait]
impl Generator for KeyValueListGenerator {
    fn trigger(&self, new_token: &str, old_token: &str) -> bool {
        boundary::last_marker_moved(&self.markers(), new_token, old_token)
    }

    fn query_term<'t>(&self, token: &'t str) -> &'t str {
        boundary::after_last_marker(&self.markers(), token)
    }

    async fn custom(&self, tokens: &[String], extra: &[Value]) -> Result<RichList> {
        let token = current_token(tokens);

        if self.is_key_position(token) {
            debug!(token, "Completing key");
            let append = suffix_if(self.config.insert_separator, &self.config.separator);
            self.resolver
                .resolve(
                    &self.config.keys,
                    append,
                    should_cache(true, self.config.cache),
                    tokens,
                    extra,
                )
                .await
        } else {
            debug!(token, "Completing value");
            let append = suffix_if(self.config.insert_delimiter, &self.config.delimiter);
            self.resolver
                .resolve(
                    &self.config.values,
                    append,
                    should_cache(false, self.config.cache),
                    tokens,
                    extra,
                )
                .await
        }
    }
}
