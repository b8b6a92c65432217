//! Key/value pair generator (`key=value`)
//!
//! Key or value mode is decided by plain containment: if the separator occurs
//! anywhere in the current token, the token is completing a value. A value
//! that itself contains the separator cannot be told apart from the boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{
    CacheFlag, Generator, current_token, default_insert_separator, default_separator,
    should_cache, suffix_if,
};
use crate::boundary;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::source::SuggestionSource;
use crate::suggestion::RichList;

/// Configuration for [`key_value`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyValueConfig {
    /// Marker between key and value
    #[serde(default = "default_separator")]
    pub separator: String,

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
}

impl Default for KeyValueConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            keys: SuggestionSource::default(),
            values: SuggestionSource::default(),
            cache: CacheFlag::default(),
            insert_separator: default_insert_separator(),
        }
    }
}

/// Generator for a single key/value pair
pub struct KeyValueGenerator {
    resolver: Arc<Resolver>,
    config: KeyValueConfig,
}

/// Build a key/value generator
///
/// # Arguments
/// * `resolver` - Shared resolver whose cache the generator uses
/// * `config` - Separator, key and value sources, caching and insertion options
pub fn key_value(resolver: &Arc<Resolver>, config: KeyValueConfig) -> KeyValueGenerator {
    KeyValueGenerator {
        resolver: resolver.clone(),
        config,
    }
}

impl KeyValueGenerator {
    /// The configuration this generator was built with
    pub fn config(&self) -> &KeyValueConfig {
        &self.config
    }

    /// Whether the token is completing a key
    pub fn is_key_position(&self, token: &str) -> bool {
        !token.contains(self.config.separator.as_str())
    }
}

#[async_trait]
impl Generator for KeyValueGenerator {
    fn trigger(&self, new_token: &str, old_token: &str) -> bool {
        boundary::first_marker_moved(&self.config.separator, new_token, old_token)
    }

    fn query_term<'t>(&self, token: &'t str) -> &'t str {
        boundary::after_first_marker(&self.config.separator, token)
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
            self.resolver
                .resolve(
                    &self.config.values,
                    "",
                    should_cache(false, self.config.cache),
                    tokens,
                    extra,
                )
                .await
        }
    }
}
