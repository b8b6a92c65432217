//! Delimited value list generator (`v1,v2,...`)

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use super::{Generator, default_delimiter, suffix_if};
use crate::boundary;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::source::SuggestionSource;
use crate::suggestion::RichList;

/// Configuration for [`value_list`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueListConfig {
    /// Marker between values
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Values to suggest
    #[serde(default)]
    pub values: SuggestionSource,

    /// Cache provider-backed values
    #[serde(default)]
    pub cache: bool,

    /// Append the delimiter to each insertion text
    #[serde(default)]
    pub insert_delimiter: bool,
}

impl Default for ValueListConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            values: SuggestionSource::default(),
            cache: false,
            insert_delimiter: false,
        }
    }
}

/// Generator for a delimited list of values
pub struct ValueListGenerator {
    resolver: Arc<Resolver>,
    config: ValueListConfig,
}

/// Build a value list generator
///
/// # Arguments
/// * `resolver` - Shared resolver whose cache the generator uses
/// * `config` - Delimiter, value source and insertion options
pub fn value_list(resolver: &Arc<Resolver>, config: ValueListConfig) -> ValueListGenerator {
    ValueListGenerator {
        resolver: resolver.clone(),
        config,
    }
}

impl ValueListGenerator {
    /// The configuration this generator was built with
    pub fn config(&self) -> &ValueListConfig {
        &self.config
    }
}

#[async_trait]
impl Generator for ValueListGenerator {
    fn trigger(&self, new_token: &str, old_token: &str) -> bool {
        boundary::first_marker_moved(&self.config.delimiter, new_token, old_token)
    }

    fn query_term<'t>(&self, token: &'t str) -> &'t str {
        boundary::after_first_marker(&self.config.delimiter, token)
    }

    async fn custom(&self, tokens: &[String], extra: &[Value]) -> Result<RichList> {
        let append = suffix_if(self.config.insert_delimiter, &self.config.delimiter);
        trace!(append, "Resolving value list");
        self.resolver
            .resolve(&self.config.values, append, self.config.cache, tokens, extra)
            .await
    }
}
