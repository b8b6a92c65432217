//! Completion generators
//!
//! A generator answers the three questions a host completion engine asks on
//! every keystroke:
//!
//! - `trigger`: does the suggestion list have to be recomputed?
//! - `query_term`: which part of the token should suggestions be matched against?
//! - `custom`: what are the suggestions?
//!
//! Three factories build generators for the common argument shapes:
//!
//! | Factory | Shape |
//! |---|---|
//! | [`value_list`] | `v1,v2,...` |
//! | [`key_value`] | `key=value` |
//! | [`key_value_list`] | `k1=v1,k2=v2,...` |
//!
//! Generators are immutable and share one [`Resolver`], whose cache is the
//! only mutable state involved.
//!
//! # Example
//!
//! ```rust
//! use fig_generators::generator::{key_value, Generator, KeyValueConfig};
//! use fig_generators::{Resolver, SuggestionSource};
//!
//! # tokio_test::block_on(async {
//! let resolver = Resolver::shared();
//! let generator = key_value(
//!     &resolver,
//!     KeyValueConfig {
//!         keys: SuggestionSource::names(["mode", "level"]),
//!         values: SuggestionSource::names(["fast", "slow"]),
//!         ..Default::default()
//!     },
//! );
//!
//! let keys = generator.custom(&["mo".to_string()], &[]).await.unwrap();
//! assert_eq!(keys[0].insertion_text(), "mode=");
//! assert_eq!(generator.query_term("mode=fa"), "fa");
//! # });
//! ```

mod key_value;
mod key_value_list;
mod value_list;


use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::suggestion::RichList;

pub use crate::resolver::Resolver;
pub use key_value::{KeyValueConfig, KeyValueGenerator, key_value};
pub use key_value_list::{KeyValueListConfig, KeyValueListGenerator, key_value_list};
pub use value_list::{ValueListConfig, ValueListGenerator, value_list};

/// Host-facing generator contract
#[async_trait]
pub trait Generator: Send + Sync {
    /// Whether suggestions must be recomputed after the token changed
    ///
    /// `false` means the host should keep the previously computed list.
    fn trigger(&self, new_token: &str, old_token: &str) -> bool;

    /// Part of the token that suggestions are matched against
    fn query_term<'t>(&self, token: &'t str) -> &'t str;

    /// Compute suggestions for the current token context
    ///
    /// # Arguments
    /// * `tokens` - Tokens typed so far; the last one is being completed
    /// * `extra` - Opaque host arguments forwarded to providers
    async fn custom(&self, tokens: &[String], extra: &[Value]) -> Result<RichList>;
}

/// Role a resolution plays in a key/value generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheRole {
    /// Only cache key resolutions
    Keys,
    /// Only cache value resolutions
    Values,
}

/// Caching preference for provider-backed sources
///
/// Deserializes from `true`, `false`, `"keys"` or `"values"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheFlag {
    /// Applies to keys and values alike
    Flag(bool),
    /// Applies to one role only
    Role(CacheRole),
}

impl Default for CacheFlag {
    fn default() -> Self {
        CacheFlag::Flag(false)
    }
}

impl From<bool> for CacheFlag {
    fn from(flag: bool) -> Self {
        CacheFlag::Flag(flag)
    }
}

impl From<CacheRole> for CacheFlag {
    fn from(role: CacheRole) -> Self {
        CacheFlag::Role(role)
    }
}

/// Whether a resolution in the given role should use the cache
pub fn should_cache(is_key: bool, flag: CacheFlag) -> bool {
    match flag {
        CacheFlag::Flag(flag) => flag,
        CacheFlag::Role(CacheRole::Keys) => is_key,
        CacheFlag::Role(CacheRole::Values) => !is_key,
    }
}

/// Suffix appended to insertion texts when `enabled`
fn suffix_if(enabled: bool, marker: &str) -> &str {
    if enabled { marker } else { "" }
}

/// The token currently being completed
fn current_token(tokens: &[String]) -> &str {
    tokens.last().map(String::as_str).unwrap_or("")
}

fn default_separator() -> String {
    "=".to_string()
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_insert_separator() -> bool {
    true
}
