//! Suggestion source resolution
//!
//! The [`Resolver`] turns a [`SuggestionSource`] into a [`RichList`]:
//!
//! 1. Normalize: names become bare suggestions, rich lists pass through,
//!    providers are awaited.
//! 2. Append: suggestions without an explicit insertion text get
//!    `name + append_text`.
//! 3. Cache: static sources are always cached, providers only on request.
//!
//! The cache is keyed by source identity and never evicts. Resolution of a
//! given source is single-flight: concurrent callers share one computation
//! and receive the same `Arc`. A failed computation leaves nothing behind,
//! so the next call retries.

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::Result;
use crate::source::{SourceId, SourceKind, SuggestionSource};
use crate::suggestion::{RichList, Suggestion};

/// Cache slot for one source
struct CacheEntry {
    /// Keeps the source alive so its identity cannot be reused
    _source: SuggestionSource,
    /// Resolved list, filled at most once
    cell: Arc<OnceCell<RichList>>,
}

/// Resolves suggestion sources and owns the resolution cache
///
/// Construct one resolver per process and share it (`Arc<Resolver>`) with
/// every generator; separate resolvers have separate caches.
#[derive(Default)]
pub struct Resolver {
    cache: DashMap<SourceId, CacheEntry>,
}

impl Resolver {
    /// Create a resolver with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver ready to be shared between generators
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Resolve a source into suggestions
    ///
    /// # Arguments
    /// * `source` - Source to resolve
    /// * `append_text` - Suffix for suggestions without an explicit insertion text
    /// * `use_cache` - Whether a provider result may be cached; ignored for static sources
    /// * `tokens` - Token context forwarded to providers
    /// * `extra` - Host arguments forwarded to providers
    ///
    /// # Returns
    /// * `Result<RichList>` - Resolved suggestions, or the provider's error
    pub async fn resolve(
        &self,
        source: &SuggestionSource,
        append_text: &str,
        use_cache: bool,
        tokens: &[String],
        extra: &[Value],
    ) -> Result<RichList> {
        if !Self::should_use_cache(source, use_cache) {
            debug!(source = ?source.id(), "Resolving uncached provider");
            return compute(source, append_text, tokens, extra).await;
        }

        let cell = self.cell_for(source);
        if let Some(list) = cell.get() {
            debug!(source = ?source.id(), "Resolution cache hit");
            return Ok(list.clone());
        }

        let list = cell
            .get_or_try_init(|| async {
                debug!(source = ?source.id(), "Resolution cache miss");
                compute(source, append_text, tokens, extra).await
            })
            .await?;
        Ok(list.clone())
    }

    /// Cached resolution for a source, if one has been stored
    pub fn cached(&self, source: &SuggestionSource) -> Option<RichList> {
        self.cache
            .get(&source.id())
            .and_then(|entry| entry.cell.get().cloned())
    }

    /// Number of sources with a stored resolution
    pub fn len(&self) -> usize {
        self.cache
            .iter()
            .filter(|entry| entry.cell.initialized())
            .count()
    }

    /// Whether no resolution has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Static collections are always cached; providers only when asked
    fn should_use_cache(source: &SuggestionSource, use_cache: bool) -> bool {
        match source.kind() {
            SourceKind::Names(_) | SourceKind::Rich(_) => true,
            SourceKind::Provider(_) => use_cache,
        }
    }

    /// Get or create the cache cell for a source
    ///
    /// The map shard lock is released before the caller awaits on the cell.
    fn cell_for(&self, source: &SuggestionSource) -> Arc<OnceCell<RichList>> {
        self.cache
            .entry(source.id())
            .or_insert_with(|| CacheEntry {
                _source: source.clone(),
                cell: Arc::new(OnceCell::new()),
            })
            .cell
            .clone()
    }
}

/// Normalize a source and apply the append rule
async fn compute(
    source: &SuggestionSource,
    append_text: &str,
    tokens: &[String],
    extra: &[Value],
) -> Result<RichList> {
    let suggestions: Vec<Suggestion> = match source.kind() {
        SourceKind::Names(names) => names.iter().map(Suggestion::new).collect(),
        SourceKind::Rich(suggestions) => suggestions.clone(),
        SourceKind::Provider(provider) => {
            debug!(tokens = tokens.len(), "Invoking suggestion provider");
            provider.provide(tokens, extra).await?
        }
    };

    Ok(append_to_insert_value(suggestions, append_text).into())
}

/// Give every suggestion without an insertion text `name + append_text`
///
/// Suggestions that already declare `insert_value` are left untouched, and
/// an empty `append_text` changes nothing.
pub fn append_to_insert_value(
    mut suggestions: Vec<Suggestion>,
    append_text: &str,
) -> Vec<Suggestion> {
    if append_text.is_empty() {
        return suggestions;
    }

    for suggestion in suggestions.iter_mut() {
        if suggestion.insert_value.is_none() {
            suggestion.insert_value = Some(format!("{}{}", suggestion.name, append_text));
        }
    }
    suggestions
}
