//! Suggestion sources
//!
//! A [`SuggestionSource`] says where a generator's keys or values come from.
//! The variant is chosen once, when the caller builds the source:
//!
//! - [`SuggestionSource::names`] - a flat list of names
//! - [`SuggestionSource::rich`] - a list of full [`Suggestion`] records
//! - [`SuggestionSource::provider`] / [`SuggestionSource::from_fn`] - an
//!   asynchronous provider invoked with the token context
//!
//! Sources are cheap handles. Cloning a source keeps its identity, which is
//! what the resolution cache is keyed on; building a second source from the
//! same list creates a new identity and a separate cache entry. Reuse the
//! handle across completions to benefit from caching.

pub mod provider;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::Result;
use crate::suggestion::Suggestion;

pub use provider::{FnProvider, SuggestionProvider};

/// The three shapes a source can take
pub enum SourceKind {
    /// Ordered list of plain names
    Names(Vec<String>),

    /// Ordered list of suggestion records
    Rich(Vec<Suggestion>),

    /// Asynchronous provider
    Provider(Box<dyn SuggestionProvider>),
}

/// Identity of a source handle, stable for as long as the handle is alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(usize);

/// Shared handle over a [`SourceKind`]
#[derive(Clone)]
pub struct SuggestionSource {
    inner: Arc<SourceKind>,
}

impl SuggestionSource {
    fn from_kind(kind: SourceKind) -> Self {
        Self {
            inner: Arc::new(kind),
        }
    }

    /// Create a source from a list of names
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_kind(SourceKind::Names(names.into_iter().map(Into::into).collect()))
    }

    /// Create a source from suggestion records
    pub fn rich<I>(suggestions: I) -> Self
    where
        I: IntoIterator<Item = Suggestion>,
    {
        Self::from_kind(SourceKind::Rich(suggestions.into_iter().collect()))
    }

    /// Create a source backed by a provider
    pub fn provider<P>(provider: P) -> Self
    where
        P: SuggestionProvider + 'static,
    {
        Self::from_kind(SourceKind::Provider(Box::new(provider)))
    }

    /// Create a source backed by an async closure
    ///
    /// # Example
    ///
    /// ```rust
    /// use fig_generators::{Suggestion, SuggestionSource};
    ///
    /// let branches = SuggestionSource::from_fn(|_tokens, _extra| async move {
    ///     Ok(vec![Suggestion::new("main"), Suggestion::new("develop")])
    /// });
    /// assert!(branches.is_provider());
    /// ```
    pub fn from_fn<F, Fut>(func: F) -> Self
    where
        F: Fn(Vec<String>, Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<Suggestion>>> + Send + 'static,
    {
        Self::provider(FnProvider::new(func))
    }

    /// The variant this source was built with
    pub fn kind(&self) -> &SourceKind {
        &self.inner
    }

    /// Identity used by the resolution cache
    pub fn id(&self) -> SourceId {
        SourceId(Arc::as_ptr(&self.inner) as *const () as usize)
    }

    /// Whether this source is computed by a provider
    pub fn is_provider(&self) -> bool {
        matches!(*self.inner, SourceKind::Provider(_))
    }

    /// Whether both handles refer to the same source
    pub fn same_source(&self, other: &SuggestionSource) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for SuggestionSource {
    fn default() -> Self {
        Self::from_kind(SourceKind::Names(Vec::new()))
    }
}

impl From<Vec<String>> for SuggestionSource {
    fn from(names: Vec<String>) -> Self {
        Self::from_kind(SourceKind::Names(names))
    }
}

impl From<Vec<&str>> for SuggestionSource {
    fn from(names: Vec<&str>) -> Self {
        Self::names(names)
    }
}

impl From<Vec<Suggestion>> for SuggestionSource {
    fn from(suggestions: Vec<Suggestion>) -> Self {
        Self::from_kind(SourceKind::Rich(suggestions))
    }
}

impl fmt::Debug for SuggestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            SourceKind::Names(names) => f.debug_tuple("Names").field(names).finish(),
            SourceKind::Rich(suggestions) => f.debug_tuple("Rich").field(suggestions).finish(),
            SourceKind::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Static shapes accepted from configuration files
#[derive(Deserialize)]
#[serde(untagged)]
enum StaticSource {
    Names(Vec<String>),
    Rich(Vec<Suggestion>),
}

impl<'de> Deserialize<'de> for SuggestionSource {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match StaticSource::deserialize(deserializer)? {
            StaticSource::Names(names) => Self::from(names),
            StaticSource::Rich(suggestions) => Self::from(suggestions),
        })
    }
}

impl Serialize for SuggestionSource {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.kind() {
            SourceKind::Names(names) => names.serialize(serializer),
            SourceKind::Rich(suggestions) => suggestions.serialize(serializer),
            // Providers only exist in code; render a marker for display.
            SourceKind::Provider(_) => serializer.serialize_str("<provider>"),
        }
    }
}
