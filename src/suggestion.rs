//! Suggestion records
//!
//! A [`Suggestion`] is what the host completion engine displays and inserts.
//! Only `name` and `insert_value` have meaning to this crate; every other
//! field (description, icon, priority, ...) is carried through untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Resolved, shareable list of suggestions.
///
/// Cached resolutions hand out clones of the same `Arc`, so callers can use
/// [`Arc::ptr_eq`] to tell a cache hit from a fresh computation.
pub type RichList = Arc<[Suggestion]>;

/// A single completion suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Display and match text
    pub name: String,

    /// Text inserted on acceptance; `name` is inserted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_value: Option<String>,

    /// Opaque display metadata passed through unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Suggestion {
    /// Create a suggestion with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            insert_value: None,
            extra: Map::new(),
        }
    }

    /// Set an explicit insertion text
    pub fn with_insert_value(mut self, insert_value: impl Into<String>) -> Self {
        self.insert_value = Some(insert_value.into());
        self
    }

    /// Attach an opaque metadata field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Text that the host inserts when this suggestion is accepted
    pub fn insertion_text(&self) -> &str {
        self.insert_value.as_deref().unwrap_or(&self.name)
    }

    /// Look up an opaque metadata field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

impl From<&str> for Suggestion {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Suggestion {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
