//! Asynchronous suggestion providers
//!
//! This module provides the trait used by dynamic suggestion sources and an
//! adapter that turns an async closure into a provider.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::suggestion::Suggestion;

/// Trait for computing suggestions on demand
///
/// A provider is invoked with the tokens typed so far (the last one is the
/// token being completed) and whatever extra arguments the host forwarded to
/// `Generator::custom`. Errors propagate to the caller unchanged and are
/// never cached.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Produce suggestions for the given token context
    ///
    /// # Arguments
    /// * `tokens` - Tokens of the current command invocation
    /// * `extra` - Opaque host-supplied arguments
    async fn provide(&self, tokens: &[String], extra: &[Value]) -> Result<Vec<Suggestion>>;
}

/// Provider backed by an async closure
///
/// The closure receives owned copies of the token context and host arguments
/// so the returned future does not borrow from the caller.
pub struct FnProvider<F> {
    func: F,
}

impl<F> FnProvider<F> {
    /// Wrap a closure as a provider
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> SuggestionProvider for FnProvider<F>
where
    F: Fn(Vec<String>, Vec<Value>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<Suggestion>>> + Send,
{
    async fn provide(&self, tokens: &[String], extra: &[Value]) -> Result<Vec<Suggestion>> {
        (self.func)(tokens.to_vec(), extra.to_vec()).await
    }
}

impl<F> fmt::Debug for FnProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnProvider")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GeneratorError, ProviderError};

    #[tokio::test]
    async fn test_fn_provider_receives_context() {
        let provider = FnProvider::new(|tokens: Vec<String>, extra: Vec<Value>| async move {
            let mut out: Vec<Suggestion> = tokens.into_iter().map(Suggestion::new).collect();
            out.push(Suggestion::new(format!("extra:{}", extra.len())));
            Ok::<_, GeneratorError>(out)
        });

        let tokens = vec!["git".to_string(), "checkout".to_string()];
        let result = provider
            .provide(&tokens, &[Value::Bool(true)])
            .await
            .unwrap();

        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["git", "checkout", "extra:1"]);
    }

    #[tokio::test]
    async fn test_fn_provider_propagates_error() {
        let provider = FnProvider::new(|_tokens: Vec<String>, _extra: Vec<Value>| async move {
            let failed: Result<Vec<Suggestion>> =
                Err(ProviderError::Failed("offline".into()).into());
            failed
        });

        let err = provider.provide(&[], &[]).await.unwrap_err();
        assert!(matches!(err, GeneratorError::Provider(ProviderError::Failed(_))));
    }
}
