//! Error handling module for completion generators.
//!
//! All fallible operations in the crate return [`Result`], whose error side
//! is [`GeneratorError`]. Suggestion providers return the same type, so a
//! provider failure reaches the caller of `Generator::custom` unchanged.
//!
//! # Example
//!
//! ```rust
//! use fig_generators::error::{GeneratorError, ProviderError, Result};
//!
//! fn list_branches(ok: bool) -> Result<Vec<String>> {
//!     if !ok {
//!         return Err(ProviderError::Failed("not a repository".into()).into());
//!     }
//!     Ok(vec!["main".to_string()])
//! }
//!
//! assert!(matches!(list_branches(false), Err(GeneratorError::Provider(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, GeneratorError, ProviderError, Result};
