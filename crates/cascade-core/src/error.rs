//! Crate-level error types

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::SourceError;

/// Errors surfaced by conductors and the resolver registry
///
/// A key that no source can answer is not an error for `get` and `resolve`;
/// `ResolutionFailed` is only produced by `get_or_fail`. Registry lookups and
/// source faults have their own variants so callers can tell a valid absence
/// from a broken system.
#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("Could not resolve '{key}' (attempted: {})", .attempted_sources.join(", "))]
    ResolutionFailed {
        key: String,
        attempted_sources: Vec<String>,
    },

    #[error("Resolver not found: {name}{}", format_suggestions(.suggestions))]
    ResolverNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Resolver already defined: {0}")]
    ResolverExists(String),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CascadeError {
    /// Create a resolution failure error
    pub fn resolution_failed(key: impl Into<String>, attempted_sources: Vec<String>) -> Self {
        Self::ResolutionFailed {
            key: key.into(),
            attempted_sources,
        }
    }

    /// Create a resolver-not-found error
    pub fn resolver_not_found(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::ResolverNotFound {
            name: name.into(),
            suggestions,
        }
    }

    /// Whether this is the expected "no value" outcome of `get_or_fail`
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResolutionFailed { .. })
    }

    /// Suggested resolver names, empty for other variants
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::ResolverNotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

pub type CascadeResult<T> = Result<T, CascadeError>;
