//! Caller-facing resolution surface

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{CascadeError, CascadeResult};
use crate::source::Context;

use super::result::{Resolution, ResolutionAttempt};

/// Value returned by `get_or` when nothing resolves
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal value
    Value(Value),
    /// Produced lazily, only when the key did not resolve
    Producer(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn producer<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultValue::Producer(Arc::new(producer))
    }

    /// Materialize the default
    pub fn produce(self) -> Value {
        match self {
            DefaultValue::Value(value) => value,
            DefaultValue::Producer(producer) => producer(),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Value(value)
    }
}

impl std::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Resolution methods shared by every conductor
///
/// Implementors supply `attempt`; everything else is derived from it. Pick
/// the method by how much absence you tolerate:
/// - `get` / `get_or`: absence becomes `None` or a default
/// - `resolve`: absence is an explicit `Resolution::not_found()`
/// - `get_or_fail`: absence is `CascadeError::ResolutionFailed`
///
/// Source faults surface as `CascadeError::Source` from all of them.
pub trait Resolve {
    /// Run the chain for one key
    fn attempt(&self, key: &str, context: &Context) -> CascadeResult<ResolutionAttempt>;

    /// Full outcome for `key`; absence is not an error
    fn resolve(&self, key: &str) -> CascadeResult<Resolution> {
        self.resolve_with(key, &Context::new())
    }

    fn resolve_with(&self, key: &str, context: &Context) -> CascadeResult<Resolution> {
        Ok(self.attempt(key, context)?.resolution)
    }

    /// Resolved value, or `None`
    fn get(&self, key: &str) -> CascadeResult<Option<Value>> {
        self.get_with(key, &Context::new())
    }

    fn get_with(&self, key: &str, context: &Context) -> CascadeResult<Option<Value>> {
        Ok(self.resolve_with(key, context)?.into_value())
    }

    /// Resolved value, or the default (a producer runs only on a miss)
    fn get_or(&self, key: &str, default: impl Into<DefaultValue>) -> CascadeResult<Value> {
        self.get_or_with(key, &Context::new(), default)
    }

    fn get_or_with(
        &self,
        key: &str,
        context: &Context,
        default: impl Into<DefaultValue>,
    ) -> CascadeResult<Value> {
        match self.get_with(key, context)? {
            Some(value) => Ok(value),
            None => Ok(default.into().produce()),
        }
    }

    /// Resolved value, or `ResolutionFailed` naming every attempted source
    fn get_or_fail(&self, key: &str) -> CascadeResult<Value> {
        self.get_or_fail_with(key, &Context::new())
    }

    fn get_or_fail_with(&self, key: &str, context: &Context) -> CascadeResult<Value> {
        let attempt = self.attempt(key, context)?;
        attempt
            .resolution
            .into_value()
            .ok_or_else(|| CascadeError::resolution_failed(key, attempt.attempted_sources))
    }

    /// Resolve several keys independently, keeping request order
    fn get_many<I, K>(&self, keys: I) -> CascadeResult<IndexMap<String, Resolution>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.get_many_with(keys, &Context::new())
    }

    fn get_many_with<I, K>(&self, keys: I, context: &Context) -> CascadeResult<IndexMap<String, Resolution>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| -> CascadeResult<(String, Resolution)> {
                let key = key.as_ref();
                Ok((key.to_string(), self.resolve_with(key, context)?))
            })
            .collect()
    }
}
