//! Closure-backed source

use std::sync::Arc;

use serde_json::Value;

use super::traits::{metadata_of, present, Context, Source, SourceMetadata, SourceResult};

/// Resolver closure: `(key, context) -> value | absent`
pub type ResolveFn = Arc<dyn Fn(&str, &Context) -> SourceResult<Option<Value>> + Send + Sync>;

/// Support predicate: `(key, context) -> bool`
pub type SupportsFn = Arc<dyn Fn(&str, &Context) -> bool + Send + Sync>;

/// Value mapper applied to present results only
pub type MapValueFn = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A source defined by closures
///
/// The resolver is expected to be side-effect free; callers own idempotence
/// across repeated calls.
///
/// # Example
///
/// ```
/// use cascade_core::source::{CallbackSource, Context, Source};
/// use serde_json::json;
///
/// let env = CallbackSource::infallible("env", |key, _ctx| {
///     (key == "region").then(|| json!("eu-west-1"))
/// })
/// .with_supports(|key, _ctx| !key.starts_with("secret."));
///
/// assert_eq!(env.get("region", &Context::new()).unwrap(), Some(json!("eu-west-1")));
/// assert!(!env.supports("secret.token", &Context::new()));
/// ```
#[derive(Clone)]
pub struct CallbackSource {
    name: String,
    resolver: ResolveFn,
    supports: Option<SupportsFn>,
    mapper: Option<MapValueFn>,
}

impl CallbackSource {
    /// Create a callback source from a fallible resolver
    pub fn new<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&str, &Context) -> SourceResult<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            resolver: Arc::new(resolver),
            supports: None,
            mapper: None,
        }
    }

    /// Create a callback source from a resolver that cannot fail
    pub fn infallible<F>(name: impl Into<String>, resolver: F) -> Self
    where
        F: Fn(&str, &Context) -> Option<Value> + Send + Sync + 'static,
    {
        Self::new(name, move |key, ctx| Ok(resolver(key, ctx)))
    }

    /// Restrict which keys/contexts this source answers for
    pub fn with_supports<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &Context) -> bool + Send + Sync + 'static,
    {
        self.supports = Some(Arc::new(predicate));
        self
    }

    /// Map every present value before returning it
    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.mapper = Some(Arc::new(mapper));
        self
    }
}

impl Source for CallbackSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, key: &str, context: &Context) -> bool {
        match &self.supports {
            Some(predicate) => predicate(key, context),
            None => true,
        }
    }

    fn get(&self, key: &str, context: &Context) -> SourceResult<Option<Value>> {
        let value = present((self.resolver)(key, context)?);
        Ok(match (&self.mapper, value) {
            (Some(mapper), Some(v)) => present(Some(mapper(v))),
            (_, value) => value,
        })
    }

    fn metadata(&self) -> SourceMetadata {
        let mut meta = metadata_of("callback", &self.name);
        meta.insert("has_supports".to_string(), Value::Bool(self.supports.is_some()));
        meta.insert("has_mapper".to_string(), Value::Bool(self.mapper.is_some()));
        meta
    }
}

impl std::fmt::Debug for CallbackSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackSource")
            .field("name", &self.name)
            .field("supports", &self.supports.is_some())
            .field("mapper", &self.mapper.is_some())
            .finish()
    }
}
