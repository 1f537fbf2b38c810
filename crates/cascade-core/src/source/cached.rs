//! Cache decorator source

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::cache::SharedCache;
use crate::config::CacheSettings;

use super::traits::{
    metadata_of, present, Context, SharedSource, Source, SourceMetadata, SourceResult,
};

/// Cache key generator: `(key, context) -> cache key`
pub type CacheKeyFn = Arc<dyn Fn(&str, &Context) -> String + Send + Sync>;

/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "cascade";

/// A source that caches the values of an inner source
///
/// Only present values are cached. A miss from the inner source is never
/// stored, so the next call asks the inner source again.
///
/// # Example
///
/// ```
/// use cascade_core::cache::MemoryCache;
/// use cascade_core::source::{CachedSource, Context, Source, StaticMapSource};
/// use serde_json::json;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let inner = Arc::new(StaticMapSource::new("db").with("plan", json!("pro")));
/// let cached = CachedSource::new(inner, Arc::new(MemoryCache::new()))
///     .with_ttl(Some(Duration::from_secs(60)));
///
/// assert_eq!(cached.get("plan", &Context::new()).unwrap(), Some(json!("pro")));
/// ```
pub struct CachedSource {
    name: String,
    inner: SharedSource,
    cache: SharedCache,
    ttl: Option<Duration>,
    namespace: String,
    key_fn: Option<CacheKeyFn>,
}

impl CachedSource {
    /// Wrap a source; the decorator is named `cached:<inner name>`
    pub fn new(inner: SharedSource, cache: SharedCache) -> Self {
        Self {
            name: format!("cached:{}", inner.name()),
            inner,
            cache,
            ttl: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            key_fn: None,
        }
    }

    /// Wrap a source using namespace and TTL from settings
    pub fn from_settings(inner: SharedSource, cache: SharedCache, settings: &CacheSettings) -> Self {
        Self::new(inner, cache)
            .with_namespace(settings.namespace.clone())
            .with_ttl(settings.ttl())
    }

    /// Override the decorator's name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the time-to-live for stored values (`None` = no expiry)
    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the namespace used by the default key scheme
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replace the default key scheme with a custom generator
    pub fn with_key_fn<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&str, &Context) -> String + Send + Sync + 'static,
    {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }

    /// The wrapped source
    pub fn inner(&self) -> &SharedSource {
        &self.inner
    }

    /// Compute the cache key for a lookup
    pub fn cache_key(&self, key: &str, context: &Context) -> SourceResult<String> {
        if let Some(key_fn) = &self.key_fn {
            return Ok(key_fn(key, context));
        }
        Ok(format!("{}:{}:{}", self.namespace, key, context_digest(context)?))
    }
}

/// Hex SHA-256 of the serialized context
fn context_digest(context: &Context) -> SourceResult<String> {
    let bytes = serde_json::to_vec(context)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}

impl Source for CachedSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, key: &str, context: &Context) -> bool {
        self.inner.supports(key, context)
    }

    fn get(&self, key: &str, context: &Context) -> SourceResult<Option<Value>> {
        let cache_key = self.cache_key(key, context)?;
        if let Some(hit) = present(self.cache.get(&cache_key)) {
            tracing::trace!(key, cache_key = %cache_key, source = %self.name, "cache hit");
            return Ok(Some(hit));
        }

        let value = present(self.inner.get(key, context)?);
        if let Some(value) = &value {
            tracing::trace!(key, cache_key = %cache_key, source = %self.name, "caching value");
            if !self.cache.set(&cache_key, value.clone(), self.ttl) {
                tracing::debug!(key, cache_key = %cache_key, source = %self.name, "cache refused write");
            }
        }
        Ok(value)
    }

    fn metadata(&self) -> SourceMetadata {
        let mut meta = metadata_of("cached", &self.name);
        meta.insert("inner".to_string(), Value::String(self.inner.name().to_string()));
        meta.insert("namespace".to_string(), Value::String(self.namespace.clone()));
        meta.insert(
            "ttl_secs".to_string(),
            self.ttl.map_or(Value::Null, |ttl| Value::from(ttl.as_secs())),
        );
        meta
    }
}

impl std::fmt::Debug for CachedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedSource")
            .field("name", &self.name)
            .field("inner", &self.inner.name())
            .field("ttl", &self.ttl)
            .field("namespace", &self.namespace)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, MemoryCache};
    use crate::config::CascadeSettings;
    use crate::source::CallbackSource;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(hit: bool) -> (Arc<AtomicUsize>, SharedSource) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let source = CallbackSource::infallible("inner", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            hit.then(|| json!("value"))
        });
        (calls, Arc::new(source))
    }

    #[test]
    fn test_second_get_hits_cache() {
        let (calls, inner) = counting(true);
        let cached = CachedSource::new(inner, Arc::new(MemoryCache::new()));
        let ctx = Context::new();

        assert_eq!(cached.get("k", &ctx).unwrap(), Some(json!("value")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(cached.get("k", &ctx).unwrap(), Some(json!("value")));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_misses_are_not_cached() {
        let (calls, inner) = counting(false);
        let cache = Arc::new(MemoryCache::new());
        let cached = CachedSource::new(inner, cache.clone());
        let ctx = Context::new();

        for _ in 0..3 {
            assert_eq!(cached.get("k", &ctx).unwrap(), None);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_context_changes_cache_key() {
        let (calls, inner) = counting(true);
        let cached = CachedSource::new(inner, Arc::new(MemoryCache::new()));

        let mut tenant_a = Context::new();
        tenant_a.insert("tenant".to_string(), json!("a"));
        let mut tenant_b = Context::new();
        tenant_b.insert("tenant".to_string(), json!("b"));

        cached.get("k", &tenant_a).unwrap();
        cached.get("k", &tenant_b).unwrap();
        cached.get("k", &tenant_a).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_ne!(
            cached.cache_key("k", &tenant_a).unwrap(),
            cached.cache_key("k", &tenant_b).unwrap()
        );
    }

    #[test]
    fn test_default_key_scheme() {
        let (_, inner) = counting(true);
        let cached = CachedSource::new(inner, Arc::new(MemoryCache::new())).with_namespace("flags");
        let key = cached.cache_key("beta", &Context::new()).unwrap();
        assert!(key.starts_with("flags:beta:"));
        // sha-256 hex digest
        assert_eq!(key.len(), "flags:beta:".len() + 64);
    }

    #[test]
    fn test_custom_key_fn() {
        let (_, inner) = counting(true);
        let cache = Arc::new(MemoryCache::new());
        let cached = CachedSource::new(inner, cache.clone()).with_key_fn(|key, _| format!("custom/{}", key));

        cached.get("k", &Context::new()).unwrap();
        assert!(cache.has("custom/k"));
    }

    #[test]
    fn test_supports_delegates() {
        let inner = CallbackSource::infallible("inner", |_, _| Some(json!(1)))
            .with_supports(|key, _| key == "yes");
        let cached = CachedSource::new(Arc::new(inner), Arc::new(MemoryCache::new()));
        assert!(cached.supports("yes", &Context::new()));
        assert!(!cached.supports("no", &Context::new()));
    }

    #[test]
    fn test_from_settings() {
        let (_, inner) = counting(true);
        let settings = CacheSettings {
            namespace: "tenant".to_string(),
            ttl_secs: Some(90),
        };
        let cached = CachedSource::from_settings(inner, Arc::new(MemoryCache::new()), &settings);
        let meta = cached.metadata();
        assert_eq!(meta["namespace"], json!("tenant"));
        assert_eq!(meta["ttl_secs"], json!(90));
        assert_eq!(cached.name(), "cached:inner");
    }

    #[test]
    fn test_zero_ttl_from_yaml_still_caches() {
        let (calls, inner) = counting(true);
        let settings = CascadeSettings::from_yaml("cache:\n  ttl_secs: 0\n").unwrap();
        let cached = CachedSource::from_settings(inner, Arc::new(MemoryCache::new()), &settings.cache);
        let ctx = Context::new();

        for _ in 0..3 {
            assert_eq!(cached.get("k", &ctx).unwrap(), Some(json!("value")));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    /// Accepts nothing
    struct ReadOnlyCache;

    impl Cache for ReadOnlyCache {
        fn get(&self, _key: &str) -> Option<Value> {
            None
        }

        fn set(&self, _key: &str, _value: Value, _ttl: Option<Duration>) -> bool {
            false
        }

        fn delete(&self, _key: &str) -> bool {
            false
        }

        fn clear(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_refused_write_still_returns_value() {
        let (calls, inner) = counting(true);
        let cached = CachedSource::new(inner, Arc::new(ReadOnlyCache));
        let ctx = Context::new();

        assert_eq!(cached.get("k", &ctx).unwrap(), Some(json!("value")));
        assert_eq!(cached.get("k", &ctx).unwrap(), Some(json!("value")));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
