//! Engine settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;
use crate::source::DEFAULT_NAMESPACE;

use super::traits::{ConfigError, ConfigResult};

/// What `define_resolver` does when the name is already registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Replace the existing resolver with a fresh, empty one
    #[default]
    Overwrite,
    /// Refuse with `CascadeError::ResolverExists`
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> ConfigResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "overwrite" | "replace" => Ok(DuplicatePolicy::Overwrite),
            "reject" | "error" => Ok(DuplicatePolicy::Reject),
            other => Err(ConfigError::Invalid(format!("unknown duplicate policy '{}'", other))),
        }
    }
}

/// Cache decorator defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Prefix of the default cache key scheme
    pub namespace: String,
    /// Time-to-live in seconds; `None` or `0` means entries never expire
    pub ttl_secs: Option<u64>,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            ttl_secs: Some(300),
        }
    }
}

impl CacheSettings {
    /// Entry lifetime; zero is read as "never expire", as with `CASCADE_CACHE_TTL_SECS`
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.filter(|secs| *secs > 0).map(Duration::from_secs)
    }
}

/// Named-resolver registry behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    pub duplicate_policy: DuplicatePolicy,
}

/// "Did you mean" suggestions for unknown resolver names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSettings {
    /// Largest Levenshtein distance still offered as a suggestion
    pub max_distance: usize,
    /// Maximum number of suggestions carried by the error
    pub limit: usize,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            max_distance: 3,
            limit: 3,
        }
    }
}

/// Event logging through `tracing`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Attach a `TracingListener` to registries built from these settings
    pub events: bool,
    pub level: LogLevel,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            events: false,
            level: LogLevel::Debug,
        }
    }
}

/// All engine settings
///
/// ```yaml
/// cache:
///   namespace: tenant-settings
///   ttl_secs: 600
/// registry:
///   duplicate_policy: reject
/// suggestions:
///   max_distance: 2
///   limit: 5
/// logging:
///   events: true
///   level: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeSettings {
    pub cache: CacheSettings,
    pub registry: RegistrySettings,
    pub suggestions: SuggestionSettings,
    pub logging: LoggingSettings,
}

impl CascadeSettings {
    /// Parse settings from YAML; missing sections fall back to defaults
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply `CASCADE_*` environment overrides
    ///
    /// - `CASCADE_CACHE_NAMESPACE`
    /// - `CASCADE_CACHE_TTL_SECS` (`none` or `0` disables expiry)
    /// - `CASCADE_DUPLICATE_POLICY` (`overwrite` or `reject`)
    /// - `CASCADE_LOG_LEVEL`
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(namespace) = lookup("CASCADE_CACHE_NAMESPACE") {
            self.cache.namespace = namespace;
        }
        if let Some(ttl) = lookup("CASCADE_CACHE_TTL_SECS") {
            self.cache.ttl_secs = parse_ttl(&ttl)?;
        }
        if let Some(policy) = lookup("CASCADE_DUPLICATE_POLICY") {
            self.registry.duplicate_policy = DuplicatePolicy::parse(&policy)?;
        }
        if let Some(level) = lookup("CASCADE_LOG_LEVEL") {
            self.logging.level = LogLevel::parse(&level)
                .ok_or_else(|| ConfigError::Invalid(format!("unknown log level '{}'", level)))?;
        }
        Ok(self)
    }
}

fn parse_ttl(raw: &str) -> ConfigResult<Option<u64>> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("none") || raw == "0" {
        return Ok(None);
    }
    raw.parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid(format!("invalid cache ttl '{}'", raw)))
}
