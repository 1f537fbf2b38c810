//! Cascade Core
//!
//! Priority-ordered value resolution. A key is looked up across an ordered
//! set of sources (local overrides, tenant stores, static defaults, ...) and
//! the first non-null answer wins, optionally transformed and cached.
//!
//! ## Anonymous chains
//!
//! ```rust
//! use cascade_core::{Resolve, SourceConductor, NullSource, StaticMapSource};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let conductor = SourceConductor::new()
//!     .add_source(Arc::new(StaticMapSource::new("defaults").with("theme", json!("light"))), 100)
//!     .add_source(Arc::new(NullSource::named("user-overrides")), 0);
//!
//! assert_eq!(conductor.get("theme").unwrap(), Some(json!("light")));
//! ```
//!
//! ## Named resolvers
//!
//! ```rust
//! use cascade_core::{HasIdentity, Resolve, ResolverRegistry, Subject, CallbackSource};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Tenant(u64);
//!
//! impl HasIdentity for Tenant {
//!     fn identity(&self) -> Value { json!(self.0) }
//! }
//!
//! impl Subject for Tenant {
//!     fn as_identity(&self) -> Option<&dyn HasIdentity> { Some(self) }
//! }
//!
//! let registry = ResolverRegistry::new();
//! registry.define_resolver("plan").unwrap().from_source(Arc::new(
//!     CallbackSource::infallible("tenant-db", |_, ctx| {
//!         (ctx.get("tenant_id") == Some(&json!(7))).then(|| json!("enterprise"))
//!     }),
//! ));
//!
//! let plan = registry.using("plan").unwrap().for_subject(&Tenant(7));
//! assert_eq!(plan.get("tier").unwrap(), Some(json!("enterprise")));
//! ```

pub mod error;
pub mod source;
pub mod cache;
pub mod events;
pub mod resolver;
pub mod registry;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{CascadeError, CascadeResult};

pub use source::{
    Context, SharedSource, Source, SourceError, SourceMetadata, SourceResult,
    StaticMapSource, CallbackSource, NullSource, CachedSource, ChainedSource,
};

pub use cache::{Cache, MemoryCache, SharedCache};

pub use events::{EventBus, SourceQueried, ValueResolved, ResolutionFailed};

pub use resolver::{
    DefaultValue, Resolve, Resolution, ResolutionAttempt, SourceConductor,
    DEFAULT_PRIORITY,
};

pub use registry::{
    ResolverRegistry, NamedResolver, ResolutionConductor,
    Subject, HasCascadeContext, HasIdentity,
};

pub use config::{CascadeSettings, ConfigError, DuplicatePolicy, SettingsFile};

pub use logging::{LogLevel, TracingListener};
