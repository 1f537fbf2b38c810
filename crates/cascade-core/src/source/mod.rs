//! Value source abstractions and implementations
//!
//! This module provides a pluggable source system with:
//! - `Source` trait for implementing custom providers
//! - Built-in implementations: `StaticMapSource`, `CallbackSource`, `NullSource`,
//!   `CachedSource`, `ChainedSource`

mod traits;
mod static_map;
mod callback;
mod null;
mod cached;
mod chained;

pub use traits::{Context, SharedSource, Source, SourceError, SourceMetadata, SourceResult};
pub(crate) use traits::present;
pub use static_map::StaticMapSource;
pub use callback::{CallbackSource, MapValueFn, ResolveFn, SupportsFn};
pub use null::NullSource;
pub use cached::{CacheKeyFn, CachedSource, DEFAULT_NAMESPACE};
pub use chained::ChainedSource;
