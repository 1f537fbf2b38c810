//! Cache backend abstraction
//!
//! The cache backend is an external collaborator. This module defines the
//! contract `CachedSource` depends on and ships `MemoryCache` as an
//! in-process implementation.

mod traits;
mod memory;

pub use traits::{Cache, SharedCache};
pub use memory::MemoryCache;
