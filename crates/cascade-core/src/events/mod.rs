//! Resolution events
//!
//! Three event kinds are emitted while a key resolves:
//! - `SourceQueried` for each source consulted
//! - `ValueResolved` when a value is found
//! - `ResolutionFailed` when every source missed

mod types;
mod bus;

pub use types::{ResolutionFailed, SourceQueried, ValueResolved};
pub use bus::{EventBus, Listener};
