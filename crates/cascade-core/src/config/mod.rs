//! Engine settings
//!
//! - `CascadeSettings`: cache, registry, suggestion and logging defaults
//! - `SettingsFile`: YAML file loading (user/workspace level)

mod traits;
mod settings;
mod file;

pub use traits::{ConfigError, ConfigResult};
pub use settings::{
    CacheSettings, CascadeSettings, DuplicatePolicy, LoggingSettings, RegistrySettings,
    SuggestionSettings,
};
pub use file::{SettingsFile, SettingsLevel};
