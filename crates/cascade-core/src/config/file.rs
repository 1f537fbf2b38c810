//! File-based settings (YAML)
//!
//! Supports user-level (~/.config/cascade/config.yaml) and workspace-level
//! (.config/cascade/config.yaml) settings files.

use std::fs;
use std::path::{Path, PathBuf};

use super::settings::CascadeSettings;
use super::traits::ConfigResult;

/// Settings file level (user or workspace)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsLevel {
    /// User-level settings (~/.config/cascade/config.yaml)
    User,
    /// Workspace-level settings (.config/cascade/config.yaml in workspace root)
    Workspace,
    /// Any other explicit path
    Custom,
}

impl SettingsLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsLevel::User => "user",
            SettingsLevel::Workspace => "workspace",
            SettingsLevel::Custom => "custom",
        }
    }
}

/// A YAML settings file
///
/// A missing file is not an error: loading it yields default settings.
///
/// # Example
///
/// ```no_run
/// use cascade_core::config::SettingsFile;
///
/// let settings = SettingsFile::user().load().unwrap();
/// println!("cache namespace: {}", settings.cache.namespace);
/// ```
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
    level: SettingsLevel,
}

impl SettingsFile {
    /// Use an explicit settings path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            level: SettingsLevel::Custom,
        }
    }

    /// User-level settings file (~/.config/cascade/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self {
            path: config_dir.join("cascade").join("config.yaml"),
            level: SettingsLevel::User,
        }
    }

    /// Workspace-level settings file (.config/cascade/config.yaml)
    pub fn workspace(workspace_root: impl AsRef<Path>) -> Self {
        Self {
            path: workspace_root.as_ref().join(".config").join("cascade").join("config.yaml"),
            level: SettingsLevel::Workspace,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn level(&self) -> SettingsLevel {
        self.level
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings, falling back to defaults when the file is missing
    pub fn load(&self) -> ConfigResult<CascadeSettings> {
        if !self.exists() {
            tracing::debug!(path = %self.path.display(), "settings file missing, using defaults");
            return Ok(CascadeSettings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        CascadeSettings::from_yaml(&content)
    }

    /// Load settings and apply `CASCADE_*` environment overrides
    pub fn load_with_env(&self) -> ConfigResult<CascadeSettings> {
        self.load()?.with_env_overrides()
    }

    /// Write settings, creating parent directories as needed
    pub fn save(&self, settings: &CascadeSettings) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_yaml::to_string(settings)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::new(dir.path().join("nope.yaml"));
        assert!(!file.exists());
        assert_eq!(file.load().unwrap(), CascadeSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let file = SettingsFile::workspace(dir.path());
        assert_eq!(file.level(), SettingsLevel::Workspace);

        let mut settings = CascadeSettings::default();
        settings.registry.duplicate_policy = DuplicatePolicy::Reject;
        settings.cache.namespace = "ws".to_string();
        file.save(&settings).unwrap();

        assert!(file.path().ends_with(".config/cascade/config.yaml"));
        assert_eq!(file.load().unwrap(), settings);
    }

    #[test]
    fn test_user_path() {
        let file = SettingsFile::user();
        assert_eq!(file.level().as_str(), "user");
        assert!(file.path().ends_with("cascade/config.yaml"));
    }
}
