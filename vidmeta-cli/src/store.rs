//! Local preferences store
//!
//! Preferences live in a small JSON file. They are read when a command
//! starts and written only when the user changes them explicitly.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use vidmeta_core::domain::preferences::UserPreferences;

/// JSON file holding [`UserPreferences`]
#[derive(Debug, Clone)]
pub struct PreferencesStore {
    path: PathBuf,
}

impl PreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved preferences
    ///
    /// A missing file yields the defaults. So does an unreadable or corrupt
    /// one, with a warning, so that a bad file never blocks generation.
    pub fn load(&self) -> UserPreferences {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return UserPreferences::default();
            }
            Err(e) => {
                warn!("Failed to read preferences from {:?}: {}", self.path, e);
                return UserPreferences::default();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            warn!("Ignoring invalid preferences in {:?}: {}", self.path, e);
            UserPreferences::default()
        })
    }

    /// Save preferences, creating the parent directory if needed
    pub fn save(&self, preferences: &UserPreferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(preferences)
            .context("Failed to serialize preferences")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write preferences to {:?}", self.path))?;

        Ok(())
    }

    /// Delete saved preferences; returns whether a file was removed
    pub fn reset(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove preferences {:?}", self.path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidmeta_core::domain::preferences::{Provider, Tone};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path().join("preferences.json"));
        assert_eq!(store.load(), UserPreferences::default());
        assert!(!store.reset().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferencesStore::new(dir.path().join("nested").join("preferences.json"));

        let prefs = UserPreferences {
            provider: Provider::Openai,
            default_model: "gpt-5-nano".to_string(),
            default_tone: Tone::Casual,
            web_origin: Some("https://example.com".to_string()),
        };
        store.save(&prefs).unwrap();

        assert_eq!(store.load(), prefs);
        assert!(store.reset().unwrap());
        assert_eq!(store.load(), UserPreferences::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let store = PreferencesStore::new(path);
        assert_eq!(store.load(), UserPreferences::default());
    }
}
