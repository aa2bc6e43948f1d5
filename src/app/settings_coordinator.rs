//! Settings persistence coordination.
//!
//! Persists the toolbar toggles and the last opened task file in eframe's
//! storage. Values are stored as JSON strings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const TOOLBAR_PREFERENCES_KEY: &str = "toolbar_preferences";
const LAST_FILE_KEY: &str = "last_task_file";

/// Toolbar toggles restored on startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarPreferences {
    #[serde(default)]
    pub grouped: bool,
    #[serde(default)]
    pub rolling_mode: bool,
}

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    pub fn load_toolbar_preferences(storage: Option<&dyn eframe::Storage>) -> ToolbarPreferences {
        Self::load_setting(storage, TOOLBAR_PREFERENCES_KEY)
    }

    pub fn save_toolbar_preferences(storage: &mut dyn eframe::Storage, preferences: &ToolbarPreferences) {
        Self::save_setting(storage, TOOLBAR_PREFERENCES_KEY, preferences);
    }

    pub fn load_last_file(storage: Option<&dyn eframe::Storage>) -> Option<PathBuf> {
        Self::try_load_setting::<Option<PathBuf>>(storage, LAST_FILE_KEY).flatten()
    }

    pub fn save_last_file(storage: &mut dyn eframe::Storage, path: Option<&PathBuf>) {
        Self::save_setting(storage, LAST_FILE_KEY, &path);
    }

    /// Loads a setting, falling back to `T::default()` when missing or invalid.
    pub fn load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> T
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::try_load_setting(storage, key).unwrap_or_default()
    }

    /// Saves a setting as JSON.
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => storage.set_string(key, json_str),
            Err(e) => log::warn!("Failed to serialize setting '{}': {}", key, e),
        }
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let json_str = storage?.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid setting '{}': {}", key, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::Storage;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    #[derive(Default)]
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_toolbar_preferences_round_trip() {
        let mut storage = MockStorage::default();
        let prefs = ToolbarPreferences { grouped: true, rolling_mode: false };

        SettingsCoordinator::save_toolbar_preferences(&mut storage, &prefs);
        assert_eq!(SettingsCoordinator::load_toolbar_preferences(Some(&storage)), prefs);
    }

    #[test]
    fn test_missing_or_corrupt_preferences_default() {
        let mut storage = MockStorage::default();
        assert_eq!(SettingsCoordinator::load_toolbar_preferences(None), ToolbarPreferences::default());

        storage.set_string(TOOLBAR_PREFERENCES_KEY, "{not json".to_string());
        assert_eq!(
            SettingsCoordinator::load_toolbar_preferences(Some(&storage)),
            ToolbarPreferences::default()
        );
    }

    #[test]
    fn test_last_file() {
        let mut storage = MockStorage::default();
        assert_eq!(SettingsCoordinator::load_last_file(Some(&storage)), None);

        let path = PathBuf::from("/tmp/tasks.json");
        SettingsCoordinator::save_last_file(&mut storage, Some(&path));
        assert_eq!(SettingsCoordinator::load_last_file(Some(&storage)), Some(path));

        SettingsCoordinator::save_last_file(&mut storage, None);
        assert_eq!(SettingsCoordinator::load_last_file(Some(&storage)), None);
    }
}
