//! Preferences file save/load operations

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::PathBuf;

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug)]
pub enum PreferencesError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    NoConfigDir,
}

impl std::fmt::Display for PreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreferencesError::IoError(e) => write!(f, "IO error: {}", e),
            PreferencesError::ParseError(e) => write!(f, "Parse error: {}", e),
            PreferencesError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            PreferencesError::NoConfigDir => write!(f, "Could not determine config directory"),
        }
    }
}

impl std::error::Error for PreferencesError {}

impl EditorPreferences {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "BigEvilCorporation", "mdstudio")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the preferences file path
    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load preferences from file, returning defaults if not found
    pub fn load() -> Self {
        match Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from(&path))
        {
            Ok(prefs) => prefs,
            Err(e) => {
                bevy::log::warn!("Could not load preferences: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load preferences from a specific file. A missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| PreferencesError::IoError(e.to_string()))?;

        let mut prefs: Self = serde_json::from_str(&content)
            .map_err(|e| PreferencesError::ParseError(e.to_string()))?;
        prefs.validate_and_cleanup();
        Ok(prefs)
    }

    /// Save preferences to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save preferences to a specific file, creating its directory
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PreferencesError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| PreferencesError::IoError(e.to_string()))?;

        bevy::log::info!("Saved preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_preferences() {
        let dir = std::env::temp_dir().join(format!("mdstudio_prefs_{}", uuid::Uuid::new_v4()));
        let path = dir.join(PREFERENCES_FILE);

        let mut prefs = EditorPreferences::default();
        prefs.show_grid = false;
        prefs.zoom_speed = 2.0;
        prefs.add_recent_project(PathBuf::from("level.mdproj.json"), "Level".to_string());
        prefs.save_to(&path).unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert!(!loaded.show_grid);
        assert_eq!(loaded.zoom_speed, 2.0);
        assert_eq!(loaded.recent_projects, prefs.recent_projects);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("mdstudio_none_{}.json", uuid::Uuid::new_v4()));
        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert!(loaded.show_grid);
        assert!(loaded.recent_projects.is_empty());
    }

    #[test]
    fn test_load_clamps_map_size() {
        let path = std::env::temp_dir().join(format!("mdstudio_big_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"{ "default_map_width": 100000, "default_map_height": 100000, "zoom_speed": 0.0 }"#,
        )
        .unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        assert_eq!(loaded.default_map_width, mdstudio_core::MAX_MAP_SIDE);
        assert_eq!(loaded.default_map_height, mdstudio_core::MAX_MAP_SIDE);
        assert_eq!(loaded.zoom_speed, 1.0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("mdstudio_bad_{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(
            EditorPreferences::load_from(&path),
            Err(PreferencesError::ParseError(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
