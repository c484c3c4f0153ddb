//! User preferences persisted between editor sessions

mod file;

pub use file::*;

use bevy::prelude::Resource;
use mdstudio_core::{DEFAULT_MAP_HEIGHT, DEFAULT_MAP_WIDTH, MAX_MAP_SIDE};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the recent projects list
pub const MAX_RECENT_PROJECTS: usize = 10;

/// A recently opened project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentProject {
    pub path: String,
    pub name: String,
}

/// Editor preferences
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct EditorPreferences {
    pub auto_open_last_project: bool,
    pub show_grid: bool,
    /// Multiplier applied to middle-drag pan deltas
    pub pan_speed: f32,
    /// Zoom change per wheel notch
    pub zoom_speed: f32,
    pub default_map_width: u32,
    pub default_map_height: u32,
    /// Most recent first
    pub recent_projects: Vec<RecentProject>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            auto_open_last_project: false,
            show_grid: true,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            default_map_width: DEFAULT_MAP_WIDTH,
            default_map_height: DEFAULT_MAP_HEIGHT,
            recent_projects: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Record a project as most recently used
    pub fn add_recent_project(&mut self, path: std::path::PathBuf, name: String) {
        let path = path.to_string_lossy().to_string();
        self.recent_projects.retain(|p| p.path != path);
        self.recent_projects.insert(0, RecentProject { path, name });
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    pub fn remove_recent_project(&mut self, path: &str) {
        self.recent_projects.retain(|p| p.path != path);
    }

    pub fn clear_recent_projects(&mut self) {
        self.recent_projects.clear();
    }

    /// Bring values read from disk back into the ranges the editor accepts
    pub fn validate_and_cleanup(&mut self) {
        self.default_map_width = self.default_map_width.clamp(1, MAX_MAP_SIDE);
        self.default_map_height = self.default_map_height.clamp(1, MAX_MAP_SIDE);

        let defaults = Self::default();
        if !(self.pan_speed.is_finite() && self.pan_speed > 0.0) {
            self.pan_speed = defaults.pan_speed;
        }
        if !(self.zoom_speed.is_finite() && self.zoom_speed > 0.0) {
            self.zoom_speed = defaults.zoom_speed;
        }
        self.recent_projects.truncate(MAX_RECENT_PROJECTS);
    }

    /// The most recently opened project, if any
    pub fn last_project(&self) -> Option<&RecentProject> {
        self.recent_projects.first()
    }
}
