//! mdstudio_editor - Mega Drive map and palette editor built on Bevy
//!
//! This crate provides:
//! - Project management (save/load)
//! - Tile painting and erasing on a pan/zoom map view
//! - Palette editing with used/unused colour slots
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use mdstudio_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new().with_initial_grid(true))
//!         .run();
//! }
//! ```

pub mod camera;
pub mod commands;
pub mod preferences;
pub mod project;
pub mod render;
pub mod tools;
pub mod ui;
pub mod view;

pub use mdstudio_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use std::path::PathBuf;

use commands::handle_keyboard_shortcuts;
use preferences::EditorPreferences;
use project::Project;
use ui::{EditorUiPlugin, PendingAction};
use view::{EditorViews, MapView, PalettesView};

/// Configuration for initial editor state
///
/// Fields left as `None` fall back to the saved preferences.
#[derive(Clone, Debug, Default)]
pub struct EditorStateConfig {
    /// Whether to show the grid on startup
    pub show_grid: Option<bool>,
    /// Map view pan speed multiplier
    pub pan_speed: Option<f32>,
    /// Zoom change per wheel notch
    pub zoom_speed: Option<f32>,
}

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use mdstudio_editor::EditorPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_initial_grid(false)
///             .with_zoom_speed(2.0)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Initial editor state configuration.
    pub initial_state: EditorStateConfig,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to show the grid on startup
    pub fn with_initial_grid(mut self, show: bool) -> Self {
        self.initial_state.show_grid = Some(show);
        self
    }

    /// Set the map view pan speed multiplier
    pub fn with_pan_speed(mut self, speed: f32) -> Self {
        self.initial_state.pan_speed = Some(speed);
        self
    }

    /// Set the zoom change per wheel notch
    pub fn with_zoom_speed(mut self, speed: f32) -> Self {
        self.initial_state.zoom_speed = Some(speed);
        self
    }

    /// Build the views from preferences overridden by plugin config
    fn create_views(&self, preferences: &EditorPreferences) -> EditorViews {
        let pan_speed = self.initial_state.pan_speed.unwrap_or(preferences.pan_speed);
        let zoom_speed = self
            .initial_state
            .zoom_speed
            .unwrap_or(preferences.zoom_speed);

        EditorViews {
            map: MapView::new(pan_speed, zoom_speed),
            palettes: PalettesView::default(),
        }
    }

    fn create_state(&self, preferences: &EditorPreferences) -> EditorState {
        let mut editor_state = EditorState::from_preferences(preferences);
        if let Some(show) = self.initial_state.show_grid {
            editor_state.show_grid = show;
        }
        editor_state
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        // Load user preferences
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        // Plugin config takes precedence over saved preferences
        let editor_state = self.create_state(&preferences);
        let views = self.create_views(&preferences);
        let project = Project::with_defaults(
            "Untitled".to_string(),
            preferences.default_map_width,
            preferences.default_map_height,
        );

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(project)
            .insert_resource(views)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, handle_keyboard_shortcuts)
            .add_systems(Update, handle_recent_projects);
    }
}

/// System to handle recent projects updates
fn handle_recent_projects(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
    mut project: ResMut<Project>,
) {
    // Add project to recent list
    if let Some(path) = editor_state.pending_add_recent_project.take() {
        let name = project.name.clone();
        preferences.add_recent_project(path, name);
        save_preferences(&preferences);
    }

    // Open recent project
    if let Some(path) = editor_state.pending_open_recent_project.take() {
        match Project::load(&path) {
            Ok(loaded) => {
                *project = loaded;
                editor_state.pending_attach = true;
                let name = project.name.clone();
                preferences.add_recent_project(path, name);
            }
            Err(e) => {
                editor_state.error_message = Some(format!("Failed to load project: {}", e));
                // Remove from recent if it can't be opened
                preferences.remove_recent_project(&path.to_string_lossy());
            }
        }
        save_preferences(&preferences);
    }

    // Clear recent projects
    if editor_state.pending_clear_recent_projects {
        editor_state.pending_clear_recent_projects = false;
        preferences.clear_recent_projects();
        save_preferences(&preferences);
    }
}

fn save_preferences(preferences: &EditorPreferences) {
    if let Err(e) = preferences.save() {
        bevy::log::error!("Failed to save preferences: {}", e);
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    // Only spawn if no Camera2d exists
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    pub show_grid: bool,

    // Dialogs
    pub show_new_project_dialog: bool,
    pub show_settings_dialog: bool,
    pub error_message: Option<String>,

    // New project dialog state
    pub new_project_name: String,
    pub new_project_width: u32,
    pub new_project_height: u32,

    // Recent projects handling
    pub pending_add_recent_project: Option<PathBuf>,
    pub pending_open_recent_project: Option<PathBuf>,
    pub pending_clear_recent_projects: bool,

    // Pending actions
    pub pending_action: Option<PendingAction>,
    pub pending_reset_camera: bool,
    /// Set whenever `Project` is replaced so the map view re-attaches it
    pub pending_attach: bool,
}

impl EditorState {
    /// Initial state seeded from saved preferences
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        Self {
            show_grid: preferences.show_grid,
            new_project_width: preferences.default_map_width,
            new_project_height: preferences.default_map_height,
            ..Default::default()
        }
    }

    /// Put the new project dialog fields back to their defaults
    pub fn reset_new_project_dialog(&mut self, preferences: &EditorPreferences) {
        self.new_project_name = "New Project".to_string();
        self.new_project_width = preferences.default_map_width;
        self.new_project_height = preferences.default_map_height;
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            show_grid: true,

            show_new_project_dialog: false,
            show_settings_dialog: false,
            error_message: None,

            new_project_name: "New Project".to_string(),
            new_project_width: mdstudio_core::DEFAULT_MAP_WIDTH,
            new_project_height: mdstudio_core::DEFAULT_MAP_HEIGHT,

            pending_add_recent_project: None,
            pending_open_recent_project: None,
            pending_clear_recent_projects: false,

            pending_action: None,
            pending_reset_camera: false,
            pending_attach: true,
        }
    }
}
