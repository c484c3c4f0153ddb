//! Standalone MD Studio editor binary
//!
//! Run with: mdstudio

use bevy::prelude::*;
use bevy::window::WindowResolution;
use mdstudio_editor::preferences::EditorPreferences;
use mdstudio_editor::project::Project;
use mdstudio_editor::{EditorPlugin, EditorState};
use std::path::PathBuf;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "MD Studio".to_string(),
                resolution: WindowResolution::new(1600, 900),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EditorPlugin::default())
        .add_systems(Startup, auto_open_last_project)
        .run();
}

/// System to auto-open the last project on startup if enabled in preferences
fn auto_open_last_project(
    mut project: ResMut<Project>,
    mut editor_state: ResMut<EditorState>,
    preferences: Res<EditorPreferences>,
) {
    if !preferences.auto_open_last_project {
        return;
    }

    if let Some(recent) = preferences.last_project() {
        let path = PathBuf::from(&recent.path);
        if path.exists() {
            match Project::load(&path) {
                Ok(loaded) => {
                    *project = loaded;
                    editor_state.pending_attach = true;
                    info!("Auto-opened last project: {}", recent.name);
                }
                Err(e) => {
                    warn!("Failed to auto-open project '{}': {}", recent.name, e);
                }
            }
        } else {
            warn!(
                "Last project file not found: {} ({})",
                recent.name, recent.path
            );
        }
    }
}
