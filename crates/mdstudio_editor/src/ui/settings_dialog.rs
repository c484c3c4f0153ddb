//! Settings/Preferences dialog

use bevy_egui::egui;
use mdstudio_core::MAX_MAP_SIDE;

use crate::camera::MapCamera;
use crate::preferences::EditorPreferences;

/// Render the Settings dialog
///
/// Saved speeds are pushed into `camera` so they take effect immediately.
pub fn render_settings_dialog(
    ctx: &egui::Context,
    show: &mut bool,
    preferences: &mut EditorPreferences,
    camera: &mut MapCamera,
) {
    if !*show {
        return;
    }

    let mut close_dialog = false;
    let mut save_and_close = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .default_size([380.0, 320.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                // Startup section
                ui.heading("Startup");
                ui.separator();

                ui.checkbox(
                    &mut preferences.auto_open_last_project,
                    "Auto-open last project on startup",
                );

                ui.add_space(16.0);

                // Map view section
                ui.heading("Map View");
                ui.separator();

                ui.checkbox(&mut preferences.show_grid, "Show Grid");

                ui.horizontal(|ui| {
                    ui.label("Pan Speed:");
                    ui.add(
                        egui::Slider::new(&mut preferences.pan_speed, 0.25..=4.0)
                            .suffix("x")
                            .logarithmic(true),
                    );
                });

                ui.horizontal(|ui| {
                    ui.label("Zoom Speed:");
                    ui.add(egui::Slider::new(&mut preferences.zoom_speed, 0.25..=4.0).suffix("x"));
                });

                ui.add_space(16.0);

                // New project defaults
                ui.heading("New Project Defaults");
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Map Width:");
                    ui.add(
                        egui::DragValue::new(&mut preferences.default_map_width)
                            .range(1..=MAX_MAP_SIDE),
                    );
                });

                ui.horizontal(|ui| {
                    ui.label("Map Height:");
                    ui.add(
                        egui::DragValue::new(&mut preferences.default_map_height)
                            .range(1..=MAX_MAP_SIDE),
                    );
                });

                ui.add_space(16.0);

                // Recent Projects section
                ui.heading("Recent Projects");
                ui.separator();

                if preferences.recent_projects.is_empty() {
                    ui.label("No recent projects");
                } else {
                    ui.label(format!(
                        "{} recent project(s)",
                        preferences.recent_projects.len()
                    ));
                }
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save_and_close = true;
                }
                if ui.button("Cancel").clicked() {
                    close_dialog = true;
                }
            });
        });

    if save_and_close {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
        camera.pan_speed = preferences.pan_speed;
        camera.zoom_speed = preferences.zoom_speed;
        *show = false;
    }

    if close_dialog {
        // Reload preferences to discard changes
        *preferences = EditorPreferences::load();
        *show = false;
    }
}
