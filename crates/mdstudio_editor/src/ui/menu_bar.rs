//! Menu bar UI

use bevy_egui::egui;
use std::path::PathBuf;

use super::PendingAction;
use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::EditorState;

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &Project,
    preferences: &EditorPreferences,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("New Project...").clicked() {
                    editor_state.pending_action = Some(PendingAction::New);
                    ui.close();
                }
                if ui.button("Open Project...").clicked() {
                    editor_state.pending_action = Some(PendingAction::Open);
                    ui.close();
                }

                // Open Recent submenu
                ui.menu_button("Open Recent", |ui| {
                    if preferences.recent_projects.is_empty() {
                        ui.label("(No recent projects)");
                    } else {
                        for recent in &preferences.recent_projects {
                            if ui.button(&recent.name).on_hover_text(&recent.path).clicked() {
                                editor_state.pending_open_recent_project =
                                    Some(PathBuf::from(&recent.path));
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent Projects").clicked() {
                            editor_state.pending_clear_recent_projects = true;
                            ui.close();
                        }
                    }
                });

                ui.separator();
                if ui.button("Save").clicked() {
                    editor_state.pending_action = Some(PendingAction::Save);
                    ui.close();
                }
                if ui.button("Save As...").clicked() {
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                    ui.close();
                }
                ui.separator();
                if ui.button("Settings...").clicked() {
                    editor_state.show_settings_dialog = true;
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    editor_state.pending_action = Some(PendingAction::Exit);
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut editor_state.show_grid, "Show Grid")
                    .clicked()
                {
                    ui.close();
                }
                if ui.button("Reset Camera").clicked() {
                    editor_state.pending_reset_camera = true;
                    ui.close();
                }
            });

            // Project status on the right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dirty_indicator = if project.is_dirty() { " *" } else { "" };
                ui.label(format!("{}{}", project.name, dirty_indicator));
            });
        });
    });
}
