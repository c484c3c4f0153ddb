//! Dialog windows for the editor

use bevy_egui::egui;
use mdstudio_core::{Colour, MAX_MAP_SIDE};

use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::view::PalettesView;
use crate::EditorState;

/// Actions that can be triggered from menus
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    New,
    Open,
    Save,
    SaveAs,
    Exit,
}

/// Render all dialogs
pub fn render_dialogs(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &mut Project,
    preferences: &EditorPreferences,
) {
    render_new_project_dialog(ctx, editor_state, project, preferences);
    render_error_dialog(ctx, editor_state);

    // Handle pending file actions
    if let Some(action) = editor_state.pending_action.take() {
        match action {
            PendingAction::New => {
                editor_state.reset_new_project_dialog(preferences);
                editor_state.show_new_project_dialog = true;
            }
            PendingAction::Open => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("MD Studio Project", &["mdproj.json", "json"])
                        .pick_file()
                    {
                        match Project::load(&path) {
                            Ok(loaded) => {
                                *project = loaded;
                                editor_state.pending_attach = true;
                                // Add to recent projects
                                editor_state.pending_add_recent_project = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message =
                                    Some(format!("Failed to load project: {}", e));
                            }
                        }
                    }
                }
            }
            PendingAction::Save => {
                if project.path.is_some() {
                    if let Err(e) = project.save_current() {
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                } else {
                    // No path set, trigger Save As
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                }
            }
            PendingAction::SaveAs => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("MD Studio Project", &["mdproj.json", "json"])
                        .set_file_name(format!("{}.mdproj.json", project.name))
                        .save_file()
                    {
                        match project.save(&path) {
                            Ok(()) => {
                                // Add to recent projects
                                editor_state.pending_add_recent_project = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message = Some(format!("Failed to save: {}", e));
                            }
                        }
                    }
                }
            }
            PendingAction::Exit => {
                // Handled by the UI system, which owns the exit writer
                editor_state.pending_action = Some(action);
            }
        }
    }
}

fn render_new_project_dialog(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &mut Project,
    preferences: &EditorPreferences,
) {
    if !editor_state.show_new_project_dialog {
        return;
    }

    egui::Window::new("New Project")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Name:");
                ui.text_edit_singleline(&mut editor_state.new_project_name);
            });

            ui.horizontal(|ui| {
                ui.label("Width:");
                ui.add(
                    egui::DragValue::new(&mut editor_state.new_project_width)
                        .range(1..=MAX_MAP_SIDE)
                        .suffix(" tiles"),
                );
            });

            ui.horizontal(|ui| {
                ui.label("Height:");
                ui.add(
                    egui::DragValue::new(&mut editor_state.new_project_height)
                        .range(1..=MAX_MAP_SIDE)
                        .suffix(" tiles"),
                );
            });

            ui.separator();

            ui.horizontal(|ui| {
                let name_valid = !editor_state.new_project_name.trim().is_empty();
                if ui
                    .add_enabled(name_valid, egui::Button::new("Create"))
                    .clicked()
                {
                    *project = Project::with_defaults(
                        editor_state.new_project_name.trim().to_string(),
                        editor_state.new_project_width,
                        editor_state.new_project_height,
                    );
                    bevy::log::info!(
                        "Created project '{}' ({}x{} tiles)",
                        project.name,
                        editor_state.new_project_width,
                        editor_state.new_project_height
                    );
                    editor_state.pending_attach = true;
                    editor_state.show_new_project_dialog = false;
                    editor_state.reset_new_project_dialog(preferences);
                }
                if ui.button("Cancel").clicked() {
                    editor_state.show_new_project_dialog = false;
                }
            });
        });
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}

/// Colour picker for the palette slot double-clicked in the palettes view.
///
/// `edit_buffer` holds the colour being edited between frames.
pub fn render_colour_dialog(
    ctx: &egui::Context,
    palettes: &mut PalettesView,
    project: &mut Project,
    edit_buffer: &mut Option<[u8; 3]>,
) {
    let Some((palette_id, colour_id)) = palettes.pending_colour_edit() else {
        *edit_buffer = None;
        return;
    };

    let rgb = edit_buffer.get_or_insert_with(|| {
        project
            .palette(palette_id)
            .and_then(|palette| palette.colour(colour_id))
            .map(|colour| [colour.r, colour.g, colour.b])
            .unwrap_or([0, 0, 0])
    });

    let mut apply = false;
    let mut cancel = false;

    egui::Window::new("Edit Colour")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Palette {}, colour {}", palette_id, colour_id));
            ui.horizontal(|ui| {
                ui.color_edit_button_srgb(rgb);
                ui.label(Colour::new(rgb[0], rgb[1], rgb[2]).to_hex());
            });
            ui.separator();
            ui.horizontal(|ui| {
                apply = ui.button("OK").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        });

    if apply {
        let colour = Colour::new(rgb[0], rgb[1], rgb[2]);
        palettes.apply_colour_edit(project, colour);
        *edit_buffer = None;
    } else if cancel {
        palettes.cancel_colour_edit();
        *edit_buffer = None;
    }
}
