//! Editor UI components using bevy_egui
//!
//! Panels, dialogs and the egui host for the toolkit-independent views: the
//! map view fills the central panel, palettes sit on the right and the tile
//! picker on the left.

mod dialogs;
mod menu_bar;
mod settings_dialog;
mod surface;
mod tile_picker;

pub use dialogs::*;
pub use menu_bar::*;
pub use surface::{colour32, to_view_local, EguiSurface};
pub use tile_picker::{render_tile_picker, tile_at, TileSheetCache};

use bevy::math::Vec2;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use mdstudio_core::TileId;

use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::view::{EditorView, EditorViews, MapView, PointerButtons, PointerEvent, Redraw};
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// UI state for panel sizes and display resources
#[derive(Resource)]
pub struct UiState {
    pub tile_picker_width: f32,
    pub palettes_width: f32,
    /// GPU copy of the map canvas, dropped with the UI state
    pub canvas_texture: Option<egui::TextureHandle>,
    pub tile_sheet: TileSheetCache,
    /// Colour being edited in the colour dialog
    pub colour_edit: Option<[u8; 3]>,
    map_view_size: Vec2,
    palettes_view_size: Vec2,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tile_picker_width: 220.0,
            palettes_width: 96.0,
            canvas_texture: None,
            tile_sheet: TileSheetCache::default(),
            colour_edit: None,
            map_view_size: Vec2::ZERO,
            palettes_view_size: Vec2::ZERO,
        }
    }
}

/// Main UI rendering system
fn render_ui(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    mut preferences: ResMut<EditorPreferences>,
    mut views: ResMut<EditorViews>,
    mut exit: MessageWriter<AppExit>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let ui_state = &mut *ui_state;
    let editor_state = &mut *editor_state;
    let project = &mut *project;
    let views = &mut *views;

    views.map.show_grid = editor_state.show_grid;

    // Menu bar
    render_menu_bar(ctx, editor_state, project, &preferences);

    // File actions and dialogs
    render_dialogs(ctx, editor_state, project, &preferences);
    if editor_state.pending_action == Some(PendingAction::Exit) {
        editor_state.pending_action = None;
        bevy::log::info!("Exiting editor");
        exit.write(AppExit::Success);
    }

    // Settings dialog
    settings_dialog::render_settings_dialog(
        ctx,
        &mut editor_state.show_settings_dialog,
        &mut preferences,
        views.map.camera_mut(),
    );

    // Colour picker for palette edits
    render_colour_dialog(ctx, &mut views.palettes, project, &mut ui_state.colour_edit);

    // Bottom - Status bar
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            for (index, field) in status_fields(&views.map, project).iter().enumerate() {
                if index > 0 {
                    ui.separator();
                }
                ui.label(field);
            }
        });
    });

    // Left panel - Tile picker
    egui::SidePanel::left("tile_picker")
        .resizable(true)
        .default_width(ui_state.tile_picker_width)
        .show(ctx, |ui| {
            ui_state.tile_picker_width = ui.available_width();
            render_tile_picker(ui, &mut ui_state.tile_sheet, project);
        });

    // Right panel - Palettes
    if views.palettes.layout_is_stale(project) {
        views
            .palettes
            .handle_resize(project, ui_state.palettes_view_size);
    }
    let palettes_min = views.palettes.min_size();
    egui::SidePanel::right("palettes")
        .resizable(true)
        .default_width(ui_state.palettes_width)
        .min_width(palettes_min.x.max(32.0))
        .show(ctx, |ui| {
            ui_state.palettes_width = ui.available_width();
            host_view(
                ui,
                &mut views.palettes,
                project,
                &mut ui_state.palettes_view_size,
                None,
            );
        });

    // Central - Map view
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let available = ui.available_size();
            attach_pending_project(
                editor_state,
                &mut views.map,
                project,
                &mut ui_state.map_view_size,
                Vec2::new(available.x, available.y),
            );
            if editor_state.pending_reset_camera {
                editor_state.pending_reset_camera = false;
                views.map.reset_camera(project);
            }

            let response = host_view(
                ui,
                &mut views.map,
                project,
                &mut ui_state.map_view_size,
                Some(&mut ui_state.canvas_texture),
            );
            if !response.hovered() && !response.dragged() {
                views.map.pointer_left();
            }
        });
}

/// Hand a newly created or loaded project to the map view, sized to the
/// space it is about to be shown in. Returns true if it attached.
fn attach_pending_project(
    editor_state: &mut EditorState,
    map_view: &mut MapView,
    project: &mut Project,
    view_size: &mut Vec2,
    available: Vec2,
) -> bool {
    if !editor_state.pending_attach {
        return false;
    }
    editor_state.pending_attach = false;
    *view_size = available;
    map_view.handle_resize(project, available);
    map_view.set_project(project);
    true
}

/// Give the rest of `ui` to a view: forward resizes and pointer input, then
/// let it paint.
fn host_view(
    ui: &mut egui::Ui,
    view: &mut dyn EditorView,
    project: &mut Project,
    last_size: &mut Vec2,
    canvas_texture: Option<&mut Option<egui::TextureHandle>>,
) -> egui::Response {
    let (rect, response) =
        ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

    let mut redraw = Redraw::None;

    let size = Vec2::new(rect.width(), rect.height());
    if size != *last_size {
        *last_size = size;
        redraw = redraw.merge(view.handle_resize(project, size));
    }

    if response.hovered() || response.dragged() {
        if let Some(event) = pointer_event(ui, rect) {
            redraw = redraw.merge(view.handle_pointer_event(project, &event));
        }
    }

    let painter = ui.painter_at(rect);
    let mut surface = EguiSurface::new(&painter, rect.min);
    if let Some(texture) = canvas_texture {
        surface = surface.with_canvas_texture(texture);
    }
    view.handle_paint(project, &mut surface);

    // egui redraws whole frames, so the rect in `Redraw::Rect` is only a
    // trigger here. Upload cost is bounded by the canvas dirty region.
    if redraw.is_needed() {
        ui.ctx().request_repaint();
    }

    response
}

/// Sample this frame's pointer state as a view-local event
fn pointer_event(ui: &egui::Ui, rect: egui::Rect) -> Option<PointerEvent> {
    ui.input(|input| {
        let pointer = &input.pointer;
        let position = pointer.interact_pos().or(pointer.hover_pos())?;
        Some(PointerEvent {
            position: to_view_local(position, rect),
            buttons: PointerButtons {
                left: pointer.primary_down(),
                right: pointer.secondary_down(),
                middle: pointer.middle_down(),
            },
            wheel: input.raw_scroll_delta.y,
            double_click: pointer.button_double_clicked(egui::PointerButton::Primary),
        })
    })
}

fn tile_label(tile: Option<TileId>) -> String {
    tile.map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Status bar text: zoom, hovered cell and the selected tiles
fn status_fields(map_view: &MapView, project: &Project) -> [String; 4] {
    let cell = match map_view.hovered_cell() {
        Some((x, y)) => format!("Cell: {}, {}", x, y),
        None => "Cell: -".to_string(),
    };
    [
        format!("Zoom: {}x", map_view.camera().zoom()),
        cell,
        format!("Paint tile: {}", tile_label(project.paint_tile())),
        format!("Erase tile: {}", tile_label(project.erase_tile())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_fields() {
        let mut project = Project::with_defaults("Test".to_string(), 4, 4);
        project.set_erase_tile(None);
        let mut view = MapView::default();
        view.handle_resize(&project, Vec2::new(100.0, 100.0));
        view.set_project(&mut project);
        view.camera_mut().set_zoom(3.0);

        let fields = status_fields(&view, &project);
        assert_eq!(fields[0], "Zoom: 3x");
        assert_eq!(fields[1], "Cell: -");
        assert_eq!(fields[2], "Paint tile: 1");
        assert_eq!(fields[3], "Erase tile: -");
    }

    #[test]
    fn test_attach_resets_camera_on_every_load() {
        let mut editor_state = EditorState::default();
        let mut view = MapView::default();
        let mut view_size = Vec2::ZERO;
        let mut project = Project::with_defaults("Test".to_string(), 16, 16);
        let available = Vec2::new(400.0, 300.0);

        assert!(attach_pending_project(
            &mut editor_state,
            &mut view,
            &mut project,
            &mut view_size,
            available
        ));
        assert_eq!(view_size, available);
        assert_eq!(view.viewport(), available);
        assert_eq!(view.camera().pan_offset, Vec2::new(136.0, 86.0));

        // Nothing pending
        view.camera_mut().set_zoom(5.0);
        assert!(!attach_pending_project(
            &mut editor_state,
            &mut view,
            &mut project,
            &mut view_size,
            available
        ));
        assert_eq!(view.camera().zoom(), 5.0);

        // Reloading a copy keeps the project id but still resets the camera
        let mut reloaded = project.clone();
        reloaded.invalidate_map(false);
        editor_state.pending_attach = true;
        assert!(attach_pending_project(
            &mut editor_state,
            &mut view,
            &mut reloaded,
            &mut view_size,
            available
        ));
        assert_eq!(reloaded.id, project.id);
        assert_eq!(view.camera().zoom(), 1.0);
        assert!(reloaded.map_is_invalidated());
    }
}
