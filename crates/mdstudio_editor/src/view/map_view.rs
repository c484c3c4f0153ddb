//! Map view: pan/zoom camera over the tile canvas with paint and erase

use bevy::math::{Rect, Vec2};
use mdstudio_core::{Colour, TILE_SIZE};

use super::{EditorView, PaintSurface, PointerEvent, Redraw};
use crate::camera::MapCamera;
use crate::project::Project;
use crate::render::{self, MapCanvas};
use crate::tools;

/// Colour behind the map canvas
pub const MAP_VIEW_BACKGROUND: Colour = Colour::new(192, 192, 192);
/// Colour of the cell grid overlay
const GRID_COLOUR: Colour = Colour::new(96, 96, 96);
/// Grid lines are only drawn from this zoom upwards
const GRID_MIN_ZOOM: f32 = 2.0;

/// Editable view of the project map
#[derive(Debug, Clone, Default)]
pub struct MapView {
    camera: MapCamera,
    canvas: MapCanvas,
    viewport: Vec2,
    previous_position: Option<Vec2>,
    hovered_cell: Option<(u32, u32)>,
    pub show_grid: bool,
}

impl MapView {
    pub fn new(pan_speed: f32, zoom_speed: f32) -> Self {
        Self {
            camera: MapCamera::new(pan_speed, zoom_speed),
            ..Default::default()
        }
    }

    /// Attach a project: zoom reset to 1x, camera centred on the map and the
    /// whole map flagged for repaint.
    pub fn set_project(&mut self, project: &mut Project) -> Redraw {
        let (width, height) = project.map().pixel_size();
        self.camera
            .reset(Vec2::new(width as f32, height as f32), self.viewport);
        self.previous_position = None;
        self.hovered_cell = None;
        project.invalidate_map(true);
        Redraw::Full
    }

    /// Re-centre at 1x zoom on the current map
    pub fn reset_camera(&mut self, project: &Project) -> Redraw {
        let (width, height) = project.map().pixel_size();
        self.camera
            .reset(Vec2::new(width as f32, height as f32), self.viewport);
        Redraw::Full
    }

    /// Forget drag state when the pointer leaves the view
    pub fn pointer_left(&mut self) {
        self.previous_position = None;
        self.hovered_cell = None;
    }

    pub fn camera(&self) -> &MapCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut MapCamera {
        &mut self.camera
    }

    pub fn canvas(&self) -> &MapCanvas {
        &self.canvas
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Map cell under the pointer from the last event
    pub fn hovered_cell(&self) -> Option<(u32, u32)> {
        self.hovered_cell
    }

    fn draw_grid(&self, surface: &mut dyn PaintSurface, visible: Rect) {
        let cell = TILE_SIZE as f32 * self.camera.zoom();
        let origin = self.camera.pan_offset;

        let first_x = ((visible.min.x - origin.x) / cell).ceil() as i32;
        let last_x = ((visible.max.x - origin.x) / cell).floor() as i32;
        for i in first_x..=last_x {
            let x = origin.x + i as f32 * cell;
            surface.line(
                Vec2::new(x, visible.min.y),
                Vec2::new(x, visible.max.y),
                GRID_COLOUR,
            );
        }

        let first_y = ((visible.min.y - origin.y) / cell).ceil() as i32;
        let last_y = ((visible.max.y - origin.y) / cell).floor() as i32;
        for i in first_y..=last_y {
            let y = origin.y + i as f32 * cell;
            surface.line(
                Vec2::new(visible.min.x, y),
                Vec2::new(visible.max.x, y),
                GRID_COLOUR,
            );
        }
    }
}

impl EditorView for MapView {
    fn handle_pointer_event(&mut self, project: &mut Project, event: &PointerEvent) -> Redraw {
        // The map scrolls opposite to the drag
        let delta = self
            .previous_position
            .map(|previous| previous - event.position)
            .unwrap_or(Vec2::ZERO);
        self.previous_position = Some(event.position);

        let map_point = self.camera.screen_to_map(event.position);
        self.hovered_cell = tools::cell_at(project.map(), map_point);

        let mut redraw = Redraw::None;

        // Paint/erase
        if self.hovered_cell.is_some() {
            let tile = if event.buttons.left {
                project.paint_tile()
            } else if event.buttons.right {
                project.erase_tile()
            } else {
                None
            };

            if let Some(tile) = tile {
                if let Some(rect) =
                    tools::try_paint(project, &mut self.canvas, &self.camera, map_point, tile)
                {
                    redraw = redraw.merge(Redraw::Rect(rect));
                }
            }
        }

        // Camera pan/zoom
        if event.buttons.middle && delta != Vec2::ZERO {
            self.camera.pan(delta);
            redraw = Redraw::Full;
        } else if event.wheel != 0.0 {
            self.camera.zoom_wheel(event.wheel);
            redraw = Redraw::Full;
        }

        redraw
    }

    fn handle_paint(&mut self, project: &mut Project, surface: &mut dyn PaintSurface) {
        render::refresh(project, &mut self.canvas);

        let view_rect = Rect::from_corners(Vec2::ZERO, self.viewport);
        surface.fill_rect(view_rect, MAP_VIEW_BACKGROUND);

        let canvas_rect = Rect::from_corners(Vec2::ZERO, self.canvas.size());
        let visible = self
            .camera
            .map_to_screen_rect(canvas_rect)
            .intersect(view_rect);
        if visible.is_empty() {
            return;
        }

        let source = self.camera.screen_to_map_rect(visible);
        surface.blit_canvas(&mut self.canvas, source, visible);

        if self.show_grid && self.camera.zoom() >= GRID_MIN_ZOOM {
            self.draw_grid(surface, visible);
        }
    }

    fn handle_resize(&mut self, _project: &Project, size: Vec2) -> Redraw {
        self.viewport = size;
        Redraw::Full
    }
}
