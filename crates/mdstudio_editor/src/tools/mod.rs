//! Editor tools - tile painting
//!
//! Painting writes a tile into the map grid, renders just that cell into the
//! canvas and reports the screen rectangle that needs redrawing. Full-map
//! rendering is left to `render::repaint_all`.

use bevy::math::{Rect, Vec2};
use mdstudio_core::{Map, TileId, TILE_SIZE};

use crate::camera::MapCamera;
use crate::project::Project;
use crate::render::{self, MapCanvas};

/// Map cell under a map-space point, or None if the point is off the map
pub fn cell_at(map: &Map, map_point: Vec2) -> Option<(u32, u32)> {
    let (width, height) = map.pixel_size();
    // Written so NaN fails every comparison
    let inside = map_point.x >= 0.0
        && map_point.y >= 0.0
        && map_point.x < width as f32
        && map_point.y < height as f32;
    if !inside {
        return None;
    }

    let tile_size = TILE_SIZE as f32;
    Some((
        (map_point.x / tile_size).floor() as u32,
        (map_point.y / tile_size).floor() as u32,
    ))
}

/// Map-space rectangle covered by a cell
pub fn cell_rect(cell_x: u32, cell_y: u32) -> Rect {
    let tile_size = TILE_SIZE as f32;
    let min = Vec2::new(cell_x as f32, cell_y as f32) * tile_size;
    Rect::from_corners(min, min + Vec2::splat(tile_size))
}

/// Paint a tile at a map-space point.
///
/// Returns the screen-space rectangle of the painted cell, or None if the
/// point is outside the map or the grid rejected the write (in which case
/// nothing changes). The grid write always happens for in-bounds points. If the tile or its palette can't be
/// found the canvas keeps its old pixels for that cell until the next full
/// repaint.
pub fn try_paint(
    project: &mut Project,
    canvas: &mut MapCanvas,
    camera: &MapCamera,
    map_point: Vec2,
    tile_id: TileId,
) -> Option<Rect> {
    let (cell_x, cell_y) = cell_at(project.map(), map_point)?;

    if !project.map_mut().set_tile(cell_x, cell_y, tile_id) {
        return None;
    }

    if !render::render_cell(project, canvas, cell_x, cell_y) {
        bevy::log::debug!(
            "Painted tile {} at ({}, {}) without tile or palette data; canvas not updated",
            tile_id,
            cell_x,
            cell_y
        );
    }

    Some(camera.map_to_screen_rect(cell_rect(cell_x, cell_y)))
}
