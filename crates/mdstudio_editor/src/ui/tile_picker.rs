//! Tileset picker panel

use bevy::math::Vec2;
use bevy_egui::egui::{self, Color32, Stroke, TextureHandle, TextureOptions};
use mdstudio_core::{TileId, TILE_SIZE};

use super::surface::to_view_local;
use crate::project::Project;
use crate::render;

/// Tiles per row in the picker
const PICKER_COLUMNS: u32 = 8;
/// On-screen scale of each tile
const PICKER_SCALE: f32 = 3.0;

const PAINT_HIGHLIGHT: Color32 = Color32::from_rgb(255, 220, 0);
const ERASE_HIGHLIGHT: Color32 = Color32::from_rgb(255, 64, 64);

/// Cached render of the tileset
#[derive(Default)]
pub struct TileSheetCache {
    texture: Option<TextureHandle>,
    tile_count: usize,
}

impl TileSheetCache {
    fn needs_refresh(&self, project: &Project) -> bool {
        self.texture.is_none()
            || project.map_is_invalidated()
            || self.tile_count != project.map().tileset().len()
    }

    fn texture(&mut self, ctx: &egui::Context, project: &Project) -> Option<&TextureHandle> {
        if self.needs_refresh(project) {
            let sheet = render::render_tileset_sheet(project, PICKER_COLUMNS);
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [sheet.width() as usize, sheet.height() as usize],
                sheet.as_raw(),
            );
            if let Some(texture) = self.texture.as_mut() {
                texture.set(image, TextureOptions::NEAREST);
            } else {
                self.texture = Some(ctx.load_texture("tile_sheet", image, TextureOptions::NEAREST));
            }
            self.tile_count = project.map().tileset().len();
        }
        self.texture.as_ref()
    }
}

/// Tile under a point local to the sheet image
pub fn tile_at(local: Vec2, tile_px: f32, columns: u32, count: u32) -> Option<TileId> {
    if tile_px <= 0.0 || local.x < 0.0 || local.y < 0.0 {
        return None;
    }
    let column = (local.x / tile_px).floor() as u32;
    let row = (local.y / tile_px).floor() as u32;
    if column >= columns {
        return None;
    }
    let id = row * columns + column;
    (id < count).then_some(id)
}

fn tile_rect(origin: egui::Pos2, id: TileId, tile_px: f32) -> egui::Rect {
    let column = (id % PICKER_COLUMNS) as f32;
    let row = (id / PICKER_COLUMNS) as f32;
    egui::Rect::from_min_size(
        origin + egui::vec2(column * tile_px, row * tile_px),
        egui::vec2(tile_px, tile_px),
    )
}

/// Render the tile picker. Left click selects the paint tile, right click the
/// erase tile.
pub fn render_tile_picker(ui: &mut egui::Ui, cache: &mut TileSheetCache, project: &mut Project) {
    ui.heading("Tiles");
    ui.label(format!("{} tiles", project.map().tileset().len()));
    ui.separator();

    let Some(texture) = cache.texture(ui.ctx(), project) else {
        return;
    };
    let texture_id = texture.id();
    let [width, height] = texture.size();
    let scale = PICKER_SCALE;
    let tile_px = TILE_SIZE as f32 * scale;
    let count = project.map().tileset().len() as u32;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = egui::vec2(width as f32 * scale, height as f32 * scale);
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            let painter = ui.painter_at(rect);
            painter.image(
                texture_id,
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );

            if let Some(id) = project.erase_tile() {
                painter.rect_stroke(
                    tile_rect(rect.min, id, tile_px),
                    0.0,
                    Stroke::new(2.0, ERASE_HIGHLIGHT),
                    egui::StrokeKind::Inside,
                );
            }
            if let Some(id) = project.paint_tile() {
                painter.rect_stroke(
                    tile_rect(rect.min, id, tile_px),
                    0.0,
                    Stroke::new(2.0, PAINT_HIGHLIGHT),
                    egui::StrokeKind::Inside,
                );
            }

            let hovered_tile = response
                .hover_pos()
                .and_then(|pos| tile_at(to_view_local(pos, rect), tile_px, PICKER_COLUMNS, count));

            if let Some(id) = hovered_tile {
                if response.clicked() {
                    project.set_paint_tile(Some(id));
                } else if response.secondary_clicked() {
                    project.set_erase_tile(Some(id));
                }
                response.on_hover_text(format!("Tile {}", id));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_at() {
        // 24px tiles, 8 columns, 17 tiles
        assert_eq!(tile_at(Vec2::new(0.0, 0.0), 24.0, 8, 17), Some(0));
        assert_eq!(tile_at(Vec2::new(50.0, 30.0), 24.0, 8, 17), Some(10));
        assert_eq!(tile_at(Vec2::new(0.0, 48.0), 24.0, 8, 17), Some(16));
        // Past the last tile on the final row
        assert_eq!(tile_at(Vec2::new(30.0, 48.0), 24.0, 8, 17), None);
        assert_eq!(tile_at(Vec2::new(200.0, 0.0), 24.0, 8, 17), None);
        assert_eq!(tile_at(Vec2::new(-1.0, 0.0), 24.0, 8, 17), None);
    }
}
