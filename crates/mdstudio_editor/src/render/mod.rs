//! Off-screen map canvas and tile rendering
//!
//! The canvas caches the rendered pixels of the whole map at 1:1 scale. Single
//! tiles are rendered into it as they are painted; a full repaint is only done
//! when the project flags the map as invalidated. The region written since the
//! last upload is tracked so the display layer can upload only changed texels.

use bevy::math::{URect, UVec2, Vec2};
use image::{Rgba, RgbaImage};
use mdstudio_core::{Palette, Tile, TILE_SIZE};

use crate::project::Project;

/// Canvas colour where no tile has been drawn
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 0]);
/// Hatch stripe colour for unused palette entries
pub const HATCH_INK: Rgba<u8> = Rgba([255, 0, 0, 255]);
/// Hatch gap colour for unused palette entries
pub const HATCH_GAP: Rgba<u8> = Rgba([64, 0, 0, 255]);

/// Spacing of the cross-diagonal hatch pattern in pixels
pub const HATCH_SPACING: u32 = 4;

/// Pixel colour of the cross-diagonal hatch at a canvas position.
///
/// The pattern is anchored to canvas coordinates so neighbouring unused
/// pixels join into continuous stripes.
pub fn hatch_pixel(x: u32, y: u32) -> Rgba<u8> {
    let forward = (x + y) % HATCH_SPACING == 0;
    let backward = (x + HATCH_SPACING - y % HATCH_SPACING) % HATCH_SPACING == 0;
    if forward || backward {
        HATCH_INK
    } else {
        HATCH_GAP
    }
}

/// Off-screen pixel buffer covering the full map
#[derive(Debug, Clone)]
pub struct MapCanvas {
    image: RgbaImage,
    /// Pixel region written since the last `take_dirty_region`
    dirty: Option<URect>,
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self::new(
            mdstudio_core::DEFAULT_MAP_WIDTH * TILE_SIZE,
            mdstudio_core::DEFAULT_MAP_HEIGHT * TILE_SIZE,
        )
    }
}

impl MapCanvas {
    /// Create a blank canvas of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, CANVAS_BACKGROUND),
            dirty: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Canvas size in map-space pixels
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Read a single pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.image.get_pixel(x, y).0)
    }

    /// Reallocate to a new size if it differs. Returns true if reallocated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width() == width && self.height() == height {
            return false;
        }
        self.image = RgbaImage::from_pixel(width, height, CANVAS_BACKGROUND);
        self.mark_all_dirty();
        true
    }

    /// Reset every pixel to the background colour
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = CANVAS_BACKGROUND;
        }
        self.mark_all_dirty();
    }

    /// Flag the whole canvas for upload
    pub fn mark_all_dirty(&mut self) {
        self.dirty = Some(URect::new(0, 0, self.width(), self.height()));
    }

    /// Get and clear the region changed since the last call
    pub fn take_dirty_region(&mut self) -> Option<URect> {
        self.dirty.take()
    }

    pub fn has_dirty_region(&self) -> bool {
        self.dirty.is_some()
    }

    fn mark_region_dirty(&mut self, region: URect) {
        self.dirty = Some(match self.dirty {
            Some(existing) => existing.union(region),
            None => region,
        });
    }

    /// Render one tile into the cell at `(cell_x, cell_y)`.
    ///
    /// Each pixel's palette index resolves to its colour, or to the hatch
    /// pattern when the palette marks that index unused.
    pub fn draw_tile(&mut self, cell_x: u32, cell_y: u32, tile: &Tile, palette: &Palette) {
        let origin_x = cell_x * TILE_SIZE;
        let origin_y = cell_y * TILE_SIZE;
        if origin_x + TILE_SIZE > self.width() || origin_y + TILE_SIZE > self.height() {
            return;
        }

        for py in 0..TILE_SIZE {
            for px in 0..TILE_SIZE {
                let x = origin_x + px;
                let y = origin_y + py;
                let index = tile.pixel(px, py).unwrap_or(0) as usize;
                let colour = match palette.colour(index) {
                    Some(colour) if palette.is_colour_used(index) => Rgba(colour.to_rgba()),
                    _ => hatch_pixel(x, y),
                };
                self.image.put_pixel(x, y, colour);
            }
        }

        self.mark_region_dirty(URect::from_corners(
            UVec2::new(origin_x, origin_y),
            UVec2::new(origin_x + TILE_SIZE, origin_y + TILE_SIZE),
        ));
    }
}

/// Render a map cell from the project's grid, tileset and palettes.
///
/// Returns false (leaving the canvas untouched) when the cell's tile or the
/// tile's palette can't be found.
pub fn render_cell(project: &Project, canvas: &mut MapCanvas, cell_x: u32, cell_y: u32) -> bool {
    let map = project.map();
    let Some(tile_id) = map.get_tile(cell_x, cell_y) else {
        return false;
    };
    let Some(tile) = map.tileset().get_tile(tile_id) else {
        return false;
    };
    let Some(palette) = project.palette(tile.palette_id()) else {
        return false;
    };
    canvas.draw_tile(cell_x, cell_y, tile, palette);
    true
}

/// Redraw the entire map into the canvas and clear the project's invalidated
/// flag. The canvas is resized to the map first if needed.
pub fn repaint_all(project: &mut Project, canvas: &mut MapCanvas) {
    let (width, height) = project.map().pixel_size();
    if !canvas.resize(width, height) {
        canvas.clear();
    }

    let mut missing = 0usize;
    for y in 0..project.map().height() {
        for x in 0..project.map().width() {
            if !render_cell(project, canvas, x, y) {
                missing += 1;
            }
        }
    }

    if missing > 0 {
        bevy::log::debug!("Repainted map with {} cells missing tile or palette data", missing);
    }

    project.invalidate_map(false);
}

/// Run a full repaint only if the project has flagged the map invalidated.
/// Returns true if a repaint happened.
pub fn refresh(project: &mut Project, canvas: &mut MapCanvas) -> bool {
    if !project.map_is_invalidated() {
        return false;
    }
    repaint_all(project, canvas);
    true
}

/// Render every tile of the tileset into a sheet `columns` tiles wide
pub fn render_tileset_sheet(project: &Project, columns: u32) -> RgbaImage {
    let columns = columns.max(1);
    let count = project.map().tileset().len() as u32;
    let rows = count.div_ceil(columns).max(1);
    let mut sheet = MapCanvas::new(columns * TILE_SIZE, rows * TILE_SIZE);

    for (id, tile) in project.map().tileset().iter() {
        if let Some(palette) = project.palette(tile.palette_id()) {
            sheet.draw_tile(id % columns, id / columns, tile, palette);
        }
    }

    sheet.image
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdstudio_core::Colour;

    fn two_colour_palette() -> Palette {
        Palette::from_colours(&[Colour::new(10, 20, 30), Colour::new(200, 100, 50)])
    }

    #[test]
    fn test_draw_tile_resolves_colours() {
        let mut canvas = MapCanvas::new(16, 16);
        let mut tile = Tile::filled(0, 1);
        tile.set_pixel(0, 0, 0);

        canvas.draw_tile(1, 1, &tile, &two_colour_palette());

        assert_eq!(canvas.pixel(8, 8), Some([10, 20, 30, 255]));
        assert_eq!(canvas.pixel(9, 8), Some([200, 100, 50, 255]));
        assert_eq!(canvas.pixel(15, 15), Some([200, 100, 50, 255]));
        // Neighbouring cell untouched
        assert_eq!(canvas.pixel(7, 7), Some(CANVAS_BACKGROUND.0));
    }

    #[test]
    fn test_unused_colour_draws_hatch() {
        let mut canvas = MapCanvas::new(8, 8);
        // Index 5 is unused in this palette
        canvas.draw_tile(0, 0, &Tile::filled(0, 5), &two_colour_palette());

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(canvas.pixel(x, y), Some(hatch_pixel(x, y).0));
            }
        }
        assert_eq!(hatch_pixel(0, 0), HATCH_INK);
        assert_eq!(hatch_pixel(1, 0), HATCH_GAP);
        assert_eq!(hatch_pixel(3, 1), HATCH_INK);
        assert_eq!(hatch_pixel(1, 1), HATCH_INK);
    }

    #[test]
    fn test_dirty_region_tracking() {
        let mut canvas = MapCanvas::new(32, 32);
        assert!(canvas.take_dirty_region().is_none());

        let palette = two_colour_palette();
        canvas.draw_tile(0, 0, &Tile::new(0), &palette);
        canvas.draw_tile(2, 1, &Tile::new(0), &palette);

        let region = canvas.take_dirty_region().unwrap();
        assert_eq!(region.min, UVec2::new(0, 0));
        assert_eq!(region.max, UVec2::new(24, 16));
        assert!(!canvas.has_dirty_region());
    }

    #[test]
    fn test_draw_tile_outside_canvas_is_ignored() {
        let mut canvas = MapCanvas::new(8, 8);
        canvas.draw_tile(1, 0, &Tile::new(0), &two_colour_palette());
        assert!(canvas.take_dirty_region().is_none());
    }

    #[test]
    fn test_repaint_all_resizes_and_clears_flag() {
        let mut project = Project::with_defaults("Test".to_string(), 4, 3);
        project.map_mut().set_tile(1, 1, 2);
        let mut canvas = MapCanvas::new(8, 8);

        assert!(refresh(&mut project, &mut canvas));
        assert_eq!((canvas.width(), canvas.height()), (32, 24));
        assert!(!project.map_is_invalidated());

        // Tile 2 is a solid fill of palette colour 1 (white)
        assert_eq!(canvas.pixel(8, 8), Some([255, 255, 255, 255]));
        // Tile 0 is a fill of palette colour 0 (black)
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));

        // Clean canvas is not repainted
        assert!(!refresh(&mut project, &mut canvas));
    }

    #[test]
    fn test_repaint_all_is_idempotent() {
        let mut project = Project::with_defaults("Test".to_string(), 6, 5);
        if let Some(palette) = project.palette_mut(0) {
            palette.set_colour_used(3, false);
        }
        for (i, (x, y)) in [(0, 0), (5, 4), (2, 3), (4, 1)].into_iter().enumerate() {
            project.map_mut().set_tile(x, y, i as u32 + 3);
        }
        let mut canvas = MapCanvas::default();

        repaint_all(&mut project, &mut canvas);
        let first = canvas.image().clone();
        repaint_all(&mut project, &mut canvas);
        assert_eq!(canvas.image().as_raw(), first.as_raw());
    }

    #[test]
    fn test_repaint_all_clears_cells_with_missing_tiles() {
        let mut project = Project::with_defaults("Test".to_string(), 2, 1);
        let mut canvas = MapCanvas::default();
        repaint_all(&mut project, &mut canvas);
        assert_eq!(canvas.pixel(8, 0), Some([0, 0, 0, 255]));

        // Point a cell at a tile the tileset doesn't have
        project.map_mut().set_tile(1, 0, 999);
        project.invalidate_map(true);
        repaint_all(&mut project, &mut canvas);
        assert_eq!(canvas.pixel(8, 0), Some(CANVAS_BACKGROUND.0));
    }

    #[test]
    fn test_tileset_sheet_layout() {
        let project = Project::with_defaults("Test".to_string(), 2, 2);
        // 17 tiles over 8 columns -> 3 rows
        let sheet = render_tileset_sheet(&project, 8);
        assert_eq!((sheet.width(), sheet.height()), (64, 24));
        // Tile 2 (white fill) lands in column 2 of row 0
        assert_eq!(sheet.get_pixel(16, 0).0, [255, 255, 255, 255]);
        // Past the last tile stays background
        assert_eq!(sheet.get_pixel(63, 23).0, CANVAS_BACKGROUND.0);
    }
}
