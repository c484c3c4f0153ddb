//! Palette swatch view
//!
//! Palettes are laid out as a grid of square swatches: one palette per column
//! when the view is taller than wide, one per row otherwise.

use bevy::math::{Rect, Vec2};
use mdstudio_core::{Colour, PaletteId, COLOURS_PER_PALETTE, MAX_PALETTES};

use super::{EditorView, PaintSurface, PointerEvent, Redraw};
use crate::project::Project;

/// Swatch layout direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaletteOrientation {
    /// Palettes side by side, colours running downwards
    #[default]
    Vertical,
    /// Palettes stacked, colours running across
    Horizontal,
}

/// Palette editing view
#[derive(Debug, Clone, Default)]
pub struct PalettesView {
    orientation: PaletteOrientation,
    size: Vec2,
    min_size: Vec2,
    /// Palette count `min_size` was computed for
    laid_out_palettes: usize,
    pending_colour_edit: Option<(PaletteId, usize)>,
}

impl PalettesView {
    pub fn orientation(&self) -> PaletteOrientation {
        self.orientation
    }

    /// Smallest size the host should give this view so every palette fits
    pub fn min_size(&self) -> Vec2 {
        self.min_size
    }

    /// True once the project's palette count no longer matches the last layout
    pub fn layout_is_stale(&self, project: &Project) -> bool {
        self.laid_out_palettes != project.num_palettes().min(MAX_PALETTES)
    }

    /// Edge length of one swatch in pixels (whole pixels only)
    pub fn swatch_size(&self) -> f32 {
        let long_side = match self.orientation {
            PaletteOrientation::Vertical => self.size.y,
            PaletteOrientation::Horizontal => self.size.x,
        };
        (long_side / COLOURS_PER_PALETTE as f32).floor()
    }

    /// Palette and colour index under a view-local point
    pub fn hit_test(&self, project: &Project, position: Vec2) -> Option<(PaletteId, usize)> {
        let swatch = self.swatch_size();
        if swatch <= 0.0 || position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let (along, across) = match self.orientation {
            PaletteOrientation::Vertical => (position.y, position.x),
            PaletteOrientation::Horizontal => (position.x, position.y),
        };
        let colour = (along / swatch).floor() as usize;
        let palette = (across / swatch).floor() as usize;

        if palette < MAX_PALETTES && palette < project.num_palettes() && colour < COLOURS_PER_PALETTE
        {
            Some((palette as PaletteId, colour))
        } else {
            None
        }
    }

    /// Swatch rectangle for a palette slot
    pub fn swatch_rect(&self, palette: usize, colour: usize) -> Rect {
        let swatch = self.swatch_size();
        let (column, row) = match self.orientation {
            PaletteOrientation::Vertical => (palette, colour),
            PaletteOrientation::Horizontal => (colour, palette),
        };
        let min = Vec2::new(column as f32, row as f32) * swatch;
        Rect::from_corners(min, min + Vec2::splat(swatch))
    }

    /// Slot waiting for the colour dialog, from a double click
    pub fn pending_colour_edit(&self) -> Option<(PaletteId, usize)> {
        self.pending_colour_edit
    }

    pub fn cancel_colour_edit(&mut self) {
        self.pending_colour_edit = None;
    }

    /// Write the colour chosen in the dialog into the pending slot.
    ///
    /// The map is invalidated since every tile using the palette changes.
    pub fn apply_colour_edit(&mut self, project: &mut Project, colour: Colour) -> bool {
        let Some((palette_id, colour_id)) = self.pending_colour_edit.take() else {
            return false;
        };
        let Some(palette) = project.palette_mut(palette_id) else {
            return false;
        };
        palette.set_colour(colour_id, colour);
        project.mark_dirty();
        project.invalidate_map(true);
        true
    }
}

impl EditorView for PalettesView {
    fn handle_pointer_event(&mut self, project: &mut Project, event: &PointerEvent) -> Redraw {
        let Some((palette_id, colour_id)) = self.hit_test(project, event.position) else {
            return Redraw::None;
        };
        let Some(palette) = project.palette(palette_id) else {
            return Redraw::None;
        };

        if event.double_click {
            self.pending_colour_edit = Some((palette_id, colour_id));
        }

        if palette.is_colour_used(colour_id) && event.buttons.left {
            project.set_paint_colour(Some(colour_id as u8));
        }

        Redraw::None
    }

    fn handle_paint(&mut self, project: &mut Project, surface: &mut dyn PaintSurface) {
        surface.fill_rect(Rect::from_corners(Vec2::ZERO, self.size), Colour::BLACK);

        for palette_id in 0..project.num_palettes().min(MAX_PALETTES) {
            let Some(palette) = project.palette(palette_id as PaletteId) else {
                continue;
            };
            for colour_id in 0..COLOURS_PER_PALETTE {
                let rect = self.swatch_rect(palette_id, colour_id);
                match palette.colour(colour_id) {
                    Some(colour) if palette.is_colour_used(colour_id) => {
                        surface.fill_rect(rect, colour)
                    }
                    _ => surface.hatch_rect(rect),
                }
            }
        }
    }

    fn handle_resize(&mut self, project: &Project, size: Vec2) -> Redraw {
        self.size = size;
        self.laid_out_palettes = project.num_palettes().min(MAX_PALETTES);
        let palettes = self.laid_out_palettes as f32;

        if size.x > size.y {
            self.orientation = PaletteOrientation::Horizontal;
            // Limit height
            self.min_size = Vec2::new(1.0, self.swatch_size() * palettes);
        } else {
            self.orientation = PaletteOrientation::Vertical;
            // Limit width
            self.min_size = Vec2::new(self.swatch_size() * palettes, 1.0);
        }

        Redraw::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{PointerButtons, RecordingSurface};
    use mdstudio_core::Palette;

    const LEFT: PointerButtons = PointerButtons {
        left: true,
        right: false,
        middle: false,
    };

    fn project_with_palettes(count: usize) -> Project {
        let mut project = Project::with_defaults("Test".to_string(), 4, 4);
        for _ in 1..count {
            let mut palette = Palette::new();
            palette.set_colour(0, Colour::WHITE);
            project.add_palette(palette);
        }
        project
    }

    #[test]
    fn test_resize_picks_orientation() {
        let project = project_with_palettes(2);
        let mut view = PalettesView::default();

        view.handle_resize(&project, Vec2::new(64.0, 330.0));
        assert_eq!(view.orientation(), PaletteOrientation::Vertical);
        // 330 / 16 -> 20px swatches, two palettes wide
        assert_eq!(view.swatch_size(), 20.0);
        assert_eq!(view.min_size(), Vec2::new(40.0, 1.0));

        view.handle_resize(&project, Vec2::new(480.0, 100.0));
        assert_eq!(view.orientation(), PaletteOrientation::Horizontal);
        assert_eq!(view.swatch_size(), 30.0);
        assert_eq!(view.min_size(), Vec2::new(1.0, 60.0));
    }

    #[test]
    fn test_layout_goes_stale_with_palette_count() {
        let mut project = project_with_palettes(1);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));
        assert!(!view.layout_is_stale(&project));
        assert_eq!(view.min_size(), Vec2::new(20.0, 1.0));

        project.add_palette(Palette::new());
        project.add_palette(Palette::new());
        assert!(view.layout_is_stale(&project));

        view.handle_resize(&project, Vec2::new(64.0, 320.0));
        assert!(!view.layout_is_stale(&project));
        assert_eq!(view.min_size(), Vec2::new(60.0, 1.0));
    }

    #[test]
    fn test_hit_test_vertical() {
        let project = project_with_palettes(2);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));

        assert_eq!(view.hit_test(&project, Vec2::new(5.0, 5.0)), Some((0, 0)));
        assert_eq!(view.hit_test(&project, Vec2::new(25.0, 65.0)), Some((1, 3)));
        // Third column has no palette
        assert_eq!(view.hit_test(&project, Vec2::new(45.0, 5.0)), None);
        // Past the last colour
        assert_eq!(view.hit_test(&project, Vec2::new(5.0, 321.0)), None);
        assert_eq!(view.hit_test(&project, Vec2::new(-1.0, 5.0)), None);
    }

    #[test]
    fn test_hit_test_horizontal() {
        let project = project_with_palettes(4);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(320.0, 80.0));

        assert_eq!(view.hit_test(&project, Vec2::new(65.0, 25.0)), Some((1, 3)));
        assert_eq!(view.hit_test(&project, Vec2::new(319.0, 79.0)), Some((3, 15)));
        assert_eq!(view.hit_test(&project, Vec2::new(5.0, 81.0)), None);
    }

    #[test]
    fn test_click_selects_used_colour_only() {
        let mut project = project_with_palettes(2);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));

        // Palette 0 colour 4 is used
        let event = PointerEvent::moved(Vec2::new(5.0, 85.0)).with_buttons(LEFT);
        view.handle_pointer_event(&mut project, &event);
        assert_eq!(project.paint_colour(), Some(4));

        // Palette 1 only uses colour 0
        let event = PointerEvent::moved(Vec2::new(25.0, 85.0)).with_buttons(LEFT);
        view.handle_pointer_event(&mut project, &event);
        assert_eq!(project.paint_colour(), Some(4));

        // Releasing over a used colour doesn't select
        let event = PointerEvent::moved(Vec2::new(5.0, 5.0));
        view.handle_pointer_event(&mut project, &event);
        assert_eq!(project.paint_colour(), Some(4));
    }

    #[test]
    fn test_double_click_edits_colour() {
        let mut project = project_with_palettes(2);
        project.invalidate_map(false);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));

        // Double click works on unused slots too
        let event = PointerEvent::moved(Vec2::new(25.0, 45.0)).with_double_click();
        view.handle_pointer_event(&mut project, &event);
        assert_eq!(view.pending_colour_edit(), Some((1, 2)));

        assert!(view.apply_colour_edit(&mut project, Colour::new(9, 8, 7)));
        assert_eq!(view.pending_colour_edit(), None);
        let palette = project.palette(1).unwrap();
        assert_eq!(palette.colour(2), Some(Colour::new(9, 8, 7)));
        assert!(palette.is_colour_used(2));
        assert!(project.map_is_invalidated());
        assert!(project.is_dirty());

        // Nothing pending
        assert!(!view.apply_colour_edit(&mut project, Colour::WHITE));
    }

    #[test]
    fn test_cancel_colour_edit() {
        let mut project = project_with_palettes(1);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));

        let event = PointerEvent::moved(Vec2::new(5.0, 5.0)).with_double_click();
        view.handle_pointer_event(&mut project, &event);
        view.cancel_colour_edit();
        assert!(!view.apply_colour_edit(&mut project, Colour::WHITE));
    }

    #[test]
    fn test_paint_draws_swatches_and_hatches() {
        let mut project = project_with_palettes(2);
        let mut view = PalettesView::default();
        view.handle_resize(&project, Vec2::new(64.0, 320.0));

        let mut surface = RecordingSurface::default();
        view.handle_paint(&mut project, &mut surface);

        // Background + 16 used colours in palette 0 + 1 used colour in palette 1
        assert_eq!(surface.fills.len(), 1 + 16 + 1);
        assert_eq!(surface.fills[0].1, Colour::BLACK);
        assert_eq!(surface.hatches.len(), 15);
        assert_eq!(surface.hatches[0], Rect::new(20.0, 20.0, 40.0, 40.0));
    }
}
