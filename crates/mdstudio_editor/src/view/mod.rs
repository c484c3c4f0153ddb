//! Toolkit-independent editor views
//!
//! A view receives pointer, paint and resize callbacks from whatever windowing
//! layer hosts it. Views draw through the `PaintSurface` trait and report what
//! needs redrawing with `Redraw`, so the UI layer only has to translate its
//! own input and drawing primitives.

mod map_view;
mod palette_view;

pub use map_view::{MapView, MAP_VIEW_BACKGROUND};
pub use palette_view::{PaletteOrientation, PalettesView};

use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;
use mdstudio_core::Colour;

use crate::project::Project;
use crate::render::MapCanvas;

/// Pointer buttons held during an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    /// Paint
    pub left: bool,
    /// Erase
    pub right: bool,
    /// Pan
    pub middle: bool,
}

/// A pointer event in view-local screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub buttons: PointerButtons,
    /// Raw wheel rotation. Only the sign matters.
    pub wheel: f32,
    pub double_click: bool,
}

impl PointerEvent {
    /// A plain move with no buttons held
    pub fn moved(position: Vec2) -> Self {
        Self {
            position,
            buttons: PointerButtons::default(),
            wheel: 0.0,
            double_click: false,
        }
    }

    pub fn with_buttons(mut self, buttons: PointerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn with_wheel(mut self, wheel: f32) -> Self {
        self.wheel = wheel;
        self
    }

    pub fn with_double_click(mut self) -> Self {
        self.double_click = true;
        self
    }
}

/// Region of a view that must be redrawn after handling an event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Redraw {
    None,
    /// Screen-space rectangle
    Rect(Rect),
    Full,
}

impl Redraw {
    /// Combine two redraw requests into one covering both
    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Full, _) | (_, Redraw::Full) => Redraw::Full,
            (Redraw::None, other) | (other, Redraw::None) => other,
            (Redraw::Rect(a), Redraw::Rect(b)) => Redraw::Rect(a.union(b)),
        }
    }

    pub fn is_needed(&self) -> bool {
        !matches!(self, Redraw::None)
    }
}

/// Drawing primitives a view needs from the host surface.
/// All rectangles and points are in view-local screen space.
pub trait PaintSurface {
    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    /// Fill a rectangle with the "unused colour" hatch pattern
    fn hatch_rect(&mut self, rect: Rect);

    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour);

    /// Copy `source` (map-space pixels of `canvas`) stretched onto `dest`
    fn blit_canvas(&mut self, canvas: &mut MapCanvas, source: Rect, dest: Rect);
}

/// Capability set every editor view implements
pub trait EditorView {
    fn handle_pointer_event(&mut self, project: &mut Project, event: &PointerEvent) -> Redraw;

    fn handle_paint(&mut self, project: &mut Project, surface: &mut dyn PaintSurface);

    fn handle_resize(&mut self, project: &Project, size: Vec2) -> Redraw;
}

/// The views hosted by the editor window
#[derive(Resource, Default)]
pub struct EditorViews {
    pub map: MapView,
    pub palettes: PalettesView,
}

/// Surface that records calls, for view tests
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingSurface {
    pub fills: Vec<(Rect, Colour)>,
    pub hatches: Vec<Rect>,
    pub lines: Vec<(Vec2, Vec2)>,
    pub blits: Vec<(Rect, Rect)>,
}

#[cfg(test)]
impl PaintSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.fills.push((rect, colour));
    }

    fn hatch_rect(&mut self, rect: Rect) {
        self.hatches.push(rect);
    }

    fn line(&mut self, from: Vec2, to: Vec2, _colour: Colour) {
        self.lines.push((from, to));
    }

    fn blit_canvas(&mut self, canvas: &mut MapCanvas, source: Rect, dest: Rect) {
        canvas.take_dirty_region();
        self.blits.push((source, dest));
    }
}
