//! egui implementation of the view paint surface

use bevy::math::{Rect, URect, Vec2};
use bevy_egui::egui::{self, Color32, ColorImage, Pos2, Stroke, TextureHandle, TextureOptions};
use image::Rgba;
use mdstudio_core::Colour;

use crate::render::{MapCanvas, HATCH_GAP, HATCH_INK, HATCH_SPACING};
use crate::view::PaintSurface;

/// Map pixels stay crisp at any zoom
const CANVAS_TEXTURE_OPTIONS: TextureOptions = TextureOptions::NEAREST;

pub fn colour32(colour: Colour) -> Color32 {
    Color32::from_rgb(colour.r, colour.g, colour.b)
}

fn rgba32(pixel: Rgba<u8>) -> Color32 {
    let [r, g, b, a] = pixel.0;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Convert an egui screen position into coordinates local to `view`
pub fn to_view_local(position: Pos2, view: egui::Rect) -> Vec2 {
    Vec2::new(position.x - view.min.x, position.y - view.min.y)
}

/// Draws view output with an egui painter. Coordinates given by views are
/// offset by the top-left of the view's allocated rectangle.
pub struct EguiSurface<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    /// GPU copy of the map canvas, created on first blit
    texture: Option<&'a mut Option<TextureHandle>>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Pos2) -> Self {
        Self {
            painter,
            origin,
            texture: None,
        }
    }

    /// Attach the texture slot the map canvas is uploaded into
    pub fn with_canvas_texture(mut self, texture: &'a mut Option<TextureHandle>) -> Self {
        self.texture = Some(texture);
        self
    }

    fn to_screen(&self, point: Vec2) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y)
    }

    fn to_screen_rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_max(self.to_screen(rect.min), self.to_screen(rect.max))
    }
}

/// What `sync_canvas_texture` sent to the texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CanvasUpload {
    /// Texture (re)created from the whole canvas
    Full,
    /// Only this canvas region was written
    Partial(URect),
    Unchanged,
}

/// Upload changed canvas texels, creating the texture when missing or the
/// canvas size changed.
fn sync_canvas_texture(
    ctx: &egui::Context,
    slot: &mut Option<TextureHandle>,
    canvas: &mut MapCanvas,
) -> (egui::TextureId, CanvasUpload) {
    let size = [canvas.width() as usize, canvas.height() as usize];
    let dirty = canvas.take_dirty_region();

    if let Some(texture) = slot.as_mut().filter(|texture| texture.size() == size) {
        let Some(region) = dirty else {
            return (texture.id(), CanvasUpload::Unchanged);
        };
        let pixels = image::imageops::crop_imm(
            canvas.image(),
            region.min.x,
            region.min.y,
            region.width(),
            region.height(),
        )
        .to_image();
        let patch = ColorImage::from_rgba_unmultiplied(
            [region.width() as usize, region.height() as usize],
            pixels.as_raw(),
        );
        texture.set_partial(
            [region.min.x as usize, region.min.y as usize],
            patch,
            CANVAS_TEXTURE_OPTIONS,
        );
        return (texture.id(), CanvasUpload::Partial(region));
    }

    let image = ColorImage::from_rgba_unmultiplied(size, canvas.image().as_raw());
    let texture = ctx.load_texture("map_canvas", image, CANVAS_TEXTURE_OPTIONS);
    let id = texture.id();
    *slot = Some(texture);
    (id, CanvasUpload::Full)
}

impl PaintSurface for EguiSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        self.painter
            .rect_filled(self.to_screen_rect(rect), 0.0, colour32(colour));
    }

    fn hatch_rect(&mut self, rect: Rect) {
        let rect = self.to_screen_rect(rect);
        self.painter.rect_filled(rect, 0.0, rgba32(HATCH_GAP));

        let painter = self
            .painter
            .with_clip_rect(rect.intersect(self.painter.clip_rect()));
        let stroke = Stroke::new(1.0, rgba32(HATCH_INK));
        let height = rect.height();
        let span = rect.width() + height;
        let spacing = HATCH_SPACING as f32;

        let mut offset = 0.0;
        while offset <= span {
            let forward = rect.min.x + offset;
            painter.line_segment(
                [Pos2::new(forward, rect.min.y), Pos2::new(forward - height, rect.max.y)],
                stroke,
            );
            let backward = rect.max.x - offset;
            painter.line_segment(
                [Pos2::new(backward, rect.min.y), Pos2::new(backward + height, rect.max.y)],
                stroke,
            );
            offset += spacing;
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, colour: Colour) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            Stroke::new(1.0, colour32(colour)),
        );
    }

    fn blit_canvas(&mut self, canvas: &mut MapCanvas, source: Rect, dest: Rect) {
        let Some(slot) = self.texture.as_deref_mut() else {
            bevy::log::warn!("Canvas blit on a surface without a canvas texture");
            return;
        };
        let (id, upload) = sync_canvas_texture(self.painter.ctx(), slot, canvas);
        if let CanvasUpload::Partial(region) = upload {
            bevy::log::trace!(
                "Uploaded {}x{} canvas texels at ({}, {})",
                region.width(),
                region.height(),
                region.min.x,
                region.min.y
            );
        }

        let size = canvas.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let uv = egui::Rect::from_min_max(
            Pos2::new(source.min.x / size.x, source.min.y / size.y),
            Pos2::new(source.max.x / size.x, source.max.y / size.y),
        );
        self.painter
            .image(id, self.to_screen_rect(dest), uv, Color32::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::MapCamera;
    use crate::project::Project;
    use crate::{render, tools};

    #[test]
    fn test_to_view_local() {
        let view = egui::Rect::from_min_size(Pos2::new(100.0, 40.0), egui::vec2(300.0, 200.0));
        assert_eq!(to_view_local(Pos2::new(112.0, 60.0), view), Vec2::new(12.0, 20.0));
        assert_eq!(to_view_local(Pos2::new(90.0, 40.0), view), Vec2::new(-10.0, 0.0));
    }

    fn painted_canvas(width: u32, height: u32) -> (Project, MapCanvas) {
        let mut project = Project::with_defaults("Test".to_string(), width, height);
        let mut canvas = MapCanvas::default();
        render::repaint_all(&mut project, &mut canvas);
        (project, canvas)
    }

    #[test]
    fn test_first_sync_uploads_whole_canvas() {
        let ctx = egui::Context::default();
        let (_project, mut canvas) = painted_canvas(4, 3);
        let mut slot = None;

        let (id, upload) = sync_canvas_texture(&ctx, &mut slot, &mut canvas);
        assert_eq!(upload, CanvasUpload::Full);
        let texture = slot.as_ref().unwrap();
        assert_eq!(texture.id(), id);
        assert_eq!(texture.size(), [32, 24]);
        assert!(!canvas.has_dirty_region());

        let (_, upload) = sync_canvas_texture(&ctx, &mut slot, &mut canvas);
        assert_eq!(upload, CanvasUpload::Unchanged);
    }

    #[test]
    fn test_painted_cell_uploads_only_its_texels() {
        let ctx = egui::Context::default();
        let (mut project, mut canvas) = painted_canvas(4, 3);
        let mut slot = None;
        let (first_id, _) = sync_canvas_texture(&ctx, &mut slot, &mut canvas);

        let camera = MapCamera::default();
        tools::try_paint(&mut project, &mut canvas, &camera, Vec2::new(17.0, 9.0), 2).unwrap();

        let (id, upload) = sync_canvas_texture(&ctx, &mut slot, &mut canvas);
        assert_eq!(id, first_id);
        assert_eq!(upload, CanvasUpload::Partial(URect::new(16, 8, 24, 16)));
    }

    #[test]
    fn test_resized_canvas_reallocates_texture() {
        let ctx = egui::Context::default();
        let (_project, mut canvas) = painted_canvas(4, 3);
        let mut slot = None;
        sync_canvas_texture(&ctx, &mut slot, &mut canvas);

        let (mut larger, _) = painted_canvas(6, 5);
        render::repaint_all(&mut larger, &mut canvas);

        let (_, upload) = sync_canvas_texture(&ctx, &mut slot, &mut canvas);
        assert_eq!(upload, CanvasUpload::Full);
        assert_eq!(slot.as_ref().map(|texture| texture.size()), Some([48, 40]));
    }

    #[test]
    fn test_colour_conversion() {
        assert_eq!(colour32(Colour::new(1, 2, 3)), Color32::from_rgb(1, 2, 3));
        assert_eq!(rgba32(HATCH_INK), Color32::from_rgb(255, 0, 0));
    }
}
