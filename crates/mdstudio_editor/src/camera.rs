//! Pan/zoom camera for the map view
//!
//! Screen space is the view-local pixel space of the visible panel. Map space
//! is the unzoomed pixel space of the tile grid. The two are related by
//! `screen = map * zoom + pan_offset`.
//!
//! ```rust,ignore
//! use bevy::math::Vec2;
//! use mdstudio_editor::camera::MapCamera;
//!
//! let mut camera = MapCamera::default();
//! camera.zoom_notches(2.0);
//! let map_point = camera.screen_to_map(Vec2::new(30.0, 12.0));
//! ```

use bevy::math::{Rect, Vec2};

/// Smallest allowed zoom factor
pub const MIN_ZOOM: f32 = 1.0;
/// Largest allowed zoom factor
pub const MAX_ZOOM: f32 = 10.0;

/// Camera state for a single map view
#[derive(Debug, Clone, PartialEq)]
pub struct MapCamera {
    /// Screen-space position of the map origin
    pub pan_offset: Vec2,
    /// Scalar applied to drag deltas when panning
    pub pan_speed: f32,
    /// Zoom change per wheel notch
    pub zoom_speed: f32,
    zoom: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            zoom: MIN_ZOOM,
        }
    }
}

impl MapCamera {
    /// Create a camera with custom pan and zoom speeds
    pub fn new(pan_speed: f32, zoom_speed: f32) -> Self {
        Self {
            pan_speed,
            zoom_speed,
            ..Default::default()
        }
    }

    /// Current zoom factor, always within `[MIN_ZOOM, MAX_ZOOM]`
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Set the zoom factor directly (clamped)
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Convert a screen-space point to map space
    pub fn screen_to_map(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan_offset) / self.zoom
    }

    /// Convert a map-space point to screen space
    pub fn map_to_screen(&self, map: Vec2) -> Vec2 {
        map * self.zoom + self.pan_offset
    }

    /// Project a map-space rectangle into screen space
    pub fn map_to_screen_rect(&self, map: Rect) -> Rect {
        Rect::from_corners(self.map_to_screen(map.min), self.map_to_screen(map.max))
    }

    /// Unproject a screen-space rectangle into map space
    pub fn screen_to_map_rect(&self, screen: Rect) -> Rect {
        Rect::from_corners(self.screen_to_map(screen.min), self.screen_to_map(screen.max))
    }

    /// Move the camera by a drag delta
    pub fn pan(&mut self, delta: Vec2) {
        self.pan_offset += delta * self.pan_speed;
    }

    /// Step the zoom by a number of notches (negative zooms out)
    pub fn zoom_notches(&mut self, notches: f32) {
        self.zoom = clamp_zoom(self.zoom + notches * self.zoom_speed);
    }

    /// Apply one notch in the direction of a raw wheel delta.
    ///
    /// Only the sign is used so a single wheel event is always one step.
    pub fn zoom_wheel(&mut self, wheel_delta: f32) {
        if wheel_delta > 0.0 {
            self.zoom_notches(1.0);
        } else if wheel_delta < 0.0 {
            self.zoom_notches(-1.0);
        }
    }

    /// Pan so content of the given size sits in the middle of the viewport
    pub fn recenter(&mut self, content_size: Vec2, viewport_size: Vec2) {
        self.pan_offset = viewport_size / 2.0 - content_size / 2.0;
    }

    /// Back to 1x zoom, centred on the content
    pub fn reset(&mut self, content_size: Vec2, viewport_size: Vec2) {
        self.zoom = MIN_ZOOM;
        self.recenter(content_size, viewport_size);
    }
}

fn clamp_zoom(zoom: f32) -> f32 {
    if zoom.is_nan() {
        return MIN_ZOOM;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = MapCamera::default();
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.pan_offset, Vec2::ZERO);
        assert_eq!(camera.screen_to_map(Vec2::new(12.0, 20.0)), Vec2::new(12.0, 20.0));
    }

    #[test]
    fn test_wheel_notches() {
        let mut camera = MapCamera::default();
        camera.zoom_wheel(120.0);
        camera.zoom_wheel(120.0);
        camera.zoom_wheel(1.0);
        assert_eq!(camera.zoom(), 4.0);

        camera.zoom_wheel(-480.0);
        assert_eq!(camera.zoom(), 3.0);

        // Zero-magnitude events do nothing
        camera.zoom_wheel(0.0);
        assert_eq!(camera.zoom(), 3.0);
    }

    #[test]
    fn test_zoom_always_clamped() {
        let mut camera = MapCamera::default();
        for _ in 0..25 {
            camera.zoom_wheel(1.0);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&camera.zoom()));
        }
        assert_eq!(camera.zoom(), MAX_ZOOM);

        for _ in 0..25 {
            camera.zoom_wheel(-1.0);
            assert!((MIN_ZOOM..=MAX_ZOOM).contains(&camera.zoom()));
        }
        assert_eq!(camera.zoom(), MIN_ZOOM);

        camera.zoom_notches(1000.0);
        assert_eq!(camera.zoom(), MAX_ZOOM);
        camera.zoom_notches(-1000.0);
        assert_eq!(camera.zoom(), MIN_ZOOM);
        camera.set_zoom(f32::NAN);
        assert_eq!(camera.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_round_trip() {
        let mut camera = MapCamera::default();
        camera.pan_offset = Vec2::new(-37.25, 112.5);
        camera.set_zoom(3.0);

        for p in [
            Vec2::new(0.0, 0.0),
            Vec2::new(12.5, -4.0),
            Vec2::new(511.0, 255.75),
            Vec2::new(-100.0, 3.125),
        ] {
            let back = camera.screen_to_map(camera.map_to_screen(p));
            assert!(back.abs_diff_eq(p, 1e-4), "{:?} -> {:?}", p, back);
        }
    }

    #[test]
    fn test_map_to_screen_rect() {
        let mut camera = MapCamera::default();
        camera.pan_offset = Vec2::new(10.0, 20.0);
        camera.set_zoom(2.0);

        let rect = camera.map_to_screen_rect(Rect::new(8.0, 16.0, 16.0, 24.0));
        assert_eq!(rect.min, Vec2::new(26.0, 52.0));
        assert_eq!(rect.size(), Vec2::new(16.0, 16.0));

        let back = camera.screen_to_map_rect(rect);
        assert_eq!(back, Rect::new(8.0, 16.0, 16.0, 24.0));
    }

    #[test]
    fn test_pan_uses_speed() {
        let mut camera = MapCamera::new(2.0, 1.0);
        camera.pan(Vec2::new(3.0, -1.0));
        assert_eq!(camera.pan_offset, Vec2::new(6.0, -2.0));
    }

    #[test]
    fn test_recenter_and_reset() {
        let mut camera = MapCamera::default();
        camera.set_zoom(5.0);
        camera.recenter(Vec2::new(512.0, 256.0), Vec2::new(800.0, 600.0));
        assert_eq!(camera.pan_offset, Vec2::new(144.0, 172.0));
        assert_eq!(camera.zoom(), 5.0);

        camera.pan(Vec2::new(50.0, 50.0));
        camera.reset(Vec2::new(512.0, 256.0), Vec2::new(800.0, 600.0));
        assert_eq!(camera.zoom(), 1.0);
        assert_eq!(camera.pan_offset, Vec2::new(144.0, 172.0));
    }
}
