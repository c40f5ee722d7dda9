//! View that follows the player
//!
//! Maps window pixels to world coordinates (for the mouse) and world
//! coordinates to normalized device coordinates (for the GPU sink).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World point at the middle of the view
    pub center: Vec2,
    /// World units visible
    pub view_size: Vec2,
    /// Window size in pixels
    pub window_size: Vec2,
}

impl Camera {
    /// Camera whose window matches the view one pixel per unit
    pub fn new(center: Vec2, view_size: Vec2) -> Self {
        Self {
            center,
            view_size,
            window_size: view_size,
        }
    }

    pub fn follow(&mut self, target: Vec2) {
        self.center = target;
    }

    pub fn set_window_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.window_size = Vec2::new(width, height);
        }
    }

    /// World coordinate of the view's top-left corner
    pub fn top_left(&self) -> Vec2 {
        self.center - self.view_size / 2.0
    }

    pub fn visible_bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.top_left(), self.view_size)
    }

    /// Window pixel to world position
    pub fn screen_to_world(&self, pixel: Vec2) -> Vec2 {
        self.top_left() + pixel * (self.view_size / self.window_size)
    }

    /// World position to NDC (-1..1, y up)
    pub fn world_to_ndc(&self, world: Vec2) -> Vec2 {
        let rel = (world - self.center) / (self.view_size / 2.0);
        Vec2::new(rel.x, -rel.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_center_maps_to_camera_center() {
        let camera = Camera::new(Vec2::new(3200.0, 2400.0), Vec2::new(640.0, 480.0));
        assert_eq!(camera.screen_to_world(Vec2::new(320.0, 240.0)), camera.center);
        assert_eq!(camera.screen_to_world(Vec2::ZERO), Vec2::new(2880.0, 2160.0));
    }

    #[test]
    fn test_scaled_window() {
        let mut camera = Camera::new(Vec2::new(100.0, 100.0), Vec2::new(640.0, 480.0));
        camera.set_window_size(1280.0, 960.0);
        // Bottom-right pixel maps to bottom-right of the view
        let world = camera.screen_to_world(Vec2::new(1280.0, 960.0));
        assert_eq!(world, Vec2::new(420.0, 340.0));
    }

    #[test]
    fn test_ignores_zero_window() {
        let mut camera = Camera::new(Vec2::ZERO, Vec2::new(640.0, 480.0));
        camera.set_window_size(0.0, 100.0);
        assert_eq!(camera.window_size, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_world_to_ndc_corners() {
        let camera = Camera::new(Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
        assert_eq!(camera.world_to_ndc(Vec2::new(50.0, 50.0)), Vec2::ZERO);
        assert_eq!(camera.world_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 1.0));
        assert_eq!(camera.world_to_ndc(Vec2::new(100.0, 100.0)), Vec2::new(1.0, -1.0));
    }
}
