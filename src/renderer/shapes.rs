//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::{DrawCommand, DrawList};
use super::vertex::Vertex;

/// Fewest segments used for any circle
const MIN_CIRCLE_SEGMENTS: u32 = 12;
const MAX_CIRCLE_SEGMENTS: u32 = 64;

/// Segment count that keeps circles smooth at their on-screen size
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 0.8) as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle (two triangles)
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Triangulate every shape in the list, in draw order (world coordinates).
///
/// Text is skipped; it is drawn by whatever owns the fonts.
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in &list.commands {
        match command {
            DrawCommand::Rect { pos, size, color } => {
                vertices.extend(rect(*pos, *size, *color));
            }
            DrawCommand::Circle { pos, radius, color } => {
                let center = *pos + Vec2::splat(*radius);
                vertices.extend(circle(center, *radius, *color, circle_segments(*radius)));
            }
            DrawCommand::Text { .. } => {}
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    #[test]
    fn test_circle_vertices_on_rim() {
        let center = Vec2::new(10.0, 20.0);
        let vertices = circle(center, 5.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 48);
        for tri in vertices.chunks(3) {
            assert_eq!(tri[0].position, [10.0, 20.0]);
            let rim = Vec2::from(tri[1].position);
            assert!(((rim - center).length() - 5.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rect_covers_corners() {
        let vertices = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [0.0; 4]);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }

    #[test]
    fn test_tessellate_skips_text() {
        let mut list = DrawList::new(Camera::new(Vec2::ZERO, Vec2::splat(100.0)));
        list.push(DrawCommand::Rect {
            pos: Vec2::ZERO,
            size: Vec2::ONE,
            color: [1.0; 4],
        });
        list.push(DrawCommand::Text {
            text: "Score: 0".into(),
            pos: Vec2::ZERO,
            size: 24.0,
            color: [0.0; 4],
        });
        assert_eq!(tessellate(&list).len(), 6);
    }

    #[test]
    fn test_circle_centered_from_top_left() {
        let mut list = DrawList::new(Camera::new(Vec2::ZERO, Vec2::splat(100.0)));
        list.push(DrawCommand::Circle {
            pos: Vec2::new(0.0, 0.0),
            radius: 40.0,
            color: [1.0; 4],
        });
        let vertices = tessellate(&list);
        assert_eq!(vertices.len() as u32, circle_segments(40.0) * 3);
        assert_eq!(vertices[0].position, [40.0, 40.0]);
    }
}
