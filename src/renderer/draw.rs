//! Draw lists
//!
//! A frame is described as an ordered list of primitives in world
//! coordinates. Sinks decide how to present it.

use glam::Vec2;

use super::vertex::colors;
use crate::camera::Camera;
use crate::consts::GRID_SPACING;
use crate::sim::geometry::Aabb;
use crate::sim::state::{GameState, ObstacleShape};

pub type Rgba = [f32; 4];

/// Score text size in pixels
pub const SCORE_TEXT_SIZE: f32 = 24.0;
/// Score text offset from the view's top-left corner
pub const SCORE_TEXT_MARGIN: f32 = 10.0;

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Axis-aligned rectangle anchored at its top-left corner
    Rect { pos: Vec2, size: Vec2, color: Rgba },
    /// Circle anchored at the top-left of its bounding box
    Circle { pos: Vec2, radius: f32, color: Rgba },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Rgba,
    },
}

impl DrawCommand {
    pub fn is_text(&self) -> bool {
        matches!(self, DrawCommand::Text { .. })
    }
}

/// Everything needed to present one frame: clear, draw in order, present
#[derive(Debug, Clone)]
pub struct DrawList {
    pub clear_color: Rgba,
    pub camera: Camera,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(camera: Camera) -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            camera,
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Text of every text command, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Grid lines every [`GRID_SPACING`] units, limited to what the camera sees
fn push_grid(list: &mut DrawList, map: &Aabb, view: &Aabb) {
    let first_row = (view.min.y.max(0.0) / GRID_SPACING).ceil() as i32;
    let last_row = (view.max.y.min(map.max.y) / GRID_SPACING).floor() as i32;
    for row in first_row..=last_row {
        let y = row as f32 * GRID_SPACING;
        if y >= map.max.y {
            break;
        }
        list.push(DrawCommand::Rect {
            pos: Vec2::new(0.0, y),
            size: Vec2::new(map.max.x, 1.0),
            color: colors::GRID,
        });
    }

    let first_col = (view.min.x.max(0.0) / GRID_SPACING).ceil() as i32;
    let last_col = (view.max.x.min(map.max.x) / GRID_SPACING).floor() as i32;
    for col in first_col..=last_col {
        let x = col as f32 * GRID_SPACING;
        if x >= map.max.x {
            break;
        }
        list.push(DrawCommand::Rect {
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(1.0, map.max.y),
            color: colors::GRID,
        });
    }
}

/// Build the frame for the current state.
///
/// Order: grid, obstacles, player, turrets, projectiles, score text.
pub fn build_frame(state: &GameState, camera: &Camera, show_grid: bool) -> DrawList {
    let mut list = DrawList::new(*camera);

    if show_grid {
        push_grid(&mut list, &state.map_bounds(), &camera.visible_bounds());
    }

    for obstacle in &state.obstacles {
        let command = match obstacle.shape {
            ObstacleShape::Block { size } => DrawCommand::Rect {
                pos: obstacle.pos,
                size: Vec2::splat(size),
                color: colors::BLOCK,
            },
            ObstacleShape::Orb { radius } => DrawCommand::Circle {
                pos: obstacle.pos,
                radius,
                color: colors::ORB,
            },
        };
        list.push(command);
    }

    list.push(DrawCommand::Circle {
        pos: state.player.pos,
        radius: state.player.radius,
        color: colors::PLAYER,
    });

    for turret in &state.turrets {
        list.push(DrawCommand::Circle {
            pos: turret.pos,
            radius: turret.radius,
            color: colors::TURRET,
        });
    }

    for projectile in &state.projectiles {
        list.push(DrawCommand::Circle {
            pos: projectile.pos,
            radius: projectile.radius,
            color: colors::PROJECTILE,
        });
    }

    list.push(DrawCommand::Text {
        text: state.score_text(),
        pos: camera.top_left() + Vec2::splat(SCORE_TEXT_MARGIN),
        size: SCORE_TEXT_SIZE,
        color: colors::TEXT,
    });

    list
}
