//! Game state and core simulation types
//!
//! All mutable run state lives in [`GameState`] and is threaded through
//! [`super::tick`]; nothing in the simulation is global.

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use crate::tuning::Tuning;

/// Obstacle variant with its own geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Square of the given side length
    Block { size: f32 },
    /// Circle of the given radius
    Orb { radius: f32 },
}

impl ObstacleShape {
    /// Width/height of the bounding box
    pub fn footprint(&self) -> Vec2 {
        match *self {
            ObstacleShape::Block { size } => Vec2::splat(size),
            ObstacleShape::Orb { radius } => Vec2::splat(radius * 2.0),
        }
    }

    /// Score awarded when destroyed
    pub fn points(&self) -> u64 {
        match self {
            ObstacleShape::Block { .. } => 1,
            ObstacleShape::Orb { .. } => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleShape::Block { .. } => "block",
            ObstacleShape::Orb { .. } => "orb",
        }
    }
}

/// A static destructible shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub shape: ObstacleShape,
    /// Top-left corner
    pub pos: Vec2,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.shape.footprint())
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per tick (direction already scaled by speed)
    pub vel: Vec2,
    pub radius: f32,
    /// Cumulative distance moved
    pub traveled: f32,
}

impl Projectile {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.radius * 2.0))
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub radius: f32,
}

impl Player {
    /// Player centered on the given point
    pub fn centered_at(center: Vec2, radius: f32) -> Self {
        Self {
            pos: center - Vec2::splat(radius),
            radius,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// An orbiting firing point attached to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turret {
    /// Top-left corner, recomputed every tick from the aim angle
    pub pos: Vec2,
    pub radius: f32,
}

impl Turret {
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { id: u32, shape: ObstacleShape },
    /// Spawner gave up after exhausting its placement attempts
    SpawnSkipped { attempts: u32 },
    ProjectilesFired { count: usize },
    ObstacleDestroyed { id: u32, shape: ObstacleShape, points: u64 },
    /// Player overlapped an obstacle. Carries no gameplay consequence.
    PlayerContact { obstacle_id: u32 },
    TurretUpgraded { turrets: usize },
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner RNG
    #[serde(skip, default = "default_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub score: u64,
    pub player: Player,
    /// Always at least one; grows to two on upgrade
    pub turrets: Vec<Turret>,
    /// Last computed aim angle (radians)
    pub aim_angle: f32,
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    /// Clock reading of the last volley
    pub last_fire: Duration,
    /// Set once the player has touched an obstacle; never cleared
    pub player_contact: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let map_center = Vec2::new(tuning.map_width, tuning.map_height) / 2.0;
        let player = Player::centered_at(map_center, tuning.player_radius);
        let turret = Turret {
            pos: Vec2::ZERO,
            radius: tuning.turret_radius,
        };

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            time_ticks: 0,
            score: 0,
            player,
            turrets: vec![turret],
            aim_angle: 0.0,
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            last_fire: Duration::ZERO,
            player_contact: false,
            events: Vec::new(),
            next_id: 1,
        };

        // Place the turret on its orbit so the first frame draws it correctly
        let aim = state.player.center() + Vec2::X;
        super::combat::aim_turrets(&mut state, aim);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Map bounds as a box
    pub fn map_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::ZERO,
            Vec2::new(self.tuning.map_width, self.tuning.map_height),
        )
    }

    /// Text shown in the HUD
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(7);
        assert_eq!(state.score, 0);
        assert_eq!(state.turrets.len(), 1);
        assert!(state.obstacles.is_empty());
        assert!(state.projectiles.is_empty());
        assert!(!state.player_contact);
        assert_eq!(state.player.center(), Vec2::new(3200.0, 2400.0));
        assert_eq!(state.player.pos, Vec2::new(3160.0, 2360.0));
    }

    #[test]
    fn test_initial_turret_on_orbit() {
        let state = GameState::new(7);
        let offset = state.turrets[0].center() - state.player.center();
        assert!((offset.length() - state.tuning.orbit_radius()).abs() < 1e-3);
    }

    #[test]
    fn test_shape_footprint_and_points() {
        let block = ObstacleShape::Block { size: 30.0 };
        let orb = ObstacleShape::Orb { radius: 25.0 };
        assert_eq!(block.footprint(), Vec2::splat(30.0));
        assert_eq!(orb.footprint(), Vec2::splat(50.0));
        assert_eq!(block.points(), 1);
        assert_eq!(orb.points(), 2);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_score_text() {
        let mut state = GameState::new(1);
        state.score = 42;
        assert_eq!(state.score_text(), "Score: 42");
    }
}
