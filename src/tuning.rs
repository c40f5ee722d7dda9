//! Data-driven game balance
//!
//! Everything the simulation needs to know about sizes, speeds and rules.
//! Defaults come from [`crate::consts`]; any field may be overridden from
//! the settings file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub map_width: f32,
    pub map_height: f32,
    pub view_width: f32,
    pub view_height: f32,

    pub player_speed: f32,
    pub player_radius: f32,
    pub turret_radius: f32,

    pub projectile_radius: f32,
    /// Multiplier over `player_speed`
    pub projectile_speed_factor: f32,
    /// Multiplier over `view_width`
    pub projectile_range_factor: f32,
    pub fire_interval_ms: u64,

    pub obstacle_capacity: usize,
    /// 0-100
    pub block_spawn_percent: u32,
    pub block_size: f32,
    pub orb_radius: f32,
    pub placement_attempts: u32,

    pub upgrade_score: u64,
    /// Remove the projectile that destroys an obstacle. When false a single
    /// projectile keeps flying and may destroy several obstacles.
    pub consume_projectile_on_hit: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,
            player_speed: PLAYER_SPEED,
            player_radius: PLAYER_RADIUS,
            turret_radius: TURRET_RADIUS,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_speed_factor: PROJECTILE_SPEED_FACTOR,
            projectile_range_factor: PROJECTILE_RANGE_FACTOR,
            fire_interval_ms: FIRE_INTERVAL_MS,
            obstacle_capacity: OBSTACLE_CAPACITY,
            block_spawn_percent: BLOCK_SPAWN_PERCENT,
            block_size: BLOCK_SIZE,
            orb_radius: ORB_RADIUS,
            placement_attempts: PLACEMENT_ATTEMPTS,
            upgrade_score: UPGRADE_SCORE,
            consume_projectile_on_hit: true,
        }
    }
}

impl Tuning {
    /// Projectile speed in world units per tick
    pub fn projectile_speed(&self) -> f32 {
        self.player_speed * self.projectile_speed_factor
    }

    /// Distance after which a projectile expires
    pub fn max_projectile_distance(&self) -> f32 {
        self.view_width * self.projectile_range_factor
    }

    pub fn fire_interval(&self) -> Duration {
        Duration::from_millis(self.fire_interval_ms)
    }

    /// Distance from player center to turret center
    pub fn orbit_radius(&self) -> f32 {
        self.player_radius + self.turret_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_values() {
        let tuning = Tuning::default();
        assert!((tuning.projectile_speed() - 1.2).abs() < 1e-6);
        assert!((tuning.max_projectile_distance() - 1280.0).abs() < 1e-6);
        assert_eq!(tuning.fire_interval(), Duration::from_millis(500));
        assert!((tuning.orbit_radius() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "obstacle_capacity": 10 }"#).unwrap();
        assert_eq!(tuning.obstacle_capacity, 10);
        assert_eq!(tuning.block_spawn_percent, BLOCK_SPAWN_PERCENT);
        assert!(tuning.consume_projectile_on_hit);
    }
}
