//! Per-tick simulation step
//!
//! Core game loop that advances the simulation by exactly one tick. Motion
//! is expressed per tick, not per second: the game runs at the rate it is
//! ticked.

use std::time::Duration;

use glam::Vec2;

use super::collision::{self, CollisionResult};
use super::combat;
use super::spawner::{self, SpawnOutcome};
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire button held
    pub fire: bool,
    /// Mouse position in world coordinates
    pub aim_target: Vec2,
    /// Frame clock reading for this tick
    pub now: Duration,
    /// Idle/demo mode - autopilot aims at the nearest obstacle and fires
    pub idle_mode: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub spawn: SpawnOutcome,
    pub fired: usize,
    pub expired: usize,
    pub collisions: CollisionResult,
}

/// Autopilot target: center of the obstacle nearest the player
fn nearest_obstacle_center(state: &GameState) -> Option<Vec2> {
    let center = state.player.center();
    state
        .obstacles
        .iter()
        .map(|o| o.pos + o.shape.footprint() / 2.0)
        .min_by(|a, b| {
            a.distance_squared(center)
                .partial_cmp(&b.distance_squared(center))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Move the player by the held directions. Each key adds a fixed step.
pub fn apply_movement(state: &mut GameState, input: &TickInput) {
    let speed = state.tuning.player_speed;
    let mut step = Vec2::ZERO;
    if input.left {
        step.x -= speed;
    }
    if input.up {
        step.y -= speed;
    }
    if input.right {
        step.x += speed;
    }
    if input.down {
        step.y += speed;
    }
    state.player.pos += step;
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    state.time_ticks += 1;
    state.events.clear();

    let mut input = input.clone();
    if input.idle_mode {
        if let Some(target) = nearest_obstacle_center(state) {
            input.aim_target = target;
            input.fire = true;
        }
    }
    let input = &input;

    apply_movement(state, input);
    combat::aim_turrets(state, input.aim_target);

    let spawn = spawner::top_up(state);

    let fired = combat::try_fire(state, input.fire, input.aim_target, input.now);
    let expired = combat::advance_projectiles(state);

    let collisions = collision::resolve(state);

    TickReport {
        spawn,
        fired,
        expired,
        collisions,
    }
}
