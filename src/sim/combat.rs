//! Turret aiming, firing cadence and projectile flight

use std::time::Duration;

use glam::Vec2;

use super::geometry::normalize;
use super::state::{GameEvent, GameState, Projectile};
use crate::tuning::Tuning;

/// Point every turret at `target` (world coordinates).
///
/// Turret `i` orbits the player center at `angle + i * 45deg`.
pub fn aim_turrets(state: &mut GameState, target: Vec2) {
    let center = state.player.center();
    let direction = target - center;
    let angle = direction.y.atan2(direction.x);
    let orbit = state.tuning.orbit_radius();
    state.aim_angle = angle;

    for (i, turret) in state.turrets.iter_mut().enumerate() {
        let theta = angle + i as f32 * crate::consts::TURRET_SPACING;
        let turret_center = center + orbit * Vec2::new(theta.cos(), theta.sin());
        turret.pos = turret_center - Vec2::splat(turret.radius);
    }
}

/// True when enough time has passed since the last volley
pub fn fire_ready(state: &GameState, now: Duration) -> bool {
    now.saturating_sub(state.last_fire) > state.tuning.fire_interval()
}

/// Fire one projectile per turret toward `target` if the trigger is held
/// and the cooldown has elapsed. Returns the number of projectiles created.
pub fn try_fire(state: &mut GameState, trigger_held: bool, target: Vec2, now: Duration) -> usize {
    if !trigger_held || !fire_ready(state, now) {
        return 0;
    }

    let speed = state.tuning.projectile_speed();
    let radius = state.tuning.projectile_radius;
    let origins: Vec<Vec2> = state.turrets.iter().map(|t| t.center()).collect();

    for origin in &origins {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: *origin - Vec2::splat(radius),
            vel: normalize(target - *origin) * speed,
            radius,
            traveled: 0.0,
        });
    }

    state.last_fire = now;
    state.events.push(GameEvent::ProjectilesFired {
        count: origins.len(),
    });
    origins.len()
}

/// True once a projectile has left the map or flown past its range
pub fn projectile_expired(tuning: &Tuning, projectile: &Projectile) -> bool {
    let p = projectile.pos;
    p.x < 0.0
        || p.x > tuning.map_width
        || p.y < 0.0
        || p.y > tuning.map_height
        || projectile.traveled > tuning.max_projectile_distance()
}

/// Move every projectile one tick and drop expired ones.
/// Returns the number removed.
pub fn advance_projectiles(state: &mut GameState) -> usize {
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
        projectile.traveled += projectile.vel.length();
    }

    let before = state.projectiles.len();
    let tuning = &state.tuning;
    state.projectiles.retain(|p| !projectile_expired(tuning, p));
    before - state.projectiles.len()
}
