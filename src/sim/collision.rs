//! Collision detection and scoring
//!
//! Two independent sweeps run each tick: player against obstacles, then
//! obstacles against projectiles. Both use plain bounding-box overlap.

use super::state::{GameEvent, GameState};

/// Summary of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Player overlapped an obstacle this tick
    pub player_contact: bool,
    pub destroyed: usize,
    pub points: u64,
    /// A second turret was granted this tick
    pub upgraded: bool,
}

/// Scan obstacles for the first one overlapping the player.
///
/// Sets the sticky contact flag. Nothing else reacts to it: there is no
/// damage or game over.
pub fn detect_player_contact(state: &mut GameState) -> bool {
    let player = state.player.bounds();
    let hit = state
        .obstacles
        .iter()
        .find(|obstacle| obstacle.bounds().overlaps(&player))
        .map(|obstacle| obstacle.id);

    match hit {
        Some(obstacle_id) => {
            state.player_contact = true;
            state.events.push(GameEvent::PlayerContact { obstacle_id });
            true
        }
        None => false,
    }
}

/// Destroy every obstacle touched by a live projectile and award points.
///
/// Each obstacle is matched against the first overlapping projectile. With
/// `consume_projectile_on_hit` that projectile is removed and cannot score
/// again; otherwise it keeps flying.
pub fn resolve_projectile_hits(state: &mut GameState) -> (usize, u64) {
    if state.projectiles.is_empty() || state.obstacles.is_empty() {
        return (0, 0);
    }

    let consume = state.tuning.consume_projectile_on_hit;
    let projectile_bounds: Vec<_> = state.projectiles.iter().map(|p| p.bounds()).collect();
    let mut spent = vec![false; projectile_bounds.len()];
    let mut destroyed = Vec::new();

    state.obstacles.retain(|obstacle| {
        let bounds = obstacle.bounds();
        let hit = projectile_bounds
            .iter()
            .enumerate()
            .find(|(i, p)| !spent[*i] && p.overlaps(&bounds))
            .map(|(i, _)| i);

        match hit {
            Some(i) => {
                if consume {
                    spent[i] = true;
                }
                destroyed.push((obstacle.id, obstacle.shape));
                false
            }
            None => true,
        }
    });

    if consume {
        let mut flags = spent.iter();
        state
            .projectiles
            .retain(|_| !flags.next().copied().unwrap_or(false));
    }

    let mut points = 0;
    for &(id, shape) in &destroyed {
        let award = shape.points();
        points += award;
        state.events.push(GameEvent::ObstacleDestroyed {
            id,
            shape,
            points: award,
        });
    }
    state.score += points;

    (destroyed.len(), points)
}

/// Grant the second turret once the score crosses the threshold
pub fn apply_upgrade(state: &mut GameState) -> bool {
    if state.score >= state.tuning.upgrade_score && state.turrets.len() == 1 {
        let copy = state.turrets[0].clone();
        state.turrets.push(copy);
        state.events.push(GameEvent::TurretUpgraded {
            turrets: state.turrets.len(),
        });
        log::info!("Score {} reached: second turret online", state.score);
        return true;
    }
    false
}

/// Run both sweeps and the upgrade check
pub fn resolve(state: &mut GameState) -> CollisionResult {
    let player_contact = detect_player_contact(state);
    let (destroyed, points) = resolve_projectile_hits(state);
    let upgraded = apply_upgrade(state);
    CollisionResult {
        player_contact,
        destroyed,
        points,
        upgraded,
    }
}
