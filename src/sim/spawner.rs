//! Obstacle spawner
//!
//! Keeps the obstacle population topped up to capacity, one obstacle per
//! tick, placed by rejection sampling so nothing overlaps at spawn time.

use glam::Vec2;
use rand::Rng;

use super::geometry::Aabb;
use super::state::{GameEvent, GameState, Obstacle, ObstacleShape};

/// What the spawner did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// Population already at capacity
    Full,
    /// New obstacle appended
    Spawned { id: u32 },
    /// No free spot found within the attempt budget; retried next tick
    Skipped { attempts: u32 },
}

/// Pick the variant for the next obstacle
pub fn roll_shape(state: &mut GameState) -> ObstacleShape {
    let roll: u32 = state.rng.random_range(0..100);
    if roll < state.tuning.block_spawn_percent {
        ObstacleShape::Block {
            size: state.tuning.block_size,
        }
    } else {
        ObstacleShape::Orb {
            radius: state.tuning.orb_radius,
        }
    }
}

/// True when a box at this spot touches the player or any obstacle
pub fn placement_blocked(state: &GameState, candidate: &Aabb) -> bool {
    candidate.overlaps(&state.player.bounds())
        || state
            .obstacles
            .iter()
            .any(|obstacle| obstacle.bounds().overlaps(candidate))
}

/// Append at most one obstacle if below capacity
pub fn top_up(state: &mut GameState) -> SpawnOutcome {
    if state.obstacles.len() >= state.tuning.obstacle_capacity {
        return SpawnOutcome::Full;
    }

    let shape = roll_shape(state);
    let footprint = shape.footprint();
    let max_x = state.tuning.map_width - footprint.x;
    let max_y = state.tuning.map_height - footprint.y;
    let attempts = state.tuning.placement_attempts;

    if max_x <= 0.0 || max_y <= 0.0 {
        log::debug!("{} does not fit on the map", shape.name());
        state.events.push(GameEvent::SpawnSkipped { attempts: 0 });
        return SpawnOutcome::Skipped { attempts: 0 };
    }

    for _ in 0..attempts {
        let pos = Vec2::new(
            state.rng.random_range(0.0..max_x),
            state.rng.random_range(0.0..max_y),
        );
        let candidate = Aabb::from_pos_size(pos, footprint);
        if placement_blocked(state, &candidate) {
            continue;
        }

        let id = state.next_entity_id();
        state.obstacles.push(Obstacle { id, shape, pos });
        state.events.push(GameEvent::ObstacleSpawned { id, shape });
        return SpawnOutcome::Spawned { id };
    }

    log::debug!(
        "No free spot for {} after {} attempts ({} obstacles)",
        shape.name(),
        attempts,
        state.obstacles.len()
    );
    state.events.push(GameEvent::SpawnSkipped { attempts });
    SpawnOutcome::Skipped { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    #[test]
    fn test_spawns_one_per_call() {
        let mut state = GameState::new(42);
        assert!(matches!(top_up(&mut state), SpawnOutcome::Spawned { .. }));
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(top_up(&mut state), SpawnOutcome::Spawned { .. }));
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_stops_at_capacity() {
        let mut state = GameState::new(42);
        for _ in 0..150 {
            top_up(&mut state);
            assert!(state.obstacles.len() <= 100);
        }
        assert_eq!(state.obstacles.len(), 100);
        assert_eq!(top_up(&mut state), SpawnOutcome::Full);
    }

    #[test]
    fn test_variant_split_roughly_seventy_thirty() {
        let mut state = GameState::new(2024);
        let total = 10_000;
        let blocks = (0..total)
            .filter(|_| matches!(roll_shape(&mut state), ObstacleShape::Block { .. }))
            .count();
        let ratio = blocks as f32 / total as f32;
        assert!((0.66..0.74).contains(&ratio), "block ratio {ratio}");
    }

    #[test]
    fn test_obstacles_stay_inside_map() {
        let mut state = GameState::new(5);
        for _ in 0..100 {
            top_up(&mut state);
        }
        let map = state.map_bounds();
        for obstacle in &state.obstacles {
            let b = obstacle.bounds();
            assert!(b.min.x >= map.min.x && b.min.y >= map.min.y);
            assert!(b.max.x <= map.max.x && b.max.y <= map.max.y);
        }
    }

    #[test]
    fn test_crowded_map_skips_instead_of_spinning() {
        // Map barely larger than the player: nothing fits beside it
        let tuning = Tuning {
            map_width: 90.0,
            map_height: 90.0,
            placement_attempts: 16,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(9, tuning);
        assert_eq!(top_up(&mut state), SpawnOutcome::Skipped { attempts: 16 });
        assert!(state.obstacles.is_empty());
        assert_eq!(state.events, vec![GameEvent::SpawnSkipped { attempts: 16 }]);
    }

    #[test]
    fn test_footprint_larger_than_map_skips() {
        let tuning = Tuning {
            map_width: 20.0,
            map_height: 20.0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(9, tuning);
        assert_eq!(top_up(&mut state), SpawnOutcome::Skipped { attempts: 0 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_new_obstacle_never_overlaps(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            for _ in 0..100 {
                let before: Vec<_> = state.obstacles.iter().map(|o| o.bounds()).collect();
                if let SpawnOutcome::Spawned { id } = top_up(&mut state) {
                    let spawned = state.obstacles.iter().find(|o| o.id == id).unwrap().bounds();
                    prop_assert!(!spawned.overlaps(&state.player.bounds()));
                    for other in &before {
                        prop_assert!(!spawned.overlaps(other));
                    }
                }
            }
        }
    }
}
