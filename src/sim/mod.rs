//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-rate coupled motion only
//! - Seeded RNG only
//! - Time enters only through `TickInput::now`
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::CollisionResult;
pub use geometry::{Aabb, boxes_overlap, normalize};
pub use spawner::SpawnOutcome;
pub use state::{GameEvent, GameState, Obstacle, ObstacleShape, Player, Projectile, Turret};
pub use tick::{TickInput, TickReport, tick};
