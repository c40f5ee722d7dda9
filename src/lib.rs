//! Turret Arena - a scrollable arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, combat, collisions, game state)
//! - `frame`: Per-frame orchestration over input, clock and render collaborators
//! - `renderer`: Draw lists, tessellation and the WebGPU pipeline
//! - `camera`: View that follows the player and maps screen to world
//! - `tuning`: Data-driven game balance
//! - `settings`: Application preferences
//! - `assets`: Startup resources (font)
//! - `headless`: Scripted collaborators for demos and tests

pub mod assets;
pub mod camera;
pub mod frame;
pub mod headless;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use camera::Camera;
pub use frame::{FrameClock, Game, InputSource, Key, LoopState, RenderSink, WindowEvent};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Map dimensions in world units
    pub const MAP_WIDTH: f32 = 6400.0;
    pub const MAP_HEIGHT: f32 = 4800.0;

    /// Visible view (and default window) size
    pub const VIEW_WIDTH: f32 = 640.0;
    pub const VIEW_HEIGHT: f32 = 480.0;

    /// Player movement per tick while a direction key is held
    pub const PLAYER_SPEED: f32 = 0.3;
    pub const PLAYER_RADIUS: f32 = 40.0;

    pub const TURRET_RADIUS: f32 = 10.0;
    /// Angular spacing between turrets (45 degrees)
    pub const TURRET_SPACING: f32 = std::f32::consts::FRAC_PI_4;

    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Projectile speed relative to player speed
    pub const PROJECTILE_SPEED_FACTOR: f32 = 4.0;
    /// Max travel distance relative to view width
    pub const PROJECTILE_RANGE_FACTOR: f32 = 2.0;
    /// Minimum time between volleys
    pub const FIRE_INTERVAL_MS: u64 = 500;

    /// Target obstacle population
    pub const OBSTACLE_CAPACITY: usize = 100;
    /// Percent of spawns that are blocks (rest are orbs)
    pub const BLOCK_SPAWN_PERCENT: u32 = 70;
    pub const BLOCK_SIZE: f32 = 30.0;
    pub const ORB_RADIUS: f32 = 25.0;
    /// Candidate positions tried per spawn before giving up for the tick
    pub const PLACEMENT_ATTEMPTS: u32 = 256;

    /// Score at which a second turret is granted
    pub const UPGRADE_SCORE: u64 = 50;

    /// Background grid spacing
    pub const GRID_SPACING: f32 = 100.0;
}
