//! Frame loop orchestration
//!
//! Each tick: drain window events, sample input, step the simulation, move
//! the camera, build the draw list and hand it to the render sink. The
//! platform provides the three collaborators: input, render sink and clock.

use std::time::Duration;

use glam::Vec2;

use crate::camera::Camera;
use crate::renderer::draw::{self, DrawList};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, TickReport, tick};

/// Directional keys (W/A/S/D)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

/// Window-level events delivered between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    CloseRequested,
    Resized { width: u32, height: u32 },
}

/// Loop state; `Closed` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// Source of player input
pub trait InputSource {
    /// Next pending window event, if any
    fn poll_event(&mut self) -> Option<WindowEvent>;
    fn is_key_held(&self, key: Key) -> bool;
    /// Primary mouse button held
    fn is_fire_held(&self) -> bool;
    /// Mouse position mapped through the active camera
    fn mouse_world(&self, camera: &Camera) -> Vec2;
}

/// Errors a render sink can report for a frame
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render surface lost")]
    Lost,
    #[error("out of GPU memory")]
    OutOfMemory,
    #[error("frame dropped: {0}")]
    Dropped(String),
    #[error("renderer setup failed: {0}")]
    Setup(String),
}

/// Presents draw lists: clear, draw every command in order, present
pub trait RenderSink {
    fn present(&mut self, frame: &DrawList) -> Result<(), RenderError>;

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Monotonic time since the run started. Read once per tick.
pub trait FrameClock {
    fn now(&mut self) -> Duration;
}

/// Game instance holding the simulation and its collaborators
pub struct Game<I, R, C> {
    pub state: GameState,
    pub camera: Camera,
    input: I,
    renderer: R,
    clock: C,
    loop_state: LoopState,
    show_grid: bool,
    idle_mode: bool,
    last_report: Option<TickReport>,
}

impl<I: InputSource, R: RenderSink, C: FrameClock> Game<I, R, C> {
    pub fn new(state: GameState, settings: &Settings, input: I, renderer: R, clock: C) -> Self {
        let view = Vec2::new(state.tuning.view_width, state.tuning.view_height);
        let camera = Camera::new(state.player.center(), view);
        Self {
            state,
            camera,
            input,
            renderer,
            clock,
            loop_state: LoopState::Running,
            show_grid: settings.show_grid,
            idle_mode: settings.idle_mode,
            last_report: None,
        }
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn last_report(&self) -> Option<&TickReport> {
        self.last_report.as_ref()
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Stop the loop; further steps do nothing
    pub fn close(&mut self) {
        if self.loop_state == LoopState::Running {
            log::info!(
                "Closing after {} ticks, score {}",
                self.state.time_ticks,
                self.state.score
            );
        }
        self.loop_state = LoopState::Closed;
    }

    /// Drain window events. Returns false once a close was requested.
    fn pump_events(&mut self) -> bool {
        while let Some(event) = self.input.poll_event() {
            match event {
                WindowEvent::CloseRequested => {
                    self.close();
                    return false;
                }
                WindowEvent::Resized { width, height } => {
                    self.camera.set_window_size(width as f32, height as f32);
                    self.renderer.resize(width, height);
                }
            }
        }
        true
    }

    /// Sample the input collaborator for this tick
    fn sample_input(&mut self) -> TickInput {
        TickInput {
            left: self.input.is_key_held(Key::Left),
            right: self.input.is_key_held(Key::Right),
            up: self.input.is_key_held(Key::Up),
            down: self.input.is_key_held(Key::Down),
            fire: self.input.is_fire_held(),
            aim_target: self.input.mouse_world(&self.camera),
            now: self.clock.now(),
            idle_mode: self.idle_mode,
        }
    }

    fn log_events(&self) {
        for event in &self.state.events {
            match event {
                GameEvent::ObstacleDestroyed { id, shape, points } => {
                    log::debug!(
                        "Destroyed {} #{} (+{}), score {}",
                        shape.name(),
                        id,
                        points,
                        self.state.score
                    );
                }
                GameEvent::PlayerContact { obstacle_id } => {
                    log::trace!("Player touching obstacle #{}", obstacle_id);
                }
                GameEvent::SpawnSkipped { attempts } => {
                    log::debug!("Spawn skipped after {} attempts", attempts);
                }
                _ => log::trace!("{:?}", event),
            }
        }
    }

    fn present(&mut self) {
        let frame: DrawList = draw::build_frame(&self.state, &self.camera, self.show_grid);
        match self.renderer.present(&frame) {
            Ok(()) => {}
            Err(RenderError::Lost) => {
                let size = self.camera.window_size;
                self.renderer.resize(size.x as u32, size.y as u32);
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {}", e),
        }
    }

    /// Run one tick. Returns the loop state afterwards.
    pub fn step(&mut self) -> LoopState {
        if self.loop_state == LoopState::Closed {
            return LoopState::Closed;
        }
        if !self.pump_events() {
            return LoopState::Closed;
        }

        let input = self.sample_input();
        let report = tick(&mut self.state, &input);
        self.log_events();
        self.last_report = Some(report);

        self.camera.follow(self.state.player.center());
        self.present();

        self.loop_state
    }

    /// Step until closed. Returns the number of ticks run.
    pub fn run(&mut self) -> u64 {
        let start = self.state.time_ticks;
        while self.step() == LoopState::Running {}
        self.state.time_ticks - start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{RecordingSink, ScriptedInput, SteppedClock};

    fn game(input: ScriptedInput) -> Game<ScriptedInput, RecordingSink, SteppedClock> {
        let settings = Settings::default();
        Game::new(
            GameState::new(settings.seed.unwrap_or(1)),
            &settings,
            input,
            RecordingSink::default(),
            SteppedClock::new(Duration::from_millis(16)),
        )
    }

    #[test]
    fn test_close_event_is_terminal() {
        let mut input = ScriptedInput::default();
        input.push_event(WindowEvent::CloseRequested);
        let mut game = game(input);

        assert_eq!(game.step(), LoopState::Closed);
        assert_eq!(game.state.time_ticks, 0);
        assert_eq!(game.renderer().frames_presented, 0);

        // Stays closed
        assert_eq!(game.step(), LoopState::Closed);
        assert_eq!(game.state.time_ticks, 0);
    }

    #[test]
    fn test_step_presents_a_frame() {
        let mut game = game(ScriptedInput::default());
        assert_eq!(game.step(), LoopState::Running);
        assert_eq!(game.renderer().frames_presented, 1);
        let frame = game.renderer().last_frame.as_ref().unwrap();
        assert_eq!(frame.texts().collect::<Vec<_>>(), vec!["Score: 0"]);
    }

    #[test]
    fn test_held_keys_move_player_and_camera() {
        let mut input = ScriptedInput::default();
        input.hold(Key::Left);
        let mut game = game(input);
        let start = game.state.player.center();
        for _ in 0..100 {
            game.step();
        }
        let moved = game.state.player.center() - start;
        assert!((moved.x + 30.0).abs() < 0.05);
        assert_eq!(moved.y, 0.0);
        assert_eq!(game.camera.center, game.state.player.center());
    }

    #[test]
    fn test_resize_updates_camera() {
        let mut input = ScriptedInput::default();
        input.push_event(WindowEvent::Resized {
            width: 1280,
            height: 960,
        });
        let mut game = game(input);
        game.step();
        assert_eq!(game.camera.window_size, Vec2::new(1280.0, 960.0));
        assert_eq!(game.renderer().last_size, Some((1280, 960)));
    }

    #[test]
    fn test_ten_quiet_ticks() {
        let mut game = game(ScriptedInput::default());
        let start = game.state.player.pos;
        for _ in 0..10 {
            game.step();
        }
        assert_eq!(game.state.player.pos, start);
        assert_eq!(game.state.score, 0);
        assert_eq!(game.state.obstacles.len(), 10);
        assert_eq!(game.renderer().frames_presented, 10);
    }

    #[test]
    fn test_fire_held_uses_clock() {
        let mut input = ScriptedInput::default();
        input.set_fire(true);
        input.set_mouse_screen(Vec2::new(600.0, 240.0));
        let mut game = game(input);
        // 16ms per tick: the first volley happens once the clock passes 500ms
        let mut first_volley = None;
        for n in 1..=40 {
            game.step();
            if game.last_report().map(|r| r.fired).unwrap_or(0) > 0 {
                first_volley = Some(n);
                break;
            }
        }
        assert_eq!(first_volley, Some(32));
    }

    #[test]
    fn test_run_until_script_closes() {
        let mut input = ScriptedInput::default();
        input.close_after(25);
        let mut game = game(input);
        assert_eq!(game.run(), 25);
        assert_eq!(game.loop_state(), LoopState::Closed);
    }
}
