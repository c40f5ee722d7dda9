//! Collaborators that need no window: scripted input, a sink that records
//! frames and a clock advanced by a fixed step.

use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use glam::Vec2;

use crate::camera::Camera;
use crate::frame::{FrameClock, InputSource, Key, RenderError, RenderSink, WindowEvent};
use crate::renderer::draw::DrawList;

/// Input driven by the caller instead of a device
#[derive(Debug, Default)]
pub struct ScriptedInput {
    held: HashSet<Key>,
    fire: bool,
    /// Mouse position in window pixels
    mouse_screen: Vec2,
    events: VecDeque<WindowEvent>,
    close_after: Option<u64>,
    drains: u64,
}

impl ScriptedInput {
    pub fn hold(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set_fire(&mut self, fire: bool) {
        self.fire = fire;
    }

    pub fn set_mouse_screen(&mut self, pixel: Vec2) {
        self.mouse_screen = pixel;
    }

    pub fn push_event(&mut self, event: WindowEvent) {
        self.events.push_back(event);
    }

    /// Request a close once `frames` ticks have run
    pub fn close_after(&mut self, frames: u64) {
        self.close_after = Some(frames);
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self) -> Option<WindowEvent> {
        if let Some(event) = self.events.pop_front() {
            return Some(event);
        }
        if self.close_after.is_some_and(|limit| self.drains >= limit) {
            self.close_after = None;
            return Some(WindowEvent::CloseRequested);
        }
        // Queue empty: one frame's worth of events drained
        self.drains += 1;
        None
    }

    fn is_key_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    fn is_fire_held(&self) -> bool {
        self.fire
    }

    fn mouse_world(&self, camera: &Camera) -> Vec2 {
        camera.screen_to_world(self.mouse_screen)
    }
}

/// Sink that keeps the last frame instead of drawing it
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub frames_presented: u64,
    pub last_frame: Option<DrawList>,
    pub last_size: Option<(u32, u32)>,
}

impl RenderSink for RecordingSink {
    fn present(&mut self, frame: &DrawList) -> Result<(), RenderError> {
        self.frames_presented += 1;
        self.last_frame = Some(frame.clone());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.last_size = Some((width, height));
    }
}

/// Clock that advances by `step` on every read
#[derive(Debug, Clone)]
pub struct SteppedClock {
    step: Duration,
    elapsed: Duration,
}

impl SteppedClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            elapsed: Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl FrameClock for SteppedClock {
    fn now(&mut self) -> Duration {
        self.elapsed += self.step;
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_clock() {
        let mut clock = SteppedClock::new(Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::from_millis(32));
        assert_eq!(clock.elapsed(), Duration::from_millis(32));
    }

    #[test]
    fn test_queued_events_come_first() {
        let mut input = ScriptedInput::default();
        input.close_after(0);
        input.push_event(WindowEvent::Resized {
            width: 10,
            height: 10,
        });
        assert_eq!(
            input.poll_event(),
            Some(WindowEvent::Resized {
                width: 10,
                height: 10
            })
        );
        assert_eq!(input.poll_event(), Some(WindowEvent::CloseRequested));
        assert_eq!(input.poll_event(), None);
    }

    #[test]
    fn test_held_keys() {
        let mut input = ScriptedInput::default();
        input.hold(Key::Up);
        assert!(input.is_key_held(Key::Up));
        assert!(!input.is_key_held(Key::Down));
        input.release(Key::Up);
        assert!(!input.is_key_held(Key::Up));
    }

    #[test]
    fn test_mouse_maps_through_camera() {
        let mut input = ScriptedInput::default();
        input.set_mouse_screen(Vec2::new(320.0, 240.0));
        let camera = Camera::new(Vec2::new(1000.0, 1000.0), Vec2::new(640.0, 480.0));
        assert_eq!(input.mouse_world(&camera), Vec2::new(1000.0, 1000.0));
    }
}
