//! Turret Arena entry point
//!
//! Browser: WebGPU canvas driven by requestAnimationFrame.
//! Native: loads resources and runs the idle demo without a window.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::collections::{HashSet, VecDeque};
    use std::rc::Rc;
    use std::time::Duration;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use turret_arena::assets::FontResource;
    use turret_arena::renderer::RenderState;
    use turret_arena::sim::GameState;
    use turret_arena::{
        Camera, FrameClock, Game, InputSource, Key, LoopState, Settings, WindowEvent,
    };

    /// Input state written by DOM listeners, read once per tick
    #[derive(Default)]
    struct BrowserInput {
        held: HashSet<Key>,
        fire: bool,
        /// Mouse position in canvas pixels
        mouse: Vec2,
        events: VecDeque<WindowEvent>,
    }

    impl InputSource for BrowserInput {
        fn poll_event(&mut self) -> Option<WindowEvent> {
            self.events.pop_front()
        }

        fn is_key_held(&self, key: Key) -> bool {
            self.held.contains(&key)
        }

        fn is_fire_held(&self) -> bool {
            self.fire
        }

        fn mouse_world(&self, camera: &Camera) -> Vec2 {
            camera.screen_to_world(self.mouse)
        }
    }

    struct PerformanceClock {
        performance: Option<web_sys::Performance>,
        start: f64,
    }

    impl PerformanceClock {
        fn new() -> Self {
            let performance = web_sys::window().and_then(|w| w.performance());
            let start = performance.as_ref().map(|p| p.now()).unwrap_or(0.0);
            Self { performance, start }
        }
    }

    impl FrameClock for PerformanceClock {
        fn now(&mut self) -> Duration {
            let now = self
                .performance
                .as_ref()
                .map(|p| p.now())
                .unwrap_or(self.start);
            Duration::from_secs_f64((now - self.start).max(0.0) / 1000.0)
        }
    }

    type WebGame = Game<BrowserInput, RenderState, PerformanceClock>;

    fn key_for(name: &str) -> Option<Key> {
        match name {
            "a" | "A" => Some(Key::Left),
            "d" | "D" => Some(Key::Right),
            "w" | "W" => Some(Key::Up),
            "s" | "S" => Some(Key::Down),
            _ => None,
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    /// Canvas size in device pixels
    fn canvas_pixels(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    /// Fetch and validate the score font before anything else starts
    async fn fetch_font(window: &web_sys::Window, path: &str) -> Result<FontResource, JsValue> {
        let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
            .await?
            .dyn_into()?;
        let buffer = JsFuture::from(response.array_buffer()?).await?;
        let data = js_sys::Uint8Array::new(&buffer).to_vec();
        FontResource::from_http(path, response.status(), data).map_err(js_err)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Turret Arena starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("not a canvas"))?;

        let (width, height) = canvas_pixels(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();

        // Fatal: no loop is scheduled without the font
        let font = fetch_font(&window, &settings.font_path)
            .await
            .inspect_err(|e| log::error!("Font load failed: {:?}", e))?;
        log::info!("Font ready: {} bytes", font.len());

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_err)?;

        let mut input = BrowserInput::default();
        input.events.push_back(WindowEvent::Resized { width, height });

        let state = GameState::with_tuning(seed, settings.tuning.clone());
        let game = Rc::new(RefCell::new(Game::new(
            state,
            &settings,
            input,
            render_state,
            PerformanceClock::new(),
        )));

        setup_input_handlers(&window, &canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Turret Arena running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<WebGame>>,
    ) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if let Some(k) = key_for(&key) {
                    g.input_mut().held.insert(k);
                } else if (key == "i" || key == "I") && !event.repeat() {
                    let idle = !g.idle_mode();
                    g.set_idle_mode(idle);
                    log::info!("Idle mode: {}", idle);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(k) = key_for(&event.key()) {
                    game.borrow_mut().input_mut().held.remove(&k);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse position, in device pixels to match the surface
        {
            let game = game.clone();
            let dpr = window.device_pixel_ratio() as f32;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pixel = Vec2::new(event.offset_x() as f32, event.offset_y() as f32) * dpr;
                game.borrow_mut().input_mut().mouse = pixel;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Primary button fires
        for (name, down) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().input_mut().fire = down;
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let (width, height) = canvas_pixels(&window, &canvas);
                canvas.set_width(width);
                canvas.set_height(height);
                game.borrow_mut()
                    .input_mut()
                    .events
                    .push_back(WindowEvent::Resized { width, height });
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Page teardown closes the loop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut()
                    .input_mut()
                    .events
                    .push_back(WindowEvent::CloseRequested);
            });
            let _ = window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Score in the DOM HUD; the GPU path draws no text
    fn update_hud(game: &WebGame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document
            .query_selector("#hud-score .hud-value")
            .ok()
            .flatten()
        {
            el.set_text_content(Some(&game.state.score.to_string()));
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>) {
        let loop_state = {
            let mut g = game.borrow_mut();
            let loop_state = g.step();
            update_hud(&g);
            loop_state
        };

        if loop_state == LoopState::Running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = web::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use turret_arena::assets::{EXIT_RESOURCE_LOAD_FAILURE, FontResource};
    use turret_arena::headless::{RecordingSink, ScriptedInput, SteppedClock};
    use turret_arena::sim::GameState;
    use turret_arena::{Game, Settings};

    env_logger::init();
    log::info!("Turret Arena (native) starting...");

    let settings = Settings::load();

    let font = match FontResource::load(&settings.font_path) {
        Ok(font) => font,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(EXIT_RESOURCE_LOAD_FAILURE);
        }
    };

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("Game initialized with seed: {}", seed);
    log::info!("Native mode has no window; running the idle demo");

    let mut input = ScriptedInput::default();
    input.close_after(settings.headless_ticks);

    let state = GameState::with_tuning(seed, settings.tuning.clone());
    let mut game = Game::new(
        state,
        &settings,
        input,
        RecordingSink::default(),
        SteppedClock::new(Duration::from_millis(16)),
    );
    game.set_idle_mode(true);

    let ticks = game.run();

    println!("Turret Arena demo (seed {seed}, font {})", font.path.display());
    println!("  ticks:      {ticks}");
    println!("  score:      {}", game.state.score);
    println!("  turrets:    {}", game.state.turrets.len());
    println!("  obstacles:  {}", game.state.obstacles.len());
    println!("  frames:     {}", game.renderer().frames_presented);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}
