//! Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use dodge::audio::AudioManager;
    use dodge::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use dodge::persistence::LocalStorageStore;
    use dodge::platform::{InputController, run_seed};
    use dodge::renderer::{RenderState, build_scene};
    use dodge::sim::{Field, GamePhase};
    use dodge::{Game, GameEvent, Settings};

    /// Browser app: the game plus its adapters
    struct App {
        game: Game,
        input: InputController,
        audio: AudioManager,
        settings: Settings,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(canvas: HtmlCanvasElement) -> Self {
            let settings = Settings::load();
            Self {
                game: Game::new(Box::new(LocalStorageStore)),
                input: InputController::default(),
                audio: AudioManager::from_settings(&settings),
                settings,
                render_state: None,
                canvas,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Canvas-relative x and displayed canvas width
        fn canvas_x(&self, client_x: i32) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (client_x as f32 - rect.left() as f32, rect.width() as f32)
        }

        fn pointer_down(&mut self, client_x: i32) {
            let (x, width) = self.canvas_x(client_x);
            self.input.pointer_down(x, width);
        }

        fn pointer_move(&mut self, client_x: i32) {
            if self.input.is_dragging() {
                let (x, width) = self.canvas_x(client_x);
                self.input.pointer_move(x, width);
            }
        }

        fn start(&mut self) {
            if self.game.start(run_seed()) {
                self.input.release_all();
                // Start is a user gesture, so the context may resume now
                self.audio.resume();
                if let Some(document) = document() {
                    set_overlay(&document, false);
                }
            }
        }

        fn toggle_pause(&mut self) {
            match self.game.phase() {
                GamePhase::Running => {
                    self.game.pause();
                }
                GamePhase::Paused => {
                    self.game.resume();
                }
                _ => {}
            }
        }

        fn toggle_mute(&mut self) -> bool {
            let muted = self.settings.toggle_mute();
            self.audio.set_muted(muted);
            self.settings.save();
            muted
        }

        fn blur(&mut self) {
            self.input.release_all();
            if self.settings.pause_on_blur && self.game.pause() {
                log::info!("Auto-paused (window blur)");
            }
        }

        fn focus(&mut self) {
            if self.settings.pause_on_blur {
                self.game.resume();
            }
        }

        /// One display frame
        fn frame(&mut self, time: f64) {
            let events = self.game.tick(time, self.input.intent());
            self.audio.handle_events(&events);
            self.track_fps(time);
            self.render();
            self.update_hud(&events);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(self.game.run(), self.settings.glow);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, events: &[GameEvent]) {
            let Some(document) = document() else { return };

            set_text(&document, "score", &self.game.score().to_string());
            set_text(&document, "highScore", &self.game.high_score().to_string());
            if self.settings.show_fps {
                set_text(&document, "fps", &self.fps.to_string());
            }

            if events
                .iter()
                .any(|e| matches!(e, GameEvent::Collided { .. }))
            {
                if let Some(summary) = self.game.last_run() {
                    set_text(&document, "finalScore", &summary.headline());
                }
                set_overlay(&document, true);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_overlay(document: &Document, show: bool) {
        if let Some(el) = document.get_element_by_id("overlay") {
            let classes = el.class_list();
            let _ = if show {
                classes.add_1("show")
            } else {
                classes.remove_1("show")
            };
        }
    }

    /// Scale the canvas CSS size to the window, keeping the field aspect
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) {
        let inner = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(FIELD_WIDTH as f64);
        let scale = (inner - 40.0).min(480.0) / FIELD_WIDTH as f64;
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", (FIELD_WIDTH as f64 * scale).round()));
        let _ = style.set_property(
            "height",
            &format!("{}px", (FIELD_HEIGHT as f64 * scale).round()),
        );
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Fixed internal resolution; CSS does the scaling
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        fit_canvas(&window, &canvas);

        let app = Rc::new(RefCell::new(App::new(canvas.clone())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, Field::default())
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        app.borrow_mut().render_state = Some(render_state);

        {
            let a = app.borrow();
            set_text(&document, "highScore", &a.game.high_score().to_string());
            set_text(&document, "muteBtn", mute_label(a.settings.muted));
            set_overlay(&document, true);
        }

        setup_input_handlers(&window, &canvas, app.clone());
        setup_buttons(&document, app.clone());
        setup_focus_handlers(&window, app.clone());

        {
            let canvas = canvas.clone();
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                fit_canvas(&window_clone, &canvas);
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Dodge running!");
        Ok(())
    }

    fn mute_label(muted: bool) -> &'static str {
        if muted { "Unmute" } else { "Mute" }
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App>>,
    ) {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let key = event.key();
                if a.input.key_down(&key) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "Enter" | " " => {
                        if matches!(a.game.phase(), GamePhase::Idle | GamePhase::GameOver) {
                            a.start();
                        }
                    }
                    "Escape" | "p" => a.toggle_pause(),
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().input.key_up(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse: press on the canvas, track and release anywhere
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().pointer_down(event.client_x());
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().pointer_move(event.client_x());
            });
            let _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().input.pointer_up();
            });
            let _ = window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().pointer_down(touch.client_x());
                }
            });
            let _ = canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().pointer_move(touch.client_x());
                }
            });
            let _ = window.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().input.pointer_up();
            });
            let _ = window.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("muteBtn") {
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let muted = app.borrow_mut().toggle_mute();
                btn_clone.set_text_content(Some(mute_label(muted)));
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().focus();
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    if let Err(e) = wasm_game::run().await {
        log::error!("Dodge failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dodge (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Headless demo: a simple bot plays one run at a fixed 60 Hz frame rate
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dodge::persistence::FileStore;
    use dodge::platform::run_seed;
    use dodge::sim::{GamePhase, PlayerIntent, RunState};
    use dodge::{Game, GameEvent};

    /// Frames before the demo gives up (two minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 120;
    /// How far above the player the bot looks for threats
    const LOOKAHEAD: f32 = 160.0;

    pub fn run() {
        let path = std::env::var("DODGE_HIGH_SCORE").unwrap_or_else(|_| "dodge_high.json".into());
        let mut game = Game::new(Box::new(FileStore::new(path)));
        log::info!("High score: {}", game.high_score());

        let seed = run_seed();
        game.start(seed);
        log::info!("Demo run with seed: {}", seed);

        let frame_ms = 1000.0 / 60.0;
        for frame in 0..MAX_FRAMES {
            let intent = steer(game.run());
            for event in game.tick(frame as f64 * frame_ms, intent) {
                match event {
                    GameEvent::Milestone { score } => log::info!("Reached {}", score),
                    GameEvent::NewRecord { score } => log::info!("New high score: {}", score),
                    _ => {}
                }
            }
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        match game.last_run() {
            Some(summary) => println!("{}", summary.headline()),
            None => println!("Survived the demo with score {}", game.score()),
        }
    }

    /// Move away from the nearest block falling onto the paddle, else drift to centre
    fn steer(run: &RunState) -> PlayerIntent {
        let player = &run.player;
        let centre = player.x + player.w / 2.0;

        let threat = run
            .obstacles
            .iter()
            .filter(|o| o.y + o.h > player.y - LOOKAHEAD && o.y < player.y + player.h)
            .filter(|o| o.x < player.x + player.w + 8.0 && o.x + o.w > player.x - 8.0)
            .max_by(|a, b| a.y.total_cmp(&b.y));

        let target = match threat {
            Some(o) => {
                let room_left = o.x - run.field.min_player_x();
                let room_right = run.field.max_player_x(0.0) - (o.x + o.w);
                if room_left > room_right {
                    o.x - player.w
                } else {
                    o.x + o.w + player.w
                }
            }
            None => run.field.width / 2.0,
        };

        let offset = target - centre;
        if offset.abs() < 4.0 {
            PlayerIntent::Velocity(0.0)
        } else {
            PlayerIntent::Velocity(offset.signum() * player.speed)
        }
    }
}
