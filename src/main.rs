//! Solo Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use solo_pong::audio::{AudioManager, SoundEffect};
    use solo_pong::consts::*;
    use solo_pong::platform::{KeyCommand, PointerMapper, key_command, queue_command};
    use solo_pong::renderer::{RenderState, build_scene};
    use solo_pong::sim::{GamePhase, MatchState, TickInput, tick};
    use solo_pong::{HudView, Settings};

    /// Game instance holding all state
    struct Game {
        state: MatchState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        pointer: PointerMapper,
        /// Last HUD pushed to the DOM, to skip redundant writes
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, client_w: f32, client_h: f32) -> Self {
            let state = MatchState::new(seed);
            let pointer = PointerMapper::new(client_w, client_h, state.board);
            Self {
                audio: AudioManager::new(&settings),
                state,
                render_state: None,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                pointer,
                last_hud: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }
            if substeps == MAX_SUBSTEPS {
                // Drop the backlog rather than fast-forwarding the match
                self.accumulator = 0.0;
            }

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let mut hud = HudView::from_state(&self.state);
            if !self.settings.show_rally {
                hud.rally = None;
            }
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            set_text(document, "score-player", Some(&hud.player_score));
            set_text(document, "score-ai", Some(&hud.ai_score));
            set_text(document, "overlay", hud.overlay.as_deref());
            set_text(document, "rally", hud.rally.as_deref());

            self.last_hud = Some(hud);
        }

        /// Apply a key or button command
        fn command(&mut self, command: KeyCommand) {
            if queue_command(&mut self.input, command) {
                // Any gameplay command counts as the user gesture audio needs
                self.audio.resume();
                return;
            }
            if command == KeyCommand::ToggleMute {
                let muted = self.settings.toggle_mute();
                self.audio.apply_settings(&self.settings);
                self.settings.save();
                log::info!("Muted: {}", muted);
            }
        }

        /// Pause if playing (tab hidden, window blur)
        fn auto_pause(&mut self, reason: &str) {
            if self.settings.pause_on_blur && self.state.phase == GamePhase::Running {
                self.input.pause = true;
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    /// Set an element's text, hiding it when there is nothing to show
    fn set_text(document: &Document, id: &str, text: Option<&str>) {
        if let Some(el) = document.get_element_by_id(id) {
            match text {
                Some(text) => {
                    el.set_text_content(Some(text));
                    let _ = el.set_attribute("class", "");
                }
                None => {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Solo Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#canvas is not a canvas"))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            settings,
            client_w as f32,
            client_h as f32,
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU (WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let board = game.borrow().state.board;
        let render_state = RenderState::new(surface, &adapter, width, height, board)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        setup_resize(&canvas, game.clone())?;
        setup_restart_button(&document, game.clone());
        setup_auto_pause(&document, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Solo Pong running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Mouse move - only Y matters
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.pointer.set_client_size(
                    canvas_clone.client_width() as f32,
                    canvas_clone.client_height() as f32,
                );
                let y = g.pointer.to_board_y(event.offset_y() as f32);
                g.input.pointer_y = Some(y);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click - start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().command(KeyCommand::Start);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.pointer.set_client_size(
                        canvas_clone.client_width() as f32,
                        canvas_clone.client_height() as f32,
                    );
                    let rect = canvas_clone.get_bounding_client_rect();
                    let offset_y = touch.client_y() as f32 - rect.top() as f32;
                    let y = g.pointer.to_board_y(offset_y);
                    g.input.pointer_y = Some(y);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start - start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().command(KeyCommand::Start);
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(command) = key_command(event.key().as_str()) {
                    event.prevent_default();
                    game.borrow_mut().command(command);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.pointer.set_client_size(client_w as f32, client_h as f32);
            if let Some(render_state) = g.render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().command(KeyCommand::Restart);
                log::info!("Restart requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Solo Pong failed to start: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Solo Pong (native) starting...");
    log::info!("Native mode runs a headless match - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless match: the player paddle is steered by a lagging autopilot
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use solo_pong::HudView;
    use solo_pong::consts::SIM_HZ;
    use solo_pong::sim::{GameEvent, GamePhase, MatchState, TickInput, tick};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u64 = SIM_HZ as u64 * 600;
    /// Autopilot reacts to where the ball was this many ticks ago
    const REACTION_TICKS: usize = 8;

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut state = MatchState::new(seed);
        log::info!("Headless match with seed {}", seed);

        let mut history = std::collections::VecDeque::with_capacity(REACTION_TICKS);
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };

        for _ in 0..MAX_TICKS {
            history.push_back(state.ball.pos.y);
            if history.len() > REACTION_TICKS {
                history.pop_front();
            }
            input.pointer_y = history.front().copied();

            tick(&mut state, &input);
            input.clear_one_shots();

            for event in state.drain_events() {
                if let GameEvent::Scored(side) = event {
                    log::info!(
                        "{} scores: {} - {}",
                        side.label(),
                        state.score.player,
                        state.score.ai
                    );
                }
            }

            if matches!(state.phase, GamePhase::GameOver { .. }) {
                break;
            }
        }

        let hud = HudView::from_state(&state);
        println!(
            "Final score: Player {} - AI {} ({})",
            hud.player_score,
            hud.ai_score,
            hud.overlay.unwrap_or_else(|| "time limit reached".to_string())
        );
    }
}
