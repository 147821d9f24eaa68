//! Claw of Code entry point
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

    use claw_of_code::audio::{AudioManager, SoundEffect};
    use claw_of_code::renderer::{RenderState, build_scene, clear_color};
    use claw_of_code::sim::{GameSession, Viewport, choose_action, tick};
    use claw_of_code::{InputDispatcher, InputEvent, Key, Settings};

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        render_state: Option<RenderState>,
        input: InputDispatcher,
        audio: AudioManager,
        /// Demo player drives the session
        demo_mode: bool,
    }

    impl Game {
        fn new(seed: u64, viewport: Viewport, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                session: GameSession::new(seed, viewport, settings),
                render_state: None,
                input: InputDispatcher::new(),
                audio,
                demo_mode: false,
            }
        }

        /// Feed one raw input event into the session
        fn handle_input(&mut self, event: InputEvent) {
            // Any gesture unlocks audio
            self.audio.resume();
            self.input.dispatch(event, &mut self.session);
        }

        /// Run one simulation tick and play its cues
        fn update(&mut self) {
            if self.demo_mode {
                if let Some(action) = choose_action(&self.session) {
                    action.apply(&mut self.session);
                }
            }
            for event in tick(&mut self.session) {
                self.audio.play(SoundEffect::for_event(&event));
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_scene(&self.session);
            let clear = clear_color(self.session.screen);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, clear) {
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

        /// Update overlay and HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            match self.session.overlay_lines() {
                Some(lines) => {
                    set_class(document, "overlay", "");
                    set_class(document, "hud", "hidden");
                    for (i, line) in lines.iter().enumerate() {
                        set_text(document, &format!("overlay-line-{}", i), line);
                    }
                }
                None => {
                    set_class(document, "overlay", "hidden");
                    set_class(document, "hud", "");
                    let [score, high] = self.session.hud_lines();
                    set_text(document, "hud-score", &score);
                    set_text(document, "hud-high", &high);
                }
            }
        }

        /// Window resized: new play area for claw bounds and the next layout
        fn resize(&mut self, width: u32, height: u32) {
            let viewport = Viewport::new(width as f32, height as f32);
            self.session.set_viewport(viewport);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    /// Window inner size in CSS pixels (game units)
    fn window_size(window: &web_sys::Window) -> (u32, u32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(claw_of_code::consts::DEFAULT_VIEWPORT_WIDTH as f64);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(claw_of_code::consts::DEFAULT_VIEWPORT_HEIGHT as f64);
        (w.max(1.0) as u32, h.max(1.0) as u32)
    }

    /// Show the "rotate to landscape" hint while portrait
    fn check_orientation(document: &Document, viewport: Viewport) {
        if viewport.is_portrait() {
            log::warn!("Portrait viewport - landscape recommended");
            set_class(document, "rotate-hint", "");
        } else {
            set_class(document, "rotate-hint", "hidden");
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Claw of Code starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        // Make canvas fill the window
        let (width, height) = window_size(&window);
        canvas.set_width(width);
        canvas.set_height(height);
        let viewport = Viewport::new(width as f32, height as f32);
        check_orientation(&document, viewport);

        // Optional overrides: <canvas data-settings='{"balloon_count": 5}'>
        let settings = canvas
            .get_attribute("data-settings")
            .map(|json| Settings::from_json_or_default(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, viewport, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {:?}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {:?}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        game.borrow_mut().render_state = RenderState::new(surface, &adapter, width, height).await;

        setup_input_handlers(&canvas, game.clone());
        setup_visibility(game.clone());
        setup_resize(canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Claw of Code running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match Key::from_dom(&event.key()) {
                    Key::I => {
                        g.demo_mode = !g.demo_mode;
                        log::info!("Demo mode: {}", g.demo_mode);
                    }
                    Key::M => {
                        g.audio.toggle_muted();
                    }
                    Key::Other => {}
                    key => g.handle_input(InputEvent::KeyDown(key)),
                }
            });
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                let _ = document
                    .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            }
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().handle_input(InputEvent::Touch);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click (also synthesized after a touch; the dispatcher drops that one)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_input(InputEvent::Click);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause the ambience while the tab is hidden
    fn setup_visibility(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            let mut g = game.borrow_mut();
            if g.session.settings.mute_on_blur {
                g.audio.set_ambience_paused(hidden);
            }
            log::info!("Page {}", if hidden { "hidden" } else { "visible" });
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    /// Keep the canvas filling the window
    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size(&window_clone);
            canvas.set_width(width);
            canvas.set_height(height);
            let mut g = game.borrow_mut();
            g.resize(width, height);
            if let Some(document) = window_clone.document() {
                check_orientation(&document, g.session.viewport);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            // Hidden frames are skipped, not caught up
            if !document.hidden() {
                let mut g = game.borrow_mut();
                g.update();
                g.render();
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Claw of Code (native) starting...");
    log::info!("Native mode runs headless demo rounds - use `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => claw_of_code::Settings::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Failed to read settings from {}: {}", path, e);
                claw_of_code::Settings::default()
            }
        },
        None => claw_of_code::Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let summary = demo::run_rounds(seed, settings, demo::DEMO_ROUNDS);
    println!(
        "Played {} demo rounds (seed {}): {} won, {} lost, high score {}",
        summary.rounds, seed, summary.won, summary.lost, summary.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use claw_of_code::sim::{GameEvent, GameSession, Screen, Viewport, choose_action, tick};
    use claw_of_code::{Action, Settings};

    pub const DEMO_ROUNDS: u32 = 3;
    /// Upper bound per round so a bad settings file can't spin forever
    const MAX_TICKS_PER_ROUND: u32 = 1_000_000;

    pub struct Summary {
        pub rounds: u32,
        pub won: u32,
        pub lost: u32,
        pub high_score: u32,
    }

    /// Play `rounds` rounds with the demo player on a default-sized viewport
    pub fn run_rounds(seed: u64, settings: Settings, rounds: u32) -> Summary {
        let mut session = GameSession::new(seed, Viewport::default(), settings);
        let mut summary = Summary {
            rounds: 0,
            won: 0,
            lost: 0,
            high_score: 0,
        };

        for round in 1..=rounds {
            if session.screen.is_terminal() {
                Action::RestartAndResume.apply(&mut session);
            } else {
                Action::StartOrRestart.apply(&mut session);
            }

            let mut ticks = 0;
            while session.screen == Screen::Playing && ticks < MAX_TICKS_PER_ROUND {
                if let Some(Action::Fire) = choose_action(&session) {
                    session.fire();
                }
                for event in tick(&mut session) {
                    match event {
                        GameEvent::BalloonPopped { pos, color } => {
                            log::debug!("Pop {} at ({:.0}, {:.0})", color.css_name(), pos.x, pos.y);
                        }
                        GameEvent::Won { .. } => summary.won += 1,
                        GameEvent::Lost { .. } => summary.lost += 1,
                    }
                }
                ticks += 1;
            }

            if session.screen == Screen::Playing {
                log::warn!("Round {} hit the tick limit", round);
            }
            log::info!(
                "Round {}: {:?} after {} ticks, score {}",
                round,
                session.screen,
                ticks,
                session.score
            );
            summary.rounds += 1;
        }

        summary.high_score = session.high_score.best();
        summary
    }
}
