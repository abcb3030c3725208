//! Star Raid entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use star_raid::audio::AudioManager;
    use star_raid::platform::{AudioOut, GameKey, HudOut, InputState};
    use star_raid::renderer::RenderState;
    use star_raid::sim::{GamePhase, Viewport};
    use star_raid::ui::{HudSnapshot, final_score_text};
    use star_raid::{Outputs, Session, Settings, Tuning};

    /// HUD backed by DOM elements
    struct DomHud {
        document: Document,
        last: Option<HudSnapshot>,
        fps: Option<u32>,
    }

    impl DomHud {
        fn new(document: Document) -> Self {
            Self {
                document,
                last: None,
                fps: None,
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_fps(&mut self, fps: Option<u32>) {
            if fps == self.fps {
                return;
            }
            self.fps = fps;
            match fps {
                Some(fps) => {
                    self.set_text("fps-display", &format!("{} FPS", fps));
                    self.set_hidden("fps-display", false);
                }
                None => self.set_hidden("fps-display", true),
            }
        }
    }

    impl HudOut for DomHud {
        fn update(&mut self, hud: &HudSnapshot) {
            // Only touch the DOM when something changed
            if self.last.as_ref() == Some(hud) {
                return;
            }
            if let Some(bar) = self
                .document
                .get_element_by_id("hp-bar-fill")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = bar.style().set_property("width", &hud.health_width());
            }
            self.set_text("score-display", &hud.score_text());
            self.set_text("weapon-display", &hud.weapon_text());
            self.last = Some(hud.clone());
        }

        fn show_game_over(&mut self, score: u64) {
            self.set_text("final-score", &final_score_text(score));
            self.set_hidden("pause-screen", true);
            self.set_hidden("game-over-screen", false);
        }

        fn show_pause(&mut self, paused: bool) {
            self.set_hidden("pause-screen", !paused);
        }

        fn hide_overlays(&mut self) {
            self.set_hidden("start-screen", true);
            self.set_hidden("pause-screen", true);
            self.set_hidden("game-over-screen", true);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        audio: AudioManager,
        hud: DomHud,
        render: RenderState,
        canvas: HtmlCanvasElement,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
    }

    impl Game {
        /// Play area in CSS pixels
        fn viewport(&self) -> Viewport {
            Viewport::new(
                self.canvas.client_width().max(1) as f32,
                self.canvas.client_height().max(1) as f32,
            )
        }

        /// Keep the backing store in step with the element size
        fn sync_canvas_size(&mut self) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if (width, height) != self.render.size && width > 0 && height > 0 {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                self.render.resize(width, height);
                self.render.scale = dpr as f32;
                log::info!("Canvas resized to {}x{}", width, height);
            }
        }

        fn frame(&mut self, time: f64) {
            self.sync_canvas_size();
            let viewport = self.viewport();

            if self.input.take_start() {
                match self.session.phase() {
                    GamePhase::Idle | GamePhase::GameOver => {
                        self.audio.resume();
                        self.session
                            .start(viewport, &mut self.audio, &mut self.hud);
                    }
                    GamePhase::Paused => self.input.request_pause(),
                    GamePhase::Running => {}
                }
            }

            let input = self.input.snapshot();
            let mut out = Outputs {
                audio: &mut self.audio,
                hud: &mut self.hud,
                render: &mut self.render,
            };
            self.session.frame(time, viewport, &input, &mut out);

            self.track_fps(time);
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();

            let fps = if self.settings.show_fps {
                let oldest = self.frame_times[self.frame_index];
                (oldest > 0.0 && time > oldest)
                    .then(|| (60_000.0 / (time - oldest)).round() as u32)
            } else {
                None
            };
            self.hud.set_fps(fps);
        }

        /// Tab hidden or window blurred
        fn on_focus_lost(&mut self, reason: &str) {
            self.input.release_all();
            if self.settings.pause_on_blur && self.session.phase() == GamePhase::Running {
                self.input.request_pause();
                // rAF stops while hidden; silence the loop now
                self.audio.stop_bgm();
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            // The running loop captured its volume when it started
            if self.audio.bgm_active() {
                self.audio.start_bgm();
            }
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Star Raid starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {}", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render = RenderState::new(surface, &adapter, width, height, dpr as f32)
            .await
            .map_err(|e| format!("Failed to create device: {}", e))?;

        let settings = Settings::load();
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);
        render.options.hurt_flash = settings.hurt_flash_enabled();

        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(
            canvas.client_width().max(1) as f32,
            canvas.client_height().max(1) as f32,
        );
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, viewport, tuning),
            input: InputState::new(),
            audio,
            hud: DomHud::new(document.clone()),
            render,
            canvas: canvas.clone(),
            settings,
            frame_times: [0.0; 60],
            frame_index: 0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&window, game.clone());
        setup_pointer(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Star Raid running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if key.eq_ignore_ascii_case("m") {
                    if !event.repeat() {
                        g.toggle_mute();
                    }
                    return;
                }
                // Held Escape/Enter must not toggle repeatedly
                if event.repeat()
                    && matches!(GameKey::from_key(&key), Some(GameKey::Pause | GameKey::Start))
                {
                    event.prevent_default();
                    return;
                }
                if g.input.key_down(&key).is_some() {
                    // Arrows and space would scroll the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Touch position relative to the canvas, in CSS pixels
    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - craft follows the cursor
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_moved(Vec2::new(
                    event.offset_x() as f32,
                    event.offset_y() as f32,
                ));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move - craft sits above the finger
        for name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&canvas_clone, &event) {
                    let mut g = game.borrow_mut();
                    let offset = g.session.tuning.touch_offset_y;
                    g.input.touch_moved(pos, offset);
                }
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start and restart share one action
        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    let mut g = game.borrow_mut();
                    // Button press is the user gesture that unlocks audio
                    g.audio.resume();
                    g.input.request_start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase() == GamePhase::Paused {
                    g.input.request_pause(); // Toggle back to running
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().on_focus_lost("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().on_focus_lost("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Star Raid failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: a scripted pilot plays one seeded game and the outcome is
/// logged. Usage: `star-raid [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Star Raid (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {}", e);
            std::process::exit(2);
        }
        None => 1,
    };
    let tuning = match args.next() {
        Some(path) => match headless::load_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning from {}: {}", path, e);
                star_raid::Tuning::default()
            }
        },
        None => star_raid::Tuning::default(),
    };

    let report = headless::play(seed, tuning);
    log::info!(
        "Finished after {} frames ({:.1}s): phase {:?}, score {}",
        report.frames,
        report.elapsed_ms / 1000.0,
        report.phase,
        report.score
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use star_raid::audio::SoundEffect;
    use star_raid::consts::{DEFAULT_FRAME_MS, DEFAULT_VIEWPORT};
    use star_raid::platform::{AudioOut, HudOut, InputState, RenderOut};
    use star_raid::renderer::{SceneOptions, build_scene};
    use star_raid::sim::{GamePhase, GameState};
    use star_raid::ui::{HudSnapshot, final_score_text};
    use star_raid::{Outputs, Session, Tuning};

    /// Five minutes at 60 Hz
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    pub struct Report {
        pub frames: u64,
        pub elapsed_ms: f64,
        pub phase: GamePhase,
        pub score: u64,
    }

    pub fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    #[derive(Default)]
    struct LogAudio {
        bgm: bool,
        cues: u64,
    }

    impl AudioOut for LogAudio {
        fn play(&mut self, effect: SoundEffect) {
            self.cues += 1;
            log::trace!("cue {:?}", effect);
        }

        fn start_bgm(&mut self) {
            self.bgm = true;
        }

        fn stop_bgm(&mut self) {
            self.bgm = false;
        }

        fn bgm_active(&self) -> bool {
            self.bgm
        }
    }

    struct LogHud;

    impl HudOut for LogHud {
        fn update(&mut self, hud: &HudSnapshot) {
            log::trace!("{} | {} | HP {}", hud.score_text(), hud.weapon_text(), hud.health_width());
        }

        fn show_game_over(&mut self, score: u64) {
            log::info!("{}", final_score_text(score));
        }

        fn show_pause(&mut self, paused: bool) {
            log::info!("Pause overlay: {}", paused);
        }

        fn hide_overlays(&mut self) {}
    }

    /// Builds the scene without a GPU so the draw path still runs
    #[derive(Default)]
    struct CountingRender {
        peak_vertices: usize,
    }

    impl RenderOut for CountingRender {
        fn draw(&mut self, state: &GameState) {
            let vertices = build_scene(state, &SceneOptions::default());
            self.peak_vertices = self.peak_vertices.max(vertices.len());
        }
    }

    pub fn play(seed: u64, tuning: Tuning) -> Report {
        let viewport = DEFAULT_VIEWPORT;
        let mut session = Session::new(seed, viewport, tuning);
        let mut input = InputState::new();
        let mut audio = LogAudio::default();
        let mut hud = LogHud;
        let mut render = CountingRender::default();

        session.start(viewport, &mut audio, &mut hud);

        let mut frames = 0;
        while frames < MAX_FRAMES && session.phase() == GamePhase::Running {
            let t = frames as f64 * DEFAULT_FRAME_MS;
            // Weave across the bottom of the screen
            let sweep = (t / 1500.0).sin() as f32;
            input.pointer_moved(Vec2::new(
                viewport.width * (0.5 + 0.4 * sweep),
                viewport.height - 100.0,
            ));

            let tick_input = input.snapshot();
            let mut out = Outputs {
                audio: &mut audio,
                hud: &mut hud,
                render: &mut render,
            };
            session.frame(t, viewport, &tick_input, &mut out);
            frames += 1;
        }

        log::info!(
            "{} audio cues, peak {} vertices, heartbeat running: {}",
            audio.cues,
            render.peak_vertices,
            audio.bgm
        );

        Report {
            frames,
            elapsed_ms: session.state.elapsed_ms,
            phase: session.phase(),
            score: session.state.score,
        }
    }
}
