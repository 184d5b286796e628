//! Pocket Arcade entry point
//!
//! In the browser this wires one game to the page's canvas and runs the
//! animation loop. Natively it plays each game headless on autopilot, which
//! is handy for checking tuning changes without a browser.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use pocket_arcade::Settings;
    use pocket_arcade::consts::MIN_CANVAS_EDGE;
    use pocket_arcade::games::{GameKind, Jumper, Pong, Snake};
    use pocket_arcade::persistence::{KeyValueStore, LocalStore};
    use pocket_arcade::platform::{self, Key, PointerPhase, PointerSample};
    use pocket_arcade::renderer::RenderState;
    use pocket_arcade::scores::Scoreboard;
    use pocket_arcade::sim::{Game, GameRng, Mode, Session};

    /// Canvas element id on every game page
    const CANVAS_ID: &str = "game";

    /// What the HUD showed last frame, so the DOM is only touched on change
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct HudSnapshot {
        mode: Mode,
        score: u64,
        last: u64,
        best: u64,
        suspended: bool,
    }

    /// One running game bound to the page
    struct App<G: Game> {
        session: Session<G>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        last_hud: Option<HudSnapshot>,
    }

    impl<G: Game> App<G> {
        /// Match the backing store to the displayed size
        fn sync_canvas_size(&self) -> (u32, u32) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let (w, h) = platform::canvas_pixel_size(
                self.canvas.client_width() as f64,
                self.canvas.client_height() as f64,
                dpr,
            );
            if self.canvas.width() != w || self.canvas.height() != h {
                self.canvas.set_width(w);
                self.canvas.set_height(h);
            }
            (w, h)
        }

        fn to_canvas(&self, event: &PointerEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            platform::client_to_canvas(
                Vec2::new(event.client_x() as f32, event.client_y() as f32),
                Vec2::new(rect.left() as f32, rect.top() as f32),
                Vec2::new(rect.width() as f32, rect.height() as f32),
                (self.canvas.width(), self.canvas.height()),
            )
        }

        fn frame(&mut self, elapsed: f32) {
            let (w, h) = self.sync_canvas_size();
            if w.min(h) < MIN_CANVAS_EDGE {
                return;
            }

            let frame = self.session.frame(elapsed, w, h);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&frame) {
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

        /// Push score and overlay state into the page
        fn update_hud(&mut self) {
            let scores = self.session.scores();
            let snapshot = HudSnapshot {
                mode: self.session.mode(),
                score: scores.current(),
                last: scores.last(),
                best: scores.best(),
                suspended: self.session.is_suspended(),
            };
            if self.last_hud.as_ref() == Some(&snapshot) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Each page names its live counter differently
            for id in ["score", "streak", "dist"] {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&G::format_score(snapshot.score)));
                }
            }
            if let Some(el) = document.get_element_by_id("lastScore") {
                el.set_text_content(Some(&G::format_score(snapshot.last)));
            }
            if let Some(el) = document.get_element_by_id("bestScore") {
                el.set_text_content(Some(&G::format_score(snapshot.best)));
            }
            if let Some(el) = document.get_element_by_id("overlay") {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", !snapshot.mode.shows_overlay());
            }
            if let Some(el) = document
                .get_element_by_id("rotateOverlay")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = el
                    .style()
                    .set_property("display", platform::rotate_hint_display(snapshot.suspended));
            }

            self.last_hud = Some(snapshot);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let kind = canvas
            .get_attribute("data-game")
            .map(|name| GameKind::from_name(&name))
            .unwrap_or(GameKind::Pong);
        log::info!("Pocket Arcade starting {}...", kind.name());

        let mut store = LocalStore;
        let settings = Settings::load(&store);
        // Write the defaults out once so they can be edited in place
        if store.get(Settings::STORAGE_KEY).is_none() {
            if let Err(e) = settings.save(&mut store) {
                log::warn!("Could not store default settings: {}", e);
            }
        }
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Seed: {}", seed);

        let (width, height) = platform::canvas_pixel_size(
            canvas.client_width() as f64,
            canvas.client_height() as f64,
            window.device_pixel_ratio(),
        );
        canvas.set_width(width);
        canvas.set_height(height);

        let render_state = init_gpu(&canvas, width, height).await;

        match kind {
            GameKind::Pong => start::<Pong>(canvas, render_state, settings.pong, seed),
            GameKind::Jumper => start::<Jumper>(canvas, render_state, settings.jumper, seed),
            GameKind::Snake => start::<Snake>(canvas, render_state, settings.snake, seed),
        }
    }

    /// Bring up WebGPU; without it the page still runs the HUD and logic
    async fn init_gpu(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return None;
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
                log::error!("Failed to get adapter: {}", e);
                return None;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to get device: {}", e);
                None
            }
        }
    }

    fn start<G: Game + 'static>(
        canvas: HtmlCanvasElement,
        render_state: Option<RenderState>,
        tuning: G::Tuning,
        seed: u64,
    ) {
        let scores = Scoreboard::load(G::STORAGE_KEY, Box::new(LocalStore));
        let session = Session::<G>::new(
            canvas.width(),
            canvas.height(),
            tuning,
            scores,
            Box::new(GameRng::new(seed)),
        );
        let app = Rc::new(RefCell::new(App {
            session,
            render_state,
            canvas: canvas.clone(),
            last_time: 0.0,
            last_hud: None,
        }));

        setup_pointer_handlers(&canvas, app.clone());
        setup_keyboard_handlers(app.clone());
        setup_start_button(app.clone());

        request_animation_frame(app);
        log::info!("{} running!", G::NAME);
    }

    fn setup_pointer_handlers<G: Game + 'static>(
        canvas: &HtmlCanvasElement,
        app: Rc<RefCell<App<G>>>,
    ) {
        let phases = [
            ("pointerdown", PointerPhase::Down),
            ("pointermove", PointerPhase::Move),
            ("pointerup", PointerPhase::Up),
            ("pointercancel", PointerPhase::Cancel),
        ];
        for (name, phase) in phases {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if phase == PointerPhase::Down {
                    let _ = a.canvas.set_pointer_capture(event.pointer_id());
                }
                let pos = a.to_canvas(&event);
                a.session.pointer(PointerSample { phase, pos });
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard_handlers<G: Game + 'static>(app: Rc<RefCell<App<G>>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key()) else {
                    return;
                };
                // Arrows and space would otherwise scroll the page
                event.prevent_default();
                if event.repeat() {
                    return;
                }
                app.borrow_mut().session.key(key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    app.borrow_mut().session.key_up(key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button<G: Game + 'static>(app: Rc<RefCell<App<G>>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().session.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame<G: Game + 'static>(app: Rc<RefCell<App<G>>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop<G: Game + 'static>(app: Rc<RefCell<App<G>>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // First frame only draws; the session clamps long gaps
            let elapsed = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            a.last_time = time;

            a.frame(elapsed);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pocket_arcade::Settings;
    use pocket_arcade::games::{self, Jumper, Pong, Snake};

    env_logger::init();
    log::info!("Pocket Arcade (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve`; playing headless on autopilot");

    let settings = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Settings::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", path, e);
                Settings::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                Settings::default()
            }
        },
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or(1);

    headless::demo::<Pong>(settings.pong, seed, games::pong::autopilot);
    headless::demo::<Jumper>(settings.jumper, seed, games::jumper::autopilot);
    headless::demo::<Snake>(settings.snake, seed, games::snake::autopilot);
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pocket_arcade::persistence::MemoryStore;
    use pocket_arcade::scores::Scoreboard;
    use pocket_arcade::sim::{Game, GameEvent, GameRng, Mode, Session};

    /// Ten simulated minutes at 60 Hz
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const FRAME_DT: f32 = 1.0 / 60.0;

    /// Play one round at 1280x720 with `pilot` steering
    pub fn demo<G: Game>(tuning: G::Tuning, seed: u64, pilot: fn(&G) -> G::Input) {
        let scores = Scoreboard::load(G::STORAGE_KEY, Box::new(MemoryStore::new()));
        let mut session =
            Session::<G>::new(1280, 720, tuning, scores, Box::new(GameRng::new(seed)));
        session.start();

        let mut frames = 0;
        let mut events = 0usize;
        while frames < MAX_FRAMES && session.mode() == Mode::Playing {
            let input = pilot(session.world());
            session.set_input(input);
            events += session
                .advance(FRAME_DT)
                .iter()
                .filter(|e| !matches!(e, GameEvent::WallBounce))
                .count();
            frames += 1;
        }

        let vertices = session.render().vertices().len();
        log::info!(
            "{}: {} frames, {} events, {} vertices in last frame",
            G::NAME,
            frames,
            events,
            vertices
        );
        let (w, h) = session.world_size();
        println!(
            "{:>7} | {}x{} | {} after {:.1}s | score {} (best {})",
            G::NAME,
            w,
            h,
            session.mode().as_str(),
            frames as f32 * FRAME_DT,
            G::format_score(session.scores().last().max(session.scores().current())),
            G::format_score(session.scores().best()),
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
