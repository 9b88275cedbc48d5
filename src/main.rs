//! Stasis Strike entry point
//!
//! The browser build drives the world from `requestAnimationFrame`; the
//! native build runs a scripted headless session for smoke testing.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use stasis_strike::Settings;
    use stasis_strike::audio::AudioManager;
    use stasis_strike::consts::FRAME_MS;
    use stasis_strike::render::Renderer;
    use stasis_strike::sim::{GameMode, InputState, World, dispatch_events};
    use stasis_strike::ui::{DomHud, START_SCREEN};

    const CANVAS_ID: &str = "game-canvas";
    /// Longest frame gap fed to the simulation
    const MAX_FRAME_GAP_MS: f32 = 250.0;

    /// Game instance holding all state
    struct Game {
        world: World,
        renderer: Renderer,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        input: InputState,
        audio: AudioManager,
        hud: DomHud,
        settings: Settings,
        last_time: f64,
    }

    impl Game {
        /// One animation frame: simulate, flush events, draw
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) as f32).clamp(0.0, MAX_FRAME_GAP_MS)
            } else {
                FRAME_MS
            };
            self.last_time = time;

            self.world.update(dt, &self.input);
            self.flush_events();
            self.renderer.draw(&self.world, &mut self.ctx);
        }

        fn flush_events(&mut self) {
            dispatch_events(self.world.drain_events(), &mut self.audio, &mut self.hud);
        }

        fn start_run(&mut self) {
            self.hud.set_visible(START_SCREEN, false);
            self.hud.set_visible("game-over-screen", false);
            self.hud.set_visible("pause-screen", false);
            self.input.release_all();
            self.audio.resume();
            self.world.restart();
            self.flush_events();
        }

        fn resize(&mut self, width: f32, height: f32) {
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.world.resize(width, height);
        }

        /// Flip mute and remember it for the next visit
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
        }

        /// Pause when focus is lost; held keys would otherwise stick
        fn auto_pause(&mut self, reason: &str) {
            self.input.release_all();
            if self.world.mode == GameMode::Playing {
                self.world.toggle_pause();
                self.flush_events();
                log::info!("Auto-paused ({})", reason);
            }
            if self.settings.mute_on_blur {
                self.audio.suspend();
            }
        }
    }

    fn window_size(window: &web_sys::Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Stasis Strike starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game {
            world: World::new(width, height, seed),
            renderer: Renderer::from_settings(&settings, seed),
            canvas,
            ctx,
            input: InputState::new(),
            audio: AudioManager::new(&settings),
            hud: DomHud::new(),
            settings,
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;
        setup_buttons(game.clone())?;
        setup_auto_pause(game.clone())?;

        request_animation_frame(game)?;

        log::info!("Stasis Strike running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Escape" => g.world.toggle_pause(),
                    "m" | "M" if !event.repeat() => g.toggle_mute(),
                    " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.input.press(&key);
                    }
                    _ => g.input.press(&key),
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.release(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse aim and fire
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer.pos.x = event.client_x() as f32;
                g.input.pointer.pos.y = event.client_y() as f32;
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        for (name, down) in [("mousedown", true), ("mouseup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer.down = down;
            });
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else { return };
                let (w, h) = window_size(&window);
                game.borrow_mut().resize(w, h);
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Wire a click handler to the element with `id`, if the page has one
    fn on_click(id: &str, mut handler: impl FnMut(&HtmlElement) + 'static) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}, button disabled", id);
            return Ok(());
        };
        let button: HtmlElement = el.dyn_into()?;
        let target = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            handler(&target);
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["start-btn", "restart-btn"] {
            let game = game.clone();
            on_click(id, move |button| {
                game.borrow_mut().start_run();
                // Drop focus so Space fires instead of clicking again
                let _ = button.blur();
            })?;
        }

        {
            let game = game.clone();
            on_click("resume-btn", move |_| {
                let mut g = game.borrow_mut();
                g.world.toggle_pause();
                g.audio.resume();
                g.flush_events();
            })?;
        }

        on_click("quit-btn", move |_| {
            let mut g = game.borrow_mut();
            g.world.reset_menu();
            g.flush_events();
            g.hud.set_visible("pause-screen", false);
            g.hud.set_visible(START_SCREEN, true);
        })
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

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

    fn request_animation_frame(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        if let Err(e) = request_animation_frame(game) {
            log::error!("Animation loop stopped: {:?}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use stasis_strike::Tuning;
    use stasis_strike::consts::FRAME_MS;
    use stasis_strike::render::{RecordingSurface, Renderer};
    use stasis_strike::sim::{GameMode, HeatLevel, HudSink, InputState, World, dispatch_events};

    /// Ten simulated seconds at 60 Hz
    const DEFAULT_FRAMES: u32 = 600;

    /// HUD that writes to the log
    #[derive(Default)]
    struct LogHud {
        score: u64,
    }

    impl HudSink for LogHud {
        fn set_score(&mut self, score: u64) {
            self.score = score;
        }

        fn set_heat_level(&mut self, level: HeatLevel) {
            log::debug!("Heat: {:?}", level);
        }

        fn show_game_over(&mut self, final_score: u64) {
            log::info!("GAME OVER - final score {}", final_score);
        }
    }

    /// Scripted pilot: always firing, weaving side to side, freezing time
    /// for one second out of every five
    fn script(frame: u32, input: &mut InputState) {
        let seconds = frame as f32 * FRAME_MS / 1000.0;
        input.release_all();
        input.pointer.down = true;
        input.pointer.pos.y = 0.0;
        input.press(if (seconds as u32 / 2) % 2 == 0 { "a" } else { "d" });
        if seconds % 5.0 >= 4.0 {
            input.press("shift");
        }
    }

    /// Usage: stasis-strike [seed] [frames] [tuning.json]
    pub fn run() {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(42);
        let frames = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_FRAMES);
        let tuning = match args.get(2).map(std::fs::read_to_string) {
            Some(Ok(json)) => Tuning::from_json_or_default(&json),
            Some(Err(e)) => {
                log::warn!("Could not read tuning file: {}", e);
                Tuning::default()
            }
            None => Tuning::default(),
        };

        let mut world = World::with_tuning(800.0, 600.0, seed, tuning);
        let mut renderer = Renderer::new(seed);
        let mut surface = RecordingSurface::new();
        let mut input = InputState::new();
        let mut hud = LogHud::default();

        world.restart();
        for frame in 0..frames {
            script(frame, &mut input);
            input.pointer.pos.x = world.player.center().x;
            world.update(FRAME_MS, &input);
            dispatch_events(world.drain_events(), &mut (), &mut hud);

            surface.clear();
            renderer.draw(&world, &mut surface);
            if !surface.is_balanced() {
                log::error!("Unbalanced save/restore on frame {}", frame);
            }
            if world.mode == GameMode::GameOver {
                break;
            }
        }

        log::info!(
            "Seed {}: score {}, lives {}, energy {:.0}%, {} enemies on screen, {} draw calls last frame",
            seed,
            hud.score,
            world.lives,
            world.energy_percent(),
            world.enemies.len(),
            surface.commands.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Stasis Strike (native, headless) starting...");
    log::info!("Run with `trunk serve` for the playable web version");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
