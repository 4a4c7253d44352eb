//! Stacker entry point
//!
//! Handles platform-specific initialization and runs the game loop. The browser build
//! draws on a 2D canvas; the native build runs an attract-mode demo in the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use stacker::audio::{AudioManager, SoundEffect};
    use stacker::persistence::LocalStore;
    use stacker::platform::input::SUPPRESSED_EVENTS;
    use stacker::platform::{ActionLatch, FrameClock, HapticPattern, InputSource};
    use stacker::renderer::{self, Align, FrameStyle, Layout, Scene, palette};
    use stacker::sim::{Effects, Round, TickInput, tick};
    use stacker::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        round: Round<LocalStore>,
        effects: Effects,
        latch: ActionLatch,
        clock: FrameClock,
        audio: AudioManager,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        layout: Layout,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d, seed: u64) -> Self {
            let settings = Settings::load();
            let tuning = Tuning::default();
            let layout = Layout::fit(Vec2::ONE, tuning.lane_width, tuning.lane_height);
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            let mut game = Self {
                round: Round::new(tuning, LocalStore),
                effects: Effects::from_settings(seed, &settings),
                latch: ActionLatch::default(),
                clock: FrameClock::default(),
                audio,
                settings,
                canvas,
                ctx,
                layout,
            };
            game.fit_canvas();
            game
        }

        /// Match the backing store to the CSS size and refit the lane
        fn fit_canvas(&mut self) {
            let w = self.canvas.client_width().max(1) as f32;
            let h = self.canvas.client_height().max(1) as f32;
            if self.layout.viewport == Vec2::new(w, h) {
                return;
            }
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            self.canvas.set_width((w as f64 * dpr) as u32);
            self.canvas.set_height((h as f64 * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);

            let tuning = self.round.tuning();
            self.layout = Layout::fit(Vec2::new(w, h), tuning.lane_width, tuning.lane_height);
            log::debug!("Canvas {}x{} @{} cell {}", w, h, dpr, self.layout.cell_size);
        }

        fn press(&mut self, source: InputSource, repeat: bool) {
            // Audio can only start inside a user gesture
            self.audio.unlock();
            self.latch.press(source, js_sys::Date::now(), repeat);
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_volume(self.settings.effective_volume());
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }

        fn set_hidden(&mut self, hidden: bool) {
            self.clock.reset();
            if self.settings.mute_on_blur {
                let volume = if hidden {
                    0.0
                } else {
                    self.settings.effective_volume()
                };
                self.audio.set_volume(volume);
            }
        }

        fn frame(&mut self, time_ms: f64) {
            self.fit_canvas();
            let dt = self.clock.delta(time_ms);
            let input = TickInput {
                action: self.latch.take(),
            };

            if let Some(result) = tick(&mut self.round, &mut self.effects, &input, dt) {
                self.audio.play(SoundEffect::for_commit(&result));
                if self.settings.haptics {
                    HapticPattern::for_commit(&result).play();
                }
            }

            let style = FrameStyle {
                time: time_ms / 1000.0,
                win_flash: self.settings.effective_win_flash(),
            };
            let scene =
                renderer::build_scene(&self.round.snapshot(), &self.effects, &self.layout, style);
            self.draw(&scene);
        }

        fn draw(&self, scene: &Scene) {
            let ctx = &self.ctx;
            let size = self.layout.viewport;

            ctx.set_fill_style_str(&palette::to_css(scene.background));
            ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);

            for rect in &scene.rects {
                ctx.set_fill_style_str(&palette::to_css(rect.color));
                if rect.rotation == 0.0 {
                    ctx.fill_rect(
                        rect.pos.x as f64,
                        rect.pos.y as f64,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                } else {
                    let center = rect.center();
                    ctx.save();
                    let _ = ctx.translate(center.x as f64, center.y as f64);
                    let _ = ctx.rotate(rect.rotation as f64);
                    ctx.fill_rect(
                        -rect.size.x as f64 / 2.0,
                        -rect.size.y as f64 / 2.0,
                        rect.size.x as f64,
                        rect.size.y as f64,
                    );
                    ctx.restore();
                }
            }

            for line in &scene.lines {
                ctx.set_stroke_style_str(&palette::to_css(line.color));
                ctx.set_line_width(line.width as f64);
                ctx.begin_path();
                ctx.move_to(line.from.x as f64, line.from.y as f64);
                ctx.line_to(line.to.x as f64, line.to.y as f64);
                ctx.stroke();
            }

            for circle in &scene.circles {
                ctx.set_fill_style_str(&palette::to_css(circle.color));
                ctx.begin_path();
                let _ = ctx.arc(
                    circle.center.x as f64,
                    circle.center.y as f64,
                    circle.radius.max(0.0) as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }

            if let Some(overlay) = scene.overlay {
                ctx.set_fill_style_str(&palette::to_css(overlay));
                ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
            }

            ctx.set_text_baseline("top");
            for label in &scene.labels {
                let weight = if label.bold { "bold " } else { "" };
                ctx.set_font(&format!("{}{}px monospace", weight, label.size));
                ctx.set_text_align(match label.align {
                    Align::Left => "left",
                    Align::Center => "center",
                    Align::Right => "right",
                });
                ctx.set_fill_style_str(&palette::to_css(label.color));
                let _ = ctx.fill_text(&label.text, label.pos.x as f64, label.pos.y as f64);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Stacker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(canvas.clone(), ctx, seed)));
        log::info!(
            "Game initialized with seed {} (high score {})",
            seed,
            game.borrow().round.high_score()
        );

        setup_input_handlers(&window, &canvas, game.clone());
        setup_visibility(&document, game.clone());

        request_animation_frame(game);

        log::info!("Stacker running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Touch start; suppress the synthesized mouse events and scrolling
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press(InputSource::Touch, false);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move/end and long-press menu; keep the page from scrolling or zooming
        for event_name in SUPPRESSED_EVENTS {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press(InputSource::Mouse, false);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        game.borrow_mut().press(InputSource::Key, event.repeat());
                    }
                    "m" | "M" if !event.repeat() => game.borrow_mut().toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_visibility(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            game.borrow_mut().set_hidden(hidden);
            log::debug!("Visibility changed (hidden: {})", hidden);
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
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
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use stacker::persistence::FileStore;
    use stacker::renderer::ascii;
    use stacker::sim::{AutoPlayer, Effects, Round, tick};
    use stacker::{Settings, Tuning};

    /// Fixed frame step of the demo (s)
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Delay between autoplayer actions (s)
    const THINK_TIME: f32 = 0.12;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    const HIGH_SCORE_ENV: &str = "STACKER_HIGH_SCORE_FILE";
    const DEFAULT_HIGH_SCORE_FILE: &str = "stacker_high_score.json";

    /// Tuning from the JSON file named on the command line, defaults otherwise
    fn load_tuning() -> Tuning {
        let Some(path) = std::env::args().nth(1) else {
            return Tuning::default();
        };
        match fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}; using defaults", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() {
        let tuning = load_tuning();
        let path =
            std::env::var(HIGH_SCORE_ENV).unwrap_or_else(|_| DEFAULT_HIGH_SCORE_FILE.to_string());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64);

        let mut round = Round::new(tuning, FileStore::new(path));
        let mut effects = Effects::from_settings(seed, &Settings::default());
        let mut player = AutoPlayer::new(THINK_TIME);

        println!("{}", ascii::render_text(&round.snapshot()));

        for _ in 0..MAX_FRAMES {
            let input = player.decide(&round, FRAME_DT);
            let was_playing = !round.phase().is_terminal();
            if let Some(result) = tick(&mut round, &mut effects, &input, FRAME_DT) {
                println!(
                    "row {}: aligned {:?} fallen {:?} +{}",
                    result.row, result.aligned, result.fallen, result.points
                );
                println!("{}", ascii::render_text(&round.snapshot()));
            }
            if was_playing && round.phase().is_terminal() {
                break;
            }
        }

        println!(
            "Final score {} (high score {}) after reaching row {}",
            round.score(),
            round.high_score(),
            round.row() + 1
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stacker (native) starting attract-mode demo");
    log::info!("Run with `trunk serve` for the playable web version");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
