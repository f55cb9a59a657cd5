//! Particle Field entry point
//!
//! On the web: hooks the canvas, pointer and resize events and runs the
//! frame loop. Natively: plays a headless autopilot round and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

    use particle_field::GameConfig;
    use particle_field::sim::{CanvasGame, FrameInput, GameStatus};

    /// Everything the event handlers share
    struct Host {
        game: CanvasGame,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        mouse: (f32, f32),
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let width = self.canvas.width() as f32;
            let height = self.canvas.height() as f32;
            let input = FrameInput::new(width, height, self.mouse.0, self.mouse.1);

            let events = self.game.frame(time, &input);
            if events.all_collected {
                if let Some(ms) = self.game.elapsed_ms(time) {
                    log::info!("All particles collected in {:.0}ms", ms);
                }
            }

            self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
            self.game.render(&mut self.ctx);
        }

        fn fit_canvas(&mut self, window: &Window) -> (f32, f32) {
            let (w, h) = viewport_size(window);
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            (w, h)
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn request_animation_frame(window: &Window, f: &Closure<dyn FnMut(f64)>) {
        if let Err(e) = window.request_animation_frame(f.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = GameConfig::load();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(&config.canvas_id)
            .ok_or("game canvas not found")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        log::info!("Canvas game seed: {}", seed);

        let host = Rc::new(RefCell::new(Host {
            game: CanvasGame::with_seed(config, seed),
            canvas,
            ctx,
            mouse: (-1.0e4, -1.0e4),
        }));

        {
            let mut h = host.borrow_mut();
            let (w, height) = h.fit_canvas(&window);
            h.game.resize(now(), w, height);
        }

        setup_pointer(&window, host.clone())?;
        setup_resize(&window, host.clone())?;
        setup_teardown(&window, host.clone())?;

        // Frame loop: the closure re-schedules itself
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let loop_window = window.clone();
        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            host.borrow_mut().frame(time);
            if let Some(cb) = f.borrow().as_ref() {
                request_animation_frame(&loop_window, cb);
            }
        }));
        if let Some(cb) = g.borrow().as_ref() {
            request_animation_frame(&window, cb);
        }

        Ok(())
    }

    fn setup_pointer(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                host.borrow_mut().mouse = (event.client_x() as f32, event.client_y() as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click starts (or restarts) a round
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut h = host.borrow_mut();
            let width = h.canvas.width() as f32;
            if !h.game.is_supported(width) {
                return;
            }
            if matches!(h.game.status(), GameStatus::Idle | GameStatus::Completed) {
                if let Err(e) = h.game.start(now()) {
                    log::warn!("{e}");
                }
            }
        });
        window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let resize_window = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut h = host.borrow_mut();
            let (w, height) = h.fit_canvas(&resize_window);
            h.game.resize(now(), w, height);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_teardown(window: &Window, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().game.teardown();
        });
        window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Canvas game failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Particle Field (native) starting...");
    log::info!("Native mode runs a headless round - build for wasm32 for the canvas version");

    autopilot_round();
}

/// Play one round with a pointer that chases the nearest particle
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_round() {
    use glam::Vec2;
    use particle_field::GameConfig;
    use particle_field::render::MeshSurface;
    use particle_field::sim::{CanvasGame, FrameInput};

    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 300;
    /// Pointer speed in px per frame
    const POINTER_SPEED: f32 = 14.0;

    let config = GameConfig::load();
    let mut game = CanvasGame::with_seed(config, 0x5eed);
    let mut surface = MeshSurface::new();

    game.resize(0.0, WIDTH, HEIGHT);
    if let Err(e) = game.start(0.0) {
        log::error!("{e}");
        return;
    }

    let mut pointer = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
    let mut now = 0.0;
    let mut frames = 0;
    while frames < MAX_FRAMES && !game.field().is_empty() {
        now += FRAME_MS;
        frames += 1;

        let target = game
            .field()
            .iter()
            .map(|p| p.pos)
            .min_by(|a, b| {
                a.distance(pointer)
                    .partial_cmp(&b.distance(pointer))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        if let Some(target) = target {
            let offset = target - pointer;
            pointer += offset.clamp_length_max(POINTER_SPEED);
        }

        let events = game.frame(now, &FrameInput::new(WIDTH, HEIGHT, pointer.x, pointer.y));
        if events.collected > 0 {
            log::debug!("frame {}: {} remaining", frames, game.field().len());
        }

        surface.clear();
        game.render(&mut surface);
    }

    match game.elapsed_ms(now) {
        Some(ms) if game.field().is_empty() => {
            log::info!("Autopilot collected everything in {} frames ({:.0}ms)", frames, ms);
            let date = particle_field::leaderboard::now_iso();
            match game
                .leaderboard_record("autopilot", &date)
                .and_then(|r| Ok(serde_json::to_string(&r)?))
            {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("{e}"),
            }
        }
        _ => log::warn!(
            "Autopilot gave up after {} frames with {} particles left",
            frames,
            game.field().len()
        ),
    }
    log::info!("Last frame: {} vertices", surface.vertices().len());
}
