//! Copy Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use copy_bird::persistence::LocalStore;
    use copy_bird::platform::{key_to_event, pointer_event};
    use copy_bird::renderer::{RenderState, Scene};
    use copy_bird::sim::{InputEvent, TickOutcome, Viewport};
    use copy_bird::ui::{Hud, HudSlot};
    use copy_bird::{Game, Tuning};

    /// Game plus the GPU surface it draws into
    struct App {
        game: Game<LocalStore>,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Render the current frame
        fn render(&mut self, scene: &Scene) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(scene) {
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

        /// Queue an input. Returns true if the loop must be restarted.
        fn push_input(&mut self, event: InputEvent) -> bool {
            self.game.push_input(event)
        }

        fn viewport(&self) -> Viewport {
            self.game.state().viewport
        }
    }

    /// Show, hide and fill the text elements
    fn update_hud(hud: &Hud) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for slot in HudSlot::ALL {
            let Some(el) = document.get_element_by_id(slot.element_id()) else {
                continue;
            };
            match hud.text(slot) {
                Some(text) => {
                    if el.text_content().as_deref() != Some(text) {
                        el.set_text_content(Some(text));
                    }
                    let _ = el.class_list().remove_1("hidden");
                }
                None => {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }

        // The theme button label sits over the button drawn on the canvas
        if let (Some(rect), Some(el)) = (
            hud.theme_button,
            document
                .get_element_by_id(HudSlot::ThemeButton.element_id())
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        ) {
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", rect.x));
            let _ = style.set_property("top", &format!("{}px", rect.y));
            let _ = style.set_property("width", &format!("{}px", rect.w));
            let _ = style.set_property("height", &format!("{}px", rect.h));
        }
    }

    /// CSS size and backing-store size of the canvas
    fn canvas_sizes(canvas: &HtmlCanvasElement) -> ((f32, f32), (u32, u32)) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            (client_w as f32, client_h as f32),
            ((client_w as f64 * dpr) as u32, (client_h as f64 * dpr) as u32),
        )
    }

    pub async fn run() -> Result<(), String> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| e.to_string())?;

        log::info!("Copy Bird starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        let ((css_w, css_h), (width, height)) = canvas_sizes(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(
            LocalStore,
            Viewport::new(css_w, css_h),
            Tuning::default(),
            seed,
        );
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| format!("Failed to create device: {e}"))?;

        let app = Rc::new(RefCell::new(App {
            game,
            render_state: Some(render_state),
            canvas: canvas.clone(),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(app.clone());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        request_animation_frame(app);

        log::info!("Copy Bird running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer press on the canvas: start, flap, restart, or theme button
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let restart = {
                    let mut a = app.borrow_mut();
                    let input = pointer_event(
                        (event.client_x() as f32, event.client_y() as f32),
                        (rect.left() as f32, rect.top() as f32),
                        (rect.width() as f32, rect.height() as f32),
                        a.viewport(),
                    );
                    a.push_input(input)
                };
                if restart {
                    request_animation_frame(app.clone());
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: space flaps, escape pauses
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(input) = key_to_event(&event.key()) else {
                    return;
                };
                // Keep space from scrolling the page
                event.prevent_default();
                let restart = app.borrow_mut().push_input(input);
                if restart {
                    request_animation_frame(app.clone());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let ((css_w, css_h), (width, height)) = canvas_sizes(&a.canvas);
            a.canvas.set_width(width);
            a.canvas.set_height(height);
            if let Some(ref mut render_state) = a.render_state {
                render_state.resize(width, height);
            }
            a.game.resize(css_w, css_h);
            log::info!("Resized to {}x{}", css_w, css_h);

            // A halted loop won't draw again on its own
            if a.game.is_halted() {
                let frame = a.game.current_frame();
                a.render(&frame.scene);
                update_hud(&frame.hud);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let outcome = {
            let mut a = app.borrow_mut();
            let frame = a.game.advance();
            a.render(&frame.scene);
            update_hud(&frame.hud);
            frame.outcome
        };

        // The game-over screen is static; the next input restarts the loop
        if outcome == TickOutcome::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Copy Bird failed to start: {}", e);
        web_sys::console::error_1(&e.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use copy_bird::game::autopilot;
    use copy_bird::persistence::MemoryStore;
    use copy_bird::sim::{TickOutcome, Viewport};
    use copy_bird::{Game, Tuning};

    env_logger::init();
    log::info!("Copy Bird (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    // copy-bird [tuning.json] [ticks] [seed]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let tuning = match args.first() {
        Some(path) => load_tuning(path),
        None => Tuning::default(),
    };
    let ticks: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3600);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1);

    let mut game = Game::new(MemoryStore::new(), Viewport::new(800.0, 600.0), tuning, seed);
    let mut played = 0;
    for _ in 0..ticks {
        if let Some(event) = autopilot(game.state()) {
            game.push_input(event);
        }
        played += 1;
        if game.advance_n(1) == TickOutcome::Halt {
            break;
        }
    }

    let state = game.state();
    println!(
        "ticks: {}  phase: {:?}  score: {}  high score: {}  {}",
        played,
        state.phase,
        state.score,
        state.high_score.best,
        if state.sky.is_day { "day" } else { "night" }
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> copy_bird::Tuning {
    use copy_bird::Tuning;

    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Could not load tuning from {} ({}), using defaults", path, e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
