//! Croc Breakout entry point
//!
//! On the web this wires the DOM, WebGPU and Web Audio to the game driver.
//! Natively it runs a headless game with an autopilot paddle.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use croc_breakout::audio::{AudioManager, SoundEffect};
    use croc_breakout::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use croc_breakout::renderer::{Canvas, Color, MeshCanvas, RenderState, TextLabel};
    use croc_breakout::sim::{GameEvent, GamePhase, rng};
    use croc_breakout::ui::Overlay;
    use croc_breakout::{FrameScheduler, Game};

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` with a single shared callback
    struct WebScheduler {
        window: Window,
        callback: FrameCallback,
    }

    impl FrameScheduler for WebScheduler {
        type Handle = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let callback = self.callback.borrow();
            let Some(cb) = callback.as_ref() else {
                log::warn!("Frame requested before the callback was installed");
                return None;
            };
            self.window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .inspect_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
                .ok()
        }

        fn cancel_frame(&mut self, handle: i32) {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {:?}", e);
            }
        }
    }

    /// WebGPU canvas with the HUD text laid over it as DOM spans
    struct GpuCanvas {
        mesh: MeshCanvas,
        render_state: RenderState,
        document: Document,
        hud: Element,
    }

    impl GpuCanvas {
        fn draw(&mut self) {
            match self.render_state.render(&self.mesh) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.render_state.size();
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// One span per label, reused between frames
        fn sync_hud(&self) -> Result<(), JsValue> {
            let children = self.hud.children();
            for (i, label) in self.mesh.labels.iter().enumerate() {
                let span = match children.item(i as u32) {
                    Some(el) => el,
                    None => {
                        let el = self.document.create_element("span")?;
                        self.hud.append_child(&el)?;
                        el
                    }
                };
                span.set_attribute("style", &label_style(label))?;
                if span.text_content().as_deref() != Some(label.text.as_str()) {
                    span.set_text_content(Some(&label.text));
                }
            }
            while children.length() > self.mesh.labels.len() as u32 {
                match self.hud.last_element_child() {
                    Some(extra) => extra.remove(),
                    None => break,
                }
            }
            Ok(())
        }
    }

    impl Canvas for GpuCanvas {
        fn clear(&mut self, color: Color) {
            self.mesh.clear(color);
        }

        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
            self.mesh.fill_rect(x, y, w, h, color);
        }

        fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
            self.mesh.fill_circle(cx, cy, radius, color);
        }

        fn stroke_circle(&mut self, cx: f32, cy: f32, radius: f32, width: f32, color: Color) {
            self.mesh.stroke_circle(cx, cy, radius, width, color);
        }

        fn stroke_arc(
            &mut self,
            cx: f32,
            cy: f32,
            radius: f32,
            start: f32,
            end: f32,
            width: f32,
            color: Color,
        ) {
            self.mesh.stroke_arc(cx, cy, radius, start, end, width, color);
        }

        fn stroke_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
            self.mesh.stroke_line(x1, y1, x2, y2, width, color);
        }

        fn fill_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
            self.mesh.fill_text(text, x, y, size, color);
        }

        fn present(&mut self) {
            self.draw();
            if let Err(e) = self.sync_hud() {
                log::warn!("HUD update failed: {:?}", e);
            }
        }
    }

    /// Position in percent of the canvas so CSS scaling keeps labels in place
    fn label_style(label: &TextLabel) -> String {
        let [r, g, b, a] = label.color;
        format!(
            "left:{:.3}%;top:{:.3}%;font-size:{}px;color:rgba({},{},{},{:.2})",
            label.x / CANVAS_WIDTH * 100.0,
            (label.y - label.size) / CANVAS_HEIGHT * 100.0,
            label.size,
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a,
        )
    }

    /// Everything the event handlers share
    struct App {
        game: Game<WebScheduler, GpuCanvas>,
        audio: AudioManager,
        document: Document,
        shown_phase: Option<GamePhase>,
    }

    type Shared = Rc<RefCell<App>>;

    impl App {
        fn play_events(&self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.audio.play(effect);
            }
        }

        /// Show or hide the overlay when the phase changed since last call
        fn sync_overlay(&mut self) {
            let phase = self.game.phase();
            if self.shown_phase == Some(phase) {
                return;
            }
            self.shown_phase = Some(phase);

            let Some(root) = self.document.get_element_by_id("overlay") else {
                log::warn!("Overlay element missing");
                return;
            };
            match Overlay::for_phase(phase, self.game.state().score) {
                None => {
                    let _ = root.set_attribute("class", "hidden");
                }
                Some(overlay) => {
                    let fields = [
                        ("overlay-title", overlay.title.to_string()),
                        ("overlay-body", overlay.body.clone()),
                        ("overlay-button", overlay.button_label()),
                    ];
                    for (id, text) in fields {
                        if let Some(el) = self.document.get_element_by_id(id) {
                            el.set_text_content(Some(&text));
                        }
                    }
                    let _ = root.set_attribute("class", "");
                }
            }
        }
    }

    fn element(document: &Document, id: &str) -> Result<Element, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id} element")))
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Croc Breakout starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = element(&document, "canvas")?.dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let hud = element(&document, "hud")?;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("surface: {e}")))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("adapter: {e}")))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            CANVAS_WIDTH as u32,
            CANVAS_HEIGHT as u32,
        )
        .await
        .map_err(|e| JsValue::from_str(&format!("device: {e}")))?;

        let seed = js_sys::Date::now() as u64;
        log::info!("Seed: {}", seed);

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = WebScheduler {
            window: window.clone(),
            callback: callback.clone(),
        };
        let surface = GpuCanvas {
            mesh: MeshCanvas::new(),
            render_state,
            document: document.clone(),
            hud,
        };
        let app: Shared = Rc::new(RefCell::new(App {
            game: Game::new(scheduler, Some(surface), rng::seeded(seed)),
            audio: AudioManager::new(),
            document: document.clone(),
            shown_phase: None,
        }));

        // Frame loop body; the driver decides whether to ask for another
        {
            let app = app.clone();
            *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
                let mut a = app.borrow_mut();
                let events = a.game.on_frame();
                a.play_events(&events);
                a.sync_overlay();
            }));
        }

        setup_input_handlers(&window, &document, &canvas, app.clone())?;
        app.borrow_mut().sync_overlay();

        log::info!("Croc Breakout ready");
        Ok(())
    }

    fn setup_input_handlers(
        window: &Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        app: Shared,
    ) -> Result<(), JsValue> {
        // Mouse move - offsetX scaled back to logical units
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client_w = canvas_clone.client_width().max(1) as f32;
                let x = event.offset_x() as f32 * CANVAS_WIDTH / client_w;
                app.borrow_mut().game.pointer_moved(x);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Overlay button: start, restart or resume
        {
            let app = app.clone();
            let button = element(document, "overlay-button")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let was_paused = a.game.phase() == GamePhase::Paused;
                a.game.primary_action();
                if !was_paused {
                    a.audio.play(SoundEffect::Start);
                }
                a.sync_overlay();
            });
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "Escape" | "p" | "P") {
                    let mut a = app.borrow_mut();
                    if a.game.toggle_pause() {
                        a.sync_overlay();
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.game.pause() {
                        log::info!("Auto-paused (tab hidden)");
                        a.sync_overlay();
                    }
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
                let mut a = app.borrow_mut();
                if a.game.pause() {
                    log::info!("Auto-paused (window blur)");
                    a.sync_overlay();
                }
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
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    if let Err(e) = wasm_game::run().await {
        log::error!("Croc Breakout failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use croc_breakout::Game;
    use croc_breakout::driver::ManualScheduler;
    use croc_breakout::renderer::DisplayList;
    use croc_breakout::sim::{GameEvent, GamePhase, rng};

    pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;
    pub const DEFAULT_TICKS: u64 = 100_000;

    /// Paddle target for this frame: under the ball, shifted a little so the
    /// rebound angle keeps changing
    pub fn autopilot_target(ball_x: f32, ticks: u64) -> f32 {
        let offset = ((ticks / 240) % 5) as f32 * 12.0 - 24.0;
        (ball_x - offset).clamp(1.0, 799.0)
    }

    pub fn run(seed: u64, budget: u64) -> serde_json::Value {
        let mut game: Game<ManualScheduler, DisplayList> =
            Game::new(ManualScheduler::new(), Some(DisplayList::new()), rng::seeded(seed));
        game.start();

        let mut paddle_hits = 0u32;
        while game.state().time_ticks < budget {
            let target = autopilot_target(game.state().ball.pos.x, game.state().time_ticks);
            game.pointer_moved(target);

            if game.scheduler_mut().fire_next().is_none() {
                break;
            }
            for event in game.on_frame() {
                match event {
                    GameEvent::PaddleHit => paddle_hits += 1,
                    GameEvent::LifeLost { remaining } => {
                        log::debug!("Life lost, {} remaining", remaining)
                    }
                    _ => {}
                }
            }
        }

        let state = game.state();
        let outcome = match state.phase {
            GamePhase::Win => "win",
            GamePhase::GameOver => "game_over",
            _ => "budget_exhausted",
        };
        log::info!(
            "Finished ({}) after {} ticks: score {}, lives {}",
            outcome,
            state.time_ticks,
            state.score,
            state.lives
        );

        serde_json::json!({
            "seed": seed,
            "outcome": outcome,
            "phase": state.phase,
            "score": state.score,
            "lives": state.lives,
            "ticks": state.time_ticks,
            "paddle_hits": paddle_hits,
            "bricks_remaining": state.bricks_remaining(),
            "frames_presented": game.surface().map(|s| s.presented).unwrap_or(0),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse()?,
        None => headless::DEFAULT_SEED,
    };
    let budget = match args.next() {
        Some(s) => s.parse()?,
        None => headless::DEFAULT_TICKS,
    };
    log::info!("Croc Breakout (headless) seed {} budget {} ticks", seed, budget);

    let summary = headless::run(seed, budget);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
