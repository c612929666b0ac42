//! Pet Guardians entry point
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
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window};

    use pet_guardians::audio::{AudioManager, SoundEffect};
    use pet_guardians::platform::{
        InputState, client_to_canvas, is_touch_user_agent, joystick_knob_position,
        joystick_vector, parse_css_px,
    };
    use pet_guardians::renderer::{RenderState, SceneOptions, build_scene};
    use pet_guardians::sim::{GameEvent, GameState, Layout, tick};
    use pet_guardians::viewport::{self, Container};
    use pet_guardians::{HudSnapshot, RunSummary, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: InputState,
        settings: Settings,
        audio: AudioManager,
        layout: Layout,
        last_time: Option<f64>,
        /// Set once the start button has been pressed
        running: bool,
    }

    impl Game {
        fn new(seed: u64, layout: Layout, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            // Real size arrives with the first resize
            let field = Vec2::new(
                pet_guardians::consts::DEFAULT_FIELD_WIDTH,
                pet_guardians::consts::DEFAULT_FIELD_HEIGHT,
            );
            Self {
                state: GameState::new(seed, field, layout),
                render_state: None,
                input: InputState::new(),
                settings,
                audio,
                layout,
                last_time: None,
                running: false,
            }
        }

        /// One simulation step, its side effects, then one render
        fn frame(&mut self, time: f64) {
            let dt = match self.last_time {
                Some(last) => (time - last) as f32,
                None => 0.0,
            };
            self.last_time = Some(time);

            let input = self.input.to_tick_input(time);
            tick(&mut self.state, &input, dt);
            self.input.clear_one_shots();

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                match event {
                    GameEvent::MenuOpened => self.set_menu_chrome(true),
                    GameEvent::MenuClosed => self.set_menu_chrome(false),
                    _ => {}
                }
            }

            self.render();
            self.update_hud();
        }

        /// Render the current frame
        fn render(&mut self) {
            let options = SceneOptions {
                pointer: self.input.pointer,
                particles: self.settings.particles,
            };
            let vertices = build_scene(&self.state, &options);

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
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let hud = HudSnapshot::from_state(&self.state);

            set_text(&document, "hp", &hud.hp.to_string());
            set_text(&document, "wave", &hud.wave.to_string());
            set_text(&document, "form", &hud.form);
            set_text(&document, "scoreVal", &hud.score.to_string());
        }

        /// Keep the on-screen menu button and hint in step with the wheel
        fn set_menu_chrome(&self, open: bool) {
            if self.layout != Layout::Touch {
                return;
            }
            let Some(document) = document() else { return };
            if let Some(btn) = document.get_element_by_id("omniBtn") {
                let _ = btn.class_list().toggle_with_force("active", open);
            }
            set_display(&document, "omniHelp", if open { "block" } else { "none" });
        }

        /// Fit the canvas to its container and propagate the new field size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else { return };
            let Some(document) = window.document() else { return };
            let Some(container) = document.get_element_by_id("gameContainer") else {
                log::warn!("No #gameContainer; keeping canvas size");
                return;
            };

            let (safe_top, safe_bottom) = match self.layout {
                Layout::Touch => safe_area_insets(&window, &document),
                Layout::Desktop => (0.0, 0.0),
            };
            let size = viewport::canvas_size(
                self.layout,
                Container {
                    width: container.client_width() as f32,
                    height: container.client_height() as f32,
                    safe_top,
                    safe_bottom,
                },
            );

            let (w, h) = (size.x as u32, size.y as u32);
            canvas.set_width(w);
            canvas.set_height(h);
            let style = canvas.style();
            let _ = style.set_property("width", &format!("{w}px"));
            let _ = style.set_property("height", &format!("{h}px"));

            self.state.resize(size);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(w, h);
                render_state.set_logical_size(size.x, size.y);
            }
            log::debug!("Canvas resized to {w}x{h}");
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(document: &Document, id: &str, display: &str) {
        let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        let _ = el.style().set_property("display", display);
    }

    /// Safe-area insets exposed as padding on the root element
    fn safe_area_insets(window: &Window, document: &Document) -> (f32, f32) {
        let Some(root) = document.document_element() else {
            return (0.0, 0.0);
        };
        let Ok(Some(style)) = window.get_computed_style(&root) else {
            return (0.0, 0.0);
        };
        let read = |prop: &str| {
            style
                .get_property_value(prop)
                .map(|v| parse_css_px(&v))
                .unwrap_or(0.0)
        };
        (read("padding-top"), read("padding-bottom"))
    }

    fn is_touch_device(window: &Window) -> bool {
        window
            .navigator()
            .user_agent()
            .map(|ua| is_touch_user_agent(&ua))
            .unwrap_or(false)
    }

    /// Client coordinates to canvas pixels
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        client_to_canvas(
            Vec2::new(client_x as f32, client_y as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
            Vec2::new(canvas.width() as f32, canvas.height() as f32),
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pet Guardians starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let touch = is_touch_device(&window);
        let layout = settings.layout.resolve(touch);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let game = Rc::new(RefCell::new(Game::new(seed, layout, settings)));
        game.borrow_mut().resize(&canvas);

        log::info!("Game initialized with seed: {} ({:?} layout)", seed, layout);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, canvas.width(), canvas.height()).await {
            Ok(mut render_state) => {
                let field = game.borrow().state.field;
                render_state.set_logical_size(field.x, field.y);
                game.borrow_mut().render_state = Some(render_state);
            }
            Err(e) => {
                log::error!("Failed to create device: {e}");
                return;
            }
        }

        {
            let g = game.borrow();
            set_text(&document, "muteBtn", g.settings.mute_icon());
        }

        setup_start_screen(game.clone());
        setup_resize(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_mouse(&canvas, game.clone());
        setup_mute_button(game.clone());
        if layout == Layout::Touch {
            setup_touch_controls(&canvas, game.clone());
        }

        log::info!("Pet Guardians ready");
    }

    fn start(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.running {
                return;
            }
            g.running = true;
            g.audio.resume();

            if let Some(document) = document() {
                set_display(&document, "startScreen", "none");
                set_display(&document, "hud", "flex");
                if g.layout == Layout::Touch {
                    set_display(&document, "controls", "block");
                }
            }
        }
        log::info!("Run started");
        request_animation_frame(game.clone());
    }

    fn setup_start_screen(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("startBtn")) else {
            log::warn!("No #startBtn; starting immediately");
            start(&game);
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                start(&game);
            });
            let _ =
                btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let menu_open = g.state.menu.open;
                if g.input.key_down(&event.code(), menu_open) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Held keys would stick while the page is unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mouse(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().input.pointer_move(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().input.pointer_press(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Releases outside the canvas still end the hold
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_release();
            });
            let _ =
                window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
            });
            let _ = canvas
                .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        // Virtual joystick
        if let (Some(joystick), Some(knob)) = (
            document.get_element_by_id("joystick"),
            document
                .get_element_by_id("joystickKnob")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        ) {
            let place_knob = {
                let knob = knob.clone();
                move |vector: Vec2| {
                    let pos = joystick_knob_position(vector);
                    let style = knob.style();
                    let _ = style.set_property("left", &format!("{}px", pos.x));
                    let _ = style.set_property("top", &format!("{}px", pos.y));
                }
            };

            for kind in ["touchstart", "touchmove"] {
                let game = game.clone();
                let joystick_clone = joystick.clone();
                let place_knob = place_knob.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let Some(touch) = event.touches().get(0) else { return };
                    let rect = joystick_clone.get_bounding_client_rect();
                    let center = Vec2::new(
                        (rect.left() + rect.width() / 2.0) as f32,
                        (rect.top() + rect.height() / 2.0) as f32,
                    );
                    let offset =
                        Vec2::new(touch.client_x() as f32, touch.client_y() as f32) - center;
                    game.borrow_mut().input.set_joystick(Some(offset));
                    place_knob(joystick_vector(offset));
                });
                let _ = joystick
                    .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if event.touches().length() == 0 {
                        game.borrow_mut().input.set_joystick(None);
                        place_knob(Vec2::ZERO);
                    }
                });
                let _ = joystick
                    .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Attack button
        if let Some(btn) = document.get_element_by_id("attackBtn") {
            for (kind, down) in [("touchstart", true), ("touchend", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.set_attack_button(down);
                });
                let _ = btn.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        // Omnitrix button toggles the wheel; chrome follows the menu events
        if let Some(btn) = document.get_element_by_id("omniBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                event.stop_propagation();
                game.borrow_mut().input.request_menu_toggle();
            });
            let _ =
                btn.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Canvas taps aim the wheel
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().input.tap(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().input.pointer_move(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = document().and_then(|d| d.get_element_by_id("muteBtn")) else {
            return;
        };
        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            let muted = g.settings.toggle_mute();
            g.audio.apply_settings(&g.settings);
            g.settings.save();
            btn_clone.set_text_content(Some(g.settings.mute_icon()));
            log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let summary = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.state
                .is_game_over()
                .then(|| RunSummary::from_state(&g.state))
        };

        match summary {
            // The run restarts by reloading the page
            Some(summary) => {
                let Some(window) = web_sys::window() else { return };
                let _ = window.alert_with_message(&summary.message());
                let _ = window.location().reload();
            }
            None => request_animation_frame(game),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Scripted headless run for native builds
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use pet_guardians::RunSummary;
    use pet_guardians::sim::combat::nearest_enemy;
    use pet_guardians::sim::{Form, GameEvent, GameState, Layout, TickInput, tick};
    use pet_guardians::viewport::{self, Container};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of play
    pub const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Frames between form switches
    const FORM_SWITCH_FRAMES: u64 = 1200;

    /// Circle the field firing at the closest enemy, switching form now and then
    fn scripted_input(state: &GameState, frame: u64) -> TickInput {
        let phase = frame as f32 / 120.0;
        let mut input = TickInput {
            time_ms: frame as f64 * FRAME_MS,
            joystick: Some(Vec2::new(phase.cos(), phase.sin())),
            attack: true,
            ..Default::default()
        };
        if let Some(i) = nearest_enemy(&state.enemies, state.player.pos, None) {
            input.pointer = state.enemies[i].pos;
        }

        let cycle = frame / FORM_SWITCH_FRAMES;
        match frame % FORM_SWITCH_FRAMES {
            0 if cycle > 0 => input.toggle_menu = true,
            1 if cycle > 0 => input.quick_select = Some(cycle as usize % Form::ALL.len()),
            _ => {}
        }
        input
    }

    pub fn run(seed: u64, max_frames: u64) -> RunSummary {
        let field = viewport::canvas_size(
            Layout::Desktop,
            Container {
                width: 804.0,
                height: 604.0,
                ..Default::default()
            },
        );
        let mut state = GameState::new(seed, field, Layout::Desktop);
        let mut kills = 0u32;

        for frame in 0..max_frames {
            let input = scripted_input(&state, frame);
            tick(&mut state, &input, FRAME_MS as f32);
            for event in state.drain_events() {
                match event {
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::Transformed { form } => log::debug!("Frame {frame}: now {form:?}"),
                    _ => {}
                }
            }
            if state.is_game_over() {
                break;
            }
        }

        log::info!(
            "Headless run finished after {} steps: {} kills, {} hp left",
            state.steps,
            kills,
            state.player.hp
        );
        RunSummary::from_state(&state)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pet_guardians::Settings;

    env_logger::init();
    log::info!("Pet Guardians (native) starting...");
    log::info!("The playable build targets the browser; running a scripted headless demo");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(42);
    log::info!("Seed: {seed}");

    let summary = headless::run(seed, headless::MAX_FRAMES);
    match serde_json::to_string(&summary) {
        Ok(json) => log::info!("Run summary: {json}"),
        Err(e) => log::warn!("Could not serialize run summary: {e}"),
    }
    println!("{}", summary.message());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
