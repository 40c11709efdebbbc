//! Cube Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
use cube_jump::Tuning;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement};

    use cube_jump::platform::{
        KeyValueStore, LocalStorage, MemoryStore, StorageError, action_for_code,
    };
    use cube_jump::render::{DrawCommand, DrawList, TextAlign};
    use cube_jump::renderer::RenderState;
    use cube_jump::settings::{Theme, css_color};
    use cube_jump::sim::GameEvent;
    use cube_jump::{Game, LoopControl, Tuning};

    /// LocalStorage when the browser allows it, otherwise a per-page map
    enum BrowserStore {
        Local(LocalStorage),
        Memory(MemoryStore),
    }

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            match self {
                BrowserStore::Local(s) => s.get(key),
                BrowserStore::Memory(s) => s.get(key),
            }
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            match self {
                BrowserStore::Local(s) => s.set(key, value),
                BrowserStore::Memory(s) => s.set(key, value),
            }
        }
    }

    /// Absolutely positioned labels over the canvas, one per text command
    struct TextLayer {
        document: Document,
        container: Element,
        labels: Vec<Element>,
    }

    impl TextLayer {
        fn new(document: &Document) -> Self {
            let container = document.get_element_by_id("hud").unwrap_or_else(|| {
                let el = document.create_element("div").expect("create hud");
                el.set_id("hud");
                if let Some(body) = document.body() {
                    let _ = body.append_child(&el);
                }
                el
            });
            let _ = container.set_attribute(
                "style",
                "position:fixed;left:0;top:0;width:100%;height:100%;pointer-events:none;",
            );
            Self {
                document: document.clone(),
                container,
                labels: Vec::new(),
            }
        }

        fn update(&mut self, list: &DrawList) {
            let mut used = 0;
            for command in &list.commands {
                let DrawCommand::Text {
                    text,
                    pos,
                    font_px,
                    align,
                    color,
                } = command
                else {
                    continue;
                };
                let label = self.label(used);
                let transform = match align {
                    TextAlign::Left => "none",
                    TextAlign::Center => "translateX(-50%)",
                };
                let style = format!(
                    "position:absolute;left:{}px;top:{}px;font:{}px Arial;line-height:1;\
                     color:{};white-space:nowrap;transform:{};",
                    pos.x,
                    pos.y - font_px,
                    font_px,
                    css_color(*color),
                    transform
                );
                let _ = label.set_attribute("style", &style);
                label.set_text_content(Some(text));
                used += 1;
            }
            for label in &self.labels[used..] {
                let _ = label.set_attribute("style", "display:none;");
            }
        }

        fn label(&mut self, index: usize) -> Element {
            while self.labels.len() <= index {
                let el = self.document.create_element("div").expect("create label");
                let _ = self.container.append_child(&el);
                self.labels.push(el);
            }
            self.labels[index].clone()
        }
    }

    /// Everything the browser callbacks share
    struct App {
        game: Game<BrowserStore>,
        render_state: RenderState,
        text: TextLayer,
        /// A requestAnimationFrame callback is pending
        running: bool,
    }

    impl App {
        /// Push the latest draw list to the GPU and the text layer
        fn present(&mut self) {
            let background = self.game.palette().background;
            match self.render_state.render(self.game.draw_list(), background) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
            self.text.update(self.game.draw_list());
        }
    }

    fn apply_page_theme(document: &Document, theme: Theme) {
        let palette = theme.palette();
        if let Some(body) = document.body() {
            let style = body.style();
            let _ = style.set_property("background-color", &css_color(palette.background));
            let _ = style.set_property("color", &css_color(palette.text));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cube Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Canvas fills the window at startup; later resizes are not tracked
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as u32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());

        let store = match LocalStorage::open() {
            Ok(store) => BrowserStore::Local(store),
            Err(e) => {
                log::warn!("{e}; scores and theme will not survive a reload");
                BrowserStore::Memory(MemoryStore::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let game = Game::new(Vec2::new(width as f32, height as f32), tuning, seed, store);
        log::info!("Game initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .expect("Failed to create device");

        apply_page_theme(&document, game.theme());

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            text: TextLayer::new(&document),
            running: false,
        }));

        setup_keyboard(app.clone());
        setup_theme_toggle(app.clone(), &document);

        // Idle screen is drawn once; it only changes on input
        app.borrow_mut().present();

        log::info!("Cube Jump ready");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(action) = action_for_code(&event.code()) else {
                return;
            };
            event.prevent_default();

            let start_loop = {
                let mut a = app.borrow_mut();
                let started = a.game.handle_action(action) == GameEvent::Started;
                if started && !a.running {
                    a.running = true;
                    true
                } else {
                    false
                }
            };
            if start_loop {
                request_animation_frame(app.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_theme_toggle(app: Rc<RefCell<App>>, document: &Document) {
        let Some(toggle) = document
            .get_element_by_id("darkModeToggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            log::info!("No theme toggle on this page");
            return;
        };
        toggle.set_checked(app.borrow().game.theme() == Theme::Dark);

        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            let theme = a.game.toggle_theme();
            apply_page_theme(&document, theme);
            log::info!("Theme: {:?}", theme);
            // A running loop picks up the new colours on its next frame
            if !a.running {
                a.present();
            }
        });
        let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let control = {
            let mut a = app.borrow_mut();
            let control = a.game.frame();
            a.present();
            if control == LoopControl::Stop {
                a.running = false;
            }
            control
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
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
    log::info!("Cube Jump (native) starting...");
    log::info!("Native mode is headless - serve the wasm build for the playable version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(Some(&json)),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0xC0BE);

    let summary = headless::run(tuning, seed, 20_000);
    println!(
        "seed {}: score {} after {} frames{}",
        seed,
        summary.score,
        summary.frames,
        if summary.crashed { "" } else { " (survived)" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted play without a window, for smoke-testing balance changes
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use cube_jump::platform::{Action, MemoryStore};
    use cube_jump::sim::{GameState, ObstacleSide};
    use cube_jump::{Game, LoopControl, Tuning};

    pub struct Summary {
        pub score: u32,
        pub frames: u64,
        pub crashed: bool,
    }

    /// Jump when the cube sinks below the middle of the next gap
    fn should_jump(state: &GameState) -> bool {
        let player = &state.player;
        let gap = state.tuning.gap;
        let target = state
            .obstacles
            .iter()
            .filter(|o| o.side == ObstacleSide::Bottom)
            .find(|o| o.pos.x + o.size.x >= player.pos.x)
            .map(|o| o.pos.y - gap / 2.0)
            .unwrap_or(state.surface.y / 2.0);
        let center = player.pos.y + player.size.y / 2.0;
        player.dy >= 0.0 && center > target + gap / 8.0
    }

    pub fn run(tuning: Tuning, seed: u64, max_frames: u64) -> Summary {
        let mut game = Game::new(Vec2::new(800.0, 600.0), tuning, seed, MemoryStore::new());
        game.handle_action(Action::Jump);

        let mut frames = 0;
        let mut crashed = false;
        while frames < max_frames {
            if should_jump(game.state()) {
                game.handle_action(Action::Jump);
            }
            frames += 1;
            if game.frame() == LoopControl::Stop {
                crashed = true;
                break;
            }
        }

        log::info!(
            "Headless run finished: score {}, {} frames, best {}",
            game.state().score,
            frames,
            game.high_score()
        );
        Summary {
            score: game.state().score,
            frames,
            crashed,
        }
    }
}
