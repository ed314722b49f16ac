//! Quad Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop. Drawing is
//! left to the page: each updated frame is handed over as a JSON snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use quad_dodge::highscore::LocalStorageStore;
    use quad_dodge::input::InputEvent;
    use quad_dodge::{Game, GameConfig};

    // Hand-off to the page's renderer, if it registered one
    #[wasm_bindgen(inline_js = "
        export function present_frame(json) {
            if (typeof window.renderQuadDodge === 'function') {
                window.renderQuadDodge(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(json: &str);
    }

    type SharedGame = Rc<RefCell<Game<LocalStorageStore>>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Quad Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            GameConfig::load(),
            width as f32,
            height as f32,
            LocalStorageStore,
            seed,
        )));

        present_frame(&game.borrow().snapshot().to_json());

        setup_pointer_input(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Quad Dodge running!");
    }

    fn send(game: &SharedGame, event: InputEvent) {
        if let Some(command) = game.borrow_mut().handle_input(event) {
            log::debug!("Input {:?} -> {:?}", event, command);
        }
    }

    fn touch_position(event: &TouchEvent) -> Option<Vec2> {
        event
            .touches()
            .get(0)
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
    }

    fn setup_pointer_input(canvas: &HtmlCanvasElement, game: SharedGame) {
        // Press (mouse down / touch start)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                send(&game, InputEvent::PressStart);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                send(&game, InputEvent::PressStart);
                // No click follows a prevented touch, so it doubles as the tap
                if let Some(pos) = touch_position(&event) {
                    send(&game, InputEvent::Tap { pos });
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release (mouse up / touch end)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                send(&game, InputEvent::PressEnd);
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                send(&game, InputEvent::PressEnd);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Replay button
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                send(&game, InputEvent::Tap { pos });
            });
            let _ =
                canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: SharedGame) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: SharedGame, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.frame(time) > 0 {
                present_frame(&g.snapshot().to_json());
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Quad Dodge (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0x5eed);
    headless_run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one scripted run: hold split for one second out of every three
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64) {
    use quad_dodge::input::InputEvent;
    use quad_dodge::{Game, GameConfig, MemoryStore};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 120;

    let mut game = Game::new(GameConfig::load(), 1280.0, 720.0, MemoryStore::new(), seed);
    let mut pressed = false;

    for frame in 0..MAX_FRAMES {
        let now = frame as f64 * FRAME_MS;
        let want_pressed = (now as u64 / 1000) % 3 == 2;
        if want_pressed != pressed {
            let event = if want_pressed {
                InputEvent::PressStart
            } else {
                InputEvent::PressEnd
            };
            game.handle_input(event);
            pressed = want_pressed;
        }

        game.frame(now);
        if game.session().is_over() {
            break;
        }
    }

    let snapshot = game.snapshot();
    println!(
        "seed {}: score {} (high {}), {} projectiles on screen, game over: {}",
        seed,
        snapshot.score,
        snapshot.high_score,
        snapshot.projectiles.len(),
        snapshot.game_over
    );
}
