//! Paddle Duel entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use paddle_duel::Settings;
    use paddle_duel::input::{Command, InputController, KeyBindings, client_to_field_y};
    use paddle_duel::renderer::{
        CanvasSurface, DomScoreboard, RenderStyle, ScoreDisplay, publish_scores, render,
    };
    use paddle_duel::sim::{GameEvent, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputController,
        keys: KeyBindings,
        style: RenderStyle,
        surface: CanvasSurface,
        scoreboard: DomScoreboard,
        /// An animation frame is already scheduled
        frame_pending: bool,
    }

    impl Game {
        /// Run one frame: update, push score changes, draw
        fn step(&mut self, now: f64) {
            let events = self.session.frame(now);
            self.publish(&events);
            render(&self.session, &mut self.surface, &self.style);
        }

        fn publish(&mut self, events: &[GameEvent]) {
            publish_scores(events, &mut self.scoreboard);
        }

        /// Apply a session command; returns true if the loop must be (re)scheduled
        fn apply(&mut self, command: Command, now: f64) -> bool {
            match command {
                Command::ToggleRun => {
                    let state = self.session.toggle(now);
                    log::info!("Toggled to {:?}", state);
                }
                Command::Reset => {
                    let event = self.session.reset(now);
                    self.publish(&[event]);
                }
            }
            self.session.is_running()
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Paddle Duel starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas")?
            .dyn_into()?;

        // The canvas size is the field size
        let mut settings = Settings::load();
        settings.field_width = canvas.width() as f32;
        settings.field_height = canvas.height() as f32;
        let settings = settings.validated();

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let surface = match CanvasSurface::new(&canvas) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Cannot acquire 2d context: {:?}", e);
                return Err(e);
            }
        };
        let mut scoreboard = DomScoreboard::new(&document, "playerScore", "computerScore");
        scoreboard.show(0, 0);

        let game = Rc::new(RefCell::new(Game {
            session: Session::new(&settings, seed),
            input: InputController::new(),
            keys: settings.keys.clone(),
            style: settings.style.clone(),
            surface,
            scoreboard,
            frame_pending: false,
        }));

        log::info!(
            "Session created ({}x{}, seed {})",
            settings.field_width,
            settings.field_height,
            seed
        );

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());

        {
            let mut g = game.borrow_mut();
            let t = now();
            render(&g.session, &mut g.surface, &g.style);
            if settings.autostart {
                g.session.start(t);
            }
        }
        schedule(game);

        log::info!("Paddle Duel running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer: center the player paddle on the cursor
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let mut g = game.borrow_mut();
                let field = g.session.field();
                let y = client_to_field_y(
                    event.client_y() as f32,
                    rect.top() as f32,
                    rect.height() as f32,
                    field.height,
                );
                InputController::pointer_move(y, g.session.player_mut(), field.height);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            log::warn!("No window: keyboard input disabled");
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let command = {
                    let mut g = game.borrow_mut();
                    let Some(action) = g.keys.action(&key) else {
                        return;
                    };
                    event.prevent_default();
                    let Game { session, input, .. } = &mut *g;
                    input.key_down(action, session.player_mut())
                };
                if let Some(command) = command {
                    let resume = game.borrow_mut().apply(command, now());
                    if resume {
                        schedule(game.clone());
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(action) = g.keys.action(&event.key()) {
                    let Game { session, input, .. } = &mut *g;
                    input.key_up(action, session.player_mut());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for (id, command) in [("startBtn", Command::ToggleRun), ("resetBtn", Command::Reset)] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let resume = game.borrow_mut().apply(command, now());
                if resume {
                    schedule(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Request the next animation frame unless one is already pending
    fn schedule(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending {
                return;
            }
            g.frame_pending = true;
        }
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
        let running = {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            if g.session.is_running() {
                g.step(time);
            }
            g.session.is_running()
        };

        // Pausing simply stops re-scheduling
        if running {
            schedule(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Start-up failed: {:?}", e);
    }
}

/// Frames simulated by the headless runner (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paddle_duel::input::InputController;
    use paddle_duel::renderer::{DrawList, LogScoreboard, ScoreDisplay, publish_scores, render};
    use paddle_duel::sim::GameEvent;
    use paddle_duel::{Session, Settings};

    env_logger::init();
    log::info!("Paddle Duel (native) starting...");
    log::info!("Native mode runs a headless match - build for wasm32 to play in the browser");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = Settings::load(path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let mut session = Session::new(&settings, seed);
    let mut surface = DrawList::default();
    let mut scoreboard = LogScoreboard::default();
    let mut hits = 0u32;
    let frame_ms = 1000.0 / 60.0;

    scoreboard.show(0, 0);
    session.start(0.0);

    for frame in 1..=DEMO_FRAMES {
        // Autopilot: the pointer trails the ball a little so rallies end
        let field = session.field();
        let target = session.ball().pos.y + (frame % 90) as f32 - 45.0;
        InputController::pointer_move(target, session.player_mut(), field.height);

        let events = session.frame(frame as f64 * frame_ms);
        for event in &events {
            if matches!(event, GameEvent::PaddleHit { .. }) {
                hits += 1;
            }
        }
        publish_scores(&events, &mut scoreboard);

        surface.clear_commands();
        render(&session, &mut surface, &settings.style);
    }

    let snapshot = session.snapshot();
    log::info!(
        "Match over after {} frames: {} - {} ({} paddle hits, ball speed {:.2})",
        DEMO_FRAMES,
        snapshot.score.player,
        snapshot.score.opponent,
        hits,
        snapshot.ball.speed
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
