//! Grid Breakout entry point
//!
//! Handles platform-specific wiring and drives the frame loop. The wasm
//! build embeds the game in the host page (canvas, start button, remote
//! leaderboard); the native build runs a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use grid_breakout::consts::*;
    use grid_breakout::leaderboard::{Leaderboard, LeaderboardClient};
    use grid_breakout::renderer::canvas::CanvasRenderer;
    use grid_breakout::renderer::{Frame, RenderAdapter};
    use grid_breakout::sim::{GamePhase, GameSession, TickInput, tick};

    /// Leaderboard server base URL
    const SERVER_URL: &str = "https://portfolio-xoe6.onrender.com";

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: Option<CanvasRenderer>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Phase seen last frame, for detecting the transition into Over
        last_phase: GamePhase,
    }

    impl Game {
        fn new() -> Self {
            Self {
                session: GameSession::new(),
                renderer: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: GamePhase::Idle,
            }
        }

        /// Run simulation ticks at a fixed timestep
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.session, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.launch = false;
                self.input.pause = false;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut renderer) = self.renderer {
                renderer.draw(&Frame::of(&self.session));
            }
        }

        /// Full session reset, the external `startGame` entry point
        fn start(&mut self) {
            self.session.reset();
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.last_phase = GamePhase::Idle;
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_display(id: &str, value: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
                let _ = el.style().set_property("display", value);
            }
        }
    }

    /// Rebuild the leaderboard list element from a fetched board
    fn show_leaderboard(board: &Leaderboard) {
        let Some(document) = document() else { return };
        let Some(container) = document.get_element_by_id("leaderboard") else {
            return;
        };
        container.set_inner_html("");

        let Ok(ul) = document.create_element("ul") else {
            return;
        };
        let _ = ul.set_attribute("class", "leaderboard-grid");
        for entry in &board.entries {
            if let Ok(li) = document.create_element("li") {
                li.set_text_content(Some(&format!("{}: {}", entry.initials, entry.score)));
                let _ = ul.append_child(&li);
            }
        }
        let _ = container.append_child(&ul);
    }

    /// Refresh the leaderboard view from the server, degrading to an
    /// empty view on any failure
    fn refresh_leaderboard() {
        wasm_bindgen_futures::spawn_local(async {
            let client = LeaderboardClient::new(SERVER_URL);
            let board = match client.fetch().await {
                Ok(board) => board,
                Err(err) => {
                    log::warn!("leaderboard fetch failed: {err}");
                    Leaderboard::default()
                }
            };
            show_leaderboard(&board);
        });
    }

    /// Submit a finished session's result, fire-and-forget
    ///
    /// The game is already in `Over` and the end screen already shown; a
    /// failed call only costs the refreshed ranking view.
    fn submit_result(initials: String, score: u32) {
        wasm_bindgen_futures::spawn_local(async move {
            let client = LeaderboardClient::new(SERVER_URL);
            match client.submit(&initials, score).await {
                Ok(board) => show_leaderboard(&board),
                Err(err) => log::warn!("score submission failed: {err}"),
            }
        });
    }

    /// Ask the server to clear the leaderboard; only an explicit success
    /// counts, a refused passkey is surfaced to the page
    fn request_leaderboard_reset(passkey: String) {
        wasm_bindgen_futures::spawn_local(async move {
            let client = LeaderboardClient::new(SERVER_URL);
            match client.reset(&passkey).await {
                Ok(()) => {
                    log::info!("leaderboard reset");
                    show_leaderboard(&Leaderboard::default());
                }
                Err(err) => {
                    log::warn!("leaderboard reset refused: {err}");
                    if let Some(el) = document().and_then(|d| d.get_element_by_id("reset-status")) {
                        el.set_text_content(Some(&err.to_string()));
                    }
                }
            }
        });
    }

    /// Handle the frame where the session entered `Over`: restore the
    /// start screen and send the result off
    fn handle_game_over(game: &Game) {
        set_display("gameCanvas", "none");
        set_display("start-screen", "inline-block");

        let initials = document()
            .and_then(|d| d.get_element_by_id("initials"))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default();
        submit_result(initials, game.session.score);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Breakout starting...");

        let Some(document) = document() else {
            log::error!("no document, cannot embed game");
            return;
        };

        let game = Rc::new(RefCell::new(Game::new()));

        if let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        {
            match CanvasRenderer::new(&canvas) {
                Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
                Err(err) => log::error!("renderer init failed: {err}"),
            }
        } else {
            log::error!("no #gameCanvas element");
        }

        setup_keyboard(game.clone());
        setup_buttons(game.clone());

        // Populate the leaderboard view on page load
        refresh_leaderboard();

        request_animation_frame(game);

        log::info!("Grid Breakout running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Right" | "ArrowRight" => g.input.right = true,
                    "Left" | "ArrowLeft" => g.input.left = true,
                    " " => {
                        // Space launches from Idle and resumes from Paused
                        event.prevent_default();
                        if g.session.phase == GamePhase::Paused {
                            g.input.pause = true;
                        } else {
                            g.input.launch = true;
                        }
                    }
                    "Escape" => g.input.pause = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "Right" | "ArrowRight" => g.input.right = false,
                    "Left" | "ArrowLeft" => g.input.left = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(doc) = document() else { return };

        // Start/restart button: full session reset, then frames resume
        if let Some(btn) = doc.get_element_by_id("startBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
                set_display("start-screen", "none");
                set_display("gameCanvas", "block");
                log::info!("Session started");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Leaderboard reset button, passkey-gated on the server
        if let Some(btn) = doc.get_element_by_id("resetLeaderboardBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let passkey = document()
                    .and_then(|d| d.get_element_by_id("passkey"))
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                if passkey.is_empty() {
                    return;
                }
                request_leaderboard_reset(passkey);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            // End-of-session boundary: runs once, when Over is entered
            let phase = g.session.phase;
            if phase == GamePhase::Over && g.last_phase != GamePhase::Over {
                handle_game_over(&g);
            }
            g.last_phase = phase;
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use grid_breakout::consts::*;
    use grid_breakout::sim::{GamePhase, GameSession, TickInput, tick};

    env_logger::init();
    log::info!("Grid Breakout (native) starting...");

    // Headless scripted session: launch and let a simple tracker paddle
    // play until the session ends or the tick cap runs out
    let mut session = GameSession::new();
    tick(
        &mut session,
        &TickInput {
            launch: true,
            ..Default::default()
        },
        SIM_DT,
    );

    for _ in 0..120_000 {
        let input = TickInput {
            left: session.ball.pos.x < session.paddle.center_x(),
            right: session.ball.pos.x > session.paddle.center_x(),
            launch: session.phase == GamePhase::Idle,
            ..Default::default()
        };
        tick(&mut session, &input, SIM_DT);
        if session.is_over() {
            break;
        }
    }

    log::info!(
        "Session ended: score {} / {}, lives {}, outcome {:?}",
        session.score,
        session.total_bricks(),
        session.lives,
        session.outcome
    );
}
