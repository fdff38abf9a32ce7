//! MaziSpace entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlCanvasElement, HtmlDialogElement, HtmlInputElement,
        HtmlTemplateElement, KeyboardEvent,
    };

    use mazi_space::Settings;
    use mazi_space::leaderboard::fetch::FetchTransport;
    use mazi_space::leaderboard::{EMPTY_PLACEHOLDER, Leaderboard, LeaderboardClient};
    use mazi_space::platform::{FrameClock, InputLatch};
    use mazi_space::renderer::{CanvasSurface, draw_frame};
    use mazi_space::sim::{GameEvent, GameState, tick};

    type Client = LeaderboardClient<FetchTransport>;

    /// How long the score form stays highlighted after the dialog closes
    const FORM_HIGHLIGHT_MS: i32 = 1200;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FrameClock,
        input: InputLatch,
        surface: CanvasSurface,
        leaderboard: Leaderboard,
        settings: Settings,
        // Last values written to the HUD
        shown_score: Option<u32>,
        shown_best: Option<u32>,
    }

    impl Game {
        /// Update then draw one animation frame
        fn frame(&mut self, timestamp: f64) {
            let dt = self.clock.advance(timestamp);
            self.state.field = self.surface.size();

            let input = self.input.snapshot();
            tick(&mut self.state, &input, dt);
            for event in self.state.drain_events() {
                self.handle_event(event);
            }

            draw_frame(&self.state, &mut self.surface);
            self.update_hud();
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::StarCollected { score } => log::debug!("Star collected ({})", score),
                GameEvent::NewBest { score } => {
                    self.settings.record_best(score);
                }
                GameEvent::GameOver { score } => {
                    self.settings.save();
                    show_game_over(score, self.leaderboard.potential_rank(u64::from(score)));
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let score = self.state.score();
            if self.shown_score != Some(score) {
                set_text("score", &score.to_string());
                self.shown_score = Some(score);
            }
            let best = self.state.best_score();
            if self.shown_best != Some(best) {
                set_text("bestScore", &best.to_string());
                self.shown_best = Some(best);
            }
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            self.state.reset();
            log::info!("Game restarted");
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Result<Element, JsValue> {
        document()
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
    }

    fn set_text(id: &str, text: &str) {
        if let Ok(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn game_over_dialog() -> Option<HtmlDialogElement> {
        element("gameOverDialog").ok()?.dyn_into().ok()
    }

    fn show_game_over(score: u32, rank: Option<usize>) {
        set_text("finalScore", &score.to_string());
        let rank_text = match rank {
            Some(rank) => format!("Good enough for #{} on the leaderboard!", rank),
            None => String::new(),
        };
        set_text("finalRank", &rank_text);

        if let Some(dialog) = game_over_dialog() {
            if !dialog.open() {
                if let Err(e) = dialog.show_modal() {
                    log::warn!("Could not open game over dialog: {:?}", e);
                }
            }
        }
    }

    /// Rebuild the leaderboard list from the template
    fn render_leaderboard(board: &Leaderboard) -> Result<(), JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let list = element("leaderboard")?;
        let template: HtmlTemplateElement = element("leaderboard-item")?.dyn_into()?;
        let prototype = template
            .content()
            .first_element_child()
            .ok_or_else(|| JsValue::from_str("empty leaderboard template"))?;

        list.set_inner_html("");
        for row in board.rows() {
            let item: Element = prototype.clone_node_with_deep(true)?.dyn_into()?;
            for (selector, text) in [
                (".rank", row.rank.to_string()),
                (".name", row.player_name),
                (".score", row.score),
            ] {
                if let Some(el) = item.query_selector(selector)? {
                    el.set_text_content(Some(&text));
                }
            }
            list.append_child(&item)?;
        }

        if board.is_empty() {
            let empty = document.create_element("li")?;
            empty.set_text_content(Some(EMPTY_PLACEHOLDER));
            list.append_child(&empty)?;
        }
        Ok(())
    }

    fn refresh_leaderboard(game: Rc<RefCell<Game>>, client: Rc<Client>) {
        wasm_bindgen_futures::spawn_local(async move {
            match client.fetch().await {
                Ok(entries) => {
                    let mut g = game.borrow_mut();
                    g.leaderboard.replace(entries);
                    if let Err(e) = render_leaderboard(&g.leaderboard) {
                        log::error!("Failed to render leaderboard: {:?}", e);
                    }
                }
                // Keep whatever is on screen
                Err(e) => log::error!("Failed to load leaderboard: {}", e),
            }
        });
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("MaziSpace starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let canvas: HtmlCanvasElement = element("gameCanvas")?.dyn_into()?;
        let surface = CanvasSurface::new(canvas)?;
        let field = surface.size();

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(field.x, field.y, seed).with_best_score(settings.best_score);
        log::info!("Game initialized with seed: {}", seed);

        if let Ok(input) = element("playerName")?.dyn_into::<HtmlInputElement>() {
            input.set_value(&settings.player_name);
        }

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FrameClock::new(),
            input: InputLatch::default(),
            surface,
            leaderboard: Leaderboard::new(),
            settings,
            shown_score: None,
            shown_best: None,
        }));

        let origin = window.location().origin()?;
        let client = Rc::new(LeaderboardClient::new(&origin, FetchTransport));

        setup_input_handlers(game.clone())?;
        setup_restart_button(game.clone())?;
        setup_score_form(game.clone(), client.clone())?;
        setup_dialog_close(game.clone())?;

        refresh_leaderboard(game.clone(), client);

        // Start game loop
        request_animation_frame(game);

        log::info!("MaziSpace running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.handle_key(&event.key(), pressed);
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let btn = element("restartButton")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().restart();
            if let Some(dialog) = game_over_dialog() {
                if dialog.open() {
                    dialog.close();
                }
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_score_form(game: Rc<RefCell<Game>>, client: Rc<Client>) -> Result<(), JsValue> {
        let form = element("scoreForm")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.prevent_default();

            let name = element("playerName")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                .map(|input| input.value())
                .unwrap_or_default();

            let prepared = game.borrow_mut().state.begin_submission(&name);
            let submission = match prepared {
                Ok(submission) => submission,
                Err(rejection) => {
                    alert(&rejection.to_string());
                    return;
                }
            };

            let game = game.clone();
            let client = client.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match client.submit(&submission).await {
                    Ok(entries) => {
                        {
                            let mut g = game.borrow_mut();
                            g.leaderboard.replace(entries);
                            g.state.confirm_submission();
                            if g.settings.remember_player(&submission.player_name) {
                                g.settings.save();
                            }
                            if let Err(e) = render_leaderboard(&g.leaderboard) {
                                log::error!("Failed to render leaderboard: {:?}", e);
                            }
                        }
                        alert("Score saved!");
                    }
                    Err(e) => {
                        log::warn!("Score submission failed: {}", e);
                        game.borrow_mut().state.abandon_submission();
                        alert(&e.user_message());
                    }
                }
            });
        });
        form.add_event_listener_with_callback("submit", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Closing the game over dialog points the player at the score form
    fn setup_dialog_close(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let dialog = element("gameOverDialog")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if game.borrow().state.is_running() {
                return;
            }
            let Ok(form) = element("scoreForm") else {
                return;
            };
            let _ = form.class_list().add_1("highlight");

            let timeout = Closure::once_into_js(move || {
                let _ = form.class_list().remove_1("highlight");
            });
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    timeout.unchecked_ref(),
                    FORM_HIGHLIGHT_MS,
                );
            }
        });
        dialog.add_event_listener_with_callback("close", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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

/// Headless session with a simple dodging pilot
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use mazi_space::sim::{GameState, TickInput, tick};

    /// Obstacles closer than this above the craft are threats
    const LOOKAHEAD: f32 = 220.0;
    /// Horizontal slack around the craft when checking threats
    const SLACK: f32 = 24.0;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Report {
        pub score: u32,
        pub seconds: f32,
        pub crashed: bool,
    }

    /// Dodge the nearest threatening obstacle, otherwise chase the lowest star
    pub fn steer(state: &GameState) -> TickInput {
        let craft = &state.craft;
        let center = craft.pos.x + craft.size.x / 2.0;

        let threat = state
            .obstacles
            .iter()
            .filter(|o| {
                o.pos.x < craft.pos.x + craft.size.x + SLACK
                    && o.pos.x + o.size > craft.pos.x - SLACK
                    && o.pos.y + o.size > craft.pos.y - LOOKAHEAD
                    && o.pos.y < craft.pos.y + craft.size.y
            })
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        if let Some(o) = threat {
            let obstacle_center = o.pos.x + o.size / 2.0;
            let max_x = state.field.x - craft.size.x;
            // Go the other way, unless pinned against a wall
            let go_left = if craft.pos.x <= 0.0 {
                false
            } else if craft.pos.x >= max_x {
                true
            } else {
                obstacle_center > center
            };
            return TickInput {
                left: go_left,
                right: !go_left,
            };
        }

        match state.stars.iter().max_by(|a, b| a.pos.y.total_cmp(&b.pos.y)) {
            Some(star) => {
                let target = star.pos.x + star.size / 2.0;
                TickInput {
                    left: target < center - 4.0,
                    right: target > center + 4.0,
                }
            }
            None => TickInput::default(),
        }
    }

    /// Fly at 60 Hz until a crash or `max_seconds`
    pub fn run(seed: u64, width: f32, height: f32, max_seconds: f32) -> Report {
        let mut state = GameState::new(width, height, seed);
        let dt = 1.0 / 60.0;
        let mut seconds = 0.0;
        while state.is_running() && seconds < max_seconds {
            let input = steer(&state);
            tick(&mut state, &input, dt);
            seconds += dt;
        }
        Report {
            score: state.score(),
            seconds,
            crashed: !state.is_running(),
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mazi_space::consts::{FIELD_HEIGHT, FIELD_WIDTH};

    env_logger::init();
    log::info!("MaziSpace (native) starting...");
    log::info!("The game runs in the browser - use `trunk serve`. Flying a headless demo instead.");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5eed);
    let report = autopilot::run(seed, FIELD_WIDTH, FIELD_HEIGHT, 120.0);

    log::info!(
        "Seed {}: score {} after {:.1}s{}",
        seed,
        report.score,
        report.seconds,
        if report.crashed { " (crashed)" } else { "" }
    );
    println!("score={} seconds={:.1} crashed={}", report.score, report.seconds, report.crashed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
