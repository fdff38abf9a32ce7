//! Game state and core simulation types
//!
//! The whole world lives in one owned `GameState`; the host passes it by
//! reference to `tick` and to the renderer.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::Aabb;
use super::score::ScoreLedger;
use super::spawn::SpawnTimers;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Craft hit an obstacle; waiting for restart
    Ended,
}

/// Things the host reacts to after a tick (HUD, dialog, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A star was collected; `score` is the new run score
    StarCollected { score: u32 },
    /// The run score passed the best score
    NewBest { score: u32 },
    /// Running -> Ended. Queued exactly once per run.
    GameOver { score: u32 },
}

/// The player's craft
#[derive(Debug, Clone)]
pub struct Craft {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
}

impl Craft {
    /// A craft centered horizontally near the bottom of the field
    pub fn new(field: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                field.x / 2.0 - CRAFT_WIDTH / 2.0,
                field.y - CRAFT_BOTTOM_OFFSET,
            ),
            size: Vec2::new(CRAFT_WIDTH, CRAFT_HEIGHT),
            speed: CRAFT_SPEED,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Keep the craft inside [0, field_width - width]
    pub fn clamp_to_field(&mut self, field_width: f32) {
        let max_x = (field_width - self.size.x).max(0.0);
        self.pos.x = self.pos.x.clamp(0.0, max_x);
    }
}

/// A falling square obstacle (drawn as a circle)
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    /// Fall speed (pixels/s)
    pub speed: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A falling star worth `STAR_SCORE` points
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed (pixels/s)
    pub speed: f32,
}

impl Star {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// A score ready to be posted to the leaderboard (the POST body)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSubmission {
    pub player_name: String,
    pub score: u32,
}

/// Why a score submission was refused before reaching the network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// The run is still going, or this run was already submitted
    NotEligible,
    /// A submission for this run is still waiting on the server
    InFlight,
    /// Name was empty after trimming
    EmptyName,
    /// Name is longer than the server accepts
    NameTooLong,
}

impl std::fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitRejection::NotEligible => {
                write!(f, "Scores can only be submitted once the game is over.")
            }
            SubmitRejection::InFlight => write!(f, "Your score is already being submitted."),
            SubmitRejection::EmptyName => write!(f, "Enter a pilot name."),
            SubmitRejection::NameTooLong => write!(
                f,
                "Pilot names can be at most {} characters.",
                MAX_PLAYER_NAME_CHARS
            ),
        }
    }
}

impl std::error::Error for SubmitRejection {}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// True between a game over and the first successful submission
    pub can_submit: bool,
    /// Score and best score
    pub ledger: ScoreLedger,
    /// Obstacle/star spawn accumulators
    pub timers: SpawnTimers,
    /// Playfield size (pixels)
    pub field: Vec2,
    /// Player craft
    pub craft: Craft,
    /// Falling obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Falling stars, in spawn order
    pub stars: Vec<Star>,
    /// Spawn RNG
    pub rng: Pcg32,
    /// Events queued since the last drain
    events: Vec<GameEvent>,
    /// A POST for this run has not resolved yet
    submitting: bool,
}

impl GameState {
    /// Create a running game on a `width` x `height` field
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let field = Vec2::new(width, height);
        Self {
            phase: GamePhase::Running,
            can_submit: false,
            ledger: ScoreLedger::default(),
            timers: SpawnTimers::default(),
            field,
            craft: Craft::new(field),
            obstacles: Vec::new(),
            stars: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            submitting: false,
        }
    }

    /// Carry over a best score from a previous session
    pub fn with_best_score(mut self, best: u32) -> Self {
        self.ledger = ScoreLedger::with_best(best);
        self
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn score(&self) -> u32 {
        self.ledger.score()
    }

    pub fn best_score(&self) -> u32 {
        self.ledger.best()
    }

    /// Start a fresh run. Best score is kept.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.can_submit = false;
        self.ledger.reset_run();
        self.timers = SpawnTimers::default();
        self.craft = Craft::new(self.field);
        self.obstacles.clear();
        self.stars.clear();
        self.events.clear();
        self.submitting = false;
    }

    /// Running -> Ended. No-op if the run already ended.
    pub fn end_game(&mut self) {
        if self.phase == GamePhase::Ended {
            return;
        }
        self.phase = GamePhase::Ended;
        self.can_submit = true;
        log::info!("Game over with score {}", self.score());
        self.events.push(GameEvent::GameOver {
            score: self.score(),
        });
    }

    /// Add points to the run and queue the matching events
    pub fn increment_score(&mut self, amount: u32) {
        let new_best = self.ledger.increment(amount);
        let score = self.ledger.score();
        self.events.push(GameEvent::StarCollected { score });
        if new_best {
            self.events.push(GameEvent::NewBest { score });
        }
    }

    /// Take all events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Validate a submission request against the current run.
    ///
    /// Eligibility is checked before the name, so a stale form never hits
    /// the network.
    pub fn prepare_submission(&self, raw_name: &str) -> Result<ScoreSubmission, SubmitRejection> {
        if !self.can_submit {
            return Err(SubmitRejection::NotEligible);
        }
        if self.submitting {
            return Err(SubmitRejection::InFlight);
        }
        let name = raw_name.trim();
        if name.is_empty() {
            return Err(SubmitRejection::EmptyName);
        }
        if name.chars().count() > MAX_PLAYER_NAME_CHARS {
            return Err(SubmitRejection::NameTooLong);
        }
        Ok(ScoreSubmission {
            player_name: name.to_string(),
            score: self.score(),
        })
    }

    /// Validate like `prepare_submission` and mark the run as in flight until
    /// `confirm_submission` or `abandon_submission`
    pub fn begin_submission(&mut self, raw_name: &str) -> Result<ScoreSubmission, SubmitRejection> {
        let submission = self.prepare_submission(raw_name)?;
        self.submitting = true;
        Ok(submission)
    }

    /// The leaderboard accepted this run's score
    pub fn confirm_submission(&mut self) {
        self.can_submit = false;
        self.submitting = false;
    }

    /// The request failed; the player may retry
    pub fn abandon_submission(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ended_state() -> GameState {
        let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 7);
        state.increment_score(50);
        state.end_game();
        state.drain_events();
        state
    }

    #[test]
    fn test_new_game_is_running() {
        let state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 1);
        assert!(state.is_running());
        assert!(!state.can_submit);
        assert_eq!(state.score(), 0);
        assert_eq!(state.craft.pos, Vec2::new(217.0, 560.0));
    }

    #[test]
    fn test_end_game_signals_once() {
        let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 1);
        state.end_game();
        state.end_game();
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.can_submit);
        assert_eq!(state.drain_events(), vec![GameEvent::GameOver { score: 0 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_score_events() {
        let mut state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 1).with_best_score(30);
        state.increment_score(25);
        state.increment_score(25);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::StarCollected { score: 25 },
                GameEvent::StarCollected { score: 50 },
                GameEvent::NewBest { score: 50 },
            ]
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = ended_state();
        state.obstacles.push(Obstacle {
            pos: Vec2::new(10.0, 10.0),
            size: 40.0,
            speed: 150.0,
        });
        state.craft.pos.x = 0.0;
        state.timers.obstacle = 0.4;

        state.reset();
        let once = (
            state.phase,
            state.can_submit,
            state.score(),
            state.best_score(),
            state.craft.pos,
            state.obstacles.len(),
            state.stars.len(),
            state.timers,
        );
        state.reset();
        let twice = (
            state.phase,
            state.can_submit,
            state.score(),
            state.best_score(),
            state.craft.pos,
            state.obstacles.len(),
            state.stars.len(),
            state.timers,
        );

        assert_eq!(once, twice);
        assert_eq!(once.0, GamePhase::Running);
        assert!(!once.1);
        assert_eq!(once.2, 0);
        assert_eq!(once.3, 50);
        assert_eq!(once.5, 0);
    }

    #[test]
    fn test_submission_requires_game_over() {
        let state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 1);
        assert_eq!(
            state.prepare_submission("Ace"),
            Err(SubmitRejection::NotEligible)
        );
    }

    #[test]
    fn test_submission_checks_eligibility_before_name() {
        let state = GameState::new(FIELD_WIDTH, FIELD_HEIGHT, 1);
        assert_eq!(state.prepare_submission("   "), Err(SubmitRejection::NotEligible));
    }

    #[test]
    fn test_submission_name_validation() {
        let state = ended_state();
        assert_eq!(state.prepare_submission("  \t "), Err(SubmitRejection::EmptyName));
        let long = "x".repeat(MAX_PLAYER_NAME_CHARS + 1);
        assert_eq!(state.prepare_submission(&long), Err(SubmitRejection::NameTooLong));
        assert_eq!(
            state.prepare_submission("  NovaPilot "),
            Ok(ScoreSubmission {
                player_name: "NovaPilot".to_string(),
                score: 50,
            })
        );
    }

    #[test]
    fn test_second_submit_blocked_while_in_flight() {
        let mut state = ended_state();
        let first = state.begin_submission("Ace").unwrap();
        assert_eq!(first.score, 50);
        assert_eq!(state.begin_submission("Ace"), Err(SubmitRejection::InFlight));
        assert_eq!(state.prepare_submission("Ace"), Err(SubmitRejection::InFlight));

        // A failed request allows a retry
        state.abandon_submission();
        assert!(state.begin_submission("Ace").is_ok());

        state.confirm_submission();
        assert_eq!(state.begin_submission("Ace"), Err(SubmitRejection::NotEligible));
    }

    #[test]
    fn test_reset_clears_in_flight_submission() {
        let mut state = ended_state();
        state.begin_submission("Ace").unwrap();
        state.reset();
        state.end_game();
        assert!(state.begin_submission("Ace").is_ok());
    }

    #[test]
    fn test_confirm_submission_keeps_phase() {
        let mut state = ended_state();
        state.confirm_submission();
        assert!(!state.can_submit);
        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.prepare_submission("Ace"), Err(SubmitRejection::NotEligible));
    }
}
