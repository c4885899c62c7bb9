//! Run state machine
//!
//! Idle -> Running <-> Paused, Running -> GameOver -> Running (restart) or
//! Idle (menu). The host calls `tick` once per display frame; everything
//! else is a discrete control.

use crate::consts::MAX_STEP_DT;
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::sim::{
    Field, FrameClock, GamePhase, PlayerIntent, RunState, StepResult, crossed_milestone, step,
};

/// Notifications for presentation (audio cues, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// Score went up this frame
    Scored { score: u32 },
    /// Score crossed a multiple of ten this frame
    Milestone { score: u32 },
    /// The player hit an obstacle
    Collided { score: u32 },
    /// The finished run beat the stored high score
    NewRecord { score: u32 },
    Paused,
    Resumed,
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub score: u32,
    pub new_record: bool,
}

impl RunSummary {
    /// Game-over line for the overlay
    pub fn headline(&self) -> String {
        if self.new_record {
            format!("Score: {} - NEW HIGH!", self.score)
        } else {
            format!("Score: {}", self.score)
        }
    }
}

pub struct Game {
    field: Field,
    run: RunState,
    clock: FrameClock,
    high_score: HighScore,
    store: Box<dyn HighScoreStore>,
    last_run: Option<RunSummary>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Create an idle game, reading the high score from `store`
    pub fn new(store: Box<dyn HighScoreStore>) -> Self {
        Self::with_field(Field::default(), store)
    }

    pub fn with_field(field: Field, store: Box<dyn HighScoreStore>) -> Self {
        let high_score = HighScore::load(store.as_ref());
        Self {
            field,
            run: RunState::with_field(field, 0),
            clock: FrameClock::default(),
            high_score,
            store,
            last_run: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.run.phase
    }

    /// Read-only view of the current (or last) run
    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    /// Summary of the most recently finished run
    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    /// Begin a new run. Ignored while a run is in progress.
    pub fn start(&mut self, seed: u64) -> bool {
        if matches!(self.run.phase, GamePhase::Running | GamePhase::Paused) {
            log::debug!("Start ignored, run already in progress");
            return false;
        }
        self.run = RunState::with_field(self.field, seed);
        self.run.phase = GamePhase::Running;
        self.clock.reset();
        self.events.push(GameEvent::Started);
        log::info!("Run started with seed {}", seed);
        true
    }

    /// Freeze the run (focus lost)
    pub fn pause(&mut self) -> bool {
        if self.run.phase != GamePhase::Running {
            return false;
        }
        self.run.phase = GamePhase::Paused;
        self.events.push(GameEvent::Paused);
        log::info!("Paused");
        true
    }

    /// Unfreeze the run (focus regained)
    pub fn resume(&mut self) -> bool {
        if self.run.phase != GamePhase::Paused {
            return false;
        }
        self.run.phase = GamePhase::Running;
        self.events.push(GameEvent::Resumed);
        log::info!("Resumed");
        true
    }

    /// Leave the game over screen for the menu
    pub fn return_to_menu(&mut self) -> bool {
        if self.run.phase != GamePhase::GameOver {
            return false;
        }
        self.run.phase = GamePhase::Idle;
        true
    }

    /// Per-frame entry point.
    ///
    /// The clock always sees the timestamp; the delta is only simulated while
    /// running. Returns every event raised since the previous call.
    pub fn tick(&mut self, timestamp_ms: f64, intent: PlayerIntent) -> Vec<GameEvent> {
        let dt = self.clock.delta(timestamp_ms);
        self.advance(dt, intent);
        self.drain_events()
    }

    /// Simulate `dt` seconds in slices of at most `MAX_STEP_DT`
    pub fn advance(&mut self, dt: f32, intent: PlayerIntent) {
        if self.run.phase != GamePhase::Running {
            return;
        }

        let prev_score = self.run.score;
        let mut remaining = dt.max(0.0);
        let mut collided = false;
        loop {
            let slice = remaining.min(MAX_STEP_DT);
            if step(&mut self.run, intent, slice) == StepResult::Collided {
                collided = true;
                break;
            }
            remaining -= slice;
            if remaining <= 0.0 {
                break;
            }
        }

        let score = self.run.score;
        if score > prev_score {
            self.events.push(GameEvent::Scored { score });
            if crossed_milestone(prev_score, score) {
                self.events.push(GameEvent::Milestone { score });
            }
        }

        if collided {
            self.finish_run();
        }
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn finish_run(&mut self) {
        let score = self.run.score;
        self.run.phase = GamePhase::GameOver;
        let new_record = self.high_score.submit(score, self.store.as_mut());

        self.events.push(GameEvent::Collided { score });
        if new_record {
            self.events.push(GameEvent::NewRecord { score });
        }
        self.last_run = Some(RunSummary { score, new_record });
        log::info!(
            "Game over: score {} (best {}){}",
            score,
            self.high_score.best(),
            if new_record { " - new record" } else { "" }
        );
    }
}
