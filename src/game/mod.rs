//! Connectbook core: tokens, links, score / lives and the single controller
//! that mutates them.
//!
//! Nothing in here touches the DOM. Every mutating call returns the list of
//! [`Effect`]s the platform layer has to carry out (redraw, overlay updates,
//! timer bookkeeping, game-over summary), which keeps the rules testable on
//! the host with a scripted [`CandidateSource`].

use crate::config::GameConfig;
use crate::error::GameError;
use crate::log::log_line;
use crate::rng::SimpleRng;

pub mod gesture;
pub mod schedule;
pub mod spawner;

pub use gesture::{Gesture, hit_test, token_at};
pub use schedule::{SpawnSchedule, SpawnTicket};
pub use spawner::{CandidateSource, SpawnArea, find_free_position, ramp_interval};

// --- Geometry / entities ------------------------------------------------------

/// Surface-local coordinates (origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TokenId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    pub id: TokenId,
    pub position: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Connection {
    pub start: TokenId,
    pub end: TokenId,
}

impl Connection {
    pub fn touches(&self, id: TokenId) -> bool {
        self.start == id || self.end == id
    }
}

/// Pointer input in surface-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press(Point),
    Move(Point),
    Release(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum EndReason {
    OutOfLives,
    PlacementExhausted,
}

/// Work the platform layer must do after a state change.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    Redraw,
    ScoreChanged(u32),
    LivesChanged(u32),
    /// Replace any pending spawn timer with this one.
    ScheduleSpawn(SpawnTicket),
    CancelSpawn,
    /// A link was completed between two tokens.
    Connected(Connection),
    GameOver { score: u32, reason: EndReason },
    DismissSummary,
}

// --- State --------------------------------------------------------------------

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameState {
    pub(crate) score: u32,
    pub(crate) lives: u32,
    pub(crate) running: bool,
    pub(crate) spawning: bool,
    pub(crate) spawn_interval_ms: u32,
    pub(crate) tokens: Vec<Token>,
    pub(crate) connections: Vec<Connection>,
    pub(crate) gesture: Gesture,
    #[cfg_attr(feature = "serde", serde(skip))]
    next_id: u32,
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            lives: config.starting_lives,
            running: true,
            spawning: true,
            spawn_interval_ms: config.initial_spawn_interval_ms,
            tokens: Vec::new(),
            connections: Vec::new(),
            gesture: Gesture::Idle,
            next_id: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }
    pub fn lives(&self) -> u32 {
        self.lives
    }
    pub fn is_running(&self) -> bool {
        self.running
    }
    pub fn is_spawning(&self) -> bool {
        self.spawning
    }
    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    fn push_token(&mut self, position: Point) -> TokenId {
        let id = TokenId(self.next_id);
        self.next_id += 1;
        self.tokens.push(Token { id, position });
        id
    }
}

// --- Controller ---------------------------------------------------------------

/// Owns the state and is its only mutation surface.
pub struct Game<S: CandidateSource = SimpleRng> {
    config: GameConfig,
    state: GameState,
    schedule: SpawnSchedule,
    source: S,
}

fn request_redraw(fx: &mut Vec<Effect>) {
    if !fx.contains(&Effect::Redraw) {
        fx.push(Effect::Redraw);
    }
}

impl<S: CandidateSource> Game<S> {
    pub fn new(config: GameConfig, source: S) -> Self {
        let state = GameState::new(&config);
        Self {
            config,
            state,
            schedule: SpawnSchedule::default(),
            source,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pending_spawn(&self) -> Option<SpawnTicket> {
        self.schedule.pending()
    }

    /// Announce the initial overlays and arm the first spawn timer.
    pub fn start(&mut self) -> Vec<Effect> {
        log_line("connectbook: game started");
        let ticket = self.schedule.reschedule(self.state.spawn_interval_ms);
        vec![
            Effect::ScoreChanged(self.state.score),
            Effect::LivesChanged(self.state.lives),
            Effect::ScheduleSpawn(ticket),
            Effect::Redraw,
        ]
    }

    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        match event {
            InputEvent::Press(p) => self.on_press(p),
            InputEvent::Move(p) => self.on_move(p),
            InputEvent::Release(p) => self.on_release(p),
        }
    }

    /// Timer callback. Stale generations (replaced or cancelled) are ignored.
    pub fn on_spawn_timer(&mut self, generation: u64) -> Vec<Effect> {
        if !self.schedule.fire(generation) {
            return Vec::new();
        }
        self.try_spawn()
    }

    pub fn try_spawn(&mut self) -> Vec<Effect> {
        let mut fx = Vec::new();
        self.spawn_into(&mut fx);
        fx
    }

    fn spawn_into(&mut self, fx: &mut Vec<Effect>) {
        if !self.state.spawning {
            return;
        }
        self.state.spawn_interval_ms = ramp_interval(self.state.spawn_interval_ms, &self.config);
        match find_free_position(&mut self.source, &self.state.tokens, &self.config) {
            Ok(position) => {
                self.state.push_token(position);
                let ticket = self.schedule.reschedule(self.state.spawn_interval_ms);
                fx.push(Effect::ScheduleSpawn(ticket));
                request_redraw(fx);
            }
            Err(err @ GameError::PlacementExhausted { .. }) => {
                log_line(&format!("connectbook: {err}"));
                self.end_game(EndReason::PlacementExhausted, fx);
            }
            Err(err) => {
                log_line(&format!("connectbook: unexpected spawn error: {err}"));
                self.end_game(EndReason::PlacementExhausted, fx);
            }
        }
    }

    pub fn on_press(&mut self, pos: Point) -> Vec<Effect> {
        if !self.state.running || self.state.gesture.is_dragging() {
            return Vec::new();
        }
        match token_at(&self.state.tokens, pos, self.config.token_radius, None) {
            Some(anchor) => {
                self.state.gesture = Gesture::Dragging {
                    anchor,
                    pointer: pos,
                };
                vec![Effect::Redraw]
            }
            None => Vec::new(),
        }
    }

    pub fn on_move(&mut self, pos: Point) -> Vec<Effect> {
        if !self.state.running {
            return Vec::new();
        }
        match &mut self.state.gesture {
            Gesture::Dragging { pointer, .. } => {
                *pointer = pos;
                vec![Effect::Redraw]
            }
            Gesture::Idle => Vec::new(),
        }
    }

    pub fn on_release(&mut self, pos: Point) -> Vec<Effect> {
        if !self.state.running {
            return Vec::new();
        }
        let Gesture::Dragging { anchor, .. } = self.state.gesture else {
            return Vec::new();
        };
        self.state.gesture = Gesture::Idle;

        let mut fx = Vec::new();
        match token_at(&self.state.tokens, pos, self.config.token_radius, Some(anchor)) {
            Some(matched) => self.resolve_match(anchor, matched, &mut fx),
            None => self.lose_life(&mut fx),
        }
        request_redraw(&mut fx);
        fx
    }

    // Only the matched endpoint goes away; the anchor stays even though its
    // fresh link is purged along with the matched token.
    fn resolve_match(&mut self, anchor: TokenId, matched: TokenId, fx: &mut Vec<Effect>) {
        let link = Connection {
            start: anchor,
            end: matched,
        };
        self.state.connections.push(link);
        self.state.tokens.retain(|t| t.id != matched);
        self.state.connections.retain(|c| !c.touches(matched));
        self.state.score += 1;
        fx.push(Effect::Connected(link));
        fx.push(Effect::ScoreChanged(self.state.score));
    }

    fn lose_life(&mut self, fx: &mut Vec<Effect>) {
        self.state.lives = self.state.lives.saturating_sub(1);
        fx.push(Effect::LivesChanged(self.state.lives));
        if self.state.lives == 0 {
            self.end_game(EndReason::OutOfLives, fx);
        }
    }

    /// Enter the terminal state. No-op once the game is already over.
    pub fn game_over(&mut self, reason: EndReason) -> Vec<Effect> {
        let mut fx = Vec::new();
        self.end_game(reason, &mut fx);
        fx
    }

    fn end_game(&mut self, reason: EndReason, fx: &mut Vec<Effect>) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        self.state.spawning = false;
        self.state.gesture = Gesture::Idle;
        self.schedule.cancel();
        log_line(&format!(
            "connectbook: game over ({reason:?}), score {}",
            self.state.score
        ));
        fx.push(Effect::CancelSpawn);
        fx.push(Effect::GameOver {
            score: self.state.score,
            reason,
        });
        request_redraw(fx);
    }

    /// Back to a fresh board with one token already placed.
    pub fn restart(&mut self) -> Vec<Effect> {
        log_line("connectbook: restart");
        let mut fx = Vec::new();
        if self.schedule.cancel() {
            fx.push(Effect::CancelSpawn);
        }
        self.state = GameState::new(&self.config);
        fx.push(Effect::DismissSummary);
        fx.push(Effect::ScoreChanged(self.state.score));
        fx.push(Effect::LivesChanged(self.state.lives));
        self.spawn_into(&mut fx);
        request_redraw(&mut fx);
        fx
    }

    /// Swap in a new config and begin a fresh game under it, exactly as
    /// [`Game::start`] would. Any pending spawn ticket is invalidated.
    pub fn reconfigure(&mut self, config: GameConfig) -> Vec<Effect> {
        let mut fx = Vec::new();
        if self.schedule.cancel() {
            fx.push(Effect::CancelSpawn);
        }
        self.config = config;
        self.state = GameState::new(&self.config);
        fx.push(Effect::DismissSummary);
        fx.extend(self.start());
        fx
    }
}
