//! Per-canvas game session
//!
//! A `Session` owns one game's world together with its mode, scoreboard,
//! randomness and pending input. The platform layer feeds it input samples
//! between frames and calls `frame` once per animation frame.

use super::{Game, GameEvent, Mode, RandomSource, RenderView};
use crate::platform::{Key, PointerSample};
use crate::renderer::Frame;
use crate::scores::Scoreboard;

/// Mode machine and frame driver for one game
pub struct Session<G: Game> {
    world: G,
    world_size: (u32, u32),
    mode: Mode,
    scores: Scoreboard,
    rng: Box<dyn RandomSource>,
    tuning: G::Tuning,
    input: G::Input,
}

impl<G: Game> Session<G> {
    /// Build a session showing the start overlay
    pub fn new(
        width: u32,
        height: u32,
        tuning: G::Tuning,
        scores: Scoreboard,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let size = (width.max(1), height.max(1));
        let world = G::new(size.0, size.1, &tuning, rng.as_mut());
        log::info!("{} session created at {}x{}", G::NAME, size.0, size.1);
        Self {
            world,
            world_size: size,
            mode: Mode::Menu,
            scores,
            rng,
            tuning,
            input: G::Input::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn world(&self) -> &G {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut G {
        &mut self.world
    }

    pub fn world_size(&self) -> (u32, u32) {
        self.world_size
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn input(&self) -> &G::Input {
        &self.input
    }

    /// Replace pending intents wholesale (autopilot, replays)
    pub fn set_input(&mut self, input: G::Input) {
        self.input = input;
    }

    /// Physics is on hold because the canvas is portrait
    pub fn is_suspended(&self) -> bool {
        G::needs_landscape() && self.world_size.1 > self.world_size.0
    }

    /// Begin a fresh round from any mode
    pub fn start(&mut self) {
        self.rebuild_world();
        self.mode = Mode::Playing;
        log::info!("{} round started (best {})", G::NAME, self.scores.best());
    }

    /// Rebuild the world if the canvas size changed. Returns true on rebuild.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let size = (width.max(1), height.max(1));
        if size == self.world_size {
            return false;
        }
        self.world_size = size;
        let fresh = G::new(size.0, size.1, &self.tuning, self.rng.as_mut());
        let previous = std::mem::replace(&mut self.world, fresh);
        let kept = self.world.resized(&previous);
        self.input = G::Input::default();
        if !kept {
            self.scores.set_score(0);
        }
        log::debug!(
            "{} world rebuilt at {}x{} (score {})",
            G::NAME,
            size.0,
            size.1,
            if kept { "kept" } else { "reset" }
        );
        true
    }

    /// Run one update step with a clamped `elapsed` (seconds)
    pub fn advance(&mut self, elapsed: f32) -> Vec<GameEvent> {
        let dt = frame_dt(elapsed, G::max_frame_dt());
        if self.mode != Mode::Playing || self.is_suspended() {
            return Vec::new();
        }

        let events = self
            .world
            .tick(&self.input, dt, self.rng.as_mut(), &mut self.scores);
        G::consume_one_shots(&mut self.input);

        for event in &events {
            log::debug!("{}: {:?}", G::NAME, event);
        }
        if events.contains(&GameEvent::RoundOver) {
            self.end_round();
        }
        events
    }

    /// Paint the current world
    pub fn render(&self) -> Frame {
        let mut frame = Frame::new(self.world_size.0, self.world_size.1);
        let view = RenderView {
            mode: self.mode,
            score: self.scores.current(),
            best: self.scores.best(),
            last: self.scores.last(),
        };
        self.world.draw(&view, &mut frame);
        frame
    }

    /// One animation frame: resize, update, draw
    pub fn frame(&mut self, elapsed: f32, width: u32, height: u32) -> Frame {
        self.resize(width, height);
        self.advance(elapsed);
        self.render()
    }

    pub fn pointer(&mut self, sample: PointerSample) {
        if self.mode == Mode::Playing {
            G::pointer(&mut self.input, sample);
        }
    }

    pub fn key(&mut self, key: Key) {
        if self.mode == Mode::Playing {
            G::key(&mut self.input, key);
        } else if key.starts_round() {
            self.start();
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.mode == Mode::Playing {
            G::key_up(&mut self.input, key);
        }
    }

    fn rebuild_world(&mut self) {
        let (w, h) = self.world_size;
        self.world = G::new(w, h, &self.tuning, self.rng.as_mut());
        self.input = G::Input::default();
        self.scores.set_score(0);
    }

    fn end_round(&mut self) {
        let new_best = self.scores.record_round_end();
        self.mode = Mode::GameOver;
        log::info!(
            "{} round over: score {} (best {}{})",
            G::NAME,
            self.scores.last(),
            self.scores.best(),
            if new_best { ", new best" } else { "" }
        );
    }
}

/// Frame delta clamp: never negative, never above `limit`
fn frame_dt(elapsed: f32, limit: f32) -> f32 {
    if elapsed.is_nan() || elapsed <= 0.0 {
        0.0
    } else {
        elapsed.min(limit)
    }
}
