//! Deterministic simulation module
//!
//! Everything gameplay-related that is shared by the three games lives here.
//! This module must stay pure and deterministic:
//! - Physics only advances through an explicit `tick(dt)`
//! - Randomness only through an injected `RandomSource`
//! - No rendering backend or platform dependencies

pub mod collision;
pub mod rng;
pub mod session;

pub use collision::Rect;
pub use rng::{GameRng, RandomSource, SequenceRng};
pub use session::Session;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;
use crate::platform::{Key, PointerSample};
use crate::renderer::Frame;
use crate::scores::Scoreboard;

/// Which screen the session is on. Physics only runs in `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Start overlay, nothing moves
    #[default]
    Menu,
    /// Round in progress
    Playing,
    /// Round ended, overlay shows last/best
    GameOver,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Menu => "menu",
            Mode::Playing => "playing",
            Mode::GameOver => "gameover",
        }
    }

    /// Whether the start/game-over overlay should be visible
    pub fn shows_overlay(&self) -> bool {
        !matches!(self, Mode::Playing)
    }
}

/// Things that happened during a tick, for logging and the platform layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball bounced off a paddle
    PaddleHit { player: bool },
    /// Ball bounced off the top or bottom bound
    WallBounce,
    /// Opponent missed; reward added to the streak
    Reward(u64),
    /// Ball put back in play at the centre
    Served,
    /// Runner left the ground
    Jumped,
    /// A new obstacle group entered from the right
    ObstacleSpawned { count: usize },
    /// Snake ate the food
    FoodEaten,
    /// Terminal condition reached; the session ends the round
    RoundOver,
}

/// Read-only data the renderers need besides the world itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderView {
    pub mode: Mode,
    pub score: u64,
    pub best: u64,
    pub last: u64,
}

/// One arcade game: a world plus its update and draw rules.
///
/// The session owns the world and calls these in a fixed order each frame:
/// input handlers between frames, `tick` while playing, `draw` always.
pub trait Game: Sized {
    /// Intents gathered by input handlers and consumed by the next tick
    type Input: Default + Clone + std::fmt::Debug;
    /// Hand-tuned constants for this game
    type Tuning: Clone + Default;

    /// Short lowercase name, used in logs
    const NAME: &'static str;
    /// Storage key for the persisted best score
    const STORAGE_KEY: &'static str;

    /// Build a fresh world for a canvas of the given pixel size
    fn new(width: u32, height: u32, tuning: &Self::Tuning, rng: &mut dyn RandomSource) -> Self;

    /// Advance by `dt` seconds. Score changes go through `scores`.
    fn tick(
        &mut self,
        input: &Self::Input,
        dt: f32,
        rng: &mut dyn RandomSource,
        scores: &mut Scoreboard,
    ) -> Vec<GameEvent>;

    /// Paint the world. Must not mutate anything.
    fn draw(&self, view: &RenderView, frame: &mut Frame);

    /// Translate a pointer sample into intents
    fn pointer(input: &mut Self::Input, sample: PointerSample);

    /// Translate a key press into intents
    fn key(input: &mut Self::Input, key: Key);

    /// Key released; only games with hold mechanics care
    fn key_up(_input: &mut Self::Input, _key: Key) {}

    /// Clear intents that must fire only once
    fn consume_one_shots(_input: &mut Self::Input) {}

    /// Longest `dt` one tick may see. Games that run their own fixed-rate
    /// clock raise it so slow displays do not slow them down.
    fn max_frame_dt() -> f32 {
        MAX_FRAME_DT
    }

    /// Carry round progress over from the world this one replaces after a
    /// canvas resize. Returns true when the round score survives.
    fn resized(&mut self, _previous: &Self) -> bool {
        false
    }

    /// Games that only make sense on a wide canvas pause physics in portrait
    fn needs_landscape() -> bool {
        false
    }

    /// Score as the page HUD shows it
    fn format_score(score: u64) -> String {
        score.to_string()
    }
}
