//! Endless runner: jump the cacti, score grows with distance.
//!
//! The runner stays at a fixed column while the ground scrolls faster and
//! faster. Holding the jump input right after takeoff gives a slightly
//! higher jump. Physics pauses while the canvas is portrait.

mod draw;
pub mod sprites;
mod state;
mod tick;

pub use sprites::CactusShape;
pub use state::{Bump, Cactus, Cloud, Jumper, ObstacleGroup, Runner};
pub use tick::tick;

use serde::{Deserialize, Serialize};

use crate::platform::{Key, PointerPhase, PointerSample};
use crate::renderer::Frame;
use crate::scores::Scoreboard;
use crate::sim::{Game, GameEvent, RandomSource, RenderView};

/// Runner intents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumperInput {
    /// One-shot: start a jump if grounded
    pub press: bool,
    /// Jump input is still down
    pub held: bool,
}

/// Runner constants; `*_frac` values scale with the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumperTuning {
    /// Canvas height per sprite pixel block
    pub pixel_divisor: f32,
    pub min_pixel: f32,
    pub ground_frac: f32,
    pub min_speed: f32,
    pub speed_frac: f32,
    /// Scroll acceleration (px/s^2)
    pub accel: f32,
    pub min_gravity: f32,
    pub gravity_frac: f32,
    pub min_jump_velocity: f32,
    pub jump_velocity_frac: f32,
    /// Extra upward acceleration while held, as a fraction of gravity
    pub hold_boost: f32,
    /// Longest hold that still boosts (s)
    pub max_hold: f32,
    /// Scroll pixels per distance point
    pub score_divisor: f32,
    /// Spawn interval before the first roll (s)
    pub first_spawn: f32,
}

impl Default for JumperTuning {
    fn default() -> Self {
        Self {
            pixel_divisor: 180.0,
            min_pixel: 2.0,
            ground_frac: 0.78,
            min_speed: 220.0,
            speed_frac: 0.28,
            accel: 10.0,
            min_gravity: 2600.0,
            gravity_frac: 4.4,
            min_jump_velocity: 560.0,
            jump_velocity_frac: 0.95,
            hold_boost: 0.22,
            max_hold: 0.08,
            score_divisor: 90.0,
            first_spawn: 0.9,
        }
    }
}

impl Game for Jumper {
    type Input = JumperInput;
    type Tuning = JumperTuning;

    const NAME: &'static str = "jumper";
    const STORAGE_KEY: &'static str = "jumperBest";

    fn new(width: u32, height: u32, tuning: &JumperTuning, rng: &mut dyn RandomSource) -> Self {
        Jumper::build(width, height, tuning, rng)
    }

    fn tick(
        &mut self,
        input: &JumperInput,
        dt: f32,
        rng: &mut dyn RandomSource,
        scores: &mut Scoreboard,
    ) -> Vec<GameEvent> {
        tick::tick(self, input, dt, rng, scores)
    }

    fn draw(&self, view: &RenderView, frame: &mut Frame) {
        draw::draw(self, view, frame)
    }

    fn pointer(input: &mut JumperInput, sample: PointerSample) {
        match sample.phase {
            PointerPhase::Down => {
                input.press = true;
                input.held = true;
            }
            PointerPhase::Move => {}
            PointerPhase::Up | PointerPhase::Cancel => input.held = false,
        }
    }

    fn key(input: &mut JumperInput, key: Key) {
        if matches!(key, Key::Space | Key::Up) {
            input.press = true;
            input.held = true;
        }
    }

    fn key_up(input: &mut JumperInput, key: Key) {
        if matches!(key, Key::Space | Key::Up) {
            input.held = false;
        }
    }

    fn consume_one_shots(input: &mut JumperInput) {
        input.press = false;
    }

    fn needs_landscape() -> bool {
        true
    }

    fn format_score(score: u64) -> String {
        crate::renderer::font::padded_score(score, 5)
    }
}

/// Jump when the next cactus group is about to reach the runner
pub fn autopilot(world: &Jumper) -> JumperInput {
    let runner = world.runner.bounds();
    let lead = world.speed * 0.16;
    let threat = world
        .obstacles
        .iter()
        .map(|g| g.x - runner.right())
        .filter(|gap| *gap > -runner.w)
        .fold(f32::MAX, f32::min);

    let jump = world.runner.on_ground && threat < lead;
    JumperInput {
        press: jump,
        held: jump || (!world.runner.on_ground && world.runner.vy < 0.0),
    }
}
