//! Grid game: steer a growing snake toward food on a wrap-around board.
//!
//! The snake moves one cell per step at a fixed rate. Swipes and arrow keys
//! queue a heading that takes effect on the next step; reversing straight
//! into the neck is ignored.

mod draw;
mod state;
mod tick;

pub use state::{Cell, Grid, Heading, Snake};
pub use tick::{StepOutcome, step, tick};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::platform::{self, Key, MIN_SWIPE, PointerPhase, PointerSample};
use crate::renderer::Frame;
use crate::scores::Scoreboard;
use crate::sim::{Game, GameEvent, RandomSource, RenderView};

/// Longest gap one frame may feed the step clock (s); a tab waking from a
/// long suspension resumes instead of replaying the missed steps
pub const MAX_CATCH_UP: f32 = 0.25;

/// Grid game intents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnakeInput {
    /// One-shot: heading requested since the last tick
    pub turn: Option<Heading>,
    /// Where the current swipe started (canvas px)
    pub swipe_start: Option<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeTuning {
    pub moves_per_second: f32,
    pub margin_x_frac: f32,
    pub margin_y_frac: f32,
    /// Multiplier on the base cell size
    pub cell_boost: f32,
    pub min_cell: f32,
    pub max_cell: f32,
    /// Fewest columns/rows on tiny canvases
    pub min_cells: i32,
}

impl Default for SnakeTuning {
    fn default() -> Self {
        Self {
            moves_per_second: 8.0,
            margin_x_frac: 0.10,
            margin_y_frac: 0.14,
            cell_boost: 1.35,
            min_cell: 22.0,
            max_cell: 46.0,
            min_cells: 5,
        }
    }
}

impl Game for Snake {
    type Input = SnakeInput;
    type Tuning = SnakeTuning;

    const NAME: &'static str = "snake";
    const STORAGE_KEY: &'static str = "snakeBest";

    fn new(width: u32, height: u32, tuning: &SnakeTuning, rng: &mut dyn RandomSource) -> Self {
        Snake::build(width, height, tuning, rng)
    }

    fn tick(
        &mut self,
        input: &SnakeInput,
        dt: f32,
        rng: &mut dyn RandomSource,
        scores: &mut Scoreboard,
    ) -> Vec<GameEvent> {
        tick::tick(self, input, dt, rng, scores)
    }

    fn draw(&self, view: &RenderView, frame: &mut Frame) {
        draw::draw(self, view, frame)
    }

    fn pointer(input: &mut SnakeInput, sample: PointerSample) {
        match sample.phase {
            PointerPhase::Down => input.swipe_start = Some(sample.pos),
            PointerPhase::Move => {}
            PointerPhase::Up => {
                if let Some(start) = input.swipe_start.take() {
                    if let Some(swipe) = platform::swipe(sample.pos - start, MIN_SWIPE) {
                        input.turn = Some(swipe.into());
                    }
                }
            }
            PointerPhase::Cancel => input.swipe_start = None,
        }
    }

    fn key(input: &mut SnakeInput, key: Key) {
        let heading = match key {
            Key::Up => Heading::Up,
            Key::Down => Heading::Down,
            Key::Left => Heading::Left,
            Key::Right => Heading::Right,
            _ => return,
        };
        input.turn = Some(heading);
    }

    fn consume_one_shots(input: &mut SnakeInput) {
        input.turn = None;
    }

    /// Steps follow wall-clock time, whatever the display rate
    fn max_frame_dt() -> f32 {
        MAX_CATCH_UP
    }

    fn format_score(score: u64) -> String {
        crate::renderer::font::padded_score(score, 5)
    }
}

/// Greedy steering toward the food that avoids stepping into the body
pub fn autopilot(world: &Snake) -> SnakeInput {
    let head = world.head();
    let grid = &world.grid;
    let candidates = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    let distance = |cell: Cell| {
        let dx = (cell.x - world.food.x).abs();
        let dy = (cell.y - world.food.y).abs();
        dx.min(grid.cols - dx) + dy.min(grid.rows - dy)
    };

    let best = candidates
        .iter()
        .copied()
        .filter(|h| *h != world.heading.opposite())
        .map(|h| (h, grid.wrap_step(head, h)))
        .filter(|(_, next)| {
            *next == world.food
                || !world.occupies(*next)
                || Some(*next) == world.body.front().copied()
        })
        .min_by_key(|(_, next)| distance(*next))
        .map(|(h, _)| h);

    SnakeInput {
        turn: best,
        swipe_start: None,
    }
}
