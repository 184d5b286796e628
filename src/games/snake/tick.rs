//! Grid game update: fixed-rate steps driven by an accumulator

use super::SnakeInput;
use super::state::Snake;
use crate::scores::Scoreboard;
use crate::sim::{GameEvent, RandomSource};

/// What a single grid step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    /// Head ran into the body, or the board filled up
    Crashed,
}

/// Most steps one tick may run; leftover time beyond them is dropped
pub const MAX_STEPS_PER_TICK: u32 = 4;

/// Advance the grid game by `dt` seconds, running as many whole steps as fit
pub fn tick(
    world: &mut Snake,
    input: &SnakeInput,
    dt: f32,
    rng: &mut dyn RandomSource,
    scores: &mut Scoreboard,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if let Some(turn) = input.turn {
        world.queued = turn;
    }

    let interval = world.step_interval();
    world.accumulator += dt;
    let mut steps = 0;
    while world.accumulator >= interval {
        if steps == MAX_STEPS_PER_TICK {
            world.accumulator %= interval;
            break;
        }
        steps += 1;
        world.accumulator -= interval;
        match step(world, rng) {
            StepOutcome::Moved => {}
            StepOutcome::Ate => {
                scores.set_score(world.score);
                events.push(GameEvent::FoodEaten);
            }
            StepOutcome::Crashed => {
                events.push(GameEvent::RoundOver);
                break;
            }
        }
    }
    events
}

/// Move the snake one cell
pub fn step(world: &mut Snake, rng: &mut dyn RandomSource) -> StepOutcome {
    if world.queued != world.heading.opposite() {
        world.heading = world.queued;
    }

    let next = world.grid.wrap_step(world.head(), world.heading);
    let will_eat = next == world.food;
    let tail = world.body.front().copied();

    // The tail moves out of the way unless the snake grows this step
    let hit = world
        .body
        .iter()
        .any(|c| *c == next && (will_eat || Some(*c) != tail));
    if hit {
        return StepOutcome::Crashed;
    }

    world.body.push_back(next);
    if !will_eat {
        world.body.pop_front();
        return StepOutcome::Moved;
    }

    world.score += 1;
    match world.free_cell(rng) {
        Some(food) => {
            world.food = food;
            StepOutcome::Ate
        }
        None => {
            log::debug!("board full at length {}", world.body.len());
            StepOutcome::Crashed
        }
    }
}
