//! Paddle game: the player defends the left edge against a lagging opponent.
//!
//! Every return adds one to the streak, every opponent miss adds two and
//! re-serves, and the first ball past the player ends the round.

mod draw;
mod state;
mod tick;

pub use state::{Ball, Opponent, Paddle, Pong};
pub use tick::tick;

use serde::{Deserialize, Serialize};

use crate::platform::{Key, PointerPhase, PointerSample};
use crate::renderer::Frame;
use crate::scores::Scoreboard;
use crate::sim::{Game, GameEvent, RandomSource, RenderView};

/// Paddle game intents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PongInput {
    /// Desired paddle centre (canvas px) while a pointer is down
    pub target_y: Option<f32>,
    /// A pointer went down on the canvas and has not been released
    pub dragging: bool,
    /// One-shot arrow key step: -1 up, +1 down
    pub nudge: f32,
}

/// Paddle game constants; sizes are fractions of the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongTuning {
    pub paddle_width_frac: f32,
    pub paddle_min_width: f32,
    pub paddle_height_frac: f32,
    pub paddle_min_height: f32,
    pub ball_radius_frac: f32,
    pub ball_min_radius: f32,
    /// Player paddle speed in canvas heights per second
    pub player_speed_frac: f32,
    pub opponent_speed_frac: f32,
    /// Seconds between opponent re-aims
    pub opponent_reaction: f32,
    /// Aim noise as a fraction of paddle height
    pub opponent_noise: f32,
    /// Serve speed as a fraction of the longer canvas side
    pub serve_speed_frac: f32,
    /// Radians at the paddle tips
    pub max_bounce_angle: f32,
    /// Vertical speed cap in canvas heights per second
    pub vy_cap_frac: f32,
    pub miss_reward: u64,
    pub key_nudge_frac: f32,
}

impl Default for PongTuning {
    fn default() -> Self {
        Self {
            paddle_width_frac: 0.012,
            paddle_min_width: 10.0,
            paddle_height_frac: 0.16,
            paddle_min_height: 70.0,
            ball_radius_frac: 0.012,
            ball_min_radius: 6.0,
            player_speed_frac: 1.1,
            opponent_speed_frac: 0.85,
            opponent_reaction: 0.12,
            opponent_noise: 0.25,
            serve_speed_frac: 0.45,
            max_bounce_angle: 1.05,
            vy_cap_frac: 1.2,
            miss_reward: 2,
            key_nudge_frac: 0.12,
        }
    }
}

impl Game for Pong {
    type Input = PongInput;
    type Tuning = PongTuning;

    const NAME: &'static str = "pong";
    const STORAGE_KEY: &'static str = "pongBest";

    fn new(width: u32, height: u32, tuning: &PongTuning, rng: &mut dyn RandomSource) -> Self {
        Pong::build(width, height, tuning, rng)
    }

    fn tick(
        &mut self,
        input: &PongInput,
        dt: f32,
        rng: &mut dyn RandomSource,
        scores: &mut Scoreboard,
    ) -> Vec<GameEvent> {
        tick::tick(self, input, dt, rng, scores)
    }

    fn draw(&self, view: &RenderView, frame: &mut Frame) {
        draw::draw(self, view, frame)
    }

    fn pointer(input: &mut PongInput, sample: PointerSample) {
        match sample.phase {
            PointerPhase::Down => {
                input.dragging = true;
                input.target_y = Some(sample.pos.y);
            }
            PointerPhase::Move if input.dragging => input.target_y = Some(sample.pos.y),
            PointerPhase::Move => {}
            PointerPhase::Up | PointerPhase::Cancel => {
                input.dragging = false;
                input.target_y = None;
            }
        }
    }

    fn key(input: &mut PongInput, key: Key) {
        match key {
            Key::Up => input.nudge = -1.0,
            Key::Down => input.nudge = 1.0,
            _ => {}
        }
    }

    fn consume_one_shots(input: &mut PongInput) {
        input.nudge = 0.0;
    }

    /// The rally restarts on the new field but the streak carries on
    fn resized(&mut self, previous: &Pong) -> bool {
        self.streak = previous.streak;
        true
    }
}

/// Drag the player paddle to where the ball will cross its face
pub fn autopilot(world: &Pong) -> PongInput {
    let ball = &world.ball;
    let face = world.player.rect.right() + ball.radius;
    let target = if ball.vel.x < 0.0 {
        let t = (ball.pos.x - face) / -ball.vel.x;
        fold(ball.pos.y + ball.vel.y * t, ball.radius, world.height - ball.radius)
    } else {
        world.height / 2.0
    };
    PongInput {
        target_y: Some(target),
        dragging: true,
        nudge: 0.0,
    }
}

/// Mirror `y` back into `[lo, hi]` the way wall bounces would
fn fold(y: f32, lo: f32, hi: f32) -> f32 {
    let span = hi - lo;
    if span <= 0.0 {
        return lo;
    }
    let period = span * 2.0;
    let m = (y - lo).rem_euclid(period);
    if m <= span { lo + m } else { hi - (m - span) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Mode, SequenceRng, Session};
    use glam::Vec2;

    #[test]
    fn test_pointer_drag_sets_target() {
        let mut input = PongInput::default();
        Pong::pointer(&mut input, PointerSample::new(PointerPhase::Move, 0.0, 50.0));
        assert_eq!(input.target_y, None);
        Pong::pointer(&mut input, PointerSample::new(PointerPhase::Down, 0.0, 120.0));
        assert_eq!(input.target_y, Some(120.0));
        Pong::pointer(&mut input, PointerSample::new(PointerPhase::Move, 0.0, 140.0));
        assert_eq!(input.target_y, Some(140.0));
        Pong::pointer(&mut input, PointerSample::new(PointerPhase::Up, 0.0, 140.0));
        assert_eq!(input.target_y, None);
    }

    #[test]
    fn test_fold_mirrors_into_range() {
        assert_eq!(fold(50.0, 0.0, 100.0), 50.0);
        assert_eq!(fold(130.0, 0.0, 100.0), 70.0);
        assert_eq!(fold(-20.0, 0.0, 100.0), 20.0);
    }

    #[test]
    fn test_autopilot_tracks_incoming_ball() {
        let mut rng = SequenceRng::constant(0.5);
        let mut world = Pong::build(800, 600, &PongTuning::default(), &mut rng);
        world.ball.pos = Vec2::new(400.0, 300.0);
        world.ball.vel = Vec2::new(-100.0, 0.0);
        let input = autopilot(&world);
        assert_eq!(input.target_y, Some(300.0));
    }

    #[test]
    fn test_resize_mid_round_keeps_streak() {
        let mut session: Session<Pong> = Session::new(
            800,
            600,
            PongTuning::default(),
            Scoreboard::in_memory(Pong::STORAGE_KEY),
            Box::new(SequenceRng::constant(0.5)),
        );
        session.start();
        session.world_mut().streak = 7;

        session.frame(0.016, 800, 560);
        assert_eq!(session.mode(), Mode::Playing);
        assert_eq!(session.world_size(), (800, 560));
        assert_eq!(session.world().height, 560.0);
        assert_eq!(session.world().streak, 7);
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut session: Session<Pong> = Session::new(
            800,
            600,
            PongTuning::default(),
            Scoreboard::in_memory(Pong::STORAGE_KEY),
            Box::new(crate::sim::GameRng::new(7)),
        );
        session.start();
        for _ in 0..300 {
            let input = autopilot(session.world());
            session.set_input(input);
            session.advance(1.0 / 60.0);
        }
        assert_eq!(session.mode(), Mode::Playing);
    }
}
