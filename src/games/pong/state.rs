//! Paddle game world
//!
//! The world is sized for one canvas. A resize throws it away and builds a
//! new one, so nothing here ever rescales.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::PongTuning;
use crate::sim::{RandomSource, Rect};

/// A paddle: its box plus how fast it may move (px/s)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    pub speed: f32,
}

impl Paddle {
    /// Move the paddle centre toward `target_center` by at most `speed * dt`,
    /// then keep it inside `[0, field_height - h]`
    pub fn follow(&mut self, target_center: f32, dt: f32, field_height: f32) {
        let target = target_center - self.rect.h / 2.0;
        let max_step = self.speed * dt;
        self.rect.y += crate::clamp(target - self.rect.y, -max_step, max_step);
        self.clamp_to(field_height);
    }

    pub fn clamp_to(&mut self, field_height: f32) {
        self.rect.y = crate::clamp(self.rect.y, 0.0, field_height - self.rect.h);
    }
}

/// Opponent paddle state: lagged aim with noise
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub paddle: Paddle,
    /// Seconds between re-aims
    pub reaction: f32,
    pub react_timer: f32,
    /// Where the opponent wants its centre to be
    pub aim_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Complete paddle game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pong {
    pub width: f32,
    pub height: f32,
    pub player: Paddle,
    pub opponent: Opponent,
    pub ball: Ball,
    /// Consecutive returns plus rewards for opponent misses
    pub streak: u64,
    /// Paddle target set by arrow keys, used while no pointer is down
    pub key_target: Option<f32>,
    pub tuning: PongTuning,
}

impl Pong {
    pub fn build(width: u32, height: u32, tuning: &PongTuning, rng: &mut dyn RandomSource) -> Self {
        let w = width as f32;
        let h = height as f32;
        let t = tuning;

        let paddle_w = t.paddle_min_width.max((w * t.paddle_width_frac).floor());
        let paddle_h = t.paddle_min_height.max((h * t.paddle_height_frac).floor());
        let radius = t.ball_min_radius.max((w.min(h) * t.ball_radius_frac).floor());
        let paddle_y = (h * 0.5 - paddle_h * 0.5).floor();

        let player = Paddle {
            rect: Rect::new((w * 0.06).floor(), paddle_y, paddle_w, paddle_h),
            speed: h * t.player_speed_frac,
        };
        let opponent = Opponent {
            paddle: Paddle {
                rect: Rect::new((w * 0.94 - paddle_w).floor(), paddle_y, paddle_w, paddle_h),
                speed: h * t.opponent_speed_frac,
            },
            reaction: t.opponent_reaction,
            react_timer: 0.0,
            aim_y: h * 0.5,
        };

        let mut world = Self {
            width: w,
            height: h,
            player,
            opponent,
            ball: Ball {
                pos: Vec2::new(w * 0.5, h * 0.5),
                vel: Vec2::ZERO,
                radius,
            },
            streak: 0,
            key_target: None,
            tuning: tuning.clone(),
        };
        world.serve(rng);
        world
    }

    /// Put the ball at the centre with a random direction and angle
    pub fn serve(&mut self, rng: &mut dyn RandomSource) {
        self.ball.pos = Vec2::new(self.width * 0.5, self.height * 0.5);
        let dir = rng.sign();
        let base = self.width.max(self.height) * self.tuning.serve_speed_frac;
        let angle = rng.range(-0.4, 0.4);
        let factor = rng.range(0.9, 1.1);
        self.ball.vel = Vec2::new(dir * base * factor, base * angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SequenceRng;

    #[test]
    fn test_build_dimensions() {
        let mut rng = SequenceRng::constant(0.5);
        let world = Pong::build(1000, 500, &PongTuning::default(), &mut rng);

        assert_eq!(world.player.rect.w, 12.0);
        assert_eq!(world.player.rect.h, 80.0);
        assert_eq!(world.ball.radius, 6.0);
        assert_eq!(world.player.rect.x, 60.0);
        assert_eq!(world.opponent.paddle.rect.x, 928.0);
        assert_eq!(world.player.rect.y, 210.0);
        assert_eq!(world.opponent.paddle.rect.y, 210.0);
    }

    #[test]
    fn test_small_canvas_uses_minimums() {
        let mut rng = SequenceRng::constant(0.5);
        let world = Pong::build(200, 100, &PongTuning::default(), &mut rng);
        assert_eq!(world.player.rect.w, 10.0);
        assert_eq!(world.player.rect.h, 70.0);
        assert_eq!(world.ball.radius, 6.0);
    }

    #[test]
    fn test_serve_direction_and_speed() {
        // sign: 0.2 -> left; angle: 0.5 -> 0; factor: 0.5 -> 1.0
        let mut rng = SequenceRng::new(vec![0.2, 0.5, 0.5]);
        let world = Pong::build(1000, 500, &PongTuning::default(), &mut rng);
        assert!((world.ball.vel.x + 450.0).abs() < 1e-3);
        assert!(world.ball.vel.y.abs() < 1e-3);
        assert_eq!(world.ball.pos, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_follow_is_rate_limited() {
        let mut paddle = Paddle {
            rect: Rect::new(0.0, 100.0, 10.0, 50.0),
            speed: 100.0,
        };
        paddle.follow(400.0, 0.1, 500.0);
        assert!((paddle.rect.y - 110.0).abs() < 1e-4);
    }
}
