//! Paddle game update step

use super::PongInput;
use super::state::{Paddle, Pong};
use crate::sim::{GameEvent, RandomSource};
use crate::scores::Scoreboard;

/// Advance the paddle game by `dt` seconds
pub fn tick(
    world: &mut Pong,
    input: &PongInput,
    dt: f32,
    rng: &mut dyn RandomSource,
    scores: &mut Scoreboard,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let h = world.height;

    // Player: pointer target wins, arrow keys steer otherwise
    if input.target_y.is_some() {
        world.key_target = None;
    }
    if input.nudge != 0.0 {
        let from = world.key_target.unwrap_or(world.player.rect.center_y());
        let step = input.nudge.signum() * h * world.tuning.key_nudge_frac;
        world.key_target = Some(crate::clamp(from + step, 0.0, h));
    }
    match input.target_y.or(world.key_target) {
        Some(target) => world.player.follow(target, dt, h),
        None => world.player.clamp_to(h),
    }

    // Opponent re-aims on a fixed reaction interval
    let opp = &mut world.opponent;
    opp.react_timer -= dt;
    if opp.react_timer <= 0.0 {
        opp.react_timer = opp.reaction;
        let noise = (rng.next_f32() - 0.5) * opp.paddle.rect.h * world.tuning.opponent_noise;
        opp.aim_y = world.ball.pos.y + noise;
    }
    let aim = opp.aim_y;
    opp.paddle.follow(aim, dt, h);

    // Ball
    let ball = &mut world.ball;
    ball.pos += ball.vel * dt;
    if ball.pos.y - ball.radius <= 0.0 {
        ball.pos.y = ball.radius + 1.0;
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallBounce);
    } else if ball.pos.y + ball.radius >= h {
        ball.pos.y = h - ball.radius - 1.0;
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallBounce);
    }

    if world.ball.vel.x < 0.0 && paddle_hit(&world.player, world) {
        let player = world.player;
        bounce(world, &player, true);
        world.streak += 1;
        scores.set_score(world.streak);
        events.push(GameEvent::PaddleHit { player: true });
    } else if world.ball.vel.x > 0.0 && paddle_hit(&world.opponent.paddle, world) {
        let paddle = world.opponent.paddle;
        bounce(world, &paddle, false);
        events.push(GameEvent::PaddleHit { player: false });
    }

    let ball = world.ball;
    if ball.pos.x + ball.radius < 0.0 {
        events.push(GameEvent::RoundOver);
    } else if ball.pos.x - ball.radius > world.width {
        let reward = world.tuning.miss_reward;
        world.streak += reward;
        scores.set_score(world.streak);
        events.push(GameEvent::Reward(reward));
        world.serve(rng);
        events.push(GameEvent::Served);
    }

    events
}

/// Ball centre inside the paddle grown by the ball radius (edges inclusive)
fn paddle_hit(paddle: &Paddle, world: &Pong) -> bool {
    crate::sim::collision::circle_touches_rect(world.ball.pos, world.ball.radius, &paddle.rect)
}

/// Reflect the ball off `paddle`. The outgoing angle depends on where the
/// ball struck relative to the paddle centre; speed grows slightly with the
/// streak and is preserved when the vertical component gets capped.
fn bounce(world: &mut Pong, paddle: &Paddle, is_player: bool) {
    let t = &world.tuning;
    let ball = &mut world.ball;

    ball.pos.x = if is_player {
        paddle.rect.right() + ball.radius + 1.0
    } else {
        paddle.rect.x - ball.radius - 1.0
    };

    let rel = crate::clamp(
        (ball.pos.y - paddle.rect.center_y()) / (paddle.rect.h / 2.0),
        -1.0,
        1.0,
    );
    let speed = ball.speed();
    let bonus = 1.0 + (world.streak as f32 * 0.01).min(0.35);
    let new_speed = speed * (0.98 + 0.06 * bonus);

    let dir = if is_player { 1.0 } else { -1.0 };
    let angle = rel * t.max_bounce_angle;
    let mut vx = dir * new_speed * angle.cos();
    let mut vy = new_speed * angle.sin();

    let cap = world.height * t.vy_cap_frac;
    if vy.abs() > cap {
        vy = cap.copysign(vy);
        vx = dir * (new_speed * new_speed - cap * cap).max(0.0).sqrt();
    }
    ball.vel.x = vx;
    ball.vel.y = vy;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pong::PongTuning;
    use crate::sim::SequenceRng;
    use glam::Vec2;
    use proptest::prelude::*;

    fn world(w: u32, h: u32) -> (Pong, SequenceRng) {
        let mut rng = SequenceRng::constant(0.5);
        let world = Pong::build(w, h, &PongTuning::default(), &mut rng);
        (world, rng)
    }

    fn scores() -> Scoreboard {
        Scoreboard::in_memory("pongBest")
    }

    #[test]
    fn test_dead_centre_bounce_is_horizontal() {
        let (mut world, mut rng) = world(800, 600);
        let p = world.player.rect;
        world.ball.pos = Vec2::new(p.right() + world.ball.radius - 1.0, p.center_y());
        world.ball.vel = Vec2::new(-300.0, 0.0);
        let mut scores = scores();

        let events = tick(&mut world, &PongInput::default(), 0.0, &mut rng, &mut scores);

        assert!(events.contains(&GameEvent::PaddleHit { player: true }));
        assert!(world.ball.vel.y.abs() < 1e-3);
        assert!(world.ball.vel.x > 0.0);
        assert_eq!(world.ball.pos.x, p.right() + world.ball.radius + 1.0);
        assert_eq!(world.streak, 1);
        assert_eq!(scores.current(), 1);
    }

    #[test]
    fn test_opponent_bounce_sends_ball_left() {
        let (mut world, mut rng) = world(800, 600);
        // Park the opponent so the ball meets its centre
        world.opponent.aim_y = world.opponent.paddle.rect.center_y();
        world.opponent.react_timer = 10.0;
        let p = world.opponent.paddle.rect;
        world.ball.pos = Vec2::new(p.x - world.ball.radius + 1.0, p.center_y() + 10.0);
        world.ball.vel = Vec2::new(300.0, 0.0);
        let mut scores = scores();

        let events = tick(&mut world, &PongInput::default(), 0.0, &mut rng, &mut scores);
        assert!(events.contains(&GameEvent::PaddleHit { player: false }));
        assert!(world.ball.vel.x < 0.0);
        assert!(world.ball.vel.y > 0.0);
        assert_eq!(world.streak, 0);
    }

    #[test]
    fn test_player_miss_ends_round() {
        let (mut world, mut rng) = world(800, 600);
        world.ball.pos = Vec2::new(-20.0, 300.0);
        world.ball.vel = Vec2::new(-300.0, 0.0);
        let events = tick(&mut world, &PongInput::default(), 0.0, &mut rng, &mut scores());
        assert!(events.contains(&GameEvent::RoundOver));
    }

    #[test]
    fn test_opponent_miss_rewards_and_reserves() {
        let (mut world, mut rng) = world(800, 600);
        world.streak = 3;
        world.ball.pos = Vec2::new(830.0, 300.0);
        world.ball.vel = Vec2::new(300.0, 0.0);
        let mut scores = scores();

        let events = tick(&mut world, &PongInput::default(), 0.0, &mut rng, &mut scores);
        assert!(events.contains(&GameEvent::Reward(2)));
        assert!(events.contains(&GameEvent::Served));
        assert_eq!(world.streak, 5);
        assert_eq!(scores.current(), 5);
        assert_eq!(world.ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_wall_reflection() {
        let (mut world, mut rng) = world(800, 600);
        world.ball.pos = Vec2::new(400.0, 3.0);
        world.ball.vel = Vec2::new(100.0, -200.0);
        let events = tick(&mut world, &PongInput::default(), 0.0, &mut rng, &mut scores());
        assert!(events.contains(&GameEvent::WallBounce));
        assert_eq!(world.ball.pos.y, world.ball.radius + 1.0);
        assert_eq!(world.ball.vel.y, 200.0);
    }

    #[test]
    fn test_arrow_keys_move_player() {
        let (mut world, mut rng) = world(800, 600);
        let start = world.player.rect.y;
        let input = PongInput {
            nudge: 1.0,
            ..Default::default()
        };
        tick(&mut world, &input, 0.02, &mut rng, &mut scores());
        assert!(world.key_target.is_some());
        assert!(world.player.rect.y > start);

        // Target persists after the key press is consumed
        let y = world.player.rect.y;
        tick(&mut world, &PongInput::default(), 0.02, &mut rng, &mut scores());
        assert!(world.player.rect.y > y);
    }

    proptest! {
        #[test]
        fn prop_paddles_stay_on_field(target in -5000.0f32..5000.0, dt in 0.0f32..0.02, steps in 1usize..40) {
            let (mut world, mut rng) = world(640, 360);
            let mut scores = scores();
            let input = PongInput { target_y: Some(target), dragging: true, nudge: 0.0 };
            for _ in 0..steps {
                tick(&mut world, &input, dt, &mut rng, &mut scores);
                let h = world.height;
                prop_assert!(world.player.rect.y >= 0.0);
                prop_assert!(world.player.rect.bottom() <= h + 1e-3);
                prop_assert!(world.opponent.paddle.rect.y >= 0.0);
                prop_assert!(world.opponent.paddle.rect.bottom() <= h + 1e-3);
            }
        }

        #[test]
        fn prop_bounce_flips_vx_without_losing_speed(offset in -1.5f32..1.5, vy in -600.0f32..600.0, streak in 0u64..60) {
            let (mut world, _) = world(800, 600);
            world.streak = streak;
            let p = world.player;
            world.ball.pos = Vec2::new(p.rect.right(), p.rect.center_y() + offset * p.rect.h / 2.0);
            world.ball.vel = Vec2::new(-400.0, vy);
            let before = world.ball.speed();

            bounce(&mut world, &p, true);

            prop_assert!(world.ball.vel.x > 0.0);
            prop_assert!(world.ball.speed() >= before - 1e-2);
            prop_assert!(world.ball.vel.y.abs() <= world.height * world.tuning.vy_cap_frac + 1e-2);
        }
    }
}
