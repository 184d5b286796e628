//! Runner game update step

use super::JumperInput;
use super::state::Jumper;
use crate::scores::Scoreboard;
use crate::sim::{GameEvent, RandomSource};

/// Advance the runner game by `dt` seconds
pub fn tick(
    world: &mut Jumper,
    input: &JumperInput,
    dt: f32,
    rng: &mut dyn RandomSource,
    scores: &mut Scoreboard,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.press && world.runner.on_ground {
        let r = &mut world.runner;
        r.on_ground = false;
        r.vy = -world.jump_velocity;
        r.hold_time = 0.0;
        events.push(GameEvent::Jumped);
    }

    // Speed ramps, score follows distance
    world.speed += world.accel * dt;
    world.distance += dt * world.speed / world.tuning.score_divisor;
    world.scroll += world.speed * dt;
    scores.set_score(world.score());

    // Decorations
    world.cloud_timer += dt;
    if world.cloud_timer > 1.25 {
        world.cloud_timer = 0.0;
        if rng.chance(0.75) {
            world.spawn_cloud(false, rng);
        }
    }
    let cloud_speed = world.speed * 0.18;
    for cloud in &mut world.clouds {
        cloud.x -= cloud_speed * dt;
    }
    world.clouds.retain(|c| c.x > -200.0);

    world.bump_timer += dt;
    if world.bump_timer > 0.55 {
        world.bump_timer = 0.0;
        if rng.chance(0.9) {
            world.spawn_bump(rng);
        }
    }
    let speed = world.speed;
    for bump in &mut world.bumps {
        bump.x -= speed * dt;
    }
    world.bumps.retain(|b| b.x + b.w > -80.0);

    // Obstacles
    world.spawn_timer += dt;
    if world.obstacles.is_empty() && world.spawn_timer > 0.35 {
        let count = world.spawn_obstacles(rng);
        events.push(GameEvent::ObstacleSpawned { count });
    }
    if world.spawn_timer >= world.next_spawn {
        let count = world.spawn_obstacles(rng);
        events.push(GameEvent::ObstacleSpawned { count });
    }
    for group in &mut world.obstacles {
        group.x -= speed * dt;
    }
    world.obstacles.retain(|g| g.x + g.width > -120.0);

    // Runner
    let r = &mut world.runner;
    if r.on_ground {
        r.anim_time += dt;
        let step_rate = crate::clamp(speed / 520.0, 0.8, 1.8);
        if r.anim_time > 0.14 / step_rate {
            r.anim_time = 0.0;
            r.frame = 1 - r.frame;
        }
    } else {
        r.frame = 0;
    }

    if input.held && !r.on_ground && r.hold_time < world.max_hold && r.vy < 0.0 {
        r.vy -= world.gravity * world.hold_boost * dt;
        r.hold_time += dt;
    }

    r.vy += world.gravity * dt;
    r.y += r.vy * dt;
    if r.y >= world.ground_y {
        r.y = world.ground_y;
        r.vy = 0.0;
        r.on_ground = true;
    }

    let runner_box = world.runner.bounds();
    if world
        .obstacles
        .iter()
        .flat_map(|g| g.boxes())
        .any(|b| b.intersects(&runner_box))
    {
        events.push(GameEvent::RoundOver);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::jumper::JumperTuning;
    use crate::games::jumper::state::ObstacleGroup;
    use crate::sim::{Rect, SequenceRng};
    use proptest::prelude::*;

    fn world() -> (Jumper, SequenceRng) {
        let mut rng = SequenceRng::constant(0.5);
        let world = Jumper::build(1280, 720, &JumperTuning::default(), &mut rng);
        (world, rng)
    }

    fn scores() -> Scoreboard {
        Scoreboard::in_memory("jumperBest")
    }

    fn press() -> JumperInput {
        JumperInput {
            press: true,
            held: true,
        }
    }

    #[test]
    fn test_jump_only_from_ground() {
        let (mut world, mut rng) = world();
        let events = tick(&mut world, &press(), 0.01, &mut rng, &mut scores());
        assert!(events.contains(&GameEvent::Jumped));
        assert!(!world.runner.on_ground);
        assert!(world.runner.y < world.ground_y);

        // Second press mid-air does nothing
        let vy = world.runner.vy;
        let events = tick(&mut world, &press(), 0.01, &mut rng, &mut scores());
        assert!(!events.contains(&GameEvent::Jumped));
        assert!(world.runner.vy > vy - world.gravity * world.hold_boost * 0.01 - 1e-3);
    }

    #[test]
    fn test_holding_extends_jump() {
        let (mut short, mut rng_a) = world();
        let (mut long, mut rng_b) = world();
        let release = JumperInput::default();
        let hold = JumperInput {
            press: false,
            held: true,
        };

        tick(&mut short, &press(), 0.01, &mut rng_a, &mut scores());
        tick(&mut long, &press(), 0.01, &mut rng_b, &mut scores());
        for _ in 0..10 {
            tick(&mut short, &release, 0.01, &mut rng_a, &mut scores());
            tick(&mut long, &hold, 0.01, &mut rng_b, &mut scores());
        }
        assert!(long.runner.y < short.runner.y);
        assert!(long.runner.hold_time <= long.max_hold + 0.011);
    }

    #[test]
    fn test_runner_lands_on_ground() {
        let (mut world, mut rng) = world();
        tick(&mut world, &press(), 0.02, &mut rng, &mut scores());
        for _ in 0..200 {
            tick(&mut world, &JumperInput::default(), 0.02, &mut rng, &mut scores());
        }
        assert!(world.runner.on_ground);
        assert_eq!(world.runner.y, world.ground_y);
        assert_eq!(world.runner.vy, 0.0);
    }

    #[test]
    fn test_score_tracks_distance() {
        let (mut world, mut rng) = world();
        let mut scores = scores();
        world.distance = 41.99;
        tick(&mut world, &JumperInput::default(), 0.02, &mut rng, &mut scores);
        assert_eq!(scores.current(), 42);
        assert!(world.speed > 358.0);
    }

    #[test]
    fn test_first_group_after_short_delay() {
        let (mut world, mut rng) = world();
        let mut spawned = 0;
        for _ in 0..17 {
            let events = tick(&mut world, &JumperInput::default(), 0.02, &mut rng, &mut scores());
            spawned += events
                .iter()
                .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
                .count();
        }
        assert_eq!(spawned, 0);
        let events = tick(&mut world, &JumperInput::default(), 0.02, &mut rng, &mut scores());
        assert!(events.contains(&GameEvent::ObstacleSpawned { count: 1 }));
        assert_eq!(world.obstacles.len(), 1);
        assert_eq!(world.spawn_timer, 0.0);
    }

    #[test]
    fn test_offscreen_groups_are_dropped() {
        let (mut world, mut rng) = world();
        world.obstacles.push(ObstacleGroup::single(Rect::new(-130.0, 500.0, 5.0, 20.0)));
        world.obstacles.push(ObstacleGroup::single(Rect::new(900.0, 500.0, 20.0, 20.0)));
        tick(&mut world, &JumperInput::default(), 0.001, &mut rng, &mut scores());
        assert_eq!(world.obstacles.len(), 1);
        assert!(world.obstacles[0].x > 890.0);
    }

    #[test]
    fn test_collision_ends_round() {
        let (mut world, mut rng) = world();
        world.runner.x = 90.0;
        world
            .obstacles
            .push(ObstacleGroup::single(Rect::new(100.0, 500.0, 20.0, 40.0)));
        let events = tick(&mut world, &JumperInput::default(), 0.001, &mut rng, &mut scores());
        assert!(events.contains(&GameEvent::RoundOver));
    }

    #[test]
    fn test_clearing_the_cactus_is_safe() {
        let (mut world, mut rng) = world();
        world.runner.y = 300.0;
        world.runner.on_ground = false;
        world
            .obstacles
            .push(ObstacleGroup::single(Rect::new(180.0, 521.0, 20.0, 40.0)));
        let events = tick(&mut world, &JumperInput::default(), 0.001, &mut rng, &mut scores());
        assert!(!events.contains(&GameEvent::RoundOver));
    }

    proptest! {
        #[test]
        fn prop_runner_never_below_ground(
            presses in proptest::collection::vec(any::<bool>(), 1..120),
            dt in 0.0f32..0.02,
        ) {
            let (mut world, mut rng) = world();
            let mut scores = scores();
            for p in presses {
                let input = JumperInput { press: p, held: p };
                tick(&mut world, &input, dt, &mut rng, &mut scores);
                prop_assert!(world.runner.y <= world.ground_y);
            }
        }
    }
}
