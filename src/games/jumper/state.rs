//! Runner game world

use serde::{Deserialize, Serialize};

use super::JumperTuning;
use super::sprites::{self, CactusShape};
use crate::sim::{RandomSource, Rect};

/// The runner. `y` is the feet line; the sprite extends upward from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Runner {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub on_ground: bool,
    /// Seconds the current jump has been extended by holding
    pub hold_time: f32,
    pub anim_time: f32,
    /// Run-cycle frame, 0 or 1
    pub frame: u8,
    /// Canvas pixels per sprite cell
    pub scale: f32,
}

impl Runner {
    /// Collision box: sprite-sized, standing on `y`
    pub fn bounds(&self) -> Rect {
        let (cols, rows) = sprites::map_size(sprites::runner_frame(self.frame));
        let w = cols as f32 * self.scale;
        let h = rows as f32 * self.scale;
        Rect::new(self.x, self.y - h, w, h)
    }
}

/// One cactus, positioned relative to its group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cactus {
    /// Horizontal offset from the group's left edge
    pub dx: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub shape: CactusShape,
    pub scale: f32,
}

/// Cacti that spawn together and scroll as one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleGroup {
    pub x: f32,
    pub cacti: Vec<Cactus>,
    /// Total width including gaps
    pub width: f32,
}

impl ObstacleGroup {
    /// Single-box group, mostly for scenarios and tests
    pub fn single(rect: Rect) -> Self {
        Self {
            x: rect.x,
            cacti: vec![Cactus {
                dx: 0.0,
                y: rect.y,
                w: rect.w,
                h: rect.h,
                shape: CactusShape::Small,
                scale: 1.0,
            }],
            width: rect.w,
        }
    }

    /// World-space box of every cactus
    pub fn boxes(&self) -> impl Iterator<Item = Rect> + '_ {
        self.cacti
            .iter()
            .map(move |c| Rect::new(self.x + c.dx, c.y, c.w, c.h))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// Low ground ridge, decoration only
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bump {
    pub x: f32,
    pub w: f32,
    pub h: f32,
}

/// Complete runner game world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jumper {
    pub width: f32,
    pub height: f32,
    /// Pixel block size for sprites and ground details
    pub px: f32,
    pub ground_y: f32,
    pub ground_thickness: f32,

    /// Scroll speed (px/s)
    pub speed: f32,
    pub accel: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub hold_boost: f32,
    pub max_hold: f32,

    pub runner: Runner,
    pub obstacles: Vec<ObstacleGroup>,
    pub spawn_timer: f32,
    pub next_spawn: f32,

    pub clouds: Vec<Cloud>,
    pub cloud_timer: f32,
    pub bumps: Vec<Bump>,
    pub bump_timer: f32,

    /// Survival distance; the score is its floor
    pub distance: f32,
    /// Ground scrolled so far (px), for the ground texture
    pub scroll: f32,
    pub tuning: JumperTuning,
}

impl Jumper {
    pub fn build(
        width: u32,
        height: u32,
        tuning: &JumperTuning,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let w = width as f32;
        let h = height as f32;
        let t = tuning;
        let px = t.min_pixel.max((h / t.pixel_divisor).floor());
        let ground_y = (h * t.ground_frac).floor();

        let mut world = Self {
            width: w,
            height: h,
            px,
            ground_y,
            ground_thickness: (px * 2.0).max((h * 0.012).floor()),
            speed: t.min_speed.max(w * t.speed_frac),
            accel: t.accel,
            gravity: t.min_gravity.max(h * t.gravity_frac),
            jump_velocity: t.min_jump_velocity.max(h * t.jump_velocity_frac),
            hold_boost: t.hold_boost,
            max_hold: t.max_hold,
            runner: Runner {
                x: (w * 0.14).floor(),
                y: ground_y,
                vy: 0.0,
                on_ground: true,
                hold_time: 0.0,
                anim_time: 0.0,
                frame: 0,
                scale: px,
            },
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_spawn: t.first_spawn,
            clouds: Vec::new(),
            cloud_timer: 0.0,
            bumps: Vec::new(),
            bump_timer: 0.0,
            distance: 0.0,
            scroll: 0.0,
            tuning: tuning.clone(),
        };
        for _ in 0..3 {
            world.spawn_cloud(true, rng);
        }
        world
    }

    pub fn spawn_cloud(&mut self, initial: bool, rng: &mut dyn RandomSource) {
        let y = (self.height * rng.range(0.18, 0.43)).floor();
        let scale = rng.range(0.6, 1.7);
        let x = if initial {
            rng.range(0.0, self.width)
        } else {
            self.width + rng.range(80.0, 200.0)
        };
        self.clouds.push(Cloud { x, y, scale });
    }

    pub fn spawn_bump(&mut self, rng: &mut dyn RandomSource) {
        let x = self.width + rng.range(40.0, 180.0);
        let w = rng.range(22.0, 62.0);
        let h = rng.range(4.0, 14.0);
        self.bumps.push(Bump { x, w, h });
    }

    /// Add a group of 1-4 cacti just off the right edge and roll the next
    /// spawn interval. Returns the group size.
    pub fn spawn_obstacles(&mut self, rng: &mut dyn RandomSource) -> usize {
        let count_roll = rng.next_f32();
        let count = if count_roll < 0.60 {
            1
        } else if count_roll < 0.82 {
            2
        } else if count_roll < 0.94 {
            3
        } else {
            4
        };

        let gap = (self.px * 2.0).max((self.width * 0.006).floor());
        let mut cacti = Vec::with_capacity(count);
        let mut dx = 0.0;
        for _ in 0..count {
            let shape = CactusShape::from_roll(rng.next_f32());
            let scale = 1.0f32.max((self.px * rng.range(0.85, 1.40)).floor());
            let (cols, rows) = sprites::map_size(shape.map());
            let w = cols as f32 * scale;
            let h = rows as f32 * scale;
            cacti.push(Cactus {
                dx,
                y: self.ground_y - h,
                w,
                h,
                shape,
                scale,
            });
            dx += w + gap;
        }

        self.obstacles.push(ObstacleGroup {
            x: self.width + 30.0,
            cacti,
            width: dx,
        });

        // Slow starts get longer gaps
        let speed_factor = crate::clamp(520.0 / self.speed, 0.65, 1.25);
        self.next_spawn = crate::clamp(rng.range(0.85, 1.55) * speed_factor, 0.55, 1.8);
        self.spawn_timer = 0.0;
        count
    }

    pub fn score(&self) -> u64 {
        self.distance.max(0.0).floor() as u64
    }
}
