//! Runner game renderer

use glam::Vec2;

use super::sprites;
use super::state::{Cloud, Jumper};
use crate::renderer::colors::{self, with_alpha};
use crate::renderer::font::{self, GLYPH_H};
use crate::renderer::shapes::cubic_bezier;
use crate::renderer::{Align, Frame};
use crate::sim::{Rect, RenderView};

/// Digits in the distance counter
const SCORE_DIGITS: usize = 5;
/// Points sampled per cloud curve
const CLOUD_SEGMENTS: usize = 10;

pub fn draw(world: &Jumper, view: &RenderView, frame: &mut Frame) {
    let w = world.width;
    let h = world.height;
    let px = world.px;

    frame.clear(colors::BACKGROUND);

    // Distance counter, top-right
    let text_px = 2.0f32.max((h * 0.045 / GLYPH_H as f32).floor());
    let margin = (h * 0.025).floor().max(12.0);
    frame.text(
        &font::padded_score(view.score, SCORE_DIGITS),
        Vec2::new(w - margin, margin),
        text_px,
        Align::Right,
        with_alpha(colors::FOREGROUND, 0.9),
    );

    for cloud in &world.clouds {
        draw_cloud(world, cloud, frame);
    }

    // Ground line and texture
    frame.fill_rect(
        &Rect::new(0.0, world.ground_y, w, world.ground_thickness),
        with_alpha(colors::FOREGROUND, 0.75),
    );
    draw_ground_dots(world, frame);

    let bump_color = with_alpha(colors::FOREGROUND, 0.35);
    for bump in &world.bumps {
        frame.fill_rect(
            &Rect::new(bump.x, world.ground_y - bump.h, bump.w, px),
            bump_color,
        );
    }

    for group in &world.obstacles {
        for cactus in &group.cacti {
            let origin = Vec2::new((group.x + cactus.dx).floor(), cactus.y.floor());
            frame.pixels(cactus.shape.map(), origin, cactus.scale, colors::FOREGROUND);
        }
    }

    let runner = &world.runner;
    let bounds = runner.bounds();
    frame.pixels(
        sprites::runner_frame(runner.frame),
        Vec2::new(bounds.x.floor(), bounds.y.floor()),
        runner.scale,
        colors::FOREGROUND,
    );
}

/// Two-hump outline made of cubic curves, drawn as a thick line
fn draw_cloud(world: &Jumper, cloud: &Cloud, frame: &mut Frame) {
    let (x, y) = (cloud.x, cloud.y);
    let cw = 40.0 * cloud.scale;
    let ch = 16.0 * cloud.scale;
    let humps = [
        [
            Vec2::new(x, y),
            Vec2::new(x + cw * 0.2, y - ch),
            Vec2::new(x + cw * 0.55, y - ch),
            Vec2::new(x + cw * 0.62, y),
        ],
        [
            Vec2::new(x + cw * 0.62, y),
            Vec2::new(x + cw * 0.7, y - ch * 0.3),
            Vec2::new(x + cw, y - ch * 0.3),
            Vec2::new(x + cw, y),
        ],
    ];

    let mut points = Vec::with_capacity(CLOUD_SEGMENTS * 2 + 1);
    for (i, [p0, p1, p2, p3]) in humps.iter().enumerate() {
        let start = if i == 0 { 0 } else { 1 };
        for s in start..=CLOUD_SEGMENTS {
            let t = s as f32 / CLOUD_SEGMENTS as f32;
            points.push(cubic_bezier(*p0, *p1, *p2, *p3, t));
        }
    }

    let line = 2.0f32.max((world.px * 0.8).floor());
    frame.polyline(&points, line, with_alpha(colors::FOREGROUND, 0.28));
}

/// Sparse dots under the ground line. They scroll with the ground and are
/// chosen by a hash of the column so they stay put between frames.
fn draw_ground_dots(world: &Jumper, frame: &mut Frame) {
    let px = world.px;
    let step = px * 6.0;
    let dot_y = world.ground_y + world.ground_thickness + px * 2.0;
    let color = with_alpha(colors::FOREGROUND, 0.18);

    let first = (world.scroll / step).floor() as i64;
    let offset = world.scroll - first as f32 * step;
    let columns = (world.width / step).ceil() as i64 + 1;
    for i in 0..columns {
        let hash = column_hash(first + i);
        if hash % 100 >= 35 {
            continue;
        }
        let jitter = ((hash >> 8) % 3) as f32 * px * 0.5;
        let x = i as f32 * step - offset;
        frame.fill_rect(&Rect::new(x, dot_y + jitter, px, px), color);
    }
}

fn column_hash(column: i64) -> u64 {
    let mut x = column as u64 ^ 0x9e37_79b9_7f4a_7c15;
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
