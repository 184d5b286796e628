//! Grid game renderer

use glam::Vec2;

use super::state::Snake;
use crate::renderer::colors::{self, with_alpha};
use crate::renderer::font::{self, GLYPH_H};
use crate::renderer::{Align, Frame};
use crate::sim::{Rect, RenderView};

pub fn draw(world: &Snake, view: &RenderView, frame: &mut Frame) {
    let grid = &world.grid;
    let cell = grid.cell;

    frame.clear(colors::BACKGROUND);

    // Border sits just outside the grid
    let line = 4.0f32.max((cell * 0.25).floor());
    let b = grid.bounds;
    frame.stroke_rect(
        &Rect::new(b.x - line, b.y - line, b.w + 2.0 * line, b.h + 2.0 * line),
        line,
        with_alpha(colors::FOREGROUND, 0.6),
    );

    frame.fill_rect(
        &grid.cell_rect(world.food, (cell * 0.22).floor()),
        colors::FOOD,
    );

    let body_inset = (cell * 0.12).floor();
    for segment in &world.body {
        frame.fill_rect(&grid.cell_rect(*segment, body_inset), colors::SNAKE);
    }
    frame.fill_rect(
        &grid.cell_rect(world.head(), (cell * 0.34).floor()),
        colors::FOREGROUND,
    );

    // Score above the field
    let px = 2.0f32.max((cell / 8.0).floor());
    let text_top = b.y - line - px * (GLYPH_H as f32 + 3.0);
    if text_top >= 0.0 {
        frame.text(
            &font::padded_score(view.score, 5),
            Vec2::new(b.x + b.w / 2.0, text_top),
            px,
            Align::Center,
            colors::MUTED,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::snake::SnakeTuning;
    use crate::sim::{Mode, SequenceRng};

    #[test]
    fn test_head_highlight_is_drawn_last() {
        let mut rng = SequenceRng::constant(0.0);
        let world = Snake::build(1280, 720, &SnakeTuning::default(), &mut rng);
        let view = RenderView {
            mode: Mode::Playing,
            score: 0,
            best: 0,
            last: 0,
        };
        let mut frame = Frame::new(1280, 720);
        draw(&world, &view, &mut frame);

        let head = world.grid.cell_rect(world.head(), (world.grid.cell * 0.34).floor());
        let highlight = frame
            .vertices()
            .iter()
            .rev()
            .find(|v| v.color == colors::FOREGROUND)
            .map(|v| v.position);
        assert!(highlight.is_some_and(|[x, y]| {
            x >= head.x && x <= head.right() && y >= head.y && y <= head.bottom()
        }));
    }
}
