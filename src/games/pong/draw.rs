//! Paddle game renderer

use glam::Vec2;

use super::state::Pong;
use crate::renderer::colors::{self, with_alpha};
use crate::renderer::{Align, Frame};
use crate::sim::{Mode, Rect, RenderView};

pub fn draw(world: &Pong, view: &RenderView, frame: &mut Frame) {
    let w = world.width;
    let h = world.height;

    frame.clear(colors::BACKGROUND);

    // Top and bottom borders
    let border = 3.0f32.max((h * 0.006).floor());
    let border_color = with_alpha(colors::FOREGROUND, 0.65);
    frame.fill_rect(&Rect::new(0.0, 0.0, w, border), border_color);
    frame.fill_rect(&Rect::new(0.0, h - border, w, border), border_color);

    // Dashed centre line
    let dash = 10.0f32.max((h * 0.03).floor());
    let dash_color = with_alpha(colors::WHITE, 0.25);
    let mut y = 0.0;
    while y < h {
        frame.fill_rect(&Rect::new(w / 2.0 - 2.0, y, 4.0, dash), dash_color);
        y += dash * 2.0;
    }

    frame.fill_rect(&world.player.rect, colors::FOREGROUND);
    frame.fill_rect(&world.opponent.paddle.rect, colors::FOREGROUND);
    frame.fill_circle(world.ball.pos, world.ball.radius, colors::FOREGROUND);

    if view.mode == Mode::Playing {
        let px = 2.0f32.max((h / 120.0).floor());
        frame.text(
            &view.score.to_string(),
            Vec2::new(w / 2.0, border + px * 4.0),
            px,
            Align::Center,
            with_alpha(colors::MUTED, 0.8),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::pong::PongTuning;
    use crate::sim::SequenceRng;

    fn view(mode: Mode) -> RenderView {
        RenderView {
            mode,
            score: 12,
            best: 30,
            last: 0,
        }
    }

    #[test]
    fn test_draw_does_not_touch_world() {
        let mut rng = SequenceRng::constant(0.5);
        let world = Pong::build(640, 360, &PongTuning::default(), &mut rng);
        let before = world.ball;
        let mut frame = Frame::new(640, 360);
        draw(&world, &view(Mode::Menu), &mut frame);
        assert_eq!(world.ball, before);
        assert!(!frame.is_empty());
    }

    #[test]
    fn test_hud_only_while_playing() {
        let mut rng = SequenceRng::constant(0.5);
        let world = Pong::build(640, 360, &PongTuning::default(), &mut rng);

        let mut menu = Frame::new(640, 360);
        draw(&world, &view(Mode::Menu), &mut menu);
        let mut playing = Frame::new(640, 360);
        draw(&world, &view(Mode::Playing), &mut playing);

        assert!(playing.vertices().len() > menu.vertices().len());
    }
}
