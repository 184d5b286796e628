//! Per-frame draw list
//!
//! Games paint into a `Frame` in canvas pixel coordinates (origin top-left,
//! y down). The frame only collects triangles; presenting them is the
//! pipeline's job, so drawing stays testable without a GPU.

use glam::Vec2;

use super::font::{self, GLYPH_GAP, GLYPH_W};
use super::shapes;
use super::vertex::Vertex;
use crate::sim::Rect;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Triangle list for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    vertices: Vec<Vertex>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            vertices: Vec::with_capacity(1024),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Fill the whole canvas
    pub fn clear(&mut self, color: [f32; 4]) {
        let full = Rect::new(0.0, 0.0, self.width as f32, self.height as f32);
        self.fill_rect(&full, color);
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: [f32; 4]) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        self.vertices.extend_from_slice(&shapes::quad(rect, color));
    }

    pub fn stroke_rect(&mut self, rect: &Rect, line: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::outline(rect, line, color));
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let segments = (radius * 1.5).clamp(12.0, 48.0) as u32;
        self.vertices
            .extend(shapes::circle(center, radius, color, segments));
    }

    pub fn polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::polyline(points, width, color));
    }

    /// Pixel-art map, top-left at `origin`
    pub fn pixels(&mut self, map: &[&str], origin: Vec2, scale: f32, color: [f32; 4]) {
        self.vertices
            .extend(shapes::sprite(map, origin, scale, color));
    }

    /// Digits in the pixel font. `pos.y` is the top of the glyphs.
    pub fn text(&mut self, text: &str, pos: Vec2, px: f32, align: Align, color: [f32; 4]) {
        let width = font::text_width(text.chars().count(), px);
        let mut x = match align {
            Align::Left => pos.x,
            Align::Center => pos.x - width / 2.0,
            Align::Right => pos.x - width,
        };
        for ch in text.chars() {
            if let Some(rows) = font::glyph(ch) {
                self.pixels(rows, Vec2::new(x, pos.y), px, color);
            }
            x += (GLYPH_W + GLYPH_GAP) as f32 * px;
        }
    }

    /// Vertices mapped from canvas pixels to clip space (-1..1, y up)
    pub fn clip_space(&self) -> Vec<Vertex> {
        let w = (self.width.max(1)) as f32;
        let h = (self.height.max(1)) as f32;
        self.vertices
            .iter()
            .map(|v| {
                let x = v.position[0] / w * 2.0 - 1.0;
                let y = 1.0 - v.position[1] / h * 2.0;
                Vertex::new(x, y, v.color)
            })
            .collect()
    }
}
