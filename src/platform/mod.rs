//! Platform abstraction layer
//!
//! Plain data types for browser input plus the canvas sizing math, kept free
//! of `web_sys` so the games and their tests never see the DOM. The wasm
//! entry point converts DOM events into these types.

use glam::Vec2;

/// Minimum travel (canvas px) before a press-release counts as a swipe
pub const MIN_SWIPE: f32 = 18.0;

/// Stage of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer event in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub phase: PointerPhase,
    pub pos: Vec2,
}

impl PointerSample {
    pub fn new(phase: PointerPhase, x: f32, y: f32) -> Self {
        Self {
            phase,
            pos: Vec2::new(x, y),
        }
    }
}

/// Keys the games react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Key::Up),
            "ArrowDown" | "s" | "S" => Some(Key::Down),
            "ArrowLeft" | "a" | "A" => Some(Key::Left),
            "ArrowRight" | "d" | "D" => Some(Key::Right),
            " " | "Spacebar" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            _ => None,
        }
    }

    /// Keys that start a round from the overlay
    pub fn starts_round(&self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// Dominant direction of a finished drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
    Up,
    Down,
}

/// Classify a drag by its dominant axis; short drags are ignored
pub fn swipe(delta: Vec2, min_distance: f32) -> Option<Swipe> {
    let (adx, ady) = (delta.x.abs(), delta.y.abs());
    if adx.max(ady) < min_distance {
        return None;
    }
    if adx > ady {
        Some(if delta.x > 0.0 { Swipe::Right } else { Swipe::Left })
    } else {
        Some(if delta.y > 0.0 { Swipe::Down } else { Swipe::Up })
    }
}

/// Backing-store size for a canvas displayed at `css_w` x `css_h`.
///
/// The device pixel ratio is floored and never below 1, which keeps the
/// games' pixel-art scale integral.
pub fn canvas_pixel_size(css_w: f64, css_h: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let dpr = device_pixel_ratio.floor().max(1.0);
    let w = (css_w.max(0.0) * dpr).floor() as u32;
    let h = (css_h.max(0.0) * dpr).floor() as u32;
    (w, h)
}

/// Inline `display` value for the rotate-device hint
pub fn rotate_hint_display(suspended: bool) -> &'static str {
    if suspended { "flex" } else { "none" }
}

/// Map a client-space point into canvas pixels through the canvas rect
pub fn client_to_canvas(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    canvas_size: (u32, u32),
) -> Vec2 {
    let unit = Vec2::new(
        if rect_size.x > 0.0 { (client.x - rect_origin.x) / rect_size.x } else { 0.0 },
        if rect_size.y > 0.0 { (client.y - rect_origin.y) / rect_size.y } else { 0.0 },
    );
    Vec2::new(unit.x * canvas_size.0 as f32, unit.y * canvas_size.1 as f32)
}
