//! Pocket Arcade - three canvas arcade games sharing one loop
//!
//! Core modules:
//! - `sim`: Deterministic session driver, modes, collision and RNG
//! - `games`: Paddle, runner and snake worlds (state, tick, draw)
//! - `renderer`: Vertex list builder and WebGPU pipeline
//! - `platform`: Browser input and canvas sizing helpers
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `scores`: Current/last/best score tracking

pub mod assets;
pub mod games;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scores;
pub mod settings;
pub mod sim;

pub use scores::Scoreboard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to a tick (seconds); longer gaps are cut short
    pub const MAX_FRAME_DT: f32 = 0.02;
    /// Smallest canvas edge used for world geometry
    pub const MIN_CANVAS_EDGE: u32 = 64;
}

/// Clamp `v` into `[lo, hi]`, preferring `lo` when the range is empty.
///
/// Unlike `f32::clamp` this never panics, which matters for worlds built on
/// tiny or zero-sized canvases where `hi` can drop below `lo`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_inverted_range_prefers_low() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }
}
