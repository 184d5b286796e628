//! Pixel maps for the runner and the cacti ('X' = filled)

use serde::{Deserialize, Serialize};

pub const RUNNER_A: [&str; 15] = [
    "....XXXXXX....",
    "...XXXXXXXX...",
    "..XXXXXXXXXX..",
    "..XXX..XXXXXX.",
    "..XXX..XXXXXX.",
    "..XXXXXXXXXX..",
    "..XXXXXXXX....",
    "...XXXXXX.....",
    "....XXXX......",
    "....XXXX......",
    "....XXXX......",
    "....XXXX......",
    "...XX..XX.....",
    "..XX....XX....",
    "..............",
];

pub const RUNNER_B: [&str; 15] = [
    "....XXXXXX....",
    "...XXXXXXXX...",
    "..XXXXXXXXXX..",
    "..XXX..XXXXXX.",
    "..XXX..XXXXXX.",
    "..XXXXXXXXXX..",
    "..XXXXXXXX....",
    "...XXXXXX.....",
    "....XXXX......",
    "....XXXX......",
    "....XXXX......",
    "....XXXX......",
    "..XX..XX......",
    "...XX..XX.....",
    "..............",
];

pub const CACTUS_SMALL: [&str; 10] = [
    "...XX....",
    "...XX....",
    ".XXXXXX..",
    "...XX....",
    "...XX....",
    "...XX....",
    ".XXXXXX..",
    "...XX....",
    "...XX....",
    "...XX....",
];

pub const CACTUS_BIG: [&str; 12] = [
    "....XX.....",
    "....XX.....",
    "..XXXXXX...",
    "....XX.....",
    "....XX..XX.",
    "....XXXXXX.",
    "....XX..XX.",
    "..XXXXXX...",
    "....XX.....",
    "....XX.....",
    "....XX.....",
    "..XXXXXX...",
];

pub const CACTUS_DOUBLE: [&str; 10] = [
    "....XX......XX....",
    "....XX......XX....",
    "..XXXXXX..XXXXXX..",
    "....XX......XX....",
    "....XX......XX....",
    "....XX......XX....",
    "..XXXXXX..XXXXXX..",
    "....XX......XX....",
    "....XX......XX....",
    "....XX......XX....",
];

/// Runner sprite for a run-cycle frame (0 or 1)
pub fn runner_frame(frame: u8) -> &'static [&'static str] {
    if frame == 0 { &RUNNER_A } else { &RUNNER_B }
}

/// Size of a pixel map in map cells (columns, rows)
pub fn map_size(map: &[&str]) -> (usize, usize) {
    (map.first().map_or(0, |row| row.len()), map.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CactusShape {
    Small,
    Big,
    Double,
}

impl CactusShape {
    /// Pick a shape from a uniform roll: 72% small, 18% big, 10% double
    pub fn from_roll(roll: f32) -> Self {
        if roll > 0.90 {
            CactusShape::Double
        } else if roll > 0.72 {
            CactusShape::Big
        } else {
            CactusShape::Small
        }
    }

    pub fn map(&self) -> &'static [&'static str] {
        match self {
            CactusShape::Small => &CACTUS_SMALL,
            CactusShape::Big => &CACTUS_BIG,
            CactusShape::Double => &CACTUS_DOUBLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_are_rectangular() {
        for map in [
            runner_frame(0),
            runner_frame(1),
            CactusShape::Small.map(),
            CactusShape::Big.map(),
            CactusShape::Double.map(),
        ] {
            let (w, _) = map_size(map);
            assert!(map.iter().all(|row| row.len() == w));
        }
        assert_eq!(map_size(&RUNNER_A), (14, 15));
    }

    #[test]
    fn test_shape_roll_thresholds() {
        assert_eq!(CactusShape::from_roll(0.0), CactusShape::Small);
        assert_eq!(CactusShape::from_roll(0.72), CactusShape::Small);
        assert_eq!(CactusShape::from_roll(0.8), CactusShape::Big);
        assert_eq!(CactusShape::from_roll(0.95), CactusShape::Double);
    }
}
