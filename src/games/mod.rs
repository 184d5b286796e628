//! The three arcade games
//!
//! Each game is a world type implementing [`crate::sim::Game`], with its
//! state, update step and renderer in separate files.

pub mod jumper;
pub mod pong;
pub mod snake;

pub use jumper::Jumper;
pub use pong::Pong;
pub use snake::Snake;

/// Which game a page hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKind {
    Pong,
    Jumper,
    Snake,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Pong, GameKind::Jumper, GameKind::Snake];

    /// Parse the page's game name; unknown names fall back to the paddle game
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "jumper" | "runner" => GameKind::Jumper,
            "snake" | "grid" => GameKind::Snake,
            _ => GameKind::Pong,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameKind::Pong => "pong",
            GameKind::Jumper => "jumper",
            GameKind::Snake => "snake",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_kind_names() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_name(kind.name()), kind);
        }
        assert_eq!(GameKind::from_name(" Snake "), GameKind::Snake);
        assert_eq!(GameKind::from_name("unknown"), GameKind::Pong);
    }
}
