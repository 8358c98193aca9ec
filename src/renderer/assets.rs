//! Sprite catalog
//!
//! Image decoding happens outside the core. The loader reports which
//! sprites it managed to load (and their pixel sizes); anything missing is
//! drawn as a solid-colour placeholder instead. A missing asset is a normal
//! condition, never an error.

use std::collections::HashMap;

use super::commands::Color;

/// Every sprite the game knows how to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Background,
    Wall,
    BarLeft,
    BarMiddle,
    BarRight,
    Ground,
    PlayerIdle,
    PlayerWalk,
    PlayerJump,
    GameOver,
}

impl SpriteId {
    pub const ALL: [SpriteId; 10] = [
        SpriteId::Background,
        SpriteId::Wall,
        SpriteId::BarLeft,
        SpriteId::BarMiddle,
        SpriteId::BarRight,
        SpriteId::Ground,
        SpriteId::PlayerIdle,
        SpriteId::PlayerWalk,
        SpriteId::PlayerJump,
        SpriteId::GameOver,
    ];

    /// Placeholder colour, or None when nothing should be drawn at all
    pub fn fallback_color(&self) -> Option<Color> {
        match self {
            SpriteId::Background => Some([0.6, 0.8, 1.0, 1.0]),
            SpriteId::Wall => Some([0.3, 0.3, 0.3, 1.0]),
            SpriteId::BarLeft | SpriteId::BarMiddle | SpriteId::BarRight | SpriteId::Ground => {
                Some([0.5, 0.5, 0.5, 1.0])
            }
            SpriteId::PlayerIdle | SpriteId::PlayerWalk | SpriteId::PlayerJump => {
                Some([1.0, 0.0, 1.0, 1.0])
            }
            SpriteId::GameOver => None,
        }
    }
}

/// Pixel size of a loaded sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteInfo {
    pub width: u32,
    pub height: u32,
}

/// Which sprites are available to the backend
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    sprites: HashMap<SpriteId, SpriteInfo>,
}

impl AssetCatalog {
    /// Nothing loaded; everything renders as placeholders
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully loaded sprite
    pub fn insert(&mut self, id: SpriteId, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring zero-sized sprite {id:?}");
            return;
        }
        self.sprites.insert(id, SpriteInfo { width, height });
    }

    pub fn with(mut self, id: SpriteId, width: u32, height: u32) -> Self {
        self.insert(id, width, height);
        self
    }

    pub fn get(&self, id: SpriteId) -> Option<SpriteInfo> {
        self.sprites.get(&id).copied()
    }

    pub fn is_loaded(&self, id: SpriteId) -> bool {
        self.sprites.contains_key(&id)
    }

    /// Sprites that will fall back to placeholders
    pub fn missing(&self) -> Vec<SpriteId> {
        SpriteId::ALL
            .into_iter()
            .filter(|id| !self.is_loaded(*id))
            .collect()
    }
}
