use serde::Deserialize;

use crate::party::{Explorer, Party};

/// Tunables read from `data/game.ron`. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,

    pub explorers: usize,
    pub max_life: i64,
    pub max_stamina: i64,
    pub food: i64,
    pub oil: i64,

    pub score_path: String,

    /// Up/Down auto-repeat in menus: (delay, interval) frames.
    pub menu_repeat: (u32, u32),
    /// Left/Right auto-repeat while exploring.
    pub walk_repeat: (u32, u32),

    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            explorers: 4,
            max_life: 10,
            max_stamina: 10,
            food: 10,
            oil: 5,
            score_path: crate::score::DEFAULT_PATH.to_string(),
            menu_repeat: (24, 8),
            walk_repeat: (1, 3),
            seed: None,
        }
    }
}

impl GameConfig {
    /// A fresh party for a new game.
    pub fn new_party(&self) -> Party {
        let explorers = vec![Explorer::new(self.max_life, self.max_stamina); self.explorers];
        Party::new(explorers, self.food, self.oil)
    }

    /// Depth of the dungeon: one step per horizontal pixel.
    pub fn destination(&self) -> i64 {
        i64::from(self.width)
    }
}

/// Load the game config from a RON file. Logs a warning and returns the
/// default on failure.
pub fn load_config(path: &str) -> GameConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return GameConfig::default();
        }
    };
    match ron::from_str::<GameConfig>(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default config", path, e);
            GameConfig::default()
        }
    }
}
