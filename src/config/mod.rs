//! Configuration management: a TOML file with typed sections, serde
//! defaults, and validation on load. All of it is externally authored
//! content; the engine never mutates configuration at runtime.
//!
//! Sections:
//!
//! - `[game]` - health, hazard odds, entry coordinates, win condition, and
//!   the tutorial's required-item gate
//! - `[storage]` - data directory and world file location
//! - `[logging]` - log level and optional log file
//!
//! ```toml
//! [game]
//! default_health = 20
//! hazard_denominator = 10
//! tutorial_required_items = ["Rusty Key", "Oil Lantern"]
//! win_required_items = ["Music Box", "Cellar Letter"]
//!
//! [storage]
//! data_dir = "data"
//! world_file = "world.json"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::engine::types::Location;

/// A tutorial-area coordinate (no floor axis).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridRef {
    pub row: i32,
    pub col: i32,
}

/// A main-area coordinate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FloorRef {
    pub floor: i32,
    pub row: i32,
    pub col: i32,
}

/// Core game knobs. Static for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Health a fresh or reset player starts with.
    #[serde(default = "default_health")]
    pub default_health: u32,
    /// Hazard odds are 1-in-this per turn.
    #[serde(default = "default_hazard_denominator")]
    pub hazard_denominator: u32,
    /// Where a fresh game begins.
    #[serde(default = "default_tutorial_entry")]
    pub tutorial_entry: GridRef,
    /// Where the main game begins after the tutorial.
    #[serde(default = "default_main_entry")]
    pub main_entry: FloorRef,
    /// The room where `use` checks the win condition instead of a recipe.
    #[serde(default = "default_win_room")]
    pub win_room: FloorRef,
    /// Items the inventory must hold to win at the win room.
    #[serde(default = "default_win_required_items")]
    pub win_required_items: Vec<String>,
    /// Items whose collection completes the tutorial.
    #[serde(default = "default_tutorial_required_items")]
    pub tutorial_required_items: Vec<String>,
}

fn default_health() -> u32 {
    20
}

fn default_hazard_denominator() -> u32 {
    10
}

fn default_tutorial_entry() -> GridRef {
    GridRef { row: 1, col: 1 }
}

fn default_main_entry() -> FloorRef {
    FloorRef {
        floor: 1,
        row: 1,
        col: 1,
    }
}

fn default_win_room() -> FloorRef {
    FloorRef {
        floor: 1,
        row: 2,
        col: 1,
    }
}

fn default_win_required_items() -> Vec<String> {
    vec!["Music Box".to_string(), "Cellar Letter".to_string()]
}

fn default_tutorial_required_items() -> Vec<String> {
    vec!["Rusty Key".to_string(), "Oil Lantern".to_string()]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            default_health: default_health(),
            hazard_denominator: default_hazard_denominator(),
            tutorial_entry: default_tutorial_entry(),
            main_entry: default_main_entry(),
            win_room: default_win_room(),
            win_required_items: default_win_required_items(),
            tutorial_required_items: default_tutorial_required_items(),
        }
    }
}

impl GameConfig {
    pub fn tutorial_entry_location(&self) -> Location {
        Location::Tutorial {
            row: self.tutorial_entry.row,
            col: self.tutorial_entry.col,
        }
    }

    pub fn main_entry_location(&self) -> Location {
        Location::Main {
            floor: self.main_entry.floor,
            row: self.main_entry.row,
            col: self.main_entry.col,
        }
    }

    pub fn win_location(&self) -> Location {
        Location::Main {
            floor: self.win_room.floor,
            row: self.win_room.row,
            col: self.win_room.col,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the save slot and the world file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// World file name, relative to `data_dir`.
    #[serde(default = "default_world_file")]
    pub world_file: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_world_file() -> String {
    "world.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            world_file: default_world_file(),
        }
    }
}

impl StorageConfig {
    pub fn save_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join("save")
    }

    pub fn world_path(&self) -> std::path::PathBuf {
        std::path::Path::new(&self.data_dir).join(&self.world_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub async fn load(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a default configuration file.
    pub async fn create_default(path: &str) -> Result<Self> {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config)?;
        fs::write(path, serialized).await?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.default_health == 0 {
            return Err(anyhow!("game.default_health must be at least 1"));
        }
        if self.game.hazard_denominator == 0 {
            return Err(anyhow!("game.hazard_denominator must be at least 1"));
        }
        if self.game.win_required_items.is_empty() {
            return Err(anyhow!("game.win_required_items must not be empty"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        Ok(())
    }
}
