//! Game configuration, difficulty modes and the mode → spawner policy table.

use crate::spawner::{FixedIntervalSpawner, ScalingIntervalSpawner, Spawner};
use crate::utils::persistence;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Name of the config file inside `~/.flappy/`.
pub const CONFIG_FILE: &str = "config.json";

/// Difficulty modes, selectable from the start screen with keys 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Easy, GameMode::Medium, GameMode::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Mode bound to a start-screen key, if any.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Easy),
            '2' => Some(Self::Medium),
            '3' => Some(Self::Hard),
            _ => None,
        }
    }

    /// Fresh, armed spawner for this mode.
    ///
    /// | Mode   | Policy  | Parameters                        |
    /// |--------|---------|-----------------------------------|
    /// | Easy   | Fixed   | interval 24, gap 8                |
    /// | Medium | Scaling | start 23, min 15, every 4, gap 7  |
    /// | Hard   | Scaling | start 22, min 12, every 3, gap 6  |
    pub fn spawner(&self) -> Spawner {
        match self {
            Self::Easy => Spawner::Fixed(FixedIntervalSpawner::new(24, 8)),
            Self::Medium => Spawner::Scaling(ScalingIntervalSpawner::new(23, 15, 4, 7)),
            Self::Hard => Spawner::Scaling(ScalingIntervalSpawner::new(22, 12, 3, 6)),
        }
    }
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "1" => Ok(Self::Easy),
            "medium" | "2" => Ok(Self::Medium),
            "hard" | "3" => Ok(Self::Hard),
            other => Err(format!("unknown mode '{}' (expected easy, medium or hard)", other)),
        }
    }
}

/// What the death frame shows when the bird flies into a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the world exactly as it was after the fatal tick.
    #[default]
    Freeze,
    /// On a pipe hit, roll back to the world as it was before the fatal
    /// tick. Leaving the playfield still freezes the advanced world.
    RestoreOnPipeHit,
}

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world must be at least 1x1, got {width}x{height}")]
    EmptyWorld { width: u16, height: u16 },
    #[error("bird column {bird_x} is outside a world {width} columns wide")]
    BirdOutsideWorld { bird_x: u16, width: u16 },
    #[error("tick rate must be at least 1 fps")]
    ZeroFps,
    #[error("{name} must be a finite number, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// Tunables for a session. Missing fields in the config file fall back to
/// the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Lane the bird flies in.
    pub bird_x: u16,
    /// Velocity added every tick (rows/tick², positive = down).
    pub gravity: f64,
    /// Velocity set by a flap (negative = up).
    pub flap_velocity: f64,
    /// Target tick rate.
    pub fps: u32,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Mode selected when the start screen first appears.
    pub mode: GameMode,
    pub collision_policy: CollisionPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 45,
            height: 20,
            bird_x: 6,
            gravity: 0.25,
            flap_velocity: -1.6,
            fps: 20,
            seed: None,
            mode: GameMode::Easy,
            collision_policy: CollisionPolicy::Freeze,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyWorld {
                width: self.width,
                height: self.height,
            });
        }
        if self.bird_x >= self.width {
            return Err(ConfigError::BirdOutsideWorld {
                bird_x: self.bird_x,
                width: self.width,
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }
}

/// Load `~/.flappy/config.json`, writing the defaults there on first run.
///
/// Never fails: any problem is logged and the defaults are used.
pub fn load_or_create() -> GameConfig {
    match persistence::save_path(CONFIG_FILE) {
        Ok(path) => load_or_create_at(&path),
        Err(e) => {
            log::warn!("no config directory ({}); using defaults", e);
            GameConfig::default()
        }
    }
}

/// Same as [`load_or_create`] for an explicit path.
pub fn load_or_create_at(path: &Path) -> GameConfig {
    match persistence::read_json::<GameConfig>(path) {
        Ok(Some(config)) => match config.validate() {
            Ok(()) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                GameConfig::default()
            }
        },
        Ok(None) => {
            let config = GameConfig::default();
            if let Err(e) = persistence::write_json(path, &config) {
                log::warn!("could not write default config to {}: {}", path.display(), e);
            }
            config
        }
        Err(e) => {
            log::warn!("could not read {}: {}; using defaults", path.display(), e);
            GameConfig::default()
        }
    }
}
