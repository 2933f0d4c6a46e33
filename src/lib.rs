//! Flappy - terminal side-scrolling reflex game.
//!
//! The library holds the deterministic simulation (world, spawners, state
//! machine, session loop) and the terminal adapters; `main.rs` only wires
//! them to a real terminal.

pub mod build_info;
pub mod config;
pub mod game;
pub mod io;
pub mod spawner;
pub mod utils;
pub mod world;

pub use config::{CollisionPolicy, ConfigError, GameConfig, GameMode};
pub use game::{Game, GameState};
pub use spawner::Spawner;
pub use world::{Bird, Pipe, World};
