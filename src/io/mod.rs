//! Keyboard and terminal adapters the game loop talks to.

pub mod input;
pub mod render;
pub mod terminal;

pub use input::{CrosstermKeys, GameInput, KeySource, NullKeys, ScriptedKeys};
pub use render::{NullRenderer, RecordingRenderer, Renderer, TerminalRenderer};
