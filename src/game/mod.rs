//! Session control: the three-state machine, the owning `Game` and tick pacing.

pub mod pacing;
pub mod session;
pub mod state;

pub use pacing::{Clock, Pacer, SystemClock};
pub use session::Game;
pub use state::GameState;
