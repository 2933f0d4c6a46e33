//! Simulation state for the side-scroller.
//!
//! The world holds the bird, the pipes currently on screen and the score.
//! Everything in here is a pure transition over that state; collision is
//! checked by the caller after `advance` so it can decide how to freeze the
//! death frame.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
