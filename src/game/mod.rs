//! Core game logic for Snake
//!
//! Everything in here is pure state manipulation with no I/O: the engine
//! reports what happened as [`FrameEvents`] and the mode layer decides what
//! to do about it (sounds, redraws).

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{FrameEvents, GameEngine};
pub use state::{CollisionType, GameState, Position, Snake};
