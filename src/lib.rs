//! Terminal arcade Snake
//!
//! A snake moves on a fixed 40x25 grid of 16-pixel cells, eats flowers to
//! grow and score, and dies on the wall or on itself. This library provides:
//! - Core game logic (game module), pure and I/O-free
//! - Key mapping (input module)
//! - TUI rendering (render module)
//! - One-shot sound effects (audio module)
//! - Session metrics (metrics module)
//! - The interactive 60 Hz loop (modes module)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
