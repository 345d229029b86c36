//! Space Invaders simulation core.
//!
//! `entities` is pure data, `compute` and `collision` are pure logic, and
//! `engine` wraps them behind the four calls the input and tick layers use.

pub mod collision;
pub mod compute;
pub mod config;
pub mod engine;
pub mod entities;

pub use config::{ConfigError, GameConfig};
pub use engine::Engine;
pub use entities::GameStatus;
