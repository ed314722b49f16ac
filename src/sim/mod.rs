//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per call, velocities in pixels per tick
//! - Randomness only through an injected RNG
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod area;
pub mod collision;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use area::PlayArea;
pub use collision::{Square, intersects};
pub use player::{PlayerShape, SpreadMode};
pub use spawn::{Edge, spawn_power_up, spawn_projectile};
pub use state::{GameEvent, GamePhase, GameSession, PowerUp, PowerUpKind, Projectile};
pub use tick::tick;
