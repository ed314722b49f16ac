//! Quad Dodge - split-square dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `clock`: Frame accumulator and spawn timers driven by host timestamps
//! - `input`: Press/release/tap events mapped to game commands
//! - `highscore`: Single persisted high score value
//! - `settings`: Data-driven game tuning
//! - `snapshot`: Read-only frame view handed to the renderer
//! - `game`: Controller tying the above together

pub mod clock;
pub mod game;
pub mod highscore;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use game::Game;
pub use highscore::{HighScoreStore, MemoryStore};
pub use settings::{ConfigError, GameConfig};
pub use snapshot::RenderSnapshot;

/// Game configuration constants
pub mod consts {
    /// Grid cells along each side of the play area
    pub const GRID_CELLS: u32 = 20;
    /// Gap shaved off the player's two-cell square
    pub const PLAYER_INSET: f32 = 5.0;

    /// Replay button size, in viewport pixels
    pub const REPLAY_BUTTON_WIDTH: f32 = 150.0;
    pub const REPLAY_BUTTON_HEIGHT: f32 = 50.0;
    /// Replay button offset from the viewport center
    pub const REPLAY_BUTTON_DX: f32 = -75.0;
    pub const REPLAY_BUTTON_DY: f32 = 80.0;

    /// Largest frame delta fed to the clock (ms), guards against tab-switch stalls
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;

    /// LocalStorage key for the high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
    /// LocalStorage key for tuning overrides
    pub const CONFIG_KEY: &str = "quad_dodge_config";
}
