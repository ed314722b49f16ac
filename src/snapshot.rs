//! Read-only frame view for the renderer

use serde::Serialize;

use crate::input::ReplayButton;
use crate::sim::{GameSession, PlayArea, PowerUp, Projectile, SpreadMode, Square};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub play_area: PlayArea,
    pub player_squares: Vec<Square>,
    pub projectiles: Vec<Projectile>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub divided: bool,
    pub spread: SpreadMode,
    /// Bumped on every split so per-quadrant decoration can be redone
    pub split_count: u32,
    /// Replay button to draw over the game-over screen
    pub replay_button: ReplayButton,
}

impl RenderSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let area = session.area();
        Self {
            play_area: *area,
            player_squares: session.player().squares(),
            projectiles: session.projectiles().to_vec(),
            power_ups: session.power_ups().to_vec(),
            score: session.score(),
            high_score: session.high_score(),
            game_over: session.is_over(),
            divided: session.is_divided(),
            spread: session.spread(),
            split_count: session.split_count(),
            replay_button: ReplayButton::for_viewport(area.viewport.x, area.viewport.y),
        }
    }

    /// JSON form handed to a JS renderer
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::warn!("Snapshot serialization failed: {}", e);
            String::from("{}")
        })
    }
}
