//! Edge spawning for projectiles and power-ups
//!
//! Spawns are pure given the RNG, so a seeded generator replays them exactly.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::area::PlayArea;
use super::player::SpreadMode;
use super::state::{PowerUp, PowerUpKind, Projectile};
use crate::settings::GameConfig;

/// Play area edge an entity enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// Unit vector pointing into the play area
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
            Edge::Right => Vec2::NEG_X,
        }
    }

    fn pick<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Cell range `[mid - half, mid + half)` clamped to the grid
fn window(area: &PlayArea, half_cells: u32) -> (u32, u32) {
    let mid = area.grid_cells / 2;
    let lo = mid.saturating_sub(half_cells);
    let hi = mid.saturating_add(half_cells).min(area.grid_cells).max(lo + 1);
    (lo, hi)
}

/// Top-left corner one entity size beyond `edge`, at `cell` along it
fn edge_position(area: &PlayArea, edge: Edge, cell: u32, size: f32) -> Vec2 {
    let along = area.cell_offset(cell);
    match edge {
        Edge::Top => Vec2::new(area.min.x + along, area.min.y - size),
        Edge::Bottom => Vec2::new(area.min.x + along, area.max.y + size),
        Edge::Left => Vec2::new(area.min.x - size, area.min.y + along),
        Edge::Right => Vec2::new(area.max.x + size, area.min.y + along),
    }
}

fn place<R: Rng>(rng: &mut R, area: &PlayArea, half_cells: u32) -> (Edge, Vec2) {
    let edge = Edge::pick(rng);
    let (lo, hi) = window(area, half_cells);
    let cell = rng.random_range(lo..hi);
    (edge, edge_position(area, edge, cell, area.cell_unit))
}

/// Projectile speed for the current score
pub fn projectile_speed(config: &GameConfig, score: u64) -> f32 {
    config.base_speed + config.score_speed_coefficient * score as f32
}

/// Spawn a projectile aimed at the player's current footprint.
///
/// The spawn window widens when the player is split, and more so at the far
/// spread, so projectiles keep threatening where the squares actually are.
pub fn spawn_projectile<R: Rng>(
    rng: &mut R,
    area: &PlayArea,
    config: &GameConfig,
    score: u64,
    divided: bool,
    spread: SpreadMode,
) -> Projectile {
    let half = config.projectile_window(divided, spread);
    let (edge, pos) = place(rng, area, half);
    let speed = projectile_speed(config, score);
    Projectile {
        pos,
        vel: edge.inward() * speed,
        size: area.cell_unit,
        edge,
    }
}

/// Spawn a spread power-up from a narrow central window at fixed speed
pub fn spawn_power_up<R: Rng>(
    rng: &mut R,
    area: &PlayArea,
    config: &GameConfig,
) -> PowerUp {
    let (edge, pos) = place(rng, area, config.power_up_window_cells);
    PowerUp {
        kind: PowerUpKind::Spread,
        pos,
        vel: edge.inward() * config.power_up_speed,
        size: area.cell_unit,
        edge,
        validated: false,
    }
}
