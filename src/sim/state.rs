//! Game state and core simulation types
//!
//! `GameSession` owns everything that changes during a run. It is mutated only
//! through its own operations and `tick`, never by the renderer.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::area::PlayArea;
use super::collision::Square;
use super::player::{PlayerShape, SpreadMode};
use super::spawn::{self, Edge};
use crate::settings::GameConfig;
use crate::snapshot::RenderSnapshot;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Something the host may need to react to (persistence, audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A projectile touched the player
    Collision,
    /// The run ended with this score
    GameOver { score: u64, new_high_score: bool },
    /// High score raised; the host should persist it
    NewHighScore(u64),
    /// A power-up switched the spread
    SpreadChanged(SpreadMode),
    /// A new run began
    Restarted,
}

/// A hazard travelling straight in from one edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub size: f32,
    pub edge: Edge,
}

impl Projectile {
    pub fn bounds(&self) -> Square {
        Square {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Toggles the split spread
    Spread,
}

/// A pickup moving like a projectile
///
/// Once validated it no longer collides but keeps moving until it leaves the
/// screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub edge: Edge,
    pub validated: bool,
}

impl PowerUp {
    pub fn bounds(&self) -> Square {
        Square {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) config: GameConfig,
    pub(crate) area: PlayArea,
    pub(crate) player: PlayerShape,
    pub(crate) spread: SpreadMode,
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) power_ups: Vec<PowerUp>,
    pub(crate) score: u64,
    pub(crate) high_score: u64,
    pub(crate) phase: GamePhase,
    /// Effective splits so far, lets the renderer redo per-quadrant decoration
    pub(crate) split_count: u32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session for a viewport, with the high score loaded from storage
    pub fn new(config: GameConfig, width: f32, height: f32, high_score: u64) -> Self {
        let area = PlayArea::from_viewport(width, height, config.grid_cells);
        let spread = SpreadMode::default();
        let player = PlayerShape::new(
            area.center(),
            2.0 * area.cell_unit - config.player_inset,
            config.spread_units(spread) * area.cell_unit,
        );
        log::info!(
            "Session started: play area {}px, cell {}px, high score {}",
            area.side(),
            area.cell_unit,
            high_score
        );
        Self {
            config,
            area,
            player,
            spread,
            projectiles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            high_score,
            phase: GamePhase::Playing,
            split_count: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    pub fn player(&self) -> &PlayerShape {
        &self.player
    }

    pub fn spread(&self) -> SpreadMode {
        self.spread
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn is_divided(&self) -> bool {
        self.player.divided
    }

    pub fn split_count(&self) -> u32 {
        self.split_count
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Break into four quadrant squares. No-op when already split or over.
    pub fn split(&mut self) {
        if self.is_over() || self.player.divided {
            return;
        }
        self.player.divided = true;
        self.split_count = self.split_count.wrapping_add(1);
    }

    /// Back to the single square. No-op when already merged or over.
    pub fn merge(&mut self) {
        if self.is_over() || !self.player.divided {
            return;
        }
        self.player.divided = false;
    }

    /// Switch spread mode and move the quadrant squares to match
    pub(crate) fn toggle_spread(&mut self) {
        self.spread = self.spread.toggled();
        self.player.offset = self.config.spread_units(self.spread) * self.area.cell_unit;
        log::debug!("Spread now {:?} (offset {})", self.spread, self.player.offset);
        self.events.push(GameEvent::SpreadChanged(self.spread));
    }

    /// End the run, raising the high score if it was beaten
    pub fn end_game(&mut self) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;

        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
            self.events.push(GameEvent::NewHighScore(self.score));
        }
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
        log::info!(
            "Game over: score {} (high {}{})",
            self.score,
            self.high_score,
            if new_high_score { ", new record" } else { "" }
        );
    }

    /// Start a fresh run. Only valid from game over; returns whether it ran.
    pub fn restart(&mut self) -> bool {
        if !self.is_over() {
            return false;
        }
        self.score = 0;
        self.projectiles.clear();
        self.power_ups.clear();
        self.spread = SpreadMode::default();
        self.player.divided = false;
        self.player.offset = self.config.spread_units(self.spread) * self.area.cell_unit;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Restarted);
        log::info!("Game restarted");
        true
    }

    /// Push a projectile in from a random edge. Skipped once the run is over.
    pub fn spawn_projectile<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_over() {
            return false;
        }
        let projectile = spawn::spawn_projectile(
            rng,
            &self.area,
            &self.config,
            self.score,
            self.player.divided,
            self.spread,
        );
        log::debug!(
            "Projectile from {:?} at {:?}, vel {:?}",
            projectile.edge,
            projectile.pos,
            projectile.vel
        );
        self.projectiles.push(projectile);
        true
    }

    /// Push a power-up in from a random edge. Skipped once the run is over.
    pub fn spawn_power_up<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.is_over() || !self.config.power_ups_enabled {
            return false;
        }
        let power_up = spawn::spawn_power_up(rng, &self.area, &self.config);
        log::debug!("Power-up from {:?} at {:?}", power_up.edge, power_up.pos);
        self.power_ups.push(power_up);
        true
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
