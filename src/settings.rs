//! Game tuning
//!
//! Persisted separately from the high score in LocalStorage. Every field has a
//! default, so a partial JSON override only changes what it names.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{CONFIG_KEY, GRID_CELLS, PLAYER_INSET};
use crate::sim::SpreadMode;

/// Rejected configuration
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    GridTooSmall { cells: u32 },
    NonPositive { field: &'static str, value: f64 },
    Negative { field: &'static str, value: f64 },
    ZeroSubsteps,
    EmptyWindow { field: &'static str },
    WindowTooWide { field: &'static str, cells: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid config JSON: {e}"),
            Self::GridTooSmall { cells } => {
                write!(f, "grid_cells must be at least 2, got {cells}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive and finite, got {value}")
            }
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative, got {value}")
            }
            Self::ZeroSubsteps => write!(f, "max_substeps must be at least 1"),
            Self::EmptyWindow { field } => write!(f, "{field} must be at least 1 cell"),
            Self::WindowTooWide { field, cells, max } => {
                write!(f, "{field} must be at most {max} cells, got {cells}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Gameplay tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Board ===
    /// Grid cells per play area side
    pub grid_cells: u32,
    /// Pixels removed from the two-cell player square
    pub player_inset: f32,

    // === Projectiles ===
    /// Projectile speed at score 0 (pixels per tick)
    pub base_speed: f32,
    /// Extra speed per point of score
    pub score_speed_coefficient: f32,
    /// Half-width (cells) of the spawn window while merged
    pub merged_window_cells: u32,
    /// Half-width (cells) of the spawn window while split, per spread mode
    pub split_window_cells: [u32; 2],

    // === Power-ups ===
    /// Whether power-ups spawn at all
    pub power_ups_enabled: bool,
    /// Fixed power-up speed (pixels per tick)
    pub power_up_speed: f32,
    /// Half-width (cells) of the power-up spawn window
    pub power_up_window_cells: u32,

    // === Spread ===
    /// Split offset in cells for `SpreadMode::Near`
    pub spread_near_units: f32,
    /// Split offset in cells for `SpreadMode::Far`
    pub spread_far_units: f32,

    // === Timing ===
    /// Projectile spawn period (ms)
    pub projectile_interval_ms: f64,
    /// Power-up spawn period (ms)
    pub power_up_interval_ms: f64,
    /// Simulation ticks per second
    pub target_tick_rate: f64,
    /// Maximum ticks run for a single frame
    pub max_substeps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_cells: GRID_CELLS,
            player_inset: PLAYER_INSET,

            base_speed: 3.0,
            score_speed_coefficient: 0.001,
            merged_window_cells: 3,
            split_window_cells: [5, 7],

            power_ups_enabled: true,
            power_up_speed: 2.0,
            power_up_window_cells: 2,

            spread_near_units: 2.5,
            spread_far_units: 4.0,

            projectile_interval_ms: 1000.0,
            power_up_interval_ms: 10_000.0,
            target_tick_rate: 30.0,
            max_substeps: 4,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_cells < 2 {
            return Err(ConfigError::GridTooSmall {
                cells: self.grid_cells,
            });
        }
        let non_negative = [
            ("player_inset", self.player_inset as f64),
            ("score_speed_coefficient", self.score_speed_coefficient as f64),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        let positive = [
            ("base_speed", self.base_speed as f64),
            ("power_up_speed", self.power_up_speed as f64),
            ("spread_near_units", self.spread_near_units as f64),
            ("spread_far_units", self.spread_far_units as f64),
            ("projectile_interval_ms", self.projectile_interval_ms),
            ("power_up_interval_ms", self.power_up_interval_ms),
            ("target_tick_rate", self.target_tick_rate),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.max_substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        let windows = [
            ("merged_window_cells", self.merged_window_cells),
            ("split_window_cells", self.split_window_cells[0]),
            ("split_window_cells", self.split_window_cells[1]),
            ("power_up_window_cells", self.power_up_window_cells),
        ];
        for (field, cells) in windows {
            if cells == 0 {
                return Err(ConfigError::EmptyWindow { field });
            }
            if cells > self.grid_cells {
                return Err(ConfigError::WindowTooWide {
                    field,
                    cells,
                    max: self.grid_cells,
                });
            }
        }
        Ok(())
    }

    /// Split offset in cells for a spread mode
    pub fn spread_units(&self, spread: SpreadMode) -> f32 {
        match spread {
            SpreadMode::Near => self.spread_near_units,
            SpreadMode::Far => self.spread_far_units,
        }
    }

    /// Projectile spawn window half-width for the player's current footprint
    pub fn projectile_window(&self, divided: bool, spread: SpreadMode) -> u32 {
        if !divided {
            return self.merged_window_cells;
        }
        match spread {
            SpreadMode::Near => self.split_window_cells[0],
            SpreadMode::Far => self.split_window_cells[1],
        }
    }

    /// Frame budget in ms for one simulation tick
    pub fn frame_budget_ms(&self) -> f64 {
        1000.0 / self.target_tick_rate
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(CONFIG_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} store on native, using defaults", CONFIG_KEY);
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "base_speed": 5.0 }"#).unwrap();
        assert_eq!(config.base_speed, 5.0);
        assert_eq!(config.grid_cells, GRID_CELLS);
        assert_eq!(config.projectile_interval_ms, 1000.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "grid_cells": 1 }"#),
            Err(ConfigError::GridTooSmall { cells: 1 })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "target_tick_rate": 0.0 }"#),
            Err(ConfigError::NonPositive {
                field: "target_tick_rate",
                ..
            })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "max_substeps": 0 }"#),
            Err(ConfigError::ZeroSubsteps)
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "merged_window_cells": 0 }"#),
            Err(ConfigError::EmptyWindow { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "merged_window_cells": 4294967295 }"#),
            Err(ConfigError::WindowTooWide {
                field: "merged_window_cells",
                max: 20,
                ..
            })
        ));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_negative_coefficient_rejected() {
        assert!(matches!(
            GameConfig::from_json(r#"{ "score_speed_coefficient": -0.5 }"#),
            Err(ConfigError::Negative {
                field: "score_speed_coefficient",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_score_coefficient_allowed() {
        let config = GameConfig::from_json(r#"{ "score_speed_coefficient": 0.0 }"#).unwrap();
        assert_eq!(config.score_speed_coefficient, 0.0);
    }

    #[test]
    fn test_projectile_window_follows_footprint() {
        let config = GameConfig::default();
        assert_eq!(config.projectile_window(false, SpreadMode::Far), 3);
        assert_eq!(config.projectile_window(true, SpreadMode::Near), 5);
        assert_eq!(config.projectile_window(true, SpreadMode::Far), 7);
    }
}
