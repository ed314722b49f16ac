//! Game controller
//!
//! Owns one `GameSession` and everything around it: the scheduler, the seeded
//! RNG, the input mapper and the high score store. Hosts call `frame` once per
//! animation frame and `handle_input` for pointer events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::clock::{ScheduledEvent, Scheduler};
use crate::highscore::HighScoreStore;
use crate::input::{Command, InputEvent, InputMapper};
use crate::settings::GameConfig;
use crate::sim::{GameEvent, GameSession, tick};
use crate::snapshot::RenderSnapshot;

/// A running game bound to a high score store
pub struct Game<S: HighScoreStore> {
    session: GameSession,
    scheduler: Scheduler,
    rng: Pcg32,
    input: InputMapper,
    store: S,
}

impl<S: HighScoreStore> Game<S> {
    /// Build a game for a viewport; the high score is read from `store` once here
    ///
    /// A config that fails validation is replaced by the defaults.
    pub fn new(mut config: GameConfig, width: f32, height: f32, store: S, seed: u64) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Invalid config ({}), using defaults", e);
            config = GameConfig::default();
        }
        let high_score = store.load_high_score();
        let scheduler = Scheduler::new(&config);
        log::info!("Game initialized with seed: {}", seed);
        Self {
            session: GameSession::new(config, width, height, high_score),
            scheduler,
            rng: Pcg32::seed_from_u64(seed),
            input: InputMapper::new(width, height),
            store,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    /// Run whatever is due at host time `now_ms`. Returns the ticks run; the
    /// host should redraw when it is non-zero.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let mut ticks = 0;
        for event in self.scheduler.advance(now_ms) {
            // Timers keep running after game over, their work is dropped
            if self.session.is_over() {
                continue;
            }
            match event {
                ScheduledEvent::SpawnProjectile => {
                    self.session.spawn_projectile(&mut self.rng);
                }
                ScheduledEvent::SpawnPowerUp => {
                    self.session.spawn_power_up(&mut self.rng);
                }
                ScheduledEvent::Tick => {
                    tick(&mut self.session);
                    ticks += 1;
                }
            }
        }
        self.process_events();
        ticks
    }

    /// Apply a pointer event; returns the command it produced, if any
    pub fn handle_input(&mut self, event: InputEvent) -> Option<Command> {
        let command = self.input.map(event)?;
        match command {
            Command::Split => self.session.split(),
            Command::Merge => self.session.merge(),
            Command::Restart => {
                self.session.restart();
            }
        }
        self.process_events();
        Some(command)
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        self.session.snapshot()
    }

    fn process_events(&mut self) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::NewHighScore(score) => self.store.save_high_score(score),
                GameEvent::GameOver { .. } => self.input.arm_replay(),
                GameEvent::Restarted => self.scheduler.reset(),
                GameEvent::Collision | GameEvent::SpreadChanged(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::highscore::MemoryStore;

    #[test]
    fn test_reads_high_score_once() {
        let game = Game::new(GameConfig::default(), 800.0, 800.0, MemoryStore::with_score(40), 1);
        assert_eq!(game.session().high_score(), 40);
        assert_eq!(game.store().saves, 0);
    }

    #[test]
    fn test_press_release_maps_to_split_merge() {
        let mut game = Game::new(GameConfig::default(), 800.0, 800.0, MemoryStore::new(), 1);
        assert_eq!(game.handle_input(InputEvent::PressStart), Some(Command::Split));
        assert!(game.session().is_divided());
        assert_eq!(game.handle_input(InputEvent::PressEnd), Some(Command::Merge));
        assert!(!game.session().is_divided());
    }

    #[test]
    fn test_replay_tap_ignored_while_playing() {
        let mut game = Game::new(GameConfig::default(), 800.0, 800.0, MemoryStore::new(), 1);
        let tap = InputEvent::Tap {
            pos: Vec2::new(400.0, 500.0),
        };
        assert_eq!(game.handle_input(tap), None);
        assert!(!game.session().is_over());
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = GameConfig {
            projectile_interval_ms: 0.0,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, 800.0, 800.0, MemoryStore::new(), 1);
        assert_eq!(game.session().config(), &GameConfig::default());

        game.frame(0.0);
        let ticks = game.frame(100.0);
        assert!(ticks <= GameConfig::default().max_substeps);
        assert!(game.session().projectiles().len() <= 1);
    }

    #[test]
    fn test_oversized_window_falls_back_to_defaults() {
        let config = GameConfig {
            merged_window_cells: u32::MAX,
            ..GameConfig::default()
        };
        let mut game = Game::new(config, 800.0, 800.0, MemoryStore::new(), 1);
        assert_eq!(game.session().config().merged_window_cells, 3);
        for n in 0..60 {
            game.frame(n as f64 * 50.0);
        }
        assert!(game.session().score() > 0);
    }
}
