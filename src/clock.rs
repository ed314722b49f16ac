//! Frame-rate capping and spawn timers
//!
//! The host only reports timestamps (e.g. from `requestAnimationFrame`); all
//! cadence decisions are made here, so tests can drive time by hand.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DELTA_MS;
use crate::settings::GameConfig;

/// Work due after a host frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledEvent {
    SpawnProjectile,
    SpawnPowerUp,
    Tick,
}

/// Elapsed-time accumulator that releases whole frame budgets
#[derive(Debug, Clone)]
pub struct FrameClock {
    budget_ms: f64,
    max_substeps: u32,
    accumulator: f64,
}

impl FrameClock {
    pub fn new(budget_ms: f64, max_substeps: u32) -> Self {
        Self {
            budget_ms,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add a frame delta and return how many ticks are due
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_DELTA_MS);

        let mut substeps = 0;
        while self.accumulator >= self.budget_ms && substeps < self.max_substeps {
            self.accumulator -= self.budget_ms;
            substeps += 1;
        }
        // Prevent spiral of death: drop whatever could not run this frame
        if self.accumulator >= self.budget_ms {
            self.accumulator %= self.budget_ms;
        }
        substeps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Fixed-period timer
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period_ms: f64,
    elapsed_ms: f64,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
        }
    }

    /// Add elapsed time and return how many periods completed
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        self.elapsed_ms += dt_ms.max(0.0);
        let fires = (self.elapsed_ms / self.period_ms).floor();
        self.elapsed_ms -= fires * self.period_ms;
        fires as u32
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }
}

/// One frame-synchronized tick plus two independent spawn timers
#[derive(Debug, Clone)]
pub struct Scheduler {
    frame: FrameClock,
    projectile_timer: IntervalTimer,
    power_up_timer: Option<IntervalTimer>,
    last_time_ms: Option<f64>,
}

impl Scheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            frame: FrameClock::new(config.frame_budget_ms(), config.max_substeps),
            projectile_timer: IntervalTimer::new(config.projectile_interval_ms),
            power_up_timer: config
                .power_ups_enabled
                .then(|| IntervalTimer::new(config.power_up_interval_ms)),
            last_time_ms: None,
        }
    }

    /// Work due at host time `now_ms`, spawns before ticks.
    ///
    /// The first call only records the timestamp.
    pub fn advance(&mut self, now_ms: f64) -> Vec<ScheduledEvent> {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);

        let mut due = Vec::new();
        for _ in 0..self.projectile_timer.advance(dt) {
            due.push(ScheduledEvent::SpawnProjectile);
        }
        if let Some(timer) = self.power_up_timer.as_mut() {
            for _ in 0..timer.advance(dt) {
                due.push(ScheduledEvent::SpawnPowerUp);
            }
        }
        for _ in 0..self.frame.advance(dt) {
            due.push(ScheduledEvent::Tick);
        }
        due
    }

    /// Re-phase every timer from now (new run)
    pub fn reset(&mut self) {
        self.frame.reset();
        self.projectile_timer.reset();
        if let Some(timer) = self.power_up_timer.as_mut() {
            timer.reset();
        }
    }
}
