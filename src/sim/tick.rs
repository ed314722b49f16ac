//! Fixed simulation tick
//!
//! Order within a tick is fixed: move everything, test projectiles, test
//! power-ups, cull off-screen entities, then score. Collision tests always see
//! this tick's positions.

use super::state::{GameEvent, GameSession};

/// Advance the session by one tick
pub fn tick(state: &mut GameSession) {
    if state.is_over() {
        return;
    }

    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
    for power_up in &mut state.power_ups {
        power_up.pos += power_up.vel;
    }

    // A single hit ends the run on the spot
    let player = &state.player;
    if state.projectiles.iter().any(|p| player.hits(&p.bounds())) {
        state.events.push(GameEvent::Collision);
        state.end_game();
        return;
    }

    for i in 0..state.power_ups.len() {
        let power_up = &state.power_ups[i];
        if power_up.validated || !state.player.hits(&power_up.bounds()) {
            continue;
        }
        state.power_ups[i].validated = true;
        state.toggle_spread();
    }

    let area = state.area;
    state.projectiles.retain(|p| area.retains(&p.bounds()));
    state.power_ups.retain(|p| area.retains(&p.bounds()));

    state.score += 1;
}
