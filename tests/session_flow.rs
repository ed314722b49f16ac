//! Whole-game runs driven through the scheduler with synthetic time

use glam::Vec2;
use quad_dodge::input::{Command, InputEvent};
use quad_dodge::{Game, GameConfig, MemoryStore};

/// 50 ticks/s (20ms frames), a projectile every 100ms
fn config() -> GameConfig {
    GameConfig {
        target_tick_rate: 50.0,
        projectile_interval_ms: 100.0,
        power_up_interval_ms: 1000.0,
        max_substeps: 4,
        ..GameConfig::default()
    }
}

/// Step 20ms frames until the run ends; returns frames taken
fn play_until_over(game: &mut Game<MemoryStore>, start_ms: f64) -> (u32, f64) {
    let mut now = start_ms;
    for frame in 0..100_000 {
        now += 20.0;
        game.frame(now);
        if game.session().is_over() {
            return (frame, now);
        }
    }
    panic!("merged player should be hit eventually");
}

fn replay_tap(game: &Game<MemoryStore>) -> InputEvent {
    let button = game.input().button();
    InputEvent::Tap {
        pos: button.pos + Vec2::new(button.width, button.height) / 2.0,
    }
}

#[test]
fn same_seed_same_run() {
    let mut a = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 42);
    let mut b = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 42);
    a.frame(0.0);
    b.frame(0.0);
    for frame in 1..=300 {
        let now = frame as f64 * 20.0;
        a.frame(now);
        b.frame(now);
        assert_eq!(a.snapshot(), b.snapshot());
    }
}

#[test]
fn score_counts_scheduled_ticks() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 7);
    game.frame(0.0);
    // Too early for any projectile to reach the center
    for frame in 1..=10 {
        game.frame(frame as f64 * 20.0);
        assert_eq!(game.session().score(), frame);
    }
    assert_eq!(game.session().projectiles().len(), 2);
}

#[test]
fn game_over_persists_new_high_score() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::with_score(0), 3);
    game.frame(0.0);
    play_until_over(&mut game, 0.0);

    let score = game.session().score();
    assert!(score > 0);
    assert_eq!(game.session().high_score(), score);
    assert_eq!(game.store().stored(), Some(score));
    assert_eq!(game.store().saves, 1);
    assert!(game.input().replay_armed());
}

#[test]
fn lower_score_leaves_record_alone() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::with_score(1_000_000), 3);
    game.frame(0.0);
    play_until_over(&mut game, 0.0);

    assert_eq!(game.session().high_score(), 1_000_000);
    assert_eq!(game.store().saves, 0);
}

#[test]
fn frozen_after_game_over() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 11);
    game.frame(0.0);
    let (_, now) = play_until_over(&mut game, 0.0);

    let frozen = game.snapshot();
    for frame in 1..=50 {
        assert_eq!(game.frame(now + frame as f64 * 20.0), 0);
    }
    game.handle_input(InputEvent::PressStart);
    assert_eq!(game.snapshot(), frozen);
}

#[test]
fn replay_restarts_once() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 5);
    game.frame(0.0);
    let (_, now) = play_until_over(&mut game, 0.0);

    let tap = replay_tap(&game);
    assert_eq!(game.handle_input(tap), Some(Command::Restart));
    let snap = game.snapshot();
    assert!(!snap.game_over);
    assert_eq!(snap.score, 0);
    assert!(snap.projectiles.is_empty());
    assert!(snap.power_ups.is_empty());
    assert_eq!(snap.player_squares.len(), 1);

    // A rapid second tap is ignored
    assert_eq!(game.handle_input(tap), None);

    game.frame(now + 20.0);
    assert_eq!(game.session().score(), 1);
}

#[test]
fn tap_outside_button_does_not_restart() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 5);
    game.frame(0.0);
    play_until_over(&mut game, 0.0);

    let miss = InputEvent::Tap {
        pos: Vec2::new(5.0, 5.0),
    };
    assert_eq!(game.handle_input(miss), None);
    assert!(game.session().is_over());
    assert!(game.input().replay_armed());
}

#[test]
fn restarted_run_keeps_high_score() {
    let mut game = Game::new(config(), 800.0, 800.0, MemoryStore::new(), 9);
    game.frame(0.0);
    let (_, now) = play_until_over(&mut game, 0.0);
    let first = game.session().score();

    game.handle_input(replay_tap(&game));
    assert_eq!(game.session().high_score(), first);

    play_until_over(&mut game, now);
    let second = game.session().score();
    assert_eq!(game.session().high_score(), first.max(second));
    assert_eq!(game.store().stored(), Some(first.max(second)));
}
