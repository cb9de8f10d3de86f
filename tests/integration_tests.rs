//! Integration tests for the game lifecycle through the public API

use mr_tet::core::{EngineConfig, GameState, LockResetPolicy, SimpleRng, StepOutcome};
use mr_tet::input::{map_key, InputHandler};
use mr_tet::types::{GameCommand, PieceKind, SessionState, TICK_MS};

use crossterm::event::{KeyCode, KeyEvent};

/// Hard drop until the session ends, returning every outcome seen.
fn play_to_game_over(game: &mut GameState) -> Vec<StepOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..500 {
        let outcome = game.apply_command(GameCommand::HardDrop);
        outcomes.push(outcome);
        if outcome.game_over().is_some() {
            break;
        }
    }
    outcomes
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert_eq!(game.state(), SessionState::Idle);

    assert!(game.apply_command(GameCommand::Start).is_applied());
    assert_eq!(game.state(), SessionState::Playing);
    assert!(game.active().is_some());

    assert!(game.apply_command(GameCommand::TogglePause).is_applied());
    assert_eq!(game.state(), SessionState::Paused);
    assert_eq!(game.apply_command(GameCommand::HardDrop), StepOutcome::Ignored);

    game.apply_command(GameCommand::TogglePause);
    assert_eq!(game.state(), SessionState::Playing);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = GameState::new(777);
    let mut b = GameState::new(777);
    a.start();
    b.start();

    for _ in 0..30 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.next_piece(), b.next_piece());
        a.apply_command(GameCommand::HardDrop);
        b.apply_command(GameCommand::HardDrop);
    }
    assert_eq!(a.board(), b.board());
    assert_eq!(a.score(), b.score());
}

#[test]
fn test_first_fourteen_pieces_are_two_bags() {
    let mut game = GameState::new(4242);
    game.start();

    let mut seen = Vec::new();
    for _ in 0..14 {
        seen.push(game.active().unwrap().kind);
        game.apply_command(GameCommand::HardDrop);
        if game.state() != SessionState::Playing {
            break;
        }
    }
    for bag in seen.chunks(7).filter(|c| c.len() == 7) {
        for kind in PieceKind::ALL {
            assert_eq!(bag.iter().filter(|&&k| k == kind).count(), 1);
        }
    }
}

#[test]
fn test_stacking_ends_in_single_game_over() {
    let mut game = GameState::new(9);
    game.start();

    let outcomes = play_to_game_over(&mut game);
    let overs: Vec<_> = outcomes.iter().filter_map(|o| o.game_over()).collect();
    assert_eq!(overs.len(), 1);
    assert_eq!(game.state(), SessionState::GameOver);
    assert!(game.active().is_none());

    let record = overs[0];
    assert_eq!(record.score, game.score());
    assert_eq!(record.lines, game.lines());

    // Nothing else reports game over until a new session starts.
    assert_eq!(game.update(TICK_MS), StepOutcome::Ignored);
    assert_eq!(game.apply_command(GameCommand::HardDrop), StepOutcome::Ignored);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = GameState::new(9);
    game.start();
    play_to_game_over(&mut game);

    game.apply_command(GameCommand::Start);
    assert_eq!(game.state(), SessionState::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.level(), 1);
    assert!(game.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_gravity_eventually_locks_a_piece() {
    let mut game = GameState::new(31);
    game.start();
    let first = game.active().unwrap();

    let mut locked = None;
    for _ in 0..10_000 {
        match game.update(TICK_MS) {
            StepOutcome::Locked { lines_cleared, .. } => {
                locked = Some(lines_cleared);
                break;
            }
            StepOutcome::GameOver(_) => panic!("empty board cannot top out"),
            _ => {}
        }
    }
    assert_eq!(locked, Some(0));
    assert!(game.board().cells().iter().filter(|c| c.is_some()).count() == 4);
    assert_eq!(game.board().cells().iter().flatten().next(), Some(&first.kind));
}

#[test]
fn test_soft_drop_speeds_up_gravity() {
    let mut slow = GameState::new(3);
    let mut fast = GameState::new(3);
    slow.start();
    fast.start();
    fast.set_soft_drop(true);

    for _ in 0..10 {
        slow.update(TICK_MS);
        fast.update(TICK_MS);
    }
    assert_eq!(slow.active().unwrap().y, 0);
    assert!(fast.active().unwrap().y >= 3);
}

#[test]
fn test_lock_reset_policy_is_configurable() {
    let config = EngineConfig {
        lock_reset: LockResetPolicy::Limited { max_resets: 0 },
        ..EngineConfig::default()
    };
    let mut game = GameState::with_source(SimpleRng::new(5), config);
    game.start();

    // Sink the piece, then start the lock delay.
    while game.move_down() {}
    game.update(200);
    assert_eq!(game.lock_timer_ms(), 200);

    if game.move_left() || game.move_right() {
        assert_eq!(game.lock_timer_ms(), 200);
    }
}

#[test]
fn test_keys_drive_the_engine() {
    let mut game = GameState::new(1);
    let mut input = InputHandler::new();

    let start = map_key(KeyEvent::from(KeyCode::Enter)).unwrap();
    game.apply_command(start);
    assert_eq!(game.state(), SessionState::Playing);

    let x0 = game.active().unwrap().x;
    if let Some(cmd) = input.handle_key_press(KeyEvent::from(KeyCode::Right)) {
        assert!(game.apply_command(cmd).is_applied());
    }
    assert_eq!(game.active().unwrap().x, x0 + 1);

    // Pressing soft drop steps down at once; holding it speeds up gravity.
    let y0 = game.active().unwrap().y;
    let step = input.handle_key_press(KeyEvent::from(KeyCode::Down));
    assert_eq!(step, Some(GameCommand::MoveDown));
    assert!(game.apply_command(GameCommand::MoveDown).is_applied());
    assert_eq!(game.active().unwrap().y, y0 + 1);
    assert_eq!(input.handle_key_press(KeyEvent::from(KeyCode::Down)), None);

    game.set_soft_drop(input.soft_drop_held());
    assert!(game.soft_drop());
}
