//! End-to-end tests for the match controller through its public API

use duel_tetris::core::{Match, MatchConfig, Randomizer, SimpleRng};
use duel_tetris::types::{Command, MatchEvent, MatchPhase, PlayerId};

const COMMANDS: [Command; 5] = [
    Command::SteerUp,
    Command::SteerDown,
    Command::Forward,
    Command::Backward,
    Command::Rotate,
];

fn run_until_over(game: &mut Match, max_steps: usize) -> usize {
    for n in 0..max_steps {
        if game.is_game_over() {
            return n;
        }
        assert!(game.step());
    }
    max_steps
}

#[test]
fn test_idle_match_ends_with_a_winner() {
    let mut game = Match::new(MatchConfig::with_size(12, 6)).unwrap();
    let steps = run_until_over(&mut game, 2_000);
    assert!(steps < 2_000, "match never ended");

    assert_eq!(game.phase(), MatchPhase::GameOver);
    let winner = game.winner().expect("winner set on game over");

    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(
        events.last(),
        Some(&MatchEvent::GameOver {
            winner,
            scores: game.scores()
        })
    );

    // Nobody steered, so only the lower rows stay empty and no column clears.
    assert!(!events
        .iter()
        .any(|e| matches!(e, MatchEvent::ColumnsCleared { .. })));
    for player in PlayerId::ALL {
        assert_eq!(game.score(player) % 100, 0);
    }
}

#[test]
fn test_game_over_is_terminal() {
    let mut game = Match::new(MatchConfig::with_size(12, 6)).unwrap();
    run_until_over(&mut game, 2_000);
    assert!(game.is_game_over());

    let before = game.snapshot();
    for _ in 0..20 {
        assert!(!game.tick(60_000));
        assert!(!game.step());
        for player in PlayerId::ALL {
            for command in COMMANDS {
                assert!(!game.move_player(player, command));
            }
        }
    }
    assert!(!game.toggle_pause());
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_pause_and_resume() {
    let mut game = Match::new(MatchConfig::with_size(16, 8)).unwrap();
    assert!(game.toggle_pause());
    assert_eq!(game.phase(), MatchPhase::Paused);

    let before = game.snapshot();
    assert!(!game.tick(1_000_000));
    assert!(!game.move_player(PlayerId::Two, Command::SteerDown));
    assert_eq!(game.snapshot(), before);

    assert!(game.toggle_pause());
    assert_eq!(game.phase(), MatchPhase::Playing);
    assert!(game.step());
    assert_ne!(game.snapshot(), before);
}

#[test]
fn test_reset_after_game_over() {
    let mut game = Match::new(MatchConfig::with_size(12, 6)).unwrap();
    run_until_over(&mut game, 2_000);

    game.reset();
    assert_eq!(game.round(), 1);
    assert_eq!(game.phase(), MatchPhase::Playing);
    assert_eq!(game.winner(), None);
    assert_eq!(game.scores(), [0, 0]);
    assert_eq!(game.grid().occupied_count(), 0);
    assert_eq!(game.advance_interval(), game.config().initial_interval_ms);
    assert!(game.active_piece(PlayerId::One).is_some());
}

#[test]
fn test_same_config_replays_identically() {
    let config = MatchConfig {
        width: 14,
        height: 7,
        seed: 99,
        randomizer: Randomizer::Uniform,
        ..MatchConfig::default()
    };
    let mut a = Match::new(config).unwrap();
    let mut b = Match::new(config).unwrap();
    let mut rng = SimpleRng::new(5);

    for _ in 0..300 {
        let player = PlayerId::ALL[rng.next_range(2) as usize];
        let command = COMMANDS[rng.next_range(5) as usize];
        assert_eq!(a.move_player(player, command), b.move_player(player, command));
        assert_eq!(a.tick(250), b.tick(250));
    }
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.events(), b.events());
}

#[test]
fn test_random_play_keeps_invariants() {
    let config = MatchConfig {
        width: 10,
        height: 5,
        initial_interval_ms: 400,
        speed_step_ms: 100,
        min_interval_ms: 150,
        ..MatchConfig::default()
    };
    let mut game = Match::new(config).unwrap();
    let mut rng = SimpleRng::new(2024);
    let mut last_scores = game.scores();

    for _ in 0..3_000 {
        if game.is_game_over() {
            game.reset();
            last_scores = [0, 0];
        }

        let player = PlayerId::ALL[rng.next_range(2) as usize];
        let command = COMMANDS[rng.next_range(5) as usize];
        game.move_player(player, command);
        if rng.next_range(3) == 0 {
            game.step();
        }

        let interval = game.advance_interval();
        assert!(interval >= config.min_interval_ms);
        assert!(interval <= config.initial_interval_ms);

        let scores = game.scores();
        assert!(scores[0] >= last_scores[0] && scores[1] >= last_scores[1]);
        last_scores = scores;

        // Active pieces stay inside the grid, off locked cells, and never
        // overlap each other.
        let p1 = game.active_piece(PlayerId::One).map(|p| p.cells());
        let p2 = game.active_piece(PlayerId::Two).map(|p| p.cells());
        for cells in [p1, p2].iter().flatten() {
            for &(x, y) in cells {
                assert!(game.grid().is_within_bounds(x, y));
                assert_eq!(game.cell(x, y), None, "active cell ({x}, {y}) is locked");
            }
        }
        if let (Some(a), Some(b)) = (p1, p2) {
            assert!(a.iter().all(|c| !b.contains(c)));
        }

        for event in game.drain_events() {
            if let MatchEvent::ColumnsCleared { count, points_each } = event {
                assert!(count >= 1);
                assert_eq!(points_each, count * config.points_per_line);
            }
        }
    }
}

#[test]
fn test_tick_respects_interval() {
    let mut game = Match::new(MatchConfig::with_size(16, 8)).unwrap();
    let interval = game.advance_interval();
    let x0 = game.active_piece(PlayerId::One).unwrap().x();

    assert!(!game.tick(interval - 1));
    assert_eq!(game.active_piece(PlayerId::One).unwrap().x(), x0);
    assert!(game.tick(1));
    assert_eq!(game.active_piece(PlayerId::One).unwrap().x(), x0 + 1);
}

#[test]
fn test_config_from_json_builds_match() {
    let config: MatchConfig =
        serde_json::from_str(r#"{"width": 20, "height": 9, "randomizer": "uniform"}"#).unwrap();
    let game = Match::new(config).unwrap();
    assert_eq!(game.grid().width(), 20);
    assert_eq!(game.grid().height(), 9);
    assert_eq!(game.config().randomizer, Randomizer::Uniform);

    let bad: MatchConfig = serde_json::from_str(r#"{"width": 0}"#).unwrap();
    let err = Match::new(bad).unwrap_err();
    assert_eq!(err.to_string(), "grid width must be positive");
}
