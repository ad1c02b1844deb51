use duel_tetris::core::{Match, MatchConfig};
use duel_tetris::term::{fingerprint, RenderThrottle};
use duel_tetris::types::{Command, PlayerId};

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
}

#[test]
fn render_throttle_renders_on_change() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
    assert!(t.should_render(1, 2));
    assert!(!t.should_render(2, 2));
}

#[test]
fn render_throttle_refreshes_unchanged_frames_periodically() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
    assert!(!t.should_render(10, 1));
    assert!(!t.should_render(249, 1));
    assert!(t.should_render(250, 1));
    assert!(!t.should_render(251, 1));
}

#[test]
fn render_throttle_invalidate_forces_next_frame() {
    let mut t = RenderThrottle::new(250);
    assert!(t.should_render(0, 1));
    t.invalidate();
    assert!(t.should_render(1, 1));
    assert!(!t.should_render(2, 1));
}

#[test]
fn snapshot_fingerprint_tracks_match_changes() {
    let mut game = Match::new(MatchConfig::with_size(16, 8)).unwrap();
    let a = fingerprint(&game.snapshot());
    assert_eq!(a, fingerprint(&game.snapshot()));

    assert!(game.move_player(PlayerId::One, Command::SteerDown));
    assert_ne!(a, fingerprint(&game.snapshot()));
}
