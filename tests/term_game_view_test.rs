use duel_tetris::core::{Match, MatchConfig, MatchSnapshot};
use duel_tetris::term::{AnchorY, FrameBuffer, GameView, Viewport, P1_COLOR, P2_COLOR};
use duel_tetris::types::{MatchPhase, PlayerId};

/// 10x6 grid: with 2x1 cells the frame is 22x8.
fn small_snapshot() -> MatchSnapshot {
    Match::new(MatchConfig::with_size(10, 6)).unwrap().snapshot()
}

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

#[test]
fn term_view_renders_border_corners() {
    let snap = small_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 8));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 7).unwrap().ch, '└');
    assert_eq!(fb.get(21, 7).unwrap().ch, '┘');
}

#[test]
fn term_view_colors_locked_cells_by_owner() {
    let mut snap = small_snapshot();
    snap.pieces = [None, None];
    snap.cells[5 * 10] = 2; // (0, 5)
    snap.cells[5 * 10 + 9] = 1; // (9, 5)

    let fb = GameView::default().render(&snap, Viewport::new(22, 8));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let red = fb.get(1, 6).unwrap();
    assert_eq!(red.ch, '█');
    assert_eq!(red.style.fg, P2_COLOR);
    assert_eq!(fb.get(2, 6).unwrap().ch, '█');

    let blue = fb.get(1 + 9 * 2, 6).unwrap();
    assert_eq!(blue.ch, '█');
    assert_eq!(blue.style.fg, P1_COLOR);

    assert_eq!(fb.get(3, 6).unwrap().ch, '·');
}

#[test]
fn term_view_draws_both_active_pieces() {
    let snap = small_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 8));

    for piece in snap.pieces.iter().flatten() {
        for &(x, y) in &piece.blocks {
            let cell = fb.get(1 + x as u16 * 2, 1 + y as u16).unwrap();
            assert_eq!(cell.ch, '▓');
            let color = if piece.owner == PlayerId::One {
                P1_COLOR
            } else {
                P2_COLOR
            };
            assert_eq!(cell.style.fg, color);
            assert!(cell.style.bold);
        }
    }
}

#[test]
fn term_view_places_panels_on_each_players_side() {
    let snap = small_snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let vp = view.preferred_size(&snap);
    assert_eq!(vp, Viewport::new(50, 8));

    let fb = view.render(&snap, Viewport::new(vp.width, 16));
    let top = fb.row_text(0);
    assert!(top.starts_with("P1"));
    let right: String = top.chars().skip(38).take(2).collect();
    assert_eq!(right, "P2");

    let all = screen_text(&fb);
    assert_eq!(all.matches("SCORE").count(), 2);
    assert_eq!(all.matches("NEXT").count(), 2);
    assert!(all.contains("1000ms"));
}

#[test]
fn term_view_skips_panels_on_narrow_viewports() {
    let snap = small_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 8));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = small_snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 20));

    // start_y = (20 - 8) / 2 = 6
    assert_eq!(fb.get(0, 6).unwrap().ch, '┌');
}

#[test]
fn term_view_shows_pause_overlay() {
    let mut snap = small_snapshot();
    snap.phase = MatchPhase::Paused;
    let fb = GameView::default().render(&snap, Viewport::new(22, 8));
    assert!(screen_text(&fb).contains("PAUSED"));
}

#[test]
fn term_view_announces_winner() {
    let mut snap = small_snapshot();
    snap.phase = MatchPhase::GameOver;
    snap.winner = Some(PlayerId::Two);
    let fb = GameView::default().render(&snap, Viewport::new(50, 16));
    let all = screen_text(&fb);
    assert!(all.contains("P2 WINS"));
    assert!(all.contains("WINNER"));
    assert!(!all.contains("P1 WINS"));
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let snap = small_snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(22, 8), &mut fb);
    assert_eq!((fb.width(), fb.height()), (22, 8));

    view.render_into(&snap, Viewport::new(50, 16), &mut fb);
    assert_eq!((fb.width(), fb.height()), (50, 16));
    assert_eq!(fb, view.render(&snap, Viewport::new(50, 16)));
}
