use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_tetris::core::{Grid, Match, MatchConfig, MatchSnapshot};
use duel_tetris::term::{FrameBuffer, GameView, Viewport};
use duel_tetris::types::{Command, PlayerId};

fn bench_tick(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default()).unwrap();

    c.bench_function("match_tick_16ms", |b| {
        b.iter(|| {
            if game.tick(black_box(16)) && game.is_game_over() {
                game.reset();
            }
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_step(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default()).unwrap();

    c.bench_function("match_step", |b| {
        b.iter(|| {
            if !game.step() {
                game.reset();
            }
            game.drain_events().for_each(drop);
        })
    });
}

fn bench_column_clear(c: &mut Criterion) {
    c.bench_function("clear_4_columns", |b| {
        b.iter(|| {
            let mut grid = Grid::new(30, 14);
            for x in [0, 1, 28, 29] {
                for y in 0..14 {
                    grid.set(x, y, Some(PlayerId::One));
                }
            }
            black_box(grid.clear_full_columns());
        })
    });
}

fn bench_move_player(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default()).unwrap();

    c.bench_function("move_player", |b| {
        b.iter(|| {
            game.move_player(PlayerId::Two, black_box(Command::SteerDown));
            game.move_player(PlayerId::Two, black_box(Command::SteerUp));
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = Match::new(MatchConfig::default()).unwrap();
    game.move_player(PlayerId::One, Command::Forward);
    game.move_player(PlayerId::One, Command::SteerDown);

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.move_player(PlayerId::One, black_box(Command::Rotate));
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let game = Match::new(MatchConfig::default()).unwrap();
    let view = GameView::default();
    let mut snap = MatchSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    c.bench_function("snapshot_and_render", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(90, 24), &mut fb);
            black_box(fb.cells().len());
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_step,
    bench_column_clear,
    bench_move_player,
    bench_rotate,
    bench_render
);
criterion_main!(benches);
