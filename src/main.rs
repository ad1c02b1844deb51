//! Terminal duel runner (default binary).
//!
//! Drives one [`Match`] from the keyboard: renders, waits for input until the
//! next step is due, steps, and reschedules from the match's current advance
//! interval.
//!
//! Environment:
//! - `DUEL_CONFIG`: JSON file with a `MatchConfig` (missing fields use defaults)
//! - `DUEL_*`: per-field overrides, see `MatchConfig::from_env`
//! - `DUEL_LOG`: log file path; `RUST_LOG` sets the filter (default `info`)

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use duel_tetris::core::{Match, MatchConfig, MatchSnapshot};
use duel_tetris::input::{handle_key_event, should_quit, InputAction};
use duel_tetris::term::{
    fingerprint, FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport,
};

/// Redraw an unchanged frame at most this often.
const IDLE_REFRESH_MS: u64 = 500;

fn main() -> Result<()> {
    init_logging()?;

    let config = load_config()?;
    let mut game = Match::new(config).context("invalid match configuration")?;
    info!(?config, "starting duel");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("DUEL_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// `DUEL_CONFIG` file if set, then `DUEL_*` overrides.
fn load_config() -> Result<MatchConfig> {
    let base = match std::env::var("DUEL_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("read config file {path}"))?;
            serde_json::from_str::<MatchConfig>(&text)
                .with_context(|| format!("parse config file {path}"))?
        }
        Err(_) => MatchConfig::default(),
    };
    Ok(base.overlay(|key| std::env::var(key).ok()))
}

fn step_delay(game: &Match) -> Duration {
    Duration::from_millis(game.advance_interval() as u64)
}

fn run(term: &mut TerminalRenderer, game: &mut Match) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = MatchSnapshot::default();
    let mut throttle = RenderThrottle::new(IDLE_REFRESH_MS);

    let started = Instant::now();
    let mut next_step = Instant::now() + step_delay(game);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&(&snap, w, h))) {
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input until the next step is due.
        let timeout = next_step.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match handle_key_event(key) {
                        Some(InputAction::Player(player, command)) => {
                            game.move_player(player, command);
                        }
                        Some(InputAction::Pause) => {
                            if game.toggle_pause() && !game.is_paused() {
                                next_step = Instant::now() + step_delay(game);
                            }
                        }
                        Some(InputAction::Restart) => {
                            game.reset();
                            next_step = Instant::now() + step_delay(game);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Step and reschedule from the (possibly shorter) interval.
        if Instant::now() >= next_step {
            game.step();
            next_step = Instant::now() + step_delay(game);
        }

        for event in game.drain_events() {
            debug!(?event, "match event");
        }
    }
}
