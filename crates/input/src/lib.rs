//! Terminal input module.
//!
//! Maps `crossterm` key events to per-player [`types::Command`]s plus the
//! match-level pause and restart actions. Both players share one keyboard,
//! so every binding resolves to exactly one player.

pub mod map;

pub use duel_tetris_types as types;

pub use map::{handle_key_event, should_quit, InputAction};
