//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the duel. It renders a
//! [`core::MatchSnapshot`] into a plain framebuffer that is then flushed to
//! the terminal as a diff against the previous frame.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure so views can be tested without a terminal
//! - Allow precise control over aspect ratio (2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod render_throttle;
pub mod renderer;

pub use duel_tetris_core as core;
pub use duel_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{player_color, AnchorY, GameView, Viewport, P1_COLOR, P2_COLOR};
pub use render_throttle::{fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
