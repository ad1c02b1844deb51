//! Core module - pure match logic with no terminal or I/O dependencies
//!
//! This crate contains the shared grid, the pieces and their collision rules,
//! scoring and the round controller. Everything is deterministic for a given
//! [`MatchConfig`] and call sequence.
//!
//! # Example
//!
//! ```
//! use duel_tetris_core::{Match, MatchConfig};
//! use duel_tetris_core::types::{Command, PlayerId};
//!
//! let mut game = Match::new(MatchConfig::with_size(16, 8)).unwrap();
//! game.move_player(PlayerId::One, Command::SteerDown);
//! assert!(game.step());
//! assert_eq!(game.score(PlayerId::One), 0);
//! ```

pub mod config;
pub mod grid;
pub mod match_state;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use duel_tetris_types as types;

// Re-export commonly used types
pub use config::{Axis, ConfigError, MatchConfig};
pub use grid::{ClearReport, Grid};
pub use match_state::Match;
pub use piece::{Arena, Piece};
pub use rng::{Randomizer, ShapeQueue, SimpleRng};
pub use snapshot::{MatchSnapshot, PieceSnapshot};
