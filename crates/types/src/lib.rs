//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic, so they can be shared by the
//! match core, the terminal presentation layer and the input mapping.
//!
//! # Playfield
//!
//! The two players share one grid. Pieces travel horizontally:
//!
//! - **Player one** enters at the left edge and advances toward +x
//! - **Player two** enters at the right edge and advances toward -x
//! - Steering moves a piece along y (up is -y)
//!
//! # Default Match Settings
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 30 | Grid columns |
//! | `DEFAULT_HEIGHT` | 14 | Grid rows |
//! | `DEFAULT_INTERVAL_MS` | 1000 | Initial advance interval |
//! | `DEFAULT_SPEED_STEP_MS` | 50 | Interval reduction per clearing pass |
//! | `DEFAULT_MIN_INTERVAL_MS` | 200 | Fastest advance interval |
//! | `DEFAULT_POINTS_PER_PIECE` | 100 | Awarded to the player whose piece locks |
//! | `DEFAULT_POINTS_PER_LINE` | 1000 | Awarded to both players per cleared column |
//!
//! # Examples
//!
//! ```
//! use duel_tetris_types::{Command, PlayerId, ShapeKind, SpawnSide};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Command::from_str("steerUp"), Some(Command::SteerUp));
//!
//! assert_eq!(PlayerId::One.other(), PlayerId::Two);
//! assert_eq!(PlayerId::One.spawn_side(), SpawnSide::Left);
//! assert_eq!(PlayerId::Two.spawn_side().forward_dx(), -1);
//! ```

use serde::{Deserialize, Serialize};

/// Default grid width in cells (30 columns)
pub const DEFAULT_WIDTH: u8 = 30;

/// Default grid height in cells (14 rows)
pub const DEFAULT_HEIGHT: u8 = 14;

/// Initial time between forced advances (1000ms)
pub const DEFAULT_INTERVAL_MS: u32 = 1000;

/// Interval reduction applied after every clearing pass (50ms)
pub const DEFAULT_SPEED_STEP_MS: u32 = 50;

/// Advance interval floor (200ms)
pub const DEFAULT_MIN_INTERVAL_MS: u32 = 200;

/// Points for locking a piece
pub const DEFAULT_POINTS_PER_PIECE: u32 = 100;

/// Points per cleared column, paid to both players
pub const DEFAULT_POINTS_PER_LINE: u32 = 1000;

/// Largest grid dimension representable by the `i8` coordinate space.
pub const MAX_DIMENSION: u8 = i8::MAX as u8;

/// The two players sharing the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Both players in processing order (player one always first).
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    /// Index into per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    /// The opponent.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Edge of the grid this player's pieces enter from.
    pub fn spawn_side(self) -> SpawnSide {
        match self {
            PlayerId::One => SpawnSide::Left,
            PlayerId::Two => SpawnSide::Right,
        }
    }

    /// Grid occupancy token written when this player's piece locks.
    pub fn token(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    /// Inverse of [`PlayerId::token`].
    pub fn from_token(token: u8) -> Option<Self> {
        match token {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    /// Parse from string (case-insensitive): "one"/"1"/"p1", "two"/"2"/"p2"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "one" | "1" | "p1" => Some(PlayerId::One),
            "two" | "2" | "p2" => Some(PlayerId::Two),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerId::One => "one",
            PlayerId::Two => "two",
        }
    }

    /// Short label used by the presentation layer.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerId::One => "P1",
            PlayerId::Two => "P2",
        }
    }
}

/// Edge a player's pieces enter from.
///
/// The spawn side also fixes the travel direction: pieces always advance away
/// from the edge they entered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnSide {
    Left,
    Right,
}

impl SpawnSide {
    /// Unit step along x for a forward move.
    #[inline]
    pub fn forward_dx(self) -> i8 {
        match self {
            SpawnSide::Left => 1,
            SpawnSide::Right => -1,
        }
    }
}

/// The seven piece shapes
///
/// Shapes are a closed set; each maps to a fixed offset table in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }

    /// Position in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ShapeKind::I => 0,
            ShapeKind::O => 1,
            ShapeKind::T => 2,
            ShapeKind::S => 3,
            ShapeKind::Z => 4,
            ShapeKind::J => 5,
            ShapeKind::L => 6,
        }
    }
}

/// Per-player input commands
///
/// These commands are used by both human input and test drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Move piece one cell toward the top edge
    SteerUp,
    /// Move piece one cell toward the bottom edge
    SteerDown,
    /// Move piece one cell in its travel direction
    Forward,
    /// Move piece one cell back toward its spawn edge
    Backward,
    /// Rotate piece 90° about its origin
    Rotate,
}

impl Command {
    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use duel_tetris_types::Command;
    ///
    /// assert_eq!(Command::from_str("forward"), Some(Command::Forward));
    /// assert_eq!(Command::from_str("steerDown"), Some(Command::SteerDown));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "steerup" | "up" => Some(Command::SteerUp),
            "steerdown" | "down" => Some(Command::SteerDown),
            "forward" => Some(Command::Forward),
            "backward" => Some(Command::Backward),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::SteerUp => "steerUp",
            Command::SteerDown => "steerDown",
            Command::Forward => "forward",
            Command::Backward => "backward",
            Command::Rotate => "rotate",
        }
    }
}

/// Match lifecycle.
///
/// `Playing <-> Paused`, either of them -> `GameOver`. Only a reset leaves
/// `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    Playing,
    Paused,
    GameOver,
}

impl MatchPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchPhase::Playing => "playing",
            MatchPhase::Paused => "paused",
            MatchPhase::GameOver => "game_over",
        }
    }
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(PlayerId)`: Cell filled by a piece that player locked
pub type Cell = Option<PlayerId>;

/// Observable side effects recorded by the match controller.
///
/// The controller appends events in the order they happen; a presentation
/// layer drains them after each call it makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    PieceLocked { player: PlayerId, points: u32 },
    ColumnsCleared { count: u32, points_each: u32 },
    ScoreChanged { player: PlayerId, score: u32 },
    NextShapeChanged { player: PlayerId, shape: ShapeKind },
    IntervalChanged { interval_ms: u32 },
    PauseChanged { paused: bool },
    GameOver { winner: PlayerId, scores: [u32; 2] },
    Reset { round: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn original_match_defaults() {
        assert_eq!(DEFAULT_WIDTH, 30);
        assert_eq!(DEFAULT_HEIGHT, 14);
        assert_eq!(DEFAULT_INTERVAL_MS, 1000);
        assert_eq!(DEFAULT_SPEED_STEP_MS, 50);
        assert_eq!(DEFAULT_MIN_INTERVAL_MS, 200);
        assert_eq!(DEFAULT_POINTS_PER_PIECE, 100);
        assert_eq!(DEFAULT_POINTS_PER_LINE, 1000);
    }

    #[test]
    fn player_tokens_roundtrip() {
        for p in PlayerId::ALL {
            assert_eq!(PlayerId::from_token(p.token()), Some(p));
            assert_eq!(p.other().other(), p);
        }
        assert_eq!(PlayerId::from_token(0), None);
    }

    #[test]
    fn spawn_sides_travel_toward_each_other() {
        assert_eq!(PlayerId::One.spawn_side().forward_dx(), 1);
        assert_eq!(PlayerId::Two.spawn_side().forward_dx(), -1);
    }

    #[test]
    fn shape_index_matches_table_order() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(ShapeKind::from_str(kind.as_str()), Some(*kind));
        }
    }

    #[test]
    fn command_strings_roundtrip() {
        for c in [
            Command::SteerUp,
            Command::SteerDown,
            Command::Forward,
            Command::Backward,
            Command::Rotate,
        ] {
            assert_eq!(Command::from_str(c.as_str()), Some(c));
        }
    }
}
