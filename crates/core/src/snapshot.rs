use serde::Serialize;

use crate::piece::Piece;
use crate::types::{MatchPhase, PlayerId, ShapeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub shape: ShapeKind,
    pub owner: PlayerId,
    pub x: i8,
    pub y: i8,
    /// Absolute grid cells covered by the piece.
    pub blocks: [(i8, i8); 4],
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            shape: value.shape(),
            owner: value.owner(),
            x: value.x(),
            y: value.y(),
            blocks: value.cells(),
        }
    }
}

/// Read-only copy of everything a presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MatchSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cell tokens: 0 empty, 1 player one, 2 player two.
    pub cells: Vec<u8>,
    /// Active pieces indexed by [`PlayerId::index`].
    pub pieces: [Option<PieceSnapshot>; 2],
    pub next: [ShapeKind; 2],
    pub scores: [u32; 2],
    pub interval_ms: u32,
    pub phase: MatchPhase,
    pub winner: Option<PlayerId>,
    pub round: u32,
}

impl MatchSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.pieces = [None, None];
        self.next = [ShapeKind::I; 2];
        self.scores = [0; 2];
        self.interval_ms = 0;
        self.phase = MatchPhase::Playing;
        self.winner = None;
        self.round = 0;
    }

    /// Locked token at (x, y); 0 when empty or out of bounds.
    pub fn token(&self, x: i8, y: i8) -> u8 {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return 0;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Owner of the active piece covering (x, y), if any.
    pub fn piece_at(&self, x: i8, y: i8) -> Option<PlayerId> {
        self.pieces
            .iter()
            .flatten()
            .find(|p| p.blocks.contains(&(x, y)))
            .map(|p| p.owner)
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn next_shape(&self, player: PlayerId) -> ShapeKind {
        self.next[player.index()]
    }

    pub fn is_paused(&self) -> bool {
        self.phase == MatchPhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}

impl Default for MatchSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            pieces: [None, None],
            next: [ShapeKind::I; 2],
            scores: [0; 2],
            interval_ms: 0,
            phase: MatchPhase::Playing,
            winner: None,
            round: 0,
        }
    }
}
