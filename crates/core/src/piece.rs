//! Piece module - a player's moving piece and its collision rules
//!
//! A piece never holds references to the grid or to the other player's piece.
//! Every movement call receives an [`Arena`], a read-only view of the grid plus
//! the rival piece, which keeps ownership with the match controller.

use crate::grid::Grid;
use crate::shapes::{extent_x, rotate_blocks, spawn_blocks, Blocks};
use crate::types::{Command, PlayerId, ShapeKind};

/// Read-only collision context for one movement check.
#[derive(Debug, Clone, Copy)]
pub struct Arena<'a> {
    grid: &'a Grid,
    rival: Option<&'a Piece>,
}

impl<'a> Arena<'a> {
    pub fn new(grid: &'a Grid, rival: Option<&'a Piece>) -> Self {
        Self { grid, rival }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// A cell a piece may occupy: in bounds, empty in the grid, and not
    /// covered by the rival piece while that piece is active.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if !self.grid.is_empty(x, y) {
            return false;
        }
        match self.rival {
            Some(rival) if rival.is_active() => !rival.occupies(x, y),
            _ => true,
        }
    }
}

/// A player's piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    shape: ShapeKind,
    owner: PlayerId,
    blocks: Blocks,
    x: i8,
    y: i8,
    active: bool,
}

impl Piece {
    /// Create a piece at its owner's spawn edge.
    ///
    /// The origin starts on the top row. The left-spawning owner starts at
    /// x = 0; the right-spawning owner starts at `grid_width - piece_width`.
    pub fn spawn(shape: ShapeKind, owner: PlayerId, grid_width: u8) -> Self {
        let blocks = spawn_blocks(shape);
        let x = match owner.spawn_side() {
            crate::types::SpawnSide::Left => 0,
            crate::types::SpawnSide::Right => (grid_width as i16 - extent_x(&blocks) as i16)
                .clamp(i8::MIN as i16, i8::MAX as i16) as i8,
        };
        Self {
            shape,
            owner,
            blocks,
            x,
            y: 0,
            active: true,
        }
    }

    /// Create a piece at an explicit origin.
    pub fn at(shape: ShapeKind, owner: PlayerId, x: i8, y: i8) -> Self {
        Self {
            shape,
            owner,
            blocks: spawn_blocks(shape),
            x,
            y,
            active: true,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn blocks(&self) -> &Blocks {
        &self.blocks
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Absolute grid cells covered by the piece.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.blocks
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    pub fn occupies(&self, x: i8, y: i8) -> bool {
        self.cells().iter().any(|&c| c == (x, y))
    }

    /// Check the current placement against the arena.
    pub fn is_valid_position(&self, arena: &Arena<'_>) -> bool {
        Self::fits(&self.blocks, self.x, self.y, arena)
    }

    /// Check a proposed block set at a proposed origin.
    pub fn fits(blocks: &Blocks, x: i8, y: i8, arena: &Arena<'_>) -> bool {
        blocks.iter().all(|&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(px), Some(py)) => arena.is_free(px, py),
            _ => false,
        })
    }

    fn try_shift(&mut self, dx: i8, dy: i8, arena: &Arena<'_>) -> bool {
        if !self.active {
            return false;
        }
        let (Some(nx), Some(ny)) = (self.x.checked_add(dx), self.y.checked_add(dy)) else {
            return false;
        };
        if !Self::fits(&self.blocks, nx, ny, arena) {
            return false;
        }
        self.x = nx;
        self.y = ny;
        true
    }

    /// Step one cell in the owner's travel direction.
    pub fn move_forward(&mut self, arena: &Arena<'_>) -> bool {
        self.try_shift(self.owner.spawn_side().forward_dx(), 0, arena)
    }

    /// Step one cell back toward the spawn edge.
    pub fn move_backward(&mut self, arena: &Arena<'_>) -> bool {
        self.try_shift(-self.owner.spawn_side().forward_dx(), 0, arena)
    }

    pub fn move_up(&mut self, arena: &Arena<'_>) -> bool {
        self.try_shift(0, -1, arena)
    }

    pub fn move_down(&mut self, arena: &Arena<'_>) -> bool {
        self.try_shift(0, 1, arena)
    }

    /// Rotate 90° about the origin; the old offsets stay if the result is blocked.
    pub fn rotate(&mut self, arena: &Arena<'_>) -> bool {
        if !self.active {
            return false;
        }
        let rotated = rotate_blocks(&self.blocks);
        if !Self::fits(&rotated, self.x, self.y, arena) {
            return false;
        }
        self.blocks = rotated;
        true
    }

    /// Dispatch an input command.
    pub fn apply(&mut self, command: Command, arena: &Arena<'_>) -> bool {
        match command {
            Command::SteerUp => self.move_up(arena),
            Command::SteerDown => self.move_down(arena),
            Command::Forward => self.move_forward(arena),
            Command::Backward => self.move_backward(arena),
            Command::Rotate => self.rotate(arena),
        }
    }

    /// Mark the piece as locked; it stops colliding and moving.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_positions() {
        let p1 = Piece::spawn(ShapeKind::T, PlayerId::One, 10);
        assert_eq!((p1.x(), p1.y()), (0, 0));

        let p2 = Piece::spawn(ShapeKind::T, PlayerId::Two, 10);
        assert_eq!((p2.x(), p2.y()), (7, 0));

        let i2 = Piece::spawn(ShapeKind::I, PlayerId::Two, 10);
        assert_eq!(i2.x(), 6);
        assert!(i2.cells().iter().all(|&(x, _)| x < 10));
    }

    #[test]
    fn test_spawn_is_valid_on_empty_grid() {
        let grid = Grid::new(10, 6);
        for kind in ShapeKind::ALL {
            for owner in PlayerId::ALL {
                let piece = Piece::spawn(kind, owner, grid.width());
                assert!(piece.is_valid_position(&Arena::new(&grid, None)));
            }
        }
    }

    #[test]
    fn test_invalid_on_locked_overlap() {
        let mut grid = Grid::new(10, 6);
        grid.set(1, 0, Some(PlayerId::Two));
        let piece = Piece::spawn(ShapeKind::I, PlayerId::One, 10);
        assert!(!piece.is_valid_position(&Arena::new(&grid, None)));
    }

    #[test]
    fn test_invalid_out_of_bounds() {
        let grid = Grid::new(10, 6);
        let piece = Piece::at(ShapeKind::I, PlayerId::One, 7, 0);
        assert!(!piece.is_valid_position(&Arena::new(&grid, None)));
        let piece = Piece::at(ShapeKind::O, PlayerId::One, 0, 5);
        assert!(!piece.is_valid_position(&Arena::new(&grid, None)));
    }

    #[test]
    fn test_invalid_on_rival_overlap_only_while_active() {
        let grid = Grid::new(10, 6);
        let mut rival = Piece::at(ShapeKind::O, PlayerId::Two, 3, 0);
        let piece = Piece::at(ShapeKind::I, PlayerId::One, 0, 0);

        assert!(!piece.is_valid_position(&Arena::new(&grid, Some(&rival))));

        rival.deactivate();
        assert!(piece.is_valid_position(&Arena::new(&grid, Some(&rival))));
    }

    #[test]
    fn test_forward_direction_depends_on_owner() {
        let grid = Grid::new(10, 6);
        let arena = Arena::new(&grid, None);

        let mut p1 = Piece::spawn(ShapeKind::O, PlayerId::One, 10);
        assert!(p1.move_forward(&arena));
        assert_eq!(p1.x(), 1);

        let mut p2 = Piece::spawn(ShapeKind::O, PlayerId::Two, 10);
        assert!(p2.move_forward(&arena));
        assert_eq!(p2.x(), 7);
        assert!(p2.move_backward(&arena));
        assert!(!p2.move_backward(&arena));
        assert_eq!(p2.x(), 8);
    }

    #[test]
    fn test_blocked_move_leaves_state_unchanged() {
        let grid = Grid::new(6, 4);
        let arena = Arena::new(&grid, None);
        let mut piece = Piece::spawn(ShapeKind::T, PlayerId::One, 6);
        let before = piece;

        assert!(!piece.move_up(&arena));
        assert!(!piece.move_backward(&arena));
        assert_eq!(piece, before);

        assert!(piece.move_down(&arena));
        assert!(piece.move_down(&arena));
        assert!(!piece.move_down(&arena));
        assert_eq!(piece.y(), 2);
    }

    #[test]
    fn test_four_rotations_restore_offsets() {
        let grid = Grid::new(10, 10);
        let arena = Arena::new(&grid, None);
        for kind in ShapeKind::ALL {
            let mut piece = Piece::at(kind, PlayerId::One, 4, 4);
            let original = *piece.blocks();
            for _ in 0..4 {
                assert!(piece.rotate(&arena), "{:?} rotation blocked", kind);
            }
            assert_eq!(*piece.blocks(), original);
        }
    }

    #[test]
    fn test_blocked_rotation_keeps_offsets() {
        let grid = Grid::new(10, 6);
        let arena = Arena::new(&grid, None);
        // At x = 0 the rotated O needs column -1.
        let mut o = Piece::spawn(ShapeKind::O, PlayerId::One, 10);
        let before = *o.blocks();
        assert!(!o.rotate(&arena));
        assert_eq!(*o.blocks(), before);
    }

    #[test]
    fn test_rival_blocks_forward_move() {
        let grid = Grid::new(8, 4);
        let rival = Piece::at(ShapeKind::O, PlayerId::Two, 4, 0);
        let mut piece = Piece::at(ShapeKind::O, PlayerId::One, 2, 0);

        let arena = Arena::new(&grid, Some(&rival));
        assert!(!piece.move_forward(&arena));
        assert_eq!(piece.x(), 2);
        assert!(piece.move_down(&arena));
        assert!(piece.move_down(&arena));
        assert!(piece.move_forward(&arena));
    }

    #[test]
    fn test_inactive_piece_does_not_move() {
        let grid = Grid::new(8, 4);
        let arena = Arena::new(&grid, None);
        let mut piece = Piece::at(ShapeKind::O, PlayerId::One, 2, 0);
        piece.deactivate();
        assert!(!piece.apply(Command::Forward, &arena));
        assert!(!piece.apply(Command::Rotate, &arena));
    }
}
