//! Grid module - the shared playfield
//!
//! The grid is a `width x height` store of cells, each empty or holding the
//! token of the player whose piece locked there. Storage is a flat row-major
//! vector sized once at construction.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//!
//! Pieces travel horizontally, so full *columns* are what gets cleared. A
//! cleared column is refilled from the side facing the middle of the grid:
//! the right half settles toward the right wall, the left half toward the
//! left wall.

use arrayvec::ArrayVec;

use crate::types::{Cell, PlayerId};

/// Number of cleared column indices recorded per pass.
///
/// A single lock can complete at most four columns. The cap only bounds the
/// report; every full column is cleared regardless.
pub const MAX_REPORTED_COLUMNS: usize = 8;

/// Result of a clearing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearReport {
    /// Number of columns removed.
    pub count: u32,
    /// Column indices in the order they were cleared.
    pub columns: ArrayVec<i8, MAX_REPORTED_COLUMNS>,
}

impl ClearReport {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// The shared playfield using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    /// Flat cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid.
    ///
    /// Dimensions are validated by [`crate::MatchConfig`]; values above
    /// [`crate::types::MAX_DIMENSION`] are clamped so every cell stays
    /// addressable.
    pub fn new(width: u8, height: u8) -> Self {
        let width = width.min(crate::types::MAX_DIMENSION);
        let height = height.min(crate::types::MAX_DIMENSION);
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if !self.is_within_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Pure range check.
    #[inline]
    pub fn is_within_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && (x as i16) < self.width as i16 && y >= 0 && (y as i16) < self.height as i16
    }

    /// Get cell at position (x, y).
    ///
    /// Out-of-bounds positions read as empty.
    pub fn get(&self, x: i8, y: i8) -> Cell {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false (and changes nothing) if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    #[inline]
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        matches!(self.index(x, y), Some(idx) if self.cells[idx].is_none())
    }

    /// In bounds and filled.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.index(x, y), Some(idx) if self.cells[idx].is_some())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: i8) -> bool {
        if y < 0 || y as i16 >= self.height as i16 || self.width == 0 {
            return false;
        }
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Check if a column is completely filled
    pub fn is_column_full(&self, x: i8) -> bool {
        if x < 0 || x as i16 >= self.width as i16 || self.height == 0 {
            return false;
        }
        (0..self.height as i8).all(|y| self.is_occupied(x, y))
    }

    /// Column index splitting the two settling halves.
    #[inline]
    fn mid(&self) -> i8 {
        (self.width / 2) as i8
    }

    fn copy_column(&mut self, from: i8, to: i8) {
        for y in 0..self.height as i8 {
            let cell = self.get(from, y);
            self.set(to, y, cell);
        }
    }

    fn empty_column(&mut self, x: i8) {
        for y in 0..self.height as i8 {
            self.set(x, y, None);
        }
    }

    /// Clear column `x` and close the gap.
    ///
    /// Columns between the middle of the grid and `x` shift one step toward
    /// `x`; the middle-most column of that half becomes empty. Columns between
    /// `x` and its wall do not move.
    /// Returns false if `x` is out of range.
    pub fn clear_column(&mut self, x: i8) -> bool {
        if x < 0 || x as i16 >= self.width as i16 {
            return false;
        }

        let mid = self.mid();
        if x >= mid {
            for col in (mid..x).rev() {
                self.copy_column(col, col + 1);
            }
            self.empty_column(mid);
        } else {
            for col in (x + 1)..mid {
                self.copy_column(col, col - 1);
            }
            self.empty_column(mid - 1);
        }

        true
    }

    /// Find the first full column, scanning left to right.
    pub fn first_full_column(&self) -> Option<i8> {
        (0..self.width as i8).find(|&x| self.is_column_full(x))
    }

    /// Clear full columns until none remain.
    ///
    /// Every pass removes at least one filled cell, so the loop terminates.
    pub fn clear_full_columns(&mut self) -> ClearReport {
        let mut report = ClearReport::default();
        while let Some(x) = self.first_full_column() {
            self.clear_column(x);
            report.count += 1;
            let _ = report.columns.try_push(x);
        }
        report
    }

    /// Write a piece's absolute cells with the owner's token.
    ///
    /// Only empty cells are written; locked cells keep their owner. Returns
    /// false if any cell was out of bounds or already occupied.
    pub fn lock_cells(&mut self, cells: &[(i8, i8)], owner: PlayerId) -> bool {
        let mut clean = true;
        for &(x, y) in cells {
            if self.is_empty(x, y) {
                self.set(x, y, Some(owner));
            } else {
                clean = false;
            }
        }
        clean
    }

    /// Number of filled cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells (row-major)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from rows of text, for tests and fixtures.
    ///
    /// `'1'` and `'2'` are player tokens; anything else is empty. Row length
    /// sets the width.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u8;
        let mut grid = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let cell = ch.to_digit(10).and_then(|d| PlayerId::from_token(d as u8));
                grid.set(x as i8, y as i8, cell);
            }
        }
        grid
    }

    /// Render as rows of text (inverse of [`Grid::from_rows`]).
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as i8)
            .map(|y| {
                (0..self.width as i8)
                    .map(|x| match self.get(x, y) {
                        Some(p) => char::from(b'0' + p.token()),
                        None => '.',
                    })
                    .collect()
            })
            .collect()
    }
}
