#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Grid dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    // Coordinates are range-checked before being cast back to usize
    clippy::cast_sign_loss
)]

use log::{debug, info};
use std::collections::HashSet;

use crate::piece::Piece;

/// Value of an empty cell.
pub const EMPTY: i32 = 0;

/// Returned by [`Grid::get`] for coordinates outside the grid. Never stored.
pub const OUT_OF_BOUNDS: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<Vec<i32>>,
}

impl Grid {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![EMPTY; height]; width],
        }
    }

    pub fn clear(&mut self) {
        for column in &mut self.cells {
            column.fill(EMPTY);
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell value at `(x, y)`, or [`OUT_OF_BOUNDS`] when off the grid.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> i32 {
        if self.in_bounds(x, y) {
            self.cells[x as usize][y as usize]
        } else {
            OUT_OF_BOUNDS
        }
    }

    /// Write `value` at `(x, y)`. Off-grid writes are logged and dropped.
    pub fn set(&mut self, x: i32, y: i32, value: i32) {
        if self.in_bounds(x, y) {
            self.cells[x as usize][y as usize] = value;
        } else {
            info!("Ignoring write of {value} outside the grid at {x},{y}");
        }
    }

    /// Whether `piece` fits with its shape centre on `(x, y)`.
    ///
    /// Every occupied cell of the shape must land on an empty grid cell; off-grid
    /// cells read as [`OUT_OF_BOUNDS`] and therefore block.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, x: i32, y: i32) -> bool {
        let (origin_x, origin_y) = (x - 1, y - 1);

        for (block_x, block_y) in piece.occupied() {
            let cell_x = origin_x + block_x as i32;
            let cell_y = origin_y + block_y as i32;
            if self.get(cell_x, cell_y) != EMPTY {
                debug!("Cannot place {piece} at {x},{y}: conflict at {cell_x},{cell_y}");
                return false;
            }
        }

        true
    }

    /// Write `piece` into the grid centred on `(x, y)`.
    ///
    /// Re-validates first and leaves the grid untouched when the piece does not
    /// fit. Returns whether anything was written.
    pub fn place(&mut self, piece: &Piece, x: i32, y: i32) -> bool {
        if !self.can_place(piece, x, y) {
            return false;
        }

        let (origin_x, origin_y) = (x - 1, y - 1);
        let value = piece.value();
        for (block_x, block_y) in piece.occupied() {
            self.set(origin_x + block_x as i32, origin_y + block_y as i32, value);
        }
        true
    }

    fn is_filled(&self, x: usize, y: usize) -> bool {
        let value = self.cells[x][y];
        value != EMPTY && value != OUT_OF_BOUNDS
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height && (0..self.width).all(|x| self.is_filled(x, y))
    }

    #[must_use]
    pub fn is_column_full(&self, x: usize) -> bool {
        x < self.width && (0..self.height).all(|y| self.is_filled(x, y))
    }

    /// Find every full row and column.
    ///
    /// Returns the number of full lines and the set of cells they cover. A cell
    /// shared by a full row and a full column appears once in the set but both
    /// lines are counted.
    #[must_use]
    pub fn full_lines(&self) -> (u32, HashSet<Coordinate>) {
        let mut lines = 0;
        let mut cells = HashSet::new();

        for y in 0..self.height {
            if self.is_row_full(y) {
                lines += 1;
                cells.extend((0..self.width).map(|x| Coordinate::new(x as i32, y as i32)));
            }
        }

        for x in 0..self.width {
            if self.is_column_full(x) {
                lines += 1;
                cells.extend((0..self.height).map(|y| Coordinate::new(x as i32, y as i32)));
            }
        }

        (lines, cells)
    }

    /// Reset every listed cell to [`EMPTY`].
    pub fn clear_cells(&mut self, cells: &HashSet<Coordinate>) {
        for cell in cells {
            self.set(cell.x, cell.y, EMPTY);
        }
    }

    /// Concatenated cell values of the top-left `size`x`size` region, row by row.
    ///
    /// Cells beyond the grid edge are written as empty.
    #[must_use]
    pub fn snapshot(&self, size: usize) -> String {
        let mut snapshot = String::new();
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let value = self.get(x, y).max(EMPTY);
                snapshot.push_str(&value.to_string());
            }
        }
        snapshot
    }
}
