#![warn(clippy::all, clippy::pedantic)]

use std::fmt;

/// Side length of every shape in the catalogue.
pub const SHAPE_SIZE: usize = 3;

/// Number of pieces in the catalogue.
pub const PIECE_COUNT: usize = 15;

/// Occupancy pattern indexed as `blocks[x][y]`.
pub type Shape = [[bool; SHAPE_SIZE]; SHAPE_SIZE];

const X: bool = true;
const O: bool = false;

// (name, blocks[x][y]) for each catalogue index
const CATALOGUE: [(&str, Shape); PIECE_COUNT] = [
    ("Line", [[O, O, O], [X, X, X], [O, O, O]]),
    ("C", [[O, O, O], [X, X, X], [X, O, X]]),
    ("Plus", [[O, X, O], [X, X, X], [O, X, O]]),
    ("Dot", [[O, O, O], [O, X, O], [O, O, O]]),
    ("Square", [[X, X, O], [X, X, O], [O, O, O]]),
    ("L", [[O, O, O], [X, X, X], [O, O, X]]),
    ("J", [[O, O, X], [X, X, X], [O, O, O]]),
    ("S", [[O, O, O], [O, X, X], [X, X, O]]),
    ("Z", [[X, X, O], [O, X, X], [O, O, O]]),
    ("T", [[X, O, O], [X, X, O], [X, O, O]]),
    ("X", [[X, O, X], [O, X, O], [X, O, X]]),
    ("Corner", [[O, O, O], [X, X, O], [X, O, O]]),
    ("Inverse Corner", [[X, O, O], [X, X, O], [O, O, O]]),
    ("Diagonal", [[X, O, O], [O, X, O], [O, O, X]]),
    ("Double", [[O, X, O], [O, X, O], [O, O, O]]),
];

/// An immutable shape and colour drawn from the fixed catalogue.
///
/// Rotating a piece yields a new value; the catalogue entry is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    index: usize,
    blocks: Shape,
}

impl Piece {
    /// Build the catalogue piece at `index`, or `None` if the index is outside
    /// `0..PIECE_COUNT`.
    #[must_use]
    pub fn create(index: usize) -> Option<Self> {
        CATALOGUE.get(index).map(|(_, blocks)| Self {
            index,
            blocks: *blocks,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Colour written into the grid for this piece (`index + 1`).
    #[must_use]
    pub fn value(&self) -> i32 {
        // Catalogue indices are tiny, the cast never truncates
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let index = self.index as i32;
        index + 1
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        CATALOGUE[self.index].0
    }

    #[must_use]
    pub fn blocks(&self) -> &Shape {
        &self.blocks
    }

    /// Offsets `(x, y)` of every occupied cell in the shape.
    #[must_use]
    pub fn occupied(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for x in 0..SHAPE_SIZE {
            for y in 0..SHAPE_SIZE {
                if self.blocks[x][y] {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    /// Return this piece turned `times` quarter turns clockwise.
    #[must_use]
    pub fn rotated(&self, times: usize) -> Self {
        let mut blocks = self.blocks;
        for _ in 0..times % 4 {
            let mut turned = [[false; SHAPE_SIZE]; SHAPE_SIZE];
            for x in 0..SHAPE_SIZE {
                for y in 0..SHAPE_SIZE {
                    turned[SHAPE_SIZE - 1 - y][x] = blocks[x][y];
                }
            }
            blocks = turned;
        }
        Self {
            index: self.index,
            blocks,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.index)
    }
}
