//! Lights Out: an `r x c` grid, `r*c <= 64`.
//!
//! A position is an `r*c`-bit integer; bit `i*c+j` is cell `(i,j)`. Pressing
//! a cell toggles it and its orthogonal neighbours.

use log::warn;
use puzzle::{Move as MoveTrait, Position, Puzzle};

pub const DEFAULT_ROWS: usize = 3;
pub const DEFAULT_COLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightsOutState(pub u64);

impl Position for LightsOutState {
    fn fingerprint(&self) -> u64 {
        self.0
    }
}

/// Out-of-range coordinates are rejected at construction rather than
/// silently accepted and turned into a no-op move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightsOutMove {
    pub row: usize,
    pub col: usize,
}

impl LightsOutMove {
    pub fn new(row: usize, col: usize, puzzle: &LightsOut) -> Option<Self> {
        if row < puzzle.rows && col < puzzle.cols {
            Some(LightsOutMove { row, col })
        } else {
            None
        }
    }
}

impl MoveTrait for LightsOutMove {
    fn describe(&self) -> String {
        format!("({}, {})", self.row, self.col)
    }
}

pub struct LightsOut {
    rows: usize,
    cols: usize,
}

impl LightsOut {
    /// Falls back to 3x3 if either dimension is zero, either dimension
    /// exceeds 64, or the product exceeds 64 cells.
    pub fn new(rows: usize, cols: usize) -> Self {
        if rows == 0 || cols == 0 || rows > 64 || cols > 64 || rows * cols > 64 {
            warn!("LightsOut: {rows}x{cols} invalid; falling back to {DEFAULT_ROWS}x{DEFAULT_COLS}");
            return LightsOut {
                rows: DEFAULT_ROWS,
                cols: DEFAULT_COLS,
            };
        }
        LightsOut { rows, cols }
    }
}

impl Puzzle for LightsOut {
    type State = LightsOutState;
    type Move = LightsOutMove;

    fn initial_state(&self) -> LightsOutState {
        LightsOutState(0)
    }

    fn is_primitive(&self, state: &LightsOutState) -> bool {
        state.0 == 0
    }

    fn moves(&self, _state: &LightsOutState) -> Vec<LightsOutMove> {
        let mut moves = Vec::with_capacity(self.rows * self.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                moves.push(LightsOutMove { row: i, col: j });
            }
        }
        moves
    }

    fn do_move(&self, state: &LightsOutState, mv: &LightsOutMove) -> Option<LightsOutState> {
        if mv.row >= self.rows || mv.col >= self.cols {
            return None;
        }
        let mut next = state.0;
        let (i, j) = (mv.row, mv.col);
        next ^= 1u64 << (i * self.cols + j);
        if j > 0 {
            next ^= 1u64 << (i * self.cols + j - 1);
        }
        if j + 1 < self.cols {
            next ^= 1u64 << (i * self.cols + j + 1);
        }
        if i > 0 {
            next ^= 1u64 << ((i - 1) * self.cols + j);
        }
        if i + 1 < self.rows {
            next ^= 1u64 << ((i + 1) * self.cols + j);
        }
        Some(LightsOutState(next))
    }

    fn hash_size(&self) -> u64 {
        1u64 << (self.rows * self.cols)
    }
}
