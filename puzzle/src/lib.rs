//! Generic retrograde-analysis puzzle solver.
//!
//! A puzzle implements the [`Puzzle`] capability trait: an initial state, a
//! primitive (terminal) predicate, legal-move enumeration, and a pure
//! transition function. Given that, [`GraphSolver`] and [`ArraySolver`]
//! compute the remoteness (or BFS depth) of every reachable state, and
//! either can reconstruct a shortest move sequence from a query state to a
//! primitive.

mod array_solver;
mod error;
mod graph_solver;
mod path;

pub use array_solver::ArraySolver;
pub use error::SolverError;
pub use graph_solver::GraphSolver;

use std::fmt::Debug;

/// A puzzle state: a stable 64-bit fingerprint plus value equality.
///
/// `fingerprint` must be a *perfect* identifier within a single puzzle
/// instance — two unequal states must never share a fingerprint, since it is
/// used both as a hash-map key and, for puzzles that report a positive
/// [`Puzzle::hash_size`], as a dense array index. `fingerprint` and `Eq` must
/// agree: `a == b` implies `a.fingerprint() == b.fingerprint()`.
pub trait Position: Eq + Clone + Debug {
    fn fingerprint(&self) -> u64;
}

/// A puzzle move: a context-free value with a human-readable rendering.
pub trait Move: Clone + Debug {
    fn describe(&self) -> String;
}

/// The capability every concrete puzzle implements.
///
/// Implementations must be pure and deterministic: `do_move` never consults
/// external state, and two calls with equal arguments return equal results.
pub trait Puzzle {
    type State: Position;
    type Move: Move;

    /// The state the solver starts its search from.
    fn initial_state(&self) -> Self::State;

    /// True iff `state` is a terminal/goal state.
    fn is_primitive(&self, state: &Self::State) -> bool;

    /// All legal moves from `state`, in a stable (puzzle-defined) order.
    fn moves(&self, state: &Self::State) -> Vec<Self::Move>;

    /// Applies `mv` at `state`. Returns `None` only if `mv` is illegal at
    /// `state`; moves returned by [`Puzzle::moves`] are always legal, so a
    /// solver never sees `None` here except as a caller bug.
    fn do_move(&self, state: &Self::State, mv: &Self::Move) -> Option<Self::State>;

    /// `0` if the state space is unbounded (the puzzle must then be solved
    /// with [`GraphSolver`]); otherwise a strict upper bound on
    /// `fingerprint() + 1` for every reachable state, enabling
    /// [`ArraySolver`]'s dense indexing.
    fn hash_size(&self) -> u64 {
        0
    }
}

/// Sentinel recorded for a reachable state from which no primitive is
/// reachable.
pub const RMT_INFINITY: i64 = i64::MAX;

#[cfg(test)]
pub(crate) mod test_puzzles;
