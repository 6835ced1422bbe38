use thiserror::Error;

/// Errors surfaced by the solver crate. Invalid puzzle configuration is
/// rejected by concrete puzzles at construction, not here; illegal moves
/// are a caller bug, not a recoverable error; unreachable queries are
/// reported in-band as `[NO SOLUTION]`, not via `Err`.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("array solver requires hash_size() > 0, but the puzzle reports 0 (unbounded state space); use GraphSolver instead")]
    ArrayHashSizeZero,

    #[error("hash_size() = {0} does not fit in an addressable array on this platform")]
    ArrayHashSizeTooLarge(u64),

    #[error(
        "reconstruction invariant violated at state {state_hash:#x} with rmt {rmt}: \
         no move strictly decreasing remoteness was found; this indicates a solver or puzzle bug"
    )]
    ReconstructionInvariantViolated { state_hash: u64, rmt: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
