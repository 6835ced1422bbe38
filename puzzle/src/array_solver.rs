use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, Write};

use log::info;

use crate::error::SolverError;
use crate::path::{write_end, write_no_solution, write_step};
use crate::{Position, Puzzle};

const UNSEEN: i16 = -1;

/// Computes BFS depth from the initial state into a dense, directly-indexed
/// array. Requires [`Puzzle::hash_size`] to be a positive, dense upper bound
/// on every reachable state's fingerprint.
///
/// Per-cell depth is `i16` rather than a single byte: large boards (e.g.
/// Lights Out 6x6) can need move depths beyond 127.
#[derive(Debug)]
pub struct ArraySolver<P: Puzzle> {
    puzzle: P,
    data: Vec<i16>,
    solved: bool,
    max_depth: i64,
}

impl<P> ArraySolver<P>
where
    P: Puzzle,
{
    /// Allocates the distance array up front. Fails if `hash_size()` is `0`
    /// (unbounded state space — use [`crate::GraphSolver`]) or too large to
    /// address on this platform.
    pub fn new(puzzle: P) -> Result<Self, SolverError> {
        let hash_size = puzzle.hash_size();
        if hash_size == 0 {
            return Err(SolverError::ArrayHashSizeZero);
        }
        let len: usize = hash_size
            .try_into()
            .map_err(|_| SolverError::ArrayHashSizeTooLarge(hash_size))?;
        Ok(ArraySolver {
            puzzle,
            data: vec![UNSEEN; len],
            solved: false,
            max_depth: 0,
        })
    }

    /// Runs the forward BFS (idempotent) and returns the maximum depth
    /// discovered over all reachable states.
    pub fn solve(&mut self) -> i64 {
        if !self.solved {
            info!("array solver: starting solve() over {} cells", self.data.len());
            let initial = self.puzzle.initial_state();
            let mut frontier: VecDeque<P::State> = VecDeque::new();
            frontier.push_back(initial);

            let mut depth: i16 = 0;
            let mut remaining_in_level: usize = 1;
            let mut count_next_level: usize = 0;

            while let Some(state) = frontier.pop_front() {
                let hash = state.fingerprint() as usize;
                if self.data[hash] == UNSEEN {
                    self.data[hash] = depth;
                    self.max_depth = self.max_depth.max(depth as i64);
                    for mv in self.puzzle.moves(&state) {
                        let next = self
                            .puzzle
                            .do_move(&state, &mv)
                            .expect("moves() only yields legal moves");
                        frontier.push_back(next);
                        count_next_level += 1;
                    }
                }
                remaining_in_level -= 1;
                if remaining_in_level == 0 {
                    remaining_in_level = count_next_level;
                    count_next_level = 0;
                    depth = depth
                        .checked_add(1)
                        .expect("BFS depth exceeded i16 range; widen ArraySolver's data type");
                }
            }
            self.solved = true;
            info!("array solver: solve() complete, max depth {}", self.max_depth);
        }
        self.max_depth
    }

    /// Writes the raw distance array to `path`, one little-endian `i16` per
    /// cell.
    pub fn save_distances(&mut self, path: &std::path::Path) -> Result<(), SolverError> {
        self.solve();
        let mut file = File::create(path)?;
        for &depth in &self.data {
            file.write_all(&depth.to_le_bytes())?;
        }
        Ok(())
    }

    /// Writes a shortest-move trace from `state` back to the initial state,
    /// or `[NO SOLUTION]` if `state` was never reached.
    pub fn shortest_path_from(&mut self, state: P::State, sink: &mut impl Write) -> io::Result<()> {
        self.solve();
        let mut depth = self.data[state.fingerprint() as usize];
        if depth == UNSEEN {
            return write_no_solution(sink);
        }

        let mut current = state;
        while depth > 0 {
            let moves = self.puzzle.moves(&current);
            let mut advanced = false;
            for mv in &moves {
                let next = self
                    .puzzle
                    .do_move(&current, mv)
                    .expect("moves() only yields legal moves");
                let next_depth = self.data[next.fingerprint() as usize];
                if next_depth != UNSEEN && next_depth < depth {
                    write_step(sink, depth as i64, mv)?;
                    current = next;
                    depth = next_depth;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                panic!(
                    "reconstruction invariant violated at state {:#x} with depth {depth}: \
                     no descending move found",
                    current.fingerprint()
                );
            }
        }
        write_end(sink)
    }

    /// Enumerates every `(hash, depth)` pair for reached cells, for
    /// inspection.
    pub fn print_info(&mut self, sink: &mut impl Write) -> io::Result<()> {
        self.solve();
        for (hash, &depth) in self.data.iter().enumerate() {
            if depth != UNSEEN {
                writeln!(sink, "{hash:#x}: {depth}")?;
            }
        }
        Ok(())
    }
}
