use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{self, Write};
use std::sync::Mutex;

use log::{debug, info};

use crate::path::{write_end, write_no_solution, write_step};
use crate::{Position, Puzzle, RMT_INFINITY};

/// Computes remoteness (distance to the nearest primitive) by forward BFS
/// from the initial state followed by a parallel multi-source backward BFS
/// from every primitive, one worker thread per primitive sharing a
/// mutex-protected distance map.
///
/// Use this solver when [`Puzzle::hash_size`] is `0`; for puzzles with a
/// bounded, dense hash space, [`crate::ArraySolver`] is faster and more
/// compact.
pub struct GraphSolver<P: Puzzle> {
    puzzle: P,
    solved: bool,
    /// `hash -> rmt`, `RMT_INFINITY` meaning "no primitive reachable".
    /// Absence of a key means the state was never reached by Phase A.
    distances: HashMap<u64, i64>,
}

impl<P> GraphSolver<P>
where
    P: Puzzle,
{
    pub fn new(puzzle: P) -> Self {
        GraphSolver {
            puzzle,
            solved: false,
            distances: HashMap::new(),
        }
    }

    /// Runs the two-phase analysis (idempotent) and returns the remoteness
    /// of the initial position.
    pub fn solve(&mut self) -> i64 {
        if !self.solved {
            info!("graph solver: starting solve()");
            let (primitives, reverse_graph) = self.phase_a_forward_discovery();
            debug!(
                "graph solver: phase A found {} reachable states, {} primitives",
                self.distances.len(),
                primitives.len()
            );
            Self::phase_b_backward_bfs(&mut self.distances, &reverse_graph, &primitives);
            self.solved = true;
            info!("graph solver: solve() complete");
        }
        let initial_hash = self.puzzle.initial_state().fingerprint();
        *self
            .distances
            .get(&initial_hash)
            .expect("initial state is always inserted during phase A")
    }

    /// Phase A: forward BFS from the initial state. Builds the reverse
    /// adjacency map (child hash -> parent hashes) and seeds `self.distances`
    /// with `RMT_INFINITY` for every reachable state, recording which are
    /// primitive.
    fn phase_a_forward_discovery(&mut self) -> (Vec<u64>, HashMap<u64, Vec<u64>>) {
        let mut closed: HashSet<u64> = HashSet::new();
        let mut frontier: VecDeque<P::State> = VecDeque::new();
        let mut reverse_graph: HashMap<u64, Vec<u64>> = HashMap::new();
        let mut primitives = Vec::new();

        let initial = self.puzzle.initial_state();
        let initial_hash = initial.fingerprint();
        // Pre-seed the root so backward BFS finds it even with no parents.
        reverse_graph.entry(initial_hash).or_default();
        frontier.push_back(initial);

        while let Some(state) = frontier.pop_front() {
            let hash = state.fingerprint();
            if closed.contains(&hash) {
                continue;
            }
            closed.insert(hash);
            self.distances.insert(hash, RMT_INFINITY);

            if self.puzzle.is_primitive(&state) {
                primitives.push(hash);
            } else {
                for mv in self.puzzle.moves(&state) {
                    let next = self
                        .puzzle
                        .do_move(&state, &mv)
                        .expect("moves() only yields legal moves");
                    let next_hash = next.fingerprint();
                    reverse_graph.entry(next_hash).or_default().push(hash);
                    if !closed.contains(&next_hash) {
                        frontier.push_back(next);
                    }
                }
            }
        }
        (primitives, reverse_graph)
    }

    /// Phase B: one independent level-synchronised backward BFS per
    /// primitive, run concurrently. Each worker has a thread-local frontier
    /// and closed set; only the final `min` write into the shared
    /// `distances` map is synchronised.
    fn phase_b_backward_bfs(
        distances: &mut HashMap<u64, i64>,
        reverse_graph: &HashMap<u64, Vec<u64>>,
        primitives: &[u64],
    ) {
        let distances_mutex = Mutex::new(std::mem::take(distances));
        std::thread::scope(|scope| {
            for &primitive in primitives {
                let distances_mutex = &distances_mutex;
                scope.spawn(move || {
                    Self::relax_from_one_source(distances_mutex, reverse_graph, primitive);
                });
            }
        });
        *distances = distances_mutex.into_inner().expect("mutex never poisoned");
    }

    fn relax_from_one_source(
        distances: &Mutex<HashMap<u64, i64>>,
        reverse_graph: &HashMap<u64, Vec<u64>>,
        primitive: u64,
    ) {
        let mut closed: HashSet<u64> = HashSet::new();
        let mut frontier: VecDeque<u64> = VecDeque::new();
        frontier.push_back(primitive);
        let mut depth: i64 = 0;
        let mut remaining_in_level: usize = 1;
        let mut count_next_level: usize = 0;

        while let Some(hash) = frontier.pop_front() {
            if !closed.contains(&hash) {
                closed.insert(hash);
                {
                    let mut map = distances.lock().expect("mutex never poisoned");
                    if let Some(rmt) = map.get_mut(&hash) {
                        if depth < *rmt {
                            *rmt = depth;
                        }
                    }
                }
                if let Some(parents) = reverse_graph.get(&hash) {
                    for &parent in parents {
                        frontier.push_back(parent);
                        count_next_level += 1;
                    }
                }
            }
            remaining_in_level -= 1;
            if remaining_in_level == 0 {
                remaining_in_level = count_next_level;
                count_next_level = 0;
                depth += 1;
            }
        }
    }

    /// Writes a shortest-move trace from `state` to a primitive, or
    /// `[NO SOLUTION]` if `state` is unreachable or cannot reach one.
    pub fn shortest_path_from(&mut self, state: P::State, sink: &mut impl Write) -> io::Result<()> {
        self.solve();
        let mut rmt = match self.distances.get(&state.fingerprint()) {
            Some(&r) if r != RMT_INFINITY => r,
            _ => return write_no_solution(sink),
        };

        let mut current = state;
        while rmt > 0 {
            let moves = self.puzzle.moves(&current);
            let mut advanced = false;
            for mv in &moves {
                let next = self
                    .puzzle
                    .do_move(&current, mv)
                    .expect("moves() only yields legal moves");
                let next_rmt = *self
                    .distances
                    .get(&next.fingerprint())
                    .expect("every successor of a reached state is reached");
                if next_rmt == rmt - 1 {
                    write_step(sink, rmt, mv)?;
                    current = next;
                    rmt -= 1;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                panic!(
                    "reconstruction invariant violated at state {:#x} with rmt {rmt}: \
                     no descending move found",
                    current.fingerprint()
                );
            }
        }
        write_end(sink)
    }

    /// Enumerates every `(hash, rmt)` pair computed so far, for inspection.
    pub fn print_info(&mut self, sink: &mut impl Write) -> io::Result<()> {
        self.solve();
        let mut entries: Vec<(&u64, &i64)> = self.distances.iter().collect();
        entries.sort_unstable_by_key(|(hash, _)| **hash);
        for (hash, rmt) in entries {
            if *rmt == RMT_INFINITY {
                writeln!(sink, "{hash:#x}: inf")?;
            } else {
                writeln!(sink, "{hash:#x}: {rmt}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_puzzles::{ChainMove, ChainPuzzle, CycleMove, CyclePuzzle};

    #[test]
    fn chain_puzzle_remoteness_matches_hand_count() {
        let mut solver = GraphSolver::new(ChainPuzzle::new(5));
        assert_eq!(solver.solve(), 5);
        assert_eq!(solver.solve(), 5, "solve() must be idempotent");
    }

    #[test]
    fn chain_puzzle_reconstructs_exact_length_path() {
        let puzzle = ChainPuzzle::new(5);
        let mut solver = GraphSolver::new(puzzle.clone());
        let mut out = Vec::new();
        solver
            .shortest_path_from(puzzle.initial_state(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("[rmt").count(), 5);
        assert!(text.ends_with("[END]\n"));
    }

    #[test]
    fn self_loop_does_not_break_relaxation() {
        // A WAIT-style self-loop move must not affect the minimum distance.
        let mut solver = GraphSolver::new(CyclePuzzle::new(4));
        assert_eq!(solver.solve(), 4);
    }

    #[test]
    fn unreachable_from_any_primitive_reports_no_solution() {
        let puzzle = CyclePuzzle::dead_end();
        let mut solver = GraphSolver::new(puzzle.clone());
        let mut out = Vec::new();
        solver
            .shortest_path_from(puzzle.initial_state(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[NO SOLUTION]\n");
    }

    #[test]
    fn two_primitives_take_the_minimum() {
        // Graph: 0 -> 1 -> 2(primitive), 0 -> 3(primitive). rmt(0) = 1.
        let mut solver = GraphSolver::new(CyclePuzzle::two_primitives());
        assert_eq!(solver.solve(), 1);
    }

    // Exercises CycleMove's Debug/Clone derive paths via the puzzle's
    // move enumeration, matching the trait bound surface `Puzzle::Move`.
    #[test]
    fn chain_move_describes_itself() {
        let mv = ChainMove(3);
        assert_eq!(crate::Move::describe(&mv), "advance to 3");
    }

    #[test]
    fn cycle_move_describes_itself() {
        let mv = CycleMove::Wait;
        assert_eq!(crate::Move::describe(&mv), "wait");
    }
}
