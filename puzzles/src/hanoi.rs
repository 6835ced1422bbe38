//! Towers of Hanoi: `1..=19` disks over `1..=10` rods.
//!
//! A position is a decimal integer where the `i`-th least-significant digit
//! is the rod holding disk `i` (disk 0 is smallest).

use log::warn;
use puzzle::{Move as MoveTrait, Position, Puzzle};

pub const MIN_RODS: usize = 1;
pub const MIN_DISKS: usize = 1;
pub const MAX_RODS: usize = 10;
pub const MAX_DISKS: usize = 19;
pub const DEFAULT_RODS: usize = 3;
pub const DEFAULT_DISKS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiState(pub u64);

impl Position for HanoiState {
    fn fingerprint(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HanoiMove {
    pub disk: usize,
    pub rod: usize,
}

impl MoveTrait for HanoiMove {
    fn describe(&self) -> String {
        format!("Move disk {} to rod {}", self.disk, self.rod)
    }
}

pub struct Hanoi {
    rods: usize,
    disks: usize,
}

impl Hanoi {
    /// Falls back to `(DEFAULT_DISKS, DEFAULT_RODS)` if either argument is
    /// out of range, logging a warning.
    pub fn new(disks: usize, rods: usize) -> Self {
        if !(MIN_DISKS..=MAX_DISKS).contains(&disks) || !(MIN_RODS..=MAX_RODS).contains(&rods) {
            warn!(
                "Hanoi: disks={disks}, rods={rods} out of range; falling back to ({DEFAULT_DISKS}, {DEFAULT_RODS})"
            );
            return Hanoi {
                rods: DEFAULT_RODS,
                disks: DEFAULT_DISKS,
            };
        }
        Hanoi { rods, disks }
    }

    fn smallest_disk_on_rod(&self, pos: u64, rod: usize) -> usize {
        let mut disk_idx = 0;
        let mut val = pos;
        while val > 0 {
            if (val % 10) as usize == rod {
                return disk_idx;
            }
            disk_idx += 1;
            val /= 10;
        }
        MAX_DISKS
    }

    fn rod_of(&self, pos: u64, disk_idx: usize) -> usize {
        let shift = 10u64.pow(disk_idx as u32);
        ((pos / shift) % 10) as usize
    }

    fn is_valid_move(&self, pos: u64, mv: &HanoiMove) -> bool {
        let curr_rod = self.rod_of(pos, mv.disk);
        self.smallest_disk_on_rod(pos, curr_rod) == mv.disk
            && self.smallest_disk_on_rod(pos, mv.rod) > mv.disk
    }
}

impl Puzzle for Hanoi {
    type State = HanoiState;
    type Move = HanoiMove;

    fn initial_state(&self) -> HanoiState {
        let mut pos = 0u64;
        for _ in 0..self.disks {
            pos = pos * 10 + 1;
        }
        HanoiState(pos)
    }

    fn is_primitive(&self, state: &HanoiState) -> bool {
        state.0 == 0
    }

    fn moves(&self, state: &HanoiState) -> Vec<HanoiMove> {
        let mut valid = Vec::new();
        for rod in 0..self.rods {
            let top = self.smallest_disk_on_rod(state.0, rod);
            if top == MAX_DISKS {
                continue;
            }
            for dest in 0..self.rods {
                let mv = HanoiMove { disk: top, rod: dest };
                if self.is_valid_move(state.0, &mv) {
                    valid.push(mv);
                }
            }
        }
        valid
    }

    fn do_move(&self, state: &HanoiState, mv: &HanoiMove) -> Option<HanoiState> {
        if !self.is_valid_move(state.0, mv) {
            return None;
        }
        let shift = 10u64.pow(mv.disk as u32);
        let old_digit = (state.0 / shift) % 10;
        let next = state.0.wrapping_sub(old_digit * shift).wrapping_add(mv.rod as u64 * shift);
        Some(HanoiState(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle::GraphSolver;

    #[test]
    fn three_disks_three_rods_has_remoteness_seven() {
        let mut solver = GraphSolver::new(Hanoi::new(3, 3));
        assert_eq!(solver.solve(), 7);
    }

    #[test]
    fn three_disks_reconstructs_to_all_zero() {
        let puzzle = Hanoi::new(3, 3);
        let mut solver = GraphSolver::new(Hanoi::new(3, 3));
        let mut out = Vec::new();
        solver
            .shortest_path_from(puzzle.initial_state(), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("[rmt").count(), 7);
        assert!(text.ends_with("[END]\n"));
    }

    #[test]
    fn invalid_size_falls_back_to_default() {
        let huge = Hanoi::new(20, 3);
        assert_eq!(huge.initial_state().0, 11_111_111_111);
        let zero = Hanoi::new(0, 3);
        assert_eq!(zero.initial_state().0, 111);
    }

    #[test]
    fn move_must_be_smallest_on_source_and_dest() {
        let puzzle = Hanoi::new(3, 3);
        // 111: all three disks on rod 1. Disk 0 (smallest) can move to rod 0 or 2.
        let state = HanoiState(111);
        let moves = puzzle.moves(&state);
        assert!(moves.contains(&HanoiMove { disk: 0, rod: 0 }));
        assert!(moves.contains(&HanoiMove { disk: 0, rod: 2 }));
        assert!(!moves.iter().any(|m| m.disk == 1));
    }
}
