//! Ternary: three base-3 digits, each held in the low 2 bits of its own
//! 4-bit-wide nibble. `ROTATE` cyclically shifts the occupied nibbles up by
//! one slot, wrapping the top back to the bottom; `SPIN` increments each
//! digit mod 3 in place.

use puzzle::{Move as MoveTrait, Position, Puzzle};

pub const INIT_POS: u64 = 0b10010001100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TernaryState(pub u64);

impl Position for TernaryState {
    fn fingerprint(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TernaryMove {
    Rotate,
    Spin,
}

impl MoveTrait for TernaryMove {
    fn describe(&self) -> String {
        match self {
            TernaryMove::Rotate => "ROTATE".to_string(),
            TernaryMove::Spin => "SPIN".to_string(),
        }
    }
}

#[derive(Default)]
pub struct Ternary;

impl Ternary {
    pub fn new() -> Self {
        Ternary
    }
}

impl Puzzle for Ternary {
    type State = TernaryState;
    type Move = TernaryMove;

    fn initial_state(&self) -> TernaryState {
        TernaryState(INIT_POS)
    }

    fn is_primitive(&self, state: &TernaryState) -> bool {
        state.0 == INIT_POS
    }

    fn moves(&self, _state: &TernaryState) -> Vec<TernaryMove> {
        vec![TernaryMove::Rotate, TernaryMove::Spin]
    }

    fn do_move(&self, state: &TernaryState, mv: &TernaryMove) -> Option<TernaryState> {
        let mut val = state.0;
        match mv {
            TernaryMove::Rotate => {
                val <<= 4;
                val |= val >> 16;
                val &= !(0b1111u64 << 16);
            }
            TernaryMove::Spin => {
                for i in 0..3 {
                    let shift = i << 2;
                    let mut digit = (val & (0b11u64 << shift)) >> shift;
                    digit = (digit + 1) % 3;
                    val &= !(0b11u64 << shift);
                    val |= digit << shift;
                }
            }
        }
        Some(TernaryState(val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle::GraphSolver;

    #[test]
    fn initial_state_is_already_primitive() {
        let mut solver = GraphSolver::new(Ternary::new());
        assert_eq!(solver.solve(), 0);
    }

    #[test]
    fn reconstruction_from_initial_is_empty() {
        let puzzle = Ternary::new();
        let mut solver = GraphSolver::new(Ternary::new());
        let mut out = Vec::new();
        solver
            .shortest_path_from(puzzle.initial_state(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[END]\n");
    }

    #[test]
    fn spin_increments_each_digit_mod_three() {
        let puzzle = Ternary::new();
        let next = puzzle
            .do_move(&TernaryState(0), &TernaryMove::Spin)
            .unwrap();
        // Each of the 3 digits lives in the low 2 bits of its own nibble.
        assert_eq!(next.0, 0x111);
    }

    #[test]
    fn spin_wraps_mod_three() {
        let puzzle = Ternary::new();
        // Digit 2 (mod 3) spins back to 0.
        let next = puzzle
            .do_move(&TernaryState(0x002), &TernaryMove::Spin)
            .unwrap();
        assert_eq!(next.0, 0x000);
    }

    #[test]
    fn rotate_wraps_the_top_populated_nibble_back_to_the_bottom() {
        let puzzle = Ternary::new();
        let rotated = puzzle
            .do_move(&TernaryState(0x1000), &TernaryMove::Rotate)
            .unwrap();
        assert_eq!(rotated.0, 0x1);
    }

    #[test]
    fn rotate_without_wraparound_just_shifts_up_one_nibble() {
        let puzzle = Ternary::new();
        let rotated = puzzle
            .do_move(&TernaryState(0x123), &TernaryMove::Rotate)
            .unwrap();
        assert_eq!(rotated.0, 0x1230);
    }
}
