//! Names the four reference puzzles so callers outside this crate (the demo
//! binary, integration tests) can select one and its parameters uniformly
//! without matching on string literals themselves.
//!
//! This is a selector, not a [`puzzle::Puzzle`] impl: the four puzzles have
//! unrelated `State`/`Move` associated types, so unifying them behind one
//! dynamic type would mean boxing, which the solver crate deliberately
//! avoids. `PuzzleKind` only decides *which* concrete constructor to call.

use std::str::FromStr;

use crate::error::PuzzleConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleKind {
    Hanoi,
    LightsOut,
    Ternary,
    MummyMaze,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 4] = [
        PuzzleKind::Hanoi,
        PuzzleKind::LightsOut,
        PuzzleKind::Ternary,
        PuzzleKind::MummyMaze,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PuzzleKind::Hanoi => "hanoi",
            PuzzleKind::LightsOut => "lightsout",
            PuzzleKind::Ternary => "ternary",
            PuzzleKind::MummyMaze => "mmz",
        }
    }
}

impl FromStr for PuzzleKind {
    type Err = PuzzleConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| PuzzleConfigError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_name() {
        for kind in PuzzleKind::ALL {
            assert_eq!(kind.name().parse::<PuzzleKind>().unwrap(), kind);
        }
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "chess".parse::<PuzzleKind>().unwrap_err();
        assert!(matches!(err, PuzzleConfigError::UnknownKind(name) if name == "chess"));
    }
}
