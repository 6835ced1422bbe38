//! Reference puzzles built on the [`puzzle`] crate's [`puzzle::Puzzle`]
//! trait: Towers of Hanoi, Lights Out, Ternary, and Mummy Maze.

pub mod error;
pub mod hanoi;
pub mod kind;
pub mod lightsout;
pub mod mummy_maze;
pub mod ternary;

pub use error::PuzzleConfigError;
pub use hanoi::Hanoi;
pub use kind::PuzzleKind;
pub use lightsout::LightsOut;
pub use mummy_maze::MummyMaze;
pub use ternary::Ternary;
