//! Non-interactive demo: construct a puzzle from `argv`, solve it, and print
//! the remoteness of its root plus a shortest path to a primitive.
//!
//! Usage:
//!   solve hanoi [disks] [rods]
//!   solve lightsout [rows] [cols]
//!   solve ternary
//!   solve mmz <path-to-maze-file>

use std::env;
use std::io;
use std::process::ExitCode;

use puzzle::{ArraySolver, GraphSolver, Puzzle};
use puzzles::{hanoi, lightsout, Hanoi, LightsOut, MummyMaze, PuzzleKind, Ternary};

fn parse_or<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> T {
    args.get(idx)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn run_graph<P: Puzzle>(puzzle: P) -> io::Result<()> {
    let initial = puzzle.initial_state();
    let mut solver = GraphSolver::new(puzzle);
    let rmt = solver.solve();
    println!("rmt of root: {rmt}");
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    solver.shortest_path_from(initial, &mut lock)
}

fn run_array<P: Puzzle>(puzzle: P) -> io::Result<()> {
    let initial = puzzle.initial_state();
    let mut solver = ArraySolver::new(puzzle).map_err(io::Error::other)?;
    let rmt = solver.solve();
    println!("rmt of root: {rmt}");
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    solver.shortest_path_from(initial, &mut lock)
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let Some(name) = args.get(1) else {
        eprintln!("usage: solve <hanoi|lightsout|ternary|mmz> [params...]");
        return ExitCode::FAILURE;
    };

    let kind: PuzzleKind = match name.parse() {
        Ok(kind) => kind,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = match kind {
        PuzzleKind::Hanoi => {
            let disks = parse_or(&args, 2, hanoi::DEFAULT_DISKS);
            let rods = parse_or(&args, 3, hanoi::DEFAULT_RODS);
            run_graph(Hanoi::new(disks, rods))
        }
        PuzzleKind::LightsOut => {
            let rows = parse_or(&args, 2, lightsout::DEFAULT_ROWS);
            let cols = parse_or(&args, 3, lightsout::DEFAULT_COLS);
            run_array(LightsOut::new(rows, cols))
        }
        PuzzleKind::Ternary => run_graph(Ternary::new()),
        PuzzleKind::MummyMaze => {
            let Some(path) = args.get(2) else {
                eprintln!("usage: solve mmz <path-to-maze-file>");
                return ExitCode::FAILURE;
            };
            match MummyMaze::from_file(path) {
                Ok(maze) => run_graph(maze),
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error writing output: {err}");
            ExitCode::FAILURE
        }
    }
}
