use puzzle::{ArraySolver, GraphSolver, Puzzle};
use puzzles::mummy_maze::{Direction, MummyMazeMove};
use puzzles::{Hanoi, LightsOut, MummyMaze, Ternary};

#[test]
fn hanoi_three_disks_three_rods() {
    let mut solver = GraphSolver::new(Hanoi::new(3, 3));
    assert_eq!(solver.solve(), 7);
}

#[test]
fn hanoi_nine_disks_three_rods() {
    let mut solver = GraphSolver::new(Hanoi::new(9, 3));
    assert_eq!(solver.solve(), 2i64.pow(9) - 1);
}

#[test]
fn lightsout_three_by_three_max_depth_and_hash_size() {
    let puzzle = LightsOut::new(3, 3);
    assert_eq!(puzzle.hash_size(), 512);
    let mut solver = ArraySolver::new(LightsOut::new(3, 3)).unwrap();
    assert_eq!(solver.solve(), 9);
}

#[test]
fn ternary_initial_state_is_primitive() {
    let mut solver = GraphSolver::new(Ternary::new());
    assert_eq!(solver.solve(), 0);
}

#[test]
fn mummy_maze_corridor_exit_needs_three_moves() {
    let maze = MummyMaze::from_file("tests/fixtures/corridor.maze").unwrap();
    let mut solver = GraphSolver::new(maze);
    assert_eq!(solver.solve(), 3);
}

#[test]
fn mummy_maze_gate_requires_the_key_first() {
    let maze = MummyMaze::from_file("tests/fixtures/gate.maze").unwrap();
    let mut solver = GraphSolver::new(maze);
    assert_eq!(solver.solve(), 2);
}

#[test]
fn mummy_maze_with_npc_reaches_exit_before_being_caught() {
    let maze = MummyMaze::from_file("tests/fixtures/chase.maze").unwrap();
    let initial = maze.initial_state();
    let mut solver = GraphSolver::new(maze);
    let mut out = Vec::new();
    solver.shortest_path_from(initial, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.ends_with("[END]\n"));
    assert!(!text.contains("NO SOLUTION"));
}

// Both fixtures start a single non-walking NPC diagonal to a waiting
// player (NPC at grid (0,0), player at grid (2,2) of a 3x3 open grid with
// no walls), so the NPC has both a vertical and a horizontal step that
// reduce its distance to the player. The only difference is NPC colour,
// which decides tie-break order: red tries vertical before horizontal,
// white the reverse.

#[test]
fn red_npc_moves_vertically_before_horizontally_when_both_apply() {
    let maze = MummyMaze::from_file("tests/fixtures/diag_red.maze").unwrap();
    let initial = maze.initial_state();
    let after = maze
        .do_move(&initial, &MummyMazeMove(Direction::Wait))
        .unwrap();

    let expected = MummyMaze::from_file("tests/fixtures/diag_red_after.maze").unwrap();
    assert_eq!(after, expected.initial_state());
}

#[test]
fn white_npc_moves_horizontally_before_vertically_when_both_apply() {
    let maze = MummyMaze::from_file("tests/fixtures/diag_white.maze").unwrap();
    let initial = maze.initial_state();
    let after = maze
        .do_move(&initial, &MummyMazeMove(Direction::Wait))
        .unwrap();

    let expected = MummyMaze::from_file("tests/fixtures/diag_white_after.maze").unwrap();
    assert_eq!(after, expected.initial_state());
}
