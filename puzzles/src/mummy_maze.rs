//! Mummy Maze: a pursuit puzzle with bit-packed state for up to 4 NPCs, 1
//! player, and 1 gate bit.
//!
//! Grid cells are addressed two ways: a *grid location* `i*cols+j` (used in
//! the bit-packed state) and a *world location* into the doubled-and-walled
//! ASCII grid read from the maze file (used to look up walls/gates/etc.).

use std::fmt;

use puzzle::{Move as MoveTrait, Position, Puzzle};

use crate::error::PuzzleConfigError;

const MAX_NPCS: usize = 4;
const PLAYER_IDX: usize = MAX_NPCS;
const INVALID_LOC: u64 = u64::MAX;

const CHARACTER_LOC_LENGTH: u64 = 10;
const CHARACTER_ALIVE_SHIFT: u64 = CHARACTER_LOC_LENGTH;
const CHARACTER_COLOR_SHIFT: u64 = CHARACTER_ALIVE_SHIFT + 1;
const CHARACTER_STRENGTH_SHIFT: u64 = CHARACTER_COLOR_SHIFT;
const CHARACTER_WALKING_SHIFT: u64 = CHARACTER_COLOR_SHIFT + 1;
const CHARACTER_INFO_LENGTH: u64 = CHARACTER_WALKING_SHIFT + 1;
const PLAYER_INFO_LENGTH: u64 = CHARACTER_ALIVE_SHIFT + 1;

const CHARACTER_LOC_MASK: u64 = (1 << CHARACTER_LOC_LENGTH) - 1;
const CHARACTER_ALIVE_MASK: u64 = 1 << CHARACTER_ALIVE_SHIFT;
const CHARACTER_COLOR_MASK: u64 = 1 << CHARACTER_COLOR_SHIFT;
const CHARACTER_WALKING_MASK: u64 = 1 << CHARACTER_WALKING_SHIFT;
const CHARACTER_STRENGTH_MASK: u64 = CHARACTER_COLOR_MASK | CHARACTER_WALKING_MASK;

const GATE_SHIFT: u64 = MAX_NPCS as u64 * CHARACTER_INFO_LENGTH + PLAYER_INFO_LENGTH;
const GATE_MASK: u64 = 1 << GATE_SHIFT;

const EMPTY: u8 = b'_';
const WALL: u8 = b'W';
const GATE: u8 = b'G';
const UNLOCKED_GATE: u8 = b'U';
const KEY: u8 = b'K';
const TRAP: u8 = b'T';
const EXIT: u8 = b'E';
const PLAYER_CHAR: u8 = b'4';

fn is_npc_char(c: u8) -> bool {
    matches!(c, b'0' | b'1' | b'2' | b'3')
}

fn is_key(c: u8) -> bool {
    c == KEY
}

fn is_gate_char(c: u8) -> bool {
    c == GATE || c == UNLOCKED_GATE
}

fn is_exit(c: u8) -> bool {
    c == EXIT
}

fn is_trap(c: u8) -> bool {
    c == TRAP
}

fn chr_loc(pos: u64, chr_idx: usize) -> u64 {
    (pos >> (chr_idx as u64 * CHARACTER_INFO_LENGTH)) & CHARACTER_LOC_MASK
}

fn chr_is_alive(pos: u64, chr_idx: usize) -> bool {
    pos & (CHARACTER_ALIVE_MASK << (chr_idx as u64 * CHARACTER_INFO_LENGTH)) != 0
}

fn chr_is_walking(pos: u64, chr_idx: usize) -> bool {
    pos & (CHARACTER_WALKING_MASK << (chr_idx as u64 * CHARACTER_INFO_LENGTH)) != 0
}

fn chr_is_red(pos: u64, chr_idx: usize) -> bool {
    pos & (CHARACTER_COLOR_MASK << (chr_idx as u64 * CHARACTER_INFO_LENGTH)) != 0
}

fn chr_strength(pos: u64, chr_idx: usize) -> u64 {
    ((pos >> (chr_idx as u64 * CHARACTER_INFO_LENGTH)) & CHARACTER_STRENGTH_MASK) >> CHARACTER_STRENGTH_SHIFT
}

fn player_loc(pos: u64) -> u64 {
    chr_loc(pos, PLAYER_IDX)
}

fn player_is_alive(pos: u64) -> bool {
    chr_is_alive(pos, PLAYER_IDX)
}

fn gate_is_closed(pos: u64) -> bool {
    pos & GATE_MASK != 0
}

fn chr_set_alive(pos: &mut u64, chr_idx: usize) {
    *pos |= CHARACTER_ALIVE_MASK << (chr_idx as u64 * CHARACTER_INFO_LENGTH);
}

fn chr_set_loc(pos: &mut u64, loc: u64, chr_idx: usize) {
    let shift = chr_idx as u64 * CHARACTER_INFO_LENGTH;
    *pos &= !(CHARACTER_LOC_MASK << shift);
    *pos |= (loc & CHARACTER_LOC_MASK) << shift;
}

fn chr_set_strength(pos: &mut u64, strength: u64, chr_idx: usize) {
    let shift = chr_idx as u64 * CHARACTER_INFO_LENGTH;
    *pos &= !(CHARACTER_STRENGTH_MASK << shift);
    *pos |= strength << (shift + CHARACTER_STRENGTH_SHIFT);
}

fn kill_chr(pos: &mut u64, chr_idx: usize) {
    *pos &= !(CHARACTER_ALIVE_MASK << (chr_idx as u64 * CHARACTER_INFO_LENGTH));
}

fn kill_player(pos: &mut u64) {
    kill_chr(pos, PLAYER_IDX);
}

fn set_gate_closed(pos: &mut u64, closed: bool) {
    if closed {
        *pos |= GATE_MASK;
    } else {
        *pos &= !GATE_MASK;
    }
}

fn toggle_gate(pos: &mut u64) {
    *pos ^= GATE_MASK;
}

/// Lets NPCs kill each other and kill the player on collision. Returns
/// true if the player ends up dead.
fn collect(pos: &mut u64) -> bool {
    let ploc = player_loc(*pos);
    for i in 0..MAX_NPCS {
        if !chr_is_alive(*pos, i) {
            continue;
        }
        let nloc1 = chr_loc(*pos, i);
        if nloc1 == ploc {
            kill_player(pos);
        }
        for j in (i + 1)..MAX_NPCS {
            let nloc2 = chr_loc(*pos, j);
            if nloc1 == nloc2 {
                if chr_strength(*pos, i) < chr_strength(*pos, j) {
                    kill_chr(pos, i);
                    break;
                } else {
                    kill_chr(pos, j);
                }
            }
        }
    }
    !player_is_alive(*pos)
}

fn to_world_dim(grid_dim: usize) -> usize {
    grid_dim * 2 + 1
}

fn to_grid_dim(world_dim: usize) -> usize {
    world_dim / 2
}

fn to_world_loc(grid_loc: u64, grid_cols: usize) -> usize {
    let i = grid_loc as usize / grid_cols;
    let j = grid_loc as usize % grid_cols;
    to_world_dim(i) * to_world_dim(grid_cols) + to_world_dim(j)
}

fn to_grid_loc(world_loc: usize, world_cols: usize) -> u64 {
    let world_i = world_loc / world_cols;
    let world_j = world_loc % world_cols;
    (to_grid_dim(world_i) * to_grid_dim(world_cols) + to_grid_dim(world_j)) as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Direction {
    Wait,
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    const ALL: [Direction; 5] = [
        Direction::Wait,
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    fn offsets(self) -> (i64, i64) {
        match self {
            Direction::Wait => (0, 0),
            Direction::Up => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Wait => "WAIT",
            Direction::Up => "UP",
            Direction::Left => "LEFT",
            Direction::Down => "DOWN",
            Direction::Right => "RIGHT",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MummyMazeState(pub u64);

impl Position for MummyMazeState {
    fn fingerprint(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MummyMazeMove(pub Direction);

impl MoveTrait for MummyMazeMove {
    fn describe(&self) -> String {
        self.0.to_string()
    }
}

/// An immutable Mummy Maze layout plus the bit-packed initial state read
/// from it.
#[derive(Debug)]
pub struct MummyMaze {
    cols: usize,
    world_cols: usize,
    world: Vec<u8>,
    init_pos: u64,
}

impl MummyMaze {
    pub fn from_str(path: &str, text: &str) -> Result<Self, PuzzleConfigError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or_else(|| PuzzleConfigError::Malformed {
            path: path.to_string(),
            reason: "empty file".to_string(),
        })?;
        let mut header_fields = header.split_whitespace();
        let rows: usize = header_fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PuzzleConfigError::Malformed {
                path: path.to_string(),
                reason: "missing row count".to_string(),
            })?;
        let cols: usize = header_fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| PuzzleConfigError::Malformed {
                path: path.to_string(),
                reason: "missing column count".to_string(),
            })?;

        let world_rows = to_world_dim(rows);
        let world_cols = to_world_dim(cols);
        let mut world = vec![EMPTY; world_rows * world_cols];
        let mut init_pos: u64 = 0;
        let mut num_npcs = 0usize;
        let mut has_player = false;

        for i in 0..world_rows {
            let line = lines.next().ok_or_else(|| PuzzleConfigError::Malformed {
                path: path.to_string(),
                reason: format!("expected {world_rows} grid rows, found fewer"),
            })?;
            let bytes = line.as_bytes();
            for j in 0..world_cols {
                let loc = i * world_cols + j;
                let c = *bytes.get(j).ok_or_else(|| PuzzleConfigError::Malformed {
                    path: path.to_string(),
                    reason: format!("row {i} shorter than {world_cols} columns"),
                })?;
                if c == PLAYER_CHAR {
                    if has_player {
                        return Err(PuzzleConfigError::MultiplePlayers {
                            path: path.to_string(),
                        });
                    }
                    has_player = true;
                    chr_set_alive(&mut init_pos, PLAYER_IDX);
                    chr_set_loc(&mut init_pos, to_grid_loc(loc, world_cols), PLAYER_IDX);
                    world[loc] = EMPTY;
                } else if is_npc_char(c) {
                    if num_npcs >= MAX_NPCS {
                        return Err(PuzzleConfigError::TooManyNpcs {
                            path: path.to_string(),
                        });
                    }
                    let strength = (c - b'0') as u64;
                    chr_set_alive(&mut init_pos, num_npcs);
                    chr_set_loc(&mut init_pos, to_grid_loc(loc, world_cols), num_npcs);
                    chr_set_strength(&mut init_pos, strength, num_npcs);
                    num_npcs += 1;
                    world[loc] = EMPTY;
                } else if is_gate_char(c) {
                    set_gate_closed(&mut init_pos, c == GATE);
                    world[loc] = GATE;
                } else {
                    world[loc] = c;
                }
            }
        }

        if !has_player {
            return Err(PuzzleConfigError::NoPlayer {
                path: path.to_string(),
            });
        }

        Ok(MummyMaze {
            cols,
            world_cols,
            world,
            init_pos,
        })
    }

    pub fn from_file(path: &str) -> Result<Self, PuzzleConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| PuzzleConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_str(path, &text)
    }

    /// Walled-world location one step from `chr_idx`'s current location in
    /// `direction`, or `INVALID_LOC` if a wall or closed gate blocks it.
    fn dest_loc(&self, pos: u64, chr_idx: usize, direction: Direction) -> u64 {
        let (i_ofs, j_ofs) = direction.offsets();
        let loc = chr_loc(pos, chr_idx);
        let world_loc = to_world_loc(loc, self.cols) as i64;
        let wall_world_loc = world_loc + i_ofs * self.world_cols as i64 + j_ofs;
        if wall_world_loc < 0 || wall_world_loc as usize >= self.world.len() {
            return INVALID_LOC;
        }
        let wall_cell = self.world[wall_world_loc as usize];
        if wall_cell == WALL {
            return INVALID_LOC;
        }
        if wall_cell == GATE && gate_is_closed(pos) {
            return INVALID_LOC;
        }
        let dest_world_loc = wall_world_loc + i_ofs * self.world_cols as i64 + j_ofs;
        if dest_world_loc < 0 || dest_world_loc as usize >= self.world.len() {
            return INVALID_LOC;
        }
        dest_world_loc as u64
    }

    fn is_valid_player_move(&self, pos: u64, direction: Direction) -> bool {
        if !player_is_alive(pos) {
            return false;
        }
        let dest = self.dest_loc(pos, PLAYER_IDX, direction);
        if dest == INVALID_LOC {
            return false;
        }
        !is_npc_char(self.world[dest as usize])
    }

    /// Moves one NPC toward the player: red NPCs prioritise vertical moves
    /// then horizontal, white NPCs the reverse.
    fn move_npc(&self, pos: &mut u64, chr_idx: usize, gate_toggled: &mut bool) {
        let ploc = player_loc(*pos);
        let nloc = chr_loc(*pos, chr_idx);
        let p_i = (ploc / self.cols as u64) as i64;
        let p_j = (ploc % self.cols as u64) as i64;
        let n_i = (nloc / self.cols as u64) as i64;
        let n_j = (nloc % self.cols as u64) as i64;

        let mut new_nloc = nloc;
        let red = chr_is_red(*pos, chr_idx);
        let vertical_first = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
        let horizontal_first = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];
        let order = if red { vertical_first } else { horizontal_first };

        for direction in order {
            let applies = match direction {
                Direction::Up => n_i > p_i,
                Direction::Down => n_i < p_i,
                Direction::Left => n_j > p_j,
                Direction::Right => n_j < p_j,
                Direction::Wait => false,
            };
            if !applies {
                continue;
            }
            let dest_world_loc = self.dest_loc(*pos, chr_idx, direction);
            if dest_world_loc != INVALID_LOC {
                new_nloc = to_grid_loc(dest_world_loc as usize, self.world_cols);
                break;
            }
        }

        chr_set_loc(pos, new_nloc, chr_idx);
        if new_nloc != nloc && is_key(self.world[to_world_loc(new_nloc, self.cols)]) {
            *gate_toggled = true;
        }
    }

    /// Moves every living NPC whose walking state matches `walking`, then
    /// runs the collection pass. Returns true if the player ends up dead.
    fn move_npcs(&self, pos: &mut u64, walking: bool, gate_toggled: &mut bool) -> bool {
        *gate_toggled = false;
        for i in 0..MAX_NPCS {
            if chr_is_alive(*pos, i) && chr_is_walking(*pos, i) == walking {
                self.move_npc(pos, i, gate_toggled);
            }
        }
        collect(pos)
    }
}

impl Puzzle for MummyMaze {
    type State = MummyMazeState;
    type Move = MummyMazeMove;

    fn initial_state(&self) -> MummyMazeState {
        MummyMazeState(self.init_pos)
    }

    fn is_primitive(&self, state: &MummyMazeState) -> bool {
        let pos = state.0;
        let ploc = player_loc(pos);
        let unit = self.world[to_world_loc(ploc, self.cols)];
        player_is_alive(pos) && is_exit(unit)
    }

    fn moves(&self, state: &MummyMazeState) -> Vec<MummyMazeMove> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.is_valid_player_move(state.0, d))
            .map(MummyMazeMove)
            .collect()
    }

    fn do_move(&self, state: &MummyMazeState, mv: &MummyMazeMove) -> Option<MummyMazeState> {
        if !self.is_valid_player_move(state.0, mv.0) {
            return None;
        }
        let mut pos = state.0;
        let ploc = player_loc(pos);
        let dest_world_loc = self.dest_loc(pos, PLAYER_IDX, mv.0);
        let new_ploc = to_grid_loc(dest_world_loc as usize, self.world_cols);
        chr_set_loc(&mut pos, new_ploc, PLAYER_IDX);

        if is_trap(self.world[to_world_loc(new_ploc, self.cols)]) {
            kill_player(&mut pos);
            return Some(MummyMazeState(pos));
        } else if new_ploc != ploc && is_key(self.world[to_world_loc(new_ploc, self.cols)]) {
            toggle_gate(&mut pos);
        }

        // Three sub-phases in fixed order: non-walkers once, then walkers
        // twice, giving walking NPCs a 2:1 speed advantage.
        let mut gate_toggled = false;
        for walking in [false, true, true] {
            if self.move_npcs(&mut pos, walking, &mut gate_toggled) {
                return Some(MummyMazeState(pos));
            } else if gate_toggled {
                toggle_gate(&mut pos);
            }
        }
        Some(MummyMazeState(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle::GraphSolver;

    // A 1x3 corridor: player at (0,0), exit at (0,2), no NPCs, no walls.
    const TRIVIAL_MAZE: &str = "1 3\n_______\n_4_U_E_\n_______\n";

    #[test]
    fn trivial_corridor_solves_in_two_moves() {
        let maze = MummyMaze::from_str("trivial", TRIVIAL_MAZE).unwrap();
        let mut solver = GraphSolver::new(maze);
        assert_eq!(solver.solve(), 2);
    }

    #[test]
    fn trivial_corridor_reconstruction_reaches_exit() {
        let maze = MummyMaze::from_str("trivial", TRIVIAL_MAZE).unwrap();
        let initial = maze.initial_state();
        let mut solver = GraphSolver::new(maze);
        let mut out = Vec::new();
        solver.shortest_path_from(initial, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("[rmt").count(), 2);
        assert!(text.contains("RIGHT"));
    }

    #[test]
    fn missing_player_is_rejected() {
        let maze = "1 1\n___\n___\n___\n";
        let err = MummyMaze::from_str("no_player", maze).unwrap_err();
        assert!(matches!(err, PuzzleConfigError::NoPlayer { .. }));
    }

    #[test]
    fn two_players_is_rejected() {
        let maze = "1 2\n_____\n_4_4_\n_____\n";
        let err = MummyMaze::from_str("two_players", maze).unwrap_err();
        assert!(matches!(err, PuzzleConfigError::MultiplePlayers { .. }));
    }

    #[test]
    fn player_dies_on_trap() {
        // Player at (0,0), trap immediately to the right.
        let maze_text = "1 2\n_____\n_4_T_\n_____\n";
        let maze = MummyMaze::from_str("trap", maze_text).unwrap();
        let initial = maze.initial_state();
        let after = maze
            .do_move(&initial, &MummyMazeMove(Direction::Right))
            .unwrap();
        assert!(!player_is_alive(after.0));
        assert!(!maze.is_primitive(&after));
    }

    #[test]
    fn walking_npc_catches_a_waiting_player_in_adjacent_cell() {
        // 1x2 corridor, walking white NPC (char '2', strength 2) starts
        // next to the player and should kill it on WAIT.
        let maze_text = "1 2\n_____\n_4_2_\n_____\n";
        let maze = MummyMaze::from_str("chase", maze_text).unwrap();
        let initial = maze.initial_state();
        let after = maze.do_move(&initial, &MummyMazeMove(Direction::Wait)).unwrap();
        assert!(!player_is_alive(after.0));
    }
}
