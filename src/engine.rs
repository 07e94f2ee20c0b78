//! State model for the 8-puzzle.
//!
//! This module defines the fundamental pieces every search strategy works on:
//! - `Move`: The four directions the blank can travel.
//! - `State`: An immutable 3x3 board, stored row-major with `0` as the blank.
//! - `Goal`: The solved configuration together with each tile's target cell.
//!
//! A `Goal` is built once and handed to strategies by reference. States are
//! small `Copy` values, so deriving a neighbor never touches the original.
use crate::error::{SolveError, SolveResult};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width (and height) of the board.
pub const BOARD_WIDTH: usize = 3;

/// Number of cells on the board, blank included.
pub const TILE_COUNT: usize = BOARD_WIDTH * BOARD_WIDTH;

/// The tile value used for the blank cell.
pub const BLANK: u8 = 0;

/// Direction in which the blank moves.
///
/// The declaration order is the order neighbors are generated in, and several
/// strategies break ties by that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All moves in generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// Change in the blank's row-major index when this move is applied.
    pub fn offset(&self) -> isize {
        match self {
            Move::Up => -(BOARD_WIDTH as isize),
            Move::Down => BOARD_WIDTH as isize,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    /// The move that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Move {
    type Err = SolveError;

    /// Accepts the full name or its first letter, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u" | "up" => Ok(Move::Up),
            "d" | "down" => Ok(Move::Down),
            "l" | "left" => Ok(Move::Left),
            "r" | "right" => Ok(Move::Right),
            other => Err(SolveError::InvalidConfiguration(format!(
                "Unknown move '{}'",
                other
            ))),
        }
    }
}

/// A board configuration.
///
/// Tiles are read row-major, so the cell at `(row, col)` lives at index
/// `row * 3 + col`. A valid state is a permutation of `0..=8`. The search
/// strategies never re-check this; use `State::try_from_tiles` or
/// `utils::state_from_str` at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct State {
    tiles: [u8; TILE_COUNT],
}

impl State {
    /// Wraps the given tiles without validation.
    pub fn new(tiles: [u8; TILE_COUNT]) -> Self {
        State { tiles }
    }

    /// Builds a state from a slice, checking that it is a permutation of `0..=8`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::State;
    /// assert!(State::try_from_tiles(&[1, 2, 3, 4, 5, 6, 7, 8, 0]).is_ok());
    /// assert!(State::try_from_tiles(&[1, 1, 3, 4, 5, 6, 7, 8, 0]).is_err());
    /// assert!(State::try_from_tiles(&[1, 2, 3]).is_err());
    /// ```
    pub fn try_from_tiles(tiles: &[u8]) -> SolveResult<Self> {
        if tiles.len() != TILE_COUNT {
            return Err(SolveError::InvalidState(format!(
                "Expected {} tiles, found {}",
                TILE_COUNT,
                tiles.len()
            )));
        }

        let mut seen = [false; TILE_COUNT];
        for &tile in tiles {
            let idx = tile as usize;
            if idx >= TILE_COUNT {
                return Err(SolveError::InvalidState(format!(
                    "Tile {} is out of range 0..={}",
                    tile,
                    TILE_COUNT - 1
                )));
            }
            if seen[idx] {
                return Err(SolveError::InvalidState(format!(
                    "Tile {} appears more than once",
                    tile
                )));
            }
            seen[idx] = true;
        }

        let mut grid = [BLANK; TILE_COUNT];
        grid.copy_from_slice(tiles);
        Ok(State { tiles: grid })
    }

    /// Returns the tiles in row-major order.
    pub fn tiles(&self) -> &[u8; TILE_COUNT] {
        &self.tiles
    }

    /// Index of the blank cell.
    ///
    /// For a state without a blank (only possible through `State::new`) this
    /// returns the last index.
    pub fn blank_index(&self) -> usize {
        self.tiles
            .iter()
            .position(|&t| t == BLANK)
            .unwrap_or(TILE_COUNT - 1)
    }

    /// Cell the blank would land on after `mv`, if it stays on the board.
    fn target_index(blank: usize, mv: Move) -> Option<usize> {
        let col = blank % BOARD_WIDTH;
        if mv == Move::Left && col == 0 {
            return None;
        }
        if mv == Move::Right && col == BOARD_WIDTH - 1 {
            return None;
        }
        let target = blank as isize + mv.offset();
        if (0..TILE_COUNT as isize).contains(&target) {
            Some(target as usize)
        } else {
            None
        }
    }

    fn swapped(&self, a: usize, b: usize) -> Self {
        let mut tiles = self.tiles;
        tiles.swap(a, b);
        State { tiles }
    }

    /// Generates every state reachable in one move, in `Move::ALL` order.
    ///
    /// Left is excluded in the first column and Right in the last; Up and Down
    /// fall off the board at the top and bottom rows. The result therefore has
    /// two entries for a corner blank, three for an edge and four for the centre.
    pub fn neighbors(&self) -> Vec<(State, Move)> {
        let blank = self.blank_index();
        Move::ALL
            .iter()
            .filter_map(|&mv| {
                Self::target_index(blank, mv).map(|target| (self.swapped(blank, target), mv))
            })
            .collect()
    }

    /// Applies a single move, returning `None` if the blank would leave the board.
    pub fn apply_move(&self, mv: Move) -> Option<State> {
        let blank = self.blank_index();
        Self::target_index(blank, mv).map(|target| self.swapped(blank, target))
    }

    /// Number of tile pairs (blank ignored) that appear in decreasing order.
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.tiles.iter().copied().filter(|&t| t != BLANK).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, &val)| tiles[i + 1..].iter().filter(|&&next| next < val).count())
            .sum()
    }

    /// Whether `goal` can be reached from this state.
    ///
    /// On an odd-width board a move never changes inversion parity, so two
    /// states are mutually reachable exactly when their parities agree.
    pub fn is_solvable(&self, goal: &Goal) -> bool {
        self.inversions() % 2 == goal.state().inversions() % 2
    }

    /// Creates a uniformly shuffled board that can reach `goal`.
    ///
    /// The same seed always produces the same board.
    pub fn new_random_with_seed(seed: u64, goal: &Goal) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles = *goal.state().tiles();
        loop {
            tiles.shuffle(&mut rng);
            let candidate = State { tiles };
            if candidate.is_solvable(goal) {
                return candidate;
            }
        }
    }

    /// Walks `steps` random moves away from the goal, never immediately undoing
    /// the previous move. The optimal distance of the result is at most `steps`.
    pub fn scrambled(goal: &Goal, steps: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut current = *goal.state();
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<(State, Move)> = current
                .neighbors()
                .into_iter()
                .filter(|(_, mv)| last.map_or(true, |prev| *mv != prev.opposite()))
                .collect();
            let (next, mv) = options[rng.gen_range(0..options.len())];
            current = next;
            last = Some(mv);
        }
        current
    }
}

impl fmt::Display for State {
    /// Draws the board as a boxed grid with the blank left empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "+---".repeat(BOARD_WIDTH) + "+";
        writeln!(f, "{}", border)?;
        for row in self.tiles.chunks(BOARD_WIDTH) {
            for &tile in row {
                if tile == BLANK {
                    write!(f, "|   ")?;
                } else {
                    write!(f, "| {} ", tile)?;
                }
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}

/// The solved configuration and the target cell of every tile.
///
/// Built once (usually with `Goal::standard()`) and shared by reference with
/// every strategy and heuristic. It is never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    state: State,
    positions: [(usize, usize); TILE_COUNT],
}

impl Goal {
    /// Builds a goal from any valid state.
    pub fn new(state: State) -> Self {
        let mut positions = [(0, 0); TILE_COUNT];
        for (idx, &tile) in state.tiles().iter().enumerate() {
            if let Some(slot) = positions.get_mut(tile as usize) {
                *slot = (idx / BOARD_WIDTH, idx % BOARD_WIDTH);
            }
        }
        Goal { state, positions }
    }

    /// The canonical goal `1 2 3 / 4 5 6 / 7 8 _`.
    pub fn standard() -> Self {
        Goal::new(State::new([1, 2, 3, 4, 5, 6, 7, 8, BLANK]))
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Target `(row, col)` of `tile`.
    pub fn position_of(&self, tile: u8) -> (usize, usize) {
        self.positions[tile as usize]
    }

    /// Structural equality with the goal state.
    pub fn is_goal(&self, state: &State) -> bool {
        *state == self.state
    }
}

impl Default for Goal {
    fn default() -> Self {
        Goal::standard()
    }
}
