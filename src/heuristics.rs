use crate::engine::{Goal, State, BLANK, BOARD_WIDTH};
use crate::error::SolveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sum over non-blank tiles of the grid distance to their goal cell.
///
/// Admissible and consistent: every move shifts exactly one tile by one cell.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::{Goal, State};
/// use eight_puzzle_solver::heuristics::manhattan;
///
/// let goal = Goal::standard();
/// assert_eq!(manhattan(goal.state(), &goal), 0);
/// assert_eq!(manhattan(&State::new([1, 2, 3, 4, 5, 6, 7, 0, 8]), &goal), 1);
/// ```
pub fn manhattan(state: &State, goal: &Goal) -> u32 {
    let mut distance = 0;
    for (idx, &tile) in state.tiles().iter().enumerate() {
        if tile != BLANK {
            let (row, col) = (idx / BOARD_WIDTH, idx % BOARD_WIDTH);
            let (goal_row, goal_col) = goal.position_of(tile);
            distance += (row.abs_diff(goal_row) + col.abs_diff(goal_col)) as u32;
        }
    }
    distance
}

/// Sum over non-blank tiles of the straight-line distance to their goal cell.
///
/// Never larger than `manhattan`, so it is admissible too, but less informed.
pub fn euclidean(state: &State, goal: &Goal) -> f64 {
    let mut distance = 0.0;
    for (idx, &tile) in state.tiles().iter().enumerate() {
        if tile != BLANK {
            let (row, col) = (idx / BOARD_WIDTH, idx % BOARD_WIDTH);
            let (goal_row, goal_col) = goal.position_of(tile);
            let dr = row.abs_diff(goal_row) as f64;
            let dc = col.abs_diff(goal_col) as f64;
            distance += (dr * dr + dc * dc).sqrt();
        }
    }
    distance
}

/// Distance estimate used by A*.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::Manhattan, Heuristic::Euclidean];

    /// Estimated number of moves from `state` to `goal`.
    pub fn estimate(&self, state: &State, goal: &Goal) -> f64 {
        match self {
            Heuristic::Manhattan => manhattan(state, goal) as f64,
            Heuristic::Euclidean => euclidean(state, goal),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "Manhattan",
            Heuristic::Euclidean => "Euclidean",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Heuristic {
    type Err = SolveError;

    /// Accepts "Manhattan" or "Euclidean" in any letter case. Anything else is
    /// an `InvalidConfiguration`; there is no fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .iter()
            .copied()
            .find(|h| h.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                SolveError::InvalidConfiguration(format!("Unsupported heuristic '{}'", s))
            })
    }
}
