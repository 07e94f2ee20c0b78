use crate::engine::{Move, State, TILE_COUNT};
use crate::error::{SolveError, SolveResult};

/// Parses a whitespace-separated list of tiles into a `State`.
///
/// The input must contain exactly nine integers and each of `0..=8` must
/// appear once, with `0` standing for the blank. Tiles are read row-major.
///
/// # Arguments
/// * `s`: The board, e.g. `"1 2 5 3 4 0 6 7 8"`.
///
/// # Returns
/// * `Ok(State)` if the input is a valid board.
/// * `Err(SolveError::InvalidState)` if a token is not a number, the count is
///   not nine, or the numbers are not a permutation of `0..=8`.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::utils::state_from_str;
///
/// let state = state_from_str("1 2 5 3 4 0 6 7 8").unwrap();
/// assert_eq!(state.tiles(), &[1, 2, 5, 3, 4, 0, 6, 7, 8]);
///
/// assert!(state_from_str("1 2 3").is_err());
/// assert!(state_from_str("1 2 3 4 5 6 7 8 8").is_err());
/// assert!(state_from_str("a b c d e f g h i").is_err());
/// ```
pub fn state_from_str(s: &str) -> SolveResult<State> {
    let mut tiles = Vec::with_capacity(TILE_COUNT);
    for token in s.split_whitespace() {
        let tile = token.parse::<u8>().map_err(|_| {
            SolveError::InvalidState(format!("'{}' is not a tile number", token))
        })?;
        tiles.push(tile);
    }
    State::try_from_tiles(&tiles)
}

/// Every board visited while following `path` from `initial`, `initial` included.
///
/// Stops early at the first move that would push the blank off the board, so
/// the result has at most `path.len() + 1` entries.
pub fn replay_path(initial: &State, path: &[Move]) -> Vec<State> {
    let mut boards = Vec::with_capacity(path.len() + 1);
    boards.push(*initial);

    let mut current = *initial;
    for &mv in path {
        match current.apply_move(mv) {
            Some(next) => {
                boards.push(next);
                current = next;
            }
            None => break,
        }
    }
    boards
}

/// Renders a path as `"Up -> Left -> Down"`.
pub fn format_path(path: &[Move]) -> String {
    path.iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}
