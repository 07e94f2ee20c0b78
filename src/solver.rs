use crate::engine::{Goal, Move, State};
use crate::error::{SolveError, SolveResult};
use crate::heuristics::Heuristic;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

/// Depth bound of the depth-limited DFS: nodes at this cost are not expanded.
pub const DFS_DEPTH_LIMIT: u32 = 20;

/// Largest bound iterative deepening will try before giving up.
pub const IDS_MAX_DEPTH: u32 = 50;

/// Represents a solution found by one of the search strategies.
#[derive(Clone, Debug, Serialize)]
pub struct SearchResult {
    /// Moves of the blank, from the initial state to the goal.
    pub path: Vec<Move>,
    /// Number of moves on `path` (every move costs one).
    pub cost: u32,
    /// How many states the strategy expanded before it stopped.
    pub nodes_expanded: u64,
    /// Wall-clock time spent inside the strategy.
    #[serde(rename = "elapsed_time", serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
}

fn serialize_seconds<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

impl SearchResult {
    pub fn number_of_moves(&self) -> usize {
        self.path.len()
    }

    /// Pretty-printed JSON with the path as move names and the time in seconds.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Bounds for the depth-capped strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    pub dfs_depth: u32,
    pub ids_max_depth: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            dfs_depth: DFS_DEPTH_LIMIT,
            ids_max_depth: IDS_MAX_DEPTH,
        }
    }
}

/// Which search algorithm to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ids,
    AStar(Heuristic),
}

impl Strategy {
    /// Every strategy, with A* listed once per heuristic.
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ids,
        Strategy::AStar(Heuristic::Manhattan),
        Strategy::AStar(Heuristic::Euclidean),
    ];

    /// Replaces the heuristic of an A* strategy; other strategies are returned unchanged.
    pub fn with_heuristic(self, heuristic: Heuristic) -> Self {
        match self {
            Strategy::AStar(_) => Strategy::AStar(heuristic),
            other => other,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Bfs => write!(f, "BFS"),
            Strategy::Dfs => write!(f, "DFS"),
            Strategy::Ids => write!(f, "IDS"),
            Strategy::AStar(h) => write!(f, "A* ({})", h),
        }
    }
}

impl FromStr for Strategy {
    type Err = SolveError;

    /// Accepts "BFS", "DFS", "IDS" and "A*" (also "astar"), in any letter case.
    /// A* starts with the default heuristic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "ids" => Ok(Strategy::Ids),
            "a*" | "astar" => Ok(Strategy::AStar(Heuristic::default())),
            _ => Err(SolveError::InvalidConfiguration(format!(
                "Unknown algorithm '{}'",
                s
            ))),
        }
    }
}

/// Runs `strategy` from `initial` towards `goal`.
pub fn solve(
    strategy: Strategy,
    initial: &State,
    goal: &Goal,
    limits: SearchLimits,
) -> Option<SearchResult> {
    match strategy {
        Strategy::Bfs => breadth_first_search(initial, goal),
        Strategy::Dfs => depth_limited_search_with_limit(initial, goal, limits.dfs_depth),
        Strategy::Ids => iterative_deepening_search_with_limit(initial, goal, limits.ids_max_depth),
        Strategy::AStar(heuristic) => a_star_search(initial, goal, heuristic),
    }
}

/// A frontier entry for the uninformed strategies.
struct Node {
    state: State,
    path: Vec<Move>,
    cost: u32,
}

impl Node {
    fn root(state: State) -> Self {
        Node {
            state,
            path: Vec::new(),
            cost: 0,
        }
    }

    fn child(&self, state: State, mv: Move) -> Self {
        let mut path = self.path.clone();
        path.push(mv);
        Node {
            state,
            path,
            cost: self.cost + 1,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Discipline {
    Fifo,
    Lifo,
}

/// Shared loop of BFS and depth-limited DFS.
///
/// A state enters the frontier at most once while it is waiting there, and
/// never after it has been explored. `in_frontier` mirrors the frontier's
/// states so that check does not scan the queue.
fn graph_search(
    initial: &State,
    goal: &Goal,
    discipline: Discipline,
    depth_limit: Option<u32>,
) -> Option<SearchResult> {
    let start = Instant::now();
    let mut frontier = VecDeque::new();
    let mut in_frontier = HashSet::new();
    let mut explored = HashSet::new();
    let mut nodes_expanded = 0;

    frontier.push_back(Node::root(*initial));
    in_frontier.insert(*initial);

    loop {
        let node = match discipline {
            Discipline::Fifo => frontier.pop_front(),
            Discipline::Lifo => frontier.pop_back(),
        };
        let Some(node) = node else {
            return None;
        };
        in_frontier.remove(&node.state);
        explored.insert(node.state);

        if goal.is_goal(&node.state) {
            return Some(SearchResult {
                path: node.path,
                cost: node.cost,
                nodes_expanded,
                elapsed: start.elapsed(),
            });
        }

        if depth_limit.map_or(true, |limit| node.cost < limit) {
            for (next, mv) in node.state.neighbors() {
                if !explored.contains(&next) && !in_frontier.contains(&next) {
                    in_frontier.insert(next);
                    frontier.push_back(node.child(next, mv));
                }
            }
        }
        nodes_expanded += 1;
    }
}

/// Breadth-first search; the returned path is always a shortest one.
///
/// Returns `None` only if the whole reachable space is exhausted, which
/// happens for boards that cannot reach the goal.
pub fn breadth_first_search(initial: &State, goal: &Goal) -> Option<SearchResult> {
    graph_search(initial, goal, Discipline::Fifo, None)
}

/// Depth-first search that does not expand nodes at cost `DFS_DEPTH_LIMIT` or deeper.
///
/// The path found is not necessarily the shortest. `None` means "not found
/// within the bound", not that the board is unsolvable.
pub fn depth_limited_search(initial: &State, goal: &Goal) -> Option<SearchResult> {
    depth_limited_search_with_limit(initial, goal, DFS_DEPTH_LIMIT)
}

/// `depth_limited_search` with a custom depth bound.
pub fn depth_limited_search_with_limit(
    initial: &State,
    goal: &Goal,
    depth_limit: u32,
) -> Option<SearchResult> {
    graph_search(initial, goal, Discipline::Lifo, Some(depth_limit))
}

/// Iterative deepening: bounded depth-first passes with bounds 0, 1, 2, ...
/// up to `IDS_MAX_DEPTH`.
///
/// The first bound that reaches the goal yields a shortest path.
/// `nodes_expanded` totals the states entered below the root over all passes.
pub fn iterative_deepening_search(initial: &State, goal: &Goal) -> Option<SearchResult> {
    iterative_deepening_search_with_limit(initial, goal, IDS_MAX_DEPTH)
}

/// `iterative_deepening_search` with a custom largest bound.
pub fn iterative_deepening_search_with_limit(
    initial: &State,
    goal: &Goal,
    max_depth: u32,
) -> Option<SearchResult> {
    let start = Instant::now();
    let mut total_expanded = 0;

    for bound in 0..=max_depth {
        let mut visited = HashSet::new();
        visited.insert(*initial);
        let mut path = Vec::new();

        let found = bounded_dfs(
            initial,
            goal,
            bound,
            &mut path,
            &mut visited,
            &mut total_expanded,
        );
        if found {
            return Some(SearchResult {
                cost: path.len() as u32,
                path,
                nodes_expanded: total_expanded,
                elapsed: start.elapsed(),
            });
        }
    }
    None
}

/// One depth-bounded pass. `visited` holds the states on the current path:
/// each is added on entry and removed when its subtree is exhausted, so a
/// state may be reached again along another path but never twice on one.
fn bounded_dfs(
    state: &State,
    goal: &Goal,
    depth_remaining: u32,
    path: &mut Vec<Move>,
    visited: &mut HashSet<State>,
    entered: &mut u64,
) -> bool {
    if goal.is_goal(state) {
        return true;
    }
    if depth_remaining == 0 {
        return false;
    }

    for (next, mv) in state.neighbors() {
        if !visited.insert(next) {
            continue;
        }
        *entered += 1;
        path.push(mv);

        if bounded_dfs(&next, goal, depth_remaining - 1, path, visited, entered) {
            return true;
        }

        // Backtrack
        path.pop();
        visited.remove(&next);
    }
    false
}

/// A* frontier entry, ordered so `BinaryHeap` pops the smallest f first.
struct Candidate {
    f: f64,
    g: u32,
    state: State,
    path: Vec<Move>,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    // Lower f first, then lower g; state and path only make the order total.
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .total_cmp(&other.f)
            .then(self.g.cmp(&other.g))
            .then(self.state.cmp(&other.state))
            .then(self.path.cmp(&other.path))
            .reverse()
    }
}

/// A* search guided by `heuristic`.
///
/// Both heuristics are admissible, so the returned path is a shortest one;
/// they differ only in how many nodes get expanded. Stale frontier entries for
/// already explored states are skipped when popped.
pub fn a_star_search(initial: &State, goal: &Goal, heuristic: Heuristic) -> Option<SearchResult> {
    let start = Instant::now();
    let mut frontier = BinaryHeap::new();
    let mut explored = HashSet::new();
    let mut nodes_expanded = 0;

    frontier.push(Candidate {
        f: heuristic.estimate(initial, goal),
        g: 0,
        state: *initial,
        path: Vec::new(),
    });

    while let Some(Candidate { g, state, path, .. }) = frontier.pop() {
        if goal.is_goal(&state) {
            return Some(SearchResult {
                path,
                cost: g,
                nodes_expanded,
                elapsed: start.elapsed(),
            });
        }
        if !explored.insert(state) {
            continue;
        }
        nodes_expanded += 1;

        for (next, mv) in state.neighbors() {
            if explored.contains(&next) {
                continue;
            }
            let next_g = g + 1;
            let mut next_path = path.clone();
            next_path.push(mv);
            frontier.push(Candidate {
                f: next_g as f64 + heuristic.estimate(&next, goal),
                g: next_g,
                state: next,
                path: next_path,
            });
        }
    }
    None
}

/// A* with the heuristic given by name ("Manhattan" or "Euclidean").
///
/// An unknown name is reported as `InvalidConfiguration` before any search work.
pub fn a_star_search_named(
    initial: &State,
    goal: &Goal,
    heuristic: &str,
) -> SolveResult<Option<SearchResult>> {
    let heuristic: Heuristic = heuristic.parse()?;
    Ok(a_star_search(initial, goal, heuristic))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> Goal {
        Goal::standard()
    }

    /// Replays `path` from `initial`, panicking on a move that leaves the board.
    fn replay(initial: &State, path: &[Move]) -> State {
        path.iter().fold(*initial, |state, &mv| {
            state
                .apply_move(mv)
                .unwrap_or_else(|| panic!("Move {} is illegal from {:?}", mv, state))
        })
    }

    #[test]
    fn test_every_strategy_on_goal_state() {
        let goal = goal();
        for strategy in Strategy::ALL {
            let result = solve(strategy, goal.state(), &goal, SearchLimits::default())
                .unwrap_or_else(|| panic!("{} found nothing on the goal state", strategy));
            assert!(result.path.is_empty(), "{}: path should be empty", strategy);
            assert_eq!(result.cost, 0, "{}: cost should be 0", strategy);
            assert_eq!(result.nodes_expanded, 0, "{}: nothing to expand", strategy);
        }
    }

    #[test]
    fn test_one_move_away() {
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        for strategy in Strategy::ALL {
            let result = solve(strategy, &initial, &goal, SearchLimits::default()).unwrap();
            assert_eq!(result.path, vec![Move::Right], "{}", strategy);
            assert_eq!(result.cost, 1);
        }
    }

    #[test]
    fn test_bfs_counts_expansions_before_goal() {
        // Dequeue order: start (expands), Up, Left, then Right is the goal.
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let result = breadth_first_search(&initial, &goal).unwrap();
        assert_eq!(result.nodes_expanded, 3);

        let result = depth_limited_search(&initial, &goal).unwrap();
        assert_eq!(result.nodes_expanded, 1, "DFS pops the last pushed move first");

        let result = a_star_search(&initial, &goal, Heuristic::Manhattan).unwrap();
        assert_eq!(result.nodes_expanded, 1);
    }

    #[test]
    fn test_two_moves_away() {
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        for strategy in Strategy::ALL {
            let result = solve(strategy, &initial, &goal, SearchLimits::default()).unwrap();
            assert_eq!(result.path, vec![Move::Right, Move::Down], "{}", strategy);
        }
    }

    #[test]
    fn test_ids_counts_entered_states() {
        // Bound 0 enters nothing; bound 1 enters Up and Left and then the goal.
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 5, 6, 7, 0, 8]);
        let result = iterative_deepening_search(&initial, &goal).unwrap();
        assert_eq!(result.nodes_expanded, 3);
    }

    #[test]
    fn test_scenario_cost_agrees_across_optimal_strategies() {
        let goal = goal();
        let initial = State::new([1, 2, 5, 3, 4, 0, 6, 7, 8]);

        let bfs = breadth_first_search(&initial, &goal).unwrap();
        let astar = a_star_search(&initial, &goal, Heuristic::Manhattan).unwrap();
        let ids = iterative_deepening_search(&initial, &goal).unwrap();

        assert_eq!(bfs.cost, 21);
        assert_eq!(astar.cost, 21);
        assert_eq!(ids.cost, 21);
        assert_eq!(bfs.path.len(), astar.path.len());
        assert_eq!(bfs.path.len(), ids.path.len());
        for result in [&bfs, &astar, &ids] {
            assert_eq!(replay(&initial, &result.path), *goal.state());
        }
    }

    #[test]
    fn test_dfs_reports_nothing_beyond_its_bound() {
        // The shortest solution is 21 moves, one more than the bound allows.
        let goal = goal();
        let initial = State::new([1, 2, 5, 3, 4, 0, 6, 7, 8]);
        assert!(depth_limited_search(&initial, &goal).is_none());
    }

    #[test]
    fn test_dfs_path_within_bound() {
        let goal = goal();
        for seed in 0..20 {
            let initial = State::scrambled(&goal, 12, seed);
            if let Some(result) = depth_limited_search(&initial, &goal) {
                assert!(result.cost <= DFS_DEPTH_LIMIT);
                assert_eq!(result.cost as usize, result.path.len());
                assert_eq!(replay(&initial, &result.path), *goal.state());
            }
        }
    }

    #[test]
    fn test_dfs_custom_limit() {
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        assert!(depth_limited_search_with_limit(&initial, &goal, 1).is_none());
        let result = depth_limited_search_with_limit(&initial, &goal, 2).unwrap();
        assert_eq!(result.cost, 2);
    }

    #[test]
    fn test_ids_gives_up_past_max_depth() {
        let goal = goal();
        let initial = State::new([1, 2, 3, 4, 0, 5, 7, 8, 6]);
        assert!(iterative_deepening_search_with_limit(&initial, &goal, 1).is_none());
        let result = iterative_deepening_search_with_limit(&initial, &goal, 2).unwrap();
        assert_eq!(result.cost, 2);
    }

    #[test]
    fn test_unsolvable_board_exhausts() {
        let goal = goal();
        let initial = State::new([2, 1, 3, 4, 5, 6, 7, 8, 0]);
        assert!(!initial.is_solvable(&goal));
        assert!(depth_limited_search(&initial, &goal).is_none());
        assert!(breadth_first_search(&initial, &goal).is_none());
        assert!(a_star_search(&initial, &goal, Heuristic::Manhattan).is_none());
    }

    #[test]
    fn test_manhattan_expands_no_more_than_euclidean() {
        let goal = goal();
        let initial = State::new([1, 2, 5, 3, 4, 0, 6, 7, 8]);
        let manhattan = a_star_search(&initial, &goal, Heuristic::Manhattan).unwrap();
        let euclidean = a_star_search(&initial, &goal, Heuristic::Euclidean).unwrap();
        assert_eq!(manhattan.cost, euclidean.cost);
        assert!(
            manhattan.nodes_expanded <= euclidean.nodes_expanded,
            "Manhattan expanded {} nodes, Euclidean {}",
            manhattan.nodes_expanded,
            euclidean.nodes_expanded
        );
    }

    #[test]
    fn test_a_star_named_rejects_unknown_heuristic() {
        let goal = goal();
        let result = a_star_search_named(goal.state(), &goal, "Diagonal");
        assert!(matches!(result, Err(SolveError::InvalidConfiguration(_))));

        let result = a_star_search_named(goal.state(), &goal, "Euclidean").unwrap();
        assert_eq!(result.map(|r| r.cost), Some(0));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let goal = goal();
        let initial = State::scrambled(&goal, 14, 3);
        for strategy in Strategy::ALL {
            let first = solve(strategy, &initial, &goal, SearchLimits::default());
            let second = solve(strategy, &initial, &goal, SearchLimits::default());
            match (first, second) {
                (Some(a), Some(b)) => {
                    assert_eq!(a.path, b.path, "{}", strategy);
                    assert_eq!(a.cost, b.cost, "{}", strategy);
                    assert_eq!(a.nodes_expanded, b.nodes_expanded, "{}", strategy);
                }
                (None, None) => {}
                _ => panic!("{} disagreed with itself", strategy),
            }
        }
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("BFS".parse::<Strategy>(), Ok(Strategy::Bfs));
        assert_eq!("dfs".parse::<Strategy>(), Ok(Strategy::Dfs));
        assert_eq!("IDS".parse::<Strategy>(), Ok(Strategy::Ids));
        assert_eq!(
            "A*".parse::<Strategy>(),
            Ok(Strategy::AStar(Heuristic::Manhattan))
        );
        assert_eq!(
            "astar"
                .parse::<Strategy>()
                .map(|s| s.with_heuristic(Heuristic::Euclidean)),
            Ok(Strategy::AStar(Heuristic::Euclidean))
        );
        assert_eq!(Strategy::Bfs.with_heuristic(Heuristic::Euclidean), Strategy::Bfs);
        assert!(matches!(
            "UCS".parse::<Strategy>(),
            Err(SolveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_limits() {
        let limits = SearchLimits::default();
        assert_eq!(limits.dfs_depth, 20);
        assert_eq!(limits.ids_max_depth, 50);
    }
}
