use anyhow::{bail, Context, Result};
use clap::Parser;
use eight_puzzle_solver::engine::{Goal, State};
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::solver::{solve, SearchLimits, SearchResult, Strategy};
use eight_puzzle_solver::utils::{format_path, replay_path, state_from_str};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: BFS, DFS, IDS or A*
    #[clap(short, long, default_value = "BFS")]
    algorithm: String,

    /// Heuristic for A*: Manhattan or Euclidean
    #[clap(long, default_value = "Manhattan")]
    heuristic: String,

    /// Depth bound for DFS
    #[clap(long, default_value_t = eight_puzzle_solver::solver::DFS_DEPTH_LIMIT)]
    dfs_depth: u32,

    /// Largest bound tried by IDS
    #[clap(long, default_value_t = eight_puzzle_solver::solver::IDS_MAX_DEPTH)]
    ids_max_depth: u32,

    /// Print every board along the solution
    #[clap(long)]
    show_steps: bool,

    /// Print the result as JSON instead of a report
    #[clap(long)]
    json: bool,

    /// Print the search configuration to stderr
    #[clap(short, long)]
    verbose: bool,

    /// Read the board from a file instead of the command line
    #[clap(short, long, conflicts_with = "board")]
    file: Option<PathBuf>,

    /// Initial board, row-major, 0 for the blank (e.g. 1 2 5 3 4 0 6 7 8)
    board: Vec<String>,
}

fn read_board(args: &Args) -> Result<State> {
    let text = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read board file {}", path.display()))?,
        None if args.board.is_empty() => {
            bail!("No board given. Enter numbers 0-8 exactly once, separated by spaces.")
        }
        None => args.board.join(" "),
    };
    state_from_str(&text).context("Please enter numbers 0-8 exactly once, separated by spaces")
}

fn print_report(initial: &State, result: &SearchResult, show_steps: bool) {
    if show_steps {
        for (step, board) in replay_path(initial, &result.path).iter().enumerate() {
            println!("Step {}:\n{}", step, board);
        }
    }
    println!("Solution Report");
    println!("Path to goal: {}", format_path(&result.path));
    println!("Cost of path: {}", result.cost);
    println!("Total moves: {}", result.number_of_moves());
    println!("Nodes expanded: {}", result.nodes_expanded);
    println!("Time taken: {:.4} seconds", result.elapsed.as_secs_f64());
}

fn main() -> Result<()> {
    let args = Args::parse();

    let strategy: Strategy = args.algorithm.parse()?;
    let heuristic: Heuristic = args.heuristic.parse()?;
    let strategy = strategy.with_heuristic(heuristic);
    let limits = SearchLimits {
        dfs_depth: args.dfs_depth,
        ids_max_depth: args.ids_max_depth,
    };

    let goal = Goal::standard();
    let initial = read_board(&args)?;

    if args.verbose {
        eprintln!("Algorithm: {}", strategy);
        eprintln!("Limits: DFS depth {}, IDS max depth {}", limits.dfs_depth, limits.ids_max_depth);
        eprintln!("Initial board:\n{}", initial);
        if !initial.is_solvable(&goal) {
            eprintln!("Warning: this board cannot reach the goal; the search will exhaust.");
        }
    }

    let result = solve(strategy, &initial, &goal, limits);

    if args.json {
        match &result {
            Some(result) => println!("{}", result.to_json()?),
            None => println!("null"),
        }
        return Ok(());
    }

    match result {
        Some(result) => print_report(&initial, &result, args.show_steps),
        None => println!("No solution found or depth limit exceeded."),
    }
    Ok(())
}
