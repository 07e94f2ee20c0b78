use clap::Parser;
use eight_puzzle_solver::engine::{Goal, State};
use eight_puzzle_solver::solver::{solve, SearchLimits, Strategy};
use std::collections::HashMap;

const START_SEED: u64 = 0;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare search strategies over seeded scrambled boards", long_about = None)]
struct Args {
    /// Number of boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Random moves applied to the goal to build each board
    #[clap(short, long, default_value_t = 12)]
    scramble: usize,

    /// Skip IDS, which gets slow on deep boards
    #[clap(long)]
    skip_ids: bool,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    total_cost: u64,
    total_expanded: u64,
    total_seconds: f64,
}

fn main() {
    let args = Args::parse();
    let goal = Goal::standard();
    let limits = SearchLimits::default();

    let strategies: Vec<Strategy> = Strategy::ALL
        .iter()
        .copied()
        .filter(|s| !(args.skip_ids && *s == Strategy::Ids))
        .collect();

    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();

    println!(
        "Starting strategy evaluation for {} boards ({} scramble moves)...",
        args.boards, args.scramble
    );

    for board_idx in 0..args.boards {
        let seed = START_SEED + board_idx as u64;
        let initial = State::scrambled(&goal, args.scramble, seed);

        println!("\nEvaluating Board {} (Seed: {})", board_idx, seed);
        println!("{}", initial);

        for strategy in &strategies {
            let tally = tallies.entry(*strategy).or_default();
            match solve(*strategy, &initial, &goal, limits) {
                Some(result) => {
                    println!(
                        "  Strategy: {:<16} Cost: {:<4} Expanded: {:<8} Time: {:.4}s",
                        strategy.to_string(),
                        result.cost,
                        result.nodes_expanded,
                        result.elapsed.as_secs_f64()
                    );
                    tally.solved += 1;
                    tally.total_cost += result.cost as u64;
                    tally.total_expanded += result.nodes_expanded;
                    tally.total_seconds += result.elapsed.as_secs_f64();
                }
                None => {
                    println!("  Strategy: {:<16} No solution within its bound", strategy.to_string());
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("\n--- Averages over solved boards ---");

    let mut rows: Vec<(Strategy, f64, f64, f64, usize)> = Vec::new();
    for strategy in &strategies {
        let Some(tally) = tallies.get(strategy) else {
            continue;
        };
        if tally.solved == 0 {
            println!("Strategy {}: solved nothing.", strategy);
            continue;
        }
        let n = tally.solved as f64;
        rows.push((
            *strategy,
            tally.total_cost as f64 / n,
            tally.total_expanded as f64 / n,
            tally.total_seconds / n,
            tally.solved,
        ));
    }

    // Fewest expansions first
    rows.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    for (strategy, cost, expanded, seconds, solved) in rows {
        println!(
            "Strategy {:<16}: Solved = {:<3} Avg cost = {:<6.2} Avg expanded = {:<10.1} Avg time = {:.4}s",
            strategy.to_string(),
            solved,
            cost,
            expanded,
            seconds
        );
    }
}
