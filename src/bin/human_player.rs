use eight_puzzle_solver::engine::{Goal, Move, State};
use eight_puzzle_solver::heuristics::Heuristic;
use eight_puzzle_solver::solver::a_star_search;
use eight_puzzle_solver::utils::state_from_str;
use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> io::Result<()> {
    let goal = Goal::standard();

    // An optional board on the command line replaces the random start.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let start = if args.is_empty() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        State::new_random_with_seed(seed, &goal)
    } else {
        match state_from_str(&args.join(" ")) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(2);
            }
        }
    };

    let mut history: Vec<State> = vec![start];
    println!("Welcome to the 8-puzzle!");
    if !start.is_solvable(&goal) {
        println!("Warning: this board cannot be solved.");
    }

    loop {
        let current = *history.last().unwrap_or(&start);
        println!("---------------------");
        println!("Moves: {}", history.len() - 1);
        println!("{}", current);

        if goal.is_goal(&current) {
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total moves: {}", history.len() - 1);
            println!("---------------------");
            break;
        }

        print!("Move the blank (u/d/l/r), 'h' for a hint, 'z' to undo, 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "z" => {
                if history.len() > 1 {
                    history.pop();
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further (already at initial state).");
                }
            }
            "h" => match a_star_search(&current, &goal, Heuristic::Manhattan) {
                Some(result) => match result.path.first() {
                    Some(mv) => println!("Hint: {} ({} moves left)", mv, result.cost),
                    None => println!("Already solved."),
                },
                None => println!("No solution exists from here."),
            },
            other => match other.parse::<Move>() {
                Ok(mv) => match current.apply_move(mv) {
                    Some(next) => history.push(next),
                    None => println!("Invalid move: the blank cannot go {}.", mv),
                },
                Err(_) => println!("Invalid input. Use u, d, l, r, h, z or q."),
            },
        }
    }
    Ok(())
}
