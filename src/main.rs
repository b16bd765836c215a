use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::style::{style, Stylize};
use log::{info, warn};
use rand::{rngs::StdRng, thread_rng, SeedableRng};
use slider_puzzle::{Algorithm, Board, Heuristic, SearchEngine, SearchResult};
use std::{sync::mpsc, thread};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PuzzleKind {
    /// 4x4 board
    #[value(name = "15")]
    Fifteen,
    /// 5x5 board
    #[value(name = "24")]
    TwentyFour,
}

impl PuzzleKind {
    fn size(self) -> usize {
        match self {
            PuzzleKind::Fifteen => 4,
            PuzzleKind::TwentyFour => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AlgorithmArg {
    Bfs,
    /// A* with the zero heuristic
    Dijkstra,
    Manhattan,
    LinearConflict,
    /// A* with the inflated euclidean heuristic (not optimal)
    Euclidean,
    /// A* with twice the manhattan distance (not optimal)
    DoubledManhattan,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Bfs => Algorithm::Bfs,
            AlgorithmArg::Dijkstra => Algorithm::AStar(Heuristic::Zero),
            AlgorithmArg::Manhattan => Algorithm::AStar(Heuristic::Manhattan),
            AlgorithmArg::LinearConflict => Algorithm::AStar(Heuristic::LinearConflict),
            AlgorithmArg::Euclidean => Algorithm::AStar(Heuristic::InflatedEuclidean),
            AlgorithmArg::DoubledManhattan => Algorithm::AStar(Heuristic::DoubledManhattan),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Solve sliding-tile puzzles with BFS and A*", long_about = None)]
struct Args {
    /// Puzzle type
    #[arg(short, long, value_enum, default_value_t = PuzzleKind::Fifteen)]
    puzzle: PuzzleKind,

    /// Start board as row-major tiles with 0 for the blank, e.g. "1 2 3 4 5 6 7 8 0".
    /// Overrides --puzzle and --shuffle
    #[arg(short, long)]
    tiles: Option<Board>,

    /// Number of random slides applied to the solved board
    #[arg(short, long, default_value_t = 20)]
    shuffle: usize,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Searches to run, in order
    #[arg(
        short,
        long,
        value_enum,
        value_delimiter = ',',
        default_values = ["bfs", "dijkstra", "manhattan", "euclidean"]
    )]
    algorithm: Vec<AlgorithmArg>,

    /// Print every slide of each solution
    #[arg(long)]
    show_path: bool,
}

fn shuffled_board(args: &Args) -> Result<Board> {
    let solved = Board::solved(args.puzzle.size()).context("failed to build the solved board")?;
    let board = match args.seed {
        Some(seed) => solved.scramble(args.shuffle, &mut StdRng::seed_from_u64(seed)),
        None => solved.scramble(args.shuffle, &mut thread_rng()),
    };
    Ok(board)
}

fn print_board(board: &Board) {
    let size = board.size();
    for (row, col, tile) in board.cells() {
        let label = format!("{:2}", tile);
        if tile == 0 {
            print!("{} ", style(" .").dark_grey());
        } else if usize::from(tile) == row * size + col + 1 {
            print!("{} ", label);
        } else {
            print!("{} ", style(label).yellow());
        }
        if col + 1 == size {
            println!();
        }
    }
}

fn report(algorithm: Algorithm, result: &SearchResult, show_path: bool) {
    println!("--> {}", style(algorithm).bold());
    match result.move_count() {
        Some(moves) => {
            let note = match algorithm {
                Algorithm::AStar(heuristic) if !heuristic.is_admissible() => {
                    " (not guaranteed optimal)"
                }
                _ => "",
            };
            println!("    {} in {} moves{}", style("solved").green(), moves, note);
        }
        None => println!("    {}", style(result.outcome).red()),
    }
    println!("    time taken: {} ms", result.elapsed.as_millis());
    println!(
        "    states processed: {} (discovered {})",
        result.states_processed, result.states_discovered
    );

    if show_path {
        for (movement, board) in result.moves().into_iter().zip(result.path.iter().skip(1)) {
            println!("\n{}", movement);
            print_board(board);
        }
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = match &args.tiles {
        Some(board) => board.clone(),
        None => shuffled_board(&args)?,
    };

    println!("Start board:");
    print_board(&start);
    println!();

    if !start.is_solvable() {
        // Small grids can be exhausted; larger ones would run for hours.
        if start.size() > 3 {
            bail!("the start board is not solvable");
        }
        warn!("the start board is not solvable, searches will exhaust the state space");
    }

    let algorithms: Vec<Algorithm> = args.algorithm.iter().copied().map(Algorithm::from).collect();

    // Searches run on a worker; results are printed here as they arrive.
    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        let engine = SearchEngine::new(start);
        for algorithm in algorithms {
            info!("running {}", algorithm);
            let result = engine.run(algorithm);
            if tx.send((algorithm, result)).is_err() {
                break;
            }
        }
    });

    for (algorithm, result) in rx {
        report(algorithm, &result, args.show_path);
    }

    worker
        .join()
        .map_err(|_| anyhow!("search worker panicked"))?;
    Ok(())
}
