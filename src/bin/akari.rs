use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use akari::{
    board::Board,
    model::{LightUpModel, LightUpSemantics},
    solver::{
        engine::SolverEngine,
        heuristics::{
            value::IdentityValueHeuristic,
            variable::{
                MinimumRemainingValuesHeuristic, RandomVariableHeuristic, SelectFirstHeuristic,
                VariableSelectionHeuristic,
            },
        },
        stats::render_stats_table,
    },
};

/// The four boards shipped with the solver, in the text grid format.
const SAMPLES: [&str; 4] = [
    "....#..\n.31..2.\n#....0.\n.......\n.1....#\n.0..#2.\n..#....",
    ".#...3.\n1...2.#\n.1.....\n.......\n.....2.\n#.#...#\n.2...#.",
    "....2..\n...3...\n2.#.2..\n.#.#.1.\n..#.#.#\n...#...\n..3....",
    "....0..\n..1....\n2..#.3.\n..#.#..\n.0.#..1\n....#..\n..3....",
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Heuristic {
    /// Minimum remaining values, fail-first.
    Mrv,
    /// Lowest variable ID first.
    First,
    /// Random selection, seedable with --seed.
    Random,
}

/// Solve Light Up (Akari) puzzles.
#[derive(Debug, Parser)]
#[command(name = "akari", version)]
struct Args {
    /// A puzzle file: one row per line, `.` empty, `#` black, 0-4 numbered.
    puzzle: Option<PathBuf>,

    /// Solve one of the built-in sample boards instead of a file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4), conflicts_with = "puzzle")]
    sample: Option<u8>,

    /// Variable-selection heuristic for the search.
    #[arg(long, value_enum, default_value_t = Heuristic::Mrv)]
    heuristic: Heuristic,

    /// Seed for the random heuristic.
    #[arg(long)]
    seed: Option<u64>,

    /// Print per-constraint search statistics.
    #[arg(long)]
    stats: bool,

    /// Emit the resolution as JSON instead of a rendered board.
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(error) = run(&args) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (&args.puzzle, args.sample) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, sample) => SAMPLES[sample.unwrap_or(4) as usize - 1].to_string(),
    };
    let board: Board = text.parse()?;

    let variable_heuristic: Box<dyn VariableSelectionHeuristic<LightUpSemantics>> =
        match (args.heuristic, args.seed) {
            (Heuristic::Mrv, _) => Box::new(MinimumRemainingValuesHeuristic),
            (Heuristic::First, _) => Box::new(SelectFirstHeuristic),
            (Heuristic::Random, Some(seed)) => Box::new(RandomVariableHeuristic::seeded(seed)),
            (Heuristic::Random, None) => Box::new(RandomVariableHeuristic::new()),
        };
    let engine = SolverEngine::new(variable_heuristic, Box::new(IdentityValueHeuristic));

    let model = LightUpModel::new(&board);
    let (resolution, stats) = model.solve_with(&engine)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        print!("{resolution}");
    }

    if args.stats {
        println!("{}", render_stats_table(&stats, &model.constraints()));
    }

    Ok(())
}
