use catnet_algo::algorithms::{
    AlgorithmKind, HeuristicConfig, MinIRafHeuristic, MinRafGeneratingElement, MuCaf, MultiRun,
    RandomizedAlgorithm, URaf,
};
use catnet_algo::closure::ClosureRules;
use catnet_algo::generator::PolymerModel;
use catnet_algo::importance::{food_importance, format_importance, reaction_importance};
use catnet_algo::io::{ArrowStyle, Notation, read_system, write_system};
use catnet_algo::model::ReactionSystem;
use catnet_algo::progress::{LogProgress, ProgressSink};
use catnet_algo::stratification::Stratification;
use catnet_algo::DEFAULT_SEED;
use cancel_this::Cancellable;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::fmt::Write;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "catnet")]
#[command(about = "Compute CAFs, RAFs and related sub-networks of catalytic reaction systems")]
struct Args {
    /// The algorithm to run, e.g. "Max RAF" or "maxraf" (case and spaces are ignored)
    #[arg(short = 'c', long = "compute", value_name = "ALGORITHM")]
    algorithm: AlgorithmKind,

    /// Path to a reaction system file
    #[arg(short = 'i', long = "input", value_name = "FILE", required_unless_present = "polymer")]
    input: Option<PathBuf>,

    /// Generate the input from the polymer model instead of reading a file
    #[arg(long, conflicts_with = "input")]
    polymer: bool,

    /// Polymer model: alphabet size
    #[arg(long, default_value_t = 2, requires = "polymer")]
    alphabet: usize,

    /// Polymer model: maximal length of food polymers
    #[arg(long, default_value_t = 2, requires = "polymer")]
    food_length: usize,

    /// Polymer model: maximal polymer length
    #[arg(long, default_value_t = 4, requires = "polymer")]
    max_length: usize,

    /// Polymer model: mean number of reactions catalyzed by one molecule
    #[arg(long, default_value_t = 2.0, requires = "polymer")]
    catalyzation: f64,

    /// Write the result to this file instead of standard output
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Number of randomized runs of the heuristic algorithms
    #[arg(short = 'r', long = "runs", default_value_t = 100)]
    runs: usize,

    /// Master seed of the randomized algorithms and the polymer model
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Target molecules of "Min RAF Generating Element"
    #[arg(long, value_delimiter = ',')]
    targets: Vec<String>,

    /// Report all smallest results of the heuristics, not only the first one
    #[arg(long)]
    all_smallest: bool,

    /// Reaction notation of the output (full or sparse)
    #[arg(long = "rn", alias = "reaction-notation", default_value = "full")]
    notation: Notation,

    /// Arrow style of the output (simple or double)
    #[arg(long = "an", alias = "arrow-style", default_value = "simple")]
    arrows: ArrowStyle,

    /// Also report the importance of food molecules and reactions for the result
    #[arg(long)]
    importance: bool,

    /// Also report the stratification of the result
    #[arg(long)]
    stratify: bool,

    /// Cancel the computation after this many seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

/// Every outcome of a randomized algorithm, annotated with its frequency.
fn all_outcomes<A: RandomizedAlgorithm>(
    algorithm: A,
    args: &Args,
    input: &ReactionSystem,
    progress: &dyn ProgressSink,
) -> Cancellable<Vec<(ReactionSystem, String)>> {
    let runs = MultiRun::new(algorithm, args.runs, args.seed);
    Ok(runs
        .outcomes(input, progress)?
        .into_iter()
        .map(|o| {
            let note = format!("found in {} of {} runs", o.count, args.runs);
            (o.system, note)
        })
        .collect())
}

fn compute(args: &Args, input: &ReactionSystem) -> Cancellable<String> {
    let progress = LogProgress::new();
    let config = HeuristicConfig {
        runs: args.runs,
        seed: args.seed,
        all_smallest: args.all_smallest,
        targets: args.targets.clone(),
    };

    let results: Vec<(ReactionSystem, String)> = match args.algorithm {
        AlgorithmKind::MuCaf => all_outcomes(MuCaf, args, input, &progress)?,
        AlgorithmKind::URaf => all_outcomes(URaf, args, input, &progress)?,
        AlgorithmKind::MinIRaf => MinIRafHeuristic::new(config.clone())
            .apply_all(input, &progress)?
            .into_iter()
            .map(|s| (s, String::new()))
            .collect(),
        AlgorithmKind::MinRafGeneratingElement => MinRafGeneratingElement::new(config.clone())
            .apply_all(input, &progress)?
            .into_iter()
            .map(|s| (s, String::new()))
            .collect(),
        kind => {
            let result = kind.build(&config).apply(input, &progress)?;
            vec![(result, String::new())]
        }
    };

    let mut output = String::new();
    if results.is_empty() {
        let _ = writeln!(output, "# {}: no result", args.algorithm);
    }
    for (result, note) in &results {
        let _ = write!(output, "{}", write_system(result, args.notation, args.arrows));
        if !note.is_empty() {
            let _ = writeln!(output, "# {note}");
        }
        let _ = writeln!(output, "# {} reactions", result.size());

        if args.importance {
            let algorithm = args.algorithm.build(&config);
            let food = food_importance(algorithm.as_ref(), input, result, &progress)?;
            let reactions = reaction_importance(algorithm.as_ref(), input, result, &progress)?;
            let _ = writeln!(output, "# Food importance: {}", format_importance(&food));
            let _ = writeln!(output, "# Reaction importance: {}", format_importance(&reactions));
        }
        if args.stratify {
            let strata = Stratification::compute(result, ClosureRules::STRICT, &progress)?;
            for line in strata.report().lines() {
                let _ = writeln!(output, "# {line}");
            }
        }
        let _ = writeln!(output);
    }
    Ok(output)
}

fn main() {
    let args = Args::parse();

    // None = not specified, Some(None) = -v without value, Some(Some(level)) = -v=level
    let log_level = match &args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.clone().into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let input = if let Some(path) = &args.input {
        read_system(path).unwrap_or_else(|e| {
            eprintln!("Failed to load reaction system {}: {}", path.display(), e);
            std::process::exit(1);
        })
    } else {
        let model = PolymerModel {
            alphabet_size: args.alphabet,
            food_max_length: args.food_length,
            max_length: args.max_length,
            mean_catalyzation: args.catalyzation,
            seed: args.seed,
        };
        model.generate().unwrap_or_else(|e| {
            eprintln!("Failed to generate polymer model: {}", e);
            std::process::exit(1);
        })
    };

    eprintln!(
        "Loaded `{}` with {} reactions and {} food molecules.",
        input.name(),
        input.size(),
        input.food().len()
    );

    let result = match args.timeout {
        Some(seconds) => {
            cancel_this::on_timeout(Duration::from_secs(seconds), || compute(&args, &input))
        }
        None => compute(&args, &input),
    };
    let output = result.unwrap_or_else(|e| {
        eprintln!("Computation of {} cancelled: {}", args.algorithm, e);
        std::process::exit(1);
    });

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, output) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(1);
            }
        }
        None => print!("{output}"),
    }
}
