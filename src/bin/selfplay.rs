//! Match simulation CLI.
//!
//! Plays AI-vs-AI matches and outputs one JSON record per match (JSONL).
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --games N       Number of matches to play (default: 100)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --max-rounds N  Round cap before a match is a draw (default: 30)
//!   --roster FILE   Roster JSON to use instead of the built-in one
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use element_duel::content::{load_roster, standard_roster};
use element_duel::selfplay::{self, SimConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SimConfig::default();
    let mut output_path: Option<String> = None;
    let mut roster_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => config.num_games = flag_value(&args, &mut i),
            "--threads" => config.threads = flag_value(&args, &mut i),
            "--seed" => config.seed = flag_value(&args, &mut i),
            "--max-rounds" => config.max_rounds = flag_value(&args, &mut i),
            "--roster" => roster_path = Some(flag_value(&args, &mut i)),
            "--output" => output_path = Some(flag_value(&args, &mut i)),
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let default_filter = if config.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let roster = match &roster_path {
        Some(path) => match load_roster(Path::new(path)) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => standard_roster(),
    };

    if !config.quiet {
        eprintln!(
            "Simulation: {} games, {} threads, seed {}, max rounds {}",
            config.num_games, config.threads, config.seed, config.max_rounds
        );
    }

    let start = Instant::now();
    let games = selfplay::run_simulation(&config, &roster);
    let elapsed = start.elapsed();

    if !config.quiet {
        eprintln!(
            "Completed {} games in {:.2}s ({:.0} games/s)",
            games.len(),
            elapsed.as_secs_f64(),
            games.len() as f64 / elapsed.as_secs_f64().max(1e-9)
        );
        selfplay::print_summary(&games);
    }

    let written = match &output_path {
        Some(path) => File::create(path)
            .and_then(|file| selfplay::write_jsonl(&games, &mut BufWriter::new(file))),
        None => selfplay::write_jsonl(&games, &mut BufWriter::new(io::stdout().lock())),
    };
    if let Err(e) = written {
        eprintln!("failed to write output: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, config.quiet) {
        eprintln!("Wrote {} games to {}", games.len(), path);
    }
}

/// Reads the value following the flag at `args[*i]`, advancing `i`.
/// Exits with usage on a missing or unparsable value.
fn flag_value<T: FromStr>(args: &[String], i: &mut usize) -> T {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i).map(|v| v.parse::<T>()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("invalid {} value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --games N        Number of matches to play (default: 100)");
    eprintln!("  --threads N      Number of parallel threads (default: 4)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --max-rounds N   Round cap before a match is a draw (default: 30)");
    eprintln!("  --roster FILE    Roster JSON to use instead of the built-in one");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress progress and summary output");
    eprintln!("  --help           Show this help");
}
