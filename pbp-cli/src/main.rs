//! Play-by-Play Decoder CLI Application
//!
//! This is the command-line interface for the play-by-play decoder.
//! It uses the pbp-decoder library and adds:
//! - Loading contests from a directory of game documents
//! - Parallel decoding of many contests
//! - Tabular (CSV) and JSON export
//! - An interactive raw event inspector

use anyhow::{bail, Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use pbp_decoder::{
    decode_contest, ContestSource, DecodedContest, DecoderConfig, DirectorySource,
};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

mod config;
mod inspect;
mod report;

use config::{AppConfig, InputConfig, OutputConfig, OutputFormat};

/// Play-by-Play Decoder - Turn event logs into plays with on-floor lineups
#[derive(Parser, Debug)]
#[command(name = "pbp-cli")]
#[command(about = "Decode play-by-play event logs into plays", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one or more contests and export their plays
    Decode(DecodeArgs),
    /// Step through a contest's raw events interactively
    Inspect(InspectArgs),
}

#[derive(ClapArgs, Debug)]
struct DecodeArgs {
    /// Contest identifier(s) to decode
    #[arg(value_name = "GAME_ID")]
    games: Vec<String>,

    /// Directory holding <id>.json game documents
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    games_dir: PathBuf,

    /// Path to configuration file (config.toml); replaces the other options
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory for per-contest exports (default: one combined stream on stdout)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Extra category code(s) that carry lineup checkpoints (can be repeated)
    #[arg(long, value_name = "CODE")]
    checkpoint_category: Vec<u16>,

    /// Only emit plays from these period(s) (can be repeated)
    #[arg(long, value_name = "PERIOD")]
    period: Vec<u8>,

    /// Fail if any substitution could not be applied
    #[arg(long)]
    strict: bool,
}

#[derive(ClapArgs, Debug)]
struct InspectArgs {
    /// Contest identifier
    #[arg(value_name = "GAME_ID")]
    game: String,

    /// Directory holding <id>.json game documents
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    games_dir: PathBuf,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Play-by-Play Decoder CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", pbp_decoder::VERSION);

    match args.command {
        Command::Decode(decode_args) => {
            let config = if let Some(path) = decode_args.config.clone() {
                log::info!("Loading configuration from: {:?}", path);
                config::load_config(&path)?
            } else {
                config_from_args(decode_args)?
            };
            decode_mode(&config)
        }
        Command::Inspect(inspect_args) => inspect_mode(&inspect_args),
    }
}

/// Build an application config from command line options
fn config_from_args(args: DecodeArgs) -> Result<AppConfig> {
    if args.games.is_empty() {
        bail!("No games given. Usage: pbp-cli decode <GAME_ID>... --games-dir <DIR>");
    }

    let mut decoder = DecoderConfig::new();
    for code in args.checkpoint_category {
        decoder = decoder.with_checkpoint_category(code);
    }
    if !args.period.is_empty() {
        decoder = decoder.with_period_filter(args.period);
    }

    Ok(AppConfig {
        input: InputConfig {
            games_dir: args.games_dir,
            games: args.games,
        },
        decoder,
        output: OutputConfig {
            format: args.format,
            output_dir: args.output,
            strict: args.strict,
        },
    })
}

/// Decode every configured contest in parallel, then export in input order
fn decode_mode(config: &AppConfig) -> Result<()> {
    let source = DirectorySource::new(&config.input.games_dir);

    let results: Vec<Result<(usize, DecodedContest)>> = config
        .input
        .games
        .par_iter()
        .map(|id| {
            let contest = source
                .fetch_contest(id)
                .with_context(|| format!("Failed to load contest {}", id))?;
            let decoded = decode_contest(&contest, &config.decoder)
                .with_context(|| format!("Failed to decode contest {}", id))?;
            Ok((contest.events.len(), decoded))
        })
        .collect();

    if let Some(dir) = &config.output.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    let mut decoded_contests = Vec::with_capacity(results.len());
    for (id, result) in config.input.games.iter().zip(results) {
        let (events, decoded) = result?;
        log::info!("{}", report::summary(id, events, &decoded));
        decoded_contests.push((id.as_str(), decoded));
    }
    let total_desyncs: usize = decoded_contests
        .iter()
        .map(|(_, decoded)| decoded.diagnostics.len())
        .sum();

    match &config.output.output_dir {
        Some(dir) => {
            for (id, decoded) in &decoded_contests {
                let path = dir.join(format!("{}.{}", id, config.output.format.extension()));
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create output file: {:?}", path))?;
                report::write_contest(decoded, config.output.format, BufWriter::new(file))?;
                log::info!("Wrote {:?}", path);
            }
        }
        None => {
            // All contests share stdout, so they go out as one table / one array.
            let contests: Vec<(&str, &DecodedContest)> = decoded_contests
                .iter()
                .map(|(id, decoded)| (*id, decoded))
                .collect();
            report::write_combined(&contests, config.output.format, io::stdout().lock())?;
        }
    }

    if config.output.strict && total_desyncs > 0 {
        bail!("{} roster desync(s) recorded in strict mode", total_desyncs);
    }
    Ok(())
}

/// Interactive mode - step through raw events on stdin
fn inspect_mode(args: &InspectArgs) -> Result<()> {
    let source = DirectorySource::new(&args.games_dir);
    let contest = source
        .fetch_contest(&args.game)
        .with_context(|| format!("Failed to load contest {}", args.game))?;

    println!("Inspecting {} ({} events)", contest.id, contest.events.len());
    println!("Enter: next event, space + Enter: dump event, q: quit\n");

    let shown = inspect::inspect(&contest.events, io::stdin().lock(), io::stdout().lock())?;
    log::info!("Inspected {} events", shown);
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
