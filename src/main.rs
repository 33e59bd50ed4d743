use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

use lineup_genre::index::ArtistIndex;
use lineup_genre::input::{load_seed, read_lineup};
use lineup_genre::parse::ParseOptions;
use lineup_genre::pipeline::run_with_progress;
use lineup_genre::progress::{create_progress_bar, create_spinner, format_duration, set_log_only};
use lineup_genre::render::{render, OutputFormat, RenderOptions};
use lineup_genre::safety::validate_output_path;

#[derive(Parser)]
#[command(name = "lineup-genre")]
#[command(about = "Group a festival lineup by artist genre")]
struct Args {
    /// Lineup text file, one act per line ("-" or omitted reads stdin)
    input: Option<PathBuf>,

    /// Reference artists JSON (defaults to the embedded seed)
    #[arg(long)]
    artists: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the report here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only show these genres (repeatable, case-insensitive)
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Also split lines on commas
    #[arg(long)]
    split_commas: bool,

    /// Number of largest genres listed in the text summary
    #[arg(long, default_value = "3")]
    top: usize,

    /// Write matching stats JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Disable progress bars (log-only mode for tail-friendly output)
    #[arg(long)]
    log_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_only(args.log_only);

    let start = Instant::now();

    if let Some(ref output) = args.output {
        let mut sources: Vec<&Path> = Vec::new();
        if let Some(ref input) = args.input {
            sources.push(input);
        }
        if let Some(ref artists) = args.artists {
            sources.push(artists);
        }
        validate_output_path(output, &sources)?;
    }

    let spinner = create_spinner("Loading reference artists");
    let seed = load_seed(args.artists.as_deref())?;
    let (index, report) = ArtistIndex::build_with_report(&seed);
    spinner.finish_with_message(format!("Loaded {} reference artists", index.len()));
    report.log();

    let text = read_lineup(args.input.as_deref())?;
    let options = ParseOptions {
        split_commas: args.split_commas,
    };
    let pb = create_progress_bar("Matching lineup");
    let lineup = run_with_progress(&text, &index, &options, &pb);

    if args.log_only {
        lineup.stats.log_phase("MATCH");
    }
    if let Some(ref path) = args.stats {
        lineup
            .stats
            .write_to_file(path)
            .with_context(|| format!("Failed to write stats to {:?}", path))?;
    }

    let render_options = RenderOptions {
        genres: args.genres,
        top: args.top,
    };
    let rendered = render(&lineup, args.format, &render_options)?;

    match args.output {
        Some(ref path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {:?}", path))?;
            eprintln!("Wrote report to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    eprintln!(
        "{} ({})",
        lineup.summary.status_line(),
        format_duration(start.elapsed())
    );
    Ok(())
}
