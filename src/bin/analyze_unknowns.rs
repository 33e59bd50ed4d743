//! List lineup entries that resolved to Unknown, with the closest reference name.
//!
//! Hints only: nothing here changes how entries are matched.
//!
//! Usage: analyze-unknowns [lineup.txt] [--artists seed.json] [--limit N]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use lineup_genre::index::ArtistIndex;
use lineup_genre::input::{load_seed, read_lineup};
use lineup_genre::normalize::{normalize_key, strip_set_meta};
use lineup_genre::parse::ParseOptions;
use lineup_genre::pipeline::run;

/// Hints below this normalized similarity are not shown
const MIN_SIMILARITY: f64 = 0.75;

#[derive(Parser)]
#[command(name = "analyze-unknowns")]
#[command(about = "Suggest reference artists for unmatched lineup entries")]
struct Args {
    input: Option<PathBuf>,

    #[arg(long)]
    artists: Option<PathBuf>,

    /// Maximum number of unknown entries to report
    #[arg(long, default_value = "50")]
    limit: usize,

    #[arg(long)]
    split_commas: bool,
}

/// Closest reference artist by normalized Levenshtein similarity over keys
fn closest_artist<'a>(entry: &str, index: &'a ArtistIndex) -> Option<(&'a str, f64)> {
    let key = normalize_key(&strip_set_meta(entry));
    if key.is_empty() {
        return None;
    }
    index
        .iter()
        .map(|(artist_key, artist)| (artist.name.as_str(), strsim::normalized_levenshtein(&key, artist_key)))
        .filter(|(_, sim)| *sim >= MIN_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let index = ArtistIndex::build(&load_seed(args.artists.as_deref())?);
    let text = read_lineup(args.input.as_deref())?;
    let report = run(
        &text,
        &index,
        &ParseOptions {
            split_commas: args.split_commas,
        },
    );

    println!("{}", report.summary.status_line());
    println!("{:-<60}", "");

    let mut with_hint = 0;
    let unknowns: Vec<_> = report.records.iter().filter(|r| r.is_unknown()).collect();
    for record in unknowns.iter().take(args.limit) {
        match closest_artist(&record.lineup_entry, &index) {
            Some((name, sim)) => {
                with_hint += 1;
                println!("{:<40} → {} ({:.0}%)", record.lineup_entry, name, sim * 100.0);
            }
            None => println!("{:<40} → (no close reference name)", record.lineup_entry),
        }
    }

    if unknowns.len() > args.limit {
        println!("... {} more", unknowns.len() - args.limit);
    }
    println!("{:-<60}", "");
    println!(
        "{} unknown entries, {} with a close reference name",
        unknowns.len(),
        with_hint
    );
    Ok(())
}
