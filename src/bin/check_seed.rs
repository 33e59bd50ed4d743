//! Report reference-table entries that the index drops or overwrites.
//!
//! The index keeps the last artist for a colliding key. This tool shows which
//! names were lost so seed data can be fixed by hand.
//!
//! Usage: check-seed [--artists seed.json] [--strict]

use anyhow::{bail, Result};
use clap::Parser;
use rustc_hash::FxHashMap;
use std::path::PathBuf;

use lineup_genre::genre::priority_index;
use lineup_genre::index::{ArtistIndex, IndexReport};
use lineup_genre::input::load_seed;

#[derive(Parser)]
#[command(name = "check-seed")]
#[command(about = "Check reference artist data for key collisions")]
struct Args {
    #[arg(long)]
    artists: Option<PathBuf>,

    /// Exit with an error when any key collides
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let seed = load_seed(args.artists.as_deref())?;
    let (index, report) = ArtistIndex::build_with_report(&seed);
    report.log();

    for name in &report.skipped_empty {
        println!("SKIPPED  {:?} (no usable name)", name);
    }
    for o in &report.overwritten {
        println!("OVERWRITE {}: {:?} replaced by {:?}", o.key, o.replaced, o.kept);
    }

    for (genre, count) in unlisted_genres(&index) {
        println!("UNLISTED GENRE {} ({} artists)", genre, count);
    }

    println!(
        "{} records, {} indexed, {} skipped, {} overwritten",
        seed.len(),
        index.len(),
        report.skipped_empty.len(),
        report.overwritten.len()
    );

    check_strict(&report, args.strict)
}

/// Primary genres outside the priority list with their artist counts, by name.
/// These buckets sort last in every report.
fn unlisted_genres(index: &ArtistIndex) -> Vec<(&str, usize)> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for (_, artist) in index.iter() {
        if priority_index(&artist.primary_genre).is_none() {
            *counts.entry(artist.primary_genre.as_str()).or_default() += 1;
        }
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort();
    counts
}

/// Fail in strict mode when any key collided.
fn check_strict(report: &IndexReport, strict: bool) -> Result<()> {
    if strict && !report.overwritten.is_empty() {
        bail!("{} key collisions in reference data", report.overwritten.len());
    }
    Ok(())
}
