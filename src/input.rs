//! Input loading: lineup text and reference artist data.
//!
//! The reference table is a JSON array of
//! `{ "name", "primary_genre", "secondary_genre"? }` objects, read once at startup.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::models::ReferenceArtist;

/// Seed table compiled into the binaries
pub const DEFAULT_SEED_JSON: &str = include_str!("../data/seed_artists.json");

/// Parse a reference table from JSON text.
pub fn parse_seed(json: &str) -> Result<Vec<ReferenceArtist>> {
    serde_json::from_str(json).context("Failed to parse reference artist JSON")
}

/// Reference table compiled into the binary.
pub fn default_seed() -> Result<Vec<ReferenceArtist>> {
    parse_seed(DEFAULT_SEED_JSON).context("Embedded seed_artists.json is invalid")
}

/// Load a reference table from a JSON file.
pub fn load_seed_file(path: &Path) -> Result<Vec<ReferenceArtist>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read reference artists from {:?}", path))?;
    parse_seed(strip_bom(&json)).with_context(|| format!("Invalid reference artist file {:?}", path))
}

/// Load from `path` when given, otherwise use the embedded seed.
pub fn load_seed(path: Option<&Path>) -> Result<Vec<ReferenceArtist>> {
    match path {
        Some(p) => load_seed_file(p),
        None => default_seed(),
    }
}

/// Drop a leading UTF-8 byte-order mark (editors on Windows add one)
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{FEFF}').unwrap_or(text)
}

/// Read lineup text from a file, or stdin for `None` / "-". A leading BOM is dropped.
pub fn read_lineup(input: Option<&Path>) -> Result<String> {
    let text = match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lineup from {:?}", path))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read lineup from stdin")?;
            text
        }
    };
    Ok(strip_bom(&text).to_string())
}
