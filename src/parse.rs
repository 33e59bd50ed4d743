//! Lineup text parsing.
//!
//! Turns a pasted lineup (one act per line, possibly bulleted or numbered)
//! into the ordered list of unique lineup entries for one parse.

use rustc_hash::FxHashSet;

use crate::normalize::{normalize_key, trim_blank, BULLET_PREFIX, LIST_NUMBER_PREFIX};

/// Parser switches. The default parses strictly one act per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Also split each line on commas ("A, B, C" → three entries)
    pub split_commas: bool,
}

/// Strip one bullet marker and then one list number from a trimmed line.
/// e.g., "• KAYZO" → "KAYZO", "1. Subtronics" → "Subtronics", "- 2. Fisher" → "Fisher"
///
/// A byte-order mark trims like whitespace, so a BOM-prefixed first line still
/// loses its marker.
pub fn clean_line(line: &str) -> String {
    let line = BULLET_PREFIX.replace(trim_blank(line), "");
    let line = LIST_NUMBER_PREFIX.replace(trim_blank(&line), "");
    trim_blank(&line).to_string()
}

/// Parse lineup text into unique entries, one act per line.
pub fn parse_lineup(text: &str) -> Vec<String> {
    parse_lineup_with(text, &ParseOptions::default())
}

/// Parse lineup text into unique display-ready entries.
///
/// Entries are deduplicated by normalization key; the first spelling wins and
/// output keeps first-occurrence order. Lines with no usable key are dropped.
pub fn parse_lineup_with(text: &str, options: &ParseOptions) -> Vec<String> {
    let pieces: Vec<&str> = if options.split_commas {
        text.split('\n').flat_map(|line| line.split(',')).collect()
    } else {
        text.split('\n').collect()
    };

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut entries = Vec::new();

    for piece in pieces {
        if trim_blank(piece).is_empty() {
            continue;
        }
        let entry = clean_line(piece);
        if entry.is_empty() {
            continue;
        }
        let key = normalize_key(&entry);
        if key.is_empty() || !seen.insert(key) {
            continue;
        }
        entries.push(entry);
    }

    entries
}
