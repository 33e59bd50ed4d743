//! Core data models for lineup genre sorting.
//!
//! This module contains the struct definitions, type aliases, and enums
//! shared across the parse → match → group pipeline.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Sentinel genre for lineup entries with no reference match.
pub const UNKNOWN_GENRE: &str = "Unknown";

// ============================================================================
// Type Aliases
// ============================================================================

/// Genre name → records in that genre, each bucket sorted by lineup entry.
pub type GroupedResult = FxHashMap<String, Vec<GenreRecord>>;

// ============================================================================
// Reference Models
// ============================================================================

/// Known artist from the reference table. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReferenceArtist {
    pub name: String,
    pub primary_genre: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub secondary_genre: Option<String>,
}

impl ReferenceArtist {
    pub fn new(name: &str, primary_genre: &str, secondary_genre: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            primary_genre: primary_genre.to_string(),
            secondary_genre: secondary_genre.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Placeholder used when nothing in the index matches.
    pub fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            primary_genre: UNKNOWN_GENRE.to_string(),
            secondary_genre: None,
        }
    }
}

/// Seed files use both `null` and `""` for "no secondary genre".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

// ============================================================================
// Match Models
// ============================================================================

/// Which lookup step resolved a lineup entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Normalized name found as-is
    Direct,
    /// Found after dropping a leading "The"
    ThePrefix,
    /// One act of a collaboration ("A b2b B") matched
    Collab,
    /// No match anywhere, fell back to Unknown
    Unknown,
}

/// One lineup entry enriched with its matched artist and genres.
/// Derived once per unique entry per parse; never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenreRecord {
    pub lineup_entry: String,   // Entry as typed (display text)
    pub matched_artist: String, // Reference name, or the cleaned entry when unmatched
    pub primary_genre: String,
    pub secondary_genre: Option<String>,
}

impl GenreRecord {
    pub fn is_unknown(&self) -> bool {
        self.primary_genre == UNKNOWN_GENRE
    }
}

// ============================================================================
// Statistics (Instrumentation)
// ============================================================================

/// Per-strategy matching statistics for one parse.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingStats {
    pub direct_matches: usize,
    pub the_prefix_matches: usize,
    pub collab_matches: usize,
    pub unknown: usize,

    // Final totals
    pub total_entries: usize,
    pub total_matches: usize,
}

impl MatchingStats {
    pub fn record(&mut self, strategy: MatchStrategy) {
        self.total_entries += 1;
        match strategy {
            MatchStrategy::Direct => self.direct_matches += 1,
            MatchStrategy::ThePrefix => self.the_prefix_matches += 1,
            MatchStrategy::Collab => self.collab_matches += 1,
            MatchStrategy::Unknown => self.unknown += 1,
        }
        if strategy != MatchStrategy::Unknown {
            self.total_matches += 1;
        }
    }

    /// Match rate as a whole percentage, rounded down
    pub fn match_rate(&self) -> usize {
        if self.total_entries == 0 {
            0
        } else {
            100 * self.total_matches / self.total_entries
        }
    }

    /// Log stats to stderr in JSON format
    pub fn log_phase(&self, phase: &str) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            eprintln!("[STATS:{}]\n{}", phase, json);
        }
    }

    /// Write stats to a JSON file
    pub fn write_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Numbers behind the one-line status message.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub unknown: usize,
    pub matched: usize,
    pub match_rate: usize,
}

impl Summary {
    pub fn from_records(records: &[GenreRecord]) -> Self {
        let total = records.len();
        let unknown = records.iter().filter(|r| r.is_unknown()).count();
        let matched = total - unknown;
        let match_rate = if total == 0 { 0 } else { 100 * matched / total };
        Self {
            total,
            unknown,
            matched,
            match_rate,
        }
    }

    pub fn status_line(&self) -> String {
        format!(
            "{} unique lineup entries parsed. {} unmatched (Unknown).",
            self.total, self.unknown
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entry: &str, genre: &str) -> GenreRecord {
        GenreRecord {
            lineup_entry: entry.to_string(),
            matched_artist: entry.to_string(),
            primary_genre: genre.to_string(),
            secondary_genre: None,
        }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![
            record("Fisher", "Tech House"),
            record("Nobody", UNKNOWN_GENRE),
            record("Excision", "Dubstep"),
            record("Also Nobody", UNKNOWN_GENRE),
        ];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.unknown, 2);
        assert_eq!(summary.matched, 2);
        assert_eq!(summary.match_rate, 50);
        assert_eq!(
            summary.status_line(),
            "4 unique lineup entries parsed. 2 unmatched (Unknown)."
        );
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_match_rate_rounds_down() {
        let mut stats = MatchingStats::default();
        stats.record(MatchStrategy::Direct);
        stats.record(MatchStrategy::Collab);
        stats.record(MatchStrategy::Unknown);
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.total_matches, 2);
        assert_eq!(stats.match_rate(), 66);
    }

    #[test]
    fn test_secondary_genre_empty_is_none() {
        let artists: Vec<ReferenceArtist> = serde_json::from_str(
            r#"[
                {"name": "A", "primary_genre": "Techno", "secondary_genre": ""},
                {"name": "B", "primary_genre": "Techno", "secondary_genre": null},
                {"name": "C", "primary_genre": "Techno"},
                {"name": "D", "primary_genre": "Techno", "secondary_genre": "Trance"}
            ]"#,
        )
        .unwrap();
        assert_eq!(artists[0].secondary_genre, None);
        assert_eq!(artists[1].secondary_genre, None);
        assert_eq!(artists[2].secondary_genre, None);
        assert_eq!(artists[3].secondary_genre.as_deref(), Some("Trance"));
    }
}
