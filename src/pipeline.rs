//! One-call lineup pipeline: parse → match → group.
//!
//! Synchronous and in-memory. The index is built by the caller once and
//! passed in for every run. Progress reporting is opt-in: `run` is silent,
//! `run_with_progress` drives a bar the caller owns.

use indicatif::ProgressBar;

use crate::genre::{group_by_primary_genre, LocaleOrder};
use crate::index::ArtistIndex;
use crate::matcher::match_entry;
use crate::models::{GenreRecord, GroupedResult, MatchingStats, Summary};
use crate::parse::{parse_lineup_with, ParseOptions};
use crate::progress::log_progress;

/// Everything a presenter needs from one parse.
#[derive(Debug, Clone)]
pub struct LineupReport {
    pub records: Vec<GenreRecord>, // Parse order
    pub grouped: GroupedResult,
    pub summary: Summary,
    pub stats: MatchingStats,
}

/// Match already-parsed entries, recording which strategy resolved each.
/// `pb` is advanced once per entry; pass `ProgressBar::hidden()` for no output.
pub fn match_entries(
    entries: &[String],
    index: &ArtistIndex,
    pb: &ProgressBar,
) -> (Vec<GenreRecord>, MatchingStats) {
    pb.set_length(entries.len() as u64);
    let mut stats = MatchingStats::default();
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let (record, strategy) = match_entry(entry, index);
        stats.record(strategy);
        records.push(record);
        pb.inc(1);
        log_progress("MATCH", i as u64 + 1, entries.len() as u64, 100);
    }

    pb.finish_with_message(format!(
        "Matched {}/{} entries",
        stats.total_matches, stats.total_entries
    ));
    (records, stats)
}

/// Run the whole pipeline over raw lineup text without progress output.
pub fn run(text: &str, index: &ArtistIndex, options: &ParseOptions) -> LineupReport {
    run_with_progress(text, index, options, &ProgressBar::hidden())
}

/// Run the whole pipeline, advancing `pb` while matching.
pub fn run_with_progress(
    text: &str,
    index: &ArtistIndex,
    options: &ParseOptions,
    pb: &ProgressBar,
) -> LineupReport {
    let entries = parse_lineup_with(text, options);
    let (records, stats) = match_entries(&entries, index, pb);
    let grouped = group_by_primary_genre(&records, &LocaleOrder::new());
    let summary = Summary::from_records(&records);

    LineupReport {
        records,
        grouped,
        summary,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::sorted_genres;
    use crate::models::{ReferenceArtist, UNKNOWN_GENRE};

    fn test_index() -> ArtistIndex {
        ArtistIndex::build(&[
            ReferenceArtist::new("Subtronics", "Riddim", Some("Dubstep")),
            ReferenceArtist::new("Kayzo", "Dubstep", None),
            ReferenceArtist::new("Fisher", "Tech House", None),
            ReferenceArtist::new("Excision", "Bass Music", Some("Dubstep")),
            ReferenceArtist::new("Chainsmokers", "Pop EDM", None),
        ])
    }

    #[test]
    fn test_run_end_to_end() {
        let text = "1. Subtronics\n• KAYZO\nFisher\nFISHER \n- fisher\nThe Chainsmokers\n\
                    SomeUnknownAct B2B Excision\nTotally Unknown Artist XYZ\n";
        let report = run(text, &test_index(), &ParseOptions::default());

        assert_eq!(report.summary.total, 6);
        assert_eq!(report.summary.unknown, 1);
        assert_eq!(report.summary.matched, 5);
        assert_eq!(
            report.summary.status_line(),
            "6 unique lineup entries parsed. 1 unmatched (Unknown)."
        );

        let order: Vec<&str> = report.records.iter().map(|r| r.lineup_entry.as_str()).collect();
        assert_eq!(
            order,
            vec![
                "Subtronics",
                "KAYZO",
                "Fisher",
                "The Chainsmokers",
                "SomeUnknownAct B2B Excision",
                "Totally Unknown Artist XYZ",
            ]
        );

        assert_eq!(
            sorted_genres(&report.grouped, &LocaleOrder::new()),
            vec!["Dubstep", "Tech House", "Riddim", "Bass Music", "Pop EDM", UNKNOWN_GENRE]
        );

        assert_eq!(report.stats.direct_matches, 3);
        assert_eq!(report.stats.the_prefix_matches, 1);
        assert_eq!(report.stats.collab_matches, 1);
        assert_eq!(report.stats.unknown, 1);
    }

    #[test]
    fn test_summary_matches_unknown_bucket() {
        let report = run("A\nB\nKayzo\nC", &test_index(), &ParseOptions::default());
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.unknown, 3);
        assert_eq!(report.grouped[UNKNOWN_GENRE].len(), 3);
    }

    #[test]
    fn test_progress_bar_advanced_per_entry() {
        let pb = ProgressBar::hidden();
        let report = run_with_progress("Kayzo\nFisher\nkayzo\nNobody", &test_index(), &ParseOptions::default(), &pb);
        assert_eq!(report.summary.total, 3);
        assert_eq!(pb.length(), Some(3));
        assert_eq!(pb.position(), 3);
        assert!(pb.is_finished());
    }

    #[test]
    fn test_run_empty_text() {
        let report = run("", &test_index(), &ParseOptions::default());
        assert!(report.records.is_empty());
        assert!(report.grouped.is_empty());
        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.match_rate, 0);
    }
}
