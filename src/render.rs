//! Output rendering for the CLI: plain text, JSON, CSV.
//!
//! Presentation only. Everything rendered here comes from a `LineupReport`.

use anyhow::Result;
use serde::Serialize;

use crate::genre::{ordered_buckets, top_genres, LocaleOrder};
use crate::models::{GenreRecord, Summary};
use crate::pipeline::LineupReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Render options shared by every format
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub genres: Vec<String>, // Empty = every genre
    pub top: usize,
}

pub fn render(report: &LineupReport, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, options)),
        OutputFormat::Json => render_json(report, options),
        OutputFormat::Csv => Ok(render_csv(&report.records)),
    }
}

// ============================================================================
// Text
// ============================================================================

pub fn render_text(report: &LineupReport, options: &RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&report.summary.status_line());
    out.push('\n');

    if report.records.is_empty() {
        out.push_str("No artists found.\n");
        return out;
    }

    out.push_str(&format!(
        "Matched: {} ({}%)\n",
        report.summary.matched, report.summary.match_rate
    ));

    let locale = LocaleOrder::new();
    let top = top_genres(&report.grouped, options.top, &locale);
    if !top.is_empty() {
        let chips: Vec<String> = top.iter().map(|(g, n)| format!("{} ({})", g, n)).collect();
        out.push_str(&format!("Top genres: {}\n", chips.join(", ")));
    }

    for (genre, records) in ordered_buckets(&report.grouped, &options.genres, &locale) {
        out.push_str(&format!("\n{} ({})\n", genre, records.len()));
        for record in records {
            out.push_str(&format!("- {}\n", record.lineup_entry));
        }
    }

    out
}

// ============================================================================
// JSON
// ============================================================================

#[derive(Serialize)]
struct JsonBucket<'a> {
    genre: &'a str,
    records: &'a [GenreRecord],
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a Summary,
    genres: Vec<JsonBucket<'a>>,
}

pub fn render_json(report: &LineupReport, options: &RenderOptions) -> Result<String> {
    let genres = ordered_buckets(&report.grouped, &options.genres, &LocaleOrder::new())
        .into_iter()
        .map(|(genre, records)| JsonBucket { genre, records })
        .collect();
    let json = serde_json::to_string_pretty(&JsonReport {
        summary: &report.summary,
        genres,
    })?;
    Ok(json + "\n")
}

// ============================================================================
// CSV
// ============================================================================

pub const CSV_HEADER: &str = "lineup_entry,matched_artist,primary_genre,secondary_genre";

/// Quote a CSV field when it holds a comma, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// One row per record, in the order given (parse order for a report).
pub fn render_csv(records: &[GenreRecord]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for r in records {
        let row = [
            csv_field(&r.lineup_entry),
            csv_field(&r.matched_artist),
            csv_field(&r.primary_genre),
            csv_field(r.secondary_genre.as_deref().unwrap_or("")),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}
