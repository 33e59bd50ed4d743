//! Genre grouping and display ordering.
//!
//! Buckets are keyed by primary genre. Bucket contents sort by lineup entry,
//! buckets themselves sort by `REQUIRED_GENRES` then `SECONDARY_GENRES`, with
//! Unknown after those and unlisted genres last.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::models::{GenreRecord, GroupedResult, UNKNOWN_GENRE};

// ============================================================================
// Genre Priority
// ============================================================================

/// Genres every lineup is expected to cover, in display order.
pub const REQUIRED_GENRES: &[&str] = &[
    "Dubstep",
    "Tech House",
    "Techno",
    "Bass House",
    "Melodic/Progressive House",
    "Hardstyle",
    "DnB",
    "Riddim",
];

/// Secondary genres shown after the required ones. Unknown always last.
pub const SECONDARY_GENRES: &[&str] = &[
    "Trance",
    "Psytrance",
    "Melodic Bass",
    "Bass Music",
    "UK Garage/Bassline",
    "House",
    "Afro House",
    "Pop EDM",
];

/// Position of a genre in the display priority, or None when unlisted.
pub fn priority_index(genre: &str) -> Option<usize> {
    if let Some(i) = REQUIRED_GENRES.iter().position(|g| *g == genre) {
        return Some(i);
    }
    if let Some(i) = SECONDARY_GENRES.iter().position(|g| *g == genre) {
        return Some(REQUIRED_GENRES.len() + i);
    }
    (genre == UNKNOWN_GENRE).then_some(REQUIRED_GENRES.len() + SECONDARY_GENRES.len())
}

// ============================================================================
// Locale-aware Ordering
// ============================================================================

/// Locale-aware string ordering using the root collation.
/// Falls back to code point order if collation data cannot be loaded.
/// Loading the collator is not free: build one per report and pass it down.
pub struct LocaleOrder {
    collator: Option<Collator>,
}

impl LocaleOrder {
    pub fn new() -> Self {
        Self {
            collator: Collator::try_new(&Default::default(), CollatorOptions::new()).ok(),
        }
    }

    /// Collation order, ties broken by code point so distinct strings never compare equal
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => Ordering::Equal,
        };
        primary.then_with(|| a.cmp(b))
    }
}

impl Default for LocaleOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Display order of two genre buckets.
///
/// Listed genres come before unlisted ones and sort by list position;
/// two unlisted genres sort by locale-aware comparison.
pub fn genre_order(a: &str, b: &str, locale: &LocaleOrder) -> Ordering {
    match (priority_index(a), priority_index(b)) {
        (Some(ai), Some(bi)) => ai.cmp(&bi),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => locale.compare(a, b),
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Bucket records by primary genre (empty genre counts as Unknown), each bucket
/// sorted by lineup entry.
pub fn group_by_primary_genre(records: &[GenreRecord], locale: &LocaleOrder) -> GroupedResult {
    let mut grouped = GroupedResult::default();
    for record in records {
        let key = if record.primary_genre.is_empty() {
            UNKNOWN_GENRE
        } else {
            record.primary_genre.as_str()
        };
        grouped.entry(key.to_string()).or_default().push(record.clone());
    }

    for bucket in grouped.values_mut() {
        bucket.sort_by(|a, b| locale.compare(&a.lineup_entry, &b.lineup_entry));
    }

    grouped
}

/// Genre names in display order.
pub fn sorted_genres<'a>(grouped: &'a GroupedResult, locale: &LocaleOrder) -> Vec<&'a str> {
    let mut genres: Vec<&str> = grouped.keys().map(String::as_str).collect();
    genres.sort_by(|a, b| genre_order(a, b, locale));
    genres
}

/// Buckets in display order, optionally restricted to `only` (case-insensitive).
/// An empty `only` keeps every bucket.
pub fn ordered_buckets<'a>(
    grouped: &'a GroupedResult,
    only: &[String],
    locale: &LocaleOrder,
) -> Vec<(&'a str, &'a [GenreRecord])> {
    sorted_genres(grouped, locale)
        .into_iter()
        .filter(|genre| only.is_empty() || only.iter().any(|o| o.eq_ignore_ascii_case(genre)))
        .filter_map(|genre| grouped.get(genre).map(|records| (genre, records.as_slice())))
        .collect()
}

/// The `n` largest buckets as (genre, count), ties in display order.
pub fn top_genres<'a>(grouped: &'a GroupedResult, n: usize, locale: &LocaleOrder) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = grouped
        .iter()
        .map(|(genre, records)| (genre.as_str(), records.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| genre_order(a.0, b.0, locale)));
    counts.truncate(n);
    counts
}
