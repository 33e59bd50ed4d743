//! Shared normalization functions for lineup parsing and artist matching.
//! Used by the parser, the artist index and the matcher.
//!
//! CRITICAL: `normalize_key` defines index keys. Any change here changes which
//! lineup entries match which reference artists. Run tests after changes.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// Everything a normalization key may NOT contain (applied after uppercasing).
/// U+FEFF counts as whitespace so a stray byte-order mark separates words.
pub static KEY_DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Z0-9&+/\-'.:\s\x{FEFF}]").unwrap());

/// Regex to collapse any whitespace run (byte-order marks included) into a single space
pub static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").unwrap());

/// Parenthesized stage notes: "(Live Set)", "(Sunrise Set)", "(DJ Set)"
pub static PAREN_NOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());

/// MC shoutouts at the end of an entry: "Artist with MC Someone"
pub static WITH_MC_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s+WITH\s+MC\s+.+$").unwrap());

/// One leading bullet marker: "• Artist", "- Artist", "* Artist"
pub static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\u{2022}\-*][\s\x{FEFF}]*").unwrap());

/// One leading numbered-list marker: "1. Artist", "12.Artist"
pub static LIST_NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[\s\x{FEFF}]*").unwrap());

/// Leading article: "The Chainsmokers" → "Chainsmokers"
pub static THE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^THE\s+").unwrap());

/// Collaboration separators for splitting multi-artist entries.
/// Matches: b2b, x, comma, slash, vs / vs., and
pub static COLLAB_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+B2B\s+|\s+X\s+|,\s*|/|\s+VS\.?\s+|\s+AND\s+").unwrap()
});

/// Letters that canonical decomposition leaves alone, mapped to their usual spelling.
const LETTER_SUBSTITUTIONS: &[(char, &str)] = &[
    ('\u{00D8}', "O"),  // Ø
    ('\u{00F8}', "o"),  // ø
    ('\u{00C6}', "AE"), // Æ
    ('\u{00E6}', "ae"), // æ
    ('\u{0152}', "OE"), // Œ
    ('\u{0153}', "oe"), // œ
];

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Check if a character is a Unicode combining mark (diacritical mark).
/// Used to filter out accents during normalization.
pub fn is_combining_mark(c: char) -> bool {
    matches!(c as u32, 0x0300..=0x036F | 0x1AB0..=0x1AFF | 0x1DC0..=0x1DFF | 0x20D0..=0x20FF | 0xFE20..=0xFE2F)
}

/// Strip diacritics via canonical (NFD) decomposition, keeping case.
/// e.g., "Déadmau5" → "Deadmau5", "Tiësto" → "Tiesto"
pub fn strip_diacritics(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Replace the letters listed in `LETTER_SUBSTITUTIONS`.
/// e.g., "Røyksopp" → "Royksopp", "Æon" → "AEon"
pub fn substitute_letters(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match LETTER_SUBSTITUTIONS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

/// Whitespace for trimming purposes: Unicode White_Space plus U+FEFF,
/// which pasted text and BOM-prefixed files carry at line starts.
pub fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trim `is_blank` characters from both ends.
pub fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank)
}

/// Collapse whitespace runs into single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    MULTI_SPACE.replace_all(s, " ").trim().to_string()
}

// ============================================================================
// NORMALIZATION FUNCTIONS
// ============================================================================

/// Canonical comparison key for an artist or lineup entry.
///
/// Steps, in order: drop diacritics, substitute undecomposable letters,
/// uppercase, drop everything outside `A-Z 0-9 & + / - ' . :` and whitespace,
/// collapse whitespace. An empty result means "no usable key".
///
/// The key is only ever compared, never displayed.
pub fn normalize_key(value: &str) -> String {
    let folded = substitute_letters(&strip_diacritics(value)).to_uppercase();
    let kept = KEY_DISALLOWED.replace_all(&folded, "");
    collapse_whitespace(&kept)
}

/// Remove set annotations that are not part of the artist's name:
/// parenthesized notes and a trailing "with MC ..." shoutout.
/// e.g., "DJ Name (Live Set) with MC Someone" → "DJ Name"
pub fn strip_set_meta(value: &str) -> String {
    let without_notes = PAREN_NOTE.replace_all(value, "");
    let without_mc = WITH_MC_SUFFIX.replace(&without_notes, "");
    collapse_whitespace(&without_mc)
}

/// Strip a leading "The " (case-insensitive). Returns None when there is none.
/// e.g., "The Chainsmokers" → Some("Chainsmokers"), "Theo" → None
pub fn strip_the_prefix(name: &str) -> Option<&str> {
    THE_PREFIX.find(name).map(|m| &name[m.end()..])
}

/// Split a collaboration entry into its constituent acts, trimmed, empties dropped.
/// e.g., "Knock2 b2b Dillon Francis" → ["Knock2", "Dillon Francis"]
pub fn split_collab(value: &str) -> Vec<&str> {
    COLLAB_SEPARATOR
        .split(value)
        .map(trim_blank)
        .filter(|part| !part.is_empty())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
