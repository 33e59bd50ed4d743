//! Resolve lineup entries to reference artists.
//!
//! Lookup order for one entry:
//! 1. Strip set annotations ("(Live Set)", "with MC ...")
//! 2. Direct lookup, then retry without a leading "The"
//! 3. Collaboration fallback: split on b2b / x / , / / / vs / and, first act to match wins
//! 4. Otherwise Unknown
//!
//! Every step is exact matching on normalization keys. Nothing here is fuzzy.

use crate::index::ArtistIndex;
use crate::models::{GenreRecord, MatchStrategy, ReferenceArtist};
use crate::normalize::{normalize_key, split_collab, strip_set_meta, strip_the_prefix};

/// Look up a name directly, then without a leading "The".
/// Returns the artist and the strategy that found it.
fn lookup_artist_with_strategy<'a>(
    name: &str,
    index: &'a ArtistIndex,
) -> Option<(&'a ReferenceArtist, MatchStrategy)> {
    if let Some(direct) = index.get(&normalize_key(name)) {
        return Some((direct, MatchStrategy::Direct));
    }

    strip_the_prefix(name)
        .and_then(|rest| index.get(&normalize_key(rest)))
        .map(|artist| (artist, MatchStrategy::ThePrefix))
}

/// Look up a name directly, then without a leading "The".
pub fn lookup_artist<'a>(name: &str, index: &'a ArtistIndex) -> Option<&'a ReferenceArtist> {
    lookup_artist_with_strategy(name, index).map(|(artist, _)| artist)
}

/// Split a collaboration into acts and return the first act found in the index.
/// Each act goes through `lookup_artist`, so "The" stripping applies per act.
pub fn lookup_from_collab<'a>(value: &str, index: &'a ArtistIndex) -> Option<&'a ReferenceArtist> {
    split_collab(value)
        .into_iter()
        .find_map(|piece| lookup_artist(piece, index))
}

/// Match one lineup entry and report which step resolved it.
pub fn match_entry(entry: &str, index: &ArtistIndex) -> (GenreRecord, MatchStrategy) {
    let base_name = strip_set_meta(entry);

    let (artist, strategy) = match lookup_artist_with_strategy(&base_name, index) {
        Some((artist, strategy)) => (artist.clone(), strategy),
        None => match lookup_from_collab(&base_name, index) {
            Some(artist) => (artist.clone(), MatchStrategy::Collab),
            None => (ReferenceArtist::unknown(&base_name), MatchStrategy::Unknown),
        },
    };

    let record = GenreRecord {
        lineup_entry: entry.to_string(),
        matched_artist: artist.name,
        primary_genre: artist.primary_genre,
        secondary_genre: artist.secondary_genre,
    };
    (record, strategy)
}

/// Match one lineup entry. Always produces a record; unmatched entries are Unknown.
pub fn to_genre_record(entry: &str, index: &ArtistIndex) -> GenreRecord {
    match_entry(entry, index).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UNKNOWN_GENRE;

    fn test_index() -> ArtistIndex {
        ArtistIndex::build(&[
            ReferenceArtist::new("Subtronics", "Riddim", None),
            ReferenceArtist::new("Chainsmokers", "Pop EDM", None),
            ReferenceArtist::new("Excision", "Bass Music", Some("Dubstep")),
            ReferenceArtist::new("DJ Name", "Tech House", None),
            ReferenceArtist::new("Prodigy", "Bass Music", None),
            ReferenceArtist::new("Chase & Status", "DnB", None),
            ReferenceArtist::new("Sub Focus", "DnB", None),
            ReferenceArtist::new("Fisher", "Tech House", None),
            ReferenceArtist::new("Chris Lake", "Tech House", None),
        ])
    }

    #[test]
    fn test_direct_match() {
        let index = test_index();
        let (record, strategy) = match_entry("Subtronics", &index);
        assert_eq!(record.lineup_entry, "Subtronics");
        assert_eq!(record.matched_artist, "Subtronics");
        assert_eq!(record.primary_genre, "Riddim");
        assert_eq!(record.secondary_genre, None);
        assert_eq!(strategy, MatchStrategy::Direct);
    }

    #[test]
    fn test_direct_match_keeps_entry_spelling() {
        let index = test_index();
        let record = to_genre_record("SUBTRÔNICS", &index);
        assert_eq!(record.lineup_entry, "SUBTRÔNICS");
        assert_eq!(record.matched_artist, "Subtronics");
    }

    #[test]
    fn test_the_prefix_fallback() {
        let index = test_index();
        let (record, strategy) = match_entry("The Chainsmokers", &index);
        assert_eq!(record.matched_artist, "Chainsmokers");
        assert_eq!(record.primary_genre, "Pop EDM");
        assert_eq!(strategy, MatchStrategy::ThePrefix);
    }

    #[test]
    fn test_collab_fallback() {
        let index = test_index();
        let (record, strategy) = match_entry("SomeUnknownAct B2B Excision", &index);
        assert_eq!(record.lineup_entry, "SomeUnknownAct B2B Excision");
        assert_eq!(record.matched_artist, "Excision");
        assert_eq!(record.primary_genre, "Bass Music");
        assert_eq!(record.secondary_genre.as_deref(), Some("Dubstep"));
        assert_eq!(strategy, MatchStrategy::Collab);
    }

    #[test]
    fn test_collab_first_piece_wins() {
        let index = test_index();
        assert_eq!(to_genre_record("Fisher x Chris Lake", &index).matched_artist, "Fisher");
        assert_eq!(to_genre_record("Chris Lake x Fisher", &index).matched_artist, "Chris Lake");
    }

    #[test]
    fn test_collab_pieces_strip_the() {
        let index = test_index();
        let record = to_genre_record("Nobody vs. The Prodigy", &index);
        assert_eq!(record.matched_artist, "Prodigy");
    }

    #[test]
    fn test_direct_beats_collab() {
        // "Chase & Status, Sub Focus" would split on the comma, but "&" is not a separator
        let index = test_index();
        assert_eq!(to_genre_record("Chase & Status", &index).matched_artist, "Chase & Status");
        assert_eq!(to_genre_record("Sub Focus, Chase & Status", &index).matched_artist, "Sub Focus");
    }

    #[test]
    fn test_set_meta_stripped_before_lookup() {
        let index = test_index();
        let (record, strategy) = match_entry("DJ Name (Live Set) with MC Someone", &index);
        assert_eq!(record.lineup_entry, "DJ Name (Live Set) with MC Someone");
        assert_eq!(record.matched_artist, "DJ Name");
        assert_eq!(record.primary_genre, "Tech House");
        assert_eq!(strategy, MatchStrategy::Direct);
    }

    #[test]
    fn test_no_match_is_unknown() {
        let index = test_index();
        let (record, strategy) = match_entry("Totally Unknown Artist XYZ", &index);
        assert_eq!(record.primary_genre, UNKNOWN_GENRE);
        assert_eq!(record.matched_artist, "Totally Unknown Artist XYZ");
        assert_eq!(record.secondary_genre, None);
        assert_eq!(strategy, MatchStrategy::Unknown);
    }

    #[test]
    fn test_unknown_uses_cleaned_name() {
        let index = test_index();
        let record = to_genre_record("Mystery Act (Sunrise Set)", &index);
        assert_eq!(record.matched_artist, "Mystery Act");
        assert!(record.is_unknown());
    }

    #[test]
    fn test_empty_index_is_unknown() {
        let index = ArtistIndex::default();
        assert!(to_genre_record("Fisher", &index).is_unknown());
    }
}
