//! Reference artist index, keyed by normalization key.
//!
//! Built once from the reference table and read-only afterwards. Pass it
//! explicitly into the matcher; there is no process-wide instance.

use rustc_hash::FxHashMap;

use crate::models::ReferenceArtist;
use crate::normalize::normalize_key;

/// A key collision seen while building the index. The later artist wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overwrite {
    pub key: String,
    pub replaced: String, // Name that was dropped
    pub kept: String,     // Name now stored under `key`
}

/// What `build_with_report` skipped or overwrote.
#[derive(Default, Clone, Debug)]
pub struct IndexReport {
    pub indexed: usize,
    pub skipped_empty: Vec<String>,
    pub overwritten: Vec<Overwrite>,
}

impl IndexReport {
    /// One-line summary for stderr
    pub fn log(&self) {
        eprintln!(
            "[INDEX] {} artists indexed, {} skipped (no usable name), {} overwritten",
            self.indexed,
            self.skipped_empty.len(),
            self.overwritten.len()
        );
    }
}

/// Lookup table from `normalize_key(name)` to reference artist.
#[derive(Default, Clone, Debug)]
pub struct ArtistIndex {
    artists: FxHashMap<String, ReferenceArtist>,
}

impl ArtistIndex {
    /// Build the index. Colliding keys are last-write-wins; empty keys are skipped.
    pub fn build(records: &[ReferenceArtist]) -> Self {
        Self::build_with_report(records).0
    }

    /// Build the index and report skipped names and key collisions.
    pub fn build_with_report(records: &[ReferenceArtist]) -> (Self, IndexReport) {
        let mut artists: FxHashMap<String, ReferenceArtist> = FxHashMap::default();
        let mut report = IndexReport::default();

        for artist in records {
            let key = normalize_key(&artist.name);
            if key.is_empty() {
                report.skipped_empty.push(artist.name.clone());
                continue;
            }
            let entry = ReferenceArtist::new(
                &artist.name,
                &artist.primary_genre,
                artist.secondary_genre.as_deref(),
            );
            if let Some(previous) = artists.insert(key.clone(), entry) {
                report.overwritten.push(Overwrite {
                    key,
                    replaced: previous.name,
                    kept: artist.name.clone(),
                });
            }
        }

        report.indexed = artists.len();
        (Self { artists }, report)
    }

    /// Look up an already-normalized key
    pub fn get(&self, key: &str) -> Option<&ReferenceArtist> {
        self.artists.get(key)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Iterate (key, artist) pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceArtist)> {
        self.artists.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keys_by_normalized_name() {
        let index = ArtistIndex::build(&[
            ReferenceArtist::new("Déadmau5", "Melodic/Progressive House", None),
            ReferenceArtist::new("Subtronics", "Riddim", Some("Dubstep")),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("DEADMAU5").map(|a| a.name.as_str()), Some("Déadmau5"));
        let sub = index.get("SUBTRONICS").unwrap();
        assert_eq!(sub.primary_genre, "Riddim");
        assert_eq!(sub.secondary_genre.as_deref(), Some("Dubstep"));
    }

    #[test]
    fn test_last_write_wins() {
        let (index, report) = ArtistIndex::build_with_report(&[
            ReferenceArtist::new("Fisher", "Tech House", None),
            ReferenceArtist::new("FISHER", "House", None),
        ]);
        assert_eq!(index.len(), 1);
        let fisher = index.get("FISHER").unwrap();
        assert_eq!(fisher.name, "FISHER");
        assert_eq!(fisher.primary_genre, "House");
        assert_eq!(
            report.overwritten,
            vec![Overwrite {
                key: "FISHER".to_string(),
                replaced: "Fisher".to_string(),
                kept: "FISHER".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_keys_skipped() {
        let (index, report) = ArtistIndex::build_with_report(&[
            ReferenceArtist::new("", "Techno", None),
            ReferenceArtist::new("???", "Techno", None),
            ReferenceArtist::new("Amelie Lens", "Techno", None),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(report.indexed, 1);
        assert_eq!(report.skipped_empty, vec!["", "???"]);
        assert!(index.get("").is_none());
    }

    #[test]
    fn test_empty_secondary_genre_stored_as_none() {
        let raw = ReferenceArtist {
            name: "Wooli".to_string(),
            primary_genre: "Dubstep".to_string(),
            secondary_genre: Some(String::new()),
        };
        let index = ArtistIndex::build(&[raw]);
        assert_eq!(index.get("WOOLI").unwrap().secondary_genre, None);
    }
}
