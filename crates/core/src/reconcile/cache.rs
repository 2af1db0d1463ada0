use std::collections::HashMap;

use crate::catalog::ArtistRecord;

/// Library artists keyed by lower-cased name.
///
/// Valid for one run only. Refreshing replaces the whole snapshot.
#[derive(Debug, Default, Clone)]
pub struct ArtistCache {
    by_name: HashMap<String, ArtistRecord>,
}

impl ArtistCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ArtistRecord>) -> Self {
        let mut cache = Self::new();
        cache.replace(records);
        cache
    }

    /// Swap in a fresh snapshot. On duplicate names the later record wins.
    pub fn replace(&mut self, records: Vec<ArtistRecord>) {
        self.by_name = records
            .into_iter()
            .map(|r| (r.artist_name.to_lowercase(), r))
            .collect();
    }

    /// Case-insensitive exact name lookup.
    pub fn get(&self, name: &str) -> Option<&ArtistRecord> {
        self.by_name.get(&name.to_lowercase())
    }

    pub fn get_by_foreign_id(&self, foreign_artist_id: &str) -> Option<&ArtistRecord> {
        self.by_name
            .values()
            .find(|r| r.foreign_artist_id == foreign_artist_id)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
