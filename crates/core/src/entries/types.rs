use std::collections::HashSet;

/// One (artist, album) pair read from the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    pub artist: String,
    pub album: String,
}

impl Entry {
    pub fn new(artist: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
        }
    }

    /// Case-insensitive identity used for run-level deduplication.
    pub fn dedup_key(&self) -> (String, String) {
        (self.artist.to_lowercase(), self.album.to_lowercase())
    }
}

/// Set of entries with exact-duplicate collapse.
///
/// Iteration follows first-seen order so runs are reproducible, but callers
/// must not rely on order for correctness.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: Vec<Entry>,
    seen: HashSet<Entry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Returns false if an identical entry was already present.
    pub fn insert(&mut self, entry: Entry) -> bool {
        if self.seen.contains(&entry) {
            return false;
        }
        self.seen.insert(entry.clone());
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Artist names, unique ignoring case, keeping the first spelling seen.
    pub fn unique_artists(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|e| seen.insert(e.artist.to_lowercase()))
            .map(|e| e.artist.as_str())
            .collect()
    }
}

impl FromIterator<Entry> for EntrySet {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut set = EntrySet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl<'a> IntoIterator for &'a EntrySet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
