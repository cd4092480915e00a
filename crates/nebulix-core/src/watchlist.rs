//! Bookmarked movies, persisted as one unit.
//!
//! The collection is rewritten to its slot in full after every mutation
//! (last writer wins). Views hold an injected [`WatchlistStore`] and call
//! [`WatchlistStore::reload`] when they become active; two stores over the
//! same slot only agree after a reload.

use nebulix_models::MovieRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::watchlist_slot::{StorageError, WatchlistSlot};

/// Set of movies keyed by id, kept in the order they were added
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatchlistCollection {
    movies: Vec<MovieRecord>,
}

impl WatchlistCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored records, keeping the first entry for any repeated id
    pub fn from_records(records: Vec<MovieRecord>) -> Self {
        let mut seen = HashSet::with_capacity(records.len());
        Self {
            movies: records.into_iter().filter(|m| seen.insert(m.id)).collect(),
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn get(&self, id: u64) -> Option<&MovieRecord> {
        self.movies.iter().find(|m| m.id == id)
    }

    /// Remove `record.id` if present, otherwise append `record`
    pub fn toggle(mut self, record: &MovieRecord) -> Self {
        if self.contains(record.id) {
            self.movies.retain(|m| m.id != record.id);
        } else {
            self.movies.push(record.clone());
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Read the slot. Missing or unreadable content is an empty watchlist.
pub fn load_collection<S: WatchlistSlot + ?Sized>(slot: &S) -> WatchlistCollection {
    let contents = match slot.read() {
        Ok(Some(contents)) => contents,
        Ok(None) => return WatchlistCollection::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read watchlist, starting empty");
            return WatchlistCollection::new();
        }
    };

    match serde_json::from_str::<Vec<MovieRecord>>(&contents) {
        Ok(records) => {
            let collection = WatchlistCollection::from_records(records);
            debug!(count = collection.len(), "Loaded watchlist");
            collection
        }
        Err(e) => {
            warn!(error = %e, "Stored watchlist is malformed, starting empty");
            WatchlistCollection::new()
        }
    }
}

/// Serialize the whole collection and overwrite the slot
pub fn persist_collection<S: WatchlistSlot + ?Sized>(
    slot: &S,
    collection: &WatchlistCollection,
) -> Result<(), StorageError> {
    let contents = serde_json::to_string(collection)?;
    slot.write(&contents)
}

pub struct WatchlistStore<S: WatchlistSlot> {
    slot: S,
    collection: WatchlistCollection,
}

impl<S: WatchlistSlot> WatchlistStore<S> {
    pub fn open(slot: S) -> Self {
        let collection = load_collection(&slot);
        Self { slot, collection }
    }

    /// Re-read the slot, dropping whatever this store had in memory
    pub fn reload(&mut self) {
        self.collection = load_collection(&self.slot);
    }

    pub fn collection(&self) -> &WatchlistCollection {
        &self.collection
    }

    pub fn contains(&self, id: u64) -> bool {
        self.collection.contains(id)
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Flip membership of `record` and persist. Returns the new membership.
    pub fn toggle(&mut self, record: &MovieRecord) -> bool {
        let collection = std::mem::take(&mut self.collection);
        self.collection = collection.toggle(record);
        let bookmarked = self.collection.contains(record.id);
        info!(id = record.id, bookmarked, "Toggled watchlist entry");
        self.persist();
        bookmarked
    }

    /// Remove `id` if it is bookmarked. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.collection.get(id).cloned() {
            Some(record) => !self.toggle(&record),
            None => false,
        }
    }

    /// Overwrite the slot with the in-memory collection.
    ///
    /// Failures are logged and otherwise ignored: this session keeps the
    /// change, the next load may not see it.
    pub fn persist(&self) {
        if let Err(e) = persist_collection(&self.slot, &self.collection) {
            warn!(error = %e, count = self.collection.len(), "Failed to persist watchlist");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ids, movie};
    use crate::watchlist_slot::{FileSlot, MemorySlot};

    struct BrokenSlot;

    impl WatchlistSlot for BrokenSlot {
        fn read(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disk gone".to_string()))
        }

        fn write(&self, _contents: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn collection_of(movie_ids: &[u64]) -> WatchlistCollection {
        WatchlistCollection::from_records(movie_ids.iter().copied().map(movie).collect())
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let empty = WatchlistCollection::new();
        let added = empty.clone().toggle(&movie(42));
        assert!(added.contains(42));

        let removed = added.toggle(&movie(42));
        assert_eq!(removed, empty);
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let start = collection_of(&[1, 2, 3]);
        let round_trip = start.clone().toggle(&movie(9)).toggle(&movie(9));
        assert_eq!(round_trip, start);
    }

    #[test]
    fn test_toggle_flips_membership() {
        let start = collection_of(&[1, 2, 3]);
        for id in [2, 7] {
            let before = start.contains(id);
            let after = start.clone().toggle(&movie(id)).contains(id);
            assert_eq!(after, !before);
        }
    }

    #[test]
    fn test_toggle_removes_by_id_not_by_value() {
        let start = collection_of(&[5]);
        let different_copy = movie(5).with_title("Renamed");
        assert!(start.toggle(&different_copy).is_empty());
    }

    #[test]
    fn test_from_records_collapses_duplicates() {
        let collection = WatchlistCollection::from_records(vec![
            movie(1).with_title("first"),
            movie(2),
            movie(1).with_title("second"),
        ]);
        assert_eq!(ids(collection.movies()), vec![1, 2]);
        assert_eq!(collection.get(1).unwrap().display_title(), "first");
    }

    #[test]
    fn test_load_absent_is_empty() {
        assert!(load_collection(&MemorySlot::new()).is_empty());
    }

    #[test]
    fn test_load_corrupted_is_empty() {
        for junk in ["not json", "{\"id\": 1}", "[{\"title\": \"no id\"}]", "null", ""] {
            assert!(load_collection(&MemorySlot::with_contents(junk)).is_empty(), "{}", junk);
        }
    }

    #[test]
    fn test_load_read_failure_is_empty() {
        assert!(load_collection(&BrokenSlot).is_empty());
    }

    #[test]
    fn test_load_accepts_minimal_records() {
        let slot = MemorySlot::with_contents(
            r#"[{"id":42,"title":"Dune","poster_path":"/d.jpg","vote_average":8.0,"overview":""}]"#,
        );
        let collection = load_collection(&slot);
        assert!(collection.contains(42));
    }

    #[test]
    fn test_bookmark_survives_reload() {
        let slot = MemorySlot::new();
        let mut store = WatchlistStore::open(slot.clone());
        assert!(store.toggle(&movie(42)));

        let reopened = WatchlistStore::open(slot);
        assert!(reopened.contains(42));
    }

    #[test]
    fn test_bookmark_survives_reload_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");

        let mut store = WatchlistStore::open(FileSlot::new(&path));
        store.toggle(&movie(42));
        store.toggle(&movie(7));
        store.toggle(&movie(42));

        let reopened = WatchlistStore::open(FileSlot::new(&path));
        assert!(!reopened.contains(42));
        assert!(reopened.contains(7));
        assert_eq!(reopened.len(), 1);
    }

    #[test]
    fn test_persist_writes_whole_collection() {
        let slot = MemorySlot::new();
        let mut store = WatchlistStore::open(slot.clone());
        store.toggle(&movie(1));
        store.toggle(&movie(2));

        let stored: Vec<MovieRecord> = serde_json::from_str(&slot.contents().unwrap()).unwrap();
        assert_eq!(ids(&stored), vec![1, 2]);
    }

    #[test]
    fn test_remove_only_when_present() {
        let mut store = WatchlistStore::open(MemorySlot::new());
        assert!(!store.remove(3));
        assert!(store.is_empty());

        store.toggle(&movie(3));
        assert!(store.remove(3));
        assert!(!store.contains(3));
    }

    #[test]
    fn test_views_disagree_until_reload() {
        let slot = MemorySlot::new();
        let mut listing_view = WatchlistStore::open(slot.clone());
        let mut watchlist_view = WatchlistStore::open(slot);

        listing_view.toggle(&movie(8));
        assert!(!watchlist_view.contains(8));

        watchlist_view.reload();
        assert!(watchlist_view.contains(8));
    }

    #[test]
    fn test_last_writer_wins_across_views() {
        let slot = MemorySlot::new();
        let mut a = WatchlistStore::open(slot.clone());
        let mut b = WatchlistStore::open(slot.clone());

        a.toggle(&movie(1));
        // b never reloaded, so its write drops movie 1
        b.toggle(&movie(2));

        let fresh = WatchlistStore::open(slot);
        assert!(!fresh.contains(1));
        assert!(fresh.contains(2));
    }

    #[test]
    fn test_persist_failure_keeps_memory_state() {
        let mut store = WatchlistStore::open(BrokenSlot);
        assert!(store.toggle(&movie(11)));
        assert!(store.contains(11));
    }
}
