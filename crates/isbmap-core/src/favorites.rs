// crates/isbmap-core/src/favorites.rs

//! Favorites and search-history persistence contract.
//!
//! Both lists are JSON documents under fixed keys in whatever key-value
//! store the shell provides (browser `localStorage` in production, an
//! in-memory map in tests). The core only depends on facility ids being
//! stable unique strings.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::model::{Category, Facility};
use crate::store::FacilityStore;

pub const FAVORITES_KEY: &str = "islamabad_smart_city_favorites";
pub const HISTORY_KEY: &str = "islamabad_smart_city_search_history";

/// Most-recent-first history entries kept per shell.
pub const HISTORY_LIMIT: usize = 10;

/// Minimal key-value storage seam the shell plugs `localStorage` into.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory [`KeyValueStore`], used by tests and native shells.
#[derive(Debug, Default)]
pub struct MemoryStore(std::collections::HashMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }
}

/// The favorites list: facility ids, stored as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorites(Vec<String>);

impl Favorites {
    /// Read the list from storage. A corrupt document resets to empty
    /// rather than failing the shell.
    pub fn load(store: &impl KeyValueStore) -> Favorites {
        match store.get(FAVORITES_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                warn!("resetting corrupt favorites list: {err}");
                Favorites::default()
            }),
            None => Favorites::default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        // Serializing a list of strings cannot fail.
        if let Ok(json) = serde_json::to_string(self) {
            store.set(FAVORITES_KEY, &json);
        }
    }

    pub fn contains(&self, facility_id: &str) -> bool {
        self.0.iter().any(|id| id == facility_id)
    }

    /// Add when absent, remove when present. Returns whether the id is a
    /// favorite afterwards.
    pub fn toggle(&mut self, facility_id: &str) -> bool {
        if self.contains(facility_id) {
            self.remove(facility_id);
            false
        } else {
            self.0.push(facility_id.to_string());
            true
        }
    }

    pub fn remove(&mut self, facility_id: &str) {
        self.0.retain(|id| id != facility_id);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    /// Resolve the saved ids against the store, dropping ids whose
    /// facility no longer exists in the datasets. The id prefix still
    /// tells us the category even for dropped records.
    pub fn resolve<'a>(&self, store: &'a FacilityStore) -> Vec<&'a Facility> {
        self.0
            .iter()
            .filter_map(|id| store.find_by_id(id))
            .collect()
    }

    /// Categories of the saved ids, derived from their prefixes.
    pub fn categories(&self) -> Vec<Category> {
        self.0.iter().filter_map(|id| Category::from_id(id)).collect()
    }
}

/// One remembered search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    /// Milliseconds since the epoch, supplied by the shell's clock.
    pub timestamp: u64,
}

/// Most-recent-first search history, de-duplicated with [`fold_key`]
/// comparison and capped at [`HISTORY_LIMIT`] entries.
///
/// [`fold_key`]: crate::text::fold_key
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchHistory(Vec<HistoryEntry>);

impl SearchHistory {
    pub fn load(store: &impl KeyValueStore) -> SearchHistory {
        match store.get(HISTORY_KEY) {
            Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                warn!("resetting corrupt search history: {err}");
                SearchHistory::default()
            }),
            None => SearchHistory::default(),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        if let Ok(json) = serde_json::to_string(self) {
            store.set(HISTORY_KEY, &json);
        }
    }

    /// Record a search. Re-searching an old query moves it to the top
    /// instead of duplicating it; blank queries are ignored.
    pub fn push(&mut self, query: &str, timestamp: u64) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        self.0
            .retain(|e| !crate::text::equals_folded(&e.query, query));
        self.0.insert(
            0,
            HistoryEntry {
                query: query.to_string(),
                timestamp,
            },
        );
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}
