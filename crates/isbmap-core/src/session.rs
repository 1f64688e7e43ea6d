// crates/isbmap-core/src/session.rs

//! Explicit presentation session state.
//!
//! The browser shell owns exactly one of these and mutates it from UI
//! events; the engine only ever reads it. This replaces the ambient
//! module-level "current category / current filters / user location"
//! globals with a single-writer struct.

use crate::engine::{RankedFacility, SearchFilters};
use crate::model::{Category, Facility};
use crate::store::FacilityStore;

/// Current UI selection: active category, active filters and the last
/// known user position.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub category: Option<Category>,
    pub filters: SearchFilters,
    pub user_location: Option<(f64, f64)>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a category by key; "all" or an unknown key clears the
    /// selection (unknown never errors).
    pub fn set_category_key(&mut self, key: &str) {
        self.category = Category::from_key(key);
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    pub fn set_user_location(&mut self, lat: f64, lng: f64) {
        self.user_location = Some((lat, lng));
    }

    pub fn clear_user_location(&mut self) {
        self.user_location = None;
    }

    /// Run the search-box query with the session's active filters.
    pub fn run_search<'a>(&self, store: &'a FacilityStore, query: &str) -> Vec<&'a Facility> {
        store.search(query, &self.filters)
    }

    /// Rank facilities around the user's position, if one is known.
    /// Uses the session's active category.
    pub fn nearby_me<'a>(
        &self,
        store: &'a FacilityStore,
        radius_km: f64,
    ) -> Option<Vec<RankedFacility<'a>>> {
        let (lat, lng) = self.user_location?;
        Some(store.nearby(lat, lng, radius_km, self.category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_key_selection_tolerates_unknowns() {
        let mut session = Session::new();
        session.set_category_key("mosques");
        assert_eq!(session.category, Some(Category::Mosques));
        session.set_category_key("all");
        assert_eq!(session.category, None);
        session.set_category_key("bus-stops");
        assert_eq!(session.category, None);
    }

    #[test]
    fn nearby_me_requires_a_location() {
        let store = FacilityStore::new();
        let mut session = Session::new();
        assert!(session.nearby_me(&store, 5.0).is_none());
        session.set_user_location(33.6844, 73.0479);
        assert_eq!(session.nearby_me(&store, 5.0).unwrap().len(), 0);
    }
}
