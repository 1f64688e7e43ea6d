// crates/isbmap-core/src/engine.rs

//! # Filter & Rank Engine
//!
//! Stateless search, filtering and distance ranking over a
//! [`FacilityStore`] snapshot. Both entry points are pure: same inputs,
//! same outputs, no store mutation.

use serde::{Deserialize, Serialize};

use crate::geo::{format_distance_km, haversine_km};
use crate::model::{Category, Facility};
use crate::query::parse_query;
use crate::store::FacilityStore;
use crate::text::contains_folded;

/// Explicit filter criteria, all optional.
///
/// Criteria combine with AND semantics; list-valued criteria match when
/// any listed term matches (OR within the list).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchFilters {
    /// Keep records rated at least this much; a missing rating counts as 0.
    pub min_rating: Option<f64>,
    /// Keep records whose sector contains any of these codes.
    pub sectors: Vec<String>,
    /// Keep records whose feature list contains any of these terms.
    pub amenities: Vec<String>,
    /// Keep records whose timing text reads as round-the-clock.
    /// Substring heuristic ("24/7", "24 hours"), no clock comparison.
    pub open_now: bool,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.min_rating.is_none()
            && self.sectors.is_empty()
            && self.amenities.is_empty()
            && !self.open_now
    }

    fn matches(&self, facility: &Facility) -> bool {
        if let Some(min) = self.min_rating {
            if facility.rating.unwrap_or(0.0) < min {
                return false;
            }
        }

        if !self.sectors.is_empty() {
            let sector = facility.sector_upper();
            if !self.sectors.iter().any(|s| sector.contains(&s.to_uppercase())) {
                return false;
            }
        }

        if !self.amenities.is_empty() {
            let matched = self.amenities.iter().any(|term| {
                facility
                    .features
                    .iter()
                    .any(|feature| contains_folded(feature, term))
            });
            if !matched {
                return false;
            }
        }

        if self.open_now {
            let timing = facility
                .timing
                .as_deref()
                .unwrap_or("")
                .to_lowercase();
            if !timing.contains("24/7") && !timing.contains("24 hours") {
                return false;
            }
        }

        true
    }
}

/// A facility annotated with its distance from a reference point.
/// Transient; produced by the ranking operations, never persisted.
#[derive(Clone, Debug, Serialize)]
pub struct RankedFacility<'a> {
    #[serde(flatten)]
    pub facility: &'a Facility,
    /// Great-circle distance in kilometers. Serialized as `distance`,
    /// the name the presentation layer reads.
    #[serde(rename = "distance")]
    pub distance_km: f64,
    /// Display form: meters below 1 km, else km to one decimal.
    #[serde(rename = "distanceText")]
    pub distance_text: String,
}

/// Match a facility's sector against a normalized query sector, accepting
/// both the hyphenated and the collapsed form ("F-7" and "F7").
fn sector_matches(facility: &Facility, wanted: &str) -> bool {
    let sector = facility.sector_upper();
    sector.contains(wanted) || sector.replace('-', "").contains(&wanted.replace('-', ""))
}

/// Substring match for the specific-name fallback: name, address or
/// display category, case- and accent-insensitive.
fn name_matches(facility: &Facility, term: &str) -> bool {
    contains_folded(&facility.name, term)
        || facility
            .address
            .as_deref()
            .is_some_and(|a| contains_folded(a, term))
        || facility
            .display_category
            .as_deref()
            .is_some_and(|c| contains_folded(c, term))
}

impl FacilityStore {
    /// Structured + free-text search (the search box entry point).
    ///
    /// An empty query applies `filters` over all categories. A non-empty
    /// query is parsed first; the parsed facility type selects the
    /// category subset, then sector and specific-name constraints narrow
    /// it, then `filters` apply on top.
    pub fn search(&self, query: &str, filters: &SearchFilters) -> Vec<&Facility> {
        if query.trim().is_empty() {
            return filter_facilities(self.facilities(None), filters);
        }

        let parsed = parse_query(query);
        let mut results = self.facilities(parsed.facility_type);

        if let Some(sector) = &parsed.sector {
            results.retain(|f| sector_matches(f, sector));
        }

        if let Some(name) = &parsed.specific_name {
            results.retain(|f| name_matches(f, name));
        }

        filter_facilities(results, filters)
    }

    /// Plain substring search over name, address, sector and display
    /// category, without query parsing.
    pub fn basic_search(&self, term: &str, category: Option<Category>) -> Vec<&Facility> {
        let term = term.trim();
        if term.is_empty() {
            return self.facilities(category);
        }

        self.facilities(category)
            .into_iter()
            .filter(|f| {
                name_matches(f, term)
                    || f.sector
                        .as_deref()
                        .is_some_and(|s| contains_folded(s, term))
            })
            .collect()
    }

    /// Geo-ranking: all facilities within `radius_km` of the reference
    /// point, ascending by distance. The sort is stable, so ties keep
    /// their original collection order.
    pub fn nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
        category: Option<Category>,
    ) -> Vec<RankedFacility<'_>> {
        let mut ranked: Vec<RankedFacility<'_>> = self
            .facilities(category)
            .into_iter()
            .map(|f| annotate(f, lat, lng))
            .filter(|r| r.distance_km <= radius_km)
            .collect();

        ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        ranked
    }
}

/// Apply filter criteria over a facility collection.
pub fn filter_facilities<'a>(
    facilities: Vec<&'a Facility>,
    filters: &SearchFilters,
) -> Vec<&'a Facility> {
    if filters.is_empty() {
        return facilities;
    }
    facilities
        .into_iter()
        .filter(|f| filters.matches(f))
        .collect()
}

/// Rank a facility collection by distance from a reference point, without
/// a radius cap (used for favorites-by-distance views).
pub fn sort_by_distance<'a>(
    facilities: Vec<&'a Facility>,
    lat: f64,
    lng: f64,
) -> Vec<RankedFacility<'a>> {
    let mut ranked: Vec<RankedFacility<'a>> =
        facilities.into_iter().map(|f| annotate(f, lat, lng)).collect();
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

fn annotate(facility: &Facility, lat: f64, lng: f64) -> RankedFacility<'_> {
    let distance_km = haversine_km(lat, lng, facility.latitude, facility.longitude);
    RankedFacility {
        facility,
        distance_km,
        distance_text: format_distance_km(distance_km),
    }
}
