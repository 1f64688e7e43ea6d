// crates/isbmap-core/src/model.rs

//! Facility data model: the closed category set, the immutable facility
//! record and the raw GeoJSON mirror types it is built from.

use log::warn;
use serde::{Deserialize, Serialize};

/// One of the seven facility types tracked by the map.
///
/// The set is closed: category membership is derived from the record id
/// prefix (`hosp_12` is a hospital) rather than scanned from strings at
/// the call sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Hospitals,
    PoliceStations,
    Parks,
    Mosques,
    Schools,
    Colleges,
    Universities,
}

impl Category {
    /// All categories in canonical load order.
    pub const ALL: [Category; 7] = [
        Category::Hospitals,
        Category::PoliceStations,
        Category::Parks,
        Category::Mosques,
        Category::Schools,
        Category::Colleges,
        Category::Universities,
    ];

    /// Storage key, also the dataset file stem (`police-stations.json`).
    pub fn key(self) -> &'static str {
        match self {
            Category::Hospitals => "hospitals",
            Category::PoliceStations => "police-stations",
            Category::Parks => "parks",
            Category::Mosques => "mosques",
            Category::Schools => "schools",
            Category::Colleges => "colleges",
            Category::Universities => "universities",
        }
    }

    /// Human-readable label for list and stats views.
    pub fn label(self) -> &'static str {
        match self {
            Category::Hospitals => "Hospitals",
            Category::PoliceStations => "Police Stations",
            Category::Parks => "Parks",
            Category::Mosques => "Mosques",
            Category::Schools => "Schools",
            Category::Colleges => "Colleges",
            Category::Universities => "Universities",
        }
    }

    /// Record id prefix that marks membership (`hosp_`, `police_`, ...).
    pub fn id_prefix(self) -> &'static str {
        match self {
            Category::Hospitals => "hosp_",
            Category::PoliceStations => "police_",
            Category::Parks => "park_",
            Category::Mosques => "mosque_",
            Category::Schools => "school_",
            Category::Colleges => "college_",
            Category::Universities => "uni_",
        }
    }

    /// Look a category up by storage key, case-insensitive.
    pub fn from_key(key: &str) -> Option<Category> {
        let key = key.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }

    /// Derive the category implied by a record id prefix.
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| id.starts_with(c.id_prefix()))
    }

    /// Dataset file name for this category.
    pub fn dataset_filename(self) -> String {
        format!("{}.json", self.key())
    }

    /// Marker color used by the presentation layer.
    pub fn marker_color(self) -> &'static str {
        match self {
            Category::Hospitals => "#dc2626",
            Category::PoliceStations => "#2563eb",
            Category::Parks => "#16a34a",
            Category::Mosques => "#9333ea",
            Category::Schools => "#ea580c",
            Category::Colleges => "#eab308",
            Category::Universities => "#4338ca",
        }
    }

    /// Font Awesome icon class used by the presentation layer.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Hospitals => "fa-hospital",
            Category::PoliceStations => "fa-shield-alt",
            Category::Parks => "fa-tree",
            Category::Mosques => "fa-mosque",
            Category::Schools => "fa-school",
            Category::Colleges => "fa-graduation-cap",
            Category::Universities => "fa-university",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single point-of-interest record. Immutable once loaded.
#[derive(Clone, Debug, Serialize)]
pub struct Facility {
    pub id: String,
    pub category: Category,
    /// WGS84 degrees, always finite.
    pub longitude: f64,
    pub latitude: f64,
    pub name: String,
    pub address: Option<String>,
    /// Islamabad sector code, e.g. "F-7".
    pub sector: Option<String>,
    /// Display label from the dataset, distinct from the storage key.
    pub display_category: Option<String>,
    /// 0-5 stars.
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub contact: Option<String>,
    /// Free-text opening hours, may contain "24/7".
    pub timing: Option<String>,
    /// Merged amenities / services / facilities / programs list.
    pub features: Vec<String>,
}

impl Facility {
    /// Sector code folded to uppercase, empty when absent.
    pub fn sector_upper(&self) -> String {
        self.sector.as_deref().unwrap_or("").to_uppercase()
    }
}

/// Raw GeoJSON feature collection as fetched from `data/<category>.json`.
///
/// Mirrors the external files; not part of the public API surface.
#[derive(Debug, Deserialize)]
pub struct FeatureCollectionRaw {
    pub features: Option<Vec<FeatureRaw>>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRaw {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub geometry: Option<GeometryRaw>,
    #[serde(default)]
    pub properties: PropertiesRaw,
}

#[derive(Debug, Deserialize)]
pub struct GeometryRaw {
    /// GeoJSON order: `[longitude, latitude]`.
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertiesRaw {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reviews: Option<u32>,
    #[serde(default, alias = "phone")]
    pub contact: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    // The feature list comes under one of four names depending on the
    // category; first present wins.
    #[serde(default)]
    pub amenities: Option<Vec<String>>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default)]
    pub facilities: Option<Vec<String>>,
    #[serde(default)]
    pub programs: Option<Vec<String>>,
}

impl PropertiesRaw {
    fn take_features(&mut self) -> Vec<String> {
        self.amenities
            .take()
            .or_else(|| self.services.take())
            .or_else(|| self.facilities.take())
            .or_else(|| self.programs.take())
            .unwrap_or_default()
    }
}

impl Facility {
    /// Build a facility from one raw feature, or `None` when the record is
    /// unusable (missing id, name or valid coordinates). Unusable records
    /// are skipped so the rest of the batch still renders.
    pub fn from_raw(category: Category, raw: FeatureRaw) -> Option<Facility> {
        let FeatureRaw {
            id,
            geometry,
            mut properties,
        } = raw;

        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                warn!("skipping {category} record without id");
                return None;
            }
        };

        let (longitude, latitude) = match geometry {
            Some(g) if g.coordinates.len() >= 2 => (g.coordinates[0], g.coordinates[1]),
            _ => {
                warn!("skipping {id}: missing coordinates");
                return None;
            }
        };
        if !longitude.is_finite() || !latitude.is_finite() {
            warn!("skipping {id}: non-finite coordinates");
            return None;
        }

        let name = match properties.name.take() {
            Some(name) if !name.is_empty() => name,
            _ => {
                warn!("skipping {id}: missing name");
                return None;
            }
        };

        // Prefix and store category should agree; tolerate the mismatch
        // but make it visible.
        if let Some(implied) = Category::from_id(&id) {
            if implied != category {
                warn!("{id}: id prefix implies {implied}, stored under {category}");
            }
        }

        let features = properties.take_features();

        Some(Facility {
            id,
            category,
            longitude,
            latitude,
            name,
            address: properties.address,
            sector: properties.sector,
            display_category: properties.category,
            rating: properties.rating,
            reviews: properties.reviews,
            contact: properties.contact,
            timing: properties.timing,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_keys() {
        for cat in Category::ALL {
            assert_eq!(Category::from_key(cat.key()), Some(cat));
        }
        assert_eq!(Category::from_key("POLICE-STATIONS"), Some(Category::PoliceStations));
        assert_eq!(Category::from_key("bus-stops"), None);
    }

    #[test]
    fn category_derives_from_id_prefix() {
        assert_eq!(Category::from_id("hosp_12"), Some(Category::Hospitals));
        assert_eq!(Category::from_id("uni_3"), Some(Category::Universities));
        assert_eq!(Category::from_id("metro_1"), None);
    }

    #[test]
    fn dataset_filenames_follow_the_key() {
        assert_eq!(Category::Mosques.dataset_filename(), "mosques.json");
        assert_eq!(
            Category::PoliceStations.dataset_filename(),
            "police-stations.json"
        );
    }

    #[test]
    fn serde_uses_kebab_case_keys() {
        let json = serde_json::to_string(&Category::PoliceStations).unwrap();
        assert_eq!(json, "\"police-stations\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::PoliceStations);
    }

    fn raw(id: &str, coords: &[f64], name: Option<&str>) -> FeatureRaw {
        FeatureRaw {
            id: Some(id.to_string()),
            geometry: Some(GeometryRaw {
                coordinates: coords.to_vec(),
            }),
            properties: PropertiesRaw {
                name: name.map(str::to_string),
                ..PropertiesRaw::default()
            },
        }
    }

    #[test]
    fn builds_a_facility_from_a_valid_feature() {
        let f = Facility::from_raw(
            Category::Mosques,
            raw("mosque_1", &[73.0479, 33.7295], Some("Faisal Mosque")),
        )
        .unwrap();
        assert_eq!(f.id, "mosque_1");
        assert_eq!(f.longitude, 73.0479);
        assert_eq!(f.latitude, 33.7295);
        assert_eq!(f.name, "Faisal Mosque");
    }

    #[test]
    fn skips_features_without_geometry_or_name() {
        assert!(Facility::from_raw(Category::Parks, raw("park_1", &[], Some("Rose Garden"))).is_none());
        assert!(Facility::from_raw(Category::Parks, raw("park_2", &[73.0, 33.7], None)).is_none());
        assert!(Facility::from_raw(
            Category::Parks,
            raw("park_3", &[f64::NAN, 33.7], Some("Bad Park"))
        )
        .is_none());
    }

    #[test]
    fn feature_list_fallback_order_is_first_present_wins() {
        let mut props = PropertiesRaw {
            services: Some(vec!["Emergency".into()]),
            programs: Some(vec!["BSc".into()]),
            ..PropertiesRaw::default()
        };
        assert_eq!(props.take_features(), vec!["Emergency".to_string()]);
    }
}
