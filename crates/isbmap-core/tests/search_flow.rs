//! End-to-end flow over real-looking dataset files: load from a data
//! directory, search with parsed queries, rank by distance.

use std::fs;
use std::path::PathBuf;

use isbmap_core::{Category, FacilityStore, SearchFilters, Session};

fn write_dataset(dir: &PathBuf, category: Category, body: &str) {
    fs::write(dir.join(category.dataset_filename()), body).unwrap();
}

fn demo_data_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("isbmap-flow-{tag}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    write_dataset(
        &dir,
        Category::Mosques,
        r#"{"type": "FeatureCollection", "features": [
            {
                "id": "mosque_1",
                "geometry": { "type": "Point", "coordinates": [73.0372, 33.7295] },
                "properties": {
                    "name": "Faisal Mosque",
                    "sector": "E-8",
                    "timing": "24/7",
                    "facilities": ["Parking", "Library"]
                }
            },
            {
                "id": "mosque_2",
                "geometry": { "type": "Point", "coordinates": [73.0650, 33.7080] },
                "properties": {
                    "name": "Lal Masjid",
                    "sector": "G-6",
                    "timing": "24/7"
                }
            }
        ]}"#,
    );
    write_dataset(
        &dir,
        Category::Hospitals,
        r#"{"type": "FeatureCollection", "features": [
            {
                "id": "hosp_1",
                "geometry": { "type": "Point", "coordinates": [73.0551, 33.6668] },
                "properties": {
                    "name": "PIMS",
                    "address": "G-8/3, Islamabad",
                    "sector": "G-8",
                    "category": "Government Hospital",
                    "rating": 4.2,
                    "timing": "24/7",
                    "services": ["Emergency", "Cardiology"]
                }
            }
        ]}"#,
    );
    // Remaining categories present but empty collections.
    for category in [
        Category::PoliceStations,
        Category::Parks,
        Category::Schools,
        Category::Colleges,
        Category::Universities,
    ] {
        write_dataset(&dir, category, r#"{"features": []}"#);
    }

    dir
}

#[test]
fn load_search_and_rank() {
    let dir = demo_data_dir("rank");
    let mut store = FacilityStore::new();
    let report = store.load_all_from_dir(&dir);

    assert_eq!(report.loaded, 7);
    assert_eq!(report.failed, 0);
    assert_eq!(store.count(None), 3);
    assert_eq!(store.count(Some(Category::Mosques)), 2);

    // Free-text with type keyword and sector.
    let results = store.search("mosques in G-6", &SearchFilters::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "mosque_2");

    // Specific-name fallback reaches the hospital by acronym.
    let results = store.search("PIMS", &SearchFilters::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "PIMS");

    // "near me" parses to an intent; ranking itself takes the position.
    let parsed = isbmap_core::parse_query("mosque near me");
    assert!(parsed.near_me);
    assert_eq!(parsed.facility_type, Some(Category::Mosques));

    let mut session = Session::new();
    session.set_category_key("mosques");
    session.set_user_location(33.7295, 73.0372);
    let ranked = session.nearby_me(&store, 5.0).unwrap();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].facility.id, "mosque_1");
    assert!(ranked[0].distance_km <= ranked[1].distance_km);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn filters_compose_with_queries() {
    let dir = demo_data_dir("filters");
    let mut store = FacilityStore::new();
    store.load_all_from_dir(&dir);

    let filters = SearchFilters {
        min_rating: Some(4.0),
        amenities: vec!["emergency".into()],
        open_now: true,
        ..SearchFilters::default()
    };
    let results = store.search("hospital", &filters);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "hosp_1");

    // The same filters exclude the unrated mosques.
    let results = store.search("", &filters);
    assert_eq!(results.len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
