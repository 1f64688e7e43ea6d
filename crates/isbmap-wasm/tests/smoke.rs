#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use isbmap_wasm::{facility_count, load_category, marker_color, nearby, search};
use wasm_bindgen::JsValue;

wasm_bindgen_test_configure!(run_in_browser);

const MOSQUES: &str = r#"{"features": [{
    "id": "mosque_1",
    "geometry": { "coordinates": [73.0372, 33.7295] },
    "properties": { "name": "Faisal Mosque", "sector": "E-8" }
}]}"#;

#[wasm_bindgen_test]
fn can_load_and_count() {
    let count = load_category("mosques", MOSQUES).expect("load should succeed");
    assert_eq!(count, 1);
    assert_eq!(facility_count("mosques"), 1);
    assert!(facility_count("all") >= 1);
}

#[wasm_bindgen_test]
fn unknown_category_is_rejected() {
    assert!(load_category("bus-stops", MOSQUES).is_err());
}

#[wasm_bindgen_test]
fn can_search_and_rank() {
    let _ = load_category("mosques", MOSQUES);

    let results = search("faisal", JsValue::NULL).expect("search should succeed");
    assert!(!results.is_null());

    let ranked = nearby(33.7295, 73.0372, 5.0, "all");
    assert!(!ranked.is_null());
}

#[wasm_bindgen_test]
fn presentation_lookups_cover_known_keys() {
    assert_eq!(marker_color("mosques").as_deref(), Some("#9333ea"));
    assert_eq!(marker_color("bus-stops"), None);
}
