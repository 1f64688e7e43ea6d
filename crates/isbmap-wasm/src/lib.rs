//! isbmap-wasm — WebAssembly bindings for isbmap-core
//!
//! This crate exposes a small JS/WASM API over the facility engine. The
//! browser shell fetches the per-category GeoJSON documents itself (they
//! live next to the page under `data/`), feeds each one in as it arrives,
//! and then reads search and ranking results back as plain JSON values.
//!
//! What it provides
//! ----------------
//! - Incremental loading: `load_category(key, json)` per dataset, then
//!   `finish_loading()` for the fan-in report
//! - Queries: `facility_count(category)`, `get_facilities(category)`,
//!   `search(query, filters)`, `nearby(lat, lng, radius_km, category)`
//! - Presentation lookups: `marker_color(key)`, `category_icon(key)`,
//!   `category_keys()`, `get_stats()`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { load_category, finish_loading, nearby } from 'isbmap-wasm';
//!
//! async function main() {
//!   await init();
//!   for (const key of ['hospitals', 'mosques' /* ... */]) {
//!     try {
//!       const body = await (await fetch(`data/${key}.json`)).text();
//!       load_category(key, body);
//!     } catch (e) { /* one failed category never blocks the rest */ }
//!   }
//!   const report = finish_loading();
//!   if (report.loaded === 0) showFatalAlert();
//!
//!   console.log(nearby(33.6844, 73.0479, 5, 'all'));
//! }
//! main();
//! ```
//!
//! All exported functions return plain types or `JsValue` containing
//! JSON-serializable arrays/objects.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use wasm_bindgen::prelude::*;

use isbmap_core::{Category, FacilityStore, SearchFilters};
use serde_json::json;
use serde_wasm_bindgen::to_value;

// Single store instance, fed by the shell during startup and effectively
// read-only afterwards. The UI thread is the only writer.
static STORE: Lazy<Mutex<FacilityStore>> = Lazy::new(|| Mutex::new(FacilityStore::new()));

fn with_store<R>(f: impl FnOnce(&FacilityStore) -> R) -> R {
    let guard = STORE.lock().unwrap_or_else(|e| e.into_inner());
    f(&guard)
}

fn parse_category(key: &str) -> Option<Category> {
    // "all", the empty string and unknown keys all mean "no restriction".
    Category::from_key(key)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing isbmap WASM module...".into());
}

/* --------------------------------------------------------------------------
   Loading
-------------------------------------------------------------------------- */

/// Ingest one category document. Returns the number of records accepted.
///
/// A failure marks only that category; call the function again for the
/// remaining categories and read the overall outcome from
/// [`finish_loading`].
#[wasm_bindgen]
pub fn load_category(key: &str, geojson: &str) -> Result<usize, JsValue> {
    let category = Category::from_key(key)
        .ok_or_else(|| JsValue::from_str(&format!("unknown facility category: {key}")))?;

    let mut guard = STORE.lock().unwrap_or_else(|e| e.into_inner());
    guard
        .load_category_json(category, geojson)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Fan-in after all categories have been offered: per-category load states
/// plus the loaded/failed totals the shell bases its fatal-alert and
/// partial-load warnings on.
#[wasm_bindgen]
pub fn finish_loading() -> JsValue {
    with_store(|store| {
        let mut loaded = 0usize;
        let mut failed = 0usize;
        let mut states = serde_json::Map::new();
        for category in Category::ALL {
            let state = match store.load_state(category) {
                isbmap_core::LoadState::Loaded => {
                    loaded += 1;
                    "loaded"
                }
                _ => {
                    failed += 1;
                    "failed"
                }
            };
            states.insert(category.key().to_string(), json!(state));
        }

        let report = json!({
            "loaded": loaded,
            "failed": failed,
            "total": Category::ALL.len(),
            "facilities": store.total_count(),
            "states": states,
        });
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(
            &format!("facility data: {loaded}/{} categories loaded", Category::ALL.len()).into(),
        );
        to_value(&report).unwrap_or(JsValue::NULL)
    })
}

/* --------------------------------------------------------------------------
   Basic queries
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn facility_count(category: &str) -> usize {
    with_store(|store| store.count(parse_category(category)))
}

#[wasm_bindgen]
pub fn get_facilities(category: &str) -> JsValue {
    with_store(|store| {
        to_value(&store.facilities(parse_category(category))).unwrap_or(JsValue::NULL)
    })
}

#[wasm_bindgen]
pub fn get_stats() -> JsValue {
    with_store(|store| to_value(&store.stats()).unwrap_or(JsValue::NULL))
}

/* --------------------------------------------------------------------------
   Search and ranking
-------------------------------------------------------------------------- */

/// Free-text search with optional explicit filters.
///
/// `filters` is a JS object of the form
/// `{ minRating, sectors, amenities, openNow }`; pass `null` or `{}` for
/// no filters. The shell debounces the search box so this only runs after
/// typing pauses.
#[wasm_bindgen]
pub fn search(query: &str, filters: JsValue) -> Result<JsValue, JsValue> {
    let filters: SearchFilters = if filters.is_null() || filters.is_undefined() {
        SearchFilters::default()
    } else {
        serde_wasm_bindgen::from_value(filters)
            .map_err(|err| JsValue::from_str(&err.to_string()))?
    };

    with_store(|store| {
        let results = store.search(query, &filters);
        to_value(&results).map_err(|err| JsValue::from_str(&err.to_string()))
    })
}

/// Facilities within `radius_km` of the reference point, closest first,
/// each annotated with `distance_km` and `distance_text`.
#[wasm_bindgen]
pub fn nearby(lat: f64, lng: f64, radius_km: f64, category: &str) -> JsValue {
    with_store(|store| {
        let ranked = store.nearby(lat, lng, radius_km, parse_category(category));
        to_value(&ranked).unwrap_or(JsValue::NULL)
    })
}

/* --------------------------------------------------------------------------
   Presentation lookups
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub fn marker_color(key: &str) -> Option<String> {
    Category::from_key(key).map(|c| c.marker_color().to_string())
}

#[wasm_bindgen]
pub fn category_icon(key: &str) -> Option<String> {
    Category::from_key(key).map(|c| c.icon().to_string())
}

/// All category storage keys in canonical load order, for the shell's
/// fetch loop and legend.
#[wasm_bindgen]
pub fn category_keys() -> JsValue {
    let array = js_sys::Array::new();
    for category in Category::ALL {
        array.push(&JsValue::from_str(category.key()));
    }
    array.into()
}
