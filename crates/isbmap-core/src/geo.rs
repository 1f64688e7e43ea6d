// crates/isbmap-core/src/geo.rs

//! Great-circle distance math and display formatting.

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two WGS84 points, in kilometers.
///
/// Pure and symmetric: `haversine_km(a, b) == haversine_km(b, a)`, and
/// identical points are at distance zero.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Render a distance for display: whole meters below 1 km, otherwise
/// kilometers to one decimal (`"850m"`, `"2.0km"`).
pub fn format_distance_km(km: f64) -> String {
    if km < 1.0 {
        format!("{}m", (km * 1000.0).round() as i64)
    } else {
        format!("{km:.1}km")
    }
}

/// Render a travel time for display (`"45 min"`, `"1h 20m"`).
pub fn format_duration_min(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{}h {}m", minutes / 60, minutes % 60)
    }
}
