// crates/isbmap-core/src/export.rs

//! CSV export of facility collections.

use csv::{QuoteStyle, WriterBuilder};

use crate::model::Facility;

const CSV_HEADER: &str = "Name,Category,Address,Sector,Phone,Latitude,Longitude";

/// Render facilities as CSV with a fixed header row.
///
/// String fields are quoted; coordinates come last, latitude before
/// longitude as in the export the map shell offers for download.
pub fn to_csv(facilities: &[&Facility]) -> String {
    // NonNumeric quotes every text field and leaves the coordinates bare.
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(Vec::new());

    for facility in facilities {
        let latitude = facility.latitude.to_string();
        let longitude = facility.longitude.to_string();
        // Writing into a Vec<u8> cannot fail.
        let _ = writer.write_record([
            facility.name.as_str(),
            facility.display_category.as_deref().unwrap_or(""),
            facility.address.as_deref().unwrap_or(""),
            facility.sector.as_deref().unwrap_or(""),
            facility.contact.as_deref().unwrap_or(""),
            latitude.as_str(),
            longitude.as_str(),
        ]);
    }

    let rows = writer.into_inner().unwrap_or_default();
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    csv.push_str(&String::from_utf8_lossy(&rows));
    csv
}

/// Default download file name for a category selection.
pub fn export_filename(category: Option<crate::model::Category>) -> String {
    match category {
        Some(cat) => format!("{}_facilities.csv", cat.key()),
        None => "all_facilities.csv".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::store::FacilityStore;

    #[test]
    fn csv_has_the_fixed_header_and_one_row_per_facility() {
        let mut store = FacilityStore::new();
        store
            .load_category_json(
                Category::Hospitals,
                r#"{"features": [{
                    "id": "hosp_1",
                    "geometry": { "coordinates": [73.0551, 33.6668] },
                    "properties": {
                        "name": "PIMS",
                        "category": "Government Hospital",
                        "address": "G-8/3",
                        "sector": "G-8",
                        "phone": "051-1234567"
                    }
                }]}"#,
            )
            .unwrap();

        let csv = to_csv(&store.facilities(None));
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Category,Address,Sector,Phone,Latitude,Longitude")
        );
        assert_eq!(
            lines.next(),
            Some("\"PIMS\",\"Government Hospital\",\"G-8/3\",\"G-8\",\"051-1234567\",33.6668,73.0551")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn missing_properties_export_as_empty_quoted_fields() {
        let mut store = FacilityStore::new();
        store
            .load_category_json(
                Category::Parks,
                r#"{"features": [{
                    "id": "park_1",
                    "geometry": { "coordinates": [73.07, 33.70] },
                    "properties": { "name": "Rose Garden" }
                }]}"#,
            )
            .unwrap();

        let csv = to_csv(&store.facilities(None));
        assert_eq!(
            csv.lines().nth(1),
            Some("\"Rose Garden\",\"\",\"\",\"\",\"\",33.7,73.07")
        );
    }

    #[test]
    fn embedded_quotes_are_escaped() {
        let mut store = FacilityStore::new();
        store
            .load_category_json(
                Category::Mosques,
                r#"{"features": [{
                    "id": "mosque_1",
                    "geometry": { "coordinates": [73.0372, 33.7295] },
                    "properties": { "name": "Jamia \"Shah Faisal\"" }
                }]}"#,
            )
            .unwrap();

        let csv = to_csv(&store.facilities(None));
        assert!(csv.contains("\"Jamia \"\"Shah Faisal\"\"\""));
    }

    #[test]
    fn export_filenames_follow_the_selection() {
        assert_eq!(export_filename(None), "all_facilities.csv");
        assert_eq!(
            export_filename(Some(Category::Mosques)),
            "mosques_facilities.csv"
        );
    }
}
