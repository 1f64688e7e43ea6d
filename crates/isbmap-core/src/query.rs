// crates/isbmap-core/src/query.rs

//! # Query Parser
//!
//! Turns a free-text search box string into a structured intent:
//! facility type, sector code, "near me" flag and a free-text name
//! fragment. Parsing never fails; an empty input yields the empty intent.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::Category;

/// Structured search intent produced from one raw query string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedQuery {
    pub facility_type: Option<Category>,
    /// Normalized sector code, e.g. "F-7".
    pub sector: Option<String>,
    pub near_me: bool,
    /// Whole input treated as a name fragment when nothing else matched.
    pub specific_name: Option<String>,
}

// A sector token is one letter, an optional hyphen and 1-2 digits,
// standalone ("F-7", "f7") or after "in" ("in G-11").
static SECTOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b([a-z]-?\d{1,2})\b|in ([a-z]-?\d{1,2})").expect("valid regex"));

/// Keyword to category table, English plus common Urdu transliterations.
///
/// Order matters: the first table entry whose keyword occurs anywhere in
/// the query wins, regardless of where it occurs in the text. "police
/// station" therefore resolves through "police", and a bare "station"
/// still means police stations.
const TYPE_SYNONYMS: &[(&str, Category)] = &[
    ("hospital", Category::Hospitals),
    ("hospitals", Category::Hospitals),
    ("clinic", Category::Hospitals),
    ("doctor", Category::Hospitals),
    ("medical", Category::Hospitals),
    ("police", Category::PoliceStations),
    ("station", Category::PoliceStations),
    ("thana", Category::PoliceStations),
    ("rescue", Category::PoliceStations),
    ("park", Category::Parks),
    ("parks", Category::Parks),
    ("garden", Category::Parks),
    ("playground", Category::Parks),
    ("mosque", Category::Mosques),
    ("mosques", Category::Mosques),
    ("masjid", Category::Mosques),
    ("masjids", Category::Mosques),
    ("jamia", Category::Mosques),
    ("school", Category::Schools),
    ("schools", Category::Schools),
    ("academy", Category::Schools),
    ("college", Category::Colleges),
    ("colleges", Category::Colleges),
    ("university", Category::Universities),
    ("universities", Category::Universities),
    ("varsity", Category::Universities),
];

/// Normalize a sector token to the hyphenated uppercase form ("f7" -> "F-7").
fn normalize_sector(token: &str) -> String {
    let upper = token.to_uppercase();
    let mut chars = upper.chars();
    match (chars.next(), chars.clone().next()) {
        (Some(letter), Some(second)) if second.is_ascii_digit() => {
            format!("{letter}-{}", chars.as_str())
        }
        _ => upper,
    }
}

/// Parse a raw search string into a [`ParsedQuery`].
///
/// Detection order: near-me intent, sector code, facility-type keyword,
/// then the specific-name fallback when neither type nor sector matched
/// and the trimmed input is longer than two characters.
pub fn parse_query(raw: &str) -> ParsedQuery {
    let trimmed = raw.trim();
    let q = trimmed.to_lowercase();

    let mut parsed = ParsedQuery::default();
    if q.is_empty() {
        return parsed;
    }

    parsed.near_me = q.contains("near me") || q.contains("nearby");

    if let Some(caps) = SECTOR_RE.captures(&q) {
        let token = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        parsed.sector = Some(normalize_sector(token));
    }

    parsed.facility_type = TYPE_SYNONYMS
        .iter()
        .find(|(keyword, _)| q.contains(keyword))
        .map(|&(_, category)| category);

    if parsed.facility_type.is_none() && parsed.sector.is_none() && trimmed.len() > 2 {
        parsed.specific_name = Some(trimmed.to_string());
    }

    parsed
}
