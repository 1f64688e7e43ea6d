// crates/isbmap-core/src/text.rs

//! Text normalization helpers shared by the query parser and the engine.

/// Convert a string into a folded key suitable for matching.
///
/// Transliterates Unicode to ASCII (e.g. `Jāmi'a` -> `Jami'a`) and
/// lowercases, so facility names entered with or without diacritics
/// compare equal.
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Accent-insensitive and case-insensitive substring match.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold_key(haystack).contains(&fold_key(needle))
}

/// Accent-insensitive and case-insensitive equality.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_case_and_diacritics() {
        assert_eq!(fold_key("Jāmi'a Masjid"), "jami'a masjid");
        assert!(contains_folded("Shifa International", "SHIFA"));
        assert!(equals_folded("F-7 Markaz", "f-7 markaz"));
    }

    #[test]
    fn plain_ascii_is_untouched() {
        assert_eq!(fold_key("PIMS"), "pims");
    }
}
