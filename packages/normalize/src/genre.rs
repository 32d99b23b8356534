//! Genre string parsing.
//!
//! Datasets store a track's genres as a single comma-separated cell with
//! inconsistent casing, spacing, and placeholder values. These helpers
//! turn that cell into an ordered list of canonical genre labels.

/// Tokens that stand in for "no genre" and are discarded.
pub const GENRE_PLACEHOLDERS: &[&str] = &["n/a", "na", "none", "unknown", "null", "undefined"];

/// Normalizes a single genre token: trims, lower-cases, and collapses runs
/// of whitespace into one space.
///
/// Returns `None` for empty tokens and placeholders.
#[must_use]
pub fn normalize_genre(token: &str) -> Option<String> {
    let collapsed = token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if collapsed.is_empty() || GENRE_PLACEHOLDERS.contains(&collapsed.as_str()) {
        return None;
    }

    Some(collapsed)
}

/// Splits a raw genre cell on commas and normalizes every token.
///
/// Order is preserved and duplicates are kept, so `"pop, Pop"` yields two
/// `"pop"` entries.
#[must_use]
pub fn parse_genres(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(normalize_genre).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(
            normalize_genre("  Indie   Pop\t"),
            Some("indie pop".to_string())
        );
    }

    #[test]
    fn drops_placeholders_case_insensitively() {
        for token in ["N/A", "na", " None ", "UNKNOWN", "null", "Undefined", "", "   "] {
            assert!(normalize_genre(token).is_none(), "{token:?} should be dropped");
        }
    }

    #[test]
    fn parses_comma_separated_list_in_order() {
        assert_eq!(
            parse_genres("Pop, dance  pop,n/a, ,Rock"),
            vec!["pop", "dance pop", "rock"]
        );
    }

    #[test]
    fn keeps_duplicate_genres() {
        assert_eq!(parse_genres("pop,Pop , rock"), vec!["pop", "pop", "rock"]);
    }

    #[test]
    fn empty_cell_yields_no_genres() {
        assert!(parse_genres("").is_empty());
        assert!(parse_genres("unknown, null").is_empty());
    }
}
