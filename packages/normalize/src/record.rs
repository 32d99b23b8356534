//! Typed access to raw, untyped dataset records.
//!
//! A raw record is a JSON object keyed by column header. CSV input produces
//! string cells only, but records built elsewhere (tests, JSON fixtures) may
//! carry real numbers, so every numeric accessor accepts both.

/// Gets a non-blank string value from a record by field name.
#[must_use]
pub fn get_str<'a>(record: &'a serde_json::Value, field: &str) -> Option<&'a str> {
    let s = record.get(field)?.as_str()?.trim();
    if s.is_empty() { None } else { Some(s) }
}

/// Gets a finite `f64` from a record, parsing string cells when needed.
#[must_use]
pub fn get_f64(record: &serde_json::Value, field: &str) -> Option<f64> {
    let value = record.get(field)?;
    let n = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Returns the first non-blank string among `fields`.
#[must_use]
pub fn first_str<'a>(record: &'a serde_json::Value, fields: &[String]) -> Option<&'a str> {
    fields.iter().find_map(|f| get_str(record, f))
}

/// Returns the first finite number among `fields`.
#[must_use]
pub fn first_f64(record: &serde_json::Value, fields: &[String]) -> Option<f64> {
    fields.iter().find_map(|f| get_f64(record, f))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_numbers_from_strings_and_numbers() {
        let record = serde_json::json!({"a": "42.5", "b": 7, "c": " 3 "});
        assert_eq!(get_f64(&record, "a"), Some(42.5));
        assert_eq!(get_f64(&record, "b"), Some(7.0));
        assert_eq!(get_f64(&record, "c"), Some(3.0));
    }

    #[test]
    fn rejects_non_finite_and_garbage_numbers() {
        let record = serde_json::json!({"a": "NaN", "b": "inf", "c": "abc", "d": true});
        assert!(get_f64(&record, "a").is_none());
        assert!(get_f64(&record, "b").is_none());
        assert!(get_f64(&record, "c").is_none());
        assert!(get_f64(&record, "d").is_none());
        assert!(get_f64(&record, "missing").is_none());
    }

    #[test]
    fn blank_strings_are_missing() {
        let record = serde_json::json!({"a": "   ", "b": "x"});
        assert!(get_str(&record, "a").is_none());
        let fields = vec!["a".to_string(), "b".to_string()];
        assert_eq!(first_str(&record, &fields), Some("x"));
    }

    #[test]
    fn first_f64_skips_unusable_candidates() {
        let record = serde_json::json!({"year": "", "alt_year": "1999"});
        let fields = vec!["year".to_string(), "alt_year".to_string()];
        assert_eq!(first_f64(&record, &fields), Some(1999.0));
    }
}
