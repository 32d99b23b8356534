//! Raw record → [`Track`] normalization.
//!
//! This is the strict parse-and-validate boundary of the pipeline. A record
//! either becomes a fully-typed [`Track`] or is rejected with a
//! [`RejectReason`]; no partially-valid row ever reaches aggregation.

use track_charts_track_models::{AlbumType, RejectReason, Track, is_plausible_year};

use crate::genre::parse_genres;
use crate::mapping::ColumnMapping;
use crate::record::{first_f64, first_str, get_str};

/// Milliseconds per minute, for `duration_ms` conversion.
const MS_PER_MINUTE: f64 = 60_000.0;

/// Normalizes one raw record into a [`Track`].
///
/// # Errors
///
/// Returns the [`RejectReason`] for the first required field (year,
/// duration, popularity, followers) that could not be resolved.
pub fn normalize_record(
    record: &serde_json::Value,
    mapping: &ColumnMapping,
) -> Result<Track, RejectReason> {
    let year = resolve_year(record, mapping).ok_or(RejectReason::MissingYear)?;
    let duration_min = resolve_duration(record, mapping).ok_or(RejectReason::MissingDuration)?;
    let popularity =
        first_f64(record, &mapping.popularity).ok_or(RejectReason::MissingPopularity)?;
    let followers = resolve_followers(record, mapping).ok_or(RejectReason::MissingFollowers)?;

    let genre_raw = first_str(record, &mapping.genres)
        .unwrap_or_default()
        .to_string();
    let genres = parse_genres(&genre_raw);

    Ok(Track {
        id: first_str(record, &mapping.id).map(String::from),
        name: first_str(record, &mapping.name)
            .unwrap_or_default()
            .to_string(),
        popularity,
        artist_name: first_str(record, &mapping.artist_name)
            .unwrap_or_default()
            .to_string(),
        artist_popularity: first_f64(record, &mapping.artist_popularity),
        followers,
        genre_raw,
        genres,
        album_type: first_str(record, &mapping.album_type)
            .map_or(AlbumType::Other, AlbumType::from_raw),
        year,
        duration_min,
    })
}

/// Resolves the release year: explicit year column first, then the leading
/// four characters of a release date. Years outside the four-digit window
/// count as missing.
fn resolve_year(record: &serde_json::Value, mapping: &ColumnMapping) -> Option<i32> {
    if let Some(year) = first_f64(record, &mapping.release_year)
        && let Some(year) = year_from_f64(year)
        && is_plausible_year(year)
    {
        return Some(year);
    }

    mapping.release_date.iter().find_map(|field| {
        let date = get_str(record, field)?;
        let year = date.get(..4)?.parse::<i32>().ok()?;
        is_plausible_year(year).then_some(year)
    })
}

fn year_from_f64(year: f64) -> Option<i32> {
    let year = year.trunc();
    if year < f64::from(i32::MIN) || year > f64::from(i32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(year as i32)
}

/// Resolves duration in minutes: explicit minutes first, then milliseconds.
/// Non-positive durations are treated as missing.
fn resolve_duration(record: &serde_json::Value, mapping: &ColumnMapping) -> Option<f64> {
    if let Some(min) = first_f64(record, &mapping.duration_min)
        && min > 0.0
    {
        return Some(min);
    }

    let ms = first_f64(record, &mapping.duration_ms)?;
    let min = ms / MS_PER_MINUTE;
    (min > 0.0).then_some(min)
}

fn resolve_followers(record: &serde_json::Value, mapping: &ColumnMapping) -> Option<u64> {
    let followers = first_f64(record, &mapping.followers)?;
    if followers < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(followers.round() as u64)
}
