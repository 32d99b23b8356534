//! Column mapping from dataset headers to [`Track`] fields.
//!
//! Every logical field lists candidate headers in priority order, so one
//! mapping covers the common export variants (`track_name` vs `name`,
//! `duration_ms` vs `duration_min`, ...). A mapping can be overridden from
//! TOML; fields left out keep their defaults.
//!
//! [`Track`]: track_charts_track_models::Track

use serde::Deserialize;

/// Candidate header names for each logical track field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Track identifier.
    pub id: Vec<String>,
    /// Track title.
    pub name: Vec<String>,
    /// Track popularity (0-100).
    pub popularity: Vec<String>,
    /// Artist name.
    pub artist_name: Vec<String>,
    /// Artist popularity (0-100).
    pub artist_popularity: Vec<String>,
    /// Artist follower count.
    pub followers: Vec<String>,
    /// Comma-separated genre list.
    pub genres: Vec<String>,
    /// Album type (`album`/`single`/`compilation`).
    pub album_type: Vec<String>,
    /// Explicit numeric release year. Preferred over `release_date`.
    pub release_year: Vec<String>,
    /// Release date string whose first four characters are the year.
    pub release_date: Vec<String>,
    /// Duration in minutes. Preferred over `duration_ms`.
    pub duration_min: Vec<String>,
    /// Duration in milliseconds.
    pub duration_ms: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            id: names(&["track_id", "id"]),
            name: names(&["track_name", "name"]),
            popularity: names(&["track_popularity", "popularity"]),
            artist_name: names(&["artist_name", "artist", "artists"]),
            artist_popularity: names(&["artist_popularity"]),
            followers: names(&["artist_followers", "followers"]),
            genres: names(&["artist_genres", "genres", "genre"]),
            album_type: names(&["album_type"]),
            release_year: names(&["release_year", "year"]),
            release_date: names(&["release_date", "album_release_date"]),
            duration_min: names(&["duration_min", "duration_minutes"]),
            duration_ms: names(&["duration_ms"]),
        }
    }
}
