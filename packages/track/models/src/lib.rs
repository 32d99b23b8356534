#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Canonical track row types shared across the track-charts toolchain.
//!
//! Raw dataset records are normalized into [`Track`] rows by the
//! normalizer crate. Every downstream aggregation consumes only these
//! fully-typed rows, so a `Track` always carries a finite release year,
//! popularity, follower count, and duration.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Release format of the album a track appears on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlbumType {
    /// Full-length album release
    Album,
    /// Single or EP release
    Single,
    /// Compilation of previously released material
    Compilation,
    /// Missing or unrecognized release format
    Other,
}

impl AlbumType {
    /// Maps a raw album type cell to an [`AlbumType`].
    ///
    /// The value is trimmed and lower-cased first. Empty or unrecognized
    /// values map to [`AlbumType::Other`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        raw.trim().to_lowercase().parse().unwrap_or(Self::Other)
    }

    /// Returns all variants of this enum, in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Album, Self::Single, Self::Compilation, Self::Other]
    }
}

/// Earliest release year a track may carry.
pub const MIN_YEAR: i32 = 1000;

/// Latest release year a track may carry.
pub const MAX_YEAR: i32 = 9999;

/// Whether `year` is a four-digit release year.
#[must_use]
pub const fn is_plausible_year(year: i32) -> bool {
    year >= MIN_YEAR && year <= MAX_YEAR
}

/// One music track after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Source identifier, if the dataset provides one.
    pub id: Option<String>,
    /// Track title (may be empty; the scatter view filters those out).
    pub name: String,
    /// Track popularity, nominally 0-100.
    pub popularity: f64,
    /// Primary artist name.
    pub artist_name: String,
    /// Artist popularity, nominally 0-100.
    pub artist_popularity: Option<f64>,
    /// Artist follower count.
    pub followers: u64,
    /// Genre cell exactly as it appeared in the dataset.
    pub genre_raw: String,
    /// Normalized genre labels, in source order, placeholders removed.
    ///
    /// Duplicates are kept: each occurrence counts toward the `1/k`
    /// weighting.
    pub genres: Vec<String>,
    /// Release format.
    pub album_type: AlbumType,
    /// Release year.
    pub year: i32,
    /// Duration in minutes (always positive).
    pub duration_min: f64,
}

impl Track {
    /// Weight each genre occurrence of this track contributes to weighted
    /// genre counts. Returns `None` when the track has no valid genres.
    #[must_use]
    pub fn genre_weight(&self) -> Option<f64> {
        if self.genres.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(1.0 / self.genres.len() as f64)
    }
}

/// Why a raw record was excluded from the normalized dataset.
///
/// Rejections are a data-quality outcome, not a fault: they are counted
/// and logged but never surfaced as errors.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    /// Neither a release year nor a parseable release date was present, or
    /// the year fell outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    MissingYear,
    /// Neither a minutes nor a milliseconds duration was usable.
    MissingDuration,
    /// Track popularity was missing or not a finite number.
    MissingPopularity,
    /// Artist follower count was missing, negative, or not finite.
    MissingFollowers,
}

impl RejectReason {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MissingYear,
            Self::MissingDuration,
            Self::MissingPopularity,
            Self::MissingFollowers,
        ]
    }
}
