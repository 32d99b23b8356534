#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter parameters and chart view types for the aggregation pipeline.
//!
//! Filters are immutable parameter objects threaded into pure aggregation
//! functions. The view types are the complete contract with the chart
//! rendering layer: it receives a [`Dashboard`] and nothing else.

use serde::{Deserialize, Serialize};
use track_charts_track_models::AlbumType;

/// Default number of genres kept in the genre-by-year view.
pub const DEFAULT_TOP_GENRE_COUNT: usize = 10;

/// Default number of tracks kept in the popularity scatter.
pub const DEFAULT_SCATTER_LIMIT: usize = 500;

/// Default upper bound on points in a distribution overlay sample.
pub const DEFAULT_SAMPLE_TARGET: usize = 180;

/// Inclusive release year range. A missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// First year included.
    pub from: Option<i32>,
    /// Last year included.
    pub to: Option<i32>,
}

impl YearRange {
    /// Creates a closed range `[from, to]`.
    #[must_use]
    pub const fn new(from: i32, to: i32) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Whether `year` falls inside the range.
    #[must_use]
    pub fn contains(&self, year: i32) -> bool {
        self.from.is_none_or(|from| year >= from) && self.to.is_none_or(|to| year <= to)
    }
}

/// Duration threshold filter, in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "threshold", rename_all = "snake_case")]
pub enum DurationFilter {
    /// No duration filtering.
    #[default]
    None,
    /// Keep tracks at least this long.
    AtLeast(f64),
    /// Keep tracks at most this long.
    AtMost(f64),
}

impl DurationFilter {
    /// Whether a track of `duration_min` minutes passes the filter.
    #[must_use]
    pub fn matches(self, duration_min: f64) -> bool {
        match self {
            Self::None => true,
            Self::AtLeast(threshold) => duration_min >= threshold,
            Self::AtMost(threshold) => duration_min <= threshold,
        }
    }
}

/// Active filter values. Echoed back in the [`Dashboard`] so the renderer
/// can display filter chips and legends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Release year range (applies to every view).
    pub year_range: YearRange,
    /// Duration threshold (applies to every view).
    pub duration: DurationFilter,
    /// Album type selected in the distribution view. Narrows the genre and
    /// scatter views only.
    pub album_type: Option<AlbumType>,
    /// Whether distribution summaries carry their overlay sample.
    pub show_sample: bool,
}

impl Default for Filters {
    fn default() -> Self {
        Self {
            year_range: YearRange::default(),
            duration: DurationFilter::None,
            album_type: None,
            show_sample: true,
        }
    }
}

/// Tunable pipeline constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Number of genres ranked into the genre-by-year view.
    pub top_genre_count: usize,
    /// Number of tracks kept in the popularity scatter.
    pub scatter_limit: usize,
    /// Upper bound on overlay sample points per distribution.
    pub sample_target: usize,
    /// Lower end of the follower axis domain (clamped to at least 1).
    pub follower_min: f64,
    /// Upper end of the follower axis domain.
    pub follower_max: f64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            top_genre_count: DEFAULT_TOP_GENRE_COUNT,
            scatter_limit: DEFAULT_SCATTER_LIMIT,
            sample_target: DEFAULT_SAMPLE_TARGET,
            follower_min: 1.0,
            follower_max: 100_000_000.0,
        }
    }
}

/// A genre ranked into the genre-by-year view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopGenre {
    /// Zero-based rank by total weight.
    pub rank: usize,
    /// Normalized genre label.
    pub genre: String,
    /// Total weighted count across the year range.
    pub total_weight: f64,
    /// Categorical palette color (`#rrggbb`), assigned by rank.
    pub color: String,
}

/// Weighted track count for one genre in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreYearCount {
    /// Release year.
    pub year: i32,
    /// Genre label.
    pub genre: String,
    /// Sum of `1/k` weights contributed by tracks released that year.
    pub count: f64,
}

/// Genre-by-year stacked area input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreYearView {
    /// Years covered, ascending and contiguous.
    pub years: Vec<i32>,
    /// Top genres in rank order.
    pub top_genres: Vec<TopGenre>,
    /// One cell per `(year, genre)` pair, year-major then rank order.
    pub cells: Vec<GenreYearCount>,
}

impl GenreYearView {
    /// Looks up the weighted count for a `(year, genre)` cell.
    #[must_use]
    pub fn count(&self, year: i32, genre: &str) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.year == year && c.genre == genre)
            .map(|c| c.count)
    }
}

/// Duration range used by the scatter color legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendBounds {
    /// Duration (minutes) mapped to the first gradient stop.
    pub legend_min: f64,
    /// Duration (minutes) mapped to the last gradient stop.
    pub legend_max: f64,
}

impl Default for LegendBounds {
    fn default() -> Self {
        Self {
            legend_min: 0.0,
            legend_max: 1.0,
        }
    }
}

/// Log-scale follower axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogScale {
    /// Smallest follower count on the axis.
    pub domain_min: f64,
    /// Largest follower count on the axis.
    pub domain_max: f64,
}

impl LogScale {
    /// Creates a scale over `[min, max]`, clamping `min` to at least 1 so
    /// the logarithm stays defined.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let domain_min = min.max(1.0);
        Self {
            domain_min,
            domain_max: max.max(domain_min),
        }
    }

    /// Maps a value onto `[0, 1]` along the axis. Values outside the
    /// domain are clamped.
    #[must_use]
    pub fn position(&self, value: f64) -> f64 {
        let lo = self.domain_min.log10();
        let hi = self.domain_max.log10();
        if hi <= lo {
            return 0.0;
        }
        let v = value.clamp(self.domain_min, self.domain_max).log10();
        (v - lo) / (hi - lo)
    }
}

/// One track plotted in the popularity scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    /// Track identifier, if any.
    pub id: Option<String>,
    /// Track title.
    pub name: String,
    /// Artist name.
    pub artist_name: String,
    /// Track popularity (y axis).
    pub popularity: f64,
    /// Artist followers (x axis).
    pub followers: u64,
    /// Duration in minutes (color channel).
    pub duration_min: f64,
    /// Release format.
    pub album_type: AlbumType,
    /// Release year.
    pub year: i32,
    /// Position along the follower axis, in `[0, 1]`.
    pub x: f64,
    /// Duration color (`#rrggbb`).
    pub color: String,
}

/// Top-N popularity scatter input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterView {
    /// Selected tracks, most popular first.
    pub points: Vec<ScatterPoint>,
    /// Duration legend bounds derived from the selection.
    pub legend: LegendBounds,
    /// Follower axis.
    pub x_scale: LogScale,
}

/// Box-plot summary of track popularity for one album type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityDistribution {
    /// Album type this group covers.
    pub album_type: AlbumType,
    /// Number of tracks in the group.
    pub n: usize,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Interquartile range.
    pub iqr: f64,
    /// `q1 - 1.5 * iqr`.
    pub low_fence: f64,
    /// `q3 + 1.5 * iqr`.
    pub high_fence: f64,
    /// Smallest observed value inside the fences.
    pub low_whisker: f64,
    /// Largest observed value inside the fences.
    pub high_whisker: f64,
    /// Group minimum.
    pub min: f64,
    /// Group maximum.
    pub max: f64,
    /// Deterministic strided sample of the sorted values.
    pub sample: Vec<f64>,
}

/// Everything the chart layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Filters the views were computed with.
    pub filters: Filters,
    /// Genre-by-year stacked area input.
    pub genres: GenreYearView,
    /// Popularity scatter input.
    pub scatter: ScatterView,
    /// Popularity distributions, one per non-empty album type.
    pub distributions: Vec<PopularityDistribution>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_range_bounds_are_inclusive_and_optional() {
        let range = YearRange::new(2000, 2010);
        assert!(range.contains(2000));
        assert!(range.contains(2010));
        assert!(!range.contains(1999));
        assert!(!range.contains(2011));

        let open = YearRange {
            from: Some(2000),
            to: None,
        };
        assert!(open.contains(3000));
        assert!(YearRange::default().contains(i32::MIN));
    }

    #[test]
    fn duration_filter_modes() {
        assert!(DurationFilter::None.matches(0.1));
        assert!(DurationFilter::AtLeast(3.0).matches(3.0));
        assert!(!DurationFilter::AtLeast(3.0).matches(2.9));
        assert!(DurationFilter::AtMost(3.0).matches(3.0));
        assert!(!DurationFilter::AtMost(3.0).matches(3.1));
    }

    #[test]
    fn duration_filter_serializes_with_mode_tag() {
        let json = serde_json::to_value(DurationFilter::AtLeast(4.0)).unwrap();
        assert_eq!(json, serde_json::json!({"mode": "at_least", "threshold": 4.0}));
    }

    #[test]
    fn log_scale_clamps_low_end_and_maps_to_unit_interval() {
        let scale = LogScale::new(0.0, 1000.0);
        assert!((scale.domain_min - 1.0).abs() < f64::EPSILON);
        assert!(scale.position(0.0).abs() < f64::EPSILON);
        assert!((scale.position(10.0) - 1.0 / 3.0).abs() < 1e-12);
        assert!((scale.position(1e9) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn pipeline_settings_partial_toml_keeps_defaults() {
        let settings: PipelineSettings = toml::from_str("scatter_limit = 50").unwrap();
        assert_eq!(settings.scatter_limit, 50);
        assert_eq!(settings.top_genre_count, DEFAULT_TOP_GENRE_COUNT);
        assert_eq!(settings.sample_target, DEFAULT_SAMPLE_TARGET);
    }
}
