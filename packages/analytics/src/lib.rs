#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation pipeline turning normalized tracks into chart views.
//!
//! Every function here is a pure, deterministic recomputation from the
//! current track set and [`Filters`]: nothing is cached or updated
//! incrementally. [`compute_dashboard`] runs all three views at once and is
//! the entry point the CLI uses.

pub mod color;
pub mod distribution;
pub mod filter;
pub mod genre;
pub mod scatter;
pub mod stats;

use track_charts_analytics_models::{Dashboard, Filters, PipelineSettings};
use track_charts_normalize::Dataset;
use track_charts_track_models::Track;

/// Computes every view for a loaded track set.
#[must_use]
pub fn compute_views(
    tracks: &[Track],
    filters: &Filters,
    settings: &PipelineSettings,
) -> Dashboard {
    let base = filter::base_filter(tracks, filters);
    let linked = filter::linked_filter(&base, filters);

    log::debug!(
        "Computing views: {} tracks, {} after filters, {} after album type selection",
        tracks.len(),
        base.len(),
        linked.len()
    );

    Dashboard {
        filters: *filters,
        genres: genre::genre_year_view(&linked, filters.year_range, settings.top_genre_count),
        scatter: scatter::scatter_view(
            &linked,
            settings.scatter_limit,
            settings.follower_min,
            settings.follower_max,
        ),
        distributions: distribution::popularity_distributions(
            &base,
            settings.sample_target,
            filters.show_sample,
        ),
    }
}

/// Computes every view, or `None` while the dataset is still loading.
#[must_use]
pub fn compute_dashboard(
    dataset: &Dataset,
    filters: &Filters,
    settings: &PipelineSettings,
) -> Option<Dashboard> {
    let Some(tracks) = dataset.tracks() else {
        log::debug!("Dataset still loading, skipping aggregation");
        return None;
    };
    Some(compute_views(tracks, filters, settings))
}

#[cfg(test)]
pub(crate) mod test_support {
    use track_charts_track_models::{AlbumType, Track};

    /// Builds a plottable album track with the given genres.
    pub fn track(name: &str, year: i32, popularity: f64, genres: &[&str]) -> Track {
        Track {
            id: Some(format!("id-{name}")),
            name: name.to_string(),
            popularity,
            artist_name: "artist".to_string(),
            artist_popularity: None,
            followers: 1_000,
            genre_raw: genres.join(","),
            genres: genres.iter().map(|g| (*g).to_string()).collect(),
            album_type: AlbumType::Album,
            year,
            duration_min: 3.0,
        }
    }
}
