//! Top-N popularity scatter: followers (log x) against popularity (y),
//! colored by duration.

use track_charts_analytics_models::{LegendBounds, LogScale, ScatterPoint, ScatterView};
use track_charts_track_models::Track;

use crate::color::DurationScale;
use crate::stats::{quantile_sorted, sort_ascending};

/// Lower percentile of the duration legend domain.
const LEGEND_LOW_PERCENTILE: f64 = 0.03;

/// Upper percentile of the duration legend domain.
const LEGEND_HIGH_PERCENTILE: f64 = 0.97;

/// Whether a track can be plotted at all.
fn is_plottable(track: &Track) -> bool {
    track.followers >= 1
        && track.popularity.is_finite()
        && track.duration_min.is_finite()
        && !track.name.trim().is_empty()
        && !track.artist_name.trim().is_empty()
}

/// The `limit` most popular plottable tracks, most popular first.
///
/// The sort is stable, so tracks with equal popularity keep input order.
#[must_use]
pub fn top_by_popularity<'a>(tracks: &[&'a Track], limit: usize) -> Vec<&'a Track> {
    let mut selected: Vec<&Track> = tracks.iter().copied().filter(|t| is_plottable(t)).collect();
    selected.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
    selected.truncate(limit);
    selected
}

/// Robust duration legend bounds for a selection.
///
/// Uses the 3rd-97th percentile range. When that collapses to a single
/// value but the durations still differ, the full min/max extent is used
/// instead, so the bounds are equal only when every duration is. An empty
/// selection yields `[0, 1]`.
#[must_use]
pub fn legend_bounds(tracks: &[&Track]) -> LegendBounds {
    let mut durations: Vec<f64> = tracks.iter().map(|t| t.duration_min).collect();
    sort_ascending(&mut durations);

    let (Some(&min), Some(&max)) = (durations.first(), durations.last()) else {
        return LegendBounds::default();
    };

    let lo = quantile_sorted(&durations, LEGEND_LOW_PERCENTILE).unwrap_or(min);
    let hi = quantile_sorted(&durations, LEGEND_HIGH_PERCENTILE).unwrap_or(max);

    if lo < hi {
        LegendBounds {
            legend_min: lo,
            legend_max: hi,
        }
    } else {
        LegendBounds {
            legend_min: min,
            legend_max: max,
        }
    }
}

/// Builds the popularity scatter for `tracks`.
#[must_use]
pub fn scatter_view(
    tracks: &[&Track],
    limit: usize,
    follower_min: f64,
    follower_max: f64,
) -> ScatterView {
    let selected = top_by_popularity(tracks, limit);
    let legend = legend_bounds(&selected);
    let x_scale = LogScale::new(follower_min, follower_max);
    let colors = DurationScale::new(legend.legend_min, legend.legend_max);

    #[allow(clippy::cast_precision_loss)]
    let points = selected
        .iter()
        .map(|t| ScatterPoint {
            id: t.id.clone(),
            name: t.name.clone(),
            artist_name: t.artist_name.clone(),
            popularity: t.popularity,
            followers: t.followers,
            duration_min: t.duration_min,
            album_type: t.album_type,
            year: t.year,
            x: x_scale.position(t.followers as f64),
            color: colors.color(t.duration_min),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Scatter view: {} of {} tracks, legend [{:.2}, {:.2}]",
        points.len(),
        tracks.len(),
        legend.legend_min,
        legend.legend_max
    );

    ScatterView {
        points,
        legend,
        x_scale,
    }
}
