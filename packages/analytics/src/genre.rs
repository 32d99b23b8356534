//! Genre-by-year weighting for the stacked area chart.
//!
//! A track tagged with `k` genres contributes `1/k` to each of them, so every
//! track carries a total weight of one regardless of how many tags it has.
//! The top genres are ranked over the whole year range, and the per-year
//! matrix is then filled for those genres only.

use std::collections::{BTreeMap, HashMap};

use track_charts_analytics_models::{GenreYearCount, GenreYearView, TopGenre, YearRange};
use track_charts_track_models::{MAX_YEAR, MIN_YEAR, Track};

use crate::color::categorical_color;

/// Per-genre weight contributions of a single track, in tag order.
///
/// Duplicate tags appear once per occurrence. The weights sum to 1 for any
/// track with at least one genre.
#[must_use]
pub fn genre_contributions(track: &Track) -> Vec<(&str, f64)> {
    let Some(weight) = track.genre_weight() else {
        return Vec::new();
    };
    track.genres.iter().map(|g| (g.as_str(), weight)).collect()
}

/// Total weighted frequency of every genre, in first-seen order.
#[must_use]
pub fn weighted_genre_totals(tracks: &[&Track]) -> Vec<(String, f64)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<(String, f64)> = Vec::new();

    for track in tracks {
        for (genre, weight) in genre_contributions(track) {
            if let Some(&i) = index.get(genre) {
                totals[i].1 += weight;
            } else {
                index.insert(genre, totals.len());
                totals.push((genre.to_string(), weight));
            }
        }
    }

    totals
}

/// Ranks genres by total weight, descending, keeping at most `limit`.
///
/// The sort is stable, so genres with equal weight keep first-seen order.
#[must_use]
pub fn top_genres(tracks: &[&Track], limit: usize) -> Vec<TopGenre> {
    let mut totals = weighted_genre_totals(tracks);
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals.truncate(limit);

    totals
        .into_iter()
        .enumerate()
        .map(|(rank, (genre, total_weight))| TopGenre {
            rank,
            genre,
            total_weight,
            color: categorical_color(rank),
        })
        .collect()
}

/// Resolves the years the matrix spans. Open bounds fall back to the
/// earliest/latest year present in `tracks`. Explicit bounds are clamped to
/// the four-digit window tracks can carry.
fn year_span(tracks: &[&Track], range: YearRange) -> Vec<i32> {
    let from = range.from.or_else(|| tracks.iter().map(|t| t.year).min());
    let to = range.to.or_else(|| tracks.iter().map(|t| t.year).max());

    match (from, to) {
        (Some(from), Some(to)) => {
            let from = from.max(MIN_YEAR);
            let to = to.min(MAX_YEAR);
            if from <= to {
                (from..=to).collect()
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Builds the complete year × top-genre matrix.
///
/// `tracks` must already be restricted to `range`. Each track adds its
/// `1/k` weight to the cells of whichever of its genres made the top set;
/// genres outside the set are dropped, not re-weighted. Every
/// `(year, genre)` pair gets a cell, zero when nothing contributed.
#[must_use]
pub fn genre_year_view(
    tracks: &[&Track],
    range: YearRange,
    top_genre_count: usize,
) -> GenreYearView {
    let top = top_genres(tracks, top_genre_count);
    let years = year_span(tracks, range);

    let rank_of: HashMap<&str, usize> = top.iter().map(|g| (g.genre.as_str(), g.rank)).collect();

    let mut matrix: BTreeMap<i32, Vec<f64>> = years
        .iter()
        .map(|&year| (year, vec![0.0; top.len()]))
        .collect();

    for track in tracks {
        let Some(row) = matrix.get_mut(&track.year) else {
            continue;
        };
        for (genre, weight) in genre_contributions(track) {
            if let Some(&rank) = rank_of.get(genre) {
                row[rank] += weight;
            }
        }
    }

    let cells = matrix
        .into_iter()
        .flat_map(|(year, row)| {
            top.iter().zip(row).map(move |(genre, count)| GenreYearCount {
                year,
                genre: genre.genre.clone(),
                count,
            })
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Genre view: {} years x {} genres from {} tracks",
        years.len(),
        top.len(),
        tracks.len()
    );

    GenreYearView {
        years,
        top_genres: top,
        cells,
    }
}
