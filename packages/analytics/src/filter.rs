//! Applies [`Filters`] to a normalized track set.
//!
//! The year range and duration threshold narrow every view. The album type
//! selection originates in the distribution view, so it narrows only the
//! views linked to it.

use track_charts_analytics_models::Filters;
use track_charts_track_models::Track;

/// Tracks passing the year range and duration filter.
#[must_use]
pub fn base_filter<'a>(tracks: &'a [Track], filters: &Filters) -> Vec<&'a Track> {
    tracks
        .iter()
        .filter(|t| {
            filters.year_range.contains(t.year) && filters.duration.matches(t.duration_min)
        })
        .collect()
}

/// Narrows `tracks` to the selected album type, if any.
#[must_use]
pub fn linked_filter<'a>(tracks: &[&'a Track], filters: &Filters) -> Vec<&'a Track> {
    tracks
        .iter()
        .copied()
        .filter(|t| filters.album_type.is_none_or(|selected| t.album_type == selected))
        .collect()
}

#[cfg(test)]
mod tests {
    use track_charts_analytics_models::{DurationFilter, YearRange};
    use track_charts_track_models::AlbumType;

    use super::*;
    use crate::test_support::track;

    #[test]
    fn base_filter_applies_year_and_duration() {
        let tracks = vec![
            track("a", 2019, 50.0, &["pop"]),
            track("b", 2020, 50.0, &["pop"]),
            track("c", 2021, 50.0, &["pop"]),
        ];
        let mut filters = Filters {
            year_range: YearRange::new(2020, 2021),
            ..Filters::default()
        };
        assert_eq!(base_filter(&tracks, &filters).len(), 2);

        filters.duration = DurationFilter::AtMost(2.0);
        assert!(base_filter(&tracks, &filters).is_empty());
    }

    #[test]
    fn linked_filter_selects_album_type() {
        let mut single = track("s", 2020, 10.0, &["pop"]);
        single.album_type = AlbumType::Single;
        let tracks = vec![track("a", 2020, 10.0, &["pop"]), single];

        let all = base_filter(&tracks, &Filters::default());
        let filters = Filters {
            album_type: Some(AlbumType::Single),
            ..Filters::default()
        };
        let linked = linked_filter(&all, &filters);
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].name, "s");

        assert_eq!(linked_filter(&all, &Filters::default()).len(), 2);
    }
}
