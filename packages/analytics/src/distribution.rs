//! Popularity distribution per album type (box plot with point overlay).

use std::collections::BTreeMap;

use track_charts_analytics_models::PopularityDistribution;
use track_charts_track_models::{AlbumType, Track};

use crate::stats::{quantile_sorted, sort_ascending};

/// Tukey fence multiplier.
const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Every `stride`-th value of `sorted`, where the stride is chosen so at
/// most `target` points remain. Index-based, so identical input always
/// yields an identical sample.
#[must_use]
pub fn strided_sample(sorted: &[f64], target: usize) -> Vec<f64> {
    let stride = sorted.len().div_ceil(target.max(1)).max(1);
    sorted.iter().step_by(stride).copied().collect()
}

/// Summarizes one group of popularity values.
///
/// Values are clamped to `[0, 100]` and sorted. Returns `None` for an empty
/// group.
#[must_use]
pub fn summarize(
    album_type: AlbumType,
    mut values: Vec<f64>,
    sample_target: usize,
    include_sample: bool,
) -> Option<PopularityDistribution> {
    for v in &mut values {
        *v = v.clamp(0.0, 100.0);
    }
    sort_ascending(&mut values);

    let (&min, &max) = (values.first()?, values.last()?);
    let q1 = quantile_sorted(&values, 0.25)?;
    let median = quantile_sorted(&values, 0.5)?;
    let q3 = quantile_sorted(&values, 0.75)?;
    let iqr = q3 - q1;
    let low_fence = WHISKER_IQR_FACTOR.mul_add(-iqr, q1);
    let high_fence = WHISKER_IQR_FACTOR.mul_add(iqr, q3);

    let low_whisker = values
        .iter()
        .copied()
        .find(|&v| v >= low_fence)
        .unwrap_or(min);
    let high_whisker = values
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= high_fence)
        .unwrap_or(max);

    let sample = if include_sample {
        strided_sample(&values, sample_target)
    } else {
        Vec::new()
    };

    Some(PopularityDistribution {
        album_type,
        n: values.len(),
        q1,
        median,
        q3,
        iqr,
        low_fence,
        high_fence,
        low_whisker,
        high_whisker,
        min,
        max,
        sample,
    })
}

/// Groups tracks by album type and summarizes each non-empty group, in
/// [`AlbumType`] order.
#[must_use]
pub fn popularity_distributions(
    tracks: &[&Track],
    sample_target: usize,
    include_sample: bool,
) -> Vec<PopularityDistribution> {
    let mut groups: BTreeMap<AlbumType, Vec<f64>> = BTreeMap::new();
    for track in tracks {
        groups
            .entry(track.album_type)
            .or_default()
            .push(track.popularity);
    }

    groups
        .into_iter()
        .filter_map(|(album_type, values)| {
            summarize(album_type, values, sample_target, include_sample)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::track;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quartiles_follow_linear_interpolation() {
        let d = summarize(AlbumType::Album, vec![40.0, 10.0, 30.0, 20.0], 180, true).unwrap();
        assert!(approx(d.q1, 17.5));
        assert!(approx(d.median, 25.0));
        assert!(approx(d.q3, 32.5));
        assert!(approx(d.iqr, 15.0));
        assert!(approx(d.low_fence, -5.0));
        assert!(approx(d.high_fence, 55.0));
        assert!(approx(d.low_whisker, 10.0));
        assert!(approx(d.high_whisker, 40.0));
        assert_eq!(d.n, 4);
    }

    #[test]
    fn whiskers_are_data_points_inside_fences() {
        let values = vec![1.0, 40.0, 42.0, 44.0, 45.0, 46.0, 48.0, 50.0, 99.0];
        let d = summarize(AlbumType::Single, values.clone(), 180, true).unwrap();

        assert!(d.low_whisker >= d.low_fence);
        assert!(d.high_whisker <= d.high_fence);
        assert!(values.contains(&d.low_whisker));
        assert!(values.contains(&d.high_whisker));
        assert!(approx(d.low_whisker, 40.0));
        assert!(approx(d.high_whisker, 50.0));
        assert!(approx(d.min, 1.0));
        assert!(approx(d.max, 99.0));
    }

    #[test]
    fn popularity_is_clamped() {
        let d = summarize(AlbumType::Album, vec![-20.0, 50.0, 140.0], 180, true).unwrap();
        assert!(approx(d.min, 0.0));
        assert!(approx(d.max, 100.0));
    }

    #[test]
    fn single_value_group() {
        let d = summarize(AlbumType::Other, vec![70.0], 180, true).unwrap();
        assert!(approx(d.q1, 70.0));
        assert!(approx(d.q3, 70.0));
        assert!(approx(d.low_whisker, 70.0));
        assert!(approx(d.high_whisker, 70.0));
        assert_eq!(d.sample, vec![70.0]);
    }

    #[test]
    fn empty_group_is_none() {
        assert!(summarize(AlbumType::Album, Vec::new(), 180, true).is_none());
    }

    #[test]
    fn sample_is_bounded_and_deterministic() {
        let values: Vec<f64> = (0..1000).map(|i| f64::from(i) / 10.0).collect();
        let a = summarize(AlbumType::Album, values.clone(), 180, true).unwrap();
        let b = summarize(AlbumType::Album, values, 180, true).unwrap();
        assert!(a.sample.len() <= 180);
        assert!(!a.sample.is_empty());
        assert_eq!(a.sample, b.sample);
        assert!(approx(a.sample[0], 0.0));
    }

    #[test]
    fn sample_keeps_everything_for_small_groups() {
        let sorted = [1.0, 2.0, 3.0];
        assert_eq!(strided_sample(&sorted, 180), vec![1.0, 2.0, 3.0]);
        assert_eq!(strided_sample(&sorted, 0), vec![1.0]);
        assert!(strided_sample(&[], 180).is_empty());
    }

    #[test]
    fn sample_stride_is_ceiling_of_n_over_target() {
        let sorted: Vec<f64> = (0..361).map(f64::from).collect();
        let sample = strided_sample(&sorted, 180);
        assert_eq!(sample.len(), 121);
        assert!(approx(sample[1], 3.0));
    }

    #[test]
    fn hidden_sample_is_empty() {
        let d = summarize(AlbumType::Album, vec![1.0, 2.0], 180, false).unwrap();
        assert!(d.sample.is_empty());
    }

    #[test]
    fn groups_by_album_type_and_omits_empty_types() {
        let mut single = track("s", 2020, 30.0, &[]);
        single.album_type = AlbumType::Single;
        let tracks = [
            track("a", 2020, 10.0, &[]),
            single,
            track("b", 2020, 20.0, &[]),
        ];
        let refs: Vec<&Track> = tracks.iter().collect();
        let dists = popularity_distributions(&refs, 180, true);

        let types: Vec<AlbumType> = dists.iter().map(|d| d.album_type).collect();
        assert_eq!(types, vec![AlbumType::Album, AlbumType::Single]);
        assert_eq!(dists[0].n, 2);
        assert_eq!(dists[1].n, 1);
    }
}
