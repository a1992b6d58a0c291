//! Trailing time-window filter anchored at a series' own latest snapshot.

use super::series::Snapshot;

/// Restrict `series` to the snapshots within `range_secs` of its last snapshot.
///
/// `range_secs <= 0` means "all time" and returns the input untouched. The
/// cutoff is measured from the series' latest timestamp rather than the wall
/// clock, so a character that stopped playing hours ago still shows its last
/// stretch of activity.
pub fn filter_by_time_range(series: &[Snapshot], range_secs: i64) -> &[Snapshot] {
    let Some(latest) = series.last() else {
        return series;
    };
    if range_secs <= 0 {
        return series;
    }

    let cutoff = latest.t.saturating_sub(range_secs);
    let start = series.partition_point(|snap| snap.t < cutoff);
    &series[start..]
}

/// Whether `timestamp` is one of the snapshot times in `series`.
pub fn contains_timestamp(series: &[Snapshot], timestamp: i64) -> bool {
    series.binary_search_by_key(&timestamp, |snap| snap.t).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(ts: &[i64]) -> Vec<Snapshot> {
        ts.iter().map(|&t| Snapshot::new(t, t as u64)).collect()
    }

    #[test]
    fn zero_window_is_identity() {
        let data = series(&[5, 10, 20, 40]);
        let filtered = filter_by_time_range(&data, 0);
        assert_eq!(filtered.len(), data.len());
        assert!(std::ptr::eq(filtered, data.as_slice()));
        assert_eq!(filter_by_time_range(&data, -30), data.as_slice());
    }

    #[test]
    fn empty_series_passes_through() {
        assert!(filter_by_time_range(&[], 3600).is_empty());
    }

    #[test]
    fn keeps_suffix_inside_window() {
        let data = series(&[0, 100, 200, 300, 400]);
        let filtered = filter_by_time_range(&data, 200);
        let ts: Vec<i64> = filtered.iter().map(|s| s.t).collect();
        assert_eq!(ts, vec![200, 300, 400]);
    }

    #[test]
    fn minimum_is_first_timestamp_at_or_after_cutoff() {
        let data = series(&[0, 90, 150, 260, 400]);
        let filtered = filter_by_time_range(&data, 300);
        // cutoff = 100 -> 150 is the smallest t >= cutoff
        assert_eq!(filtered.first().map(|s| s.t), Some(150));
    }

    #[test]
    fn filtering_twice_is_idempotent() {
        let data = series(&[0, 30, 70, 95, 140, 199, 230]);
        for window in [1, 50, 100, 1_000] {
            let once = filter_by_time_range(&data, window);
            let twice = filter_by_time_range(once, window);
            assert_eq!(once, twice, "window {window}");
        }
    }

    #[test]
    fn timestamp_lookup_is_exact() {
        let data = series(&[10, 20, 30]);
        assert!(contains_timestamp(&data, 20));
        assert!(!contains_timestamp(&data, 25));
    }
}
