//! Instantaneous experience rate over a look-back interval.

use super::series::Snapshot;

/// Experience per hour observed at `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub t: i64,
    pub rate_per_hour: f64,
}

/// Compute one rate point per snapshot (index 0 excluded).
///
/// The reference for snapshot `i` is the most recent earlier snapshot `j` with
/// `t[i] - t[j] >= interval_secs`. When no snapshot is that old yet, the first
/// snapshot is used instead so early points still get a (coarser) rate. Rates
/// are clamped at zero; a death shows up as a zero rate, its magnitude is the
/// death detector's business.
///
/// Both `i` and the matching `j` only move forward, so a single sweep finds the
/// same reference a backward scan from `i - 1` would.
pub fn rates(series: &[Snapshot], interval_secs: i64) -> Vec<RatePoint> {
    let mut points = Vec::with_capacity(series.len().saturating_sub(1));
    let mut anchor: Option<usize> = None;

    for i in 1..series.len() {
        let current = &series[i];

        let mut next = anchor.map_or(0, |j| j + 1);
        while next < i && current.t - series[next].t >= interval_secs {
            anchor = Some(next);
            next += 1;
        }

        let reference = &series[anchor.unwrap_or(0)];
        let elapsed = current.t - reference.t;
        if elapsed <= 0 {
            continue;
        }

        let gained = current.x as f64 - reference.x as f64;
        let rate_per_hour = (gained / elapsed as f64 * 3600.0).max(0.0);

        points.push(RatePoint {
            t: current.t,
            rate_per_hour,
        });
    }

    points
}

/// Latest computed rate, or 0 for series too short to have one.
pub fn current_rate(series: &[Snapshot], interval_secs: i64) -> f64 {
    rates(series, interval_secs)
        .last()
        .map(|point| point.rate_per_hour)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(i64, u64)]) -> Vec<Snapshot> {
        points.iter().map(|&(t, x)| Snapshot::new(t, x)).collect()
    }

    /// Straightforward backward scan used as the reference behaviour.
    fn rates_by_backward_scan(series: &[Snapshot], interval_secs: i64) -> Vec<RatePoint> {
        let mut out = Vec::new();
        for i in 1..series.len() {
            let found = (0..i)
                .rev()
                .find(|&j| series[i].t - series[j].t >= interval_secs);
            let j = match found {
                Some(j) => j,
                None if series[i].t - series[0].t > 0 => 0,
                None => continue,
            };
            let dt = (series[i].t - series[j].t) as f64;
            let dx = series[i].x as f64 - series[j].x as f64;
            out.push(RatePoint {
                t: series[i].t,
                rate_per_hour: (dx / dt * 3600.0).max(0.0),
            });
        }
        out
    }

    #[test]
    fn one_hour_of_gain() {
        let points = rates(&series(&[(0, 0), (3600, 3_600_000)]), 3600);
        assert_eq!(
            points,
            vec![RatePoint {
                t: 3600,
                rate_per_hour: 3_600_000.0
            }]
        );
    }

    #[test]
    fn first_snapshot_never_yields_a_point() {
        assert!(rates(&series(&[(100, 5)]), 60).is_empty());
        assert!(rates(&[], 60).is_empty());
    }

    #[test]
    fn early_points_fall_back_to_first_snapshot() {
        let data = series(&[(0, 0), (600, 600), (1200, 1800), (4200, 4800)]);
        let points = rates(&data, 3600);
        assert_eq!(points.len(), 3);
        // 600 xp over 600 s, measured against index 0.
        assert_eq!(points[0].rate_per_hour, 3600.0);
        // 1800 xp over 1200 s, still index 0.
        assert_eq!(points[1].rate_per_hour, 5400.0);
        // index 1 is the latest snapshot at least 3600 s older: 4200 xp over 3600 s.
        assert_eq!(points[2].rate_per_hour, 4200.0);
    }

    #[test]
    fn deaths_clamp_to_zero() {
        let points = rates(&series(&[(0, 1000), (100, 500), (200, 900)]), 100);
        assert_eq!(points[0].rate_per_hour, 0.0);
        assert!(points.iter().all(|p| p.rate_per_hour >= 0.0));
    }

    #[test]
    fn constant_experience_is_exactly_zero() {
        let data = series(&[(0, 42), (60, 42), (600, 42), (7200, 42)]);
        for interval in [0, 60, 3600, 86_400] {
            assert!(rates(&data, interval)
                .iter()
                .all(|p| p.rate_per_hour == 0.0));
        }
    }

    #[test]
    fn sweep_matches_backward_scan() {
        let data = series(&[
            (0, 0),
            (300, 1_000),
            (650, 900),
            (1_200, 5_000),
            (3_000, 9_000),
            (3_700, 9_500),
            (7_500, 30_000),
            (7_560, 29_000),
            (11_000, 41_000),
        ]);
        for interval in [0, 1, 300, 600, 3600, 14_400] {
            assert_eq!(
                rates(&data, interval),
                rates_by_backward_scan(&data, interval),
                "interval {interval}"
            );
        }
    }

    #[test]
    fn current_rate_defaults_to_zero() {
        assert_eq!(current_rate(&series(&[(0, 10)]), 3600), 0.0);
        assert_eq!(current_rate(&series(&[(0, 0), (3600, 7200)]), 3600), 7200.0);
    }
}
