//! Single-character derivations: window -> rates, deaths, depth and a summary.

use super::deaths::{self, DeathEvent};
use super::range::{contains_timestamp, filter_by_time_range};
use super::rates::{self, RatePoint};
use super::series::{self, ChartPoint, CharacterHistory, Snapshot};

/// Every derived signal for one character under a given window and interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSeries {
    pub xp: Vec<ChartPoint>,
    pub rates: Vec<RatePoint>,
    /// Deaths whose timestamp is one of the windowed snapshot times.
    pub deaths: Vec<DeathEvent>,
    pub depth: Vec<ChartPoint>,
}

impl DerivedSeries {
    pub fn has_depth(&self) -> bool {
        !self.depth.is_empty()
    }
}

/// Range filter, then rate calculation on what's left. Deaths are detected on
/// the full history (the pre-death snapshot may sit just outside the window)
/// and kept when they land on a windowed snapshot.
pub fn derive(history: &[Snapshot], window_secs: i64, interval_secs: i64) -> DerivedSeries {
    let windowed = filter_by_time_range(history, window_secs);

    let deaths = deaths::deaths(history)
        .into_iter()
        .filter(|event| contains_timestamp(windowed, event.timestamp))
        .collect();

    DerivedSeries {
        xp: series::xp_points(windowed),
        rates: rates::rates(windowed, interval_secs),
        deaths,
        depth: series::depth_points(windowed),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailSummary {
    pub latest_xp: Option<u64>,
    pub latest_depth: Option<u64>,
    /// Net experience across the window, deaths included.
    pub xp_gained: i64,
    pub death_count: usize,
    pub xp_lost_total: u64,
    /// Net gain over the window's span, per hour; 0 for a single snapshot.
    pub average_rate_per_hour: f64,
    pub max_depth: Option<u64>,
    pub snapshot_count: usize,
}

/// What the detail panel shows for the selected character.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub name: String,
    pub class: String,
    pub account: String,
    pub series: DerivedSeries,
    pub summary: DetailSummary,
}

pub fn detail_view(history: &CharacterHistory, window_secs: i64, interval_secs: i64) -> DetailView {
    let windowed = filter_by_time_range(&history.history, window_secs);
    let series = derive(&history.history, window_secs, interval_secs);
    let summary = summarize(windowed, &series);

    DetailView {
        name: history.name.clone(),
        class: history.class.clone(),
        account: history.account.clone(),
        series,
        summary,
    }
}

fn summarize(windowed: &[Snapshot], derived: &DerivedSeries) -> DetailSummary {
    let (Some(first), Some(last)) = (windowed.first(), windowed.last()) else {
        return DetailSummary::default();
    };

    let xp_gained = last.x as i64 - first.x as i64;
    let span = last.t - first.t;
    let average_rate_per_hour = if span > 0 {
        (xp_gained as f64 / span as f64 * 3600.0).max(0.0)
    } else {
        0.0
    };

    DetailSummary {
        latest_xp: Some(last.x),
        latest_depth: last.d,
        xp_gained,
        death_count: derived.deaths.len(),
        xp_lost_total: deaths::total_lost(&derived.deaths),
        average_rate_per_hour,
        max_depth: windowed.iter().filter_map(|snap| snap.d).max(),
        snapshot_count: windowed.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> CharacterHistory {
        CharacterHistory {
            name: "twist".into(),
            class: "Juggernaut".into(),
            account: "turd#4882".into(),
            history: vec![
                Snapshot::with_depth(0, 1_000, 10),
                Snapshot::with_depth(600, 2_000, 12),
                Snapshot::with_depth(1_200, 1_800, 12),
                Snapshot::with_depth(1_800, 3_000, 15),
                Snapshot::with_depth(2_400, 2_700, 15),
            ],
        }
    }

    #[test]
    fn full_history_summary() {
        let view = detail_view(&history(), 0, 600);
        assert_eq!(view.summary.snapshot_count, 5);
        assert_eq!(view.summary.death_count, 2);
        assert_eq!(view.summary.xp_lost_total, 200 + 300);
        assert_eq!(view.summary.xp_gained, 1_700);
        assert_eq!(view.summary.max_depth, Some(15));
        assert_eq!(view.summary.latest_xp, Some(2_700));
        assert_eq!(view.series.rates.len(), 4);
    }

    #[test]
    fn window_keeps_deaths_on_windowed_timestamps_only() {
        // Window of 700 s keeps t = 1800, 2400; the death at 1200 falls outside,
        // the death at 2400 (pre-death snapshot at 1800) stays.
        let derived = derive(&history().history, 700, 600);
        assert_eq!(derived.xp.len(), 2);
        assert_eq!(derived.deaths.len(), 1);
        assert_eq!(derived.deaths[0].timestamp, 2_400);
    }

    #[test]
    fn death_whose_predecessor_is_outside_window_still_counts() {
        // Window of 500 s keeps only t = 2400; its death compares against 1800.
        let derived = derive(&history().history, 500, 600);
        assert_eq!(derived.xp.len(), 1);
        assert_eq!(derived.deaths.len(), 1);
        assert!(derived.rates.is_empty());
    }

    #[test]
    fn empty_history_degrades_to_defaults() {
        let view = detail_view(&CharacterHistory::default(), 3600, 3600);
        assert_eq!(view.summary, DetailSummary::default());
        assert!(view.series.xp.is_empty());
        assert!(!view.series.has_depth());
    }
}
