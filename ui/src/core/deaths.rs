//! Death detection: any drop in experience between adjacent snapshots.

use super::series::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEvent {
    /// Index of the post-death snapshot within the scanned series.
    pub at_index: usize,
    pub timestamp: i64,
    pub xp_before: u64,
    pub xp_after: u64,
    pub xp_lost: u64,
    pub percent_lost: f64,
}

/// Scan `series` once and report every strict decrease in experience.
///
/// Ingestion only persists a snapshot when something changed, so every
/// adjacent pair is a distinct observation; no threshold is applied.
pub fn deaths(series: &[Snapshot]) -> Vec<DeathEvent> {
    series
        .windows(2)
        .enumerate()
        .filter_map(|(offset, pair)| {
            let (before, after) = (pair[0], pair[1]);
            if after.x >= before.x {
                return None;
            }
            let xp_lost = before.x - after.x;
            let percent_lost = if before.x == 0 {
                0.0
            } else {
                xp_lost as f64 / before.x as f64 * 100.0
            };
            Some(DeathEvent {
                at_index: offset + 1,
                timestamp: after.t,
                xp_before: before.x,
                xp_after: after.x,
                xp_lost,
                percent_lost,
            })
        })
        .collect()
}

/// Total experience lost across `events`.
pub fn total_lost(events: &[DeathEvent]) -> u64 {
    events
        .iter()
        .fold(0u64, |acc, event| acc.saturating_add(event.xp_lost))
}
