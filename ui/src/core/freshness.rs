//! Data freshness for the ladder header.
//!
//! Ingestion runs on its own schedule; the viewer only knows the
//! `last_updated` stamp from `metadata.json`. We surface how old that is and
//! flag it once it's clearly overdue, so a stalled ingestion job is visible
//! instead of silently showing stale rates.
//!
//! Policy
//! ------
//! - Data older than [`STALE_AFTER_SECS`] (2 h) is flagged stale.
//! - The next local refresh happens `refresh_interval_secs` after the last
//!   successful fetch, regardless of staleness.

/// Age beyond which the ladder is considered stale.
pub const STALE_AFTER_SECS: i64 = 2 * 3_600;

#[derive(Debug, Clone, PartialEq)]
pub struct Freshness {
    pub last_updated: Option<i64>,
    pub age_secs: Option<i64>,
    pub stale: bool,
}

impl Freshness {
    /// Short label for a badge.
    pub fn status_label(&self) -> &'static str {
        match (self.last_updated, self.stale) {
            (None, _) => "Unknown",
            (Some(_), true) => "Stale",
            (Some(_), false) => "Live",
        }
    }

    /// `Updated 12m ago` or a fallback sentence.
    pub fn detail_message(&self) -> String {
        match self.age_secs {
            None => "Update time unknown.".to_string(),
            Some(age) => format!("Updated {} ago", human_elapsed(age)),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match (self.last_updated, self.stale) {
            (None, _) => "freshness--unknown",
            (Some(_), true) => "freshness--stale",
            (Some(_), false) => "freshness--live",
        }
    }
}

/// Evaluate how old `last_updated` is at `now` (both unix seconds).
pub fn evaluate(last_updated: Option<i64>, now: i64) -> Freshness {
    let age_secs = last_updated.map(|ts| (now - ts).max(0));
    Freshness {
        last_updated,
        age_secs,
        stale: age_secs.is_some_and(|age| age > STALE_AFTER_SECS),
    }
}

/// When the next background refresh is due, given the last successful fetch.
pub fn next_refresh_at(last_fetch: i64, refresh_interval_secs: u64) -> i64 {
    last_fetch.saturating_add(i64::try_from(refresh_interval_secs).unwrap_or(i64::MAX))
}

/// Compact elapsed-time phrase:
/// - < 1 min -> "<1m"
/// - < 1 h -> "Xm"
/// - < 48 h -> "Xh"
/// - otherwise -> "Xd Yh"
pub fn human_elapsed(secs: i64) -> String {
    if secs < 60 {
        return "<1m".into();
    }
    if secs < 3_600 {
        return format!("{}m", secs / 60);
    }
    if secs < 48 * 3_600 {
        return format!("{}h", secs / 3_600);
    }
    let days = secs / 86_400;
    let rem_hours = (secs % 86_400) / 3_600;
    if rem_hours == 0 {
        format!("{days}d")
    } else {
        format!("{days}d {rem_hours}h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_without_metadata() {
        let f = evaluate(None, 1_000);
        assert_eq!(f.status_label(), "Unknown");
        assert!(!f.stale);
    }

    #[test]
    fn recent_update_is_live() {
        let f = evaluate(Some(10_000), 10_000 + 12 * 60);
        assert!(!f.stale);
        assert_eq!(f.detail_message(), "Updated 12m ago");
    }

    #[test]
    fn old_update_is_stale() {
        let f = evaluate(Some(0), 3 * 86_400 + 4 * 3_600);
        assert!(f.stale);
        assert_eq!(f.css_class(), "freshness--stale");
        assert_eq!(f.detail_message(), "Updated 3d 4h ago");
    }

    #[test]
    fn next_refresh_follows_last_fetch() {
        assert_eq!(next_refresh_at(1_000, 300), 1_300);
        assert_eq!(next_refresh_at(i64::MAX - 5, 300), i64::MAX);
    }

    #[test]
    fn future_stamp_counts_as_now() {
        assert_eq!(evaluate(Some(500), 100).age_secs, Some(0));
    }
}
