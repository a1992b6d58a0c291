//! Formatting helpers for presenting ladder metrics.

use time::{macros::format_description, OffsetDateTime};

/// Placeholder for values that don't exist yet.
pub const MISSING: &str = "—";

/// Compact experience figure: `4.12B`, `350.2M`, `12.3K`, `950`.
pub fn format_xp(value: u64) -> String {
    format_compact(value as f64)
}

/// Experience per hour, e.g. `35.2M/h`.
pub fn format_rate(per_hour: f64) -> String {
    if !per_hour.is_finite() {
        return MISSING.to_string();
    }
    format!("{}/h", format_compact(per_hour.max(0.0)))
}

fn format_compact(value: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];
    for (scale, suffix) in UNITS {
        if value.abs() >= scale {
            let scaled = value / scale;
            return if scaled.abs() >= 100.0 {
                format!("{scaled:.1}{suffix}")
            } else {
                format!("{scaled:.2}{suffix}")
            };
        }
    }
    format!("{value:.0}")
}

/// Rank movement: `▲3` climbed, `▼2` dropped, `0` steady, `—` untracked.
pub fn format_rank_change(change: Option<i64>) -> String {
    match change {
        None => MISSING.to_string(),
        Some(0) => "0".to_string(),
        Some(delta) if delta > 0 => format!("▲{delta}"),
        Some(delta) => format!("▼{}", delta.unsigned_abs()),
    }
}

/// CSS modifier for a rank change badge.
pub fn rank_change_class(change: Option<i64>) -> &'static str {
    match change {
        Some(delta) if delta > 0 => "rank-change--up",
        Some(delta) if delta < 0 => "rank-change--down",
        Some(_) => "rank-change--flat",
        None => "rank-change--none",
    }
}

pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.1}%")
    } else {
        MISSING.to_string()
    }
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if value.is_finite() {
        format!("{value:.decimals$}")
    } else {
        MISSING.to_string()
    }
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// `2025-02-16 16:13Z` style timestamp.
pub fn format_timestamp(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|ts| {
            ts.format(&format_description!(
                "[year]-[month]-[day] [hour]:[minute]Z"
            ))
            .ok()
        })
        .unwrap_or_else(|| MISSING.to_string())
}

/// Short axis label, `Feb 16 16:13`.
pub fn format_axis_time(unix: i64) -> String {
    OffsetDateTime::from_unix_timestamp(unix)
        .ok()
        .and_then(|ts| {
            ts.format(&format_description!(
                "[month repr:short] [day padding:none] [hour]:[minute]"
            ))
            .ok()
        })
        .unwrap_or_else(|| MISSING.to_string())
}

/// Interval/window length: `10m`, `4h`, `3d`, `All` for 0.
pub fn format_span(secs: u64) -> String {
    match secs {
        0 => "All".to_string(),
        s if s % 86_400 == 0 => format!("{}d", s / 86_400),
        s if s % 3_600 == 0 => format!("{}h", s / 3_600),
        s if s % 60 == 0 => format!("{}m", s / 60),
        s => format!("{s}s"),
    }
}
