//! Raw per-character snapshot history as written by the ingestion job.

use serde::{Deserialize, Serialize};

/// One observation of a character. `t` is seconds since the epoch, `x` the
/// total experience and `d` the delve depth when the character has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub t: i64,
    pub x: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<u64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dead: bool,
}

impl Snapshot {
    pub fn new(t: i64, x: u64) -> Self {
        Self {
            t,
            x,
            d: None,
            dead: false,
        }
    }

    pub fn with_depth(t: i64, x: u64, d: u64) -> Self {
        Self {
            t,
            x,
            d: Some(d),
            dead: false,
        }
    }
}

/// Contents of one `players/<file>.json` history file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterHistory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub history: Vec<Snapshot>,
}

impl CharacterHistory {
    pub fn latest(&self) -> Option<&Snapshot> {
        self.history.last()
    }
}

/// A single (time, value) pair handed to the chart layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub t: i64,
    pub y: f64,
}

/// Experience over time.
pub fn xp_points(series: &[Snapshot]) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|snap| ChartPoint {
            t: snap.t,
            y: snap.x as f64,
        })
        .collect()
}

/// Depth over time; snapshots without depth are skipped, not zero-filled.
pub fn depth_points(series: &[Snapshot]) -> Vec<ChartPoint> {
    series
        .iter()
        .filter_map(|snap| {
            snap.d.map(|depth| ChartPoint {
                t: snap.t,
                y: depth as f64,
            })
        })
        .collect()
}

pub fn has_depth(series: &[Snapshot]) -> bool {
    series.iter().any(|snap| snap.d.is_some())
}

/// Ingestion only appends, so a well-formed series is strictly increasing in `t`.
pub fn is_time_ordered(series: &[Snapshot]) -> bool {
    series.windows(2).all(|pair| pair[0].t < pair[1].t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_ingestion_file_with_optional_fields() {
        let raw = r#"{"name":"TankModeOn","class":"Juggernaut","account":"IronWall#6666",
            "history":[{"t":10,"x":5},{"t":20,"x":9,"d":550},{"t":30,"x":4,"dead":true}]}"#;
        let parsed: CharacterHistory = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.history.len(), 3);
        assert_eq!(parsed.history[0].d, None);
        assert_eq!(parsed.history[1].d, Some(550));
        assert!(parsed.history[2].dead);
        assert!(is_time_ordered(&parsed.history));
    }

    #[test]
    fn depth_points_skip_missing_depth() {
        let series = vec![
            Snapshot::new(0, 1),
            Snapshot::with_depth(10, 2, 40),
            Snapshot::new(20, 3),
        ];
        let depth = depth_points(&series);
        assert_eq!(depth, vec![ChartPoint { t: 10, y: 40.0 }]);
        assert!(has_depth(&series));
        assert!(!has_depth(&series[..1]));
    }
}
