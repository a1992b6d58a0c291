//! Multi-character overlays: one shared window and rate interval applied to
//! every successfully fetched history, colored by requested position.

use std::collections::HashMap;

use tracing::debug;

use super::analysis::{self, DerivedSeries};
use super::error::FetchError;
use super::series::{ChartPoint, CharacterHistory};

/// Line colors, assigned by position in the requested selection.
pub const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

pub fn color_for_position(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// One character's contribution to the overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedCharacter {
    pub name: String,
    pub class: String,
    /// Position in the requested selection; drives the color.
    pub position: usize,
    pub color: &'static str,
    pub series: DerivedSeries,
}

/// A chart-ready line or marker set.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub color: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub members: Vec<ComparedCharacter>,
}

impl Comparison {
    /// No requested character could be fetched.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn xp_datasets(&self) -> Vec<Dataset> {
        self.members
            .iter()
            .map(|member| Dataset {
                label: member.name.clone(),
                color: member.color,
                points: member.series.xp.clone(),
            })
            .collect()
    }

    /// Death markers plotted on the XP chart. Characters without deaths in
    /// range contribute nothing.
    pub fn death_datasets(&self) -> Vec<Dataset> {
        self.members
            .iter()
            .filter(|member| !member.series.deaths.is_empty())
            .map(|member| Dataset {
                label: format!("{} deaths", member.name),
                color: member.color,
                points: member
                    .series
                    .deaths
                    .iter()
                    .map(|event| ChartPoint {
                        t: event.timestamp,
                        y: event.xp_after as f64,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Each character keeps its own timestamps; there is no common x axis.
    pub fn rate_datasets(&self) -> Vec<Dataset> {
        self.members
            .iter()
            .map(|member| Dataset {
                label: member.name.clone(),
                color: member.color,
                points: member
                    .series
                    .rates
                    .iter()
                    .map(|point| ChartPoint {
                        t: point.t,
                        y: point.rate_per_hour,
                    })
                    .collect(),
            })
            .collect()
    }

    /// `None` unless at least one character has depth data; characters
    /// without depth are left out rather than padded.
    pub fn depth_datasets(&self) -> Option<Vec<Dataset>> {
        let datasets: Vec<Dataset> = self
            .members
            .iter()
            .filter(|member| member.series.has_depth())
            .map(|member| Dataset {
                label: member.name.clone(),
                color: member.color,
                points: member.series.depth.clone(),
            })
            .collect();
        (!datasets.is_empty()).then_some(datasets)
    }
}

/// Assemble the comparison for `requested`, looking each name up in the
/// already fetched histories. Names without a history are skipped; the
/// survivors keep the color of their requested position.
pub fn compare(
    requested: &[String],
    histories: &HashMap<String, CharacterHistory>,
    window_secs: i64,
    interval_secs: i64,
) -> Comparison {
    let members = requested
        .iter()
        .enumerate()
        .filter_map(|(position, name)| {
            let history = histories.get(name)?;
            Some(ComparedCharacter {
                name: name.clone(),
                class: history.class.clone(),
                position,
                color: color_for_position(position),
                series: analysis::derive(&history.history, window_secs, interval_secs),
            })
        })
        .collect();

    Comparison { members }
}

/// Keep the successful results of a settle-all fan-out, logging the rest.
pub fn settled_successes(
    results: Vec<(String, Result<CharacterHistory, FetchError>)>,
) -> HashMap<String, CharacterHistory> {
    results
        .into_iter()
        .filter_map(|(name, result)| match result {
            Ok(history) => Some((name, history)),
            Err(err) => {
                debug!(character = %name, error = %err, "dropping character from comparison");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::Snapshot;

    fn history(name: &str, depth: bool) -> CharacterHistory {
        let history = (0..4)
            .map(|i| {
                let t = i * 600;
                let x = 1_000 + (i as u64) * 500;
                if depth {
                    Snapshot::with_depth(t, x, 100 + i as u64)
                } else {
                    Snapshot::new(t, x)
                }
            })
            .collect();
        CharacterHistory {
            name: name.into(),
            class: "Slayer".into(),
            account: String::new(),
            history,
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn colors_follow_requested_order() {
        let requested = names(&["a", "b", "c"]);
        let histories = HashMap::from([
            ("c".to_string(), history("c", false)),
            ("a".to_string(), history("a", false)),
        ]);
        let cmp = compare(&requested, &histories, 0, 600);
        let positions: Vec<usize> = cmp.members.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![0, 2]);
        assert_eq!(cmp.members[0].color, PALETTE[0]);
        assert_eq!(cmp.members[1].color, PALETTE[2]);
    }

    #[test]
    fn recomputing_keeps_colors() {
        let requested = names(&["x", "y"]);
        let histories = HashMap::from([
            ("x".to_string(), history("x", false)),
            ("y".to_string(), history("y", false)),
        ]);
        let wide = compare(&requested, &histories, 0, 600);
        let narrow = compare(&requested, &histories, 900, 1_200);
        let colors = |c: &Comparison| c.members.iter().map(|m| m.color).collect::<Vec<_>>();
        assert_eq!(colors(&wide), colors(&narrow));
        assert_ne!(wide.members[0].series, narrow.members[0].series);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for_position(PALETTE.len()), PALETTE[0]);
        assert_eq!(color_for_position(PALETTE.len() + 3), PALETTE[3]);
    }

    #[test]
    fn depth_overlay_only_when_someone_has_depth() {
        let requested = names(&["deep", "flat"]);
        let without = HashMap::from([
            ("deep".to_string(), history("deep", false)),
            ("flat".to_string(), history("flat", false)),
        ]);
        assert!(compare(&requested, &without, 0, 600)
            .depth_datasets()
            .is_none());

        let with = HashMap::from([
            ("deep".to_string(), history("deep", true)),
            ("flat".to_string(), history("flat", false)),
        ]);
        let depth = compare(&requested, &with, 0, 600)
            .depth_datasets()
            .unwrap();
        assert_eq!(depth.len(), 1);
        assert_eq!(depth[0].label, "deep");
    }

    #[test]
    fn nothing_fetched_is_an_empty_comparison() {
        let cmp = compare(&names(&["a", "b"]), &HashMap::new(), 0, 600);
        assert!(cmp.is_empty());
        assert!(cmp.xp_datasets().is_empty());
    }

    #[test]
    fn failures_are_filtered_out() {
        let results = vec![
            ("a".to_string(), Ok(history("a", false))),
            ("b".to_string(), Err(FetchError::Unavailable("test source"))),
        ];
        let kept = settled_successes(results);
        assert_eq!(kept.len(), 1);
        assert!(kept.contains_key("a"));
    }
}
