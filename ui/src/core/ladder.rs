//! Current standings as published by ingestion, plus the table sort/filter
//! logic that reads its precomputed per-interval annotations.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical look-back labels ingestion annotates every ladder row with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntervalLabel {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "12h")]
    TwelveHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
}

impl IntervalLabel {
    pub const ALL: [IntervalLabel; 5] = [
        IntervalLabel::OneHour,
        IntervalLabel::FourHours,
        IntervalLabel::TwelveHours,
        IntervalLabel::OneDay,
        IntervalLabel::ThreeDays,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::TwelveHours => "12h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
        }
    }

    pub fn seconds(self) -> i64 {
        match self {
            Self::OneHour => 3_600,
            Self::FourHours => 14_400,
            Self::TwelveHours => 43_200,
            Self::OneDay => 86_400,
            Self::ThreeDays => 259_200,
        }
    }
}

impl Default for IntervalLabel {
    fn default() -> Self {
        Self::OneHour
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalLabel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|label| label.as_str() == raw.trim())
            .ok_or_else(|| format!("unknown interval label `{raw}`"))
    }
}

/// One row of `current_ladder.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LadderEntry {
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub twitch: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub experience: u64,
    #[serde(default)]
    pub depth: Option<u64>,
    #[serde(default)]
    pub depth_solo: Option<u64>,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub challenges: u32,
    #[serde(default)]
    pub challenges_max: u32,
    /// Experience per hour keyed by interval label.
    #[serde(default)]
    pub xp_rates: BTreeMap<String, i64>,
    /// Rank delta keyed by interval label; positive means the character climbed.
    /// `None` marks a character that wasn't tracked at that point.
    #[serde(default)]
    pub rank_changes: BTreeMap<String, Option<i64>>,
}

impl LadderEntry {
    /// Rate for `label`, 0 when ingestion had too little history to annotate it.
    pub fn xp_rate(&self, label: IntervalLabel) -> i64 {
        self.xp_rates.get(label.as_str()).copied().unwrap_or(0)
    }

    pub fn rank_change(&self, label: IntervalLabel) -> Option<i64> {
        self.rank_changes.get(label.as_str()).copied().flatten()
    }
}

/// Contents of `metadata.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub total_players: u32,
    #[serde(default)]
    pub players_updated: u32,
    #[serde(default)]
    pub class_distribution: Option<BTreeMap<String, i64>>,
}

/// Sortable ladder columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Rank,
    Name,
    Class,
    Account,
    Level,
    Experience,
    XpRate,
    RankChange,
    Depth,
    Challenges,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rank => "Rank",
            Self::Name => "Character",
            Self::Class => "Class",
            Self::Account => "Account",
            Self::Level => "Level",
            Self::Experience => "Experience",
            Self::XpRate => "XP/h",
            Self::RankChange => "Δ Rank",
            Self::Depth => "Depth",
            Self::Challenges => "Challenges",
        }
    }

    /// Direction applied when a column is first picked: text and rank read
    /// naturally ascending, everything else is "bigger is better".
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Rank | Self::Name | Self::Class | Self::Account => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self::Rank
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        Self::Ascending
    }
}

/// Ladder table columns that can be hidden. Sort keys map onto these, plus the
/// purely informational twitch column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Rank,
    Name,
    Class,
    Account,
    Level,
    Experience,
    XpRate,
    RankChange,
    Depth,
    Challenges,
    Twitch,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Rank,
        Column::Name,
        Column::Class,
        Column::Account,
        Column::Level,
        Column::Experience,
        Column::XpRate,
        Column::RankChange,
        Column::Depth,
        Column::Challenges,
        Column::Twitch,
    ];

    pub fn label(self) -> &'static str {
        match self.sort_key() {
            Some(key) => key.label(),
            None => "Twitch",
        }
    }

    pub fn sort_key(self) -> Option<SortKey> {
        match self {
            Self::Rank => Some(SortKey::Rank),
            Self::Name => Some(SortKey::Name),
            Self::Class => Some(SortKey::Class),
            Self::Account => Some(SortKey::Account),
            Self::Level => Some(SortKey::Level),
            Self::Experience => Some(SortKey::Experience),
            Self::XpRate => Some(SortKey::XpRate),
            Self::RankChange => Some(SortKey::RankChange),
            Self::Depth => Some(SortKey::Depth),
            Self::Challenges => Some(SortKey::Challenges),
            Self::Twitch => None,
        }
    }
}

enum SortValue<'a> {
    Number(i64),
    Text(&'a str),
}

fn sort_value(entry: &LadderEntry, key: SortKey, label: IntervalLabel) -> Option<SortValue<'_>> {
    match key {
        SortKey::Rank => entry.rank.map(|rank| SortValue::Number(i64::from(rank))),
        SortKey::Name => Some(SortValue::Text(&entry.name)),
        SortKey::Class => Some(SortValue::Text(&entry.class)),
        SortKey::Account => Some(SortValue::Text(&entry.account)),
        SortKey::Level => Some(SortValue::Number(i64::from(entry.level))),
        SortKey::Experience => Some(SortValue::Number(
            i64::try_from(entry.experience).unwrap_or(i64::MAX),
        )),
        SortKey::XpRate => entry
            .xp_rates
            .get(label.as_str())
            .copied()
            .map(SortValue::Number),
        SortKey::RankChange => entry.rank_change(label).map(SortValue::Number),
        SortKey::Depth => entry
            .depth
            .map(|depth| SortValue::Number(i64::try_from(depth).unwrap_or(i64::MAX))),
        SortKey::Challenges => Some(SortValue::Number(i64::from(entry.challenges))),
    }
}

fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
        (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
    }
}

/// Order two rows by `key`. Missing values always land after present ones,
/// whichever way the column is sorted.
pub fn compare_entries(
    a: &LadderEntry,
    b: &LadderEntry,
    key: SortKey,
    direction: SortDirection,
    label: IntervalLabel,
) -> Ordering {
    match (sort_value(a, key, label), sort_value(b, key, label)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let cmp = compare_values(&a, &b);
            match direction {
                SortDirection::Ascending => cmp,
                SortDirection::Descending => cmp.reverse(),
            }
        }
    }
}

/// Stable sort so ties keep their ladder order.
pub fn sort_entries(
    entries: &mut [LadderEntry],
    key: SortKey,
    direction: SortDirection,
    label: IntervalLabel,
) {
    entries.sort_by(|a, b| compare_entries(a, b, key, direction, label));
}

/// Free-text search over name/account plus an optional exact class match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LadderFilter<'a> {
    pub search: &'a str,
    pub class: Option<&'a str>,
}

impl LadderFilter<'_> {
    pub fn matches(&self, entry: &LadderEntry) -> bool {
        if let Some(class) = self.class.map(str::trim).filter(|c| !c.is_empty()) {
            if !entry.class.eq_ignore_ascii_case(class) {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        entry.name.to_lowercase().contains(&needle)
            || entry.account.to_lowercase().contains(&needle)
    }
}

/// Filter then sort a copy of the standings for display.
pub fn visible_rows(
    entries: &[LadderEntry],
    filter: &LadderFilter<'_>,
    key: SortKey,
    direction: SortDirection,
    label: IntervalLabel,
) -> Vec<LadderEntry> {
    let mut rows: Vec<LadderEntry> = entries
        .iter()
        .filter(|entry| filter.matches(entry))
        .cloned()
        .collect();
    sort_entries(&mut rows, key, direction, label);
    rows
}

/// Distinct classes present in the standings, alphabetical.
pub fn classes(entries: &[LadderEntry]) -> Vec<String> {
    let mut seen: Vec<String> = entries
        .iter()
        .map(|entry| entry.class.clone())
        .filter(|class| !class.is_empty())
        .collect();
    seen.sort_by_key(|class| class.to_lowercase());
    seen.dedup();
    seen
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassShare {
    pub class: String,
    pub weight: i64,
    pub percent: f64,
}

/// Weighted class popularity. Prefers the map ingestion publishes; falls back
/// to the same rank weighting (`N + 1 - rank`) computed from the standings.
pub fn class_shares(metadata: Option<&Metadata>, entries: &[LadderEntry]) -> Vec<ClassShare> {
    let weights: BTreeMap<String, i64> =
        match metadata.and_then(|meta| meta.class_distribution.clone()) {
            Some(map) if !map.is_empty() => map,
            _ => {
                let total = entries.len() as i64;
                let mut map = BTreeMap::new();
                for entry in entries {
                    let rank = entry.rank.map(i64::from).unwrap_or(total + 1);
                    let weight = (total + 1 - rank).max(0);
                    let class = if entry.class.is_empty() {
                        "Unknown".to_string()
                    } else {
                        entry.class.clone()
                    };
                    *map.entry(class).or_insert(0) += weight;
                }
                map
            }
        };

    let total: i64 = weights.values().copied().filter(|w| *w > 0).sum();
    let mut shares: Vec<ClassShare> = weights
        .into_iter()
        .map(|(class, weight)| {
            let percent = if total > 0 {
                weight.max(0) as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            ClassShare {
                class,
                weight,
                percent,
            }
        })
        .collect();
    shares.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.class.cmp(&b.class)));
    shares
}
