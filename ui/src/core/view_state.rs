//! The persisted record of everything the viewer has chosen, and the actions
//! that change it.
//!
//! Decoding is deliberately per field: a blob written by an older build, or
//! one with a single mangled value, still restores every field it can and
//! falls back to the default for the rest.

use std::collections::BTreeSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::ladder::{Column, IntervalLabel, SortDirection, SortKey};

pub const DEFAULT_RATE_INTERVAL_SECS: u64 = 3_600;

/// Comparison needs at least this many selected characters to activate.
pub const MIN_COMPARE: usize = 2;

/// Choices offered for the detail/comparison rate interval.
pub const RATE_INTERVAL_CHOICES: [(u64, &str); 6] = [
    (600, "10m"),
    (1_800, "30m"),
    (3_600, "1h"),
    (14_400, "4h"),
    (43_200, "12h"),
    (86_400, "1d"),
];

/// Choices offered for the trailing time window; 0 is "all time".
pub const TIME_WINDOW_CHOICES: [(u64, &str); 7] = [
    (0, "All"),
    (3_600, "1h"),
    (21_600, "6h"),
    (43_200, "12h"),
    (86_400, "1d"),
    (259_200, "3d"),
    (604_800, "7d"),
];

/// Relative sizes of the resizable panes, each a fraction in `[0.2, 0.8]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRatios {
    /// Ladder table width relative to the side panel.
    pub table: f32,
    /// XP chart height relative to the rate chart.
    pub charts: f32,
}

impl LayoutRatios {
    const MIN: f32 = 0.2;
    const MAX: f32 = 0.8;

    fn sanitized(self) -> Self {
        let defaults = Self::default();
        let fix = |value: f32, fallback: f32| {
            if value.is_finite() {
                value.clamp(Self::MIN, Self::MAX)
            } else {
                fallback
            }
        };
        Self {
            table: fix(self.table, defaults.table),
            charts: fix(self.charts, defaults.charts),
        }
    }
}

impl Default for LayoutRatios {
    fn default() -> Self {
        Self {
            table: 0.6,
            charts: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub ladder_interval: IntervalLabel,
    pub selected: Option<String>,
    /// Ordered; position drives comparison colors.
    pub compare: Vec<String>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    pub search: String,
    pub class_filter: Option<String>,
    pub rate_interval_secs: u64,
    /// 0 means all time.
    pub time_window_secs: u64,
    pub hidden_columns: BTreeSet<Column>,
    pub layout: LayoutRatios,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            ladder_interval: IntervalLabel::default(),
            selected: None,
            compare: Vec::new(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            search: String::new(),
            class_filter: None,
            rate_interval_secs: DEFAULT_RATE_INTERVAL_SECS,
            time_window_secs: 0,
            hidden_columns: BTreeSet::new(),
            layout: LayoutRatios::default(),
        }
    }
}

impl ViewState {
    /// Restore from a persisted blob, field by field. Never fails.
    pub fn from_json(raw: &str) -> Self {
        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(err) => {
                debug!(error = %err, "persisted view state unreadable; using defaults");
                return Self::default();
            }
        };
        let Some(fields) = value.as_object() else {
            debug!("persisted view state is not an object; using defaults");
            return Self::default();
        };

        let defaults = Self::default();
        Self {
            ladder_interval: field(fields, "ladder_interval").unwrap_or(defaults.ladder_interval),
            selected: field(fields, "selected").unwrap_or(defaults.selected),
            compare: field(fields, "compare").unwrap_or(defaults.compare),
            sort_key: field(fields, "sort_key").unwrap_or(defaults.sort_key),
            sort_direction: field(fields, "sort_direction").unwrap_or(defaults.sort_direction),
            search: field(fields, "search").unwrap_or(defaults.search),
            class_filter: field(fields, "class_filter").unwrap_or(defaults.class_filter),
            rate_interval_secs: field(fields, "rate_interval_secs")
                .unwrap_or(defaults.rate_interval_secs),
            time_window_secs: field(fields, "time_window_secs")
                .unwrap_or(defaults.time_window_secs),
            hidden_columns: field(fields, "hidden_columns").unwrap_or(defaults.hidden_columns),
            layout: layout_field(fields, defaults.layout),
        }
        .sanitized()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Repair values that decode fine but make no sense.
    fn sanitized(mut self) -> Self {
        if self.rate_interval_secs == 0 {
            self.rate_interval_secs = DEFAULT_RATE_INTERVAL_SECS;
        }
        let mut seen = BTreeSet::new();
        self.compare.retain(|name| seen.insert(name.clone()));
        if self.selected.as_deref().is_some_and(|name| name.is_empty()) {
            self.selected = None;
        }
        if self.class_filter.as_deref().is_some_and(|class| class.trim().is_empty()) {
            self.class_filter = None;
        }
        self.layout = self.layout.sanitized();
        self
    }

    pub fn comparison_active(&self) -> bool {
        self.compare.len() >= MIN_COMPARE
    }

    pub fn is_compared(&self, name: &str) -> bool {
        self.compare.iter().any(|n| n == name)
    }

    pub fn is_hidden(&self, column: Column) -> bool {
        self.hidden_columns.contains(&column)
    }

    pub fn window_secs(&self) -> i64 {
        i64::try_from(self.time_window_secs).unwrap_or(i64::MAX)
    }

    pub fn interval_secs(&self) -> i64 {
        i64::try_from(self.rate_interval_secs).unwrap_or(i64::MAX)
    }
}

/// Each ratio falls back on its own, so one bad value keeps the other.
fn layout_field(fields: &Map<String, Value>, defaults: LayoutRatios) -> LayoutRatios {
    let Some(layout) = fields.get("layout").and_then(Value::as_object) else {
        if fields.contains_key("layout") {
            debug!("ignoring malformed persisted layout");
        }
        return defaults;
    };
    LayoutRatios {
        table: field(layout, "table").unwrap_or(defaults.table),
        charts: field(layout, "charts").unwrap_or(defaults.charts),
    }
}

fn field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key)?.clone();
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            debug!(field = key, error = %err, "ignoring malformed persisted field");
            None
        }
    }
}

/// Every way the viewer can change the view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    SetLadderInterval(IntervalLabel),
    SetRateInterval(u64),
    SetTimeWindow(u64),
    /// Pick a sort column; picking the active one flips its direction.
    SortBy(SortKey),
    SetSearch(String),
    SetClassFilter(Option<String>),
    Select(Option<String>),
    ToggleCompare(String),
    ClearCompare,
    ToggleColumn(Column),
    SetLayout(LayoutRatios),
}

/// Which derived views an action invalidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Invalidation {
    pub rows: bool,
    pub detail: bool,
    pub comparison: bool,
}

impl ViewState {
    /// Apply `action` in place and report what needs re-deriving. Pure; the
    /// session decides what to fetch and persists the result.
    pub fn apply(&mut self, action: ViewAction) -> Invalidation {
        match action {
            ViewAction::SetLadderInterval(label) => {
                self.ladder_interval = label;
                Invalidation {
                    rows: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::SetRateInterval(secs) => {
                self.rate_interval_secs = if secs == 0 {
                    DEFAULT_RATE_INTERVAL_SECS
                } else {
                    secs
                };
                Invalidation {
                    detail: true,
                    comparison: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::SetTimeWindow(secs) => {
                self.time_window_secs = secs;
                Invalidation {
                    detail: true,
                    comparison: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::SortBy(key) => {
                if self.sort_key == key {
                    self.sort_direction = self.sort_direction.flipped();
                } else {
                    self.sort_key = key;
                    self.sort_direction = key.default_direction();
                }
                Invalidation {
                    rows: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::SetSearch(text) => {
                self.search = text;
                Invalidation {
                    rows: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::SetClassFilter(class) => {
                self.class_filter = class.filter(|c| !c.trim().is_empty());
                Invalidation {
                    rows: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::Select(name) => {
                self.selected = name.filter(|n| !n.is_empty());
                Invalidation {
                    detail: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::ToggleCompare(name) => {
                if let Some(index) = self.compare.iter().position(|n| *n == name) {
                    self.compare.remove(index);
                } else {
                    self.compare.push(name);
                }
                Invalidation {
                    comparison: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::ClearCompare => {
                self.compare.clear();
                Invalidation {
                    comparison: true,
                    ..Invalidation::default()
                }
            }
            ViewAction::ToggleColumn(column) => {
                if !self.hidden_columns.remove(&column) {
                    self.hidden_columns.insert(column);
                }
                Invalidation::default()
            }
            ViewAction::SetLayout(layout) => {
                self.layout = layout.sanitized();
                Invalidation::default()
            }
        }
    }
}
