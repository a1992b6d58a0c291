//! Runtime configuration: where the data lives, how often to refresh and
//! where preferences are stored.

use tracing::warn;

pub const DEFAULT_REFRESH_SECS: u64 = 300;
pub const MIN_REFRESH_SECS: u64 = 30;
pub const VIEW_STATE_KEY: &str = "ladderwatch.view_state.v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL (web) or directory (desktop) holding `current_ladder.json`,
    /// `metadata.json` and `players/`.
    pub data_location: String,
    pub refresh_interval_secs: u64,
    pub storage_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_location: "data".to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            storage_key: VIEW_STATE_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, with `LADDERWATCH_DATA_DIR` / `LADDERWATCH_REFRESH_SECS`
    /// overrides on desktop. The web build reads data relative to the page.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("LADDERWATCH_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_location = dir;
        }

        if let Some(raw) = lookup("LADDERWATCH_REFRESH_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.refresh_interval_secs = secs.max(MIN_REFRESH_SECS),
                Err(err) => warn!(value = %raw, error = %err, "ignoring LADDERWATCH_REFRESH_SECS"),
            }
        }

        config
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_secs.saturating_mul(1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_apply_and_refresh_is_clamped() {
        let config = AppConfig::from_lookup(|key| match key {
            "LADDERWATCH_DATA_DIR" => Some("/srv/ladder".into()),
            "LADDERWATCH_REFRESH_SECS" => Some("5".into()),
            _ => None,
        });
        assert_eq!(config.data_location, "/srv/ladder");
        assert_eq!(config.refresh_interval_secs, MIN_REFRESH_SECS);
    }

    #[test]
    fn bad_refresh_value_keeps_default() {
        let config = AppConfig::from_lookup(|key| {
            (key == "LADDERWATCH_REFRESH_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config, AppConfig::default());
    }
}
