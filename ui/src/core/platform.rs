//! Per-target wiring: which data source and preference store a build uses.

use super::config::AppConfig;
use super::storage::PreferenceStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }
}

/// The data source for this build.
#[cfg(target_arch = "wasm32")]
pub type AppSource = super::source::HttpSource;

/// The data source for this build.
#[cfg(not(target_arch = "wasm32"))]
pub type AppSource = super::source::DirSource;

pub fn default_source(config: &AppConfig) -> AppSource {
    AppSource::new(config.data_location.clone())
}

/// `localStorage` on the web, the config directory on desktop. Falls back to
/// an in-memory store so the viewer still works without persistence.
pub fn default_store() -> Box<dyn PreferenceStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(super::storage::LocalStore)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match super::storage::FileStore::in_config_dir() {
            Ok(store) => Box::new(store),
            Err(err) => {
                tracing::warn!(error = %err, "preferences won't be saved this session");
                Box::new(super::storage::MemoryStore::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn desktop_reads_from_the_configured_directory() {
        let config = AppConfig {
            data_location: "/srv/ladder".into(),
            ..AppConfig::default()
        };
        assert_eq!(Platform::current(), Platform::Desktop);
        assert_eq!(
            default_source(&config).root(),
            std::path::Path::new("/srv/ladder")
        );
    }
}
