//! Read-only access to the files ingestion publishes.
//!
//! Layout under the data root:
//! ```text
//! current_ladder.json      array of ladder rows
//! metadata.json            league label, last update, class weights
//! players/<stem>.json      one history per character (see `filename`)
//! ```

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::FetchError;
use super::filename::history_path;
use super::ladder::{LadderEntry, Metadata};
use super::series::CharacterHistory;

pub const STANDINGS_FILE: &str = "current_ladder.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Where ladder data comes from. Each read is attempted once; callers decide
/// how a failure degrades the view.
#[allow(async_fn_in_trait)]
pub trait LadderSource {
    async fn fetch_standings(&self) -> Result<Vec<LadderEntry>, FetchError>;
    async fn fetch_metadata(&self) -> Result<Metadata, FetchError>;
    async fn fetch_history(&self, name: &str) -> Result<CharacterHistory, FetchError>;
}

/// Standings and metadata fetched together; both settle before first render.
#[derive(Debug)]
pub struct StandingsLoad {
    pub standings: Result<Vec<LadderEntry>, FetchError>,
    pub metadata: Result<Metadata, FetchError>,
}

pub async fn load_standings<S: LadderSource>(source: &S) -> StandingsLoad {
    let (standings, metadata) =
        futures::join!(source.fetch_standings(), source.fetch_metadata());
    if let Err(err) = &standings {
        warn!(error = %err, "couldn't load standings");
    }
    if let Err(err) = &metadata {
        warn!(error = %err, "couldn't load metadata");
    }
    StandingsLoad {
        standings,
        metadata,
    }
}

/// Fetch every history concurrently and wait for all of them to settle.
/// Results keep the order of `names`; failures are returned, not raised.
pub async fn fetch_histories<S: LadderSource>(
    source: &S,
    names: &[String],
) -> Vec<(String, Result<CharacterHistory, FetchError>)> {
    join_all(names.iter().map(|name| async move {
        let result = source.fetch_history(name).await;
        if let Err(err) = &result {
            warn!(character = %name, error = %err, "history fetch failed");
        }
        (name.clone(), result)
    }))
    .await
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, FetchError> {
    Ok(serde_json::from_str(raw)?)
}

/// Fixed data held in memory; handy for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub standings: Vec<LadderEntry>,
    pub metadata: Metadata,
    pub histories: HashMap<String, CharacterHistory>,
    /// Names whose history fetch should fail.
    pub failing: HashSet<String>,
}

impl MemorySource {
    pub fn with_history(mut self, history: CharacterHistory) -> Self {
        self.histories.insert(history.name.clone(), history);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }
}

impl LadderSource for MemorySource {
    async fn fetch_standings(&self) -> Result<Vec<LadderEntry>, FetchError> {
        Ok(self.standings.clone())
    }

    async fn fetch_metadata(&self) -> Result<Metadata, FetchError> {
        Ok(self.metadata.clone())
    }

    async fn fetch_history(&self, name: &str) -> Result<CharacterHistory, FetchError> {
        if self.failing.contains(name) {
            return Err(FetchError::Unavailable("history"));
        }
        self.histories
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: history_path(name),
                status: 404,
            })
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::HttpSource;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use super::*;
    use crate::core::timing;

    /// Reads the data files over HTTP relative to `base_url`.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        base_url: String,
    }

    impl HttpSource {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
            }
        }

        fn url(&self, path: &str) -> String {
            // Bust intermediate caches; the files are rewritten in place.
            format!(
                "{}/{}?t={}",
                self.base_url.trim_end_matches('/'),
                path,
                timing::now_unix()
            )
        }

        async fn get_text(&self, path: &str) -> Result<String, FetchError> {
            let url = self.url(path);
            debug!(%url, "fetching");
            let window = web_sys::window().ok_or(FetchError::Unavailable("window"))?;
            let response = JsFuture::from(window.fetch_with_str(&url))
                .await
                .map_err(|err| FetchError::Network(format!("{err:?}")))?;
            let response: web_sys::Response = response
                .dyn_into()
                .map_err(|_| FetchError::Network("fetch returned a non-response".into()))?;
            if !response.ok() {
                return Err(FetchError::Status {
                    url,
                    status: response.status(),
                });
            }
            let body = response
                .text()
                .map_err(|err| FetchError::Network(format!("{err:?}")))?;
            JsFuture::from(body)
                .await
                .map_err(|err| FetchError::Network(format!("{err:?}")))?
                .as_string()
                .ok_or(FetchError::Unavailable("response body"))
        }
    }

    impl LadderSource for HttpSource {
        async fn fetch_standings(&self) -> Result<Vec<LadderEntry>, FetchError> {
            decode(&self.get_text(STANDINGS_FILE).await?)
        }

        async fn fetch_metadata(&self) -> Result<Metadata, FetchError> {
            decode(&self.get_text(METADATA_FILE).await?)
        }

        async fn fetch_history(&self, name: &str) -> Result<CharacterHistory, FetchError> {
            decode(&self.get_text(&history_path(name)).await?)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::DirSource;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use super::*;

    /// Reads the data files from a local directory.
    #[derive(Debug, Clone)]
    pub struct DirSource {
        root: PathBuf,
    }

    impl DirSource {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        async fn read(&self, relative: &str) -> Result<String, FetchError> {
            let path = self.root.join(relative);
            debug!(path = %path.display(), "reading");
            Ok(tokio::fs::read_to_string(&path).await?)
        }
    }

    impl LadderSource for DirSource {
        async fn fetch_standings(&self) -> Result<Vec<LadderEntry>, FetchError> {
            decode(&self.read(STANDINGS_FILE).await?)
        }

        async fn fetch_metadata(&self) -> Result<Metadata, FetchError> {
            decode(&self.read(METADATA_FILE).await?)
        }

        async fn fetch_history(&self, name: &str) -> Result<CharacterHistory, FetchError> {
            decode(&self.read(&history_path(name)).await?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::series::Snapshot;
    use futures::executor::block_on;

    fn history(name: &str) -> CharacterHistory {
        CharacterHistory {
            name: name.into(),
            class: "Raider".into(),
            account: String::new(),
            history: vec![Snapshot::new(0, 1), Snapshot::new(60, 2)],
        }
    }

    #[test]
    fn fan_out_settles_every_request_in_order() {
        let source = MemorySource::default()
            .with_history(history("a"))
            .with_history(history("c"))
            .failing("b");
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let results = block_on(fetch_histories(&source, &names));
        let order: Vec<&str> = results.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn unknown_history_is_not_found() {
        let source = MemorySource::default();
        let err = block_on(source.fetch_history("ghost")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn standings_and_metadata_load_together() {
        let source = MemorySource {
            standings: vec![LadderEntry::default()],
            ..MemorySource::default()
        };
        let load = block_on(load_standings(&source));
        assert_eq!(load.standings.unwrap().len(), 1);
        assert!(load.metadata.is_ok());
    }
}
