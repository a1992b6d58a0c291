//! The viewer's state container.
//!
//! [`LadderSession`] owns the persisted [`ViewState`], the data fetched so far
//! and every view derived from them. All changes go through
//! [`LadderSession::update`] (user intent) or [`LadderSession::apply_standings`]
//! / the `commit_*` methods (data arriving), each of which re-derives only the
//! affected views. Fetching itself happens outside, driven by the tickets an
//! [`Effect`] hands back; a response is only committed if its ticket is still
//! the current one.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use super::analysis::{self, DetailView};
use super::compare::{self, Comparison};
use super::config::AppConfig;
use super::error::FetchError;
use super::freshness::{self, Freshness};
use super::ladder::{self, ClassShare, LadderEntry, LadderFilter, Metadata};
use super::series::CharacterHistory;
use super::source::{fetch_histories, load_standings, LadderSource, StandingsLoad};
use super::storage::{self, PreferenceStore};
use super::timing;
use super::view_state::{Invalidation, ViewAction, ViewState};

/// State of the ladder table.
#[derive(Debug, Clone, PartialEq)]
pub enum LadderStatus {
    Loading,
    Ready,
    Failed(String),
}

/// State of the single-character panel.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    Closed,
    Loading { name: String },
    Ready(DetailView),
    Failed { name: String, message: String },
}

/// State of the comparison panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonPanel {
    /// Fewer than two characters selected.
    Inactive,
    Loading,
    Ready(Comparison),
    /// Every requested fetch failed.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandingsTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTicket {
    generation: u64,
    pub names: Vec<String>,
}

/// What the caller should fetch after a change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effect {
    pub invalidated: Invalidation,
    pub detail: Option<DetailTicket>,
    pub comparison: Option<ComparisonTicket>,
}

impl Effect {
    pub fn fetches(&self) -> bool {
        self.detail.is_some() || self.comparison.is_some()
    }
}

#[derive(Debug)]
pub struct StandingsResponse {
    pub ticket: StandingsTicket,
    pub load: StandingsLoad,
}

#[derive(Debug)]
pub struct DetailResponse {
    pub ticket: DetailTicket,
    pub result: Result<CharacterHistory, FetchError>,
}

#[derive(Debug)]
pub struct ComparisonResponse {
    pub ticket: ComparisonTicket,
    pub results: Vec<(String, Result<CharacterHistory, FetchError>)>,
}

pub async fn resolve_standings<S: LadderSource>(
    source: &S,
    ticket: StandingsTicket,
) -> StandingsResponse {
    let load = load_standings(source).await;
    StandingsResponse { ticket, load }
}

pub async fn resolve_detail<S: LadderSource>(source: &S, ticket: DetailTicket) -> DetailResponse {
    let result = source.fetch_history(&ticket.name).await;
    DetailResponse { ticket, result }
}

pub async fn resolve_comparison<S: LadderSource>(
    source: &S,
    ticket: ComparisonTicket,
) -> ComparisonResponse {
    let results = fetch_histories(source, &ticket.names).await;
    ComparisonResponse { ticket, results }
}

pub struct LadderSession {
    config: AppConfig,
    state: ViewState,
    store: Box<dyn PreferenceStore>,

    standings: Vec<LadderEntry>,
    metadata: Option<Metadata>,
    status: LadderStatus,
    last_refresh_error: Option<String>,
    last_loaded_at: Option<i64>,
    rows: Vec<LadderEntry>,
    standings_issued: u64,
    standings_committed: u64,

    detail_history: Option<CharacterHistory>,
    detail: DetailPanel,
    detail_generation: u64,

    compare_histories: HashMap<String, CharacterHistory>,
    compare_settled: HashSet<String>,
    comparison: ComparisonPanel,
    compare_generation: u64,
}

impl LadderSession {
    /// Restore the persisted view state and start with nothing fetched.
    pub fn open(config: AppConfig, store: Box<dyn PreferenceStore>) -> Self {
        let state = storage::load_view_state(store.as_ref(), &config.storage_key);
        let comparison = if state.comparison_active() {
            ComparisonPanel::Loading
        } else {
            ComparisonPanel::Inactive
        };
        let detail = match &state.selected {
            Some(name) => DetailPanel::Loading { name: name.clone() },
            None => DetailPanel::Closed,
        };

        Self {
            config,
            state,
            store,
            standings: Vec::new(),
            metadata: None,
            status: LadderStatus::Loading,
            last_refresh_error: None,
            last_loaded_at: None,
            rows: Vec::new(),
            standings_issued: 0,
            standings_committed: 0,
            detail_history: None,
            detail,
            detail_generation: 0,
            compare_histories: HashMap::new(),
            compare_settled: HashSet::new(),
            comparison,
            compare_generation: 0,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn status(&self) -> &LadderStatus {
        &self.status
    }

    /// Error from the most recent background refresh, if it failed while
    /// older data stayed on screen.
    pub fn last_refresh_error(&self) -> Option<&str> {
        self.last_refresh_error.as_deref()
    }

    /// When the background refresh will next run, once anything has loaded.
    pub fn next_refresh_at(&self) -> Option<i64> {
        self.last_loaded_at
            .map(|at| freshness::next_refresh_at(at, self.config.refresh_interval_secs))
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    pub fn standings(&self) -> &[LadderEntry] {
        &self.standings
    }

    /// Filtered and sorted ladder rows.
    pub fn rows(&self) -> &[LadderEntry] {
        &self.rows
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn comparison(&self) -> &ComparisonPanel {
        &self.comparison
    }

    pub fn freshness(&self, now: i64) -> Freshness {
        freshness::evaluate(self.metadata.as_ref().and_then(|m| m.last_updated), now)
    }

    pub fn class_shares(&self) -> Vec<ClassShare> {
        ladder::class_shares(self.metadata.as_ref(), &self.standings)
    }

    pub fn classes(&self) -> Vec<String> {
        ladder::classes(&self.standings)
    }

    /// Single entry point for user changes: mutate, re-derive what the action
    /// touched, persist, and report anything that still needs fetching.
    pub fn update(&mut self, action: ViewAction) -> Effect {
        let previous_selection = self.state.selected.clone();
        let membership_changed = matches!(
            action,
            ViewAction::ToggleCompare(_) | ViewAction::ClearCompare
        );
        let invalidated = self.state.apply(action);
        let mut effect = Effect {
            invalidated,
            ..Effect::default()
        };

        if invalidated.rows {
            self.derive_rows();
        }

        if invalidated.detail {
            if self.state.selected == previous_selection {
                self.derive_detail();
            } else {
                effect.detail = self.reopen_detail(true);
            }
        }

        if invalidated.comparison {
            effect.comparison = self.reconcile_comparison(membership_changed);
        }

        self.persist();
        effect
    }

    /// Ticket for a standings load. Loads may overlap; only responses newer
    /// than the last one committed are applied.
    pub fn begin_refresh(&mut self) -> StandingsTicket {
        self.standings_issued += 1;
        StandingsTicket {
            generation: self.standings_issued,
        }
    }

    /// Apply a standings load unless a later one already landed.
    pub fn commit_standings(&mut self, response: StandingsResponse) -> Option<Effect> {
        let StandingsResponse { ticket, load } = response;
        if ticket.generation <= self.standings_committed {
            debug!(
                generation = ticket.generation,
                committed = self.standings_committed,
                "discarding out-of-order standings"
            );
            return None;
        }
        self.standings_committed = ticket.generation;
        Some(self.apply_standings(load))
    }

    /// Take freshly fetched standings/metadata. The view state is untouched;
    /// rows are re-derived and open panels are re-fetched against the new data.
    pub fn apply_standings(&mut self, load: StandingsLoad) -> Effect {
        match load.standings {
            Ok(entries) => {
                info!(entries = entries.len(), "standings loaded");
                self.standings = entries;
                self.status = LadderStatus::Ready;
                self.last_refresh_error = None;
                self.last_loaded_at = Some(timing::now_unix());
            }
            Err(err) => {
                let message = err.to_string();
                if self.status == LadderStatus::Ready {
                    warn!(error = %message, "refresh failed; keeping previous standings");
                    self.last_refresh_error = Some(message);
                } else {
                    self.status = LadderStatus::Failed(message);
                }
            }
        }
        if let Ok(metadata) = load.metadata {
            self.metadata = Some(metadata);
        }

        self.derive_rows();

        let detail = self.reopen_detail(false);
        let comparison = if self.state.comparison_active() {
            Some(self.issue_comparison(false))
        } else {
            None
        };

        Effect {
            invalidated: Invalidation {
                rows: true,
                detail: detail.is_some(),
                comparison: comparison.is_some(),
            },
            detail,
            comparison,
        }
    }

    /// Commit a detail fetch unless a newer request or selection superseded it.
    pub fn commit_detail(&mut self, response: DetailResponse) -> bool {
        let DetailResponse { ticket, result } = response;
        let current = ticket.generation == self.detail_generation
            && self.state.selected.as_deref() == Some(ticket.name.as_str());
        if !current {
            debug!(character = %ticket.name, "discarding stale detail response");
            return false;
        }

        match result {
            Ok(history) => {
                self.detail_history = Some(history);
                self.derive_detail();
            }
            Err(err) => {
                self.detail_history = None;
                self.detail = DetailPanel::Failed {
                    name: ticket.name,
                    message: err.to_string(),
                };
            }
        }
        true
    }

    /// Commit a comparison fan-out unless the selection moved on meanwhile.
    pub fn commit_comparison(&mut self, response: ComparisonResponse) -> bool {
        let ComparisonResponse { ticket, results } = response;
        if ticket.generation != self.compare_generation || ticket.names != self.state.compare {
            debug!("discarding stale comparison response");
            return false;
        }

        self.compare_settled = ticket.names.iter().cloned().collect();
        self.compare_histories = compare::settled_successes(results);
        self.derive_comparison();
        true
    }

    fn persist(&mut self) {
        if let Err(err) =
            storage::save_view_state(self.store.as_mut(), &self.config.storage_key, &self.state)
        {
            warn!(error = %err, "couldn't persist view state");
        }
    }

    fn derive_rows(&mut self) {
        let filter = LadderFilter {
            search: &self.state.search,
            class: self.state.class_filter.as_deref(),
        };
        self.rows = ladder::visible_rows(
            &self.standings,
            &filter,
            self.state.sort_key,
            self.state.sort_direction,
            self.state.ladder_interval,
        );
    }

    fn derive_detail(&mut self) {
        let Some(history) = &self.detail_history else {
            return;
        };
        self.detail = DetailPanel::Ready(analysis::detail_view(
            history,
            self.state.window_secs(),
            self.state.interval_secs(),
        ));
    }

    fn derive_comparison(&mut self) {
        let comparison = compare::compare(
            &self.state.compare,
            &self.compare_histories,
            self.state.window_secs(),
            self.state.interval_secs(),
        );
        let dropped = self.state.compare.len() - comparison.members.len();
        if dropped > 0 {
            debug!(dropped, "comparison rendered without some characters");
        }
        self.comparison = if comparison.is_empty() {
            ComparisonPanel::Empty
        } else {
            ComparisonPanel::Ready(comparison)
        };
    }

    /// Issue a detail fetch for the current selection. `show_loading` swaps
    /// the panel to its loading state; a silent refresh keeps the old view up.
    fn reopen_detail(&mut self, show_loading: bool) -> Option<DetailTicket> {
        self.detail_generation += 1;
        let Some(name) = self.state.selected.clone() else {
            self.detail_history = None;
            self.detail = DetailPanel::Closed;
            return None;
        };

        if show_loading || !matches!(self.detail, DetailPanel::Ready(_)) {
            self.detail_history = None;
            self.detail = DetailPanel::Loading { name: name.clone() };
        }
        Some(DetailTicket {
            generation: self.detail_generation,
            name,
        })
    }

    /// Only a change of membership may fetch. Window and interval changes
    /// re-derive from held histories, or wait for the fan-out in flight.
    fn reconcile_comparison(&mut self, membership_changed: bool) -> Option<ComparisonTicket> {
        if !self.state.comparison_active() {
            self.compare_generation += 1;
            self.comparison = ComparisonPanel::Inactive;
            return None;
        }

        let all_settled = self
            .state
            .compare
            .iter()
            .all(|name| self.compare_settled.contains(name));
        if all_settled {
            self.derive_comparison();
            None
        } else if membership_changed {
            Some(self.issue_comparison(true))
        } else {
            None
        }
    }

    fn issue_comparison(&mut self, show_loading: bool) -> ComparisonTicket {
        self.compare_generation += 1;
        if show_loading || !matches!(self.comparison, ComparisonPanel::Ready(_)) {
            self.comparison = ComparisonPanel::Loading;
        }
        ComparisonTicket {
            generation: self.compare_generation,
            names: self.state.compare.clone(),
        }
    }
}
