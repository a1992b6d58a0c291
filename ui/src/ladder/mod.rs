//! Dioxus presentation of the ladder viewer. Components read the shared
//! [`LadderSession`] and send [`LadderEvent`]s; nothing here derives data.

mod charts;
pub use charts::{AxisKind, LineChart};

mod compare;
pub use compare::ComparisonView;

mod controls;
pub use controls::{AnalysisControls, LadderControls};

mod detail;
pub use detail::DetailPanelView;

mod header;
pub use header::LadderHeader;

mod table;
pub use table::LadderTable;

use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::core::platform::{self, AppSource};
use crate::core::session::{self, Effect, LadderSession};
use crate::core::timing;
use crate::core::view_state::ViewAction;

#[derive(Debug, Clone, PartialEq)]
pub enum LadderEvent {
    Act(ViewAction),
    Refresh,
}

/// Context handle shared by every ladder component.
#[derive(Clone, Copy)]
pub struct LadderHandle {
    pub session: Signal<LadderSession>,
    events: Coroutine<LadderEvent>,
}

impl LadderHandle {
    pub fn act(&self, action: ViewAction) {
        self.events.send(LadderEvent::Act(action));
    }

    pub fn refresh(&self) {
        self.events.send(LadderEvent::Refresh);
    }
}

pub fn use_ladder() -> LadderHandle {
    use_context::<LadderHandle>()
}

/// Owns the session, drives refreshes and fetches, and provides a
/// [`LadderHandle`] to its children.
#[component]
pub fn LadderProvider(children: Element) -> Element {
    let config = use_hook(AppConfig::load);
    let source = use_hook(|| platform::default_source(&config));
    let mut session = use_signal(|| LadderSession::open(config.clone(), platform::default_store()));

    let events = use_coroutine({
        let source = source.clone();
        move |mut rx: UnboundedReceiver<LadderEvent>| {
            let source = source.clone();
            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        LadderEvent::Act(action) => {
                            let effect = session.with_mut(|s| s.update(action));
                            run_effect(session, &source, effect);
                        }
                        LadderEvent::Refresh => {
                            let ticket = session.with_mut(|s| s.begin_refresh());
                            let source = source.clone();
                            spawn(async move {
                                let response = session::resolve_standings(&source, ticket).await;
                                if let Some(effect) = session.with_mut(|s| s.commit_standings(response)) {
                                    run_effect(session, &source, effect);
                                }
                            });
                        }
                    }
                }
            }
        }
    });

    let refresh_ms = config.refresh_interval_ms();
    use_future(move || async move {
        info!(platform = platform::Platform::current().label(), refresh_ms, "ladder viewer starting");
        loop {
            debug!("refresh tick");
            events.send(LadderEvent::Refresh);
            timing::sleep_ms(refresh_ms).await;
        }
    });

    use_context_provider(|| LadderHandle { session, events });

    rsx! {
        {children}
    }
}

/// Start the fetches an update asked for. Each response is committed only if
/// the session still considers it current.
fn run_effect(mut session: Signal<LadderSession>, source: &AppSource, effect: Effect) {
    if let Some(ticket) = effect.detail {
        let source = source.clone();
        spawn(async move {
            let response = session::resolve_detail(&source, ticket).await;
            session.with_mut(|s| s.commit_detail(response));
        });
    }

    if let Some(ticket) = effect.comparison {
        let source = source.clone();
        spawn(async move {
            let response = session::resolve_comparison(&source, ticket).await;
            session.with_mut(|s| s.commit_comparison(response));
        });
    }
}
