use dioxus::prelude::*;

use crate::core::{format, session::LadderStatus, timing};

use super::use_ladder;

/// League name, data freshness, player counts and class popularity.
#[component]
pub fn LadderHeader() -> Element {
    let ladder = use_ladder();
    let session = ladder.session.read();

    let freshness = session.freshness(timing::now_unix());
    let metadata = session.metadata().cloned().unwrap_or_default();
    let league = if metadata.league.is_empty() {
        "Ladder".to_string()
    } else {
        metadata.league.clone()
    };
    let updated_at = metadata
        .last_updated
        .map(format::format_timestamp)
        .unwrap_or_else(|| format::MISSING.to_string());
    let shares = session.class_shares();
    let next_refresh = session
        .next_refresh_at()
        .map(format::format_timestamp)
        .unwrap_or_else(|| format::MISSING.to_string());
    let refresh_error = session.last_refresh_error().map(str::to_string);
    let loading = *session.status() == LadderStatus::Loading;

    rsx! {
        section { class: "ladder-card ladder-header",
            div { class: "ladder-card__header",
                h1 { "{league}" }
                div { class: "freshness {freshness.css_class()}",
                    span { class: "freshness__status", "{freshness.status_label()}" }
                    span { class: "freshness__detail", title: "{updated_at}", "{freshness.detail_message()}" }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: loading,
                    onclick: move |_| ladder.refresh(),
                    "Refresh"
                }
            }

            div { class: "ladder-header__stats",
                span { class: "ladder-header__stat",
                    span { class: "ladder-header__stat-label", "Players" }
                    strong { "{metadata.total_players}" }
                }
                span { class: "ladder-header__stat",
                    span { class: "ladder-header__stat-label", "Updated this run" }
                    strong { "{metadata.players_updated}" }
                }
                span { class: "ladder-header__stat",
                    span { class: "ladder-header__stat-label", "Next refresh" }
                    strong { "{next_refresh}" }
                }
            }

            if let Some(err) = refresh_error {
                p { class: "ladder-header__warning", "Last refresh failed ({err}); showing earlier data." }
            }

            if !shares.is_empty() {
                ul { class: "class-shares",
                    for share in shares.into_iter() {
                        li { key: "{share.class}", class: "class-shares__item",
                            span { class: "class-shares__name", "{share.class}" }
                            span { class: "class-shares__bar",
                                span { class: "class-shares__fill", width: format!("{:.1}%", share.percent) }
                            }
                            span { class: "class-shares__value", "{format::format_percent(share.percent)}" }
                        }
                    }
                }
            }
        }
    }
}
