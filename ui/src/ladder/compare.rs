use dioxus::prelude::*;

use crate::core::compare::Comparison;
use crate::core::session::ComparisonPanel;
use crate::core::view_state::{ViewAction, MIN_COMPARE};

use super::{use_ladder, AxisKind, LadderHandle, LineChart};

/// Overlay charts for every compared character that could be fetched.
#[component]
pub fn ComparisonView() -> Element {
    let ladder = use_ladder();
    let session = ladder.session.read();
    let panel = session.comparison().clone();
    let requested = session.state().compare.clone();
    drop(session);

    let content = match panel {
        ComparisonPanel::Inactive => rsx! {
            p { class: "ladder-card__placeholder",
                "Tick at least {MIN_COMPARE} characters in the table to compare them."
            }
        },
        ComparisonPanel::Loading => rsx! {
            p { class: "ladder-card__placeholder", "Loading {requested.len()} histories…" }
        },
        ComparisonPanel::Empty => rsx! {
            div { class: "ladder-card__error",
                p { "None of the selected characters could be loaded." }
            }
        },
        ComparisonPanel::Ready(comparison) => render_comparison(comparison, &requested),
    };

    rsx! {
        section { class: "ladder-card ladder-compare",
            div { class: "ladder-card__header",
                h2 { "Comparison" }
                if !requested.is_empty() {
                    span { class: "ladder-card__meta", "{requested.len()} selected" }
                }
            }

            if !requested.is_empty() {
                ul { class: "ladder-compare__chips",
                    for name in requested.iter().cloned() {
                        {chip(ladder, name)}
                    }
                }
            }

            {content}
        }
    }
}

fn chip(ladder: LadderHandle, name: String) -> Element {
    let target = name.clone();
    rsx! {
        li { key: "{name}", class: "ladder-compare__chip",
            "{name}"
            button {
                r#type: "button",
                class: "ladder-compare__remove",
                aria_label: "Remove {name}",
                onclick: move |_| ladder.act(ViewAction::ToggleCompare(target.clone())),
                "×"
            }
        }
    }
}

fn render_comparison(comparison: Comparison, requested: &[String]) -> Element {
    let missing: Vec<&String> = requested
        .iter()
        .filter(|name| !comparison.members.iter().any(|m| &m.name == *name))
        .collect();
    let missing_note = (!missing.is_empty()).then(|| {
        missing
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    });

    let xp = comparison.xp_datasets();
    let deaths = comparison.death_datasets();
    let rates = comparison.rate_datasets();
    let depth = comparison.depth_datasets();

    rsx! {
        if let Some(note) = missing_note {
            p { class: "ladder-compare__missing", "Couldn't load: {note}" }
        }
        LineChart { title: "Experience".to_string(), datasets: xp, markers: deaths, axis: AxisKind::Experience }
        LineChart { title: "Experience per hour".to_string(), datasets: rates, axis: AxisKind::Rate }
        if let Some(depth) = depth {
            LineChart { title: "Delve depth".to_string(), datasets: depth, axis: AxisKind::Depth }
        }
    }
}
