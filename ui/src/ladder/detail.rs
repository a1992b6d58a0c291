use dioxus::prelude::*;

use crate::core::analysis::DetailView;
use crate::core::compare::{color_for_position, Dataset};
use crate::core::format;
use crate::core::series::ChartPoint;
use crate::core::session::DetailPanel;
use crate::core::view_state::ViewAction;

use super::{use_ladder, AxisKind, LineChart};

const CHART_AREA_HEIGHT: f64 = 460.0;

#[component]
pub fn DetailPanelView() -> Element {
    let ladder = use_ladder();
    let session = ladder.session.read();
    let panel = session.detail().clone();
    let chart_split = f64::from(session.state().layout.charts);
    drop(session);

    let content = match panel {
        DetailPanel::Closed => rsx! {
            p { class: "ladder-card__placeholder",
                "Select a character to chart experience, rates, deaths and depth."
            }
        },
        DetailPanel::Loading { name } => rsx! {
            p { class: "ladder-card__placeholder", "Loading {name}…" }
        },
        DetailPanel::Failed { name, message } => rsx! {
            div { class: "ladder-card__error",
                p { "Couldn't load history for {name}: {message}" }
            }
        },
        DetailPanel::Ready(view) => render_view(view, chart_split),
    };

    rsx! {
        section { class: "ladder-card ladder-detail",
            div { class: "ladder-card__header",
                h2 { "Character" }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| ladder.act(ViewAction::Select(None)),
                    "Close"
                }
            }
            {content}
        }
    }
}

fn render_view(view: DetailView, chart_split: f64) -> Element {
    let summary = &view.summary;
    let color = color_for_position(0);
    let xp = vec![Dataset {
        label: view.name.clone(),
        color,
        points: view.series.xp.clone(),
    }];
    let deaths = if view.series.deaths.is_empty() {
        Vec::new()
    } else {
        vec![Dataset {
            label: "Death".to_string(),
            color: "#e15759",
            points: view
                .series
                .deaths
                .iter()
                .map(|event| ChartPoint {
                    t: event.timestamp,
                    y: event.xp_after as f64,
                })
                .collect(),
        }]
    };
    let rates = vec![Dataset {
        label: view.name.clone(),
        color,
        points: view
            .series
            .rates
            .iter()
            .map(|point| ChartPoint {
                t: point.t,
                y: point.rate_per_hour,
            })
            .collect(),
    }];
    let depth = view.series.has_depth().then(|| {
        vec![Dataset {
            label: view.name.clone(),
            color,
            points: view.series.depth.clone(),
        }]
    });

    let xp_height = CHART_AREA_HEIGHT * chart_split;
    let rate_height = CHART_AREA_HEIGHT - xp_height;

    rsx! {
        div { class: "ladder-detail__summary",
            h3 { "{view.name}" }
            span { class: "ladder-detail__class", "{view.class}" }
            if !view.account.is_empty() {
                span { class: "ladder-detail__account", "{view.account}" }
            }
        }

        ul { class: "ladder-detail__grid",
            li { span { class: "ladder-detail__metric-label", "Experience" } span { class: "ladder-detail__metric-value", "{format::format_optional(summary.latest_xp.map(format::format_xp))}" } }
            li { span { class: "ladder-detail__metric-label", "Gained in window" } span { class: "ladder-detail__metric-value", "{format::format_xp(summary.xp_gained.max(0) as u64)}" } }
            li { span { class: "ladder-detail__metric-label", "Average rate" } span { class: "ladder-detail__metric-value", "{format::format_rate(summary.average_rate_per_hour)}" } }
            li { span { class: "ladder-detail__metric-label", "Deaths" } span { class: "ladder-detail__metric-value", "{summary.death_count}" } }
            li { span { class: "ladder-detail__metric-label", "XP lost to deaths" } span { class: "ladder-detail__metric-value", "{format::format_xp(summary.xp_lost_total)}" } }
            li { span { class: "ladder-detail__metric-label", "Depth" } span { class: "ladder-detail__metric-value", "{format::format_optional(summary.latest_depth)}" } }
            li { span { class: "ladder-detail__metric-label", "Deepest" } span { class: "ladder-detail__metric-value", "{format::format_optional(summary.max_depth)}" } }
            li { span { class: "ladder-detail__metric-label", "Snapshots" } span { class: "ladder-detail__metric-value", "{summary.snapshot_count}" } }
        }

        LineChart { title: "Experience".to_string(), datasets: xp, markers: deaths, axis: AxisKind::Experience, height: xp_height }
        LineChart { title: "Experience per hour".to_string(), datasets: rates, axis: AxisKind::Rate, height: rate_height }
        if let Some(depth) = depth {
            LineChart { title: "Delve depth".to_string(), datasets: depth, axis: AxisKind::Depth }
        }

        if !view.series.deaths.is_empty() {
            div { class: "ladder-detail__deaths",
                h4 { "Deaths in window" }
                ul {
                    for event in view.series.deaths.iter() {
                        li { key: "{event.timestamp}",
                            "{format::format_timestamp(event.timestamp)}: lost {format::format_xp(event.xp_lost)} ({format::format_percent(event.percent_lost)})"
                        }
                    }
                }
            }
        }
    }
}
