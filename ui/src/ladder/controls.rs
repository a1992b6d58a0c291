use dioxus::prelude::*;

use crate::core::ladder::{Column, IntervalLabel};
use crate::core::view_state::{
    LayoutRatios, ViewAction, RATE_INTERVAL_CHOICES, TIME_WINDOW_CHOICES,
};

use super::use_ladder;

/// Ladder interval, search, class filter and column visibility.
#[component]
pub fn LadderControls() -> Element {
    let ladder = use_ladder();
    let session = ladder.session.read();
    let state = session.state().clone();
    let classes = session.classes();
    let class_value = state.class_filter.clone().unwrap_or_default();

    rsx! {
        div { class: "ladder-controls",
            label { class: "ladder-controls__field",
                span { "Interval" }
                select {
                    value: "{state.ladder_interval}",
                    onchange: move |evt: FormEvent| {
                        if let Ok(label) = evt.value().parse::<IntervalLabel>() {
                            ladder.act(ViewAction::SetLadderInterval(label));
                        }
                    },
                    for label in IntervalLabel::ALL {
                        option {
                            key: "{label}",
                            value: "{label}",
                            selected: label == state.ladder_interval,
                            "{label}"
                        }
                    }
                }
            }

            label { class: "ladder-controls__field ladder-controls__field--grow",
                span { "Search" }
                input {
                    r#type: "search",
                    placeholder: "Character or account",
                    value: "{state.search}",
                    oninput: move |evt: FormEvent| ladder.act(ViewAction::SetSearch(evt.value())),
                }
            }

            label { class: "ladder-controls__field",
                span { "Class" }
                select {
                    value: "{class_value}",
                    onchange: move |evt: FormEvent| {
                        let value = evt.value();
                        ladder.act(ViewAction::SetClassFilter((!value.is_empty()).then_some(value)));
                    },
                    option { value: "", "All classes" }
                    for class in classes.into_iter() {
                        option {
                            key: "{class}",
                            selected: class == class_value,
                            value: "{class}",
                            "{class}"
                        }
                    }
                }
            }

            details { class: "ladder-controls__columns",
                summary { "Columns" }
                for column in Column::ALL {
                    label { key: "{column.label()}", class: "ladder-controls__column",
                        input {
                            r#type: "checkbox",
                            checked: !state.is_hidden(column),
                            onchange: move |_| ladder.act(ViewAction::ToggleColumn(column)),
                        }
                        "{column.label()}"
                    }
                }
            }
        }
    }
}

/// Rate interval, time window and pane sizes for the detail and comparison
/// charts.
#[component]
pub fn AnalysisControls() -> Element {
    let ladder = use_ladder();
    let state = ladder.session.read().state().clone();
    let layout = state.layout;
    let compare_count = state.compare.len();

    rsx! {
        div { class: "ladder-controls ladder-controls--analysis",
            label { class: "ladder-controls__field",
                span { "Rate interval" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Ok(secs) = evt.value().parse::<u64>() {
                            ladder.act(ViewAction::SetRateInterval(secs));
                        }
                    },
                    for (secs, label) in RATE_INTERVAL_CHOICES {
                        option {
                            key: "{secs}",
                            value: "{secs}",
                            selected: secs == state.rate_interval_secs,
                            "{label}"
                        }
                    }
                }
            }

            label { class: "ladder-controls__field",
                span { "Window" }
                select {
                    onchange: move |evt: FormEvent| {
                        if let Ok(secs) = evt.value().parse::<u64>() {
                            ladder.act(ViewAction::SetTimeWindow(secs));
                        }
                    },
                    for (secs, label) in TIME_WINDOW_CHOICES {
                        option {
                            key: "{secs}",
                            value: "{secs}",
                            selected: secs == state.time_window_secs,
                            "{label}"
                        }
                    }
                }
            }

            label { class: "ladder-controls__field",
                span { "Table width" }
                input {
                    r#type: "range",
                    min: "0.2",
                    max: "0.8",
                    step: "0.05",
                    value: "{layout.table}",
                    oninput: move |evt: FormEvent| {
                        if let Ok(table) = evt.value().parse::<f32>() {
                            ladder.act(ViewAction::SetLayout(LayoutRatios { table, ..layout }));
                        }
                    },
                }
            }

            label { class: "ladder-controls__field",
                span { "Chart split" }
                input {
                    r#type: "range",
                    min: "0.2",
                    max: "0.8",
                    step: "0.05",
                    value: "{layout.charts}",
                    oninput: move |evt: FormEvent| {
                        if let Ok(charts) = evt.value().parse::<f32>() {
                            ladder.act(ViewAction::SetLayout(LayoutRatios { charts, ..layout }));
                        }
                    },
                }
            }

            if compare_count > 0 {
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: move |_| ladder.act(ViewAction::ClearCompare),
                    "Clear comparison ({compare_count})"
                }
            }
        }
    }
}
