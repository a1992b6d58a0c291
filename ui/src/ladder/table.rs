use dioxus::prelude::*;

use crate::core::format;
use crate::core::ladder::{Column, IntervalLabel, LadderEntry, SortDirection, SortKey};
use crate::core::session::LadderStatus;
use crate::core::view_state::{ViewAction, ViewState};

use super::{use_ladder, LadderHandle};

/// Sortable standings. Clicking a row opens the detail panel; the checkbox
/// adds the character to the comparison.
#[component]
pub fn LadderTable() -> Element {
    let ladder = use_ladder();
    let session = ladder.session.read();
    let state = session.state().clone();
    let status = session.status().clone();
    let rows = session.rows().to_vec();
    let total = session.standings().len();
    drop(session);

    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|column| !state.is_hidden(*column))
        .collect();

    let body = match status {
        LadderStatus::Loading => rsx! {
            p { class: "ladder-card__placeholder", "Loading standings…" }
        },
        LadderStatus::Failed(message) => rsx! {
            div { class: "ladder-card__error",
                p { "Couldn't load the ladder: {message}" }
                button {
                    r#type: "button",
                    class: "button button--primary",
                    onclick: move |_| ladder.refresh(),
                    "Try again"
                }
            }
        },
        LadderStatus::Ready if rows.is_empty() => rsx! {
            p { class: "ladder-card__placeholder", "No characters match the current filters." }
        },
        LadderStatus::Ready => rsx! {
            table { class: "ladder-table",
                thead {
                    tr {
                        th { class: "ladder-table__compare", title: "Compare", "⇄" }
                        for column in columns.iter().copied() {
                            {header_cell(ladder, column, &state)}
                        }
                    }
                }
                tbody {
                    for entry in rows.iter() {
                        {row(ladder, entry, &columns, &state)}
                    }
                }
            }
        },
    };

    rsx! {
        section { class: "ladder-card ladder-table-card",
            div { class: "ladder-card__header",
                h2 { "Standings" }
                if total > 0 {
                    span { class: "ladder-card__meta", "{rows.len()} of {total} shown" }
                }
            }
            div { class: "ladder-table__scroll", {body} }
        }
    }
}

fn header_cell(ladder: LadderHandle, column: Column, state: &ViewState) -> Element {
    let Some(key) = column.sort_key() else {
        return rsx! {
            th { key: "{column.label()}", "{column.label()}" }
        };
    };

    let active = state.sort_key == key;
    let arrow = match (active, state.sort_direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ▲",
        (true, SortDirection::Descending) => " ▼",
    };
    let aria_sort = match (active, state.sort_direction) {
        (false, _) => "none",
        (true, SortDirection::Ascending) => "ascending",
        (true, SortDirection::Descending) => "descending",
    };
    let label = column_title(column, state.ladder_interval);

    rsx! {
        th {
            key: "{label}",
            class: if active { "ladder-table__sortable ladder-table__sortable--active" } else { "ladder-table__sortable" },
            aria_sort: aria_sort,
            onclick: move |_| ladder.act(ViewAction::SortBy(key)),
            "{label}{arrow}"
        }
    }
}

fn column_title(column: Column, interval: IntervalLabel) -> String {
    match column.sort_key() {
        Some(SortKey::XpRate) | Some(SortKey::RankChange) => {
            format!("{} ({interval})", column.label())
        }
        _ => column.label().to_string(),
    }
}

fn row(ladder: LadderHandle, entry: &LadderEntry, columns: &[Column], state: &ViewState) -> Element {
    let name = entry.name.clone();
    let compare_name = entry.name.clone();
    let selected = state.selected.as_deref() == Some(entry.name.as_str());
    let compared = state.is_compared(&entry.name);
    let class = match (selected, entry.dead) {
        (true, true) => "ladder-table__row ladder-table__row--active ladder-table__row--dead",
        (true, false) => "ladder-table__row ladder-table__row--active",
        (false, true) => "ladder-table__row ladder-table__row--dead",
        (false, false) => "ladder-table__row",
    };

    rsx! {
        tr {
            key: "{entry.name}",
            class: class,
            onclick: move |_| ladder.act(ViewAction::Select(Some(name.clone()))),
            td { class: "ladder-table__compare",
                input {
                    r#type: "checkbox",
                    checked: compared,
                    aria_label: "Compare {entry.name}",
                    onclick: move |evt: MouseEvent| evt.stop_propagation(),
                    onchange: move |_| ladder.act(ViewAction::ToggleCompare(compare_name.clone())),
                }
            }
            for column in columns.iter().copied() {
                {cell(entry, column, state.ladder_interval)}
            }
        }
    }
}

fn cell(entry: &LadderEntry, column: Column, interval: IntervalLabel) -> Element {
    match column {
        Column::Rank => rsx! {
            td { class: "ladder-table__num", "{format::format_optional(entry.rank)}" }
        },
        Column::Name => rsx! {
            td { class: "ladder-table__name",
                "{entry.name}"
                if entry.dead {
                    span { class: "ladder-table__dead", title: "Dead", " ☠" }
                }
            }
        },
        Column::Class => rsx! { td { "{entry.class}" } },
        Column::Account => rsx! { td { "{entry.account}" } },
        Column::Level => rsx! { td { class: "ladder-table__num", "{entry.level}" } },
        Column::Experience => rsx! {
            td { class: "ladder-table__num", title: "{entry.experience}", "{format::format_xp(entry.experience)}" }
        },
        Column::XpRate => rsx! {
            td { class: "ladder-table__num", "{format::format_rate(entry.xp_rate(interval) as f64)}" }
        },
        Column::RankChange => {
            let change = entry.rank_change(interval);
            rsx! {
                td { class: "ladder-table__num",
                    span { class: "rank-change {format::rank_change_class(change)}", "{format::format_rank_change(change)}" }
                }
            }
        }
        Column::Depth => {
            let solo = entry
                .depth_solo
                .map(|d| format!("solo {d}"))
                .unwrap_or_default();
            rsx! {
                td { class: "ladder-table__num", title: "{solo}", "{format::format_optional(entry.depth)}" }
            }
        }
        Column::Challenges => rsx! {
            td { class: "ladder-table__num", "{entry.challenges}/{entry.challenges_max}" }
        },
        Column::Twitch => match &entry.twitch {
            Some(channel) => rsx! {
                td {
                    a {
                        href: "https://twitch.tv/{channel}",
                        target: "_blank",
                        rel: "noopener",
                        onclick: move |evt: MouseEvent| evt.stop_propagation(),
                        "{channel}"
                    }
                }
            },
            None => rsx! { td { "{format::MISSING}" } },
        },
    }
}
