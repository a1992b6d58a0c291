use dioxus::prelude::*;

use crate::ladder::{
    use_ladder, AnalysisControls, ComparisonView, DetailPanelView, LadderControls, LadderHeader,
    LadderTable,
};

/// Main page: standings on one side, the selected character and the
/// comparison on the other. Pane widths follow the persisted layout.
#[component]
pub fn Ladder() -> Element {
    let ladder = use_ladder();
    let state = ladder.session.read().state().clone();
    let table_pct = state.layout.table * 100.0;
    let side_pct = 100.0 - table_pct;
    let comparing = state.comparison_active();

    rsx! {
        section { class: "page page-ladder",
            LadderHeader {}
            LadderControls {}

            div { class: "ladder__panes",
                div { class: "ladder__pane ladder__pane--table", flex_basis: format!("{table_pct:.1}%"),
                    LadderTable {}
                }
                div { class: "ladder__pane ladder__pane--side", flex_basis: format!("{side_pct:.1}%"),
                    AnalysisControls {}
                    if comparing {
                        ComparisonView {}
                    }
                    DetailPanelView {}
                }
            }
        }
    }
}
