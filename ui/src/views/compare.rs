use dioxus::prelude::*;

use crate::ladder::{AnalysisControls, ComparisonView};

#[component]
pub fn Compare() -> Element {
    rsx! {
        section { class: "page page-compare",
            h1 { "Compare characters" }
            p { "Experience, rate and depth overlays for every character ticked in the ladder." }
            AnalysisControls {}
            ComparisonView {}
        }
    }
}
