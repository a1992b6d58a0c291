use dioxus::prelude::*;
use once_cell::sync::OnceCell;

use crate::ladder::use_ladder;

/// Platforms register a `NavBuilder` with fully constructed `Link` elements so
/// `ui` does not need to know each platform's `Route` enum.
///
/// ```ignore
/// register_nav(NavBuilder {
///     ladder: |label| rsx!( Link { class: "navbar__link", to: Route::Ladder {}, "{label}" } ),
///     compare: |label| rsx!( Link { class: "navbar__link", to: Route::Compare {}, "{label}" } ),
/// });
/// ```
///
/// Without a builder the navbar renders whatever `children` it was given.
pub struct NavBuilder {
    pub ladder: fn(label: &str) -> Element,
    pub compare: fn(label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    let ladder = use_ladder();
    let compare_count = ladder.session.read().state().compare.len();
    let compare_label = if compare_count > 0 {
        format!("Compare ({compare_count})")
    } else {
        "Compare".to_string()
    };

    let internal_nav = NAV_BUILDER
        .get()
        .map(|b| ((b.ladder)("Ladder"), (b.compare)(&compare_label)));

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Ladderwatch" }
                    }
                    span { class: "navbar__brand-subtitle", "Ladder rates, deaths and depth" }
                }

                if let Some((ladder_link, compare_link)) = internal_nav {
                    nav { class: "navbar__links",
                        {ladder_link}
                        {compare_link}
                    }
                } else {
                    nav { class: "navbar__links", {children} }
                }
            }
        }
    }
}
