use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::ladder::LadderProvider;
use ui::views::{Compare, Ladder};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Ladder {},
    #[route("/compare")]
    Compare {},
}

fn nav_ladder(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Ladder {},
        "{label}"
    })
}
fn nav_compare(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Compare {},
        "{label}"
    })
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        ladder: nav_ladder,
        compare: nav_compare,
    });

    rsx! {
        document::Title { "Ladderwatch" }
        document::Style { "{ui::THEME_CSS}" }

        // Session state outlives route changes.
        LadderProvider {
            Router::<Route> {}
        }
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
