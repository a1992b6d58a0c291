//! Shared UI crate for Ladderwatch. The analytics engine lives in [`core`];
//! the Dioxus components in [`ladder`] and [`views`] render it on web and
//! desktop.

pub mod core;
pub mod ladder;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

/// Shared theme, embedded by both launchers.
pub const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/theme/main.css"
));
