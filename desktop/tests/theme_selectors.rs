#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Components in `ui` reference these classes by name; the desktop launcher
inlines the shared theme (`ui/assets/theme/main.css`) at compile time. A
renamed or dropped selector would silently degrade packaged builds, so we
check for a curated set here.

If you intentionally rename a selector, update the component markup and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".ladder__panes",
    ".ladder__pane--table",
    ".ladder__pane--side",
    // Buttons
    ".button {",
    ".button--primary",
    ".button--ghost",
    // Navbar
    ".navbar__inner",
    ".navbar__link",
    // Cards
    ".ladder-card",
    ".ladder-card__header",
    ".ladder-card__meta",
    ".ladder-card__placeholder",
    ".ladder-card__error",
    // Freshness badge
    ".freshness--live",
    ".freshness--stale",
    ".freshness--unknown",
    // Table
    ".ladder-table",
    ".ladder-table__sortable--active",
    ".ladder-table__row--active",
    ".ladder-table__row--dead",
    ".rank-change--up",
    ".rank-change--down",
    // Detail & comparison
    ".ladder-detail__grid",
    ".ladder-detail__metric-label",
    ".ladder-compare__chip",
    // Charts
    ".ladder-chart__plot",
    ".ladder-chart__line",
    ".ladder-chart__marker",
    ".ladder-chart__legend-swatch--death",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn rank_change_badges_cover_every_state() {
    for state in ["up", "down", "flat", "none"] {
        let selector = format!(".rank-change--{state}");
        assert!(
            THEME_CSS.contains(&selector),
            "rank change badge style `{selector}` missing"
        );
    }
}
