//! Persisted view state survives a corrupted field without losing the rest.

use ui::core::config::VIEW_STATE_KEY;
use ui::core::ladder::{Column, IntervalLabel, SortDirection, SortKey};
use ui::core::storage::{load_view_state, save_view_state, MemoryStore};
use ui::core::view_state::{ViewAction, ViewState};

#[test]
fn corrupted_field_falls_back_alone() {
    let mut state = ViewState::default();
    state.apply(ViewAction::SetLadderInterval(IntervalLabel::FourHours));
    state.apply(ViewAction::SortBy(SortKey::XpRate));
    state.apply(ViewAction::Select(Some("Aelra".into())));
    state.apply(ViewAction::ToggleCompare("Aelra".into()));
    state.apply(ViewAction::ToggleCompare("Brom".into()));
    state.apply(ViewAction::ToggleColumn(Column::Account));

    let mut blob: serde_json::Value =
        serde_json::from_str(&state.to_json().unwrap()).unwrap();
    blob["time_window_secs"] = serde_json::json!("a week");
    blob["unknown_future_field"] = serde_json::json!(42);

    let store = MemoryStore::with_entry(VIEW_STATE_KEY, &blob.to_string());
    let restored = load_view_state(&store, VIEW_STATE_KEY);

    assert_eq!(restored.time_window_secs, ViewState::default().time_window_secs);
    assert_eq!(restored.ladder_interval, IntervalLabel::FourHours);
    assert_eq!(restored.sort_key, SortKey::XpRate);
    assert_eq!(restored.sort_direction, SortDirection::Descending);
    assert_eq!(restored.selected.as_deref(), Some("Aelra"));
    assert_eq!(restored.compare, vec!["Aelra".to_string(), "Brom".to_string()]);
    assert!(restored.is_hidden(Column::Account));
}

#[test]
fn saved_state_round_trips_through_the_store() {
    let mut store = MemoryStore::new();
    let mut state = ViewState::default();
    state.apply(ViewAction::SetSearch("frost".into()));
    state.apply(ViewAction::SetRateInterval(600));
    save_view_state(&mut store, VIEW_STATE_KEY, &state).unwrap();
    assert_eq!(load_view_state(&store, VIEW_STATE_KEY), state);
}

#[test]
fn non_object_blob_restores_defaults() {
    let store = MemoryStore::with_entry(VIEW_STATE_KEY, "[1, 2, 3]");
    assert_eq!(load_view_state(&store, VIEW_STATE_KEY), ViewState::default());
}
