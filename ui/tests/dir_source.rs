//! Reading published files from disk, end to end through the session.
#![cfg(not(target_arch = "wasm32"))]

use std::fs;
use std::path::Path;

use ui::core::config::AppConfig;
use ui::core::error::FetchError;
use ui::core::filename::history_path;
use ui::core::session::{resolve_comparison, resolve_detail, ComparisonPanel, DetailPanel, LadderSession};
use ui::core::source::{load_standings, DirSource, LadderSource, METADATA_FILE, STANDINGS_FILE};
use ui::core::storage::MemoryStore;
use ui::core::view_state::ViewAction;

fn write(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

fn seed(root: &Path) {
    write(
        root,
        STANDINGS_FILE,
        r#"[
            {"rank": 1, "name": "Aelra", "class": "Deadeye", "account": "aelra#1", "level": 98,
             "experience": 3900000000, "xp_rates": {"1h": 52000000}, "rank_changes": {"1h": 2}},
            {"rank": 2, "name": "Brom", "class": "Titan", "account": "brom#7", "level": 97,
             "experience": 3700000000, "dead": true, "rank_changes": {"1h": null}}
        ]"#,
    );
    write(
        root,
        METADATA_FILE,
        r#"{"league": "Settlers", "last_updated": 1700000000, "total_players": 2, "players_updated": 2}"#,
    );
    write(
        root,
        &history_path("Aelra"),
        r#"{"name": "Aelra", "class": "Deadeye", "history": [
            {"t": 0, "x": 1000}, {"t": 1800, "x": 2800}, {"t": 3600, "x": 4600, "d": 120}
        ]}"#,
    );
}

#[tokio::test]
async fn reads_standings_metadata_and_histories() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let source = DirSource::new(dir.path());

    let load = load_standings(&source).await;
    let standings = load.standings.unwrap();
    assert_eq!(standings.len(), 2);
    assert!(standings[1].dead);
    assert_eq!(load.metadata.unwrap().league, "Settlers");

    let history = source.fetch_history("Aelra").await.unwrap();
    assert_eq!(history.history.len(), 3);
    assert_eq!(history.history[2].d, Some(120));
}

#[tokio::test]
async fn missing_history_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let source = DirSource::new(dir.path());
    assert!(matches!(
        source.fetch_history("Nobody").await,
        Err(FetchError::Io(_))
    ));
}

#[tokio::test]
async fn malformed_history_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    write(dir.path(), &history_path("Brom"), "{\"history\": 12");
    let source = DirSource::new(dir.path());
    assert!(matches!(
        source.fetch_history("Brom").await,
        Err(FetchError::Decode(_))
    ));
}

#[tokio::test]
async fn session_survives_a_partial_comparison() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    let source = DirSource::new(dir.path());
    let mut session = LadderSession::open(AppConfig::default(), Box::new(MemoryStore::new()));

    session.apply_standings(load_standings(&source).await);
    assert_eq!(session.rows().len(), 2);

    let detail = session
        .update(ViewAction::Select(Some("Aelra".into())))
        .detail
        .unwrap();
    assert!(session.commit_detail(resolve_detail(&source, detail).await));
    match session.detail() {
        DetailPanel::Ready(view) => {
            assert_eq!(view.summary.latest_depth, Some(120));
            assert_eq!(view.series.rates.len(), 2);
        }
        other => panic!("unexpected detail panel: {other:?}"),
    }

    session.update(ViewAction::ToggleCompare("Aelra".into()));
    let ticket = session
        .update(ViewAction::ToggleCompare("Brom".into()))
        .comparison
        .unwrap();
    assert!(session.commit_comparison(resolve_comparison(&source, ticket).await));
    match session.comparison() {
        ComparisonPanel::Ready(comparison) => {
            assert_eq!(comparison.members.len(), 1);
            assert_eq!(comparison.members[0].position, 0);
        }
        other => panic!("unexpected comparison panel: {other:?}"),
    }
}
