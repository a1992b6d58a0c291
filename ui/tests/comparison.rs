//! Comparison fan-out: failures drop out, survivors keep positional colors.

use futures::executor::block_on;

use ui::core::compare::{color_for_position, compare, settled_successes, PALETTE};
use ui::core::series::{CharacterHistory, Snapshot};
use ui::core::source::{fetch_histories, MemorySource};

fn history(name: &str, per_step: u64) -> CharacterHistory {
    CharacterHistory {
        name: name.to_string(),
        class: "Mercenary".to_string(),
        account: format!("{name}#0001"),
        history: (0..5)
            .map(|i| Snapshot::new(i * 900, 10_000 + per_step * i as u64))
            .collect(),
    }
}

#[test]
fn middle_failure_keeps_positions_of_the_rest() {
    let source = MemorySource::default()
        .with_history(history("Aelra", 100))
        .with_history(history("Brom", 200))
        .with_history(history("Cyne", 300))
        .failing("Brom");
    let requested: Vec<String> = ["Aelra", "Brom", "Cyne"].map(String::from).to_vec();

    let results = block_on(fetch_histories(&source, &requested));
    assert_eq!(results.len(), 3);

    let comparison = compare(&requested, &settled_successes(results), 0, 3_600);
    let members: Vec<(&str, usize, &str)> = comparison
        .members
        .iter()
        .map(|m| (m.name.as_str(), m.position, m.color))
        .collect();
    assert_eq!(
        members,
        vec![("Aelra", 0, PALETTE[0]), ("Cyne", 2, PALETTE[2])]
    );
    assert_eq!(comparison.xp_datasets().len(), 2);
    assert!(comparison.depth_datasets().is_none());
}

#[test]
fn every_failure_leaves_nothing_to_draw() {
    let source = MemorySource::default().failing("a").failing("b");
    let requested = vec!["a".to_string(), "b".to_string()];
    let results = block_on(fetch_histories(&source, &requested));
    let comparison = compare(&requested, &settled_successes(results), 0, 3_600);
    assert!(comparison.is_empty());
}

#[test]
fn palette_wraps_after_ten() {
    assert_eq!(color_for_position(10), color_for_position(0));
    assert_ne!(color_for_position(1), color_for_position(0));
}
