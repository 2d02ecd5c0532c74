//! Replays the bundled demo day end to end.

#![allow(clippy::unwrap_used, clippy::panic)]

use alke::replay::{ReplayOutcome, Scenario, replay};
use alke_core::Amount;

fn demo_day() -> Scenario {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos/alke_day.json");
    let text = std::fs::read_to_string(path).unwrap();
    Scenario::from_json(&text).unwrap()
}

#[test]
fn demo_day_statistics() {
    let report = replay(&demo_day()).unwrap();

    assert_eq!(report.statistics.completed, 2);
    assert_eq!(report.statistics.earnings, Amount::new(58));
    assert_eq!(
        report.statistics.to_string(),
        "2 vehicles have checked out and have earnings of $58"
    );
    assert_eq!(report.remaining.len(), 18);
}

#[test]
fn demo_day_refusals() {
    let report = replay(&demo_day()).unwrap();

    let refused: Vec<&str> = report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ReplayOutcome::Refused { plate, .. } => Some(plate.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(refused, vec!["B555QQQ", "CC444ZZ"]);

    assert!(matches!(
        report.outcomes.last(),
        Some(ReplayOutcome::NotFound { plate, .. }) if plate == "CC444ZZ"
    ));
}

#[test]
fn demo_day_fees() {
    let report = replay(&demo_day()).unwrap();

    let fees: Vec<(&str, u64)> = report
        .outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ReplayOutcome::Discharged { receipt, .. } => {
                Some((receipt.plate.as_str(), receipt.fee.value()))
            }
            _ => None,
        })
        .collect();
    assert_eq!(fees, vec![("CC444WW", 37), ("AA888PP", 21)]);
}
