use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rosterforge_test::roster::shifts;

use crate::find_all_longest_windows;

fn pair(rows: &[(&str, u32, u32)]) -> (Availability, Availability) {
    let eligible: Vec<CrewId> = rows.iter().map(|(c, _, _)| c.to_string()).collect();
    let shifts = shifts(rows);
    (
        Availability::build("DEMO", &eligible, &shifts),
        Availability::build("WINE_DEMO", &eligible, &shifts),
    )
}

#[test]
fn test_take_and_release_are_inverse() {
    let mut state = SearchState::new(3);
    state.take(PRIMARY, 9, 1);
    assert!(!state.can_take(PRIMARY, 10, 1));
    assert!(!state.can_take(1, 9, 1));
    assert!(state.can_take(1, 10, 1));
    state.take(1, 10, 1);
    state.release(1, 10, 1);
    state.release(PRIMARY, 9, 1);
    assert!(state.is_clean());
    assert!(state.can_take(PRIMARY, 10, 1));
}

#[test]
fn test_search_leaves_state_clean() {
    let (demo, wine) = pair(&[("ana", 9, 12), ("ben", 9, 12), ("cleo", 9, 12)]);
    let mut search = Search::new(
        (&demo, HourWindow::new(9, 12)),
        (&wine, HourWindow::new(9, 12)),
        &SearchConfig::unbounded(),
    );
    search.explore(0);
    assert!(search.state.is_clean());
    assert_eq!(search.count, 12);

    let budget = SearchConfig::default().with_node_limit(7);
    let mut cut = Search::new(
        (&demo, HourWindow::new(9, 12)),
        (&wine, HourWindow::new(9, 12)),
        &budget,
    );
    cut.explore(0);
    assert!(cut.exhausted);
    assert!(cut.state.is_clean());
}

#[test]
fn test_permutations_times_derangements() {
    // 3! staffings of the primary window, each leaving 2 derangements for
    // the secondary.
    let (demo, wine) = pair(&[("ana", 9, 12), ("ben", 9, 12), ("cleo", 9, 12)]);
    let outcome = count_non_conflicting_assignments(
        (&demo, HourWindow::new(9, 12)),
        (&wine, HourWindow::new(9, 12)),
        &SearchConfig::unbounded(),
    );
    assert_eq!(outcome.count, 12);
    assert!(outcome.complete);
    assert!(outcome.stats.nodes > 12);
}

#[test]
fn test_disjoint_windows_multiply() {
    let (demo, wine) = pair(&[("ana", 9, 16), ("ben", 9, 16)]);
    let outcome = count_non_conflicting_assignments(
        (&demo, HourWindow::new(9, 11)),
        (&wine, HourWindow::new(14, 16)),
        &SearchConfig::default(),
    );
    assert_eq!(outcome.count, 4);
}

#[test]
fn test_infeasible_pair_counts_zero() {
    // Only ana is on the clock, and she cannot work both roles at 9.
    let (demo, wine) = pair(&[("ana", 9, 10)]);
    let outcome = count_non_conflicting_assignments(
        (&demo, HourWindow::new(9, 10)),
        (&wine, HourWindow::new(9, 10)),
        &SearchConfig::default(),
    );
    assert_eq!(outcome.count, 0);
    assert!(outcome.complete);
    assert!(outcome.witness.is_none());
}

#[test]
fn test_witness_is_sound() {
    let (demo, wine) = pair(&[("ana", 9, 12), ("ben", 10, 12), ("cleo", 11, 13)]);
    let (dw, ww) = (HourWindow::new(10, 12), HourWindow::new(11, 13));
    let outcome = count_non_conflicting_assignments((&demo, dw), (&wine, ww), &SearchConfig::default());
    assert!(outcome.count > 0);
    let witness = outcome.witness.unwrap();
    assert!(witness.verify((&demo, dw), (&wine, ww)));
    assert_eq!(witness.primary_role, "DEMO");

    let assignments = witness.to_assignments();
    assert_eq!(assignments.len(), 4);
    assert_eq!(assignments.iter().filter(|a| a.role_id == "WINE_DEMO").count(), 2);
}

#[test]
fn test_verify_rejects_double_booking() {
    let (demo, wine) = pair(&[("ana", 9, 10), ("ben", 9, 10)]);
    let window = HourWindow::new(9, 10);
    let bad = WindowAssignment {
        primary_role: "DEMO".into(),
        secondary_role: "WINE_DEMO".into(),
        primary: vec![HourPick { hour: 9, crew_id: "ana".into() }],
        secondary: vec![HourPick { hour: 9, crew_id: "ana".into() }],
    };
    assert!(!bad.verify((&demo, window), (&wine, window)));
}

#[test]
fn test_node_budget_returns_lower_bound() {
    let (demo, wine) = pair(&[("ana", 9, 12), ("ben", 9, 12), ("cleo", 9, 12)]);
    let outcome = count_non_conflicting_assignments(
        (&demo, HourWindow::new(9, 12)),
        (&wine, HourWindow::new(9, 12)),
        &SearchConfig::default().with_node_limit(20),
    );
    assert!(!outcome.complete);
    assert!(outcome.count < 12);
    assert_eq!(outcome.stats.nodes, 21);
}

#[test]
fn test_time_budget_stops_large_search() {
    let crew = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let rows: Vec<(&str, u32, u32)> = crew.iter().map(|c| (*c, 8, 16)).collect();
    let (demo, wine) = pair(&rows);
    let budget = SearchConfig {
        node_limit: None,
        millis_spent_limit: Some(0),
        parallel: false,
    };
    let outcome = count_non_conflicting_assignments(
        (&demo, HourWindow::new(8, 16)),
        (&wine, HourWindow::new(8, 16)),
        &budget,
    );
    assert!(!outcome.complete);
    assert_eq!(outcome.stats.nodes, CLOCK_CHECK_INTERVAL);
    assert!(outcome.witness.unwrap().verify(
        (&demo, HourWindow::new(8, 16)),
        (&wine, HourWindow::new(8, 16))
    ));
}

#[test]
fn test_random_witnesses_are_sound() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let names = ["ana", "ben", "cleo", "dan", "eve"];
    for _ in 0..50 {
        let rows: Vec<(&str, u32, u32)> = names
            .iter()
            .map(|name| {
                let start = rng.random_range(8..16);
                (*name, start, start + rng.random_range(1..5))
            })
            .collect();
        let (demo, wine) = pair(&rows);
        for dw in find_all_longest_windows(&demo) {
            for ww in find_all_longest_windows(&wine) {
                let outcome = count_non_conflicting_assignments(
                    (&demo, dw),
                    (&wine, ww),
                    &SearchConfig::default(),
                );
                assert!(outcome.complete);
                match outcome.witness {
                    Some(w) => assert!(w.verify((&demo, dw), (&wine, ww))),
                    None => assert_eq!(outcome.count, 0),
                }
            }
        }
    }
}
