//! Local search and debounce tests

use std::time::{Duration, Instant};

use proptest::prelude::*;

use flixtui::models::{Catalog, CatalogEntry};
use flixtui::search::{filter, filter_catalog, DebounceState, Debouncer};

fn entry(title: &str) -> CatalogEntry {
    CatalogEntry {
        id: title.to_string(),
        title: title.to_string(),
        image_url: None,
        kind: "TV Show".to_string(),
    }
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn test_builtin_catalog_partial_match() {
    let catalog = Catalog::builtin();
    let results = filter_catalog(&catalog, "bet");

    let titles: Vec<&str> = results.shows.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Better Call Saul"]);
    assert!(results.games.is_empty());
}

#[test]
fn test_builtin_catalog_blank_query_returns_everything() {
    let catalog = Catalog::builtin();
    let results = filter_catalog(&catalog, "   ");
    assert_eq!(results.games, catalog.games);
    assert_eq!(results.shows, catalog.shows);
}

#[test]
fn test_builtin_catalog_no_match() {
    let catalog = Catalog::builtin();
    assert!(filter_catalog(&catalog, "zzzz").is_empty());
}

proptest! {
    #[test]
    fn prop_filter_keeps_exactly_the_matches_in_order(
        titles in proptest::collection::vec("[A-Za-z ]{0,12}", 0..20),
        query in "[A-Za-z]{1,3}",
    ) {
        let catalog: Vec<CatalogEntry> = titles.iter().map(|t| entry(t)).collect();
        let results = filter(&catalog, &query);

        let expected: Vec<CatalogEntry> = catalog
            .iter()
            .filter(|e| e.title.to_lowercase().contains(&query.to_lowercase()))
            .cloned()
            .collect();
        prop_assert_eq!(&results, &expected);
        prop_assert!(results.len() <= catalog.len());
    }

    #[test]
    fn prop_filter_ignores_case(
        titles in proptest::collection::vec("[A-Za-z]{0,10}", 0..20),
        query in "[a-z]{1,3}",
    ) {
        let catalog: Vec<CatalogEntry> = titles.iter().map(|t| entry(t)).collect();
        prop_assert_eq!(
            filter(&catalog, &query),
            filter(&catalog, &query.to_uppercase())
        );
    }
}

// =============================================================================
// Debounce
// =============================================================================

const WINDOW: Duration = Duration::from_millis(500);

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_single_change_settles_after_window() {
    let t0 = Instant::now();
    let mut gate = Debouncer::new(String::new(), WINDOW);

    gate.update("a".to_string(), t0);
    assert_eq!(gate.state(), DebounceState::Pending);
    assert_eq!(gate.poll(t0 + ms(499)), None);
    assert_eq!(gate.poll(t0 + ms(500)), Some("a".to_string()));

    // Fires exactly once
    assert_eq!(gate.poll(t0 + ms(1000)), None);
    assert_eq!(gate.settled(), "a");
    assert_eq!(gate.state(), DebounceState::Settled);
}

#[test]
fn test_burst_settles_once_on_last_value() {
    let t0 = Instant::now();
    let mut gate = Debouncer::new(String::new(), WINDOW);

    gate.update("b".to_string(), t0);
    gate.update("be".to_string(), t0 + ms(200));
    gate.update("bet".to_string(), t0 + ms(400));

    // Window restarts on every change
    assert_eq!(gate.poll(t0 + ms(899)), None);
    assert_eq!(gate.settled(), "");
    assert_eq!(gate.poll(t0 + ms(900)), Some("bet".to_string()));
}

#[test]
fn test_return_to_settled_value_disarms() {
    let t0 = Instant::now();
    let mut gate = Debouncer::new("x".to_string(), WINDOW);

    gate.update("xy".to_string(), t0);
    gate.update("x".to_string(), t0 + ms(100));

    assert!(!gate.is_pending());
    assert_eq!(gate.poll(t0 + ms(1000)), None);
}

#[test]
fn test_flush_settles_immediately() {
    let t0 = Instant::now();
    let mut gate = Debouncer::new(String::new(), WINDOW);

    assert_eq!(gate.flush(), None);
    gate.update("dark".to_string(), t0);
    assert_eq!(gate.deadline(), Some(t0 + WINDOW));
    assert_eq!(gate.flush(), Some("dark".to_string()));
    assert_eq!(gate.poll(t0 + ms(600)), None);
}

#[test]
fn test_retyping_after_clearing_rearms() {
    let t0 = Instant::now();
    let mut gate = Debouncer::new(String::new(), WINDOW);

    gate.update("abc".to_string(), t0);
    gate.update(String::new(), t0 + ms(100));
    assert_eq!(gate.state(), DebounceState::Settled);
    assert_eq!(gate.raw(), gate.settled());

    gate.update("abc".to_string(), t0 + ms(200));
    assert_eq!(gate.state(), DebounceState::Pending);
    assert_eq!(gate.poll(t0 + ms(700)), Some("abc".to_string()));
    assert_eq!(gate.settled(), "abc");
}
