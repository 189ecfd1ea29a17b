//! End-to-end tests for a list-view filter panel.
//!
//! These tests drive a [`FilterStateManager`] the way a page does: user edits
//! flow in through `update_filter`, the change callback records what would be
//! sent to the API, and the active filters become the query string.

use std::sync::{Arc, Mutex};

use backoffice_rs_core::Value;
use backoffice_rs_filters::query::to_query_string;
use backoffice_rs_filters::{FilterState, FilterStateManager};

fn expense_panel() -> (FilterStateManager, Arc<Mutex<Vec<FilterState>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let manager = FilterStateManager::new([("search", ""), ("status", ""), ("fromDate", "")])
        .on_change(move |state| sink.lock().unwrap().push(state.clone()));
    (manager, calls)
}

#[test]
fn test_status_then_search_then_reset() {
    let (mut panel, calls) = expense_panel();

    panel.update_filter("status", "pending");
    panel.update_filter("search", "a");

    assert_eq!(panel.active_count(), 2);
    let expected: FilterState = [
        ("status".to_string(), Value::from("pending")),
        ("search".to_string(), Value::from("a")),
    ]
    .into_iter()
    .collect();
    assert_eq!(panel.active_filters(), expected);

    panel.reset_filters();
    assert_eq!(panel.active_count(), 0);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls.last(), Some(panel.initial_values()));
}

#[test]
fn test_round_trip_restores_inactive_state() {
    let (mut panel, _) = expense_panel();
    panel.update_filter("search", "x");
    let before = panel.active_count();

    panel.update_filter("status", "approved");
    assert!(panel.has_active_filters());
    assert_eq!(panel.active_count(), before + 1);

    panel.update_filter("status", "");
    assert_eq!(panel.active_count(), before);

    panel.update_filter("search", "");
    assert!(!panel.has_active_filters());
}

#[test]
fn test_array_filters_count_by_length() {
    let mut panel = FilterStateManager::new([
        ("departments", Value::from(vec!["finance"])),
        ("roles", Value::List(Vec::new())),
    ]);
    assert_eq!(panel.active_count(), 1);

    panel.update_filter("roles", vec!["manager", "analyst"]);
    assert_eq!(panel.active_count(), 2);

    panel.update_filter("departments", Value::List(Vec::new()));
    assert_eq!(panel.active_count(), 1);
}

#[test]
fn test_active_filters_become_query_string() {
    let (mut panel, _) = expense_panel();
    panel.update_filters([("status", "pending"), ("fromDate", "2024-01-01")]);
    assert_eq!(
        to_query_string(&panel.active_filters()),
        "fromDate=2024-01-01&status=pending"
    );
}
