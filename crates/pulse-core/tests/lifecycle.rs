//! End-to-end lifecycle scenarios exercising the store and projections
//! together, the way a dashboard session would.

use chrono::NaiveDate;
use pulse_core::query::{self, ItemFilter, Severity};
use pulse_core::{Priority, Store, StoreError};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid date")
}

#[test]
fn add_toggle_delete_session() {
    let mut store = Store::seeded();

    let added = store
        .add_item("Write spec", "Design", Priority::Medium, today())
        .expect("add");
    assert_eq!(added.id, 6);

    store.toggle_complete(added.id).expect("complete");
    let completed = query::filter_items(&store, &ItemFilter::Completed);
    assert!(completed.iter().any(|i| i.id == added.id));

    store.delete_item(added.id).expect("delete");
    assert!(matches!(
        store.item(added.id),
        Err(StoreError::NotFound { .. })
    ));

    // The rest of the store is untouched.
    assert_eq!(store.items().len(), 5);
}

#[test]
fn counts_track_mutations() {
    let mut store = Store::seeded();
    let before = query::aggregate_counts(&store);

    store.toggle_complete(1).expect("complete");
    let after = query::aggregate_counts(&store);

    assert_eq!(after.completed, before.completed + 1);
    assert_eq!(after.pending, before.pending - 1);
    assert_eq!(after.total, before.total);
    assert_eq!(after.completed_percent, 40);
}

#[test]
fn emptying_the_store_never_divides_by_zero() {
    let mut store = Store::seeded();
    let ids: Vec<u64> = store.items().iter().map(|i| i.id).collect();
    for id in ids {
        store.delete_item(id).expect("delete");
    }
    let counts = query::aggregate_counts(&store);
    assert_eq!(counts.total, 0);
    assert_eq!(counts.completed_percent, 0);
}

#[test]
fn drifted_workloads_still_classify() {
    let mut store = Store::seeded();
    store.update_member_workload(3, -30).expect("update");
    let member = store.member(3).expect("member");
    assert_eq!(member.workload, 15);
    assert_eq!(query::workload_severity(member.workload), Severity::Low);
}

#[test]
fn snapshot_is_isolated_from_later_mutations() {
    let mut store = Store::seeded();
    let snapshot = store.snapshot();
    store.delete_item(1).expect("delete");

    assert!(snapshot.item(1).is_ok());
    assert_eq!(query::aggregate_counts(&snapshot).total, 5);
    assert_eq!(query::aggregate_counts(&store).total, 4);
}

#[test]
fn error_codes_are_stable_at_the_boundary() {
    let mut store = Store::seeded();
    let not_found = store.toggle_complete(404).expect_err("missing id");
    assert_eq!(not_found.code(), "E2001");

    let invalid = store
        .add_item("", "Design", Priority::Low, today())
        .expect_err("blank title");
    assert_eq!(invalid.code(), "E4001");

    let bad_enum = "someday".parse::<Priority>().expect_err("bad priority");
    assert_eq!(bad_enum.code(), "E2005");
}
