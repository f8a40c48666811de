//! Integration tests for the in-memory ledger: append-only discipline and
//! the compare-and-set status transition.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use siklus_store::memory::MemoryStore;
use siklus_store::models::{ApprovalStatus, PhaseUpdateRecord, PlantingInstance};
use siklus_store::repo::{PhaseLedger, PlantingRepository, ReviewStamp};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn record(planting_id: Uuid, sequence: u32) -> PhaseUpdateRecord {
    PhaseUpdateRecord::new(
        planting_id,
        sequence,
        date(2025, 7, 20),
        "daun sehat".into(),
        "pak_budi".into(),
        ApprovalStatus::PendingApproval,
    )
}

fn stamp() -> ReviewStamp {
    ReviewStamp {
        approver_id: "bu_sri".into(),
        approval_date: Utc::now(),
        approval_note: None,
    }
}

#[test]
fn append_and_list_preserves_submission_order() {
    let store = MemoryStore::new();
    let planting_id = Uuid::new_v4();

    let first = record(planting_id, 1);
    let second = record(planting_id, 2);
    let other = record(Uuid::new_v4(), 1);

    store.append(first.clone()).unwrap();
    store.append(second.clone()).unwrap();
    store.append(other).unwrap();

    let records = store.list_for_planting(planting_id).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[1].id, second.id);
}

#[test]
fn duplicate_append_is_rejected() {
    let store = MemoryStore::new();
    let rec = record(Uuid::new_v4(), 1);
    store.append(rec.clone()).unwrap();
    assert!(store.append(rec).is_err());
}

#[test]
fn transition_applies_exactly_once() {
    let store = MemoryStore::new();
    let rec = record(Uuid::new_v4(), 1);
    store.append(rec.clone()).unwrap();

    let rows = store
        .transition_status(
            rec.id,
            ApprovalStatus::PendingApproval,
            ApprovalStatus::Approved,
            Some(stamp()),
        )
        .unwrap();
    assert_eq!(rows, 1);

    // Second reviewer raced and lost: the stored status no longer matches.
    let rows = store
        .transition_status(
            rec.id,
            ApprovalStatus::PendingApproval,
            ApprovalStatus::Rejected,
            Some(stamp()),
        )
        .unwrap();
    assert_eq!(rows, 0);

    let stored = PhaseLedger::get(&store, rec.id).unwrap().unwrap();
    assert_eq!(stored.status, ApprovalStatus::Approved);
    assert_eq!(stored.approver_id.as_deref(), Some("bu_sri"));
    assert!(stored.approval_date.is_some());
}

#[test]
fn transition_of_missing_record_touches_nothing() {
    let store = MemoryStore::new();
    let rows = store
        .transition_status(
            Uuid::new_v4(),
            ApprovalStatus::PendingApproval,
            ApprovalStatus::Approved,
            None,
        )
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn planting_registry_is_insert_only() {
    let store = MemoryStore::new();
    let planting = PlantingInstance {
        id: Uuid::new_v4(),
        field_name: "Blok A".into(),
        variety_id: "kemloko".into(),
        start_date: date(2025, 7, 15),
        created_at: Utc::now(),
    };
    store.insert(planting.clone()).unwrap();
    assert!(store.insert(planting.clone()).is_err());

    let fetched = PlantingRepository::get(&store, planting.id).unwrap().unwrap();
    assert_eq!(fetched.start_date, planting.start_date);
    assert_eq!(store.list().unwrap().len(), 1);
}
