//! Integration tests for the JSON-file-backed store.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use siklus_store::json::JsonStore;
use siklus_store::models::{ApprovalStatus, PhaseUpdateRecord, PlantingInstance};
use siklus_store::repo::{PhaseLedger, PlantingRepository, ReviewStamp};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn empty_store_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert!(store.list_for_planting(Uuid::new_v4()).unwrap().is_empty());
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let planting_id = Uuid::new_v4();

    {
        let store = JsonStore::open(dir.path()).unwrap();
        store
            .insert(PlantingInstance {
                id: planting_id,
                field_name: "Blok Timur".into(),
                variety_id: "kemloko".into(),
                start_date: date(2025, 7, 15),
                created_at: Utc::now(),
            })
            .unwrap();
        store
            .append(PhaseUpdateRecord::new(
                planting_id,
                1,
                date(2025, 7, 20),
                "bibit seragam".into(),
                "pak_budi".into(),
                ApprovalStatus::PendingApproval,
            ))
            .unwrap();
    }

    let store = JsonStore::open(dir.path()).unwrap();
    let plantings = store.list().unwrap();
    assert_eq!(plantings.len(), 1);
    assert_eq!(plantings[0].variety_id, "kemloko");

    let records = store.list_for_planting(planting_id).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].template_sequence, 1);
    assert_eq!(records[0].status, ApprovalStatus::PendingApproval);
}

#[test]
fn transition_is_persisted_and_applied_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path()).unwrap();

    let rec = PhaseUpdateRecord::new(
        Uuid::new_v4(),
        2,
        date(2025, 8, 1),
        "mulai berbunga".into(),
        "pak_budi".into(),
        ApprovalStatus::PendingApproval,
    );
    store.append(rec.clone()).unwrap();

    let rows = store
        .transition_status(
            rec.id,
            ApprovalStatus::PendingApproval,
            ApprovalStatus::Rejected,
            Some(ReviewStamp {
                approver_id: "bu_sri".into(),
                approval_date: Utc::now(),
                approval_note: Some("foto tidak jelas".into()),
            }),
        )
        .unwrap();
    assert_eq!(rows, 1);

    // Terminal record no longer matches pending_approval.
    let rows = store
        .transition_status(
            rec.id,
            ApprovalStatus::PendingApproval,
            ApprovalStatus::Approved,
            None,
        )
        .unwrap();
    assert_eq!(rows, 0);

    let store = JsonStore::open(dir.path()).unwrap();
    let stored = PhaseLedger::get(&store, rec.id).unwrap().unwrap();
    assert_eq!(stored.status, ApprovalStatus::Rejected);
    assert_eq!(stored.approval_note.as_deref(), Some("foto tidak jelas"));
}
