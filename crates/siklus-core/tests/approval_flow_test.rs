//! End-to-end submission and review flows over the in-memory store.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use siklus_core::catalog::PhaseCatalog;
use siklus_core::error::{InvalidStateError, ValidationError};
use siklus_core::ledger::{SubmitRequest, finalize, review, submit};
use siklus_core::sequencer::latest_confirmed;
use siklus_store::memory::MemoryStore;
use siklus_store::models::{ApprovalStatus, PlantingInstance, ReviewDecision};
use siklus_store::repo::{PhaseLedger, PlantingRepository};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn seed_planting(store: &MemoryStore, variety_id: &str) -> Uuid {
    let id = Uuid::new_v4();
    store
        .insert(PlantingInstance {
            id,
            field_name: "Blok Utara".into(),
            variety_id: variety_id.into(),
            start_date: date(2025, 7, 15),
            created_at: Utc::now(),
        })
        .unwrap();
    id
}

fn request(planting_id: Uuid, sequence: u32) -> SubmitRequest {
    SubmitRequest {
        planting_id,
        template_sequence: sequence,
        reported_date: date(2025, 7, 30),
        condition: "pertumbuhan seragam".into(),
        submitted_by: "pak_budi".into(),
        as_draft: false,
    }
}

#[test]
fn submit_then_approve() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let planting_id = seed_planting(&store, "kemloko");

    let record = submit(&store, &store, &catalog, request(planting_id, 1)).unwrap();
    assert_eq!(record.status, ApprovalStatus::PendingApproval);

    let reviewed = review(
        &store,
        record.id,
        "bu_sri",
        ReviewDecision::Approved,
        Some("sesuai foto lapangan".into()),
    )
    .unwrap();
    assert_eq!(reviewed.status, ApprovalStatus::Approved);
    assert_eq!(reviewed.approver_id.as_deref(), Some("bu_sri"));
    assert!(reviewed.approval_date.is_some());

    let records = store.list_for_planting(planting_id).unwrap();
    assert_eq!(latest_confirmed(&records, planting_id), Some(1));
}

#[test]
fn terminal_record_cannot_be_reviewed_again() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let planting_id = seed_planting(&store, "kemloko");

    let record = submit(&store, &store, &catalog, request(planting_id, 1)).unwrap();
    review(&store, record.id, "bu_sri", ReviewDecision::Rejected, None).unwrap();

    let err = review(&store, record.id, "bu_sri", ReviewDecision::Approved, None).unwrap_err();
    let state_err = err
        .downcast_ref::<InvalidStateError>()
        .expect("should be an InvalidStateError");
    assert!(matches!(
        state_err,
        InvalidStateError::AlreadyReviewed {
            status: ApprovalStatus::Rejected,
            ..
        }
    ));
}

#[test]
fn rejection_keeps_audit_trail_and_allows_resubmission() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let planting_id = seed_planting(&store, "kemloko");

    let first = submit(&store, &store, &catalog, request(planting_id, 2)).unwrap();
    review(
        &store,
        first.id,
        "bu_sri",
        ReviewDecision::Rejected,
        Some("foto tidak jelas".into()),
    )
    .unwrap();

    // Same phase, new record: the rejected one never blocks resubmission.
    let second = submit(&store, &store, &catalog, request(planting_id, 2)).unwrap();
    let approved = review(&store, second.id, "bu_sri", ReviewDecision::Approved, None).unwrap();
    assert_eq!(approved.status, ApprovalStatus::Approved);

    // Both records remain in the ledger.
    let records = store.list_for_planting(planting_id).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].status, ApprovalStatus::Rejected);
    assert_eq!(records[0].approval_note.as_deref(), Some("foto tidak jelas"));
    assert_eq!(latest_confirmed(&records, planting_id), Some(2));
}

#[test]
fn draft_is_invisible_until_finalized() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let planting_id = seed_planting(&store, "kemloko");

    let mut req = request(planting_id, 1);
    req.as_draft = true;
    let draft = submit(&store, &store, &catalog, req).unwrap();
    assert_eq!(draft.status, ApprovalStatus::Draft);

    // Drafts cannot be reviewed.
    let err = review(&store, draft.id, "bu_sri", ReviewDecision::Approved, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidStateError>(),
        Some(InvalidStateError::DraftNotReviewable { .. })
    ));

    let pending = finalize(&store, draft.id).unwrap();
    assert_eq!(pending.status, ApprovalStatus::PendingApproval);

    // Finalizing twice is an error.
    let err = finalize(&store, draft.id).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidStateError>(),
        Some(InvalidStateError::NotADraft { .. })
    ));

    review(&store, draft.id, "bu_sri", ReviewDecision::Approved, None).unwrap();
}

#[test]
fn submit_rejects_unknown_planting() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let ghost = Uuid::new_v4();

    let err = submit(&store, &store, &catalog, request(ghost, 1)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidStateError>(),
        Some(InvalidStateError::UnknownPlanting(id)) if *id == ghost
    ));
}

#[test]
fn submit_rejects_unknown_template_sequence() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    let planting_id = seed_planting(&store, "kemloko");

    let err = submit(&store, &store, &catalog, request(planting_id, 99)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::UnknownTemplate { sequence: 99, .. })
    ));
}

#[test]
fn submit_rejects_phase_of_other_variety() {
    let store = MemoryStore::new();
    let catalog = PhaseCatalog::builtin_tobacco();
    // Topping (sequence 6) only applies to virginia.
    let planting_id = seed_planting(&store, "kemloko");

    let err = submit(&store, &store, &catalog, request(planting_id, 6)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::UnknownTemplate { sequence: 6, .. })
    ));

    // The same phase is legal for a virginia planting.
    let virginia = seed_planting(&store, "virginia");
    assert!(submit(&store, &store, &catalog, request(virginia, 6)).is_ok());
}

#[test]
fn review_of_missing_record_is_reported() {
    let store = MemoryStore::new();
    let ghost = Uuid::new_v4();
    let err = review(&store, ghost, "bu_sri", ReviewDecision::Approved, None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InvalidStateError>(),
        Some(InvalidStateError::UnknownRecord(id)) if *id == ghost
    ));
}
