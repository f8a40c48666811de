//! Phase-update service: submission and review over the append-only ledger.
//!
//! Enforces the approval lifecycle:
//!
//! ```text
//! draft            -> pending_approval  (finalize)
//! pending_approval -> approved          (review)
//! pending_approval -> rejected          (review)
//! ```
//!
//! Approved and rejected are terminal. A rejected record stays in the
//! ledger for audit; the operator corrects by submitting a new record, not
//! by editing the old one. Review uses the store's compare-and-set
//! transition so two concurrent reviewers cannot both land a decision.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use siklus_store::models::{ApprovalStatus, PhaseUpdateRecord, ReviewDecision};
use siklus_store::repo::{PhaseLedger, PlantingRepository, ReviewStamp};

use crate::catalog::PhaseCatalog;
use crate::error::{InvalidStateError, ValidationError};

/// The approval lifecycle state machine.
pub struct ApprovalStateMachine;

impl ApprovalStateMachine {
    /// Check whether a transition from `from` to `to` is a valid edge in
    /// the lifecycle graph. Terminal states have no outgoing edges.
    pub fn is_valid_transition(from: ApprovalStatus, to: ApprovalStatus) -> bool {
        matches!(
            (from, to),
            (ApprovalStatus::Draft, ApprovalStatus::PendingApproval)
                | (ApprovalStatus::PendingApproval, ApprovalStatus::Approved)
                | (ApprovalStatus::PendingApproval, ApprovalStatus::Rejected)
        )
    }
}

/// A new phase-update submission.
#[derive(Debug, Clone)]
pub struct SubmitRequest {
    pub planting_id: Uuid,
    pub template_sequence: u32,
    /// Date the operator observed the phase in the field.
    pub reported_date: NaiveDate,
    pub condition: String,
    pub submitted_by: String,
    /// Save as a draft instead of sending straight to review.
    pub as_draft: bool,
}

/// Submit a phase update for a planting.
///
/// Validates that the planting exists and that `template_sequence` names a
/// phase applicable to the planting's variety, then appends the record in
/// `pending_approval` (or `draft` when requested). Prior rejected records
/// for the same phase never block resubmission.
pub fn submit(
    plantings: &dyn PlantingRepository,
    ledger: &dyn PhaseLedger,
    catalog: &PhaseCatalog,
    request: SubmitRequest,
) -> Result<PhaseUpdateRecord> {
    let planting = plantings
        .get(request.planting_id)?
        .ok_or(InvalidStateError::UnknownPlanting(request.planting_id))?;

    if !catalog.has_template_for(request.template_sequence, &planting.variety_id) {
        return Err(ValidationError::UnknownTemplate {
            sequence: request.template_sequence,
            variety_id: planting.variety_id,
        }
        .into());
    }

    let status = if request.as_draft {
        ApprovalStatus::Draft
    } else {
        ApprovalStatus::PendingApproval
    };

    let record = PhaseUpdateRecord::new(
        request.planting_id,
        request.template_sequence,
        request.reported_date,
        request.condition,
        request.submitted_by,
        status,
    );
    ledger.append(record.clone())?;

    tracing::info!(
        record_id = %record.id,
        planting_id = %record.planting_id,
        sequence = record.template_sequence,
        %status,
        "phase update submitted"
    );
    Ok(record)
}

/// Promote a draft to `pending_approval`.
pub fn finalize(ledger: &dyn PhaseLedger, record_id: Uuid) -> Result<PhaseUpdateRecord> {
    let record = ledger
        .get(record_id)?
        .ok_or(InvalidStateError::UnknownRecord(record_id))?;

    if record.status != ApprovalStatus::Draft {
        return Err(InvalidStateError::NotADraft {
            id: record_id,
            status: record.status,
        }
        .into());
    }

    debug_assert!(ApprovalStateMachine::is_valid_transition(
        ApprovalStatus::Draft,
        ApprovalStatus::PendingApproval
    ));
    let rows = ledger.transition_status(
        record_id,
        ApprovalStatus::Draft,
        ApprovalStatus::PendingApproval,
        None,
    )?;
    if rows == 0 {
        return Err(concurrent_or_missing(ledger, record_id, ApprovalStatus::Draft)?.into());
    }

    tracing::info!(record_id = %record_id, "draft finalized for review");
    fetch(ledger, record_id)
}

/// Review a pending record, landing it in a terminal status exactly once.
///
/// Drafts are not reviewable; terminal records fail with the specific
/// already-reviewed state so the operator sees which decision stands.
pub fn review(
    ledger: &dyn PhaseLedger,
    record_id: Uuid,
    approver_id: &str,
    decision: ReviewDecision,
    note: Option<String>,
) -> Result<PhaseUpdateRecord> {
    let record = ledger
        .get(record_id)?
        .ok_or(InvalidStateError::UnknownRecord(record_id))?;

    match record.status {
        ApprovalStatus::Draft => {
            return Err(InvalidStateError::DraftNotReviewable { id: record_id }.into());
        }
        ApprovalStatus::Approved | ApprovalStatus::Rejected => {
            return Err(InvalidStateError::AlreadyReviewed {
                id: record_id,
                status: record.status,
            }
            .into());
        }
        ApprovalStatus::PendingApproval => {}
    }

    debug_assert!(ApprovalStateMachine::is_valid_transition(
        ApprovalStatus::PendingApproval,
        decision.target_status()
    ));
    let rows = ledger.transition_status(
        record_id,
        ApprovalStatus::PendingApproval,
        decision.target_status(),
        Some(ReviewStamp {
            approver_id: approver_id.to_owned(),
            approval_date: Utc::now(),
            approval_note: note,
        }),
    )?;
    if rows == 0 {
        return Err(
            concurrent_or_missing(ledger, record_id, ApprovalStatus::PendingApproval)?.into(),
        );
    }

    tracing::info!(
        record_id = %record_id,
        approver = approver_id,
        %decision,
        "phase update reviewed"
    );
    fetch(ledger, record_id)
}

fn fetch(ledger: &dyn PhaseLedger, record_id: Uuid) -> Result<PhaseUpdateRecord> {
    ledger
        .get(record_id)?
        .ok_or_else(|| InvalidStateError::UnknownRecord(record_id).into())
}

/// A compare-and-set that touched nothing means either the record vanished
/// or another writer got there first; re-fetch to report which.
fn concurrent_or_missing(
    ledger: &dyn PhaseLedger,
    record_id: Uuid,
    expected: ApprovalStatus,
) -> Result<InvalidStateError> {
    match ledger.get(record_id)? {
        None => Ok(InvalidStateError::UnknownRecord(record_id)),
        Some(_) => Ok(InvalidStateError::ConcurrentTransition {
            id: record_id,
            expected,
        }),
    }
}
