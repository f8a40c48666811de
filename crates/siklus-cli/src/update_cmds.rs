//! `siklus submit`, `finalize`, `review`, and `history` commands: the
//! phase-update lifecycle from the operator's and the reviewer's side.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use uuid::Uuid;

use siklus_core::catalog::PhaseCatalog;
use siklus_core::ledger::{SubmitRequest, finalize, review, submit};
use siklus_store::json::JsonStore;
use siklus_store::models::{PhaseUpdateRecord, ReviewDecision};
use siklus_store::repo::PhaseLedger;

use crate::resolve;

/// Run the submit command.
#[allow(clippy::too_many_arguments)]
pub fn run_submit(
    store: &JsonStore,
    catalog: &PhaseCatalog,
    planting_id_str: &str,
    phase: u32,
    condition: &str,
    submitted_by: &str,
    date: Option<NaiveDate>,
    draft: bool,
) -> Result<()> {
    let planting = resolve::resolve_planting(store, planting_id_str)?;

    let record = submit(
        store,
        store,
        catalog,
        SubmitRequest {
            planting_id: planting.id,
            template_sequence: phase,
            reported_date: resolve::reference_date(date),
            condition: condition.to_owned(),
            submitted_by: submitted_by.to_owned(),
            as_draft: draft,
        },
    )?;

    println!("Recorded update {}", record.id);
    print_record(&record);
    if draft {
        println!("Saved as draft; run `siklus finalize {}` to send for review.", record.id);
    }
    Ok(())
}

/// Run the finalize command: draft to pending_approval.
pub fn run_finalize(store: &JsonStore, record_id_str: &str) -> Result<()> {
    let record_id = parse_record_id(record_id_str)?;
    let record = finalize(store, record_id)?;
    println!("Update {} sent for review", record.id);
    Ok(())
}

/// Run the review command.
pub fn run_review(
    store: &JsonStore,
    record_id_str: &str,
    approver: &str,
    approve: bool,
    reject: bool,
    note: Option<String>,
) -> Result<()> {
    let decision = match (approve, reject) {
        (true, false) => ReviewDecision::Approved,
        (false, true) => ReviewDecision::Rejected,
        _ => bail!("pass exactly one of --approve or --reject"),
    };

    let record_id = parse_record_id(record_id_str)?;
    let record = review(store, record_id, approver, decision, note)?;
    println!("Update {} is now {}", record.id, record.status);
    Ok(())
}

/// Run the history command: the full audit trail for a planting.
pub fn run_history(store: &JsonStore, planting_id_str: &str) -> Result<()> {
    let planting = resolve::resolve_planting(store, planting_id_str)?;
    let records = store.list_for_planting(planting.id)?;

    if records.is_empty() {
        println!("No phase updates for planting {} yet.", planting.id);
        return Ok(());
    }

    println!("Update history for planting {} ({}):", planting.id, planting.field_name);
    println!();
    for record in &records {
        print_record(record);
        println!();
    }
    Ok(())
}

fn parse_record_id(record_id_str: &str) -> Result<Uuid> {
    Uuid::parse_str(record_id_str).with_context(|| format!("invalid record ID: {record_id_str}"))
}

fn print_record(record: &PhaseUpdateRecord) {
    println!(
        "  {}  phase {}  {}  reported {}",
        record.id, record.template_sequence, record.status, record.reported_date
    );
    println!("    condition: {}", record.condition);
    println!("    submitted by {} at {}", record.submitted_by, record.submitted_at.format("%Y-%m-%d %H:%M UTC"));
    if let Some(approver) = &record.approver_id {
        let when = record
            .approval_date
            .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("    reviewed by {approver} at {when}");
    }
    if let Some(note) = &record.approval_note {
        println!("    note: {note}");
    }
}
