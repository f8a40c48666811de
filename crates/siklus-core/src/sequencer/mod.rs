//! Phase sequencer: derives confirmed progress from the ledger and
//! recommends the next legitimate growth phase.
//!
//! The sequencer is a gated, forward-only, human-approved state machine.
//! Elapsed time alone never advances state: a phase becomes current only
//! through an approved submission, and a successor is recommended only once
//! its day window has opened. States are the ordered template sequences
//! plus the implicit terminal state beyond the last phase.

use chrono::NaiveDate;
use uuid::Uuid;

use siklus_store::models::{ApprovalStatus, PhaseUpdateRecord};

use crate::catalog::PhaseTemplate;
use crate::error::ValidationError;

/// Plant age in whole days between planting and the reference date.
///
/// A reference date before the planting date is invalid input, not a
/// zero-day-old crop.
pub fn plant_age_days(start_date: NaiveDate, now: NaiveDate) -> Result<i64, ValidationError> {
    let age = (now - start_date).num_days();
    if age < 0 {
        return Err(ValidationError::NegativeAge { start_date, now });
    }
    Ok(age)
}

/// Highest approved phase sequence for one planting, or `None` when
/// nothing has been confirmed yet.
///
/// The maximum, not the chronologically latest: an out-of-order approval of
/// an earlier phase never regresses confirmed progress. Rejected and draft
/// records never count.
pub fn latest_confirmed(records: &[PhaseUpdateRecord], planting_id: Uuid) -> Option<u32> {
    records
        .iter()
        .filter(|r| r.planting_id == planting_id && r.status == ApprovalStatus::Approved)
        .map(|r| r.template_sequence)
        .max()
}

/// Recommend the next eligible growth phase for a planting.
///
/// `templates` must be the variety-filtered, sequence-ordered list from the
/// catalog. Returns:
///
/// - with no confirmed history, the template whose day window contains the
///   plant age, falling back to the first template;
/// - with confirmed history, the successor of the highest approved phase,
///   but only once the plant age has reached its window
///   (`None` means too early, no action needed yet);
/// - `None` when the highest approved phase has no successor: the crop has
///   reached its terminal phase and is ready for harvest.
pub fn recommend_next_phase<'a>(
    templates: &[&'a PhaseTemplate],
    records: &[PhaseUpdateRecord],
    planting_id: Uuid,
    start_date: NaiveDate,
    now: NaiveDate,
) -> Result<Option<&'a PhaseTemplate>, ValidationError> {
    let age = plant_age_days(start_date, now)?;

    let Some(confirmed) = latest_confirmed(records, planting_id) else {
        let by_age = templates.iter().find(|t| t.contains_age(age)).copied();
        return Ok(by_age.or_else(|| templates.first().copied()));
    };

    // Successor of the confirmed phase. Strictly greater, never equal:
    // the sequencer must not recommend a phase that is already confirmed.
    let Some(candidate) = templates.iter().find(|t| t.sequence > confirmed).copied() else {
        tracing::debug!(%planting_id, confirmed, "terminal phase confirmed, ready for harvest");
        return Ok(None);
    };

    if age >= i64::from(candidate.day_start) {
        Ok(Some(candidate))
    } else {
        tracing::debug!(
            %planting_id,
            candidate = candidate.sequence,
            age,
            opens = candidate.day_start,
            "next phase window not yet open"
        );
        Ok(None)
    }
}
