//! Calendar status tracker: fills in per-entry status and progress for a
//! reference date.
//!
//! Date-only rules decide upcoming/active/completed. The single point where
//! calendar and ledger interact is the `delayed` override: a phase whose
//! window has already closed but which the approved history never confirmed
//! is delayed, not completed, because the ledger, not the calendar, is the
//! authority for actual progress.

use chrono::NaiveDate;

use siklus_store::models::{PhaseEntryStatus, PhaseUpdateRecord};

use super::{CalendarInstance, CalendarPhaseEntry};
use crate::sequencer;

/// Return a copy of `calendar` with status and progress derived for `now`,
/// consulting the planting's ledger records for the delayed override.
pub fn apply_status(
    calendar: &CalendarInstance,
    records: &[PhaseUpdateRecord],
    now: NaiveDate,
) -> CalendarInstance {
    let latest_confirmed = sequencer::latest_confirmed(records, calendar.planting_id);

    let entries = calendar
        .entries
        .iter()
        .map(|entry| {
            let status = entry_status(entry, latest_confirmed, now);
            CalendarPhaseEntry {
                status,
                progress: entry_progress(entry, status, now),
                ..entry.clone()
            }
        })
        .collect();

    CalendarInstance {
        entries,
        ..calendar.clone()
    }
}

fn entry_status(
    entry: &CalendarPhaseEntry,
    latest_confirmed: Option<u32>,
    now: NaiveDate,
) -> PhaseEntryStatus {
    if now > entry.absolute_end {
        // Window closed. Completed only if the approved history reached at
        // least this phase; otherwise the crop is lagging its calendar.
        let confirmed = latest_confirmed.is_some_and(|seq| seq >= entry.template_sequence);
        if confirmed {
            PhaseEntryStatus::Completed
        } else {
            PhaseEntryStatus::Delayed
        }
    } else if now >= entry.absolute_start {
        PhaseEntryStatus::Active
    } else {
        PhaseEntryStatus::Upcoming
    }
}

fn entry_progress(entry: &CalendarPhaseEntry, status: PhaseEntryStatus, now: NaiveDate) -> u8 {
    match status {
        PhaseEntryStatus::Completed => 100,
        PhaseEntryStatus::Active => {
            let duration = entry.duration_days();
            if duration <= 0 {
                return 100;
            }
            let elapsed = (now - entry.absolute_start).num_days();
            (elapsed * 100 / duration).clamp(0, 100) as u8
        }
        PhaseEntryStatus::Upcoming | PhaseEntryStatus::Delayed => 0,
    }
}
