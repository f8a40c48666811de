//! Domain error taxonomy.
//!
//! Three families, raised synchronously at the function boundary and never
//! retried internally: malformed input, a broken catalog, and illegal
//! lifecycle transitions. Messages name the violated invariant so the
//! operator-facing surface can show more than a generic failure.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use siklus_store::models::ApprovalStatus;

/// Malformed or out-of-range input.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("reference date {now} is before planting date {start_date}; plant age cannot be negative")]
    NegativeAge { start_date: NaiveDate, now: NaiveDate },

    #[error("phase sequence {sequence} is not in the catalog for variety {variety_id:?}")]
    UnknownTemplate { sequence: u32, variety_id: String },
}

/// A structurally invalid phase catalog.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("phase catalog is empty")]
    EmptyCatalog,

    #[error("phase sequences must be strictly increasing: {previous} is followed by {current}")]
    NonMonotonicSequence { previous: u32, current: u32 },

    #[error("phase {sequence} has an inverted day window: day_start {day_start} must be less than day_end {day_end}")]
    InvertedWindow {
        sequence: u32,
        day_start: u32,
        day_end: u32,
    },

    #[error("activity {name:?} in phase {sequence} has day offset {offset} outside the phase duration {duration}")]
    ActivityOutsidePhase {
        sequence: u32,
        name: String,
        offset: u32,
        duration: u32,
    },

    #[error("templates passed to the calendar generator must be sorted ascending by sequence")]
    UnsortedTemplates,
}

/// An operation applied to a record or planting in the wrong lifecycle state.
#[derive(Debug, Error)]
pub enum InvalidStateError {
    #[error("planting {0} not found")]
    UnknownPlanting(Uuid),

    #[error("phase update record {0} not found")]
    UnknownRecord(Uuid),

    #[error(
        "record {id} is already {status}; terminal records cannot be re-reviewed, submit a new update instead"
    )]
    AlreadyReviewed { id: Uuid, status: ApprovalStatus },

    #[error("record {id} is a draft; finalize it before review")]
    DraftNotReviewable { id: Uuid },

    #[error("record {id} is {status}, not a draft; only drafts can be finalized")]
    NotADraft { id: Uuid, status: ApprovalStatus },

    #[error("record {id} was reviewed concurrently; expected status {expected}")]
    ConcurrentTransition { id: Uuid, expected: ApprovalStatus },
}
