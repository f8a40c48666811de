//! Repository traits for the planting registry and the phase-update ledger.
//!
//! Implementations serialize writes internally; callers never lock. The
//! ledger trait deliberately has no general update and no delete: the only
//! mutation is [`PhaseLedger::transition_status`], a compare-and-set on the
//! approval status that the service layer uses for optimistic locking.

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{ApprovalStatus, PhaseUpdateRecord, PlantingInstance};

/// Review metadata stamped onto a record when it reaches a terminal status.
#[derive(Debug, Clone)]
pub struct ReviewStamp {
    pub approver_id: String,
    pub approval_date: DateTime<Utc>,
    pub approval_note: Option<String>,
}

/// Registry of planting instances. Insert-only; a planting's start date is
/// immutable once recorded.
pub trait PlantingRepository: Send + Sync {
    /// Insert a new planting. Fails if the id already exists.
    fn insert(&self, planting: PlantingInstance) -> Result<()>;

    /// Fetch a single planting by id.
    fn get(&self, id: Uuid) -> Result<Option<PlantingInstance>>;

    /// List all plantings, ordered by creation time.
    fn list(&self) -> Result<Vec<PlantingInstance>>;
}

/// Append-only ledger of phase-update records.
pub trait PhaseLedger: Send + Sync {
    /// Append a new record. Fails if the id already exists.
    fn append(&self, record: PhaseUpdateRecord) -> Result<()>;

    /// Fetch a single record by id.
    fn get(&self, id: Uuid) -> Result<Option<PhaseUpdateRecord>>;

    /// All records for one planting, ordered by submission time ascending.
    /// Includes drafts and rejected records; the full audit trail.
    fn list_for_planting(&self, planting_id: Uuid) -> Result<Vec<PhaseUpdateRecord>>;

    /// Compare-and-set the approval status of a record: the transition is
    /// applied only if the stored status equals `from`. Returns the number
    /// of records updated (0 or 1); 0 means either the record does not
    /// exist or its status no longer matches `from`, and the caller
    /// re-fetches to tell the two apart.
    ///
    /// `review` is stamped onto the record when `to` is terminal.
    fn transition_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
        review: Option<ReviewStamp>,
    ) -> Result<u64>;
}
