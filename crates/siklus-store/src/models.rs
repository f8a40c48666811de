use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Approval lifecycle state of a phase-update record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Whether this status is terminal. Terminal records are never mutated
    /// again; corrections require a fresh submission.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl FromStr for ApprovalStatus {
    type Err = ApprovalStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ApprovalStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ApprovalStatus`] string.
#[derive(Debug, Clone)]
pub struct ApprovalStatusParseError(pub String);

impl fmt::Display for ApprovalStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid approval status: {:?}", self.0)
    }
}

impl std::error::Error for ApprovalStatusParseError {}

// ---------------------------------------------------------------------------

/// Derived status of one calendar phase entry relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEntryStatus {
    Upcoming,
    Active,
    Completed,
    Delayed,
}

impl fmt::Display for PhaseEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Delayed => "delayed",
        };
        f.write_str(s)
    }
}

impl FromStr for PhaseEntryStatus {
    type Err = PhaseEntryStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "delayed" => Ok(Self::Delayed),
            other => Err(PhaseEntryStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PhaseEntryStatus`] string.
#[derive(Debug, Clone)]
pub struct PhaseEntryStatusParseError(pub String);

impl fmt::Display for PhaseEntryStatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid phase entry status: {:?}", self.0)
    }
}

impl std::error::Error for PhaseEntryStatusParseError {}

// ---------------------------------------------------------------------------

/// Outcome of a human review of a pending phase-update record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    /// The approval status a record lands in after this decision.
    pub fn target_status(self) -> ApprovalStatus {
        match self {
            Self::Approved => ApprovalStatus::Approved,
            Self::Rejected => ApprovalStatus::Rejected,
        }
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

impl FromStr for ReviewDecision {
    type Err = ReviewDecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ReviewDecisionParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ReviewDecision`] string.
#[derive(Debug, Clone)]
pub struct ReviewDecisionParseError(pub String);

impl fmt::Display for ReviewDecisionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid review decision: {:?}", self.0)
    }
}

impl std::error::Error for ReviewDecisionParseError {}

// ---------------------------------------------------------------------------
// Record structs
// ---------------------------------------------------------------------------

/// One planting of one variety on one field, the unit a calendar and a
/// ledger history belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantingInstance {
    pub id: Uuid,
    pub field_name: String,
    pub variety_id: String,
    /// Calendar date the crop went into the ground. Immutable once created;
    /// every day offset in the derived calendar is relative to it.
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// One operator submission reporting that a planting has entered a growth
/// phase. Append-only: after creation, only the review fields may change,
/// and only through the single draft/pending/terminal transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseUpdateRecord {
    pub id: Uuid,
    pub planting_id: Uuid,
    /// Sequence number of the phase template being reported.
    pub template_sequence: u32,
    /// Date the operator observed the phase in the field.
    pub reported_date: NaiveDate,
    /// Free-text crop condition note from the operator.
    pub condition: String,
    pub submitted_by: String,
    pub status: ApprovalStatus,
    pub submitted_at: DateTime<Utc>,
    pub approver_id: Option<String>,
    pub approval_date: Option<DateTime<Utc>>,
    pub approval_note: Option<String>,
}

impl PhaseUpdateRecord {
    /// Build a fresh record in its initial lifecycle state.
    pub fn new(
        planting_id: Uuid,
        template_sequence: u32,
        reported_date: NaiveDate,
        condition: String,
        submitted_by: String,
        status: ApprovalStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            planting_id,
            template_sequence,
            reported_date,
            condition,
            submitted_by,
            status,
            submitted_at: Utc::now(),
            approver_id: None,
            approval_date: None,
            approval_note: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
