//! In-memory store, the reference implementation of the repository traits.
//!
//! Used by tests and available as a backend for embedding. A single mutex
//! guards the whole store, which serializes concurrent submissions so two
//! writers cannot both observe the same ledger tail.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Result, bail};
use uuid::Uuid;

use crate::models::{ApprovalStatus, PhaseUpdateRecord, PlantingInstance};
use crate::repo::{PhaseLedger, PlantingRepository, ReviewStamp};

#[derive(Debug, Default)]
struct Inner {
    plantings: HashMap<Uuid, PlantingInstance>,
    /// Ledger records in insertion order.
    records: Vec<PhaseUpdateRecord>,
}

/// Mutex-guarded in-memory implementation of both repositories.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlantingRepository for MemoryStore {
    fn insert(&self, planting: PlantingInstance) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.plantings.contains_key(&planting.id) {
            bail!("planting {} already exists", planting.id);
        }
        inner.plantings.insert(planting.id, planting);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<PlantingInstance>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.plantings.get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<PlantingInstance>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut plantings: Vec<_> = inner.plantings.values().cloned().collect();
        plantings.sort_by_key(|p| p.created_at);
        Ok(plantings)
    }
}

impl PhaseLedger for MemoryStore {
    fn append(&self, record: PhaseUpdateRecord) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if inner.records.iter().any(|r| r.id == record.id) {
            bail!("ledger record {} already exists", record.id);
        }
        inner.records.push(record);
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<PhaseUpdateRecord>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.records.iter().find(|r| r.id == id).cloned())
    }

    fn list_for_planting(&self, planting_id: Uuid) -> Result<Vec<PhaseUpdateRecord>> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut records: Vec<_> = inner
            .records
            .iter()
            .filter(|r| r.planting_id == planting_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.submitted_at);
        Ok(records)
    }

    fn transition_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
        review: Option<ReviewStamp>,
    ) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(record) = inner.records.iter_mut().find(|r| r.id == id) else {
            return Ok(0);
        };
        if record.status != from {
            return Ok(0);
        }
        record.status = to;
        if let Some(stamp) = review {
            record.approver_id = Some(stamp.approver_id);
            record.approval_date = Some(stamp.approval_date);
            record.approval_note = stamp.approval_note;
        }
        Ok(1)
    }
}
