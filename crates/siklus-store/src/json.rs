//! JSON-file-backed store for the CLI.
//!
//! The whole store is one JSON document on disk, reloaded per operation and
//! rewritten after every mutation. A mutex serializes writers; writes go
//! through a temp file in the same directory followed by a rename so a
//! crash never leaves a half-written document behind.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ApprovalStatus, PhaseUpdateRecord, PlantingInstance};
use crate::repo::{PhaseLedger, PlantingRepository, ReviewStamp};

/// On-disk document shape.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    plantings: Vec<PlantingInstance>,
    records: Vec<PhaseUpdateRecord>,
}

/// File-backed implementation of both repositories.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles against the document.
    write_lock: Mutex<()>,
}

impl JsonStore {
    /// Open (or lazily create) the store at `dir/siklus.json`.
    pub fn open(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create data directory {}", dir.display()))?;
        Ok(Self {
            path: dir.join("siklus.json"),
            write_lock: Mutex::new(()),
        })
    }

    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read store file {}", self.path.display()))?;
        let doc: Document = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse store file {}", self.path.display()))?;
        Ok(doc)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let contents = serde_json::to_string_pretty(doc).context("failed to serialize store")?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("failed to write store file {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace store file {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "store file written");
        Ok(())
    }
}

impl PlantingRepository for JsonStore {
    fn insert(&self, planting: PlantingInstance) -> Result<()> {
        let _guard = self.write_lock.lock().expect("store mutex poisoned");
        let mut doc = self.load()?;
        if doc.plantings.iter().any(|p| p.id == planting.id) {
            bail!("planting {} already exists", planting.id);
        }
        doc.plantings.push(planting);
        self.save(&doc)
    }

    fn get(&self, id: Uuid) -> Result<Option<PlantingInstance>> {
        let doc = self.load()?;
        Ok(doc.plantings.into_iter().find(|p| p.id == id))
    }

    fn list(&self) -> Result<Vec<PlantingInstance>> {
        let mut plantings = self.load()?.plantings;
        plantings.sort_by_key(|p| p.created_at);
        Ok(plantings)
    }
}

impl PhaseLedger for JsonStore {
    fn append(&self, record: PhaseUpdateRecord) -> Result<()> {
        let _guard = self.write_lock.lock().expect("store mutex poisoned");
        let mut doc = self.load()?;
        if doc.records.iter().any(|r| r.id == record.id) {
            bail!("ledger record {} already exists", record.id);
        }
        doc.records.push(record);
        self.save(&doc)
    }

    fn get(&self, id: Uuid) -> Result<Option<PhaseUpdateRecord>> {
        let doc = self.load()?;
        Ok(doc.records.into_iter().find(|r| r.id == id))
    }

    fn list_for_planting(&self, planting_id: Uuid) -> Result<Vec<PhaseUpdateRecord>> {
        let mut records: Vec<_> = self
            .load()?
            .records
            .into_iter()
            .filter(|r| r.planting_id == planting_id)
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
        let _guard = self.write_lock.lock().expect("store mutex poisoned");
        let mut doc = self.load()?;
        let Some(record) = doc.records.iter_mut().find(|r| r.id == id) else {
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
        self.save(&doc)?;
        Ok(1)
    }
}
