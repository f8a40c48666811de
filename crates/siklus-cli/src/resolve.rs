//! Shared argument resolution for commands that address a planting.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use siklus_core::catalog::{PhaseCatalog, PhaseTemplate, Variety};
use siklus_store::json::JsonStore;
use siklus_store::models::PlantingInstance;
use siklus_store::repo::PlantingRepository;

/// Parse a planting id and fetch the planting.
pub fn resolve_planting(store: &JsonStore, id_str: &str) -> Result<PlantingInstance> {
    let id = Uuid::parse_str(id_str).with_context(|| format!("invalid planting ID: {id_str}"))?;
    store
        .get(id)?
        .with_context(|| format!("planting {id} not found"))
}

/// Look up the planting's variety and its applicable templates.
pub fn resolve_variety<'a>(
    catalog: &'a PhaseCatalog,
    planting: &PlantingInstance,
) -> Result<(&'a Variety, Vec<&'a PhaseTemplate>)> {
    let variety = catalog.variety(&planting.variety_id).with_context(|| {
        format!(
            "variety {:?} of planting {} is not in the catalog",
            planting.variety_id, planting.id
        )
    })?;
    Ok((variety, catalog.templates_for_variety(&variety.id)))
}

/// The reference date for a command: the `--on` flag or today.
pub fn reference_date(on: Option<NaiveDate>) -> NaiveDate {
    on.unwrap_or_else(|| chrono::Utc::now().date_naive())
}
