//! `siklus planting` commands: register and list plantings.

use anyhow::{Result, bail};
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use siklus_core::catalog::PhaseCatalog;
use siklus_store::json::JsonStore;
use siklus_store::models::PlantingInstance;
use siklus_store::repo::PlantingRepository;

/// Register a new planting.
pub fn run_add(
    store: &JsonStore,
    catalog: &PhaseCatalog,
    field: &str,
    variety_id: &str,
    start_date: NaiveDate,
) -> Result<()> {
    let Some(variety) = catalog.variety(variety_id) else {
        bail!("unknown variety: {variety_id}");
    };

    let planting = PlantingInstance {
        id: Uuid::new_v4(),
        field_name: field.to_owned(),
        variety_id: variety_id.to_owned(),
        start_date,
        created_at: Utc::now(),
    };
    store.insert(planting.clone())?;

    println!("Registered planting {}", planting.id);
    println!("  field:    {}", planting.field_name);
    println!("  variety:  {} ({})", variety.name, variety.id);
    println!("  planted:  {}", planting.start_date);
    Ok(())
}

/// List registered plantings.
pub fn run_list(store: &JsonStore) -> Result<()> {
    let plantings = store.list()?;
    if plantings.is_empty() {
        println!("No plantings registered.");
        return Ok(());
    }
    for p in plantings {
        println!(
            "{}  {}  {}  planted {}",
            p.id, p.field_name, p.variety_id, p.start_date
        );
    }
    Ok(())
}
