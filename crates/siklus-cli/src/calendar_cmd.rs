//! `siklus calendar` command: show the derived calendar for a planting.

use anyhow::Result;
use chrono::NaiveDate;

use siklus_core::calendar::{generate_calendar, status::apply_status};
use siklus_core::catalog::PhaseCatalog;
use siklus_store::json::JsonStore;
use siklus_store::repo::PhaseLedger;

use crate::resolve;

/// Run the calendar command: generate, apply status for the reference
/// date, and print.
pub fn run_calendar(
    store: &JsonStore,
    catalog: &PhaseCatalog,
    planting_id_str: &str,
    on: Option<NaiveDate>,
) -> Result<()> {
    let planting = resolve::resolve_planting(store, planting_id_str)?;
    let (variety, templates) = resolve::resolve_variety(catalog, &planting)?;
    let now = resolve::reference_date(on);

    let calendar = generate_calendar(
        &templates,
        planting.id,
        &variety.id,
        planting.start_date,
        variety.total_duration_days,
    )?;
    let records = store.list_for_planting(planting.id)?;
    let calendar = apply_status(&calendar, &records, now);

    println!(
        "Planting {} ({}, {})",
        planting.id, planting.field_name, variety.name
    );
    println!("Planted:           {}", calendar.start_date);
    println!("Estimated harvest: {}", calendar.estimated_harvest_date);
    println!("As of:             {now}");
    println!();

    for entry in &calendar.entries {
        println!(
            "[{}] {:<16} {} .. {}  {:<9} {:>3}%",
            entry.template_sequence,
            entry.phase_name,
            entry.absolute_start,
            entry.absolute_end,
            entry.status.to_string(),
            entry.progress
        );
    }
    Ok(())
}
