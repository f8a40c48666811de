//! `siklus recommend` command: the next eligible growth phase.

use anyhow::Result;
use chrono::NaiveDate;

use siklus_core::catalog::PhaseCatalog;
use siklus_core::sequencer::{latest_confirmed, plant_age_days, recommend_next_phase};
use siklus_store::json::JsonStore;
use siklus_store::repo::PhaseLedger;

use crate::resolve;

/// Run the recommend command.
pub fn run_recommend(
    store: &JsonStore,
    catalog: &PhaseCatalog,
    planting_id_str: &str,
    on: Option<NaiveDate>,
) -> Result<()> {
    let planting = resolve::resolve_planting(store, planting_id_str)?;
    let (_, templates) = resolve::resolve_variety(catalog, &planting)?;
    let now = resolve::reference_date(on);
    let records = store.list_for_planting(planting.id)?;

    let age = plant_age_days(planting.start_date, now)?;
    let confirmed = latest_confirmed(&records, planting.id);
    println!("Plant age: {age} days");
    match confirmed {
        Some(seq) => println!("Confirmed through phase {seq}"),
        None => println!("No phase confirmed yet"),
    }

    match recommend_next_phase(&templates, &records, planting.id, planting.start_date, now)? {
        Some(template) => {
            println!();
            println!(
                "Recommended: [{}] {} (window day {}..={})",
                template.sequence, template.name, template.day_start, template.day_end
            );
        }
        None => {
            let terminal = confirmed
                .is_some_and(|seq| templates.iter().all(|t| t.sequence <= seq));
            println!();
            if terminal {
                println!("All phases confirmed: ready for harvest.");
            } else {
                println!("No action needed yet: the next phase window has not opened.");
            }
        }
    }
    Ok(())
}
