//! `siklus catalog` commands: inspect phases and varieties.

use anyhow::{Result, bail};

use siklus_core::catalog::PhaseCatalog;

/// List growth phases, optionally filtered to one variety.
pub fn run_phases(catalog: &PhaseCatalog, variety_id: Option<&str>) -> Result<()> {
    let templates = match variety_id {
        Some(id) => {
            if catalog.variety(id).is_none() {
                bail!("unknown variety: {id}");
            }
            catalog.templates_for_variety(id)
        }
        None => catalog.templates().iter().collect(),
    };

    for template in templates {
        println!(
            "[{}] {} (day {}..={}, {} days)",
            template.sequence,
            template.name,
            template.day_start,
            template.day_end,
            template.duration()
        );
        for activity in &template.activities {
            let flag = if activity.mandatory { "wajib" } else { "opsional" };
            println!("    day +{}: {} ({})", activity.day_offset, activity.name, flag);
        }
    }
    Ok(())
}

/// List known varieties with their total growth durations.
pub fn run_varieties(catalog: &PhaseCatalog) -> Result<()> {
    for variety in catalog.varieties() {
        println!(
            "{}  {} ({} days to harvest)",
            variety.id, variety.name, variety.total_duration_days
        );
    }
    Ok(())
}
