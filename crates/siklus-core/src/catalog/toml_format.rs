//! TOML catalog format and parser.
//!
//! Parses a `catalog.toml` string into a validated [`PhaseCatalog`]:
//!
//! ```toml
//! [[varieties]]
//! id = "kemloko"
//! name = "Kemloko"
//! total_duration_days = 90
//!
//! [[phases]]
//! sequence = 1
//! name = "Persemaian"
//! day_start = 0
//! day_end = 14
//!
//! [[phases.activities]]
//! name = "Penyiraman benih"
//! day_offset = 2
//! mandatory = true
//! ```
//!
//! Structural invariants (strictly increasing sequences, well-formed day
//! windows, activity offsets inside their phase) are enforced by
//! [`PhaseCatalog::new`]; this module adds referential checks on the
//! variety ids named by `applicable_varieties`.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::{ActivityDef, PhaseCatalog, PhaseTemplate, Variety};
use crate::error::ConfigError;

/// Errors that can occur during catalog parsing and validation.
#[derive(Debug, Error)]
pub enum CatalogParseError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("duplicate variety id: {0:?}")]
    DuplicateVariety(String),

    #[error("phase {sequence} names unknown variety {variety_id:?}")]
    UnknownVariety { sequence: u32, variety_id: String },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Deserialize)]
struct CatalogToml {
    #[serde(default)]
    varieties: Vec<VarietyToml>,
    #[serde(default)]
    phases: Vec<PhaseToml>,
}

#[derive(Debug, Deserialize)]
struct VarietyToml {
    id: String,
    name: String,
    total_duration_days: u32,
}

#[derive(Debug, Deserialize)]
struct PhaseToml {
    sequence: u32,
    name: String,
    day_start: u32,
    day_end: u32,
    #[serde(default)]
    applicable_varieties: Vec<String>,
    #[serde(default)]
    activities: Vec<ActivityToml>,
}

#[derive(Debug, Deserialize)]
struct ActivityToml {
    name: String,
    day_offset: u32,
    #[serde(default)]
    mandatory: bool,
}

/// Parse and validate a `catalog.toml` string.
pub fn parse_catalog_toml(content: &str) -> Result<PhaseCatalog, CatalogParseError> {
    let raw: CatalogToml = toml::from_str(content)?;

    let mut seen = HashSet::new();
    for variety in &raw.varieties {
        if !seen.insert(variety.id.as_str()) {
            return Err(CatalogParseError::DuplicateVariety(variety.id.clone()));
        }
    }

    for phase in &raw.phases {
        for variety_id in &phase.applicable_varieties {
            if !seen.contains(variety_id.as_str()) {
                return Err(CatalogParseError::UnknownVariety {
                    sequence: phase.sequence,
                    variety_id: variety_id.clone(),
                });
            }
        }
    }

    let varieties = raw
        .varieties
        .into_iter()
        .map(|v| Variety {
            id: v.id,
            name: v.name,
            total_duration_days: v.total_duration_days,
        })
        .collect();

    let templates = raw
        .phases
        .into_iter()
        .map(|p| PhaseTemplate {
            sequence: p.sequence,
            name: p.name,
            day_start: p.day_start,
            day_end: p.day_end,
            applicable_varieties: p.applicable_varieties,
            activities: p
                .activities
                .into_iter()
                .map(|a| ActivityDef {
                    name: a.name,
                    day_offset: a.day_offset,
                    mandatory: a.mandatory,
                })
                .collect(),
        })
        .collect();

    Ok(PhaseCatalog::new(varieties, templates)?)
}
