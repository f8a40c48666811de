//! Phase template catalog: the ordered, read-only list of growth-phase
//! templates and the varieties they apply to.
//!
//! A catalog is validated once at construction; every consumer downstream
//! (calendar generator, sequencer) can then rely on strictly increasing
//! sequences and well-formed day windows. Administrative CRUD on catalogs
//! is out of scope; catalogs come from the embedded default or a TOML file.

pub mod toml_format;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A scheduled activity inside a phase. Display-only payload: the engine
/// never branches on activities, the UI lists them per phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDef {
    pub name: String,
    /// Optimal day for the activity, counted from the phase's own start.
    pub day_offset: u32,
    pub mandatory: bool,
}

/// One growth-phase template, positioned by relative day offsets from the
/// planting date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseTemplate {
    /// Unique, strictly increasing; defines the total phase order.
    pub sequence: u32,
    pub name: String,
    /// First day of the phase window, inclusive, relative to planting.
    pub day_start: u32,
    /// Last day of the phase window, inclusive, relative to planting.
    pub day_end: u32,
    /// Variety ids this phase applies to. Empty means every variety.
    pub applicable_varieties: Vec<String>,
    pub activities: Vec<ActivityDef>,
}

impl PhaseTemplate {
    /// Phase duration in days, derived from the window bounds.
    pub fn duration(&self) -> u32 {
        self.day_end - self.day_start
    }

    /// Whether the inclusive day window contains the given plant age.
    pub fn contains_age(&self, age_days: i64) -> bool {
        age_days >= i64::from(self.day_start) && age_days <= i64::from(self.day_end)
    }

    fn applies_to(&self, variety_id: &str) -> bool {
        self.applicable_varieties.is_empty()
            || self.applicable_varieties.iter().any(|v| v == variety_id)
    }
}

/// A crop variety with its expected total growth duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variety {
    pub id: String,
    pub name: String,
    /// Days from planting to estimated harvest.
    pub total_duration_days: u32,
}

/// Validated, ordered catalog of phase templates for one crop type.
#[derive(Debug, Clone)]
pub struct PhaseCatalog {
    varieties: Vec<Variety>,
    /// Sorted ascending by sequence; invariant checked at construction.
    templates: Vec<PhaseTemplate>,
}

/// The embedded default tobacco catalog.
static TOBACCO_TOML: &str = include_str!("tobacco.toml");

impl PhaseCatalog {
    /// Build a catalog, sorting templates by sequence and validating the
    /// structural invariants: non-empty, strictly increasing sequences,
    /// `day_start < day_end`, activity offsets inside their phase.
    pub fn new(
        varieties: Vec<Variety>,
        mut templates: Vec<PhaseTemplate>,
    ) -> Result<Self, ConfigError> {
        if templates.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        templates.sort_by_key(|t| t.sequence);

        for pair in templates.windows(2) {
            // Equal sequences are just as non-monotonic as decreasing ones.
            if pair[1].sequence <= pair[0].sequence {
                return Err(ConfigError::NonMonotonicSequence {
                    previous: pair[0].sequence,
                    current: pair[1].sequence,
                });
            }
        }

        for template in &templates {
            if template.day_start >= template.day_end {
                return Err(ConfigError::InvertedWindow {
                    sequence: template.sequence,
                    day_start: template.day_start,
                    day_end: template.day_end,
                });
            }
            for activity in &template.activities {
                if activity.day_offset > template.duration() {
                    return Err(ConfigError::ActivityOutsidePhase {
                        sequence: template.sequence,
                        name: activity.name.clone(),
                        offset: activity.day_offset,
                        duration: template.duration(),
                    });
                }
            }
        }

        Ok(Self {
            varieties,
            templates,
        })
    }

    /// Load the built-in tobacco catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed. This is a compile-time
    /// invariant: if the binary was built, the TOML is valid.
    pub fn builtin_tobacco() -> Self {
        toml_format::parse_catalog_toml(TOBACCO_TOML).expect("embedded tobacco.toml is invalid")
    }

    /// All known varieties.
    pub fn varieties(&self) -> &[Variety] {
        &self.varieties
    }

    /// Look up one variety by id.
    pub fn variety(&self, variety_id: &str) -> Option<&Variety> {
        self.varieties.iter().find(|v| v.id == variety_id)
    }

    /// Every template, ascending by sequence.
    pub fn templates(&self) -> &[PhaseTemplate] {
        &self.templates
    }

    /// Templates applicable to one variety, ascending by sequence.
    pub fn templates_for_variety(&self, variety_id: &str) -> Vec<&PhaseTemplate> {
        self.templates
            .iter()
            .filter(|t| t.applies_to(variety_id))
            .collect()
    }

    /// Whether a sequence number references a template applicable to the
    /// given variety.
    pub fn has_template_for(&self, sequence: u32, variety_id: &str) -> bool {
        self.templates_for_variety(variety_id)
            .iter()
            .any(|t| t.sequence == sequence)
    }
}
