//! Calendar generator: projects relative-day phase templates onto absolute
//! dates for one planting instance.
//!
//! Generation is pure. The reference date never enters here; entries come
//! out `upcoming` with zero progress and the status tracker fills in
//! time-relative state separately. The calendar is a disposable projection,
//! recomputed on demand, and never the authority for confirmed progress.

pub mod status;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use siklus_store::models::PhaseEntryStatus;

use crate::catalog::PhaseTemplate;
use crate::error::ConfigError;

/// One dated phase window in a planting calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarPhaseEntry {
    pub template_sequence: u32,
    pub phase_name: String,
    /// `start_date + day_start`, inclusive.
    pub absolute_start: NaiveDate,
    /// `start_date + day_end`, inclusive.
    pub absolute_end: NaiveDate,
    pub status: PhaseEntryStatus,
    /// Percentage through the phase window, 0..=100.
    pub progress: u8,
}

impl CalendarPhaseEntry {
    /// Window length in days, mirroring the template's derived duration.
    pub fn duration_days(&self) -> i64 {
        (self.absolute_end - self.absolute_start).num_days()
    }
}

/// The concrete, dated calendar derived for one planting instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInstance {
    pub planting_id: Uuid,
    pub variety_id: String,
    pub start_date: NaiveDate,
    /// `start_date + variety_total_duration`. Independent of the last
    /// template's window; the catalog owns keeping the two roughly aligned.
    pub estimated_harvest_date: NaiveDate,
    pub entries: Vec<CalendarPhaseEntry>,
}

/// Generate the dated calendar for a planting.
///
/// `templates` must be non-empty and sorted ascending by sequence, as
/// produced by [`crate::catalog::PhaseCatalog::templates_for_variety`].
pub fn generate_calendar(
    templates: &[&PhaseTemplate],
    planting_id: Uuid,
    variety_id: &str,
    start_date: NaiveDate,
    variety_total_duration: u32,
) -> Result<CalendarInstance, ConfigError> {
    if templates.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    if templates.windows(2).any(|w| w[1].sequence <= w[0].sequence) {
        return Err(ConfigError::UnsortedTemplates);
    }

    let entries = templates
        .iter()
        .map(|t| CalendarPhaseEntry {
            template_sequence: t.sequence,
            phase_name: t.name.clone(),
            absolute_start: start_date + Days::new(u64::from(t.day_start)),
            absolute_end: start_date + Days::new(u64::from(t.day_end)),
            status: PhaseEntryStatus::Upcoming,
            progress: 0,
        })
        .collect();

    Ok(CalendarInstance {
        planting_id,
        variety_id: variety_id.to_owned(),
        start_date,
        estimated_harvest_date: start_date + Days::new(u64::from(variety_total_duration)),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn template(sequence: u32, day_start: u32, day_end: u32) -> PhaseTemplate {
        PhaseTemplate {
            sequence,
            name: format!("fase-{sequence}"),
            day_start,
            day_end,
            applicable_varieties: vec![],
            activities: vec![],
        }
    }

    #[test]
    fn derives_absolute_dates_from_offsets() {
        let persemaian = template(1, 0, 14);
        let penanaman = template(2, 15, 21);
        let calendar = generate_calendar(
            &[&persemaian, &penanaman],
            Uuid::new_v4(),
            "kemloko",
            date(2025, 7, 15),
            90,
        )
        .unwrap();

        assert_eq!(calendar.entries[0].absolute_start, date(2025, 7, 15));
        assert_eq!(calendar.entries[0].absolute_end, date(2025, 7, 29));
        assert_eq!(calendar.entries[1].absolute_start, date(2025, 7, 30));
        assert_eq!(calendar.entries[1].absolute_end, date(2025, 8, 5));
    }

    #[test]
    fn harvest_estimate_comes_from_variety_duration() {
        let persemaian = template(1, 0, 14);
        let calendar = generate_calendar(
            &[&persemaian],
            Uuid::new_v4(),
            "kemloko",
            date(2025, 7, 15),
            90,
        )
        .unwrap();
        assert_eq!(calendar.estimated_harvest_date, date(2025, 10, 13));
    }

    #[test]
    fn entries_start_upcoming_with_zero_progress() {
        let persemaian = template(1, 0, 14);
        let calendar = generate_calendar(
            &[&persemaian],
            Uuid::new_v4(),
            "kemloko",
            date(2025, 7, 15),
            90,
        )
        .unwrap();
        assert_eq!(calendar.entries[0].status, PhaseEntryStatus::Upcoming);
        assert_eq!(calendar.entries[0].progress, 0);
    }

    #[test]
    fn rejects_empty_templates() {
        let err =
            generate_calendar(&[], Uuid::new_v4(), "kemloko", date(2025, 7, 15), 90).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCatalog));
    }

    #[test]
    fn rejects_unsorted_templates() {
        let a = template(2, 15, 21);
        let b = template(1, 0, 14);
        let err = generate_calendar(&[&a, &b], Uuid::new_v4(), "kemloko", date(2025, 7, 15), 90)
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsortedTemplates));
    }
}
