//! Growth-phase scheduling engine.
//!
//! Combines an ordered catalog of relative-day phase templates with a
//! planting start date and an append-only history of reviewed phase
//! updates to derive a dated planting calendar and to recommend the next
//! legitimate growth phase.
//!
//! Everything here is a synchronous function of explicit inputs. The
//! current date is always a parameter, never a clock read, so derivations
//! are deterministic and testable. The ledger is the single authority for
//! confirmed progress; the calendar is a projection recomputed on demand.

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod sequencer;
