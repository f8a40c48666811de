//! Data layer for siklus: domain record types and the repository
//! implementations behind them.
//!
//! The ledger of phase-update records is append-only. Storage exposes an
//! insert, ordered reads, and a single constrained compare-and-set for the
//! approval-status transition; there is no general update and no delete, so
//! the audit trail cannot be rewritten.

pub mod config;
pub mod json;
pub mod memory;
pub mod models;
pub mod repo;
