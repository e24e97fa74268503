//! `TicketTally` - sales tracking core for ticket resale operations
//!
//! This crate keeps the sales ledger of a resale operation, filters it by the active
//! dashboard selection and derives the headline KPIs, per-sector rankings and the
//! recurring-client ranking. Records are persisted through a small repository
//! contract backed by `SeaORM`.

#![deny(unsafe_code, rustdoc::broken_intra_doc_links)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::pedantic,
    clippy::nursery,
    // allowed locally in tests
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

/// Configuration management for the database and the sale vocabularies
pub mod config;
/// Core business logic - ledger, filtering, aggregation and the dashboard session
pub mod core;
/// `SeaORM` entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
