//! Core business logic - framework-agnostic ledger, filtering and aggregation.

/// KPI and ranking computation
pub mod aggregate;
/// Event date label conversions
pub mod dates;
/// Filter selection and predicate
pub mod filter;
/// Filtered view derivation and its single-entry memo
pub mod pipeline;
/// Display formatting for the dashboard
pub mod report;
/// Persistence contract and `SeaORM` implementation
pub mod repository;
/// Sale records and form drafts
pub mod sale;
/// Dashboard session orchestrating ledger, filter and repository
pub mod session;
/// In-memory sales ledger
pub mod store;
