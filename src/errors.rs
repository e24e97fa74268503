//! Unified error type for the dashboard core.
//!
//! Persistence failures wrap the underlying `SeaORM` error; everything else carries
//! enough context to be logged and shown to the operator.

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The persistence collaborator rejected or failed a call
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// No sale with the given identifier exists
    #[error("Sale not found: {id}")]
    SaleNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// A sale with the same identifier is already in the ledger
    #[error("Duplicate sale id: {id}")]
    DuplicateSale {
        /// The conflicting identifier
        id: String,
    },

    /// A currency amount was negative, NaN or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A required form field was left blank
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the blank field
        field: &'static str,
    },

    /// A date string matched neither the ISO nor the label format
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The rejected input
        value: String,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
