/// Sector and payment-method vocabularies from config.toml
pub mod catalog;

/// Database configuration and connection management
pub mod database;
