//! Entity module - Contains the `SeaORM` entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod sale;

pub use sale::{Column as SaleColumn, Entity as SaleEntity, Model as SaleModel};
