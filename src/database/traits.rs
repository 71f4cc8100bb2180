//! Database Resource Traits
//!
//! Rows are bound to typed structs by column name rather than by position.

use sqlx::{Error, postgres::PgRow};

/// Implemented by every struct built from a query row.
///
/// # Example Implementation
///
/// ```rust
/// use crate::database::traits::DatabaseResource;
/// use sqlx::{Error, Row, postgres::PgRow};
///
/// pub struct Animal {
///     pub name: Option<String>,
/// }
///
/// impl DatabaseResource for Animal {
///     fn from_row(row: &PgRow) -> Result<Self, Error> {
///         Ok(Animal {
///             name: row.try_get("name")?,
///         })
///     }
/// }
/// ```
pub trait DatabaseResource {
    /// Converts a database row to the implementing struct.
    ///
    /// Use `row.try_get()` to extract fields by column name so a missing or
    /// mistyped column is reported as an error instead of a panic.
    fn from_row(row: &PgRow) -> Result<Self, Error>
    where
        Self: Sized;
}
