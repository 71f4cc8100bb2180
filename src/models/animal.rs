use sqlx::{Error, PgConnection, Row, postgres::PgRow};

use crate::{database::traits::DatabaseResource, errors::AppError};

pub const SELECT_ANIMAL_NAMES: &str = "SELECT name FROM animals;";

/// A row of the externally managed `animals` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Animal {
    pub name: Option<String>,
}

impl DatabaseResource for Animal {
    fn from_row(row: &PgRow) -> Result<Self, Error> {
        Ok(Animal {
            name: row.try_get("name")?,
        })
    }
}

/// Fetches every animal name in the table's natural row order.
///
/// All rows are read eagerly. A `NULL` name is returned as `None`.
pub async fn list_animal_names(
    connection: &mut PgConnection,
) -> Result<Vec<Option<String>>, AppError> {
    let rows = sqlx::query(SELECT_ANIMAL_NAMES)
        .fetch_all(&mut *connection)
        .await
        .map_err(AppError::Query)?;

    rows.iter()
        .map(|row| Animal::from_row(row).map(|animal| animal.name))
        .collect::<Result<Vec<_>, _>>()
        .map_err(AppError::Query)
}
