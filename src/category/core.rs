//! Defines the category model and its table.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::DatabaseId,
    db::{Entity, Insert},
};

/// The ID of a category.
pub type CategoryId = DatabaseId;

/// A category for expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The id of the category.
    pub id: CategoryId,

    /// The name of the category.
    pub name: String,
}

/// A category that has not been added to the database yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCategory {
    /// The name of the category, must not be empty.
    pub name: String,
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    const TABLE: &'static str = "category";
    const COLUMNS: &'static str = "id, name";

    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL
            )",
            (),
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        let id = row.get(0)?;
        let name = row.get(1)?;

        Ok(Self { id, name })
    }
}

impl Insert for NewCategory {
    type ResultType = Category;

    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error> {
        connection
            .prepare(&format!(
                "INSERT INTO category (name) VALUES (?1) RETURNING {}",
                Category::COLUMNS
            ))?
            .query_row((self.name,), Category::map_row)
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod create_table_tests {
    use rusqlite::Connection;

    use crate::{category::Category, db::Entity};

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), Category::create_table(&connection));
    }
}
