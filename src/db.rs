//! This module defines the traits and generic queries for reading and writing the application's
//! entities in the database.

use rusqlite::{Connection, OptionalExtension, Row, Transaction as SqlTransaction};

use crate::{
    Error,
    account::{Account, AccountGroup, AccountNameMap},
    category::Category,
    database_id::DatabaseId,
    transaction::Transaction,
    vendor::{Vendor, VendorMap},
};

/// A type that is stored as one row of one table.
///
/// Implementing this trait gives the type the generic queries [select_by_id], [select_all] and
/// [delete_by_id].
///
/// # Examples
/// ```ignore
/// struct Foo {
///     id: i64,
///     desc: String,
/// }
///
/// impl Entity for Foo {
///     const NAME: &'static str = "Foo";
///     const TABLE: &'static str = "foo";
///     const COLUMNS: &'static str = "id, desc";
///
///     fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
///         connection.execute(
///             "CREATE TABLE IF NOT EXISTS foo (id INTEGER PRIMARY KEY, desc TEXT NOT NULL)",
///             (),
///         )?;
///
///         Ok(())
///     }
///
///     fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
///         Ok(Self {
///             id: row.get(0)?,
///             desc: row.get(1)?,
///         })
///     }
/// }
/// ```
pub trait Entity: Sized {
    /// The name used to refer to the entity in error messages, e.g., "Account".
    const NAME: &'static str;

    /// The table holding the entity, quoted if it is a keyword.
    const TABLE: &'static str;

    /// The comma separated columns read by [Entity::map_row], starting with the primary key.
    const COLUMNS: &'static str;

    /// Create the table for the entity if it does not exist.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;

    /// Convert a row holding [Entity::COLUMNS], in order, into the entity.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if
    /// an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self, rusqlite::Error>;
}

/// A trait for inserting a record into the application database.
pub trait Insert {
    /// The entity created by the insertion.
    type ResultType;

    /// Insert the object into the application database and return the stored entity, including
    /// its generated ID.
    ///
    /// # Errors
    /// This function will return an error if the insertion failed.
    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error>;
}

/// A trait for overwriting the stored fields of an existing record.
pub trait Update {
    /// Write the object's fields to the row with the same ID.
    ///
    /// Returns `false` if no row has the object's ID.
    ///
    /// # Errors
    /// This function will return an error if there is an SQL error.
    fn update(&self, connection: &Connection) -> Result<bool, Error>;
}

/// Retrieve the row with the primary key `id`, if it exists.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn select_by_id<T: Entity>(id: DatabaseId, connection: &Connection) -> Result<Option<T>, Error> {
    connection
        .prepare(&format!(
            "SELECT {} FROM {} WHERE id = :id",
            T::COLUMNS,
            T::TABLE
        ))?
        .query_row(&[(":id", &id)], T::map_row)
        .optional()
        .map_err(Error::from)
}

/// Retrieve every row of the entity's table ordered by ID.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn select_all<T: Entity>(connection: &Connection) -> Result<Vec<T>, Error> {
    connection
        .prepare(&format!(
            "SELECT {} FROM {} ORDER BY id ASC",
            T::COLUMNS,
            T::TABLE
        ))?
        .query_map([], T::map_row)?
        .map(|maybe_entity| maybe_entity.map_err(Error::from))
        .collect()
}

/// Delete the row with the primary key `id`.
///
/// Returns `false` if no row matched.
///
/// # Errors
/// This function will return an error if there is an SQL error.
pub fn delete_by_id<T: Entity>(id: DatabaseId, connection: &Connection) -> Result<bool, Error> {
    let rows_affected = connection.execute(
        &format!("DELETE FROM {} WHERE id = :id", T::TABLE),
        &[(":id", &id)],
    )?;

    Ok(rows_affected != 0)
}

/// Create the tables for all of the application's entities and turn on foreign key enforcement.
///
/// Tables that already exist are left as is.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Foreign key enforcement is per connection and cannot be changed inside a transaction.
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    Category::create_table(&transaction)?;
    AccountGroup::create_table(&transaction)?;
    Account::create_table(&transaction)?;
    AccountNameMap::create_table(&transaction)?;
    Vendor::create_table(&transaction)?;
    VendorMap::create_table(&transaction)?;
    Transaction::create_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::{
        category::{Category, CategoryService},
        db::{delete_by_id, initialize, select_all, select_by_id},
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = get_test_connection();

        assert_eq!(initialize(&connection), Ok(()));
    }

    #[test]
    fn initialize_enables_foreign_keys() {
        let connection = get_test_connection();

        let enabled: bool = connection
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();

        assert!(enabled);
    }

    #[test]
    fn select_by_id_returns_none_for_missing_row() {
        let connection = get_test_connection();

        let got = select_by_id::<Category>(-1, &connection);

        assert_eq!(got, Ok(None));
    }

    #[test]
    fn select_all_returns_rows_in_id_order() {
        let connection = get_test_connection();
        let service = CategoryService::new(&connection);
        let first = service.add_category("Food").unwrap();
        let second = service.add_category("Bills").unwrap();

        let got = select_all::<Category>(&connection).unwrap();

        assert_eq!(got, vec![first, second]);
    }

    #[test]
    fn delete_by_id_reports_whether_a_row_matched() {
        let connection = get_test_connection();
        let category = CategoryService::new(&connection)
            .add_category("Food")
            .unwrap();

        assert_eq!(delete_by_id::<Category>(category.id, &connection), Ok(true));
        assert_eq!(delete_by_id::<Category>(category.id, &connection), Ok(false));
    }
}
