//! Defines the core data models and database queries for transactions.

use std::collections::HashMap;

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    account::{Account, AccountId},
    category::{CategoryId, CategoryService},
    database_id::DatabaseId,
    db::{Entity, Insert},
    entity::get_entity,
    error::ServiceResult,
    money::{add_amount, get_amount},
    vendor::{Vendor, VendorId},
};

/// The ID of a transaction.
pub type TransactionId = DatabaseId;

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income recorded against an account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// Who was paid or who paid.
    pub vendor_id: Option<VendorId>,
    /// The ID of the category the transaction belongs to.
    pub category_id: Option<CategoryId>,
}

/// The data for recording a transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTransaction {
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// The amount of money earned (positive) or spent (negative).
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// Who was paid or who paid.
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    /// The ID of the category the transaction belongs to.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl NewTransaction {
    /// A transaction with no description, vendor or category.
    pub fn new(account_id: AccountId, amount: Decimal, date: Date) -> Self {
        Self {
            account_id,
            amount,
            date,
            description: String::new(),
            vendor_id: None,
            category_id: None,
        }
    }
}

impl Entity for Transaction {
    const NAME: &'static str = "Transaction";
    const TABLE: &'static str = "\"transaction\"";
    const COLUMNS: &'static str = "id, account_id, amount, date, description, vendor_id, category_id";

    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY,
                account_id INTEGER NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                vendor_id INTEGER,
                category_id INTEGER,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(vendor_id) REFERENCES vendor(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_transaction_account_id ON \"transaction\"(account_id);
            CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            amount: get_amount(row, 2)?,
            date: row.get(3)?,
            description: row.get(4)?,
            vendor_id: row.get(5)?,
            category_id: row.get(6)?,
        })
    }
}

impl Insert for NewTransaction {
    type ResultType = Transaction;

    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error> {
        connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (account_id, amount, date, description, vendor_id, category_id)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                RETURNING {}",
                Transaction::COLUMNS
            ))?
            .query_row(
                params![
                    self.account_id,
                    self.amount.to_string(),
                    self.date,
                    self.description,
                    self.vendor_id,
                    self.category_id,
                ],
                Transaction::map_row,
            )
            .map_err(Error::from)
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Record a transaction.
///
/// Account balances are not touched, call [crate::AccountService::update_account_balances] to
/// include the transaction in them.
///
/// # Errors
/// Returns a [crate::ErrorKind::NotFound] entry if the account, the vendor (if given) or the
/// category (if given) does not exist.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> ServiceResult<Transaction> {
    get_entity::<Account>(new_transaction.account_id, connection)?;

    if let Some(vendor_id) = new_transaction.vendor_id {
        get_entity::<Vendor>(vendor_id, connection)?;
    }

    if let Some(category_id) = new_transaction.category_id {
        CategoryService::new(connection).get_category(category_id)?;
    }

    new_transaction.insert(connection)
}

/// Sum the amounts of the transactions dated within `from` and `to` (inclusive) per account.
///
/// Accounts without transactions in the range are absent from the map.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error, or a [crate::ErrorKind::Validation] entry
/// if a total cannot be represented.
pub fn sum_transactions_by_account(
    from: Date,
    to: Date,
    connection: &Connection,
) -> Result<HashMap<AccountId, Decimal>, Error> {
    let mut statement = connection.prepare(
        "SELECT account_id, amount FROM \"transaction\"
        WHERE date BETWEEN ?1 AND ?2",
    )?;
    let rows = statement.query_map(params![from, to], |row| {
        Ok((row.get::<_, AccountId>(0)?, get_amount(row, 1)?))
    })?;

    let mut totals = HashMap::new();
    for row in rows {
        let (account_id, amount) = row?;
        let total = totals.entry(account_id).or_insert(Decimal::ZERO);
        *total = add_amount(*total, amount)?;
    }

    Ok(totals)
}
