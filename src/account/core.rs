//! Defines the account, account group and account name map models and their tables.

use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    database_id::DatabaseId,
    db::{Entity, Insert, Update},
    money::get_amount,
};

/// The ID of an account.
pub type AccountId = DatabaseId;
/// The ID of an account group.
pub type AccountGroupId = DatabaseId;
/// The ID of an account name map.
pub type AccountNameMapId = DatabaseId;

/// A bank account, credit card or cash float whose balance is tracked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
    /// The balance before any recorded transactions.
    pub initial_balance: Decimal,
    /// The initial balance plus the sum of the account's transactions as of
    /// [Account::balance_timestamp].
    pub balance: Decimal,
    /// When the balance was last computed.
    #[serde(with = "time::serde::rfc3339")]
    pub balance_timestamp: OffsetDateTime,
    /// The category suggested for new transactions in this account.
    pub default_category_id: Option<CategoryId>,
    /// The group the account is displayed in.
    pub account_group_id: Option<AccountGroupId>,
}

/// The data for creating an account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewAccount {
    /// The display name of the account.
    pub name: String,
    /// The opening balance, zero if omitted.
    #[serde(default)]
    pub initial_balance: Decimal,
    /// The category suggested for new transactions in this account.
    #[serde(default)]
    pub default_category_id: Option<CategoryId>,
    /// The group to display the account in.
    #[serde(default)]
    pub account_group_id: Option<AccountGroupId>,
}

/// A named, orderable grouping of accounts, e.g., "Everyday" or "Savings".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountGroup {
    /// The id for the account group.
    pub id: AccountGroupId,
    /// The display name of the group.
    pub name: String,
    /// Groups are displayed in ascending order of this value.
    pub display_order: i64,
    /// Whether the group is shown.
    pub is_active: bool,
}

/// The data for creating an account group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAccountGroup {
    /// The display name of the group.
    pub name: String,
    /// Groups are displayed in ascending order of this value, zero if omitted.
    #[serde(default)]
    pub display_order: i64,
    /// Whether the group is shown, true if omitted.
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

impl NewAccountGroup {
    /// An active group called `name` with the display order 0.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            display_order: 0,
            is_active: true,
        }
    }
}

fn default_is_active() -> bool {
    true
}

/// Maps the name an external system, e.g. a bank export, uses for an account to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountNameMap {
    /// The id for the mapping.
    pub id: AccountNameMapId,
    /// The account the name refers to.
    pub account_id: AccountId,
    /// The external name.
    pub name: String,
}

/// The data for creating an account name map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewAccountNameMap {
    /// The account the name refers to.
    pub account_id: AccountId,
    /// The external name.
    pub name: String,
}

impl Entity for Account {
    const NAME: &'static str = "Account";
    const TABLE: &'static str = "account";
    const COLUMNS: &'static str = "id, name, initial_balance, balance, balance_timestamp, \
        default_category_id, account_group_id";

    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                initial_balance TEXT NOT NULL,
                balance TEXT NOT NULL,
                balance_timestamp TEXT NOT NULL,
                default_category_id INTEGER,
                account_group_id INTEGER,
                FOREIGN KEY(default_category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE SET NULL,
                FOREIGN KEY(account_group_id) REFERENCES account_group(id) ON UPDATE CASCADE ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_account_account_group_id ON account(account_group_id);",
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            initial_balance: get_amount(row, 2)?,
            balance: get_amount(row, 3)?,
            balance_timestamp: row.get(4)?,
            default_category_id: row.get(5)?,
            account_group_id: row.get(6)?,
        })
    }
}

impl Insert for NewAccount {
    type ResultType = Account;

    /// Insert the account with its balance set to the initial balance and timestamped now.
    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error> {
        connection
            .prepare(&format!(
                "INSERT INTO account (name, initial_balance, balance, balance_timestamp, default_category_id, account_group_id)
                VALUES (?1, ?2, ?2, ?3, ?4, ?5)
                RETURNING {}",
                Account::COLUMNS
            ))?
            .query_row(
                params![
                    self.name,
                    self.initial_balance.to_string(),
                    OffsetDateTime::now_utc(),
                    self.default_category_id,
                    self.account_group_id,
                ],
                Account::map_row,
            )
            .map_err(Error::from)
    }
}

impl Update for Account {
    /// Write the account's name, initial balance and references.
    ///
    /// The balance and its timestamp are left to [crate::AccountService::update_account_balances].
    fn update(&self, connection: &Connection) -> Result<bool, Error> {
        let rows_affected = connection.execute(
            "UPDATE account
            SET \
                name = ?1, \
                initial_balance = ?2, \
                default_category_id = ?3, \
                account_group_id = ?4 \
            WHERE id = ?5",
            params![
                self.name,
                self.initial_balance.to_string(),
                self.default_category_id,
                self.account_group_id,
                self.id,
            ],
        )?;

        Ok(rows_affected != 0)
    }
}

impl Entity for AccountGroup {
    const NAME: &'static str = "AccountGroup";
    const TABLE: &'static str = "account_group";
    const COLUMNS: &'static str = "id, name, display_order, is_active";

    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS account_group (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                display_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1
            )",
            (),
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            display_order: row.get(2)?,
            is_active: row.get(3)?,
        })
    }
}

impl Insert for NewAccountGroup {
    type ResultType = AccountGroup;

    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error> {
        connection
            .prepare(&format!(
                "INSERT INTO account_group (name, display_order, is_active) VALUES (?1, ?2, ?3)
                RETURNING {}",
                AccountGroup::COLUMNS
            ))?
            .query_row(
                params![self.name, self.display_order, self.is_active],
                AccountGroup::map_row,
            )
            .map_err(Error::from)
    }
}

impl Entity for AccountNameMap {
    const NAME: &'static str = "AccountNameMap";
    const TABLE: &'static str = "account_name_map";
    const COLUMNS: &'static str = "id, account_id, name";

    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS account_name_map (
                id INTEGER PRIMARY KEY,
                account_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE
            )",
            (),
        )?;

        Ok(())
    }

    fn map_row(row: &Row) -> Result<Self, rusqlite::Error> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            name: row.get(2)?,
        })
    }
}

impl Insert for NewAccountNameMap {
    type ResultType = AccountNameMap;

    fn insert(self, connection: &Connection) -> Result<Self::ResultType, Error> {
        connection
            .prepare(&format!(
                "INSERT INTO account_name_map (account_id, name) VALUES (?1, ?2) RETURNING {}",
                AccountNameMap::COLUMNS
            ))?
            .query_row(params![self.account_id, self.name], AccountNameMap::map_row)
            .map_err(Error::from)
    }
}


#[cfg(test)]
mod serialization_tests {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::account::{NewAccount, NewAccountGroup};

    #[test]
    fn new_account_defaults_optional_fields() {
        let got: NewAccount = serde_json::from_value(json!({ "name": "Cheque" })).unwrap();

        assert_eq!(
            got,
            NewAccount {
                name: "Cheque".to_owned(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn initial_balance_accepts_numbers_and_strings() {
        let from_number: NewAccount =
            serde_json::from_value(json!({ "name": "Cheque", "initial_balance": 0.1 })).unwrap();
        let from_string: NewAccount =
            serde_json::from_value(json!({ "name": "Cheque", "initial_balance": "0.1" })).unwrap();

        assert_eq!(from_number.initial_balance, dec!(0.1));
        assert_eq!(from_string.initial_balance, dec!(0.1));
    }

    #[test]
    fn new_account_group_defaults_to_active() {
        let got: NewAccountGroup = serde_json::from_value(json!({ "name": "Savings" })).unwrap();

        assert_eq!(got, NewAccountGroup::new("Savings"));
    }
}
