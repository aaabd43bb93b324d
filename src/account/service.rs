//! Business rules for accounts, account groups and account name maps.

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    Error,
    account::{
        Account, AccountGroup, AccountGroupId, AccountId, AccountNameMap, NewAccount,
        NewAccountGroup, NewAccountNameMap,
        balance::recompute_account_balances,
        overview::{AccountSummary, AccountsOverview, DateRange},
    },
    category::{CategoryId, CategoryLookup, CategoryService},
    change::Change,
    db::{Entity, Insert, Update, delete_by_id},
    entity::{get_all_entities, get_entity},
    error::ServiceResult,
    transaction::sum_transactions_by_account,
};

/// The fields of an account to change in [AccountService::update_account].
///
/// Fields left as [Change::Keep] are not modified. `Change::Set(None)` clears a reference.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct AccountChanges {
    /// The new display name.
    #[serde(default)]
    pub name: Change<String>,
    /// The new opening balance.
    #[serde(default)]
    pub initial_balance: Change<Decimal>,
    /// The new default category, or `None` to clear it.
    #[serde(default)]
    pub default_category_id: Change<Option<CategoryId>>,
    /// The new account group, or `None` to clear it.
    #[serde(default)]
    pub account_group_id: Change<Option<AccountGroupId>>,
}

/// Manages accounts, account groups, account name maps and account balances.
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a, C = CategoryService<'a>> {
    connection: &'a Connection,
    categories: C,
}

impl<'a> AccountService<'a> {
    /// Create an account service that reads and writes through `connection`.
    pub fn new(connection: &'a Connection) -> Self {
        Self::with_categories(connection, CategoryService::new(connection))
    }
}

impl<'a, C> AccountService<'a, C>
where
    C: CategoryLookup,
{
    /// Create an account service that resolves category references with `categories`.
    pub fn with_categories(connection: &'a Connection, categories: C) -> Self {
        Self {
            connection,
            categories,
        }
    }

    /// Get the account with the ID `account_id`.
    pub fn get_account(&self, account_id: AccountId) -> ServiceResult<Account> {
        get_entity(account_id, self.connection)
    }

    /// Get the account group with the ID `account_group_id`.
    pub fn get_account_group(&self, account_group_id: AccountGroupId) -> ServiceResult<AccountGroup> {
        get_entity(account_group_id, self.connection)
    }

    /// Get all accounts.
    pub fn get_all_accounts(&self) -> ServiceResult<Vec<Account>> {
        get_all_entities(self.connection)
    }

    /// Get all account groups.
    pub fn get_all_account_groups(&self) -> ServiceResult<Vec<AccountGroup>> {
        get_all_entities(self.connection)
    }

    /// Get all account name maps.
    pub fn get_all_account_name_maps(&self) -> ServiceResult<Vec<AccountNameMap>> {
        get_all_entities(self.connection)
    }

    /// Get every account with the net amount of its transactions dated within `from` and `to`.
    ///
    /// Missing bounds default to the first day of the current month and today.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::Validation] entry if `from` is after `to`.
    pub fn get_accounts_overview(
        &self,
        from: Option<Date>,
        to: Option<Date>,
    ) -> ServiceResult<AccountsOverview> {
        let range = DateRange::with_defaults_from_now(from, to)?;
        let totals = sum_transactions_by_account(range.from, range.to, self.connection)?;

        let mut account_groups = self.get_all_account_groups()?;
        account_groups.sort_by_key(|group| (group.display_order, group.id));

        let accounts = self
            .get_all_accounts()?
            .into_iter()
            .map(|account| AccountSummary {
                period_total: totals.get(&account.id).copied().unwrap_or(Decimal::ZERO),
                account,
            })
            .collect();

        Ok(AccountsOverview {
            range,
            account_groups,
            accounts,
        })
    }

    /// Create an account whose balance starts at its initial balance.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the account group does not exist, or the
    /// category lookup's error if the default category does not exist. The account group is
    /// checked first and nothing is inserted when an error is returned.
    pub fn add_account(&self, new_account: NewAccount) -> ServiceResult<Account> {
        if let Some(account_group_id) = new_account.account_group_id {
            self.get_account_group(account_group_id)?;
        }

        if let Some(category_id) = new_account.default_category_id {
            self.categories.get_category(category_id)?;
        }

        new_account.insert(self.connection)
    }

    /// Create an account group.
    pub fn add_account_group(&self, new_account_group: NewAccountGroup) -> ServiceResult<AccountGroup> {
        new_account_group.insert(self.connection)
    }

    /// Map the external name `name` to the account `account_id`.
    ///
    /// The same name may be mapped more than once.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the account does not exist.
    pub fn add_account_name_map(
        &self,
        account_id: AccountId,
        name: &str,
    ) -> ServiceResult<AccountNameMap> {
        self.get_account(account_id)?;

        NewAccountNameMap {
            account_id,
            name: name.to_owned(),
        }
        .insert(self.connection)
    }

    /// Delete the account with the ID `account_id`.
    ///
    /// The account's name maps and transactions are deleted with it.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry "Account {id} not found" if the account does
    /// not exist.
    pub fn delete_account(&self, account_id: AccountId) -> ServiceResult<bool> {
        if !delete_by_id::<Account>(account_id, self.connection)? {
            return Err(Error::not_found(format!(
                "{} {account_id} not found",
                Account::NAME
            )));
        }

        Ok(true)
    }

    /// Delete the account group with the ID `account_group_id`.
    ///
    /// Accounts in the group are kept and no longer belong to a group.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the account group does not exist.
    pub fn delete_account_group(&self, account_group_id: AccountGroupId) -> ServiceResult<bool> {
        if !delete_by_id::<AccountGroup>(account_group_id, self.connection)? {
            return Err(Error::not_found(format!(
                "{} {account_group_id} not found",
                AccountGroup::NAME
            )));
        }

        Ok(true)
    }

    /// Apply `changes` to the account `account_id`, then recompute the balance of **every**
    /// account.
    ///
    /// Returns the account as stored after the balance recomputation.
    ///
    /// # Errors
    /// Returns a [crate::ErrorKind::NotFound] entry if the account does not exist, the category
    /// lookup's error if a new default category does not exist, or a
    /// [crate::ErrorKind::NotFound] entry if a new account group does not exist. References are
    /// checked in that order and nothing is written when an error is returned.
    pub fn update_account(
        &self,
        account_id: AccountId,
        changes: AccountChanges,
    ) -> ServiceResult<Account> {
        let mut account = self.get_account(account_id)?;

        if let Some(Some(category_id)) = changes.default_category_id.as_set() {
            self.categories.get_category(*category_id)?;
        }

        if let Some(Some(account_group_id)) = changes.account_group_id.as_set() {
            self.get_account_group(*account_group_id)?;
        }

        changes.name.apply_to(&mut account.name);
        changes.initial_balance.apply_to(&mut account.initial_balance);
        changes
            .default_category_id
            .apply_to(&mut account.default_category_id);
        changes.account_group_id.apply_to(&mut account.account_group_id);

        if !account.update(self.connection)? {
            // The account was deleted between the read and the write.
            return Err(Error::not_found(format!(
                "{} {account_id} not found",
                Account::NAME
            )));
        }

        self.update_account_balances()?;

        self.get_account(account_id)
    }

    /// Recompute the balance of every account from its initial balance and transactions.
    pub fn update_account_balances(&self) -> ServiceResult<bool> {
        recompute_account_balances(self.connection)?;

        Ok(true)
    }
}
