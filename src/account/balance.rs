//! Recomputes the derived account balances from the recorded transactions.

use std::collections::HashMap;

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::{
    Error,
    account::AccountId,
    money::{add_amount, get_amount},
};

/// Set every account's balance to its initial balance plus the sum of its transactions.
///
/// Accounts without transactions get their initial balance. All accounts receive the same
/// balance timestamp. The sums are computed exactly and all balances are written in one
/// database transaction.
///
/// Returns the number of accounts updated.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error, or a [crate::ErrorKind::Validation] entry
/// if a balance cannot be represented. Nothing is written when an error is returned.
pub fn recompute_account_balances(connection: &Connection) -> Result<usize, Error> {
    let transaction = connection.unchecked_transaction()?;

    let mut balances: HashMap<AccountId, Decimal> = transaction
        .prepare("SELECT id, initial_balance FROM account")?
        .query_map((), |row| Ok((row.get(0)?, get_amount(row, 1)?)))?
        .collect::<Result<_, _>>()?;

    {
        let mut statement = transaction.prepare("SELECT account_id, amount FROM \"transaction\"")?;
        let amounts = statement.query_map((), |row| {
            Ok((row.get::<_, AccountId>(0)?, get_amount(row, 1)?))
        })?;

        for row in amounts {
            let (account_id, amount) = row?;
            if let Some(balance) = balances.get_mut(&account_id) {
                *balance = add_amount(*balance, amount)?;
            }
        }
    }

    let balance_timestamp = OffsetDateTime::now_utc();
    {
        let mut statement = transaction
            .prepare("UPDATE account SET balance = ?1, balance_timestamp = ?2 WHERE id = ?3")?;
        for (account_id, balance) in &balances {
            statement.execute(params![balance.to_string(), balance_timestamp, account_id])?;
        }
    }

    transaction.commit()?;

    tracing::debug!("Recomputed the balances of {} accounts", balances.len());

    Ok(balances.len())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        account::{AccountService, NewAccount, balance::recompute_account_balances},
        test_utils::must_create_test_connection,
        transaction::{NewTransaction, create_transaction},
    };

    #[test]
    fn balance_is_initial_balance_plus_transactions() {
        let connection = must_create_test_connection();
        let service = AccountService::new(&connection);
        let account = service
            .add_account(NewAccount {
                name: "Cheque".to_owned(),
                initial_balance: dec!(100),
                ..Default::default()
            })
            .unwrap();
        create_transaction(
            NewTransaction::new(account.id, dec!(-25.5), date!(2024 - 01 - 02)),
            &connection,
        )
        .unwrap();
        create_transaction(
            NewTransaction::new(account.id, dec!(10.25), date!(2024 - 01 - 03)),
            &connection,
        )
        .unwrap();

        let updated = recompute_account_balances(&connection).unwrap();

        assert_eq!(updated, 1);
        let got = service.get_account(account.id).unwrap();
        assert_eq!(got.balance, dec!(84.75));
        assert_eq!(got.initial_balance, dec!(100));
        assert!(got.balance_timestamp >= account.balance_timestamp);
    }

    #[test]
    fn cents_add_up_exactly() {
        let connection = must_create_test_connection();
        let service = AccountService::new(&connection);
        let account = service
            .add_account(NewAccount {
                name: "Cheque".to_owned(),
                initial_balance: dec!(0.1),
                ..Default::default()
            })
            .unwrap();
        create_transaction(
            NewTransaction::new(account.id, dec!(0.2), date!(2024 - 01 - 02)),
            &connection,
        )
        .unwrap();

        recompute_account_balances(&connection).unwrap();

        let got = service.get_account(account.id).unwrap();
        assert_eq!(got.balance, dec!(0.3));
        assert_eq!(got.balance.to_string(), "0.3");
    }

    #[test]
    fn accounts_without_transactions_keep_initial_balance() {
        let connection = must_create_test_connection();
        let service = AccountService::new(&connection);
        let with_transactions = service
            .add_account(NewAccount {
                name: "Cheque".to_owned(),
                initial_balance: dec!(5),
                ..Default::default()
            })
            .unwrap();
        let without_transactions = service
            .add_account(NewAccount {
                name: "Savings".to_owned(),
                initial_balance: dec!(1.23),
                ..Default::default()
            })
            .unwrap();
        create_transaction(
            NewTransaction::new(with_transactions.id, dec!(2), date!(2024 - 01 - 02)),
            &connection,
        )
        .unwrap();

        recompute_account_balances(&connection).unwrap();

        assert_eq!(
            service.get_account(with_transactions.id).unwrap().balance,
            dec!(7)
        );
        assert_eq!(
            service.get_account(without_transactions.id).unwrap().balance,
            dec!(1.23)
        );
    }

    #[test]
    fn all_accounts_share_one_timestamp() {
        let connection = must_create_test_connection();
        let service = AccountService::new(&connection);
        for name in ["Cheque", "Savings", "Credit Card"] {
            service
                .add_account(NewAccount {
                    name: name.to_owned(),
                    ..Default::default()
                })
                .unwrap();
        }

        recompute_account_balances(&connection).unwrap();

        let accounts = service.get_all_accounts().unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(
            accounts
                .iter()
                .all(|account| account.balance_timestamp == accounts[0].balance_timestamp)
        );
    }

    #[test]
    fn no_accounts_updates_nothing() {
        let connection = must_create_test_connection();

        assert_eq!(recompute_account_balances(&connection), Ok(0));
    }
}
