//! Transactions record money moving in or out of an account.

mod core;
mod endpoints;

pub use core::{
    NewTransaction, Transaction, TransactionId, create_transaction, sum_transactions_by_account,
};
pub use endpoints::create_transaction_endpoint;
