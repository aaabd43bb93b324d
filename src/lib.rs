//! Scrilla is a service for managing personal finances: accounts, categories and vendors.
//!
//! This library provides the services that enforce the business rules and a JSON API over them.
//! Every service operation returns a [ServiceResult]: either the payload or a list of keyed error
//! messages, which the API maps to an HTTP status code.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod category;
mod change;
mod database_id;
mod db;
mod endpoints;
mod entity;
mod error;
mod extract;
mod logging;
mod money;
mod not_found;
mod response;
mod routing;
#[cfg(test)]
mod test_utils;
mod transaction;
mod vendor;

pub use account::{
    Account, AccountChanges, AccountGroup, AccountGroupId, AccountId, AccountNameMap,
    AccountNameMapId, AccountService, AccountSummary, AccountsOverview, DateRange, NewAccount,
    NewAccountGroup, NewAccountNameMap, recompute_account_balances,
};
pub use app_state::AppState;
pub use category::{Category, CategoryId, CategoryLookup, CategoryService, NewCategory};
pub use change::Change;
pub use database_id::DatabaseId;
pub use db::initialize as initialize_db;
pub use endpoints::format_endpoint;
pub use error::{Error, ErrorKind, ErrorMessage, ErrorMessages, ServiceResult};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, create_transaction, sum_transactions_by_account,
};
pub use vendor::{NewVendor, NewVendorMap, Vendor, VendorId, VendorMap, VendorMapId, VendorService};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
