//! Defines the endpoint for recording a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState,
    extract::Json,
    response::respond_with,
    transaction::{NewTransaction, create_transaction},
};

/// The state needed to record transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a transaction, responds with the created transaction.
///
/// Account balances are not recomputed, see [crate::endpoints::ACCOUNT_BALANCES].
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        create_transaction(new_transaction, connection)
    })
}
