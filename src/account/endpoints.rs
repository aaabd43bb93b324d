//! Defines the JSON endpoints for accounts, account groups and account name maps.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState,
    account::{
        AccountChanges, AccountGroupId, AccountId, AccountService, NewAccount, NewAccountGroup,
        NewAccountNameMap,
    },
    extract::{Json, Path, Query},
    response::respond_with,
};

/// The state needed to manage accounts.
#[derive(Debug, Clone)]
pub struct AccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional date range for the accounts overview, e.g. `?from=2024-05-01&to=2024-05-31`.
#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    from: Option<Date>,
    to: Option<Date>,
}

/// A route handler for the accounts overview.
pub async fn get_accounts_endpoint(
    State(state): State<AccountState>,
    Query(query): Query<OverviewQuery>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).get_accounts_overview(query.from, query.to)
    })
}

/// A route handler for creating an account, responds with the created account.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Json(new_account): Json<NewAccount>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).add_account(new_account)
    })
}

/// A route handler for getting an account by its ID.
pub async fn get_account_endpoint(
    State(state): State<AccountState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).get_account(account_id)
    })
}

/// A route handler for partially updating an account.
///
/// Fields missing from the body are kept, fields set to `null` are cleared.
pub async fn update_account_endpoint(
    State(state): State<AccountState>,
    Path(account_id): Path<AccountId>,
    Json(changes): Json<AccountChanges>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).update_account(account_id, changes)
    })
}

/// A route handler for deleting an account.
pub async fn delete_account_endpoint(
    State(state): State<AccountState>,
    Path(account_id): Path<AccountId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).delete_account(account_id)
    })
}

/// A route handler for recomputing the balance of every account.
pub async fn update_account_balances_endpoint(State(state): State<AccountState>) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).update_account_balances()
    })
}

/// A route handler for creating an account group.
pub async fn create_account_group_endpoint(
    State(state): State<AccountState>,
    Json(new_account_group): Json<NewAccountGroup>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).add_account_group(new_account_group)
    })
}

/// A route handler for getting an account group by its ID.
pub async fn get_account_group_endpoint(
    State(state): State<AccountState>,
    Path(account_group_id): Path<AccountGroupId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).get_account_group(account_group_id)
    })
}

/// A route handler for listing all account groups.
pub async fn get_account_groups_endpoint(State(state): State<AccountState>) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).get_all_account_groups()
    })
}

/// A route handler for deleting an account group.
pub async fn delete_account_group_endpoint(
    State(state): State<AccountState>,
    Path(account_group_id): Path<AccountGroupId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).delete_account_group(account_group_id)
    })
}

/// A route handler for mapping an external name to an account.
pub async fn create_account_name_map_endpoint(
    State(state): State<AccountState>,
    Json(new_name_map): Json<NewAccountNameMap>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection)
            .add_account_name_map(new_name_map.account_id, &new_name_map.name)
    })
}

/// A route handler for listing all account name maps.
pub async fn get_account_name_maps_endpoint(State(state): State<AccountState>) -> Response {
    respond_with(&state.db_connection, |connection| {
        AccountService::new(connection).get_all_account_name_maps()
    })
}
