//! Accounts hold money, belong to optional account groups and track a derived balance.

mod balance;
mod core;
mod endpoints;
mod overview;
mod service;

pub use balance::recompute_account_balances;
pub use core::{
    Account, AccountGroup, AccountGroupId, AccountId, AccountNameMap, AccountNameMapId,
    NewAccount, NewAccountGroup, NewAccountNameMap,
};
pub use endpoints::{
    create_account_endpoint, create_account_group_endpoint, create_account_name_map_endpoint,
    delete_account_endpoint, delete_account_group_endpoint, get_account_endpoint,
    get_account_group_endpoint, get_account_groups_endpoint, get_account_name_maps_endpoint,
    get_accounts_endpoint, update_account_balances_endpoint, update_account_endpoint,
};
pub use overview::{AccountSummary, AccountsOverview, DateRange};
pub use service::{AccountChanges, AccountService};
