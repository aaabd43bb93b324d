//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/accounts/{account_id}', use [format_endpoint].

/// The route for listing accounts with their period totals and for creating accounts.
pub const ACCOUNTS: &str = "/api/accounts";
/// The route to get, update or delete an account.
pub const ACCOUNT: &str = "/api/accounts/{account_id}";
/// The route to recompute the balances of all accounts.
pub const ACCOUNT_BALANCES: &str = "/api/accounts/balances";
/// The route for listing and creating account groups.
pub const ACCOUNT_GROUPS: &str = "/api/account_groups";
/// The route to get or delete an account group.
pub const ACCOUNT_GROUP: &str = "/api/account_groups/{account_group_id}";
/// The route for listing and creating account name maps.
pub const ACCOUNT_NAME_MAPS: &str = "/api/account_name_maps";
/// The route for listing and creating categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to get or delete a category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route for listing and creating vendors.
pub const VENDORS: &str = "/api/vendors";
/// The route to get, update or delete a vendor.
pub const VENDOR: &str = "/api/vendors/{vendor_id}";
/// The route to rename a vendor.
pub const VENDOR_NAME: &str = "/api/vendors/{vendor_id}/name";
/// The route to set or clear a vendor's default category.
pub const VENDOR_DEFAULT_CATEGORY: &str = "/api/vendors/{vendor_id}/default_category";
/// The route for listing and creating vendor maps.
pub const VENDOR_MAPS: &str = "/api/vendor_maps";
/// The route to get or delete a vendor map.
pub const VENDOR_MAP: &str = "/api/vendor_maps/{vendor_map_id}";
/// The route for recording transactions.
pub const TRANSACTIONS: &str = "/api/transactions";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// Only the first parameter is replaced, e.g. `format_endpoint("/api/vendors/{vendor_id}/name", 1)`
/// gives "/api/vendors/1/name".
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    match (endpoint_path.find('{'), endpoint_path.find('}')) {
        (Some(start), Some(end)) if start < end => format!(
            "{}{id}{}",
            &endpoint_path[..start],
            &endpoint_path[end + 1..]
        ),
        _ => endpoint_path.to_owned(),
    }
}
