//! Application router configuration for the JSON API.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState,
    account::{
        create_account_endpoint, create_account_group_endpoint, create_account_name_map_endpoint,
        delete_account_endpoint, delete_account_group_endpoint, get_account_endpoint,
        get_account_group_endpoint, get_account_groups_endpoint, get_account_name_maps_endpoint,
        get_accounts_endpoint, update_account_balances_endpoint, update_account_endpoint,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        get_category_endpoint,
    },
    endpoints,
    not_found::get_404_not_found,
    transaction::create_transaction_endpoint,
    vendor::{
        create_vendor_endpoint, create_vendor_map_endpoint, delete_vendor_endpoint,
        delete_vendor_map_endpoint, get_vendor_endpoint, get_vendor_map_endpoint,
        get_vendor_maps_endpoint, get_vendors_endpoint, update_vendor_default_category_endpoint,
        update_vendor_endpoint, update_vendor_name_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route(
            endpoints::ACCOUNTS,
            get(get_accounts_endpoint).post(create_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT,
            get(get_account_endpoint)
                .patch(update_account_endpoint)
                .delete(delete_account_endpoint),
        )
        .route(
            endpoints::ACCOUNT_BALANCES,
            post(update_account_balances_endpoint),
        )
        .route(
            endpoints::ACCOUNT_GROUPS,
            get(get_account_groups_endpoint).post(create_account_group_endpoint),
        )
        .route(
            endpoints::ACCOUNT_GROUP,
            get(get_account_group_endpoint).delete(delete_account_group_endpoint),
        )
        .route(
            endpoints::ACCOUNT_NAME_MAPS,
            get(get_account_name_maps_endpoint).post(create_account_name_map_endpoint),
        );

    let category_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint).delete(delete_category_endpoint),
        );

    let vendor_routes = Router::new()
        .route(
            endpoints::VENDORS,
            get(get_vendors_endpoint).post(create_vendor_endpoint),
        )
        .route(
            endpoints::VENDOR,
            get(get_vendor_endpoint)
                .put(update_vendor_endpoint)
                .delete(delete_vendor_endpoint),
        )
        .route(endpoints::VENDOR_NAME, put(update_vendor_name_endpoint))
        .route(
            endpoints::VENDOR_DEFAULT_CATEGORY,
            put(update_vendor_default_category_endpoint),
        )
        .route(
            endpoints::VENDOR_MAPS,
            get(get_vendor_maps_endpoint).post(create_vendor_map_endpoint),
        )
        .route(
            endpoints::VENDOR_MAP,
            get(get_vendor_map_endpoint).delete(delete_vendor_map_endpoint),
        );

    account_routes
        .merge(category_routes)
        .merge(vendor_routes)
        .route(endpoints::TRANSACTIONS, post(create_transaction_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router,
        endpoints::{self, format_endpoint},
        test_utils::must_create_test_connection,
    };

    fn get_test_server() -> TestServer {
        let state = AppState::new(must_create_test_connection()).expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = get_test_server();

        let response = server.get("/api/nothing_here").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()[0]["kind"], "not_found");
    }

    #[tokio::test]
    async fn get_missing_account_is_404() {
        let server = get_test_server();

        let response = server.get(&format_endpoint(endpoints::ACCOUNT, -1)).await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>(),
            json!([{"kind": "not_found", "message": "Account -1 not found"}])
        );
    }

    #[tokio::test]
    async fn create_then_get_account() {
        let server = get_test_server();

        let created = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({"name": "test account", "initial_balance": 1.23}))
            .await;
        created.assert_status_ok();
        let created = created.json::<Value>();

        let id = created["id"].as_i64().unwrap();
        let response = server.get(&format_endpoint(endpoints::ACCOUNT, id)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), created);
    }

    #[tokio::test]
    async fn create_account_with_missing_category_is_404() {
        let server = get_test_server();

        let response = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({"name": "test account", "default_category_id": -1}))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn patch_account_keeps_missing_fields_and_clears_nulls() {
        let server = get_test_server();
        let category = server
            .post(endpoints::CATEGORIES)
            .json(&json!({"name": "Groceries"}))
            .await
            .json::<Value>();
        let account = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({
                "name": "Cheque",
                "initial_balance": 10.0,
                "default_category_id": category["id"],
            }))
            .await
            .json::<Value>();
        let path = format_endpoint(endpoints::ACCOUNT, account["id"].as_i64().unwrap());

        let renamed = server
            .patch(&path)
            .json(&json!({"name": "Everyday"}))
            .await;
        renamed.assert_status_ok();
        let renamed = renamed.json::<Value>();
        assert_eq!(renamed["name"], "Everyday");
        assert_eq!(renamed["default_category_id"], category["id"]);

        let cleared = server
            .patch(&path)
            .json(&json!({"default_category_id": null}))
            .await
            .json::<Value>();
        assert_eq!(cleared["name"], "Everyday");
        assert_eq!(cleared["default_category_id"], Value::Null);
    }

    #[tokio::test]
    async fn transactions_change_balance_after_recompute() {
        let server = get_test_server();
        let account = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({"name": "Cheque", "initial_balance": 100.0}))
            .await
            .json::<Value>();
        let account_id = account["id"].as_i64().unwrap();

        server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({"account_id": account_id, "amount": -15.25, "date": "2024-01-02"}))
            .await
            .assert_status_ok();
        let response = server.post(endpoints::ACCOUNT_BALANCES).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), Value::Bool(true));

        let account = server
            .get(&format_endpoint(endpoints::ACCOUNT, account_id))
            .await
            .json::<Value>();
        assert_eq!(account["balance"], "84.75");
    }

    #[tokio::test]
    async fn overview_rejects_inverted_range() {
        let server = get_test_server();

        let response = server
            .get(endpoints::ACCOUNTS)
            .add_query_param("from", "2024-06-01")
            .add_query_param("to", "2024-05-01")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()[0]["kind"], "validation");
    }

    #[tokio::test]
    async fn overview_with_malformed_date_is_json_validation_error() {
        let server = get_test_server();

        let response = server
            .get(endpoints::ACCOUNTS)
            .add_query_param("from", "garbage")
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()[0]["kind"], "validation");
    }

    #[tokio::test]
    async fn patch_account_with_null_initial_balance_is_json_validation_error() {
        let server = get_test_server();
        let account = server
            .post(endpoints::ACCOUNTS)
            .json(&json!({"name": "Cheque"}))
            .await
            .json::<Value>();
        let path = format_endpoint(endpoints::ACCOUNT, account["id"].as_i64().unwrap());

        let response = server
            .patch(&path)
            .json(&json!({"initial_balance": null}))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()[0]["kind"], "validation");
        let unchanged = server.get(&path).await.json::<Value>();
        assert_eq!(unchanged, account);
    }

    #[tokio::test]
    async fn non_numeric_account_id_is_json_validation_error() {
        let server = get_test_server();

        let response = server.get("/api/accounts/cheque").await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()[0]["kind"], "validation");
    }

    #[tokio::test]
    async fn renaming_missing_vendor_is_ok_with_null_body() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::VENDOR_NAME, -1))
            .json(&json!({"name": "new vendor"}))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), Value::Null);
    }

    #[tokio::test]
    async fn setting_missing_vendor_default_category_is_404() {
        let server = get_test_server();

        let response = server
            .put(&format_endpoint(endpoints::VENDOR_DEFAULT_CATEGORY, -1))
            .json(&json!({"category_id": null}))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn blank_category_name_is_400() {
        let server = get_test_server();

        let response = server
            .post(endpoints::CATEGORIES)
            .json(&json!({"name": "  "}))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn delete_vendor_map() {
        let server = get_test_server();
        let vendor = server
            .post(endpoints::VENDORS)
            .json(&json!({"name": "Supermarket"}))
            .await
            .json::<Value>();
        let vendor_map = server
            .post(endpoints::VENDOR_MAPS)
            .json(&json!({"vendor_id": vendor["id"], "description": "SUPERMARKET 1234"}))
            .await
            .json::<Value>();
        let path = format_endpoint(endpoints::VENDOR_MAP, vendor_map["id"].as_i64().unwrap());

        server.delete(&path).await.assert_status_ok();

        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn account_group_routes() {
        let server = get_test_server();

        let group = server
            .post(endpoints::ACCOUNT_GROUPS)
            .json(&json!({"name": "Everyday"}))
            .await
            .json::<Value>();
        assert_eq!(group["is_active"], true);

        let groups = server.get(endpoints::ACCOUNT_GROUPS).await.json::<Value>();
        assert_eq!(groups, json!([group]));

        let path = format_endpoint(endpoints::ACCOUNT_GROUP, group["id"].as_i64().unwrap());
        server.delete(&path).await.assert_status_ok();
        server.delete(&path).await.assert_status_not_found();
    }
}
