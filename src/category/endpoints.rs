//! Defines the JSON endpoints for categories.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState,
    category::{CategoryId, CategoryService, NewCategory},
    extract::{Json, Path},
    response::respond_with,
};

/// The state needed to manage categories.
#[derive(Debug, Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a category, responds with the created category.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Json(new_category): Json<NewCategory>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        CategoryService::new(connection).add_category(&new_category.name)
    })
}

/// A route handler for getting a category by its ID.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        CategoryService::new(connection).get_category(category_id)
    })
}

/// A route handler for listing all categories.
pub async fn get_categories_endpoint(State(state): State<CategoryState>) -> Response {
    respond_with(&state.db_connection, |connection| {
        CategoryService::new(connection).get_all_categories()
    })
}

/// A route handler for deleting a category.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    respond_with(&state.db_connection, |connection| {
        CategoryService::new(connection).delete_category(category_id)
    })
}
