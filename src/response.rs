//! Turns service results into JSON responses.

use std::sync::Mutex;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{Error, error::ServiceResult};

/// Run `operation` with the locked database connection and respond with its result.
///
/// A successful operation responds with 200 OK and the payload as JSON, a failed one with the
/// status code given by the error's [IntoResponse] implementation.
pub fn respond_with<T, F>(db_connection: &Mutex<Connection>, operation: F) -> Response
where
    T: Serialize,
    F: FnOnce(&Connection) -> ServiceResult<T>,
{
    let connection = match db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match operation(&connection) {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => error.into_response(),
    }
}
