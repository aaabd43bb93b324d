//! Defines the service result type, the app level error type and the conversion of errors to
//! JSON responses.

use std::fmt::Display;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

/// The outcome of a service operation: either the payload or the errors that prevented it.
pub type ServiceResult<T> = Result<T, Error>;

/// The kind of an expected failure reported by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The targeted or referenced entity does not exist.
    NotFound,
    /// The caller is not allowed to perform the operation.
    ///
    /// The services never produce this kind, it is only raised at the HTTP boundary.
    Security,
    /// The request was understood but one of its values was rejected.
    Validation,
}

/// A single keyed error entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    /// What went wrong.
    pub kind: ErrorKind,
    /// A human readable description of the error.
    pub message: String,
}

/// An ordered, non-empty list of error entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorMessages(Vec<ErrorMessage>);

impl ErrorMessages {
    /// Create a list holding a single entry.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self(vec![ErrorMessage {
            kind,
            message: message.into(),
        }])
    }

    /// Add an entry to the end of the list.
    pub fn push(&mut self, kind: ErrorKind, message: impl Into<String>) {
        self.0.push(ErrorMessage {
            kind,
            message: message.into(),
        });
    }

    /// Whether any entry has the error kind `kind`.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        self.0.iter().any(|entry| entry.kind == kind)
    }

    /// Iterate over the entries in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorMessage> {
        self.0.iter()
    }
}

impl Display for ErrorMessages {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|entry| entry.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A service rejected the operation, e.g., because a referenced entity does not exist.
    ///
    /// Services that delegate to other services pass these entries through unchanged.
    #[error("{0}")]
    Service(ErrorMessages),

    /// An unhandled/unexpected SQL error.
    ///
    /// The services do not try to recover from these, the error should be logged and
    /// reported to the client as an internal server error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// Create an error with a single [ErrorKind::NotFound] entry.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::Service(ErrorMessages::new(ErrorKind::NotFound, message))
    }

    /// Create an error with a single [ErrorKind::Validation] entry.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Service(ErrorMessages::new(ErrorKind::Validation, message))
    }

    /// Whether the error carries an entry of the kind `kind`.
    ///
    /// Store faults and lock failures carry no entries and always return `false`.
    pub fn has_kind(&self, kind: ErrorKind) -> bool {
        match self {
            Error::Service(messages) => messages.has_kind(kind),
            _ => false,
        }
    }

    /// The HTTP status code a client should receive for this error.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Service(messages) if messages.has_kind(ErrorKind::Security) => {
                StatusCode::UNAUTHORIZED
            }
            Error::Service(messages) if messages.has_kind(ErrorKind::NotFound) => {
                StatusCode::NOT_FOUND
            }
            Error::Service(_) => StatusCode::BAD_REQUEST,
            Error::SqlError(_) | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => {
                Error::not_found("the requested resource could not be found")
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match self {
            Error::Service(messages) => {
                tracing::debug!("Request rejected with {status_code}: {messages}");
                (status_code, Json(messages)).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    status_code,
                    Json(json!({
                        "message": "An unexpected error occurred, check the server logs for more details."
                    })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::{Error, ErrorKind, ErrorMessages};

    #[test]
    fn not_found_maps_to_404() {
        let response = Error::not_found("Account 1 not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn security_takes_precedence_over_not_found() {
        let mut messages = ErrorMessages::new(ErrorKind::NotFound, "Account 1 not found");
        messages.push(ErrorKind::Security, "not allowed");

        let response = Error::Service(messages).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn validation_maps_to_400() {
        let response = Error::validation("bad date range").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_faults_map_to_500() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn lock_errors_map_to_500() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_rows_becomes_not_found() {
        let error = Error::from(rusqlite::Error::QueryReturnedNoRows);

        assert!(error.has_kind(ErrorKind::NotFound));
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut messages = ErrorMessages::new(ErrorKind::Validation, "first");
        messages.push(ErrorKind::NotFound, "second");

        let got: Vec<&str> = messages.iter().map(|entry| entry.message.as_str()).collect();

        assert_eq!(got, vec!["first", "second"]);
        assert_eq!(messages.to_string(), "first; second");
    }
}
