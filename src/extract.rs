//! Request extractors that reject malformed input with the same JSON error body as the services.

use axum::extract::{
    FromRequest, FromRequestParts,
    rejection::{JsonRejection, PathRejection, QueryRejection},
};

use crate::Error;

/// A JSON request body, see [axum::Json].
///
/// A body that cannot be parsed is rejected with a [crate::ErrorKind::Validation] entry.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

/// The query string, see [axum::extract::Query].
///
/// A query that cannot be parsed is rejected with a [crate::ErrorKind::Validation] entry.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct Query<T>(pub T);

/// The path parameters, see [axum::extract::Path].
///
/// A parameter that cannot be parsed, e.g. a non-numeric ID, is rejected with a
/// [crate::ErrorKind::Validation] entry.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::validation(rejection.body_text())
    }
}
