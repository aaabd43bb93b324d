//! The JSON response for requests that match no route.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::{ErrorKind, ErrorMessages};

/// A route handler for paths that match no route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 response with a single [ErrorKind::NotFound] message, shaped like the service errors.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorMessages::new(
            ErrorKind::NotFound,
            "The requested resource could not be found",
        )),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    use super::get_404_not_found;

    #[tokio::test]
    async fn responds_with_not_found_message() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!([{"kind": "not_found", "message": "The requested resource could not be found"}])
        );
    }
}
