/// Operation-outcome to HTTP adapter
///
/// Every CRUD operation across every entity type renders the same way: the
/// success arm becomes 200 with the value as JSON, the rejection arm becomes
/// 400 with the rejection message. No message is re-interpreted here.
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use lyra_core::OpResult;
use serde::Serialize;
use serde_json::json;

/// Render an operation outcome as an HTTP response
pub fn respond<T: Serialize>(outcome: OpResult<T>) -> Response {
    match outcome {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(reject) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": reject.message })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_core::OpReject;

    #[test]
    fn test_success_renders_ok() {
        let response = respond(Ok(42));
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_rejection_renders_bad_request() {
        let response = respond::<()>(Err(OpReject::new("User not found")));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
