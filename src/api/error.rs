use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::CatalogError;

pub const NO_DATA: &str = "No data";
pub const DECODE_FAILED: &str = "failed to decode request body";
pub const NOTHING_TO_UPDATE: &str = "no fields to update";
pub const TIMED_OUT: &str = "request timed out";

/// Marks responses that carry an error envelope.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),

    NotFound(String),

    NoData,

    Conflict(String),

    DatabaseError(String),

    Timeout,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::NoData => write!(f, "{NO_DATA}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::Timeout => write!(f, "{TIMED_OUT}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::NoData => (StatusCode::NOT_FOUND, NO_DATA.to_string()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::DatabaseError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::Timeout => (StatusCode::REQUEST_TIMEOUT, TIMED_OUT.to_string()),
        };

        let body = ApiResponse::<()>::error(error_message);
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(EnvelopeError);
        response
    }
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Maps a use-case failure to the client-facing `message`.
    ///
    /// Option and update-payload problems keep their own wording; every
    /// storage outcome is reported as `message`.
    pub fn catalog(message: impl Into<String>) -> impl FnOnce(CatalogError) -> Self {
        let message = message.into();
        move |err| {
            tracing::debug!(error = %err, "{}", message);
            match err {
                CatalogError::InvalidOptions(msg) => Self::BadRequest(msg),
                CatalogError::NothingToUpdate => Self::BadRequest(NOTHING_TO_UPDATE.to_string()),
                CatalogError::NotFound { .. } => Self::NotFound(message),
                CatalogError::AlreadyExists { .. } => Self::Conflict(message),
                CatalogError::InvalidData { .. } => Self::BadRequest(message),
                CatalogError::Storage { .. } => Self::DatabaseError(message),
            }
        }
    }
}

/// Rewrites error envelopes to HTTP 200 so clients read failures from the body.
pub async fn uniform_status_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    if response.extensions().get::<EnvelopeError>().is_some() {
        *response.status_mut() = StatusCode::OK;
    }

    response
}

/// Wraps the bare 408 produced by the timeout layer in an error envelope.
pub async fn timeout_envelope_middleware(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status() == StatusCode::REQUEST_TIMEOUT
        && response.extensions().get::<EnvelopeError>().is_none()
    {
        return ApiError::Timeout.into_response();
    }

    response
}

pub async fn fallback() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::StoreError;

    #[test]
    fn test_catalog_mapping_keeps_update_wording() {
        let err = ApiError::catalog("Unable to update person data in DB")(
            CatalogError::NothingToUpdate,
        );
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == NOTHING_TO_UPDATE));

        let err = ApiError::catalog("Unable to update person data in DB")(
            CatalogError::at("person.update")(StoreError::NoRows),
        );
        assert!(
            matches!(err, ApiError::NotFound(msg) if msg == "Unable to update person data in DB")
        );
    }

    #[test]
    fn test_error_response_is_marked() {
        let response = ApiError::NoData.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<EnvelopeError>().is_some());
    }

    #[tokio::test]
    async fn test_timeouts_follow_envelope_contract() {
        use axum::{Router, body::Body, middleware, routing::get};
        use http_body_util::BodyExt;
        use std::time::Duration;
        use tower::ServiceExt;
        use tower_http::timeout::TimeoutLayer;

        let app = Router::new()
            .route(
                "/slow",
                get(|| async { tokio::time::sleep(Duration::from_secs(5)).await }),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_millis(20),
            ))
            .layer(middleware::from_fn(timeout_envelope_middleware))
            .layer(middleware::from_fn(uniform_status_middleware));

        let response = app
            .oneshot(axum::http::Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"status": "Error", "error": TIMED_OUT})
        );
    }
}
