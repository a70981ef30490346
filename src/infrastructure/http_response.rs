// HTTP response utilities for dashboard JSON, static HTML and CORS
use crate::application::dashboard_repository::StoreError;
use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, Response, StatusCode},
    response::IntoResponse,
    Router,
};
use bytes::Bytes;
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;

const CORS_ALLOW_ORIGIN: &str = "*";
const CORS_ALLOW_METHODS: &str = "DELETE, POST, GET, OPTIONS";
const CORS_ALLOW_HEADERS: &str =
    "Content-Type, Access-Control-Allow-Headers, Authorization, X-Requested-With";

/// Respond with already-encoded JSON bytes, passed through untouched
pub fn raw_json_response(body: Bytes) -> Response<Body> {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

/// Serialize `value` as the JSON response body
pub fn json_response<T: Serialize>(value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(body) => raw_json_response(Bytes::from(body)),
        Err(e) => {
            tracing::error!("JSON serialization error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn html_response(html: String) -> Response<Body> {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        )],
        html,
    )
        .into_response()
}

/// Status code with an empty body
pub fn status_response(status: StatusCode) -> Response<Body> {
    status.into_response()
}

/// Clients only learn the status; details stay in the log
impl IntoResponse for StoreError {
    fn into_response(self) -> Response<Body> {
        match self {
            StoreError::NotFound { .. } => status_response(StatusCode::NOT_FOUND),
            StoreError::Io { .. } => status_response(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Stamp the permissive cross-origin headers on every response of `router`
pub fn with_cors_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            CORS_ALLOW_METHODS,
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            CORS_ALLOW_HEADERS,
        ))
        .layer(cors_header(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            CORS_ALLOW_ORIGIN,
        ))
}

fn cors_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}
