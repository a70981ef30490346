// HTTP request handlers for the dashboard API
use crate::domain::dashboard::DashboardName;
use crate::infrastructure::http_response::{json_response, raw_json_response, status_response};
use crate::presentation::app_state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Dispatch a request under the dashboard prefix by method.
/// Pre-flight requests succeed before the path is even looked at.
pub async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    body: Body,
) -> Response {
    if method.as_str().eq_ignore_ascii_case(Method::OPTIONS.as_str()) {
        return status_response(StatusCode::OK);
    }

    let Some(name) = dashboard_name(&state, &uri) else {
        return status_response(StatusCode::NOT_FOUND);
    };

    match method {
        Method::GET if name.is_empty() => list_dashboards(&state).await,
        Method::GET => get_dashboard(&state, &name).await,
        Method::POST => post_dashboard(&state, &name, body).await,
        Method::DELETE => delete_dashboard(&state, &name).await,
        _ => status_response(StatusCode::METHOD_NOT_ALLOWED),
    }
}

fn dashboard_name(state: &AppState, uri: &Uri) -> Option<DashboardName> {
    let path = match urlencoding::decode(uri.path()) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("Undecodable dashboard path {}: {}", uri.path(), e);
            return None;
        }
    };
    state.dashboard_route.match_path(&path)
}

async fn list_dashboards(state: &AppState) -> Response {
    match state.dashboard_service.list_dashboards().await {
        Ok(index) => json_response(&index),
        Err(e) => e.into_response(),
    }
}

async fn get_dashboard(state: &AppState, name: &DashboardName) -> Response {
    match state.dashboard_service.get_dashboard(name).await {
        Ok(contents) => raw_json_response(contents),
        Err(e) => e.into_response(),
    }
}

async fn post_dashboard(state: &AppState, name: &DashboardName, body: Body) -> Response {
    let contents = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("Failed to read body for dashboard {}: {}", name, e);
            return status_response(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match state.dashboard_service.save_dashboard(name, contents).await {
        Ok(()) => status_response(StatusCode::OK),
        Err(e) => e.into_response(),
    }
}

async fn delete_dashboard(state: &AppState, name: &DashboardName) -> Response {
    match state.dashboard_service.remove_dashboard(name).await {
        Ok(()) => status_response(StatusCode::OK),
        Err(e) => e.into_response(),
    }
}
