// Route table and dashboard path matching
use crate::domain::dashboard::DashboardName;
use crate::infrastructure::http_response::with_cors_headers;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::dashboard_handler;
use crate::presentation::static_site::serve_static_site;
use axum::{routing::any, Router};
use regex::Regex;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Version segment of the dashboard API path
pub const API_VERSION: &str = "v0";

/// Matches `/<version>/dashboard/<name>` where the name is zero or more
/// alphanumerics, spaces, hyphens or underscores
#[derive(Debug, Clone)]
pub struct DashboardRoute {
    prefix: String,
    pattern: Regex,
}

impl DashboardRoute {
    pub fn new(api_version: &str) -> Result<Self, regex::Error> {
        let prefix = format!("/{}/dashboard/", api_version);
        let pattern = Regex::new(&format!(r"^{}([a-zA-Z0-9_\- ]*)$", regex::escape(&prefix)))?;
        Ok(Self { prefix, pattern })
    }

    /// Path prefix every dashboard request starts with (trailing slash included)
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Dashboard name in a percent-decoded request path, if the path matches
    pub fn match_path(&self, path: &str) -> Option<DashboardName> {
        let captures = self.pattern.captures(path)?;
        let name = captures.get(1).map_or("", |m| m.as_str());
        Some(DashboardName::new(name))
    }
}

/// Dashboard API under its prefix, static web app for everything else
pub fn build_router(state: Arc<AppState>) -> Router {
    let prefix = state.dashboard_route.prefix().to_string();

    let dashboard_api: Router<Arc<AppState>> = Router::new()
        .route(&prefix, any(dashboard_handler))
        .route(&format!("{}*rest", prefix), any(dashboard_handler));

    let app: Router<Arc<AppState>> = Router::new()
        .merge(with_cors_headers(dashboard_api))
        .fallback(serve_static_site);

    app.with_state(state).layer(TraceLayer::new_for_http())
}
