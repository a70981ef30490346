// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::presentation::router::DashboardRoute;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub dashboard_route: DashboardRoute,
    /// Static web app root
    pub app_dir: PathBuf,
    /// Serialized web app environment, computed once at startup
    pub web_env: Arc<str>,
}
