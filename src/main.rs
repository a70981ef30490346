// Main entry point - Startup checks, dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::domain::web_env::WebAppEnv;
use crate::infrastructure::config::{load_ignore_list, load_server_config};
use crate::infrastructure::file_repository::FileDashboardRepository;
use crate::infrastructure::startup::{count_dashboard_files, ensure_directory};
use crate::presentation::app_state::AppState;
use crate::presentation::router::{build_router, DashboardRoute, API_VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting ROS Plot Server...");

    // Load configuration
    let config = load_server_config()?;
    let storage = &config.storage;

    // Web app environment, fixed for the life of the process
    let ignore_list = load_ignore_list(&storage.ignore_list).await;
    let ignore_list_found = ignore_list.is_some();
    let ignore_list = ignore_list.unwrap_or_default();
    tracing::info!(
        "Found {} ROS ignore paths in {}",
        ignore_list.len(),
        storage.ignore_list.display()
    );
    let web_env = WebAppEnv::new(&ignore_list).to_json()?;

    ensure_directory(&storage.app_dir, "serve web app")?;
    ensure_directory(&storage.data_dir, "read dashboard files")?;
    let dashboard_count =
        count_dashboard_files(&storage.data_dir, &storage.ignore_list, ignore_list_found)?;
    tracing::info!(
        "Found {} Dashboard files in {}",
        dashboard_count,
        storage.data_dir.display()
    );

    // Create repository and service
    let repository = Arc::new(FileDashboardRepository::new(&storage.data_dir));
    let dashboard_service = DashboardService::new(repository);

    let state = Arc::new(AppState {
        dashboard_service,
        dashboard_route: DashboardRoute::new(API_VERSION)?,
        app_dir: storage.app_dir.clone(),
        web_env: web_env.into(),
    });

    let router = build_router(state);

    // Start server
    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
