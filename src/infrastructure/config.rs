use crate::domain::web_env::IgnoreList;
use anyhow::Context;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Base name of the optional settings file (any format the `config` crate knows)
pub const CONFIG_FILE: &str = "config/server";

/// Prefix for environment overrides, e.g. `ROS_PLOT__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "ROS_PLOT";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ListenSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListenSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    /// Bundled web app assets
    pub app_dir: PathBuf,
    /// One JSON file per dashboard
    pub data_dir: PathBuf,
    /// Optional list of topic paths handed to the web app
    pub ignore_list: PathBuf,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address {}", addr))
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    load_server_config_from(CONFIG_FILE)
}

/// Defaults, then the optional file, then environment overrides
pub fn load_server_config_from(file: &str) -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("storage.app_dir", "./app")?
        .set_default("storage.data_dir", "./data")?
        .set_default("storage.ignore_list", "./data/ros_ignore_list.txt")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("Failed to load configuration from {}", file))?;

    Ok(settings.try_deserialize()?)
}

/// Read the ignore list. `None` when the file is absent or unreadable.
pub async fn load_ignore_list(path: &Path) -> Option<IgnoreList> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(IgnoreList::parse(&text)),
        Err(e) => {
            tracing::debug!("No ignore list at {}: {}", path.display(), e);
            None
        }
    }
}
