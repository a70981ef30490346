// Repository trait for dashboard document storage
use crate::domain::dashboard::{Dashboard, DashboardName};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The dashboard could not be read. Missing files and other read errors look the same.
    #[error("dashboard not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// Raw stored bytes of a single dashboard
    async fn get(&self, name: &DashboardName) -> StoreResult<Bytes>;

    /// Raw contents of every live dashboard.
    /// Entries that cannot be read are skipped; only a failure to enumerate is an error.
    async fn list(&self) -> StoreResult<Vec<Dashboard>>;

    /// Store `contents` verbatim, replacing any existing dashboard of that name
    async fn put(&self, name: &DashboardName, contents: Bytes) -> StoreResult<()>;

    /// Mark a dashboard deleted without removing its data
    async fn soft_delete(&self, name: &DashboardName) -> StoreResult<()>;
}
