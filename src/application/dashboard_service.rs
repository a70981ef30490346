// Dashboard service - Use cases for reading, saving and removing dashboards
use crate::application::dashboard_repository::{DashboardRepository, StoreResult};
use crate::domain::dashboard::{DashboardIndex, DashboardName};
use bytes::Bytes;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn DashboardRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_dashboard(&self, name: &DashboardName) -> StoreResult<Bytes> {
        self.repository.get(name).await
    }

    /// Build the index of all live dashboards.
    /// Documents that are not a JSON object are left out and logged.
    pub async fn list_dashboards(&self) -> StoreResult<DashboardIndex> {
        let dashboards = self.repository.list().await?;
        let mut index = DashboardIndex::new();

        for dashboard in dashboards {
            match serde_json::from_slice::<Map<String, Value>>(&dashboard.contents) {
                Ok(body) => index.insert(&dashboard.name, body),
                Err(e) => {
                    tracing::warn!(
                        "Skipping dashboard {}: stored JSON could not be parsed: {}",
                        dashboard.name,
                        e
                    );
                }
            }
        }

        tracing::debug!("Listed {} dashboards", index.len());
        Ok(index)
    }

    pub async fn save_dashboard(&self, name: &DashboardName, contents: Bytes) -> StoreResult<()> {
        self.repository.put(name, contents).await
    }

    pub async fn remove_dashboard(&self, name: &DashboardName) -> StoreResult<()> {
        self.repository.soft_delete(name).await
    }
}
