// Dashboard domain model
use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Value};

/// Extension every stored dashboard file carries
pub const DASHBOARD_EXTENSION: &str = ".json";

/// Filename prefix marking a soft-deleted dashboard.
///
/// A dashboard whose own name starts with this prefix cannot be told apart
/// from a deleted one.
pub const DELETED_PREFIX: &str = "deleted_";

/// Name of a dashboard, as taken from the URL and used as the file stem.
/// May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DashboardName(String);

impl DashboardName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derive the dashboard name from a stored file name ("weather.json" -> "weather").
    /// Everything from the first '.' on is dropped.
    pub fn from_file_name(file_name: &str) -> Self {
        let stem = file_name.split('.').next().unwrap_or_default();
        Self(stem.to_string())
    }

    /// Name the dashboard is stored under once soft-deleted
    pub fn deleted(&self) -> Self {
        Self(format!("{}{}", DELETED_PREFIX, self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for DashboardName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a directory entry name refers to a live (listable) dashboard file
pub fn is_live_dashboard_file(file_name: &str) -> bool {
    file_name.contains(DASHBOARD_EXTENSION) && !file_name.contains(DELETED_PREFIX)
}

/// A stored dashboard document with its raw, unparsed contents
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub name: DashboardName,
    pub contents: Bytes,
}

impl Dashboard {
    pub fn new(name: DashboardName, contents: Bytes) -> Self {
        Self { name, contents }
    }
}

/// All live dashboards keyed by name, each body embedded as parsed JSON.
/// Serializes as a single JSON object with keys in sorted order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DashboardIndex(Map<String, Value>);

impl DashboardIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &DashboardName, body: Map<String, Value>) {
        self.0.insert(name.as_str().to_string(), Value::Object(body));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
