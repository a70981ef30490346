// Filesystem repository - one JSON file per dashboard in a flat directory
use crate::application::dashboard_repository::{DashboardRepository, StoreError, StoreResult};
use crate::domain::dashboard::{
    is_live_dashboard_file, Dashboard, DashboardName, DASHBOARD_EXTENSION,
};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Permissions for newly written dashboard files (owner read/write)
#[cfg(unix)]
const DASHBOARD_FILE_MODE: u32 = 0o600;

/// Resolve a dashboard name to `<data_dir>/<name>.json`.
/// The extension is only appended when missing; the name is not otherwise sanitized.
pub fn resolve_dashboard_path(data_dir: &Path, name: &str) -> PathBuf {
    if name.ends_with(DASHBOARD_EXTENSION) {
        data_dir.join(name)
    } else {
        data_dir.join(format!("{}{}", name, DASHBOARD_EXTENSION))
    }
}

#[derive(Debug, Clone)]
pub struct FileDashboardRepository {
    data_dir: PathBuf,
}

impl FileDashboardRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn dashboard_path(&self, name: &DashboardName) -> PathBuf {
        resolve_dashboard_path(&self.data_dir, name.as_str())
    }
}

fn io_failure(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| {
        tracing::error!("I/O failure on {}: {}", path.display(), source);
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl DashboardRepository for FileDashboardRepository {
    async fn get(&self, name: &DashboardName) -> StoreResult<Bytes> {
        let path = self.dashboard_path(name);
        match fs::read(&path).await {
            Ok(contents) => Ok(Bytes::from(contents)),
            Err(e) => {
                tracing::debug!("Could not read {}: {}", path.display(), e);
                Err(StoreError::NotFound { path })
            }
        }
    }

    async fn list(&self) -> StoreResult<Vec<Dashboard>> {
        let mut entries = fs::read_dir(&self.data_dir)
            .await
            .map_err(io_failure(&self.data_dir))?;
        let mut file_names = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(io_failure(&self.data_dir))?
        {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !is_live_dashboard_file(&file_name) {
                continue;
            }

            match entry.file_type().await {
                Ok(file_type) if file_type.is_dir() => continue,
                Ok(_) => file_names.push(file_name),
                Err(e) => {
                    tracing::warn!("Error inspecting file {}: {}", file_name, e);
                }
            }
        }
        file_names.sort();

        let mut dashboards = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            // "weather.json.bak" resolves to "weather.json.bak.json", which is not there
            let path = resolve_dashboard_path(&self.data_dir, &file_name);
            let contents = match fs::read(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    tracing::warn!("Error reading file {}: {}", file_name, e);
                    continue;
                }
            };

            dashboards.push(Dashboard::new(
                DashboardName::from_file_name(&file_name),
                Bytes::from(contents),
            ));
        }

        Ok(dashboards)
    }

    async fn put(&self, name: &DashboardName, contents: Bytes) -> StoreResult<()> {
        let path = self.dashboard_path(name);

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(DASHBOARD_FILE_MODE);

        let mut file = options.open(&path).await.map_err(io_failure(&path))?;
        file.write_all(&contents).await.map_err(io_failure(&path))?;
        file.flush().await.map_err(io_failure(&path))?;

        tracing::debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    async fn soft_delete(&self, name: &DashboardName) -> StoreResult<()> {
        let old_path = self.dashboard_path(name);
        let new_path = self.dashboard_path(&name.deleted());

        fs::rename(&old_path, &new_path)
            .await
            .map_err(io_failure(&old_path))?;

        tracing::info!("Dashboard {} moved to {}", name, new_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_appends_extension_when_missing() {
        let dir = Path::new("./data");
        assert_eq!(
            resolve_dashboard_path(dir, "weather"),
            PathBuf::from("./data/weather.json")
        );
        assert_eq!(
            resolve_dashboard_path(dir, "weather.json"),
            PathBuf::from("./data/weather.json")
        );
        assert_eq!(resolve_dashboard_path(dir, ""), PathBuf::from("./data/.json"));
    }

    #[tokio::test]
    async fn test_put_then_get_round_trips_bytes() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());
        let name = DashboardName::new("my dash");
        let body = Bytes::from_static(b"not even json \xff");

        repository.put(&name, body.clone()).await.unwrap();

        assert_eq!(repository.get(&name).await.unwrap(), body);
        assert!(dir.path().join("my dash.json").is_file());
    }

    #[tokio::test]
    async fn test_put_overwrites_existing_contents() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());
        let name = DashboardName::new("weather");

        repository
            .put(&name, Bytes::from_static(b"{\"a\":1,\"long\":\"value\"}"))
            .await
            .unwrap();
        repository
            .put(&name, Bytes::from_static(b"{\"b\":2}"))
            .await
            .unwrap();

        assert_eq!(
            repository.get(&name).await.unwrap(),
            Bytes::from_static(b"{\"b\":2}")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_put_creates_owner_only_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());
        repository
            .put(&DashboardName::new("weather"), Bytes::from_static(b"{}"))
            .await
            .unwrap();

        let metadata = std::fs::metadata(dir.path().join("weather.json")).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());

        let result = repository.get(&DashboardName::new("doesnotexist")).await;

        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_soft_delete_renames_and_keeps_data() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());
        let name = DashboardName::new("weather");
        repository
            .put(&name, Bytes::from_static(b"{\"a\":1}"))
            .await
            .unwrap();

        repository.soft_delete(&name).await.unwrap();

        assert!(matches!(
            repository.get(&name).await,
            Err(StoreError::NotFound { .. })
        ));
        let kept = std::fs::read(dir.path().join("deleted_weather.json")).unwrap();
        assert_eq!(kept, b"{\"a\":1}");
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_twice_fails() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path());
        let name = DashboardName::new("weather");
        repository
            .put(&name, Bytes::from_static(b"{}"))
            .await
            .unwrap();

        repository.soft_delete(&name).await.unwrap();

        assert!(matches!(
            repository.soft_delete(&name).await,
            Err(StoreError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_filters_entries() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("weather.json"), b"{\"a\":1}").unwrap();
        std::fs::write(dir.path().join("deleted_old.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("ros_ignore_list.txt"), b"/rosout\n").unwrap();
        std::fs::create_dir(dir.path().join("nested.json")).unwrap();

        let repository = FileDashboardRepository::new(dir.path());
        let dashboards = repository.list().await.unwrap();

        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].name.as_str(), "weather");
        assert_eq!(dashboards[0].contents, Bytes::from_static(b"{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_list_ignores_backups_sharing_a_stem() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("weather.json"), b"{\"v\":\"live\"}").unwrap();
        std::fs::write(dir.path().join("weather.json.bak"), b"{\"v\":\"stale\"}").unwrap();
        for i in 0..20 {
            std::fs::write(dir.path().join(format!("weather.json.{}", i)), b"{\"v\":\"stale\"}")
                .unwrap();
        }
        std::fs::write(dir.path().join("notes.json.txt"), b"{\"v\":\"notes\"}").unwrap();

        let repository = FileDashboardRepository::new(dir.path());
        let dashboards = repository.list().await.unwrap();

        assert_eq!(dashboards.len(), 1);
        assert_eq!(dashboards[0].name.as_str(), "weather");
        assert_eq!(dashboards[0].contents, Bytes::from_static(b"{\"v\":\"live\"}"));
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_file_name() {
        let dir = tempdir().expect("tempdir");
        for name in ["zeta", "alpha", "mid"] {
            std::fs::write(dir.path().join(format!("{}.json", name)), b"{}").unwrap();
        }

        let repository = FileDashboardRepository::new(dir.path());
        let names: Vec<String> = repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name.to_string())
            .collect();

        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_io_failure() {
        let dir = tempdir().expect("tempdir");
        let repository = FileDashboardRepository::new(dir.path().join("missing"));

        assert!(matches!(
            repository.list().await,
            Err(StoreError::Io { .. })
        ));
    }
}
