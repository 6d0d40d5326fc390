//! Persisted run state: the previous run's results, as a JSON array.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context;
use common::RunSnapshot;
use tracing::{info, warn};

/// Reads and replaces the snapshot file.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The previous snapshot. A missing or unreadable file is an empty one.
    pub fn load(&self) -> RunSnapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No previous results found, creating new file");
                return Vec::new();
            }
            Err(err) => {
                warn!("Could not read {}: {err}; starting fresh", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!("Ignoring malformed {}: {err}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Overwrites the file with `snapshot`.
    pub fn save(&self, snapshot: &RunSnapshot) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        let json = serde_json::to_string_pretty(snapshot).context("failed to serialize results")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        info!("Results saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{JobListing, SiteResult};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("career-watch-store-{}-{name}", std::process::id()))
            .join("job-results.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = SnapshotStore::new(temp_path("missing"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(SnapshotStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_round_trip_ignoring_timestamps() {
        let store = SnapshotStore::new(temp_path("round-trip"));
        let snapshot = vec![
            SiteResult::success(
                "https://www.crobox.com/careers-crobox",
                vec![
                    JobListing::new("Product Manager", "Amsterdam", "https://www.crobox.com/jobs/pm"),
                    JobListing::new("AI Strategy Lead", "", "https://www.crobox.com/jobs/ai"),
                ],
            ),
            SiteResult::failure("https://www.epam.com/careers", "Access denied by website"),
        ];

        store.save(&snapshot).unwrap();
        let loaded = store.load();

        assert_eq!(loaded.len(), snapshot.len());
        for (saved, reloaded) in snapshot.iter().zip(&loaded) {
            assert!(saved.same_content(reloaded), "{saved:?} != {reloaded:?}");
        }
    }

    #[test]
    fn test_save_replaces_previous_content() {
        let store = SnapshotStore::new(temp_path("replace"));
        store
            .save(&vec![SiteResult::success("https://a.test", vec![]), SiteResult::success("https://b.test", vec![])])
            .unwrap();
        store.save(&vec![SiteResult::success("https://c.test", vec![])]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].career_url, "https://c.test");
    }
}
