//! Snapshot persistence on the local filesystem
//!
//! One snapshot is one JSON array of members, written to a path derived
//! from the team id and the current timestamp. Snapshots are never
//! overwritten and never partially recovered.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tracing::info;

use crate::domain::member::Member;
use crate::domain::DomainError;

/// Durable store for per-team member snapshots
#[async_trait]
pub trait SnapshotStore: Send + Sync + std::fmt::Debug {
    /// Persist the member sequence for a team, returning the written path.
    async fn save(&self, team_id: &str, members: &[Member]) -> Result<PathBuf, DomainError>;

    /// Load a previously persisted member sequence.
    async fn load(&self, path: &Path) -> Result<Vec<Member>, DomainError>;
}

/// Filesystem-backed snapshot store
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    directory: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    fn snapshot_path(&self, team_id: &str) -> PathBuf {
        // ':' and '.' are not filename-safe everywhere; microsecond
        // precision keeps successive saves in one run from colliding.
        let timestamp = Utc::now()
            .to_rfc3339_opts(SecondsFormat::Micros, true)
            .replace([':', '.'], "-");

        self.directory
            .join(format!("team-{}-backup-{}.json", team_id, timestamp))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn save(&self, team_id: &str, members: &[Member]) -> Result<PathBuf, DomainError> {
        tokio::fs::create_dir_all(&self.directory).await.map_err(|e| {
            DomainError::backup(format!(
                "Failed to create backup directory {}: {}",
                self.directory.display(),
                e
            ))
        })?;

        let body = serde_json::to_vec_pretty(members).map_err(|e| {
            DomainError::serialization(format!("Failed to serialize member snapshot: {}", e))
        })?;

        let path = self.snapshot_path(team_id);
        if path.exists() {
            return Err(DomainError::backup(format!(
                "Backup file already exists: {}",
                path.display()
            )));
        }

        tokio::fs::write(&path, body).await.map_err(|e| {
            DomainError::backup(format!(
                "Failed to write backup file {}: {}",
                path.display(),
                e
            ))
        })?;

        info!(
            team_id,
            path = %path.display(),
            members = members.len(),
            "Member snapshot written"
        );

        Ok(path)
    }

    async fn load(&self, path: &Path) -> Result<Vec<Member>, DomainError> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DomainError::snapshot_not_found(path.display().to_string()));
            }
            Err(e) => {
                return Err(DomainError::backup(format!(
                    "Failed to read backup file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&raw)
            .map_err(|e| DomainError::snapshot_corrupt(path.display().to_string(), e.to_string()))
    }
}
