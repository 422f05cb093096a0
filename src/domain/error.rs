use thiserror::Error;

/// Core domain errors
///
/// Ordinary vendor API failures are not errors: they come back as typed
/// responses from the transport client. This enum covers the faults that
/// actually propagate - connectivity loss, bad payloads, filesystem
/// trouble and invalid configuration.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Backup error: {message}")]
    Backup { message: String },

    #[error("Backup file not found: {path}")]
    SnapshotNotFound { path: String },

    #[error("Backup file is corrupt: {path}: {message}")]
    SnapshotCorrupt { path: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    pub fn backup(message: impl Into<String>) -> Self {
        Self::Backup {
            message: message.into(),
        }
    }

    pub fn snapshot_not_found(path: impl Into<String>) -> Self {
        Self::SnapshotNotFound { path: path.into() }
    }

    pub fn snapshot_corrupt(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SnapshotCorrupt {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
