use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::migration::{
    BackupConfig, IgnoreList, MemberAction, MigrationOptions, TeamConfig,
};
use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub teams: TeamsConfig,
    pub migration: MigrationSettings,
    pub backup: BackupSettings,
    pub ignored_emails: Vec<String>,
    /// When set, the run replays this backup instead of migrating
    pub restore_from: Option<PathBuf>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

/// Which teams to process, and how they are keyed
///
/// Either an inline id list sharing one API key, or a JSON file of
/// `{teamId, apiKey}` entries - not both.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TeamsConfig {
    pub ids: Vec<String>,
    pub shared_api_key: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct MigrationSettings {
    pub mark_obsolete: bool,
    pub delete_members: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackupSettings {
    pub enabled: bool,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.memberplatform.example.com".to_string(),
        }
    }
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("backups"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the layered sources: `config/default`,
    /// `config/local`, an optional explicit file and `APP__` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the configured teams into per-team credentials.
    pub fn resolve_teams(&self) -> Result<Vec<TeamConfig>, DomainError> {
        self.teams.resolve()
    }

    /// Resolve the raw flags into the options both orchestrators consume.
    ///
    /// Deletion and obsolete-marking are mutually exclusive; deletion wins.
    /// Resolved once here, never re-checked per member.
    pub fn migration_options(&self) -> MigrationOptions {
        MigrationOptions {
            action: MemberAction::resolve(
                self.migration.mark_obsolete,
                self.migration.delete_members,
            ),
            dry_run: self.migration.dry_run,
            backup: BackupConfig {
                enabled: self.backup.enabled,
                directory: self.backup.directory.clone(),
            },
            ignored_emails: IgnoreList::new(&self.ignored_emails),
        }
    }
}

impl TeamsConfig {
    pub fn resolve(&self) -> Result<Vec<TeamConfig>, DomainError> {
        match (&self.file, self.ids.is_empty()) {
            (Some(_), false) => Err(DomainError::configuration(
                "Configure either teams.file or teams.ids, not both",
            )),
            (Some(file), true) => Self::load_teams_file(file),
            (None, false) => {
                let api_key = self
                    .shared_api_key
                    .as_deref()
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| {
                        DomainError::configuration(
                            "teams.shared_api_key is required when teams.ids is used",
                        )
                    })?;

                Ok(self
                    .ids
                    .iter()
                    .map(|id| TeamConfig {
                        team_id: id.clone(),
                        api_key: api_key.to_string(),
                    })
                    .collect())
            }
            (None, true) => Err(DomainError::configuration(
                "No teams configured: set teams.ids or teams.file",
            )),
        }
    }

    fn load_teams_file(file: &Path) -> Result<Vec<TeamConfig>, DomainError> {
        let raw = std::fs::read_to_string(file).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to read teams file {}: {}",
                file.display(),
                e
            ))
        })?;

        let teams: Vec<TeamConfig> = serde_json::from_str(&raw).map_err(|e| {
            DomainError::configuration(format!(
                "Failed to parse teams file {}: {}",
                file.display(),
                e
            ))
        })?;

        if teams.is_empty() {
            return Err(DomainError::configuration(format!(
                "Teams file {} contains no teams",
                file.display()
            )));
        }

        Ok(teams)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert!(config.backup.enabled);
        assert_eq!(config.backup.directory, PathBuf::from("backups"));
        assert!(!config.migration.dry_run);
        assert!(config.ignored_emails.is_empty());
        assert!(config.restore_from.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_resolve_teams_with_shared_key() {
        let config = AppConfig {
            teams: TeamsConfig {
                ids: vec!["acme".to_string(), "globex".to_string()],
                shared_api_key: Some("key-1".to_string()),
                file: None,
            },
            ..Default::default()
        };

        let teams = config.resolve_teams().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team_id, "acme");
        assert_eq!(teams[1].team_id, "globex");
        assert!(teams.iter().all(|t| t.api_key == "key-1"));
    }

    #[test]
    fn test_resolve_teams_requires_shared_key() {
        let config = AppConfig {
            teams: TeamsConfig {
                ids: vec!["acme".to_string()],
                shared_api_key: None,
                file: None,
            },
            ..Default::default()
        };

        assert!(config.resolve_teams().is_err());
    }

    #[test]
    fn test_resolve_teams_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"teamId": "acme", "apiKey": "key-a"}}, {{"teamId": "globex", "apiKey": "key-b"}}]"#
        )
        .unwrap();

        let config = AppConfig {
            teams: TeamsConfig {
                ids: Vec::new(),
                shared_api_key: None,
                file: Some(file.path().to_path_buf()),
            },
            ..Default::default()
        };

        let teams = config.resolve_teams().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[1].api_key, "key-b");
    }

    #[test]
    fn test_resolve_teams_empty_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let config = AppConfig {
            teams: TeamsConfig {
                ids: Vec::new(),
                shared_api_key: None,
                file: Some(file.path().to_path_buf()),
            },
            ..Default::default()
        };

        assert!(config.resolve_teams().is_err());
    }

    #[test]
    fn test_resolve_teams_rejects_both_forms() {
        let config = AppConfig {
            teams: TeamsConfig {
                ids: vec!["acme".to_string()],
                shared_api_key: Some("key-1".to_string()),
                file: Some(PathBuf::from("teams.json")),
            },
            ..Default::default()
        };

        assert!(config.resolve_teams().is_err());
    }

    #[test]
    fn test_resolve_teams_none_configured() {
        let config = AppConfig::default();
        assert!(config.resolve_teams().is_err());
    }

    #[test]
    fn test_migration_options_delete_wins() {
        let config = AppConfig {
            migration: MigrationSettings {
                mark_obsolete: true,
                delete_members: true,
                dry_run: false,
            },
            ..Default::default()
        };

        let options = config.migration_options();
        assert_eq!(options.action, MemberAction::Delete);
    }

    #[test]
    fn test_migration_options_carry_ignore_list() {
        let config = AppConfig {
            ignored_emails: vec!["Admin@Example.com".to_string()],
            ..Default::default()
        };

        let options = config.migration_options();
        assert!(options.ignored_emails.contains("admin@example.com"));
    }
}
