//! Options controlling one migration or restore run

use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;

/// Credentials for one team
///
/// The API key authorizes operations against that team only. Supplied once
/// per run per team; immutable during a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamConfig {
    pub team_id: String,
    pub api_key: String,
}

/// What to do with each existing member record before re-inviting it
///
/// Resolved once from the raw configuration flags: deletion and
/// obsolete-marking are mutually exclusive, deletion wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberAction {
    /// Leave the existing record untouched
    #[default]
    None,
    /// Rename the member to retire it, preserving the record
    MarkObsolete,
    /// Remove the member record
    Delete,
}

impl MemberAction {
    pub fn resolve(mark_obsolete: bool, delete_members: bool) -> Self {
        if delete_members {
            Self::Delete
        } else if mark_obsolete {
            Self::MarkObsolete
        } else {
            Self::None
        }
    }
}

/// Backup settings for a migration run
#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub enabled: bool,
    pub directory: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("backups"),
        }
    }
}

/// Emails that are never migrated regardless of user configuration
pub const BUILT_IN_IGNORED_EMAILS: &[&str] = &[];

/// Case-insensitive e-mail ignore set
///
/// Union of the built-in entries and the user-supplied list.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    emails: HashSet<String>,
}

impl IgnoreList {
    pub fn new(user_entries: &[String]) -> Self {
        let emails = BUILT_IN_IGNORED_EMAILS
            .iter()
            .map(|email| (*email).to_string())
            .chain(user_entries.iter().cloned())
            .map(|email| email.to_lowercase())
            .collect();

        Self { emails }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

/// Options controlling one run, shared by migrate and restore
#[derive(Debug, Clone, Default)]
pub struct MigrationOptions {
    pub action: MemberAction,
    pub dry_run: bool,
    pub backup: BackupConfig,
    pub ignored_emails: IgnoreList,
}
