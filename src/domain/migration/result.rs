//! Per-team result accumulators
//!
//! Each result is created empty at the start of the run for its team,
//! mutated in place while members are processed, and returned once. Error
//! strings are kept in discovery order.

use std::path::PathBuf;

/// Outcome of migrating one team
#[derive(Debug, Clone, Default)]
pub struct MigrationResult {
    pub members_found: usize,
    pub members_marked_obsolete: usize,
    pub members_deleted: usize,
    pub invitations_sent: usize,
    pub skipped_members: usize,
    pub backup_created: bool,
    pub backup_path: Option<PathBuf>,
    pub errors: Vec<String>,
}

impl MigrationResult {
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Outcome of replaying one backup file against one team
#[derive(Debug, Clone, Default)]
pub struct RestoreResult {
    pub success: bool,
    pub members_restored: usize,
    pub errors: Vec<String>,
}

impl RestoreResult {
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

/// Grand totals across every team in a run, for the final breakdown
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub teams_processed: usize,
    pub members_found: usize,
    pub members_marked_obsolete: usize,
    pub members_deleted: usize,
    pub invitations_sent: usize,
    pub skipped_members: usize,
    pub backups_created: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn add(&mut self, result: &MigrationResult) {
        self.teams_processed += 1;
        self.members_found += result.members_found;
        self.members_marked_obsolete += result.members_marked_obsolete;
        self.members_deleted += result.members_deleted;
        self.invitations_sent += result.invitations_sent;
        self.skipped_members += result.skipped_members;
        self.backups_created += usize::from(result.backup_created);
        self.errors += result.errors.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_ordering() {
        let mut result = MigrationResult::default();
        result.record_error("first");
        result.record_error("second");

        assert_eq!(result.errors, vec!["first", "second"]);
        assert!(result.has_errors());
    }

    #[test]
    fn test_summary_accumulates() {
        let mut first = MigrationResult::default();
        first.members_found = 3;
        first.members_marked_obsolete = 2;
        first.invitations_sent = 2;
        first.skipped_members = 1;
        first.backup_created = true;

        let mut second = MigrationResult::default();
        second.members_found = 1;
        second.record_error("boom");

        let mut summary = RunSummary::default();
        summary.add(&first);
        summary.add(&second);

        assert_eq!(summary.teams_processed, 2);
        assert_eq!(summary.members_found, 4);
        assert_eq!(summary.members_marked_obsolete, 2);
        assert_eq!(summary.invitations_sent, 2);
        assert_eq!(summary.skipped_members, 1);
        assert_eq!(summary.backups_created, 1);
        assert_eq!(summary.errors, 1);
    }
}
