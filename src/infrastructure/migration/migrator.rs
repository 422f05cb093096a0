//! Per-team migration orchestration
//!
//! Sequencing per team: fetch the member list, persist a backup, then for
//! every member run the mutate step (delete or mark obsolete) followed by
//! the re-invitation. One member's failure never aborts the team; one
//! team's failure never crosses the team boundary. The single hard safety
//! invariant: a live deletion run never proceeds without a durable backup.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::member::Member;
use crate::domain::migration::{MemberAction, MigrationOptions, MigrationResult, TeamConfig};
use crate::domain::DomainError;
use crate::infrastructure::api::{
    DeleteMemberRequest, InviteMemberRequest, MemberApi, UpdateMemberRequest,
};
use crate::infrastructure::backup::SnapshotStore;

/// Drives the migration of one team at a time
#[derive(Debug)]
pub struct TeamMigrator<A: MemberApi, S: SnapshotStore> {
    api: Arc<A>,
    snapshots: Arc<S>,
    options: MigrationOptions,
}

impl<A: MemberApi, S: SnapshotStore> TeamMigrator<A, S> {
    pub fn new(api: Arc<A>, snapshots: Arc<S>, options: MigrationOptions) -> Self {
        Self {
            api,
            snapshots,
            options,
        }
    }

    /// Migrate every member of one team to an SSO invitation.
    ///
    /// Whatever happens, the accumulated result is returned; faults are
    /// converted into error entries rather than propagated.
    pub async fn migrate_team(&self, team: &TeamConfig) -> MigrationResult {
        let mut result = MigrationResult::default();

        if let Err(e) = self.run(team, &mut result).await {
            result.record_error(format!("Error migrating team {}: {}", team.team_id, e));
        }

        result
    }

    async fn run(
        &self,
        team: &TeamConfig,
        result: &mut MigrationResult,
    ) -> Result<(), DomainError> {
        let listing = self.api.list_members(&team.team_id, &team.api_key).await?;

        if listing.status != 200 {
            result.record_error(format!("Failed to get members: {}", listing.status_text));
            return Ok(());
        }

        let members = listing.data;
        result.members_found = members.len();
        info!(team_id = %team.team_id, members = members.len(), "Fetched member list");

        if self.options.backup.enabled
            && !members.is_empty()
            && !self.backup_members(team, &members, result).await
        {
            return Ok(());
        }

        for member in &members {
            if self.options.ignored_emails.contains(&member.email) {
                info!(email = %member.email, "Skipping ignored member");
                result.skipped_members += 1;
                continue;
            }

            if let Err(e) = self.process_member(team, member, result).await {
                result.record_error(format!(
                    "Error processing member {}: {}",
                    member.email, e
                ));
            }
        }

        Ok(())
    }

    /// Returns false when the team must abort: backup failed ahead of a
    /// live deletion run.
    async fn backup_members(
        &self,
        team: &TeamConfig,
        members: &[Member],
        result: &mut MigrationResult,
    ) -> bool {
        match self.snapshots.save(&team.team_id, members).await {
            Ok(path) => {
                result.backup_created = true;
                result.backup_path = Some(path);
                true
            }
            Err(e) => {
                let deleting_live =
                    self.options.action == MemberAction::Delete && !self.options.dry_run;

                if deleting_live {
                    result.record_error(format!(
                        "Aborting migration of team {}: backup failed before deletion: {}",
                        team.team_id, e
                    ));
                    false
                } else {
                    warn!(team_id = %team.team_id, error = %e, "Backup failed, continuing");
                    result.record_error(format!("Backup failed: {}", e));
                    true
                }
            }
        }
    }

    async fn process_member(
        &self,
        team: &TeamConfig,
        member: &Member,
        result: &mut MigrationResult,
    ) -> Result<(), DomainError> {
        match self.options.action {
            MemberAction::Delete => self.delete_member(team, member, result).await?,
            MemberAction::MarkObsolete => self.mark_obsolete(team, member, result).await?,
            MemberAction::None => {}
        }

        // The invitation always follows, even after a mutate failure: the
        // fresh account matters more than the retired record.
        self.invite_member(team, member, result).await
    }

    async fn mark_obsolete(
        &self,
        team: &TeamConfig,
        member: &Member,
        result: &mut MigrationResult,
    ) -> Result<(), DomainError> {
        if self.options.dry_run {
            info!(email = %member.email, "Dry run: would mark member obsolete");
            result.members_marked_obsolete += 1;
            return Ok(());
        }

        let request = UpdateMemberRequest::mark_obsolete(&team.team_id, member);
        let response = self.api.update_member(&request, &team.api_key).await?;

        if response.is_success() {
            info!(email = %member.email, "Marked member obsolete");
            result.members_marked_obsolete += 1;
        } else {
            // Real state unknown; count the member as not obsoleted.
            result.record_error(format!(
                "Failed to mark {} obsolete: {}",
                member.email, response.status_text
            ));
        }

        Ok(())
    }

    async fn delete_member(
        &self,
        team: &TeamConfig,
        member: &Member,
        result: &mut MigrationResult,
    ) -> Result<(), DomainError> {
        if self.options.dry_run {
            info!(email = %member.email, "Dry run: would delete member");
            result.members_deleted += 1;
            return Ok(());
        }

        let request = DeleteMemberRequest::for_member(&team.team_id, member);
        let response = self.api.delete_member(&request, &team.api_key).await?;

        if response.is_success() {
            info!(email = %member.email, "Deleted member");
            result.members_deleted += 1;
        } else {
            result.record_error(format!(
                "Failed to delete {}: {}",
                member.email, response.status_text
            ));
        }

        Ok(())
    }

    async fn invite_member(
        &self,
        team: &TeamConfig,
        member: &Member,
        result: &mut MigrationResult,
    ) -> Result<(), DomainError> {
        if self.options.dry_run {
            info!(email = %member.email, "Dry run: would send invitation");
            result.invitations_sent += 1;
            return Ok(());
        }

        let request = InviteMemberRequest::for_member(&team.team_id, member);
        let response = self.api.invite_member(&request, &team.api_key).await?;

        if response.is_success() {
            info!(email = %member.email, "Invitation sent");
            result.invitations_sent += 1;
        } else {
            result.record_error(format!(
                "Failed to invite {}: {}",
                member.email, response.status_text
            ));
        }

        Ok(())
    }
}
