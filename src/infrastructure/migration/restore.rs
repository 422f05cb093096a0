//! Backup replay as a batch of fresh invitations

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::domain::migration::{MigrationOptions, RestoreResult, TeamConfig};
use crate::infrastructure::api::{InviteMemberRequest, MemberApi};
use crate::infrastructure::backup::SnapshotStore;

/// Replays a member snapshot as invitations against one team
#[derive(Debug)]
pub struct BackupRestorer<A: MemberApi, S: SnapshotStore> {
    api: Arc<A>,
    snapshots: Arc<S>,
    options: MigrationOptions,
}

impl<A: MemberApi, S: SnapshotStore> BackupRestorer<A, S> {
    pub fn new(api: Arc<A>, snapshots: Arc<S>, options: MigrationOptions) -> Self {
        Self {
            api,
            snapshots,
            options,
        }
    }

    /// Replay a backup file against one team.
    ///
    /// `success` is true iff at least one member was actually restored; an
    /// empty backup therefore fails without recording any error.
    pub async fn restore_from_backup(&self, path: &Path, team: &TeamConfig) -> RestoreResult {
        let mut result = RestoreResult::default();

        let members = match self.snapshots.load(path).await {
            Ok(members) => members,
            Err(e) => {
                result.record_error(format!("Failed to load backup {}: {}", path.display(), e));
                return result;
            }
        };

        info!(path = %path.display(), members = members.len(), "Loaded backup");

        if self.options.dry_run {
            // Coarse simulation: the load is validated, members are not
            // individually replayed.
            info!("Dry run: would restore {} members", members.len());
            result.success = true;
            return result;
        }

        for member in &members {
            if self.options.ignored_emails.contains(&member.email) {
                info!(email = %member.email, "Skipping ignored member");
                continue;
            }

            let request = InviteMemberRequest::for_member(&team.team_id, member);
            match self.api.invite_member(&request, &team.api_key).await {
                Ok(response) if response.is_success() => {
                    info!(email = %member.email, "Member restored");
                    result.members_restored += 1;
                }
                Ok(response) => result.record_error(format!(
                    "Failed to invite {}: {}",
                    member.email, response.status_text
                )),
                Err(e) => result.record_error(format!(
                    "Error processing member {}: {}",
                    member.email, e
                )),
            }
        }

        result.success = result.members_restored > 0;
        result
    }
}
