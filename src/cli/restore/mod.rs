//! Restore command - replays a backup file as a batch of invitations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use clap::Args;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::migration::RestoreResult;
use crate::infrastructure::api::HttpMemberApi;
use crate::infrastructure::backup::FileSnapshotStore;
use crate::infrastructure::logging;
use crate::infrastructure::migration::BackupRestorer;

/// Arguments for the restore command
#[derive(Args)]
pub struct RestoreArgs {
    /// Backup file to replay
    pub backup: PathBuf,

    /// Path to a configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Validate the backup without sending any invitations
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: RestoreArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if args.dry_run {
        config.migration.dry_run = true;
    }

    logging::init_logging(&config.logging);

    execute(&config, &args.backup).await
}

/// Replay one backup against the single configured team.
///
/// A backup belongs to exactly one team; replaying it into several teams
/// is refused rather than guessed at.
pub(crate) async fn execute(config: &AppConfig, backup: &Path) -> anyhow::Result<()> {
    let teams = config.resolve_teams()?;

    let [team] = teams.as_slice() else {
        bail!(
            "Restore requires exactly one configured team, found {}",
            teams.len()
        );
    };

    let options = config.migration_options();

    if options.dry_run {
        info!("Dry run: the backup will be validated but not replayed");
    }

    let api = Arc::new(HttpMemberApi::new(&config.api.base_url));
    let snapshots = Arc::new(FileSnapshotStore::new(options.backup.directory.clone()));
    let restorer = BackupRestorer::new(api, snapshots, options);

    info!(team_id = %team.team_id, path = %backup.display(), "Restoring from backup");
    let result = restorer.restore_from_backup(backup, team).await;
    render_result(&team.team_id, &result);

    Ok(())
}

fn render_result(team_id: &str, result: &RestoreResult) {
    if result.success {
        info!(
            team_id,
            members_restored = result.members_restored,
            "Restore complete"
        );
    } else {
        warn!(
            team_id,
            members_restored = result.members_restored,
            "Restore finished without restoring any member"
        );
    }

    for error in &result.errors {
        warn!(team_id, "{}", error);
    }
}
