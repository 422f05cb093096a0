//! Migrate command - drives the migration across all configured teams

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use tracing::{info, warn};

use super::restore;
use crate::config::AppConfig;
use crate::domain::migration::{MigrationResult, RunSummary};
use crate::infrastructure::api::HttpMemberApi;
use crate::infrastructure::backup::FileSnapshotStore;
use crate::infrastructure::logging;
use crate::infrastructure::migration::TeamMigrator;

/// Arguments for the migrate command
#[derive(Args)]
pub struct MigrateArgs {
    /// Path to a configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Simulate the run without any mutating API calls
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the migration across every configured team, strictly sequentially.
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if args.dry_run {
        config.migration.dry_run = true;
    }

    logging::init_logging(&config.logging);

    // The configuration surface can select restore mode for a whole run.
    if let Some(backup) = config.restore_from.clone() {
        info!(path = %backup.display(), "restore_from is set, replaying backup instead of migrating");
        return restore::execute(&config, &backup).await;
    }

    let teams = config.resolve_teams()?;
    let options = config.migration_options();

    if options.dry_run {
        info!("Dry run: no mutating API calls will be made");
    }

    let api = Arc::new(HttpMemberApi::new(&config.api.base_url));
    let snapshots = Arc::new(FileSnapshotStore::new(options.backup.directory.clone()));
    let migrator = TeamMigrator::new(api, snapshots, options);

    let mut summary = RunSummary::default();

    for team in &teams {
        info!(team_id = %team.team_id, "Migrating team");
        let result = migrator.migrate_team(team).await;
        render_team_result(&team.team_id, &result);
        summary.add(&result);
    }

    render_summary(&summary);
    Ok(())
}

fn render_team_result(team_id: &str, result: &MigrationResult) {
    info!(
        team_id,
        members_found = result.members_found,
        marked_obsolete = result.members_marked_obsolete,
        deleted = result.members_deleted,
        invitations_sent = result.invitations_sent,
        skipped = result.skipped_members,
        "Team finished"
    );

    if let Some(path) = &result.backup_path {
        info!(team_id, backup = %path.display(), "Backup written");
    }

    for error in &result.errors {
        warn!(team_id, "{}", error);
    }
}

fn render_summary(summary: &RunSummary) {
    info!(
        teams = summary.teams_processed,
        members_found = summary.members_found,
        marked_obsolete = summary.members_marked_obsolete,
        deleted = summary.members_deleted,
        invitations_sent = summary.invitations_sent,
        skipped = summary.skipped_members,
        backups = summary.backups_created,
        errors = summary.errors,
        "Migration run complete"
    );
}
