//! CLI module for the team SSO migrator
//!
//! Provides subcommands for the two run modes:
//! - `migrate`: move configured teams to SSO invitations (default mode)
//! - `restore`: replay a backup file as a batch of invitations

pub mod migrate;
pub mod restore;

use clap::{Parser, Subcommand};

/// Team SSO Migrator - moves team members to SSO accounts
#[derive(Parser)]
#[command(name = "team-sso-migrator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Migrate configured teams to SSO invitations
    Migrate(migrate::MigrateArgs),

    /// Replay a backup file as a batch of invitations
    Restore(restore::RestoreArgs),
}
