//! Team SSO Migrator
//!
//! Moves members of a multi-tenant SaaS platform's teams from
//! email/password accounts to SSO accounts, one team at a time:
//! - enumerates the current members of each team
//! - persists a point-in-time backup of the member list
//! - marks each member obsolete or deletes it, per configuration
//! - re-issues an invitation carrying roles and permissions forward
//!
//! A companion restore path replays a backup file as a batch of fresh
//! invitations.

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
