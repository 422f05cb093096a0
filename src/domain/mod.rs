//! Domain layer - member entities and migration run types

pub mod error;
pub mod member;
pub mod migration;

pub use error::DomainError;
pub use member::{Member, MemberType, ProjectInvite, ProjectRoles, OBSOLETE_PREFIX};
pub use migration::{
    BackupConfig, IgnoreList, MemberAction, MigrationOptions, MigrationResult, RestoreResult,
    RunSummary, TeamConfig,
};
