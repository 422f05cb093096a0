//! Migration domain module
//!
//! Run options resolved from configuration, and the per-team result
//! accumulators both orchestrators fill in.

mod options;
mod result;

pub use options::{
    BackupConfig, IgnoreList, MemberAction, MigrationOptions, TeamConfig, BUILT_IN_IGNORED_EMAILS,
};
pub use result::{MigrationResult, RestoreResult, RunSummary};
