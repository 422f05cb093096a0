//! Member domain module
//!
//! A member is one account within a team, carrying a role and permission
//! assignment per project. The email address is the matching key for
//! ignore-filtering; the subject is the stable identifier across renames.

mod entity;

pub use entity::{Member, MemberType, ProjectInvite, ProjectRoles, OBSOLETE_PREFIX};
