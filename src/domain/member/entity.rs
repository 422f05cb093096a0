//! Member entity and project role assignments

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name prefix applied when a member is retired during migration
pub const OBSOLETE_PREFIX: &str = "OBSOLETE - ";

/// Kind of account a member record represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum MemberType {
    #[default]
    Member,
    ApiKey,
}

/// Role and permission assignment for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRoles {
    pub roles: Vec<String>,
    /// Permission tokens granted on top of the roles; empty means the
    /// project uses role-derived permissions only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_permissions: Vec<String>,
}

impl ProjectRoles {
    pub fn new(roles: Vec<String>) -> Self {
        Self {
            roles,
            custom_permissions: Vec::new(),
        }
    }

    pub fn with_custom_permissions(mut self, permissions: Vec<String>) -> Self {
        self.custom_permissions = permissions;
        self
    }
}

/// One account in a team, as returned by the vendor member listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Opaque unique identifier, stable across renames
    pub subject: String,
    pub name: String,
    pub email: String,
    pub is_team_admin: bool,
    /// Project id -> role assignment; a member with zero projects is valid
    /// and propagates as an empty project list on invite and update
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectRoles>,
    #[serde(rename = "type", default)]
    pub member_type: MemberType,
    /// Informational only
    pub member_since: DateTime<Utc>,
}

/// Per-project payload of an invitation or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInvite {
    pub project_id: String,
    pub roles: Vec<String>,
    pub permissions: Vec<String>,
    pub use_custom: bool,
}

impl Member {
    /// Map the member's project assignments to invitation entries.
    ///
    /// `use_custom` is set iff the project carries custom permissions.
    pub fn projects_to_invites(&self) -> Vec<ProjectInvite> {
        self.projects
            .iter()
            .map(|(project_id, assignment)| ProjectInvite {
                project_id: project_id.clone(),
                roles: assignment.roles.clone(),
                permissions: assignment.custom_permissions.clone(),
                use_custom: !assignment.custom_permissions.is_empty(),
            })
            .collect()
    }

    /// Display name used when the member is retired during migration
    pub fn obsolete_name(&self) -> String {
        format!("{}{}", OBSOLETE_PREFIX, self.name)
    }
}
