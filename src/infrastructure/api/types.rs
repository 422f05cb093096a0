//! Wire types for the vendor member API

use serde::{Deserialize, Serialize};

use crate::domain::member::{Member, ProjectInvite};

/// Response payload of the member listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListMembersResponse {
    #[serde(default)]
    pub members: Vec<Member>,
}

/// Body of the invitation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub email: String,
    pub name: String,
    pub is_admin: bool,
    pub team_id: String,
    pub projects: Vec<ProjectInvite>,
    pub send_email: bool,
}

impl InviteMemberRequest {
    /// Build an invitation for a member under its original identity.
    ///
    /// Used both when migrating (even right after the member was marked
    /// obsolete or deleted - the invitation is a fresh account for the same
    /// human) and when restoring from a backup.
    pub fn for_member(team_id: &str, member: &Member) -> Self {
        Self {
            email: member.email.clone(),
            name: member.name.clone(),
            is_admin: member.is_team_admin,
            team_id: team_id.to_string(),
            projects: member.projects_to_invites(),
            send_email: true,
        }
    }
}

/// Body of the member update request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub team_id: String,
    pub subject: String,
    pub name: String,
    pub is_team_admin: bool,
    pub projects: Vec<ProjectInvite>,
}

impl UpdateMemberRequest {
    /// Build the rename-to-obsolete update, preserving the subject, the
    /// admin flag and the full project assignment.
    pub fn mark_obsolete(team_id: &str, member: &Member) -> Self {
        Self {
            team_id: team_id.to_string(),
            subject: member.subject.clone(),
            name: member.obsolete_name(),
            is_team_admin: member.is_team_admin,
            projects: member.projects_to_invites(),
        }
    }
}

/// Body of the member delete request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMemberRequest {
    pub team_id: String,
    pub subject: String,
}

impl DeleteMemberRequest {
    pub fn for_member(team_id: &str, member: &Member) -> Self {
        Self {
            team_id: team_id.to_string(),
            subject: member.subject.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::Utc;

    use super::*;
    use crate::domain::member::{MemberType, ProjectRoles};

    fn member() -> Member {
        let mut projects = BTreeMap::new();
        projects.insert(
            "api".to_string(),
            ProjectRoles::new(vec!["developer".to_string()])
                .with_custom_permissions(vec!["deploy".to_string()]),
        );

        Member {
            subject: "sub-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            is_team_admin: true,
            projects,
            member_type: MemberType::Member,
            member_since: Utc::now(),
        }
    }

    #[test]
    fn test_invite_uses_original_identity() {
        let request = InviteMemberRequest::for_member("acme", &member());

        assert_eq!(request.email, "ada@example.com");
        assert_eq!(request.name, "Ada Lovelace");
        assert!(request.is_admin);
        assert!(request.send_email);
        assert_eq!(request.projects.len(), 1);
        assert!(request.projects[0].use_custom);
    }

    #[test]
    fn test_invite_wire_format() {
        let json = serde_json::to_value(InviteMemberRequest::for_member("acme", &member())).unwrap();

        assert_eq!(json["teamId"], "acme");
        assert_eq!(json["isAdmin"], true);
        assert_eq!(json["sendEmail"], true);
        assert_eq!(json["projects"][0]["projectId"], "api");
        assert_eq!(json["projects"][0]["useCustom"], true);
    }

    #[test]
    fn test_mark_obsolete_preserves_identity() {
        let request = UpdateMemberRequest::mark_obsolete("acme", &member());

        assert_eq!(request.subject, "sub-1");
        assert_eq!(request.name, "OBSOLETE - Ada Lovelace");
        assert!(request.is_team_admin);
        assert_eq!(request.projects.len(), 1);
    }

    #[test]
    fn test_delete_wire_format() {
        let json = serde_json::to_value(DeleteMemberRequest::for_member("acme", &member())).unwrap();

        assert_eq!(json["teamId"], "acme");
        assert_eq!(json["subject"], "sub-1");
    }
}
