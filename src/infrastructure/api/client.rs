//! Vendor member API client
//!
//! Every operation returns an [`ApiResponse`] carrying the HTTP status, so
//! callers interpret ordinary API failures by inspecting `status` instead
//! of handling errors. Only connectivity-level faults - no response at all -
//! surface as [`DomainError::Transport`].

use async_trait::async_trait;
use tracing::debug;

use super::types::{
    DeleteMemberRequest, InviteMemberRequest, ListMembersResponse, UpdateMemberRequest,
};
use crate::domain::member::Member;
use crate::domain::DomainError;

/// Uniform result shape of every vendor call
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    pub status_text: String,
}

impl<T> ApiResponse<T> {
    /// 2xx and 3xx statuses count as success
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// Vendor member operations behind a uniform result shape
#[async_trait]
pub trait MemberApi: Send + Sync + std::fmt::Debug {
    /// List the current members of a team.
    ///
    /// An HTTP error response comes back with that status and empty data.
    async fn list_members(
        &self,
        team_id: &str,
        api_key: &str,
    ) -> Result<ApiResponse<Vec<Member>>, DomainError>;

    /// Issue an invitation.
    async fn invite_member(
        &self,
        request: &InviteMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError>;

    /// Update an existing member record.
    async fn update_member(
        &self,
        request: &UpdateMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError>;

    /// Remove a member record.
    async fn delete_member(
        &self,
        request: &DeleteMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError>;
}

fn status_label(status: u16) -> String {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}

/// Real client using reqwest
///
/// The per-team API key travels verbatim in the `Authorization` header on
/// every call.
#[derive(Debug, Clone)]
pub struct HttpMemberApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMemberApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    fn members_url(&self) -> String {
        format!("{}/members", self.base_url)
    }

    async fn send_mutation(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError> {
        let response = request.send().await.map_err(|e| {
            DomainError::transport(format!("{} request failed: {}", operation, e))
        })?;

        let status = response.status().as_u16();
        let status_text = status_label(status);

        if !(200..400).contains(&status) {
            debug!(operation, status, "Vendor API returned an error status");
            return Ok(ApiResponse {
                data: serde_json::Value::Null,
                status,
                status_text,
            });
        }

        // Success payloads are arbitrary and unused; a non-JSON body is
        // treated as empty rather than a fault.
        let data = response
            .json()
            .await
            .unwrap_or(serde_json::Value::Null);

        Ok(ApiResponse {
            data,
            status,
            status_text,
        })
    }
}

#[async_trait]
impl MemberApi for HttpMemberApi {
    async fn list_members(
        &self,
        team_id: &str,
        api_key: &str,
    ) -> Result<ApiResponse<Vec<Member>>, DomainError> {
        let response = self
            .client
            .get(self.members_url())
            .query(&[
                ("teamId", team_id),
                ("type", "member"),
                ("includeMetadata", "true"),
            ])
            .header(reqwest::header::AUTHORIZATION, api_key)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("List members request failed: {}", e)))?;

        let status = response.status().as_u16();
        let status_text = status_label(status);

        if !(200..400).contains(&status) {
            debug!(team_id, status, "Member listing returned an error status");
            return Ok(ApiResponse {
                data: Vec::new(),
                status,
                status_text,
            });
        }

        let body: ListMembersResponse = response.json().await.map_err(|e| {
            DomainError::serialization(format!("Failed to parse member listing: {}", e))
        })?;

        Ok(ApiResponse {
            data: body.members,
            status,
            status_text,
        })
    }

    async fn invite_member(
        &self,
        request: &InviteMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError> {
        let builder = self
            .client
            .post(self.members_url())
            .header(reqwest::header::AUTHORIZATION, api_key)
            .json(request);

        self.send_mutation(builder, "Invite member").await
    }

    async fn update_member(
        &self,
        request: &UpdateMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError> {
        let builder = self
            .client
            .patch(self.members_url())
            .header(reqwest::header::AUTHORIZATION, api_key)
            .json(request);

        self.send_mutation(builder, "Update member").await
    }

    async fn delete_member(
        &self,
        request: &DeleteMemberRequest,
        api_key: &str,
    ) -> Result<ApiResponse<serde_json::Value>, DomainError> {
        let builder = self
            .client
            .delete(self.members_url())
            .header(reqwest::header::AUTHORIZATION, api_key)
            .json(request);

        self.send_mutation(builder, "Delete member").await
    }
}


#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::member::MemberType;

    fn listing_body() -> serde_json::Value {
        serde_json::json!({
            "members": [{
                "subject": "sub-1",
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "isTeamAdmin": true,
                "projects": {
                    "api": {"roles": ["developer"]}
                },
                "type": "member",
                "memberSince": "2023-04-01T12:00:00Z"
            }]
        })
    }

    #[tokio::test]
    async fn test_list_members_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/members"))
            .and(query_param("teamId", "acme"))
            .and(query_param("type", "member"))
            .and(query_param("includeMetadata", "true"))
            .and(header("Authorization", "key-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
            .mount(&server)
            .await;

        let api = HttpMemberApi::new(server.uri());
        let response = api.list_members("acme", "key-1").await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].email, "ada@example.com");
        assert_eq!(response.data[0].member_type, MemberType::Member);
    }

    #[tokio::test]
    async fn test_list_members_error_status_becomes_typed_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let api = HttpMemberApi::new(server.uri());
        let response = api.list_members("acme", "key-1").await.unwrap();

        assert_eq!(response.status, 403);
        assert_eq!(response.status_text, "Forbidden");
        assert!(!response.is_success());
        assert!(response.data.is_empty());
    }

    #[tokio::test]
    async fn test_invite_member_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/members"))
            .and(header("Authorization", "key-1"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ok": true})))
            .mount(&server)
            .await;

        let api = HttpMemberApi::new(server.uri());
        let request = InviteMemberRequest {
            email: "ada@example.com".to_string(),
            name: "Ada Lovelace".to_string(),
            is_admin: false,
            team_id: "acme".to_string(),
            projects: Vec::new(),
            send_email: true,
        };

        let response = api.invite_member(&request, "key-1").await.unwrap();
        assert_eq!(response.status, 201);
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_mutation_error_status_becomes_typed_result() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(422))
            .mount(&server)
            .await;

        let api = HttpMemberApi::new(server.uri());
        let request = DeleteMemberRequest {
            team_id: "acme".to_string(),
            subject: "sub-1".to_string(),
        };

        let response = api.delete_member(&request, "key-1").await.unwrap();
        assert_eq!(response.status, 422);
        assert_eq!(response.status_text, "Unprocessable Entity");
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_update_member_patches_members_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/members"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpMemberApi::new(server.uri());
        let request = UpdateMemberRequest {
            team_id: "acme".to_string(),
            subject: "sub-1".to_string(),
            name: "OBSOLETE - Ada Lovelace".to_string(),
            is_team_admin: true,
            projects: Vec::new(),
        };

        let response = api.update_member(&request, "key-1").await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_connectivity_loss_is_a_fault() {
        // Nothing listens here; the request never gets a response.
        let api = HttpMemberApi::new("http://127.0.0.1:1");

        let result = api.list_members("acme", "key-1").await;
        assert!(matches!(result, Err(DomainError::Transport { .. })));
    }

    #[test]
    fn test_redirect_status_counts_as_success() {
        let response = ApiResponse {
            data: serde_json::Value::Null,
            status: 302,
            status_text: "Found".to_string(),
        };

        assert!(response.is_success());
    }
}
