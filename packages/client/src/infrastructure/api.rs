//! Backend REST gateway implementation.
//!
//! One `ApiClient` implements every gateway trait of the domain layer.
//! All calls carry a bearer header derived from the session token; HTTP
//! statuses are classified into the [`GatewayError`] taxonomy at this
//! boundary and nowhere else.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::domain::{
    AuthGateway, Event, EventGateway, GatewayError, Group, GroupGateway, TokenValidation,
};
use crate::infrastructure::dto::http::{
    CreateGroupRequest, EventDto, GroupDto, ValidateTokenResponse,
};

/// Reqwest-backed client for the platform REST API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client for the given base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Classify a non-success HTTP status.
fn status_error(status: reqwest::StatusCode) -> GatewayError {
    match status.as_u16() {
        403 => GatewayError::Forbidden,
        404 => GatewayError::NotFound,
        409 => GatewayError::Conflict,
        code => GatewayError::Unexpected(code),
    }
}

/// Classify a transport-level failure (no response at all).
fn network_error(error: reqwest::Error) -> GatewayError {
    GatewayError::Network(error.to_string())
}

/// Check the status and decode the JSON body of a response.
async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status));
    }
    response.json::<T>().await.map_err(network_error)
}

#[async_trait]
impl AuthGateway for ApiClient {
    async fn validate_token(&self, token: &str) -> Result<TokenValidation, GatewayError> {
        let response = self
            .http
            .post(self.endpoint("/auth/validateToken"))
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(network_error)?;

        let body: ValidateTokenResponse = parse_json(response).await?;
        Ok(TokenValidation {
            valid: body.valid,
            role_permission: body.role_permission,
        })
    }
}

#[async_trait]
impl EventGateway for ApiClient {
    async fn current_event(&self, token: &str) -> Result<Event, GatewayError> {
        let response = self
            .http
            .get(self.endpoint("/api/events/current"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let body: EventDto = parse_json(response).await?;
        Ok(body.into())
    }
}

#[async_trait]
impl GroupGateway for ApiClient {
    async fn create_group(&self, token: &str, name: &str) -> Result<Group, GatewayError> {
        let response = self
            .http
            .post(self.endpoint("/api/groups"))
            .bearer_auth(token)
            .json(&CreateGroupRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .map_err(network_error)?;

        let body: GroupDto = parse_json(response).await?;
        Ok(body.into())
    }

    async fn groups(&self, token: &str) -> Result<Vec<Group>, GatewayError> {
        let response = self
            .http
            .get(self.endpoint("/api/groups"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(network_error)?;

        let body: Vec<GroupDto> = parse_json(response).await?;
        Ok(body.into_iter().map(Into::into).collect())
    }
}
