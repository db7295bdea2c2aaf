//! Gateway trait 定義
//!
//! ドメイン層が必要とするバックエンド API へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::entity::{Event, Group};

/// Backend call failures, classified the way the pages react to them.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// HTTP 403: the session is not allowed to perform the call
    #[error("access forbidden")]
    Forbidden,
    /// HTTP 404: the requested resource does not exist
    #[error("resource not found")]
    NotFound,
    /// HTTP 409: the resource already exists
    #[error("resource already exists")]
    Conflict,
    /// No response from the backend at all
    #[error("network failure: {0}")]
    Network(String),
    /// Any other non-success response
    #[error("unexpected response: status {0}")]
    Unexpected(u16),
}

/// Result of a token validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    pub valid: bool,
    pub role_permission: Option<String>,
}

/// Token validation endpoint of the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// 提供されたトークンを検証する（1 ページロードにつき 1 回のみ）
    async fn validate_token(&self, token: &str) -> Result<TokenValidation, GatewayError>;
}

/// Event resource of the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// 認証済み教員の現在のイベントを取得する
    async fn current_event(&self, token: &str) -> Result<Event, GatewayError>;
}

/// Group resource of the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupGateway: Send + Sync {
    /// グループを作成する（重複した名前は Conflict になる）
    async fn create_group(&self, token: &str, name: &str) -> Result<Group, GatewayError>;

    /// グループの一覧を取得する
    async fn groups(&self, token: &str) -> Result<Vec<Group>, GatewayError>;
}
