//! UseCase: セッション確認（ページガード）
//!
//! ページ描画の前に、呼び出し元から渡されたトークンをバックエンドの検証
//! エンドポイントで確認します。検証は 1 ページロードにつき 1 回のみで、
//! 失敗時は常にクローズ（リダイレクト）します。

use std::sync::Arc;

use crate::domain::{AuthGateway, Route};

/// Outcome of the session guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// The token is valid and carries the required permission
    Authorized { role_permission: String },
    /// The page must not render; navigate to the route instead
    Denied(Route),
}

/// セッション確認のユースケース
pub struct AuthenticateUseCase {
    /// AuthGateway（トークン検証 API の抽象化）
    auth_gateway: Arc<dyn AuthGateway>,
}

impl AuthenticateUseCase {
    /// 新しい AuthenticateUseCase を作成
    pub fn new(auth_gateway: Arc<dyn AuthGateway>) -> Self {
        Self { auth_gateway }
    }

    /// Verify the caller-supplied token against the backend.
    ///
    /// Fails closed: a missing token, an invalid validation response, a
    /// permission mismatch or any transport failure all deny the page.
    /// No retry is attempted.
    pub async fn execute(&self, token: Option<&str>, required_permission: &str) -> AuthOutcome {
        let Some(token) = token.filter(|t| !t.is_empty()) else {
            tracing::warn!("No session token supplied, denying page");
            return AuthOutcome::Denied(Route::Home);
        };

        let validation = match self.auth_gateway.validate_token(token).await {
            Ok(validation) => validation,
            Err(e) => {
                tracing::warn!("Token validation failed: {}", e);
                return AuthOutcome::Denied(Route::Home);
            }
        };

        if !validation.valid {
            tracing::warn!("Session token rejected by the backend");
            return AuthOutcome::Denied(Route::Home);
        }

        match validation.role_permission {
            Some(role_permission) if role_permission == required_permission => {
                AuthOutcome::Authorized { role_permission }
            }
            _ => {
                tracing::warn!("Session role does not grant '{}'", required_permission);
                AuthOutcome::Denied(Route::Home)
            }
        }
    }
}
