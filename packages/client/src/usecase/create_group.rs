//! UseCase: グループ作成
//!
//! 管理画面のグループ作成フォームの送信処理。入力検証はローカルで行い、
//! バックエンドの応答（409 など）を通知またはリダイレクトに変換します。

use std::sync::Arc;

use crate::domain::{AppStore, GatewayError, GroupGateway, Route};

/// Outcome of a create-group submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateGroupOutcome {
    /// The group was created; navigate to the listing
    Created(Route),
    /// The form stays editable (validation failure or conflict)
    Stay,
    /// Navigate away without keeping the form (403, network failure)
    Redirect(Route),
}

/// グループ作成のユースケース
pub struct CreateGroupUseCase {
    /// GroupGateway（グループ API の抽象化）
    group_gateway: Arc<dyn GroupGateway>,
}

impl CreateGroupUseCase {
    /// 新しい CreateGroupUseCase を作成
    pub fn new(group_gateway: Arc<dyn GroupGateway>) -> Self {
        Self { group_gateway }
    }

    /// Submit the create-group form.
    ///
    /// An empty name never reaches the network: a local validation
    /// notification is queued instead. A duplicate name (409) keeps the
    /// form editable with a conflict notification.
    pub async fn execute(&self, store: &mut AppStore, name: &str) -> CreateGroupOutcome {
        if name.trim().is_empty() {
            store.push_error("Fill all fields.");
            return CreateGroupOutcome::Stay;
        }

        let Some(token) = store.token().map(str::to_string) else {
            return CreateGroupOutcome::Redirect(Route::Login);
        };

        match self.group_gateway.create_group(&token, name).await {
            Ok(group) => {
                tracing::info!("Group '{}' created", group.name);
                store.push_info("Group created.");
                CreateGroupOutcome::Created(Route::AdminGroups)
            }
            Err(GatewayError::Conflict) => {
                store.push_error("This group already exists.");
                CreateGroupOutcome::Stay
            }
            Err(GatewayError::Forbidden) => CreateGroupOutcome::Redirect(Route::Login),
            Err(e) => {
                tracing::warn!("Group creation failed: {}", e);
                store.push_error("An error has occurred.");
                CreateGroupOutcome::Redirect(Route::AdminGroups)
            }
        }
    }
}
