//! UseCase: イベント取得
//!
//! 認証済み教員の現在のイベントを取得し、共有ストアに反映します。
//! `event:start` のプッシュ通知を受けた後など、ページを再ロードせずに
//! 何度でも再実行できます。

use std::sync::Arc;

use crate::domain::{AppStore, EventGateway, GatewayError, Route};

/// How a missing event should be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnNotFound {
    /// Render an empty "no event" view without an error
    RenderEmpty,
    /// Treat the missing event like any other failure
    Redirect,
}

/// Outcome of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The event was found and installed into the store
    Loaded,
    /// No event exists and the caller opted into the empty view
    NoEvent,
    /// Loading failed; a notification was queued, navigate to the route
    Failed(Route),
}

/// イベント取得のユースケース
pub struct LoadEventUseCase {
    /// EventGateway（イベント API の抽象化）
    event_gateway: Arc<dyn EventGateway>,
}

impl LoadEventUseCase {
    /// 新しい LoadEventUseCase を作成
    pub fn new(event_gateway: Arc<dyn EventGateway>) -> Self {
        Self { event_gateway }
    }

    /// Fetch the current event and seed the store.
    ///
    /// On success the store clears the roster and installs event, quiz and
    /// participants from the payload. A 403 always navigates to the login
    /// page; any other failure queues a generic error notification and
    /// navigates back to the professor dashboard.
    pub async fn execute(&self, store: &mut AppStore, on_not_found: OnNotFound) -> LoadOutcome {
        let Some(token) = store.token().map(str::to_string) else {
            tracing::warn!("Event load attempted without a session token");
            return LoadOutcome::Failed(Route::Home);
        };

        match self.event_gateway.current_event(&token).await {
            Ok(event) => {
                store.begin_event(event);
                tracing::info!(
                    "Event loaded, {} participant(s) in roster",
                    store.roster().len()
                );
                LoadOutcome::Loaded
            }
            Err(GatewayError::NotFound) if on_not_found == OnNotFound::RenderEmpty => {
                tracing::info!("No current event for this professor");
                LoadOutcome::NoEvent
            }
            Err(GatewayError::Forbidden) => {
                tracing::warn!("Event load forbidden, session expired");
                LoadOutcome::Failed(Route::Login)
            }
            Err(e) => {
                tracing::warn!("Event load failed: {}", e);
                store.push_error("An error has occurred.");
                LoadOutcome::Failed(Route::ProfessorHome)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Event, MockEventGateway, NotificationKind, Participant, Quiz};
    use chrono::{TimeZone, Utc};

    fn seeded_store() -> AppStore {
        let mut store = AppStore::new();
        store.set_token("professor-token".to_string());
        store
    }

    fn demo_event() -> Event {
        Event {
            start: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            started: false,
            started_at: None,
            in_future: true,
            quiz: Some(Quiz {
                id: 1,
                title: "Les fractions".to_string(),
                slug: "les-fractions".to_string(),
                strict: true,
                shuffle: false,
            }),
            users: Some(vec![Participant {
                id: 1,
                username: "alice".to_string(),
                last_name: "Martin".to_string(),
                connection_state: None,
                warnings: Vec::new(),
            }]),
        }
    }

    #[tokio::test]
    async fn test_found_event_seeds_store() {
        // テスト項目: イベントが見つかるとストアに反映される
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway
            .expect_current_event()
            .once()
            .returning(|_| Ok(demo_event()));
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        let outcome = usecase.execute(&mut store, OnNotFound::RenderEmpty).await;

        // then (期待する結果):
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert!(store.event().is_some());
        assert_eq!(store.quiz().unwrap().title, "Les fractions");
        assert_eq!(store.roster().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_with_opt_in_renders_empty() {
        // テスト項目: opt-in した場合、イベント無しはエラーにならない
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway
            .expect_current_event()
            .once()
            .returning(|_| Err(GatewayError::NotFound));
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        let outcome = usecase.execute(&mut store, OnNotFound::RenderEmpty).await;

        // then (期待する結果):
        assert_eq!(outcome, LoadOutcome::NoEvent);
        assert!(store.drain_notifications().is_empty());
    }

    #[tokio::test]
    async fn test_not_found_without_opt_in_fails_with_notification() {
        // テスト項目: opt-in しない場合、イベント無しは一般エラー扱いになる
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway
            .expect_current_event()
            .once()
            .returning(|_| Err(GatewayError::NotFound));
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        let outcome = usecase.execute(&mut store, OnNotFound::Redirect).await;

        // then (期待する結果):
        assert_eq!(outcome, LoadOutcome::Failed(Route::ProfessorHome));
        let notifications = store.drain_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_forbidden_navigates_to_login() {
        // テスト項目: 403 はログインページへのリダイレクトになる
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway
            .expect_current_event()
            .once()
            .returning(|_| Err(GatewayError::Forbidden));
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        let outcome = usecase.execute(&mut store, OnNotFound::RenderEmpty).await;

        // then (期待する結果):
        assert_eq!(outcome, LoadOutcome::Failed(Route::Login));
    }

    #[tokio::test]
    async fn test_network_failure_notifies_and_navigates_back() {
        // テスト項目: ネットワーク失敗で通知が積まれ、安全なページに戻る
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway
            .expect_current_event()
            .once()
            .returning(|_| Err(GatewayError::Network("timeout".to_string())));
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        let outcome = usecase.execute(&mut store, OnNotFound::RenderEmpty).await;

        // then (期待する結果):
        assert_eq!(outcome, LoadOutcome::Failed(Route::ProfessorHome));
        assert_eq!(store.drain_notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_refetch_replaces_previous_roster() {
        // テスト項目: 再実行で前回のロスターが新しいペイロードに置き換わる
        // given (前提条件):
        let mut gateway = MockEventGateway::new();
        gateway.expect_current_event().times(2).returning(|_| {
            let mut event = demo_event();
            event.users = Some(vec![Participant {
                id: 9,
                username: "zoe".to_string(),
                last_name: "Bernard".to_string(),
                connection_state: None,
                warnings: Vec::new(),
            }]);
            Ok(event)
        });
        let usecase = LoadEventUseCase::new(Arc::new(gateway));
        let mut store = seeded_store();

        // when (操作):
        usecase.execute(&mut store, OnNotFound::RenderEmpty).await;
        usecase.execute(&mut store, OnNotFound::RenderEmpty).await;

        // then (期待する結果):
        assert_eq!(store.roster().len(), 1);
        assert!(store.roster().get(9).is_some());
    }
}
