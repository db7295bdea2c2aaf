//! Integration tests running the client gateways and the real-time channel
//! against the in-process development server.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, timeout};

use terakoya_client::domain::{
    AppStore, AuthGateway, ChannelEvent, GatewayError, GroupGateway, Route, permission,
    view::{Dot, warning_dots},
};
use terakoya_client::infrastructure::{api::ApiClient, channel::EventChannel};
use terakoya_client::usecase::{
    AuthOutcome, AuthenticateUseCase, CreateGroupOutcome, CreateGroupUseCase, LoadEventUseCase,
    LoadOutcome, OnNotFound, apply_channel_event,
};
use terakoya_server::seed::{ADMIN_TOKEN, PROFESSOR_TOKEN, demo_state};

const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Start the dev server on an ephemeral port.
///
/// Returns the REST base URL and the channel endpoint URL.
async fn start_server(start_in_secs: i64) -> (String, String) {
    let state = Arc::new(demo_state(start_in_secs));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        let _ = terakoya_server::serve(listener, state).await;
    });

    (format!("http://{}", addr), format!("ws://{}/ws", addr))
}

/// Connect a channel and give the server time to register the monitor.
async fn connect_monitor(
    ws_url: &str,
    token: &str,
) -> (EventChannel, tokio::sync::mpsc::Receiver<ChannelEvent>) {
    let (channel, events) = EventChannel::connect(ws_url, token)
        .await
        .expect("Failed to connect channel");
    channel.join().expect("Failed to emit join");
    // Registration happens on the server after the upgrade completes
    sleep(Duration::from_millis(200)).await;
    (channel, events)
}

#[tokio::test]
async fn test_validate_token_roundtrip() {
    // テスト項目: トークン検証がロール権限付きで往復する
    // given (前提条件):
    let (api_url, _ws_url) = start_server(300).await;
    let api = ApiClient::new(api_url);

    // when (操作):
    let professor = api.validate_token(PROFESSOR_TOKEN).await.unwrap();
    let bogus = api.validate_token("bogus-token").await.unwrap();

    // then (期待する結果):
    assert!(professor.valid);
    assert_eq!(
        professor.role_permission.as_deref(),
        Some(permission::PROFESSOR)
    );
    assert!(!bogus.valid);
    assert!(bogus.role_permission.is_none());
}

#[tokio::test]
async fn test_guard_denies_invalid_token_without_content() {
    // テスト項目: 無効なトークンではガードがホームへのリダイレクトを返す
    // given (前提条件):
    let (api_url, _ws_url) = start_server(300).await;
    let guard = AuthenticateUseCase::new(Arc::new(ApiClient::new(api_url)));

    // when (操作):
    let outcome = guard
        .execute(Some("bogus-token"), permission::PROFESSOR)
        .await;

    // then (期待する結果):
    assert_eq!(outcome, AuthOutcome::Denied(Route::Home));
}

#[tokio::test]
async fn test_load_event_seeds_store_from_backend() {
    // テスト項目: イベントロードでクイズとロスターがストアに反映される
    // given (前提条件):
    let (api_url, _ws_url) = start_server(300).await;
    let api = Arc::new(ApiClient::new(api_url));
    let guard = AuthenticateUseCase::new(api.clone());
    let loader = LoadEventUseCase::new(api);
    let mut store = AppStore::new();

    // when (操作):
    let auth = guard
        .execute(Some(PROFESSOR_TOKEN), permission::PROFESSOR)
        .await;
    store.set_token(PROFESSOR_TOKEN.to_string());
    let outcome = loader.execute(&mut store, OnNotFound::RenderEmpty).await;

    // then (期待する結果):
    assert!(matches!(auth, AuthOutcome::Authorized { .. }));
    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(store.quiz().unwrap().title, "Les fractions");
    assert_eq!(store.roster().len(), 3);
    assert!(store.event().unwrap().in_future);
    let ids: Vec<i64> = store.roster().sorted_by_id().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_create_group_conflict_on_duplicate_name() {
    // テスト項目: 同名グループの再作成が 409 として通知される
    // given (前提条件):
    let (api_url, _ws_url) = start_server(300).await;
    let api = Arc::new(ApiClient::new(api_url));
    let usecase = CreateGroupUseCase::new(api.clone());
    let mut store = AppStore::new();
    store.set_token(ADMIN_TOKEN.to_string());

    // when (操作):
    let first = usecase.execute(&mut store, "Term1").await;
    store.drain_notifications();
    let duplicate = usecase.execute(&mut store, "Term1").await;

    // then (期待する結果):
    assert_eq!(first, CreateGroupOutcome::Created(Route::AdminGroups));
    assert_eq!(duplicate, CreateGroupOutcome::Stay);
    let notifications = store.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, "This group already exists.");
    let groups = api.groups(ADMIN_TOKEN).await.unwrap();
    assert_eq!(groups.len(), 1);
}

#[tokio::test]
async fn test_group_listing_without_session_is_forbidden() {
    // テスト項目: セッション無しのグループ一覧取得は 403 になる
    // given (前提条件):
    let (api_url, _ws_url) = start_server(300).await;
    let api = ApiClient::new(api_url);

    // when (操作):
    let result = api.groups("bogus-token").await;

    // then (期待する結果):
    assert!(matches!(result, Err(GatewayError::Forbidden)));
}

#[tokio::test]
async fn test_channel_rejects_invalid_token() {
    // テスト項目: 無効なトークンではチャンネル接続が拒否される
    // given (前提条件):
    let (_api_url, ws_url) = start_server(300).await;

    // when (操作):
    let result = EventChannel::connect(&ws_url, "bogus-token").await;

    // then (期待する結果):
    assert!(result.is_err());
}

#[tokio::test]
async fn test_warn_push_updates_roster() {
    // テスト項目: user:warn のプッシュがロスターの警告に反映される
    // given (前提条件):
    let (api_url, ws_url) = start_server(300).await;
    let api = Arc::new(ApiClient::new(api_url.clone()));
    let loader = LoadEventUseCase::new(api);
    let mut store = AppStore::new();
    store.set_token(PROFESSOR_TOKEN.to_string());
    loader.execute(&mut store, OnNotFound::RenderEmpty).await;

    let (channel, mut events) = connect_monitor(&ws_url, PROFESSOR_TOKEN).await;

    // when (操作):
    let http = reqwest::Client::new();
    http.post(format!("{}/debug/users/1/warn", api_url))
        .json(&serde_json::json!({ "amount": 5 }))
        .send()
        .await
        .expect("Failed to inject warning");

    let event = timeout(RECV_TIMEOUT, events.recv())
        .await
        .expect("Timed out waiting for channel event")
        .expect("Channel closed unexpectedly");
    apply_channel_event(&mut store, event.clone());

    // then (期待する結果):
    assert_eq!(
        event,
        ChannelEvent::UserWarn {
            user_id: 1,
            amount: 5
        }
    );
    let warnings = &store.roster().get(1).unwrap().warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].amount, 5);
    // Clamped for display: two yellow dots and one red, none neutral
    assert_eq!(warning_dots(warnings), [Dot::Yellow, Dot::Yellow, Dot::Red]);

    channel.close().await;
}

#[tokio::test]
async fn test_quiz_start_roundtrip_flips_event_to_running() {
    // テスト項目: quiz:start の送信が event:start として返り、再取得で in_future が false になる
    // given (前提条件):
    // The seeded event start lies in the past, so it is startable
    let (api_url, ws_url) = start_server(-10).await;
    let api = Arc::new(ApiClient::new(api_url));
    let loader = LoadEventUseCase::new(api);
    let mut store = AppStore::new();
    store.set_token(PROFESSOR_TOKEN.to_string());
    loader.execute(&mut store, OnNotFound::RenderEmpty).await;

    let (channel, mut events) = connect_monitor(&ws_url, PROFESSOR_TOKEN).await;

    // when (操作):
    channel.start_quiz().expect("Failed to emit quiz:start");
    let event = timeout(RECV_TIMEOUT, events.recv())
        .await
        .expect("Timed out waiting for channel event")
        .expect("Channel closed unexpectedly");

    // then (期待する結果):
    assert_eq!(event, ChannelEvent::EventStart);

    // event:start triggers a re-fetch instead of direct mutation
    let outcome = loader.execute(&mut store, OnNotFound::RenderEmpty).await;
    assert_eq!(outcome, LoadOutcome::Loaded);
    let refetched = store.event().unwrap();
    assert!(!refetched.in_future);
    assert!(refetched.started);
    assert!(refetched.started_at.is_some());

    channel.close().await;
}
