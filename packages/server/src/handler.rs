//! HTTP and WebSocket handlers of the stand-in backend.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::dto::{
    CreateGroupRequest, GroupDto, IncomingMessage, OutgoingMessage, ParticipantDto,
    ValidateTokenResponse, WarnRequest,
};
use crate::state::AppState;

/// Query parameters for a channel connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: String,
}

/// Extract the bearer token from the Authorization header
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /auth/validateToken`
///
/// Unknown tokens are not an error: the response carries `valid: false`
/// and the caller fails closed.
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ValidateTokenResponse> {
    let session = match bearer_token(&headers) {
        Some(token) => state.session_for(&token).await,
        None => None,
    };

    match session {
        Some(session) => Json(ValidateTokenResponse {
            valid: true,
            role_permission: Some(session.role_permission),
        }),
        None => Json(ValidateTokenResponse {
            valid: false,
            role_permission: None,
        }),
    }
}

/// `GET /api/events/current`
pub async fn current_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, StatusCode> {
    require_session(&state, &headers).await?;

    match state.current_event_dto().await {
        Some(event) => Ok(Json(event)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// `GET /api/groups`
pub async fn get_groups(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<GroupDto>>, StatusCode> {
    require_session(&state, &headers).await?;
    Ok(Json(state.groups().await))
}

/// `POST /api/groups`
///
/// Duplicate names are rejected with 409 so the form surfaces a conflict
/// notification instead of silently overwriting.
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<CreateGroupRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    require_session(&state, &headers).await?;

    if request.name.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let id = Uuid::new_v4().to_string();
    match state.create_group(id, &request.name).await {
        Some(group) => {
            tracing::info!("Group '{}' created", group.name);
            Ok((StatusCode::CREATED, Json(group)))
        }
        None => {
            tracing::warn!("Group '{}' already exists. Rejecting.", request.name);
            Err(StatusCode::CONFLICT)
        }
    }
}

async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = bearer_token(headers).ok_or(StatusCode::FORBIDDEN)?;
    state
        .session_for(&token)
        .await
        .map(|_| ())
        .ok_or(StatusCode::FORBIDDEN)
}

/// `GET /ws?token=…` — channel endpoint for monitors.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(session) = state.session_for(&query.token).await else {
        tracing::warn!("Channel connection with invalid token. Rejecting.");
        return Err(StatusCode::FORBIDDEN);
    };

    let monitor_id = Uuid::new_v4().to_string();
    tracing::info!(
        "Monitor '{}' ({}) connecting",
        monitor_id,
        session.username
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, monitor_id)))
}

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>, monitor_id: String) {
    let (mut sender, mut receiver) = socket.split();

    // Register this monitor for pushes
    let (tx, mut rx) = mpsc::unbounded_channel();
    state.register_monitor(monitor_id.clone(), tx).await;

    let state_clone = state.clone();
    let monitor_id_clone = monitor_id.clone();

    // Receive commands from this monitor
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("Channel read error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<IncomingMessage>(&text) {
                    Ok(IncomingMessage::UserJoin) => {
                        tracing::info!("Monitor '{}' joined the event scope", monitor_id_clone);
                    }
                    Ok(IncomingMessage::QuizStart) => {
                        // The launch command reconciles server-side; monitors
                        // only learn about it through event:start
                        if state_clone.start_event().await {
                            let json = serde_json::to_string(&OutgoingMessage::EventStart)
                                .expect("message serialization cannot fail");
                            state_clone.broadcast(&json).await;
                        } else {
                            tracing::warn!(
                                "Monitor '{}' tried to start an event that is not startable",
                                monitor_id_clone
                            );
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Unparseable channel message: {}", e);
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Monitor '{}' requested close", monitor_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Forward pushes to this monitor
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.unregister_monitor(&monitor_id).await;
    tracing::info!("Monitor '{}' disconnected", monitor_id);
}

/// `POST /debug/users/update` — inject a participant update (dev/testing).
pub async fn debug_update_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<ParticipantDto>,
) -> Result<StatusCode, StatusCode> {
    if !state.upsert_user(user.clone()).await {
        return Err(StatusCode::NOT_FOUND);
    }

    let json = serde_json::to_string(&OutgoingMessage::UserUpdate { user })
        .expect("message serialization cannot fail");
    state.broadcast(&json).await;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /debug/users/{id}/warn` — inject a warning (dev/testing).
pub async fn debug_warn_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(request): Json<WarnRequest>,
) -> Result<StatusCode, StatusCode> {
    if !state.warn_user(user_id, request.amount).await {
        return Err(StatusCode::NOT_FOUND);
    }

    let json = serde_json::to_string(&OutgoingMessage::UserWarn {
        user_id,
        amount: request.amount,
    })
    .expect("message serialization cannot fail");
    state.broadcast(&json).await;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /debug/event/start` — start the event without a monitor (dev/testing).
pub async fn debug_start_event(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, StatusCode> {
    if !state.start_event().await {
        return Err(StatusCode::CONFLICT);
    }

    let json = serde_json::to_string(&OutgoingMessage::EventStart)
        .expect("message serialization cannot fail");
    state.broadcast(&json).await;
    Ok(StatusCode::NO_CONTENT)
}
