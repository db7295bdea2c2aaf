//! Real-time channel transport.
//!
//! [`EventChannel`] owns the WebSocket connection to the platform's push
//! channel: it authenticates with the session token, parses incoming
//! messages into typed [`ChannelEvent`]s delivered over an mpsc receiver,
//! and exposes explicit emit and close operations. Dropping the receiver
//! or calling [`EventChannel::close`] detaches everything.

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::domain::ChannelEvent;
use crate::infrastructure::dto::conversion::channel_event_from;
use crate::infrastructure::dto::websocket::{IncomingMessage, OutgoingMessage};

/// Capacity of the typed event channel delivered to the monitoring loop.
const EVENT_BUFFER: usize = 256;

/// Channel transport errors
#[derive(Debug, Error)]
pub enum ChannelError {
    /// No session token available; the channel is never opened without one
    #[error("no session token, channel not opened")]
    MissingToken,

    /// Connection or handshake failure
    #[error("connection error: {0}")]
    Connect(String),

    /// The channel is already closed
    #[error("channel closed")]
    Closed,
}

enum WriterCommand {
    Send(OutgoingMessage),
    Shutdown,
}

/// Handle owning one channel connection.
pub struct EventChannel {
    commands: mpsc::UnboundedSender<WriterCommand>,
    read_task: JoinHandle<()>,
    write_task: JoinHandle<()>,
}

impl EventChannel {
    /// Open the channel, authenticated by the session token.
    ///
    /// Returns the owning handle and the receiver of typed events. The
    /// receiver yields [`ChannelEvent::Disconnected`] exactly once when the
    /// connection is lost or closed by the server.
    pub async fn connect(
        ws_url: &str,
        token: &str,
    ) -> Result<(Self, mpsc::Receiver<ChannelEvent>), ChannelError> {
        if token.is_empty() {
            return Err(ChannelError::MissingToken);
        }

        let url = format!("{}?token={}", ws_url, token);
        let (ws_stream, _response) = connect_async(&url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;

        tracing::info!("Channel connected");

        let (mut write, mut read) = ws_stream.split();
        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (commands, mut commands_rx) = mpsc::unbounded_channel();

        // Parse incoming frames into typed events, one at a time
        let read_task = tokio::spawn(async move {
            loop {
                match read.next().await {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<IncomingMessage>(&text) {
                            Ok(incoming) => {
                                if let Some(event) = channel_event_from(incoming)
                                    && events_tx.send(event).await.is_err()
                                {
                                    // Receiver gone, the page is tearing down
                                    return;
                                }
                            }
                            Err(e) => {
                                tracing::warn!("Unparseable channel message: {}", e);
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Channel closed by the server");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Channel read error: {}", e);
                        break;
                    }
                }
            }

            let _ = events_tx.send(ChannelEvent::Disconnected).await;
        });

        // Serialize and send outgoing messages
        let write_task = tokio::spawn(async move {
            while let Some(command) = commands_rx.recv().await {
                match command {
                    WriterCommand::Send(message) => {
                        let json = match serde_json::to_string(&message) {
                            Ok(json) => json,
                            Err(e) => {
                                tracing::error!("Failed to serialize channel message: {}", e);
                                continue;
                            }
                        };
                        if let Err(e) = write.send(Message::Text(json.into())).await {
                            tracing::warn!("Failed to send on channel: {}", e);
                            break;
                        }
                    }
                    WriterCommand::Shutdown => {
                        let _ = write.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
        });

        Ok((
            Self {
                commands,
                read_task,
                write_task,
            },
            events_rx,
        ))
    }

    /// Emit the `user:join` signal scoped to the current event.
    pub fn join(&self) -> Result<(), ChannelError> {
        self.commands
            .send(WriterCommand::Send(OutgoingMessage::UserJoin))
            .map_err(|_| ChannelError::Closed)
    }

    /// Emit the `quiz:start` launch command.
    pub fn start_quiz(&self) -> Result<(), ChannelError> {
        self.commands
            .send(WriterCommand::Send(OutgoingMessage::QuizStart))
            .map_err(|_| ChannelError::Closed)
    }

    /// Close the channel and detach both transport tasks.
    ///
    /// A close frame is sent when the writer is still alive; the read task
    /// is aborted so no further events are delivered.
    pub async fn close(mut self) {
        self.read_task.abort();
        if self.commands.send(WriterCommand::Shutdown).is_ok() {
            let _ = (&mut self.write_task).await;
        } else {
            self.write_task.abort();
        }
        tracing::info!("Channel detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_without_token_is_rejected() {
        // テスト項目: トークンが無い場合はチャンネルを開かない
        // given (前提条件):
        let token = "";

        // when (操作):
        let result = EventChannel::connect("ws://127.0.0.1:9/ws", token).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChannelError::MissingToken)));
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_server_fails() {
        // テスト項目: 接続できない場合は Connect エラーになる
        // given (前提条件):
        // Port 9 (discard) is not listening for WebSocket connections
        let url = "ws://127.0.0.1:9/ws";

        // when (操作):
        let result = EventChannel::connect(url, "professor-token").await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChannelError::Connect(_))));
    }
}
