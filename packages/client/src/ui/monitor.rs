//! The live monitoring page loop.
//!
//! Wires guard, event loader, real-time channel and store together:
//! channel events are applied one at a time in arrival order, the display
//! is recomputed on a one-second tick, and `start` / `quit` commands are
//! accepted from the professor. Lost connections are retried with a fixed
//! policy before giving up.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use terakoya_shared::time::{Clock, SystemClock};
use tokio::sync::mpsc;

use crate::domain::{AppStore, permission, timer::TimerView, view::event_badge};
use crate::infrastructure::{api::ApiClient, channel::EventChannel};
use crate::usecase::{
    Applied, AuthOutcome, AuthenticateUseCase, LoadEventUseCase, LoadOutcome, OnNotFound,
    apply_channel_event, can_start_quiz,
};

use super::formatter::MonitorFormatter;
use super::input::{Command, spawn_input_thread};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;
const TICK_INTERVAL_SECS: u64 = 1;

/// Configuration of one monitoring page instance.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Base URL of the backend REST API
    pub api_url: String,
    /// URL of the real-time channel endpoint
    pub ws_url: String,
    /// Caller-supplied session token
    pub token: Option<String>,
}

/// Why one channel session ended.
enum SessionEnd {
    Lost,
    Quit,
}

/// Run the professor's live monitoring view until quit or failure.
pub async fn run_monitor(config: MonitorConfig) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(ApiClient::new(config.api_url.clone()));
    let guard = AuthenticateUseCase::new(api.clone());
    let loader = LoadEventUseCase::new(api.clone());
    let clock = SystemClock;
    let mut store = AppStore::new();

    // Session guard: fail closed before anything renders
    match guard
        .execute(config.token.as_deref(), permission::PROFESSOR)
        .await
    {
        AuthOutcome::Authorized { .. } => {}
        AuthOutcome::Denied(route) => {
            print!("{}", MonitorFormatter::format_redirect(route));
            return Ok(());
        }
    }
    if let Some(token) = config.token.clone() {
        store.set_token(token);
    }

    // Initial event load; a missing event renders the empty view
    match loader.execute(&mut store, OnNotFound::RenderEmpty).await {
        LoadOutcome::Loaded => {}
        LoadOutcome::NoEvent => {
            print!("{}", MonitorFormatter::format_no_event());
            return Ok(());
        }
        LoadOutcome::Failed(route) => {
            flush_notifications(&mut store);
            print!("{}", MonitorFormatter::format_redirect(route));
            return Ok(());
        }
    }

    let mut timer = store.event().map(TimerView::for_event);
    let mut commands = spawn_input_thread();

    let token = store.token().unwrap_or_default().to_string();
    let mut reconnect_count = 0;

    println!("Type 'start' to launch the test, 'quit' to leave.");

    loop {
        let (channel, mut events) = match EventChannel::connect(&config.ws_url, &token).await {
            Ok(pair) => pair,
            Err(e) => {
                tracing::warn!("Channel connection failed: {}", e);
                reconnect_count += 1;
                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Leaving.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    break;
                }
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
                continue;
            }
        };
        reconnect_count = 0;

        // Announce this monitor on the event's channel scope
        if channel.join().is_err() {
            channel.close().await;
            reconnect_count += 1;
            if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                tracing::error!(
                    "Failed to reconnect after {} attempts. Leaving.",
                    MAX_RECONNECT_ATTEMPTS
                );
                break;
            }
            tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            continue;
        }

        let end = run_session(
            &channel,
            &mut events,
            &mut commands,
            &loader,
            &mut store,
            &mut timer,
            &clock,
        )
        .await;

        // Teardown always detaches the channel before leaving or retrying
        channel.close().await;

        match end {
            SessionEnd::Quit => break,
            SessionEnd::Lost => {
                store.end_event();
                reconnect_count += 1;
                if reconnect_count >= MAX_RECONNECT_ATTEMPTS {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Leaving.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    break;
                }
                tracing::info!(
                    "Connection lost, reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;

                // Reconcile with the authoritative source before resuming
                match loader.execute(&mut store, OnNotFound::RenderEmpty).await {
                    LoadOutcome::Loaded => {
                        timer = advance_timer(timer, &store);
                    }
                    LoadOutcome::NoEvent => {
                        print!("{}", MonitorFormatter::format_no_event());
                        break;
                    }
                    LoadOutcome::Failed(route) => {
                        flush_notifications(&mut store);
                        print!("{}", MonitorFormatter::format_redirect(route));
                        break;
                    }
                }
            }
        }
    }

    // Page teardown: the channel is already detached, drop derived state
    store.end_event();

    Ok(())
}

/// One channel session: apply events until the connection is lost or the
/// professor quits.
async fn run_session(
    channel: &EventChannel,
    events: &mut mpsc::Receiver<crate::domain::ChannelEvent>,
    commands: &mut mpsc::UnboundedReceiver<Command>,
    loader: &LoadEventUseCase,
    store: &mut AppStore,
    timer: &mut Option<TimerView>,
    clock: &dyn Clock,
) -> SessionEnd {
    let mut tick = tokio::time::interval(Duration::from_secs(TICK_INTERVAL_SECS));

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else {
                    return SessionEnd::Lost;
                };
                match apply_channel_event(store, event) {
                    Applied::RosterChanged => render(store, timer.as_ref(), clock),
                    Applied::RefetchRequired => {
                        // event:start reconciles with the backend instead of
                        // mutating state directly
                        if let LoadOutcome::Loaded =
                            loader.execute(store, OnNotFound::RenderEmpty).await
                        {
                            *timer = advance_timer(*timer, store);
                        }
                        render(store, timer.as_ref(), clock);
                    }
                    Applied::Ignored => {}
                    Applied::ConnectionLost => return SessionEnd::Lost,
                }
            }
            _ = tick.tick() => {
                render(store, timer.as_ref(), clock);
            }
            command = commands.recv() => {
                match command {
                    Some(Command::StartQuiz) => {
                        if !can_start_quiz(store) {
                            store.push_error("The test has already started.");
                        } else if channel.start_quiz().is_err() {
                            store.push_error("An error has occurred.");
                        }
                        render(store, timer.as_ref(), clock);
                    }
                    Some(Command::Unknown(line)) => {
                        store.push_error(format!("Unknown command '{}'.", line));
                        render(store, timer.as_ref(), clock);
                    }
                    Some(Command::Quit) | None => return SessionEnd::Quit,
                }
            }
        }
    }
}

/// Print and empty the pending notification queue.
fn flush_notifications(store: &mut AppStore) {
    for notification in store.drain_notifications() {
        print!("{}", MonitorFormatter::format_notification(&notification));
    }
}

/// Re-derive the timer after a fresh event fetch (Elapsed stays terminal).
fn advance_timer(timer: Option<TimerView>, store: &AppStore) -> Option<TimerView> {
    match (timer, store.event()) {
        (Some(timer), Some(event)) => Some(timer.advance(event)),
        (None, Some(event)) => Some(TimerView::for_event(event)),
        (timer, None) => timer,
    }
}

/// Recompute and print the whole view for the current state.
fn render(store: &mut AppStore, timer: Option<&TimerView>, clock: &dyn Clock) {
    let mut frame = String::new();

    // Clear screen, cursor home
    frame.push_str("\x1b[2J\x1b[1;1H");

    let title = store
        .quiz()
        .map(|quiz| quiz.title.clone())
        .unwrap_or_else(|| "Direct test".to_string());
    frame.push_str(&MonitorFormatter::format_header(
        &title,
        event_badge(store.event()),
    ));

    if let Some(timer) = timer {
        frame.push_str(&MonitorFormatter::format_timer(&timer.render(clock)));
    }

    frame.push_str(&MonitorFormatter::format_roster(
        &store.roster().sorted_by_id(),
    ));

    for notification in store.drain_notifications() {
        frame.push_str(&MonitorFormatter::format_notification(&notification));
    }

    print!("{}", frame);
    std::io::stdout().flush().ok();
}
