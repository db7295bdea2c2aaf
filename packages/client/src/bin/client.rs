//! Live monitoring client for Terakoya quiz events.
//!
//! Validates the session token, loads the professor's current event and
//! keeps the live roster view synchronized over the real-time channel.
//! Lost connections are retried (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin terakoya-client -- --token professor-token
//! cargo run --bin terakoya-client -- --api-url http://127.0.0.1:8080 -t professor-token
//! ```

use clap::Parser;

use terakoya_client::ui::{MonitorConfig, run_monitor};
use terakoya_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Live monitoring client for Terakoya quiz events", long_about = None)]
struct Args {
    /// Base URL of the backend REST API
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    api_url: String,

    /// URL of the real-time channel endpoint
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    ws_url: String,

    /// Session token (falls back to the TERAKOYA_TOKEN environment variable)
    #[arg(short = 't', long)]
    token: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger("client", "warn");

    let args = Args::parse();
    let token = args
        .token
        .or_else(|| std::env::var("TERAKOYA_TOKEN").ok());

    run_monitor(MonitorConfig {
        api_url: args.api_url,
        ws_url: args.ws_url,
        token,
    })
    .await
}
