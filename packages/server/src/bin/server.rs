//! Development stand-in backend for Terakoya.
//!
//! Serves token validation, the current-event resource, the group resource
//! and the real-time channel with seeded demo data.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin terakoya-server
//! cargo run --bin terakoya-server -- --port 9090 --start-in 60
//! ```

use clap::Parser;

use terakoya_server::run_server;
use terakoya_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Terakoya development backend with live event push", long_about = None)]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(short = 'p', long, default_value_t = 8080)]
    port: u16,

    /// Seconds until the seeded event starts (negative for an already
    /// startable event)
    #[arg(long, default_value_t = 300)]
    start_in: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logger("server", "info");

    let args = Args::parse();
    run_server(args.host, args.port, args.start_in).await
}
