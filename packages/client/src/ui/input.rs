//! Interactive command input for the monitor.
//!
//! rustyline runs on a dedicated blocking thread and forwards parsed
//! commands over an mpsc channel to the async monitoring loop.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;

/// A command typed by the professor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the test (`start`)
    StartQuiz,
    /// Leave the monitoring view (`quit`, `exit`)
    Quit,
    /// Anything else
    Unknown(String),
}

/// Parse one input line into a command.
pub fn parse_command(line: &str) -> Command {
    match line.trim().to_lowercase().as_str() {
        "start" => Command::StartQuiz,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Spawn the blocking readline thread.
///
/// The returned receiver yields one command per non-empty input line and
/// closes when the professor interrupts (Ctrl+C / Ctrl+D).
pub fn spawn_input_thread() -> mpsc::UnboundedReceiver<Command> {
    let (input_tx, input_rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline("> ") {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(parse_command(line)).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    let _ = input_tx.send(Command::Quit);
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    let _ = input_tx.send(Command::Quit);
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
