//! Terminal UI helpers for consistent colored output.

use std::future::Future;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Print a success message with green checkmark.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an info message with blue info icon.
pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

/// Print an error message with red X.
fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint/suggestion (dimmed, indented).
fn hint(msg: &str) {
    eprintln!("  {} {}", "→".dimmed(), msg.dimmed());
}

/// Format a value as bold (for counts, dates).
pub fn bold(s: &str) -> String {
    s.bold().to_string()
}

/// Run an async operation with a spinner showing the given message.
/// Returns the result of the operation.
pub async fn spin<T, F: Future<Output = T>>(msg: &str, fut: F) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.dim} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = fut.await;

    spinner.finish_and_clear();
    result
}

/// Display an error with a hint for the failures this client commonly hits.
pub fn print_error(err: &anyhow::Error) {
    let msg = err.to_string();
    error(&msg);

    if let Some(suggestion) = hint_for(&msg) {
        hint(suggestion);
    }
}

/// Pick a hint from the error text. Server-side failures arrive as the
/// `error` field of the 500 body, so store errors are matched by content.
fn hint_for(msg: &str) -> Option<&'static str> {
    let lower = msg.to_lowercase();

    if lower.contains("maximum value") {
        Some("A counter is saturated in the store; reset it before reporting again.")
    } else if lower.contains("redis")
        || lower.contains("connection refused")
        || lower.contains("readonly")
        || lower.contains("broken pipe")
    {
        Some("The API is up but its counter store is not. Run: api --ping")
    } else if lower.contains("missing field") || lower.contains("invalid type") {
        Some("The server answered with an unexpected body. Check CHECKSTATS_API_URL.")
    } else if lower.contains("error sending request")
        || lower.contains("dns")
        || lower.contains("timed out")
        || lower.contains("resolve")
    {
        Some("Check that the stats API is reachable at CHECKSTATS_API_URL.")
    } else {
        None
    }
}
