use std::time::Duration;

use mediatracker_domain::MediaTrackerError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for the application binary.
///
/// The filter comes from `RUST_LOG` when set, defaulting to `info` for our
/// crates and `warn` elsewhere.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,mediatracker=info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"chat::send_message"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
///
/// The helper keeps the command wrappers concise and the log shape uniform.
/// Callers must avoid forwarding sensitive values in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `MediaTrackerError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &MediaTrackerError) -> &'static str {
    match error {
        MediaTrackerError::Auth(_) => "auth",
        MediaTrackerError::Profile(_) => "profile",
        MediaTrackerError::Validation(_) => "validation",
        MediaTrackerError::Fetch(_) => "fetch",
        MediaTrackerError::Send(_) => "send",
        MediaTrackerError::NotLoggedIn => "not_logged_in",
        MediaTrackerError::Network(_) => "network",
        MediaTrackerError::Config(_) => "config",
        MediaTrackerError::Storage(_) => "storage",
        MediaTrackerError::Internal(_) => "internal",
    }
}
