//! Command surface exposed to the embedding shell
//!
//! Thin async wrappers around the core services: each command times the
//! call, logs the outcome with structured fields, and returns the domain
//! result unchanged.

pub mod auth;
pub mod chat;
pub mod profile;

use std::time::Instant;

use mediatracker_domain::Result;
use tracing::warn;

pub use auth::*;
pub use chat::*;
pub use profile::*;

use crate::utils::logging::{error_label, log_command_execution};

/// Log the outcome of a finished command.
fn finish<T>(command: &str, start: Instant, result: &Result<T>) {
    log_command_execution(command, start.elapsed(), result.is_ok());
    if let Err(err) = result {
        warn!(command, error_type = error_label(err), error = %err, "command failed");
    }
}
